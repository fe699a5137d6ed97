//! Client error types.

use crate::store::StoreError;
use leadforge_core::ValidationError;
use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;

/// Errors surfaced by the client.
///
/// Callers branch on the variant: [`ClientError::Unauthenticated`] means the
/// session is gone and the user has to log in again.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Local validation rejected the request before it was sent.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// No usable session: the refresh token was missing or refused.
    #[error("Not authenticated: {reason}")]
    Unauthenticated {
        /// Why the session could not be recovered.
        reason: String,
        /// Body of the 401 response that triggered the recovery.
        body: String,
    },

    /// Non-success status from the backend.
    #[error("Server error {status}: {body}")]
    Server {
        /// HTTP status code.
        status: u16,
        /// Response body.
        body: String,
    },

    /// The response had a different content type than required.
    #[error("Unexpected content type: expected {expected}, got {actual}")]
    ContentTypeMismatch {
        /// Required media type.
        expected: String,
        /// Media type received, empty if the header was absent.
        actual: String,
    },

    /// Transport failure (connect, timeout, TLS, body read).
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// JSON encoding or decoding failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Session persistence failed.
    #[error("Session store error: {0}")]
    Store(#[from] StoreError),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// Create an unauthenticated error.
    pub fn unauthenticated(reason: impl Into<String>, body: impl Into<String>) -> Self {
        Self::Unauthenticated {
            reason: reason.into(),
            body: body.into(),
        }
    }

    /// Create a server error.
    pub fn server(status: u16, body: impl Into<String>) -> Self {
        Self::Server {
            status,
            body: body.into(),
        }
    }

    /// Create a config error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Returns true if the caller should send the user back to login.
    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, Self::Unauthenticated { .. })
    }

    /// Returns true for local validation failures.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Per-field messages from a `400 Bad Request` body such as
    /// `{"email": ["already registered"], "detail": "..."}`.
    ///
    /// Returns `None` for other errors or bodies that are not a JSON object.
    pub fn field_errors(&self) -> Option<BTreeMap<String, Vec<String>>> {
        let Self::Server { status: 400, body } = self else {
            return None;
        };
        let Value::Object(map) = serde_json::from_str::<Value>(body).ok()? else {
            return None;
        };

        let errors = map
            .into_iter()
            .map(|(field, value)| {
                let messages = match value {
                    Value::String(s) => vec![s],
                    Value::Array(items) => items
                        .into_iter()
                        .map(|item| match item {
                            Value::String(s) => s,
                            other => other.to_string(),
                        })
                        .collect(),
                    other => vec![other.to_string()],
                };
                (field, messages)
            })
            .collect();
        Some(errors)
    }

    /// HTTP status, if the backend produced one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Server { status, .. } => Some(*status),
            Self::Unauthenticated { .. } => Some(401),
            Self::Network(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;
