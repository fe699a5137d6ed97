//! Client-side validation errors.
//!
//! These are raised before any request leaves the process, so callers can
//! surface them next to the offending form field.

use thiserror::Error;

/// A request payload failed local validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field was empty.
    #[error("Missing required field: {field}")]
    MissingField {
        /// Wire name of the field.
        field: &'static str,
    },

    /// Password and its confirmation differ.
    #[error("Passwords do not match")]
    PasswordMismatch,

    /// A field had a value the backend would reject.
    #[error("Invalid value for {field}: {reason}")]
    Invalid {
        /// Wire name of the field.
        field: &'static str,
        /// Human-readable reason.
        reason: String,
    },
}

impl ValidationError {
    /// Create a missing-field error.
    pub fn missing(field: &'static str) -> Self {
        Self::MissingField { field }
    }

    /// Create an invalid-value error.
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }

    /// The field this error refers to, if any.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::MissingField { field } | Self::Invalid { field, .. } => Some(field),
            Self::PasswordMismatch => Some("password2"),
        }
    }
}

/// Result type for validation.
pub type ValidationResult<T = ()> = Result<T, ValidationError>;

/// Fail with [`ValidationError::MissingField`] if `value` is blank.
pub(crate) fn require(field: &'static str, value: &str) -> ValidationResult {
    if value.trim().is_empty() {
        Err(ValidationError::missing(field))
    } else {
        Ok(())
    }
}
