//! Session credentials.
//!
//! The backend issues a short-lived access token and a longer-lived refresh
//! token. Both are persisted under fixed keys so a restarted process can
//! resume the session.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Storage key for the access token.
pub const ACCESS_TOKEN_KEY: &str = "access_token";

/// Storage key for the refresh token.
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";

/// Access/refresh token pair held by a session store.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionCredentials {
    /// Bearer token attached to authenticated requests.
    #[serde(rename = "access_token", default, skip_serializing_if = "Option::is_none")]
    pub access: Option<String>,
    /// Token exchanged for a new access token.
    #[serde(rename = "refresh_token", default, skip_serializing_if = "Option::is_none")]
    pub refresh: Option<String>,
}

impl SessionCredentials {
    /// Create credentials holding both tokens.
    pub fn new(access: impl Into<String>, refresh: impl Into<String>) -> Self {
        Self {
            access: Some(access.into()),
            refresh: Some(refresh.into()),
        }
    }

    /// Credentials with nothing stored.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns true if neither token is present.
    pub fn is_empty(&self) -> bool {
        self.access.is_none() && self.refresh.is_none()
    }

    /// Returns true if an access token is present.
    pub fn has_access(&self) -> bool {
        self.access.is_some()
    }

    /// Returns true if a refresh token is present.
    pub fn has_refresh(&self) -> bool {
        self.refresh.is_some()
    }

    /// Replace the access token, keeping the refresh token.
    #[must_use]
    pub fn with_access(mut self, access: impl Into<String>) -> Self {
        self.access = Some(access.into());
        self
    }
}

// Tokens are bearer secrets; keep them out of logs.
impl fmt::Debug for SessionCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionCredentials")
            .field("access", &self.access.as_ref().map(|_| "<redacted>"))
            .field("refresh", &self.refresh.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_storage_keys_on_the_wire() {
        let creds = SessionCredentials::new("a1", "r1");
        let json = serde_json::to_value(&creds).unwrap();
        assert_eq!(json[ACCESS_TOKEN_KEY], "a1");
        assert_eq!(json[REFRESH_TOKEN_KEY], "r1");
    }

    #[test]
    fn test_missing_keys_deserialize_as_none() {
        let creds: SessionCredentials = serde_json::from_str(r#"{"access_token":"a1"}"#).unwrap();
        assert_eq!(creds.access.as_deref(), Some("a1"));
        assert!(!creds.has_refresh());
    }

    #[test]
    fn test_with_access_keeps_refresh() {
        let creds = SessionCredentials::new("old", "r1").with_access("new");
        assert_eq!(creds, SessionCredentials::new("new", "r1"));
    }

    #[test]
    fn test_debug_redacts_tokens() {
        let creds = SessionCredentials::new("secret-access", "secret-refresh");
        let debug = format!("{:?}", creds);
        assert!(!debug.contains("secret"));
        assert!(SessionCredentials::empty().is_empty());
    }
}
