//! Account payloads: user profile, login, registration and token refresh.

use crate::errors::{require, ValidationError, ValidationResult};
use crate::identifier::deserialize_id;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The authenticated user's profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Backend primary key.
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub username: String,
    /// Login email.
    pub email: String,
    /// Optional phone number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}

/// Body of `POST /api/auth/login/`.
#[derive(Clone, Serialize)]
pub struct LoginRequest {
    /// Email used as the login identifier.
    pub email: String,
    /// Plain password.
    pub password: String,
}

impl LoginRequest {
    /// Create a login request.
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Check required fields.
    pub fn validate(&self) -> ValidationResult {
        require("email", &self.email)?;
        require("password", &self.password)
    }
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Tokens returned by a successful login.
#[derive(Clone, Deserialize)]
pub struct TokenPair {
    /// Access token.
    pub access: String,
    /// Refresh token.
    pub refresh: String,
}

impl fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TokenPair { .. }")
    }
}

/// Body of `POST /api/auth/token/refresh/`.
#[derive(Clone, Serialize)]
pub struct RefreshRequest {
    /// The stored refresh token.
    pub refresh: String,
}

/// Response of `POST /api/auth/token/refresh/`.
#[derive(Clone, Deserialize)]
pub struct RefreshResponse {
    /// Newly minted access token.
    pub access: String,
}

/// Body of `POST /api/auth/register/`.
#[derive(Clone, Serialize)]
pub struct RegisterRequest {
    /// Display name.
    pub username: String,
    /// Login email.
    pub email: String,
    /// Chosen password.
    pub password: String,
    /// Password confirmation.
    pub password2: String,
    /// Optional phone number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}

impl RegisterRequest {
    /// Create a registration request.
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        password2: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password: password.into(),
            password2: password2.into(),
            phone_number: None,
        }
    }

    /// Attach a phone number. Blank numbers are dropped.
    #[must_use]
    pub fn with_phone_number(mut self, phone: impl Into<String>) -> Self {
        let phone = phone.into();
        self.phone_number = (!phone.trim().is_empty()).then_some(phone);
        self
    }

    /// Check required fields and the password confirmation.
    ///
    /// The username is optional on the signup form, the backend derives one
    /// from the email when it is blank.
    pub fn validate(&self) -> ValidationResult {
        require("email", &self.email)?;
        if !self.email.contains('@') {
            return Err(ValidationError::invalid("email", "not an email address"));
        }
        require("password", &self.password)?;
        require("password2", &self.password2)?;
        if self.password != self.password2 {
            return Err(ValidationError::PasswordMismatch);
        }
        Ok(())
    }
}

impl fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("phone_number", &self.phone_number)
            .finish_non_exhaustive()
    }
}
