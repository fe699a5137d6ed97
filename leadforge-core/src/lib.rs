//! # leadforge-core
//!
//! Core types shared by the leadforge crates.
//!
//! This crate provides the foundational types used throughout leadforge:
//!
//! - **Session**: access/refresh token pair and the fixed storage keys
//! - **Account**: user profile, login and registration payloads
//! - **Content**: dashboard stats, lead magnets, templates, firm profile
//! - **Generation**: slogan and PDF generation payloads
//! - **Errors**: client-side validation failures
//!
//! ## Example
//!
//! ```rust
//! use leadforge_core::{RegisterRequest, SessionCredentials};
//!
//! let request = RegisterRequest::new("ada", "ada@example.com", "s3cret", "s3cret");
//! assert!(request.validate().is_ok());
//!
//! let session = SessionCredentials::new("access", "refresh");
//! assert!(session.has_refresh());
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod account;
pub mod content;
pub mod errors;
pub mod generation;
pub mod identifier;
pub mod session;

// Re-exports for convenience
pub use account::{LoginRequest, RefreshRequest, RefreshResponse, RegisterRequest, TokenPair, User};
pub use content::{DashboardStats, FirmProfile, LeadMagnet, Template};
pub use errors::{ValidationError, ValidationResult};
pub use generation::{PdfRequest, SloganRequest, SloganResponse, DEFAULT_TEMPLATE_ID};
pub use session::{SessionCredentials, ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY};
