//! # leadforge-client
//!
//! Authenticated HTTP client for the leadforge backend.
//!
//! Every request gets the stored access token attached as a bearer token.
//! When the backend answers `401 Unauthorized`, the client exchanges the
//! refresh token for a new access token and replays the request once.
//!
//! ## Core Concepts
//!
//! - **[`AuthClient`]**: the HTTP client with refresh-and-retry
//! - **[`SessionStore`]**: where tokens live ([`MemorySessionStore`], [`FileSessionStore`])
//! - **[`RefreshPolicy`]**: which requests may be refreshed and which are public
//! - **[`ClientConfig`]**: base URL, timeout and user agent
//! - **[`ClientError`]**: structured failure kinds
//!
//! ## Refresh Rules
//!
//! - A request is retried at most once.
//! - Login, registration and refresh requests are never retried and never
//!   carry a bearer token.
//! - Concurrent 401s share a single refresh call.
//! - A failed or impossible refresh clears the stored session and yields
//!   [`ClientError::Unauthenticated`].
//!
//! ## Example
//!
//! ```ignore
//! use leadforge_client::{AuthClient, ClientConfig, MemorySessionStore};
//!
//! let config = ClientConfig::from_env()?;
//! let client = AuthClient::builder(config)
//!     .store(MemorySessionStore::new())
//!     .build()?;
//!
//! let stats: serde_json::Value = client.get_json("/api/dashboard/").await?;
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod config;
pub mod endpoints;
pub mod error;
pub mod policy;
pub mod refresh;
pub mod request;
pub mod store;
pub mod transport;

// Re-exports
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use policy::{DefaultRefreshPolicy, NeverRefresh, RefreshPolicy};
pub use refresh::{RefreshCoordinator, RefreshOutcome};
pub use request::ApiRequest;
pub use store::{FileSessionStore, MemorySessionStore, SessionStore, StoreError, StoreResult};
pub use transport::{AuthClient, AuthClientBuilder};

/// Prelude for common imports.
pub mod prelude {
    pub use crate::{
        ApiRequest, AuthClient, ClientConfig, ClientError, ClientResult, MemorySessionStore,
        SessionStore,
    };
}
