//! # leadforge
//!
//! Client SDK for the leadforge lead-magnet backend.
//!
//! The backend issues short-lived access tokens and longer-lived refresh
//! tokens. This crate keeps both in a [`SessionStore`], attaches the access
//! token to every call and transparently refreshes it once when the backend
//! answers `401 Unauthorized`.
//!
//! ## Quick Start
//!
//! ```ignore
//! use leadforge::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     leadforge::init_tracing();
//!
//!     let app = LeadForge::from_env()?;
//!     if app.auth().restore().await?.is_none() {
//!         app.auth().login("ada@example.com", "s3cret").await?;
//!     }
//!
//!     let stats = app.dashboard().stats().await?;
//!     println!("{} lead magnets", stats.total_lead_magnets.unwrap_or(0));
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`leadforge_core`] - payloads, session credentials, validation
//! - [`leadforge_client`] - authenticated transport and session stores
//! - [`leadforge_api`] - session lifecycle and endpoint wrappers
//!
//! ## Configuration
//!
//! [`LeadForge::from_env`] reads:
//!
//! | Variable | Meaning | Default |
//! |----------|---------|---------|
//! | `LEADFORGE_API_BASE_URL` | Backend origin | required |
//! | `LEADFORGE_TIMEOUT_SECS` | Request timeout, `0` disables | `30` |
//! | `LEADFORGE_SESSION_FILE` | Persist tokens to this JSON file | in-memory |

#![warn(missing_docs)]
#![deny(unsafe_code)]

use std::sync::Arc;
use tracing::debug;
use tracing_subscriber::EnvFilter;

pub use leadforge_api as api;
pub use leadforge_client as client;
pub use leadforge_core as core;

pub use leadforge_api::{
    AuthService, DashboardApi, FirmProfileApi, GenerationApi, PdfDocument, DEFAULT_PDF_FILENAME,
};
pub use leadforge_client::{
    endpoints, ApiRequest, AuthClient, AuthClientBuilder, ClientConfig, ClientError,
    ClientResult, DefaultRefreshPolicy, FileSessionStore, MemorySessionStore, NeverRefresh,
    RefreshPolicy, SessionStore, StoreError,
};
pub use leadforge_core::{
    DashboardStats, FirmProfile, LeadMagnet, LoginRequest, PdfRequest, RegisterRequest,
    SessionCredentials, SloganRequest, SloganResponse, Template, User, ValidationError,
    DEFAULT_TEMPLATE_ID,
};

/// One handle on the backend: a shared client plus every endpoint group.
///
/// Cloning is cheap and clones share the session.
#[derive(Debug, Clone)]
pub struct LeadForge {
    client: AuthClient,
    auth: AuthService,
    dashboard: DashboardApi,
    firm_profile: FirmProfileApi,
    generation: GenerationApi,
}

impl LeadForge {
    /// Build from environment variables.
    ///
    /// Tokens are persisted to `LEADFORGE_SESSION_FILE` when set and kept in
    /// memory otherwise.
    pub fn from_env() -> ClientResult<Self> {
        let config = ClientConfig::from_env()?;
        let store: Arc<dyn SessionStore> = match &config.session_file {
            Some(path) => {
                debug!(path = %path.display(), "Using file session store");
                Arc::new(FileSessionStore::new(path.clone()))
            }
            None => Arc::new(MemorySessionStore::new()),
        };
        Self::new(config, store)
    }

    /// Build with an explicit store.
    pub fn new(config: ClientConfig, store: Arc<dyn SessionStore>) -> ClientResult<Self> {
        Ok(Self::from_client(AuthClient::new(config, store)?))
    }

    /// Wrap an already configured client.
    pub fn from_client(client: AuthClient) -> Self {
        Self {
            auth: AuthService::new(client.clone()),
            dashboard: DashboardApi::new(client.clone()),
            firm_profile: FirmProfileApi::new(client.clone()),
            generation: GenerationApi::new(client.clone()),
            client,
        }
    }

    /// Login, registration, logout and session restore.
    pub fn auth(&self) -> &AuthService {
        &self.auth
    }

    /// Dashboard stats, lead magnets and templates.
    pub fn dashboard(&self) -> &DashboardApi {
        &self.dashboard
    }

    /// Firm profile.
    pub fn firm_profile(&self) -> &FirmProfileApi {
        &self.firm_profile
    }

    /// Slogan and PDF generation.
    pub fn generation(&self) -> &GenerationApi {
        &self.generation
    }

    /// The underlying client, for endpoints without a wrapper.
    pub fn client(&self) -> &AuthClient {
        &self.client
    }
}

/// Install a `fmt` subscriber filtered by `RUST_LOG`, defaulting to `info`.
///
/// Does nothing if a global subscriber is already set.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Prelude for common imports.
pub mod prelude {
    pub use crate::{
        AuthClient, AuthService, ClientConfig, ClientError, ClientResult, DashboardApi,
        FirmProfile, FirmProfileApi, GenerationApi, LeadForge, MemorySessionStore, PdfDocument,
        PdfRequest, RegisterRequest, SessionStore, SloganRequest, User,
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_services_share_one_session() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(endpoints::LOGIN))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "access": "a1", "refresh": "r1" })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path(endpoints::PROFILE))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 3, "username": "ada", "email": "ada@example.com",
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path(endpoints::DASHBOARD))
            .and(header("authorization", "Bearer a1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "total_lead_magnets": 5 })))
            .expect(1)
            .mount(&server)
            .await;

        let store = Arc::new(MemorySessionStore::new());
        let app = LeadForge::new(ClientConfig::parse(&server.uri()).unwrap(), store.clone()).unwrap();

        let user = app.auth().login("ada@example.com", "pw").await.unwrap();
        assert_eq!(user.username, "ada");

        let stats = app.dashboard().stats().await.unwrap();
        assert_eq!(stats.total_lead_magnets, Some(5));
        assert_eq!(store.snapshot(), SessionCredentials::new("a1", "r1"));

        app.clone().auth().logout().await.unwrap();
        assert!(store.snapshot().is_empty());
        assert!(!app.auth().is_authenticated());
    }

    #[test]
    fn test_from_env_picks_store() {
        let file = std::env::temp_dir().join("leadforge-facade-session.json");
        std::env::set_var("LEADFORGE_API_BASE_URL", "https://api.example.com");
        std::env::set_var("LEADFORGE_SESSION_FILE", &file);

        let app = LeadForge::from_env().unwrap();
        assert_eq!(app.client().config().session_file.as_deref(), Some(file.as_path()));
        assert!(format!("{:?}", app.client().store()).contains("FileSessionStore"));

        std::env::remove_var("LEADFORGE_SESSION_FILE");
        let app = LeadForge::from_env().unwrap();
        assert!(format!("{:?}", app.client().store()).contains("MemorySessionStore"));

        std::env::remove_var("LEADFORGE_API_BASE_URL");
    }

    #[test]
    fn test_init_tracing_is_idempotent() {
        init_tracing();
        init_tracing();
    }
}
