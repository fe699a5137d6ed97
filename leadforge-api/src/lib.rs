//! # leadforge-api
//!
//! Typed wrappers over the leadforge backend endpoints.
//!
//! Every service holds a clone of the same [`AuthClient`], so they share the
//! session store and token refresh.
//!
//! - [`AuthService`]: login, registration, logout and session restore
//! - [`DashboardApi`]: stats, lead magnets, templates
//! - [`FirmProfileApi`]: firm branding and contact data
//! - [`GenerationApi`]: slogan and PDF generation
//!
//! [`AuthClient`]: leadforge_client::AuthClient

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod auth;
pub mod dashboard;
pub mod firm_profile;
pub mod generation;

pub use auth::AuthService;
pub use dashboard::DashboardApi;
pub use firm_profile::FirmProfileApi;
pub use generation::{GenerationApi, PdfDocument, DEFAULT_PDF_FILENAME};

#[cfg(test)]
pub(crate) mod test_support {
    use leadforge_client::{AuthClient, ClientConfig, MemorySessionStore};
    use leadforge_core::SessionCredentials;
    use std::sync::Arc;
    use wiremock::MockServer;

    pub(crate) fn client_for(
        server: &MockServer,
        creds: SessionCredentials,
    ) -> (AuthClient, Arc<MemorySessionStore>) {
        let store = Arc::new(MemorySessionStore::with_credentials(creds));
        let config = ClientConfig::parse(&server.uri()).unwrap();
        let client = AuthClient::new(config, store.clone()).unwrap();
        (client, store)
    }
}
