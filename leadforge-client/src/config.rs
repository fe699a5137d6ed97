//! Client configuration.

use crate::error::{ClientError, ClientResult};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Environment variable holding the backend base URL. Required.
pub const ENV_BASE_URL: &str = "LEADFORGE_API_BASE_URL";
/// Environment variable holding the request timeout in seconds.
pub const ENV_TIMEOUT_SECS: &str = "LEADFORGE_TIMEOUT_SECS";
/// Environment variable holding the session file path.
pub const ENV_SESSION_FILE: &str = "LEADFORGE_SESSION_FILE";

/// Configuration for the backend connection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the backend, e.g. `https://api.example.com`.
    pub base_url: Url,
    /// Per-request timeout. `None` disables the timeout.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout: Option<Duration>,
    /// `User-Agent` header value.
    pub user_agent: String,
    /// Where [`FileSessionStore`](crate::FileSessionStore) persists tokens.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_file: Option<PathBuf>,
}

impl ClientConfig {
    /// Create a config for the given base URL.
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            request_timeout: Some(Duration::from_secs(30)),
            user_agent: concat!("leadforge/", env!("CARGO_PKG_VERSION")).to_string(),
            session_file: None,
        }
    }

    /// Parse the base URL from a string.
    pub fn parse(base_url: &str) -> ClientResult<Self> {
        let url = Url::parse(base_url)
            .map_err(|e| ClientError::config(format!("invalid base URL {:?}: {}", base_url, e)))?;
        if url.cannot_be_a_base() {
            return Err(ClientError::config(format!(
                "base URL {:?} cannot have paths",
                base_url
            )));
        }
        Ok(Self::new(url))
    }

    /// Load from the environment.
    ///
    /// `LEADFORGE_API_BASE_URL` must be set; there is no default backend.
    pub fn from_env() -> ClientResult<Self> {
        let base_url = std::env::var(ENV_BASE_URL)
            .map_err(|_| ClientError::config(format!("{} is not defined", ENV_BASE_URL)))?;
        let mut config = Self::parse(&base_url)?;

        if let Ok(raw) = std::env::var(ENV_TIMEOUT_SECS) {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                ClientError::config(format!("{} must be a number of seconds, got {:?}", ENV_TIMEOUT_SECS, raw))
            })?;
            config = config.timeout(Duration::from_secs(secs));
        }
        if let Ok(path) = std::env::var(ENV_SESSION_FILE) {
            config.session_file = Some(PathBuf::from(path));
        }
        Ok(config)
    }

    /// Set the timeout. [`Duration::ZERO`] disables it.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = (!timeout.is_zero()).then_some(timeout);
        self
    }

    /// Set the user agent.
    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the session file.
    #[must_use]
    pub fn session_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.session_file = Some(path.into());
        self
    }

    /// The timeout as a [`Duration`], if enabled.
    pub fn timeout_duration(&self) -> Option<Duration> {
        self.request_timeout
    }

    /// Resolve an endpoint path against the base URL.
    ///
    /// A base URL with a path prefix (`https://host/backend`) keeps the
    /// prefix: `/api/dashboard/` resolves to `https://host/backend/api/dashboard/`.
    pub fn endpoint(&self, path: &str) -> ClientResult<Url> {
        let mut base = self.base_url.clone();
        if !base.path().ends_with('/') {
            let with_slash = format!("{}/", base.path());
            base.set_path(&with_slash);
        }
        base.join(path.trim_start_matches('/'))
            .map_err(|e| ClientError::config(format!("invalid endpoint path {:?}: {}", path, e)))
    }
}
