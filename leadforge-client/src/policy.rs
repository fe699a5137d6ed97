//! Refresh policy: which failures may be recovered by refreshing the token.

use crate::endpoints::{self, normalize};
use crate::request::ApiRequest;
use reqwest::StatusCode;
use std::fmt::Debug;

/// Decides which requests are public and which failures trigger a refresh.
pub trait RefreshPolicy: Send + Sync + Debug {
    /// Public endpoints are sent without a bearer token and never refreshed.
    fn is_public(&self, path: &str) -> bool;

    /// Check if `status` on `request` should trigger refresh-and-retry.
    fn should_refresh(&self, request: &ApiRequest, status: StatusCode) -> bool;
}

/// Refresh on 401 for any non-public request that was not retried yet.
#[derive(Debug, Clone)]
pub struct DefaultRefreshPolicy {
    public_paths: Vec<String>,
}

impl Default for DefaultRefreshPolicy {
    fn default() -> Self {
        Self {
            public_paths: endpoints::PUBLIC.iter().map(|p| normalize(p)).collect(),
        }
    }
}

impl DefaultRefreshPolicy {
    /// Create the default policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Treat another path as public.
    #[must_use]
    pub fn with_public_path(mut self, path: &str) -> Self {
        self.public_paths.push(normalize(path));
        self
    }
}

impl RefreshPolicy for DefaultRefreshPolicy {
    fn is_public(&self, path: &str) -> bool {
        let path = normalize(path);
        self.public_paths.iter().any(|p| *p == path)
    }

    fn should_refresh(&self, request: &ApiRequest, status: StatusCode) -> bool {
        status == StatusCode::UNAUTHORIZED && !request.is_retried() && !self.is_public(&request.path)
    }
}

/// Never refresh. Public endpoints still go out without a token.
#[derive(Debug, Clone, Default)]
pub struct NeverRefresh {
    inner: DefaultRefreshPolicy,
}

impl NeverRefresh {
    /// Create the policy.
    pub fn new() -> Self {
        Self::default()
    }
}

impl RefreshPolicy for NeverRefresh {
    fn is_public(&self, path: &str) -> bool {
        self.inner.is_public(path)
    }

    fn should_refresh(&self, _request: &ApiRequest, _status: StatusCode) -> bool {
        false
    }
}
