//! Session lifecycle: login, registration, logout and restore.

use leadforge_client::{endpoints, AuthClient, ClientResult};
use leadforge_core::{LoginRequest, RegisterRequest, SessionCredentials, TokenPair, User};
use parking_lot::RwLock;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Owns the session: stored tokens plus the cached user profile.
#[derive(Debug, Clone)]
pub struct AuthService {
    client: AuthClient,
    user: Arc<RwLock<Option<User>>>,
}

impl AuthService {
    /// Create a service on top of `client`.
    pub fn new(client: AuthClient) -> Self {
        Self {
            client,
            user: Arc::new(RwLock::new(None)),
        }
    }

    /// The cached user, if logged in.
    pub fn current_user(&self) -> Option<User> {
        self.user.read().clone()
    }

    /// Returns true once a profile has been loaded.
    pub fn is_authenticated(&self) -> bool {
        self.user.read().is_some()
    }

    /// Log in and load the profile.
    ///
    /// A rejected login leaves the stored session untouched. If the tokens
    /// are accepted but the profile cannot be loaded, the previous session
    /// and cached user are put back.
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<User> {
        let request = LoginRequest::new(email, password);
        request.validate()?;

        let tokens: TokenPair = self.client.post_json(endpoints::LOGIN, &request).await?;
        let previous = self.client.store().tokens().await?;
        let previous_user = self.current_user();
        self.client
            .store()
            .set_tokens(SessionCredentials::new(tokens.access, tokens.refresh))
            .await?;

        match self.profile().await {
            Ok(user) => {
                info!(user_id = %user.id, "Logged in");
                Ok(user)
            }
            Err(e) => {
                warn!(error = %e, "Profile fetch after login failed, restoring previous session");
                *self.user.write() = previous_user.filter(|_| previous.has_access());
                self.client.store().set_tokens(previous).await?;
                Err(e)
            }
        }
    }

    /// Create an account. Does not log in.
    pub async fn register(&self, request: &RegisterRequest) -> ClientResult<()> {
        request.validate()?;
        let _: Value = self.client.post_json(endpoints::REGISTER, request).await?;
        info!(email = %request.email, "Account registered");
        Ok(())
    }

    /// Fetch the profile and cache it.
    pub async fn profile(&self) -> ClientResult<User> {
        let user: User = self.client.get_json(endpoints::PROFILE).await?;
        *self.user.write() = Some(user.clone());
        Ok(user)
    }

    /// Forget the session. Always clears the cached user, even if the store
    /// fails.
    pub async fn logout(&self) -> ClientResult<()> {
        self.user.write().take();
        self.client.store().clear().await?;
        info!("Logged out");
        Ok(())
    }

    /// Resume a stored session at startup.
    ///
    /// Without an access token this is a no-op. Otherwise the profile is
    /// probed; any failure is treated as an expired session, which is
    /// cleared, and reported as `Ok(None)`.
    pub async fn restore(&self) -> ClientResult<Option<User>> {
        if !self.client.store().tokens().await?.has_access() {
            debug!("No stored session");
            return Ok(None);
        }

        match self.profile().await {
            Ok(user) => {
                info!(user_id = %user.id, "Session restored");
                Ok(Some(user))
            }
            Err(e) => {
                warn!(error = %e, "Stored session is no longer valid");
                self.user.write().take();
                self.client.store().clear().await?;
                Ok(None)
            }
        }
    }
}
