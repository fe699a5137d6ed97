//! HTTP transport with bearer tokens and refresh-on-401.

use crate::config::ClientConfig;
use crate::endpoints;
use crate::error::{ClientError, ClientResult};
use crate::policy::{DefaultRefreshPolicy, RefreshPolicy};
use crate::refresh::{RefreshCoordinator, RefreshOutcome};
use crate::request::ApiRequest;
use crate::store::{MemorySessionStore, SessionStore};
use bytes::Bytes;
use futures::future::{BoxFuture, FutureExt};
use leadforge_core::{RefreshRequest, RefreshResponse};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// HTTP client that attaches the session's access token and recovers once
/// from an expired token.
///
/// Cloning is cheap; clones share the session store and the refresh guard.
#[derive(Clone)]
pub struct AuthClient {
    inner: Arc<Inner>,
}

struct Inner {
    http: Client,
    config: ClientConfig,
    store: Arc<dyn SessionStore>,
    policy: Arc<dyn RefreshPolicy>,
    refresher: RefreshCoordinator,
}

impl fmt::Debug for AuthClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthClient")
            .field("base_url", &self.inner.config.base_url.as_str())
            .field("store", &self.inner.store)
            .field("policy", &self.inner.policy)
            .field("refresher", &self.inner.refresher)
            .finish()
    }
}

impl AuthClient {
    /// Create a client with the default policy and HTTP settings.
    pub fn new(config: ClientConfig, store: Arc<dyn SessionStore>) -> ClientResult<Self> {
        AuthClientBuilder::new(config).shared_store(store).build()
    }

    /// Start building a client.
    pub fn builder(config: ClientConfig) -> AuthClientBuilder {
        AuthClientBuilder::new(config)
    }

    /// The configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// The session store.
    pub fn store(&self) -> &Arc<dyn SessionStore> {
        &self.inner.store
    }

    /// Number of refresh calls this client has started.
    pub fn refresh_count(&self) -> u64 {
        self.inner.refresher.started()
    }

    /// Send a request.
    ///
    /// Non-success statuses become [`ClientError::Server`]; a 401 on a
    /// refreshable request goes through one refresh-and-retry first.
    pub async fn send(&self, mut request: ApiRequest) -> ClientResult<Response> {
        let public = self.inner.policy.is_public(&request.path);
        let token = if public {
            None
        } else {
            self.inner.store.tokens().await?.access
        };

        let response = self.inner.dispatch(&request, token.as_deref()).await?;
        if !self.inner.policy.should_refresh(&request, response.status()) {
            return check_response(response).await;
        }

        request.mark_retried();
        let body = response.text().await.unwrap_or_default();
        debug!(path = %request.path, "Access token rejected, attempting recovery");

        let access = self.recover(token.as_deref(), body).await?;
        let response = self.inner.dispatch(&request, Some(&access)).await?;
        check_response(response).await
    }

    /// Refresh the access token now, sharing any refresh already in flight.
    ///
    /// A missing refresh token is reported without touching the store; a
    /// refused refresh clears it.
    pub async fn refresh(&self) -> ClientResult<String> {
        let seen = self.inner.refresher.generation();
        let refresh = self
            .inner
            .store
            .tokens()
            .await?
            .refresh
            .ok_or_else(|| ClientError::unauthenticated("no refresh token stored", ""))?;

        match self.inner.refresher.run(seen, || self.refresh_task(refresh)).await {
            RefreshOutcome::Refreshed(access) => Ok(access),
            RefreshOutcome::Failed(reason) => Err(ClientError::unauthenticated(reason, "")),
        }
    }

    /// `GET path`, decoding the JSON body.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let response = self.send(ApiRequest::get(path)).await?;
        decode(response).await
    }

    /// `POST path` with a JSON body, decoding the JSON response.
    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.send(ApiRequest::post(path).json(body)?).await?;
        decode(response).await
    }

    /// `PUT path` with a JSON body, decoding the JSON response.
    pub async fn put_json<B, T>(&self, path: &str, body: &B) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.send(ApiRequest::put(path).json(body)?).await?;
        decode(response).await
    }

    /// `POST path` with a JSON body, returning the raw response bytes.
    pub async fn post_bytes<B>(&self, path: &str, body: &B) -> ClientResult<Bytes>
    where
        B: Serialize + ?Sized,
    {
        let response = self.send(ApiRequest::post(path).json(body)?).await?;
        Ok(response.bytes().await?)
    }

    /// `DELETE path`, discarding the body.
    pub async fn delete(&self, path: &str) -> ClientResult<()> {
        self.send(ApiRequest::delete(path)).await?;
        Ok(())
    }

    /// Obtain a usable access token after `sent_with` was rejected.
    async fn recover(&self, sent_with: Option<&str>, body: String) -> ClientResult<String> {
        // Taken before the store read so a refresh that lands during the
        // read is still seen by `run`.
        let seen = self.inner.refresher.generation();
        let current = self.inner.store.tokens().await?;

        // Another request already refreshed after this one was sent.
        if let Some(access) = current.access.as_deref().filter(|a| Some(*a) != sent_with) {
            debug!("Retrying with access token refreshed by a concurrent request");
            return Ok(access.to_string());
        }

        let Some(refresh) = current.refresh else {
            warn!("No refresh token stored, clearing session");
            self.inner.store.clear().await?;
            return Err(ClientError::unauthenticated("no refresh token stored", body));
        };

        match self.inner.refresher.run(seen, || self.refresh_task(refresh)).await {
            RefreshOutcome::Refreshed(access) => Ok(access),
            RefreshOutcome::Failed(reason) => Err(ClientError::unauthenticated(reason, body)),
        }
    }

    fn refresh_task(&self, refresh: String) -> BoxFuture<'static, RefreshOutcome> {
        let inner = Arc::clone(&self.inner);
        async move { inner.exchange_refresh_token(refresh).await }.boxed()
    }
}

impl Inner {
    async fn dispatch(&self, request: &ApiRequest, token: Option<&str>) -> ClientResult<Response> {
        let url = self.config.endpoint(&request.path)?;
        debug!(
            method = %request.method,
            path = %request.path,
            authenticated = token.is_some(),
            retried = request.is_retried(),
            "Sending API request"
        );

        let mut builder = self
            .http
            .request(request.method.clone(), url)
            .headers(request.headers.clone());
        if let Some(token) = token {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        Ok(builder.send().await?)
    }

    /// Exchange the refresh token; persist the result or clear the session.
    async fn exchange_refresh_token(&self, refresh: String) -> RefreshOutcome {
        match self.request_new_access(refresh).await {
            Ok(access) => match self.store.set_access(access.clone()).await {
                Ok(()) => {
                    info!("Access token refreshed");
                    RefreshOutcome::Refreshed(access)
                }
                Err(e) => self.fail_refresh(format!("could not persist refreshed token: {}", e)).await,
            },
            Err(e) => self.fail_refresh(format!("token refresh failed: {}", e)).await,
        }
    }

    async fn request_new_access(&self, refresh: String) -> ClientResult<String> {
        let request = ApiRequest::post(endpoints::TOKEN_REFRESH).json(&RefreshRequest { refresh })?;
        let response = check_response(self.dispatch(&request, None).await?).await?;
        let body: RefreshResponse = decode(response).await?;
        Ok(body.access)
    }

    async fn fail_refresh(&self, reason: String) -> RefreshOutcome {
        warn!(reason = %reason, "Clearing session after failed refresh");
        if let Err(e) = self.store.clear().await {
            warn!(error = %e, "Failed to clear session store");
        }
        RefreshOutcome::Failed(reason)
    }
}

/// Convert a non-success response into [`ClientError::Server`].
async fn check_response(response: Response) -> ClientResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(ClientError::server(status.as_u16(), body))
}

/// Decode a JSON body. An empty body decodes as `null`.
async fn decode<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
    let bytes = response.bytes().await?;
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(serde_json::from_slice(b"null")?);
    }
    Ok(serde_json::from_slice(&bytes)?)
}

/// Builder for [`AuthClient`].
#[derive(Debug)]
pub struct AuthClientBuilder {
    config: ClientConfig,
    http: Option<Client>,
    store: Option<Arc<dyn SessionStore>>,
    policy: Option<Arc<dyn RefreshPolicy>>,
}

impl AuthClientBuilder {
    /// Create a new builder.
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            http: None,
            store: None,
            policy: None,
        }
    }

    /// Use a preconfigured reqwest client. Timeout and user agent from the
    /// config are then ignored.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http = Some(client);
        self
    }

    /// Set the session store.
    pub fn store(self, store: impl SessionStore + 'static) -> Self {
        self.shared_store(Arc::new(store))
    }

    /// Set a session store shared with other components.
    pub fn shared_store(mut self, store: Arc<dyn SessionStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Set the refresh policy.
    pub fn policy(mut self, policy: impl RefreshPolicy + 'static) -> Self {
        self.policy = Some(Arc::new(policy));
        self
    }

    /// Build the client. Defaults to an in-memory store.
    pub fn build(self) -> ClientResult<AuthClient> {
        let http = match self.http {
            Some(client) => client,
            None => {
                let mut builder = Client::builder().user_agent(self.config.user_agent.clone());
                if let Some(timeout) = self.config.timeout_duration() {
                    builder = builder.timeout(timeout);
                }
                builder.build()?
            }
        };

        Ok(AuthClient {
            inner: Arc::new(Inner {
                http,
                config: self.config,
                store: self.store.unwrap_or_else(|| Arc::new(MemorySessionStore::new())),
                policy: self.policy.unwrap_or_else(|| Arc::new(DefaultRefreshPolicy::new())),
                refresher: RefreshCoordinator::new(),
            }),
        })
    }
}
