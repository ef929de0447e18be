//! Typed API clients
//!
//! `PublicClient` talks to the unauthenticated auth endpoints. `ApiClient`
//! reads the session store for the current bearer token, attaches it to every
//! outgoing request, and transparently survives exactly one authorization
//! failure per request by running the refresh protocol and retrying.

use std::sync::Arc;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

use reqwest::{header, Client, ClientBuilder, Method, StatusCode};
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;

use super::ClientError;
use crate::session::SessionStore;
use crate::types::{RefreshRequest, RefreshResponse};

const USER_AGENT: &str = "picloop-client/0.1.0";

/// Fired when a failed refresh terminates the session, so the embedding
/// application can navigate to its unauthenticated entry point.
pub type SessionExpiredHook = Arc<dyn Fn() + Send + Sync>;

/// Client for endpoints that require no credentials.
#[derive(Clone)]
pub struct PublicClient {
    client: Client,
    base_url: String,
}

impl PublicClient {
    /// Create a client against the auth server's base URL.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let client = ClientBuilder::new().user_agent(USER_AGENT).build()?;

        Ok(Self { client, base_url })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Create a request builder without authentication
    pub fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client.request(method, url)
    }

    /// Execute a request and handle common errors
    pub async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ClientError> {
        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            Ok(response.json().await?)
        } else {
            let message = response.text().await.unwrap_or_else(|_| status.to_string());
            Err(ClientError::from_status(status, message))
        }
    }
}

/// Client for authenticated endpoints.
///
/// Holds the session store it reads tokens from; cloning shares the store and
/// the in-flight-refresh lock, so concurrent callers coalesce their refreshes.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    auth_base_url: String,
    session: Arc<dyn SessionStore>,
    refresh_lock: Arc<Mutex<()>>,
    on_session_expired: Option<SessionExpiredHook>,
}

impl ApiClient {
    /// Create a new client builder
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::default()
    }

    /// Get the resource API base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Access the session store backing this client.
    pub fn session(&self) -> &Arc<dyn SessionStore> {
        &self.session
    }

    /// Create a request builder against the resource API.
    pub fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client.request(method, url)
    }

    /// Create a request builder against the auth server.
    pub fn auth_request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.auth_base_url, path);
        self.client.request(method, url)
    }

    /// Execute a request with the current bearer token attached.
    ///
    /// A 401 response triggers the refresh protocol once; on refresh success
    /// the request is re-issued a single time with the new token and that
    /// result is returned, second 401 included. On refresh failure the
    /// session is cleared, the expiry hook fires, and the original 401
    /// surfaces to the caller.
    pub async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ClientError> {
        let token = self.session.access_token();
        let retry = request.try_clone();
        let response = send_with_token(request, token.as_deref()).await?;
        let status = response.status();

        if status != StatusCode::UNAUTHORIZED {
            return into_result(response).await;
        }

        let original = response.text().await.unwrap_or_else(|_| status.to_string());

        let new_token = match self.refresh_access_token(token.as_deref()).await {
            Ok(token) => token,
            Err(err) => {
                tracing::warn!(error = %err, "token refresh failed, terminating session");
                self.session.logout();
                if let Some(hook) = &self.on_session_expired {
                    hook();
                }
                return Err(ClientError::AuthenticationFailed(original));
            }
        };

        // Request bodies that cannot be cloned (streams) cannot be retried.
        let Some(retry) = retry else {
            return Err(ClientError::AuthenticationFailed(original));
        };

        tracing::debug!("retrying request with refreshed token");
        let response = send_with_token(retry, Some(&new_token)).await?;
        into_result(response).await
    }

    /// Exchange the refresh token for a new access token, coalescing
    /// concurrent attempts into one network call.
    ///
    /// `failed_token` is the token the rejected request went out with.
    /// Callers queued behind an in-flight refresh find a different token in
    /// the store once they acquire the lock and reuse it instead of
    /// refreshing again.
    async fn refresh_access_token(&self, failed_token: Option<&str>) -> Result<String, ClientError> {
        let _guard = self.refresh_lock.lock().await;

        if let Some(current) = self.session.access_token() {
            if Some(current.as_str()) != failed_token {
                return Ok(current);
            }
        }

        let refresh_token = self
            .session
            .refresh_token()
            .ok_or(ClientError::NoRefreshToken)?;

        tracing::debug!("exchanging refresh token for a new access token");
        let url = format!("{}/auth/oauth/refresh", self.auth_base_url);
        let response = self
            .client
            .post(url)
            .json(&RefreshRequest { refresh_token })
            .send()
            .await
            .map_err(|err| ClientError::RefreshFailed(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_else(|_| status.to_string());
            return Err(ClientError::RefreshFailed(message));
        }

        let body: RefreshResponse = response
            .json()
            .await
            .map_err(|err| ClientError::RefreshFailed(err.to_string()))?;

        // The server does not rotate refresh tokens; only the access token
        // changes.
        self.session
            .set_access_token(Some(body.access_token.clone()));
        Ok(body.access_token)
    }
}

async fn send_with_token(
    request: reqwest::RequestBuilder,
    token: Option<&str>,
) -> Result<reqwest::Response, ClientError> {
    let request = match token {
        Some(token) => request.header(header::AUTHORIZATION, format!("Bearer {token}")),
        None => request,
    };
    Ok(request.send().await?)
}

async fn into_result<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
    let status = response.status();
    if status.is_success() {
        Ok(response.json().await?)
    } else {
        let message = response.text().await.unwrap_or_else(|_| status.to_string());
        Err(ClientError::from_status(status, message))
    }
}

/// Builder for [`ApiClient`]
#[derive(Default)]
pub struct ApiClientBuilder {
    base_url: Option<String>,
    auth_base_url: Option<String>,
    session: Option<Arc<dyn SessionStore>>,
    on_session_expired: Option<SessionExpiredHook>,
    #[cfg(not(target_arch = "wasm32"))]
    timeout: Option<Duration>,
}

impl ApiClientBuilder {
    /// Set the resource API base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the auth server base URL (profile fetch and token refresh).
    /// Defaults to the resource API base URL.
    pub fn auth_base_url(mut self, url: impl Into<String>) -> Self {
        self.auth_base_url = Some(url.into());
        self
    }

    /// Set the session store the client reads and updates tokens through
    pub fn session(mut self, session: Arc<dyn SessionStore>) -> Self {
        self.session = Some(session);
        self
    }

    /// Set the hook fired when a failed refresh terminates the session
    pub fn on_session_expired(mut self, hook: SessionExpiredHook) -> Self {
        self.on_session_expired = Some(hook);
        self
    }

    /// Set the request timeout
    #[cfg(not(target_arch = "wasm32"))]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the client
    pub fn build(self) -> Result<ApiClient, ClientError> {
        let base_url = self
            .base_url
            .ok_or_else(|| ClientError::Configuration("base_url is required".into()))?
            .trim_end_matches('/')
            .to_string();
        let auth_base_url = self
            .auth_base_url
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| base_url.clone());
        let session = self
            .session
            .ok_or_else(|| ClientError::Configuration("session store is required".into()))?;

        #[cfg(not(target_arch = "wasm32"))]
        let client = {
            let mut builder = ClientBuilder::new().user_agent(USER_AGENT);
            if let Some(timeout) = self.timeout {
                builder = builder.timeout(timeout);
            }
            builder.build()?
        };

        #[cfg(target_arch = "wasm32")]
        let client = ClientBuilder::new().user_agent(USER_AGENT).build()?;

        Ok(ApiClient {
            client,
            base_url,
            auth_base_url,
            session,
            refresh_lock: Arc::new(Mutex::new(())),
            on_session_expired: self.on_session_expired,
        })
    }
}
