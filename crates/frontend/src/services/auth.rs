//! Authentication API service

use picloop_http::client::ClientError;
use picloop_http::types::{TestTokenResponse, UserProfile};

use crate::client;

/// Authentication API service
#[derive(Clone)]
pub struct AuthService;

impl AuthService {
    /// Create a new auth service
    pub fn new() -> Self {
        Self
    }

    /// URL of the Google OAuth entry point; the browser navigates there and
    /// comes back through the callback route.
    pub fn login_redirect_url(&self) -> Result<String, ClientError> {
        Ok(client::public_client()?.google_login_url())
    }

    /// Fetch the authenticated user's profile
    ///
    /// Short-circuits locally when no token is committed instead of sending
    /// a request the backend would reject anyway.
    pub async fn fetch_profile(&self) -> Result<UserProfile, ClientError> {
        let client = client::api_client()?;
        if !client.session().is_authenticated() {
            return Err(ClientError::Configuration("Not authenticated".into()));
        }
        client.me().await
    }

    /// Issue development credentials, bypassing OAuth
    pub async fn test_token(&self, email: &str) -> Result<TestTokenResponse, ClientError> {
        client::public_client()?.test_token(email).await
    }
}

impl Default for AuthService {
    fn default() -> Self {
        Self::new()
    }
}
