//! Auth endpoint client methods

use reqwest::Method;

use super::{ApiClient, ClientError, PublicClient};
use crate::types::{RefreshRequest, RefreshResponse, TestTokenRequest, TestTokenResponse, UserProfile};

impl PublicClient {
    /// URL that starts the Google OAuth flow; the browser navigates here and
    /// returns via the callback route with tokens in the query string.
    pub fn google_login_url(&self) -> String {
        format!("{}/auth/oauth/google", self.base_url())
    }

    /// Exchange a refresh token for a new access token.
    pub async fn refresh(
        &self,
        refresh_token: impl Into<String>,
    ) -> Result<RefreshResponse, ClientError> {
        let req = self
            .request(Method::POST, "/auth/oauth/refresh")
            .json(&RefreshRequest {
                refresh_token: refresh_token.into(),
            });
        self.execute(req).await
    }

    /// Issue development credentials without going through OAuth.
    ///
    /// The server rejects this outside development deployments.
    pub async fn test_token(
        &self,
        email: impl Into<String>,
    ) -> Result<TestTokenResponse, ClientError> {
        let req = self
            .request(Method::POST, "/auth/oauth/test-token")
            .json(&TestTokenRequest {
                email: email.into(),
            });
        self.execute(req).await
    }
}

impl ApiClient {
    /// Fetch the authenticated user's profile.
    pub async fn me(&self) -> Result<UserProfile, ClientError> {
        let req = self.auth_request(Method::GET, "/auth/me");
        self.execute(req).await
    }
}
