//! Wire types for the auth and image APIs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Profile returned by `GET /auth/me` and embedded in token issuance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: i64,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// A stored image. Server-owned; the client only renders these.
///
/// `url` is a short-lived presigned retrieval URL, opaque to this client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub id: i64,
    pub key: String,
    pub filename: String,
    /// Object size in bytes.
    pub size: u64,
    pub url: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uploader: Option<UserProfile>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageListResponse {
    pub images: Vec<Image>,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// The server reuses the submitted refresh token; only the access token is
/// reissued.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshResponse {
    pub access_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestTokenRequest {
    pub email: String,
}

/// Development-only token issuance, bypassing the OAuth redirect.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestTokenResponse {
    pub access_token: String,
    /// Absent when the deployment runs in single-token mode.
    #[serde(default)]
    pub refresh_token: Option<String>,
    pub user: UserProfile,
}
