//! Frontend configuration

/// What to do with already-committed tokens when the profile fetch during the
/// OAuth callback fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileFailurePolicy {
    /// Leave the tokens in place so a later retry can skip re-authentication.
    KeepTokens,
    /// Clear the session so no stale credentials linger.
    ClearTokens,
}

/// Application configuration
pub struct AppConfig;

impl AppConfig {
    /// Local storage key for the persisted session
    pub const SESSION_KEY: &'static str = "auth-storage";

    /// Policy applied when the callback's profile fetch fails
    pub const PROFILE_FAILURE_POLICY: ProfileFailurePolicy = ProfileFailurePolicy::KeepTokens;

    /// Base URL of the auth server
    pub fn auth_base() -> String {
        option_env!("PICLOOP_AUTH_BASE")
            .unwrap_or("http://localhost:8001")
            .to_string()
    }

    /// Base URL of the resource API
    pub fn api_base() -> String {
        option_env!("PICLOOP_API_BASE")
            .unwrap_or("http://localhost:8080")
            .to_string()
    }

    /// Whether the OAuth callback is expected to carry a refresh token
    pub const fn refresh_tokens_enabled() -> bool {
        cfg!(feature = "refresh-tokens")
    }
}
