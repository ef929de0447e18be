//! Client configuration and initialization

use std::sync::{Arc, Mutex};

use once_cell::sync::Lazy;
use picloop_http::client::{ApiClient, ClientError, PublicClient};
use picloop_http::session::SessionStore;

use crate::auth::expiry;
use crate::config::AppConfig;
use crate::session::BrowserSessionStore;

/// Process-wide session store shared by the clients and the auth context
static SESSION_STORE: Lazy<Arc<BrowserSessionStore>> =
    Lazy::new(|| Arc::new(BrowserSessionStore::new()));

/// Global client instances
static PUBLIC_CLIENT: Lazy<Mutex<Option<PublicClient>>> = Lazy::new(|| Mutex::new(None));
static API_CLIENT: Lazy<Mutex<Option<ApiClient>>> = Lazy::new(|| Mutex::new(None));

/// Get the shared session store
pub fn session_store() -> Arc<BrowserSessionStore> {
    SESSION_STORE.clone()
}

/// Get the public client instance (for unauthenticated endpoints)
pub fn public_client() -> Result<PublicClient, ClientError> {
    let mut lock = PUBLIC_CLIENT
        .lock()
        .expect("Failed to acquire public client lock");

    if let Some(client) = lock.as_ref() {
        return Ok(client.clone());
    }

    let client = PublicClient::new(AppConfig::auth_base())?;
    *lock = Some(client.clone());
    Ok(client)
}

/// Get the authenticated client instance
///
/// The client reads the session store on every request, so a single instance
/// stays valid across logins, refreshes, and logouts.
pub fn api_client() -> Result<ApiClient, ClientError> {
    let mut lock = API_CLIENT
        .lock()
        .expect("Failed to acquire api client lock");

    if let Some(client) = lock.as_ref() {
        return Ok(client.clone());
    }

    let session: Arc<dyn SessionStore> = session_store();
    let client = ApiClient::builder()
        .base_url(AppConfig::api_base())
        .auth_base_url(AppConfig::auth_base())
        .session(session)
        .on_session_expired(Arc::new(expiry::notify_session_expired))
        .build()?;
    *lock = Some(client.clone());
    Ok(client)
}
