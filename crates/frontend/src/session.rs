//! Browser-backed session store
//!
//! Wraps the session in local storage under a single fixed key so a reload
//! resumes the prior session without re-authenticating. Reads are served from
//! an in-memory copy; every mutation rewrites the persisted document.

use std::sync::RwLock;

use gloo::storage::{LocalStorage, Storage};
use picloop_http::session::{Session, SessionStore};
use picloop_http::types::UserProfile;

use crate::config::AppConfig;

pub struct BrowserSessionStore {
    cache: RwLock<Session>,
}

impl BrowserSessionStore {
    /// Restore the persisted session, or start empty.
    pub fn new() -> Self {
        let session = LocalStorage::get(AppConfig::SESSION_KEY).unwrap_or_default();
        Self {
            cache: RwLock::new(session),
        }
    }

    /// Snapshot of the current session.
    pub fn session(&self) -> Session {
        self.cache.read().expect("session lock poisoned").clone()
    }

    fn update(&self, apply: impl FnOnce(&mut Session)) {
        let mut session = self.cache.write().expect("session lock poisoned");
        apply(&mut session);
        if let Err(err) = LocalStorage::set(AppConfig::SESSION_KEY, &*session) {
            log::warn!("failed to persist session: {err}");
        }
    }
}

impl Default for BrowserSessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore for BrowserSessionStore {
    fn access_token(&self) -> Option<String> {
        self.session().access_token
    }

    fn refresh_token(&self) -> Option<String> {
        self.session().refresh_token
    }

    fn user(&self) -> Option<UserProfile> {
        self.session().user
    }

    fn set_access_token(&self, token: Option<String>) {
        self.update(|session| session.access_token = token);
    }

    fn set_refresh_token(&self, token: Option<String>) {
        self.update(|session| session.refresh_token = token);
    }

    fn set_user(&self, user: Option<UserProfile>) {
        self.update(|session| session.user = user);
    }

    fn logout(&self) {
        let mut session = self.cache.write().expect("session lock poisoned");
        *session = Session::default();
        LocalStorage::delete(AppConfig::SESSION_KEY);
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::wasm_bindgen_test;

    #[wasm_bindgen_test]
    fn session_survives_store_reconstruction() {
        let store = BrowserSessionStore::new();
        store.set_access_token(Some("t1".to_string()));
        store.set_refresh_token(Some("r1".to_string()));

        let reloaded = BrowserSessionStore::new();
        assert_eq!(reloaded.access_token().as_deref(), Some("t1"));
        assert_eq!(reloaded.refresh_token().as_deref(), Some("r1"));

        reloaded.logout();
        let empty = BrowserSessionStore::new();
        assert!(!empty.is_authenticated());
    }
}
