//! Client-side session state
//!
//! The session is a typed key-value cache; durability is supplied by the
//! embedding application (browser local storage in the SPA, plain memory in
//! tests). It performs no network calls and no token validation.

use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use crate::types::UserProfile;

/// Bearer credentials plus the cached user profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub user: Option<UserProfile>,
}

impl Session {
    /// True iff an access token is present. Says nothing about whether the
    /// server still accepts it.
    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }
}

/// Storage seam for the session, injected into the API client rather than
/// reached through ambient global state.
///
/// `logout` must be atomic: a reader never observes a partially cleared
/// session.
pub trait SessionStore: Send + Sync {
    fn access_token(&self) -> Option<String>;
    fn refresh_token(&self) -> Option<String>;
    fn user(&self) -> Option<UserProfile>;

    /// Replace the access token. No validation is performed.
    fn set_access_token(&self, token: Option<String>);
    /// Replace the refresh token. No validation is performed.
    fn set_refresh_token(&self, token: Option<String>);
    /// Replace the cached profile.
    fn set_user(&self, user: Option<UserProfile>);

    /// Clear all fields in one update.
    fn logout(&self);

    fn is_authenticated(&self) -> bool {
        self.access_token().is_some()
    }
}

/// In-memory store, the default for native callers and tests.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    inner: RwLock<Session>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: Session) -> Self {
        Self {
            inner: RwLock::new(session),
        }
    }

    /// Snapshot of the current session.
    pub fn session(&self) -> Session {
        self.inner.read().expect("session lock poisoned").clone()
    }
}

impl SessionStore for MemorySessionStore {
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
        self.inner.write().expect("session lock poisoned").access_token = token;
    }

    fn set_refresh_token(&self, token: Option<String>) {
        self.inner.write().expect("session lock poisoned").refresh_token = token;
    }

    fn set_user(&self, user: Option<UserProfile>) {
        self.inner.write().expect("session lock poisoned").user = user;
    }

    fn logout(&self) {
        *self.inner.write().expect("session lock poisoned") = Session::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> UserProfile {
        UserProfile {
            user_id: 1,
            email: "a@b.com".to_string(),
            name: Some("A".to_string()),
        }
    }

    #[test]
    fn authentication_tracks_access_token_only() {
        let store = MemorySessionStore::new();
        assert!(!store.is_authenticated());

        store.set_refresh_token(Some("r1".to_string()));
        store.set_user(Some(profile()));
        assert!(!store.is_authenticated());

        store.set_access_token(Some("t1".to_string()));
        assert!(store.is_authenticated());

        store.set_access_token(None);
        assert!(!store.is_authenticated());
    }

    #[test]
    fn logout_clears_every_field() {
        let store = MemorySessionStore::new();
        store.set_access_token(Some("t1".to_string()));
        store.set_refresh_token(Some("r1".to_string()));
        store.set_user(Some(profile()));

        store.logout();

        assert_eq!(store.session(), Session::default());
        assert!(!store.is_authenticated());
    }

    #[test]
    fn logout_is_idempotent() {
        let store = MemorySessionStore::new();
        store.logout();
        assert_eq!(store.session(), Session::default());

        store.set_access_token(Some("t1".to_string()));
        store.logout();
        store.logout();
        assert_eq!(store.session(), Session::default());
    }

    #[test]
    fn setters_replace_a_single_field() {
        let store = MemorySessionStore::new();
        store.set_access_token(Some("t1".to_string()));
        store.set_refresh_token(Some("r1".to_string()));

        store.set_access_token(Some("t2".to_string()));

        let session = store.session();
        assert_eq!(session.access_token.as_deref(), Some("t2"));
        assert_eq!(session.refresh_token.as_deref(), Some("r1"));
        assert_eq!(session.user, None);
    }
}
