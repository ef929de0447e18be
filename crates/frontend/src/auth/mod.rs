//! Authentication module

pub mod context;
pub mod expiry;

pub use context::{use_auth, use_is_authenticated, AuthAction, AuthContext, AuthProvider};
