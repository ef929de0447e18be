//! Picloop API clients

pub mod auth;
pub mod error;
pub mod images;
pub mod typed;

pub use error::ClientError;
pub use typed::{ApiClient, ApiClientBuilder, PublicClient, SessionExpiredHook};
