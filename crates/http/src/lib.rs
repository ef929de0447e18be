//! Picloop HTTP client
//!
//! Typed clients for the Picloop auth and image APIs plus the
//! authenticated-session lifecycle: token persistence, bearer attachment on
//! outgoing requests, and single-flight refresh-and-retry on expiry.

pub mod client;
pub mod session;
pub mod types;

pub use client::{ApiClient, ApiClientBuilder, ClientError, PublicClient};
pub use session::{MemorySessionStore, Session, SessionStore};
