pub mod app;
pub mod auth;
pub mod client;
pub mod components;
pub mod config;
pub mod pages;
pub mod services;
pub mod session;
pub mod utils;

pub use app::App;
pub use config::AppConfig;
pub use session::BrowserSessionStore;
