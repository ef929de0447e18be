pub mod auth;
pub mod images;

pub use auth::AuthService;
pub use images::ImageService;
