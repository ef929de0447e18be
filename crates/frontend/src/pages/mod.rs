mod callback;
mod home;
mod login;

pub use callback::AuthCallback;
pub use home::Home;
pub use login::Login;
