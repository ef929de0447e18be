mod image_grid;
mod navbar;
mod spinner;

pub use image_grid::{GalleryScope, ImageGrid};
pub use navbar::NavBar;
pub use spinner::Spinner;
