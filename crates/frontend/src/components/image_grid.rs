//! Image gallery
//!
//! Images render through their backend-generated presigned URLs. A failed
//! fetch shows an inline error state; it never navigates away.

use picloop_http::types::ImageListResponse;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::components::Spinner;
use crate::services::ImageService;
use crate::utils::{format_bytes, format_timestamp};

const PAGE_SIZE: usize = 50;

/// Which listing the grid shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GalleryScope {
    /// The authenticated user's own uploads.
    Mine,
    /// Images shared publicly by anyone.
    Public,
}

#[derive(Properties, PartialEq)]
pub struct ImageGridProps {
    #[prop_or(GalleryScope::Mine)]
    pub scope: GalleryScope,
}

#[function_component(ImageGrid)]
pub fn image_grid(props: &ImageGridProps) -> Html {
    let listing = use_state(|| None::<Result<ImageListResponse, String>>);

    {
        let listing = listing.clone();
        use_effect_with(props.scope, move |scope| {
            let scope = *scope;
            listing.set(None);
            spawn_local(async move {
                let service = ImageService::new();
                let result = match scope {
                    GalleryScope::Mine => service.my_images(0, PAGE_SIZE).await,
                    GalleryScope::Public => service.public_images(0, PAGE_SIZE).await,
                };
                listing.set(Some(result.map_err(|err| err.to_string())));
            });
        });
    }

    let empty_message = match props.scope {
        GalleryScope::Mine => "No images uploaded yet.",
        GalleryScope::Public => "Nothing has been shared yet.",
    };

    match listing.as_ref() {
        None => html! { <Spinner label={"Loading images..."} /> },
        Some(Err(message)) => html! {
            <div class="p-4 rounded-lg bg-red-50 text-red-700 text-sm">
                {format!("Failed to load images: {message}")}
            </div>
        },
        Some(Ok(listing)) if listing.images.is_empty() => html! {
            <p class="text-gray-500">{empty_message}</p>
        },
        Some(Ok(listing)) => html! {
            <div class="grid grid-cols-2 md:grid-cols-4 gap-4">
                { for listing.images.iter().map(|image| html! {
                    <figure class="rounded-lg overflow-hidden border border-gray-200">
                        <img
                            src={image.url.clone()}
                            alt={image.filename.clone()}
                            class="w-full h-40 object-cover"
                        />
                        <figcaption class="p-2 text-xs text-gray-600">
                            <span class="block font-medium truncate">{image.filename.clone()}</span>
                            <span>
                                {format!(
                                    "{} · {}",
                                    format_bytes(image.size),
                                    format_timestamp(&image.created_at)
                                )}
                            </span>
                        </figcaption>
                    </figure>
                })}
            </div>
        },
    }
}
