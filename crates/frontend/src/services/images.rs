//! Image listing service

use picloop_http::client::ClientError;
use picloop_http::types::ImageListResponse;

use crate::client;

/// Image API service
#[derive(Clone)]
pub struct ImageService;

impl ImageService {
    /// Create a new image service
    pub fn new() -> Self {
        Self
    }

    /// Fetch a page of the current user's uploads, newest first
    pub async fn my_images(&self, skip: usize, limit: usize) -> Result<ImageListResponse, ClientError> {
        client::api_client()?.list_images(skip, limit).await
    }

    /// Fetch a page of publicly shared images
    pub async fn public_images(
        &self,
        skip: usize,
        limit: usize,
    ) -> Result<ImageListResponse, ClientError> {
        client::api_client()?.list_public_images(skip, limit).await
    }
}

impl Default for ImageService {
    fn default() -> Self {
        Self::new()
    }
}
