//! Image listing client methods

use reqwest::Method;

use super::{ApiClient, ClientError};
use crate::types::ImageListResponse;

impl ApiClient {
    /// List the authenticated user's images, newest first.
    pub async fn list_images(
        &self,
        skip: usize,
        limit: usize,
    ) -> Result<ImageListResponse, ClientError> {
        let req = self
            .request(Method::GET, "/images")
            .query(&[("skip", skip), ("limit", limit)]);
        self.execute(req).await
    }

    /// List publicly shared images.
    pub async fn list_public_images(
        &self,
        skip: usize,
        limit: usize,
    ) -> Result<ImageListResponse, ClientError> {
        let req = self
            .request(Method::GET, "/images/public")
            .query(&[("skip", skip), ("limit", limit)]);
        self.execute(req).await
    }
}
