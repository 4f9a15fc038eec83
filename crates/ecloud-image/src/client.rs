//! Asynchronous Image service client.

use crate::models::{CreateIsoImageRequest, Image, ImageQuota, ImageUsage, ListImagesOptions};
use crate::Result;
use bytes::Bytes;
use ecloud_core::envelope::Named;
use ecloud_core::{Client, ServiceKind};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::Method;
use std::collections::HashMap;

/// Client for the Image service family.
#[derive(Clone)]
pub struct ImageClient {
    core: Client,
}

impl ImageClient {
    /// Create an image client sharing the given core client.
    #[must_use]
    pub fn new(core: &Client) -> Self {
        Self { core: core.clone() }
    }

    fn base(&self) -> String {
        self.core.endpoint(ServiceKind::Image)
    }

    /// List images.
    pub async fn list_images(&self, opts: Option<&ListImagesOptions>) -> Result<Vec<Image>> {
        let mut url = format!("{}/images", self.base());
        if let Some(opts) = opts {
            url = opts.to_query().append_to(&url);
        }
        self.core.fetch_resource(&url, "images").await
    }

    /// Fetch an image's details. Image detail responses are not enveloped.
    pub async fn get_image(&self, image_id: &str) -> Result<Image> {
        let url = format!("{}/images/{image_id}", self.base());
        self.core.fetch(&url).await
    }

    /// Delete an image.
    pub async fn delete_image(&self, image_id: &str) -> Result<()> {
        let url = format!("{}/images/{image_id}", self.base());
        self.core.send_discard::<()>(Method::DELETE, &url, None).await
    }

    /// Fetch the image storage quota.
    pub async fn get_image_quota(&self) -> Result<ImageQuota> {
        let url = format!("{}/quota", self.base());
        self.core.fetch_resource(&url, "quota").await
    }

    /// Fetch the current image storage usage.
    pub async fn get_image_usage(&self) -> Result<ImageUsage> {
        let url = format!("{}/images/total", self.base());
        self.core.fetch_resource(&url, "images").await
    }

    /// Change the image storage quota. `image_size` is a size string such
    /// as `50GB` or `550GB`; the minimum is 50GB, additions come in 500GB
    /// increments.
    pub async fn set_image_quota(&self, image_size: &str) -> Result<ImageQuota> {
        let url = format!("{}/quota", self.base());
        let mut fields = HashMap::new();
        fields.insert("image_size", image_size);
        self.core
            .send_resource(Method::PUT, &url, Some(&Named::new("quota", &fields)), "quota")
            .await
    }

    /// Create an ISO image metadata entry. Upload the payload afterwards
    /// with [`ImageClient::upload_iso_image`].
    pub async fn create_iso_image(&self, name: &str) -> Result<Image> {
        let url = format!("{}/images", self.base());
        let body = CreateIsoImageRequest {
            name,
            disk_format: "iso",
            hw_rescue_bus: "ide",
            hw_rescue_device: "cdrom",
            container_format: "bare",
        };
        self.core.send(Method::POST, &url, Some(&body)).await
    }

    /// Upload ISO payload bytes to a previously created image entry. The
    /// body is streamed raw (`application/octet-stream`), bypassing the
    /// JSON pipeline but sharing its error classification.
    pub async fn upload_iso_image(&self, image_id: &str, data: Bytes) -> Result<()> {
        let url = format!("{}/images/{image_id}/file", self.base());
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/octet-stream"));
        self.core.send_raw(Method::PUT, &url, headers, Some(data)).await?;
        Ok(())
    }
}
