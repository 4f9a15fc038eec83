//! Image data models.

use chrono::{DateTime, Utc};
use ecloud_core::query::QueryParams;
use serde::{Deserialize, Serialize};

/// An OS or ISO image.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Image {
    /// Image ID.
    pub id: String,
    /// Image name.
    #[serde(default)]
    pub name: String,
    /// Current status (queued, active, ...).
    #[serde(default)]
    pub status: String,
    /// Visibility (`public`, `private`, `shared`).
    #[serde(default)]
    pub visibility: String,
    /// OS type tag (`linux`, `windows`).
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub os_type: String,
    /// Image size in bytes.
    #[serde(default)]
    pub size: i64,
    /// Disk format (`qcow2`, `iso`, ...).
    #[serde(default)]
    pub disk_format: String,
    /// Container format.
    #[serde(default)]
    pub container_format: String,
    /// Minimum disk in GiB.
    #[serde(default)]
    pub min_disk: i32,
    /// Minimum RAM in MiB.
    #[serde(default)]
    pub min_ram: i32,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update timestamp.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    /// Payload checksum.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub checksum: String,
    /// Owning tenant ID.
    #[serde(default)]
    pub owner: String,
    /// Whether the image is protected from deletion.
    #[serde(default)]
    pub protected: bool,
    /// CPU architecture tag.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub architecture: String,
    /// Image tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Payload hash algorithm.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub os_hash_algo: String,
    /// Payload hash value.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub os_hash_value: String,
    /// Whether the image is hidden from listings.
    #[serde(default)]
    pub os_hidden: bool,
    /// Virtual size in bytes, when known.
    #[serde(default)]
    pub virtual_size: Option<i64>,
    /// Rescue bus for ISO images.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub hw_rescue_bus: String,
    /// Rescue device for ISO images.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub hw_rescue_device: String,
}

/// Image storage quota.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImageQuota {
    /// Quota expressed as a size string, e.g. `550GB`.
    pub image_size: String,
}

/// Image storage usage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImageUsage {
    /// Bytes in use.
    pub size: i64,
}

/// Fixed payload for creating an ISO image entry.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct CreateIsoImageRequest<'a> {
    pub name: &'a str,
    pub disk_format: &'static str,
    pub hw_rescue_bus: &'static str,
    pub hw_rescue_device: &'static str,
    pub container_format: &'static str,
}

/// Filters for listing images.
#[derive(Debug, Default, Clone)]
pub struct ListImagesOptions {
    /// Maximum number of results.
    pub limit: Option<u32>,
    /// Pagination marker (last seen image ID).
    pub marker: Option<String>,
    /// Filter by visibility (`public`, `shared`).
    pub visibility: Option<String>,
    /// Filter by OS type (`linux`, `windows`).
    pub os_type: Option<String>,
    /// Combined sort expression.
    pub sort: Option<String>,
    /// Sort key.
    pub sort_key: Option<String>,
    /// Sort direction.
    pub sort_dir: Option<String>,
    /// Filter by name.
    pub name: Option<String>,
    /// Filter by status.
    pub status: Option<String>,
}

impl ListImagesOptions {
    /// Convert the filters into query parameters.
    #[must_use]
    pub fn to_query(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params.push_opt("limit", self.limit);
        params.push_opt("marker", self.marker.as_deref());
        params.push_opt("visibility", self.visibility.as_deref());
        params.push_opt("os_type", self.os_type.as_deref());
        params.push_opt("sort", self.sort.as_deref());
        params.push_opt("sort_key", self.sort_key.as_deref());
        params.push_opt("sort_dir", self.sort_dir.as_deref());
        params.push_opt("name", self.name.as_deref());
        params.push_opt("status", self.status.as_deref());
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn image_parses_glance_payload() {
        let image: Image = serde_json::from_value(json!({
            "id": "img-1",
            "name": "ubuntu-24.04",
            "status": "active",
            "visibility": "public",
            "os_type": "linux",
            "size": 2147483648i64,
            "disk_format": "qcow2",
            "container_format": "bare",
            "min_disk": 30,
            "created_at": "2025-03-11T15:11:09Z",
            "tags": [],
            "virtual_size": null
        }))
        .unwrap();

        assert_eq!(image.name, "ubuntu-24.04");
        assert_eq!(image.size, 2_147_483_648);
        assert!(image.created_at.is_some());
        assert!(image.virtual_size.is_none());
    }

    #[test]
    fn list_images_options_to_query() {
        let opts = ListImagesOptions {
            visibility: Some("public".into()),
            os_type: Some("linux".into()),
            ..ListImagesOptions::default()
        };
        assert_eq!(
            opts.to_query().append_to("https://x/images"),
            "https://x/images?visibility=public&os_type=linux"
        );
    }
}
