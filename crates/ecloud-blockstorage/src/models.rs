//! Block Storage data models: volumes, volume types, and backups.

use ecloud_core::query::QueryParams;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A block storage volume.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Volume {
    /// Volume ID.
    pub id: String,
    /// Current status (available, in-use, ...).
    #[serde(default)]
    pub status: String,
    /// Size in GiB.
    #[serde(default)]
    pub size: i64,
    /// Availability zone.
    #[serde(default)]
    pub availability_zone: String,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: String,
    /// Last update timestamp.
    #[serde(default)]
    pub updated_at: String,
    /// Volume name.
    #[serde(default)]
    pub name: String,
    /// Description, when set.
    #[serde(default)]
    pub description: Option<String>,
    /// Volume type name.
    #[serde(default)]
    pub volume_type: String,
    /// Source snapshot, when created from one.
    #[serde(default)]
    pub snapshot_id: Option<String>,
    /// Source volume, when cloned.
    #[serde(default, rename = "source_volid")]
    pub source_vol_id: Option<String>,
    /// Volume metadata.
    #[serde(default)]
    pub metadata: HashMap<String, String>,
    /// Owning user ID.
    #[serde(default)]
    pub user_id: String,
    /// Bootable flag, as the provider's string representation.
    #[serde(default)]
    pub bootable: String,
    /// Whether the volume is encrypted.
    #[serde(default)]
    pub encrypted: bool,
    /// Whether multi-attach is enabled.
    #[serde(default)]
    pub multiattach: bool,
    /// Attachment descriptors.
    #[serde(default)]
    pub attachments: Vec<serde_json::Value>,
}

/// A volume type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VolumeType {
    /// Type ID.
    pub id: String,
    /// Type name.
    #[serde(default)]
    pub name: String,
    /// Whether the type is public.
    #[serde(default)]
    pub is_public: bool,
    /// Description.
    #[serde(default)]
    pub description: String,
}

/// Request payload for volume creation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CreateVolumeRequest {
    /// Size in GiB.
    pub size: i64,
    /// Volume name.
    pub name: String,
    /// Volume type name.
    pub volume_type: String,
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Image to initialize the volume from.
    #[serde(default, rename = "imageRef", skip_serializing_if = "Option::is_none")]
    pub image_ref: Option<String>,
    /// Source volume to clone.
    #[serde(default, rename = "source_volid", skip_serializing_if = "Option::is_none")]
    pub source_vol_id: Option<String>,
    /// Backup to restore into the new volume.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backup_id: Option<String>,
}

/// Response payload from saving a volume as an image.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VolumeImageSaveResponse {
    /// Volume ID.
    #[serde(default)]
    pub id: String,
    /// Volume status during the save.
    #[serde(default)]
    pub status: String,
    /// Volume size in GiB.
    #[serde(default)]
    pub size: i64,
    /// New image ID.
    #[serde(default)]
    pub image_id: String,
    /// Image container format.
    #[serde(default)]
    pub container_format: String,
    /// Image disk format.
    #[serde(default)]
    pub disk_format: String,
    /// New image name.
    #[serde(default)]
    pub image_name: String,
}

/// Filters for listing volumes.
#[derive(Debug, Default, Clone)]
pub struct ListVolumesOptions {
    /// Maximum number of results.
    pub limit: Option<u32>,
    /// Offset into the result set.
    pub offset: Option<u32>,
    /// Pagination marker (last seen volume ID).
    pub marker: Option<String>,
    /// Sort expression, e.g. `created_at:desc`.
    pub sort: Option<String>,
    /// Ask the provider to include a total count.
    pub with_count: bool,
}

impl ListVolumesOptions {
    /// Convert the filters into query parameters.
    #[must_use]
    pub fn to_query(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params.push_opt("limit", self.limit);
        params.push_opt("offset", self.offset);
        params.push_opt("marker", self.marker.as_deref());
        params.push_opt("sort", self.sort.as_deref());
        params.push_flag("with_count", self.with_count);
        params
    }
}

/// A volume backup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Backup {
    /// Backup ID.
    pub id: String,
    /// Current status.
    #[serde(default)]
    pub status: String,
    /// Size in GiB.
    #[serde(default)]
    pub size: i64,
    /// Number of objects in the backing store.
    #[serde(default)]
    pub object_count: i64,
    /// Availability zone, when reported.
    #[serde(default)]
    pub availability_zone: Option<String>,
    /// Backing container name.
    #[serde(default)]
    pub container: String,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: String,
    /// Last update timestamp.
    #[serde(default)]
    pub updated_at: String,
    /// Backup name.
    #[serde(default)]
    pub name: String,
    /// Description, when set.
    #[serde(default)]
    pub description: Option<String>,
    /// Failure reason, when the backup failed.
    #[serde(default)]
    pub fail_reason: Option<String>,
    /// Source volume ID.
    #[serde(default)]
    pub volume_id: String,
    /// Whether this backup is incremental.
    #[serde(default)]
    pub is_incremental: bool,
    /// Whether later backups depend on this one.
    #[serde(default)]
    pub has_dependent_backups: bool,
    /// Source snapshot, when taken from one.
    #[serde(default)]
    pub snapshot_id: Option<String>,
    /// Timestamp of the backed-up data.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub data_timestamp: String,
    /// Backup metadata.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, String>,
}

/// Response payload from restoring a backup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BackupRestoreResponse {
    /// Restored backup ID.
    #[serde(default)]
    pub backup_id: String,
    /// Target volume ID.
    #[serde(default)]
    pub volume_id: String,
    /// Target volume name.
    #[serde(default)]
    pub volume_name: String,
}

/// Filters for listing backups.
#[derive(Debug, Default, Clone)]
pub struct ListBackupsOptions {
    /// Maximum number of results.
    pub limit: Option<u32>,
    /// Offset into the result set.
    pub offset: Option<u32>,
    /// Sort expression.
    pub sort: Option<String>,
}

impl ListBackupsOptions {
    /// Convert the filters into query parameters.
    #[must_use]
    pub fn to_query(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params.push_opt("limit", self.limit);
        params.push_opt("offset", self.offset);
        params.push_opt("sort", self.sort.as_deref());
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn volume_parses_nullable_fields() {
        let volume: Volume = serde_json::from_value(json!({
            "id": "vol-1",
            "status": "available",
            "size": 100,
            "name": "data",
            "description": null,
            "snapshot_id": null,
            "source_volid": null,
            "bootable": "false",
            "attachments": []
        }))
        .unwrap();

        assert_eq!(volume.size, 100);
        assert!(volume.description.is_none());
        assert_eq!(volume.bootable, "false");
    }

    #[test]
    fn create_volume_request_omits_unset_sources() {
        let request = CreateVolumeRequest {
            size: 200,
            name: "data".into(),
            volume_type: "c3j1-ds02-boot".into(),
            ..CreateVolumeRequest::default()
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["size"], 200);
        assert!(value.get("imageRef").is_none());
        assert!(value.get("backup_id").is_none());
    }

    #[test]
    fn list_volumes_options_to_query() {
        let opts = ListVolumesOptions {
            limit: Some(5),
            with_count: true,
            ..ListVolumesOptions::default()
        };
        assert_eq!(opts.to_query().append_to("https://x/volumes"), "https://x/volumes?limit=5&with_count=true");
    }
}
