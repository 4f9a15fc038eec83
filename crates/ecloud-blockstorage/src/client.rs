//! Asynchronous Block Storage service client.

use crate::models::{
    Backup, BackupRestoreResponse, CreateVolumeRequest, ListBackupsOptions, ListVolumesOptions,
    Volume, VolumeImageSaveResponse, VolumeType,
};
use crate::Result;
use ecloud_core::envelope::Named;
use ecloud_core::{Client, ServiceKind};
use reqwest::Method;
use std::collections::HashMap;

/// Client for the Block Storage service family.
///
/// Every path is tenant-scoped: the tenant ID resolved at authentication
/// is inserted between the base URL and the resource path.
#[derive(Clone)]
pub struct BlockStorageClient {
    core: Client,
}

impl BlockStorageClient {
    /// Create a block storage client sharing the given core client.
    #[must_use]
    pub fn new(core: &Client) -> Self {
        Self { core: core.clone() }
    }

    fn base(&self) -> String {
        format!(
            "{}/{}",
            self.core.endpoint(ServiceKind::BlockStorage),
            self.core.tenant_id()
        )
    }

    // ------------------------------------------------------------
    // Volumes
    // ------------------------------------------------------------

    /// List volumes (basic view).
    pub async fn list_volumes(&self, opts: Option<&ListVolumesOptions>) -> Result<Vec<Volume>> {
        let mut url = format!("{}/volumes", self.base());
        if let Some(opts) = opts {
            url = opts.to_query().append_to(&url);
        }
        self.core.fetch_resource(&url, "volumes").await
    }

    /// List volumes with full details.
    pub async fn list_volumes_detail(&self, opts: Option<&ListVolumesOptions>) -> Result<Vec<Volume>> {
        let mut url = format!("{}/volumes/detail", self.base());
        if let Some(opts) = opts {
            url = opts.to_query().append_to(&url);
        }
        self.core.fetch_resource(&url, "volumes").await
    }

    /// Fetch a volume's details.
    pub async fn get_volume(&self, volume_id: &str) -> Result<Volume> {
        let url = format!("{}/volumes/{volume_id}", self.base());
        self.core.fetch_resource(&url, "volume").await
    }

    /// Create a volume.
    pub async fn create_volume(&self, opts: &CreateVolumeRequest) -> Result<Volume> {
        let url = format!("{}/volumes", self.base());
        self.core
            .send_resource(Method::POST, &url, Some(&Named::new("volume", opts)), "volume")
            .await
    }

    /// Delete a volume. `force` deletes even when the volume is in use.
    pub async fn delete_volume(&self, volume_id: &str, force: bool) -> Result<()> {
        let mut url = format!("{}/volumes/{volume_id}", self.base());
        if force {
            url.push_str("?force=true");
        }
        self.core.send_discard::<()>(Method::DELETE, &url, None).await
    }

    /// Update a volume's name and, optionally, its description.
    pub async fn update_volume(
        &self,
        volume_id: &str,
        name: &str,
        description: Option<&str>,
    ) -> Result<Volume> {
        let url = format!("{}/volumes/{volume_id}", self.base());
        let mut fields = HashMap::new();
        fields.insert("name", name);
        if let Some(description) = description {
            fields.insert("description", description);
        }
        self.core
            .send_resource(Method::PUT, &url, Some(&Named::new("volume", &fields)), "volume")
            .await
    }

    /// Save a volume as an image.
    pub async fn save_volume_as_image(
        &self,
        volume_id: &str,
        image_name: &str,
    ) -> Result<VolumeImageSaveResponse> {
        let url = format!("{}/volumes/{volume_id}/action", self.base());
        let mut fields = HashMap::new();
        fields.insert("image_name", image_name);
        self.core
            .send_resource(
                Method::POST,
                &url,
                Some(&Named::new("os-volume_upload_image", &fields)),
                "os-volume_upload_image",
            )
            .await
    }

    // ------------------------------------------------------------
    // Volume types
    // ------------------------------------------------------------

    /// List available volume types.
    pub async fn list_volume_types(&self) -> Result<Vec<VolumeType>> {
        let url = format!("{}/types", self.base());
        self.core.fetch_resource(&url, "volume_types").await
    }

    /// Fetch a volume type's details.
    pub async fn get_volume_type(&self, volume_type_id: &str) -> Result<VolumeType> {
        let url = format!("{}/types/{volume_type_id}", self.base());
        self.core.fetch_resource(&url, "volume_type").await
    }

    // ------------------------------------------------------------
    // Backups
    // ------------------------------------------------------------

    /// List backups (basic view).
    pub async fn list_backups(&self, opts: Option<&ListBackupsOptions>) -> Result<Vec<Backup>> {
        let mut url = format!("{}/backups", self.base());
        if let Some(opts) = opts {
            url = opts.to_query().append_to(&url);
        }
        self.core.fetch_resource(&url, "backups").await
    }

    /// List backups with full details.
    pub async fn list_backups_detail(&self, opts: Option<&ListBackupsOptions>) -> Result<Vec<Backup>> {
        let mut url = format!("{}/backups/detail", self.base());
        if let Some(opts) = opts {
            url = opts.to_query().append_to(&url);
        }
        self.core.fetch_resource(&url, "backups").await
    }

    /// Fetch a backup's details.
    pub async fn get_backup(&self, backup_id: &str) -> Result<Backup> {
        let url = format!("{}/backups/{backup_id}", self.base());
        self.core.fetch_resource(&url, "backup").await
    }

    /// Enable daily auto-backup for a server.
    pub async fn enable_auto_backup(&self, server_id: &str) -> Result<Backup> {
        let url = format!("{}/backups", self.base());
        let mut fields = HashMap::new();
        fields.insert("instance_uuid", server_id);
        self.core
            .send_resource(Method::POST, &url, Some(&Named::new("backup", &fields)), "backup")
            .await
    }

    /// Disable daily auto-backup for a server.
    ///
    /// The delete path is keyed by *server* ID, not backup ID, unlike the
    /// sibling backup operations: auto-backup subscriptions are keyed by
    /// instance on the provider side.
    pub async fn disable_auto_backup(&self, server_id: &str) -> Result<()> {
        let url = format!("{}/backups/{server_id}", self.base());
        self.core.send_discard::<()>(Method::DELETE, &url, None).await
    }

    /// Restore a backup onto a volume.
    pub async fn restore_backup(
        &self,
        backup_id: &str,
        volume_id: &str,
    ) -> Result<BackupRestoreResponse> {
        let url = format!("{}/backups/{backup_id}/restore", self.base());
        let mut fields = HashMap::new();
        fields.insert("volume_id", volume_id);
        self.core
            .send_resource(Method::POST, &url, Some(&Named::new("restore", &fields)), "restore")
            .await
    }
}
