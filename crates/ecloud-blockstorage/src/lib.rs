//! Block Storage service client and data models for the ExampleCloud API.
//!
//! Covers volumes, volume types, and volume backups. All paths in this
//! family are tenant-scoped: the client inserts the tenant ID resolved at
//! authentication time between the base URL and the resource path.

#![deny(missing_docs)]

pub mod client;
pub mod models;

pub use client::BlockStorageClient;
pub use models::{
    Backup, BackupRestoreResponse, CreateVolumeRequest, ListBackupsOptions, ListVolumesOptions,
    Volume, VolumeImageSaveResponse, VolumeType,
};

/// Convenient result alias that reuses the shared ExampleCloud error type.
pub type Result<T> = ecloud_core::Result<T>;
