//! Object Storage service client for the ExampleCloud API.
//!
//! Covers account, container, and object operations, large-object
//! manifests, container configuration, and HMAC-signed temporary URLs for
//! token-free object access. Object payloads travel through the raw
//! pipeline variant (no JSON decoding); everything shares the standard
//! error classification.

#![deny(missing_docs)]

pub mod client;
pub mod models;
mod temp_url;

pub use client::ObjectStorageClient;
pub use models::{
    AccountInfo, Container, ContainerInfo, ListObjectsOptions, Object, ObjectInfo, SloSegment,
};

/// Convenient result alias that reuses the shared ExampleCloud error type.
pub type Result<T> = ecloud_core::Result<T>;
