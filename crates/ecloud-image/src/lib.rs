//! Image service client and data models for the ExampleCloud API.
//!
//! Covers OS and ISO images, storage quota and usage, and the raw ISO
//! upload endpoint.

#![deny(missing_docs)]

pub mod client;
pub mod models;

pub use client::ImageClient;
pub use models::{Image, ImageQuota, ImageUsage, ListImagesOptions};

/// Convenient result alias that reuses the shared ExampleCloud error type.
pub type Result<T> = ecloud_core::Result<T>;
