//! Object storage data models.
//!
//! Account, container, and object *info* types are populated from response
//! headers rather than JSON bodies; the listing types decode the
//! `?format=json` listing payloads.

use ecloud_core::query::QueryParams;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Account information, read from `HEAD` response headers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountInfo {
    /// Number of containers.
    pub container_count: i64,
    /// Number of objects.
    pub object_count: i64,
    /// Logical bytes used.
    pub bytes_used: i64,
    /// Physical bytes used.
    pub bytes_used_actual: i64,
    /// Account quota in bytes.
    pub quota_bytes: i64,
}

/// Container details, read from `HEAD` response headers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContainerInfo {
    /// Number of objects in the container.
    pub object_count: i64,
    /// Bytes used by the container.
    pub bytes_used: i64,
    /// Read ACL string.
    pub read_acl: String,
    /// Write ACL string.
    pub write_acl: String,
    /// Versions container, when versioning is enabled.
    pub versions_location: String,
    /// `x-container-meta-*` metadata entries.
    pub metadata: HashMap<String, String>,
}

/// One container in an account listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Container {
    /// Container name.
    pub name: String,
    /// Number of objects.
    #[serde(default)]
    pub count: i64,
    /// Bytes used.
    #[serde(default)]
    pub bytes: i64,
}

/// Object details, read from `HEAD` response headers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectInfo {
    /// Payload size in bytes.
    pub content_length: i64,
    /// Content type.
    pub content_type: String,
    /// Entity tag (MD5 of the payload for plain objects).
    pub etag: String,
    /// Last modification timestamp.
    pub last_modified: String,
    /// Scheduled deletion time (Unix timestamp), when set.
    pub delete_at: i64,
    /// `x-object-meta-*` metadata entries.
    pub metadata: HashMap<String, String>,
}

/// One object in a container listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Object {
    /// Object name.
    pub name: String,
    /// Payload hash.
    #[serde(default)]
    pub hash: String,
    /// Payload size in bytes.
    #[serde(default)]
    pub bytes: i64,
    /// Content type.
    #[serde(default)]
    pub content_type: String,
    /// Last modification timestamp.
    #[serde(default)]
    pub last_modified: String,
}

/// One segment of a Static Large Object manifest.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SloSegment {
    /// Segment path (`container/object`).
    pub path: String,
    /// Segment payload hash.
    pub etag: String,
    /// Segment size in bytes.
    pub size_bytes: i64,
}

/// Filters for listing objects.
#[derive(Debug, Default, Clone)]
pub struct ListObjectsOptions {
    /// Reverse the listing order.
    pub reverse: bool,
    /// Maximum number of results.
    pub limit: Option<u32>,
    /// Start listing after this object name.
    pub marker: Option<String>,
    /// Stop listing at this object name.
    pub end_marker: Option<String>,
    /// Only objects with this name prefix.
    pub prefix: Option<String>,
    /// Directory-style grouping delimiter.
    pub delimiter: Option<String>,
}

impl ListObjectsOptions {
    /// Convert the filters into query parameters.
    #[must_use]
    pub fn to_query(&self) -> QueryParams {
        let mut params = QueryParams::new();
        self.fill(&mut params);
        params
    }

    pub(crate) fn fill(&self, params: &mut QueryParams) {
        params.push_opt("limit", self.limit);
        params.push_opt("marker", self.marker.as_deref());
        params.push_opt("end_marker", self.end_marker.as_deref());
        params.push_opt("prefix", self.prefix.as_deref());
        params.push_opt("delimiter", self.delimiter.as_deref());
        params.push_flag("reverse", self.reverse);
    }
}
