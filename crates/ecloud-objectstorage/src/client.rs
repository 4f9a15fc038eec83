//! Asynchronous Object Storage service client.
//!
//! Paths live under `/AUTH_{tenant}` on the object-store base URL. Each
//! path segment is percent-escaped individually; literal `/` inside an
//! object name is preserved, since object names may themselves contain
//! slashes.

use crate::models::{
    AccountInfo, Container, ContainerInfo, ListObjectsOptions, Object, ObjectInfo, SloSegment,
};
use crate::Result;
use bytes::Bytes;
use ecloud_core::query::QueryParams;
use ecloud_core::{Client, Error, ServiceKind};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Method;
use std::collections::HashMap;

/// Escaping set for one path segment: unreserved characters and the
/// literal `/` stay as-is.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'/');

/// Client for the Object Storage service family.
#[derive(Clone)]
pub struct ObjectStorageClient {
    core: Client,
}

impl ObjectStorageClient {
    /// Create an object storage client sharing the given core client.
    #[must_use]
    pub fn new(core: &Client) -> Self {
        Self { core: core.clone() }
    }

    pub(crate) fn account_path(&self) -> String {
        format!(
            "{}/AUTH_{}",
            self.core.endpoint(ServiceKind::ObjectStore),
            self.core.tenant_id()
        )
    }

    pub(crate) fn object_path(&self, segments: &[&str]) -> String {
        let mut path = self.account_path();
        for segment in segments {
            path.push('/');
            path.push_str(&utf8_percent_encode(segment, PATH_SEGMENT).to_string());
        }
        path
    }

    async fn post_headers(&self, url: &str, name: &'static str, value: &str) -> Result<()> {
        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_static(name),
            HeaderValue::from_str(value).map_err(|_| Error::InvalidHeaderValue(name))?,
        );
        self.core.send_raw(Method::POST, url, headers, None).await?;
        Ok(())
    }

    // ------------------------------------------------------------
    // Account
    // ------------------------------------------------------------

    /// Fetch account information from `HEAD` response headers.
    pub async fn get_account_info(&self) -> Result<AccountInfo> {
        let response = self
            .core
            .send_raw(Method::HEAD, &self.account_path(), HeaderMap::new(), None)
            .await?;
        Ok(AccountInfo {
            container_count: header_i64(&response.headers, "x-account-container-count"),
            object_count: header_i64(&response.headers, "x-account-object-count"),
            bytes_used: header_i64(&response.headers, "x-account-bytes-used"),
            bytes_used_actual: header_i64(&response.headers, "x-account-bytes-used-actual"),
            quota_bytes: header_i64(&response.headers, "x-account-meta-quota-bytes"),
        })
    }

    /// Set the account quota in GB. Must be a 100GB increment (100, 200, ...).
    pub async fn set_account_quota(&self, giga_bytes: &str) -> Result<()> {
        self.post_headers(&self.account_path(), "x-account-meta-quota-giga-bytes", giga_bytes)
            .await
    }

    // ------------------------------------------------------------
    // Containers
    // ------------------------------------------------------------

    /// List containers.
    pub async fn list_containers(&self) -> Result<Vec<Container>> {
        let mut params = QueryParams::new();
        params.push("format", "json");
        let url = params.append_to(&self.account_path());
        self.core.fetch(&url).await
    }

    /// Create a container.
    pub async fn create_container(&self, name: &str) -> Result<()> {
        let url = self.object_path(&[name]);
        self.core.send_raw(Method::PUT, &url, HeaderMap::new(), None).await?;
        Ok(())
    }

    /// Delete an empty container.
    pub async fn delete_container(&self, name: &str) -> Result<()> {
        let url = self.object_path(&[name]);
        self.core.send_discard::<()>(Method::DELETE, &url, None).await
    }

    /// Fetch container details from `HEAD` response headers.
    pub async fn get_container_info(&self, name: &str) -> Result<ContainerInfo> {
        let url = self.object_path(&[name]);
        let response = self.core.send_raw(Method::HEAD, &url, HeaderMap::new(), None).await?;
        Ok(ContainerInfo {
            object_count: header_i64(&response.headers, "x-container-object-count"),
            bytes_used: header_i64(&response.headers, "x-container-bytes-used"),
            read_acl: header_string(&response.headers, "x-container-read"),
            write_acl: header_string(&response.headers, "x-container-write"),
            versions_location: header_string(&response.headers, "x-versions-location"),
            metadata: prefixed_metadata(&response.headers, "x-container-meta-"),
        })
    }

    // ------------------------------------------------------------
    // Objects
    // ------------------------------------------------------------

    /// List objects in a container.
    pub async fn list_objects(
        &self,
        container: &str,
        opts: Option<&ListObjectsOptions>,
    ) -> Result<Vec<Object>> {
        let mut params = QueryParams::new();
        params.push("format", "json");
        if let Some(opts) = opts {
            opts.fill(&mut params);
        }
        let url = params.append_to(&self.object_path(&[container]));
        self.core.fetch(&url).await
    }

    /// Upload an object payload.
    pub async fn upload_object(&self, container: &str, object_name: &str, data: Bytes) -> Result<()> {
        let url = self.object_path(&[container, object_name]);
        self.core.send_raw(Method::PUT, &url, HeaderMap::new(), Some(data)).await?;
        Ok(())
    }

    /// Download an object payload.
    pub async fn download_object(&self, container: &str, object_name: &str) -> Result<Bytes> {
        let url = self.object_path(&[container, object_name]);
        let response = self.core.send_raw(Method::GET, &url, HeaderMap::new(), None).await?;
        Ok(response.body)
    }

    /// Delete an object.
    pub async fn delete_object(&self, container: &str, object_name: &str) -> Result<()> {
        let url = self.object_path(&[container, object_name]);
        self.core.send_discard::<()>(Method::DELETE, &url, None).await
    }

    /// Fetch object details from `HEAD` response headers.
    pub async fn get_object_info(&self, container: &str, object_name: &str) -> Result<ObjectInfo> {
        let url = self.object_path(&[container, object_name]);
        let response = self.core.send_raw(Method::HEAD, &url, HeaderMap::new(), None).await?;
        Ok(ObjectInfo {
            content_length: header_i64(&response.headers, "content-length"),
            content_type: header_string(&response.headers, "content-type"),
            etag: header_string(&response.headers, "etag"),
            last_modified: header_string(&response.headers, "last-modified"),
            delete_at: header_i64(&response.headers, "x-delete-at"),
            metadata: prefixed_metadata(&response.headers, "x-object-meta-"),
        })
    }

    /// Copy an object to another container and/or name.
    pub async fn copy_object(
        &self,
        src_container: &str,
        src_object: &str,
        dst_container: &str,
        dst_object: &str,
    ) -> Result<()> {
        let url = self.object_path(&[src_container, src_object]);
        // http accepts any token as an extension method; COPY is static
        // and valid.
        let copy = Method::from_bytes(b"COPY").expect("COPY is a valid method token");
        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_static("destination"),
            HeaderValue::from_str(&format!("{dst_container}/{dst_object}"))
                .map_err(|_| Error::InvalidHeaderValue("destination"))?,
        );
        self.core.send_raw(copy, &url, headers, None).await?;
        Ok(())
    }

    /// Schedule an object for deletion at a Unix timestamp.
    pub async fn schedule_object_deletion(
        &self,
        container: &str,
        object_name: &str,
        delete_at: i64,
    ) -> Result<()> {
        let url = self.object_path(&[container, object_name]);
        self.post_headers(&url, "x-delete-at", &delete_at.to_string()).await
    }

    /// Schedule an object for deletion after a number of seconds.
    pub async fn schedule_object_deletion_after(
        &self,
        container: &str,
        object_name: &str,
        delete_after_seconds: i64,
    ) -> Result<()> {
        let url = self.object_path(&[container, object_name]);
        self.post_headers(&url, "x-delete-after", &delete_after_seconds.to_string())
            .await
    }

    // ------------------------------------------------------------
    // Container configuration
    // ------------------------------------------------------------

    /// Enable object versioning, writing old versions to
    /// `versions_container`.
    pub async fn enable_versioning(&self, container: &str, versions_container: &str) -> Result<()> {
        let url = self.object_path(&[container]);
        self.post_headers(&url, "x-versions-location", versions_container).await
    }

    /// Disable object versioning.
    pub async fn disable_versioning(&self, container: &str) -> Result<()> {
        let url = self.object_path(&[container]);
        self.post_headers(&url, "x-remove-versions-location", "").await
    }

    /// Make a container publicly readable.
    pub async fn enable_web_publishing(&self, container: &str) -> Result<()> {
        let url = self.object_path(&[container]);
        self.post_headers(&url, "x-container-read", ".r:*").await
    }

    /// Remove public read access from a container.
    pub async fn disable_web_publishing(&self, container: &str) -> Result<()> {
        let url = self.object_path(&[container]);
        self.post_headers(&url, "x-container-read", "").await
    }

    /// Register the shared key used by temp URL signatures.
    pub async fn set_temp_url_key(&self, key: &str) -> Result<()> {
        self.post_headers(&self.account_path(), "x-account-meta-temp-url-key", key)
            .await
    }

    /// Remove the temp URL key from the account metadata.
    pub async fn remove_temp_url_key(&self) -> Result<()> {
        self.post_headers(&self.account_path(), "x-remove-account-meta-temp-url-key", "")
            .await
    }

    // ------------------------------------------------------------
    // Large object upload
    // ------------------------------------------------------------

    /// Create a Dynamic Large Object manifest pointing at
    /// `{segment_container}/{segment_prefix}`.
    pub async fn create_dlo_manifest(
        &self,
        container: &str,
        manifest_name: &str,
        segment_container: &str,
        segment_prefix: &str,
    ) -> Result<()> {
        let url = self.object_path(&[container, manifest_name]);
        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_static("x-object-manifest"),
            HeaderValue::from_str(&format!("{segment_container}/{segment_prefix}"))
                .map_err(|_| Error::InvalidHeaderValue("x-object-manifest"))?,
        );
        self.core
            .send_raw(Method::PUT, &url, headers, Some(Bytes::new()))
            .await?;
        Ok(())
    }

    /// Create a Static Large Object manifest from an explicit segment
    /// list.
    pub async fn create_slo_manifest(
        &self,
        container: &str,
        manifest_name: &str,
        segments: &[SloSegment],
    ) -> Result<()> {
        let mut params = QueryParams::new();
        params.push("multipart-manifest", "put");
        let url = params.append_to(&self.object_path(&[container, manifest_name]));
        self.core.send_discard(Method::PUT, &url, Some(&segments)).await
    }
}

fn header_string(headers: &HeaderMap, name: &str) -> String {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

fn header_i64(headers: &HeaderMap, name: &str) -> i64 {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse().ok())
        .unwrap_or_default()
}

fn prefixed_metadata(headers: &HeaderMap, prefix: &str) -> HashMap<String, String> {
    headers
        .iter()
        .filter_map(|(name, value)| {
            name.as_str().strip_prefix(prefix).map(|key| {
                (
                    key.to_string(),
                    value.to_str().unwrap_or_default().to_string(),
                )
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(server: &MockServer) -> ObjectStorageClient {
        let core = Client::builder().object_store_url(server.uri()).build();
        core.set_token("test-token");
        core.set_tenant_id("tenant-1");
        ObjectStorageClient::new(&core)
    }

    #[test]
    fn object_path_escapes_segments_but_keeps_slashes() {
        let core = Client::builder()
            .object_store_url("https://object-storage.c3j1.example-cloud.io/v1")
            .build();
        core.set_tenant_id("tenant-abc");
        let client = ObjectStorageClient::new(&core);

        assert_eq!(
            client.object_path(&["mycontainer", "path/to file.txt"]),
            "https://object-storage.c3j1.example-cloud.io/v1/AUTH_tenant-abc/mycontainer/path/to%20file.txt"
        );
    }

    #[tokio::test]
    async fn account_info_reads_headers() {
        let server = MockServer::start().await;
        Mock::given(method("HEAD"))
            .and(path("/v1/AUTH_tenant-1"))
            .respond_with(
                ResponseTemplate::new(204)
                    .insert_header("x-account-container-count", "3")
                    .insert_header("x-account-object-count", "42")
                    .insert_header("x-account-bytes-used", "1048576")
                    .insert_header("x-account-meta-quota-bytes", "107374182400"),
            )
            .mount(&server)
            .await;

        let client = test_client(&server);
        let info = client.get_account_info().await.unwrap();
        assert_eq!(info.container_count, 3);
        assert_eq!(info.object_count, 42);
        assert_eq!(info.bytes_used, 1_048_576);
        assert_eq!(info.quota_bytes, 107_374_182_400);
    }

    #[tokio::test]
    async fn list_containers_requests_json_format() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/AUTH_tenant-1"))
            .and(query_param("format", "json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"name": "backups", "count": 1, "bytes": 100}
            ])))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let containers = client.list_containers().await.unwrap();
        assert_eq!(containers[0].name, "backups");
    }

    #[tokio::test]
    async fn upload_and_download_roundtrip_raw_bytes() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/v1/AUTH_tenant-1/backups/dump.sql"))
            .and(header("x-auth-token", "test-token"))
            .respond_with(ResponseTemplate::new(201))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v1/AUTH_tenant-1/backups/dump.sql"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"pg_dump output".to_vec()))
            .mount(&server)
            .await;

        let client = test_client(&server);
        client
            .upload_object("backups", "dump.sql", Bytes::from_static(b"pg_dump output"))
            .await
            .unwrap();
        let body = client.download_object("backups", "dump.sql").await.unwrap();
        assert_eq!(&body[..], b"pg_dump output");
    }

    #[tokio::test]
    async fn container_info_collects_prefixed_metadata() {
        let server = MockServer::start().await;
        Mock::given(method("HEAD"))
            .and(path("/v1/AUTH_tenant-1/static"))
            .respond_with(
                ResponseTemplate::new(204)
                    .insert_header("x-container-object-count", "7")
                    .insert_header("x-container-read", ".r:*")
                    .insert_header("x-container-meta-color", "blue")
                    .insert_header("x-container-meta-owner", "web-team"),
            )
            .mount(&server)
            .await;

        let client = test_client(&server);
        let info = client.get_container_info("static").await.unwrap();
        assert_eq!(info.object_count, 7);
        assert_eq!(info.read_acl, ".r:*");
        assert_eq!(info.metadata["color"], "blue");
        assert_eq!(info.metadata["owner"], "web-team");
    }

    #[tokio::test]
    async fn copy_object_sends_destination_header() {
        let server = MockServer::start().await;
        Mock::given(method("COPY"))
            .and(path("/v1/AUTH_tenant-1/src/a.txt"))
            .and(header("destination", "dst/b.txt"))
            .respond_with(ResponseTemplate::new(201))
            .mount(&server)
            .await;

        let client = test_client(&server);
        client.copy_object("src", "a.txt", "dst", "b.txt").await.unwrap();
    }

    #[tokio::test]
    async fn versioning_toggles_use_account_headers() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/AUTH_tenant-1/docs"))
            .and(header("x-versions-location", "docs-versions"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let client = test_client(&server);
        client.enable_versioning("docs", "docs-versions").await.unwrap();
    }

    #[tokio::test]
    async fn slo_manifest_posts_segments_with_query() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/v1/AUTH_tenant-1/videos/movie.mp4"))
            .and(query_param("multipart-manifest", "put"))
            .respond_with(ResponseTemplate::new(201))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let segments = vec![SloSegment {
            path: "videos-segments/movie.mp4/000001".into(),
            etag: "d41d8cd98f00b204e9800998ecf8427e".into(),
            size_bytes: 1_048_576,
        }];
        client.create_slo_manifest("videos", "movie.mp4", &segments).await.unwrap();

        let requests = server.received_requests().await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
        assert_eq!(body[0]["path"], "videos-segments/movie.mp4/000001");
    }

    #[tokio::test]
    async fn schedule_deletion_sets_delete_at() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/AUTH_tenant-1/tmp/report.csv"))
            .and(header("x-delete-at", "1700000000"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let client = test_client(&server);
        client
            .schedule_object_deletion("tmp", "report.csv", 1_700_000_000)
            .await
            .unwrap();
    }
}
