//! Client construction, shared state, and the HTTP request pipeline.
//!
//! A [`Client`] is built once, authenticated, and then shared (it is
//! cheaply clonable) across every service family. Region and explicitly
//! pinned URLs are fixed at construction; the token, tenant ID, and the
//! eight endpoint URLs are the only mutable state, guarded by a single
//! reader/writer lock that is never held across a network call. The
//! library imposes no timeout of its own: inject a configured
//! [`reqwest::Client`] to set one, and drop a returned future to cancel
//! its in-flight request.

use crate::endpoint::{self, CatalogService, EndpointUrls, ServiceKind, DEFAULT_REGION};
use crate::envelope;
use crate::error::{ApiError, Error, Result};
use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;

/// Header carrying the bearer token on every authenticated request.
pub const AUTH_TOKEN_HEADER: &str = "x-auth-token";

fn application_json() -> HeaderValue {
    HeaderValue::from_static("application/json")
}

/// All eight endpoint URLs at once, for bulk override at construction.
/// `None` fields are ignored; `Some` fields are pinned and never
/// overwritten by catalog discovery.
#[derive(Debug, Clone, Default)]
pub struct Endpoints {
    /// Identity API endpoint.
    pub identity: Option<String>,
    /// Compute API endpoint.
    pub compute: Option<String>,
    /// Block Storage API endpoint.
    pub block_storage: Option<String>,
    /// Image API endpoint.
    pub image: Option<String>,
    /// Network API endpoint.
    pub network: Option<String>,
    /// Load Balancer API endpoint.
    pub load_balancer: Option<String>,
    /// Object Storage API endpoint.
    pub object_store: Option<String>,
    /// DNS API endpoint.
    pub dns: Option<String>,
}

/// Builder for [`Client`].
///
/// Endpoint resolution order (highest priority first):
/// 1. URLs set here via the `*_url` setters or [`ClientBuilder::endpoints`]
///    — never overridden afterwards
/// 2. Auto-discovered from the service catalog after authentication
/// 3. Generated from the region pattern
///    `https://{service}.{region}.example-cloud.io`
#[derive(Debug, Default)]
pub struct ClientBuilder {
    region: Option<String>,
    http: Option<reqwest::Client>,
    overrides: Vec<(ServiceKind, String)>,
}

impl ClientBuilder {
    /// Create a builder with defaults (region `c3j1`, fresh transport).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the region used for catalog filtering and URL generation.
    #[must_use]
    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Inject the HTTP transport. The client never configures a timeout on
    /// its own; set one here if you want one.
    #[must_use]
    pub fn http_client(mut self, http: reqwest::Client) -> Self {
        self.http = Some(http);
        self
    }

    fn pin(mut self, kind: ServiceKind, url: impl Into<String>) -> Self {
        self.overrides.push((kind, url.into()));
        self
    }

    /// Pin the Identity API endpoint.
    #[must_use]
    pub fn identity_url(self, url: impl Into<String>) -> Self {
        self.pin(ServiceKind::Identity, url)
    }

    /// Pin the Compute API endpoint.
    #[must_use]
    pub fn compute_url(self, url: impl Into<String>) -> Self {
        self.pin(ServiceKind::Compute, url)
    }

    /// Pin the Block Storage API endpoint.
    #[must_use]
    pub fn block_storage_url(self, url: impl Into<String>) -> Self {
        self.pin(ServiceKind::BlockStorage, url)
    }

    /// Pin the Image API endpoint.
    #[must_use]
    pub fn image_url(self, url: impl Into<String>) -> Self {
        self.pin(ServiceKind::Image, url)
    }

    /// Pin the Network API endpoint.
    #[must_use]
    pub fn network_url(self, url: impl Into<String>) -> Self {
        self.pin(ServiceKind::Network, url)
    }

    /// Pin the Load Balancer API endpoint.
    #[must_use]
    pub fn load_balancer_url(self, url: impl Into<String>) -> Self {
        self.pin(ServiceKind::LoadBalancer, url)
    }

    /// Pin the Object Storage API endpoint.
    #[must_use]
    pub fn object_store_url(self, url: impl Into<String>) -> Self {
        self.pin(ServiceKind::ObjectStore, url)
    }

    /// Pin the DNS API endpoint.
    #[must_use]
    pub fn dns_url(self, url: impl Into<String>) -> Self {
        self.pin(ServiceKind::Dns, url)
    }

    /// Pin several endpoints at once. `None` fields are ignored.
    #[must_use]
    pub fn endpoints(mut self, endpoints: Endpoints) -> Self {
        let Endpoints {
            identity,
            compute,
            block_storage,
            image,
            network,
            load_balancer,
            object_store,
            dns,
        } = endpoints;
        let pairs = [
            (ServiceKind::Identity, identity),
            (ServiceKind::Compute, compute),
            (ServiceKind::BlockStorage, block_storage),
            (ServiceKind::Image, image),
            (ServiceKind::Network, network),
            (ServiceKind::LoadBalancer, load_balancer),
            (ServiceKind::ObjectStore, object_store),
            (ServiceKind::Dns, dns),
        ];
        for (kind, url) in pairs {
            if let Some(url) = url {
                self = self.pin(kind, url);
            }
        }
        self
    }

    /// Build the client, resolving all endpoint URLs.
    #[must_use]
    pub fn build(self) -> Client {
        let mut urls = EndpointUrls::default();
        let mut pinned = [false; ServiceKind::COUNT];
        for (kind, url) in &self.overrides {
            urls.set(*kind, url.clone());
            pinned[kind.index()] = true;
        }

        // Region inference must see the pinned identity URL before
        // version-path normalization reshapes it.
        let mut region = self.region;
        if region.is_none() && pinned[ServiceKind::Identity.index()] {
            region = endpoint::extract_region(urls.get(ServiceKind::Identity));
        }
        let region = region.unwrap_or_else(|| DEFAULT_REGION.to_string());

        // Pinned URLs are normalized exactly once, here: trailing slashes
        // trimmed, the family version path appended if absent. Catalog
        // updates later skip pinned families entirely.
        for kind in ServiceKind::ALL {
            if pinned[kind.index()] {
                let trimmed = urls.get(kind).trim_end_matches('/').to_string();
                urls.set(kind, endpoint::ensure_version_path(&trimmed, kind.version_path()));
            }
        }
        endpoint::fill_missing_from_region(&mut urls, &region);

        Client {
            inner: Arc::new(ClientInner {
                http: self.http.unwrap_or_default(),
                region,
                pinned,
                state: RwLock::new(SharedState {
                    token: String::new(),
                    tenant_id: String::new(),
                    urls,
                }),
            }),
        }
    }
}

struct ClientInner {
    http: reqwest::Client,
    region: String,
    pinned: [bool; ServiceKind::COUNT],
    state: RwLock<SharedState>,
}

struct SharedState {
    token: String,
    tenant_id: String,
    urls: EndpointUrls,
}

/// Raw response surfaced by the non-JSON pipeline variant: status, headers,
/// and the full body. Status codes >= 400 never reach this type; they are
/// classified into [`ApiError`] first.
#[derive(Debug)]
pub struct HttpResponse {
    /// Response status code (always < 400).
    pub status: StatusCode,
    /// Response headers.
    pub headers: HeaderMap,
    /// Full response body.
    pub body: Bytes,
}

/// The ExampleCloud API client.
///
/// Safe for concurrent use: clones share one inner state, and the token,
/// tenant ID, and endpoint URLs are read and written under a short-lived
/// reader/writer lock. Two concurrent `authenticate` calls may interleave;
/// the last writer wins.
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

impl Client {
    /// Create a client with all defaults (region `c3j1`, pattern URLs).
    #[must_use]
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Start building a configured client.
    #[must_use]
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// The configured region.
    #[must_use]
    pub fn region(&self) -> &str {
        &self.inner.region
    }

    /// Whether the given family's URL was pinned by the caller.
    #[must_use]
    pub fn is_pinned(&self, kind: ServiceKind) -> bool {
        self.inner.pinned[kind.index()]
    }

    /// Snapshot of the resolved base URL for a service family.
    #[must_use]
    pub fn endpoint(&self, kind: ServiceKind) -> String {
        self.read_state().urls.get(kind).to_string()
    }

    /// Snapshot of the current bearer token (empty before authentication).
    #[must_use]
    pub fn token(&self) -> String {
        self.read_state().token.clone()
    }

    /// Snapshot of the current tenant/project ID.
    #[must_use]
    pub fn tenant_id(&self) -> String {
        self.read_state().tenant_id.clone()
    }

    /// Replace the bearer token, e.g. with one cached out-of-band.
    pub fn set_token(&self, token: impl Into<String>) {
        self.write_state().token = token.into();
    }

    /// Replace the tenant/project ID.
    pub fn set_tenant_id(&self, tenant_id: impl Into<String>) {
        self.write_state().tenant_id = tenant_id.into();
    }

    fn read_state(&self) -> RwLockReadGuard<'_, SharedState> {
        // A poisoned lock means a panic already happened while holding it;
        // the string state it guards is still usable.
        self.inner.state.read().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, SharedState> {
        self.inner.state.write().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Commit the result of a successful authentication: token, tenant ID
    /// (when non-empty), and catalog-discovered URLs, atomically under one
    /// write-lock acquisition so concurrent readers never observe a
    /// partially-updated state.
    pub(crate) fn apply_auth_success(
        &self,
        token: String,
        tenant_id: String,
        catalog: &[CatalogService],
    ) {
        let mut state = self.write_state();
        state.token = token;
        if !tenant_id.is_empty() {
            state.tenant_id = tenant_id;
        }
        if !catalog.is_empty() {
            endpoint::update_from_catalog(
                &mut state.urls,
                &self.inner.pinned,
                &self.inner.region,
                catalog,
            );
        }
    }

    // ------------------------------------------------------------
    // Pipeline
    // ------------------------------------------------------------

    /// GET a JSON body. `Ok(None)` when the response body is empty.
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<Option<T>> {
        self.send_json::<(), T>(Method::GET, url, None).await
    }

    /// Send a request with an optional JSON body and decode the JSON
    /// response. An empty 2xx body (202/204 responses) yields `Ok(None)`
    /// rather than an error.
    pub async fn send_json<B, T>(&self, method: Method, url: &str, body: Option<&B>) -> Result<Option<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.execute_json(method, url, body).await?;
        if response.body.is_empty() {
            return Ok(None);
        }
        serde_json::from_slice(&response.body).map(Some).map_err(Error::Decode)
    }

    /// GET a JSON body that the endpoint contract guarantees.
    pub async fn fetch<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        self.get_json(url).await?.ok_or(Error::EmptyResponse)
    }

    /// GET an enveloped resource: decode the body and extract `key`.
    pub async fn fetch_resource<T: DeserializeOwned>(&self, url: &str, key: &str) -> Result<T> {
        let value = self.fetch::<serde_json::Value>(url).await?;
        envelope::unwrap(value, key)
    }

    /// Send a request and decode a guaranteed JSON response body.
    pub async fn send<B, T>(&self, method: Method, url: &str, body: Option<&B>) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send_json(method, url, body).await?.ok_or(Error::EmptyResponse)
    }

    /// Send a request and extract `key` from the enveloped response.
    pub async fn send_resource<B, T>(
        &self,
        method: Method,
        url: &str,
        body: Option<&B>,
        key: &str,
    ) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let value = self.send::<B, serde_json::Value>(method, url, body).await?;
        envelope::unwrap(value, key)
    }

    /// Send a request and discard whatever body comes back. For endpoints
    /// answering 202/204, or where the response body carries nothing the
    /// caller needs.
    pub async fn send_discard<B>(&self, method: Method, url: &str, body: Option<&B>) -> Result<()>
    where
        B: Serialize + ?Sized,
    {
        self.execute_json(method, url, body).await?;
        Ok(())
    }

    /// Raw pipeline variant: same status classification as the JSON
    /// variant, but no decoding — callers get status, headers, and bytes.
    /// Extra headers override the defaults; the body, when present, is sent
    /// as-is.
    pub async fn send_raw(
        &self,
        method: Method,
        url: &str,
        headers: HeaderMap,
        body: Option<Bytes>,
    ) -> Result<HttpResponse> {
        self.execute(method, url, body, headers, true).await
    }

    async fn execute_json<B>(&self, method: Method, url: &str, body: Option<&B>) -> Result<HttpResponse>
    where
        B: Serialize + ?Sized,
    {
        let mut headers = HeaderMap::new();
        let payload = match body {
            Some(value) => {
                headers.insert(CONTENT_TYPE, application_json());
                Some(Bytes::from(serde_json::to_vec(value).map_err(Error::Encode)?))
            }
            None => None,
        };
        self.execute(method, url, payload, headers, true).await
    }

    pub(crate) async fn execute(
        &self,
        method: Method,
        url: &str,
        body: Option<Bytes>,
        mut headers: HeaderMap,
        with_token: bool,
    ) -> Result<HttpResponse> {
        headers.entry(ACCEPT).or_insert_with(application_json);
        if with_token {
            let token = self.token();
            if !token.is_empty() {
                if let Ok(value) = HeaderValue::from_str(&token) {
                    headers.insert(HeaderName::from_static(AUTH_TOKEN_HEADER), value);
                }
            }
        }

        debug!(%method, url, "sending request");
        let mut request = self.inner.http.request(method, url).headers(headers);
        if let Some(body) = body {
            request = request.body(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let response_headers = response.headers().clone();
        let body = response.bytes().await?;
        debug!(status = status.as_u16(), "received response");

        if status.as_u16() >= 400 {
            return Err(ApiError::from_response(status, &body).into());
        }

        Ok(HttpResponse {
            status,
            headers: response_headers,
            body,
        })
    }
}
