//! Service families and endpoint URL resolution.
//!
//! Every request is built against the base URL of one of eight service
//! families. A base URL is resolved with a three-tier priority: an URL the
//! caller pinned explicitly always wins, the service catalog returned by
//! authentication fills unpinned families, and anything still unset is
//! generated from the region pattern
//! `https://{subdomain}.{region}.example-cloud.io{version_path}`.

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default ExampleCloud region.
pub const DEFAULT_REGION: &str = "c3j1";

/// Parent domain shared by all regional service endpoints.
const ENDPOINT_DOMAIN: &str = "example-cloud.io";

/// The eight ExampleCloud service families this client talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServiceKind {
    /// Identity service (tokens, credentials, sub-users).
    Identity,
    /// Compute service (servers, flavors, keypairs).
    Compute,
    /// Block Storage service (volumes, backups).
    BlockStorage,
    /// Image service (OS and ISO images).
    Image,
    /// Network service (networks, subnets, ports, security groups).
    Network,
    /// Load Balancer service.
    LoadBalancer,
    /// Object Storage service (containers, objects).
    ObjectStore,
    /// DNS service (domains, records).
    Dns,
}

impl ServiceKind {
    /// All service families, in resolution order.
    pub const ALL: [Self; 8] = [
        Self::Identity,
        Self::Compute,
        Self::BlockStorage,
        Self::Image,
        Self::Network,
        Self::LoadBalancer,
        Self::ObjectStore,
        Self::Dns,
    ];

    /// Number of service families.
    pub const COUNT: usize = Self::ALL.len();

    /// The `type` tag this family carries in the service catalog.
    #[must_use]
    pub const fn catalog_type(self) -> &'static str {
        match self {
            Self::Identity => "identity",
            Self::Compute => "compute",
            Self::BlockStorage => "block-storage",
            Self::Image => "image",
            Self::Network => "network",
            Self::LoadBalancer => "load-balancer",
            Self::ObjectStore => "object-store",
            Self::Dns => "dns",
        }
    }

    /// Subdomain used by the region-pattern fallback URL.
    #[must_use]
    pub const fn subdomain(self) -> &'static str {
        match self {
            Self::Identity => "identity",
            Self::Compute => "compute",
            Self::BlockStorage => "block-storage",
            Self::Image => "image-service",
            Self::Network => "networking",
            Self::LoadBalancer => "lbaas",
            Self::ObjectStore => "object-storage",
            Self::Dns => "dns-service",
        }
    }

    /// Fixed API version path for this family.
    #[must_use]
    pub const fn version_path(self) -> &'static str {
        match self {
            Self::Identity => "/v3",
            Self::Compute => "/v2.1",
            Self::BlockStorage => "/v3",
            Self::Image => "/v2",
            Self::Network => "/v2.0",
            Self::LoadBalancer => "/v2.0",
            Self::ObjectStore => "/v1",
            Self::Dns => "/v1",
        }
    }

    /// Base URL generated from the region pattern.
    #[must_use]
    pub fn default_url(self, region: &str) -> String {
        format!(
            "https://{}.{region}.{ENDPOINT_DOMAIN}{}",
            self.subdomain(),
            self.version_path()
        )
    }

    /// Resolve a catalog `type` tag to a service family, accepting the
    /// `volumev3` alias some catalogs use for block storage.
    #[must_use]
    pub fn from_catalog_type(tag: &str) -> Option<Self> {
        match tag {
            "identity" => Some(Self::Identity),
            "compute" => Some(Self::Compute),
            "block-storage" | "volumev3" => Some(Self::BlockStorage),
            "image" => Some(Self::Image),
            "network" => Some(Self::Network),
            "load-balancer" => Some(Self::LoadBalancer),
            "object-store" => Some(Self::ObjectStore),
            "dns" => Some(Self::Dns),
            _ => None,
        }
    }

    pub(crate) const fn index(self) -> usize {
        match self {
            Self::Identity => 0,
            Self::Compute => 1,
            Self::BlockStorage => 2,
            Self::Image => 3,
            Self::Network => 4,
            Self::LoadBalancer => 5,
            Self::ObjectStore => 6,
            Self::Dns => 7,
        }
    }
}

impl FromStr for ServiceKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_catalog_type(&s.to_lowercase()).ok_or_else(|| Error::UnknownService(s.to_string()))
    }
}

impl fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.catalog_type())
    }
}

/// One service entry in the catalog returned by authentication.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogService {
    /// Endpoint descriptors for this service.
    #[serde(default)]
    pub endpoints: Vec<CatalogEndpoint>,
    /// Catalog entry ID.
    #[serde(default)]
    pub id: String,
    /// Service type tag, e.g. `compute` or `dns`.
    #[serde(rename = "type")]
    pub service_type: String,
    /// Human-readable service name.
    #[serde(default)]
    pub name: String,
}

/// One endpoint descriptor inside a catalog entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogEndpoint {
    /// Endpoint ID.
    #[serde(default)]
    pub id: String,
    /// Interface kind: `public`, `internal`, or `admin`.
    #[serde(default)]
    pub interface: String,
    /// Region ID tag.
    #[serde(default)]
    pub region_id: String,
    /// Endpoint URL.
    #[serde(default)]
    pub url: String,
    /// Region tag.
    #[serde(default)]
    pub region: String,
}

/// Base URLs for all eight families, indexed by [`ServiceKind`].
#[derive(Debug, Clone, Default)]
pub(crate) struct EndpointUrls {
    urls: [String; ServiceKind::COUNT],
}

impl EndpointUrls {
    pub(crate) fn get(&self, kind: ServiceKind) -> &str {
        &self.urls[kind.index()]
    }

    pub(crate) fn set(&mut self, kind: ServiceKind, url: String) {
        self.urls[kind.index()] = url;
    }
}

/// Append the version path suffix unless it is already present. Idempotent.
pub(crate) fn ensure_version_path(url: &str, version_path: &str) -> String {
    if url.contains(version_path) {
        url.to_string()
    } else {
        format!("{url}{version_path}")
    }
}

/// Extract the region token from an ExampleCloud-style URL, e.g.
/// `https://identity.c3j2.example-cloud.io/v3` yields `c3j2`. Returns
/// `None` when the host does not match the `{service}.{region}.` pattern.
pub(crate) fn extract_region(raw_url: &str) -> Option<String> {
    let parsed = url::Url::parse(raw_url).ok()?;
    let host = parsed.host_str()?;
    let parts: Vec<&str> = host.split('.').collect();
    if parts.len() >= 4 && parts[parts.len() - 2..] == ["example-cloud", "io"] {
        Some(parts[1].to_string())
    } else {
        None
    }
}

/// Fill any family whose URL is still unset from the region pattern.
pub(crate) fn fill_missing_from_region(urls: &mut EndpointUrls, region: &str) {
    for kind in ServiceKind::ALL {
        if urls.get(kind).is_empty() {
            urls.set(kind, kind.default_url(region));
        }
    }
}

/// Seed unpinned families from the service catalog.
///
/// For each catalog entry the first `public` endpoint matching the client
/// region (by region tag or region-id tag) is taken, with trailing slashes
/// stripped and the family version path ensured. Block-storage URLs may
/// embed a tenant segment after `/v3` and are truncated back to the version
/// path; object-store URLs may embed `/AUTH_{tenant}`, which is stripped.
/// The resource-method layer appends tenant segments itself.
pub(crate) fn update_from_catalog(
    urls: &mut EndpointUrls,
    pinned: &[bool; ServiceKind::COUNT],
    region: &str,
    catalog: &[CatalogService],
) {
    for service in catalog {
        let Some(kind) = ServiceKind::from_catalog_type(&service.service_type) else {
            continue;
        };
        if pinned[kind.index()] {
            continue;
        }
        let Some(public) = service.endpoints.iter().find(|ep| {
            ep.interface == "public"
                && (region.is_empty() || ep.region == region || ep.region_id == region)
        }) else {
            continue;
        };

        let base = public.url.trim_end_matches('/');
        let resolved = match kind {
            ServiceKind::BlockStorage => {
                let with_version = ensure_version_path(base, kind.version_path());
                match with_version.find("/v3/") {
                    Some(idx) => with_version[..idx + 3].to_string(),
                    None => with_version,
                }
            }
            ServiceKind::ObjectStore => {
                let trimmed = match base.find("/AUTH_") {
                    Some(idx) => &base[..idx],
                    None => base,
                };
                ensure_version_path(trimmed, kind.version_path())
            }
            _ => ensure_version_path(base, kind.version_path()),
        };

        tracing::debug!(service = %kind, url = %resolved, "endpoint discovered from service catalog");
        urls.set(kind, resolved);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn public_endpoint(region: &str, url: &str) -> CatalogEndpoint {
        CatalogEndpoint {
            interface: "public".into(),
            region: region.into(),
            url: url.into(),
            ..CatalogEndpoint::default()
        }
    }

    #[test]
    fn ensure_version_path_appends_once() {
        assert_eq!(ensure_version_path("https://x.example.com", "/v2.1"), "https://x.example.com/v2.1");

        let once = ensure_version_path("https://x.example.com", "/v2.1");
        let twice = ensure_version_path(&once, "/v2.1");
        assert_eq!(once, twice);
    }

    #[test]
    fn default_url_pattern() {
        assert_eq!(
            ServiceKind::Compute.default_url("c3j2"),
            "https://compute.c3j2.example-cloud.io/v2.1"
        );
        assert_eq!(
            ServiceKind::Dns.default_url("c3j1"),
            "https://dns-service.c3j1.example-cloud.io/v1"
        );
    }

    #[test]
    fn extract_region_from_identity_url() {
        assert_eq!(
            extract_region("https://identity.c3j2.example-cloud.io/v3").as_deref(),
            Some("c3j2")
        );
        assert_eq!(
            extract_region("https://identity.c3j2.example-cloud.io").as_deref(),
            Some("c3j2")
        );
    }

    #[test]
    fn extract_region_rejects_foreign_hosts() {
        assert_eq!(extract_region("https://identity.example.com"), None);
        assert_eq!(extract_region("https://example-cloud.io"), None);
        assert_eq!(extract_region("not a url"), None);
    }

    #[test]
    fn catalog_type_aliases() {
        assert_eq!(ServiceKind::from_catalog_type("volumev3"), Some(ServiceKind::BlockStorage));
        assert_eq!(ServiceKind::from_catalog_type("block-storage"), Some(ServiceKind::BlockStorage));
        assert_eq!(ServiceKind::from_catalog_type("account"), None);
    }

    #[test]
    fn service_kind_from_str_and_display() {
        let kind: ServiceKind = "Load-Balancer".parse().unwrap();
        assert_eq!(kind, ServiceKind::LoadBalancer);
        assert_eq!(kind.to_string(), "load-balancer");
        assert!("workflow".parse::<ServiceKind>().is_err());
    }

    #[test]
    fn fill_missing_respects_existing() {
        let mut urls = EndpointUrls::default();
        urls.set(ServiceKind::Compute, "https://pinned.example.com/v2.1".into());
        fill_missing_from_region(&mut urls, "c3j2");

        assert_eq!(urls.get(ServiceKind::Compute), "https://pinned.example.com/v2.1");
        assert_eq!(urls.get(ServiceKind::Network), "https://networking.c3j2.example-cloud.io/v2.0");
    }

    #[test]
    fn catalog_update_sets_unpinned_families() {
        let mut urls = EndpointUrls::default();
        fill_missing_from_region(&mut urls, "c3j1");
        let pinned = [false; ServiceKind::COUNT];

        let catalog = vec![CatalogService {
            service_type: "compute".into(),
            endpoints: vec![public_endpoint("c3j1", "https://catalog-compute.example.com/v2.1/")],
            ..CatalogService::default()
        }];
        update_from_catalog(&mut urls, &pinned, "c3j1", &catalog);

        // Trailing slash stripped, version path already present.
        assert_eq!(urls.get(ServiceKind::Compute), "https://catalog-compute.example.com/v2.1");
    }

    #[test]
    fn catalog_update_skips_pinned_families() {
        let mut urls = EndpointUrls::default();
        urls.set(ServiceKind::Compute, "https://explicit.example.com/v2.1".into());
        let mut pinned = [false; ServiceKind::COUNT];
        pinned[ServiceKind::Compute.index()] = true;

        let catalog = vec![CatalogService {
            service_type: "compute".into(),
            endpoints: vec![public_endpoint("c3j1", "https://catalog.example.com/v2.1")],
            ..CatalogService::default()
        }];
        update_from_catalog(&mut urls, &pinned, "c3j1", &catalog);

        assert_eq!(urls.get(ServiceKind::Compute), "https://explicit.example.com/v2.1");
    }

    #[test]
    fn catalog_update_filters_region_and_interface() {
        let mut urls = EndpointUrls::default();
        fill_missing_from_region(&mut urls, "c3j1");
        let before = urls.get(ServiceKind::Compute).to_string();
        let pinned = [false; ServiceKind::COUNT];

        let catalog = vec![
            CatalogService {
                service_type: "compute".into(),
                endpoints: vec![public_endpoint("c3j2", "https://wrong-region.example.com")],
                ..CatalogService::default()
            },
            CatalogService {
                service_type: "compute".into(),
                endpoints: vec![CatalogEndpoint {
                    interface: "internal".into(),
                    region: "c3j1".into(),
                    url: "https://internal.example.com".into(),
                    ..CatalogEndpoint::default()
                }],
                ..CatalogService::default()
            },
        ];
        update_from_catalog(&mut urls, &pinned, "c3j1", &catalog);

        assert_eq!(urls.get(ServiceKind::Compute), before);
    }

    #[test]
    fn catalog_update_matches_region_id() {
        let mut urls = EndpointUrls::default();
        let pinned = [false; ServiceKind::COUNT];

        let catalog = vec![CatalogService {
            service_type: "compute".into(),
            endpoints: vec![CatalogEndpoint {
                interface: "public".into(),
                region_id: "c3j1".into(),
                url: "https://by-region-id.example.com/v2.1".into(),
                ..CatalogEndpoint::default()
            }],
            ..CatalogService::default()
        }];
        update_from_catalog(&mut urls, &pinned, "c3j1", &catalog);

        assert_eq!(urls.get(ServiceKind::Compute), "https://by-region-id.example.com/v2.1");
    }

    #[test]
    fn catalog_update_strips_block_storage_tenant_segment() {
        let mut urls = EndpointUrls::default();
        let pinned = [false; ServiceKind::COUNT];

        let catalog = vec![CatalogService {
            service_type: "volumev3".into(),
            endpoints: vec![public_endpoint("c3j1", "https://bs.example.com/v3/abc123tenant")],
            ..CatalogService::default()
        }];
        update_from_catalog(&mut urls, &pinned, "c3j1", &catalog);

        assert_eq!(urls.get(ServiceKind::BlockStorage), "https://bs.example.com/v3");
    }

    #[test]
    fn catalog_update_strips_object_store_auth_segment() {
        let mut urls = EndpointUrls::default();
        let pinned = [false; ServiceKind::COUNT];

        let catalog = vec![CatalogService {
            service_type: "object-store".into(),
            endpoints: vec![public_endpoint("c3j1", "https://os.example.com/v1/AUTH_abc123tenant")],
            ..CatalogService::default()
        }];
        update_from_catalog(&mut urls, &pinned, "c3j1", &catalog);

        assert_eq!(urls.get(ServiceKind::ObjectStore), "https://os.example.com/v1");
    }

    #[test]
    fn catalog_update_ignores_unknown_service_types() {
        let mut urls = EndpointUrls::default();
        fill_missing_from_region(&mut urls, "c3j1");
        let snapshot: Vec<String> = ServiceKind::ALL.iter().map(|k| urls.get(*k).to_string()).collect();
        let pinned = [false; ServiceKind::COUNT];

        let catalog = vec![CatalogService {
            service_type: "account".into(),
            endpoints: vec![public_endpoint("c3j1", "https://account.example.com")],
            ..CatalogService::default()
        }];
        update_from_catalog(&mut urls, &pinned, "c3j1", &catalog);

        for (kind, before) in ServiceKind::ALL.iter().zip(snapshot) {
            assert_eq!(urls.get(*kind), before);
        }
    }
}
