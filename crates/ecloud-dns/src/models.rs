//! DNS data models: domains and records.
//!
//! Unlike most families, single-resource responses here are not enveloped;
//! list responses carry the array alongside a `total_count` field.

use ecloud_core::query::QueryParams;
use serde::{Deserialize, Serialize};

/// A DNS domain (zone).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Domain {
    /// Domain UUID.
    pub uuid: String,
    /// Domain name, with trailing period.
    #[serde(default)]
    pub name: String,
    /// Owning project ID.
    #[serde(default)]
    pub project_id: String,
    /// Zone serial.
    #[serde(default)]
    pub serial: i64,
    /// Default TTL in seconds.
    #[serde(default)]
    pub ttl: i32,
    /// Hostmaster email.
    #[serde(default)]
    pub email: String,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: String,
    /// Last update timestamp.
    #[serde(default)]
    pub updated_at: String,
}

/// A DNS record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DnsRecord {
    /// Record UUID.
    pub uuid: String,
    /// Parent domain UUID.
    #[serde(default)]
    pub domain_uuid: String,
    /// Record name, with trailing period.
    #[serde(default)]
    pub name: String,
    /// Record type (A, AAAA, MX, SRV, ...).
    #[serde(default, rename = "type")]
    pub kind: String,
    /// Record data.
    #[serde(default)]
    pub data: String,
    /// Priority, for MX and SRV records.
    #[serde(default)]
    pub priority: Option<i32>,
    /// Weight, for SRV records.
    #[serde(default)]
    pub weight: Option<i32>,
    /// Port, for SRV records.
    #[serde(default)]
    pub port: Option<i32>,
    /// TTL in seconds.
    #[serde(default)]
    pub ttl: i32,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: String,
    /// Last update timestamp.
    #[serde(default)]
    pub updated_at: String,
}

/// Request payload for creating a domain. The name must end with a
/// trailing period (e.g. `example.com.`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateDomainRequest {
    /// Domain name, with trailing period.
    pub name: String,
    /// Default TTL in seconds.
    pub ttl: i32,
    /// Hostmaster email.
    pub email: String,
}

/// Request payload for updating a domain.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateDomainRequest {
    /// New default TTL in seconds.
    pub ttl: i32,
    /// New hostmaster email.
    pub email: String,
}

/// Request payload for creating a record. The name must end with a
/// trailing period (e.g. `www.example.com.`).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateDnsRecordRequest {
    /// Record name, with trailing period.
    pub name: String,
    /// Record type.
    #[serde(rename = "type")]
    pub kind: String,
    /// Record data.
    pub data: String,
    /// Priority, for MX and SRV records.
    pub priority: Option<i32>,
    /// Weight, for SRV records.
    pub weight: Option<i32>,
    /// Port, for SRV records.
    pub port: Option<i32>,
}

/// Request payload for updating a record.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateDnsRecordRequest {
    /// New record name, when changing it.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// New record type, when changing it.
    #[serde(default, rename = "type", skip_serializing_if = "String::is_empty")]
    pub kind: String,
    /// New record data, when changing it.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub data: String,
    /// Priority, for MX and SRV records.
    pub priority: Option<i32>,
    /// Weight, for SRV records.
    pub weight: Option<i32>,
    /// Port, for SRV records.
    pub port: Option<i32>,
}

/// Paged list envelope for domains.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct DomainListResponse {
    #[serde(default)]
    pub domains: Vec<Domain>,
}

/// Paged list envelope for records.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RecordListResponse {
    #[serde(default)]
    pub records: Vec<DnsRecord>,
}

/// Filters for listing domains.
#[derive(Debug, Default, Clone)]
pub struct ListDomainsOptions {
    /// Maximum number of results.
    pub limit: Option<u32>,
    /// Offset into the result set.
    pub offset: Option<u32>,
    /// Sort direction (`asc` or `desc`).
    pub sort_type: Option<String>,
    /// Sort key.
    pub sort_key: Option<String>,
}

impl ListDomainsOptions {
    /// Convert the filters into query parameters.
    #[must_use]
    pub fn to_query(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params.push_opt("limit", self.limit);
        params.push_opt("offset", self.offset);
        params.push_opt("sort_type", self.sort_type.as_deref());
        params.push_opt("sort_key", self.sort_key.as_deref());
        params
    }
}

/// Filters for listing records.
#[derive(Debug, Default, Clone)]
pub struct ListDnsRecordsOptions {
    /// Maximum number of results.
    pub limit: Option<u32>,
    /// Offset into the result set.
    pub offset: Option<u32>,
    /// Sort direction (`asc` or `desc`).
    pub sort_type: Option<String>,
    /// Sort key.
    pub sort_key: Option<String>,
}

impl ListDnsRecordsOptions {
    /// Convert the filters into query parameters.
    #[must_use]
    pub fn to_query(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params.push_opt("limit", self.limit);
        params.push_opt("offset", self.offset);
        params.push_opt("sort_type", self.sort_type.as_deref());
        params.push_opt("sort_key", self.sort_key.as_deref());
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn record_parses_srv_fields() {
        let record: DnsRecord = serde_json::from_value(json!({
            "uuid": "rec-1",
            "domain_uuid": "dom-1",
            "name": "_sip._tcp.example.com.",
            "type": "SRV",
            "data": "sip.example.com.",
            "priority": 10,
            "weight": 5,
            "port": 5060,
            "ttl": 3600
        }))
        .unwrap();

        assert_eq!(record.kind, "SRV");
        assert_eq!(record.port, Some(5060));
    }

    #[test]
    fn update_record_keeps_explicit_nulls_for_srv_fields() {
        let request = UpdateDnsRecordRequest {
            data: "203.0.113.9".into(),
            ..UpdateDnsRecordRequest::default()
        };
        let value = serde_json::to_value(&request).unwrap();
        assert!(value.get("name").is_none());
        assert_eq!(value["data"], "203.0.113.9");
        assert_eq!(value["priority"], serde_json::Value::Null);
    }
}
