//! Asynchronous DNS service client.

use crate::models::{
    CreateDnsRecordRequest, CreateDomainRequest, DnsRecord, Domain, DomainListResponse,
    ListDnsRecordsOptions, ListDomainsOptions, RecordListResponse, UpdateDnsRecordRequest,
    UpdateDomainRequest,
};
use crate::Result;
use ecloud_core::{Client, ServiceKind};
use reqwest::Method;

/// Client for the DNS service family.
#[derive(Clone)]
pub struct DnsClient {
    core: Client,
}

impl DnsClient {
    /// Create a DNS client sharing the given core client.
    #[must_use]
    pub fn new(core: &Client) -> Self {
        Self { core: core.clone() }
    }

    fn base(&self) -> String {
        self.core.endpoint(ServiceKind::Dns)
    }

    // ------------------------------------------------------------
    // Domains
    // ------------------------------------------------------------

    /// List domains.
    pub async fn list_domains(&self, opts: Option<&ListDomainsOptions>) -> Result<Vec<Domain>> {
        let mut url = format!("{}/domains", self.base());
        if let Some(opts) = opts {
            url = opts.to_query().append_to(&url);
        }
        let response: DomainListResponse = self.core.fetch(&url).await?;
        Ok(response.domains)
    }

    /// Fetch a domain's details.
    pub async fn get_domain(&self, domain_id: &str) -> Result<Domain> {
        let url = format!("{}/domains/{domain_id}", self.base());
        self.core.fetch(&url).await
    }

    /// Create a domain. The name must carry a trailing period
    /// (`example.com.`).
    pub async fn create_domain(&self, opts: &CreateDomainRequest) -> Result<Domain> {
        let url = format!("{}/domains", self.base());
        self.core.send(Method::POST, &url, Some(opts)).await
    }

    /// Update a domain's TTL and email.
    pub async fn update_domain(&self, domain_id: &str, opts: &UpdateDomainRequest) -> Result<Domain> {
        let url = format!("{}/domains/{domain_id}", self.base());
        self.core.send(Method::PUT, &url, Some(opts)).await
    }

    /// Delete a domain.
    pub async fn delete_domain(&self, domain_id: &str) -> Result<()> {
        let url = format!("{}/domains/{domain_id}", self.base());
        self.core.send_discard::<()>(Method::DELETE, &url, None).await
    }

    // ------------------------------------------------------------
    // Records
    // ------------------------------------------------------------

    /// List records of a domain.
    pub async fn list_dns_records(
        &self,
        domain_id: &str,
        opts: Option<&ListDnsRecordsOptions>,
    ) -> Result<Vec<DnsRecord>> {
        let mut url = format!("{}/domains/{domain_id}/records", self.base());
        if let Some(opts) = opts {
            url = opts.to_query().append_to(&url);
        }
        let response: RecordListResponse = self.core.fetch(&url).await?;
        Ok(response.records)
    }

    /// Fetch a record's details.
    pub async fn get_dns_record(&self, domain_id: &str, record_id: &str) -> Result<DnsRecord> {
        let url = format!("{}/domains/{domain_id}/records/{record_id}", self.base());
        self.core.fetch(&url).await
    }

    /// Create a record. The name must carry a trailing period
    /// (`www.example.com.`).
    pub async fn create_dns_record(
        &self,
        domain_id: &str,
        opts: &CreateDnsRecordRequest,
    ) -> Result<DnsRecord> {
        let url = format!("{}/domains/{domain_id}/records", self.base());
        self.core.send(Method::POST, &url, Some(opts)).await
    }

    /// Update a record.
    pub async fn update_dns_record(
        &self,
        domain_id: &str,
        record_id: &str,
        opts: &UpdateDnsRecordRequest,
    ) -> Result<DnsRecord> {
        let url = format!("{}/domains/{domain_id}/records/{record_id}", self.base());
        self.core.send(Method::PUT, &url, Some(opts)).await
    }

    /// Delete a record.
    pub async fn delete_dns_record(&self, domain_id: &str, record_id: &str) -> Result<()> {
        let url = format!("{}/domains/{domain_id}/records/{record_id}", self.base());
        self.core.send_discard::<()>(Method::DELETE, &url, None).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(server: &MockServer) -> DnsClient {
        let core = Client::builder().dns_url(server.uri()).build();
        core.set_token("test-token");
        DnsClient::new(&core)
    }

    #[tokio::test]
    async fn list_domains_reads_sibling_count_field() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/domains"))
            .and(query_param("limit", "20"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "domains": [
                    {"uuid": "dom-1", "name": "example.com.", "ttl": 3600, "serial": 1}
                ],
                "total_count": 1
            })))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let opts = ListDomainsOptions { limit: Some(20), ..ListDomainsOptions::default() };
        let domains = client.list_domains(Some(&opts)).await.unwrap();
        assert_eq!(domains.len(), 1);
        assert_eq!(domains[0].name, "example.com.");
    }

    #[tokio::test]
    async fn domain_responses_are_not_enveloped() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/domains"))
            .and(body_json(json!({
                "name": "example.com.", "ttl": 3600, "email": "hostmaster@example.com"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "uuid": "dom-new", "name": "example.com.", "ttl": 3600,
                "email": "hostmaster@example.com", "serial": 1
            })))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let domain = client
            .create_domain(&CreateDomainRequest {
                name: "example.com.".into(),
                ttl: 3600,
                email: "hostmaster@example.com".into(),
            })
            .await
            .unwrap();
        assert_eq!(domain.uuid, "dom-new");
    }

    #[tokio::test]
    async fn records_nest_under_domain() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/domains/dom-1/records"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "uuid": "rec-1", "domain_uuid": "dom-1", "name": "www.example.com.",
                "type": "A", "data": "203.0.113.10", "ttl": 3600,
                "priority": null, "weight": null, "port": null
            })))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let record = client
            .create_dns_record(
                "dom-1",
                &CreateDnsRecordRequest {
                    name: "www.example.com.".into(),
                    kind: "A".into(),
                    data: "203.0.113.10".into(),
                    ..CreateDnsRecordRequest::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(record.kind, "A");
        assert_eq!(record.data, "203.0.113.10");
    }

    #[tokio::test]
    async fn delete_record_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/v1/domains/dom-1/records/missing"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_string(r#"{"itemNotFound":{"message":"record not found","code":404}}"#),
            )
            .mount(&server)
            .await;

        let client = test_client(&server);
        let err = client.delete_dns_record("dom-1", "missing").await.unwrap_err();
        assert!(err.is_not_found());
    }
}
