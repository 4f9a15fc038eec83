//! Asynchronous Network service client.

use crate::models::{
    AllocateIpRequest, CreatePortRequest, CreateSecurityGroupRuleRequest, Network, Port,
    QosPolicy, SecurityGroup, SecurityGroupRule, Subnet, UpdatePortRequest,
};
use crate::Result;
use ecloud_core::envelope::Named;
use ecloud_core::{Client, ServiceKind};
use reqwest::Method;
use std::collections::HashMap;

/// Client for the Network service family.
#[derive(Clone)]
pub struct NetworkClient {
    core: Client,
}

impl NetworkClient {
    /// Create a network client sharing the given core client.
    #[must_use]
    pub fn new(core: &Client) -> Self {
        Self { core: core.clone() }
    }

    fn base(&self) -> String {
        self.core.endpoint(ServiceKind::Network)
    }

    // ------------------------------------------------------------
    // Networks
    // ------------------------------------------------------------

    /// List networks.
    pub async fn list_networks(&self) -> Result<Vec<Network>> {
        let url = format!("{}/networks", self.base());
        self.core.fetch_resource(&url, "networks").await
    }

    /// Fetch a network's details.
    pub async fn get_network(&self, network_id: &str) -> Result<Network> {
        let url = format!("{}/networks/{network_id}", self.base());
        self.core.fetch_resource(&url, "network").await
    }

    /// Create a local network. The provider assigns all properties.
    pub async fn create_network(&self) -> Result<Network> {
        let url = format!("{}/networks", self.base());
        self.core
            .send_resource::<(), Network>(Method::POST, &url, None, "network")
            .await
    }

    /// Delete a local network.
    pub async fn delete_network(&self, network_id: &str) -> Result<()> {
        let url = format!("{}/networks/{network_id}", self.base());
        self.core.send_discard::<()>(Method::DELETE, &url, None).await
    }

    // ------------------------------------------------------------
    // Subnets
    // ------------------------------------------------------------

    /// List subnets.
    pub async fn list_subnets(&self) -> Result<Vec<Subnet>> {
        let url = format!("{}/subnets", self.base());
        self.core.fetch_resource(&url, "subnets").await
    }

    /// Fetch a subnet's details.
    pub async fn get_subnet(&self, subnet_id: &str) -> Result<Subnet> {
        let url = format!("{}/subnets/{subnet_id}", self.base());
        self.core.fetch_resource(&url, "subnet").await
    }

    /// Create a subnet on a local network.
    pub async fn create_subnet(&self, network_id: &str, cidr: &str) -> Result<Subnet> {
        let url = format!("{}/subnets", self.base());
        let mut fields = HashMap::new();
        fields.insert("network_id", network_id);
        fields.insert("cidr", cidr);
        self.core
            .send_resource(Method::POST, &url, Some(&Named::new("subnet", &fields)), "subnet")
            .await
    }

    /// Delete a subnet.
    pub async fn delete_subnet(&self, subnet_id: &str) -> Result<()> {
        let url = format!("{}/subnets/{subnet_id}", self.base());
        self.core.send_discard::<()>(Method::DELETE, &url, None).await
    }

    // ------------------------------------------------------------
    // Security groups
    // ------------------------------------------------------------

    /// List security groups.
    pub async fn list_security_groups(&self) -> Result<Vec<SecurityGroup>> {
        let url = format!("{}/security-groups", self.base());
        self.core.fetch_resource(&url, "security_groups").await
    }

    /// Fetch a security group's details.
    pub async fn get_security_group(&self, security_group_id: &str) -> Result<SecurityGroup> {
        let url = format!("{}/security-groups/{security_group_id}", self.base());
        self.core.fetch_resource(&url, "security_group").await
    }

    /// Create a security group.
    pub async fn create_security_group(&self, name: &str, description: &str) -> Result<SecurityGroup> {
        let url = format!("{}/security-groups", self.base());
        let mut fields = HashMap::new();
        fields.insert("name", name);
        fields.insert("description", description);
        self.core
            .send_resource(
                Method::POST,
                &url,
                Some(&Named::new("security_group", &fields)),
                "security_group",
            )
            .await
    }

    /// Update a security group's name and/or description; empty strings
    /// leave the field unchanged.
    pub async fn update_security_group(
        &self,
        security_group_id: &str,
        name: &str,
        description: &str,
    ) -> Result<SecurityGroup> {
        let url = format!("{}/security-groups/{security_group_id}", self.base());
        let mut fields = HashMap::new();
        if !name.is_empty() {
            fields.insert("name", name);
        }
        if !description.is_empty() {
            fields.insert("description", description);
        }
        self.core
            .send_resource(
                Method::PUT,
                &url,
                Some(&Named::new("security_group", &fields)),
                "security_group",
            )
            .await
    }

    /// Delete a security group.
    pub async fn delete_security_group(&self, security_group_id: &str) -> Result<()> {
        let url = format!("{}/security-groups/{security_group_id}", self.base());
        self.core.send_discard::<()>(Method::DELETE, &url, None).await
    }

    /// List security group rules.
    pub async fn list_security_group_rules(&self) -> Result<Vec<SecurityGroupRule>> {
        let url = format!("{}/security-group-rules", self.base());
        self.core.fetch_resource(&url, "security_group_rules").await
    }

    /// Fetch a security group rule's details.
    pub async fn get_security_group_rule(&self, rule_id: &str) -> Result<SecurityGroupRule> {
        let url = format!("{}/security-group-rules/{rule_id}", self.base());
        self.core.fetch_resource(&url, "security_group_rule").await
    }

    /// Create a security group rule.
    pub async fn create_security_group_rule(
        &self,
        opts: &CreateSecurityGroupRuleRequest,
    ) -> Result<SecurityGroupRule> {
        let url = format!("{}/security-group-rules", self.base());
        self.core
            .send_resource(
                Method::POST,
                &url,
                Some(&Named::new("security_group_rule", opts)),
                "security_group_rule",
            )
            .await
    }

    /// Delete a security group rule.
    pub async fn delete_security_group_rule(&self, rule_id: &str) -> Result<()> {
        let url = format!("{}/security-group-rules/{rule_id}", self.base());
        self.core.send_discard::<()>(Method::DELETE, &url, None).await
    }

    // ------------------------------------------------------------
    // Ports
    // ------------------------------------------------------------

    /// List ports.
    pub async fn list_ports(&self) -> Result<Vec<Port>> {
        let url = format!("{}/ports", self.base());
        self.core.fetch_resource(&url, "ports").await
    }

    /// Fetch a port's details.
    pub async fn get_port(&self, port_id: &str) -> Result<Port> {
        let url = format!("{}/ports/{port_id}", self.base());
        self.core.fetch_resource(&url, "port").await
    }

    /// Create a port on a local network.
    pub async fn create_port(&self, opts: &CreatePortRequest) -> Result<Port> {
        let url = format!("{}/ports", self.base());
        self.core
            .send_resource(Method::POST, &url, Some(&Named::new("port", opts)), "port")
            .await
    }

    /// Allocate additional public IP addresses; returns the new port.
    pub async fn allocate_additional_ip(
        &self,
        count: i32,
        security_groups: &[String],
    ) -> Result<Port> {
        let url = format!("{}/allocateips", self.base());
        let body = AllocateIpRequest { count, security_groups };
        self.core
            .send_resource(Method::POST, &url, Some(&Named::new("allocateip", &body)), "port")
            .await
    }

    /// Update a port.
    pub async fn update_port(&self, port_id: &str, opts: &UpdatePortRequest) -> Result<Port> {
        let url = format!("{}/ports/{port_id}", self.base());
        self.core
            .send_resource(Method::PUT, &url, Some(&Named::new("port", opts)), "port")
            .await
    }

    /// Delete a port.
    pub async fn delete_port(&self, port_id: &str) -> Result<()> {
        let url = format!("{}/ports/{port_id}", self.base());
        self.core.send_discard::<()>(Method::DELETE, &url, None).await
    }

    // ------------------------------------------------------------
    // QoS policies
    // ------------------------------------------------------------

    /// List QoS policies.
    pub async fn list_qos_policies(&self) -> Result<Vec<QosPolicy>> {
        let url = format!("{}/qos/policies", self.base());
        self.core.fetch_resource(&url, "policies").await
    }

    /// Fetch a QoS policy's details.
    pub async fn get_qos_policy(&self, policy_id: &str) -> Result<QosPolicy> {
        let url = format!("{}/qos/policies/{policy_id}", self.base());
        self.core.fetch_resource(&url, "policy").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(server: &MockServer) -> NetworkClient {
        let core = Client::builder().network_url(server.uri()).build();
        core.set_token("test-token");
        NetworkClient::new(&core)
    }

    #[tokio::test]
    async fn list_networks_unwraps_envelope() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2.0/networks"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "networks": [{"id": "net-1", "name": "public-net", "status": "ACTIVE"}]
            })))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let networks = client.list_networks().await.unwrap();
        assert_eq!(networks.len(), 1);
        assert_eq!(networks[0].id, "net-1");
    }

    #[tokio::test]
    async fn create_network_posts_without_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v2.0/networks"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "network": {"id": "net-new", "admin_state_up": true}
            })))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let network = client.create_network().await.unwrap();
        assert_eq!(network.id, "net-new");

        let requests = server.received_requests().await.unwrap();
        assert!(requests[0].body.is_empty());
    }

    #[tokio::test]
    async fn create_subnet_wraps_fields() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v2.0/subnets"))
            .and(body_json(json!({
                "subnet": {"network_id": "net-1", "cidr": "10.0.0.0/24"}
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "subnet": {"id": "sub-new", "network_id": "net-1", "cidr": "10.0.0.0/24"}
            })))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let subnet = client.create_subnet("net-1", "10.0.0.0/24").await.unwrap();
        assert_eq!(subnet.cidr, "10.0.0.0/24");
    }

    #[tokio::test]
    async fn allocate_ip_envelope_key_differs_from_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v2.0/allocateips"))
            .and(body_json(json!({"allocateip": {"count": 2}})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "port": {"id": "port-9", "network_id": "net-1"}
            })))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let port = client.allocate_additional_ip(2, &[]).await.unwrap();
        assert_eq!(port.id, "port-9");
    }

    #[tokio::test]
    async fn update_security_group_skips_empty_fields() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/v2.0/security-groups/sg-1"))
            .and(body_json(json!({"security_group": {"name": "renamed"}})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "security_group": {"id": "sg-1", "name": "renamed"}
            })))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let group = client.update_security_group("sg-1", "renamed", "").await.unwrap();
        assert_eq!(group.name, "renamed");
    }

    #[tokio::test]
    async fn delete_port_not_found_maps_to_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/v2.0/ports/missing"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_string(r#"{"itemNotFound":{"message":"Port not found","code":404}}"#),
            )
            .mount(&server)
            .await;

        let client = test_client(&server);
        let err = client.delete_port("missing").await.unwrap_err();
        assert!(err.is_not_found());
    }
}
