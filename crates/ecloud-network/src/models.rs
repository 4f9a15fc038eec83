//! Network data models: networks, subnets, ports, security groups, and
//! QoS policies.

use serde::{Deserialize, Serialize};

/// A network.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Network {
    /// Network ID.
    pub id: String,
    /// Network name.
    #[serde(default)]
    pub name: String,
    /// Owning tenant ID.
    #[serde(default)]
    pub tenant_id: String,
    /// Administrative state.
    #[serde(default)]
    pub admin_state_up: bool,
    /// MTU.
    #[serde(default)]
    pub mtu: i32,
    /// Operational status.
    #[serde(default)]
    pub status: String,
    /// Subnet IDs on this network.
    #[serde(default)]
    pub subnets: Vec<String>,
    /// Whether the network is shared.
    #[serde(default)]
    pub shared: bool,
    /// Owning project ID.
    #[serde(default)]
    pub project_id: String,
    /// Whether the network is external.
    #[serde(default, rename = "router:external")]
    pub external: bool,
}

/// A subnet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Subnet {
    /// Subnet ID.
    pub id: String,
    /// Subnet name.
    #[serde(default)]
    pub name: String,
    /// Owning tenant ID.
    #[serde(default)]
    pub tenant_id: String,
    /// Parent network ID.
    #[serde(default)]
    pub network_id: String,
    /// IP version (4 or 6).
    #[serde(default)]
    pub ip_version: i32,
    /// Whether DHCP is enabled.
    #[serde(default)]
    pub enable_dhcp: bool,
    /// IPv6 router-advertisement mode.
    #[serde(default)]
    pub ipv6_ra_mode: Option<String>,
    /// IPv6 address mode.
    #[serde(default)]
    pub ipv6_address_mode: Option<String>,
    /// Gateway address, when set.
    #[serde(default)]
    pub gateway_ip: Option<String>,
    /// CIDR block.
    #[serde(default)]
    pub cidr: String,
    /// Allocation pools.
    #[serde(default)]
    pub allocation_pools: Vec<AllocationPool>,
    /// Host routes.
    #[serde(default)]
    pub host_routes: Vec<serde_json::Value>,
    /// DNS nameservers.
    #[serde(default)]
    pub dns_nameservers: Vec<String>,
    /// Owning project ID.
    #[serde(default)]
    pub project_id: String,
}

/// An IP allocation pool range.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AllocationPool {
    /// First address of the range.
    pub start: String,
    /// Last address of the range.
    pub end: String,
}

/// A security group.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SecurityGroup {
    /// Group ID.
    pub id: String,
    /// Group name.
    #[serde(default)]
    pub name: String,
    /// Owning tenant ID.
    #[serde(default)]
    pub tenant_id: String,
    /// Description.
    #[serde(default)]
    pub description: String,
    /// Whether the group is shared.
    #[serde(default)]
    pub shared: bool,
    /// Owning project ID.
    #[serde(default)]
    pub project_id: String,
    /// Rules in the group.
    #[serde(default, rename = "security_group_rules")]
    pub rules: Vec<SecurityGroupRule>,
}

/// A security group rule.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SecurityGroupRule {
    /// Rule ID.
    pub id: String,
    /// Owning tenant ID.
    #[serde(default)]
    pub tenant_id: String,
    /// Parent group ID.
    #[serde(default)]
    pub security_group_id: String,
    /// Ethernet type (`IPv4`, `IPv6`).
    #[serde(default)]
    pub ethertype: String,
    /// Direction (`ingress`, `egress`).
    #[serde(default)]
    pub direction: String,
    /// Protocol, when restricted.
    #[serde(default)]
    pub protocol: Option<String>,
    /// Port range start.
    #[serde(default)]
    pub port_range_min: Option<i32>,
    /// Port range end.
    #[serde(default)]
    pub port_range_max: Option<i32>,
    /// Remote CIDR prefix.
    #[serde(default)]
    pub remote_ip_prefix: Option<String>,
    /// Remote group reference.
    #[serde(default)]
    pub remote_group_id: Option<String>,
    /// Owning project ID.
    #[serde(default)]
    pub project_id: String,
}

/// Request payload for creating a security group rule.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CreateSecurityGroupRuleRequest {
    /// Parent group ID.
    pub security_group_id: String,
    /// Direction (`ingress`, `egress`).
    pub direction: String,
    /// Ethernet type (`IPv4`, `IPv6`).
    pub ethertype: String,
    /// Protocol, when restricted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    /// Port range start.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port_range_min: Option<i32>,
    /// Port range end.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port_range_max: Option<i32>,
    /// Remote CIDR prefix.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_ip_prefix: Option<String>,
    /// Remote group reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_group_id: Option<String>,
}

/// A network port.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Port {
    /// Port ID.
    pub id: String,
    /// Port name.
    #[serde(default)]
    pub name: String,
    /// Parent network ID.
    #[serde(default)]
    pub network_id: String,
    /// Owning tenant ID.
    #[serde(default)]
    pub tenant_id: String,
    /// MAC address.
    #[serde(default)]
    pub mac_address: String,
    /// Administrative state.
    #[serde(default)]
    pub admin_state_up: bool,
    /// Operational status.
    #[serde(default)]
    pub status: String,
    /// Attached device ID.
    #[serde(default)]
    pub device_id: String,
    /// Attached device owner.
    #[serde(default)]
    pub device_owner: String,
    /// Fixed IPs on the port.
    #[serde(default)]
    pub fixed_ips: Vec<FixedIp>,
    /// Owning project ID.
    #[serde(default)]
    pub project_id: String,
    /// Security group IDs.
    #[serde(default)]
    pub security_groups: Vec<String>,
    /// Allowed address pairs.
    #[serde(default)]
    pub allowed_address_pairs: Vec<AddressPair>,
    /// Extra DHCP options.
    #[serde(default)]
    pub extra_dhcp_opts: Vec<serde_json::Value>,
    /// VNIC binding type.
    #[serde(default, rename = "binding:vnic_type")]
    pub binding_vnic_type: String,
}

/// A fixed IP address on a port.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FixedIp {
    /// Subnet the address belongs to.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub subnet_id: String,
    /// The address itself.
    pub ip_address: String,
}

/// An allowed address pair.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AddressPair {
    /// MAC address, when pinned.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub mac_address: String,
    /// Allowed address.
    pub ip_address: String,
}

/// Request payload for creating a port on a local network.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CreatePortRequest {
    /// Parent network ID.
    pub network_id: String,
    /// Fixed IPs to assign.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fixed_ips: Vec<FixedIp>,
    /// Security groups to attach.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub security_groups: Vec<String>,
    /// Allowed address pairs.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allowed_address_pairs: Vec<AddressPair>,
}

/// Request payload for updating a port.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct UpdatePortRequest {
    /// Replacement security groups.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub security_groups: Vec<String>,
    /// QoS policy to apply; explicit `None` is omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qos_policy_id: Option<String>,
    /// Replacement fixed IPs.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fixed_ips: Vec<FixedIp>,
    /// Replacement allowed address pairs.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allowed_address_pairs: Vec<AddressPair>,
}

/// Request payload for allocating additional public IPs.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct AllocateIpRequest<'a> {
    pub count: i32,
    #[serde(skip_serializing_if = "<[String]>::is_empty")]
    pub security_groups: &'a [String],
}

/// A QoS policy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QosPolicy {
    /// Policy ID.
    pub id: String,
    /// Owning project ID.
    #[serde(default)]
    pub project_id: String,
    /// Policy name.
    #[serde(default)]
    pub name: String,
    /// Whether the policy is shared.
    #[serde(default)]
    pub shared: bool,
    /// Bandwidth rules.
    #[serde(default)]
    pub rules: Vec<QosRule>,
    /// Whether this is the default policy.
    #[serde(default)]
    pub is_default: bool,
    /// Revision number.
    #[serde(default)]
    pub revision_number: i32,
    /// Description.
    #[serde(default)]
    pub description: String,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: String,
    /// Last update timestamp.
    #[serde(default)]
    pub updated_at: String,
    /// Owning tenant ID.
    #[serde(default)]
    pub tenant_id: String,
    /// Tags.
    #[serde(default)]
    pub tags: Vec<String>,
}

/// A QoS bandwidth rule.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QosRule {
    /// Bandwidth limit in kbps.
    #[serde(default)]
    pub max_kbps: i32,
    /// Burst limit in kbps.
    #[serde(default)]
    pub max_burst_kbps: i32,
    /// Direction the rule applies to.
    #[serde(default)]
    pub direction: String,
    /// Rule ID.
    pub id: String,
    /// Parent policy ID.
    #[serde(default)]
    pub qos_policy_id: String,
    /// Rule type.
    #[serde(default, rename = "type")]
    pub kind: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn network_parses_router_external() {
        let network: Network = serde_json::from_value(json!({
            "id": "net-1",
            "name": "ext-net",
            "status": "ACTIVE",
            "router:external": true,
            "subnets": ["sub-1"]
        }))
        .unwrap();

        assert!(network.external);
        assert_eq!(network.subnets, vec!["sub-1"]);
    }

    #[test]
    fn create_port_request_omits_empty_collections() {
        let request = CreatePortRequest {
            network_id: "net-1".into(),
            ..CreatePortRequest::default()
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value, json!({"network_id": "net-1"}));
    }

    #[test]
    fn security_group_rule_nullable_ports() {
        let rule: SecurityGroupRule = serde_json::from_value(json!({
            "id": "rule-1",
            "direction": "ingress",
            "ethertype": "IPv4",
            "protocol": null,
            "port_range_min": null,
            "port_range_max": null
        }))
        .unwrap();

        assert!(rule.protocol.is_none());
        assert!(rule.port_range_min.is_none());
    }
}
