//! Load balancer data models.

use serde::{Deserialize, Serialize};

/// A bare ID reference, used for cross-links between LB resources.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IdRef {
    /// Referenced resource ID.
    pub id: String,
}

/// A load balancer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoadBalancer {
    /// Load balancer ID.
    pub id: String,
    /// Name.
    #[serde(default)]
    pub name: String,
    /// Description.
    #[serde(default)]
    pub description: String,
    /// Provisioning status (ACTIVE, PENDING_CREATE, ...).
    #[serde(default)]
    pub provisioning_status: String,
    /// Operating status (ONLINE, OFFLINE, ...).
    #[serde(default)]
    pub operating_status: String,
    /// Administrative state.
    #[serde(default)]
    pub admin_state_up: bool,
    /// Owning project ID.
    #[serde(default)]
    pub project_id: String,
    /// Virtual IP address.
    #[serde(default)]
    pub vip_address: String,
    /// Port backing the VIP.
    #[serde(default)]
    pub vip_port_id: String,
    /// Subnet of the VIP.
    #[serde(default)]
    pub vip_subnet_id: String,
    /// Network of the VIP.
    #[serde(default)]
    pub vip_network_id: String,
    /// Listeners on this load balancer.
    #[serde(default)]
    pub listeners: Vec<IdRef>,
    /// Pools on this load balancer.
    #[serde(default)]
    pub pools: Vec<IdRef>,
    /// Owning tenant ID.
    #[serde(default)]
    pub tenant_id: String,
}

/// A listener.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Listener {
    /// Listener ID.
    pub id: String,
    /// Name.
    #[serde(default)]
    pub name: String,
    /// Description.
    #[serde(default)]
    pub description: String,
    /// Provisioning status.
    #[serde(default)]
    pub provisioning_status: String,
    /// Operating status.
    #[serde(default)]
    pub operating_status: String,
    /// Administrative state.
    #[serde(default)]
    pub admin_state_up: bool,
    /// Protocol (TCP, UDP).
    #[serde(default)]
    pub protocol: String,
    /// Listening port.
    #[serde(default)]
    pub protocol_port: i32,
    /// Connection limit.
    #[serde(default)]
    pub connection_limit: i32,
    /// Owning project ID.
    #[serde(default)]
    pub project_id: String,
    /// Default pool, when set.
    #[serde(default)]
    pub default_pool_id: Option<String>,
    /// Parent load balancers.
    #[serde(default, rename = "loadbalancers")]
    pub load_balancers: Vec<IdRef>,
    /// Owning tenant ID.
    #[serde(default)]
    pub tenant_id: String,
}

/// A pool.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Pool {
    /// Pool ID.
    pub id: String,
    /// Name.
    #[serde(default)]
    pub name: String,
    /// Description.
    #[serde(default)]
    pub description: String,
    /// Provisioning status.
    #[serde(default)]
    pub provisioning_status: String,
    /// Operating status.
    #[serde(default)]
    pub operating_status: String,
    /// Administrative state.
    #[serde(default)]
    pub admin_state_up: bool,
    /// Protocol (TCP, UDP).
    #[serde(default)]
    pub protocol: String,
    /// Balancing algorithm.
    #[serde(default)]
    pub lb_algorithm: String,
    /// Owning project ID.
    #[serde(default)]
    pub project_id: String,
    /// Parent load balancers.
    #[serde(default, rename = "loadbalancers")]
    pub load_balancers: Vec<IdRef>,
    /// Attached listeners.
    #[serde(default)]
    pub listeners: Vec<IdRef>,
    /// Pool members.
    #[serde(default)]
    pub members: Vec<IdRef>,
    /// Owning tenant ID.
    #[serde(default)]
    pub tenant_id: String,
}

/// A pool member.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Member {
    /// Member ID.
    pub id: String,
    /// Name.
    #[serde(default)]
    pub name: String,
    /// Operating status.
    #[serde(default)]
    pub operating_status: String,
    /// Provisioning status.
    #[serde(default)]
    pub provisioning_status: String,
    /// Administrative state.
    #[serde(default)]
    pub admin_state_up: bool,
    /// Backend address.
    #[serde(default)]
    pub address: String,
    /// Backend port.
    #[serde(default)]
    pub protocol_port: i32,
    /// Balancing weight.
    #[serde(default)]
    pub weight: i32,
    /// Owning project ID.
    #[serde(default)]
    pub project_id: String,
    /// Owning tenant ID.
    #[serde(default)]
    pub tenant_id: String,
}

/// A health monitor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthMonitor {
    /// Monitor ID.
    pub id: String,
    /// Name.
    #[serde(default)]
    pub name: String,
    /// Check type (TCP, HTTP).
    #[serde(default, rename = "type")]
    pub kind: String,
    /// Interval between checks, in seconds.
    #[serde(default)]
    pub delay: i32,
    /// Per-check timeout, in seconds.
    #[serde(default)]
    pub timeout: i32,
    /// Checks before a member is marked down.
    #[serde(default)]
    pub max_retries: i32,
    /// Probe path for HTTP checks.
    #[serde(default)]
    pub url_path: Option<String>,
    /// Expected status codes for HTTP checks.
    #[serde(default)]
    pub expected_codes: Option<String>,
    /// Administrative state.
    #[serde(default)]
    pub admin_state_up: bool,
    /// Owning project ID.
    #[serde(default)]
    pub project_id: String,
    /// Monitored pools.
    #[serde(default)]
    pub pools: Vec<IdRef>,
    /// Provisioning status.
    #[serde(default)]
    pub provisioning_status: String,
    /// Operating status.
    #[serde(default)]
    pub operating_status: String,
    /// Owning tenant ID.
    #[serde(default)]
    pub tenant_id: String,
}

/// Request payload for creating a health monitor.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CreateHealthMonitorRequest {
    /// Monitor name.
    pub name: String,
    /// Pool to monitor.
    pub pool_id: String,
    /// Interval between checks, in seconds.
    pub delay: i32,
    /// Checks before a member is marked down.
    pub max_retries: i32,
    /// Per-check timeout, in seconds.
    pub timeout: i32,
    /// Check type (TCP, HTTP).
    #[serde(rename = "type")]
    pub kind: String,
    /// Probe path for HTTP checks.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub url_path: String,
    /// Expected status codes for HTTP checks.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub expected_codes: String,
}

// Small typed bodies for the create/update calls that take a couple of
// scalar fields.

#[derive(Debug, Serialize)]
pub(crate) struct NameOpts<'a> {
    pub name: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateListenerOpts<'a> {
    pub name: &'a str,
    pub protocol: &'a str,
    pub protocol_port: i32,
    pub loadbalancer_id: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct CreatePoolOpts<'a> {
    pub name: &'a str,
    pub protocol: &'a str,
    pub lb_algorithm: &'a str,
    pub listener_id: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct UpdatePoolOpts<'a> {
    #[serde(skip_serializing_if = "str::is_empty")]
    pub name: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    pub lb_algorithm: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct AddMemberOpts<'a> {
    pub name: &'a str,
    pub address: &'a str,
    pub protocol_port: i32,
}

#[derive(Debug, Serialize)]
pub(crate) struct AdminStateOpts {
    pub admin_state_up: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn load_balancer_parses_refs() {
        let lb: LoadBalancer = serde_json::from_value(json!({
            "id": "lb-1",
            "name": "front",
            "provisioning_status": "ACTIVE",
            "operating_status": "ONLINE",
            "vip_address": "203.0.113.5",
            "listeners": [{"id": "lst-1"}],
            "pools": [{"id": "pool-1"}]
        }))
        .unwrap();

        assert_eq!(lb.listeners[0].id, "lst-1");
        assert_eq!(lb.pools[0].id, "pool-1");
    }

    #[test]
    fn health_monitor_request_skips_http_fields_for_tcp() {
        let request = CreateHealthMonitorRequest {
            name: "hm".into(),
            pool_id: "pool-1".into(),
            delay: 5,
            max_retries: 3,
            timeout: 4,
            kind: "TCP".into(),
            ..CreateHealthMonitorRequest::default()
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["type"], "TCP");
        assert!(value.get("url_path").is_none());
        assert!(value.get("expected_codes").is_none());
    }
}
