//! Compute data models: servers, flavors, keypairs, attachments, and
//! monitoring payloads.

use chrono::{DateTime, Utc};
use ecloud_core::query::QueryParams;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A resource link.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Link {
    /// Link relation (`self`, `bookmark`).
    pub rel: String,
    /// Target URL.
    pub href: String,
}

/// A server, as returned by the basic list endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Server {
    /// Server ID.
    pub id: String,
    /// Server name.
    #[serde(default)]
    pub name: String,
    /// Resource links.
    #[serde(default)]
    pub links: Vec<Link>,
}

/// A server with full details.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerDetail {
    /// Server ID.
    pub id: String,
    /// Server name.
    #[serde(default)]
    pub name: String,
    /// Current status (ACTIVE, SHUTOFF, ...).
    #[serde(default)]
    pub status: String,
    /// Owning tenant ID.
    #[serde(default)]
    pub tenant_id: String,
    /// Owning user ID.
    #[serde(default)]
    pub user_id: String,
    /// Server metadata.
    #[serde(default)]
    pub metadata: HashMap<String, String>,
    /// Host ID hash.
    #[serde(default, rename = "hostId")]
    pub host_id: String,
    /// Source image reference; an object, or an empty string for
    /// volume-booted servers.
    #[serde(default)]
    pub image: serde_json::Value,
    /// Flavor reference.
    #[serde(default)]
    pub flavor: FlavorRef,
    /// Creation timestamp.
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
    /// Last update timestamp.
    #[serde(default)]
    pub updated: Option<DateTime<Utc>>,
    /// Addresses per network name.
    #[serde(default)]
    pub addresses: HashMap<String, Vec<Address>>,
    /// IPv4 access address.
    #[serde(default, rename = "accessIPv4")]
    pub access_ipv4: String,
    /// IPv6 access address.
    #[serde(default, rename = "accessIPv6")]
    pub access_ipv6: String,
    /// Resource links.
    #[serde(default)]
    pub links: Vec<Link>,
    /// Disk configuration mode.
    #[serde(default, rename = "OS-DCF:diskConfig")]
    pub disk_config: String,
    /// Availability zone.
    #[serde(default, rename = "OS-EXT-AZ:availability_zone")]
    pub availability_zone: String,
    /// Config drive flag string.
    #[serde(default)]
    pub config_drive: String,
    /// Keypair name, when one was injected.
    #[serde(default)]
    pub key_name: Option<String>,
    /// Launch timestamp.
    #[serde(default, rename = "OS-SRV-USG:launched_at")]
    pub launched_at: String,
    /// Termination timestamp.
    #[serde(default, rename = "OS-SRV-USG:terminated_at")]
    pub terminated_at: Option<String>,
    /// Hypervisor host.
    #[serde(default, rename = "OS-EXT-SRV-ATTR:host")]
    pub host: String,
    /// Internal instance name.
    #[serde(default, rename = "OS-EXT-SRV-ATTR:instance_name")]
    pub instance_name: String,
    /// Hypervisor hostname.
    #[serde(default, rename = "OS-EXT-SRV-ATTR:hypervisor_hostname")]
    pub hypervisor_hostname: String,
    /// Transient task state.
    #[serde(default, rename = "OS-EXT-STS:task_state")]
    pub task_state: Option<String>,
    /// VM state.
    #[serde(default, rename = "OS-EXT-STS:vm_state")]
    pub vm_state: String,
    /// Power state code.
    #[serde(default, rename = "OS-EXT-STS:power_state")]
    pub power_state: i32,
    /// Attached volume references.
    #[serde(default, rename = "os-extended-volumes:volumes_attached")]
    pub volumes_attached: Vec<VolumeAttachmentRef>,
    /// Security groups by name.
    #[serde(default)]
    pub security_groups: Vec<SecurityGroupRef>,
    /// Build progress percentage.
    #[serde(default)]
    pub progress: i32,
}

/// A flavor reference embedded in a server.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FlavorRef {
    /// Flavor ID.
    #[serde(default)]
    pub id: String,
    /// Resource links.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
    /// vCPU count.
    #[serde(default)]
    pub vcpus: i32,
    /// RAM in MiB.
    #[serde(default)]
    pub ram: i32,
    /// Disk in GiB.
    #[serde(default)]
    pub disk: i32,
}

/// A network address attached to a server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Address {
    /// IP version (4 or 6).
    pub version: i32,
    /// The address itself.
    pub addr: String,
    /// Address type (fixed/floating).
    #[serde(default, rename = "OS-EXT-IPS:type")]
    pub kind: String,
    /// MAC address of the backing port.
    #[serde(default, rename = "OS-EXT-IPS-MAC:mac_addr")]
    pub mac_addr: String,
}

/// Reference to a volume attached to a server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VolumeAttachmentRef {
    /// Volume ID.
    pub id: String,
}

/// Security group reference by name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SecurityGroupRef {
    /// Group name.
    pub name: String,
}

/// Request payload for server creation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateServerRequest {
    /// Flavor to provision.
    #[serde(rename = "flavorRef")]
    pub flavor_ref: String,
    /// Root password.
    #[serde(rename = "adminPass")]
    pub admin_pass: String,
    /// Boot volume mapping.
    #[serde(rename = "block_device_mapping_v2")]
    pub block_device_mapping: Vec<BlockDeviceMap>,
    /// Instance metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<HashMap<String, String>>,
    /// Security groups to attach.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security_groups: Option<Vec<SecurityGroupRef>>,
    /// Keypair to inject.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_name: Option<String>,
    /// Base64-encoded startup script.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_data: Option<String>,
}

/// One block device mapping entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BlockDeviceMap {
    /// Source volume or image UUID.
    pub uuid: String,
}

/// Response payload from server creation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateServerResponse {
    /// New server ID.
    pub id: String,
    /// Resource links.
    #[serde(default)]
    pub links: Vec<Link>,
    /// Disk configuration mode.
    #[serde(default, rename = "OS-DCF:diskConfig")]
    pub disk_config: String,
    /// Attached security groups.
    #[serde(default)]
    pub security_groups: Vec<SecurityGroupRef>,
    /// Root password echoed back.
    #[serde(default, rename = "adminPass")]
    pub admin_pass: String,
}

/// Request payload for rebuilding (reinstalling) a server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RebuildServerRequest {
    /// Image to install.
    #[serde(rename = "imageRef")]
    pub image_ref: String,
    /// New root password.
    #[serde(rename = "adminPass")]
    pub admin_pass: String,
    /// Keypair to inject.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_name: Option<String>,
}

/// Request payload for a remote console.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RemoteConsoleRequest {
    /// Console protocol (`vnc`, `serial`).
    pub protocol: String,
    /// Console type (`novnc`, `serial`).
    #[serde(rename = "type")]
    pub kind: String,
}

/// A remote console descriptor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RemoteConsole {
    /// Console protocol.
    pub protocol: String,
    /// Console type.
    #[serde(rename = "type")]
    pub kind: String,
    /// Access URL.
    pub url: String,
}

/// Filters for listing servers.
#[derive(Debug, Default, Clone)]
pub struct ListServersOptions {
    /// Maximum number of results.
    pub limit: Option<u32>,
    /// Pagination marker (last seen server ID).
    pub marker: Option<String>,
    /// Filter by status.
    pub status: Option<String>,
    /// Filter by name.
    pub name: Option<String>,
}

impl ListServersOptions {
    /// Convert the filters into query parameters.
    #[must_use]
    pub fn to_query(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params.push_opt("limit", self.limit);
        params.push_opt("marker", self.marker.as_deref());
        params.push_opt("status", self.status.as_deref());
        params.push_opt("name", self.name.as_deref());
        params
    }
}

// ------------------------------------------------------------
// Server actions
// ------------------------------------------------------------

/// `reboot` action options.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct RebootOpts {
    #[serde(rename = "type")]
    pub kind: &'static str,
}

/// `os-stop` action options for a forced shutdown.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct ForceStopOpts {
    pub force_shutdown: bool,
}

/// `resize` action options.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct ResizeOpts<'a> {
    #[serde(rename = "flavorRef")]
    pub flavor_ref: &'a str,
}

/// `rescue` action options (ISO mount).
#[derive(Debug, Clone, Serialize)]
pub(crate) struct RescueOpts<'a> {
    pub rescue_image_ref: &'a str,
}

// ------------------------------------------------------------
// Server security groups
// ------------------------------------------------------------

/// A security group as attached to a server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerSecurityGroup {
    /// Group ID.
    pub id: String,
    /// Description.
    #[serde(default)]
    pub description: String,
    /// Group name.
    #[serde(default)]
    pub name: String,
    /// Owning tenant.
    #[serde(default)]
    pub tenant_id: String,
    /// Rules in the group.
    #[serde(default)]
    pub rules: Vec<ServerSecurityGroupRule>,
}

/// A rule inside a server security group.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerSecurityGroupRule {
    /// Rule ID.
    pub id: String,
    /// Parent group ID.
    #[serde(default)]
    pub parent_group_id: String,
    /// IP protocol, when restricted.
    #[serde(default)]
    pub ip_protocol: Option<String>,
    /// Port range start.
    #[serde(default)]
    pub from_port: Option<i32>,
    /// Port range end.
    #[serde(default)]
    pub to_port: Option<i32>,
    /// Remote group reference.
    #[serde(default)]
    pub group: serde_json::Value,
    /// Remote IP range.
    #[serde(default)]
    pub ip_range: serde_json::Value,
}

// ------------------------------------------------------------
// Flavors
// ------------------------------------------------------------

/// A flavor, as returned by the basic list endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Flavor {
    /// Flavor ID.
    pub id: String,
    /// Flavor name.
    #[serde(default)]
    pub name: String,
    /// Resource links.
    #[serde(default)]
    pub links: Vec<Link>,
}

/// A flavor with full details.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FlavorDetail {
    /// Flavor ID.
    pub id: String,
    /// Flavor name.
    #[serde(default)]
    pub name: String,
    /// RAM in MiB.
    #[serde(default)]
    pub ram: i32,
    /// Disk in GiB.
    #[serde(default)]
    pub disk: i32,
    /// Swap size; empty string when none.
    #[serde(default)]
    pub swap: String,
    /// vCPU count.
    #[serde(default)]
    pub vcpus: i32,
    /// RX/TX factor.
    #[serde(default)]
    pub rxtx_factor: f64,
    /// Resource links.
    #[serde(default)]
    pub links: Vec<Link>,
    /// Ephemeral disk in GiB.
    #[serde(default, rename = "OS-FLV-EXT-DATA:ephemeral")]
    pub ephemeral: i32,
    /// Whether the flavor is disabled.
    #[serde(default, rename = "OS-FLV-DISABLED:disabled")]
    pub disabled: bool,
    /// Whether the flavor is public.
    #[serde(default, rename = "os-flavor-access:is_public")]
    pub is_public: bool,
}

// ------------------------------------------------------------
// SSH keypairs
// ------------------------------------------------------------

/// An SSH keypair.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Keypair {
    /// Keypair name.
    pub name: String,
    /// Public key material.
    #[serde(default)]
    pub public_key: String,
    /// Private key material; only present right after generation.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub private_key: String,
    /// Key fingerprint.
    #[serde(default)]
    pub fingerprint: String,
    /// Owning user ID.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub user_id: String,
    /// Creation timestamp.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub created_at: String,
    /// Whether the keypair is deleted.
    #[serde(default)]
    pub deleted: bool,
    /// Deletion timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<String>,
    /// Numeric keypair ID.
    #[serde(default)]
    pub id: i64,
    /// Update timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// One element of the keypair list response, which nests each keypair one
/// level deeper than the other list endpoints.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct KeypairItem {
    pub keypair: Keypair,
}

/// Filters for listing keypairs.
#[derive(Debug, Default, Clone)]
pub struct ListKeypairsOptions {
    /// Maximum number of results.
    pub limit: Option<u32>,
    /// Pagination marker (last seen keypair name).
    pub marker: Option<String>,
}

impl ListKeypairsOptions {
    /// Convert the filters into query parameters.
    #[must_use]
    pub fn to_query(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params.push_opt("limit", self.limit);
        params.push_opt("marker", self.marker.as_deref());
        params
    }
}

// ------------------------------------------------------------
// Port and volume attachments
// ------------------------------------------------------------

/// A port attached to a server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InterfaceAttachment {
    /// Network ID.
    #[serde(default)]
    pub net_id: String,
    /// Port ID.
    pub port_id: String,
    /// MAC address.
    #[serde(default)]
    pub mac_addr: String,
    /// Port state.
    #[serde(default)]
    pub port_state: String,
    /// Fixed IPs on the port.
    #[serde(default)]
    pub fixed_ips: Vec<FixedIp>,
}

/// A fixed IP address on a port.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FixedIp {
    /// Subnet the address belongs to.
    #[serde(default)]
    pub subnet_id: String,
    /// The address itself.
    pub ip_address: String,
}

/// A volume attached to a server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerVolumeAttachment {
    /// Attachment ID.
    pub id: String,
    /// Volume ID.
    #[serde(rename = "volumeId")]
    pub volume_id: String,
    /// Server ID.
    #[serde(default, rename = "serverId")]
    pub server_id: String,
    /// Device path, e.g. `/dev/vdb`.
    #[serde(default)]
    pub device: String,
}

// ------------------------------------------------------------
// Monitoring (RRD graphs)
// ------------------------------------------------------------

/// RRD monitoring data points.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RrdData {
    /// Column names for each data row.
    #[serde(default)]
    pub schema: Vec<String>,
    /// Data rows.
    #[serde(default)]
    pub data: Vec<Vec<serde_json::Value>>,
}

/// Options shared by the monitoring queries.
#[derive(Debug, Default, Clone)]
pub struct MonitoringOptions {
    /// Start of the sampled window (UTC datetime string).
    pub start_date_raw: Option<String>,
    /// End of the sampled window (UTC datetime string).
    pub end_date_raw: Option<String>,
    /// Aggregation mode: `average`, `max`, or `min`.
    pub mode: Option<String>,
}

impl MonitoringOptions {
    pub(crate) fn fill(&self, params: &mut QueryParams) {
        params.push_opt("start_date_raw", self.start_date_raw.as_deref());
        params.push_opt("end_date_raw", self.end_date_raw.as_deref());
        params.push_opt("mode", self.mode.as_deref());
    }
}
