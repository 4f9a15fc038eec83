//! Asynchronous Compute service client.

use crate::models::{
    Address, CreateServerRequest, CreateServerResponse, Flavor, FlavorDetail, ForceStopOpts,
    InterfaceAttachment, Keypair, KeypairItem, ListKeypairsOptions, ListServersOptions,
    MonitoringOptions, RebootOpts, RebuildServerRequest, RemoteConsole, RemoteConsoleRequest,
    RescueOpts, ResizeOpts, RrdData, Server, ServerDetail, ServerSecurityGroup,
    ServerVolumeAttachment,
};
use crate::Result;
use ecloud_core::envelope::Named;
use ecloud_core::query::QueryParams;
use ecloud_core::{Client, Error, ServiceKind};
use reqwest::Method;
use serde::Serialize;
use std::collections::HashMap;

/// Client for the Compute service family.
///
/// Thin wrapper over the shared [`Client`]: every method resolves the
/// compute base URL, builds a resource path, and delegates to the shared
/// pipeline.
#[derive(Clone)]
pub struct ComputeClient {
    core: Client,
}

impl ComputeClient {
    /// Create a compute client sharing the given core client.
    #[must_use]
    pub fn new(core: &Client) -> Self {
        Self { core: core.clone() }
    }

    fn base(&self) -> String {
        self.core.endpoint(ServiceKind::Compute)
    }

    // ------------------------------------------------------------
    // Servers
    // ------------------------------------------------------------

    /// List servers (basic view).
    pub async fn list_servers(&self, opts: Option<&ListServersOptions>) -> Result<Vec<Server>> {
        let mut url = format!("{}/servers", self.base());
        if let Some(opts) = opts {
            url = opts.to_query().append_to(&url);
        }
        self.core.fetch_resource(&url, "servers").await
    }

    /// List servers with full details.
    pub async fn list_servers_detail(
        &self,
        opts: Option<&ListServersOptions>,
    ) -> Result<Vec<ServerDetail>> {
        let mut url = format!("{}/servers/detail", self.base());
        if let Some(opts) = opts {
            url = opts.to_query().append_to(&url);
        }
        self.core.fetch_resource(&url, "servers").await
    }

    /// Fetch a server's details.
    pub async fn get_server(&self, server_id: &str) -> Result<ServerDetail> {
        let url = format!("{}/servers/{server_id}", self.base());
        self.core.fetch_resource(&url, "server").await
    }

    /// Create a server.
    pub async fn create_server(&self, opts: &CreateServerRequest) -> Result<CreateServerResponse> {
        let url = format!("{}/servers", self.base());
        self.core
            .send_resource(Method::POST, &url, Some(&Named::new("server", opts)), "server")
            .await
    }

    /// Delete a server.
    pub async fn delete_server(&self, server_id: &str) -> Result<()> {
        let url = format!("{}/servers/{server_id}", self.base());
        self.core.send_discard::<()>(Method::DELETE, &url, None).await
    }

    // ------------------------------------------------------------
    // Server actions
    // ------------------------------------------------------------

    async fn server_action<B>(&self, server_id: &str, body: &B) -> Result<()>
    where
        B: Serialize + ?Sized,
    {
        let url = format!("{}/servers/{server_id}/action", self.base());
        self.core.send_discard(Method::POST, &url, Some(body)).await
    }

    /// Start a server.
    pub async fn start_server(&self, server_id: &str) -> Result<()> {
        self.server_action(server_id, &Named::new("os-start", &serde_json::Value::Null))
            .await
    }

    /// Stop a server (graceful shutdown).
    pub async fn stop_server(&self, server_id: &str) -> Result<()> {
        self.server_action(server_id, &Named::new("os-stop", &serde_json::Value::Null))
            .await
    }

    /// Force a server to stop.
    pub async fn force_stop_server(&self, server_id: &str) -> Result<()> {
        self.server_action(
            server_id,
            &Named::new("os-stop", &ForceStopOpts { force_shutdown: true }),
        )
        .await
    }

    /// Soft-reboot a server.
    pub async fn reboot_server(&self, server_id: &str) -> Result<()> {
        self.server_action(server_id, &Named::new("reboot", &RebootOpts { kind: "SOFT" }))
            .await
    }

    /// Reinstall the server OS from an image.
    pub async fn rebuild_server(&self, server_id: &str, opts: &RebuildServerRequest) -> Result<()> {
        self.server_action(server_id, &Named::new("rebuild", opts)).await
    }

    /// Start a plan change to another flavor.
    pub async fn resize_server(&self, server_id: &str, flavor_ref: &str) -> Result<()> {
        self.server_action(server_id, &Named::new("resize", &ResizeOpts { flavor_ref }))
            .await
    }

    /// Confirm a pending resize.
    pub async fn confirm_resize(&self, server_id: &str) -> Result<()> {
        self.server_action(server_id, &Named::new("confirmResize", &serde_json::Value::Null))
            .await
    }

    /// Revert a pending resize.
    pub async fn revert_resize(&self, server_id: &str) -> Result<()> {
        self.server_action(server_id, &Named::new("revertResize", &serde_json::Value::Null))
            .await
    }

    /// Set the video device model (`vga`, `qxl`, `cirrus`).
    pub async fn set_video_device(&self, server_id: &str, model: &str) -> Result<()> {
        self.server_action(server_id, &Named::new("hwVideoModel", model)).await
    }

    /// Set the network adapter model (`virtio`, `e1000`).
    pub async fn set_network_adapter(&self, server_id: &str, model: &str) -> Result<()> {
        self.server_action(server_id, &Named::new("hwVifModel", model)).await
    }

    /// Set the storage controller bus (`virtio`, `ide`).
    pub async fn set_storage_controller(&self, server_id: &str, bus: &str) -> Result<()> {
        self.server_action(server_id, &Named::new("hwDiskBus", bus)).await
    }

    /// Mount an ISO image (rescue mode). Returns the rescue admin password.
    pub async fn mount_iso(&self, server_id: &str, image_ref: &str) -> Result<String> {
        let url = format!("{}/servers/{server_id}/action", self.base());
        let opts = RescueOpts { rescue_image_ref: image_ref };
        let body = Named::new("rescue", &opts);
        let result: HashMap<String, String> =
            self.core.send(Method::POST, &url, Some(&body)).await?;
        Ok(result.get("adminPass").cloned().unwrap_or_default())
    }

    /// Unmount the ISO image (leave rescue mode).
    pub async fn unmount_iso(&self, server_id: &str) -> Result<()> {
        self.server_action(server_id, &Named::new("unrescue", &serde_json::Value::Null))
            .await
    }

    // ------------------------------------------------------------
    // Server network info
    // ------------------------------------------------------------

    /// All IP addresses of a server, keyed by network name.
    pub async fn get_server_addresses(&self, server_id: &str) -> Result<HashMap<String, Vec<Address>>> {
        let url = format!("{}/servers/{server_id}/ips", self.base());
        self.core.fetch_resource(&url, "addresses").await
    }

    /// IP addresses of a server on one network.
    pub async fn get_server_addresses_by_network(
        &self,
        server_id: &str,
        network_name: &str,
    ) -> Result<Vec<Address>> {
        let url = format!("{}/servers/{server_id}/ips/{network_name}", self.base());
        let mut by_network: HashMap<String, Vec<Address>> = self.core.fetch(&url).await?;
        Ok(by_network.remove(network_name).unwrap_or_default())
    }

    /// Security groups attached to a server.
    pub async fn get_server_security_groups(&self, server_id: &str) -> Result<Vec<ServerSecurityGroup>> {
        let url = format!("{}/servers/{server_id}/os-security-groups", self.base());
        self.core.fetch_resource(&url, "security_groups").await
    }

    // ------------------------------------------------------------
    // Console
    // ------------------------------------------------------------

    /// Request a remote console for a server.
    pub async fn get_console_url(
        &self,
        server_id: &str,
        opts: &RemoteConsoleRequest,
    ) -> Result<RemoteConsole> {
        let url = format!("{}/servers/{server_id}/remote-consoles", self.base());
        self.core
            .send_resource(Method::POST, &url, Some(&Named::new("remote_console", opts)), "remote_console")
            .await
    }

    /// Convenience wrapper returning a noVNC console URL.
    pub async fn get_vnc_console_url(&self, server_id: &str) -> Result<String> {
        let console = self
            .get_console_url(
                server_id,
                &RemoteConsoleRequest { protocol: "vnc".into(), kind: "novnc".into() },
            )
            .await?;
        Ok(console.url)
    }

    // ------------------------------------------------------------
    // Server metadata
    // ------------------------------------------------------------

    /// Fetch a server's metadata.
    pub async fn get_server_metadata(&self, server_id: &str) -> Result<HashMap<String, String>> {
        let url = format!("{}/servers/{server_id}/metadata", self.base());
        self.core.fetch_resource(&url, "metadata").await
    }

    /// Merge new entries into a server's metadata.
    pub async fn update_server_metadata(
        &self,
        server_id: &str,
        metadata: &HashMap<String, String>,
    ) -> Result<HashMap<String, String>> {
        let url = format!("{}/servers/{server_id}/metadata", self.base());
        self.core
            .send_resource(Method::POST, &url, Some(&Named::new("metadata", metadata)), "metadata")
            .await
    }

    // ------------------------------------------------------------
    // Flavors
    // ------------------------------------------------------------

    /// List flavors (basic view).
    pub async fn list_flavors(&self) -> Result<Vec<Flavor>> {
        let url = format!("{}/flavors", self.base());
        self.core.fetch_resource(&url, "flavors").await
    }

    /// List flavors with full details.
    pub async fn list_flavors_detail(&self) -> Result<Vec<FlavorDetail>> {
        let url = format!("{}/flavors/detail", self.base());
        self.core.fetch_resource(&url, "flavors").await
    }

    /// Fetch a flavor's details.
    pub async fn get_flavor(&self, flavor_id: &str) -> Result<FlavorDetail> {
        let url = format!("{}/flavors/{flavor_id}", self.base());
        self.core.fetch_resource(&url, "flavor").await
    }

    // ------------------------------------------------------------
    // SSH keypairs
    // ------------------------------------------------------------

    /// List keypairs.
    pub async fn list_keypairs(&self, opts: Option<&ListKeypairsOptions>) -> Result<Vec<Keypair>> {
        let mut url = format!("{}/os-keypairs", self.base());
        if let Some(opts) = opts {
            url = opts.to_query().append_to(&url);
        }
        let items: Vec<KeypairItem> = self.core.fetch_resource(&url, "keypairs").await?;
        Ok(items.into_iter().map(|item| item.keypair).collect())
    }

    /// Generate a new keypair. The response includes the private key; it
    /// cannot be retrieved again later.
    pub async fn create_keypair(&self, name: &str) -> Result<Keypair> {
        let url = format!("{}/os-keypairs", self.base());
        let mut body = HashMap::new();
        body.insert("name", name);
        self.core
            .send_resource(Method::POST, &url, Some(&Named::new("keypair", &body)), "keypair")
            .await
    }

    /// Import an existing public key.
    pub async fn import_keypair(&self, name: &str, public_key: &str) -> Result<Keypair> {
        let url = format!("{}/os-keypairs", self.base());
        let mut body = HashMap::new();
        body.insert("name", name);
        body.insert("public_key", public_key);
        self.core
            .send_resource(Method::POST, &url, Some(&Named::new("keypair", &body)), "keypair")
            .await
    }

    /// Fetch a keypair.
    pub async fn get_keypair(&self, name: &str) -> Result<Keypair> {
        let url = format!("{}/os-keypairs/{name}", self.base());
        self.core.fetch_resource(&url, "keypair").await
    }

    /// Delete a keypair.
    pub async fn delete_keypair(&self, name: &str) -> Result<()> {
        let url = format!("{}/os-keypairs/{name}", self.base());
        self.core.send_discard::<()>(Method::DELETE, &url, None).await
    }

    // ------------------------------------------------------------
    // Port attachments
    // ------------------------------------------------------------

    /// List ports attached to a server.
    pub async fn list_server_interfaces(&self, server_id: &str) -> Result<Vec<InterfaceAttachment>> {
        let url = format!("{}/servers/{server_id}/os-interface", self.base());
        self.core.fetch_resource(&url, "interfaceAttachments").await
    }

    /// Fetch one port attachment.
    pub async fn get_server_interface(
        &self,
        server_id: &str,
        port_id: &str,
    ) -> Result<InterfaceAttachment> {
        let url = format!("{}/servers/{server_id}/os-interface/{port_id}", self.base());
        self.core.fetch_resource(&url, "interfaceAttachment").await
    }

    /// Attach a port to a server.
    pub async fn attach_port(&self, server_id: &str, port_id: &str) -> Result<InterfaceAttachment> {
        let url = format!("{}/servers/{server_id}/os-interface", self.base());
        let mut body = HashMap::new();
        body.insert("port_id", port_id);
        self.core
            .send_resource(
                Method::POST,
                &url,
                Some(&Named::new("interfaceAttachment", &body)),
                "interfaceAttachment",
            )
            .await
    }

    /// Detach a port from a server.
    pub async fn detach_port(&self, server_id: &str, port_id: &str) -> Result<()> {
        let url = format!("{}/servers/{server_id}/os-interface/{port_id}", self.base());
        self.core.send_discard::<()>(Method::DELETE, &url, None).await
    }

    // ------------------------------------------------------------
    // Volume attachments
    // ------------------------------------------------------------

    /// List volumes attached to a server.
    pub async fn list_server_volumes(&self, server_id: &str) -> Result<Vec<ServerVolumeAttachment>> {
        let url = format!("{}/servers/{server_id}/os-volume_attachments", self.base());
        self.core.fetch_resource(&url, "volumeAttachments").await
    }

    /// Fetch one volume attachment.
    pub async fn get_server_volume(
        &self,
        server_id: &str,
        volume_id: &str,
    ) -> Result<ServerVolumeAttachment> {
        let url = format!("{}/servers/{server_id}/os-volume_attachments/{volume_id}", self.base());
        self.core.fetch_resource(&url, "volumeAttachment").await
    }

    /// Attach a volume to a server.
    pub async fn attach_volume(
        &self,
        server_id: &str,
        volume_id: &str,
    ) -> Result<ServerVolumeAttachment> {
        let url = format!("{}/servers/{server_id}/os-volume_attachments", self.base());
        let mut body = HashMap::new();
        body.insert("volumeId", volume_id);
        self.core
            .send_resource(
                Method::POST,
                &url,
                Some(&Named::new("volumeAttachment", &body)),
                "volumeAttachment",
            )
            .await
    }

    /// Detach a volume from a server.
    pub async fn detach_volume(&self, server_id: &str, volume_id: &str) -> Result<()> {
        let url = format!("{}/servers/{server_id}/os-volume_attachments/{volume_id}", self.base());
        self.core.send_discard::<()>(Method::DELETE, &url, None).await
    }

    // ------------------------------------------------------------
    // Monitoring
    // ------------------------------------------------------------

    /// CPU usage data for a server.
    pub async fn get_cpu_usage(
        &self,
        server_id: &str,
        opts: Option<&MonitoringOptions>,
    ) -> Result<RrdData> {
        let mut params = QueryParams::new();
        if let Some(opts) = opts {
            opts.fill(&mut params);
        }
        let url = params.append_to(&format!("{}/servers/{server_id}/rrd/cpu", self.base()));
        self.core.fetch_resource(&url, "cpu").await
    }

    /// Disk I/O data for a server. `device` selects `vda` or `vdb`.
    pub async fn get_disk_io(
        &self,
        server_id: &str,
        device: Option<&str>,
        opts: Option<&MonitoringOptions>,
    ) -> Result<RrdData> {
        let mut params = QueryParams::new();
        params.push_opt("device", device);
        if let Some(opts) = opts {
            opts.fill(&mut params);
        }
        let url = params.append_to(&format!("{}/servers/{server_id}/rrd/disk", self.base()));
        self.core.fetch_resource(&url, "disk").await
    }

    /// Network traffic data for a server. `port_id` is required.
    pub async fn get_network_traffic(
        &self,
        server_id: &str,
        port_id: &str,
        opts: Option<&MonitoringOptions>,
    ) -> Result<RrdData> {
        if port_id.is_empty() {
            return Err(Error::MissingParameter("port_id"));
        }
        let mut params = QueryParams::new();
        params.push("port_id", port_id);
        if let Some(opts) = opts {
            opts.fill(&mut params);
        }
        let url = params.append_to(&format!("{}/servers/{server_id}/rrd/interface", self.base()));
        self.core.fetch_resource(&url, "interface").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(server: &MockServer) -> ComputeClient {
        let core = Client::builder().compute_url(server.uri()).build();
        core.set_token("test-token");
        ComputeClient::new(&core)
    }

    #[tokio::test]
    async fn list_servers_unwraps_envelope() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2.1/servers"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "servers": [
                    {"id": "srv-1", "name": "web-01", "links": []},
                    {"id": "srv-2", "name": "web-02", "links": []}
                ]
            })))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let servers = client.list_servers(None).await.unwrap();
        assert_eq!(servers.len(), 2);
        assert_eq!(servers[0].id, "srv-1");
    }

    #[tokio::test]
    async fn list_servers_forwards_filters() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2.1/servers"))
            .and(query_param("status", "ACTIVE"))
            .and(query_param("limit", "10"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"servers": []})))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let opts = ListServersOptions {
            limit: Some(10),
            status: Some("ACTIVE".into()),
            ..ListServersOptions::default()
        };
        let servers = client.list_servers(Some(&opts)).await.unwrap();
        assert!(servers.is_empty());
    }

    #[tokio::test]
    async fn get_server_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2.1/servers/missing"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_string(r#"{"itemNotFound":{"message":"Server not found","code":404}}"#),
            )
            .mount(&server)
            .await;

        let client = test_client(&server);
        let err = client.get_server("missing").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn create_server_wraps_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v2.1/servers"))
            .and(body_json(json!({
                "server": {
                    "flavorRef": "g-c2m1",
                    "adminPass": "hunter2!",
                    "block_device_mapping_v2": [{"uuid": "vol-1"}]
                }
            })))
            .respond_with(ResponseTemplate::new(202).set_body_json(json!({
                "server": {"id": "srv-new", "links": [], "adminPass": "hunter2!"}
            })))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let request = CreateServerRequest {
            flavor_ref: "g-c2m1".into(),
            admin_pass: "hunter2!".into(),
            block_device_mapping: vec![crate::models::BlockDeviceMap { uuid: "vol-1".into() }],
            metadata: None,
            security_groups: None,
            key_name: None,
            user_data: None,
        };
        let created = client.create_server(&request).await.unwrap();
        assert_eq!(created.id, "srv-new");
    }

    #[tokio::test]
    async fn start_server_posts_action_marker() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v2.1/servers/srv-1/action"))
            .and(body_json(json!({"os-start": null})))
            .respond_with(ResponseTemplate::new(202))
            .mount(&server)
            .await;

        let client = test_client(&server);
        client.start_server("srv-1").await.unwrap();
    }

    #[tokio::test]
    async fn force_stop_sets_flag() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v2.1/servers/srv-1/action"))
            .and(body_json(json!({"os-stop": {"force_shutdown": true}})))
            .respond_with(ResponseTemplate::new(202))
            .mount(&server)
            .await;

        let client = test_client(&server);
        client.force_stop_server("srv-1").await.unwrap();
    }

    #[tokio::test]
    async fn mount_iso_returns_admin_pass() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v2.1/servers/srv-1/action"))
            .and(body_json(json!({"rescue": {"rescue_image_ref": "iso-1"}})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"adminPass": "r3scue"})))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let password = client.mount_iso("srv-1", "iso-1").await.unwrap();
        assert_eq!(password, "r3scue");
    }

    #[tokio::test]
    async fn addresses_by_network_picks_requested_key() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2.1/servers/srv-1/ips/ext-net"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "ext-net": [{"version": 4, "addr": "203.0.113.7"}]
            })))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let addrs = client.get_server_addresses_by_network("srv-1", "ext-net").await.unwrap();
        assert_eq!(addrs.len(), 1);
        assert_eq!(addrs[0].addr, "203.0.113.7");
    }

    #[tokio::test]
    async fn list_keypairs_flattens_nested_items() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2.1/os-keypairs"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "keypairs": [
                    {"keypair": {"name": "deploy", "public_key": "ssh-ed25519 AAAA", "fingerprint": "aa:bb"}}
                ]
            })))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let keypairs = client.list_keypairs(None).await.unwrap();
        assert_eq!(keypairs.len(), 1);
        assert_eq!(keypairs[0].name, "deploy");
    }

    #[tokio::test]
    async fn delete_server_tolerates_no_content() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/v2.1/servers/srv-1"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let client = test_client(&server);
        client.delete_server("srv-1").await.unwrap();
    }

    #[tokio::test]
    async fn cpu_usage_unwraps_rrd_envelope() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2.1/servers/srv-1/rrd/cpu"))
            .and(query_param("mode", "average"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "cpu": {"schema": ["unixtime", "value"], "data": [[1700000000u32, 12.5]]}
            })))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let opts = MonitoringOptions { mode: Some("average".into()), ..MonitoringOptions::default() };
        let data = client.get_cpu_usage("srv-1", Some(&opts)).await.unwrap();
        assert_eq!(data.schema, vec!["unixtime", "value"]);
        assert_eq!(data.data.len(), 1);
    }

    #[tokio::test]
    async fn network_traffic_requires_port_id() {
        let server = MockServer::start().await;
        let client = test_client(&server);

        let err = client.get_network_traffic("srv-1", "", None).await.unwrap_err();
        assert!(matches!(err, Error::MissingParameter("port_id")));
        // Nothing must have been sent.
        assert!(server.received_requests().await.unwrap().is_empty());
    }
}
