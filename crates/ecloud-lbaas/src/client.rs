//! Asynchronous Load Balancer service client.

use crate::models::{
    AddMemberOpts, AdminStateOpts, CreateHealthMonitorRequest, CreateListenerOpts, CreatePoolOpts,
    HealthMonitor, Listener, LoadBalancer, Member, NameOpts, Pool, UpdatePoolOpts,
};
use crate::Result;
use ecloud_core::envelope::Named;
use ecloud_core::{Client, ServiceKind};
use reqwest::Method;

/// Client for the Load Balancer service family.
#[derive(Clone)]
pub struct LoadBalancerClient {
    core: Client,
}

impl LoadBalancerClient {
    /// Create a load balancer client sharing the given core client.
    #[must_use]
    pub fn new(core: &Client) -> Self {
        Self { core: core.clone() }
    }

    fn base(&self) -> String {
        format!("{}/lbaas", self.core.endpoint(ServiceKind::LoadBalancer))
    }

    // ------------------------------------------------------------
    // Load balancers
    // ------------------------------------------------------------

    /// List load balancers.
    pub async fn list_load_balancers(&self) -> Result<Vec<LoadBalancer>> {
        let url = format!("{}/loadbalancers", self.base());
        self.core.fetch_resource(&url, "loadbalancers").await
    }

    /// Fetch a load balancer's details.
    pub async fn get_load_balancer(&self, lb_id: &str) -> Result<LoadBalancer> {
        let url = format!("{}/loadbalancers/{lb_id}", self.base());
        self.core.fetch_resource(&url, "loadbalancer").await
    }

    /// Create a load balancer.
    pub async fn create_load_balancer(&self, name: &str) -> Result<LoadBalancer> {
        let url = format!("{}/loadbalancers", self.base());
        self.core
            .send_resource(
                Method::POST,
                &url,
                Some(&Named::new("loadbalancer", &NameOpts { name })),
                "loadbalancer",
            )
            .await
    }

    /// Rename a load balancer.
    pub async fn update_load_balancer(&self, lb_id: &str, name: &str) -> Result<LoadBalancer> {
        let url = format!("{}/loadbalancers/{lb_id}", self.base());
        self.core
            .send_resource(
                Method::PUT,
                &url,
                Some(&Named::new("loadbalancer", &NameOpts { name })),
                "loadbalancer",
            )
            .await
    }

    /// Delete a load balancer.
    pub async fn delete_load_balancer(&self, lb_id: &str) -> Result<()> {
        let url = format!("{}/loadbalancers/{lb_id}", self.base());
        self.core.send_discard::<()>(Method::DELETE, &url, None).await
    }

    // ------------------------------------------------------------
    // Listeners
    // ------------------------------------------------------------

    /// List listeners.
    pub async fn list_listeners(&self) -> Result<Vec<Listener>> {
        let url = format!("{}/listeners", self.base());
        self.core.fetch_resource(&url, "listeners").await
    }

    /// Fetch a listener's details.
    pub async fn get_listener(&self, listener_id: &str) -> Result<Listener> {
        let url = format!("{}/listeners/{listener_id}", self.base());
        self.core.fetch_resource(&url, "listener").await
    }

    /// Create a listener on a load balancer.
    pub async fn create_listener(
        &self,
        name: &str,
        protocol: &str,
        port: i32,
        lb_id: &str,
    ) -> Result<Listener> {
        let url = format!("{}/listeners", self.base());
        let opts = CreateListenerOpts {
            name,
            protocol,
            protocol_port: port,
            loadbalancer_id: lb_id,
        };
        self.core
            .send_resource(Method::POST, &url, Some(&Named::new("listener", &opts)), "listener")
            .await
    }

    /// Rename a listener.
    pub async fn update_listener(&self, listener_id: &str, name: &str) -> Result<Listener> {
        let url = format!("{}/listeners/{listener_id}", self.base());
        self.core
            .send_resource(
                Method::PUT,
                &url,
                Some(&Named::new("listener", &NameOpts { name })),
                "listener",
            )
            .await
    }

    /// Delete a listener.
    pub async fn delete_listener(&self, listener_id: &str) -> Result<()> {
        let url = format!("{}/listeners/{listener_id}", self.base());
        self.core.send_discard::<()>(Method::DELETE, &url, None).await
    }

    // ------------------------------------------------------------
    // Pools
    // ------------------------------------------------------------

    /// List pools.
    pub async fn list_pools(&self) -> Result<Vec<Pool>> {
        let url = format!("{}/pools", self.base());
        self.core.fetch_resource(&url, "pools").await
    }

    /// Fetch a pool's details.
    pub async fn get_pool(&self, pool_id: &str) -> Result<Pool> {
        let url = format!("{}/pools/{pool_id}", self.base());
        self.core.fetch_resource(&url, "pool").await
    }

    /// Create a pool behind a listener.
    pub async fn create_pool(
        &self,
        name: &str,
        protocol: &str,
        lb_algorithm: &str,
        listener_id: &str,
    ) -> Result<Pool> {
        let url = format!("{}/pools", self.base());
        let opts = CreatePoolOpts {
            name,
            protocol,
            lb_algorithm,
            listener_id,
        };
        self.core
            .send_resource(Method::POST, &url, Some(&Named::new("pool", &opts)), "pool")
            .await
    }

    /// Update a pool's name and/or algorithm; empty strings leave the
    /// field unchanged.
    pub async fn update_pool(&self, pool_id: &str, name: &str, lb_algorithm: &str) -> Result<Pool> {
        let url = format!("{}/pools/{pool_id}", self.base());
        let opts = UpdatePoolOpts { name, lb_algorithm };
        self.core
            .send_resource(Method::PUT, &url, Some(&Named::new("pool", &opts)), "pool")
            .await
    }

    /// Delete a pool.
    pub async fn delete_pool(&self, pool_id: &str) -> Result<()> {
        let url = format!("{}/pools/{pool_id}", self.base());
        self.core.send_discard::<()>(Method::DELETE, &url, None).await
    }

    // ------------------------------------------------------------
    // Members
    // ------------------------------------------------------------

    /// List members of a pool.
    pub async fn list_members(&self, pool_id: &str) -> Result<Vec<Member>> {
        let url = format!("{}/pools/{pool_id}/members", self.base());
        self.core.fetch_resource(&url, "members").await
    }

    /// Fetch one pool member.
    pub async fn get_member(&self, pool_id: &str, member_id: &str) -> Result<Member> {
        let url = format!("{}/pools/{pool_id}/members/{member_id}", self.base());
        self.core.fetch_resource(&url, "member").await
    }

    /// Add a backend member to a pool.
    pub async fn add_member(
        &self,
        pool_id: &str,
        name: &str,
        address: &str,
        port: i32,
    ) -> Result<Member> {
        let url = format!("{}/pools/{pool_id}/members", self.base());
        let opts = AddMemberOpts {
            name,
            address,
            protocol_port: port,
        };
        self.core
            .send_resource(Method::POST, &url, Some(&Named::new("member", &opts)), "member")
            .await
    }

    /// Toggle a member's administrative state.
    pub async fn update_member(
        &self,
        pool_id: &str,
        member_id: &str,
        admin_state_up: bool,
    ) -> Result<Member> {
        let url = format!("{}/pools/{pool_id}/members/{member_id}", self.base());
        let opts = AdminStateOpts { admin_state_up };
        self.core
            .send_resource(Method::PUT, &url, Some(&Named::new("member", &opts)), "member")
            .await
    }

    /// Remove a member from a pool.
    pub async fn delete_member(&self, pool_id: &str, member_id: &str) -> Result<()> {
        let url = format!("{}/pools/{pool_id}/members/{member_id}", self.base());
        self.core.send_discard::<()>(Method::DELETE, &url, None).await
    }

    // ------------------------------------------------------------
    // Health monitors
    // ------------------------------------------------------------

    /// List health monitors.
    pub async fn list_health_monitors(&self) -> Result<Vec<HealthMonitor>> {
        let url = format!("{}/healthmonitors", self.base());
        self.core.fetch_resource(&url, "healthmonitors").await
    }

    /// Fetch a health monitor's details.
    pub async fn get_health_monitor(&self, monitor_id: &str) -> Result<HealthMonitor> {
        let url = format!("{}/healthmonitors/{monitor_id}", self.base());
        self.core.fetch_resource(&url, "healthmonitor").await
    }

    /// Create a health monitor.
    pub async fn create_health_monitor(
        &self,
        opts: &CreateHealthMonitorRequest,
    ) -> Result<HealthMonitor> {
        let url = format!("{}/healthmonitors", self.base());
        self.core
            .send_resource(
                Method::POST,
                &url,
                Some(&Named::new("healthmonitor", opts)),
                "healthmonitor",
            )
            .await
    }

    /// Rename a health monitor.
    pub async fn update_health_monitor(&self, monitor_id: &str, name: &str) -> Result<HealthMonitor> {
        let url = format!("{}/healthmonitors/{monitor_id}", self.base());
        self.core
            .send_resource(
                Method::PUT,
                &url,
                Some(&Named::new("healthmonitor", &NameOpts { name })),
                "healthmonitor",
            )
            .await
    }

    /// Delete a health monitor.
    pub async fn delete_health_monitor(&self, monitor_id: &str) -> Result<()> {
        let url = format!("{}/healthmonitors/{monitor_id}", self.base());
        self.core.send_discard::<()>(Method::DELETE, &url, None).await
    }
}
