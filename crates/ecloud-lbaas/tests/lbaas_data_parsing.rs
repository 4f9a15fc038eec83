//! Integration tests for parsing Load Balancer response data.

use ecloud_lbaas::models::LoadBalancer;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;

fn load_lb_list_fixture() -> Vec<LoadBalancer> {
    let fixture_path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("load_balancer_list.json");
    let json_data = fs::read_to_string(&fixture_path).unwrap_or_else(|e| {
        panic!(
            "Failed to read load balancer fixture at {}: {}",
            fixture_path.display(),
            e
        )
    });
    let envelope: Value = serde_json::from_str(&json_data).unwrap();
    serde_json::from_value(envelope["loadbalancers"].clone())
        .unwrap_or_else(|e| panic!("Failed to deserialize load balancer list: {e}"))
}

#[test]
fn deserializes_load_balancer_list() {
    let lbs = load_lb_list_fixture();
    assert_eq!(lbs.len(), 2);
}

#[test]
fn active_lb_links_listeners_and_pools() {
    let lbs = load_lb_list_fixture();
    let active = lbs
        .iter()
        .find(|lb| lb.provisioning_status == "ACTIVE")
        .expect("Should have an ACTIVE load balancer");

    assert_eq!(active.name, "front-lb");
    assert_eq!(active.vip_address, "203.0.113.80");
    assert_eq!(active.listeners.len(), 1);
    assert_eq!(active.pools.len(), 1);
    assert!(active.admin_state_up);
}

#[test]
fn pending_lb_tolerates_missing_vip_ids() {
    let lbs = load_lb_list_fixture();
    let pending = lbs
        .iter()
        .find(|lb| lb.provisioning_status == "PENDING_CREATE")
        .expect("Should have a PENDING_CREATE load balancer");

    assert_eq!(pending.vip_port_id, "");
    assert!(pending.listeners.is_empty());
    assert_eq!(pending.operating_status, "OFFLINE");
}
