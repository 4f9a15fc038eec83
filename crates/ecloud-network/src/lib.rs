//! Network service client and data models for the ExampleCloud API.
//!
//! Covers networks, subnets, ports, additional-IP allocation, security
//! groups and their rules, and QoS policies.

#![deny(missing_docs)]

pub mod client;
pub mod models;

pub use client::NetworkClient;
pub use models::{
    AddressPair, AllocationPool, CreatePortRequest, CreateSecurityGroupRuleRequest, FixedIp,
    Network, Port, QosPolicy, QosRule, SecurityGroup, SecurityGroupRule, Subnet,
    UpdatePortRequest,
};

/// Convenient result alias that reuses the shared ExampleCloud error type.
pub type Result<T> = ecloud_core::Result<T>;
