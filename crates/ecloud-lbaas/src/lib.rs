//! Load Balancer service client and data models for the ExampleCloud API.
//!
//! Covers load balancers, listeners, pools, pool members, and health
//! monitors.

#![deny(missing_docs)]

pub mod client;
pub mod models;

pub use client::LoadBalancerClient;
pub use models::{
    CreateHealthMonitorRequest, HealthMonitor, IdRef, Listener, LoadBalancer, Member, Pool,
};

/// Convenient result alias that reuses the shared ExampleCloud error type.
pub type Result<T> = ecloud_core::Result<T>;
