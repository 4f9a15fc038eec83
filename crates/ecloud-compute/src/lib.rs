//! Compute service client and data models for the ExampleCloud API.
//!
//! Covers servers and their actions, flavors, SSH keypairs, port and
//! volume attachments, and RRD monitoring data.

#![deny(missing_docs)]

pub mod client;
pub mod models;

pub use client::ComputeClient;
pub use models::{
    Address, BlockDeviceMap, CreateServerRequest, CreateServerResponse, Flavor, FlavorDetail,
    FlavorRef, InterfaceAttachment, Keypair, ListKeypairsOptions, ListServersOptions,
    MonitoringOptions, RebuildServerRequest, RemoteConsole, RemoteConsoleRequest, RrdData, Server,
    ServerDetail, ServerSecurityGroup, ServerSecurityGroupRule, ServerVolumeAttachment,
};

/// Convenient result alias that reuses the shared ExampleCloud error type.
pub type Result<T> = ecloud_core::Result<T>;
