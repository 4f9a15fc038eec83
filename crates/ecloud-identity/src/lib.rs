//! Identity service client and data models for the ExampleCloud API.
//!
//! Covers EC2-style API credentials, sub-users and their roles, role
//! definitions, and the permission catalog. Token issuance itself lives in
//! `ecloud-core`, since every service family depends on it.

#![deny(missing_docs)]

pub mod client;
pub mod models;

pub use client::IdentityClient;
pub use models::{Credential, Role, RoleDetail, SubUser};

/// Convenient result alias that reuses the shared ExampleCloud error type.
pub type Result<T> = ecloud_core::Result<T>;
