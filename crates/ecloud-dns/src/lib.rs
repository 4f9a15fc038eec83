//! DNS service client and data models for the ExampleCloud API.
//!
//! Covers domains and their records. Domain and record names follow the
//! provider convention of a trailing period (`example.com.`), enforced by
//! the provider rather than this client.

#![deny(missing_docs)]

pub mod client;
pub mod models;

pub use client::DnsClient;
pub use models::{
    CreateDnsRecordRequest, CreateDomainRequest, DnsRecord, Domain, ListDnsRecordsOptions,
    ListDomainsOptions, UpdateDnsRecordRequest, UpdateDomainRequest,
};

/// Convenient result alias that reuses the shared ExampleCloud error type.
pub type Result<T> = ecloud_core::Result<T>;
