//! Nebulis Cloud Boundary
//!
//! This crate defines the provider-neutral boundary between the Nebulis
//! deploy pipeline and the cloud services it drives: an object store for
//! the site content and a DNS zone service for delegation records.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │                  Nebulis CLI                     │
//! │              (nebulis deploy/publish)            │
//! └─────────────────┬───────────────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────────────┐
//! │                nebulis-cloud                     │
//! │  ┌──────────────────────────────────────────┐   │
//! │  │         Boundary Traits                   │   │
//! │  │  trait ObjectStore { ... }                │   │
//! │  │  trait DnsZones { ... }                   │   │
//! │  └──────────────────────────────────────────┘   │
//! │  ┌──────────────┐  ┌──────────────┐            │
//! │  │ Domain Split │  │  Resources   │            │
//! │  └──────────────┘  └──────────────┘            │
//! └───────┬─────────────────────────────────────────┘
//!         │
//! ┌───────▼───────┐
//! │      aws      │
//! │   provider    │
//! └───────────────┘
//! ```

pub mod dns;
pub mod error;
pub mod resource;
pub mod store;

// Re-exports
pub use dns::{DnsZones, DomainParts, RecordKind, RecordSpec, split_domain};
pub use error::{CloudError, Result};
pub use resource::{
    CertificateConfig, DistributionConfig, DistributionInfo, ErrorResponse, LoggingConfig,
};
pub use store::{BucketConfig, BucketEndpoints, ObjectAcl, ObjectStore, PutRequest};
