//! AWS provider for Nebulis
//!
//! Implements the Nebulis cloud boundary on AWS:
//!
//! - S3 website bucket and object uploads (`ObjectStore`)
//! - Route53 hosted zone lookup and record upserts (`DnsZones`)
//! - ACM certificate issuance with DNS validation
//! - CloudFront distribution creation
//!
//! # Requirements
//!
//! Credentials come from the standard AWS credential chain (environment,
//! shared config, instance metadata). The certificate client is pinned to
//! us-east-1: CloudFront only accepts ACM certificates from that region.
//!
//! # Example
//!
//! ```ignore
//! use nebulis_cloud::{BucketConfig, ObjectStore};
//! use nebulis_cloud_aws::S3ObjectStore;
//!
//! let store = S3ObjectStore::from_env().await;
//! let endpoints = store.ensure_bucket(&BucketConfig::website("app.example.com")).await?;
//! println!("origin: {}", endpoints.website_endpoint);
//! ```

pub mod acm;
pub mod cdn;
pub mod dns;
pub mod error;
pub mod store;

pub use acm::AcmCertificates;
pub use cdn::CloudFrontCdn;
pub use dns::Route53Dns;
pub use error::{AwsError, Result};
pub use store::S3ObjectStore;
