//! Object store boundary

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Access control applied to a bucket or an uploaded object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ObjectAcl {
    Private,
    #[default]
    PublicRead,
}

/// Website bucket configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BucketConfig {
    /// Bucket name. Defaults to the site domain so the website endpoint
    /// can serve it directly.
    pub name: String,

    /// Object served for directory requests
    pub index_document: String,

    /// Object served when a key is missing
    pub error_document: String,

    /// Access control for the bucket and its objects
    pub acl: ObjectAcl,
}

impl BucketConfig {
    pub fn website(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            index_document: "index.html".to_string(),
            error_document: "index.html".to_string(),
            acl: ObjectAcl::PublicRead,
        }
    }
}

/// Endpoints of a provisioned website bucket
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BucketEndpoints {
    /// Bucket name as created
    pub name: String,

    /// HTTP website endpoint, used as the CDN origin
    pub website_endpoint: String,

    /// Plain bucket domain name, used as the access-log target
    pub bucket_domain: String,
}

/// A single put-object request
#[derive(Debug, Clone)]
pub struct PutRequest {
    /// Target bucket
    pub bucket: String,

    /// Object key, forward-slash separated
    pub key: String,

    /// Local file whose content becomes the object body. Implementations
    /// stream from this path rather than buffering the whole file.
    pub source: PathBuf,

    /// Content type, omitted when the extension is unrecognized
    pub content_type: Option<String>,

    /// Access control for the object
    pub acl: ObjectAcl,
}

/// Object store boundary
///
/// Puts are independent given unique keys; re-running a put for an
/// unchanged file leaves the remote object unchanged.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Create the bucket if it does not exist and apply the website
    /// configuration, returning its endpoints.
    async fn ensure_bucket(&self, config: &BucketConfig) -> Result<BucketEndpoints>;

    /// Upload one object, overwriting any previous version of the key
    async fn put_object(&self, request: &PutRequest) -> Result<()>;
}
