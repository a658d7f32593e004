//! Cloud boundary error types

use thiserror::Error;

/// Cloud boundary errors
#[derive(Error, Debug)]
pub enum CloudError {
    #[error("No TLD found on {0}")]
    InvalidDomain(String),

    #[error("Hosted zone not found: {0}")]
    ZoneNotFound(String),

    #[error("Bucket not found: {0}")]
    BucketNotFound(String),

    #[error("Upload rejected for key '{key}': {message}")]
    UploadRejected { key: String, message: String },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CloudError>;
