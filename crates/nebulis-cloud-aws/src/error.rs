//! AWS provider error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AwsError {
    #[error("AWS API error: {0}")]
    ApiError(String),

    #[error("Certificate request returned no ARN for {0}")]
    CertificateArnMissing(String),

    #[error("Certificate {0} has no validation record yet")]
    ValidationRecordMissing(String),

    #[error("Certificate validation failed: {0}")]
    ValidationFailed(String),

    #[error("Timed out waiting for certificate {0} to be issued")]
    CertificateTimeout(String),

    #[error("Distribution creation returned no distribution for {0}")]
    DistributionMissing(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cloud error: {0}")]
    Cloud(#[from] nebulis_cloud::CloudError),
}

pub type Result<T> = std::result::Result<T, AwsError>;
