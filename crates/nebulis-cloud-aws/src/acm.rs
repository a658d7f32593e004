//! ACM certificate issuance
//!
//! Certificates are requested with DNS validation: ACM hands back a
//! record to create in the site's hosted zone as proof of ownership, and
//! the certificate stays pending until that record resolves.

use crate::error::{AwsError, Result};
use aws_sdk_acm::Client;
use aws_sdk_acm::error::DisplayErrorContext;
use aws_sdk_acm::types::{CertificateStatus, ValidationMethod};
use nebulis_cloud::{CertificateConfig, RecordKind, RecordSpec};
use std::time::Duration;
use tracing::{debug, info};

/// CloudFront only accepts certificates from this region.
const ACM_REGION: &str = "us-east-1";

const VALIDATION_RECORD_POLL: Duration = Duration::from_secs(5);
const VALIDATION_RECORD_ATTEMPTS: u32 = 24;

const ISSUE_POLL: Duration = Duration::from_secs(15);
const ISSUE_ATTEMPTS: u32 = 40;

/// ACM certificate manager, pinned to us-east-1
pub struct AcmCertificates {
    client: Client,
}

impl AcmCertificates {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Build a certificate manager from the default AWS credential chain,
    /// overriding the region to us-east-1.
    pub async fn from_env() -> Self {
        let config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(ACM_REGION))
            .load()
            .await;
        Self::new(Client::new(&config))
    }

    /// Request a DNS-validated certificate and return its ARN.
    ///
    /// The idempotency token makes a repeated request for the same domain
    /// return the existing certificate instead of a new one.
    pub async fn request(&self, config: &CertificateConfig) -> Result<String> {
        info!(domain = %config.domain, "Requesting certificate");

        let output = self
            .client
            .request_certificate()
            .domain_name(&config.domain)
            .validation_method(ValidationMethod::Dns)
            .idempotency_token(idempotency_token(&config.domain))
            .send()
            .await
            .map_err(api_error)?;

        output
            .certificate_arn()
            .map(str::to_string)
            .ok_or_else(|| AwsError::CertificateArnMissing(config.domain.clone()))
    }

    /// Fetch the DNS validation record for a requested certificate.
    ///
    /// ACM populates the record asynchronously after the request, so this
    /// polls until it appears.
    pub async fn validation_record(
        &self,
        arn: &str,
        zone_id: &str,
        ttl: i64,
    ) -> Result<RecordSpec> {
        for attempt in 0..VALIDATION_RECORD_ATTEMPTS {
            let output = self
                .client
                .describe_certificate()
                .certificate_arn(arn)
                .send()
                .await
                .map_err(api_error)?;

            let record = output
                .certificate()
                .map(|c| c.domain_validation_options())
                .unwrap_or_default()
                .iter()
                .find_map(|option| option.resource_record());

            if let Some(record) = record {
                debug!(name = %record.name(), "Validation record available");
                return Ok(RecordSpec {
                    zone_id: zone_id.to_string(),
                    name: record.name().to_string(),
                    kind: RecordKind::Value {
                        record_type: record.r#type().as_str().to_string(),
                        values: vec![record.value().to_string()],
                    },
                    ttl: Some(ttl),
                });
            }

            debug!(attempt, "Validation record not ready");
            tokio::time::sleep(VALIDATION_RECORD_POLL).await;
        }

        Err(AwsError::ValidationRecordMissing(arn.to_string()))
    }

    /// Poll until the certificate reaches ISSUED.
    ///
    /// Validation depends on DNS propagation and usually completes within
    /// a few minutes; the wait is bounded and times out rather than
    /// hanging a deploy forever.
    pub async fn wait_issued(&self, arn: &str) -> Result<()> {
        for _ in 0..ISSUE_ATTEMPTS {
            let output = self
                .client
                .describe_certificate()
                .certificate_arn(arn)
                .send()
                .await
                .map_err(api_error)?;

            let status = output.certificate().and_then(|c| c.status().cloned());

            match status {
                Some(CertificateStatus::Issued) => {
                    info!(arn = %arn, "Certificate issued");
                    return Ok(());
                }
                Some(CertificateStatus::Failed) | Some(CertificateStatus::ValidationTimedOut) => {
                    return Err(AwsError::ValidationFailed(arn.to_string()));
                }
                other => {
                    debug!(status = ?other, "Certificate not issued yet");
                }
            }

            tokio::time::sleep(ISSUE_POLL).await;
        }

        Err(AwsError::CertificateTimeout(arn.to_string()))
    }
}

/// ACM idempotency tokens allow word characters only, max 32
fn idempotency_token(domain: &str) -> String {
    domain
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .take(32)
        .collect()
}

fn api_error<E: std::error::Error + 'static>(err: aws_sdk_acm::error::SdkError<E>) -> AwsError {
    AwsError::ApiError(DisplayErrorContext(&err).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idempotency_token_replaces_dots() {
        assert_eq!(idempotency_token("app.example.com"), "app_example_com");
    }

    #[test]
    fn test_idempotency_token_caps_length() {
        let long = "a".repeat(64);
        assert_eq!(idempotency_token(&long).len(), 32);
    }
}
