//! Declarative resource configuration
//!
//! Settings for the CDN distribution and the TLS certificate, handed as-is
//! to the provider implementation.

use serde::{Deserialize, Serialize};

/// CDN distribution configuration for a single-page site
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistributionConfig {
    /// Alternate domain the distribution answers for
    pub domain: String,

    /// Origin endpoint. The S3 website endpoint only speaks HTTP, so the
    /// origin is reached http-only.
    pub origin_endpoint: String,

    /// ARN of the certificate presented to viewers (SNI)
    pub certificate_arn: String,

    /// Object served for the root URL
    pub default_root_object: String,

    /// Cache TTLs in seconds
    pub min_ttl: i64,
    pub default_ttl: i64,
    pub max_ttl: i64,

    /// Custom responses returned when the origin errors
    pub error_responses: Vec<ErrorResponse>,

    /// Access log target, none disables logging
    pub logging: Option<LoggingConfig>,
}

impl DistributionConfig {
    /// Distribution settings used for every Nebulis site: short uniform
    /// TTLs, a custom 404 page, https enforced toward viewers.
    pub fn single_page_app(
        domain: impl Into<String>,
        origin_endpoint: impl Into<String>,
        certificate_arn: impl Into<String>,
    ) -> Self {
        Self {
            domain: domain.into(),
            origin_endpoint: origin_endpoint.into(),
            certificate_arn: certificate_arn.into(),
            default_root_object: "index.html".to_string(),
            min_ttl: 0,
            default_ttl: 600,
            max_ttl: 600,
            error_responses: vec![ErrorResponse {
                error_code: 404,
                response_code: 404,
                response_page_path: "/404.html".to_string(),
            }],
            logging: None,
        }
    }

    pub fn with_logging(mut self, bucket_domain: impl Into<String>) -> Self {
        let prefix = format!("{}/", self.domain);
        self.logging = Some(LoggingConfig {
            bucket_domain: bucket_domain.into(),
            prefix,
        });
        self
    }
}

/// Custom error response mapping
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Status code received from the origin
    pub error_code: i32,

    /// Status code returned to the viewer
    pub response_code: i32,

    /// Object served instead of the origin response
    pub response_page_path: String,
}

/// Access log configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Bucket domain name receiving the logs
    pub bucket_domain: String,

    /// Key prefix for log objects
    pub prefix: String,
}

/// Information about a created distribution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistributionInfo {
    /// Distribution id
    pub id: String,

    /// Distribution domain name (xxxx.cloudfront.net), the alias target
    pub domain_name: String,

    /// Hosted zone id alias records must reference
    pub hosted_zone_id: String,
}

/// TLS certificate request configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CertificateConfig {
    /// Domain the certificate covers
    pub domain: String,

    /// TTL of the DNS validation record
    pub validation_ttl: i64,
}

impl CertificateConfig {
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            validation_ttl: 600,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_page_app_defaults() {
        let config = DistributionConfig::single_page_app(
            "app.example.com",
            "app.example.com.s3-website-eu-west-1.amazonaws.com",
            "arn:aws:acm:us-east-1:123456789012:certificate/abc",
        );
        assert_eq!(config.default_root_object, "index.html");
        assert_eq!(config.min_ttl, 0);
        assert_eq!(config.default_ttl, 600);
        assert_eq!(config.max_ttl, 600);
        assert_eq!(config.error_responses.len(), 1);
        assert_eq!(config.error_responses[0].error_code, 404);
        assert!(config.logging.is_none());
    }

    #[test]
    fn test_logging_prefix_is_domain() {
        let config = DistributionConfig::single_page_app("app.example.com", "origin", "arn")
            .with_logging("logs.s3.amazonaws.com");
        let logging = config.logging.unwrap();
        assert_eq!(logging.bucket_domain, "logs.s3.amazonaws.com");
        assert_eq!(logging.prefix, "app.example.com/");
    }
}
