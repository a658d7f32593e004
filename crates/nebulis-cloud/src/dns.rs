//! DNS zone boundary and domain name splitting
//!
//! Record creation needs to know which hosted zone owns a domain. The zone
//! is looked up by the registrable parent domain, so a fully qualified site
//! domain is first split into a subdomain label and a parent zone name.

use crate::error::{CloudError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A domain name split into its first label and the zone that owns the rest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainParts {
    /// First label, empty when the input is itself a registrable domain
    pub subdomain: String,

    /// Zone name. Carries a trailing dot (absolute DNS name) whenever the
    /// input had more than two labels.
    pub parent_domain: String,
}

/// Split a fully qualified domain name into subdomain and parent zone.
///
/// - `"a.b.example.com"` → subdomain `"a"`, parent `"b.example.com."`
/// - `"example.com"` → subdomain `""`, parent `"example.com"`
/// - `"com"` → `CloudError::InvalidDomain`
pub fn split_domain(domain: &str) -> Result<DomainParts> {
    let parts: Vec<&str> = domain.split('.').collect();
    if parts.len() < 2 {
        return Err(CloudError::InvalidDomain(domain.to_string()));
    }

    if parts.len() == 2 {
        return Ok(DomainParts {
            subdomain: String::new(),
            parent_domain: domain.to_string(),
        });
    }

    Ok(DomainParts {
        subdomain: parts[0].to_string(),
        parent_domain: format!("{}.", parts[1..].join(".")),
    })
}

/// A record to create or update in a hosted zone
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordSpec {
    /// Zone the record belongs to
    pub zone_id: String,

    /// Fully qualified record name
    pub name: String,

    /// Record payload
    pub kind: RecordKind,

    /// TTL in seconds. Ignored for alias records, which inherit the
    /// target's TTL.
    pub ttl: Option<i64>,
}

/// Payload of a DNS record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum RecordKind {
    /// A-record alias pointing at another AWS-managed endpoint
    Alias {
        target: String,
        target_zone_id: String,
        evaluate_target_health: bool,
    },

    /// Plain record with literal values (CNAME, TXT, ...)
    Value {
        record_type: String,
        values: Vec<String>,
    },
}

impl RecordSpec {
    /// Record type as it appears on the wire
    pub fn record_type(&self) -> &str {
        match &self.kind {
            RecordKind::Alias { .. } => "A",
            RecordKind::Value { record_type, .. } => record_type,
        }
    }
}

/// DNS zone lookup and record management boundary
#[async_trait]
pub trait DnsZones: Send + Sync {
    /// Resolve a hosted zone id from its (parent) domain name
    async fn resolve_zone(&self, parent_domain: &str) -> Result<String>;

    /// Create the record, or update it in place if it already exists
    async fn upsert_record(&self, record: &RecordSpec) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_with_subdomain() {
        let parts = split_domain("a.b.example.com").unwrap();
        assert_eq!(parts.subdomain, "a");
        assert_eq!(parts.parent_domain, "b.example.com.");
    }

    #[test]
    fn test_split_registrable_domain() {
        let parts = split_domain("example.com").unwrap();
        assert_eq!(parts.subdomain, "");
        assert_eq!(parts.parent_domain, "example.com");
    }

    #[test]
    fn test_split_three_labels() {
        let parts = split_domain("app.example.com").unwrap();
        assert_eq!(parts.subdomain, "app");
        assert_eq!(parts.parent_domain, "example.com.");
    }

    #[test]
    fn test_split_single_label_fails() {
        let err = split_domain("com").unwrap_err();
        assert!(matches!(err, CloudError::InvalidDomain(_)));
    }

    #[test]
    fn test_split_empty_fails() {
        assert!(split_domain("").is_err());
    }

    #[test]
    fn test_record_type() {
        let alias = RecordSpec {
            zone_id: "Z1".to_string(),
            name: "app".to_string(),
            kind: RecordKind::Alias {
                target: "d111.cloudfront.net".to_string(),
                target_zone_id: "Z2FDTNDATAQYW2".to_string(),
                evaluate_target_health: true,
            },
            ttl: None,
        };
        assert_eq!(alias.record_type(), "A");

        let cname = RecordSpec {
            zone_id: "Z1".to_string(),
            name: "_x.app.example.com".to_string(),
            kind: RecordKind::Value {
                record_type: "CNAME".to_string(),
                values: vec!["_y.acm-validations.aws.".to_string()],
            },
            ttl: Some(600),
        };
        assert_eq!(cname.record_type(), "CNAME");
    }
}
