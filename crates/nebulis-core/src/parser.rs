//! `site.kdl` parsing

use crate::error::{Result, SiteError};
use crate::model::{CacheSettings, Site, Webapp};
use kdl::{KdlDocument, KdlNode};
use std::path::PathBuf;
use tracing::debug;

/// Parse a site definition from KDL text.
///
/// ```kdl
/// site "dashboard" {
///     domain "app.example.com"
///     webapp {
///         path "./webapp"
///         env {
///             API_URL "https://api.example.com"
///         }
///     }
/// }
/// ```
pub fn parse_site_str(content: &str) -> Result<Site> {
    let document: KdlDocument = content.parse()?;

    let site_node = document
        .nodes()
        .iter()
        .find(|n| n.name().value() == "site")
        .ok_or_else(|| SiteError::InvalidConfig("missing 'site' node".to_string()))?;

    let name = string_arg(site_node)
        .ok_or_else(|| SiteError::InvalidConfig("site requires a name".to_string()))?;

    let mut domain = None;
    let mut webapp = Webapp::default();
    let mut bucket = None;
    let mut logs_bucket = None;
    let mut cache = CacheSettings::default();

    if let Some(children) = site_node.children() {
        for child in children.nodes() {
            match child.name().value() {
                "domain" => domain = string_arg(child),
                "webapp" => webapp = parse_webapp(child)?,
                "bucket" => bucket = string_arg(child),
                "logs-bucket" | "logs_bucket" => logs_bucket = string_arg(child),
                "cache" => cache = parse_cache(child),
                other => {
                    debug!("Ignoring unknown site setting: {}", other);
                }
            }
        }
    }

    let domain =
        domain.ok_or_else(|| SiteError::InvalidConfig("site requires a domain".to_string()))?;

    Ok(Site {
        name,
        domain,
        webapp,
        bucket,
        logs_bucket,
        cache,
    })
}

fn parse_webapp(node: &KdlNode) -> Result<Webapp> {
    let mut webapp = Webapp::default();

    if let Some(children) = node.children() {
        for child in children.nodes() {
            match child.name().value() {
                "path" => {
                    webapp.path = string_arg(child).map(PathBuf::from).ok_or_else(|| {
                        SiteError::InvalidConfig("webapp path requires a value".to_string())
                    })?;
                }
                "output" => {
                    if let Some(output) = string_arg(child) {
                        webapp.output = output;
                    }
                }
                "package-manager" | "package_manager" => {
                    webapp.package_manager = string_arg(child);
                }
                "env" => {
                    if let Some(env_children) = child.children() {
                        for var in env_children.nodes() {
                            if let Some(value) = string_arg(var) {
                                webapp.env.insert(var.name().value().to_string(), value);
                            }
                        }
                    }
                }
                other => {
                    debug!("Ignoring unknown webapp setting: {}", other);
                }
            }
        }
    }

    Ok(webapp)
}

fn parse_cache(node: &KdlNode) -> CacheSettings {
    let mut cache = CacheSettings::default();

    if let Some(children) = node.children() {
        for child in children.nodes() {
            match child.name().value() {
                "min-ttl" | "min_ttl" => {
                    if let Some(v) = int_arg(child) {
                        cache.min_ttl = v;
                    }
                }
                "default-ttl" | "default_ttl" => {
                    if let Some(v) = int_arg(child) {
                        cache.default_ttl = v;
                    }
                }
                "max-ttl" | "max_ttl" => {
                    if let Some(v) = int_arg(child) {
                        cache.max_ttl = v;
                    }
                }
                _ => {}
            }
        }
    }

    cache
}

fn string_arg(node: &KdlNode) -> Option<String> {
    node.entries()
        .first()
        .and_then(|e| e.value().as_string())
        .map(|s| s.to_string())
}

fn int_arg(node: &KdlNode) -> Option<i64> {
    node.entries().first().and_then(|e| e.value().as_integer()).map(|v| v as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_site() {
        let content = r#"
site "dashboard" {
    domain "app.example.com"

    webapp {
        path "./webapp"
        output "dist"
        package-manager "yarn"
        env {
            API_URL "https://api.example.com"
            STAGE "prod"
        }
    }

    bucket "dashboard-content"
    logs-bucket "dashboard-logs"

    cache {
        min-ttl 0
        default-ttl 300
        max-ttl 3600
    }
}
"#;
        let site = parse_site_str(content).unwrap();
        assert_eq!(site.name, "dashboard");
        assert_eq!(site.domain, "app.example.com");
        assert_eq!(site.webapp.path, PathBuf::from("./webapp"));
        assert_eq!(site.webapp.output, "dist");
        assert_eq!(site.webapp.package_manager.as_deref(), Some("yarn"));
        assert_eq!(site.webapp.env.len(), 2);
        assert_eq!(
            site.webapp.env.get("API_URL").map(String::as_str),
            Some("https://api.example.com")
        );
        assert_eq!(site.bucket.as_deref(), Some("dashboard-content"));
        assert_eq!(site.logs_bucket.as_deref(), Some("dashboard-logs"));
        assert_eq!(site.cache.default_ttl, 300);
        assert_eq!(site.cache.max_ttl, 3600);
    }

    #[test]
    fn test_parse_minimal_site() {
        let content = r#"
site "landing" {
    domain "example.com"
}
"#;
        let site = parse_site_str(content).unwrap();
        assert_eq!(site.name, "landing");
        assert_eq!(site.domain, "example.com");
        assert_eq!(site.webapp.output, "build");
        assert!(site.bucket.is_none());
        assert_eq!(site.cache.default_ttl, 600);
        assert_eq!(site.bucket_name(), "example.com");
    }

    #[test]
    fn test_parse_missing_domain() {
        let content = r#"
site "landing" {
    webapp {
        path "./webapp"
    }
}
"#;
        let err = parse_site_str(content).unwrap_err();
        assert!(matches!(err, SiteError::InvalidConfig(_)));
    }

    #[test]
    fn test_parse_missing_site_node() {
        let err = parse_site_str("other \"x\"").unwrap_err();
        assert!(matches!(err, SiteError::InvalidConfig(_)));
    }

    #[test]
    fn test_parse_invalid_kdl() {
        let err = parse_site_str("site \"x\" {").unwrap_err();
        assert!(matches!(err, SiteError::KdlParse(_)));
    }

    #[test]
    fn test_parse_site_requires_name() {
        let err = parse_site_str("site { domain \"example.com\" }").unwrap_err();
        assert!(matches!(err, SiteError::InvalidConfig(_)));
    }
}
