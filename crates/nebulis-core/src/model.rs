//! Site model
//!
//! A `Site` describes one deployable single-page application: where its
//! sources live, which domain serves it and how the edge caches it.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// A deployable site, parsed from `site.kdl`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Site {
    /// Site name, used for display and resource naming
    pub name: String,

    /// Fully qualified domain the site is served on
    pub domain: String,

    /// Webapp build settings
    pub webapp: Webapp,

    /// Bucket name override. Defaults to the domain.
    pub bucket: Option<String>,

    /// Bucket receiving CDN access logs, none disables logging
    pub logs_bucket: Option<String>,

    /// Edge cache TTLs
    pub cache: CacheSettings,
}

impl Site {
    /// Bucket holding the site content
    pub fn bucket_name(&self) -> &str {
        self.bucket.as_deref().unwrap_or(&self.domain)
    }
}

/// Webapp build settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Webapp {
    /// Directory containing the webapp sources (package.json)
    pub path: PathBuf,

    /// Build output directory, relative to `path`
    pub output: String,

    /// Package manager override ("npm", "yarn", "pnpm"); detected from
    /// the lockfile when unset
    pub package_manager: Option<String>,

    /// Variables exposed to the build
    pub env: HashMap<String, String>,
}

impl Default for Webapp {
    fn default() -> Self {
        Self {
            path: PathBuf::from("."),
            output: "build".to_string(),
            package_manager: None,
            env: HashMap::new(),
        }
    }
}

/// Edge cache TTLs in seconds
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CacheSettings {
    pub min_ttl: i64,
    pub default_ttl: i64,
    pub max_ttl: i64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            min_ttl: 0,
            default_ttl: 600,
            max_ttl: 600,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_name_defaults_to_domain() {
        let site = Site {
            name: "dashboard".to_string(),
            domain: "app.example.com".to_string(),
            webapp: Webapp::default(),
            bucket: None,
            logs_bucket: None,
            cache: CacheSettings::default(),
        };
        assert_eq!(site.bucket_name(), "app.example.com");
    }

    #[test]
    fn test_bucket_name_override() {
        let site = Site {
            name: "dashboard".to_string(),
            domain: "app.example.com".to_string(),
            webapp: Webapp::default(),
            bucket: Some("my-site-content".to_string()),
            logs_bucket: None,
            cache: CacheSettings::default(),
        };
        assert_eq!(site.bucket_name(), "my-site-content");
    }
}
