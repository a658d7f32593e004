//! Site file discovery
//!
//! Search order:
//! 1. NEBULIS_CONFIG_PATH environment variable (direct path)
//! 2. Start directory: site.local.kdl, .site.local.kdl, site.kdl, .site.kdl
//! 3. ./.nebulis/ directory, same candidate order
//! 4. ~/.config/nebulis/site.kdl (global config)

use crate::error::{Result, SiteError};
use crate::model::Site;
use crate::parser::parse_site_str;
use std::path::{Path, PathBuf};
use tracing::debug;

const CANDIDATES: [&str; 4] = ["site.local.kdl", ".site.local.kdl", "site.kdl", ".site.kdl"];

/// Global Nebulis config directory (~/.config/nebulis), created on demand
pub fn get_config_dir() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .ok_or(SiteError::ConfigDirNotFound)?
        .join("nebulis");

    if !config_dir.exists() {
        std::fs::create_dir_all(&config_dir)?;
    }

    Ok(config_dir)
}

/// Find the site file starting from the current directory, honoring the
/// NEBULIS_CONFIG_PATH override.
pub fn find_site_file() -> Result<PathBuf> {
    if let Ok(config_path) = std::env::var("NEBULIS_CONFIG_PATH") {
        let path = PathBuf::from(config_path);
        if path.exists() {
            return Ok(path);
        }
    }

    find_site_file_in(&std::env::current_dir()?)
}

/// Find the site file under a given start directory
pub fn find_site_file_in(dir: &Path) -> Result<PathBuf> {
    for filename in &CANDIDATES {
        let path = dir.join(filename);
        if path.exists() {
            debug!(path = %path.display(), "Found site file");
            return Ok(path);
        }
    }

    let nebulis_dir = dir.join(".nebulis");
    if nebulis_dir.is_dir() {
        for filename in &CANDIDATES {
            let path = nebulis_dir.join(filename);
            if path.exists() {
                debug!(path = %path.display(), "Found site file");
                return Ok(path);
            }
        }
    }

    if let Some(config_dir) = dirs::config_dir() {
        let global_config = config_dir.join("nebulis").join("site.kdl");
        if global_config.exists() {
            return Ok(global_config);
        }
    }

    Err(SiteError::SiteFileNotFound)
}

/// Read and parse a site file
pub fn load_site(path: &Path) -> Result<Site> {
    let content = std::fs::read_to_string(path)?;
    parse_site_str(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const MINIMAL_SITE: &str = "site \"t\" {\n    domain \"example.com\"\n}\n";

    #[test]
    fn test_find_in_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(temp_dir.path().join("site.kdl"), MINIMAL_SITE).unwrap();

        let found = find_site_file_in(temp_dir.path()).unwrap();
        assert!(found.ends_with("site.kdl"));
    }

    #[test]
    fn test_local_file_takes_priority() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(temp_dir.path().join("site.kdl"), MINIMAL_SITE).unwrap();
        fs::write(temp_dir.path().join("site.local.kdl"), MINIMAL_SITE).unwrap();

        let found = find_site_file_in(temp_dir.path()).unwrap();
        assert!(found.ends_with("site.local.kdl"));
    }

    #[test]
    fn test_find_in_nebulis_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        let nebulis_dir = temp_dir.path().join(".nebulis");
        fs::create_dir(&nebulis_dir).unwrap();
        fs::write(nebulis_dir.join("site.kdl"), MINIMAL_SITE).unwrap();

        let found = find_site_file_in(temp_dir.path()).unwrap();
        assert!(found.ends_with(".nebulis/site.kdl"));
    }

    #[test]
    fn test_load_site() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("site.kdl");
        fs::write(&path, MINIMAL_SITE).unwrap();

        let site = load_site(&path).unwrap();
        assert_eq!(site.domain, "example.com");
    }
}
