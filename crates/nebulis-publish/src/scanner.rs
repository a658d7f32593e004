//! Recursive build-output scanning

use crate::error::{PublishError, Result};
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Enumerates the regular files under a build output folder.
///
/// Entries come back in directory-listing order, which is platform
/// dependent; callers that need determinism sort the result.
#[derive(Debug, Clone)]
pub struct FolderScanner {
    /// Whether to follow symbolic links. Off by default: a cyclic link
    /// tree would otherwise recurse forever. When enabled, walkdir's
    /// ancestor check reports cycles as traversal errors.
    pub follow_links: bool,

    /// Maximum depth for directory traversal (None = unlimited)
    pub max_depth: Option<usize>,
}

impl Default for FolderScanner {
    fn default() -> Self {
        Self {
            follow_links: false,
            max_depth: None,
        }
    }
}

impl FolderScanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Follow symbolic links during traversal
    pub fn with_follow_links(mut self, follow: bool) -> Self {
        self.follow_links = follow;
        self
    }

    /// Limit traversal depth
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Collect the absolute path of every regular file reachable from
    /// `root`. Directories contribute no entries themselves.
    pub fn scan(&self, root: &Path) -> Result<Vec<PathBuf>> {
        if !root.exists() {
            return Err(PublishError::RootNotFound(root.to_path_buf()));
        }
        if !root.is_dir() {
            return Err(PublishError::NotADirectory(root.to_path_buf()));
        }

        let mut walker = WalkDir::new(root).follow_links(self.follow_links);
        if let Some(depth) = self.max_depth {
            walker = walker.max_depth(depth);
        }

        let mut files = Vec::new();
        for entry in walker {
            let entry = entry?;
            if entry.file_type().is_file() {
                files.push(entry.into_path());
            }
        }

        debug!(root = %root.display(), count = files.len(), "Scan complete");
        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_scan_nested_tree() {
        let temp_dir = tempdir().unwrap();
        fs::write(temp_dir.path().join("index.html"), "<html></html>").unwrap();

        let sub = temp_dir.path().join("static");
        fs::create_dir(&sub).unwrap();
        fs::write(sub.join("app.js"), "console.log(1)").unwrap();

        let nested = sub.join("img");
        fs::create_dir(&nested).unwrap();
        fs::write(nested.join("logo.png"), [0x89, 0x50, 0x4e, 0x47]).unwrap();

        let mut files = FolderScanner::new().scan(temp_dir.path()).unwrap();
        files.sort();

        assert_eq!(files.len(), 3);
        assert!(files.iter().all(|f| f.is_file()));
        assert!(files.contains(&temp_dir.path().join("index.html")));
        assert!(files.contains(&sub.join("app.js")));
        assert!(files.contains(&nested.join("logo.png")));
    }

    #[test]
    fn test_scan_excludes_directories() {
        let temp_dir = tempdir().unwrap();
        fs::create_dir(temp_dir.path().join("empty")).unwrap();
        fs::write(temp_dir.path().join("only.txt"), "x").unwrap();

        let files = FolderScanner::new().scan(temp_dir.path()).unwrap();
        assert_eq!(files, vec![temp_dir.path().join("only.txt")]);
    }

    #[test]
    fn test_scan_empty_dir() {
        let temp_dir = tempdir().unwrap();
        let files = FolderScanner::new().scan(temp_dir.path()).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_scan_missing_root() {
        let temp_dir = tempdir().unwrap();
        let missing = temp_dir.path().join("nope");
        let err = FolderScanner::new().scan(&missing).unwrap_err();
        assert!(matches!(err, PublishError::RootNotFound(_)));
    }

    #[test]
    fn test_scan_root_is_file() {
        let temp_dir = tempdir().unwrap();
        let file = temp_dir.path().join("file.txt");
        fs::write(&file, "x").unwrap();
        let err = FolderScanner::new().scan(&file).unwrap_err();
        assert!(matches!(err, PublishError::NotADirectory(_)));
    }

    #[test]
    fn test_scan_max_depth() {
        let temp_dir = tempdir().unwrap();
        fs::write(temp_dir.path().join("top.txt"), "x").unwrap();
        let sub = temp_dir.path().join("deep");
        fs::create_dir(&sub).unwrap();
        fs::write(sub.join("below.txt"), "x").unwrap();

        let files = FolderScanner::new()
            .with_max_depth(1)
            .scan(temp_dir.path())
            .unwrap();
        assert_eq!(files, vec![temp_dir.path().join("top.txt")]);
    }

    #[cfg(unix)]
    #[test]
    fn test_scan_skips_symlinked_dirs_by_default() {
        let temp_dir = tempdir().unwrap();
        let real = temp_dir.path().join("real");
        fs::create_dir(&real).unwrap();
        fs::write(real.join("inside.txt"), "x").unwrap();
        std::os::unix::fs::symlink(&real, temp_dir.path().join("link")).unwrap();

        let files = FolderScanner::new().scan(temp_dir.path()).unwrap();
        // the file is reached once through "real", never through "link"
        assert_eq!(files, vec![real.join("inside.txt")]);
    }
}
