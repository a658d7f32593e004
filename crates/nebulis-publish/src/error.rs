//! Publishing error types

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PublishError {
    #[error("Scan root not found: {0}")]
    RootNotFound(PathBuf),

    #[error("Scan root is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("File is outside the scan root: {0}")]
    OutsideRoot(PathBuf),

    #[error("Traversal error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Upload failed for '{key}': {source}")]
    UploadFailed {
        key: String,
        #[source]
        source: nebulis_cloud::CloudError,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PublishError>;
