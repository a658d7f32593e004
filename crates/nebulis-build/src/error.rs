//! Build step error types

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Webapp directory not found: {0}")]
    AppDirNotFound(PathBuf),

    #[error("{0} not found. Please install it and make sure it is on PATH")]
    PackageManagerNotFound(String),

    #[error("{step} failed: {message}")]
    BuildFailed { step: String, message: String },

    #[error("Build finished but produced no output directory: {0}")]
    OutputMissing(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BuildError>;
