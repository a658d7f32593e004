//! Object publishing
//!
//! Uploads every file discovered by the scanner through the object store
//! boundary. One object per file, keyed by the root-relative path; the
//! first rejected put aborts the remaining batch.

use crate::error::{PublishError, Result};
use crate::scanner::FolderScanner;
use futures_util::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use nebulis_cloud::{ObjectAcl, ObjectStore, PutRequest};
use std::path::{Component, Path};
use std::sync::Arc;
use tracing::{debug, info};

/// Compute the object key for a file under a scan root: the relative path
/// with forward-slash separators regardless of platform.
pub fn upload_key(root: &Path, file: &Path) -> Result<String> {
    let relative = file
        .strip_prefix(root)
        .map_err(|_| PublishError::OutsideRoot(file.to_path_buf()))?;

    let mut labels = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(part) => labels.push(part.to_string_lossy().into_owned()),
            _ => return Err(PublishError::OutsideRoot(file.to_path_buf())),
        }
    }
    Ok(labels.join("/"))
}

/// Result of a publish run
#[derive(Debug, Default)]
pub struct PublishSummary {
    /// Keys uploaded, in completion order
    pub uploaded: Vec<String>,
}

impl PublishSummary {
    pub fn count(&self) -> usize {
        self.uploaded.len()
    }
}

/// Publishes a folder of static files into a bucket
pub struct SitePublisher {
    store: Arc<dyn ObjectStore>,
    bucket: String,
    acl: ObjectAcl,
    scanner: FolderScanner,
    concurrency: usize,
    show_progress: bool,
}

impl SitePublisher {
    pub fn new(store: Arc<dyn ObjectStore>, bucket: impl Into<String>) -> Self {
        Self {
            store,
            bucket: bucket.into(),
            acl: ObjectAcl::PublicRead,
            scanner: FolderScanner::new(),
            concurrency: 8,
            show_progress: false,
        }
    }

    pub fn with_acl(mut self, acl: ObjectAcl) -> Self {
        self.acl = acl;
        self
    }

    pub fn with_scanner(mut self, scanner: FolderScanner) -> Self {
        self.scanner = scanner;
        self
    }

    /// Cap on concurrent puts, keeping the store's rate limits in reach
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Show an upload progress bar
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Scan `root` and upload every regular file found under it.
    ///
    /// Puts run concurrently up to the configured cap; each file is
    /// uploaded at least once, with no ordering guarantee across files.
    /// The first failure cancels the puts still in flight and is returned
    /// as `PublishError::UploadFailed`.
    pub async fn publish_folder(&self, root: &Path) -> Result<PublishSummary> {
        let files = self.scanner.scan(root)?;
        if files.is_empty() {
            info!(root = %root.display(), "Nothing to publish");
            return Ok(PublishSummary::default());
        }

        let mut requests = Vec::with_capacity(files.len());
        for file in &files {
            let key = upload_key(root, file)?;
            let content_type = mime_guess::from_path(file).first_raw().map(str::to_string);
            debug!(key = %key, content_type = ?content_type, "Queued for upload");
            requests.push(PutRequest {
                bucket: self.bucket.clone(),
                key,
                source: file.clone(),
                content_type,
                acl: self.acl,
            });
        }

        let progress = if self.show_progress {
            let pb = ProgressBar::new(requests.len() as u64);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{elapsed_precise}] {pos}/{len} {msg}")
                    .unwrap(),
            );
            pb
        } else {
            ProgressBar::hidden()
        };

        let mut puts = futures_util::stream::iter(requests.into_iter().map(|request| {
            let store = Arc::clone(&self.store);
            async move {
                match store.put_object(&request).await {
                    Ok(()) => Ok(request.key),
                    Err(source) => Err(PublishError::UploadFailed {
                        key: request.key,
                        source,
                    }),
                }
            }
        }))
        .buffer_unordered(self.concurrency);

        let mut summary = PublishSummary::default();
        while let Some(result) = puts.next().await {
            let key = result?;
            progress.inc(1);
            progress.set_message(key.clone());
            summary.uploaded.push(key);
        }

        progress.finish_and_clear();
        info!(
            bucket = %self.bucket,
            count = summary.count(),
            "Publish complete"
        );
        Ok(summary)
    }
}
