use super::build;
use colored::Colorize;
use nebulis_cloud::{BucketConfig, ObjectStore};
use nebulis_cloud_aws::S3ObjectStore;
use nebulis_core::Site;
use nebulis_publish::SitePublisher;
use std::path::Path;
use std::sync::Arc;

/// Upload the existing build output to the website bucket
pub async fn handle(site: &Site, base_dir: &Path) -> anyhow::Result<()> {
    let output = build::output_dir(site, base_dir);

    println!(
        "{}",
        format!("Publishing {} to bucket '{}'", site.name, site.bucket_name()).blue()
    );

    let store = Arc::new(S3ObjectStore::from_env().await);
    let endpoints = store
        .ensure_bucket(&BucketConfig::website(site.bucket_name()))
        .await?;
    println!("  {} bucket ready: {}", "✓".green(), endpoints.name);

    let publisher = SitePublisher::new(store, site.bucket_name()).with_progress(true);
    let summary = publisher.publish_folder(&output).await?;

    println!(
        "  {} {} objects uploaded to http://{}",
        "✓".green(),
        summary.count(),
        endpoints.website_endpoint
    );
    Ok(())
}
