use super::build;
use colored::Colorize;
use nebulis_cloud::{
    BucketConfig, CertificateConfig, DistributionConfig, DnsZones, ObjectStore, RecordKind,
    RecordSpec, split_domain,
};
use nebulis_cloud_aws::{AcmCertificates, CloudFrontCdn, Route53Dns, S3ObjectStore};
use nebulis_core::Site;
use nebulis_publish::SitePublisher;
use std::path::Path;
use std::sync::Arc;

/// Full pipeline: build, bucket, upload, certificate, distribution, DNS.
///
/// Every step aborts the remainder on error; downstream resources assume
/// the upload completed in full.
pub async fn handle(site: &Site, base_dir: &Path, skip_build: bool, yes: bool) -> anyhow::Result<()> {
    println!(
        "{}",
        format!("Deploying '{}' to https://{}", site.name, site.domain)
            .blue()
            .bold()
    );

    // Splitting also rejects malformed domains before anything runs
    let parts = split_domain(&site.domain)?;

    if !yes {
        println!();
        println!("{}", "Planned steps:".bold());
        if !skip_build {
            println!("  1. Build webapp at {}", site.webapp.path.display());
        }
        println!("  2. Ensure website bucket '{}'", site.bucket_name());
        println!("  3. Upload build output");
        println!("  4. Request certificate for {} (us-east-1)", site.domain);
        println!("  5. Create CloudFront distribution");
        println!(
            "  6. Upsert alias record in zone '{}'",
            parts.parent_domain
        );
        println!();
        println!("Run again with --yes to apply");
        return Ok(());
    }

    // 1. Build
    let output = if skip_build {
        build::output_dir(site, base_dir)
    } else {
        build::handle(site, base_dir).await?
    };

    // 2. Website bucket
    println!();
    println!("{} {}", "▶".green(), "Website bucket".bold());
    let store = Arc::new(S3ObjectStore::from_env().await);
    let endpoints = store
        .ensure_bucket(&BucketConfig::website(site.bucket_name()))
        .await?;
    println!("  {} {}", "✓".green(), endpoints.website_endpoint);

    // 3. Upload
    println!();
    println!("{} {}", "▶".green(), "Upload".bold());
    let publisher =
        SitePublisher::new(Arc::clone(&store) as Arc<dyn ObjectStore>, site.bucket_name())
            .with_progress(true);
    let summary = publisher.publish_folder(&output).await?;
    println!("  {} {} objects", "✓".green(), summary.count());

    // 4. Certificate
    println!();
    println!("{} {}", "▶".green(), "Certificate".bold());
    let dns = Route53Dns::from_env().await;
    let zone_id = dns.resolve_zone(&parts.parent_domain).await?;

    let acm = AcmCertificates::from_env().await;
    let cert_config = CertificateConfig::new(&site.domain);
    let arn = acm.request(&cert_config).await?;
    let validation = acm
        .validation_record(&arn, &zone_id, cert_config.validation_ttl)
        .await?;
    dns.upsert_record(&validation).await?;
    println!("  waiting for validation...");
    acm.wait_issued(&arn).await?;
    println!("  {} {}", "✓".green(), arn);

    // 5. Distribution
    println!();
    println!("{} {}", "▶".green(), "Distribution".bold());
    let mut dist_config =
        DistributionConfig::single_page_app(&site.domain, &endpoints.website_endpoint, &arn);
    dist_config.min_ttl = site.cache.min_ttl;
    dist_config.default_ttl = site.cache.default_ttl;
    dist_config.max_ttl = site.cache.max_ttl;
    if let Some(logs_bucket) = &site.logs_bucket {
        dist_config = dist_config.with_logging(format!("{}.s3.amazonaws.com", logs_bucket));
    }

    let cdn = CloudFrontCdn::from_env().await;
    let distribution = cdn.create_distribution(&dist_config).await?;
    println!("  {} {}", "✓".green(), distribution.domain_name);

    // 6. Alias record
    println!();
    println!("{} {}", "▶".green(), "DNS alias".bold());
    let alias = RecordSpec {
        zone_id,
        name: site.domain.clone(),
        kind: RecordKind::Alias {
            target: distribution.domain_name.clone(),
            target_zone_id: distribution.hosted_zone_id.clone(),
            evaluate_target_health: true,
        },
        ttl: None,
    };
    dns.upsert_record(&alias).await?;
    println!("  {} {} -> {}", "✓".green(), site.domain, distribution.domain_name);

    println!();
    println!(
        "{}",
        format!("Deployed: https://{}", site.domain).green().bold()
    );
    Ok(())
}
