use colored::Colorize;
use nebulis_cloud::split_domain;
use nebulis_core::Site;
use std::path::Path;

/// Parse checks already happened during load; report what was found.
pub fn handle(site: &Site, site_file: &Path) -> anyhow::Result<()> {
    println!("{}", format!("Site file: {}", site_file.display()).blue());
    println!();
    println!("  name:    {}", site.name.cyan());
    println!("  domain:  {}", site.domain.cyan());

    let parts = split_domain(&site.domain)?;
    if parts.subdomain.is_empty() {
        println!("  zone:    {} (apex)", parts.parent_domain);
    } else {
        println!(
            "  zone:    {} (subdomain '{}')",
            parts.parent_domain, parts.subdomain
        );
    }

    println!("  bucket:  {}", site.bucket_name());
    println!("  webapp:  {}", site.webapp.path.display());
    println!("  output:  {}", site.webapp.output);
    if let Some(pm) = &site.webapp.package_manager {
        println!("  package manager: {}", pm);
    }
    if !site.webapp.env.is_empty() {
        println!("  build env: {} variables", site.webapp.env.len());
    }
    println!(
        "  cache ttl: {}/{}/{} (min/default/max)",
        site.cache.min_ttl, site.cache.default_ttl, site.cache.max_ttl
    );

    println!();
    println!("{}", "Configuration is valid ✓".green());
    Ok(())
}
