use colored::Colorize;
use nebulis_build::{BuildProgress, PackageManager, WebappBuilder};
use nebulis_core::Site;
use std::path::{Path, PathBuf};

/// Build the webapp and return the populated output directory
pub async fn handle(site: &Site, base_dir: &Path) -> anyhow::Result<PathBuf> {
    let app_dir = base_dir.join(&site.webapp.path);

    let mut builder = WebappBuilder::new(&app_dir)
        .with_output_dir(&site.webapp.output)
        .with_env(site.webapp.env.clone());
    if let Some(pm) = &site.webapp.package_manager {
        builder = builder.with_package_manager(parse_package_manager(pm)?);
    }

    builder.check_app_dir()?;
    let pm = builder.package_manager();

    println!(
        "{}",
        format!("Building {} ({})", site.name, app_dir.display()).blue()
    );

    let progress = BuildProgress::new(&site.name);

    progress.installing(pm);
    if let Err(e) = builder.install().await {
        progress.finish_error(&e.to_string());
        return Err(e.into());
    }

    progress.building(pm);
    if let Err(e) = builder.run_build().await {
        progress.finish_error(&e.to_string());
        return Err(e.into());
    }

    let output = builder.output_path()?;
    progress.finish_success(&output);
    Ok(output)
}

fn parse_package_manager(name: &str) -> anyhow::Result<PackageManager> {
    match name {
        "npm" => Ok(PackageManager::Npm),
        "yarn" => Ok(PackageManager::Yarn),
        "pnpm" => Ok(PackageManager::Pnpm),
        other => Err(anyhow::anyhow!(
            "Unknown package manager '{}' (expected npm, yarn or pnpm)",
            other
        )),
    }
}

/// Output directory without building, for --skip-build runs
pub fn output_dir(site: &Site, base_dir: &Path) -> PathBuf {
    base_dir.join(&site.webapp.path).join(&site.webapp.output)
}
