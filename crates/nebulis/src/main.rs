mod commands;

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "nebulis")]
#[command(about = "Deploy static single-page apps to AWS", long_about = None)]
struct Cli {
    /// Path to the site file (skips discovery)
    #[arg(short, long, env = "NEBULIS_CONFIG_PATH", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the webapp and provision the full site
    Deploy {
        /// Upload the existing build output without rebuilding
        #[arg(long)]
        skip_build: bool,
        /// Apply without the confirmation summary
        #[arg(short, long)]
        yes: bool,
    },
    /// Build the webapp only
    Build,
    /// Upload the build output to the website bucket
    Publish,
    /// Validate the site file
    Validate,
    /// Show version information
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt::init();

    // Version needs no site file
    if matches!(cli.command, Commands::Version) {
        println!("nebulis {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let site_file = match &cli.config {
        Some(path) => path.clone(),
        None => nebulis_core::find_site_file()?,
    };
    let site = nebulis_core::load_site(&site_file)?;
    tracing::debug!(site = %site.name, file = %site_file.display(), "Loaded site file");
    let base_dir = site_file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."))
        .to_path_buf();

    match cli.command {
        Commands::Deploy { skip_build, yes } => {
            commands::deploy::handle(&site, &base_dir, skip_build, yes).await
        }
        Commands::Build => commands::build::handle(&site, &base_dir).await.map(|_| ()),
        Commands::Publish => commands::publish::handle(&site, &base_dir).await,
        Commands::Validate => commands::validate::handle(&site, &site_file),
        Commands::Version => Ok(()),
    }
}
