use crate::builder::PackageManager;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Duration;

/// Spinner covering the two build phases (install, build)
pub struct BuildProgress {
    progress_bar: ProgressBar,
    site_name: String,
}

impl BuildProgress {
    pub fn new(site_name: &str) -> Self {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} [{elapsed_precise}] {msg}")
                .unwrap(),
        );
        pb.enable_steady_tick(Duration::from_millis(120));
        pb.set_message(format!("Preparing {} build...", site_name));

        Self {
            progress_bar: pb,
            site_name: site_name.to_string(),
        }
    }

    pub fn installing(&self, pm: PackageManager) {
        self.progress_bar
            .set_message(format!("{}: installing dependencies ({})...", self.site_name, pm));
    }

    pub fn building(&self, pm: PackageManager) {
        self.progress_bar
            .set_message(format!("{}: running {} build...", self.site_name, pm));
    }

    pub fn finish_success(&self, output: &Path) {
        self.progress_bar
            .finish_with_message(format!("Build output ready: {} ✓", output.display()));
    }

    pub fn finish_error(&self, error: &str) {
        self.progress_bar
            .finish_with_message(format!("Build failed: {}", error));
    }
}
