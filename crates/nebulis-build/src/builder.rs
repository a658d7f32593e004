//! Webapp build execution

use crate::error::{BuildError, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info};

/// Environment variables handed to the build get this prefix so the
/// bundler exposes them to the app.
const DEFAULT_ENV_PREFIX: &str = "REACT_APP_";

/// JavaScript package manager driving the build
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageManager {
    Npm,
    Yarn,
    Pnpm,
}

impl PackageManager {
    /// Detect the package manager from the lockfile present in `app_dir`,
    /// defaulting to npm.
    pub fn detect(app_dir: &Path) -> Self {
        if app_dir.join("yarn.lock").exists() {
            PackageManager::Yarn
        } else if app_dir.join("pnpm-lock.yaml").exists() {
            PackageManager::Pnpm
        } else {
            PackageManager::Npm
        }
    }

    pub fn command(&self) -> &'static str {
        match self {
            PackageManager::Npm => "npm",
            PackageManager::Yarn => "yarn",
            PackageManager::Pnpm => "pnpm",
        }
    }

    fn install_args(&self) -> &'static [&'static str] {
        &["install"]
    }

    fn build_args(&self) -> &'static [&'static str] {
        &["run", "build"]
    }
}

impl std::fmt::Display for PackageManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.command())
    }
}

/// Runs `install` then `run build` in the webapp directory
pub struct WebappBuilder {
    app_dir: PathBuf,
    output_dir: String,
    env: HashMap<String, String>,
    env_prefix: String,
    package_manager: Option<PackageManager>,
}

impl WebappBuilder {
    pub fn new(app_dir: impl Into<PathBuf>) -> Self {
        Self {
            app_dir: app_dir.into(),
            output_dir: "build".to_string(),
            env: HashMap::new(),
            env_prefix: DEFAULT_ENV_PREFIX.to_string(),
            package_manager: None,
        }
    }

    /// Output directory, relative to the webapp directory
    pub fn with_output_dir(mut self, output_dir: impl Into<String>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    /// Variables exposed to the build (prefix applied automatically)
    pub fn with_env(mut self, env: HashMap<String, String>) -> Self {
        self.env = env;
        self
    }

    /// Force a package manager instead of lockfile detection
    pub fn with_package_manager(mut self, pm: PackageManager) -> Self {
        self.package_manager = Some(pm);
        self
    }

    /// Resolved package manager (override or lockfile detection)
    pub fn package_manager(&self) -> PackageManager {
        self.package_manager
            .unwrap_or_else(|| PackageManager::detect(&self.app_dir))
    }

    /// Check the webapp directory exists before spawning anything
    pub fn check_app_dir(&self) -> Result<()> {
        if !self.app_dir.is_dir() {
            return Err(BuildError::AppDirNotFound(self.app_dir.clone()));
        }
        Ok(())
    }

    /// Install dependencies
    pub async fn install(&self) -> Result<()> {
        let pm = self.package_manager();
        self.run_step(pm, "install", pm.install_args(), &[]).await
    }

    /// Run the build script with the prefixed environment
    pub async fn run_build(&self) -> Result<()> {
        let pm = self.package_manager();
        self.run_step(pm, "build", pm.build_args(), &self.build_env())
            .await
    }

    /// Output directory, verified to exist after a successful build
    pub fn output_path(&self) -> Result<PathBuf> {
        let output = self.app_dir.join(&self.output_dir);
        if !output.is_dir() {
            return Err(BuildError::OutputMissing(output));
        }
        Ok(output)
    }

    /// Run the full build and return the populated output directory.
    pub async fn build(&self) -> Result<PathBuf> {
        self.check_app_dir()?;
        info!(
            app_dir = %self.app_dir.display(),
            package_manager = %self.package_manager(),
            "Building webapp"
        );

        self.install().await?;
        self.run_build().await?;

        let output = self.output_path()?;
        info!(output = %output.display(), "Webapp build complete");
        Ok(output)
    }

    /// Prefixed environment as handed to the build process
    fn build_env(&self) -> Vec<(String, String)> {
        self.env
            .iter()
            .map(|(name, value)| (format!("{}{}", self.env_prefix, name), value.clone()))
            .collect()
    }

    async fn run_step(
        &self,
        pm: PackageManager,
        step: &str,
        args: &[&str],
        env: &[(String, String)],
    ) -> Result<()> {
        let mut cmd = Command::new(pm.command());
        cmd.args(args)
            .current_dir(&self.app_dir)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        for (name, value) in env {
            cmd.env(name, value);
        }

        debug!("Running: {} {}", pm.command(), args.join(" "));

        let output = cmd.output().await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                BuildError::PackageManagerNotFound(pm.command().to_string())
            } else {
                BuildError::Io(e)
            }
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(BuildError::BuildFailed {
                step: format!("{} {}", pm.command(), step),
                message: stderr.trim().to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_detect_yarn() {
        let temp_dir = tempdir().unwrap();
        fs::write(temp_dir.path().join("yarn.lock"), "").unwrap();
        assert_eq!(PackageManager::detect(temp_dir.path()), PackageManager::Yarn);
    }

    #[test]
    fn test_detect_pnpm() {
        let temp_dir = tempdir().unwrap();
        fs::write(temp_dir.path().join("pnpm-lock.yaml"), "").unwrap();
        assert_eq!(PackageManager::detect(temp_dir.path()), PackageManager::Pnpm);
    }

    #[test]
    fn test_detect_defaults_to_npm() {
        let temp_dir = tempdir().unwrap();
        assert_eq!(PackageManager::detect(temp_dir.path()), PackageManager::Npm);
    }

    #[test]
    fn test_detect_yarn_wins_over_pnpm() {
        let temp_dir = tempdir().unwrap();
        fs::write(temp_dir.path().join("yarn.lock"), "").unwrap();
        fs::write(temp_dir.path().join("pnpm-lock.yaml"), "").unwrap();
        assert_eq!(PackageManager::detect(temp_dir.path()), PackageManager::Yarn);
    }

    #[test]
    fn test_build_env_is_prefixed() {
        let mut env = HashMap::new();
        env.insert("API_URL".to_string(), "https://api.example.com".to_string());

        let builder = WebappBuilder::new("/tmp/webapp").with_env(env);
        let build_env = builder.build_env();

        assert_eq!(build_env.len(), 1);
        assert_eq!(build_env[0].0, "REACT_APP_API_URL");
        assert_eq!(build_env[0].1, "https://api.example.com");
    }

    #[test]
    fn test_output_path_missing() {
        let temp_dir = tempdir().unwrap();
        let builder = WebappBuilder::new(temp_dir.path());
        let err = builder.output_path().unwrap_err();
        assert!(matches!(err, BuildError::OutputMissing(_)));
    }

    #[test]
    fn test_output_path_custom_dir() {
        let temp_dir = tempdir().unwrap();
        fs::create_dir(temp_dir.path().join("dist")).unwrap();

        let builder = WebappBuilder::new(temp_dir.path()).with_output_dir("dist");
        assert_eq!(builder.output_path().unwrap(), temp_dir.path().join("dist"));
    }

    #[tokio::test]
    async fn test_build_missing_app_dir() {
        let temp_dir = tempdir().unwrap();
        let missing = temp_dir.path().join("webapp");

        let err = WebappBuilder::new(&missing).build().await.unwrap_err();
        assert!(matches!(err, BuildError::AppDirNotFound(_)));
    }
}
