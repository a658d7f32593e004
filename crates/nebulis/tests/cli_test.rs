use assert_cmd::Command;
use predicates::prelude::*;

const SITE_KDL: &str = r#"
site "dashboard" {
    domain "app.example.com"

    webapp {
        path "./webapp"
    }
}
"#;

#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("nebulis").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("deploy"))
        .stdout(predicate::str::contains("build"))
        .stdout(predicate::str::contains("publish"))
        .stdout(predicate::str::contains("validate"));
}

#[test]
fn test_cli_version() {
    let mut cmd = Command::cargo_bin("nebulis").unwrap();
    cmd.arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("nebulis"));
}

#[test]
fn test_deploy_help() {
    let mut cmd = Command::cargo_bin("nebulis").unwrap();
    cmd.arg("deploy")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--yes"))
        .stdout(predicate::str::contains("--skip-build"));
}

#[test]
fn test_invalid_command() {
    let mut cmd = Command::cargo_bin("nebulis").unwrap();
    cmd.arg("invalid-command").assert().failure();
}

#[test]
fn test_validate_without_site_file() {
    let temp_dir = tempfile::tempdir().unwrap();
    let mut cmd = Command::cargo_bin("nebulis").unwrap();
    cmd.current_dir(temp_dir.path())
        .arg("validate")
        .assert()
        .failure();
}

#[test]
fn test_validate_with_site_file() {
    let temp_dir = tempfile::tempdir().unwrap();
    std::fs::write(temp_dir.path().join("site.kdl"), SITE_KDL).unwrap();

    let mut cmd = Command::cargo_bin("nebulis").unwrap();
    cmd.current_dir(temp_dir.path())
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("app.example.com"))
        .stdout(predicate::str::contains("example.com."));
}

#[test]
fn test_validate_with_config_flag() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config = temp_dir.path().join("custom.kdl");
    std::fs::write(&config, SITE_KDL).unwrap();

    let mut cmd = Command::cargo_bin("nebulis").unwrap();
    cmd.arg("validate")
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("dashboard"));
}

#[test]
fn test_validate_rejects_invalid_domain() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config = temp_dir.path().join("site.kdl");
    std::fs::write(&config, "site \"t\" {\n    domain \"localhost\"\n}\n").unwrap();

    let mut cmd = Command::cargo_bin("nebulis").unwrap();
    cmd.arg("validate")
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("No TLD found"));
}

#[test]
fn test_deploy_without_yes_prints_plan() {
    let temp_dir = tempfile::tempdir().unwrap();
    std::fs::write(temp_dir.path().join("site.kdl"), SITE_KDL).unwrap();

    // without --yes nothing is built or provisioned, only the plan prints
    let mut cmd = Command::cargo_bin("nebulis").unwrap();
    cmd.current_dir(temp_dir.path())
        .arg("deploy")
        .assert()
        .success()
        .stdout(predicate::str::contains("--yes"));
}
