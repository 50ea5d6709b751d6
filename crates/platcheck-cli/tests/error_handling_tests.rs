//! Tests for error handling, suggestions, and exit codes.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn missing_settings_file_exits_not_found() {
    let mut cmd = Command::cargo_bin("platcheck").unwrap();
    cmd.args(["check", "--settings", "/absolutely/does/not/exist.toml"])
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("Settings file not found"))
        .stderr(predicate::str::contains("--settings"));
}

#[test]
fn unparseable_required_version_exits_user_error() {
    let temp = TempDir::new().unwrap();
    let settings = temp.path().join("platcheck.toml");
    fs::write(
        &settings,
        r#"
[platform]
version = "2022.3"
build   = "not-a-build"

[compiler]
source-level = "17"
target-level = "17"
"#,
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("platcheck").unwrap();
    cmd.args(["check", "--settings"])
        .arg(&settings)
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("platform-build"))
        .stderr(predicate::str::contains("not-a-build"));
}

#[test]
fn malformed_settings_toml_exits_configuration_error() {
    let temp = TempDir::new().unwrap();
    let settings = temp.path().join("platcheck.toml");
    fs::write(&settings, "[platform\nversion = broken").unwrap();

    let mut cmd = Command::cargo_bin("platcheck").unwrap();
    cmd.args(["check", "--settings"])
        .arg(&settings)
        .assert()
        .failure()
        .code(4)
        .stderr(predicate::str::contains("Suggestions:"));
}

#[test]
fn strict_failure_suggests_requirements_command() {
    let temp = TempDir::new().unwrap();
    let settings = temp.path().join("platcheck.toml");
    fs::write(
        &settings,
        format!(
            r#"
[platform]
version = "2022.3"
build   = "223.8836.41"

[compiler]
source-level = "17"
target-level = "21"

[paths]
download-dir = "{0}/cache"
legacy-download-dir = "{0}/legacy"
"#,
            temp.path().display()
        ),
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("platcheck").unwrap();
    cmd.args(["check", "--strict", "--settings"])
        .arg(&settings)
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("platcheck requirements"));
}

#[test]
fn missing_descriptor_dir_exits_configuration_error() {
    let temp = TempDir::new().unwrap();
    let settings = temp.path().join("platcheck.toml");
    fs::write(
        &settings,
        r#"
[platform]
version = "2022.3"
build   = "223.8836.41"

[compiler]
source-level = "17"
target-level = "17"
"#,
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("platcheck").unwrap();
    cmd.args(["check", "--settings"])
        .arg(&settings)
        .args(["--descriptor-dir", "/absolutely/does/not/exist"])
        .assert()
        .failure()
        .code(4)
        .stderr(predicate::str::contains("discover"));
}

#[test]
fn explicit_missing_config_file_exits_configuration_error() {
    let mut cmd = Command::cargo_bin("platcheck").unwrap();
    cmd.args([
        "requirements",
        "--config",
        "/absolutely/does/not/exist.toml",
    ])
    .assert()
    .failure()
    .code(4)
    .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn unknown_subcommand_exits_two() {
    let mut cmd = Command::cargo_bin("platcheck").unwrap();
    cmd.arg("frobnicate").assert().failure().code(2);
}
