//! CLI error handling tests for stylecfg.
//!
//! These tests verify that invalid arguments and configurations produce
//! appropriate error messages and exit codes.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("test")
        .join("fixtures")
        .join("config")
}

fn stylecfg() -> Command {
    let mut cmd = Command::cargo_bin("stylecfg").expect("stylecfg binary should exist");
    cmd.env_remove("STYLECFG_CONFIG")
        .env_remove("STYLECFG_CONFIG_DIR")
        .env_remove("RUST_LOG")
        .env("STYLECFG_LOG", "off");
    cmd
}

// ============================================================================
// Invalid Arguments
// ============================================================================

#[test]
fn unknown_command_exits_args_error() {
    stylecfg()
        .arg("nonexistent-command")
        .assert()
        .code(10)
        .stderr(predicate::str::contains("error"));
}

#[test]
fn match_without_paths_exits_args_error() {
    stylecfg()
        .arg("match")
        .assert()
        .code(10)
        .stderr(predicate::str::contains("error"));
}

#[test]
fn invalid_format_exits_args_error() {
    stylecfg()
        .args(["resolve", "--format", "xml"])
        .assert()
        .code(10)
        .stderr(predicate::str::contains("xml"));
}

#[test]
fn help_still_exits_cleanly() {
    stylecfg()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("resolve"));
}

// ============================================================================
// Invalid Configuration
// ============================================================================

#[test]
fn invalid_mode_exits_config_invalid() {
    stylecfg()
        .args(["resolve", "--config"])
        .arg(fixtures_dir().join("invalid_mode.json"))
        .assert()
        .code(11)
        .stderr(predicate::str::contains("mode").and(predicate::str::contains("bogus")));
}

#[test]
fn validate_reports_field_path() {
    let output = stylecfg()
        .args(["validate", "--config"])
        .arg(fixtures_dir().join("invalid_screen.yaml"))
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(11));
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["valid"], false);
    assert_eq!(report["error"]["field"], "theme.extend.screens.tv");
    assert_eq!(report["error"]["kind"], "ERR_CONFIG_INVALID");
    assert_eq!(report["error"]["code"], 65);
}

#[test]
fn missing_config_exits_not_found() {
    stylecfg()
        .args(["resolve", "--config", "/nonexistent/style.config.json"])
        .assert()
        .code(12)
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn unsupported_extension_is_invalid() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("tailwind.config.js");
    fs::write(&path, "module.exports = {};").unwrap();
    stylecfg()
        .args(["validate", "--config"])
        .arg(&path)
        .assert()
        .code(11)
        .stderr(predicate::str::contains("Unsupported config format"));
}

#[test]
fn malformed_json_is_invalid() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("style.config.json");
    fs::write(&path, "{ \"mode\": ").unwrap();
    stylecfg()
        .args(["resolve", "--config"])
        .arg(&path)
        .assert()
        .code(11)
        .stderr(predicate::str::contains("Invalid JSON"));
}
