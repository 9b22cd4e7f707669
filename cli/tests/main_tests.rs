//! # sqlci CLI Main Integration Tests
//!
//! File: cli/tests/main_tests.rs
//!
//! Top-level behaviour of the binary: `--help`, `--version`, bad input.
//!

mod common;
use common::*;
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_help_lists_subcommands() {
    let sandbox = tempdir().unwrap();
    sqlci_cmd(sandbox.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("render"))
        .stdout(predicate::str::contains("package-name"));
}

#[test]
fn test_version_flag() {
    let sandbox = tempdir().unwrap();
    sqlci_cmd(sandbox.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_invalid_config_is_reported() {
    let sandbox = tempdir().unwrap();
    std::fs::write(
        sandbox.path().join(".sqlci.toml"),
        "[interpreter]\nexecutable = \"pwsh\"\n",
    )
    .unwrap();

    sqlci_cmd(sandbox.path())
        .args(["render", "--", "-Operation", "Build"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse TOML"));
}
