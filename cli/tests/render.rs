//! # sqlci Render Integration Tests
//!
//! File: cli/tests/render.rs
//!
//! `sqlci render` prints the command line without staging or running anything,
//! which makes it the place to check escaping and interpreter resolution end
//! to end.
//!

mod common;
use common::*;
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
#[cfg(unix)]
fn test_render_escapes_parameters() {
    let sandbox = tempdir().unwrap();
    sqlci_cmd(sandbox.path())
        .env("PS_HOME", "/opt/pwsh/pwsh")
        .args([
            "render",
            "--workspace",
            "/work",
            "--",
            "-Flag",
            "value with space",
            "plain",
        ])
        .assert()
        .success()
        .stdout(
            "\"/opt/pwsh/pwsh\" -NonInteractive -ExecutionPolicy Bypass \
             -File \"/work/PowerShell/SqlChangeAutomationRunner.ps1\" -Verbose \
             -Flag \"value with space\" plain -RequiredProductVersion Latest\n",
        );
    assert!(!sandbox.path().join("PowerShell").exists());
}

#[test]
fn test_render_defaults_to_windows_powershell() {
    let sandbox = tempdir().unwrap();
    sqlci_cmd(sandbox.path())
        .args(["render", "--", "-Operation", "Build"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            r#""C:\Windows\System32\WindowsPowerShell\v1.0\powershell.exe" -NonInteractive"#,
        ));
}

#[test]
fn test_render_uses_configured_interpreter_unless_overridden() {
    let sandbox = tempdir().unwrap();
    std::fs::write(
        sandbox.path().join(".sqlci.toml"),
        "[interpreter]\npath = \"/usr/local/bin/pwsh\"\n",
    )
    .unwrap();

    sqlci_cmd(sandbox.path())
        .args(["render"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("\"/usr/local/bin/pwsh\""));

    sqlci_cmd(sandbox.path())
        .env("PS_HOME", "/from/env/pwsh")
        .args(["render"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("\"/from/env/pwsh\""));
}

#[test]
fn test_render_appends_product_version() {
    let sandbox = tempdir().unwrap();
    sqlci_cmd(sandbox.path())
        .args(["render", "--product-version", "4.2.21", "--", "-Operation", "Sync"])
        .assert()
        .success()
        .stdout(predicate::str::ends_with(
            "-Operation Sync -RequiredProductVersion 4.2.21\n",
        ));
}

#[test]
fn test_render_escapes_embedded_quotes() {
    let sandbox = tempdir().unwrap();
    sqlci_cmd(sandbox.path())
        .args(["render", "--", "-Message", r#"say "hi""#])
        .assert()
        .success()
        .stdout(predicate::str::ends_with(
            "-Message \"say \\\\\\\"hi\\\\\\\"\" -RequiredProductVersion Latest\n",
        ));
}
