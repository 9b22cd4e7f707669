//! # sqlci Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//!
//! Shared helpers for the integration tests in `cli/tests/`. Each test file
//! declares `mod common;` and pulls in what it needs.
//!

// Different test files use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::path::Path;

/// An `assert_cmd::Command` for the compiled `sqlci` binary, isolated from
/// the developer's own configuration.
///
/// The command runs in `sandbox` (so no project `.sqlci.toml` above the
/// checkout is picked up), with the user config directory pointed inside it
/// and `PS_HOME` cleared.
pub fn sqlci_cmd(sandbox: &Path) -> Command {
    let mut cmd = Command::cargo_bin("sqlci").expect("Failed to find sqlci binary for testing");
    cmd.current_dir(sandbox)
        .env("XDG_CONFIG_HOME", sandbox.join(".config"))
        .env("HOME", sandbox)
        .env_remove("PS_HOME")
        .env_remove("RUST_LOG");
    cmd
}

/// Writes a POSIX shell stand-in for PowerShell into `dir`.
///
/// It prints the integration marker and each argument it received on its own
/// line, then exits with `$FAKE_EXIT_CODE` (default 0).
#[cfg(unix)]
pub fn fake_interpreter(dir: &Path) -> std::path::PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join("fake-pwsh");
    std::fs::write(
        &path,
        "#!/bin/sh\n\
         printf '%s\\n' \"marker=$REDGATE_FUR_ENVIRONMENT\"\n\
         for arg in \"$@\"; do printf '%s\\n' \"arg=$arg\"; done\n\
         exit \"${FAKE_EXIT_CODE:-0}\"\n",
    )
    .expect("Failed to write fake interpreter");
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
        .expect("Failed to make fake interpreter executable");
    path
}
