//! # sqlci Embedded Script Resources (`common::resources`)
//!
//! File: cli/src/common/resources.rs
//!
//! ## Overview
//!
//! The PowerShell scripts that drive SQL Change Automation are compiled into
//! the binary with `include_bytes!` and written out to the build workspace
//! right before the interpreter is launched. Each resource is addressed by its
//! relative name (e.g. `PowerShell/SqlCi.ps1`), which is also the path it is
//! staged to below the working directory.
//!
//! Staging overwrites: running the same invocation twice leaves the workspace
//! byte-for-byte identical to a single run.
//!
//! ## Usage
//!
//! ```rust
//! let bundle = ResourceBundle::embedded();
//! let runner = bundle.stage(workspace, PRIMARY_SCRIPT)?;
//! ```
//!
use crate::core::error::SqlciError;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// The script handed to the interpreter with `-File`.
pub const PRIMARY_SCRIPT: &str = "PowerShell/SqlChangeAutomationRunner.ps1";

/// Everything a cmdlet run needs staged, primary script first.
pub const REQUIRED_RESOURCES: [&str; 3] = [
    PRIMARY_SCRIPT,
    "PowerShell/PowershellGallery.ps1",
    "PowerShell/SqlCi.ps1",
];

/// A named, read-only blob compiled into the binary.
#[derive(Debug, Clone, Copy)]
pub struct EmbeddedResource {
    pub name: &'static str,
    pub bytes: &'static [u8],
}

macro_rules! embed {
    ($name:literal) => {
        EmbeddedResource {
            name: $name,
            bytes: include_bytes!(concat!(env!("CARGO_MANIFEST_DIR"), "/resources/", $name)),
        }
    };
}

static EMBEDDED: &[EmbeddedResource] = &[
    embed!("PowerShell/SqlChangeAutomationRunner.ps1"),
    embed!("PowerShell/PowershellGallery.ps1"),
    embed!("PowerShell/SqlCi.ps1"),
];

/// A lookup table of embedded resources.
#[derive(Debug, Clone, Copy)]
pub struct ResourceBundle {
    resources: &'static [EmbeddedResource],
}

impl ResourceBundle {
    /// The scripts shipped inside this binary.
    pub fn embedded() -> Self {
        Self {
            resources: EMBEDDED,
        }
    }

    #[cfg(test)]
    pub fn from_static(resources: &'static [EmbeddedResource]) -> Self {
        Self { resources }
    }

    pub fn get(&self, name: &str) -> Option<&'static [u8]> {
        self.resources
            .iter()
            .find(|resource| resource.name == name)
            .map(|resource| resource.bytes)
    }

    /// Writes the resource `name` to `working_dir/name` and returns that path.
    ///
    /// Intermediate directories are created. An existing file is replaced.
    ///
    /// # Errors
    ///
    /// `SqlciError::ResourceStaging` when `name` is not in the bundle or the
    /// destination cannot be written.
    pub fn stage(&self, working_dir: &Path, name: &str) -> Result<PathBuf, SqlciError> {
        let staging_error = |source: io::Error| SqlciError::ResourceStaging {
            resource: name.to_string(),
            source,
        };

        let bytes = self.get(name).ok_or_else(|| {
            staging_error(io::Error::new(
                io::ErrorKind::NotFound,
                "resource is not part of the embedded bundle",
            ))
        })?;

        let destination = working_dir.join(name);
        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent).map_err(staging_error)?;
        }
        fs::write(&destination, bytes).map_err(staging_error)?;

        debug!(
            "Staged resource {} ({} bytes) to {}",
            name,
            bytes.len(),
            destination.display()
        );
        Ok(destination)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_required_resources_are_embedded() {
        let bundle = ResourceBundle::embedded();
        for name in REQUIRED_RESOURCES {
            let bytes = bundle.get(name).unwrap_or_default();
            assert!(!bytes.is_empty(), "{} should be embedded", name);
        }
    }

    #[test]
    fn test_stage_copies_bytes_and_creates_dirs() {
        let workspace = tempdir().unwrap();
        let bundle = ResourceBundle::embedded();

        let staged = bundle.stage(workspace.path(), PRIMARY_SCRIPT).unwrap();

        assert_eq!(staged, workspace.path().join(PRIMARY_SCRIPT));
        assert_eq!(fs::read(&staged).unwrap(), bundle.get(PRIMARY_SCRIPT).unwrap());
    }

    #[test]
    fn test_stage_overwrites_previous_content() {
        static SMALL: &[EmbeddedResource] = &[EmbeddedResource {
            name: "nested/dir/tool.ps1",
            bytes: b"Write-Output 'hi'",
        }];
        let workspace = tempdir().unwrap();
        let target = workspace.path().join("nested/dir/tool.ps1");
        fs::create_dir_all(target.parent().unwrap()).unwrap();
        fs::write(&target, "a much longer stale script body that must disappear").unwrap();

        let bundle = ResourceBundle::from_static(SMALL);
        bundle.stage(workspace.path(), "nested/dir/tool.ps1").unwrap();
        bundle.stage(workspace.path(), "nested/dir/tool.ps1").unwrap();

        assert_eq!(fs::read(&target).unwrap(), b"Write-Output 'hi'");
    }

    #[test]
    fn test_stage_missing_resource_fails() {
        let workspace = tempdir().unwrap();
        let err = ResourceBundle::embedded()
            .stage(workspace.path(), "PowerShell/Missing.ps1")
            .unwrap_err();

        match err {
            SqlciError::ResourceStaging { resource, source } => {
                assert_eq!(resource, "PowerShell/Missing.ps1");
                assert_eq!(source.kind(), io::ErrorKind::NotFound);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(!workspace.path().join("PowerShell").exists());
    }

    #[test]
    fn test_stage_into_unwritable_destination_fails() {
        let workspace = tempdir().unwrap();
        // A file where the `PowerShell` directory should go.
        fs::write(workspace.path().join("PowerShell"), "").unwrap();

        let result = ResourceBundle::embedded().stage(workspace.path(), PRIMARY_SCRIPT);
        assert!(matches!(result, Err(SqlciError::ResourceStaging { .. })));
    }
}
