//! # sqlci Command Modules
//!
//! File: cli/src/commands/mod.rs
//!
//! ## Overview
//!
//! The subcommands of the `sqlci` binary. Each lives in its own module with an
//! arguments struct and a `handle_*` function called from `main.rs`:
//!
//! - `run`: stage the scripts and run the cmdlet, exiting non-zero on failure
//! - `render`: print the command line `run` would launch
//! - `package`: print the package file name for a build
//!
//! `run` and `render` share [`InvocationArgs`] and the workspace resolution
//! below, so both describe the same invocation for the same input.
//!
use crate::core::config::Config;
use crate::core::error::Result;
use crate::pipeline::parameters::{Parameters, ProductVersionOption};
use anyhow::Context;
use clap::Args;
use std::path::{Path, PathBuf};

/// Implements `sqlci package-name`.
pub mod package;
/// Implements `sqlci render`.
pub mod render;
/// Implements `sqlci run`.
pub mod run;

/// Arguments describing one cmdlet invocation.
#[derive(Args, Debug)]
pub struct InvocationArgs {
    /// Working directory the scripts are staged into.
    /// Defaults to `invocation.workspace` from the configuration, then the current directory.
    #[arg(long, short = 'w', value_name = "DIR")]
    workspace: Option<PathBuf>,

    /// SQL Change Automation version to require: `latest` or an exact version.
    /// Defaults to `latest`.
    #[arg(long, value_name = "VERSION")]
    product_version: Option<ProductVersionOption>,

    /// Cmdlet parameters after `--`, passed through in order
    /// (e.g. `-- -Operation Build -ProjectPath db/Inventory.sqlproj`).
    #[arg(last = true, value_name = "PARAMS")]
    params: Vec<String>,
}

impl InvocationArgs {
    /// The parameters in command-line order, product version last.
    pub fn parameters(&self) -> Parameters {
        let mut parameters = Parameters::from(self.params.clone());
        parameters.add_product_version(self.product_version.as_ref());
        parameters
    }

    /// Whether any cmdlet parameters followed `--`.
    pub fn has_params(&self) -> bool {
        !self.params.is_empty()
    }

    /// The absolute working directory for this invocation.
    pub fn workspace(&self, config: &Config) -> Result<PathBuf> {
        resolve_workspace(
            self.workspace.as_deref(),
            config.invocation.workspace.as_deref().map(Path::new),
        )
    }
}

fn resolve_workspace(explicit: Option<&Path>, configured: Option<&Path>) -> Result<PathBuf> {
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    Ok(match explicit.or(configured) {
        Some(path) if path.is_absolute() => path.to_path_buf(),
        Some(path) => current_dir.join(path),
        None => current_dir,
    })
}
