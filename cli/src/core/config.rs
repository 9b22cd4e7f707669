//! # sqlci Configuration System
//!
//! File: cli/src/core/config.rs
//!
//! ## Overview
//!
//! This module loads, merges and validates the sqlci configuration, and hosts
//! the thin adapter that resolves the interpreter location once per process so
//! the invocation pipeline can receive it as a plain value.
//!
//! ## Architecture
//!
//! Configuration sources (in order of precedence):
//! 1. Project-specific `.sqlci.toml` in the current directory or ancestors
//!    (the search stops at a directory containing `.git`)
//! 2. User-specific `config.toml` in the platform configuration directory
//! 3. Default values defined in the code
//!
//! Interpreter resolution has its own precedence: the `PS_HOME` environment
//! variable (used verbatim), then `interpreter.path` from the configuration,
//! then the stock Windows PowerShell location.
//!
//! ## Examples
//!
//! ```rust
//! let cfg = config::load_config()?;
//! let interpreter = config::resolve_interpreter_path(&cfg);
//! let orchestrator = InvocationOrchestrator::new(interpreter);
//! ```
//!
use crate::common::fs::io;
use crate::core::error::{Result, SqlciError};
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Environment variable that overrides the interpreter location.
pub const INTERPRETER_OVERRIDE_VAR: &str = "PS_HOME";

/// Interpreter used when neither `PS_HOME` nor the configuration names one.
pub const DEFAULT_INTERPRETER_PATH: &str =
    r"C:\Windows\System32\WindowsPowerShell\v1.0\powershell.exe";

const PROJECT_CONFIG_FILENAME: &str = ".sqlci.toml";

/// Represents the main configuration structure, loaded from TOML files.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub interpreter: InterpreterConfig,
    #[serde(default)]
    pub invocation: InvocationConfig,
    /// Build-scoped variables handed to every invocation.
    #[serde(default)]
    pub build_variables: HashMap<String, String>,
}

/// Where to find the PowerShell interpreter.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct InterpreterConfig {
    /// Full path to the interpreter executable.
    pub path: Option<String>,
}

/// Defaults for `sqlci run` and `sqlci render`.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct InvocationConfig {
    /// Working directory the scripts are staged into (can use ~). Will be expanded.
    pub workspace: Option<String>,
}

pub fn load_config() -> Result<Config> {
    let user_config = load_user_config()?;
    let project_config = load_project_config()?;
    let mut merged_config = merge_configs(user_config.unwrap_or_default(), project_config);
    expand_config_paths(&mut merged_config);
    validate_config(&merged_config).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", merged_config);
    Ok(merged_config)
}

/// Resolves the interpreter path for this process.
///
/// `PS_HOME` wins when it is set, even to an unusual value; it is passed on
/// verbatim. This is the only place the pipeline's interpreter is looked up.
pub fn resolve_interpreter_path(config: &Config) -> String {
    let override_value = std::env::var(INTERPRETER_OVERRIDE_VAR).ok();
    let resolved = interpreter_path_from(override_value, config.interpreter.path.as_deref());
    debug!("Resolved interpreter path: {}", resolved);
    resolved
}

fn interpreter_path_from(override_value: Option<String>, configured: Option<&str>) -> String {
    match (override_value, configured) {
        (Some(value), _) => value,
        (None, Some(path)) => path.to_string(),
        (None, None) => DEFAULT_INTERPRETER_PATH.to_string(),
    }
}

fn load_user_config() -> Result<Option<Config>> {
    if let Some(proj_dirs) = ProjectDirs::from("com", "Redgate", "sqlci") {
        let config_path = proj_dirs.config_dir().join("config.toml");
        if config_path.exists() {
            info!("Loading user configuration from: {}", config_path.display());
            load_config_from_path(&config_path).map(Some)
        } else {
            debug!(
                "User configuration file not found at {}",
                config_path.display()
            );
            Ok(None)
        }
    } else {
        warn!("Could not determine user config directory.");
        Ok(None)
    }
}

fn load_project_config() -> Result<Option<Config>> {
    if let Some(project_config_path) = find_project_config_path()? {
        info!(
            "Loading project configuration from: {}",
            project_config_path.display()
        );
        load_config_from_path(&project_config_path).map(Some)
    } else {
        debug!("No project configuration file (.sqlci.toml) found in current directory or ancestors.");
        Ok(None)
    }
}

fn find_project_config_path() -> Result<Option<PathBuf>> {
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    Ok(find_project_config_from(&current_dir))
}

fn find_project_config_from(start: &Path) -> Option<PathBuf> {
    let mut path = start;
    loop {
        let project_config = path.join(PROJECT_CONFIG_FILENAME);
        if project_config.is_file() {
            return Some(project_config);
        }
        if path.join(".git").is_dir() {
            debug!(
                "Found .git directory at {}, stopping project config search.",
                path.display()
            );
            return None;
        }
        path = path.parent()?;
    }
}

fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = io::read_file_to_string(path)?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

fn merge_configs(user: Config, project: Option<Config>) -> Config {
    let project = match project {
        Some(p) => p,
        None => return user,
    };
    let mut build_variables = user.build_variables;
    build_variables.extend(project.build_variables);
    Config {
        interpreter: InterpreterConfig {
            path: project.interpreter.path.or(user.interpreter.path),
        },
        invocation: InvocationConfig {
            workspace: project.invocation.workspace.or(user.invocation.workspace),
        },
        build_variables,
    }
}

fn expand_config_paths(config: &mut Config) {
    if let Some(workspace) = config.invocation.workspace.as_mut() {
        *workspace = shellexpand::tilde(workspace.as_str()).into_owned();
        debug!("Expanded workspace path: {}", workspace);
    }
}

fn validate_config(config: &Config) -> Result<()> {
    if let Some(path) = &config.interpreter.path {
        if path.trim().is_empty() {
            return Err(anyhow!(SqlciError::Config(
                "interpreter.path is set but empty.".to_string()
            )));
        }
    }
    if let Some(workspace) = &config.invocation.workspace {
        let workspace = Path::new(workspace);
        if workspace.exists() && !workspace.is_dir() {
            return Err(anyhow!(SqlciError::Config(format!(
                "Configured workspace '{}' exists but is not a directory.",
                workspace.display()
            ))));
        }
    }
    for name in config.build_variables.keys() {
        if name.is_empty() || name.contains('=') {
            return Err(anyhow!(SqlciError::Config(format!(
                "Invalid build variable name: '{}'.",
                name
            ))));
        }
    }
    Ok(())
}
