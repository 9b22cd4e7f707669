//! # Environment Assembly (`pipeline::environment`)
//!
//! File: cli/src/pipeline/environment.rs
//!
//! ## Overview
//!
//! Builds the variables the interpreter is started with. Three sources are
//! merged, later ones overwriting earlier ones key by key:
//!
//! 1. build-scoped variables supplied by the pipeline host
//! 2. the host process environment
//! 3. the integration marker (`REDGATE_FUR_ENVIRONMENT`)
//!
//! The marker goes in last so nothing upstream can mask it. Reading the host
//! environment is best effort: a variable that is not valid Unicode is skipped
//! on its own, and a failure of the whole source is logged and that source
//! simply contributes nothing. The map is built fresh per invocation and the real
//! process environment is never touched.
//!
use crate::core::error::SqlciError;
use std::collections::HashMap;
use std::ffi::OsString;
use tracing::{debug, warn};

/// Variable name to value.
pub type EnvironmentMap = HashMap<String, String>;

/// A fixed variable identifying who launched the cmdlet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvironmentMarker {
    pub name: &'static str,
    pub value: &'static str,
}

/// The marker set on every invocation made by this tool.
pub const INTEGRATION_MARKER: EnvironmentMarker = EnvironmentMarker {
    name: "REDGATE_FUR_ENVIRONMENT",
    value: "SQL CI Runner",
};

/// Source of the host's environment variables.
pub trait HostEnvironment: Send + Sync {
    fn variables(&self) -> Result<EnvironmentMap, SqlciError>;
}

/// The environment of the current process.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnvironment;

impl HostEnvironment for ProcessEnvironment {
    fn variables(&self) -> Result<EnvironmentMap, SqlciError> {
        Ok(unicode_variables(std::env::vars_os()))
    }
}

/// Keeps the entries whose name and value are valid Unicode.
///
/// An entry that is not is skipped with a warning; the rest of the
/// environment still comes through.
fn unicode_variables<I>(variables: I) -> EnvironmentMap
where
    I: IntoIterator<Item = (OsString, OsString)>,
{
    let mut environment = EnvironmentMap::new();
    for (name, value) in variables {
        match (name.into_string(), value.into_string()) {
            (Ok(name), Ok(value)) => {
                environment.insert(name, value);
            }
            (Ok(name), Err(_)) => {
                warn!("Skipping host variable '{}': value is not valid Unicode", name);
            }
            (Err(name), _) => {
                warn!("Skipping host variable {:?}: name is not valid Unicode", name);
            }
        }
    }
    environment
}

/// Merges the three sources into a new map.
pub fn assemble(
    build_variables: &EnvironmentMap,
    host: &dyn HostEnvironment,
    marker: EnvironmentMarker,
) -> EnvironmentMap {
    let mut environment = build_variables.clone();

    match host.variables() {
        Ok(host_variables) => {
            debug!("Merging {} host environment variables", host_variables.len());
            environment.extend(host_variables);
        }
        Err(e) => warn!("Continuing without host environment variables: {}", e),
    }

    environment.insert(marker.name.to_string(), marker.value.to_string());
    environment
}
