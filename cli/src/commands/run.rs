//! # sqlci Run Handler
//!
//! File: cli/src/commands/run.rs
//!
//! ## Overview
//!
//! `sqlci run` is the build step itself. It plays the part of the build host
//! for the invocation pipeline:
//!
//! 1. Load configuration and resolve the interpreter once.
//! 2. Resolve and create the workspace.
//! 3. Collect build variables: configured ones, then `--var` overrides.
//! 4. Hand everything to the orchestrator with console sinks and Ctrl-C as
//!    the interrupt.
//! 5. Turn a failed outcome into a non-zero exit status.
//!
//! ```bash
//! sqlci run -w ./build --var DATABASE_NAME=Inventory --product-version latest \
//!     -- -Operation Build -ProjectPath db/Inventory.sqlproj
//! ```
//!
use super::InvocationArgs;
use crate::common::fs::io;
use crate::common::resources::REQUIRED_RESOURCES;
use crate::common::ui::ConsoleSink;
use crate::core::config;
use crate::core::error::Result;
use crate::pipeline::environment::ProcessEnvironment;
use crate::pipeline::orchestrator::{HostContext, InvocationOrchestrator, InvocationOutcome};
use anyhow::anyhow;
use clap::Parser;
use std::sync::Arc;
use tracing::{info, warn};

/// Arguments for the `run` subcommand.
#[derive(Parser, Debug)]
pub struct RunArgs {
    #[command(flatten)]
    invocation: InvocationArgs,

    /// Build variable for the cmdlet's environment (KEY=VALUE). Can be repeated.
    #[arg(long = "var", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    vars: Vec<(String, String)>,
}

pub async fn handle_run(args: RunArgs) -> Result<()> {
    let cfg = config::load_config()?;
    let workspace = args.invocation.workspace(&cfg)?;
    io::ensure_dir_exists(&workspace)?;

    if !args.invocation.has_params() {
        warn!("No cmdlet parameters given; the runner script gets no operation.");
    }
    let parameters = args.invocation.parameters();

    let mut build_variables = cfg.build_variables.clone();
    build_variables.extend(args.vars);

    let orchestrator = InvocationOrchestrator::new(config::resolve_interpreter_path(&cfg));
    info!(
        "Running cmdlet with {} in {}",
        orchestrator.interpreter(),
        workspace.display()
    );

    let host = HostContext {
        build_variables,
        host_environment: Box::new(ProcessEnvironment),
        stdout: Arc::new(ConsoleSink::stdout()),
        stderr: Arc::new(ConsoleSink::stderr()),
    };

    let outcome = orchestrator
        .execute(
            &workspace,
            &parameters,
            &REQUIRED_RESOURCES,
            &host,
            interrupted(),
        )
        .await;

    match outcome {
        InvocationOutcome::Succeeded => Ok(()),
        InvocationOutcome::Failed { phase, reason } => {
            Err(anyhow!(reason).context(format!("Cmdlet invocation failed while {}", phase)))
        }
    }
}

/// Completes on Ctrl-C. Never completes if the handler cannot be installed.
async fn interrupted() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Could not listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}

fn parse_key_value(s: &str) -> std::result::Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got '{}'", s)),
    }
}
