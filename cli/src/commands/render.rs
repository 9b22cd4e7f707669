//! # sqlci Render Handler
//!
//! File: cli/src/commands/render.rs
//!
//! ## Overview
//!
//! `sqlci render` prints the exact command line `sqlci run` would launch for
//! the same arguments and configuration. Nothing is staged and nothing runs,
//! which makes it the quickest way to check how a parameter gets escaped.
//!
//! ```bash
//! PS_HOME=/usr/bin/pwsh sqlci render -w /builds/db -- -Operation Build -Message 'say "hi"'
//! ```
//!
use super::InvocationArgs;
use crate::common::resources::PRIMARY_SCRIPT;
use crate::core::config;
use crate::core::error::Result;
use crate::pipeline::orchestrator::InvocationOrchestrator;
use clap::Parser;
use tracing::debug;

/// Arguments for the `render` subcommand.
#[derive(Parser, Debug)]
pub struct RenderArgs {
    #[command(flatten)]
    invocation: InvocationArgs,
}

pub async fn handle_render(args: RenderArgs) -> Result<()> {
    let cfg = config::load_config()?;
    let workspace = args.invocation.workspace(&cfg)?;
    let orchestrator = InvocationOrchestrator::new(config::resolve_interpreter_path(&cfg));
    debug!("Rendering invocation for workspace {}", workspace.display());

    let command_line =
        orchestrator.render(&workspace, PRIMARY_SCRIPT, &args.invocation.parameters());
    println!("{}", command_line);
    Ok(())
}
