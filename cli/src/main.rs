//! # sqlci Main Entry Point
//!
//! File: cli/src/main.rs
//!
//! ## Overview
//!
//! `sqlci` runs the SQL Change Automation PowerShell cmdlets from a build
//! pipeline step. It stages the bundled runner scripts into the workspace,
//! renders a correctly escaped PowerShell command line, launches it with the
//! build's environment and reports success through its exit status.
//!
//! This file handles:
//! - Command-line argument parsing using Clap
//! - Setting up logging based on verbosity flags
//! - Routing execution to the command handlers
//!
//! ## Examples
//!
//! ```bash
//! # Build a database project with the latest SQL Change Automation
//! sqlci run --product-version latest -- -Operation Build -ProjectPath db/Inventory.sqlproj
//!
//! # Show the command line without running it
//! sqlci -v render -- -Operation Test -Package "Inventory.42.nupkg"
//!
//! # Name of the artifact for build 42
//! sqlci package-name Inventory 42
//! ```
//!
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands; // Subcommand handlers (run, render, package-name)
mod common; // Shared utilities (process, resources, fs, output sinks)
mod core; // Configuration and errors
mod pipeline; // The invocation pipeline

/// Top-level command-line arguments.
#[derive(Parser, Debug)]
#[command(
    name = "sqlci",
    about = "Run SQL Change Automation cmdlets from a build pipeline step",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

/// All available top-level commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Stage the scripts and run the cmdlet in the workspace.
    Run(commands::run::RunArgs),
    /// Print the command line `run` would launch.
    Render(commands::render::RenderArgs),
    /// Print the package file name for a build.
    PackageName(commands::package::PackageNameArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    let command_result = match cli.command {
        Commands::Run(args) => commands::run::handle_run(args).await,
        Commands::Render(args) => commands::render::handle_render(args).await,
        Commands::PackageName(args) => commands::package::handle_package_name(args).await,
    };

    if let Err(e) = command_result {
        tracing::error!("Command execution failed: {:?}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}
