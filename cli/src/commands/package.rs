//! # sqlci Package Name Handler
//!
//! File: cli/src/commands/package.rs
//!
//! `sqlci package-name <PACKAGE> <BUILD_NUMBER>` prints the file name a build
//! artifact is published under, so pipeline scripts don't re-implement the
//! convention.
//!
use crate::core::error::Result;
use crate::pipeline::package::construct_package_file_name;
use clap::Parser;

/// Arguments for the `package-name` subcommand.
#[derive(Parser, Debug)]
pub struct PackageNameArgs {
    /// Package identifier, e.g. `Inventory`.
    package_name: String,
    /// Build number, e.g. the pipeline's run counter.
    build_number: String,
}

pub async fn handle_package_name(args: PackageNameArgs) -> Result<()> {
    println!(
        "{}",
        construct_package_file_name(&args.package_name, &args.build_number)
    );
    Ok(())
}
