//! # sqlci Invocation Pipeline (`pipeline`)
//!
//! File: cli/src/pipeline/mod.rs
//!
//! ## Overview
//!
//! Everything between "these are the cmdlet parameters" and "the cmdlet
//! succeeded or failed":
//!
//! - **`parameters`**: the ordered argument list and the product version option.
//! - **`command_line`**: escaping, quoting and the single command-line string.
//! - **`environment`**: build variables + host environment + integration marker.
//! - **`orchestrator`**: staging, rendering, assembly and the run, as one outcome.
//! - **`package`**: the `<name>.<build>.nupkg` naming convention.
//!
//! Staging and process execution live in `common::resources` and
//! `common::process`; the pipeline calls into them.
//!

/// Rendering of the interpreter command line.
pub mod command_line;
/// Environment assembly for the child process.
pub mod environment;
/// Sequencing of one invocation and its outcome.
pub mod orchestrator;
/// Package file naming.
pub mod package;
/// Cmdlet parameters.
pub mod parameters;
