//! # sqlci Common Utilities (`common`)
//!
//! File: cli/src/common/mod.rs
//!
//! ## Overview
//!
//! Shared building blocks the invocation pipeline and command handlers use:
//!
//! - **`fs`**: filesystem helpers (directory creation, file reads).
//! - **`process`**: launching the interpreter and streaming its output.
//! - **`resources`**: the embedded PowerShell scripts and their staging.
//! - **`ui`**: output sinks that receive the cmdlet's output lines.
//!

/// Utilities for filesystem operations.
pub mod fs;
/// Launching external processes and forwarding their output.
pub mod process;
/// Embedded script resources.
pub mod resources;
/// Output sinks for streamed process output.
pub mod ui;
