//! # sqlci Error Types
//!
//! File: cli/src/core/error.rs
//!
//! ## Overview
//!
//! This module defines the error types used throughout sqlci. It follows the
//! usual split:
//! - `SqlciError`: a `thiserror` enum naming every failure the application
//!   distinguishes, including the invocation failure taxonomy.
//! - `Result<T>`: an alias for `anyhow::Result<T>` for application-level code
//!   (configuration loading, command handlers) where context matters more than
//!   the concrete type.
//!
//! ## Invocation taxonomy
//!
//! The pipeline variants map onto the phases of one invocation:
//! - `ResourceStaging`: an embedded script is missing or cannot be written.
//! - `EnvironmentRetrieval`: the host environment could not be read. This one is
//!   absorbed by the environment assembler and never fails an invocation.
//! - `ProcessLaunch`: the interpreter could not be spawned or waited on.
//! - `ProcessInterrupted`: the wait for the interpreter was interrupted.
//! - `NonZeroExit`: the interpreter ran and reported failure.
//!
//! ## Examples
//!
//! ```rust
//! // Pattern matching on a failed invocation
//! match outcome {
//!     InvocationOutcome::Failed { reason: SqlciError::NonZeroExit { code }, .. } => {
//!         println!("cmdlet failed with exit code {}", code);
//!     }
//!     _ => {}
//! }
//! ```
//!
use std::io;
use thiserror::Error;

/// Custom error type for the sqlci application.
#[derive(Error, Debug)]
pub enum SqlciError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Filesystem error: {0}")]
    FileSystem(String),

    #[error("Argument parsing error: {0}")]
    ArgumentParsing(String),

    #[error("Failed to stage resource '{resource}': {source}")]
    ResourceStaging {
        resource: String,
        #[source]
        source: io::Error,
    },

    /// Returned by `HostEnvironment` sources that can fail as a whole; the
    /// process environment only skips individual entries.
    #[allow(dead_code)]
    #[error("Failed to retrieve host environment: {0}")]
    EnvironmentRetrieval(String),

    #[error("Failed to launch '{interpreter}': {source}")]
    ProcessLaunch {
        interpreter: String,
        #[source]
        source: io::Error,
    },

    #[error("Thread interrupted while waiting for the cmdlet to finish")]
    ProcessInterrupted,

    #[error("Cmdlet exited with code {code}")]
    NonZeroExit { code: i32 },
}

/// Type alias for Result using anyhow::Error for application-level code.
pub type Result<T> = anyhow::Result<T>;
