//! # Invocation Orchestration (`pipeline::orchestrator`)
//!
//! File: cli/src/pipeline/orchestrator.rs
//!
//! ## Overview
//!
//! Runs one cmdlet invocation from start to finish:
//!
//! ```text
//! Staging -> Building -> Assembling -> Running -> { Succeeded | Failed }
//! ```
//!
//! 1. **Staging**: every required script is written into the working directory.
//!    The first one listed is the script the interpreter runs.
//! 2. **Building**: the command line is rendered against the staged script.
//! 3. **Assembling**: build variables, host environment and marker are merged.
//! 4. **Running**: the interpreter runs; exit code `0` means success.
//!
//! Nothing escapes as an error. Staging and launch failures, interruptions and
//! nonzero exits all end in [`InvocationOutcome::Failed`], carrying the phase
//! and the reason, after a message has gone to both the log and the host's
//! error sink. There are no retries.
//!
//! ## Examples
//!
//! ```rust
//! let orchestrator = InvocationOrchestrator::new(config::resolve_interpreter_path(&cfg));
//! let outcome = orchestrator
//!     .execute(&workspace, &params, &REQUIRED_RESOURCES, &host, std::future::pending())
//!     .await;
//! if let InvocationOutcome::Failed { phase, .. } = outcome { /* mark the build step failed */ }
//! ```
//!
use super::command_line::CommandLine;
use super::environment::{self, EnvironmentMap, HostEnvironment, INTEGRATION_MARKER};
use super::parameters::Parameters;
use crate::common::process;
use crate::common::resources::ResourceBundle;
use crate::common::ui::OutputSink;
use crate::core::error::SqlciError;
use std::fmt;
use std::future::Future;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, error, info};

/// The step an invocation is in, or was in when it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvocationPhase {
    Staging,
    Building,
    Assembling,
    Running,
}

impl fmt::Display for InvocationPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Staging => "staging",
            Self::Building => "building",
            Self::Assembling => "assembling",
            Self::Running => "running",
        };
        f.write_str(name)
    }
}

/// How an invocation ended.
#[derive(Debug)]
pub enum InvocationOutcome {
    Succeeded,
    Failed {
        phase: InvocationPhase,
        reason: SqlciError,
    },
}

impl InvocationOutcome {
    /// `true` iff the cmdlet exited with code `0`.
    #[cfg(test)]
    pub fn succeeded(&self) -> bool {
        matches!(self, Self::Succeeded)
    }
}

/// What the build host provides for one invocation.
pub struct HostContext {
    /// Build-scoped variables, lowest precedence in the child's environment.
    pub build_variables: EnvironmentMap,
    pub host_environment: Box<dyn HostEnvironment>,
    /// Receives the cmdlet's stdout.
    pub stdout: Arc<dyn OutputSink>,
    /// Receives the cmdlet's stderr and failure messages.
    pub stderr: Arc<dyn OutputSink>,
}

/// Stages, renders, assembles and runs cmdlet invocations.
///
/// Holds no per-invocation state; one orchestrator can serve concurrent
/// invocations in different working directories.
#[derive(Debug, Clone)]
pub struct InvocationOrchestrator {
    interpreter: String,
    bundle: ResourceBundle,
}

impl InvocationOrchestrator {
    pub fn new(interpreter: impl Into<String>) -> Self {
        Self {
            interpreter: interpreter.into(),
            bundle: ResourceBundle::embedded(),
        }
    }

    /// Replaces the resources staged before each run.
    #[cfg(test)]
    pub fn with_bundle(mut self, bundle: ResourceBundle) -> Self {
        self.bundle = bundle;
        self
    }

    pub fn interpreter(&self) -> &str {
        &self.interpreter
    }

    /// The command line `execute` would launch, without staging anything.
    pub fn render(
        &self,
        working_dir: &Path,
        primary_script: &str,
        parameters: &Parameters,
    ) -> CommandLine {
        CommandLine::build(
            &self.interpreter,
            &working_dir.join(primary_script),
            parameters,
        )
    }

    /// Runs one invocation. `resources[0]` is the script handed to `-File`.
    pub async fn execute<F>(
        &self,
        working_dir: &Path,
        parameters: &Parameters,
        resources: &[&str],
        host: &HostContext,
        interrupt: F,
    ) -> InvocationOutcome
    where
        F: Future<Output = ()>,
    {
        match self
            .try_execute(working_dir, parameters, resources, host, interrupt)
            .await
        {
            Ok(()) => {
                info!("Cmdlet completed successfully");
                InvocationOutcome::Succeeded
            }
            Err((phase, reason)) => {
                let message = failure_message(&reason);
                error!("Invocation failed while {}: {}", phase, message);
                host.stderr.error(&message);
                InvocationOutcome::Failed { phase, reason }
            }
        }
    }

    async fn try_execute<F>(
        &self,
        working_dir: &Path,
        parameters: &Parameters,
        resources: &[&str],
        host: &HostContext,
        interrupt: F,
    ) -> Result<(), (InvocationPhase, SqlciError)>
    where
        F: Future<Output = ()>,
    {
        debug!("Phase: {}", InvocationPhase::Staging);
        let script = self
            .stage_all(working_dir, resources)
            .map_err(|e| (InvocationPhase::Staging, e))?;

        debug!("Phase: {}", InvocationPhase::Building);
        let command_line = CommandLine::build(&self.interpreter, &script, parameters);
        debug!("Rendered {} parameters", parameters.len());

        debug!("Phase: {}", InvocationPhase::Assembling);
        let environment = environment::assemble(
            &host.build_variables,
            host.host_environment.as_ref(),
            INTEGRATION_MARKER,
        );

        debug!("Phase: {}", InvocationPhase::Running);
        let code = process::run(
            &command_line,
            &environment,
            working_dir,
            host.stdout.clone(),
            host.stderr.clone(),
            interrupt,
        )
        .await
        .map_err(|e| (InvocationPhase::Running, e))?;

        if code == 0 {
            Ok(())
        } else {
            Err((InvocationPhase::Running, SqlciError::NonZeroExit { code }))
        }
    }

    fn stage_all(&self, working_dir: &Path, resources: &[&str]) -> Result<PathBuf, SqlciError> {
        let (primary, rest) =
            resources
                .split_first()
                .ok_or_else(|| SqlciError::ResourceStaging {
                    resource: "<primary script>".to_string(),
                    source: io::Error::new(io::ErrorKind::InvalidInput, "no resources to stage"),
                })?;
        let script = self.bundle.stage(working_dir, primary)?;
        for name in rest {
            self.bundle.stage(working_dir, name)?;
        }
        Ok(script)
    }
}

fn failure_message(reason: &SqlciError) -> String {
    match reason {
        SqlciError::ProcessInterrupted => {
            "Unexpected thread interruption executing cmdlet".to_string()
        }
        SqlciError::NonZeroExit { .. } => reason.to_string(),
        other => format!("Unexpected I/O exception executing cmdlet: {}", other),
    }
}
