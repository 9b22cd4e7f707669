//! # sqlci Process Execution (`common::process`)
//!
//! File: cli/src/common/process.rs
//!
//! ## Overview
//!
//! Launches the interpreter for one invocation and waits for it. While the
//! child runs, two tasks read its stdout and stderr line by line and hand each
//! line to the caller's sinks, so build logs fill up as the cmdlet works rather
//! than when it ends.
//!
//! ## Architecture
//!
//! - The command comes from [`CommandLine::to_command`]; the runner adds the
//!   working directory, the assembled environment (on top of the inherited
//!   one) and piped stdio. Stdin is closed: the cmdlet runs `-NonInteractive`.
//! - The wait races against an `interrupt` future. If the interrupt fires
//!   first the runner returns [`SqlciError::ProcessInterrupted`] immediately.
//!   The child is **not** killed; it keeps running on its own and the pid is
//!   logged so an operator can find it.
//! - A child terminated by a signal has no exit code and is reported as `-1`.
//!
//! ## Usage
//!
//! ```rust
//! let code = process::run(
//!     &command_line,
//!     &environment,
//!     workspace,
//!     stdout_sink.clone(),
//!     stderr_sink.clone(),
//!     std::future::pending(),
//! )
//! .await?;
//! ```
//!
use crate::common::ui::OutputSink;
use crate::core::error::SqlciError;
use crate::pipeline::command_line::CommandLine;
use crate::pipeline::environment::EnvironmentMap;
use std::future::Future;
use std::path::Path;
use std::process::Stdio;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::task::JoinHandle;
use tracing::{debug, trace, warn};

/// Exit code reported for a child that was terminated without one.
pub const SIGNALLED_EXIT_CODE: i32 = -1;

/// Runs `command_line` in `working_dir` and returns the child's exit code.
///
/// # Errors
///
/// - `SqlciError::ProcessLaunch` if the interpreter cannot be spawned or waited on.
/// - `SqlciError::ProcessInterrupted` if `interrupt` completes before the child exits.
pub async fn run<F>(
    command_line: &CommandLine,
    environment: &EnvironmentMap,
    working_dir: &Path,
    stdout: Arc<dyn OutputSink>,
    stderr: Arc<dyn OutputSink>,
    interrupt: F,
) -> Result<i32, SqlciError>
where
    F: Future<Output = ()>,
{
    let launch_error = |source: std::io::Error| SqlciError::ProcessLaunch {
        interpreter: command_line.interpreter().to_string(),
        source,
    };

    let mut command = command_line.to_command();
    command
        .current_dir(working_dir)
        .envs(environment)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    debug!("Launching: {}", command_line);
    debug!(
        "Working directory: {}, {} environment variables",
        working_dir.display(),
        environment.len()
    );

    let mut child = command.spawn().map_err(launch_error)?;
    let pid = child.id();

    let forwarders: Vec<JoinHandle<()>> = [
        child.stdout.take().map(|out| tokio::spawn(forward_lines(out, stdout))),
        child.stderr.take().map(|err| tokio::spawn(forward_lines(err, stderr))),
    ]
    .into_iter()
    .flatten()
    .collect();

    tokio::select! {
        status = child.wait() => {
            let status = status.map_err(launch_error)?;
            // The pipes close when the child exits; drain what is left.
            for forwarder in forwarders {
                if let Err(e) = forwarder.await {
                    warn!("Output forwarding task failed: {}", e);
                }
            }
            let code = status.code().unwrap_or(SIGNALLED_EXIT_CODE);
            debug!("Process {:?} exited with code {}", pid, code);
            Ok(code)
        }
        _ = interrupt => {
            warn!(
                "Interrupted while waiting for process {:?}; it is left running",
                pid
            );
            Err(SqlciError::ProcessInterrupted)
        }
    }
}

async fn forward_lines<R>(reader: R, sink: Arc<dyn OutputSink>)
where
    R: AsyncRead + Unpin,
{
    let mut reader = BufReader::new(reader);
    let mut buffer = Vec::new();
    loop {
        buffer.clear();
        match reader.read_until(b'\n', &mut buffer).await {
            Ok(0) => break,
            Ok(_) => {
                // Windows consoles emit OEM code pages; keep going on bad UTF-8.
                let line = String::from_utf8_lossy(&buffer);
                let line = line.trim_end_matches(['\r', '\n']);
                trace!("cmdlet: {}", line);
                sink.line(line);
            }
            Err(e) => {
                warn!("Failed to read process output: {}", e);
                break;
            }
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::common::ui::MemorySink;
    use std::future::pending;
    use std::time::Duration;
    use tempfile::tempdir;

    fn sh(script: &str) -> CommandLine {
        CommandLine::from_parts("sh", &format!("-c \"{}\"", script))
    }

    #[tokio::test]
    async fn test_streams_stdout_and_stderr() {
        let dir = tempdir().unwrap();
        let out = Arc::new(MemorySink::default());
        let err = Arc::new(MemorySink::default());

        let code = run(
            &sh("echo one; echo two; echo oops 1>&2"),
            &EnvironmentMap::new(),
            dir.path(),
            out.clone(),
            err.clone(),
            pending(),
        )
        .await
        .unwrap();

        assert_eq!(code, 0);
        assert_eq!(out.lines(), vec!["one", "two"]);
        assert_eq!(err.lines(), vec!["oops"]);
    }

    #[tokio::test]
    async fn test_returns_nonzero_exit_code() {
        let dir = tempdir().unwrap();
        let sink = Arc::new(MemorySink::default());

        let code = run(
            &sh("exit 3"),
            &EnvironmentMap::new(),
            dir.path(),
            sink.clone(),
            sink,
            pending(),
        )
        .await
        .unwrap();

        assert_eq!(code, 3);
    }

    #[tokio::test]
    async fn test_environment_and_working_dir_are_applied() {
        let dir = tempdir().unwrap();
        let out = Arc::new(MemorySink::default());
        let env = EnvironmentMap::from([("SQLCI_TEST_VALUE".to_string(), "42".to_string())]);

        run(
            &sh("echo $SQLCI_TEST_VALUE; pwd"),
            &env,
            dir.path(),
            out.clone(),
            Arc::new(MemorySink::default()),
            pending(),
        )
        .await
        .unwrap();

        let lines = out.lines();
        assert_eq!(lines[0], "42");
        assert_eq!(
            Path::new(&lines[1]).canonicalize().unwrap(),
            dir.path().canonicalize().unwrap()
        );
    }

    #[tokio::test]
    async fn test_missing_interpreter_is_a_launch_error() {
        let dir = tempdir().unwrap();
        let sink = Arc::new(MemorySink::default());
        let line = CommandLine::from_parts("/nonexistent/sqlci-interpreter", "-Verbose");

        let result = run(
            &line,
            &EnvironmentMap::new(),
            dir.path(),
            sink.clone(),
            sink,
            pending(),
        )
        .await;

        assert!(matches!(result, Err(SqlciError::ProcessLaunch { .. })));
    }

    #[tokio::test]
    async fn test_interrupt_is_not_reported_as_success() {
        let dir = tempdir().unwrap();
        let sink = Arc::new(MemorySink::default());

        let result = run(
            &sh("sleep 5"),
            &EnvironmentMap::new(),
            dir.path(),
            sink.clone(),
            sink,
            tokio::time::sleep(Duration::from_millis(100)),
        )
        .await;

        assert!(matches!(result, Err(SqlciError::ProcessInterrupted)));
    }
}
