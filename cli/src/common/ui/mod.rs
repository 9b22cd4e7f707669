//! # sqlci Output Sinks (`common::ui`)
//!
//! File: cli/src/common/ui/mod.rs
//!
//! ## Overview
//!
//! Where the cmdlet's output ends up. The process runner forwards every line
//! the interpreter writes to an [`OutputSink`]; the build host decides what a
//! sink does with it. The CLI prints to its own stdout/stderr through
//! [`ConsoleSink`], tests collect lines in memory.
//!
//! Sinks take `&self` and must be `Send + Sync`: stdout and stderr are
//! forwarded from separate tasks while the runner waits on the child.
//!
use std::io::Write;

/// Receives output from the host side of an invocation, one line at a time.
pub trait OutputSink: Send + Sync {
    /// Called for each complete line, without its trailing newline.
    fn line(&self, line: &str);

    /// Reports a failure the way a build log does.
    fn error(&self, message: &str) {
        self.line(&format!("ERROR: {}", message));
    }
}

/// Which terminal stream a [`ConsoleSink`] writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleStream {
    Stdout,
    Stderr,
}

/// Writes lines straight to the terminal.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleSink {
    stream: ConsoleStream,
}

impl ConsoleSink {
    pub fn stdout() -> Self {
        Self {
            stream: ConsoleStream::Stdout,
        }
    }

    pub fn stderr() -> Self {
        Self {
            stream: ConsoleStream::Stderr,
        }
    }
}

impl OutputSink for ConsoleSink {
    fn line(&self, line: &str) {
        // A closed terminal is not worth failing the build over.
        let _ = match self.stream {
            ConsoleStream::Stdout => writeln!(std::io::stdout().lock(), "{}", line),
            ConsoleStream::Stderr => writeln!(std::io::stderr().lock(), "{}", line),
        };
    }
}

/// Collects lines for assertions.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: std::sync::Mutex<Vec<String>>,
}

#[cfg(test)]
impl MemorySink {
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().map(|lines| lines.clone()).unwrap_or_default()
    }
}

#[cfg(test)]
impl OutputSink for MemorySink {
    fn line(&self, line: &str) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push(line.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_lines_are_prefixed() {
        let sink = MemorySink::default();
        sink.line("plain output");
        sink.error("Unexpected thread interruption executing cmdlet");
        assert_eq!(
            sink.lines(),
            vec![
                "plain output".to_string(),
                "ERROR: Unexpected thread interruption executing cmdlet".to_string()
            ]
        );
    }
}
