//! # Command-Line Rendering (`pipeline::command_line`)
//!
//! File: cli/src/pipeline/command_line.rs
//!
//! ## Overview
//!
//! Turns the interpreter path, the staged runner script and the cmdlet
//! parameters into the single command-line string the interpreter is launched
//! with:
//!
//! ```text
//! "<interpreter>" -NonInteractive -ExecutionPolicy Bypass -File "<script>" -Verbose <param> <param> ...
//! ```
//!
//! Every parameter is trimmed, then has each `"` replaced by `\\\"` (three
//! backslashes and a quote), and only then is wrapped in double quotes if it
//! contains a space. PowerShell strips one level of escaping when it re-parses
//! `-File` arguments, so the three backslashes are what makes a literal quote
//! survive. Escaping must happen before wrapping, otherwise an embedded quote
//! would close the wrapping quotes early.
//!
//! ## Launching
//!
//! A [`CommandLine`] keeps the interpreter apart from the argument tail. On
//! Windows the tail is handed to `CreateProcess` untouched (`raw_arg`).
//! Elsewhere it is split with the same rules `CommandLineToArgvW` applies, so
//! the interpreter sees identical argv on every platform.
//!
use super::parameters::Parameters;
use std::fmt;
use std::path::Path;

const FIXED_FLAGS: &str = "-NonInteractive -ExecutionPolicy Bypass";

/// A fully rendered interpreter invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    interpreter: String,
    arguments: String,
}

impl CommandLine {
    /// Renders the invocation of `script_path` with `parameters`.
    pub fn build(interpreter: &str, script_path: &Path, parameters: &Parameters) -> Self {
        let mut arguments = format!(
            "{} -File \"{}\" -Verbose",
            FIXED_FLAGS,
            script_path.display()
        );
        for parameter in parameters.iter() {
            arguments.push(' ');
            arguments.push_str(&render_parameter(parameter));
        }
        Self {
            interpreter: interpreter.to_string(),
            arguments,
        }
    }

    /// Pairs an interpreter with an already-rendered argument tail.
    #[cfg(test)]
    pub fn from_parts(interpreter: &str, arguments: &str) -> Self {
        Self {
            interpreter: interpreter.to_string(),
            arguments: arguments.to_string(),
        }
    }

    pub fn interpreter(&self) -> &str {
        &self.interpreter
    }

    /// Everything after the quoted interpreter.
    #[cfg(test)]
    pub fn arguments(&self) -> &str {
        &self.arguments
    }

    /// A command ready to spawn, without stdio, directory or environment set.
    #[cfg(windows)]
    pub fn to_command(&self) -> tokio::process::Command {
        use std::os::windows::process::CommandExt;

        let mut command = std::process::Command::new(&self.interpreter);
        command.raw_arg(&self.arguments);
        command.into()
    }

    /// A command ready to spawn, without stdio, directory or environment set.
    #[cfg(not(windows))]
    pub fn to_command(&self) -> tokio::process::Command {
        let mut command = tokio::process::Command::new(&self.interpreter);
        command.args(split_arguments(&self.arguments));
        command
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\" {}", self.interpreter, self.arguments)
    }
}

/// Escapes and, when needed, quotes a single parameter.
pub fn render_parameter(parameter: &str) -> String {
    let mut rendered = parameter.trim().to_string();
    if rendered.contains('"') {
        rendered = rendered.replace('"', r#"\\\""#);
    }
    if rendered.contains(' ') {
        rendered = format!("\"{}\"", rendered);
    }
    rendered
}

/// Splits an argument string into argv using `CommandLineToArgvW` rules.
///
/// Only spaces and tabs separate arguments; any other whitespace is part of
/// the argument. Backslashes are literal unless they precede a `"`: then `2n` of them yield
/// `n` backslashes and the quote toggles quoting, `2n + 1` yield `n`
/// backslashes and a literal quote.
#[cfg_attr(windows, allow(dead_code))]
pub fn split_arguments(line: &str) -> Vec<String> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                let mut backslashes = 1;
                while chars.peek() == Some(&'\\') {
                    chars.next();
                    backslashes += 1;
                }
                if chars.peek() == Some(&'"') {
                    current.extend(std::iter::repeat('\\').take(backslashes / 2));
                    if backslashes % 2 == 1 {
                        chars.next();
                        current.push('"');
                    }
                } else {
                    current.extend(std::iter::repeat('\\').take(backslashes));
                }
                in_token = true;
            }
            '"' => {
                in_quotes = !in_quotes;
                in_token = true;
            }
            ' ' | '\t' if !in_quotes => {
                if in_token {
                    args.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            c => {
                current.push(c);
                in_token = true;
            }
        }
    }
    if in_token {
        args.push(current);
    }
    args
}
