//! Login client invocation.
//!
//! SshCommand::for_record -> { program, args }
//! Helpers: command_line (shell-quoted, for logs / --dry-run), run (interactive
//! passthrough), exit_code (child status -> process exit code).
//!
use anyhow::{Context, Result};
use std::fmt;
use std::process::{ExitStatus, Stdio};
use tokio::process::Command;

use crate::store::Record;

/// A fully resolved login client invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SshCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl SshCommand {
    /// Build `<program> -p <port> [-i <key>] <user>@<host>`.
    ///
    /// `-i` is only passed for key auth with a non-empty key path.
    pub fn for_record(program: impl Into<String>, record: &Record) -> Self {
        let mut args = vec!["-p".to_string(), record.port.to_string()];
        if let Some(key) = record.active_key_path() {
            args.push("-i".to_string());
            args.push(key.to_string());
        }
        args.push(record.destination());
        Self {
            program: program.into(),
            args,
        }
    }

    /// Shell-quoted command line.
    pub fn command_line(&self) -> String {
        let mut words = Vec::with_capacity(self.args.len() + 1);
        words.push(self.program.as_str());
        words.extend(self.args.iter().map(String::as_str));
        shell_words::join(words)
    }

    /// Run the client with this process's stdin/stdout/stderr attached and
    /// block until the session ends.
    pub fn run(&self) -> Result<ExitStatus> {
        let rt = tokio::runtime::Runtime::new().context("Failed to create Tokio runtime")?;
        rt.block_on(self.run_async())
    }

    pub async fn run_async(&self) -> Result<ExitStatus> {
        Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .with_context(|| format!("Failed to launch login client '{}'", self.program))
    }
}

impl fmt::Display for SshCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.command_line())
    }
}

/// Map a child's exit status to our own exit code.
///
/// Signal deaths become `128 + signo`, the shell convention.
pub fn exit_code(status: ExitStatus) -> u8 {
    if let Some(code) = status.code() {
        return u8::try_from(code).unwrap_or(1);
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(sig) = status.signal() {
            return u8::try_from(128 + sig).unwrap_or(1);
        }
    }
    1
}
