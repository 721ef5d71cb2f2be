//! External command execution
//!
//! Every step that shells out goes through a [`CommandRunner`]. The system
//! runner inherits the terminal so the user sees live output; whether a
//! failure is fatal is decided by the caller, not here.

use crate::error::{CommandCause, Result, StarterError};
use async_trait::async_trait;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command as TokioCommand;

/// A single external command invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
    /// Attach the child to this process's stdin/stdout/stderr
    pub inherit_stdio: bool,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>, cwd: impl AsRef<Path>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: cwd.as_ref().to_path_buf(),
            inherit_stdio: true,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Shell-like rendering used in messages and recovery hints
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn failed(&self, cause: CommandCause) -> StarterError {
        StarterError::CommandFailed {
            command: self.command_line(),
            cause,
        }
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.command_line())
    }
}

/// Runs external commands to completion
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run `spec`; Ok only when the process exits with status 0
    async fn run(&self, spec: &CommandSpec) -> Result<()>;
}

/// Runner backed by real child processes
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

#[async_trait]
impl CommandRunner for SystemRunner {
    async fn run(&self, spec: &CommandSpec) -> Result<()> {
        tracing::debug!(command = %spec, cwd = %spec.cwd.display(), "spawning");

        let mut cmd = TokioCommand::new(&spec.program);
        cmd.args(&spec.args).current_dir(&spec.cwd);
        if spec.inherit_stdio {
            cmd.stdin(Stdio::inherit())
                .stdout(Stdio::inherit())
                .stderr(Stdio::inherit());
        } else {
            cmd.stdin(Stdio::null())
                .stdout(Stdio::null())
                .stderr(Stdio::null());
        }

        let status = cmd
            .status()
            .await
            .map_err(|e| spec.failed(CommandCause::Spawn(e.to_string())))?;

        if status.success() {
            return Ok(());
        }

        let cause = match status.code() {
            Some(code) => CommandCause::Exit(code),
            None => CommandCause::Terminated,
        };
        tracing::debug!(command = %spec, %cause, "command failed");
        Err(spec.failed(cause))
    }
}
