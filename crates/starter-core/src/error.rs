//! Error types shared by every scaffolding step

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Why an external command did not succeed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandCause {
    /// The process ran and exited with a non-zero code
    Exit(i32),
    /// The process was terminated without an exit code (e.g. by a signal)
    Terminated,
    /// The process could not be started at all
    Spawn(String),
}

impl fmt::Display for CommandCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandCause::Exit(code) => write!(f, "exit code {}", code),
            CommandCause::Terminated => write!(f, "terminated by signal"),
            CommandCause::Spawn(reason) => write!(f, "failed to start: {}", reason),
        }
    }
}

/// Main error type for scaffolding a project
#[derive(Error, Debug)]
pub enum StarterError {
    /// A required answer is missing or the target directory is unusable
    #[error("{0}")]
    Input(String),

    /// The user aborted one of the prompts
    #[error("Setup cancelled.")]
    Cancelled,

    /// An external command failed to start or exited unsuccessfully
    #[error("`{command}` failed ({cause})")]
    CommandFailed { command: String, cause: CommandCause },

    /// Unexpected filesystem state while copying templates or writing files
    #[error("Filesystem error at {}: {source}", path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A required runtime is missing or too old
    #[error("{0}")]
    Runtime(String),
}

/// Result type alias for scaffolding operations
pub type Result<T> = std::result::Result<T, StarterError>;

impl StarterError {
    /// Create an input error
    pub fn input(msg: impl Into<String>) -> Self {
        Self::Input(msg.into())
    }

    /// Wrap an I/O error with the path it happened at
    pub fn fs(path: impl AsRef<Path>, source: io::Error) -> Self {
        Self::Filesystem {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Map a prompt error, treating an interrupted prompt as cancellation
    pub fn from_prompt(err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::Interrupted {
            Self::Cancelled
        } else {
            Self::Input(format!("Prompt failed: {}", err))
        }
    }
}

/// Extension for attaching a path to `io::Result`s
pub trait IoResultExt<T> {
    fn at_path(self, path: impl AsRef<Path>) -> Result<T>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn at_path(self, path: impl AsRef<Path>) -> Result<T> {
        self.map_err(|e| StarterError::fs(path, e))
    }
}
