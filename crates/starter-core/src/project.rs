//! Resolution and creation of the project directory

use crate::error::{Result, StarterError};
use crate::selections::{LocationMode, UserSelections};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Absolute directory every step operates in.
///
/// Only constructed through [`ProjectPath::resolve`], once per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectPath {
    path: PathBuf,
    mode: LocationMode,
}

impl ProjectPath {
    /// Derive the project directory from the selections and `cwd`.
    ///
    /// In new-folder mode the directory must not exist yet. The project name
    /// must be a single plain path component.
    pub fn resolve(cwd: &Path, selections: &UserSelections) -> Result<Self> {
        let name = selections.name.trim();
        validate_name(name)?;

        let path = match selections.location {
            LocationMode::NewFolder => {
                let path = cwd.join(name);
                if path.exists() {
                    return Err(already_exists(&path));
                }
                path
            }
            LocationMode::CurrentDir => cwd.to_path_buf(),
        };

        Ok(Self {
            path,
            mode: selections.location,
        })
    }

    /// Create the directory when it is a new folder.
    ///
    /// Fails with an input error if the folder appeared after [`resolve`](Self::resolve).
    pub fn prepare(&self) -> Result<()> {
        if self.mode != LocationMode::NewFolder {
            return Ok(());
        }
        match fs::create_dir(&self.path) {
            Ok(()) => {
                tracing::debug!(path = %self.path.display(), "created project directory");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Err(already_exists(&self.path)),
            Err(e) => Err(StarterError::fs(&self.path, e)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A shell line that runs `command` inside the project from anywhere
    pub fn manual_command(&self, command: &str) -> String {
        match self.mode {
            LocationMode::CurrentDir => command.to_string(),
            LocationMode::NewFolder => {
                let dir = self.path.display().to_string();
                if dir.contains(char::is_whitespace) {
                    format!("cd \"{}\" && {}", dir, command)
                } else {
                    format!("cd {} && {}", dir, command)
                }
            }
        }
    }
}

fn already_exists(path: &Path) -> StarterError {
    StarterError::input(format!("Directory already exists: {}", path.display()))
}

/// Reject empty names and names that would escape the working directory
pub fn validate_name(name: &str) -> Result<()> {
    let name = name.trim();
    if name.is_empty() {
        return Err(StarterError::input("A project name is required."));
    }
    if name == "." || name == ".." || name.contains(['/', '\\']) {
        return Err(StarterError::input(format!(
            "Invalid project name '{}': use a plain folder name",
            name
        )));
    }
    Ok(())
}
