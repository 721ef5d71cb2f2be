//! Static file edits applied during feature wiring
//!
//! These edits never shell out. Any I/O failure here means the project is in
//! a state we did not expect, so errors propagate and stop the run.

use crate::error::{IoResultExt, Result};
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// A deterministic edit relative to the project root
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileEdit {
    /// Write a file, creating parent directories and replacing any existing content
    Write {
        path: &'static str,
        contents: &'static str,
    },
    /// Point the first existing config's `content` array at the source tree,
    /// writing `fallback` to the first candidate when none exists
    RewriteContentGlob {
        candidates: &'static [&'static str],
        replacement: &'static str,
        fallback: &'static str,
    },
    /// Replace the contents of whichever of `paths` already exist
    ReplaceIfExists {
        paths: &'static [&'static str],
        contents: &'static str,
    },
}

impl FileEdit {
    /// Short description used in progress output
    pub fn describe(&self) -> String {
        match self {
            FileEdit::Write { path, .. } => format!("Writing {}", path),
            FileEdit::RewriteContentGlob { candidates, .. } => {
                format!("Updating content glob in {}", candidates.join(" / "))
            }
            FileEdit::ReplaceIfExists { paths, .. } => format!("Updating {}", paths.join(", ")),
        }
    }

    /// Apply the edit under `root`, returning every file written
    pub fn apply(&self, root: &Path) -> Result<Vec<PathBuf>> {
        match *self {
            FileEdit::Write { path, contents } => {
                write_file(&root.join(path), contents).map(|p| vec![p])
            }
            FileEdit::RewriteContentGlob {
                candidates,
                replacement,
                fallback,
            } => rewrite_content_glob(root, candidates, replacement, fallback),
            FileEdit::ReplaceIfExists { paths, contents } => {
                let mut written = Vec::new();
                for rel in paths {
                    let path = root.join(rel);
                    if path.is_file() {
                        written.push(write_file(&path, contents)?);
                    }
                }
                Ok(written)
            }
        }
    }
}

fn write_file(path: &Path, contents: &str) -> Result<PathBuf> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).at_path(parent)?;
    }
    fs::write(path, contents).at_path(path)?;
    tracing::debug!(path = %path.display(), "wrote file");
    Ok(path.to_path_buf())
}

fn content_array() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Elements are string literals (which may contain brackets), commas,
    // whitespace or line comments.
    RE.get_or_init(|| {
        Regex::new(
            r#"content\s*:\s*\[(?:\s|,|"(?:[^"\\]|\\.)*"|'(?:[^'\\]|\\.)*'|`[^`]*`|//[^\n]*)*\]"#,
        )
        .expect("valid content regex")
    })
}

/// Replace the first `content: [...]` array with `replacement`
pub fn replace_content_glob(source: &str, replacement: &str) -> Option<String> {
    let re = content_array();
    if !re.is_match(source) {
        return None;
    }
    Some(re.replacen(source, 1, regex::NoExpand(replacement)).into_owned())
}

fn rewrite_content_glob(
    root: &Path,
    candidates: &[&str],
    replacement: &str,
    fallback: &str,
) -> Result<Vec<PathBuf>> {
    let existing = candidates.iter().map(|c| root.join(c)).find(|p| p.is_file());

    let Some(path) = existing else {
        let Some(first) = candidates.first() else {
            return Ok(Vec::new());
        };
        return write_file(&root.join(first), fallback).map(|p| vec![p]);
    };

    let source = fs::read_to_string(&path).at_path(&path)?;
    match replace_content_glob(&source, replacement) {
        Some(updated) => write_file(&path, &updated).map(|p| vec![p]),
        None => {
            tracing::warn!(path = %path.display(), "no content array found, leaving config unchanged");
            Ok(Vec::new())
        }
    }
}
