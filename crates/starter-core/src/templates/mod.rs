//! Static template files merged over the generated project
//!
//! This module provides:
//! - Template source resolution (flag, environment, files bundled in the binary)
//! - Merging with the forced-overwrite policy

pub mod copier;

use crate::product::ProductConfig;
use rust_embed::RustEmbed;
use std::borrow::Cow;
use std::path::{Path, PathBuf};

pub use copier::{merge_dir, merge_dir_with, merge_files, merge_source, MergeReport, OverwritePolicy};

/// One template file held in memory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateFile {
    /// Path relative to the project root, `/`-separated
    pub path: String,
    pub contents: Cow<'static, [u8]>,
}

/// Where template files are read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    /// A directory on disk; a missing directory merges nothing
    Dir(PathBuf),
    /// Files compiled into the binary
    Bundled(Vec<TemplateFile>),
}

impl From<PathBuf> for TemplateSource {
    fn from(path: PathBuf) -> Self {
        TemplateSource::Dir(path)
    }
}

impl From<&Path> for TemplateSource {
    fn from(path: &Path) -> Self {
        TemplateSource::Dir(path.to_path_buf())
    }
}

/// Collect every file of an embedded folder, sorted by path
pub fn bundled<E: RustEmbed>() -> Vec<TemplateFile> {
    let mut files: Vec<TemplateFile> = E::iter()
        .filter_map(|path| {
            E::get(&path).map(|file| TemplateFile {
                path: path.into_owned(),
                contents: file.data,
            })
        })
        .collect();
    files.sort_by(|a, b| a.path.cmp(&b.path));
    files
}

/// Resolve where templates are read from.
///
/// An explicit `--template-dir` wins, then the product's environment
/// variable, then the files the product bundles.
pub fn resolve_template_source<C: ProductConfig>(config: &C, explicit: Option<&Path>) -> TemplateSource {
    let from_env = std::env::var(config.template_dir_env()).ok();
    match pick_template_dir(explicit, from_env.as_deref()) {
        Some(dir) => TemplateSource::Dir(dir),
        None => TemplateSource::Bundled(config.bundled_templates()),
    }
}

fn pick_template_dir(explicit: Option<&Path>, from_env: Option<&str>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    match from_env {
        Some(value) if !value.trim().is_empty() => Some(PathBuf::from(value)),
        _ => None,
    }
}
