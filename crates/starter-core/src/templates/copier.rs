//! Template tree merging with a per-file overwrite policy

use super::{TemplateFile, TemplateSource};
use crate::error::{IoResultExt, Result, StarterError};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Config files the template always owns, matched by exact file name
pub const FORCED_FILE_NAMES: &[&str] = &[
    ".eslintrc.json",
    "eslint.config.mjs",
    ".prettierrc",
    "tailwind.config.ts",
    "tailwind.config.js",
    "postcss.config.js",
    "postcss.config.mjs",
    "i18n.ts",
    "schema.prisma",
];

/// Source and style extensions the template always owns
pub const FORCED_EXTENSIONS: &[&str] = &["css", "ts", "tsx"];

/// Decides whether a template file replaces an existing destination file
#[derive(Debug, Clone, Copy)]
pub struct OverwritePolicy {
    pub file_names: &'static [&'static str],
    pub extensions: &'static [&'static str],
}

impl Default for OverwritePolicy {
    fn default() -> Self {
        Self {
            file_names: FORCED_FILE_NAMES,
            extensions: FORCED_EXTENSIONS,
        }
    }
}

impl OverwritePolicy {
    /// True when the file must replace whatever is already at the destination
    pub fn forces_overwrite(&self, path: &Path) -> bool {
        let by_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|name| self.file_names.contains(&name));
        let by_extension = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.extensions.contains(&ext));
        by_name || by_extension
    }
}

/// What a merge did, by destination path
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeReport {
    pub copied: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
}

/// Merge `source_root` into `dest_root` using the default policy
pub fn merge_dir(source_root: &Path, dest_root: &Path) -> Result<MergeReport> {
    merge_dir_with(source_root, dest_root, &OverwritePolicy::default())
}

/// Merge `source_root` into `dest_root`.
///
/// Directories are created on demand. Files covered by `policy` are always
/// written; any other file is written only when the destination does not
/// exist yet. Nothing in `dest_root` is ever removed. A missing
/// `source_root` is a no-op.
pub fn merge_dir_with(
    source_root: &Path,
    dest_root: &Path,
    policy: &OverwritePolicy,
) -> Result<MergeReport> {
    let mut report = MergeReport::default();

    if !source_root.is_dir() {
        tracing::debug!(source = %source_root.display(), "template root absent, nothing to merge");
        return Ok(report);
    }

    fs::create_dir_all(dest_root).at_path(dest_root)?;

    for entry in WalkDir::new(source_root).min_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(source_root).to_path_buf();
            StarterError::fs(path, e.into())
        })?;

        let relative = entry
            .path()
            .strip_prefix(source_root)
            .unwrap_or_else(|_| entry.path());
        let target = dest_root.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).at_path(&target)?;
            continue;
        }

        place(target, policy, &mut report, |dest| fs::copy(entry.path(), dest).map(|_| ()))?;
    }

    Ok(report)
}

/// Merge in-memory template files into `dest_root` with the same policy as
/// [`merge_dir_with`]
pub fn merge_files(
    files: &[TemplateFile],
    dest_root: &Path,
    policy: &OverwritePolicy,
) -> Result<MergeReport> {
    let mut report = MergeReport::default();

    for file in files {
        let target = dest_root.join(&file.path);
        place(target, policy, &mut report, |dest| fs::write(dest, &file.contents))?;
    }

    Ok(report)
}

/// Merge whichever source the run resolved to, using the default policy
pub fn merge_source(source: &TemplateSource, dest_root: &Path) -> Result<MergeReport> {
    let policy = OverwritePolicy::default();
    match source {
        TemplateSource::Dir(dir) => merge_dir_with(dir, dest_root, &policy),
        TemplateSource::Bundled(files) => merge_files(files, dest_root, &policy),
    }
}

fn place(
    target: PathBuf,
    policy: &OverwritePolicy,
    report: &mut MergeReport,
    write: impl FnOnce(&Path) -> io::Result<()>,
) -> Result<()> {
    if target.exists() && !policy.forces_overwrite(&target) {
        tracing::debug!(path = %target.display(), "kept existing file");
        report.skipped.push(target);
        return Ok(());
    }

    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).at_path(parent)?;
    }
    write(&target).at_path(&target)?;
    tracing::debug!(path = %target.display(), "copied template file");
    report.copied.push(target);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, contents: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    fn read(root: &Path, rel: &str) -> String {
        fs::read_to_string(root.join(rel)).unwrap()
    }

    #[test]
    fn test_policy_forces_config_names_and_extensions() {
        let policy = OverwritePolicy::default();
        assert!(policy.forces_overwrite(Path::new(".eslintrc.json")));
        assert!(policy.forces_overwrite(Path::new("prisma/schema.prisma")));
        assert!(policy.forces_overwrite(Path::new("src/app/globals.css")));
        assert!(policy.forces_overwrite(Path::new("src/app/page.tsx")));
        assert!(policy.forces_overwrite(Path::new("src/lib/utils.ts")));
        assert!(!policy.forces_overwrite(Path::new("README.md")));
        assert!(!policy.forces_overwrite(Path::new("package.json")));
        assert!(!policy.forces_overwrite(Path::new("my.eslintrc.json.bak")));
    }

    #[test]
    fn test_missing_source_is_noop() {
        let dest = TempDir::new().unwrap();
        let report = merge_dir(&dest.path().join("nope"), dest.path()).unwrap();
        assert_eq!(report, MergeReport::default());
    }

    #[test]
    fn test_copies_nested_structure() {
        let src = TempDir::new().unwrap();
        let dest = TempDir::new().unwrap();
        write(src.path(), "src/lib/utils.ts", "export {}");
        write(src.path(), ".env.example", "DATABASE_URL=");
        fs::create_dir_all(src.path().join("public/empty")).unwrap();

        let report = merge_dir(src.path(), dest.path()).unwrap();

        assert_eq!(read(dest.path(), "src/lib/utils.ts"), "export {}");
        assert_eq!(read(dest.path(), ".env.example"), "DATABASE_URL=");
        assert!(dest.path().join("public/empty").is_dir());
        assert_eq!(report.copied.len(), 2);
        assert!(report.copied.contains(&dest.path().join("src/lib/utils.ts")));
    }

    #[test]
    fn test_existing_unforced_files_are_kept() {
        let src = TempDir::new().unwrap();
        let dest = TempDir::new().unwrap();
        write(src.path(), "README.md", "template readme");
        write(dest.path(), "README.md", "generator readme");

        let report = merge_dir(src.path(), dest.path()).unwrap();

        assert_eq!(read(dest.path(), "README.md"), "generator readme");
        assert_eq!(report.skipped, vec![dest.path().join("README.md")]);
        assert!(report.copied.is_empty());
    }

    #[test]
    fn test_forced_files_are_always_overwritten() {
        let src = TempDir::new().unwrap();
        let dest = TempDir::new().unwrap();
        write(src.path(), ".prettierrc", "{\"semi\": false}");
        write(src.path(), "src/app/globals.css", "body {}");
        write(src.path(), "src/app/page.tsx", "template page");
        write(dest.path(), ".prettierrc", "{}");
        write(dest.path(), "src/app/globals.css", ":root {}");
        write(dest.path(), "src/app/page.tsx", "generated page");

        merge_dir(src.path(), dest.path()).unwrap();

        assert_eq!(read(dest.path(), ".prettierrc"), "{\"semi\": false}");
        assert_eq!(read(dest.path(), "src/app/globals.css"), "body {}");
        assert_eq!(read(dest.path(), "src/app/page.tsx"), "template page");
    }

    #[test]
    fn test_second_merge_leaves_unforced_files_untouched() {
        let src = TempDir::new().unwrap();
        let dest = TempDir::new().unwrap();
        write(src.path(), "docs/notes.md", "from template");

        merge_dir(src.path(), dest.path()).unwrap();
        write(dest.path(), "docs/notes.md", "edited by user");
        let report = merge_dir(src.path(), dest.path()).unwrap();

        assert_eq!(read(dest.path(), "docs/notes.md"), "edited by user");
        assert!(report.copied.is_empty());
    }

    fn bundled_file(path: &str, contents: &'static str) -> TemplateFile {
        TemplateFile {
            path: path.to_string(),
            contents: contents.as_bytes().into(),
        }
    }

    #[test]
    fn test_bundled_files_follow_policy() {
        let dest = TempDir::new().unwrap();
        write(dest.path(), "README.md", "generator readme");
        write(dest.path(), "src/app/page.tsx", "generated page");
        let files = vec![
            bundled_file(".vscode/settings.json", "{}"),
            bundled_file("README.md", "template readme"),
            bundled_file("src/app/page.tsx", "template page"),
        ];

        let report = merge_source(&TemplateSource::Bundled(files), dest.path()).unwrap();

        assert_eq!(read(dest.path(), ".vscode/settings.json"), "{}");
        assert_eq!(read(dest.path(), "README.md"), "generator readme");
        assert_eq!(read(dest.path(), "src/app/page.tsx"), "template page");
        assert_eq!(report.skipped, vec![dest.path().join("README.md")]);
        assert_eq!(report.copied.len(), 2);
    }

    #[test]
    fn test_never_deletes_destination_entries() {
        let src = TempDir::new().unwrap();
        let dest = TempDir::new().unwrap();
        write(src.path(), "src/app/layout.tsx", "layout");
        write(dest.path(), "src/app/favicon.ico", "icon");
        write(dest.path(), "package.json", "{}");
        fs::create_dir_all(dest.path().join("node_modules/.bin")).unwrap();

        merge_dir(src.path(), dest.path()).unwrap();

        assert!(dest.path().join("src/app/favicon.ico").exists());
        assert!(dest.path().join("package.json").exists());
        assert!(dest.path().join("node_modules/.bin").is_dir());
    }
}
