//! Product configuration trait for CLI binaries
//!
//! This trait defines what a binary must supply to drive the scaffolding
//! workflow: identity, the generator it shells out to, where templates live,
//! and what to tell the user afterwards.

use crate::selections::PackageManager;
use crate::templates::TemplateFile;
use std::path::Path;

/// Configuration trait for a scaffolding product
pub trait ProductConfig: Clone + Send + Sync + 'static {
    /// Internal product name (used for CLI command, env vars)
    fn name(&self) -> &'static str;

    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// Package spec of the framework generator run through `npx`
    fn generator(&self) -> &'static str;

    /// Fixed flags passed to the generator after the target directory
    fn generator_flags(&self) -> &'static [&'static str];

    /// Environment variable name for overriding the template directory
    fn template_dir_env(&self) -> &'static str;

    /// Template files shipped inside the binary, used when neither flag nor
    /// env var names a directory
    fn bundled_templates(&self) -> Vec<TemplateFile>;

    /// URL for product documentation
    fn docs_url(&self) -> &'static str;

    /// Generate the "next steps" instructions after project creation
    fn next_steps(&self, dir: &Path, package_manager: PackageManager) -> Vec<String>;
}
