//! Starter Core - Shared library for starter-application scaffolding CLIs
//!
//! This library drives an external framework generator, merges static
//! templates over its output, installs the packages each selected feature
//! needs, and wires those features into the generated project.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Core Operations** - Directory merging, dependency planning, file edits,
//!   runtime detection, and the command runner
//! - **Layer 2: Workflow Orchestration** - `ProductConfig` trait, the step pipeline, and
//!   `ProjectBuilder` for custom UIs
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based prompts (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based TUI prompts module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use starter_core::{ProjectBuilder, ProjectPath, SystemRunner, pipeline::Quiet};
//! use std::path::Path;
//!
//! let runner = SystemRunner;
//! let builder = ProjectBuilder::new(&MyConfig, &runner, Path::new("templates/next"));
//! let project = ProjectPath::resolve(&cwd, &selections)?;
//! let summary = builder.build(&selections, &project, &mut Quiet).await?;
//! ```

pub mod answers;
pub mod builder;
pub mod error;
pub mod features;
pub mod logging;
pub mod pipeline;
pub mod plan;
pub mod product;
pub mod project;
pub mod runtime;
pub mod selections;
pub mod templates;
pub mod wiring;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use builder::{create_project, scaffold, ProjectBuilder, Scaffolded};
pub use error::{CommandCause, StarterError};
pub use plan::{plan_dependencies, DependencyPlan};
pub use product::ProductConfig;
pub use project::ProjectPath;
pub use runtime::{CommandRunner, CommandSpec, MockRunner, SystemRunner};
pub use selections::{FeatureId, LocationMode, PackageManager, UserSelections};
pub use templates::{merge_dir, MergeReport, TemplateFile, TemplateSource};

#[cfg(feature = "tui")]
pub use tui::run;
