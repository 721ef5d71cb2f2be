//! Workflow orchestration independent of any UI

use crate::answers::{collect_selections, Presets, Prompter};
use crate::error::Result;
use crate::pipeline::{build_steps, run_steps, Progress, RunSummary, Step};
use crate::product::ProductConfig;
use crate::project::ProjectPath;
use crate::runtime::CommandRunner;
use crate::selections::UserSelections;
use crate::templates::TemplateSource;
use std::path::Path;

/// Check run once the selections are known and before anything is created
pub type Preflight<'p> = dyn FnMut(&UserSelections) -> Result<()> + 'p;

/// Assembles a project from selections once its directory is resolved
pub struct ProjectBuilder<'a, C: ProductConfig> {
    config: &'a C,
    runner: &'a dyn CommandRunner,
    templates: TemplateSource,
}

impl<'a, C: ProductConfig> ProjectBuilder<'a, C> {
    pub fn new(
        config: &'a C,
        runner: &'a dyn CommandRunner,
        templates: impl Into<TemplateSource>,
    ) -> Self {
        Self {
            config,
            runner,
            templates: templates.into(),
        }
    }

    /// The steps a build would run, without running them
    pub fn steps(&self, selections: &UserSelections, project: &ProjectPath) -> Vec<Step> {
        build_steps(self.config, selections, project, &self.templates)
    }

    /// Create the project directory and run every step
    pub async fn build(
        &self,
        selections: &UserSelections,
        project: &ProjectPath,
        progress: &mut dyn Progress,
    ) -> Result<RunSummary> {
        project.prepare()?;
        let steps = self.steps(selections, project);
        run_steps(self.runner, project, &steps, progress).await
    }
}

/// Resolve the project directory under `cwd` and build it
pub async fn create_project<C: ProductConfig>(
    builder: &ProjectBuilder<'_, C>,
    cwd: &Path,
    selections: &UserSelections,
    progress: &mut dyn Progress,
) -> Result<(ProjectPath, RunSummary)> {
    let project = ProjectPath::resolve(cwd, selections)?;
    let summary = builder.build(selections, &project, progress).await?;
    Ok((project, summary))
}

/// Result of a complete session
#[derive(Debug)]
pub struct Scaffolded {
    pub selections: UserSelections,
    pub project: ProjectPath,
    pub summary: RunSummary,
}

/// Run a whole session: collect answers, resolve the directory, run the
/// preflight, then build.
///
/// Nothing is written and no command runs until the answers are complete,
/// the directory is known to be usable and the preflight has passed.
pub async fn scaffold<C: ProductConfig>(
    builder: &ProjectBuilder<'_, C>,
    cwd: &Path,
    presets: &Presets,
    prompter: &mut dyn Prompter,
    preflight: &mut Preflight<'_>,
    progress: &mut dyn Progress,
) -> Result<Scaffolded> {
    let selections = collect_selections(presets, prompter)?;
    let project = ProjectPath::resolve(cwd, &selections)?;
    preflight(&selections)?;
    let summary = builder.build(&selections, &project, progress).await?;

    Ok(Scaffolded {
        selections,
        project,
        summary,
    })
}
