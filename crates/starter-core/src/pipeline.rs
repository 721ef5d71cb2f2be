//! Ordered step pipeline
//!
//! Scaffolding is a fixed list of steps, each tagged with what happens when
//! it fails. [`build_steps`] turns the user's selections into that list and
//! [`run_steps`] executes it in order. A fatal failure stops the run; a
//! recoverable one becomes a warning naming the command to run by hand.

use crate::error::Result;
use crate::features::{self, Wiring};
use crate::plan::{plan_dependencies, DependencyPlan};
use crate::product::ProductConfig;
use crate::project::ProjectPath;
use crate::runtime::{CommandRunner, CommandSpec};
use crate::selections::UserSelections;
use crate::templates::{self, MergeReport, TemplateSource};
use crate::wiring::FileEdit;
use std::path::PathBuf;

/// Dependency-freshness tool run after wiring
pub const FRESHNESS_UPDATER: &[&str] = &["npm-check-updates", "-u"];

/// What happens to the run when a step fails
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fatality {
    /// Abort the whole run
    Fatal,
    /// Record a warning and continue with the next step
    Recoverable,
}

/// The work a step performs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepAction {
    Run(CommandSpec),
    MergeTemplates { source: TemplateSource },
    Edit(FileEdit),
}

/// One entry in the pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub title: String,
    pub action: StepAction,
    pub fatality: Fatality,
    /// Manual command shown to the user when a recoverable step fails
    pub recovery: Option<String>,
}

impl Step {
    fn fatal(title: impl Into<String>, action: StepAction) -> Self {
        Self {
            title: title.into(),
            action,
            fatality: Fatality::Fatal,
            recovery: None,
        }
    }

    fn recoverable(title: impl Into<String>, spec: CommandSpec) -> Self {
        let recovery = Some(spec.command_line());
        Self {
            title: title.into(),
            action: StepAction::Run(spec),
            fatality: Fatality::Recoverable,
            recovery,
        }
    }
}

/// A recoverable step that failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepWarning {
    pub step: String,
    pub error: String,
    pub recovery: Option<String>,
}

/// Outcome of a completed run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub completed: usize,
    pub warnings: Vec<StepWarning>,
    pub written: Vec<PathBuf>,
}

/// Receives progress events from [`run_steps`]
pub trait Progress {
    /// Called before a step starts
    fn step_started(&mut self, step: &Step);

    /// Called after template files were merged
    fn templates_merged(&mut self, _report: &MergeReport) {}

    /// Called when a recoverable step failed
    fn step_warning(&mut self, _warning: &StepWarning) {}
}

/// Progress sink that ignores everything
#[derive(Debug, Default)]
pub struct Quiet;

impl Progress for Quiet {
    fn step_started(&mut self, _step: &Step) {}
}

/// Build the ordered step list for a run
pub fn build_steps<C: ProductConfig>(
    config: &C,
    selections: &UserSelections,
    project: &ProjectPath,
    templates: &TemplateSource,
) -> Vec<Step> {
    let dir = project.path();
    let pm = selections.package_manager;
    let mut steps = Vec::new();

    // Generator runs inside the (empty) project directory
    let bootstrap = CommandSpec::new("npx", dir)
        .args(["--yes", config.generator(), "."])
        .args(config.generator_flags().iter().copied())
        .arg(pm.generator_flag());
    steps.push(Step::fatal(
        format!("Bootstrapping project with {}", config.generator()),
        StepAction::Run(bootstrap),
    ));

    steps.push(Step::fatal(
        "Applying templates",
        StepAction::MergeTemplates {
            source: templates.clone(),
        },
    ));

    let DependencyPlan { runtime, dev } = plan_dependencies(&selections.features);
    if !runtime.is_empty() {
        let install = CommandSpec::new(pm.program(), dir)
            .args(pm.add_args(false))
            .args(runtime);
        steps.push(Step::fatal("Installing dependencies", StepAction::Run(install)));
    }
    if !dev.is_empty() {
        let install = CommandSpec::new(pm.program(), dir)
            .args(pm.add_args(true))
            .args(dev);
        steps.push(Step::fatal("Installing dev dependencies", StepAction::Run(install)));
    }

    for id in &selections.features {
        for wiring in features::spec(*id).wiring {
            steps.push(match *wiring {
                Wiring::Tool {
                    title,
                    program,
                    args,
                } => Step::recoverable(
                    title,
                    CommandSpec::new(program, dir).args(args.iter().copied()),
                ),
                Wiring::Edit(edit) => Step::fatal(edit.describe(), StepAction::Edit(edit)),
            });
        }
    }

    steps.push(Step::recoverable(
        "Updating dependencies to latest versions",
        CommandSpec::new("npx", dir).args(FRESHNESS_UPDATER.iter().copied()),
    ));
    steps.push(Step::recoverable(
        "Reinstalling dependencies",
        CommandSpec::new(pm.program(), dir).args(pm.install_args()),
    ));

    steps
}

/// Execute `steps` in order inside `project`
pub async fn run_steps(
    runner: &dyn CommandRunner,
    project: &ProjectPath,
    steps: &[Step],
    progress: &mut dyn Progress,
) -> Result<RunSummary> {
    let mut summary = RunSummary::default();

    for step in steps {
        progress.step_started(step);
        tracing::debug!(step = %step.title, fatality = ?step.fatality, "starting step");

        match execute(runner, project, step, progress).await {
            Ok(written) => {
                summary.completed += 1;
                summary.written.extend(written);
            }
            Err(err) if step.fatality == Fatality::Recoverable => {
                tracing::warn!(step = %step.title, error = %err, "recoverable step failed");
                let warning = StepWarning {
                    step: step.title.clone(),
                    error: err.to_string(),
                    recovery: step.recovery.as_deref().map(|cmd| project.manual_command(cmd)),
                };
                progress.step_warning(&warning);
                summary.warnings.push(warning);
            }
            Err(err) => return Err(err),
        }
    }

    Ok(summary)
}

async fn execute(
    runner: &dyn CommandRunner,
    project: &ProjectPath,
    step: &Step,
    progress: &mut dyn Progress,
) -> Result<Vec<PathBuf>> {
    match &step.action {
        StepAction::Run(spec) => runner.run(spec).await.map(|_| Vec::new()),
        StepAction::MergeTemplates { source } => {
            let report = templates::merge_source(source, project.path())?;
            progress.templates_merged(&report);
            Ok(report.copied)
        }
        StepAction::Edit(edit) => edit.apply(project.path()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selections::{FeatureId, LocationMode, PackageManager};
    use crate::templates::TemplateFile;
    use std::path::Path;
    use std::collections::BTreeSet;
    use tempfile::TempDir;

    #[derive(Clone)]
    struct TestConfig;

    impl ProductConfig for TestConfig {
        fn name(&self) -> &'static str {
            "test"
        }
        fn display_name(&self) -> &'static str {
            "Test"
        }
        fn generator(&self) -> &'static str {
            "create-next-app@latest"
        }
        fn generator_flags(&self) -> &'static [&'static str] {
            &["--ts", "--eslint"]
        }
        fn template_dir_env(&self) -> &'static str {
            "TEST_TEMPLATE_DIR"
        }
        fn bundled_templates(&self) -> Vec<TemplateFile> {
            Vec::new()
        }
        fn docs_url(&self) -> &'static str {
            "https://example.com"
        }
        fn next_steps(&self, _dir: &Path, _pm: PackageManager) -> Vec<String> {
            Vec::new()
        }
    }

    fn selections(features: &[FeatureId], pm: PackageManager) -> UserSelections {
        UserSelections {
            name: "demo".to_string(),
            location: LocationMode::NewFolder,
            package_manager: pm,
            features: features.iter().copied().collect::<BTreeSet<_>>(),
        }
    }

    fn templates_dir() -> TemplateSource {
        TemplateSource::from(Path::new("templates"))
    }

    fn titles_and_fatality(steps: &[Step]) -> Vec<(String, Fatality)> {
        steps
            .iter()
            .map(|s| (s.title.clone(), s.fatality))
            .collect()
    }

    #[test]
    fn test_steps_without_features() {
        let cwd = TempDir::new().unwrap();
        let sel = selections(&[], PackageManager::Npm);
        let project = ProjectPath::resolve(cwd.path(), &sel).unwrap();
        let steps = build_steps(&TestConfig, &sel, &project, &templates_dir());

        assert_eq!(
            titles_and_fatality(&steps),
            vec![
                ("Bootstrapping project with create-next-app@latest".to_string(), Fatality::Fatal),
                ("Applying templates".to_string(), Fatality::Fatal),
                ("Installing dev dependencies".to_string(), Fatality::Fatal),
                ("Updating dependencies to latest versions".to_string(), Fatality::Recoverable),
                ("Reinstalling dependencies".to_string(), Fatality::Recoverable),
            ]
        );
    }

    #[test]
    fn test_bootstrap_command_carries_fixed_flags() {
        let cwd = TempDir::new().unwrap();
        let sel = selections(&[], PackageManager::Yarn);
        let project = ProjectPath::resolve(cwd.path(), &sel).unwrap();
        let steps = build_steps(&TestConfig, &sel, &project, &templates_dir());

        let StepAction::Run(spec) = &steps[0].action else {
            panic!("bootstrap should run a command");
        };
        assert_eq!(
            spec.command_line(),
            "npx --yes create-next-app@latest . --ts --eslint --use-yarn"
        );
        assert_eq!(spec.cwd, project.path());
    }

    #[test]
    fn test_wiring_follows_declaration_order_with_fatality() {
        let cwd = TempDir::new().unwrap();
        let sel = selections(&[FeatureId::Prisma, FeatureId::Tailwind], PackageManager::Npm);
        let project = ProjectPath::resolve(cwd.path(), &sel).unwrap();
        let steps = build_steps(&TestConfig, &sel, &project, &templates_dir());

        let wiring: Vec<_> = titles_and_fatality(&steps[4..steps.len() - 2]);
        assert_eq!(
            wiring,
            vec![
                ("Initializing Tailwind CSS".to_string(), Fatality::Recoverable),
                (
                    "Updating content glob in tailwind.config.ts / tailwind.config.js".to_string(),
                    Fatality::Fatal
                ),
                (
                    "Updating src/app/globals.css, src/styles/globals.css".to_string(),
                    Fatality::Fatal
                ),
                ("Writing prisma/schema.prisma".to_string(), Fatality::Fatal),
                ("Generating Prisma client".to_string(), Fatality::Recoverable),
                ("Running initial Prisma migration".to_string(), Fatality::Recoverable),
            ]
        );
    }

    #[test]
    fn test_recoverable_steps_carry_manual_command() {
        let cwd = TempDir::new().unwrap();
        let sel = selections(&[FeatureId::Shadcn], PackageManager::Npm);
        let project = ProjectPath::resolve(cwd.path(), &sel).unwrap();
        let steps = build_steps(&TestConfig, &sel, &project, &templates_dir());

        for step in steps.iter().filter(|s| s.fatality == Fatality::Recoverable) {
            assert!(step.recovery.is_some(), "{} has no recovery hint", step.title);
        }
        let shadcn = steps
            .iter()
            .find(|s| s.title == "Initializing shadcn/ui")
            .unwrap();
        assert_eq!(shadcn.recovery.as_deref(), Some("npx shadcn@latest init -d"));
    }
}
