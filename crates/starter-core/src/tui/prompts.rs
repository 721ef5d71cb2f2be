//! Charm-style CLI prompts using cliclack

use crate::answers::{Presets, Prompter};
use crate::builder::{scaffold, ProjectBuilder};
use crate::error::StarterError;
use crate::pipeline::{Progress, RunSummary, Step, StepWarning};
use crate::product::ProductConfig;
use crate::project::ProjectPath;
use crate::runtime::{check, SystemRunner};
use crate::selections::{FeatureId, LocationMode, PackageManager, UserSelections};
use crate::templates::{self, MergeReport};
use anyhow::{Context, Result};
use colored::Colorize;
use std::io;
use std::path::{Path, PathBuf};

/// CLI arguments for the create command
#[derive(Debug, Clone, Default)]
pub struct CreateArgs {
    /// Project name
    pub name: Option<String>,

    /// Scaffold into the current directory instead of a new folder
    pub here: bool,

    /// Package manager to install with
    pub package_manager: Option<PackageManager>,

    /// Features to enable
    pub features: Option<Vec<FeatureId>>,

    /// Local directory to use for templates
    pub template_dir: Option<PathBuf>,

    /// Skip the Node.js / package manager check
    pub skip_runtime_check: bool,

    /// Accept defaults for every prompt except the name
    pub yes: bool,
}

impl CreateArgs {
    fn presets(&self) -> Presets {
        Presets {
            name: self.name.clone(),
            location: self.here.then_some(LocationMode::CurrentDir),
            package_manager: self.package_manager,
            features: self.features.clone(),
            accept_defaults: self.yes,
        }
    }
}

/// Run the CLI with interactive prompts
pub async fn run<C: ProductConfig>(config: &C, args: CreateArgs) -> Result<()> {
    cliclack::intro(config.display_name())?;

    let cwd = std::env::current_dir().context("Failed to read current directory")?;
    let templates = templates::resolve_template_source(config, args.template_dir.as_deref());
    let runner = SystemRunner;
    let builder = ProjectBuilder::new(config, &runner, templates);

    let skip_runtime_check = args.skip_runtime_check;
    let mut preflight = |selections: &UserSelections| -> std::result::Result<(), StarterError> {
        if skip_runtime_check {
            let _ = cliclack::log::info("Skipping runtime check");
            Ok(())
        } else {
            check_runtimes(selections.package_manager)
        }
    };

    let mut progress = CliclackProgress::new(&cwd);
    let done = scaffold(
        &builder,
        &cwd,
        &args.presets(),
        &mut CliclackPrompter,
        &mut preflight,
        &mut progress,
    )
    .await?;

    print_summary(config, &done.project, &done.selections, &done.summary)?;

    Ok(())
}

/// Print a fatal error the way the prompts render everything else
pub fn report_error<C: ProductConfig>(config: &C, err: &anyhow::Error) {
    let _ = match err.downcast_ref::<StarterError>() {
        Some(StarterError::Cancelled) => cliclack::outro_cancel("Setup cancelled."),
        Some(StarterError::CommandFailed { .. }) => cliclack::log::error(format!("{}", err))
            .and_then(|_| {
                cliclack::outro_cancel(format!(
                    "This step cannot be recovered automatically. Fix the problem above and run {} again from scratch.",
                    config.name()
                ))
            }),
        _ => cliclack::log::error(format!("{:#}", err))
            .and_then(|_| cliclack::outro_cancel("Setup failed.")),
    };
}

fn check_runtimes(pm: PackageManager) -> std::result::Result<(), StarterError> {
    let spinner = cliclack::spinner();
    spinner.start("Checking runtimes...");

    match check::check_runtimes(pm) {
        Ok(runtimes) => {
            let runtime_info: Vec<String> = runtimes
                .iter()
                .map(|r| format!("{} ({})", r.name, r.version.as_deref().unwrap_or("unknown")))
                .collect();
            spinner.stop(format!("Detected runtimes: {}", runtime_info.join(", ")));
            Ok(())
        }
        Err(e) => {
            spinner.error("Missing runtimes");
            Err(e)
        }
    }
}

fn print_summary<C: ProductConfig>(
    config: &C,
    project: &ProjectPath,
    selections: &UserSelections,
    summary: &RunSummary,
) -> Result<()> {
    if summary.warnings.is_empty() {
        cliclack::log::success(format!(
            "Created {} in {}",
            selections.name,
            project.path().display()
        ))?;
    } else {
        cliclack::log::warning(format!(
            "Created {} with {} step(s) needing attention",
            selections.name,
            summary.warnings.len()
        ))?;
        for warning in &summary.warnings {
            if let Some(cmd) = &warning.recovery {
                println!("  {} {}", "-".yellow(), cmd);
            }
        }
    }

    let steps = config.next_steps(project.path(), selections.package_manager);

    println!();
    println!("  Next steps");
    println!();

    for (i, step) in steps.iter().enumerate() {
        println!("  {}.  {}", i + 1, step);
    }
    println!();
    println!("  {} {}", "Docs:".dimmed(), config.docs_url());

    cliclack::outro("Happy coding!")?;

    Ok(())
}

/// Prompts backed by cliclack
struct CliclackPrompter;

impl Prompter for CliclackPrompter {
    fn project_name(&mut self) -> io::Result<String> {
        cliclack::input("Project name")
            .placeholder("my-app")
            .validate(|input: &String| {
                if input.trim().is_empty() {
                    Err("Please enter a project name")
                } else {
                    Ok(())
                }
            })
            .interact()
    }

    fn location(&mut self, name: &str) -> io::Result<LocationMode> {
        cliclack::select("Where should the project be created?")
            .item(
                LocationMode::NewFolder,
                format!("New folder ./{}", name),
                "",
            )
            .item(LocationMode::CurrentDir, "Current directory", "")
            .interact()
    }

    fn package_manager(&mut self) -> io::Result<PackageManager> {
        cliclack::select("Package manager")
            .item(PackageManager::Npm, "npm", "")
            .item(PackageManager::Yarn, "yarn", "")
            .interact()
    }

    fn features(&mut self) -> io::Result<Vec<FeatureId>> {
        let mut multi = cliclack::multiselect("Select features (optional)");
        for feature in FeatureId::ALL {
            multi = multi.item(feature, feature.display_name(), feature.hint());
        }
        multi.required(false).interact()
    }

    fn announce(&mut self, label: &str, value: &str) -> io::Result<()> {
        cliclack::log::info(format!("{}: {}", label, value))
    }
}

/// Step announcements rendered with cliclack
struct CliclackProgress {
    root: PathBuf,
}

impl CliclackProgress {
    fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
        }
    }

    fn relative<'p>(&self, path: &'p Path) -> &'p Path {
        path.strip_prefix(&self.root).unwrap_or(path)
    }
}

impl Progress for CliclackProgress {
    fn step_started(&mut self, step: &Step) {
        let _ = cliclack::log::step(format!("{}...", step.title));
    }

    fn templates_merged(&mut self, report: &MergeReport) {
        if report.copied.is_empty() {
            let _ = cliclack::log::info("No template files to copy");
            return;
        }
        let lines: Vec<String> = report
            .copied
            .iter()
            .map(|p| format!("{}", self.relative(p).display()).dimmed().to_string())
            .collect();
        let _ = cliclack::log::success(format!(
            "Copied {} template file(s)\n{}",
            report.copied.len(),
            lines.join("\n")
        ));
    }

    fn step_warning(&mut self, warning: &StepWarning) {
        let mut message = format!("{} failed: {}", warning.step, warning.error);
        if let Some(cmd) = &warning.recovery {
            message.push_str(&format!("\nRun it manually later: {}", cmd));
        }
        let _ = cliclack::log::warning(message);
    }
}
