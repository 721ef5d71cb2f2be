//! create-starter - Next.js starter scaffolding with optional feature wiring

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use rust_embed::RustEmbed;
use starter_core::features::{BASELINE_DEV_PACKAGES, FEATURES};
use starter_core::templates::{self, TemplateFile};
use starter_core::tui::CreateArgs;
use starter_core::{FeatureId, PackageManager, ProductConfig};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Files merged over every generated project
#[derive(RustEmbed)]
#[folder = "templates/next"]
struct NextTemplates;

/// Next.js starter product configuration
#[derive(Clone)]
pub struct NextStarterConfig;

impl ProductConfig for NextStarterConfig {
    fn name(&self) -> &'static str {
        "create-starter"
    }

    fn display_name(&self) -> &'static str {
        "create-starter"
    }

    fn generator(&self) -> &'static str {
        "create-next-app@latest"
    }

    fn generator_flags(&self) -> &'static [&'static str] {
        &[
            "--ts",
            "--eslint",
            "--app",
            "--src-dir",
            "--no-tailwind",
            "--import-alias",
            "@/*",
            "--skip-install",
        ]
    }

    fn template_dir_env(&self) -> &'static str {
        "CREATE_STARTER_TEMPLATE_DIR"
    }

    fn bundled_templates(&self) -> Vec<TemplateFile> {
        templates::bundled::<NextTemplates>()
    }

    fn docs_url(&self) -> &'static str {
        "https://nextjs.org/docs"
    }

    fn next_steps(&self, dir: &Path, pm: PackageManager) -> Vec<String> {
        let mut steps = Vec::new();
        let current = std::env::current_dir().ok();

        // Step 1: cd to directory if not current
        if current.as_deref() != Some(dir) {
            steps.push(format!("cd {}", dir.display()));
        }

        // Step 2: Start dev server
        steps.push(match pm {
            PackageManager::Npm => "npm run dev".to_string(),
            PackageManager::Yarn => "yarn dev".to_string(),
        });

        steps
    }
}

#[derive(Parser, Debug)]
#[command(name = "create-starter")]
#[command(about = "CLI for scaffolding Next.js starter applications")]
#[command(version)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub create: CliCreateArgs,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new project (default)
    Create(CliCreateArgs),
    /// List the optional features and the packages each one installs
    Features,
}

#[derive(Parser, Debug, Default)]
pub struct CliCreateArgs {
    /// Project name
    pub name: Option<String>,

    /// Scaffold into the current directory instead of a new folder
    #[arg(long)]
    pub here: bool,

    /// Package manager to install with
    #[arg(short, long, value_enum)]
    pub package_manager: Option<PackageManager>,

    /// Features to enable (comma-separated, e.g. tailwind,prisma)
    #[arg(short, long, value_enum, value_delimiter = ',')]
    pub features: Option<Vec<FeatureId>>,

    /// Local directory to use for templates (for development use)
    #[arg(long = "template-dir")]
    pub template_dir: Option<PathBuf>,

    /// Skip the Node.js / package manager check
    #[arg(long = "skip-runtime-check")]
    pub skip_runtime_check: bool,

    /// Accept defaults for every prompt except the project name
    #[arg(short, long)]
    pub yes: bool,

    /// Show diagnostic logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl From<CliCreateArgs> for CreateArgs {
    fn from(args: CliCreateArgs) -> Self {
        CreateArgs {
            name: args.name,
            here: args.here,
            package_manager: args.package_manager,
            features: args.features,
            template_dir: args.template_dir,
            skip_runtime_check: args.skip_runtime_check,
            yes: args.yes,
        }
    }
}

fn print_features() {
    println!("{}", "Available features".cyan().bold());
    println!();
    for feature in FEATURES {
        println!(
            "  {} {}",
            feature.id.cli_name().green().bold(),
            format!("({})", feature.id.hint()).dimmed()
        );
        if !feature.runtime.is_empty() {
            println!("      {} {}", "deps:".dimmed(), feature.runtime.join(" "));
        }
        if !feature.dev.is_empty() {
            println!("      {} {}", "dev:".dimmed(), feature.dev.join(" "));
        }
    }
    println!();
    println!(
        "{} {}",
        "Always installed (dev):".dimmed(),
        BASELINE_DEV_PACKAGES.join(" ")
    );
}

async fn create(config: &NextStarterConfig, args: CliCreateArgs) -> Result<()> {
    starter_core::logging::init(args.verbose);

    let result = starter_core::run(config, args.into()).await;

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    result
}

#[tokio::main]
async fn main() -> ExitCode {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(1);
    })
    .ok();

    let args = Args::parse();
    let config = NextStarterConfig;

    let result = match args.command {
        Some(Command::Create(create_args)) => create(&config, create_args).await,
        Some(Command::Features) => {
            print_features();
            Ok(())
        }
        // No subcommand provided, default to create behavior
        None => create(&config, args.create).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            starter_core::tui::report_error(&config, &err);
            ExitCode::from(1)
        }
    }
}
