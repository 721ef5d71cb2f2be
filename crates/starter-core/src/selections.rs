//! User choices gathered before anything touches the filesystem

use clap::ValueEnum;
use std::collections::BTreeSet;
use std::fmt;

/// Where the project should live relative to the current directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LocationMode {
    /// Create a new folder named after the project
    #[default]
    NewFolder,
    /// Scaffold into the current directory
    CurrentDir,
}

impl LocationMode {
    pub fn display_name(&self) -> &'static str {
        match self {
            LocationMode::NewFolder => "New folder",
            LocationMode::CurrentDir => "Current directory",
        }
    }
}

/// Supported package managers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum)]
pub enum PackageManager {
    #[default]
    Npm,
    Yarn,
}

impl PackageManager {
    /// Executable name
    pub fn program(&self) -> &'static str {
        match self {
            PackageManager::Npm => "npm",
            PackageManager::Yarn => "yarn",
        }
    }

    /// Arguments that add packages, optionally as development dependencies
    pub fn add_args(&self, dev: bool) -> Vec<&'static str> {
        let mut args = match self {
            PackageManager::Npm => vec!["install"],
            PackageManager::Yarn => vec!["add"],
        };
        if dev {
            args.push("-D");
        }
        args
    }

    /// Arguments for a plain reinstall of the lockfile
    pub fn install_args(&self) -> Vec<&'static str> {
        vec!["install"]
    }

    /// Flag telling the generator which package manager to record
    pub fn generator_flag(&self) -> &'static str {
        match self {
            PackageManager::Npm => "--use-npm",
            PackageManager::Yarn => "--use-yarn",
        }
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program())
    }
}

/// Optional capabilities, in declaration order
///
/// The derived ordering is the declaration order, so iterating a
/// `BTreeSet<FeatureId>` always visits features in the same sequence no
/// matter what order the user picked them in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, ValueEnum)]
pub enum FeatureId {
    Tailwind,
    Shadcn,
    Prisma,
    Zustand,
    ReactQuery,
    FramerMotion,
    I18n,
    Jwt,
}

impl FeatureId {
    pub const ALL: [FeatureId; 8] = [
        FeatureId::Tailwind,
        FeatureId::Shadcn,
        FeatureId::Prisma,
        FeatureId::Zustand,
        FeatureId::ReactQuery,
        FeatureId::FramerMotion,
        FeatureId::I18n,
        FeatureId::Jwt,
    ];

    /// Name used on the command line
    pub fn cli_name(&self) -> &'static str {
        match self {
            FeatureId::Tailwind => "tailwind",
            FeatureId::Shadcn => "shadcn",
            FeatureId::Prisma => "prisma",
            FeatureId::Zustand => "zustand",
            FeatureId::ReactQuery => "react-query",
            FeatureId::FramerMotion => "framer-motion",
            FeatureId::I18n => "i18n",
            FeatureId::Jwt => "jwt",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            FeatureId::Tailwind => "Tailwind CSS",
            FeatureId::Shadcn => "shadcn/ui",
            FeatureId::Prisma => "Prisma (SQLite)",
            FeatureId::Zustand => "Zustand",
            FeatureId::ReactQuery => "TanStack Query",
            FeatureId::FramerMotion => "Framer Motion",
            FeatureId::I18n => "next-intl",
            FeatureId::Jwt => "JSON Web Tokens",
        }
    }

    /// Short description shown next to the feature in prompts
    pub fn hint(&self) -> &'static str {
        match self {
            FeatureId::Tailwind => "styling",
            FeatureId::Shadcn => "UI components",
            FeatureId::Prisma => "ORM + migrations",
            FeatureId::Zustand => "state management",
            FeatureId::ReactQuery => "data fetching",
            FeatureId::FramerMotion => "animation",
            FeatureId::I18n => "internationalization",
            FeatureId::Jwt => "token auth",
        }
    }
}

impl fmt::Display for FeatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.cli_name())
    }
}

/// Answers collected from the user; never modified after collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSelections {
    pub name: String,
    pub location: LocationMode,
    pub package_manager: PackageManager,
    pub features: BTreeSet<FeatureId>,
}
