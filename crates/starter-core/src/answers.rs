//! Answer collection
//!
//! Questions are asked in a fixed order: name, location, package manager,
//! features. Any answer supplied up front (CLI flags) skips its prompt.
//! Cancelling any prompt ends collection with [`StarterError::Cancelled`]
//! before anything is written to disk.

use crate::error::{Result, StarterError};
use crate::project::validate_name;
use crate::selections::{FeatureId, LocationMode, PackageManager, UserSelections};
use std::io;

/// Source of interactive answers
///
/// Implementations return `io::ErrorKind::Interrupted` when the user cancels.
pub trait Prompter {
    fn project_name(&mut self) -> io::Result<String>;
    fn location(&mut self, name: &str) -> io::Result<LocationMode>;
    fn package_manager(&mut self) -> io::Result<PackageManager>;
    fn features(&mut self) -> io::Result<Vec<FeatureId>>;

    /// Report an answer that was supplied without prompting
    fn announce(&mut self, _label: &str, _value: &str) -> io::Result<()> {
        Ok(())
    }
}

/// Answers known before prompting
#[derive(Debug, Clone, Default)]
pub struct Presets {
    pub name: Option<String>,
    pub location: Option<LocationMode>,
    pub package_manager: Option<PackageManager>,
    pub features: Option<Vec<FeatureId>>,
    /// Use defaults instead of prompting for everything except the name
    pub accept_defaults: bool,
}

/// Gather the user's selections
pub fn collect_selections(presets: &Presets, prompter: &mut dyn Prompter) -> Result<UserSelections> {
    let name = match &presets.name {
        Some(name) => {
            announce(prompter, "Project name", name)?;
            name.clone()
        }
        None if presets.accept_defaults => String::new(),
        None => prompter.project_name().map_err(StarterError::from_prompt)?,
    };
    let name = name.trim().to_string();
    validate_name(&name)?;

    let location = match presets.location {
        Some(location) => {
            announce(prompter, "Location", location.display_name())?;
            location
        }
        None if presets.accept_defaults => LocationMode::default(),
        None => prompter.location(&name).map_err(StarterError::from_prompt)?,
    };

    let package_manager = match presets.package_manager {
        Some(pm) => {
            announce(prompter, "Package manager", pm.program())?;
            pm
        }
        None if presets.accept_defaults => PackageManager::default(),
        None => prompter.package_manager().map_err(StarterError::from_prompt)?,
    };

    let features = match &presets.features {
        Some(features) => {
            let names: Vec<&str> = features.iter().map(|f| f.cli_name()).collect();
            announce(prompter, "Features", &names.join(", "))?;
            features.clone()
        }
        None if presets.accept_defaults => Vec::new(),
        None => prompter.features().map_err(StarterError::from_prompt)?,
    };

    Ok(UserSelections {
        name,
        location,
        package_manager,
        features: features.into_iter().collect(),
    })
}

fn announce(prompter: &mut dyn Prompter, label: &str, value: &str) -> Result<()> {
    prompter
        .announce(label, value)
        .map_err(StarterError::from_prompt)
}
