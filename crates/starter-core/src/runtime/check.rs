//! Runtime detection for Node.js and the selected package manager

use super::version::{check_minimum, MIN_NODE_VERSION};
use crate::error::{Result, StarterError};
use crate::selections::PackageManager;
use std::process::Command;

/// Runtime detection result
#[derive(Debug, Clone)]
pub struct RuntimeInfo {
    pub name: &'static str,
    pub version: Option<String>,
    pub available: bool,
}

fn probe(program: &str, name: &'static str) -> RuntimeInfo {
    let output = Command::new(program).arg("--version").output();

    match output {
        Ok(out) if out.status.success() => {
            let version = String::from_utf8_lossy(&out.stdout).trim().to_string();
            RuntimeInfo {
                name,
                version: Some(version),
                available: true,
            }
        }
        _ => RuntimeInfo {
            name,
            version: None,
            available: false,
        },
    }
}

/// Check if Node.js is available
pub fn check_node() -> RuntimeInfo {
    probe("node", "Node.js")
}

/// Check if the package manager is available
pub fn check_package_manager(pm: PackageManager) -> RuntimeInfo {
    let name = match pm {
        PackageManager::Npm => "npm",
        PackageManager::Yarn => "Yarn",
    };
    probe(pm.program(), name)
}

/// Check that Node.js and `pm` are installed and recent enough
pub fn check_runtimes(pm: PackageManager) -> Result<Vec<RuntimeInfo>> {
    evaluate(check_node(), check_package_manager(pm), pm)
}

fn evaluate(node: RuntimeInfo, manager: RuntimeInfo, pm: PackageManager) -> Result<Vec<RuntimeInfo>> {
    let mut missing = Vec::new();

    if !node.available {
        missing.push("Node.js (install from https://nodejs.org)".to_string());
    } else if let Some(outdated) = node
        .version
        .as_deref()
        .and_then(|v| check_minimum(v, MIN_NODE_VERSION, node.name))
    {
        missing.push(outdated);
    }

    if !manager.available {
        missing.push(match pm {
            PackageManager::Npm => "npm (ships with Node.js)".to_string(),
            PackageManager::Yarn => "Yarn (enable with `corepack enable`)".to_string(),
        });
    }

    if !missing.is_empty() {
        return Err(StarterError::Runtime(format!(
            "Missing required runtimes:\n{}",
            missing
                .iter()
                .map(|m| format!("  - {}", m))
                .collect::<Vec<_>>()
                .join("\n")
        )));
    }

    Ok(vec![node, manager])
}
