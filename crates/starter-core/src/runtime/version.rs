//! Version comparison for runtime minimums

use anyhow::Result;
use semver::Version;

/// Oldest Node.js the framework generator supports
pub const MIN_NODE_VERSION: &str = "18.18.0";

/// Compare a reported tool version against a minimum.
/// Returns a warning message if the installed version is too old,
/// `None` when it is new enough or cannot be parsed.
pub fn check_minimum(found: &str, minimum: &str, tool: &str) -> Option<String> {
    let found_ver = match parse_version(found) {
        Ok(v) => v,
        Err(_) => return None, // Can't compare, skip warning
    };

    let min_ver = match parse_version(minimum) {
        Ok(v) => v,
        Err(_) => return None,
    };

    if found_ver < min_ver {
        Some(format!(
            "{} {} is installed but {} or newer is required",
            tool, found_ver, min_ver
        ))
    } else {
        None
    }
}

/// Parse version string, handling various formats
pub fn parse_version(version_str: &str) -> Result<Version> {
    // Remove leading 'v' if present
    let trimmed = version_str.trim();
    let cleaned = trimmed.strip_prefix('v').unwrap_or(trimmed);
    Version::parse(cleaned).map_err(|e| anyhow::anyhow!("Invalid version '{}': {}", version_str, e))
}
