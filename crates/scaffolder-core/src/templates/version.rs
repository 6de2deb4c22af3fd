//! Version handling for generated manifests and Node engine requirements

use anyhow::Result;
use semver::{Version, VersionReq};

/// Every generated project starts at this version
pub const INITIAL_VERSION: Version = Version::new(1, 0, 0);

/// Compare an installed Node version against the manifest's `engines.node` range.
/// Returns a warning message if the installed version does not satisfy it.
pub fn check_engine(installed: &str, requirement: &str) -> Option<String> {
    let installed_ver = match parse_version(installed) {
        Ok(v) => v,
        Err(_) => return None, // Can't compare, skip warning
    };

    let req = match VersionReq::parse(requirement) {
        Ok(r) => r,
        Err(_) => return None, // Can't compare, skip warning
    };

    if req.matches(&installed_ver) {
        None
    } else {
        Some(format!(
            "This template expects Node.js {}, but {} is installed.",
            requirement, installed
        ))
    }
}

/// Parse version string, handling the `v` prefix Node prints
pub fn parse_version(version_str: &str) -> Result<Version> {
    let trimmed = version_str.trim();
    let cleaned = trimmed.strip_prefix('v').unwrap_or(trimmed);
    Version::parse(cleaned).map_err(|e| anyhow::anyhow!("Invalid version '{}': {}", version_str, e))
}
