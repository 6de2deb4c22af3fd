//! Detection of git, Node.js, and the supported package managers

use std::fmt;
use std::process::Command;

/// Package managers tried for dependency installation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PackageManager {
    Npm,
    Yarn,
    Pnpm,
}

impl PackageManager {
    /// Primary first, then the alternates in priority order
    pub const FALLBACK_ORDER: [PackageManager; 3] =
        [PackageManager::Npm, PackageManager::Yarn, PackageManager::Pnpm];

    pub fn display_name(&self) -> &'static str {
        match self {
            PackageManager::Npm => "npm",
            PackageManager::Yarn => "yarn",
            PackageManager::Pnpm => "pnpm",
        }
    }

    /// Executable name; the Windows shims are batch files
    pub fn program(&self) -> &'static str {
        match (self, cfg!(windows)) {
            (PackageManager::Npm, true) => "npm.cmd",
            (PackageManager::Yarn, true) => "yarn.cmd",
            (PackageManager::Pnpm, true) => "pnpm.cmd",
            (pm, false) => pm.display_name(),
        }
    }

    pub fn install_command(&self) -> String {
        format!("{} install", self.display_name())
    }

    pub fn dev_command(&self) -> String {
        match self {
            PackageManager::Npm => "npm run dev".to_string(),
            PackageManager::Yarn => "yarn dev".to_string(),
            PackageManager::Pnpm => "pnpm dev".to_string(),
        }
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Tool detection result
#[derive(Debug, Clone)]
pub struct RuntimeInfo {
    pub name: &'static str,
    pub version: Option<String>,
    pub available: bool,
}

fn detect(program: &str, name: &'static str) -> RuntimeInfo {
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

/// Check if git is available
pub fn check_git() -> RuntimeInfo {
    detect("git", "git")
}

/// Check if Node.js is available
pub fn check_node() -> RuntimeInfo {
    detect("node", "Node.js")
}

/// Check if a package manager is available
pub fn check_package_manager(pm: PackageManager) -> RuntimeInfo {
    detect(pm.program(), pm.display_name())
}

/// Probe every supported package manager, in fallback order
pub fn check_package_managers() -> Vec<(PackageManager, RuntimeInfo)> {
    PackageManager::FALLBACK_ORDER
        .iter()
        .map(|pm| (*pm, check_package_manager(*pm)))
        .collect()
}
