//! Tool detection and external command invocation
//!
//! This module provides:
//! - Detection of git, Node.js, and package managers
//! - Best-effort git initialization and dependency installation with fallback

pub mod check;
pub mod tool;

pub use check::{check_git, check_node, check_package_managers, PackageManager, RuntimeInfo};
pub use tool::{StepOutcome, ToolCommand, ToolError};
