//! Product configuration trait for CLI binaries
//!
//! This trait defines the interface that each generator binary implements
//! to configure the scaffolding behavior for its template.

use crate::config::answers::ProjectAnswers;
use crate::runtime::check::PackageManager;
use std::path::{Path, PathBuf};

/// Configuration trait for generator products
///
/// Each product implements this trait to define:
/// - Product identity (name, display name)
/// - Where the template source tree lives
/// - How repository URLs and the initial commit look
/// - Post-setup instructions
pub trait ProductConfig: Clone + Send + Sync + 'static {
    /// Internal product name (used for the CLI command)
    fn name(&self) -> &'static str;

    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// Template directory used when the override variable is unset
    fn default_template_dir(&self) -> PathBuf;

    /// Environment variable name for overriding the template directory
    fn template_dir_env(&self) -> &'static str;

    /// Hosting URL the project name is appended to for repository links
    fn repository_base_url(&self) -> &'static str;

    /// Message for the first commit in the generated repository
    fn initial_commit_message(&self) -> &'static str;

    /// Generate the "next steps" instructions after project creation
    fn next_steps(
        &self,
        dir: &Path,
        answers: &ProjectAnswers,
        installed_with: Option<PackageManager>,
    ) -> Vec<String>;

    /// Resolved template directory, honoring the environment override
    fn template_dir(&self) -> PathBuf {
        std::env::var_os(self.template_dir_env())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| self.default_template_dir())
    }
}
