//! Rules deciding which template entries never reach the generated project

use std::path::Path;

/// Names matched against each entry's base name.
/// A leading `*` is a suffix match, a trailing `*` a prefix match, anything else exact.
const DEFAULT_PATTERNS: &[&str] = &[
    // Version control
    ".git",
    // Dependency caches and build output
    "node_modules",
    "dist",
    "build",
    "coverage",
    // Lockfiles
    "package-lock.json",
    "yarn.lock",
    "pnpm-lock.yaml",
    // Editor and OS artifacts
    ".DS_Store",
    "Thumbs.db",
    ".idea",
    ".vscode",
    "*.log",
    "*.swp",
    // Active environment files (regenerated from .env.example)
    ".env",
    ".env.development",
    ".env.production",
    ".env.local",
    // Generator helpers that only make sense inside the template
    "generate-project.js",
    "setup-template.sh",
    "template-setup.md",
];

/// Base names containing this marker are template documentation
const DOC_MARKER: &str = "TEMPLATE_";

/// Directory holding the template's own customization scripts
const SCRIPTS_DIR: &str = "scripts";

/// Static denylist applied once during the copy stage
#[derive(Debug, Clone)]
pub struct ExclusionRuleset {
    patterns: Vec<String>,
    doc_marker: String,
    scripts_dir: String,
}

impl Default for ExclusionRuleset {
    fn default() -> Self {
        Self {
            patterns: DEFAULT_PATTERNS.iter().map(|p| p.to_string()).collect(),
            doc_marker: DOC_MARKER.to_string(),
            scripts_dir: SCRIPTS_DIR.to_string(),
        }
    }
}

impl ExclusionRuleset {
    /// Check if a base name matches any pattern in the list
    fn matches_any(&self, filename: &str) -> bool {
        self.patterns.iter().any(|pattern| {
            if let Some(suffix) = pattern.strip_prefix('*') {
                filename.ends_with(suffix)
            } else if let Some(prefix) = pattern.strip_suffix('*') {
                filename.starts_with(prefix)
            } else {
                filename == pattern
            }
        })
    }

    /// Whether the entry at `relative` (relative to the template root) is skipped.
    ///
    /// A directory named like the scripts directory is excluded itself, so walking
    /// with this predicate skips its whole subtree rather than leaving it empty.
    pub fn is_excluded(&self, relative: &Path) -> bool {
        let Some(filename) = relative.file_name().and_then(|n| n.to_str()) else {
            return false;
        };

        if self.matches_any(filename) || filename.contains(&self.doc_marker) {
            return true;
        }

        if filename == self.scripts_dir {
            return true;
        }

        relative
            .parent()
            .and_then(Path::file_name)
            .and_then(|n| n.to_str())
            .is_some_and(|parent| parent == self.scripts_dir)
    }
}
