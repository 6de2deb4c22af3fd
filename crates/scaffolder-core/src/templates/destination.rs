//! Destination path resolution and template sanity checks

use crate::error::{Result, ScaffoldError};
use std::path::{Path, PathBuf};

/// Files the template must provide for the generated project to build
pub const REQUIRED_TEMPLATE_FILES: &[&str] =
    &["package.json", "tsconfig.json", "src/app.ts", "src/server.ts"];

/// Resolve the project directory and check it is safe to create.
///
/// Nothing is written here; every check runs before the first filesystem mutation.
pub fn resolve_destination(cwd: &Path, name: &str, template_dir: &Path) -> Result<PathBuf> {
    let base = cwd.canonicalize().unwrap_or_else(|_| cwd.to_path_buf());
    let destination = base.join(name);

    if destination.symlink_metadata().is_ok() {
        return Err(ScaffoldError::DestinationExists(destination));
    }

    let template = template_dir
        .canonicalize()
        .map_err(|_| ScaffoldError::TemplateMissing(template_dir.to_path_buf()))?;

    if destination.starts_with(&template) {
        return Err(ScaffoldError::SelfReferential {
            destination,
            template,
        });
    }

    Ok(destination)
}

/// Fail if the template directory lacks any required file
pub fn verify_template(template_dir: &Path) -> Result<()> {
    if !template_dir.is_dir() {
        return Err(ScaffoldError::TemplateMissing(template_dir.to_path_buf()));
    }

    let missing: Vec<String> = REQUIRED_TEMPLATE_FILES
        .iter()
        .filter(|file| !template_dir.join(file).is_file())
        .map(|file| file.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ScaffoldError::TemplateIncomplete {
            template: template_dir.to_path_buf(),
            missing,
        })
    }
}
