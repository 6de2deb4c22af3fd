//! Template file copying with exclusion filtering, and the post-copy cleanup pass

use crate::error::{Result, ScaffoldError};
use crate::templates::exclusion::ExclusionRuleset;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Template-only entries that survive the copy and are removed afterwards
pub const CLEANUP_ENTRIES: &[&str] = &[
    ".npmignore",
    "CHANGELOG.md",
    "LICENSE",
    ".github",
    "PUBLISHING.md",
];

/// Files written by a copy, relative to the destination
#[derive(Debug, Clone, Default)]
pub struct CopyReport {
    pub files: Vec<PathBuf>,
}

/// Result of the best-effort cleanup pass
#[derive(Debug, Default)]
pub struct CleanupReport {
    pub removed: Vec<String>,
    pub failures: Vec<(PathBuf, io::Error)>,
}

/// Copy the template tree into a new `destination`, skipping excluded entries.
///
/// `destination` must not exist yet; its parent must.
pub fn copy_template(
    template_dir: &Path,
    destination: &Path,
    rules: &ExclusionRuleset,
) -> Result<CopyReport> {
    fs::create_dir(destination).map_err(|source| ScaffoldError::Copy {
        path: destination.to_path_buf(),
        source,
    })?;

    let mut report = CopyReport::default();

    let walker = WalkDir::new(template_dir)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            let relative = entry.path().strip_prefix(template_dir).unwrap_or(entry.path());
            let skip = rules.is_excluded(relative);
            if skip {
                tracing::debug!(path = %relative.display(), "excluded from copy");
            }
            !skip
        });

    for entry in walker {
        let entry = entry.map_err(|e| ScaffoldError::Copy {
            path: e
                .path()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| template_dir.to_path_buf()),
            source: e.into(),
        })?;

        let relative = entry
            .path()
            .strip_prefix(template_dir)
            .unwrap_or(entry.path());
        let target = destination.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).map_err(|source| ScaffoldError::Copy {
                path: target.clone(),
                source,
            })?;
            continue;
        }

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|source| ScaffoldError::Copy {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        fs::copy(entry.path(), &target).map_err(|source| ScaffoldError::Copy {
            path: entry.path().to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %relative.display(), "copied");
        report.files.push(relative.to_path_buf());
    }

    Ok(report)
}

/// Remove each named entry from the destination root if present.
///
/// Missing entries are skipped; failures are collected, never returned as errors.
pub fn cleanup(destination: &Path, entries: &[&str]) -> CleanupReport {
    let mut report = CleanupReport::default();

    for name in entries {
        let path = destination.join(name);
        let Ok(metadata) = path.symlink_metadata() else {
            continue;
        };

        let removed = if metadata.is_dir() {
            fs::remove_dir_all(&path)
        } else {
            fs::remove_file(&path)
        };

        match removed {
            Ok(()) => report.removed.push(name.to_string()),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "cleanup failed");
                report.failures.push((path, e));
            }
        }
    }

    report
}
