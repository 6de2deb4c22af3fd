//! Fatal errors that abort a generation run

use std::path::PathBuf;
use thiserror::Error;

/// A collected answer that violates its validation rule
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Missing(&'static str),

    #[error("project name '{0}' must not start with '.' or '_'")]
    NameLeadingCharacter(String),

    #[error("project name '{name}' contains the forbidden character '{character}'")]
    NameForbiddenCharacter { name: String, character: char },

    #[error("project name is {0} characters long (maximum 214)")]
    NameTooLong(usize),

    #[error(
        "project name '{0}' must use lowercase letters, digits and inner hyphens only \
         (pattern ^[a-z0-9][a-z0-9-]*[a-z0-9]$)"
    )]
    NamePattern(String),

    #[error("author email '{0}' is not a valid address (expected local@domain.tld)")]
    Email(String),

    #[error("port '{0}' must be an integer between 1 and 65535")]
    Port(String),
}

/// Conditions under which continuing would leave a broken or unsafe project
#[derive(Debug, Error)]
pub enum ScaffoldError {
    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),

    #[error("Directory {} already exists", .0.display())]
    DestinationExists(PathBuf),

    #[error(
        "Destination {} is inside the template directory {}",
        destination.display(),
        template.display()
    )]
    SelfReferential {
        destination: PathBuf,
        template: PathBuf,
    },

    #[error("Template directory not found: {}", .0.display())]
    TemplateMissing(PathBuf),

    #[error("Template at {} is incomplete, missing: {}", template.display(), missing.join(", "))]
    TemplateIncomplete {
        template: PathBuf,
        missing: Vec<String>,
    },

    #[error("Failed to copy {}: {source}", path.display())]
    Copy {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read manifest {}: {source}", path.display())]
    ManifestRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse manifest {}: {source}", path.display())]
    ManifestParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Manifest {}: `{field}` is not a JSON object", path.display())]
    ManifestShape { path: PathBuf, field: &'static str },

    #[error("Invalid repository URL for '{name}': {source}")]
    RepositoryUrl {
        name: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Failed to serialize manifest {}: {source}", path.display())]
    ManifestSerialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write manifest {}: {source}", path.display())]
    ManifestWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T, E = ScaffoldError> = std::result::Result<T, E>;
