//! Template materialization
//!
//! This module provides:
//! - Destination resolution and template sanity checks
//! - Template copying with a static exclusion ruleset, plus the cleanup pass
//! - `package.json` customization
//! - Generated configuration files
//! - Version helpers for manifests and Node engine checks

pub mod copier;
pub mod destination;
pub mod exclusion;
pub mod manifest;
pub mod materialize;
pub mod version;

pub use copier::{cleanup, copy_template, CleanupReport, CopyReport, CLEANUP_ENTRIES};
pub use destination::{resolve_destination, verify_template};
pub use exclusion::ExclusionRuleset;
pub use manifest::ManifestDocument;
pub use materialize::{materialize, MaterializeReport};
pub use version::check_engine;
