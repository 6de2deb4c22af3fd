//! Scaffolder Core - Shared library for project generator CLIs
//!
//! This library generates a new project from a local template directory: it copies
//! the template through an exclusion filter, customizes `package.json`, writes
//! configuration files, then initializes git and installs dependencies.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Core Operations** - Validation, destination checks, filtered copy,
//!   manifest customization, generated files, external tool invocation
//! - **Layer 2: Workflow Orchestration** - `ProductConfig` trait and `ProjectBuilder`
//!   for custom UIs, reporting through the `Reporter` trait
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based prompts (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based TUI prompts module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use scaffolder_core::{ProjectAnswers, ProjectBuilder, RawAnswers, TracingReporter};
//!
//! let answers = ProjectAnswers::from_raw(&RawAnswers {
//!     name: "my-api".into(),
//!     ..Default::default()
//! })?;
//! let summary = ProjectBuilder::new(&MyConfig)
//!     .run_tools(false)
//!     .generate(&answers, &TracingReporter::new())
//!     .await?;
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod product;
pub mod runtime;
pub mod templates;
pub mod watchdog;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use builder::{Progress, ProjectBuilder, ProjectSummary, Reporter, Stage, TracingReporter};
pub use config::{Features, ProjectAnswers, RawAnswers};
pub use error::{ScaffoldError, ValidationError};
pub use product::ProductConfig;
pub use runtime::{PackageManager, StepOutcome};
pub use templates::{ExclusionRuleset, ManifestDocument};
pub use watchdog::Watchdog;

#[cfg(feature = "tui")]
pub use tui::run;
