//! Workflow orchestration: drives one generation run from validated answers to summary
//!
//! The builder never prints. Everything user-visible goes through a [`Reporter`],
//! so the same pipeline backs the interactive prompts and the integration tests.

use crate::config::answers::ProjectAnswers;
use crate::error::Result;
use crate::product::ProductConfig;
use crate::runtime::check::{self, PackageManager};
use crate::runtime::tool::{self, StepOutcome, GIT_TIMEOUT, INSTALL_TIMEOUT};
use crate::templates::{self, CleanupReport, ExclusionRuleset, ManifestDocument, CLEANUP_ENTRIES};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

/// Stages of a run after the answers are collected and validated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Resolving,
    Copying,
    CleaningUp,
    Customizing,
    MaterializingConfig,
    InvokingTools,
    Reporting,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Resolving => "resolving",
            Stage::Copying => "copying",
            Stage::CleaningUp => "cleaning up",
            Stage::Customizing => "customizing",
            Stage::MaterializingConfig => "materializing config",
            Stage::InvokingTools => "invoking tools",
            Stage::Reporting => "reporting",
        };
        f.write_str(name)
    }
}

/// A running progress indicator. Implementations must stop it when dropped
/// without `finish`, so an early return cannot leave it repainting.
pub trait Progress {
    fn finish(&mut self, message: &str);
}

/// Sink for user-visible output
pub trait Reporter {
    fn info(&self, message: &str);
    fn success(&self, message: &str);
    fn warning(&self, message: &str);
    fn progress(&self, message: &str) -> Box<dyn Progress + '_>;
}

/// Reporter that forwards to `tracing` and keeps every message for inspection
#[derive(Debug, Default)]
pub struct TracingReporter {
    messages: Mutex<Vec<String>>,
}

impl TracingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().map(|m| m.clone()).unwrap_or_default()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.messages()
            .into_iter()
            .filter_map(|m| m.strip_prefix("warning: ").map(str::to_string))
            .collect()
    }

    fn push(&self, message: String) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.push(message);
        }
    }
}

struct TracingProgress<'a> {
    reporter: &'a TracingReporter,
    message: String,
    finished: bool,
}

impl Progress for TracingProgress<'_> {
    fn finish(&mut self, message: &str) {
        self.finished = true;
        self.reporter.push(format!("done: {}", message));
    }
}

impl Drop for TracingProgress<'_> {
    fn drop(&mut self) {
        if !self.finished {
            self.reporter
                .push(format!("interrupted: {}", self.message));
        }
    }
}

impl Reporter for TracingReporter {
    fn info(&self, message: &str) {
        tracing::info!("{}", message);
        self.push(format!("info: {}", message));
    }

    fn success(&self, message: &str) {
        tracing::info!("{}", message);
        self.push(format!("success: {}", message));
    }

    fn warning(&self, message: &str) {
        tracing::warn!("{}", message);
        self.push(format!("warning: {}", message));
    }

    fn progress(&self, message: &str) -> Box<dyn Progress + '_> {
        self.push(format!("start: {}", message));
        Box::new(TracingProgress {
            reporter: self,
            message: message.to_string(),
            finished: false,
        })
    }
}

/// Everything the final summary needs
#[derive(Debug, Clone)]
pub struct ProjectSummary {
    pub destination: PathBuf,
    pub copied_files: usize,
    pub generated_files: Vec<PathBuf>,
    pub outcomes: Vec<StepOutcome>,
    pub installed_with: Option<PackageManager>,
}

impl ProjectSummary {
    /// `(reason, remedy)` for every best-effort step that did not complete
    pub fn degraded(&self) -> Vec<(&str, &str)> {
        self.outcomes
            .iter()
            .filter_map(|o| match o {
                StepOutcome::Degraded { reason, remedy } => Some((reason.as_str(), remedy.as_str())),
                _ => None,
            })
            .collect()
    }
}

/// Drives a generation run for a product
pub struct ProjectBuilder<'a, C: ProductConfig> {
    config: &'a C,
    template_dir: PathBuf,
    cwd: PathBuf,
    rules: ExclusionRuleset,
    run_tools: bool,
    git_timeout: Duration,
    install_timeout: Duration,
    package_managers: Vec<PackageManager>,
}

impl<'a, C: ProductConfig> ProjectBuilder<'a, C> {
    pub fn new(config: &'a C) -> Self {
        Self {
            config,
            template_dir: config.template_dir(),
            cwd: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            rules: ExclusionRuleset::default(),
            run_tools: true,
            git_timeout: GIT_TIMEOUT,
            install_timeout: INSTALL_TIMEOUT,
            package_managers: PackageManager::FALLBACK_ORDER.to_vec(),
        }
    }

    pub fn template_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.template_dir = dir.into();
        self
    }

    /// Directory the project is created in
    pub fn cwd(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = dir.into();
        self
    }

    /// Skip git and dependency installation entirely
    pub fn run_tools(mut self, enabled: bool) -> Self {
        self.run_tools = enabled;
        self
    }

    pub fn timeouts(mut self, git: Duration, install: Duration) -> Self {
        self.git_timeout = git;
        self.install_timeout = install;
        self
    }

    pub fn template_path(&self) -> &Path {
        &self.template_dir
    }

    /// Run every stage. Fatal failures return early; best-effort ones degrade in place.
    pub async fn generate(
        &self,
        answers: &ProjectAnswers,
        reporter: &dyn Reporter,
    ) -> Result<ProjectSummary> {
        tracing::info!(stage = %Stage::Resolving, name = %answers.name);
        let destination =
            templates::resolve_destination(&self.cwd, &answers.name, &self.template_dir)?;
        templates::verify_template(&self.template_dir)?;
        reporter.info(&format!("Creating {} in {}", answers.name, destination.display()));

        tracing::info!(stage = %Stage::Copying);
        let copied = {
            let mut progress = reporter.progress("Copying template files...");
            let report = templates::copy_template(&self.template_dir, &destination, &self.rules)?;
            progress.finish(&format!("Copied {} template files", report.files.len()));
            report
        };

        tracing::info!(stage = %Stage::CleaningUp);
        let cleanup = templates::cleanup(&destination, CLEANUP_ENTRIES);
        report_cleanup(&cleanup, reporter);

        tracing::info!(stage = %Stage::Customizing);
        let mut manifest = ManifestDocument::load(&destination)?;
        manifest.customize(answers, self.config.repository_base_url())?;
        manifest.save()?;
        let node_requirement = manifest
            .get("engines")
            .and_then(|e| e.get("node"))
            .and_then(|v| v.as_str())
            .map(str::to_string);
        reporter.success("Updated package.json");

        tracing::info!(stage = %Stage::MaterializingConfig);
        let materialized = templates::materialize(&destination, answers);
        for (path, error) in &materialized.failures {
            reporter.warning(&format!(
                "Could not write {}: {}. Create it manually.",
                path.display(),
                error
            ));
        }
        reporter.success(&format!(
            "Generated {} configuration files",
            materialized.written.len()
        ));

        tracing::info!(stage = %Stage::InvokingTools);
        let mut outcomes = Vec::new();
        let mut installed_with = None;
        if self.run_tools {
            if let Some(requirement) = &node_requirement {
                self.check_node_engine(requirement, reporter);
            }
            outcomes.push(self.init_git(&destination).await);
            let (pm, outcome) = self.install(&destination, reporter).await;
            installed_with = pm;
            outcomes.push(outcome);
        } else {
            outcomes.push(StepOutcome::Skipped("Git initialization skipped".into()));
            outcomes.push(StepOutcome::Skipped("Dependency installation skipped".into()));
        }

        for outcome in &outcomes {
            match outcome {
                StepOutcome::Completed(message) => reporter.success(message),
                StepOutcome::Skipped(message) => reporter.info(message),
                StepOutcome::Degraded { reason, remedy } => {
                    reporter.warning(&format!("{}. Run manually: {}", reason, remedy))
                }
            }
        }

        tracing::info!(stage = %Stage::Reporting);
        Ok(ProjectSummary {
            destination,
            copied_files: copied.files.len(),
            generated_files: materialized.written,
            outcomes,
            installed_with,
        })
    }

    fn check_node_engine(&self, requirement: &str, reporter: &dyn Reporter) {
        let node = check::check_node();
        match node.version {
            Some(version) => {
                if let Some(warning) = templates::check_engine(&version, requirement) {
                    reporter.warning(&warning);
                }
            }
            None => reporter.warning(&format!(
                "Node.js was not found; this project needs Node.js {}",
                requirement
            )),
        }
    }

    async fn init_git(&self, destination: &Path) -> StepOutcome {
        let commands = tool::git_commands(self.config.initial_commit_message(), self.git_timeout);
        if !check::check_git().available {
            return StepOutcome::Degraded {
                reason: "git is not installed".into(),
                remedy: "git init && git add -A && git commit -m \"Initial commit\"".into(),
            };
        }
        tool::init_repository(destination, &commands).await
    }

    async fn install(
        &self,
        destination: &Path,
        reporter: &dyn Reporter,
    ) -> (Option<PackageManager>, StepOutcome) {
        let attempts = tool::install_commands(&self.package_managers, self.install_timeout);
        let mut progress = reporter.progress("Installing dependencies...");
        let (pm, outcome) =
            tool::install_dependencies(destination, &self.package_managers, &attempts).await;
        match &outcome {
            StepOutcome::Completed(message) => progress.finish(message),
            _ => progress.finish("Dependency installation did not complete"),
        }

        if !outcome.is_degraded() {
            return (pm, outcome);
        }

        // Only detect managers once every attempt failed, to point the remedy at a manager that exists
        let available: Vec<PackageManager> = check::check_package_managers()
            .into_iter()
            .filter(|(_, info)| info.available)
            .map(|(pm, _)| pm)
            .collect();
        (pm, suggest_available_manager(outcome, &available))
    }
}

fn report_cleanup(cleanup: &CleanupReport, reporter: &dyn Reporter) {
    for (path, error) in &cleanup.failures {
        reporter.warning(&format!(
            "Could not remove {}: {}. Delete it manually.",
            path.display(),
            error
        ));
    }
}

/// Point a failed install's remedy at the first manager found on PATH
fn suggest_available_manager(outcome: StepOutcome, available: &[PackageManager]) -> StepOutcome {
    match (outcome, available.first()) {
        (StepOutcome::Degraded { reason, .. }, Some(pm)) => StepOutcome::Degraded {
            reason,
            remedy: pm.install_command(),
        },
        (outcome, _) => outcome,
    }
}
