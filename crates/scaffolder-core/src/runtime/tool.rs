//! External command invocation for version control and dependency installation
//!
//! Both phases are best-effort: failures come back as [`StepOutcome::Degraded`]
//! and never as a fatal error.

use crate::runtime::check::PackageManager;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use thiserror::Error;
use tokio::process::Command as TokioCommand;
use tokio::time::timeout;

/// Wait ceiling for each package manager attempt (5 minutes)
pub const INSTALL_TIMEOUT: Duration = Duration::from_secs(300);

/// Wait ceiling for each git call (30 seconds)
pub const GIT_TIMEOUT: Duration = Duration::from_secs(30);

/// Why a single external command did not succeed
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("failed to start `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` failed with exit code {code}{detail}")]
    Failed {
        command: String,
        code: i32,
        detail: String,
    },

    #[error("`{command}` timed out after {} seconds", .limit.as_secs())]
    TimedOut { command: String, limit: Duration },
}

/// A program with arguments and a wait ceiling
#[derive(Debug, Clone)]
pub struct ToolCommand {
    pub program: String,
    pub args: Vec<String>,
    pub limit: Duration,
}

impl ToolCommand {
    pub fn new<I, S>(program: &str, args: I, limit: Duration) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.to_string(),
            args: args.into_iter().map(Into::into).collect(),
            limit,
        }
    }

    /// The command line as a user would type it
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Run to completion in `cwd`; exceeding the ceiling kills the child and counts as failure
    pub async fn run(&self, cwd: &Path) -> Result<(), ToolError> {
        let command = self.display();
        tracing::info!(%command, cwd = %cwd.display(), "running");

        let child = TokioCommand::new(&self.program)
            .args(&self.args)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| ToolError::Spawn {
                command: command.clone(),
                source,
            })?;

        let output = match timeout(self.limit, child.wait_with_output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(source)) => return Err(ToolError::Spawn { command, source }),
            Err(_) => {
                return Err(ToolError::TimedOut {
                    command,
                    limit: self.limit,
                })
            }
        };

        if output.status.success() {
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        let detail = stderr
            .lines()
            .rev()
            .find(|line| !line.trim().is_empty())
            .map(|line| format!(": {}", line.trim()))
            .unwrap_or_default();

        Err(ToolError::Failed {
            command,
            code: output.status.code().unwrap_or(-1),
            detail,
        })
    }
}

/// Run commands in order, stopping at the first failure
pub async fn run_sequence(commands: &[ToolCommand], cwd: &Path) -> Result<(), ToolError> {
    for command in commands {
        command.run(cwd).await?;
    }
    Ok(())
}

/// Try each attempt in order and return the index of the first that succeeds.
/// When every attempt fails, all errors are returned in attempt order.
pub async fn first_success(
    attempts: &[ToolCommand],
    cwd: &Path,
) -> Result<usize, Vec<ToolError>> {
    let mut errors = Vec::new();
    for (idx, attempt) in attempts.iter().enumerate() {
        match attempt.run(cwd).await {
            Ok(()) => return Ok(idx),
            Err(e) => {
                tracing::warn!(error = %e, "attempt failed, trying next");
                errors.push(e);
            }
        }
    }
    Err(errors)
}

/// Result of a best-effort phase; distinct from the fatal error channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Completed(String),
    Skipped(String),
    Degraded { reason: String, remedy: String },
}

impl StepOutcome {
    pub fn is_degraded(&self) -> bool {
        matches!(self, StepOutcome::Degraded { .. })
    }
}

/// `git init`, `git add -A`, `git commit` in sequence
pub fn git_commands(commit_message: &str, limit: Duration) -> Vec<ToolCommand> {
    vec![
        ToolCommand::new("git", ["init"], limit),
        ToolCommand::new("git", ["add", "-A"], limit),
        ToolCommand::new("git", ["commit", "-m", commit_message], limit),
    ]
}

/// Initialize a repository with an initial commit; any failure abandons the phase
pub async fn init_repository(dir: &Path, commands: &[ToolCommand]) -> StepOutcome {
    let remedy = commands
        .iter()
        .map(|c| match c.args.first().map(String::as_str) {
            Some("commit") => "git commit -m \"Initial commit\"".to_string(),
            _ => c.display(),
        })
        .collect::<Vec<_>>()
        .join(" && ");

    match run_sequence(commands, dir).await {
        Ok(()) => StepOutcome::Completed("Initialized git repository with initial commit".into()),
        Err(e) => StepOutcome::Degraded {
            reason: format!("Git initialization failed: {}", e),
            remedy,
        },
    }
}

/// One install attempt per package manager
pub fn install_commands(managers: &[PackageManager], limit: Duration) -> Vec<ToolCommand> {
    managers
        .iter()
        .map(|pm| ToolCommand::new(pm.program(), ["install"], limit))
        .collect()
}

/// Install dependencies with the first package manager that succeeds
pub async fn install_dependencies(
    dir: &Path,
    managers: &[PackageManager],
    attempts: &[ToolCommand],
) -> (Option<PackageManager>, StepOutcome) {
    match first_success(attempts, dir).await {
        Ok(idx) => {
            let pm = managers.get(idx).copied();
            let name = pm.map(|p| p.display_name()).unwrap_or("package manager");
            (
                pm,
                StepOutcome::Completed(format!("Installed dependencies with {}", name)),
            )
        }
        Err(errors) => {
            let reason = errors
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join("; ");
            let remedy = managers
                .first()
                .map(|pm| pm.install_command())
                .unwrap_or_else(|| "npm install".to_string());
            (
                None,
                StepOutcome::Degraded {
                    reason: format!("Dependency installation failed: {}", reason),
                    remedy,
                },
            )
        }
    }
}
