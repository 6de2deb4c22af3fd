//! create-backend-server - Project generator for the Express + TypeScript server template

use clap::Parser;
use colored::Colorize;
use scaffolder_core::tui::RunOutcome;
use scaffolder_core::watchdog::{Watchdog, RUN_TIMEOUT};
use scaffolder_core::{PackageManager, ProductConfig, ProjectAnswers};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Backend server product configuration
#[derive(Clone)]
pub struct BackendServerConfig;

impl ProductConfig for BackendServerConfig {
    fn name(&self) -> &'static str {
        "create-backend-server"
    }

    fn display_name(&self) -> &'static str {
        "Backend Server Template Project Generator"
    }

    fn default_template_dir(&self) -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("../../templates/backend-server")
    }

    fn template_dir_env(&self) -> &'static str {
        "CREATE_BACKEND_SERVER_TEMPLATE_DIR"
    }

    fn repository_base_url(&self) -> &'static str {
        "https://github.com/your-username/"
    }

    fn initial_commit_message(&self) -> &'static str {
        "Initial commit: Setup from backend server template"
    }

    fn next_steps(
        &self,
        dir: &Path,
        answers: &ProjectAnswers,
        installed_with: Option<PackageManager>,
    ) -> Vec<String> {
        let mut steps = Vec::new();
        let current = std::env::current_dir().ok();

        // Step 1: cd to directory if not current
        if current.as_deref() != Some(dir) {
            steps.push(format!("cd {}", answers.name));
        }

        // Step 2: install if every package manager failed
        let pm = match installed_with {
            Some(pm) => pm,
            None => {
                steps.push("npm install".to_string());
                PackageManager::Npm
            }
        };

        steps.push("Update .env.development with your configuration".to_string());
        steps.push(pm.dev_command());
        steps.push(format!(
            "Check http://localhost:{}/health and /ready",
            answers.port
        ));

        steps
    }
}

#[derive(Parser, Debug)]
#[command(name = "create-backend-server")]
#[command(about = "Generate an Express + TypeScript backend server project")]
#[command(version)]
pub struct Args {}

/// Exit status for every failure that is not a user interrupt
const FAILURE_EXIT_CODE: i32 = 1;

fn restore_cursor() {
    let _ = console::Term::stderr().show_cursor();
}

/// Restore the cursor, print the panic as usual, then exit with the failure code
fn install_panic_hook() {
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        restore_cursor();
        default_panic(info);
        std::process::exit(FAILURE_EXIT_CODE);
    }));
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    install_panic_hook();

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        restore_cursor();
        std::process::exit(130);
    })
    .ok();

    let _args = Args::parse();
    let config = BackendServerConfig;

    let watchdog = Watchdog::arm(RUN_TIMEOUT, || {
        restore_cursor();
        eprintln!(
            "\n{} Timed out after {} seconds; the generator was stopped.",
            "✖".red(),
            RUN_TIMEOUT.as_secs()
        );
        std::process::exit(FAILURE_EXIT_CODE);
    });

    let result = scaffolder_core::run(&config).await;
    watchdog.disarm();

    // Ensure cursor is visible on normal exit
    restore_cursor();

    match result {
        Ok(RunOutcome::Created(summary)) => {
            tracing::info!(destination = %summary.destination.display(), "project created");
            ExitCode::SUCCESS
        }
        Ok(RunOutcome::Cancelled) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", "✖".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scaffolder_core::RawAnswers;

    fn answers() -> ProjectAnswers {
        ProjectAnswers::from_raw(&RawAnswers {
            name: "my-api".to_string(),
            port: "9090".to_string(),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_next_steps_without_install() {
        let steps = BackendServerConfig.next_steps(Path::new("/tmp/my-api"), &answers(), None);
        assert_eq!(steps[0], "cd my-api");
        assert!(steps.contains(&"npm install".to_string()));
        assert!(steps.contains(&"npm run dev".to_string()));
        assert!(steps.last().unwrap().contains("9090"));
    }

    #[test]
    fn test_next_steps_with_fallback_manager() {
        let steps = BackendServerConfig.next_steps(
            Path::new("/tmp/my-api"),
            &answers(),
            Some(PackageManager::Pnpm),
        );
        assert!(!steps.contains(&"npm install".to_string()));
        assert!(steps.contains(&"pnpm dev".to_string()));
    }

    #[test]
    fn test_default_template_dir_has_manifest() {
        let dir = BackendServerConfig.default_template_dir();
        assert!(dir.join("package.json").is_file());
    }

    #[test]
    fn test_panic_exits_with_failure_code() {
        const CHILD_ENV: &str = "CREATE_BACKEND_SERVER_PANIC_CHILD";
        if std::env::var_os(CHILD_ENV).is_some() {
            install_panic_hook();
            panic!("unexpected state");
        }

        let status = std::process::Command::new(std::env::current_exe().unwrap())
            .args(["--exact", "tests::test_panic_exits_with_failure_code"])
            .env(CHILD_ENV, "1")
            .stdout(std::process::Stdio::null())
            .stderr(std::process::Stdio::null())
            .status()
            .unwrap();
        assert_eq!(status.code(), Some(FAILURE_EXIT_CODE));
    }

    #[test]
    fn test_args_parse_without_flags() {
        assert!(Args::try_parse_from(["create-backend-server"]).is_ok());
        assert!(Args::try_parse_from(["create-backend-server", "--unknown"]).is_err());
    }
}
