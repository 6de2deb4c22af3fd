//! Writes generated configuration files into the project directory

use crate::config::answers::ProjectAnswers;
use crate::config::generator;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment file shipped with the template, refreshed with the chosen port
pub const TEMPLATE_ENV_FILE: &str = ".env.example";

/// Environment file the server loads in development
pub const ACTIVE_ENV_FILE: &str = ".env.development";

/// What was written, and what failed without stopping the rest
#[derive(Debug, Default)]
pub struct MaterializeReport {
    pub written: Vec<PathBuf>,
    pub failures: Vec<(PathBuf, String)>,
}

impl MaterializeReport {
    fn record(&mut self, relative: &str, outcome: Result<(), String>) {
        match outcome {
            Ok(()) => self.written.push(PathBuf::from(relative)),
            Err(e) => {
                tracing::warn!(file = relative, error = %e, "could not write generated file");
                self.failures.push((PathBuf::from(relative), e));
            }
        }
    }
}

/// Every generated file for these answers, as (relative path, content)
pub fn planned_files(answers: &ProjectAnswers) -> Vec<(&'static str, Result<String, String>)> {
    let features = answers.features;
    let mut files = vec![
        (".gitignore", Ok(generator::gitignore())),
        ("README.md", Ok(generator::readme(answers))),
    ];

    if features.lint {
        files.push((".eslintrc.json", Ok(generator::eslint_config())));
    }
    if features.format {
        files.push((".prettierrc", Ok(generator::prettier_config())));
    }
    if features.test {
        files.push(("jest.config.js", Ok(generator::jest_config())));
    }
    if features.git_hooks {
        files.push((".husky/pre-commit", Ok(generator::husky_pre_commit())));
    }
    if features.docker {
        files.push(("Dockerfile", Ok(generator::dockerfile(answers))));
        files.push((".dockerignore", Ok(generator::dockerignore())));
        files.push((
            "docker-compose.yml",
            generator::docker_compose(answers).map_err(|e| e.to_string()),
        ));
    }

    files
}

fn write_file(project_dir: &Path, relative: &str, content: &str) -> Result<(), String> {
    let path = project_dir.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| format!("{}: {}", parent.display(), e))?;
    }
    fs::write(&path, content).map_err(|e| format!("{}: {}", path.display(), e))
}

/// Refresh the environment files and emit every generated file.
///
/// Each file is independent: a failure is recorded and the next file is still written.
pub fn materialize(project_dir: &Path, answers: &ProjectAnswers) -> MaterializeReport {
    let mut report = MaterializeReport::default();

    let env = match fs::read_to_string(project_dir.join(TEMPLATE_ENV_FILE)) {
        Ok(content) => generator::rewrite_env_port(&content, answers.port),
        Err(_) => {
            tracing::debug!("template has no {}, using defaults", TEMPLATE_ENV_FILE);
            generator::default_env(answers)
        }
    };
    report.record(TEMPLATE_ENV_FILE, write_file(project_dir, TEMPLATE_ENV_FILE, &env));
    report.record(ACTIVE_ENV_FILE, write_file(project_dir, ACTIVE_ENV_FILE, &env));

    for (relative, content) in planned_files(answers) {
        let outcome = content.and_then(|content| write_file(project_dir, relative, &content));
        report.record(relative, outcome);
    }

    report
}
