//! Package manifest (`package.json`) customization

use crate::config::answers::{Features, ProjectAnswers};
use crate::error::{Result, ScaffoldError};
use crate::templates::version::INITIAL_VERSION;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

pub const MANIFEST_FILE: &str = "package.json";

/// Fields only meaningful for publishing the template itself
pub const PUBLISH_FIELDS: &[&str] = &["bin", "preferGlobal", "publishConfig", "files"];

const MAIN_ENTRY: &str = "dist/server.js";

pub const RUNTIME_DEPENDENCIES: &[(&str, &str)] = &[
    ("express", "^4.21.2"),
    ("mongoose", "^8.9.5"),
    ("cors", "^2.8.5"),
    ("helmet", "^8.0.0"),
    ("dotenv", "^16.4.7"),
    ("winston", "^3.17.0"),
];

pub const DEV_DEPENDENCIES: &[(&str, &str)] = &[
    ("typescript", "^5.7.3"),
    ("ts-node-dev", "^2.0.0"),
    ("@types/node", "^22.10.7"),
    ("@types/express", "^4.17.21"),
    ("@types/cors", "^2.8.17"),
];

pub const TEST_DEPENDENCIES: &[(&str, &str)] = &[("jest", "^29.7.0"), ("@types/jest", "^29.5.14")];

pub const LINT_DEPENDENCIES: &[(&str, &str)] = &[
    ("eslint", "^8.57.1"),
    ("@typescript-eslint/parser", "^7.18.0"),
    ("@typescript-eslint/eslint-plugin", "^7.18.0"),
];

pub const FORMAT_DEPENDENCIES: &[(&str, &str)] = &[("prettier", "^3.4.2")];

pub const GIT_HOOK_DEPENDENCIES: &[(&str, &str)] = &[("husky", "^9.1.7")];

/// Development dependencies contributed by each enabled toggle
pub fn feature_dev_dependencies(features: &Features) -> Vec<(&'static str, &'static str)> {
    [
        (features.test, TEST_DEPENDENCIES),
        (features.lint, LINT_DEPENDENCIES),
        (features.format, FORMAT_DEPENDENCIES),
        (features.git_hooks, GIT_HOOK_DEPENDENCIES),
    ]
    .into_iter()
    .filter(|(enabled, _)| *enabled)
    .flat_map(|(_, deps)| deps.iter().copied())
    .collect()
}

fn placeholder(what: &str) -> String {
    format!("echo \"{} not configured\" && exit 0", what)
}

/// The full script table; toggle-dependent entries fall back to a no-op
pub fn scripts(answers: &ProjectAnswers) -> Map<String, Value> {
    let features = answers.features;
    let gated = |enabled: bool, command: String, what: &str| {
        if enabled {
            command
        } else {
            placeholder(what)
        }
    };

    let entries = [
        ("build", "tsc".to_string()),
        ("start", "node dist/server.js".to_string()),
        (
            "dev",
            "ts-node-dev --respawn --transpile-only src/server.ts".to_string(),
        ),
        (
            "test",
            gated(
                features.test,
                "tsc && jest --passWithNoTests".to_string(),
                "Tests",
            ),
        ),
        (
            "lint",
            gated(features.lint, "eslint . --ext .ts".to_string(), "Linting"),
        ),
        (
            "format",
            gated(
                features.format,
                "prettier --write \"src/**/*.ts\"".to_string(),
                "Formatting",
            ),
        ),
        ("prepare", gated(features.git_hooks, "husky".to_string(), "Git hooks")),
        (
            "docker:build",
            gated(
                features.docker,
                format!("docker build -t {} .", answers.name),
                "Docker",
            ),
        ),
        (
            "docker:up",
            gated(features.docker, "docker compose up -d --build".to_string(), "Docker"),
        ),
    ];

    entries
        .into_iter()
        .map(|(name, command)| (name.to_string(), Value::String(command)))
        .collect()
}

/// Repository, issue tracker, and homepage URLs for a project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryUrls {
    pub repository: String,
    pub bugs: String,
    pub homepage: String,
}

impl RepositoryUrls {
    /// Append the project name to the hosting base URL, preserving its query parameters
    pub fn new(base: &str, name: &str) -> std::result::Result<Self, url::ParseError> {
        let mut url = Url::parse(base)?;
        url.path_segments_mut()
            .map_err(|_| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
            .pop_if_empty()
            .push(name);
        let project = url.as_str().trim_end_matches('/');

        Ok(Self {
            repository: format!("git+{}.git", project),
            bugs: format!("{}/issues", project),
            homepage: format!("{}#readme", project),
        })
    }
}

/// The destination manifest, loaded once and mutated in place
#[derive(Debug, Clone)]
pub struct ManifestDocument {
    path: PathBuf,
    fields: Map<String, Value>,
}

impl ManifestDocument {
    /// Load `package.json` from a project directory
    pub fn load(project_dir: &Path) -> Result<Self> {
        let path = project_dir.join(MANIFEST_FILE);
        let content = fs::read_to_string(&path).map_err(|source| ScaffoldError::ManifestRead {
            path: path.clone(),
            source,
        })?;
        let value: Value =
            serde_json::from_str(&content).map_err(|source| ScaffoldError::ManifestParse {
                path: path.clone(),
                source,
            })?;

        match value {
            Value::Object(fields) => Ok(Self { path, fields }),
            _ => Err(ScaffoldError::ManifestShape {
                path,
                field: "(root)",
            }),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Apply every customization step in order
    pub fn customize(&mut self, answers: &ProjectAnswers, repository_base: &str) -> Result<()> {
        self.set_identity(answers, repository_base)?;
        self.remove_publish_fields();
        self.replace_scripts(answers);
        self.merge_dependencies("dependencies", RUNTIME_DEPENDENCIES)?;
        self.merge_dependencies("devDependencies", DEV_DEPENDENCIES)?;
        self.merge_dependencies(
            "devDependencies",
            &feature_dev_dependencies(&answers.features),
        )?;
        Ok(())
    }

    /// Overwrite name, description, author, license, version, and hosting URLs
    pub fn set_identity(&mut self, answers: &ProjectAnswers, repository_base: &str) -> Result<()> {
        let urls = RepositoryUrls::new(repository_base, &answers.name).map_err(|source| {
            ScaffoldError::RepositoryUrl {
                name: answers.name.clone(),
                source,
            }
        })?;

        let fields = &mut self.fields;
        fields.insert("name".into(), Value::String(answers.name.clone()));
        fields.insert("version".into(), Value::String(INITIAL_VERSION.to_string()));
        fields.insert(
            "description".into(),
            Value::String(answers.description.clone()),
        );
        fields.insert("main".into(), Value::String(MAIN_ENTRY.to_string()));
        fields.insert("author".into(), Value::String(answers.author()));
        fields.insert("license".into(), Value::String(answers.license.clone()));
        fields.insert(
            "repository".into(),
            serde_json::json!({ "type": "git", "url": urls.repository }),
        );
        fields.insert("bugs".into(), serde_json::json!({ "url": urls.bugs }));
        fields.insert("homepage".into(), Value::String(urls.homepage));
        Ok(())
    }

    pub fn remove_publish_fields(&mut self) {
        for field in PUBLISH_FIELDS {
            self.fields.shift_remove(*field);
        }
    }

    pub fn replace_scripts(&mut self, answers: &ProjectAnswers) {
        self.fields
            .insert("scripts".into(), Value::Object(scripts(answers)));
    }

    /// Add entries to a dependency map, creating it if absent. Existing versions win.
    pub fn merge_dependencies(&mut self, section: &'static str, entries: &[(&str, &str)]) -> Result<()> {
        let map = self
            .fields
            .entry(section)
            .or_insert_with(|| Value::Object(Map::new()));

        let Value::Object(map) = map else {
            return Err(ScaffoldError::ManifestShape {
                path: self.path.clone(),
                field: section,
            });
        };

        for (package, version) in entries {
            map.entry(*package)
                .or_insert_with(|| Value::String(version.to_string()));
        }
        Ok(())
    }

    /// Serialize with 2-space indentation and a trailing newline
    pub fn save(&self) -> Result<()> {
        let mut content = serde_json::to_string_pretty(&self.fields).map_err(|source| {
            ScaffoldError::ManifestSerialize {
                path: self.path.clone(),
                source,
            }
        })?;
        content.push('\n');
        fs::write(&self.path, content).map_err(|source| ScaffoldError::ManifestWrite {
            path: self.path.clone(),
            source,
        })
    }
}
