use scaffolder_core::builder::ProjectSummary;
use scaffolder_core::config::answers::Features;
use scaffolder_core::runtime::StepOutcome;
use scaffolder_core::{
    PackageManager, ProductConfig, ProjectAnswers, ProjectBuilder, RawAnswers, ScaffoldError,
    TracingReporter,
};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use walkdir::WalkDir;

#[derive(Clone)]
struct TestConfig;

impl ProductConfig for TestConfig {
    fn name(&self) -> &'static str {
        "test-generator"
    }

    fn display_name(&self) -> &'static str {
        "Test Generator"
    }

    fn default_template_dir(&self) -> PathBuf {
        template_source()
    }

    fn template_dir_env(&self) -> &'static str {
        "SCAFFOLDER_CORE_TEST_TEMPLATE_DIR"
    }

    fn repository_base_url(&self) -> &'static str {
        "https://github.com/your-username/"
    }

    fn initial_commit_message(&self) -> &'static str {
        "Initial commit"
    }

    fn next_steps(
        &self,
        _dir: &Path,
        _answers: &ProjectAnswers,
        _installed_with: Option<PackageManager>,
    ) -> Vec<String> {
        Vec::new()
    }
}

fn template_source() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../templates/backend-server")
}

/// Copy the bundled template somewhere disposable so tests can alter it
fn template_copy() -> TempDir {
    let dir = TempDir::new().unwrap();
    let src = template_source();
    for entry in WalkDir::new(&src).min_depth(1) {
        let entry = entry.unwrap();
        let target = dir.path().join(entry.path().strip_prefix(&src).unwrap());
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).unwrap();
        } else {
            fs::copy(entry.path(), &target).unwrap();
        }
    }
    dir
}

fn answers(name: &str, port: &str, features: Features) -> ProjectAnswers {
    let mut answers = ProjectAnswers::from_raw(&RawAnswers {
        name: name.to_string(),
        port: port.to_string(),
        author_name: "Jane Doe".to_string(),
        ..Default::default()
    })
    .unwrap();
    answers.features = features;
    answers
}

async fn generate(
    template: &Path,
    cwd: &Path,
    answers: &ProjectAnswers,
) -> Result<ProjectSummary, ScaffoldError> {
    ProjectBuilder::new(&TestConfig)
        .template_dir(template)
        .cwd(cwd)
        .run_tools(false)
        .generate(answers, &TracingReporter::new())
        .await
}

fn manifest(dir: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(dir.join("package.json")).unwrap()).unwrap()
}

fn tree(root: &Path) -> BTreeMap<PathBuf, Vec<u8>> {
    WalkDir::new(root)
        .min_depth(1)
        .into_iter()
        .map(Result::unwrap)
        .filter(|e| e.file_type().is_file())
        .map(|e| {
            (
                e.path().strip_prefix(root).unwrap().to_path_buf(),
                fs::read(e.path()).unwrap(),
            )
        })
        .collect()
}

#[tokio::test]
async fn generates_plain_project() {
    let template = template_copy();
    let cwd = TempDir::new().unwrap();

    let summary = generate(template.path(), cwd.path(), &answers("my-api", "9090", Features::default()))
        .await
        .unwrap();
    let dest = summary.destination.clone();

    assert_eq!(dest.file_name().unwrap(), "my-api");
    assert!(dest.join("src/app.ts").is_file());
    assert!(dest.join("src/server.ts").is_file());
    assert!(dest.join(".gitignore").is_file());
    assert!(dest.join("README.md").is_file());

    for absent in [
        "Dockerfile",
        ".dockerignore",
        "docker-compose.yml",
        ".eslintrc.json",
        ".prettierrc",
        "jest.config.js",
    ] {
        assert!(!dest.join(absent).exists(), "{absent} should not be generated");
    }

    let scripts = manifest(&dest)["scripts"].clone();
    for name in ["test", "lint", "format"] {
        let command = scripts[name].as_str().unwrap();
        assert!(command.starts_with("echo"), "{name} should be a placeholder");
    }

    let env = fs::read_to_string(dest.join(".env.development")).unwrap();
    let port_line = env
        .lines()
        .find(|l| !l.trim_start().starts_with('#') && l.starts_with("PORT="))
        .unwrap();
    assert_eq!(port_line, "PORT=9090");
    assert!(fs::read_to_string(dest.join(".env.example"))
        .unwrap()
        .contains("PORT=9090\n"));
}

#[tokio::test]
async fn template_only_files_are_not_copied() {
    let template = template_copy();
    let cwd = TempDir::new().unwrap();

    let summary = generate(template.path(), cwd.path(), &answers("my-api", "", Features::default()))
        .await
        .unwrap();
    let dest = summary.destination;

    for absent in [
        "TEMPLATE_README.md",
        "scripts",
        ".npmignore",
        "CHANGELOG.md",
        "LICENSE",
        "PUBLISHING.md",
        ".github",
    ] {
        assert!(!dest.join(absent).exists(), "{absent} should be removed");
    }
}

#[tokio::test]
async fn manifest_round_trip() {
    let template = template_copy();
    let cwd = TempDir::new().unwrap();

    let summary = generate(template.path(), cwd.path(), &answers("my-api", "", Features::default()))
        .await
        .unwrap();
    let doc = manifest(&summary.destination);

    assert_eq!(doc["name"], "my-api");
    assert_eq!(doc["license"], "MIT");
    assert_eq!(doc["version"], "1.0.0");
    assert_eq!(doc["author"], "Jane Doe");
    for field in ["bin", "preferGlobal", "publishConfig", "files"] {
        assert!(doc.get(field).is_none(), "{field} should be removed");
    }
    assert_eq!(doc["engines"]["node"], ">=18.0.0");
}

#[tokio::test]
async fn test_toggle_alone() {
    let template = template_copy();
    let cwd = TempDir::new().unwrap();
    let features = Features {
        test: true,
        ..Default::default()
    };

    let summary = generate(template.path(), cwd.path(), &answers("my-api", "", features))
        .await
        .unwrap();
    let dest = summary.destination;

    assert!(dest.join("jest.config.js").is_file());
    for absent in [".eslintrc.json", ".prettierrc", "Dockerfile", "docker-compose.yml"] {
        assert!(!dest.join(absent).exists(), "{absent} should not be generated");
    }

    let dev = manifest(&dest)["devDependencies"].clone();
    assert!(dev.get("jest").is_some());
    assert!(dev.get("@types/jest").is_some());
    for absent in ["eslint", "prettier", "husky"] {
        assert!(dev.get(absent).is_none(), "{absent} should not be added");
    }
}

#[tokio::test]
async fn all_toggles_union() {
    let template = template_copy();
    let cwd = TempDir::new().unwrap();

    let summary = generate(template.path(), cwd.path(), &answers("my-api", "3000", Features::all()))
        .await
        .unwrap();
    let dest = summary.destination;

    for present in [
        "Dockerfile",
        ".dockerignore",
        "docker-compose.yml",
        ".eslintrc.json",
        ".prettierrc",
        "jest.config.js",
        ".husky/pre-commit",
    ] {
        assert!(dest.join(present).is_file(), "{present} should be generated");
    }

    let compose: serde_yaml::Value =
        serde_yaml::from_str(&fs::read_to_string(dest.join("docker-compose.yml")).unwrap())
            .unwrap();
    assert_eq!(compose["services"]["my-api"]["ports"][0].as_str(), Some("3000:3000"));

    let dev = manifest(&dest)["devDependencies"].clone();
    for present in ["jest", "@types/jest", "eslint", "prettier", "husky"] {
        assert!(dev.get(present).is_some(), "{present} should be added");
    }
}

#[tokio::test]
async fn copies_are_identical() {
    let template = template_copy();
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();
    let answers = answers("my-api", "9090", Features::all());

    let a = generate(template.path(), first.path(), &answers).await.unwrap();
    let b = generate(template.path(), second.path(), &answers).await.unwrap();

    assert_eq!(tree(&a.destination), tree(&b.destination));
}

#[tokio::test]
async fn existing_destination_is_untouched() {
    let template = template_copy();
    let cwd = TempDir::new().unwrap();
    let existing = cwd.path().join("my-api");
    fs::create_dir(&existing).unwrap();
    fs::write(existing.join("notes.txt"), "keep me").unwrap();

    let err = generate(template.path(), cwd.path(), &answers("my-api", "", Features::default()))
        .await
        .unwrap_err();

    assert!(matches!(err, ScaffoldError::DestinationExists(_)));
    let contents = tree(&existing);
    assert_eq!(contents.len(), 1);
    assert_eq!(contents[Path::new("notes.txt")], b"keep me");
}

#[tokio::test]
async fn destination_inside_template_is_refused() {
    let template = template_copy();
    let cwd = template.path().join("src");

    let err = generate(template.path(), &cwd, &answers("my-api", "", Features::default()))
        .await
        .unwrap_err();

    assert!(matches!(err, ScaffoldError::SelfReferential { .. }));
    assert!(!cwd.join("my-api").exists());
}

#[tokio::test]
async fn corrupt_manifest_is_fatal() {
    let template = template_copy();
    fs::write(template.path().join("package.json"), "{ \"name\": ").unwrap();
    let cwd = TempDir::new().unwrap();

    let err = generate(template.path(), cwd.path(), &answers("my-api", "", Features::default()))
        .await
        .unwrap_err();

    assert!(matches!(err, ScaffoldError::ManifestParse { .. }));
}

#[tokio::test]
async fn incomplete_template_is_fatal_before_copy() {
    let template = template_copy();
    fs::remove_file(template.path().join("src/server.ts")).unwrap();
    let cwd = TempDir::new().unwrap();

    let err = generate(template.path(), cwd.path(), &answers("my-api", "", Features::default()))
        .await
        .unwrap_err();

    assert!(matches!(err, ScaffoldError::TemplateIncomplete { .. }));
    assert!(!cwd.path().join("my-api").exists());
}

#[tokio::test]
async fn tools_skipped_are_reported() {
    let template = template_copy();
    let cwd = TempDir::new().unwrap();
    let reporter = TracingReporter::new();

    let summary = ProjectBuilder::new(&TestConfig)
        .template_dir(template.path())
        .cwd(cwd.path())
        .run_tools(false)
        .generate(&answers("my-api", "", Features::default()), &reporter)
        .await
        .unwrap();

    assert!(summary
        .outcomes
        .iter()
        .all(|o| matches!(o, StepOutcome::Skipped(_))));
    assert!(summary.degraded().is_empty());
    assert!(reporter.warnings().is_empty());
    let copied = format!("done: Copied {} template files", summary.copied_files);
    assert!(reporter.messages().contains(&copied));
}

#[cfg(unix)]
#[tokio::test]
async fn copy_failure_stops_progress_and_is_fatal() {
    let template = template_copy();
    // A dangling link cannot be copied, whoever runs the test
    std::os::unix::fs::symlink(
        template.path().join("src/missing.ts"),
        template.path().join("src/dangling.ts"),
    )
    .unwrap();
    let cwd = TempDir::new().unwrap();
    let reporter = TracingReporter::new();

    let err = ProjectBuilder::new(&TestConfig)
        .template_dir(template.path())
        .cwd(cwd.path())
        .run_tools(false)
        .generate(&answers("my-api", "", Features::default()), &reporter)
        .await
        .unwrap_err();

    assert!(matches!(err, ScaffoldError::Copy { .. }));
    let messages = reporter.messages();
    assert!(messages.contains(&"start: Copying template files...".to_string()));
    assert!(messages.contains(&"interrupted: Copying template files...".to_string()));
    assert!(!messages.iter().any(|m| m.starts_with("done: Copied")));
}

#[tokio::test]
async fn generated_test_script_passes_without_tests() {
    let template = template_copy();
    let cwd = TempDir::new().unwrap();
    let features = Features {
        test: true,
        git_hooks: true,
        ..Default::default()
    };

    let summary = generate(template.path(), cwd.path(), &answers("my-api", "", features))
        .await
        .unwrap();
    let dest = summary.destination;

    let scripts = manifest(&dest)["scripts"].clone();
    assert_eq!(scripts["test"], "tsc && jest --passWithNoTests");
    let hook = fs::read_to_string(dest.join(".husky/pre-commit")).unwrap();
    assert!(hook.contains("npm test"));
}

#[tokio::test]
async fn docker_build_skips_git_hook_install() {
    let template = template_copy();
    let cwd = TempDir::new().unwrap();
    let features = Features {
        docker: true,
        git_hooks: true,
        ..Default::default()
    };

    let summary = generate(template.path(), cwd.path(), &answers("my-api", "", features))
        .await
        .unwrap();
    let dest = summary.destination;

    assert_eq!(manifest(&dest)["scripts"]["prepare"], "husky");
    let dockerfile = fs::read_to_string(dest.join("Dockerfile")).unwrap();
    let installs: Vec<_> = dockerfile
        .lines()
        .filter(|line| line.starts_with("RUN npm install"))
        .collect();
    assert!(!installs.is_empty());
    for line in installs {
        assert!(line.contains("--ignore-scripts"), "{line}");
    }
}
