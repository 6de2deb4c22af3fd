//! Charm-style CLI prompts using cliclack

use crate::builder::{ProjectBuilder, ProjectSummary};
use crate::config::answers::{self, ProjectAnswers, RawAnswers};
use crate::error::ScaffoldError;
use crate::product::ProductConfig;
use crate::tui::spinner::CliclackReporter;
use anyhow::{Context, Result};
use colored::Colorize;

/// How an interactive run ended without error
#[derive(Debug)]
pub enum RunOutcome {
    Created(ProjectSummary),
    Cancelled,
}

/// Run the generator with interactive prompts
pub async fn run<C: ProductConfig>(config: &C) -> Result<RunOutcome> {
    tracing::info!(product = config.name(), "starting generator");
    cliclack::intro(config.display_name())?;

    // Step 1: Collect answers; the first invalid one ends the run
    let raw = collect_answers()?;
    let answers = ProjectAnswers::from_raw(&raw).map_err(ScaffoldError::from)?;

    // Step 2: Confirm
    if !confirm(&answers)? {
        cliclack::outro_cancel("Setup cancelled.")?;
        return Ok(RunOutcome::Cancelled);
    }

    // Step 3: Generate
    let builder = ProjectBuilder::new(config);
    cliclack::log::info(format!(
        "Using template from {}",
        builder.template_path().display()
    ))?;
    let summary = builder
        .generate(&answers, &CliclackReporter)
        .await
        .with_context(|| format!("Could not create {}", answers.name))?;

    // Step 4: Show next steps
    print_next_steps(config, &summary, &answers)?;

    Ok(RunOutcome::Created(summary))
}

fn text(prompt: &str, placeholder: &str) -> Result<String> {
    let mut input = cliclack::input(prompt).required(false);
    if !placeholder.is_empty() {
        input = input.placeholder(placeholder);
    }
    Ok(input.interact()?)
}

fn toggle(prompt: &str) -> Result<String> {
    text(&format!("{} (y/N)", prompt), "n")
}

fn collect_answers() -> Result<RawAnswers> {
    let name = text("Project name", "my-api")?;
    answers::validate_name(name.trim()).map_err(ScaffoldError::from)?;

    let description = text("Project description", answers::DEFAULT_DESCRIPTION)?;
    let author_name = text("Author name", answers::DEFAULT_AUTHOR)?;

    let author_email = text("Author email (optional)", "")?;
    if !author_email.trim().is_empty() {
        answers::validate_email(author_email.trim()).map_err(ScaffoldError::from)?;
    }

    let license = text("License", answers::DEFAULT_LICENSE)?;

    let port = text("Port", &answers::DEFAULT_PORT.to_string())?;
    answers::parse_port(&port).map_err(ScaffoldError::from)?;

    Ok(RawAnswers {
        name,
        description,
        author_name,
        author_email,
        license,
        port,
        docker: toggle("Add Docker support?")?,
        git_hooks: toggle("Add git hooks (husky)?")?,
        lint: toggle("Add ESLint?")?,
        format: toggle("Add Prettier?")?,
        test: toggle("Add Jest?")?,
    })
}

fn confirm(answers: &ProjectAnswers) -> Result<bool> {
    let features = answers.features.enabled_labels();
    let features = if features.is_empty() {
        "none".to_string()
    } else {
        features.join(", ")
    };

    cliclack::note(
        "Project",
        format!(
            "Name:        {}\nDescription: {}\nAuthor:      {}\nLicense:     {}\nPort:        {}\nFeatures:    {}",
            answers.name,
            answers.description,
            answers.author(),
            answers.license,
            answers.port,
            features
        ),
    )?;

    Ok(cliclack::confirm("Create project?")
        .initial_value(true)
        .interact()?)
}

fn print_next_steps<C: ProductConfig>(
    config: &C,
    summary: &ProjectSummary,
    answers: &ProjectAnswers,
) -> Result<()> {
    let degraded = summary.degraded();
    if !degraded.is_empty() {
        println!();
        println!("  {}", "Manual steps".yellow().bold());
        println!();
        for (reason, remedy) in &degraded {
            println!("  -  {}", reason);
            println!("     {}", remedy.cyan());
        }
    }

    let steps = config.next_steps(&summary.destination, answers, summary.installed_with);

    println!();
    println!("  {}", "Next steps".bold());
    println!();

    for (i, step) in steps.iter().enumerate() {
        println!("  {}.  {}", (i + 1).to_string().dimmed(), step.cyan());
    }

    cliclack::outro(format!(
        "Project ready at {}. Happy coding!",
        summary.destination.display()
    ))?;

    Ok(())
}
