use crate::input::{parse_achieved, parse_target, require_name, resolve_perspective};
use crate::report;
use anyhow::{Context, Result};
use console::style;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Select};
use scorecard_core::{evaluate, scorecard, EdgeOutcome, Registry};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum MenuAction {
    AddKpi,
    ViewKpis,
    Scorecard,
    ShowDependencies,
    Evaluate,
    AddDependency,
    ListPerspectives,
    Exit,
}

impl MenuAction {
    const ALL: [MenuAction; 8] = [
        MenuAction::AddKpi,
        MenuAction::ViewKpis,
        MenuAction::Scorecard,
        MenuAction::ShowDependencies,
        MenuAction::Evaluate,
        MenuAction::AddDependency,
        MenuAction::ListPerspectives,
        MenuAction::Exit,
    ];

    const fn label(self) -> &'static str {
        match self {
            MenuAction::AddKpi => "Add Key Performance Indicator (KPI)",
            MenuAction::ViewKpis => "View All KPIs",
            MenuAction::Scorecard => "Generate Scorecard (per-KPI performance)",
            MenuAction::ShowDependencies => "Show Dependencies",
            MenuAction::Evaluate => {
                "Evaluate Performance (averages + dependency impact + lowest performer)"
            }
            MenuAction::AddDependency => "Add Dependency Between Perspectives",
            MenuAction::ListPerspectives => "List Perspectives",
            MenuAction::Exit => "Exit",
        }
    }
}

/// Menu loop; returns when the user picks Exit
pub fn run(mut registry: Registry) -> Result<()> {
    let theme = ColorfulTheme::default();
    let labels: Vec<&str> = MenuAction::ALL.iter().map(|a| a.label()).collect();

    loop {
        println!();
        let picked = Select::with_theme(&theme)
            .with_prompt("Balanced Scorecard System")
            .items(&labels)
            .default(0)
            .interact()
            .context("Interactive mode needs a terminal")?;

        match MenuAction::ALL[picked] {
            MenuAction::AddKpi => add_kpi(&theme, &mut registry)?,
            MenuAction::ViewKpis => print!("{}", report::render_kpis(&scorecard(&registry))),
            MenuAction::Scorecard => {
                print!("{}", report::render_scorecard(&scorecard(&registry)))
            }
            MenuAction::ShowDependencies => print!("{}", report::render_dependencies(&registry)),
            MenuAction::Evaluate => print!("{}", report::render_evaluation(&evaluate(&registry))),
            MenuAction::AddDependency => add_dependency(&theme, &mut registry)?,
            MenuAction::ListPerspectives => print!("{}", report::render_perspectives(&registry)),
            MenuAction::Exit => {
                let released = registry.teardown();
                log::debug!(
                    "Released {} perspectives and {} KPIs",
                    released.perspectives,
                    released.kpis
                );
                println!("Exiting program...");
                return Ok(());
            }
        }
    }
}

fn prompt(theme: &ColorfulTheme, text: &str) -> Result<String> {
    Input::<String>::with_theme(theme)
        .with_prompt(text)
        .allow_empty(true)
        .interact_text()
        .context("Failed to read input")
}

fn report_error(err: impl std::fmt::Display) {
    println!("{}", style(err).red());
}

fn add_kpi(theme: &ColorfulTheme, registry: &mut Registry) -> Result<()> {
    let existing: Vec<String> = registry.perspectives().map(str::to_string).collect();
    let existing: Vec<&str> = existing.iter().map(String::as_str).collect();
    print!("{}", report::render_perspectives(registry));

    let perspective = match resolve_perspective(
        &prompt(theme, "Perspective (number or name)")?,
        &existing,
    ) {
        Ok(name) => name,
        Err(err) => {
            report_error(err);
            return Ok(());
        }
    };
    let kpi = match require_name("KPI name", &prompt(theme, "KPI name")?) {
        Ok(name) => name,
        Err(err) => {
            report_error(err);
            return Ok(());
        }
    };

    let target: String = Input::with_theme(theme)
        .with_prompt("Target value (1-100)")
        .validate_with(|raw: &String| parse_target(raw).map(|_| ()))
        .interact_text()
        .context("Failed to read target")?;
    let achieved: String = Input::with_theme(theme)
        .with_prompt("Achieved value")
        .validate_with(|raw: &String| parse_achieved(raw).map(|_| ()))
        .interact_text()
        .context("Failed to read achieved value")?;
    let target = parse_target(&target)?;
    let achieved = parse_achieved(&achieved)?;

    match registry.add_kpi(&perspective, &kpi, target, achieved) {
        Ok(()) => {
            let owner = registry
                .perspective(&perspective)
                .map_or(perspective.as_str(), |p| p.name());
            println!(
                "{} KPI added successfully under {}.",
                style("✓").green(),
                style(owner).cyan()
            );
        }
        Err(err) => report_error(err),
    }
    Ok(())
}

fn add_dependency(theme: &ColorfulTheme, registry: &mut Registry) -> Result<()> {
    println!(
        "\nA dependency edge A -> B means 'if A performs poorly, it may negatively impact B'."
    );
    println!("Example: Learning -> Internal means poor Learning may lead to weaker Internal processes.");
    print!("{}", report::render_perspectives(registry));
    if registry.is_empty() {
        println!("No perspectives exist yet. Add a KPI with a new perspective name first.");
        return Ok(());
    }

    let existing: Vec<String> = registry.perspectives().map(str::to_string).collect();
    let existing: Vec<&str> = existing.iter().map(String::as_str).collect();

    let from = match resolve_perspective(&prompt(theme, "Source perspective (from)")?, &existing)
    {
        Ok(name) => name,
        Err(err) => {
            report_error(err);
            return Ok(());
        }
    };
    let to = match resolve_perspective(
        &prompt(theme, "Destination perspective (to)")?,
        &existing,
    ) {
        Ok(name) => name,
        Err(err) => {
            report_error(err);
            return Ok(());
        }
    };

    match registry.add_dependency(&from, &to) {
        Ok(outcome) => {
            let name = |raw: &str| {
                registry
                    .perspective(raw)
                    .map_or(raw.to_string(), |p| p.name().to_string())
            };
            let verb = match outcome {
                EdgeOutcome::Created => "Added dependency",
                EdgeOutcome::AlreadyExisted => "Dependency already exists",
            };
            println!("{verb}: {} -> {}", name(&from), name(&to));
        }
        Err(err) => report_error(err),
    }
    Ok(())
}
