use anyhow::{Context as AnyhowContext, Result};
use clap::{Args, Parser, Subcommand};
use scorecard_core::{evaluate, scorecard, Registry, Seed};
use serde::Serialize;
use std::io::{self, Write};
use std::path::PathBuf;

mod input;
mod menu;
mod report;

fn print_stdout(text: &str) -> Result<()> {
    let mut stdout = io::stdout().lock();
    if let Err(err) = stdout
        .write_all(text.as_bytes())
        .and_then(|_| stdout.flush())
    {
        if err.kind() == io::ErrorKind::BrokenPipe {
            return Ok(());
        }
        return Err(err.into());
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let mut text = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    text.push('\n');
    print_stdout(&text)
}

#[derive(Parser)]
#[command(name = "scorecard")]
#[command(about = "Balanced scorecard: perspectives, KPIs and dependency impact", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(long, global = true)]
    quiet: bool,

    /// Seed file (JSON) replacing the builtin perspectives
    #[arg(long, global = true, env = "SCORECARD_SEED")]
    seed: Option<PathBuf>,

    /// Start with no perspectives at all; wins over any seed
    #[arg(long, global = true)]
    empty: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive menu (default)
    Interactive,

    /// List perspectives in insertion order
    Perspectives(OutputArgs),

    /// Show each perspective's outgoing dependencies
    Dependencies(OutputArgs),

    /// List KPIs per perspective with computed performance
    Kpis(OutputArgs),

    /// Per-KPI performance report
    Scorecard(OutputArgs),

    /// Averages, dependency impact and lowest performer
    Evaluate(OutputArgs),
}

#[derive(Args)]
struct OutputArgs {
    /// Emit JSON instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct PerspectiveEntry<'a> {
    index: usize,
    name: &'a str,
}

pub fn main_entry() -> Result<()> {
    let mut cli = Cli::parse();

    let json_output = matches!(
        &cli.command,
        Some(
            Commands::Perspectives(OutputArgs { json: true })
                | Commands::Dependencies(OutputArgs { json: true })
                | Commands::Kpis(OutputArgs { json: true })
                | Commands::Scorecard(OutputArgs { json: true })
                | Commands::Evaluate(OutputArgs { json: true })
        )
    );
    if json_output {
        cli.quiet = true;
    }

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    let registry = load_registry(&cli)?;

    match cli.command.unwrap_or(Commands::Interactive) {
        Commands::Interactive => menu::run(registry)?,
        Commands::Perspectives(args) => {
            if args.json {
                let entries: Vec<PerspectiveEntry> = registry
                    .perspectives()
                    .enumerate()
                    .map(|(index, name)| PerspectiveEntry { index, name })
                    .collect();
                print_json(&entries)?;
            } else {
                print_stdout(&report::render_perspectives(&registry))?;
            }
        }
        Commands::Dependencies(args) => {
            if args.json {
                print_json(&registry.dependencies())?;
            } else {
                print_stdout(&report::render_dependencies(&registry))?;
            }
        }
        Commands::Kpis(args) => {
            let reports = scorecard(&registry);
            if args.json {
                print_json(&reports)?;
            } else {
                print_stdout(&report::render_kpis(&reports))?;
            }
        }
        Commands::Scorecard(args) => {
            let reports = scorecard(&registry);
            if args.json {
                print_json(&reports)?;
            } else {
                print_stdout(&report::render_scorecard(&reports))?;
            }
        }
        Commands::Evaluate(args) => {
            let eval = evaluate(&registry);
            if args.json {
                print_json(&eval)?;
            } else {
                print_stdout(&report::render_evaluation(&eval))?;
            }
        }
    }

    Ok(())
}

fn load_registry(cli: &Cli) -> Result<Registry> {
    if cli.empty {
        if let Some(path) = &cli.seed {
            log::debug!("--empty given, ignoring seed {}", path.display());
        }
        log::debug!("Starting with an empty registry");
        return Ok(Registry::new());
    }
    let seed = match &cli.seed {
        Some(path) => Seed::load(path)
            .with_context(|| format!("Failed to load seed {}", path.display()))?,
        None => Seed::builtin().context("Builtin seed is invalid")?,
    };
    let registry = seed.build().context("Failed to apply seed")?;
    log::info!(
        "Loaded {} perspectives ({} dependencies)",
        registry.len(),
        registry.graph().edge_count()
    );
    Ok(registry)
}
