//! # quest-cli
//!
//! Command-line driver for Eternal Quest.
//!
//! - `quest init` — start a new quest log
//! - `quest add simple|eternal|checklist` — add a goal
//! - `quest record <number>` — record an event against a goal
//! - `quest list` / `quest score` — inspect goals and score
//! - `quest history` — show recent quest events
//! - `quest menu` — interactive menu

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use quest_goal::QuestConfig;
use tracing_subscriber::EnvFilter;

use commands::QuestContext;

/// Eternal Quest — set goals, record progress, earn points.
#[derive(Parser)]
#[command(name = "quest", version, about)]
struct Cli {
    /// Project root directory (defaults to current directory).
    #[arg(long, default_value = ".", global = true)]
    project_root: PathBuf,

    /// Ledger file to use instead of the configured one.
    #[arg(long, global = true)]
    ledger: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a new, empty quest log.
    Init {
        /// Owner of the quest log (defaults to the configured owner).
        owner: Option<String>,
        /// Replace an existing quest log.
        #[arg(long)]
        force: bool,
    },
    /// Add a goal.
    Add {
        #[command(subcommand)]
        goal: commands::goal::AddCommands,
    },
    /// Record an event against a goal, by its number in `quest list`.
    Record {
        #[arg(allow_negative_numbers = true)]
        number: i64,
    },
    /// Show all goals.
    List,
    /// Show the current score.
    Score,
    /// Show recent quest events.
    History {
        /// Number of events to show.
        #[arg(short = 'n', long, default_value = "20")]
        limit: usize,
    },
    /// Run the interactive menu.
    Menu,
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they never mix with command output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("quest_goal=warn".parse()?)
                .add_directive("quest=warn".parse()?),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let cli = Cli::parse();
    let project_root = cli.project_root.canonicalize().unwrap_or(cli.project_root);
    let mut config = QuestConfig::load_or_default(&project_root)?;
    if let Some(ledger) = cli.ledger {
        config.ledger_file = ledger;
    }
    tracing::debug!(ledger = %config.ledger_file.display(), "resolved quest config");

    let ctx = QuestContext::new(config);

    match &cli.command {
        Commands::Init { owner, force } => commands::init::execute(&ctx, owner.as_deref(), *force),
        Commands::Add { goal } => commands::goal::add(&ctx, goal),
        Commands::Record { number } => commands::goal::record(&ctx, *number),
        Commands::List => commands::goal::list(&ctx),
        Commands::Score => commands::goal::score(&ctx),
        Commands::History { limit } => commands::history::execute(&ctx, *limit),
        Commands::Menu => commands::menu::execute(&ctx),
    }
}
