//! hoops CLI entry point.
//!
//! Usage:
//!   hoops run --events pbp.csv --games games.json [--config cfg.json] [--out dir]
//!   hoops validate --events pbp.csv
//!
//! Command-line arguments override values from the config file.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use hoops_core::config::JoinPolicy;
use hoops_core::Config;
use hoops_ingestion::{load_events, ShotClassifier};
use hoops_report::{SeasonReport, TableWriter};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "hoops")]
#[command(about = "Possession and efficiency tables from charted play-by-play data", long_about = None)]
struct Cli {
    /// Debug-level logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Aggregate a season and write every table as JSON
    Run {
        /// Play-by-play events (.json, .ndjson, .jsonl or .csv)
        #[arg(long)]
        events: Option<PathBuf>,

        /// Game result dictionary (.json)
        #[arg(long)]
        games: Option<PathBuf>,

        /// Config file (.json)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output directory
        #[arg(long)]
        out: Option<PathBuf>,

        /// Drop team-game rows without game context instead of failing
        #[arg(long)]
        lenient_join: bool,

        /// Write compact instead of pretty JSON
        #[arg(long)]
        compact: bool,
    },

    /// Classify every event and report data-quality counts
    Validate {
        /// Play-by-play events (.json, .ndjson, .jsonl or .csv)
        #[arg(long)]
        events: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Run {
            events,
            games,
            config,
            out,
            lenient_join,
            compact,
        } => {
            let mut config = match config {
                Some(path) => Config::from_json_file(&path)
                    .with_context(|| format!("Failed to load config: {}", path.display()))?,
                None => Config::default(),
            };
            if let Some(events) = events {
                config.data.events_path = Some(events);
            }
            if let Some(games) = games {
                config.data.games_path = Some(games);
            }
            if let Some(out) = out {
                config.output.dir = out;
            }
            if lenient_join {
                config.aggregation.join_policy = JoinPolicy::WarnAndDrop;
            }
            if compact {
                config.output.pretty = false;
            }

            let report = SeasonReport::from_config(&config).context("Season run failed")?;
            let writer = TableWriter::from_config(&config.output);
            let paths = writer
                .write_report(&report)
                .with_context(|| format!("Failed to write tables to {}", writer.dir().display()))?;

            info!(tables = paths.len(), dir = %writer.dir().display(), "tables written");
            print_summary(&report);
        }

        Commands::Validate { events } => {
            let records = load_events(&events)
                .with_context(|| format!("Failed to load events: {}", events.display()))?;

            let mut classifier = ShotClassifier::new();
            classifier
                .classify_batch(&records)
                .context("Event validation failed")?;

            let stats = classifier.stats();
            println!("Events:              {}", stats.total_events);
            println!("Non-possession:      {}", stats.non_possession_events);
            println!("Shot attempts:       {}", stats.shot_attempts);
            println!("  free throws:       {}", stats.free_throws);
            println!("  three-pointers:    {}", stats.three_pointers);
            println!("Made shots:          {} ({:.1}%)", stats.made_shots, stats.make_rate() * 100.0);
            println!("Points:              {}", stats.points);
        }
    }

    Ok(())
}

fn print_summary(report: &SeasonReport) {
    let s = &report.summary;
    println!("Events:              {}", s.events);
    println!("Possessions:         {}", s.possessions);
    println!("Team-games:          {}", s.team_games);
    println!("Games:               {}", s.games);
    println!("Teams:               {}", s.teams);
    println!("Points:              {}", s.total_points);
    println!("Score mismatches:    {}", s.discrepancies);
}

/// Initialize logging with tracing
fn init_logging(verbose: bool) {
    let default = if verbose {
        "hoops=debug,hoops_report=debug,hoops_features=debug,hoops_ingestion=debug"
    } else {
        "hoops=info,hoops_report=info,hoops_features=info,hoops_ingestion=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
