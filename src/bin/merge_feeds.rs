use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use matchpoint::{stats, FallbackRateTracker, FixtureMerger, MergeConfig, OffsetClock, RawRecord};
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(author, version, about = "Merge reference and live tennis feed snapshots", long_about = None)]
struct Cli {
    /// JSON config file; defaults plus MATCHPOINT_* environment variables otherwise
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(short, long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge a reference-feed snapshot with a live-feed snapshot
    Merge {
        /// JSON array of reference (pre-match) records
        #[arg(short = 'a', long)]
        prematch: PathBuf,

        /// JSON array of live (in-play) records
        #[arg(short = 'b', long)]
        live: PathBuf,

        /// Print only the match statistics
        #[arg(short, long)]
        stats_only: bool,
    },

    /// Pair events with odds by match id
    Odds {
        /// JSON array of events
        #[arg(short, long)]
        events: PathBuf,

        /// JSON object mapping match id to odds
        #[arg(short, long)]
        odds: Option<PathBuf>,
    },
}

fn read_json(path: &Path) -> Result<Value> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Failed to parse {}", path.display()))
}

fn read_records(path: &Path) -> Result<Vec<RawRecord>> {
    match read_json(path)? {
        Value::Array(records) => Ok(records),
        other => bail!(
            "{} must contain a JSON array, found {}",
            path.display(),
            type_name(&other)
        ),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", rendered);
    Ok(())
}

fn main() -> Result<()> {
    matchpoint::logging::configure_logging();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => MergeConfig::from_json_file(path)?,
        None => MergeConfig::from_env()?,
    };
    let clock = Arc::new(OffsetClock::from_hours(config.utc_offset_hours));
    let merger = FixtureMerger::new(config);

    match cli.command {
        Commands::Merge {
            prematch,
            live,
            stats_only,
        } => {
            let feed_a = read_records(&prematch)?;
            let feed_b = read_records(&live)?;
            info!(
                "Merging {} reference records with {} live records",
                feed_a.len(),
                feed_b.len()
            );

            let mut tracker = FallbackRateTracker::new(clock);
            let outcome = merger.merge_with_report(feed_a, feed_b, &mut tracker);
            let summary = stats(&outcome.records);

            if stats_only {
                print_json(
                    &json!({
                        "stats": summary,
                        "report": outcome.report,
                        "fuzzy_fallbacks_today": tracker.count(),
                    }),
                    cli.pretty,
                )?;
            } else {
                print_json(&outcome.records, cli.pretty)?;
            }
        }
        Commands::Odds { events, odds } => {
            let events = read_records(&events)?;
            let odds_by_id: HashMap<String, RawRecord> = match odds {
                Some(path) => serde_json::from_value(read_json(&path)?)
                    .with_context(|| format!("{} must map match ids to odds", path.display()))?,
                None => HashMap::new(),
            };
            let paired = merger.merge_events_with_odds(events, &odds_by_id);
            print_json(&paired, cli.pretty)?;
        }
    }

    Ok(())
}
