//! uvs — operator harness for the universe-selection engine.
//!
//! Runs one selection pass over an on-disk coarse store and prints the
//! resulting report as JSON. Useful for inspecting what a deployed
//! algorithm's universe would look like on a given date.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use chrono_tz::Tz;
use clap::{Parser, Subcommand};
use tracing::info;
use uvs_coarse::fetch_coarse;
use uvs_feed::SubscriptionSet;
use uvs_securities::{SecurityRegistry, UniverseSettings};
use uvs_universe::{NoOpenOrders, SelectionEngine, SubscriptionLimits, TopDollarVolume};

#[derive(Parser)]
#[command(name = "uvs")]
#[command(about = "Universe selection tooling", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one selection pass over a coarse store and print the report.
    Select {
        /// Root of the coarse store (contains per-market directories).
        #[arg(long)]
        data_root: PathBuf,

        /// Market identifier (e.g. usa).
        #[arg(long, default_value = "usa")]
        market: String,

        /// Selection date, YYYY-MM-DD.
        #[arg(long)]
        date: NaiveDate,

        /// Market timezone (IANA name).
        #[arg(long, default_value = "America/New_York")]
        timezone: String,

        /// Use today's session date in the market timezone.
        #[arg(long, default_value_t = false)]
        live: bool,

        /// Number of top-dollar-volume candidates to select.
        #[arg(long, default_value_t = 10)]
        top: usize,

        /// Optional UniverseSettings JSON file; defaults apply otherwise.
        #[arg(long)]
        settings: Option<PathBuf>,

        /// Optional SubscriptionLimits JSON file; defaults apply otherwise.
        #[arg(long)]
        limits: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Commands::Select {
            data_root,
            market,
            date,
            timezone,
            live,
            top,
            settings,
            limits,
        } => {
            let tz: Tz = timezone
                .parse()
                .map_err(|e| anyhow::anyhow!("invalid timezone '{timezone}': {e}"))?;
            let settings = load_json_or_default::<UniverseSettings>(settings, "settings")?;
            let limits = load_json_or_default::<SubscriptionLimits>(limits, "limits")?;

            let candidates = fetch_coarse(&data_root, &market, tz, date, live)?;
            info!(
                market,
                date = %date,
                candidates = candidates.len(),
                "fetched coarse snapshot"
            );

            let engine = SelectionEngine::new(settings, limits)
                .with_selection_function(Box::new(TopDollarVolume::new(top)));

            let mut feed = SubscriptionSet::new();
            let mut registry = SecurityRegistry::new();
            let report = engine.apply_universe_selection(
                date,
                &candidates,
                &mut feed,
                &mut registry,
                &NoOpenOrders,
            );

            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(())
        }
    }
}

fn load_json_or_default<T>(path: Option<PathBuf>, what: &'static str) -> Result<T>
where
    T: serde::de::DeserializeOwned + Default,
{
    match path {
        Some(path) => {
            let raw = fs::read_to_string(&path)
                .with_context(|| format!("read {what}: {}", path.display()))?;
            serde_json::from_str(&raw).with_context(|| format!("parse {what} json"))
        }
        None => Ok(T::default()),
    }
}
