//! kindsync command-line driver
//!
//! Keeps a JSON store snapshot in line with a declared kind schema and
//! rebuilds parent links from artifact directives.
//!
//! Usage:
//!   kindsync reconcile --manifest kinds.toml --store store.json
//!   kindsync views --dir views/ --store store.json
//!   kindsync rebuild --artifacts masterpages/ --store store.json
//!   kindsync list --store store.json

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use kindsync_cli::{commands, EngineConfig};
use kindsync_sync::ReconcileReport;
use kindsync_types::Actor;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser, Debug)]
#[command(name = "kindsync")]
#[command(about = "Reconcile declared entity kinds against a store and rebuild their hierarchy")]
struct Args {
    /// Engine settings (TOML with [schema] and [hierarchy] sections)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Name recorded as the creator of new entities
    #[arg(long, global = true, default_value = "admin")]
    actor: String,

    /// Enable verbose debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create store entities for every kind declared in a manifest
    Reconcile {
        #[arg(short, long)]
        manifest: PathBuf,
        #[arg(short, long)]
        store: PathBuf,
    },
    /// Create store entities for every view file in a directory
    Views {
        #[arg(short, long)]
        dir: PathBuf,
        #[arg(short, long)]
        store: PathBuf,
    },
    /// Update parent links from directives in artifact files
    Rebuild {
        #[arg(short, long)]
        artifacts: PathBuf,
        #[arg(short, long)]
        store: PathBuf,
    },
    /// Print the entities in a store
    List {
        #[arg(short, long)]
        store: PathBuf,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level.as_str()));
    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();

    let config = EngineConfig::load_or_default(args.config.as_deref()).context("Failed to load engine config")?;
    let actor = Actor::new(0, args.actor);

    match args.command {
        Command::Reconcile { manifest, store } => {
            let report = commands::reconcile(&manifest, &store, &config, &actor)?;
            print_reconcile(&report);
        }
        Command::Views { dir, store } => {
            let report = commands::views(&dir, &store, &config, &actor)?;
            print_reconcile(&report);
        }
        Command::Rebuild { artifacts, store } => {
            let report = commands::rebuild(&artifacts, &store, &config)?;
            for link in &report.updated {
                println!("  {} -> {}", link.alias, link.parent_alias);
            }
            info!(
                updated = report.updated.len(),
                unchanged = report.unchanged.len(),
                "Rebuild finished"
            );
        }
        Command::List { store } => {
            for row in commands::list(&store)? {
                println!("{row}");
            }
        }
    }
    Ok(())
}

fn print_reconcile(report: &ReconcileReport) {
    for kind in &report.created {
        println!("  created  {} (#{})", kind.alias, kind.identity);
    }
    for kind in &report.existing {
        println!("  present  {} (#{})", kind.alias, kind.identity);
    }
}
