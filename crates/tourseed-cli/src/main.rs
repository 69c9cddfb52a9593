//! `tourseed` — reconcile tour itineraries against a catalog, or audit them.
//!
//! # Usage
//!
//! ```text
//! tourseed --database tours.db reconcile --catalog catalog.json
//! tourseed --config tourseed.toml audit --threshold 3
//! ```
//!
//! Settings come from `tourseed.toml` (or `--config`), then `TOURSEED_*`
//! environment variables, then flags. Without a database path nothing runs.

mod report;
mod settings;

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use serde::Serialize;
use settings::Settings;
use tourseed_core::catalog::{Catalog, CatalogFormat};
use tourseed_reconcile::AuditOptions;
use tourseed_store_sqlite::SqliteStore;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "tourseed", author, version, about = "Seed and audit tour itineraries")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, global = true, default_value = "tourseed.toml")]
  config: PathBuf,

  /// SQLite database holding the tours.
  #[arg(long, global = true, value_name = "FILE")]
  database: Option<PathBuf>,

  /// Print the report as JSON instead of text.
  #[arg(long, global = true)]
  json: bool,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Bring published tours in line with the catalog.
  Reconcile {
    /// Catalog document (`.json` or `.toml`).
    #[arg(long, value_name = "FILE")]
    catalog: Option<PathBuf>,
  },
  /// Report the day/block/item structure of every published tour.
  Audit {
    /// Flag tours with fewer items than this.
    #[arg(long)]
    threshold: Option<usize>,
  },
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();
  let settings = Settings::load(&cli.config)?;

  let inputs = resolve_inputs(&cli, &settings)?;
  let database = inputs.database;

  match cli.command {
    Command::Reconcile { .. } => {
      let catalog_path = inputs.catalog.context("no catalog configured")?;
      let catalog = load_catalog(&catalog_path)?;
      tracing::info!(tours = catalog.len(), path = %catalog_path.display(), "loaded catalog");

      let store = open_store(&database).await?;
      let report = tourseed_reconcile::reconcile(&store, &catalog)
        .await
        .context("failed to list published tours")?;

      if cli.json {
        print_json(&report)?;
      } else {
        report::print_reconcile(&report);
      }
    }
    Command::Audit { threshold } => {
      let options = AuditOptions {
        few_items_threshold: threshold.unwrap_or(settings.few_items_threshold),
      };

      let store = open_store(&database).await?;
      let report = tourseed_reconcile::audit(&store, &options)
        .await
        .context("failed to list published tours")?;

      if cli.json {
        print_json(&report)?;
      } else {
        report::print_audit(&report);
      }
    }
  }

  Ok(())
}

/// Paths resolved from flags and settings before any store is opened.
struct Inputs {
  database: PathBuf,
  /// Set only for commands that read a catalog.
  catalog:  Option<PathBuf>,
}

fn resolve_inputs(cli: &Cli, settings: &Settings) -> anyhow::Result<Inputs> {
  let database = settings.database_path(cli.database.clone())?;
  let catalog = match &cli.command {
    Command::Reconcile { catalog } => Some(settings.catalog_path(catalog.clone())?),
    Command::Audit { .. } => None,
  };
  Ok(Inputs { database, catalog })
}

fn load_catalog(path: &Path) -> anyhow::Result<Catalog> {
  let ext = path.extension().and_then(|e| e.to_str()).unwrap_or_default();
  let format = CatalogFormat::from_extension(ext)
    .with_context(|| format!("cannot read catalog {}", path.display()))?;
  let text = std::fs::read_to_string(path)
    .with_context(|| format!("reading catalog {}", path.display()))?;
  Catalog::parse(&text, format).with_context(|| format!("parsing catalog {}", path.display()))
}

async fn open_store(path: &Path) -> anyhow::Result<SqliteStore> {
  SqliteStore::open(path)
    .await
    .with_context(|| format!("failed to open store at {path:?}"))
}

fn print_json<T: Serialize>(report: &T) -> anyhow::Result<()> {
  println!("{}", serde_json::to_string_pretty(report)?);
  Ok(())
}
