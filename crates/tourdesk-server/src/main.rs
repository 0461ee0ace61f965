//! tourdesk server binary.
//!
//! Reads `tourdesk.toml` (or the path given with `--config`) layered with
//! `TOURDESK_*` environment variables, opens the SQLite store and serves the
//! JSON API. The `import` and `export` subcommands run once and exit.

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tourdesk_manifest::{ManifestOptions, Variant};
use tourdesk_server::{ServerConfig, export, import};
use tourdesk_store_sqlite::SqliteStore;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "tourdesk back-office server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "tourdesk.toml", global = true)]
  config: PathBuf,

  #[command(subcommand)]
  command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
  /// Serve the JSON API (the default).
  Serve,
  /// Load a realtime-database JSON export into the store.
  Import {
    /// The exported JSON file.
    file: PathBuf,
  },
  /// Render a manifest request (JSON) to a .docx file.
  Export {
    /// boarding, full-list, driver or hotel.
    #[arg(long)]
    variant: Variant,
    #[arg(long)]
    input:   PathBuf,
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,
    /// Omit the title and destination block.
    #[arg(long)]
    no_header: bool,
  },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let server_cfg = ServerConfig::load(&cli.config)
    .with_context(|| format!("failed to load configuration from {:?}", cli.config))?;

  match cli.command.unwrap_or(Command::Serve) {
    Command::Serve => serve(server_cfg).await,
    Command::Import { file } => {
      let store = open_store(&server_cfg).await?;
      let summary = import::import_file(&store, &file)
        .await
        .with_context(|| format!("failed to import {file:?}"))?;
      println!(
        "imported {} clients, {} destinations, {} companions ({} skipped)",
        summary.clients, summary.destinations, summary.companions, summary.skipped
      );
      Ok(())
    }
    Command::Export { variant, input, out_dir, no_header } => {
      let issued_on = chrono::Local::now().date_naive();
      let options = ManifestOptions { header: !no_header };
      let path = export::write_manifest(variant, &input, &out_dir, issued_on, options)
        .await
        .with_context(|| format!("failed to export {variant} manifest from {input:?}"))?;
      println!("{}", path.display());
      Ok(())
    }
  }
}

async fn open_store(cfg: &ServerConfig) -> anyhow::Result<SqliteStore> {
  let store_path = cfg.resolved_store_path();
  SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))
}

async fn serve(cfg: ServerConfig) -> anyhow::Result<()> {
  let store = open_store(&cfg).await?;
  let app = tourdesk_server::router(Arc::new(store));
  let address = cfg.address();

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
