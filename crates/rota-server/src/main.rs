//! rota-server binary.
//!
//! Reads `rota.toml` (or the path specified with `--config`), opens an
//! in-process SQLite store, and serves the duty-roster REST API over HTTP.

mod settings;
mod sweep;

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use rota_api::Notifier;
use rota_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use settings::ServerConfig;

#[derive(Parser)]
#[command(author, version, about = "Rota duty-roster server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "rota.toml")]
  config: PathBuf,

  /// Override the SQLite database path.
  #[arg(long)]
  db: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  // Load configuration.
  let loaded = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("ROTA"))
    .build()
    .context("failed to read config file")?;

  let mut server_cfg: ServerConfig = loaded
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;
  if let Some(db) = cli.db {
    server_cfg.db_path = db;
  }

  // Open SQLite store.
  let store = SqliteStore::open(&server_cfg.db_path)
    .await
    .with_context(|| format!("failed to open store at {:?}", server_cfg.db_path))?;
  let store = Arc::new(store);

  let notifier = Notifier::new();

  // The expiry sweep runs for the process lifetime.
  sweep::spawn(Arc::clone(&store));

  // LAN tool behind no proxy; the UI may be served from any origin.
  let app = axum::Router::new()
    .nest("/api", rota_api::api_router(Arc::clone(&store), notifier))
    .layer(CorsLayer::permissive())
    .layer(TraceLayer::new_for_http());

  let address = format!("{}:{}", server_cfg.host, server_cfg.port);
  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
