//! Salesdash Server
//!
//! Run with: cargo run --bin salesdash
//!
//! # Configuration
//!
//! Read from `--config`, or the first of `<config_dir>/salesdash/config.toml`,
//! `/etc/salesdash/config.toml`, `./config.toml`. A `.env` file in the working
//! directory (or a parent) is loaded first. Environment overrides:
//! - `DATABASE_URL`: Sales source, `sqlite://...` or `postgres://...` (default: sqlite://sales.db)
//! - `SALESDASH_TABLE`: Table to load (default: ventas)
//! - `SALESDASH_GEOJSON`: Boundary file (default: brazil-states.geojson)
//! - `SALESDASH_API_HOST` / `SALESDASH_API_PORT`: Bind address (default: 0.0.0.0:8050)
//! - `SALESDASH_LOG_LEVEL` / `SALESDASH_LOG_FORMAT`: Logging (default: info, pretty)
//! - `RUST_LOG`: Full filter directive, wins over the level above

use anyhow::Context;
use clap::Parser;
use salesdash::api::{serve, ApiConfig, AppState};
use salesdash::config::{load_dotenv, Config};
use salesdash::dashboard::DashboardContext;
use salesdash::logging::init_tracing;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "salesdash")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Sales analytics dashboard server")]
struct Args {
    /// Config file (default: search standard locations)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // DATABASE_URL usually lives in .env
    load_dotenv();

    let config = match &args.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };

    init_tracing(&config.logging).context("Failed to initialize tracing")?;

    tracing::info!("Starting Salesdash v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Data source: {} (table {})", config.source.database_url, config.source.table);
    tracing::info!("Geo reference: {}", config.geo.path);

    // Single blocking load; the server never starts on a failed source
    let load_config = config.clone();
    let dashboard = tokio::task::spawn_blocking(move || DashboardContext::load(&load_config))
        .await
        .context("Data load task panicked")?
        .context("Failed to load sales data")?;

    let api_config = ApiConfig::from(&config.api);
    let state = AppState::new(dashboard, api_config.clone());

    serve(state, &api_config).await?;

    tracing::info!("Salesdash server stopped");
    Ok(())
}
