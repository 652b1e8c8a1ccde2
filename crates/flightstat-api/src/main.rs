//! flightstat-server binary.
//!
//! Reads `flightstat.toml` (or the path given with `--config`), layers
//! `FLIGHTSTAT_*` environment variables on top, and serves the JSON API over
//! HTTP. Nested keys use a double underscore, e.g.
//! `FLIGHTSTAT_SOURCE__BASE_URL=http://flights.internal:3000`.

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use flightstat_api::ServerConfig;
use flightstat_core::{statistics::StatisticsService, store::FlightStore};
use flightstat_http::HttpFlightSource;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "flightstat JSON API server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "flightstat.toml")]
  config: PathBuf,
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
  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("FLIGHTSTAT").separator("__"))
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  let source = HttpFlightSource::new(&server_cfg.source)
    .context("failed to build HTTP client")?;
  tracing::info!(
    source = source.base_url(),
    policy = ?server_cfg.index_policy,
    "using flight source"
  );

  let store = FlightStore::with_policy(source, server_cfg.index_policy);
  let service = StatisticsService::new(Arc::new(store));

  if server_cfg.refresh_on_start {
    // Serve without a snapshot on failure; `/flights/refresh` retries.
    if let Err(e) = service.find_all_flights().await {
      tracing::warn!(error = %e, "initial flight fetch failed");
    }
  }

  let app = flightstat_api::api_router(service);
  let address = format!("{}:{}", server_cfg.host, server_cfg.port);

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
