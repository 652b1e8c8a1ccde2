//! `flightstat` — command-line front end for flight statistics.
//!
//! # Usage
//!
//! ```
//! flightstat --url http://localhost:3000 flights
//! flightstat weights --flight-number 100
//! flightstat stats JFK --date 2024-01-01T10:00:00Z
//! flightstat --config ~/.config/flightstat/config.toml airports
//! ```

mod commands;

use std::{path::PathBuf, process::ExitCode};

use anyhow::{Context, Result};
use clap::Parser;
use commands::Command;
use flightstat_http::SourceConfig;
use serde::Deserialize;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "flightstat", about = "Flight, baggage and cargo statistics")]
struct Args {
  /// Path to a TOML config file (url, timeout_secs).
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Base URL of the flight service (default: http://localhost:3000).
  #[arg(long, env = "FLIGHTSTAT_URL")]
  url: Option<String>,

  /// Request timeout in seconds (default: 30).
  #[arg(long, env = "FLIGHTSTAT_TIMEOUT")]
  timeout: Option<u64>,

  #[command(subcommand)]
  command: Command,
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default, Debug)]
struct ConfigFile {
  #[serde(default)]
  url:          String,
  #[serde(default)]
  timeout_secs: Option<u64>,
}

impl ConfigFile {
  fn load(path: Option<&PathBuf>) -> Result<Self> {
    let Some(path) = path else {
      return Ok(Self::default());
    };
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")
  }
}

/// CLI flags override the config file, which overrides defaults.
fn source_config(args: &Args, file_cfg: &ConfigFile) -> SourceConfig {
  let defaults = SourceConfig::default();
  SourceConfig {
    base_url:     args
      .url
      .clone()
      .or_else(|| (!file_cfg.url.is_empty()).then(|| file_cfg.url.clone()))
      .unwrap_or(defaults.base_url),
    timeout_secs: args
      .timeout
      .or(file_cfg.timeout_secs)
      .unwrap_or(defaults.timeout_secs),
  }
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> ExitCode {
  // Logs go to stderr so stdout stays pure JSON.
  tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .init();

  let args = Args::parse();

  match run(args).await {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) if commands::is_not_found(&e) => {
      eprintln!("flight not found");
      ExitCode::FAILURE
    }
    Err(e) => {
      eprintln!("error: {e:#}");
      ExitCode::FAILURE
    }
  }
}

async fn run(args: Args) -> Result<()> {
  let file_cfg = ConfigFile::load(args.config.as_ref())?;
  let source_cfg = source_config(&args, &file_cfg);
  tracing::debug!(?source_cfg, "resolved source configuration");

  let output = commands::execute(&source_cfg, args.command).await?;
  println!("{}", serde_json::to_string_pretty(&output)?);
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn flags_override_config_file() {
    let args = Args::try_parse_from([
      "flightstat",
      "--url",
      "http://cli:1",
      "airports",
    ])
    .unwrap();
    let file_cfg = ConfigFile {
      url:          "http://file:2".into(),
      timeout_secs: Some(5),
    };

    let cfg = source_config(&args, &file_cfg);
    assert_eq!(cfg.base_url, "http://cli:1");
    assert_eq!(cfg.timeout_secs, 5);
  }

  #[test]
  fn config_file_overrides_defaults() {
    let args = Args::try_parse_from(["flightstat", "flights"]).unwrap();
    let file_cfg: ConfigFile = toml::from_str(r#"url = "http://file:2""#).unwrap();

    let cfg = source_config(&Args { url: None, timeout: None, ..args }, &file_cfg);
    assert_eq!(cfg.base_url, "http://file:2");
    assert_eq!(cfg.timeout_secs, 30);
  }

  #[test]
  fn defaults_apply_without_flags_or_file() {
    let args = Args::try_parse_from(["flightstat", "dates"]).unwrap();
    let cfg = source_config(
      &Args { url: None, timeout: None, ..args },
      &ConfigFile::default(),
    );
    assert_eq!(cfg.base_url, "http://localhost:3000");
  }
}
