//! JSON REST API for flightstat.
//!
//! Exposes an axum [`Router`] over a [`StatisticsService`]. The service may be
//! backed by any [`FlightSource`]; the server binary wires it to the HTTP
//! source.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", flightstat_api::api_router(service.clone()))
//! ```

pub mod airports;
pub mod details;
pub mod error;
pub mod flights;

use axum::{
  Router,
  routing::{get, post},
};
use flightstat_core::{
  source::FlightSource, statistics::StatisticsService, store::IndexPolicy,
};
use flightstat_http::SourceConfig;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

pub use error::ApiError;

// ─── Configuration ────────────────────────────────────────────────────────────

fn default_host() -> String { "127.0.0.1".to_string() }

fn default_port() -> u16 { 8080 }

fn default_refresh_on_start() -> bool { true }

/// Runtime server configuration, deserialised from `flightstat.toml` and
/// `FLIGHTSTAT_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:             String,
  #[serde(default = "default_port")]
  pub port:             u16,
  #[serde(default)]
  pub source:           SourceConfig,
  #[serde(default)]
  pub index_policy:     IndexPolicy,
  /// Fetch the flight list once before serving.
  #[serde(default = "default_refresh_on_start")]
  pub refresh_on_start: bool,
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the API router for `service`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(service: StatisticsService<S>) -> Router<()>
where
  S: FlightSource + 'static,
{
  Router::new()
    // Flights
    .route("/flights", get(flights::list::<S>))
    .route("/flights/refresh", post(flights::refresh::<S>))
    .route("/flights/{id}", get(flights::get_one::<S>))
    // Details
    .route("/details", get(details::details::<S>))
    .route("/weights", get(details::weights::<S>))
    // Airports
    .route("/airports", get(airports::codes::<S>))
    .route("/departure-dates", get(airports::departure_dates::<S>))
    .route("/statistics", get(airports::statistics::<S>))
    .layer(TraceLayer::new_for_http())
    .with_state(service)
}

#[cfg(test)]
mod tests;
