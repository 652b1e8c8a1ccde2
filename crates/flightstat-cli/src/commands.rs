//! Subcommands and their dispatch onto the statistics service.

use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset};
use clap::{Args, Subcommand};
use flightstat_core::{
  flight::FlightKey,
  source::FlightSource,
  statistics::{SearchTerm, StatisticsService},
  store::FlightStore,
};
use flightstat_http::{HttpFlightSource, SourceConfig};
use serde_json::Value;

#[derive(Subcommand, Debug)]
pub enum Command {
  /// List every flight.
  Flights,
  /// Show one flight by id.
  Flight { id: i64 },
  /// Show the baggage and cargo manifest of a flight.
  Details(LookupArgs),
  /// Show the cargo, baggage and total weight of a flight in kilograms.
  Weights(LookupArgs),
  /// List the airport codes seen in the flight list.
  Airports,
  /// List the departure timestamps seen in the flight list.
  Dates,
  /// Departure, arrival and baggage counts for an airport.
  Stats {
    /// IATA code, matched case-sensitively.
    code: String,
    /// Only count flights departing at exactly this time (RFC 3339).
    #[arg(long)]
    date: Option<DateTime<FixedOffset>>,
  },
}

/// How to find a flight whose details are wanted.
#[derive(Args, Debug, Default)]
pub struct LookupArgs {
  /// Flight id; when given the other options are ignored.
  #[arg(long)]
  pub id:            Option<i64>,
  #[arg(long)]
  pub flight_number: Option<i64>,
  /// Departure timestamp (RFC 3339).
  #[arg(long)]
  pub date:          Option<DateTime<FixedOffset>>,
  /// `FLIGHT_NUMBER` or `DATE`; inferred from the other options if omitted.
  #[arg(long)]
  pub search_term:   Option<String>,
}

impl LookupArgs {
  fn key(&self) -> FlightKey {
    FlightKey {
      id:             self.id,
      flight_number:  self.flight_number,
      departure_date: self.date,
    }
  }

  /// Lookups by id never consult the term, so it is only parsed without one.
  fn search_term(&self) -> flightstat_core::Result<SearchTerm> {
    match &self.search_term {
      Some(term) if self.id.is_none() => term.parse(),
      _ if self.flight_number.is_some() => Ok(SearchTerm::FlightNumber),
      _ => Ok(SearchTerm::Date),
    }
  }
}

impl Command {
  /// Whether the command reads the cached flight list, which a fresh
  /// process has to fetch first.
  pub fn needs_snapshot(&self) -> bool {
    match self {
      Self::Flights | Self::Airports | Self::Dates | Self::Stats { .. } => true,
      Self::Details(lookup) | Self::Weights(lookup) => {
        lookup.id.is_none() && lookup.date.is_some()
      }
      Self::Flight { .. } => false,
    }
  }
}

/// Whether `err` is the core's "flight not found" failure.
pub fn is_not_found(err: &anyhow::Error) -> bool {
  matches!(
    err.downcast_ref::<flightstat_core::Error>(),
    Some(flightstat_core::Error::FlightNotFound)
  )
}

/// Run `command` against the flight service described by `config`.
pub async fn execute(config: &SourceConfig, command: Command) -> Result<Value> {
  let source = HttpFlightSource::new(config).context("building HTTP client")?;
  let service = StatisticsService::new(Arc::new(FlightStore::new(source)));
  dispatch(&service, command).await
}

pub async fn dispatch<S: FlightSource>(
  service: &StatisticsService<S>,
  command: Command,
) -> Result<Value> {
  if command.needs_snapshot() {
    service.find_all_flights().await?;
  }

  let value = match command {
    Command::Flights => serde_json::to_value(service.store().flights())?,
    Command::Flight { id } => serde_json::to_value(service.find_flight_by_id(id).await?)?,
    Command::Details(lookup) => {
      let term = lookup.search_term()?;
      let details = service.find_flight_details(Some(&lookup.key()), term).await?;
      serde_json::to_value(details)?
    }
    Command::Weights(lookup) => {
      let term = lookup.search_term()?;
      let details = service.find_flight_details(Some(&lookup.key()), term).await?;
      serde_json::to_value(service.get_weights(&details))?
    }
    Command::Airports => serde_json::to_value(service.airport_codes())?,
    Command::Dates => serde_json::to_value(service.departure_dates())?,
    Command::Stats { code, date } => {
      serde_json::to_value(service.get_flights_statistics(&code, date).await?)?
    }
  };
  Ok(value)
}
