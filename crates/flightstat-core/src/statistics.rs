//! [`StatisticsService`] — weight normalisation and airport traffic figures.
//!
//! This is the layer presentation code talks to. It holds no state of its
//! own; every call recomputes from the store's current snapshot.

use std::{collections::BTreeSet, fmt, str::FromStr, sync::Arc};

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
  Error, Result,
  flight::{Baggage, DepartureDate, Flight, FlightDetails, FlightKey, WeightedItem},
  source::FlightSource,
  store::FlightStore,
};

// ─── Search term ─────────────────────────────────────────────────────────────

/// Which field resolves a flight key that carries no id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SearchTerm {
  FlightNumber,
  Date,
}

impl FromStr for SearchTerm {
  type Err = Error;

  /// Unrecognised terms surface as [`Error::FlightNotFound`], the same as
  /// any other unusable search input.
  fn from_str(s: &str) -> Result<Self> {
    match s {
      "FLIGHT_NUMBER" | "flight_number" => Ok(Self::FlightNumber),
      "DATE" | "date" => Ok(Self::Date),
      _ => Err(Error::FlightNotFound),
    }
  }
}

impl fmt::Display for SearchTerm {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::FlightNumber => f.write_str("FLIGHT_NUMBER"),
      Self::Date => f.write_str("DATE"),
    }
  }
}

// ─── Results ─────────────────────────────────────────────────────────────────

/// Cargo and baggage weight of one flight, in kilograms, rounded to two
/// decimal places.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Weights {
  pub cargo:   f64,
  pub baggage: f64,
  pub total:   f64,
}

/// Traffic at one airport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightStatistics {
  pub departures:        usize,
  pub arrivals:          usize,
  pub baggage_arriving:  u64,
  pub baggage_departing: u64,
}

// ─── Service ─────────────────────────────────────────────────────────────────

pub struct StatisticsService<S> {
  store: Arc<FlightStore<S>>,
}

impl<S> Clone for StatisticsService<S> {
  fn clone(&self) -> Self {
    Self {
      store: Arc::clone(&self.store),
    }
  }
}

impl<S: FlightSource> StatisticsService<S> {
  pub fn new(store: Arc<FlightStore<S>>) -> Self { Self { store } }

  pub fn store(&self) -> &FlightStore<S> { &self.store }

  /// Fetch all flights and refresh the store's snapshot.
  pub async fn find_all_flights(&self) -> Result<Vec<Flight>> {
    self.store.find_all_flights().await
  }

  /// Resolve the details record of the flight described by `key`.
  ///
  /// A key with an id is resolved by identity, whatever `term` says.
  /// Otherwise `term` picks the flight number or the departure date. Every
  /// dead end is [`Error::FlightNotFound`].
  pub async fn find_flight_details(
    &self,
    key: Option<&FlightKey>,
    term: SearchTerm,
  ) -> Result<FlightDetails> {
    let key = key.ok_or(Error::FlightNotFound)?;

    let details = if key.id.is_some() {
      self.store.get_flight_details(key).await?
    } else {
      debug!(%term, "resolving flight without id");
      match term {
        SearchTerm::FlightNumber => {
          self
            .store
            .get_flight_details_by_flight_number(key.flight_number)
            .await?
        }
        SearchTerm::Date => {
          let date = key.departure_date.ok_or(Error::FlightNotFound)?;
          self.store.get_flight_details_by_flight_date(&date).await?
        }
      }
    };

    details.ok_or(Error::FlightNotFound)
  }

  pub async fn find_flight_by_id(&self, id: i64) -> Result<Flight> {
    self
      .store
      .find_flight_by_id(id)
      .await?
      .ok_or(Error::FlightNotFound)
  }

  /// Convert every item to kilograms and total cargo and baggage.
  pub fn get_weights(&self, details: &FlightDetails) -> Weights {
    weights(details)
  }

  /// Departure and arrival counts for `code`, plus the baggage pieces on
  /// those flights.
  ///
  /// Reads the cached snapshot; call [`Self::find_all_flights`] first. When
  /// `date` is given both partitions are narrowed to flights whose
  /// *departure* timestamp equals it exactly, offset included. This applies
  /// to arrivals too. Baggage is counted with one details lookup per matched
  /// flight.
  pub async fn get_flights_statistics(
    &self,
    code: &str,
    date: Option<DateTime<FixedOffset>>,
  ) -> Result<FlightStatistics> {
    let flights = self.store.flights().unwrap_or_default();
    let on_date = |f: &Flight| date.is_none_or(|d| f.departs_at(&d));

    let departures: Vec<&Flight> = flights
      .iter()
      .filter(|f| f.departure_airport_iata_code == code && on_date(*f))
      .collect();
    let arrivals: Vec<&Flight> = flights
      .iter()
      .filter(|f| f.arrival_airport_iata_code == code && on_date(*f))
      .collect();

    let baggage_arriving = self.baggage_pieces(&arrivals).await?;
    let baggage_departing = self.baggage_pieces(&departures).await?;

    Ok(FlightStatistics {
      departures: departures.len(),
      arrivals: arrivals.len(),
      baggage_arriving,
      baggage_departing,
    })
  }

  async fn baggage_pieces(&self, flights: &[&Flight]) -> Result<u64> {
    let mut pieces = 0;
    for flight in flights {
      if let Some(details) = self.store.get_flight_details(&flight.key()).await? {
        pieces += count_pieces(&details.baggage);
      }
    }
    Ok(pieces)
  }

  pub fn airport_codes(&self) -> BTreeSet<String> { self.store.airport_codes() }

  pub fn departure_dates(&self) -> BTreeSet<DepartureDate> {
    self.store.departure_dates()
  }
}

// ─── Arithmetic ──────────────────────────────────────────────────────────────

/// Weight totals for `details`. See [`StatisticsService::get_weights`].
pub fn weights(details: &FlightDetails) -> Weights {
  let cargo = total_kg(&details.cargo);
  let baggage = total_kg(&details.baggage);
  Weights {
    cargo:   round2(cargo),
    baggage: round2(baggage),
    total:   round2(cargo + baggage),
  }
}

fn total_kg(items: &[WeightedItem]) -> f64 { items.iter().map(WeightedItem::weight_kg).sum() }

fn count_pieces(items: &[Baggage]) -> u64 { items.iter().map(|b| u64::from(b.pieces)).sum() }

/// Round half up to two decimal places.
fn round2(x: f64) -> f64 { (x * 100.0 + 0.5).floor() / 100.0 }

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn round2_rounds_half_up() {
    assert_eq!(round2(2.26796185), 2.27);
    assert_eq!(round2(2.264), 2.26);
    assert_eq!(round2(0.125), 0.13);
    assert_eq!(round2(0.0), 0.0);
  }

  #[test]
  fn search_term_parses_known_values() {
    assert_eq!("FLIGHT_NUMBER".parse::<SearchTerm>().unwrap(), SearchTerm::FlightNumber);
    assert_eq!("date".parse::<SearchTerm>().unwrap(), SearchTerm::Date);
  }

  #[test]
  fn unknown_search_term_is_not_found() {
    let err = "ARRIVAL".parse::<SearchTerm>().unwrap_err();
    assert!(matches!(err, Error::FlightNotFound));
  }
}
