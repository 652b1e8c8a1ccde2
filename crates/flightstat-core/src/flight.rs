//! Flight records as served by the remote flight source.
//!
//! Field names on the wire are camelCase, with the IATA code fields spelled
//! out exactly as the source emits them.

use std::{
  cmp::Ordering,
  fmt,
  hash::{Hash, Hasher},
};

use chrono::{DateTime, FixedOffset, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Pounds-to-kilograms conversion factor.
pub const KG_PER_LB: f64 = 0.45359237;

/// The unit tag that marks a weight as already being in kilograms. Any other
/// tag is read as pounds.
pub const KILOGRAMS: &str = "kg";

// ─── Flight ──────────────────────────────────────────────────────────────────

/// A single scheduled flight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flight {
  /// Assigned by the remote source; may be null.
  pub id:                          Option<i64>,
  /// Not unique: the same number flies on many dates.
  pub flight_number:               Option<i64>,
  #[serde(rename = "departureAirportIATACode")]
  pub departure_airport_iata_code: String,
  #[serde(rename = "arrivalAirportIATACode")]
  pub arrival_airport_iata_code:   String,
  pub departure_date:              DateTime<FixedOffset>,
}

impl Flight {
  /// The search key identifying this flight.
  pub fn key(&self) -> FlightKey { FlightKey::from(self) }

  /// Whether the flight departs at exactly `departure_date`, offset included.
  pub fn departs_at(&self, departure_date: &DateTime<FixedOffset>) -> bool {
    DepartureDate(self.departure_date) == DepartureDate(*departure_date)
  }
}

// ─── Departure date ──────────────────────────────────────────────────────────

/// A departure timestamp compared by its exact value.
///
/// `DateTime<FixedOffset>` alone compares instants, so `10:00Z` and
/// `11:00+01:00` would be the same to it. Here both the instant and the UTC
/// offset must match. Ordering is by instant, then by offset.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DepartureDate(pub DateTime<FixedOffset>);

impl DepartureDate {
  fn parts(&self) -> (NaiveDateTime, i32) {
    (self.0.naive_utc(), self.0.offset().local_minus_utc())
  }
}

impl PartialEq for DepartureDate {
  fn eq(&self, other: &Self) -> bool { self.parts() == other.parts() }
}

impl Eq for DepartureDate {}

impl PartialOrd for DepartureDate {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> { Some(self.cmp(other)) }
}

impl Ord for DepartureDate {
  fn cmp(&self, other: &Self) -> Ordering { self.parts().cmp(&other.parts()) }
}

impl Hash for DepartureDate {
  fn hash<H: Hasher>(&self, state: &mut H) { self.parts().hash(state) }
}

impl From<DateTime<FixedOffset>> for DepartureDate {
  fn from(date: DateTime<FixedOffset>) -> Self { Self(date) }
}

impl fmt::Display for DepartureDate {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0.to_rfc3339())
  }
}

/// A partial flight used as a search key.
///
/// Built either from a full [`Flight`] or from user input that only carries a
/// flight number or a departure timestamp.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightKey {
  pub id:             Option<i64>,
  pub flight_number:  Option<i64>,
  pub departure_date: Option<DateTime<FixedOffset>>,
}

impl FlightKey {
  pub fn by_flight_number(flight_number: i64) -> Self {
    Self {
      flight_number: Some(flight_number),
      ..Self::default()
    }
  }

  pub fn by_departure_date(departure_date: DateTime<FixedOffset>) -> Self {
    Self {
      departure_date: Some(departure_date),
      ..Self::default()
    }
  }
}

impl From<&Flight> for FlightKey {
  fn from(flight: &Flight) -> Self {
    Self {
      id:             flight.id,
      flight_number:  flight.flight_number,
      departure_date: Some(flight.departure_date),
    }
  }
}

// ─── Details ─────────────────────────────────────────────────────────────────

/// A weighed piece of load. Cargo and baggage share this shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightedItem {
  pub id:          i64,
  pub weight:      f64,
  /// `"kg"`, or anything else for pounds.
  pub weight_unit: String,
  #[serde(default)]
  pub pieces:      u32,
}

impl WeightedItem {
  pub fn is_kilograms(&self) -> bool { self.weight_unit == KILOGRAMS }

  /// The item's weight expressed in kilograms.
  pub fn weight_kg(&self) -> f64 {
    if self.is_kilograms() {
      self.weight
    } else {
      self.weight * KG_PER_LB
    }
  }
}

pub type Cargo = WeightedItem;
pub type Baggage = WeightedItem;

/// The load manifest of one flight. Fetched on demand, never cached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightDetails {
  pub flight_id: i64,
  #[serde(default)]
  pub baggage:   Vec<Baggage>,
  #[serde(default)]
  pub cargo:     Vec<Cargo>,
}
