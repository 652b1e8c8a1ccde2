//! [`FlightStore`] — the caching front of a [`FlightSource`].
//!
//! The store keeps a snapshot of the last full flight fetch and two index
//! sets derived from it (airport codes and departure dates). All remote
//! traffic goes through the store.

use std::{
  collections::BTreeSet,
  sync::{RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use chrono::{DateTime, FixedOffset};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::{
  Error, Result,
  flight::{DepartureDate, Flight, FlightDetails, FlightKey},
  source::FlightSource,
};

// ─── Index policy ────────────────────────────────────────────────────────────

/// How the index sets react to a new full fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexPolicy {
  /// Codes and dates from every non-empty fetch are added and never removed.
  /// An empty fetch leaves the sets as they were.
  #[default]
  Accumulate,
  /// The sets are recomputed from scratch on every fetch, empty or not.
  Rebuild,
}

// ─── Snapshot ────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
struct Snapshot {
  /// `None` until the first successful fetch.
  flights:         Option<Vec<Flight>>,
  airport_codes:   BTreeSet<String>,
  departure_dates: BTreeSet<DepartureDate>,
}

impl Snapshot {
  fn index(&mut self, flights: &[Flight]) {
    for flight in flights {
      self
        .airport_codes
        .insert(flight.arrival_airport_iata_code.clone());
      self
        .airport_codes
        .insert(flight.departure_airport_iata_code.clone());
      self.departure_dates.insert(DepartureDate(flight.departure_date));
    }
  }
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// Single point of contact with the remote flight source.
///
/// The snapshot sits behind a read-mostly lock. Remote calls never run while
/// the lock is held; a fetch swaps its result in under one write section, so
/// readers see either the old state or the new one.
pub struct FlightStore<S> {
  source:   S,
  policy:   IndexPolicy,
  snapshot: RwLock<Snapshot>,
}

impl<S: FlightSource> FlightStore<S> {
  /// Create an empty store over `source` with the default index policy.
  pub fn new(source: S) -> Self { Self::with_policy(source, IndexPolicy::default()) }

  pub fn with_policy(source: S, policy: IndexPolicy) -> Self {
    Self {
      source,
      policy,
      snapshot: RwLock::new(Snapshot::default()),
    }
  }

  pub fn source(&self) -> &S { &self.source }

  pub fn policy(&self) -> IndexPolicy { self.policy }

  fn read(&self) -> RwLockReadGuard<'_, Snapshot> {
    self.snapshot.read().unwrap_or_else(|e| e.into_inner())
  }

  fn write(&self) -> RwLockWriteGuard<'_, Snapshot> {
    self.snapshot.write().unwrap_or_else(|e| e.into_inner())
  }

  // ── Remote operations ─────────────────────────────────────────────────

  /// Fetch the full flight collection and replace the cached snapshot.
  ///
  /// On failure the cached state is left untouched.
  pub async fn find_all_flights(&self) -> Result<Vec<Flight>> {
    let flights = self.source.list_flights().await.map_err(|e| {
      warn!(error = %e, "fetching flights failed");
      Error::from_source(e)
    })?;

    let mut snapshot = self.write();
    if self.policy == IndexPolicy::Rebuild {
      snapshot.airport_codes.clear();
      snapshot.departure_dates.clear();
    }
    if flights.is_empty() {
      debug!("source returned no flights, clearing cached list");
    } else {
      snapshot.index(&flights);
    }
    snapshot.flights = Some(flights.clone());

    info!(
      flights = flights.len(),
      airport_codes = snapshot.airport_codes.len(),
      departure_dates = snapshot.departure_dates.len(),
      "flight snapshot replaced"
    );
    Ok(flights)
  }

  /// Look a flight up by identity on the remote source. The cache is
  /// neither consulted nor updated.
  pub async fn find_flight_by_id(&self, id: i64) -> Result<Option<Flight>> {
    debug!(id, "looking up flight");
    self.source.get_flight(id).await.map_err(Error::from_source)
  }

  /// The first details record for the flight identified by `key`.
  ///
  /// A key without an id resolves to `None` without a remote call. Any
  /// details records beyond the first are ignored.
  pub async fn get_flight_details(
    &self,
    key: &FlightKey,
  ) -> Result<Option<FlightDetails>> {
    let Some(flight_id) = key.id else {
      return Ok(None);
    };
    debug!(flight_id, "fetching flight details");
    let details = self
      .source
      .list_details(flight_id)
      .await
      .map_err(Error::from_source)?;
    Ok(details.into_iter().next())
  }

  /// Resolve a flight by number on the remote source and fetch its details.
  ///
  /// The first flight the source returns wins.
  pub async fn get_flight_details_by_flight_number(
    &self,
    flight_number: Option<i64>,
  ) -> Result<Option<FlightDetails>> {
    let flight_number = flight_number.ok_or(Error::FlightNotFound)?;
    debug!(flight_number, "resolving flight by number");
    let flight = self
      .source
      .list_flights_by_number(flight_number)
      .await
      .map_err(Error::from_source)?
      .into_iter()
      .next();

    match flight {
      Some(flight) => self.get_flight_details(&flight.key()).await,
      None => Ok(None),
    }
  }

  /// Resolve a flight from the cached snapshot by departure timestamp and
  /// fetch its details. The timestamp must match exactly, offset included;
  /// the first cached match wins.
  pub async fn get_flight_details_by_flight_date(
    &self,
    departure_date: &DateTime<FixedOffset>,
  ) -> Result<Option<FlightDetails>> {
    let key = self.find_cached_by_date(departure_date).map(|f| f.key());
    match key {
      Some(key) => self.get_flight_details(&key).await,
      None => {
        debug!(%departure_date, "no cached flight departs at this time");
        Ok(None)
      }
    }
  }

  fn find_cached_by_date(
    &self,
    departure_date: &DateTime<FixedOffset>,
  ) -> Option<Flight> {
    self
      .read()
      .flights
      .as_deref()
      .unwrap_or_default()
      .iter()
      .find(|f| f.departs_at(departure_date))
      .cloned()
  }

  // ── Cached state ──────────────────────────────────────────────────────

  /// Every airport code seen by the indexing fetches so far.
  pub fn airport_codes(&self) -> BTreeSet<String> { self.read().airport_codes.clone() }

  /// Every departure timestamp seen by the indexing fetches so far. Equal
  /// instants written with different offsets are kept apart.
  pub fn departure_dates(&self) -> BTreeSet<DepartureDate> {
    self.read().departure_dates.clone()
  }

  /// The cached flight list, or `None` if nothing has been fetched yet.
  pub fn flights(&self) -> Option<Vec<Flight>> { self.read().flights.clone() }
}
