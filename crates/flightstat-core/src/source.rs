//! The `FlightSource` trait and an in-memory implementation.
//!
//! The trait is implemented by transports (e.g. `flightstat-http`). The
//! [`FlightStore`](crate::store::FlightStore) depends on this abstraction, not
//! on any concrete transport. The remote source is read-only from our side,
//! so the trait has no write operations.

use std::{
  future::Future,
  sync::{
    RwLock,
    atomic::{AtomicBool, AtomicUsize, Ordering},
  },
};

use thiserror::Error;

use crate::flight::{Flight, FlightDetails};

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over the remote flight service.
///
/// "No data" is never an error: empty or null responses come back as an
/// empty `Vec` or `None`. Errors are transport failures only.
pub trait FlightSource: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// `GET /flight`: the full flight collection.
  fn list_flights(
    &self,
  ) -> impl Future<Output = Result<Vec<Flight>, Self::Error>> + Send + '_;

  /// `GET /flight?flightNumber=<n>`: flights filtered server-side. The
  /// order of the result is the source's and must not be re-sorted.
  fn list_flights_by_number(
    &self,
    flight_number: i64,
  ) -> impl Future<Output = Result<Vec<Flight>, Self::Error>> + Send + '_;

  /// `GET /flight/<id>`: a single flight, `None` if the source has no such
  /// record.
  fn get_flight(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Flight>, Self::Error>> + Send + '_;

  /// `GET /details?flightId=<id>`: every details record for a flight.
  fn list_details(
    &self,
    flight_id: i64,
  ) -> impl Future<Output = Result<Vec<FlightDetails>, Self::Error>> + Send + '_;
}

// ─── In-memory source ────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum MemorySourceError {
  #[error("flight source unavailable")]
  Unavailable,
}

/// A [`FlightSource`] that serves fixed data from memory.
///
/// Useful for tests and offline demos. It counts every request it receives
/// and can be switched into an "unavailable" mode in which every request
/// fails, standing in for a network outage.
#[derive(Debug, Default)]
pub struct MemorySource {
  flights:     RwLock<Vec<Flight>>,
  details:     Vec<FlightDetails>,
  unavailable: AtomicBool,
  requests:    AtomicUsize,
}

impl MemorySource {
  pub fn new(flights: Vec<Flight>, details: Vec<FlightDetails>) -> Self {
    Self {
      flights: RwLock::new(flights),
      details,
      ..Self::default()
    }
  }

  /// Replace the flight collection served from now on.
  pub fn set_flights(&self, flights: Vec<Flight>) {
    *self.flights.write().unwrap_or_else(|e| e.into_inner()) = flights;
  }

  pub fn set_unavailable(&self, unavailable: bool) {
    self.unavailable.store(unavailable, Ordering::SeqCst);
  }

  /// Number of requests served (or refused) so far.
  pub fn request_count(&self) -> usize { self.requests.load(Ordering::SeqCst) }

  fn begin_request(&self) -> Result<(), MemorySourceError> {
    self.requests.fetch_add(1, Ordering::SeqCst);
    if self.unavailable.load(Ordering::SeqCst) {
      return Err(MemorySourceError::Unavailable);
    }
    Ok(())
  }

  fn flights(&self) -> Vec<Flight> {
    self.flights.read().unwrap_or_else(|e| e.into_inner()).clone()
  }
}

impl FlightSource for MemorySource {
  type Error = MemorySourceError;

  async fn list_flights(&self) -> Result<Vec<Flight>, Self::Error> {
    self.begin_request()?;
    Ok(self.flights())
  }

  async fn list_flights_by_number(
    &self,
    flight_number: i64,
  ) -> Result<Vec<Flight>, Self::Error> {
    self.begin_request()?;
    Ok(
      self
        .flights()
        .into_iter()
        .filter(|f| f.flight_number == Some(flight_number))
        .collect(),
    )
  }

  async fn get_flight(&self, id: i64) -> Result<Option<Flight>, Self::Error> {
    self.begin_request()?;
    Ok(self.flights().into_iter().find(|f| f.id == Some(id)))
  }

  async fn list_details(
    &self,
    flight_id: i64,
  ) -> Result<Vec<FlightDetails>, Self::Error> {
    self.begin_request()?;
    Ok(
      self
        .details
        .iter()
        .filter(|d| d.flight_id == flight_id)
        .cloned()
        .collect(),
    )
  }
}
