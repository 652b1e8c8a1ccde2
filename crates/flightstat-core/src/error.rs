//! Error types for `flightstat-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// A required lookup came back empty, the search input was incomplete, or
  /// the search term was not recognised.
  #[error("flight not found")]
  FlightNotFound,

  /// The remote flight source failed. Never retried.
  #[error("flight source error: {0}")]
  Source(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  pub fn from_source<E>(err: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Source(Box::new(err))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
