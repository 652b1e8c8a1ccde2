//! HTTP transport for flightstat.
//!
//! [`HttpFlightSource`] implements [`flightstat_core::source::FlightSource`]
//! against the remote flight service's JSON endpoints using [`reqwest`].

mod source;

pub mod config;
pub mod error;

pub use config::SourceConfig;
pub use error::{Error, Result};
pub use source::HttpFlightSource;
