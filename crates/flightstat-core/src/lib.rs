//! Core types and logic for flightstat.
//!
//! This crate is deliberately free of HTTP dependencies. It owns the data
//! model, the [`source::FlightSource`] abstraction over the remote flight
//! service, the caching [`store::FlightStore`], and the
//! [`statistics::StatisticsService`] that presentation layers talk to.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod error;
pub mod flight;
pub mod source;
pub mod statistics;
pub mod store;

pub use error::{Error, Result};
