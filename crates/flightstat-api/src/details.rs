//! Handlers for `/details` and `/weights`.
//!
//! Both take the same query parameters:
//!
//! - `id`: resolve by identity; the other parameters are then ignored.
//! - `flight_number`, `date`: the fields of a key without an id.
//! - `search_term`: `FLIGHT_NUMBER` or `DATE`. When omitted it is
//!   `FLIGHT_NUMBER` if a flight number is given and `DATE` otherwise.
//!
//! `date` is RFC 3339; a `+` in the offset must be sent as `%2B`.

use axum::{
  Json,
  extract::{Query, State},
};
use chrono::{DateTime, FixedOffset};
use flightstat_core::{
  flight::{FlightDetails, FlightKey},
  source::FlightSource,
  statistics::{SearchTerm, StatisticsService, Weights},
};
use serde::Deserialize;

use crate::error::ApiError;

#[derive(Debug, Default, Deserialize)]
pub struct DetailsParams {
  pub id:            Option<i64>,
  pub flight_number: Option<i64>,
  pub date:          Option<DateTime<FixedOffset>>,
  pub search_term:   Option<String>,
}

impl DetailsParams {
  fn key(&self) -> Option<FlightKey> {
    if self.id.is_none() && self.flight_number.is_none() && self.date.is_none() {
      return None;
    }
    Some(FlightKey {
      id:             self.id,
      flight_number:  self.flight_number,
      departure_date: self.date,
    })
  }

  /// The term is only parsed when there is no id; a lookup by id never
  /// consults it.
  fn search_term(&self) -> Result<SearchTerm, flightstat_core::Error> {
    match &self.search_term {
      Some(term) if self.id.is_none() => term.parse(),
      _ if self.flight_number.is_some() => Ok(SearchTerm::FlightNumber),
      _ => Ok(SearchTerm::Date),
    }
  }
}

async fn resolve<S: FlightSource>(
  service: &StatisticsService<S>,
  params: &DetailsParams,
) -> Result<FlightDetails, ApiError> {
  let term = params.search_term()?;
  let key = params.key();
  Ok(service.find_flight_details(key.as_ref(), term).await?)
}

/// `GET /details?...`
pub async fn details<S: FlightSource>(
  State(service): State<StatisticsService<S>>,
  Query(params): Query<DetailsParams>,
) -> Result<Json<FlightDetails>, ApiError> {
  Ok(Json(resolve(&service, &params).await?))
}

/// `GET /weights?...` — the resolved flight's weights in kilograms.
pub async fn weights<S: FlightSource>(
  State(service): State<StatisticsService<S>>,
  Query(params): Query<DetailsParams>,
) -> Result<Json<Weights>, ApiError> {
  let details = resolve(&service, &params).await?;
  Ok(Json(service.get_weights(&details)))
}
