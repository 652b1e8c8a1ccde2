//! Handlers for the airport views: `/airports`, `/departure-dates` and
//! `/statistics`.

use std::collections::BTreeSet;

use axum::{
  Json,
  extract::{Query, State},
};
use chrono::{DateTime, FixedOffset};
use flightstat_core::{
  flight::DepartureDate,
  source::FlightSource,
  statistics::{FlightStatistics, StatisticsService},
};
use serde::Deserialize;

use crate::error::ApiError;

/// `GET /airports`
pub async fn codes<S: FlightSource>(
  State(service): State<StatisticsService<S>>,
) -> Json<BTreeSet<String>> {
  Json(service.airport_codes())
}

/// `GET /departure-dates`
pub async fn departure_dates<S: FlightSource>(
  State(service): State<StatisticsService<S>>,
) -> Json<BTreeSet<DepartureDate>> {
  Json(service.departure_dates())
}

#[derive(Debug, Deserialize)]
pub struct StatisticsParams {
  /// IATA code; matched case-sensitively.
  pub code: String,
  /// Narrows both departures and arrivals to this departure timestamp.
  pub date: Option<DateTime<FixedOffset>>,
}

/// `GET /statistics?code=<iata>[&date=<rfc3339>]`
pub async fn statistics<S: FlightSource>(
  State(service): State<StatisticsService<S>>,
  Query(params): Query<StatisticsParams>,
) -> Result<Json<FlightStatistics>, ApiError> {
  let stats = service
    .get_flights_statistics(&params.code, params.date)
    .await?;
  Ok(Json(stats))
}
