//! Handlers for `/flights` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/flights/refresh` | Re-fetches every flight and replaces the snapshot |
//! | `GET`  | `/flights` | The cached snapshot; `null` before the first refresh |
//! | `GET`  | `/flights/:id` | Remote lookup by id; 404 if not found |

use axum::{
  Json,
  extract::{Path, State},
};
use flightstat_core::{flight::Flight, source::FlightSource, statistics::StatisticsService};

use crate::error::ApiError;

/// `POST /flights/refresh`
pub async fn refresh<S: FlightSource>(
  State(service): State<StatisticsService<S>>,
) -> Result<Json<Vec<Flight>>, ApiError> {
  Ok(Json(service.find_all_flights().await?))
}

/// `GET /flights`
pub async fn list<S: FlightSource>(
  State(service): State<StatisticsService<S>>,
) -> Json<Option<Vec<Flight>>> {
  Json(service.store().flights())
}

/// `GET /flights/:id`
pub async fn get_one<S: FlightSource>(
  State(service): State<StatisticsService<S>>,
  Path(id): Path<i64>,
) -> Result<Json<Flight>, ApiError> {
  let flight = service.find_flight_by_id(id).await.map_err(|e| match e {
    flightstat_core::Error::FlightNotFound => {
      ApiError::NotFound(format!("flight {id} not found"))
    }
    other => other.into(),
  })?;
  Ok(Json(flight))
}
