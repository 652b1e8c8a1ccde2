//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("flight source error: {0}")]
  Source(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<flightstat_core::Error> for ApiError {
  fn from(e: flightstat_core::Error) -> Self {
    match e {
      flightstat_core::Error::FlightNotFound => {
        ApiError::NotFound("flight not found".to_string())
      }
      flightstat_core::Error::Source(e) => ApiError::Source(e),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
      ApiError::Source(e) => {
        tracing::warn!(error = %e, "flight source failure");
        (StatusCode::BAD_GATEWAY, e.to_string())
      }
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
