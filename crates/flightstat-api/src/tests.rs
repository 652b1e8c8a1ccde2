//! Router tests over an in-memory flight source.

use std::sync::Arc;

use axum::{
  body::Body,
  http::{Request, StatusCode},
};
use chrono::DateTime;
use flightstat_core::{
  flight::{Flight, FlightDetails, WeightedItem},
  source::MemorySource,
  statistics::StatisticsService,
  store::FlightStore,
};
use serde_json::{Value, json};
use tower::ServiceExt as _;

use crate::api_router;

fn flight(id: i64, number: i64, dep: &str, arr: &str, date: &str) -> Flight {
  Flight {
    id:                          Some(id),
    flight_number:               Some(number),
    departure_airport_iata_code: dep.into(),
    arrival_airport_iata_code:   arr.into(),
    departure_date:              DateTime::parse_from_rfc3339(date).unwrap(),
  }
}

fn item(weight: f64, unit: &str, pieces: u32) -> WeightedItem {
  WeightedItem {
    id: 1,
    weight,
    weight_unit: unit.into(),
    pieces,
  }
}

fn make_service() -> StatisticsService<MemorySource> {
  let source = MemorySource::new(
    vec![
      flight(1, 100, "JFK", "LAX", "2024-01-01T10:00:00Z"),
      flight(2, 200, "JFK", "ORD", "2024-01-02T10:00:00Z"),
      flight(3, 300, "SFO", "JFK", "2024-01-03T10:00:00Z"),
    ],
    vec![FlightDetails {
      flight_id: 1,
      baggage:   vec![item(10.0, "kg", 2)],
      cargo:     vec![item(5.0, "lb", 1)],
    }],
  );
  StatisticsService::new(Arc::new(FlightStore::new(source)))
}

async fn send(
  service: &StatisticsService<MemorySource>,
  method: &str,
  uri: &str,
) -> (StatusCode, Value) {
  let req = Request::builder()
    .method(method)
    .uri(uri)
    .body(Body::empty())
    .unwrap();
  let resp = api_router(service.clone()).oneshot(req).await.unwrap();
  let status = resp.status();
  let bytes = axum::body::to_bytes(resp.into_body(), 1024 * 1024)
    .await
    .unwrap();
  // Extractor rejections come back as plain text.
  let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
  (status, body)
}

// ── Flights ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn flights_are_null_until_refreshed() {
  let svc = make_service();

  let (status, body) = send(&svc, "GET", "/flights").await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body, Value::Null);

  let (status, body) = send(&svc, "POST", "/flights/refresh").await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body.as_array().unwrap().len(), 3);

  let (_, body) = send(&svc, "GET", "/flights").await;
  assert_eq!(body[0]["departureAirportIATACode"], "JFK");
}

#[tokio::test]
async fn flight_by_id() {
  let svc = make_service();

  let (status, body) = send(&svc, "GET", "/flights/2").await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["flightNumber"], 200);

  let (status, body) = send(&svc, "GET", "/flights/999").await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_eq!(body, json!({ "error": "flight 999 not found" }));
}

#[tokio::test]
async fn source_failure_is_bad_gateway() {
  let svc = make_service();
  svc.store().source().set_unavailable(true);

  let (status, body) = send(&svc, "POST", "/flights/refresh").await;
  assert_eq!(status, StatusCode::BAD_GATEWAY);
  assert!(body["error"].as_str().unwrap().contains("unavailable"));
}

// ── Details & weights ───────────────────────────────────────────────────────

#[tokio::test]
async fn details_by_id() {
  let svc = make_service();
  let (status, body) = send(&svc, "GET", "/details?id=1").await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["flightId"], 1);
  assert_eq!(body["baggage"][0]["pieces"], 2);
}

#[tokio::test]
async fn weights_by_flight_number() {
  let svc = make_service();
  let (status, body) = send(&svc, "GET", "/weights?flight_number=100").await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body, json!({ "cargo": 2.27, "baggage": 10.0, "total": 12.27 }));
}

#[tokio::test]
async fn weights_by_date_need_a_snapshot() {
  let svc = make_service();
  let uri = "/weights?date=2024-01-01T10:00:00Z&search_term=DATE";

  let (status, _) = send(&svc, "GET", uri).await;
  assert_eq!(status, StatusCode::NOT_FOUND);

  send(&svc, "POST", "/flights/refresh").await;
  let (status, body) = send(&svc, "GET", uri).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["total"], 12.27);
}

#[tokio::test]
async fn details_dead_ends_are_not_found() {
  let svc = make_service();

  // No key at all.
  let (status, body) = send(&svc, "GET", "/details").await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_eq!(body, json!({ "error": "flight not found" }));

  // Unknown search term.
  let (status, _) =
    send(&svc, "GET", "/details?flight_number=100&search_term=GATE").await;
  assert_eq!(status, StatusCode::NOT_FOUND);

  // Flight exists but has no details record.
  let (status, _) = send(&svc, "GET", "/details?id=2").await;
  assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn lookup_by_id_ignores_the_search_term() {
  let svc = make_service();

  let (status, body) = send(&svc, "GET", "/details?id=1&search_term=GATE").await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["flightId"], 1);

  let (status, body) = send(&svc, "GET", "/weights?id=1&search_term=GATE").await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["total"], 12.27);
}

#[tokio::test]
async fn departure_dates_keep_their_offsets() {
  let source = MemorySource::new(
    vec![
      flight(1, 100, "JFK", "LAX", "2024-01-01T10:00:00Z"),
      flight(2, 200, "CDG", "JFK", "2024-01-01T11:00:00+01:00"),
    ],
    vec![],
  );
  let svc = StatisticsService::new(Arc::new(FlightStore::new(source)));
  send(&svc, "POST", "/flights/refresh").await;

  let (_, dates) = send(&svc, "GET", "/departure-dates").await;
  assert_eq!(dates, json!(["2024-01-01T10:00:00+00:00", "2024-01-01T11:00:00+01:00"]));
}

#[tokio::test]
async fn malformed_date_is_bad_request() {
  let svc = make_service();
  let (status, _) = send(&svc, "GET", "/details?date=yesterday").await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
}

// ── Airports ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn airport_indices_after_refresh() {
  let svc = make_service();
  send(&svc, "POST", "/flights/refresh").await;

  let (_, codes) = send(&svc, "GET", "/airports").await;
  assert_eq!(codes, json!(["JFK", "LAX", "ORD", "SFO"]));

  let (_, dates) = send(&svc, "GET", "/departure-dates").await;
  assert_eq!(dates.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn statistics_for_airport() {
  let svc = make_service();
  send(&svc, "POST", "/flights/refresh").await;

  let (status, body) = send(&svc, "GET", "/statistics?code=JFK").await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(
    body,
    json!({
      "departures": 2,
      "arrivals": 1,
      "baggageArriving": 0,
      "baggageDeparting": 2
    })
  );

  let (_, body) =
    send(&svc, "GET", "/statistics?code=JFK&date=2024-01-02T10:00:00Z").await;
  assert_eq!(body["departures"], 1);
  assert_eq!(body["arrivals"], 0);
}

#[tokio::test]
async fn statistics_require_a_code() {
  let svc = make_service();
  let (status, _) = send(&svc, "GET", "/statistics").await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
}

// ── Configuration ───────────────────────────────────────────────────────────

#[test]
fn server_config_defaults() {
  let cfg: crate::ServerConfig = serde_json::from_value(json!({})).unwrap();
  assert_eq!(cfg.host, "127.0.0.1");
  assert_eq!(cfg.port, 8080);
  assert_eq!(cfg.source.base_url, "http://localhost:3000");
  assert_eq!(cfg.source.timeout_secs, 30);
  assert_eq!(cfg.index_policy, flightstat_core::store::IndexPolicy::Accumulate);
  assert!(cfg.refresh_on_start);
}

#[test]
fn server_config_overrides() {
  let cfg: crate::ServerConfig = serde_json::from_value(json!({
    "port": 9000,
    "index_policy": "rebuild",
    "source": { "base_url": "http://flights.internal:3000" }
  }))
  .unwrap();
  assert_eq!(cfg.port, 9000);
  assert_eq!(cfg.index_policy, flightstat_core::store::IndexPolicy::Rebuild);
  assert_eq!(cfg.source.base_url, "http://flights.internal:3000");
  assert_eq!(cfg.source.timeout_secs, 30);
}
