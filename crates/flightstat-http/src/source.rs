//! [`HttpFlightSource`] — the `reqwest` implementation of [`FlightSource`].

use std::time::Duration;

use flightstat_core::{
  flight::{Flight, FlightDetails},
  source::FlightSource,
};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::{Error, Result, SourceConfig};

/// Async HTTP client for the remote flight service.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Debug, Clone)]
pub struct HttpFlightSource {
  client:   Client,
  base_url: String,
}

impl HttpFlightSource {
  pub fn new(config: &SourceConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(config.timeout_secs))
      .build()?;
    Ok(Self {
      client,
      base_url: config.base_url.trim_end_matches('/').to_string(),
    })
  }

  pub fn base_url(&self) -> &str { &self.base_url }

  fn url(&self, path: &str) -> String { format!("{}{}", self.base_url, path) }

  /// Send `req` and decode the body.
  ///
  /// An empty or `null` body is `None`. So is a 404 when `missing_ok` is
  /// set; any other non-success status is an error.
  async fn fetch<T: DeserializeOwned>(
    &self,
    req: RequestBuilder,
    url: String,
    missing_ok: bool,
  ) -> Result<Option<T>> {
    debug!(%url, "GET");
    let resp = req.send().await?;

    let status = resp.status();
    if missing_ok && status == StatusCode::NOT_FOUND {
      return Ok(None);
    }
    if !status.is_success() {
      return Err(Error::Status { url, status });
    }

    let body = resp.bytes().await?;
    if body.iter().all(u8::is_ascii_whitespace) {
      return Ok(None);
    }
    serde_json::from_slice::<Option<T>>(&body)
      .map_err(|source| Error::Decode { url, source })
  }

  async fn fetch_list<T: DeserializeOwned>(
    &self,
    req: RequestBuilder,
    url: String,
  ) -> Result<Vec<T>> {
    Ok(self.fetch::<Vec<T>>(req, url, false).await?.unwrap_or_default())
  }
}

impl FlightSource for HttpFlightSource {
  type Error = Error;

  async fn list_flights(&self) -> Result<Vec<Flight>> {
    let url = self.url("/flight");
    self.fetch_list(self.client.get(&url), url).await
  }

  async fn list_flights_by_number(&self, flight_number: i64) -> Result<Vec<Flight>> {
    let url = self.url("/flight");
    let req = self.client.get(&url).query(&[("flightNumber", flight_number)]);
    self.fetch_list(req, url).await
  }

  async fn get_flight(&self, id: i64) -> Result<Option<Flight>> {
    let url = self.url(&format!("/flight/{id}"));
    self.fetch(self.client.get(&url), url, true).await
  }

  async fn list_details(&self, flight_id: i64) -> Result<Vec<FlightDetails>> {
    let url = self.url("/details");
    let req = self.client.get(&url).query(&[("flightId", flight_id)]);
    self.fetch_list(req, url).await
  }
}
