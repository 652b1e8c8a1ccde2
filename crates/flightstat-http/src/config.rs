//! Connection settings for the remote flight service.

use serde::Deserialize;

fn default_base_url() -> String { "http://localhost:3000".to_string() }

fn default_timeout_secs() -> u64 { 30 }

/// Where the flight service lives and how long to wait for it.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
  /// Base URL; `/flight` and `/details` are resolved against it.
  #[serde(default = "default_base_url")]
  pub base_url:     String,
  /// Per-request timeout. This is the only latency bound on a lookup.
  #[serde(default = "default_timeout_secs")]
  pub timeout_secs: u64,
}

impl Default for SourceConfig {
  fn default() -> Self {
    Self {
      base_url:     default_base_url(),
      timeout_secs: default_timeout_secs(),
    }
  }
}

impl SourceConfig {
  pub fn with_base_url(base_url: impl Into<String>) -> Self {
    Self {
      base_url: base_url.into(),
      ..Self::default()
    }
  }
}
