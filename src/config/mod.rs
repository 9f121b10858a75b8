//! Configuration Module - TOML-based Monitor Configuration
//!
//! Loads and validates the scrape endpoint and histogram settings from
//! a TOML file. Embedders that configure in code use
//! `options::MonitorOptions` directly; `MonitorOptions::from_config`
//! bridges the two.

pub mod loader;
pub mod options;

use serde::Deserialize;

pub use options::MonitorOptions;

/// Default histogram buckets in microseconds (5ms .. 1s).
pub const DEFAULT_BUCKETS: [f64; 8] = [
  5_000.0, 10_000.0, 25_000.0, 50_000.0, 100_000.0, 250_000.0, 500_000.0, 1_000_000.0,
];

/// Top-level configuration file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
  /// Metrics exposition and tracer settings.
  #[serde(default)]
  pub monitor: MonitorConfig,
  /// Log output settings.
  #[serde(default)]
  pub logging: LoggingConfig,
}

/// Metrics exposition and tracer configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct MonitorConfig {
  /// Listen address of the scrape endpoint.
  #[serde(default = "default_address")]
  pub address: String,
  /// HTTP path of the scrape endpoint.
  #[serde(default = "default_path")]
  pub path: String,
  /// Metric name prefix (`<prefix>_client_throughput`, ...).
  #[serde(default = "default_metric_prefix")]
  pub metric_prefix: String,
  /// Latency histogram buckets in microseconds. Empty keeps the defaults.
  #[serde(default)]
  pub histogram_buckets: Vec<f64>,
  /// Export process runtime metrics alongside RPC metrics.
  #[serde(default)]
  pub enable_runtime_collector: bool,
  /// Do not start a listener; the embedder wires the endpoint itself.
  #[serde(default)]
  pub disable_server: bool,
}

impl Default for MonitorConfig {
  fn default() -> Self {
    Self {
      address: default_address(),
      path: default_path(),
      metric_prefix: default_metric_prefix(),
      histogram_buckets: Vec::new(),
      enable_runtime_collector: false,
      disable_server: false,
    }
  }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
  /// Log level (trace, debug, info, warn, error).
  #[serde(default = "default_log_level")]
  pub log_level: String,
}

impl Default for LoggingConfig {
  fn default() -> Self {
    Self {
      log_level: default_log_level(),
    }
  }
}

// Default value functions for serde

fn default_address() -> String {
  "0.0.0.0:9092".to_string()
}

fn default_path() -> String {
  "/metric".to_string()
}

fn default_metric_prefix() -> String {
  "rpc".to_string()
}

fn default_log_level() -> String {
  "info".to_string()
}
