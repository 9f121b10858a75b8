//! Monitor Options - Programmatic Configuration
//!
//! Builder used to construct a `TracerRegistry`. Every setting has a
//! default, so `MonitorOptions::default()` is a working configuration.

use std::fmt;
use std::sync::Arc;

use axum::Router;
use prometheus::Registry;

use super::{DEFAULT_BUCKETS, MonitorConfig};
use crate::adapters::metrics::TracingDiagnostics;
use crate::ports::MetricsDiagnostics;

/// Options for a `TracerRegistry`.
#[derive(Clone)]
pub struct MonitorOptions {
  pub(crate) address: String,
  pub(crate) path: String,
  pub(crate) metric_prefix: String,
  pub(crate) buckets: Vec<f64>,
  pub(crate) registry: Option<Registry>,
  pub(crate) router: Option<Router>,
  pub(crate) enable_runtime_collector: bool,
  pub(crate) disable_server: bool,
  pub(crate) diagnostics: Arc<dyn MetricsDiagnostics>,
}

impl Default for MonitorOptions {
  fn default() -> Self {
    let config = MonitorConfig::default();
    Self {
      address: config.address,
      path: config.path,
      metric_prefix: config.metric_prefix,
      buckets: DEFAULT_BUCKETS.to_vec(),
      registry: None,
      router: None,
      enable_runtime_collector: false,
      disable_server: false,
      diagnostics: Arc::new(TracingDiagnostics),
    }
  }
}

impl MonitorOptions {
  /// Options mirroring a loaded `[monitor]` table.
  pub fn from_config(config: &MonitorConfig) -> Self {
    Self::default()
      .with_address(config.address.clone())
      .with_path(config.path.clone())
      .with_metric_prefix(config.metric_prefix.clone())
      .with_histogram_buckets(config.histogram_buckets.clone())
      .with_runtime_collector(config.enable_runtime_collector)
      .with_disable_server(config.disable_server)
  }

  /// Listen address of the scrape endpoint.
  #[must_use]
  pub fn with_address(mut self, address: impl Into<String>) -> Self {
    self.address = address.into();
    self
  }

  /// HTTP path of the scrape endpoint.
  #[must_use]
  pub fn with_path(mut self, path: impl Into<String>) -> Self {
    self.path = path.into();
    self
  }

  /// Prefix for every registered metric name.
  #[must_use]
  pub fn with_metric_prefix(mut self, prefix: impl Into<String>) -> Self {
    self.metric_prefix = prefix.into();
    self
  }

  /// Custom latency buckets (microseconds). An empty list is ignored.
  #[must_use]
  pub fn with_histogram_buckets(mut self, buckets: Vec<f64>) -> Self {
    if !buckets.is_empty() {
      self.buckets = buckets;
    }
    self
  }

  /// Register into an existing registry instead of a fresh one.
  #[must_use]
  pub fn with_registry(mut self, registry: Registry) -> Self {
    self.registry = Some(registry);
    self
  }

  /// Serve the metrics route as part of this router.
  ///
  /// The metrics route is merged into `router` when the listener starts.
  /// A router that already serves `GET <path>` makes that merge panic
  /// (axum rejects overlapping routes), so leave the scrape path free.
  #[must_use]
  pub fn with_router(mut self, router: Router) -> Self {
    self.router = Some(router);
    self
  }

  /// Export process runtime metrics (CPU, memory, fds).
  #[must_use]
  pub fn with_runtime_collector(mut self, enable: bool) -> Self {
    self.enable_runtime_collector = enable;
    self
  }

  /// Skip automatic listener startup.
  #[must_use]
  pub fn with_disable_server(mut self, disable: bool) -> Self {
    self.disable_server = disable;
    self
  }

  /// Sink for per-call metric faults.
  #[must_use]
  pub fn with_diagnostics(mut self, diagnostics: Arc<dyn MetricsDiagnostics>) -> Self {
    self.diagnostics = diagnostics;
    self
  }
}

impl fmt::Debug for MonitorOptions {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("MonitorOptions")
      .field("address", &self.address)
      .field("path", &self.path)
      .field("metric_prefix", &self.metric_prefix)
      .field("buckets", &self.buckets)
      .field("custom_registry", &self.registry.is_some())
      .field("custom_router", &self.router.is_some())
      .field("enable_runtime_collector", &self.enable_runtime_collector)
      .field("disable_server", &self.disable_server)
      .finish_non_exhaustive()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_defaults() {
    let options = MonitorOptions::default();
    assert_eq!(options.address, "0.0.0.0:9092");
    assert_eq!(options.path, "/metric");
    assert_eq!(options.buckets, DEFAULT_BUCKETS.to_vec());
    assert!(options.registry.is_none());
    assert!(!options.disable_server);
  }

  #[test]
  fn test_empty_buckets_keep_previous() {
    let options = MonitorOptions::default()
      .with_histogram_buckets(vec![1.0, 2.0])
      .with_histogram_buckets(Vec::new());
    assert_eq!(options.buckets, vec![1.0, 2.0]);
  }

  #[test]
  fn test_from_config() {
    let config = MonitorConfig {
      address: "127.0.0.1:0".to_string(),
      path: "/m".to_string(),
      metric_prefix: "svc".to_string(),
      histogram_buckets: Vec::new(),
      enable_runtime_collector: true,
      disable_server: true,
    };
    let options = MonitorOptions::from_config(&config);
    assert_eq!(options.address, "127.0.0.1:0");
    assert_eq!(options.path, "/m");
    assert_eq!(options.metric_prefix, "svc");
    assert_eq!(options.buckets, DEFAULT_BUCKETS.to_vec());
    assert!(options.enable_runtime_collector);
    assert!(options.disable_server);
  }
}
