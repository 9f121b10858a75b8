//! Configuration Loader - File Loading and Validation
//!
//! Handles loading the monitor TOML file, validating parameters,
//! and providing clear error messages for misconfiguration.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use super::AppConfig;
use crate::adapters::metrics::exposition::validate_path;

/// Load and validate configuration from a TOML file.
///
/// # Errors
/// Returns detailed error if:
/// - File doesn't exist or can't be read
/// - TOML parsing fails
/// - Validation rules are violated
pub fn load_config(path: &str) -> Result<AppConfig> {
  let path = Path::new(path);

  let content = std::fs::read_to_string(path)
    .with_context(|| format!("Failed to read config file: {}", path.display()))?;

  let config = parse_config(&content)?;

  info!(
    address = %config.monitor.address,
    path = %config.monitor.path,
    disable_server = config.monitor.disable_server,
    "Configuration loaded successfully"
  );

  Ok(config)
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<AppConfig> {
  let config: AppConfig = toml::from_str(content)
    .with_context(|| "Failed to parse monitor config")?;

  validate_config(&config)?;
  Ok(config)
}

/// Validate all configuration parameters.
///
/// Checks for:
/// - Scrape path usable as an HTTP route
/// - Non-empty metric prefix
/// - Strictly increasing, finite histogram buckets
fn validate_config(config: &AppConfig) -> Result<()> {
  let monitor = &config.monitor;

  validate_path(&monitor.path).context("Metrics path is not a usable route")?;
  anyhow::ensure!(
    !monitor.address.is_empty(),
    "Metrics address must not be empty"
  );
  anyhow::ensure!(
    !monitor.metric_prefix.is_empty(),
    "Metric prefix must not be empty"
  );

  for bucket in &monitor.histogram_buckets {
    anyhow::ensure!(
      bucket.is_finite(),
      "Histogram buckets must be finite, got {}",
      bucket
    );
  }
  anyhow::ensure!(
    monitor.histogram_buckets.windows(2).all(|w| w[0] < w[1]),
    "Histogram buckets must be strictly increasing, got {:?}",
    monitor.histogram_buckets
  );

  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_load_nonexistent_file() {
    let result = load_config("nonexistent.toml");
    assert!(result.is_err());
  }

  #[test]
  fn test_rejects_relative_path() {
    let result = parse_config("[monitor]\npath = \"metric\"\n");
    assert!(result.is_err());
  }

  #[test]
  fn test_rejects_route_syntax_path() {
    assert!(parse_config("[monitor]\npath = \"/metric/*\"\n").is_err());
    assert!(parse_config("[monitor]\npath = \"/metric/:id\"\n").is_err());
  }

  #[test]
  fn test_rejects_unsorted_buckets() {
    let result = parse_config("[monitor]\nhistogram_buckets = [10.0, 5.0]\n");
    assert!(result.is_err());
  }

  #[test]
  fn test_rejects_empty_prefix() {
    let result = parse_config("[monitor]\nmetric_prefix = \"\"\n");
    assert!(result.is_err());
  }

  #[test]
  fn test_accepts_defaults() {
    assert!(parse_config("").is_ok());
  }
}
