//! Crate error type.

use thiserror::Error;

/// Shared result type.
pub type Result<T> = std::result::Result<T, MonitorError>;

/// Setup-time failures. Per-call faults never surface here; they go to
/// `MetricsDiagnostics`.
#[derive(Debug, Error)]
pub enum MonitorError {
    /// Metric construction or registration failed (name collision,
    /// invalid buckets, label schema mismatch).
    #[error("metric registration failed: {0}")]
    Registration(#[from] prometheus::Error),

    /// The exposition listener could not bind.
    #[error("failed to bind metrics listener on {address}: {source}")]
    Bind {
        /// Configured listen address.
        address: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Scrape path is not a valid route.
    #[error("invalid metrics path {0:?}: must start with '/' with no empty, ':' or '*' segments")]
    InvalidPath(String),

    /// The listener task failed after binding.
    #[error("metrics server error: {0}")]
    Serve(#[source] std::io::Error),
}
