//! Metrics Diagnostics Port - Faults of the Instrumentation Path
//!
//! Per-call metric failures never reach the RPC framework. They are
//! handed to a `MetricsDiagnostics` sink instead so the instrumentation
//! layer itself stays observable.

use std::fmt;

use crate::domain::call::RpcEvent;

/// A swallowed failure on the per-call metrics path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetricsFault {
  /// `finish` was called with a context that carries no call metadata.
  MissingRpcInfo,
  /// A lifecycle timestamp needed for the latency was not recorded.
  MissingEvent(RpcEvent),
  /// Resolving or updating a labelled metric failed.
  Update {
    /// Metric family name.
    metric: String,
    /// Library error message.
    reason: String,
  },
}

impl fmt::Display for MetricsFault {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::MissingRpcInfo => write!(f, "call context carries no rpc info"),
      Self::MissingEvent(event) => write!(f, "rpc event {event:?} not recorded"),
      Self::Update { metric, reason } => {
        write!(f, "failed to update metric {metric}: {reason}")
      }
    }
  }
}

/// Sink for metrics-path faults.
pub trait MetricsDiagnostics: Send + Sync + 'static {
  /// Report one fault. Must not panic or block.
  fn report(&self, fault: &MetricsFault);
}
