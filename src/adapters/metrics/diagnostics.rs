//! Default diagnostics sink: structured `tracing` warnings.

use tracing::warn;

use crate::ports::{MetricsDiagnostics, MetricsFault};

/// Logs every metrics fault at WARN level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl MetricsDiagnostics for TracingDiagnostics {
    fn report(&self, fault: &MetricsFault) {
        warn!(fault = %fault, "RPC metrics update skipped");
    }
}
