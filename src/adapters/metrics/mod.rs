//! Metrics Adapters - Prometheus Implementations of the Ports
//!
//! Metric pairs, the client/server tracer, the scrape endpoint served
//! via axum 0.7, and the default diagnostics sink.

pub mod diagnostics;
pub mod exposition;
pub mod metric_pair;
pub mod runtime;
pub mod tracer;

pub use diagnostics::TracingDiagnostics;
pub use metric_pair::MetricPair;
pub use tracer::{RpcTracer, TrafficSide};
