//! RPC Prometheus Monitor - Library Root
//!
//! Request/latency instrumentation for RPC client and server call
//! lifecycles, exported through a Prometheus scrape endpoint.
//!
//! ```no_run
//! # async fn demo() -> rpc_prometheus_monitor::error::Result<()> {
//! use rpc_prometheus_monitor::{MonitorOptions, TracerRegistry};
//!
//! let registry = TracerRegistry::new(MonitorOptions::default())?;
//! registry.configure_address("0.0.0.0:9092", "/metric").await?;
//! let server_tracer = registry.server_tracer().await?;
//! # let _ = server_tracer;
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod config;
pub mod domain;
pub mod error;
pub mod ports;
pub mod usecases;

pub use adapters::metrics::{RpcTracer, TrafficSide};
pub use config::MonitorOptions;
pub use error::MonitorError;
pub use ports::{CallContext, MetricsDiagnostics, MetricsFault, RpcInfo, Tracer};
pub use usecases::TracerRegistry;
