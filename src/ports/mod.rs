//! Ports Layer - Hexagonal Architecture Boundaries
//!
//! Interfaces between this crate and the RPC framework it instruments.
//! Adapters implement these traits.
//!
//! Port categories:
//! - `RpcInfo` / `CallContext`: call metadata supplied by the framework
//! - `Tracer`: lifecycle hooks invoked by the framework
//! - `MetricsDiagnostics`: sink for swallowed per-call metric faults

pub mod diagnostics;
pub mod rpc_info;
pub mod tracer;

pub use diagnostics::{MetricsDiagnostics, MetricsFault};
pub use rpc_info::{CallContext, RpcInfo};
pub use tracer::Tracer;
