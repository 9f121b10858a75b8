//! Adapters Layer - Hexagonal Architecture Outer Ring
//!
//! Implements the port traits defined in `crate::ports` with concrete
//! external dependencies (prometheus, axum, tracing).
//!
//! Adapter categories:
//! - `metrics`: Prometheus tracers, scrape endpoint, diagnostics sink

pub mod metrics;
