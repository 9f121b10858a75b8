//! Use Cases Layer - Application Logic
//!
//! Orchestrates adapters behind the port interfaces.
//!
//! Use cases:
//! - `TracerRegistry`: exactly-once tracer construction and scrape
//!   listener lifecycle

pub mod tracer_registry;

pub use tracer_registry::TracerRegistry;
