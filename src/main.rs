//! RPC Prometheus Monitor - Standalone Exporter
//!
//! Serves the client/server RPC metric families on the configured
//! scrape endpoint until SIGINT. Embedders normally use the library
//! directly; this binary is a smoke harness for the endpoint wiring.
//!
//! Wiring sequence:
//! 1. Load the TOML config (first argument, default `monitor.toml`)
//! 2. Init tracing (JSON structured logging)
//! 3. Build the `TracerRegistry`
//! 4. Pre-create client + server tracers (binds the listener once)
//! 5. Wait for SIGINT → stop the listener → exit

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::info;

use rpc_prometheus_monitor::config::loader::load_config;
use rpc_prometheus_monitor::{MonitorOptions, TracerRegistry};

#[tokio::main]
async fn main() -> Result<()> {
    // ── 1. Load configuration ───────────────────────────────
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "monitor.toml".to_string());
    let config = load_config(&config_path).context("Failed to load configuration")?;

    // ── 2. Initialize structured JSON logging ───────────────
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(&config.logging.log_level)
            }),
        )
        .json()
        .init();

    info!(
        version = env!("CARGO_PKG_VERSION"),
        config = %config_path,
        "Starting RPC Prometheus monitor"
    );

    // ── 3. Build the tracer registry ────────────────────────
    let registry = TracerRegistry::new(MonitorOptions::from_config(&config.monitor))
        .context("Invalid monitor options")?;

    // ── 4. Register both metric families ────────────────────
    registry
        .client_tracer()
        .await
        .context("Failed to create client tracer")?;
    registry
        .server_tracer()
        .await
        .context("Failed to create server tracer")?;

    match registry.local_addr().await {
        Some(addr) => info!(
            address = %addr,
            path = %config.monitor.path,
            "Metrics endpoint ready"
        ),
        None => info!("Automatic listener disabled - endpoint not served"),
    }

    // ── 5. Wait for SIGINT, then stop the listener ──────────
    signal::ctrl_c()
        .await
        .context("Failed to listen for shutdown signal")?;
    info!("SIGINT received, initiating graceful shutdown");

    registry.shutdown().await;

    info!("Shutdown complete");
    Ok(())
}
