//! Runtime collector: process CPU, memory and file-descriptor metrics.

use prometheus::Registry;

use crate::error::Result;

/// Register the process collector for this process.
///
/// Returns whether a collector was registered; only Linux exposes the
/// `/proc` data it reads.
///
/// # Errors
/// Fails if a process collector is already registered.
#[cfg(target_os = "linux")]
pub fn register_runtime_collector(registry: &Registry) -> Result<bool> {
    let collector = prometheus::process_collector::ProcessCollector::for_self();
    registry.register(Box::new(collector))?;
    tracing::info!("Process runtime collector registered");
    Ok(true)
}

/// Register the process collector for this process.
///
/// Returns whether a collector was registered; only Linux exposes the
/// `/proc` data it reads.
///
/// # Errors
/// Never fails on this target.
#[cfg(not(target_os = "linux"))]
pub fn register_runtime_collector(_registry: &Registry) -> Result<bool> {
    tracing::warn!("Process runtime collector is only available on Linux");
    Ok(false)
}
