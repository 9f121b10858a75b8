//! Call Metadata Port - Read Access to Framework-Tracked RPC State
//!
//! The RPC framework owns the per-call bookkeeping; this port is the
//! narrow read-only view the tracers need from it. `CallRecord` is the
//! in-crate implementation used by embedders and tests.

use std::error::Error;
use std::sync::Arc;
use std::time::Instant;

use crate::domain::call::{CallRecord, RpcEvent, StatsLevel};
use crate::domain::labels::LabelSet;

/// Read-only view over one RPC's metadata.
pub trait RpcInfo: Send + Sync {
  /// Caller service name (may be empty).
  fn caller_service(&self) -> &str;

  /// Callee service name (may be empty).
  fn callee_service(&self) -> &str;

  /// Invoked method name (may be empty).
  fn method(&self) -> &str;

  /// Retry-count tag set by the framework's retry machinery.
  fn retry_tag(&self) -> Option<&str>;

  /// Terminal error of the call, if any.
  fn error(&self) -> Option<&(dyn Error + Send + Sync + 'static)>;

  /// Instrumentation level for this call.
  fn stats_level(&self) -> StatsLevel;

  /// Timestamp of a lifecycle event, if it was recorded.
  fn event_time(&self, event: RpcEvent) -> Option<Instant>;

  /// Label values derived from this call's metadata.
  fn label_set(&self) -> LabelSet {
    LabelSet::new(
      self.caller_service(),
      self.callee_service(),
      self.method(),
      self.error().is_some(),
      self.retry_tag(),
    )
  }
}

impl RpcInfo for CallRecord {
  fn caller_service(&self) -> &str {
    &self.caller
  }

  fn callee_service(&self) -> &str {
    &self.callee
  }

  fn method(&self) -> &str {
    &self.method
  }

  fn retry_tag(&self) -> Option<&str> {
    self.retry_tag.as_deref()
  }

  fn error(&self) -> Option<&(dyn Error + Send + Sync + 'static)> {
    self.error.as_deref()
  }

  fn stats_level(&self) -> StatsLevel {
    self.level
  }

  fn event_time(&self, event: RpcEvent) -> Option<Instant> {
    match event {
      RpcEvent::RpcStart => self.start,
      RpcEvent::RpcFinish => self.finish,
    }
  }
}

/// Execution context handed to tracer hooks.
///
/// Carries the call metadata by shared handle; hooks never mutate it.
#[derive(Clone, Default)]
pub struct CallContext {
  info: Option<Arc<dyn RpcInfo>>,
}

impl CallContext {
  /// Context carrying call metadata.
  pub fn new(info: Arc<dyn RpcInfo>) -> Self {
    Self { info: Some(info) }
  }

  /// Context built from an owned `CallRecord`.
  pub fn from_record(record: CallRecord) -> Self {
    Self::new(Arc::new(record))
  }

  /// Context without metadata.
  pub fn empty() -> Self {
    Self::default()
  }

  /// Call metadata, if the framework attached any.
  pub fn rpc_info(&self) -> Option<&dyn RpcInfo> {
    self.info.as_deref()
  }
}

impl std::fmt::Debug for CallContext {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("CallContext")
      .field("has_rpc_info", &self.info.is_some())
      .finish()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::time::Duration;

  #[test]
  fn test_call_record_exposes_events() {
    let start = Instant::now();
    let finish = start + Duration::from_millis(5);
    let record = CallRecord::new("a", "b", "m").with_timing(start, finish);

    assert_eq!(record.event_time(RpcEvent::RpcStart), Some(start));
    assert_eq!(record.event_time(RpcEvent::RpcFinish), Some(finish));
  }

  #[test]
  fn test_label_set_reads_metadata() {
    let record = CallRecord::new("", "svcB", "Echo")
      .with_error("deadline exceeded")
      .with_retry_tag("2");

    assert_eq!(record.label_set().values(), ["unknown", "svcB", "Echo", "error", "2"]);
    assert_eq!(
      CallRecord::new("svcA", "svcB", "Echo").label_set().values(),
      ["svcA", "svcB", "Echo", "succeed", "0"]
    );
  }

  #[test]
  fn test_empty_context_has_no_info() {
    assert!(CallContext::empty().rpc_info().is_none());
    let ctx = CallContext::from_record(CallRecord::new("a", "b", "m"));
    assert_eq!(ctx.rpc_info().map(|info| info.method()), Some("m"));
  }
}
