//! Call Record - Per-RPC Metadata Snapshot
//!
//! Plain data describing one RPC as the framework tracked it: who
//! called whom, which method, when it started and finished, how it
//! ended, and how many times it was retried. Owned by the call's
//! execution context; tracers only read it.

use std::error::Error;
use std::fmt;
use std::time::Instant;

/// Boxed terminal error carried by a finished call.
pub type CallError = Box<dyn Error + Send + Sync + 'static>;

/// Per-call instrumentation level chosen by the framework.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatsLevel {
    /// Metrics are not collected for this call.
    Disabled,
    /// Start/finish events are recorded.
    #[default]
    Base,
}

/// Lifecycle events whose timestamps the framework records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RpcEvent {
    /// The RPC began.
    RpcStart,
    /// The RPC completed (success or failure).
    RpcFinish,
}

/// Metadata of a single RPC.
pub struct CallRecord {
    /// Service name of the caller.
    pub caller: String,
    /// Service name of the callee.
    pub callee: String,
    /// Invoked method name.
    pub method: String,
    /// When the RPC started.
    pub start: Option<Instant>,
    /// When the RPC finished.
    pub finish: Option<Instant>,
    /// Terminal error, if the call failed.
    pub error: Option<CallError>,
    /// Retry-count tag, present only when the framework retried.
    pub retry_tag: Option<String>,
    /// Instrumentation level for this call.
    pub level: StatsLevel,
}

impl CallRecord {
    /// Create a record for `caller -> callee::method` with no timing yet.
    pub fn new(
        caller: impl Into<String>,
        callee: impl Into<String>,
        method: impl Into<String>,
    ) -> Self {
        Self {
            caller: caller.into(),
            callee: callee.into(),
            method: method.into(),
            start: None,
            finish: None,
            error: None,
            retry_tag: None,
            level: StatsLevel::default(),
        }
    }

    /// Set both lifecycle timestamps.
    #[must_use]
    pub fn with_timing(mut self, start: Instant, finish: Instant) -> Self {
        self.start = Some(start);
        self.finish = Some(finish);
        self
    }

    /// Mark the call as failed.
    #[must_use]
    pub fn with_error(mut self, error: impl Into<CallError>) -> Self {
        self.error = Some(error.into());
        self
    }

    /// Attach the retry-count tag.
    #[must_use]
    pub fn with_retry_tag(mut self, retries: impl Into<String>) -> Self {
        self.retry_tag = Some(retries.into());
        self
    }

    /// Override the instrumentation level.
    #[must_use]
    pub fn with_level(mut self, level: StatsLevel) -> Self {
        self.level = level;
        self
    }
}

impl fmt::Debug for CallRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallRecord")
            .field("caller", &self.caller)
            .field("callee", &self.callee)
            .field("method", &self.method)
            .field("start", &self.start)
            .field("finish", &self.finish)
            .field("error", &self.error.as_ref().map(ToString::to_string))
            .field("retry_tag", &self.retry_tag)
            .field("level", &self.level)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_builder_defaults() {
        let record = CallRecord::new("a", "b", "Echo");
        assert_eq!(record.level, StatsLevel::Base);
        assert!(record.start.is_none());
        assert!(record.error.is_none());
        assert!(record.retry_tag.is_none());
    }

    #[test]
    fn test_builder_sets_fields() {
        let start = Instant::now();
        let record = CallRecord::new("a", "b", "Echo")
            .with_timing(start, start + Duration::from_millis(3))
            .with_error("boom")
            .with_retry_tag("2")
            .with_level(StatsLevel::Disabled);

        assert_eq!(record.finish, Some(start + Duration::from_millis(3)));
        assert_eq!(record.error.as_ref().map(ToString::to_string).as_deref(), Some("boom"));
        assert_eq!(record.retry_tag.as_deref(), Some("2"));
        assert_eq!(record.level, StatsLevel::Disabled);
    }
}
