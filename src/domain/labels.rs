//! Label Extraction - Fixed Label Schema for RPC Metrics
//!
//! Derives the `{caller, callee, method, status, retry}` label values
//! for one call. Pure: no state, no side effects.

/// Label key for the caller service.
pub const LABEL_KEY_CALLER: &str = "caller";
/// Label key for the callee service.
pub const LABEL_KEY_CALLEE: &str = "callee";
/// Label key for the invoked method.
pub const LABEL_KEY_METHOD: &str = "method";
/// Label key for the call outcome.
pub const LABEL_KEY_STATUS: &str = "status";
/// Label key for the retry count.
pub const LABEL_KEY_RETRY: &str = "retry";

/// Label schema shared by every metric this crate registers, in the
/// order `LabelSet::values` yields them.
pub const LABEL_NAMES: [&str; 5] = [
    LABEL_KEY_CALLER,
    LABEL_KEY_CALLEE,
    LABEL_KEY_METHOD,
    LABEL_KEY_STATUS,
    LABEL_KEY_RETRY,
];

/// Substituted for empty caller/callee/method values.
pub const UNKNOWN_LABEL_VALUE: &str = "unknown";

/// Retry label when the framework did not tag the call.
pub const DEFAULT_RETRY_VALUE: &str = "0";

/// Outcome of a call as exported in the `status` label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallStatus {
    /// No terminal error.
    Succeed,
    /// The call ended with an error.
    Error,
}

impl CallStatus {
    /// Label value.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Succeed => "succeed",
            Self::Error => "error",
        }
    }
}

/// Label values of one call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelSet {
    /// Caller service, or `unknown`.
    pub caller: String,
    /// Callee service, or `unknown`.
    pub callee: String,
    /// Method name, or `unknown`.
    pub method: String,
    /// Call outcome.
    pub status: CallStatus,
    /// Retry count tag, or `0`.
    pub retry: String,
}

impl LabelSet {
    /// Build the label values for one call. Empty names become
    /// `unknown`; a missing retry tag becomes `0`.
    pub fn new(
        caller: &str,
        callee: &str,
        method: &str,
        failed: bool,
        retry_tag: Option<&str>,
    ) -> Self {
        let status = if failed {
            CallStatus::Error
        } else {
            CallStatus::Succeed
        };

        Self {
            caller: value_or_unknown(caller),
            callee: value_or_unknown(callee),
            method: value_or_unknown(method),
            status,
            retry: retry_tag.unwrap_or(DEFAULT_RETRY_VALUE).to_string(),
        }
    }

    /// Values in `LABEL_NAMES` order.
    pub fn values(&self) -> [&str; 5] {
        [
            self.caller.as_str(),
            self.callee.as_str(),
            self.method.as_str(),
            self.status.as_str(),
            self.retry.as_str(),
        ]
    }
}

fn value_or_unknown(value: &str) -> String {
    if value.is_empty() {
        UNKNOWN_LABEL_VALUE.to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_names_become_unknown() {
        let labels = LabelSet::new("", "", "", false, None);
        assert_eq!(labels.caller, UNKNOWN_LABEL_VALUE);
        assert_eq!(labels.callee, UNKNOWN_LABEL_VALUE);
        assert_eq!(labels.method, UNKNOWN_LABEL_VALUE);
    }

    #[test]
    fn test_names_pass_through() {
        let labels = LabelSet::new("svcA", "svcB", "Echo", false, None);
        assert_eq!(labels.values(), ["svcA", "svcB", "Echo", "succeed", "0"]);
    }

    #[test]
    fn test_failure_sets_status() {
        let labels = LabelSet::new("svcA", "svcB", "Echo", true, None);
        assert_eq!(labels.status, CallStatus::Error);
        assert_eq!(labels.values()[3], "error");
    }

    #[test]
    fn test_retry_tag_used_when_present() {
        assert_eq!(LabelSet::new("svcA", "svcB", "Echo", false, Some("2")).retry, "2");
    }

    #[test]
    fn test_values_follow_label_names_order() {
        let labels = LabelSet::new("c", "d", "m", false, Some("1"));
        let pairs: Vec<_> = LABEL_NAMES.iter().zip(labels.values()).collect();
        assert_eq!(pairs[0], (&"caller", "c"));
        assert_eq!(pairs[4], (&"retry", "1"));
    }
}
