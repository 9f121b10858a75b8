//! Property-Based Tests - Label Extraction Invariants
//!
//! Uses `proptest` to verify the label rules hold for arbitrary call
//! metadata.

use proptest::prelude::*;

use rpc_prometheus_monitor::RpcInfo;
use rpc_prometheus_monitor::domain::CallRecord;
use rpc_prometheus_monitor::domain::labels::UNKNOWN_LABEL_VALUE;

proptest! {
    /// Non-empty names pass through; empty ones become "unknown".
    #[test]
    fn names_default_to_unknown(
        caller in "[a-zA-Z0-9_.-]{0,12}",
        callee in "[a-zA-Z0-9_.-]{0,12}",
        method in "[a-zA-Z0-9_]{0,12}",
    ) {
        let labels = CallRecord::new(&caller, &callee, &method).label_set();
        let expect = |v: &str| if v.is_empty() { UNKNOWN_LABEL_VALUE.to_string() } else { v.to_string() };
        prop_assert_eq!(labels.caller, expect(&caller));
        prop_assert_eq!(labels.callee, expect(&callee));
        prop_assert_eq!(labels.method, expect(&method));
    }

    /// Status is "error" exactly when a terminal error is present.
    #[test]
    fn status_tracks_error(failed in any::<bool>(), message in "[a-z ]{1,20}") {
        let mut record = CallRecord::new("a", "b", "m");
        if failed {
            record = record.with_error(message);
        }
        let labels = record.label_set();
        prop_assert_eq!(labels.values()[3], if failed { "error" } else { "succeed" });
    }

    /// Retry is the tag when present, "0" otherwise.
    #[test]
    fn retry_defaults_to_zero(tag in proptest::option::of(1u32..10)) {
        let mut record = CallRecord::new("a", "b", "m");
        if let Some(n) = tag {
            record = record.with_retry_tag(n.to_string());
        }
        let labels = record.label_set();
        let expected = tag.map_or_else(|| "0".to_string(), |n| n.to_string());
        prop_assert_eq!(labels.retry, expected);
    }
}
