//! Domain layer - RPC call model and label derivation.
//!
//! Pure types describing a single RPC and the label values exported
//! for it. No I/O and no metrics-library types here.

pub mod call;
pub mod labels;

// Re-export core types for convenience
pub use call::{CallError, CallRecord, RpcEvent, StatsLevel};
pub use labels::{CallStatus, LABEL_NAMES, LabelSet};
