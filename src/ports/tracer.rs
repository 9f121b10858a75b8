//! Tracer Port - Call-Lifecycle Hooks
//!
//! The RPC framework invokes `start` when a call begins and `finish`
//! once the response is sent or received (or the call failed).

use super::rpc_info::CallContext;

/// Hooks the RPC framework drives around every call.
///
/// Implementations must never fail the RPC: both hooks are infallible
/// from the framework's point of view.
pub trait Tracer: Send + Sync + 'static {
  /// Called when the RPC begins. Returns the (possibly enriched) context.
  fn start(&self, ctx: CallContext) -> CallContext;

  /// Called when the RPC completes.
  fn finish(&self, ctx: &CallContext);
}
