//! RPC Tracer - Lifecycle Hooks Feeding a Metric Pair
//!
//! One `RpcTracer` per traffic direction. `start` passes the context
//! through untouched; `finish` reads the timing the framework already
//! recorded, derives labels and updates the pair. Nothing here can fail
//! the RPC: every fault is routed to the diagnostics sink.

use std::fmt;
use std::sync::Arc;

use prometheus::Registry;

use super::metric_pair::MetricPair;
use crate::domain::call::{RpcEvent, StatsLevel};
use crate::error::Result;
use crate::ports::{CallContext, MetricsDiagnostics, MetricsFault, Tracer};

/// Which side of the call a tracer instruments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrafficSide {
    /// Calls issued by this process.
    Client,
    /// Calls handled by this process.
    Server,
}

impl TrafficSide {
    /// Name segment used in metric names.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Client => "client",
            Self::Server => "server",
        }
    }

    const fn throughput_help(self) -> &'static str {
        match self {
            Self::Client => {
                "Total number of RPCs completed by the client, regardless of success or failure."
            }
            Self::Server => {
                "Total number of RPCs completed by the server, regardless of success or failure."
            }
        }
    }

    const fn latency_help(self) -> &'static str {
        match self {
            Self::Client => "Latency (microseconds) of the RPC until it is finished.",
            Self::Server => {
                "Latency (microseconds) of RPC that had been application-level handled by the server."
            }
        }
    }
}

/// Prometheus-backed `Tracer`.
pub struct RpcTracer {
    side: TrafficSide,
    metrics: MetricPair,
    diagnostics: Arc<dyn MetricsDiagnostics>,
}

impl RpcTracer {
    /// Build the tracer and register its metrics as
    /// `<metric_prefix>_<side>_throughput` / `_latency_us`.
    ///
    /// # Errors
    /// Propagates registration failures from `MetricPair::new`.
    pub fn new(
        side: TrafficSide,
        registry: &Registry,
        metric_prefix: &str,
        buckets: &[f64],
        diagnostics: Arc<dyn MetricsDiagnostics>,
    ) -> Result<Self> {
        let metrics = MetricPair::new(
            registry,
            &format!("{metric_prefix}_{}", side.as_str()),
            side.throughput_help(),
            side.latency_help(),
            buckets,
        )?;

        Ok(Self {
            side,
            metrics,
            diagnostics,
        })
    }

    /// Traffic direction.
    pub const fn side(&self) -> TrafficSide {
        self.side
    }

    /// Underlying metrics.
    pub const fn metrics(&self) -> &MetricPair {
        &self.metrics
    }
}

impl Tracer for RpcTracer {
    fn start(&self, ctx: CallContext) -> CallContext {
        ctx
    }

    fn finish(&self, ctx: &CallContext) {
        let Some(info) = ctx.rpc_info() else {
            self.diagnostics.report(&MetricsFault::MissingRpcInfo);
            return;
        };
        if info.stats_level() == StatsLevel::Disabled {
            return;
        }

        let Some(started) = info.event_time(RpcEvent::RpcStart) else {
            self.diagnostics.report(&MetricsFault::MissingEvent(RpcEvent::RpcStart));
            return;
        };
        let Some(finished) = info.event_time(RpcEvent::RpcFinish) else {
            self.diagnostics.report(&MetricsFault::MissingEvent(RpcEvent::RpcFinish));
            return;
        };
        let cost = finished.saturating_duration_since(started);

        let labels = info.label_set();
        for fault in self.metrics.record(&labels, cost) {
            self.diagnostics.report(&fault);
        }
    }
}

impl fmt::Debug for RpcTracer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RpcTracer")
            .field("side", &self.side)
            .field("metrics", &self.metrics)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::time::{Duration, Instant};

    use crate::config::DEFAULT_BUCKETS;
    use crate::domain::call::CallRecord;

    #[derive(Default)]
    struct Collect(Mutex<Vec<MetricsFault>>);

    impl MetricsDiagnostics for Collect {
        fn report(&self, fault: &MetricsFault) {
            self.0.lock().unwrap().push(fault.clone());
        }
    }

    fn tracer(side: TrafficSide) -> (Registry, RpcTracer, Arc<Collect>) {
        let registry = Registry::new();
        let sink = Arc::new(Collect::default());
        let tracer = RpcTracer::new(side, &registry, "rpc", &DEFAULT_BUCKETS, sink.clone()).unwrap();
        (registry, tracer, sink)
    }

    fn timed(record: CallRecord, millis: u64) -> CallContext {
        let start = Instant::now();
        CallContext::from_record(record.with_timing(start, start + Duration::from_millis(millis)))
    }

    #[test]
    fn test_metric_names_per_side() {
        let (_, client, _) = tracer(TrafficSide::Client);
        let (_, server, _) = tracer(TrafficSide::Server);
        assert_eq!(client.metrics().counter_name(), "rpc_client_throughput");
        assert_eq!(server.metrics().histogram_name(), "rpc_server_latency_us");
    }

    #[test]
    fn test_start_returns_context_unchanged() {
        let (_, tracer, _) = tracer(TrafficSide::Client);
        let ctx = tracer.start(CallContext::from_record(CallRecord::new("a", "b", "m")));
        assert_eq!(ctx.rpc_info().map(|info| info.method()), Some("m"));
    }

    #[test]
    fn test_finish_records_call() {
        let (registry, tracer, sink) = tracer(TrafficSide::Server);
        tracer.finish(&timed(CallRecord::new("svcA", "svcB", "Echo"), 10));

        assert!(sink.0.lock().unwrap().is_empty());
        let families = registry.gather();
        let counter = families
            .iter()
            .find(|mf| mf.get_name() == "rpc_server_throughput")
            .unwrap();
        assert_eq!(counter.get_metric()[0].get_counter().get_value() as u64, 1);
        let histogram = families
            .iter()
            .find(|mf| mf.get_name() == "rpc_server_latency_us")
            .unwrap();
        let sample = histogram.get_metric()[0].get_histogram();
        assert_eq!(sample.get_sample_count(), 1);
        assert!((sample.get_sample_sum() - 10_000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_disabled_level_is_noop() {
        let (registry, tracer, sink) = tracer(TrafficSide::Client);
        let record = CallRecord::new("a", "b", "m").with_level(StatsLevel::Disabled);
        tracer.finish(&timed(record, 1));

        assert!(sink.0.lock().unwrap().is_empty());
        assert!(registry.gather().is_empty());
    }

    #[test]
    fn test_missing_info_is_reported() {
        let (registry, tracer, sink) = tracer(TrafficSide::Client);
        tracer.finish(&CallContext::empty());

        assert_eq!(*sink.0.lock().unwrap(), vec![MetricsFault::MissingRpcInfo]);
        assert!(registry.gather().is_empty());
    }

    #[test]
    fn test_missing_finish_event_is_reported() {
        let (registry, tracer, sink) = tracer(TrafficSide::Client);
        let mut record = CallRecord::new("a", "b", "m");
        record.start = Some(Instant::now());
        tracer.finish(&CallContext::from_record(record));

        assert_eq!(
            *sink.0.lock().unwrap(),
            vec![MetricsFault::MissingEvent(RpcEvent::RpcFinish)]
        );
        assert!(registry.gather().is_empty());
    }

    #[test]
    fn test_missing_start_event_is_reported() {
        let (registry, tracer, sink) = tracer(TrafficSide::Server);
        let mut record = CallRecord::new("a", "b", "m");
        record.finish = Some(Instant::now());
        tracer.finish(&CallContext::from_record(record));

        assert_eq!(
            *sink.0.lock().unwrap(),
            vec![MetricsFault::MissingEvent(RpcEvent::RpcStart)]
        );
        assert!(registry.gather().is_empty());
    }

    #[test]
    fn test_finish_before_start_clamps_to_zero() {
        let (registry, tracer, _) = tracer(TrafficSide::Client);
        let now = Instant::now();
        let record = CallRecord::new("a", "b", "m")
            .with_timing(now + Duration::from_millis(5), now);
        tracer.finish(&CallContext::from_record(record));

        let families = registry.gather();
        let histogram = families
            .iter()
            .find(|mf| mf.get_name() == "rpc_client_latency_us")
            .unwrap();
        assert!(histogram.get_metric()[0].get_histogram().get_sample_sum().abs() < f64::EPSILON);
    }
}
