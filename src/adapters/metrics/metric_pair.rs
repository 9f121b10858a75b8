//! Metric Pair - Counter + Latency Histogram for One Traffic Direction
//!
//! Both metrics share the `{caller, callee, method, status, retry}`
//! schema. They are registered together at construction and live as
//! long as the registry does.

use std::fmt;
use std::time::Duration;

use prometheus::{Histogram, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry};

use crate::domain::labels::{LABEL_NAMES, LabelSet};
use crate::error::Result;
use crate::ports::MetricsFault;

/// Counter and histogram bound to one label schema.
#[derive(Clone)]
pub struct MetricPair {
    /// `<prefix>_throughput`: completed calls.
    counter: IntCounterVec,
    /// `<prefix>_latency_us`: call latency in microseconds.
    histogram: HistogramVec,
    counter_name: String,
    histogram_name: String,
}

impl MetricPair {
    /// Create both metrics and register them into `registry`.
    ///
    /// # Errors
    /// Returns `MonitorError::Registration` if either name is already
    /// registered or the buckets are invalid. On failure nothing stays
    /// registered.
    pub fn new(
        registry: &Registry,
        name_prefix: &str,
        counter_help: &str,
        histogram_help: &str,
        buckets: &[f64],
    ) -> Result<Self> {
        let counter_name = format!("{name_prefix}_throughput");
        let histogram_name = format!("{name_prefix}_latency_us");

        let counter = IntCounterVec::new(Opts::new(&counter_name, counter_help), &LABEL_NAMES)?;

        let histogram_opts =
            HistogramOpts::new(&histogram_name, histogram_help).buckets(buckets.to_vec());
        // Children are built lazily; build one up front so bad buckets fail here.
        Histogram::with_opts(histogram_opts.clone())?;
        let histogram = HistogramVec::new(histogram_opts, &LABEL_NAMES)?;

        registry.register(Box::new(counter.clone()))?;
        if let Err(e) = registry.register(Box::new(histogram.clone())) {
            // Keep registration all-or-nothing.
            let _ = registry.unregister(Box::new(counter.clone()));
            return Err(e.into());
        }

        Ok(Self {
            counter,
            histogram,
            counter_name,
            histogram_name,
        })
    }

    /// Fully-qualified counter name.
    pub fn counter_name(&self) -> &str {
        &self.counter_name
    }

    /// Fully-qualified histogram name.
    pub fn histogram_name(&self) -> &str {
        &self.histogram_name
    }

    /// Add `value` to the counter child for `labels`.
    ///
    /// # Errors
    /// Fails if the label values do not match the schema.
    pub fn counter_add(&self, labels: &LabelSet, value: u64) -> prometheus::Result<()> {
        let counter = self.counter.get_metric_with_label_values(&labels.values())?;
        counter.inc_by(value);
        Ok(())
    }

    /// Observe `cost` (in microseconds) on the histogram child for `labels`.
    ///
    /// # Errors
    /// Fails if the label values do not match the schema.
    #[allow(clippy::cast_precision_loss)]
    pub fn histogram_observe(&self, labels: &LabelSet, cost: Duration) -> prometheus::Result<()> {
        let histogram = self.histogram.get_metric_with_label_values(&labels.values())?;
        histogram.observe(cost.as_micros() as f64);
        Ok(())
    }

    /// Count one call and record its latency.
    ///
    /// Both updates are attempted independently; the faults of those
    /// that failed are returned (empty on success).
    pub fn record(&self, labels: &LabelSet, cost: Duration) -> Vec<MetricsFault> {
        let mut faults = Vec::new();

        if let Err(e) = self.counter_add(labels, 1) {
            faults.push(MetricsFault::Update {
                metric: self.counter_name.clone(),
                reason: e.to_string(),
            });
        }
        if let Err(e) = self.histogram_observe(labels, cost) {
            faults.push(MetricsFault::Update {
                metric: self.histogram_name.clone(),
                reason: e.to_string(),
            });
        }

        faults
    }
}

impl fmt::Debug for MetricPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MetricPair")
            .field("counter", &self.counter_name)
            .field("histogram", &self.histogram_name)
            .finish()
    }
}
