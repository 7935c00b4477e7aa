//! Instrument types: counters and histograms with at most one label.
//!
//! Series live in a `DashMap` keyed by label value, so recording from many
//! tasks only contends on one shard. Histogram series keep one atomic slot per
//! bucket (plus an overflow slot) and derive the cumulative `le` counts and the
//! total count from a single pass over those slots at encode time, so an
//! exposed series is always internally consistent even while writers race.

use std::fmt::Write;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;

use pdsched_core::error::{PdSchedError, Result};
use pdsched_core::exposition::{
    format_float, label_pairs, validate_label_name, validate_metric_name, write_header,
};
use pdsched_core::{Collector, MetricKind};

use crate::config::validate_buckets;

/// Add `v` to an f64 stored as bits.
fn add_f64(cell: &AtomicU64, v: f64) {
    // The closure never returns None, so the update always lands.
    let _ = cell.fetch_update(Ordering::Relaxed, Ordering::Relaxed, |bits| {
        Some((f64::from_bits(bits) + v).to_bits())
    });
}

/// Monotonic counter partitioned by one label.
pub struct CounterVec {
    name: String,
    help: String,
    label: String,
    map: DashMap<String, AtomicU64>,
}

impl CounterVec {
    pub fn new(name: impl Into<String>, help: impl Into<String>, label: &str) -> Result<Self> {
        let name = name.into();
        validate_metric_name(&name)?;
        validate_label_name(label)?;
        Ok(Self {
            name,
            help: help.into(),
            label: label.to_string(),
            map: DashMap::new(),
        })
    }

    /// Increment the series for `value` by 1.
    pub fn inc(&self, value: &str) {
        self.add(value, 1);
    }

    /// Increment the series for `value`, creating it at zero if unseen.
    pub fn add(&self, value: &str, v: u64) {
        if let Some(c) = self.map.get(value) {
            c.fetch_add(v, Ordering::Relaxed);
            return;
        }
        self.map
            .entry(value.to_string())
            .or_insert_with(|| {
                tracing::debug!(metric = %self.name, label = %self.label, value, "new counter series");
                AtomicU64::new(0)
            })
            .fetch_add(v, Ordering::Relaxed);
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

impl Collector for CounterVec {
    fn name(&self) -> &str {
        &self.name
    }

    fn help(&self) -> &str {
        &self.help
    }

    fn kind(&self) -> MetricKind {
        MetricKind::Counter
    }

    fn encode(&self, out: &mut String) {
        let mut series: Vec<(String, u64)> = self
            .map
            .iter()
            .map(|r| (r.key().clone(), r.value().load(Ordering::Relaxed)))
            .collect();
        if series.is_empty() {
            return;
        }
        series.sort();

        write_header(out, &self.name, &self.help, MetricKind::Counter);
        for (value, count) in series {
            let labels = label_pairs(&[(self.label.as_str(), value.as_str())]);
            let _ = writeln!(out, "{}{{{}}} {}", self.name, labels, count);
        }
    }
}

struct Series {
    /// One slot per bucket bound, plus a trailing overflow slot for `+Inf`.
    slots: Box<[AtomicU64]>,
    /// f64 sum stored as bits.
    sum: AtomicU64,
}

struct Snapshot {
    cumulative: Vec<u64>,
    count: u64,
    sum: f64,
}

impl Series {
    fn new(bucket_len: usize) -> Self {
        Self {
            slots: (0..=bucket_len).map(|_| AtomicU64::new(0)).collect(),
            sum: AtomicU64::new(0f64.to_bits()),
        }
    }

    fn observe(&self, bounds: &[f64], v: f64) {
        // First bound with v <= bound; NaN lands in the overflow slot.
        let idx = if v.is_nan() {
            bounds.len()
        } else {
            bounds.partition_point(|b| *b < v)
        };
        self.slots[idx].fetch_add(1, Ordering::Relaxed);
        add_f64(&self.sum, v);
    }

    fn snapshot(&self) -> Snapshot {
        let mut cumulative = Vec::with_capacity(self.slots.len());
        let mut acc = 0u64;
        for s in self.slots.iter() {
            acc += s.load(Ordering::Relaxed);
            cumulative.push(acc);
        }
        Snapshot {
            cumulative,
            count: acc,
            sum: f64::from_bits(self.sum.load(Ordering::Relaxed)),
        }
    }
}

fn write_series(out: &mut String, name: &str, bounds: &[f64], label: Option<(&str, &str)>, snap: &Snapshot) {
    let label_str = label.map(|l| label_pairs(&[l])).unwrap_or_default();
    let prefix = if label_str.is_empty() { String::new() } else { format!("{},", label_str) };

    for (le, count) in bounds.iter().zip(&snap.cumulative) {
        let _ = writeln!(out, "{}_bucket{{{}le=\"{}\"}} {}", name, prefix, format_float(*le), count);
    }
    let _ = writeln!(out, "{}_bucket{{{}le=\"+Inf\"}} {}", name, prefix, snap.count);

    if label_str.is_empty() {
        let _ = writeln!(out, "{}_sum {}", name, format_float(snap.sum));
        let _ = writeln!(out, "{}_count {}", name, snap.count);
    } else {
        let _ = writeln!(out, "{}_sum{{{}}} {}", name, label_str, format_float(snap.sum));
        let _ = writeln!(out, "{}_count{{{}}} {}", name, label_str, snap.count);
    }
}

fn checked_bounds(buckets: &[f64]) -> Result<Arc<[f64]>> {
    validate_buckets(buckets)?;
    Ok(Arc::from(buckets))
}

/// Unlabeled histogram. Its single series exists from construction, so it is
/// exposed with zero counts before the first observation.
pub struct Histogram {
    name: String,
    help: String,
    bounds: Arc<[f64]>,
    series: Series,
}

impl Histogram {
    pub fn new(name: impl Into<String>, help: impl Into<String>, buckets: &[f64]) -> Result<Self> {
        let name = name.into();
        validate_metric_name(&name)?;
        let bounds = checked_bounds(buckets)?;
        Ok(Self {
            name,
            help: help.into(),
            series: Series::new(bounds.len()),
            bounds,
        })
    }

    /// Observe a duration as fractional seconds.
    pub fn observe(&self, d: Duration) {
        self.observe_secs(d.as_secs_f64());
    }

    /// Observe a raw value in seconds. Not validated.
    pub fn observe_secs(&self, v: f64) {
        self.series.observe(&self.bounds, v);
    }

    pub fn buckets(&self) -> &[f64] {
        &self.bounds
    }
}

impl Collector for Histogram {
    fn name(&self) -> &str {
        &self.name
    }

    fn help(&self) -> &str {
        &self.help
    }

    fn kind(&self) -> MetricKind {
        MetricKind::Histogram
    }

    fn encode(&self, out: &mut String) {
        write_header(out, &self.name, &self.help, MetricKind::Histogram);
        write_series(out, &self.name, &self.bounds, None, &self.series.snapshot());
    }
}

/// Histogram partitioned by one label.
pub struct HistogramVec {
    name: String,
    help: String,
    label: String,
    bounds: Arc<[f64]>,
    map: DashMap<String, Series>,
}

impl HistogramVec {
    pub fn new(
        name: impl Into<String>,
        help: impl Into<String>,
        label: &str,
        buckets: &[f64],
    ) -> Result<Self> {
        let name = name.into();
        validate_metric_name(&name)?;
        validate_label_name(label)?;
        if label == "le" {
            return Err(PdSchedError::InvalidName(
                "label name \"le\" is reserved for histogram buckets".into(),
            ));
        }
        Ok(Self {
            name,
            help: help.into(),
            label: label.to_string(),
            bounds: checked_bounds(buckets)?,
            map: DashMap::new(),
        })
    }

    /// Observe a duration as fractional seconds on the series for `value`.
    pub fn observe(&self, value: &str, d: Duration) {
        self.observe_secs(value, d.as_secs_f64());
    }

    /// Observe a raw value in seconds. Not validated.
    pub fn observe_secs(&self, value: &str, v: f64) {
        if let Some(s) = self.map.get(value) {
            s.observe(&self.bounds, v);
            return;
        }
        self.map
            .entry(value.to_string())
            .or_insert_with(|| {
                tracing::debug!(metric = %self.name, label = %self.label, value, "new histogram series");
                Series::new(self.bounds.len())
            })
            .observe(&self.bounds, v);
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn buckets(&self) -> &[f64] {
        &self.bounds
    }
}

impl Collector for HistogramVec {
    fn name(&self) -> &str {
        &self.name
    }

    fn help(&self) -> &str {
        &self.help
    }

    fn kind(&self) -> MetricKind {
        MetricKind::Histogram
    }

    fn encode(&self, out: &mut String) {
        let mut series: Vec<(String, Snapshot)> = self
            .map
            .iter()
            .map(|r| (r.key().clone(), r.value().snapshot()))
            .collect();
        if series.is_empty() {
            return;
        }
        series.sort_by(|a, b| a.0.cmp(&b.0));

        write_header(out, &self.name, &self.help, MetricKind::Histogram);
        for (value, snap) in &series {
            write_series(out, &self.name, &self.bounds, Some((self.label.as_str(), value.as_str())), snap);
        }
    }
}
