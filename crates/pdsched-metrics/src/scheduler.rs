//! P/D scheduler instrumentation registry.
//!
//! `SchedulerMetrics` owns the five scheduler instruments. Build one at
//! startup, wrap it in an `Arc`, and hand it to whatever records decisions and
//! to whatever exposes metrics; every holder then sees the same accumulators.

use std::time::Duration;

use pdsched_core::error::Result;
use pdsched_core::{encode_text, help_with_stability, Collector};

use crate::config::MetricsConfig;
use crate::obs::{CounterVec, Histogram, HistogramVec};

pub const PREFILL_SELECTION_DURATION: &str = "prefill_selection_duration_seconds";
pub const DECODE_SELECTION_DURATION: &str = "decode_selection_duration_seconds";
pub const PD_DECISION_TOTAL: &str = "pd_decision_total";
pub const PD_THRESHOLD_HITS_TOTAL: &str = "pd_threshold_hits_total";
pub const REQUEST_DURATION_BY_DECISION: &str = "request_duration_by_decision_seconds";

pub const DECISION_TYPE_LABEL: &str = "decision_type";
pub const THRESHOLD_LABEL: &str = "threshold";

/// Outcome of a P/D placement decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PdDecision {
    /// Prefill and decode run on separate pods.
    Split,
    /// One pod serves the whole request.
    Combined,
}

impl PdDecision {
    /// Label value used on `decision_type`.
    pub fn as_str(self) -> &'static str {
        match self {
            PdDecision::Split => "split",
            PdDecision::Combined => "combined",
        }
    }
}

pub struct SchedulerMetrics {
    request_duration_by_decision: HistogramVec,
    prefill_selection_duration: Histogram,
    decode_selection_duration: Histogram,
    pd_decision: CounterVec,
    pd_threshold_hits: CounterVec,
}

impl SchedulerMetrics {
    /// Build all instruments from config.
    pub fn new(cfg: &MetricsConfig) -> Result<Self> {
        cfg.validate()?;

        let name = |suffix: &str| format!("{}_{}", cfg.subsystem, suffix);
        let help = |text: &str| help_with_stability(text, cfg.stability);

        let metrics = Self {
            request_duration_by_decision: HistogramVec::new(
                name(REQUEST_DURATION_BY_DECISION),
                help("Total time taken by the scheduler to process a request, labeled by P/D decision type"),
                DECISION_TYPE_LABEL,
                &cfg.buckets,
            )?,
            prefill_selection_duration: Histogram::new(
                name(PREFILL_SELECTION_DURATION),
                help("Time taken to select a prefill pod"),
                &cfg.buckets,
            )?,
            decode_selection_duration: Histogram::new(
                name(DECODE_SELECTION_DURATION),
                help("Time taken to select a decode pod"),
                &cfg.buckets,
            )?,
            pd_decision: CounterVec::new(
                name(PD_DECISION_TOTAL),
                help("Total number of P/D disaggregation decisions made"),
                DECISION_TYPE_LABEL,
            )?,
            pd_threshold_hits: CounterVec::new(
                name(PD_THRESHOLD_HITS_TOTAL),
                help("Total number of times the P/D token threshold was met, labeled by the configured threshold"),
                THRESHOLD_LABEL,
            )?,
        };

        tracing::info!(
            subsystem = %cfg.subsystem,
            stability = %cfg.stability,
            buckets = cfg.buckets.len(),
            "scheduler metrics initialized"
        );
        Ok(metrics)
    }

    /// All instruments, in registration order.
    pub fn list_instruments(&self) -> Vec<&dyn Collector> {
        vec![
            &self.request_duration_by_decision,
            &self.prefill_selection_duration,
            &self.decode_selection_duration,
            &self.pd_decision,
            &self.pd_threshold_hits,
        ]
    }

    /// Render every instrument in text exposition format.
    pub fn render(&self) -> String {
        encode_text(&self.list_instruments())
    }

    /// Total scheduler time for a request, labeled by decision type.
    ///
    /// `decision_type` is not checked against [`PdDecision`]; each distinct
    /// value gets its own series.
    pub fn record_request_duration_by_decision(&self, duration: Duration, decision_type: &str) {
        self.request_duration_by_decision.observe(decision_type, duration);
    }

    pub fn record_request_duration_by_kind(&self, duration: Duration, decision: PdDecision) {
        self.record_request_duration_by_decision(duration, decision.as_str());
    }

    /// Time taken to select a prefill pod.
    pub fn record_prefill_selection_duration(&self, duration: Duration) {
        self.prefill_selection_duration.observe(duration);
    }

    /// Time taken to select a decode pod.
    pub fn record_decode_selection_duration(&self, duration: Duration) {
        self.decode_selection_duration.observe(duration);
    }

    /// Count one P/D decision. Open label, like the duration above.
    pub fn record_pd_decision(&self, decision_type: &str) {
        self.pd_decision.inc(decision_type);
    }

    pub fn record_pd_decision_kind(&self, decision: PdDecision) {
        self.record_pd_decision(decision.as_str());
    }

    /// Count one hit of the P/D token threshold, keyed by its base-10 value.
    pub fn increment_pd_threshold_hit(&self, threshold: i64) {
        self.pd_threshold_hits.inc(&threshold.to_string());
    }

    pub fn request_duration_by_decision(&self) -> &HistogramVec {
        &self.request_duration_by_decision
    }

    pub fn prefill_selection_duration(&self) -> &Histogram {
        &self.prefill_selection_duration
    }

    pub fn decode_selection_duration(&self) -> &Histogram {
        &self.decode_selection_duration
    }

    pub fn pd_decision(&self) -> &CounterVec {
        &self.pd_decision
    }

    pub fn pd_threshold_hits(&self) -> &CounterVec {
        &self.pd_threshold_hits
    }
}
