use serde::Deserialize;

use pdsched_core::error::{PdSchedError, Result};
use pdsched_core::exposition::validate_metric_name;
use pdsched_core::StabilityLevel;

/// Prometheus client default buckets, in seconds.
pub const DEFAULT_BUCKETS: [f64; 11] = [
    0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
];

pub const DEFAULT_SUBSYSTEM: &str = "llm_d_inference_scheduler";

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchedulerMetricsConfig {
    pub version: u32,

    #[serde(default)]
    pub metrics: MetricsConfig,
}

impl SchedulerMetricsConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(PdSchedError::UnsupportedVersion);
        }

        self.metrics.validate()?;

        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MetricsConfig {
    /// Name prefix shared by every instrument.
    #[serde(default = "default_subsystem")]
    pub subsystem: String,

    #[serde(default)]
    pub stability: StabilityLevel,

    /// Upper bounds for all histograms; `+Inf` is implicit.
    #[serde(default = "default_buckets")]
    pub buckets: Vec<f64>,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            subsystem: default_subsystem(),
            stability: StabilityLevel::default(),
            buckets: default_buckets(),
        }
    }
}

impl MetricsConfig {
    pub fn validate(&self) -> Result<()> {
        if self.subsystem.is_empty() {
            return Err(PdSchedError::BadConfig(
                "metrics.subsystem must not be empty".into(),
            ));
        }
        validate_metric_name(&self.subsystem)?;
        validate_buckets(&self.buckets)?;
        Ok(())
    }
}

/// Buckets must be non-empty, finite, and strictly ascending.
pub fn validate_buckets(buckets: &[f64]) -> Result<()> {
    if buckets.is_empty() {
        return Err(PdSchedError::InvalidBuckets("bucket list is empty".into()));
    }
    if let Some(b) = buckets.iter().find(|b| !b.is_finite()) {
        return Err(PdSchedError::InvalidBuckets(format!(
            "bucket bound {b} is not finite (+Inf is implicit)"
        )));
    }
    if let Some(w) = buckets.windows(2).find(|w| w[0] >= w[1]) {
        return Err(PdSchedError::InvalidBuckets(format!(
            "bucket bounds must be strictly ascending ({} >= {})",
            w[0], w[1]
        )));
    }
    Ok(())
}

fn default_subsystem() -> String {
    DEFAULT_SUBSYSTEM.into()
}
fn default_buckets() -> Vec<f64> {
    DEFAULT_BUCKETS.to_vec()
}
