//! Instrumentation config loader (strict parsing).

pub mod schema;

use std::fs;

use pdsched_core::error::{PdSchedError, Result};

pub use schema::{
    validate_buckets, MetricsConfig, SchedulerMetricsConfig, DEFAULT_BUCKETS, DEFAULT_SUBSYSTEM,
};

pub fn load_from_file(path: &str) -> Result<SchedulerMetricsConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| PdSchedError::Internal(format!("read config failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<SchedulerMetricsConfig> {
    let cfg: SchedulerMetricsConfig = serde_yaml::from_str(s)
        .map_err(|e| PdSchedError::BadConfig(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
