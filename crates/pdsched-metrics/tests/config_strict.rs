#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use pdsched_core::StabilityLevel;
use pdsched_metrics::config::{self, DEFAULT_BUCKETS, DEFAULT_SUBSYSTEM};

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
metrics:
  subsytem: "typo_should_fail"
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.code().as_str(), "BAD_CONFIG");
}

#[test]
fn ok_minimal_config() {
    let cfg = config::load_from_str("version: 1\n").expect("must parse");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.metrics.subsystem, DEFAULT_SUBSYSTEM);
    assert_eq!(cfg.metrics.stability, StabilityLevel::Alpha);
    assert_eq!(cfg.metrics.buckets, DEFAULT_BUCKETS.to_vec());
}

#[test]
fn full_config() {
    let ok = r#"
version: 1
metrics:
  subsystem: "pd_sched"
  stability: BETA
  buckets: [0.001, 0.1, 1]
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(cfg.metrics.subsystem, "pd_sched");
    assert_eq!(cfg.metrics.stability, StabilityLevel::Beta);
    assert_eq!(cfg.metrics.buckets, vec![0.001, 0.1, 1.0]);
}

#[test]
fn rejects_unsupported_version() {
    let err = config::load_from_str("version: 2\n").expect_err("must fail");
    assert_eq!(err.code().as_str(), "UNSUPPORTED_VERSION");
}

#[test]
fn rejects_bad_buckets() {
    for buckets in ["[]", "[0.5, 0.1]", "[0.1, 0.1]", "[0.1, .inf]", "[.nan]"] {
        let s = format!("version: 1\nmetrics:\n  buckets: {buckets}\n");
        let err = config::load_from_str(&s).expect_err("must fail");
        assert_eq!(err.code().as_str(), "INVALID_BUCKETS", "buckets={buckets}");
    }
}

#[test]
fn rejects_bad_subsystem() {
    let err = config::load_from_str("version: 1\nmetrics:\n  subsystem: \"llm-d\"\n")
        .expect_err("must fail");
    assert_eq!(err.code().as_str(), "INVALID_NAME");

    let err = config::load_from_str("version: 1\nmetrics:\n  subsystem: \"\"\n")
        .expect_err("must fail");
    assert_eq!(err.code().as_str(), "BAD_CONFIG");
}

#[test]
fn rejects_unknown_stability() {
    let err = config::load_from_str("version: 1\nmetrics:\n  stability: GAMMA\n")
        .expect_err("must fail");
    assert_eq!(err.code().as_str(), "BAD_CONFIG");
}

#[test]
fn missing_file_is_internal() {
    let err = config::load_from_file("/nonexistent/pdsched.yaml").expect_err("must fail");
    assert_eq!(err.code().as_str(), "INTERNAL");
}
