#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use pdsched_core::exposition::{
    escape_help, escape_label, format_float, label_pairs, validate_label_name,
    validate_metric_name, write_header,
};
use pdsched_core::{encode_text, Collector, MetricKind};

#[test]
fn float_formatting_matches_exposition_spelling() {
    assert_eq!(format_float(0.005), "0.005");
    assert_eq!(format_float(1.0), "1");
    assert_eq!(format_float(2.5), "2.5");
    assert_eq!(format_float(10.0), "10");
    assert_eq!(format_float(0.15), "0.15");
    assert_eq!(format_float(f64::INFINITY), "+Inf");
    assert_eq!(format_float(f64::NEG_INFINITY), "-Inf");
    assert_eq!(format_float(f64::NAN), "NaN");
}

#[test]
fn small_and_large_floats_use_exponent_form() {
    assert_eq!(format_float(0.0), "0");
    assert_eq!(format_float(0.0001), "0.0001");
    assert_eq!(format_float(0.00001), "1e-05");
    assert_eq!(format_float(1e-7), "1e-07");
    assert_eq!(format_float(-2.5e-6), "-2.5e-06");
    assert_eq!(format_float(123456.0), "123456");
    assert_eq!(format_float(1234567.5), "1.2345675e+06");
    assert_eq!(format_float(1e100), "1e+100");
}

#[test]
fn label_values_are_escaped() {
    assert_eq!(escape_label(r#"a"b"#), r#"a\"b"#);
    assert_eq!(escape_label("a\\b"), "a\\\\b");
    assert_eq!(escape_label("a\nb"), "a\\nb");
    assert_eq!(
        label_pairs(&[("decision_type", "split"), ("x", "q\"")]),
        r#"decision_type="split",x="q\"""#
    );
}

#[test]
fn help_keeps_quotes_but_escapes_newlines() {
    assert_eq!(escape_help("say \"hi\"\nnow"), "say \"hi\"\\nnow");
}

#[test]
fn header_lines() {
    let mut out = String::new();
    write_header(&mut out, "sched_x_total", "[ALPHA] Things", MetricKind::Counter);
    assert_eq!(
        out,
        "# HELP sched_x_total [ALPHA] Things\n# TYPE sched_x_total counter\n"
    );
}

#[test]
fn metric_name_grammar() {
    assert!(validate_metric_name("llm_d_inference_scheduler_pd_decision_total").is_ok());
    assert!(validate_metric_name("ns:sub_x").is_ok());
    assert!(validate_metric_name("_x").is_ok());

    for bad in ["", "1abc", "has-dash", "sp ace", "ümlaut"] {
        let err = validate_metric_name(bad).expect_err("must fail");
        assert_eq!(err.code().as_str(), "INVALID_NAME", "name={bad:?}");
    }
}

#[test]
fn label_name_grammar() {
    assert!(validate_label_name("decision_type").is_ok());
    assert!(validate_label_name("threshold").is_ok());
    for bad in ["", "__reserved", "a:b", "9x"] {
        assert!(validate_label_name(bad).is_err(), "name={bad:?}");
    }
}

struct Fixed(&'static str, &'static str);

impl Collector for Fixed {
    fn name(&self) -> &str {
        self.0
    }
    fn help(&self) -> &str {
        "fixed"
    }
    fn kind(&self) -> MetricKind {
        MetricKind::Counter
    }
    fn encode(&self, out: &mut String) {
        out.push_str(self.1);
    }
}

#[test]
fn encode_text_preserves_collector_order() {
    let a = Fixed("a", "a 1\n");
    let b = Fixed("b", "b 2\n");
    assert_eq!(encode_text(&[&b, &a]), "b 2\na 1\n");
    assert_eq!(encode_text(&[]), "");
}
