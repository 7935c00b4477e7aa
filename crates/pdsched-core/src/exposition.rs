//! Prometheus text exposition primitives.
//!
//! Instruments implement [`Collector`] and write their own family (HELP, TYPE,
//! samples) into a shared buffer. [`encode_text`] concatenates families in the
//! order given, which is how a sink renders a scrape body.

use std::fmt::Write;

use crate::error::{PdSchedError, Result};

/// Metric family type as written on the `# TYPE` line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    Counter,
    Histogram,
}

impl MetricKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MetricKind::Counter => "counter",
            MetricKind::Histogram => "histogram",
        }
    }
}

/// A collectable instrument handle.
///
/// `encode` takes a point-in-time snapshot of the instrument and appends it to
/// `out`. A labeled family with no series yet appends nothing.
pub trait Collector: Send + Sync {
    /// Fully-qualified metric name (subsystem prefix included).
    fn name(&self) -> &str;
    /// Help text, already decorated with its stability marker.
    fn help(&self) -> &str;
    fn kind(&self) -> MetricKind;
    fn encode(&self, out: &mut String);
}

/// Encode every collector, in order, into one exposition body.
pub fn encode_text(collectors: &[&dyn Collector]) -> String {
    let mut out = String::new();
    for c in collectors {
        c.encode(&mut out);
    }
    out
}

/// Write the `# HELP` / `# TYPE` pair for a family.
pub fn write_header(out: &mut String, name: &str, help: &str, kind: MetricKind) {
    let _ = writeln!(out, "# HELP {} {}", name, escape_help(help));
    let _ = writeln!(out, "# TYPE {} {}", name, kind.as_str());
}

/// Escape a label value (`\`, `"`, newline).
pub fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

/// Escape HELP text (`\`, newline). Quotes are left as-is.
pub fn escape_help(v: &str) -> String {
    v.replace('\\', "\\\\").replace('\n', "\\n")
}

/// Render `k="v",...` without surrounding braces.
pub fn label_pairs(pairs: &[(&str, &str)]) -> String {
    pairs
        .iter()
        .map(|(k, v)| format!("{}=\"{}\"", k, escape_label(v)))
        .collect::<Vec<_>>()
        .join(",")
}

/// Format a sample or bucket boundary value.
///
/// Finite values use the shortest digits that round-trip. Decimal exponents
/// below -4 or at 6 and above switch to `d.ddde±XX` (`1e-07`, `1.5e+06`),
/// matching the Go client's `%g`; infinities and NaN use the exposition
/// spellings.
pub fn format_float(v: f64) -> String {
    if v.is_nan() {
        return "NaN".to_string();
    }
    if v == f64::INFINITY {
        return "+Inf".to_string();
    }
    if v == f64::NEG_INFINITY {
        return "-Inf".to_string();
    }

    let sci = format!("{v:e}");
    let (mantissa, exp) = match sci.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => return format!("{v}"),
    };
    if v != 0.0 && !(-4..6).contains(&exp) {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{mantissa}e{sign}{:02}", exp.unsigned_abs())
    } else {
        format!("{v}")
    }
}

/// Metric names: `[a-zA-Z_:][a-zA-Z0-9_:]*`.
pub fn validate_metric_name(name: &str) -> Result<()> {
    let mut chars = name.chars();
    let ok = match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == ':' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == ':')
        }
        _ => false,
    };
    if ok {
        Ok(())
    } else {
        Err(PdSchedError::InvalidName(format!("metric name {name:?}")))
    }
}

/// Label names: `[a-zA-Z_][a-zA-Z0-9_]*`, and the `__` prefix is reserved.
pub fn validate_label_name(name: &str) -> Result<()> {
    let mut chars = name.chars();
    let ok = match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    };
    if !ok || name.starts_with("__") {
        return Err(PdSchedError::InvalidName(format!("label name {name:?}")));
    }
    Ok(())
}
