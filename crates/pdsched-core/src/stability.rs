//! Metric stability levels and help-text decoration.

use std::fmt;

use serde::Deserialize;

/// Maturity tag carried in a metric's help text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StabilityLevel {
    Internal,
    #[default]
    Alpha,
    Beta,
    Stable,
    Deprecated,
}

impl StabilityLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            StabilityLevel::Internal => "INTERNAL",
            StabilityLevel::Alpha => "ALPHA",
            StabilityLevel::Beta => "BETA",
            StabilityLevel::Stable => "STABLE",
            StabilityLevel::Deprecated => "DEPRECATED",
        }
    }
}

impl fmt::Display for StabilityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Prefix `help` with the bracketed stability marker, e.g. `[ALPHA] ...`.
pub fn help_with_stability(help: &str, level: StabilityLevel) -> String {
    format!("[{level}] {help}")
}
