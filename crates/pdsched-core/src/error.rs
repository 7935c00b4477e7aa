//! Shared error type across pdsched crates.
//!
//! Recording never fails; only construction (config parsing, name and bucket
//! validation) can produce these.

use thiserror::Error;

/// Stable error codes, suitable for logs and test assertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Malformed or out-of-range configuration.
    BadConfig,
    /// Unsupported config version.
    UnsupportedVersion,
    /// Metric, subsystem, or label name rejected by the naming grammar.
    InvalidName,
    /// Histogram bucket boundaries rejected.
    InvalidBuckets,
    /// Internal error (I/O and the like).
    Internal,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::BadConfig => "BAD_CONFIG",
            ErrorCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ErrorCode::InvalidName => "INVALID_NAME",
            ErrorCode::InvalidBuckets => "INVALID_BUCKETS",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, PdSchedError>;

/// Unified error type used by core and metrics.
#[derive(Debug, Error)]
pub enum PdSchedError {
    #[error("bad config: {0}")]
    BadConfig(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("invalid name: {0}")]
    InvalidName(String),
    #[error("invalid buckets: {0}")]
    InvalidBuckets(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl PdSchedError {
    /// Map the error to its stable code.
    pub fn code(&self) -> ErrorCode {
        match self {
            PdSchedError::BadConfig(_) => ErrorCode::BadConfig,
            PdSchedError::UnsupportedVersion => ErrorCode::UnsupportedVersion,
            PdSchedError::InvalidName(_) => ErrorCode::InvalidName,
            PdSchedError::InvalidBuckets(_) => ErrorCode::InvalidBuckets,
            PdSchedError::Internal(_) => ErrorCode::Internal,
        }
    }
}
