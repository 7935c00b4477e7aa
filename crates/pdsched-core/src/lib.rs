//! pdsched core: exposition-format primitives, stability levels, and errors.
//!
//! This crate defines the text exposition contract and the error surface
//! shared by the scheduler instrumentation and any sink that collects from
//! it. It carries no runtime or concurrency dependencies so a sink can
//! depend on it without pulling in the instrument implementations.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths surface as `PdSchedError`/`Result`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod exposition;
pub mod stability;

/// Shared result type.
pub use error::{ErrorCode, PdSchedError, Result};
pub use exposition::{encode_text, Collector, MetricKind};
pub use stability::{help_with_stability, StabilityLevel};
