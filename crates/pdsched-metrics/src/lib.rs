//! pdsched metrics library entry.
//!
//! Instrumentation for a prefill/decode scheduler: the instrument types, the
//! strict config loader, and the `SchedulerMetrics` registry the scheduler
//! records into. Exposure over the network is left to the embedding process.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod config;
pub mod obs;
pub mod scheduler;

pub use scheduler::{PdDecision, SchedulerMetrics};
