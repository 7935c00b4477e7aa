//! Top-level facade crate for pdsched.
//!
//! Re-exports the exposition primitives and the scheduler instrumentation so
//! users can depend on a single crate.

pub mod core {
    pub use pdsched_core::*;
}

pub mod metrics {
    pub use pdsched_metrics::*;
}
