//! Lock-light in-process instruments rendered in Prometheus text format.

pub mod metrics;

pub use metrics::{CounterVec, Histogram, HistogramVec};
