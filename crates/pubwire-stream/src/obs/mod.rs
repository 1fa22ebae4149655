//! Lightweight in-process counters.
//!
//! Counters are stored as atomics keyed by label sets and rendered in the
//! Prometheus text format, so an embedding app can expose them as-is.

pub mod metrics;

pub use metrics::{CounterVec, RouterMetrics};
