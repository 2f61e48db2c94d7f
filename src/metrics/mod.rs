//! Operation counters for [`FrequencyTracker`](crate::tracker::FrequencyTracker).
//!
//! Compiled only with the `metrics` feature.

pub mod cell;
pub mod exporter;
pub mod metrics_impl;
pub mod snapshot;
pub mod traits;
