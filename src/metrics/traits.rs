//! # Metrics Traits
//!
//! Recording, snapshotting and export are split into small traits so the
//! tracker only ever writes counters, while tests and monitoring read them
//! through a snapshot.
//!
//! ```text
//!   ┌──────────────────────────────┐   ┌──────────────────────────────┐
//!   │ TrackerMetricsRecorder       │   │ TrackerMetricsReadRecorder   │
//!   │ (&mut self: inc/dec/buckets) │   │ (&self: max_key/min_key)     │
//!   └──────────────┬───────────────┘   └──────────────┬───────────────┘
//!                  └──────────────┬───────────────────┘
//!                                 ▼
//!                   ┌──────────────────────────────┐
//!                   │ MetricsSnapshotProvider<S>   │──► MetricsExporter<S>
//!                   └──────────────────────────────┘
//! ```

/// Counters written by mutating tracker operations.
pub trait TrackerMetricsRecorder {
    fn record_increment_call(&mut self);
    fn record_increment_new_key(&mut self);
    fn record_increment_saturated(&mut self);
    fn record_decrement_call(&mut self);
    fn record_decrement_untracked(&mut self);
    fn record_decrement_removed_key(&mut self);
    fn record_bucket_created(&mut self);
    fn record_bucket_destroyed(&mut self);
    fn record_clear(&mut self);
}

/// Counters written by `&self` queries (uses interior mutability).
pub trait TrackerMetricsReadRecorder {
    fn record_max_key_call(&self);
    fn record_max_key_found(&self);
    fn record_min_key_call(&self);
    fn record_min_key_found(&self);
}

/// Snapshot provider for bench/testing.
pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}

/// Export/publish metrics to production monitoring backends.
pub trait MetricsExporter<S> {
    fn export(&self, snapshot: &S);
}
