/// Point-in-time copy of a tracker's counters and gauges.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TrackerMetricsSnapshot {
    pub increment_calls: u64,
    pub increment_new_keys: u64,
    pub increment_saturated: u64,

    pub decrement_calls: u64,
    pub decrement_untracked: u64,
    pub decrement_removed_keys: u64,

    pub buckets_created: u64,
    pub buckets_destroyed: u64,

    pub max_key_calls: u64,
    pub max_key_found: u64,
    pub min_key_calls: u64,
    pub min_key_found: u64,

    pub clear_calls: u64,

    // gauges captured at snapshot time
    pub tracked_keys: usize,
    pub live_buckets: usize,
}
