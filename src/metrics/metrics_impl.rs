use crate::metrics::cell::MetricsCell;
use crate::metrics::traits::{TrackerMetricsReadRecorder, TrackerMetricsRecorder};

#[derive(Debug, Default)]
pub struct TrackerMetrics {
    pub increment_calls: u64,
    pub increment_new_keys: u64,
    pub increment_saturated: u64,
    pub decrement_calls: u64,
    pub decrement_untracked: u64,
    pub decrement_removed_keys: u64,
    pub buckets_created: u64,
    pub buckets_destroyed: u64,
    pub clear_calls: u64,
    pub max_key_calls: MetricsCell,
    pub max_key_found: MetricsCell,
    pub min_key_calls: MetricsCell,
    pub min_key_found: MetricsCell,
}

impl TrackerMetrics {
    pub fn reset(&mut self) {
        self.increment_calls = 0;
        self.increment_new_keys = 0;
        self.increment_saturated = 0;
        self.decrement_calls = 0;
        self.decrement_untracked = 0;
        self.decrement_removed_keys = 0;
        self.buckets_created = 0;
        self.buckets_destroyed = 0;
        self.clear_calls = 0;
        self.max_key_calls.reset();
        self.max_key_found.reset();
        self.min_key_calls.reset();
        self.min_key_found.reset();
    }
}

impl TrackerMetricsRecorder for TrackerMetrics {
    fn record_increment_call(&mut self) {
        self.increment_calls += 1;
    }

    fn record_increment_new_key(&mut self) {
        self.increment_new_keys += 1;
    }

    fn record_increment_saturated(&mut self) {
        self.increment_saturated += 1;
    }

    fn record_decrement_call(&mut self) {
        self.decrement_calls += 1;
    }

    fn record_decrement_untracked(&mut self) {
        self.decrement_untracked += 1;
    }

    fn record_decrement_removed_key(&mut self) {
        self.decrement_removed_keys += 1;
    }

    fn record_bucket_created(&mut self) {
        self.buckets_created += 1;
    }

    fn record_bucket_destroyed(&mut self) {
        self.buckets_destroyed += 1;
    }

    fn record_clear(&mut self) {
        self.clear_calls += 1;
    }
}

impl TrackerMetricsReadRecorder for &TrackerMetrics {
    fn record_max_key_call(&self) {
        self.max_key_calls.incr();
    }

    fn record_max_key_found(&self) {
        self.max_key_found.incr();
    }

    fn record_min_key_call(&self) {
        self.min_key_calls.incr();
    }

    fn record_min_key_found(&self) {
        self.min_key_found.incr();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracker_metrics_records_and_resets() {
        let mut metrics = TrackerMetrics::default();
        metrics.record_increment_call();
        metrics.record_increment_new_key();
        metrics.record_bucket_created();
        (&metrics).record_max_key_call();
        (&metrics).record_max_key_found();
        (&metrics).record_min_key_found();

        assert_eq!(metrics.increment_calls, 1);
        assert_eq!(metrics.increment_new_keys, 1);
        assert_eq!(metrics.buckets_created, 1);
        assert_eq!(metrics.max_key_calls.get(), 1);
        assert_eq!(metrics.max_key_found.get(), 1);

        metrics.reset();
        assert_eq!(metrics.increment_calls, 0);
        assert_eq!(metrics.max_key_calls.get(), 0);
        assert_eq!(metrics.max_key_found.get(), 0);
        assert_eq!(metrics.min_key_found.get(), 0);
    }
}
