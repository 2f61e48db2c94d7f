//! Builder for frequency trackers.
//!
//! Collects sizing hints up front and produces either a plain
//! [`FrequencyTracker`] or, with the `concurrency` feature, a
//! [`ConcurrentFrequencyTracker`](crate::concurrent::ConcurrentFrequencyTracker).
//!
//! ## Example
//!
//! ```rust
//! use freqtrack::builder::TrackerBuilder;
//!
//! let mut tracker = TrackerBuilder::new()
//!     .capacity(1_000)
//!     .bucket_hint(64)
//!     .build::<u64>();
//! tracker.increment(7);
//! assert_eq!(tracker.max_key(), Some(&7));
//! ```

use std::hash::Hash;

#[cfg(feature = "concurrency")]
use crate::concurrent::ConcurrentFrequencyTracker;
use crate::tracker::{DEFAULT_BUCKET_PREALLOC, FrequencyTracker};

/// Builder for creating tracker instances.
#[derive(Debug, Clone, Copy)]
pub struct TrackerBuilder {
    capacity: usize,
    bucket_hint: usize,
}

impl TrackerBuilder {
    /// Create a builder with no key pre-allocation and the default bucket hint.
    pub fn new() -> Self {
        Self {
            capacity: 0,
            bucket_hint: DEFAULT_BUCKET_PREALLOC,
        }
    }

    /// Expected number of distinct keys.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Expected number of distinct counts alive at once.
    pub fn bucket_hint(mut self, bucket_hint: usize) -> Self {
        self.bucket_hint = bucket_hint;
        self
    }

    /// Build a single-threaded tracker.
    ///
    /// # Type Parameters
    ///
    /// - `K`: Key type, must be `Eq + Hash + Clone`
    pub fn build<K>(self) -> FrequencyTracker<K>
    where
        K: Eq + Hash + Clone,
    {
        FrequencyTracker::with_capacity_and_bucket_hint(self.capacity, self.bucket_hint)
    }

    /// Build a lock-protected tracker that can be shared across threads.
    ///
    /// # Example
    ///
    /// ```rust
    /// use freqtrack::builder::TrackerBuilder;
    ///
    /// let tracker = TrackerBuilder::new().capacity(16).build_concurrent::<String>();
    /// tracker.increment("a".to_string());
    /// assert_eq!(tracker.len(), 1);
    /// ```
    #[cfg(feature = "concurrency")]
    pub fn build_concurrent<K>(self) -> ConcurrentFrequencyTracker<K>
    where
        K: Eq + Hash + Clone,
    {
        ConcurrentFrequencyTracker::from_tracker(self.build())
    }
}

impl Default for TrackerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let builder = TrackerBuilder::default();
        assert_eq!(builder.capacity, 0);
        assert_eq!(builder.bucket_hint, DEFAULT_BUCKET_PREALLOC);

        let tracker = builder.build::<u32>();
        assert!(tracker.is_empty());
        tracker.check_invariants().unwrap();
    }

    #[test]
    fn test_builder_basic_ops() {
        let mut tracker = TrackerBuilder::new().capacity(8).bucket_hint(0).build::<&str>();

        assert_eq!(tracker.increment("a"), 1);
        assert_eq!(tracker.increment("a"), 2);
        assert_eq!(tracker.increment("b"), 1);
        assert_eq!(tracker.max_key(), Some(&"a"));
        assert_eq!(tracker.min_key(), Some(&"b"));

        assert_eq!(tracker.decrement(&"a"), Some(1));
        assert_eq!(tracker.bucket_count(), 1);
        tracker.check_invariants().unwrap();
    }

    #[cfg(feature = "concurrency")]
    #[test]
    fn test_builder_concurrent() {
        let tracker = TrackerBuilder::new().capacity(4).build_concurrent::<u64>();
        tracker.increment(3);
        tracker.increment(3);
        assert_eq!(tracker.max_entry(), Some((3, 2)));
    }
}
