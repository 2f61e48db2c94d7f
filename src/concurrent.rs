//! Thread-safe wrapper around [`FrequencyTracker`].
//!
//! Every operation takes one `parking_lot::Mutex` for its full duration, so
//! each call is atomic with respect to every other call on the same tracker.
//! A `Mutex` is used instead of an `RwLock` because `max_key`/`min_key`
//! record read counters through interior mutability when the `metrics`
//! feature is on.
//!
//! Queries return owned keys (`Option<K>`) since references cannot outlive
//! the lock. Use [`with_tracker`](ConcurrentFrequencyTracker::with_tracker)
//! to borrow instead of clone, or to run several queries under one lock.
//!
//! ## Example Usage
//!
//! ```
//! use std::sync::Arc;
//! use std::thread;
//!
//! use freqtrack::concurrent::ConcurrentFrequencyTracker;
//!
//! let tracker = Arc::new(ConcurrentFrequencyTracker::new());
//! let handles: Vec<_> = (0..4)
//!     .map(|_| {
//!         let tracker = Arc::clone(&tracker);
//!         thread::spawn(move || {
//!             for _ in 0..100 {
//!                 tracker.increment("hits");
//!             }
//!         })
//!     })
//!     .collect();
//! for handle in handles {
//!     handle.join().unwrap();
//! }
//!
//! assert_eq!(tracker.count("hits"), 400);
//! assert_eq!(tracker.max_key(), Some("hits"));
//! ```

use std::borrow::Borrow;
use std::hash::Hash;

use parking_lot::Mutex;

use crate::error::InvariantError;
use crate::tracker::FrequencyTracker;

#[cfg(feature = "metrics")]
use crate::metrics::snapshot::TrackerMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::MetricsSnapshotProvider;

/// Thread-safe [`FrequencyTracker`] using a `parking_lot::Mutex`.
#[derive(Debug)]
pub struct ConcurrentFrequencyTracker<K> {
    inner: Mutex<FrequencyTracker<K>>,
}

impl<K> ConcurrentFrequencyTracker<K>
where
    K: Eq + Hash + Clone,
{
    /// Creates an empty concurrent tracker.
    pub fn new() -> Self {
        Self::from_tracker(FrequencyTracker::new())
    }

    /// Creates an empty concurrent tracker with room for `capacity` keys.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::from_tracker(FrequencyTracker::with_capacity(capacity))
    }

    /// Wraps an existing tracker.
    pub fn from_tracker(tracker: FrequencyTracker<K>) -> Self {
        Self {
            inner: Mutex::new(tracker),
        }
    }

    /// Unwraps the inner tracker.
    pub fn into_inner(self) -> FrequencyTracker<K> {
        self.inner.into_inner()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    pub fn bucket_count(&self) -> usize {
        self.inner.lock().bucket_count()
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.lock().contains(key)
    }

    pub fn count<Q>(&self, key: &Q) -> u64
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.lock().count(key)
    }

    /// Increments `key` and returns its new count.
    pub fn increment(&self, key: K) -> u64 {
        let mut tracker = self.inner.lock();
        tracker.increment(key)
    }

    /// Tries to increment without blocking. `None` if the lock is held.
    pub fn try_increment(&self, key: K) -> Option<u64> {
        let mut tracker = self.inner.try_lock()?;
        Some(tracker.increment(key))
    }

    /// Decrements `key`; see [`FrequencyTracker::decrement`].
    pub fn decrement<Q>(&self, key: &Q) -> Option<u64>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let mut tracker = self.inner.lock();
        tracker.decrement(key)
    }

    /// Tries to decrement without blocking.
    ///
    /// The outer `Option` is `None` if the lock is held; the inner value is
    /// the result of [`FrequencyTracker::decrement`].
    pub fn try_decrement<Q>(&self, key: &Q) -> Option<Option<u64>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let mut tracker = self.inner.try_lock()?;
        Some(tracker.decrement(key))
    }

    /// Increments every key under a single lock acquisition.
    pub fn increment_batch<I>(&self, keys: I) -> usize
    where
        I: IntoIterator<Item = K>,
    {
        let mut tracker = self.inner.lock();
        tracker.increment_batch(keys)
    }

    /// Decrements every key under a single lock acquisition.
    pub fn decrement_batch<I>(&self, keys: I) -> usize
    where
        I: IntoIterator<Item = K>,
    {
        let mut tracker = self.inner.lock();
        tracker.decrement_batch(keys)
    }

    /// Clone of a key holding the highest count.
    pub fn max_key(&self) -> Option<K> {
        self.inner.lock().max_key().cloned()
    }

    /// Clone of a key holding the lowest count.
    pub fn min_key(&self) -> Option<K> {
        self.inner.lock().min_key().cloned()
    }

    pub fn max_entry(&self) -> Option<(K, u64)> {
        self.inner
            .lock()
            .max_entry()
            .map(|(key, count)| (key.clone(), count))
    }

    pub fn min_entry(&self) -> Option<(K, u64)> {
        self.inner
            .lock()
            .min_entry()
            .map(|(key, count)| (key.clone(), count))
    }

    pub fn max_count(&self) -> Option<u64> {
        self.inner.lock().max_count()
    }

    pub fn min_count(&self) -> Option<u64> {
        self.inner.lock().min_count()
    }

    /// Runs `f` against the max key without cloning it.
    pub fn max_key_with<R>(&self, f: impl FnOnce(&K) -> R) -> Option<R> {
        let tracker = self.inner.lock();
        tracker.max_key().map(f)
    }

    /// Runs `f` against the min key without cloning it.
    pub fn min_key_with<R>(&self, f: impl FnOnce(&K) -> R) -> Option<R> {
        let tracker = self.inner.lock();
        tracker.min_key().map(f)
    }

    /// Runs `f` with shared access to the inner tracker under the lock.
    pub fn with_tracker<R>(&self, f: impl FnOnce(&FrequencyTracker<K>) -> R) -> R {
        let tracker = self.inner.lock();
        f(&tracker)
    }

    /// Runs `f` with exclusive access to the inner tracker under the lock.
    pub fn with_tracker_mut<R>(&self, f: impl FnOnce(&mut FrequencyTracker<K>) -> R) -> R {
        let mut tracker = self.inner.lock();
        f(&mut tracker)
    }

    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    /// Tries to clear without blocking.
    pub fn try_clear(&self) -> bool {
        if let Some(mut tracker) = self.inner.try_lock() {
            tracker.clear();
            true
        } else {
            false
        }
    }

    pub fn clear_shrink(&self) {
        self.inner.lock().clear_shrink();
    }

    pub fn approx_bytes(&self) -> usize {
        self.inner.lock().approx_bytes()
    }

    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.inner.lock().check_invariants()
    }
}

#[cfg(feature = "metrics")]
impl<K> ConcurrentFrequencyTracker<K>
where
    K: Eq + Hash + Clone,
{
    pub fn metrics_snapshot(&self) -> TrackerMetricsSnapshot {
        self.inner.lock().metrics_snapshot()
    }

    pub fn reset_metrics(&self) {
        self.inner.lock().reset_metrics();
    }
}

#[cfg(feature = "metrics")]
impl<K> MetricsSnapshotProvider<TrackerMetricsSnapshot> for ConcurrentFrequencyTracker<K>
where
    K: Eq + Hash + Clone,
{
    fn snapshot(&self) -> TrackerMetricsSnapshot {
        self.metrics_snapshot()
    }
}

impl<K> Default for ConcurrentFrequencyTracker<K>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K> From<FrequencyTracker<K>> for ConcurrentFrequencyTracker<K>
where
    K: Eq + Hash + Clone,
{
    fn from(tracker: FrequencyTracker<K>) -> Self {
        Self::from_tracker(tracker)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn concurrent_tracker_basic_ops() {
        let tracker = ConcurrentFrequencyTracker::new();
        assert_eq!(tracker.increment("a"), 1);
        assert_eq!(tracker.increment("a"), 2);
        assert_eq!(tracker.increment("b"), 1);

        assert_eq!(tracker.max_key(), Some("a"));
        assert_eq!(tracker.min_key(), Some("b"));
        assert_eq!(tracker.max_entry(), Some(("a", 2)));
        assert_eq!(tracker.min_count(), Some(1));
        assert_eq!(tracker.len(), 2);

        assert_eq!(tracker.decrement(&"b"), Some(0));
        assert_eq!(tracker.decrement(&"b"), None);
        assert!(!tracker.contains(&"b"));
        tracker.check_invariants().unwrap();
    }

    #[test]
    fn concurrent_tracker_try_ops_fail_while_locked() {
        let tracker = ConcurrentFrequencyTracker::new();
        tracker.increment(1u32);
        tracker.with_tracker(|_| {
            assert_eq!(tracker.try_increment(1), None);
            assert_eq!(tracker.try_decrement(&1), None);
            assert!(!tracker.try_clear());
        });
        assert_eq!(tracker.try_increment(1), Some(2));
        assert_eq!(tracker.try_decrement(&1), Some(Some(1)));
        assert!(tracker.try_clear());
        assert!(tracker.is_empty());
    }

    #[test]
    fn concurrent_tracker_with_tracker_borrows() {
        let tracker = ConcurrentFrequencyTracker::new();
        tracker.increment_batch(vec!["x".to_string(), "y".to_string(), "y".to_string()]);

        let len = tracker.max_key_with(|key| key.len());
        assert_eq!(len, Some(1));
        let pairs = tracker.with_tracker(|t| {
            t.iter()
                .map(|(k, c)| (k.clone(), c))
                .collect::<Vec<_>>()
        });
        assert_eq!(pairs, vec![("x".to_string(), 1), ("y".to_string(), 2)]);

        tracker.with_tracker_mut(|t| {
            t.decrement("y");
            t.decrement("y");
        });
        assert_eq!(tracker.min_key_with(String::clone), Some("x".to_string()));
    }

    #[test]
    fn concurrent_tracker_into_inner_round_trip() {
        let mut inner = FrequencyTracker::new();
        inner.increment('q');
        let tracker = ConcurrentFrequencyTracker::from(inner);
        tracker.increment('q');
        let inner = tracker.into_inner();
        assert_eq!(inner.count(&'q'), 2);
    }

    #[test]
    fn concurrent_tracker_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ConcurrentFrequencyTracker<String>>();
    }
}
