//! O(1) key frequency tracker with max/min key lookup.
//!
//! [`FrequencyTracker`] counts how many net times each key has been
//! incremented and answers "which key has the highest count?" and "which key
//! has the lowest count?" in constant time. A key enters on its first
//! increment and leaves as soon as decrements bring it back to zero.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────────┐
//! │                        FrequencyTracker<K> Layout                           │
//! │                                                                             │
//! │   ┌─────────────────────────────┐   ┌─────────────────────────────────┐     │
//! │   │  index: FxHashMap<K,SlotId> │   │  entries: SlotArena<Entry<K>>   │     │
//! │   │                             │   │                                 │     │
//! │   │   "a" ──► id_0 ─────────────┼───┼─► id_0 │ count:3, bucket:b3     │     │
//! │   │   "b" ──► id_1 ─────────────┼───┼─► id_1 │ count:1, bucket:b1     │     │
//! │   │   "c" ──► id_2 ─────────────┼───┼─► id_2 │ count:1, bucket:b1     │     │
//! │   └─────────────────────────────┘   └─────────────────────────────────┘     │
//! │                                                                             │
//! │   chain: BucketChain  (ascending, sentinel-anchored)                        │
//! │                                                                             │
//! │     HEAD ◄──► [b1: count=1 │ id_2 ◄──► id_1] ◄──► [b3: count=3 │ id_0] ◄──► TAIL
//! │      ▲                                                            ▲         │
//! │      └── min_key() reads head.next          max_key() reads tail.prev ──┘   │
//! └─────────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Increment flow
//! ──────────────
//!
//! ```text
//!   increment("b"):            (count 1 → 2)
//!     1. Lookup id_1 in index
//!     2. No bucket for count=2 → splice one directly after b1
//!     3. Unlink id_1 from b1's member list (b1 keeps id_2, survives)
//!     4. Push id_1 on b2's member list, entry.count = 2
//! ```
//!
//! Because the new count is always the old count plus or minus one, the new
//! bucket's position is always directly next to the old bucket. The chain is
//! never searched and never re-sorted.
//!
//! ## Operations
//!
//! | Operation          | Time | Notes                                       |
//! |--------------------|------|---------------------------------------------|
//! | `increment`        | O(1) | Starts untracked keys at 1                  |
//! | `decrement`        | O(1) | Drops the key at 0; no-op if untracked      |
//! | `max_key`          | O(1) | Any key holding the highest count           |
//! | `min_key`          | O(1) | Any key holding the lowest count            |
//! | `count`            | O(1) | 0 for untracked keys                        |
//! | `keys_with_count`  | O(k) | Members of one bucket                       |
//! | `iter`             | O(n) | Ascending by count                          |
//! | `check_invariants` | O(n) | Full structural audit                       |
//!
//! ## Example Usage
//!
//! ```
//! use freqtrack::tracker::FrequencyTracker;
//!
//! let mut tracker = FrequencyTracker::new();
//! for word in ["to", "be", "or", "not", "to", "be", "to"] {
//!     tracker.increment(word);
//! }
//!
//! assert_eq!(tracker.max_key(), Some(&"to"));
//! assert_eq!(tracker.max_count(), Some(3));
//! assert_eq!(tracker.min_count(), Some(1));
//! assert!(matches!(tracker.min_key(), Some(&"or") | Some(&"not")));
//!
//! tracker.decrement("to");
//! tracker.decrement("to");
//! assert_eq!(tracker.count("to"), 1);
//! ```
//!
//! ## Tie-breaking
//!
//! When several keys share the extreme count, which one `max_key`/`min_key`
//! returns is unspecified. Callers must not depend on insertion order or key
//! order.
//!
//! ## Thread Safety
//!
//! `FrequencyTracker` is not synchronized. With the `concurrency` feature,
//! [`ConcurrentFrequencyTracker`](crate::concurrent::ConcurrentFrequencyTracker)
//! routes every operation through one lock.

use std::borrow::Borrow;
use std::hash::Hash;

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::ds::bucket_chain::{BucketChain, BucketChainIter};
use crate::ds::slot_arena::{SlotArena, SlotId};
use crate::error::InvariantError;

#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::TrackerMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::TrackerMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{
    MetricsSnapshotProvider, TrackerMetricsReadRecorder, TrackerMetricsRecorder,
};

/// Default bucket pre-allocation.
/// Counts in typical workloads cluster low, so 32 distinct counts covers most.
pub const DEFAULT_BUCKET_PREALLOC: usize = 32;

/// Member of one bucket's key list.
/// Link fields come first since every increment/decrement touches them.
#[derive(Debug)]
#[repr(C)]
struct Entry<K> {
    prev: Option<SlotId>,
    next: Option<SlotId>,
    bucket: SlotId,
    count: u64,
    key: K,
}

/// Key frequency tracker with O(1) increment, decrement, max and min.
///
/// # Type Parameters
///
/// - `K`: Key type, must be `Eq + Hash + Clone`. Each tracked key is stored
///   twice (index and bucket member), so cheap clones are preferable.
///
/// # Example
///
/// ```
/// use freqtrack::tracker::FrequencyTracker;
///
/// let mut tracker = FrequencyTracker::new();
/// tracker.increment("a");
/// tracker.increment("a");
/// tracker.increment("b");
///
/// assert_eq!(tracker.max_key(), Some(&"a"));
/// assert_eq!(tracker.min_key(), Some(&"b"));
///
/// // Dropping "b" to zero removes it entirely.
/// assert_eq!(tracker.decrement("b"), Some(0));
/// assert!(!tracker.contains("b"));
///
/// // Untracked keys are ignored.
/// assert_eq!(tracker.decrement("b"), None);
/// ```
#[derive(Debug)]
pub struct FrequencyTracker<K> {
    entries: SlotArena<Entry<K>>,
    index: FxHashMap<K, SlotId>,
    chain: BucketChain,
    #[cfg(feature = "metrics")]
    metrics: TrackerMetrics,
}

impl<K> FrequencyTracker<K>
where
    K: Eq + Hash + Clone,
{
    /// Creates an empty tracker.
    ///
    /// # Example
    ///
    /// ```
    /// use freqtrack::tracker::FrequencyTracker;
    ///
    /// let tracker: FrequencyTracker<String> = FrequencyTracker::new();
    /// assert!(tracker.is_empty());
    /// assert_eq!(tracker.max_key(), None);
    /// assert_eq!(tracker.min_key(), None);
    /// ```
    pub fn new() -> Self {
        Self::with_capacity_and_bucket_hint(0, DEFAULT_BUCKET_PREALLOC)
    }

    /// Creates an empty tracker with room for `capacity` distinct keys.
    ///
    /// Uses [`DEFAULT_BUCKET_PREALLOC`] for the bucket storage.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_bucket_hint(capacity, DEFAULT_BUCKET_PREALLOC)
    }

    /// Creates an empty tracker with room for `capacity` distinct keys and
    /// `bucket_hint` distinct counts.
    ///
    /// Both values only size the initial allocations; the tracker grows past
    /// them as needed.
    ///
    /// # Example
    ///
    /// ```
    /// use freqtrack::tracker::FrequencyTracker;
    ///
    /// let tracker: FrequencyTracker<u64> =
    ///     FrequencyTracker::with_capacity_and_bucket_hint(10_000, 128);
    /// assert!(tracker.is_empty());
    /// ```
    pub fn with_capacity_and_bucket_hint(capacity: usize, bucket_hint: usize) -> Self {
        Self {
            entries: SlotArena::with_capacity(capacity),
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            chain: BucketChain::with_bucket_hint(bucket_hint),
            #[cfg(feature = "metrics")]
            metrics: TrackerMetrics::default(),
        }
    }

    /// Number of distinct tracked keys.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns `true` when no key is tracked.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Number of distinct counts currently held by at least one key.
    pub fn bucket_count(&self) -> usize {
        self.chain.len()
    }

    /// Returns `true` if `key` has a non-zero count.
    #[inline]
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains_key(key)
    }

    /// Current count of `key`; 0 if untracked.
    ///
    /// # Example
    ///
    /// ```
    /// use freqtrack::tracker::FrequencyTracker;
    ///
    /// let mut tracker: FrequencyTracker<String> = FrequencyTracker::new();
    /// tracker.increment("page".to_string());
    /// tracker.increment("page".to_string());
    ///
    /// assert_eq!(tracker.count("page"), 2);
    /// assert_eq!(tracker.count("missing"), 0);
    /// ```
    #[inline]
    pub fn count<Q>(&self, key: &Q) -> u64
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index
            .get(key)
            .map_or(0, |&id| self.entry(id).count)
    }

    /// Adds one to the count of `key` and returns the new count.
    ///
    /// An untracked key starts at 0 and ends at 1. A key already at
    /// `u64::MAX` stays there.
    ///
    /// # Example
    ///
    /// ```
    /// use freqtrack::tracker::FrequencyTracker;
    ///
    /// let mut tracker = FrequencyTracker::new();
    /// assert_eq!(tracker.increment("k"), 1);
    /// assert_eq!(tracker.increment("k"), 2);
    /// ```
    #[inline]
    pub fn increment(&mut self, key: K) -> u64 {
        #[cfg(feature = "metrics")]
        self.metrics.record_increment_call();

        let Some(id) = self.index.get(&key).copied() else {
            return self.track_new(key);
        };

        let (old, old_bucket) = self.position(id);
        if old == u64::MAX {
            #[cfg(feature = "metrics")]
            self.metrics.record_increment_saturated();
            return old;
        }

        let new = old + 1;
        let target = match self.chain.find(new) {
            Some(bucket) => bucket,
            None => self.create_bucket_after(old_bucket, new),
        };
        self.detach(id, old_bucket);
        self.attach(id, target, new);
        new
    }

    /// Subtracts one from the count of `key`.
    ///
    /// Returns the new count, where `Some(0)` means the key was removed, or
    /// `None` if the key was not tracked (in which case nothing changes).
    ///
    /// # Example
    ///
    /// ```
    /// use freqtrack::tracker::FrequencyTracker;
    ///
    /// let mut tracker = FrequencyTracker::new();
    /// tracker.increment("k");
    /// tracker.increment("k");
    ///
    /// assert_eq!(tracker.decrement("k"), Some(1));
    /// assert_eq!(tracker.decrement("k"), Some(0));
    /// assert_eq!(tracker.decrement("k"), None);
    /// assert!(tracker.is_empty());
    /// ```
    #[inline]
    pub fn decrement<Q>(&mut self, key: &Q) -> Option<u64>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        #[cfg(feature = "metrics")]
        self.metrics.record_decrement_call();

        let Some(id) = self.index.get(key).copied() else {
            #[cfg(feature = "metrics")]
            self.metrics.record_decrement_untracked();
            return None;
        };

        let (old, old_bucket) = self.position(id);
        if old == 1 {
            self.detach(id, old_bucket);
            self.entries
                .remove(id)
                .expect("key index points at a dead entry");
            self.index.remove(key);

            #[cfg(feature = "metrics")]
            self.metrics.record_decrement_removed_key();
            return Some(0);
        }

        let new = old - 1;
        let target = match self.chain.find(new) {
            Some(bucket) => bucket,
            None => self.create_bucket_before(old_bucket, new),
        };
        self.detach(id, old_bucket);
        self.attach(id, target, new);
        Some(new)
    }

    /// Increments every key in `keys`; returns how many became newly tracked.
    ///
    /// # Example
    ///
    /// ```
    /// use freqtrack::tracker::FrequencyTracker;
    ///
    /// let mut tracker = FrequencyTracker::new();
    /// assert_eq!(tracker.increment_batch(["a", "b", "a"]), 2);
    /// assert_eq!(tracker.count(&"a"), 2);
    /// ```
    pub fn increment_batch<I>(&mut self, keys: I) -> usize
    where
        I: IntoIterator<Item = K>,
    {
        let mut added = 0;
        for key in keys {
            if self.increment(key) == 1 {
                added += 1;
            }
        }
        added
    }

    /// Decrements every key in `keys`; returns how many were tracked.
    ///
    /// # Example
    ///
    /// ```
    /// use freqtrack::tracker::FrequencyTracker;
    ///
    /// let mut tracker = FrequencyTracker::new();
    /// tracker.increment_batch(["a", "b"]);
    /// assert_eq!(tracker.decrement_batch(["a", "missing"]), 1);
    /// assert_eq!(tracker.len(), 1);
    /// ```
    pub fn decrement_batch<I>(&mut self, keys: I) -> usize
    where
        I: IntoIterator<Item = K>,
    {
        let mut found = 0;
        for key in keys {
            if self.decrement(&key).is_some() {
                found += 1;
            }
        }
        found
    }

    /// Returns a key holding the highest count, or `None` when empty.
    ///
    /// Among tied keys the choice is unspecified.
    #[inline]
    pub fn max_key(&self) -> Option<&K> {
        #[cfg(feature = "metrics")]
        (&self.metrics).record_max_key_call();

        let found = self.representative(self.chain.last()).map(|(key, _)| key);

        #[cfg(feature = "metrics")]
        if found.is_some() {
            (&self.metrics).record_max_key_found();
        }

        found
    }

    /// Returns a key holding the lowest count, or `None` when empty.
    ///
    /// Among tied keys the choice is unspecified.
    #[inline]
    pub fn min_key(&self) -> Option<&K> {
        #[cfg(feature = "metrics")]
        (&self.metrics).record_min_key_call();

        let found = self.representative(self.chain.first()).map(|(key, _)| key);

        #[cfg(feature = "metrics")]
        if found.is_some() {
            (&self.metrics).record_min_key_found();
        }

        found
    }

    /// Like [`max_key`](Self::max_key), paired with the count.
    pub fn max_entry(&self) -> Option<(&K, u64)> {
        self.representative(self.chain.last())
    }

    /// Like [`min_key`](Self::min_key), paired with the count.
    pub fn min_entry(&self) -> Option<(&K, u64)> {
        self.representative(self.chain.first())
    }

    /// Highest count held by any key.
    pub fn max_count(&self) -> Option<u64> {
        self.chain
            .last()
            .and_then(|id| self.chain.get(id))
            .map(|bucket| bucket.count())
    }

    /// Lowest count held by any key.
    pub fn min_count(&self) -> Option<u64> {
        self.chain
            .first()
            .and_then(|id| self.chain.get(id))
            .map(|bucket| bucket.count())
    }

    /// Iterates the keys currently at exactly `count`.
    ///
    /// # Example
    ///
    /// ```
    /// use freqtrack::tracker::FrequencyTracker;
    ///
    /// let mut tracker = FrequencyTracker::new();
    /// tracker.increment_batch(["a", "b", "c", "c"]);
    ///
    /// let mut ones: Vec<_> = tracker.keys_with_count(1).copied().collect();
    /// ones.sort();
    /// assert_eq!(ones, vec!["a", "b"]);
    /// assert_eq!(tracker.keys_with_count(5).count(), 0);
    /// ```
    pub fn keys_with_count(&self, count: u64) -> BucketKeys<'_, K> {
        let (head, remaining) = self
            .chain
            .find(count)
            .and_then(|id| self.chain.get(id))
            .map_or((None, 0), |bucket| (bucket.head(), bucket.len()));
        BucketKeys {
            entries: &self.entries,
            current: head,
            remaining,
        }
    }

    /// Iterates `(key, count)` pairs in ascending count order.
    ///
    /// Order among keys with the same count is unspecified.
    pub fn iter(&self) -> Iter<'_, K> {
        Iter {
            entries: &self.entries,
            buckets: self.chain.iter(),
            current: None,
            remaining: self.len(),
        }
    }

    /// Drops every key and bucket.
    pub fn clear(&mut self) {
        #[cfg(feature = "metrics")]
        self.metrics.record_clear();

        debug!(
            keys = self.len(),
            buckets = self.bucket_count(),
            "frequency tracker cleared"
        );
        self.entries.clear();
        self.index.clear();
        self.chain.clear();
    }

    /// Drops every key and bucket and releases spare storage.
    pub fn clear_shrink(&mut self) {
        self.clear();
        self.entries.shrink_to_fit();
        self.index.shrink_to_fit();
        self.chain.shrink_to_fit();
    }

    /// Returns an approximate memory footprint in bytes.
    pub fn approx_bytes(&self) -> usize {
        std::mem::size_of::<Self>()
            + self.entries.approx_bytes()
            + self.index.capacity() * std::mem::size_of::<(K, SlotId)>()
            + self.chain.approx_bytes()
    }

    /// Audits the whole structure.
    ///
    /// Checks bucket ordering, that the count index and chain agree, that no
    /// live bucket is empty, and that every tracked key sits in exactly one
    /// bucket whose count matches its own.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.chain.check_invariants()?;

        if self.index.len() != self.entries.len() {
            return Err(InvariantError::new(format!(
                "key index has {} keys but {} entries are live",
                self.index.len(),
                self.entries.len()
            )));
        }

        let mut members = 0usize;
        for (bucket_id, bucket) in self.chain.iter() {
            let mut current = bucket.head();
            let mut prev = None;
            let mut walked = 0usize;
            while let Some(id) = current {
                walked += 1;
                if walked > bucket.len() {
                    return Err(InvariantError::new(format!(
                        "bucket count={} member list longer than its length {}",
                        bucket.count(),
                        bucket.len()
                    )));
                }
                let entry = self.entries.get(id).ok_or_else(|| {
                    InvariantError::new(format!(
                        "bucket count={} links to dead entry {:?}",
                        bucket.count(),
                        id
                    ))
                })?;
                if entry.bucket != bucket_id {
                    return Err(InvariantError::new(format!(
                        "entry {:?} listed in bucket count={} but owned by {:?}",
                        id,
                        bucket.count(),
                        entry.bucket
                    )));
                }
                if entry.count != bucket.count() {
                    return Err(InvariantError::new(format!(
                        "entry {:?} has count {} inside bucket count={}",
                        id,
                        entry.count,
                        bucket.count()
                    )));
                }
                if entry.prev != prev {
                    return Err(InvariantError::new(format!(
                        "entry {:?} prev link is stale",
                        id
                    )));
                }
                if self.index.get(&entry.key) != Some(&id) {
                    return Err(InvariantError::new(format!(
                        "entry {:?} in bucket count={} is missing from the key index",
                        id,
                        bucket.count()
                    )));
                }
                prev = Some(id);
                current = entry.next;
            }
            if walked != bucket.len() {
                return Err(InvariantError::new(format!(
                    "bucket count={} records {} members but lists {}",
                    bucket.count(),
                    bucket.len(),
                    walked
                )));
            }
            members += walked;
        }

        if members != self.index.len() {
            return Err(InvariantError::new(format!(
                "buckets hold {} keys but key index has {}",
                members,
                self.index.len()
            )));
        }
        Ok(())
    }

    /// Panicking form of [`check_invariants`](Self::check_invariants).
    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        if let Err(err) = self.check_invariants() {
            panic!("frequency tracker invariant violated: {}", err);
        }
    }

    fn track_new(&mut self, key: K) -> u64 {
        let target = match self.chain.find(1) {
            Some(bucket) => bucket,
            None => self.create_bucket_after(self.chain.head(), 1),
        };
        let id = self.entries.insert(Entry {
            prev: None,
            next: None,
            bucket: target,
            count: 1,
            key: key.clone(),
        });
        self.index.insert(key, id);
        self.attach(id, target, 1);

        #[cfg(feature = "metrics")]
        self.metrics.record_increment_new_key();
        1
    }

    fn create_bucket_after(&mut self, anchor: SlotId, count: u64) -> SlotId {
        #[cfg(feature = "metrics")]
        self.metrics.record_bucket_created();
        self.chain.insert_after(anchor, count)
    }

    fn create_bucket_before(&mut self, anchor: SlotId, count: u64) -> SlotId {
        #[cfg(feature = "metrics")]
        self.metrics.record_bucket_created();
        self.chain.insert_before(anchor, count)
    }

    fn representative(&self, bucket: Option<SlotId>) -> Option<(&K, u64)> {
        let bucket = self.chain.get(bucket?)?;
        let head = bucket.head().expect("live bucket has no members");
        let entry = self.entry(head);
        Some((&entry.key, entry.count))
    }

    #[inline]
    fn position(&self, id: SlotId) -> (u64, SlotId) {
        let entry = self.entry(id);
        (entry.count, entry.bucket)
    }

    #[inline]
    fn entry(&self, id: SlotId) -> &Entry<K> {
        self.entries
            .get(id)
            .expect("key index points at a dead entry")
    }

    #[inline]
    fn entry_mut(&mut self, id: SlotId) -> &mut Entry<K> {
        self.entries
            .get_mut(id)
            .expect("key index points at a dead entry")
    }

    /// Pushes entry `id` onto the front of `bucket`'s member list.
    fn attach(&mut self, id: SlotId, bucket: SlotId, count: u64) {
        let target = self.chain.get_mut(bucket).expect("attach to a dead bucket");
        let old_head = target.head.replace(id);
        target.len += 1;

        if let Some(old_head) = old_head {
            self.entry_mut(old_head).prev = Some(id);
        }
        let entry = self.entry_mut(id);
        entry.prev = None;
        entry.next = old_head;
        entry.bucket = bucket;
        entry.count = count;
    }

    /// Unlinks entry `id` from `bucket`, destroying the bucket if it empties.
    fn detach(&mut self, id: SlotId, bucket: SlotId) {
        let (prev, next) = {
            let entry = self.entry(id);
            debug_assert_eq!(entry.bucket, bucket, "entry detached from wrong bucket");
            (entry.prev, entry.next)
        };
        if let Some(prev) = prev {
            self.entry_mut(prev).next = next;
        }
        if let Some(next) = next {
            self.entry_mut(next).prev = prev;
        }

        let source = self.chain.get_mut(bucket).expect("detach from a dead bucket");
        if prev.is_none() {
            source.head = next;
        }
        source.len -= 1;
        let emptied = source.len == 0;

        let entry = self.entry_mut(id);
        entry.prev = None;
        entry.next = None;

        if emptied {
            self.chain.unlink(bucket);
            #[cfg(feature = "metrics")]
            self.metrics.record_bucket_destroyed();
        }
    }
}

#[cfg(feature = "metrics")]
impl<K> FrequencyTracker<K>
where
    K: Eq + Hash + Clone,
{
    pub fn metrics_snapshot(&self) -> TrackerMetricsSnapshot {
        TrackerMetricsSnapshot {
            increment_calls: self.metrics.increment_calls,
            increment_new_keys: self.metrics.increment_new_keys,
            increment_saturated: self.metrics.increment_saturated,
            decrement_calls: self.metrics.decrement_calls,
            decrement_untracked: self.metrics.decrement_untracked,
            decrement_removed_keys: self.metrics.decrement_removed_keys,
            buckets_created: self.metrics.buckets_created,
            buckets_destroyed: self.metrics.buckets_destroyed,
            max_key_calls: self.metrics.max_key_calls.get(),
            max_key_found: self.metrics.max_key_found.get(),
            min_key_calls: self.metrics.min_key_calls.get(),
            min_key_found: self.metrics.min_key_found.get(),
            clear_calls: self.metrics.clear_calls,
            tracked_keys: self.len(),
            live_buckets: self.bucket_count(),
        }
    }

    /// Zeroes every counter. Gauges are unaffected.
    pub fn reset_metrics(&mut self) {
        self.metrics.reset();
    }
}

#[cfg(feature = "metrics")]
impl<K> MetricsSnapshotProvider<TrackerMetricsSnapshot> for FrequencyTracker<K>
where
    K: Eq + Hash + Clone,
{
    fn snapshot(&self) -> TrackerMetricsSnapshot {
        self.metrics_snapshot()
    }
}

impl<K> Default for FrequencyTracker<K>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Extend<K> for FrequencyTracker<K>
where
    K: Eq + Hash + Clone,
{
    fn extend<I: IntoIterator<Item = K>>(&mut self, keys: I) {
        for key in keys {
            self.increment(key);
        }
    }
}

impl<K> FromIterator<K> for FrequencyTracker<K>
where
    K: Eq + Hash + Clone,
{
    /// Builds a tracker by incrementing every key once per occurrence.
    fn from_iter<I: IntoIterator<Item = K>>(keys: I) -> Self {
        let mut tracker = Self::new();
        tracker.extend(keys);
        tracker
    }
}

impl<'a, K> IntoIterator for &'a FrequencyTracker<K>
where
    K: Eq + Hash + Clone,
{
    type Item = (&'a K, u64);
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the keys of one bucket.
pub struct BucketKeys<'a, K> {
    entries: &'a SlotArena<Entry<K>>,
    current: Option<SlotId>,
    remaining: usize,
}

impl<'a, K> Iterator for BucketKeys<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.entries.get(self.current?)?;
        self.current = entry.next;
        self.remaining = self.remaining.saturating_sub(1);
        Some(&entry.key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

/// Ascending `(key, count)` iterator over a whole tracker.
pub struct Iter<'a, K> {
    entries: &'a SlotArena<Entry<K>>,
    buckets: BucketChainIter<'a>,
    current: Option<SlotId>,
    remaining: usize,
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = (&'a K, u64);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(id) = self.current {
                let entry = self.entries.get(id)?;
                self.current = entry.next;
                self.remaining = self.remaining.saturating_sub(1);
                return Some((&entry.key, entry.count));
            }
            let (_, bucket) = self.buckets.next()?;
            self.current = bucket.head();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}
