//! Sentinel-anchored chain of count buckets.
//!
//! A [`BucketChain`] keeps one [`Bucket`] per distinct live count, linked in
//! strictly ascending count order between two permanent sentinels. Buckets
//! live in a [`SlotArena`] and link to each other by [`SlotId`]; a side index
//! maps a count straight to its bucket so no operation ever walks the chain
//! to find a position.
//!
//! ## Architecture
//!
//! ```text
//!   by_count: FxHashMap<u64, SlotId>
//!   ┌─────────┬────────┐
//!   │  count  │ SlotId │
//!   ├─────────┼────────┤
//!   │    1    │  id_2  │──────────────┐
//!   │    4    │  id_3  │──────────────┼─────────────┐
//!   └─────────┴────────┘              │             │
//!                                     ▼             ▼
//!   buckets: SlotArena<Bucket>
//!   ┌────────────┐    ┌────────────┐    ┌────────────┐    ┌────────────┐
//!   │ HEAD (id_0)│◄──►│ count=1    │◄──►│ count=4    │◄──►│ TAIL (id_1)│
//!   │  -inf      │    │ members: 2 │    │ members: 1 │    │  +inf      │
//!   └────────────┘    └────────────┘    └────────────┘    └────────────┘
//! ```
//!
//! The chain only knows how many members a bucket has and which entry heads
//! its member list; the member entries themselves belong to the owner
//! (see [`FrequencyTracker`](crate::tracker::FrequencyTracker)).
//!
//! ## Operations
//!
//! | Operation       | Time | Notes                                         |
//! |-----------------|------|-----------------------------------------------|
//! | `find`          | O(1) | Count → bucket lookup                         |
//! | `insert_after`  | O(1) | Caller guarantees the ascending position      |
//! | `insert_before` | O(1) | Caller guarantees the ascending position      |
//! | `unlink`        | O(1) | Removes bucket from chain, index and arena    |
//! | `first`/`last`  | O(1) | Lowest / highest live bucket                  |
//! | `check_invariants` | O(b) | Full audit over live buckets               |

use rustc_hash::FxHashMap;
use tracing::trace;

use crate::ds::slot_arena::{SlotArena, SlotId};
use crate::error::InvariantError;

const HEAD: SlotId = SlotId(0);
const TAIL: SlotId = SlotId(1);

/// One node of the chain: every key currently at `count`.
///
/// Sentinels are identified by their slot, not by their count field.
#[derive(Debug)]
pub struct Bucket {
    pub(crate) prev: SlotId,
    pub(crate) next: SlotId,
    pub(crate) count: u64,
    pub(crate) head: Option<SlotId>,
    pub(crate) len: usize,
}

impl Bucket {
    fn sentinel(count: u64, prev: SlotId, next: SlotId) -> Self {
        Self {
            prev,
            next,
            count,
            head: None,
            len: 0,
        }
    }

    /// The count shared by every member.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Number of member keys.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// First entry of the member list.
    pub fn head(&self) -> Option<SlotId> {
        self.head
    }
}

/// Ascending, sentinel-anchored bucket chain with a count index.
#[derive(Debug)]
pub struct BucketChain {
    buckets: SlotArena<Bucket>,
    by_count: FxHashMap<u64, SlotId>,
}

impl BucketChain {
    pub fn new() -> Self {
        Self::with_bucket_hint(0)
    }

    /// Creates an empty chain with room for `bucket_hint` live buckets.
    pub fn with_bucket_hint(bucket_hint: usize) -> Self {
        let mut chain = Self {
            buckets: SlotArena::with_capacity(bucket_hint + 2),
            by_count: FxHashMap::with_capacity_and_hasher(bucket_hint, Default::default()),
        };
        chain.install_sentinels();
        chain
    }

    fn install_sentinels(&mut self) {
        let head = self.buckets.insert(Bucket::sentinel(0, HEAD, TAIL));
        let tail = self.buckets.insert(Bucket::sentinel(u64::MAX, HEAD, TAIL));
        debug_assert_eq!(head, HEAD);
        debug_assert_eq!(tail, TAIL);
        self.buckets.pin_prefix(2);
    }

    /// The "below every count" sentinel.
    #[inline]
    pub fn head(&self) -> SlotId {
        HEAD
    }

    /// The "above every count" sentinel.
    #[inline]
    pub fn tail(&self) -> SlotId {
        TAIL
    }

    #[inline]
    pub fn is_sentinel(&self, id: SlotId) -> bool {
        self.buckets.is_pinned(id)
    }

    /// Number of live (non-sentinel) buckets.
    pub fn len(&self) -> usize {
        self.by_count.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_count.is_empty()
    }

    /// Returns the live bucket holding `count`.
    #[inline]
    pub fn find(&self, count: u64) -> Option<SlotId> {
        self.by_count.get(&count).copied()
    }

    #[inline]
    pub fn get(&self, id: SlotId) -> Option<&Bucket> {
        self.buckets.get(id)
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, id: SlotId) -> Option<&mut Bucket> {
        self.buckets.get_mut(id)
    }

    /// Lowest live bucket, or `None` when `head.next == tail`.
    #[inline]
    pub fn first(&self) -> Option<SlotId> {
        let next = self.link(HEAD).next;
        (next != TAIL).then_some(next)
    }

    /// Highest live bucket, or `None` when `tail.prev == head`.
    #[inline]
    pub fn last(&self) -> Option<SlotId> {
        let prev = self.link(TAIL).prev;
        (prev != HEAD).then_some(prev)
    }

    /// Creates a bucket for `count` directly after `anchor`.
    ///
    /// The caller guarantees `anchor.count < count < anchor.next.count`.
    pub fn insert_after(&mut self, anchor: SlotId, count: u64) -> SlotId {
        let next = self.link(anchor).next;
        self.splice(anchor, next, count)
    }

    /// Creates a bucket for `count` directly before `anchor`.
    ///
    /// The caller guarantees `anchor.prev.count < count < anchor.count`.
    pub fn insert_before(&mut self, anchor: SlotId, count: u64) -> SlotId {
        let prev = self.link(anchor).prev;
        self.splice(prev, anchor, count)
    }

    fn splice(&mut self, prev: SlotId, next: SlotId, count: u64) -> SlotId {
        debug_assert!(anchor_below(self, prev, count), "bucket order broken");
        debug_assert!(anchor_above(self, next, count), "bucket order broken");
        debug_assert!(!self.by_count.contains_key(&count), "duplicate bucket");

        let id = self.buckets.insert(Bucket {
            prev,
            next,
            count,
            head: None,
            len: 0,
        });
        self.link_mut(prev).next = id;
        self.link_mut(next).prev = id;
        self.by_count.insert(count, id);
        trace!(count, live_buckets = self.len(), "bucket created");
        id
    }

    /// Removes a live bucket from the chain, the count index and the arena.
    ///
    /// # Panics
    ///
    /// Panics if `id` is a sentinel or not a live bucket.
    pub fn unlink(&mut self, id: SlotId) -> Bucket {
        assert!(!self.is_sentinel(id), "sentinel buckets are never unlinked");
        let bucket = self.buckets.remove(id).expect("unlink of a dead bucket");
        self.link_mut(bucket.prev).next = bucket.next;
        self.link_mut(bucket.next).prev = bucket.prev;
        let indexed = self.by_count.remove(&bucket.count);
        assert_eq!(indexed, Some(id), "count index out of sync with chain");
        trace!(count = bucket.count, live_buckets = self.len(), "bucket destroyed");
        bucket
    }

    /// Drops every live bucket and re-links the sentinels.
    pub fn clear(&mut self) {
        self.buckets.clear();
        self.by_count.clear();
        self.install_sentinels();
    }

    pub fn shrink_to_fit(&mut self) {
        self.buckets.shrink_to_fit();
        self.by_count.shrink_to_fit();
    }

    pub fn approx_bytes(&self) -> usize {
        self.buckets.approx_bytes()
            + self.by_count.capacity() * std::mem::size_of::<(u64, SlotId)>()
    }

    /// Walks live buckets in ascending count order.
    pub fn iter(&self) -> BucketChainIter<'_> {
        BucketChainIter {
            chain: self,
            current: self.link(HEAD).next,
            remaining: self.len(),
        }
    }

    /// Audits ordering, sentinel linkage, non-emptiness and index agreement.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        let head = self
            .buckets
            .get(HEAD)
            .ok_or_else(|| InvariantError::new("head sentinel missing"))?;
        let tail = self
            .buckets
            .get(TAIL)
            .ok_or_else(|| InvariantError::new("tail sentinel missing"))?;
        if head.len != 0 || tail.len != 0 {
            return Err(InvariantError::new("sentinel bucket holds keys"));
        }
        if self.buckets.len() != self.by_count.len() + 2 {
            return Err(InvariantError::new(format!(
                "arena holds {} buckets but count index has {} (+2 sentinels)",
                self.buckets.len(),
                self.by_count.len()
            )));
        }

        let mut prev = HEAD;
        let mut current = head.next;
        let mut last_count: Option<u64> = None;
        let mut walked = 0usize;
        while current != TAIL {
            walked += 1;
            if walked > self.by_count.len() {
                return Err(InvariantError::new("chain longer than count index"));
            }
            let bucket = self.buckets.get(current).ok_or_else(|| {
                InvariantError::new(format!("chain links to dead slot {:?}", current))
            })?;
            if bucket.prev != prev {
                return Err(InvariantError::new(format!(
                    "bucket count={} has prev {:?}, expected {:?}",
                    bucket.count, bucket.prev, prev
                )));
            }
            if let Some(last) = last_count {
                if bucket.count <= last {
                    return Err(InvariantError::new(format!(
                        "bucket count={} follows count={}",
                        bucket.count, last
                    )));
                }
            }
            if bucket.len == 0 || bucket.head.is_none() {
                return Err(InvariantError::new(format!(
                    "empty bucket count={} left in chain",
                    bucket.count
                )));
            }
            if self.by_count.get(&bucket.count) != Some(&current) {
                return Err(InvariantError::new(format!(
                    "bucket count={} not reachable through count index",
                    bucket.count
                )));
            }
            last_count = Some(bucket.count);
            prev = current;
            current = bucket.next;
        }
        if tail.prev != prev {
            return Err(InvariantError::new("tail sentinel prev link is stale"));
        }
        if walked != self.by_count.len() {
            return Err(InvariantError::new(format!(
                "chain reaches {} buckets but count index has {}",
                walked,
                self.by_count.len()
            )));
        }
        Ok(())
    }

    #[inline]
    fn link(&self, id: SlotId) -> &Bucket {
        self.buckets.get(id).expect("bucket link points at a dead slot")
    }

    #[inline]
    fn link_mut(&mut self, id: SlotId) -> &mut Bucket {
        self.buckets
            .get_mut(id)
            .expect("bucket link points at a dead slot")
    }
}

fn anchor_below(chain: &BucketChain, id: SlotId, count: u64) -> bool {
    id == HEAD || chain.link(id).count < count
}

fn anchor_above(chain: &BucketChain, id: SlotId, count: u64) -> bool {
    id == TAIL || chain.link(id).count > count
}

impl Default for BucketChain {
    fn default() -> Self {
        Self::new()
    }
}

/// Ascending iterator over live buckets.
pub struct BucketChainIter<'a> {
    chain: &'a BucketChain,
    current: SlotId,
    remaining: usize,
}

impl<'a> Iterator for BucketChainIter<'a> {
    type Item = (SlotId, &'a Bucket);

    fn next(&mut self) -> Option<Self::Item> {
        if self.current == TAIL {
            return None;
        }
        let id = self.current;
        let bucket = self.chain.buckets.get(id)?;
        self.current = bucket.next;
        self.remaining = self.remaining.saturating_sub(1);
        Some((id, bucket))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Marks a bucket non-empty so the audit accepts it.
    fn occupy(chain: &mut BucketChain, id: SlotId) {
        let bucket = chain.get_mut(id).unwrap();
        bucket.len = 1;
        bucket.head = Some(SlotId(0));
    }

    fn counts(chain: &BucketChain) -> Vec<u64> {
        chain.iter().map(|(_, b)| b.count()).collect()
    }

    #[test]
    fn bucket_chain_starts_empty() {
        let chain = BucketChain::new();
        assert!(chain.is_empty());
        assert_eq!(chain.first(), None);
        assert_eq!(chain.last(), None);
        assert_eq!(chain.iter().count(), 0);
        chain.check_invariants().unwrap();
    }

    #[test]
    fn bucket_chain_insert_after_and_before_keep_order() {
        let mut chain = BucketChain::new();
        let one = chain.insert_after(chain.head(), 1);
        occupy(&mut chain, one);
        let three = chain.insert_after(one, 3);
        occupy(&mut chain, three);
        let two = chain.insert_before(three, 2);
        occupy(&mut chain, two);

        assert_eq!(counts(&chain), vec![1, 2, 3]);
        assert_eq!(chain.first(), Some(one));
        assert_eq!(chain.last(), Some(three));
        assert_eq!(chain.find(2), Some(two));
        chain.check_invariants().unwrap();
    }

    #[test]
    fn bucket_chain_unlink_relinks_neighbours() {
        let mut chain = BucketChain::new();
        let one = chain.insert_after(chain.head(), 1);
        occupy(&mut chain, one);
        let two = chain.insert_after(one, 2);
        occupy(&mut chain, two);
        let three = chain.insert_after(two, 3);
        occupy(&mut chain, three);

        let removed = chain.unlink(two);
        assert_eq!(removed.count(), 2);
        assert_eq!(chain.find(2), None);
        assert_eq!(counts(&chain), vec![1, 3]);
        assert_eq!(chain.get(one).unwrap().next, three);
        assert_eq!(chain.get(three).unwrap().prev, one);
        chain.check_invariants().unwrap();

        chain.unlink(one);
        chain.unlink(three);
        assert!(chain.is_empty());
        assert_eq!(chain.first(), None);
        chain.check_invariants().unwrap();
    }

    #[test]
    #[should_panic(expected = "sentinel")]
    fn bucket_chain_refuses_to_unlink_sentinel() {
        let mut chain = BucketChain::new();
        let head = chain.head();
        chain.unlink(head);
    }

    #[test]
    fn bucket_chain_clear_reinstalls_sentinels() {
        let mut chain = BucketChain::new();
        let one = chain.insert_after(chain.head(), 1);
        occupy(&mut chain, one);
        chain.clear();
        assert!(chain.is_empty());
        assert_eq!(chain.first(), None);
        assert!(chain.is_sentinel(chain.head()));
        assert!(chain.is_sentinel(chain.tail()));
        assert!(!chain.is_sentinel(one));
        chain.check_invariants().unwrap();

        let five = chain.insert_after(chain.head(), 5);
        occupy(&mut chain, five);
        assert_eq!(chain.last(), Some(five));
        chain.check_invariants().unwrap();
    }

    #[test]
    fn bucket_chain_audit_flags_empty_bucket() {
        let mut chain = BucketChain::new();
        chain.insert_after(chain.head(), 1);
        let err = chain.check_invariants().unwrap_err();
        assert!(err.message().contains("empty bucket"));
    }

    #[test]
    fn bucket_chain_audit_flags_order_violation() {
        let mut chain = BucketChain::new();
        let one = chain.insert_after(chain.head(), 1);
        occupy(&mut chain, one);
        let two = chain.insert_after(one, 2);
        occupy(&mut chain, two);
        chain.get_mut(two).unwrap().count = 0;
        assert!(chain.check_invariants().is_err());
    }

    #[test]
    fn bucket_chain_freed_slots_are_reused() {
        let mut chain = BucketChain::new();
        let one = chain.insert_after(chain.head(), 1);
        occupy(&mut chain, one);
        chain.unlink(one);
        let again = chain.insert_after(chain.head(), 7);
        assert_eq!(one.index(), again.index());
    }
}
