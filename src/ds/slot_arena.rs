//! Slab storage with stable integer handles.
//!
//! [`SlotArena`] hands out a [`SlotId`] for every stored value. The id stays
//! valid until the value is removed, after which its slot goes on a free list
//! and is recycled by the next insert. Linked structures in this crate store
//! `SlotId`s in place of pointers, so `prev`/`next` links never alias a
//! borrow.
//!
//! A prefix of slots can be pinned with [`SlotArena::pin_prefix`]. Pinned
//! slots hold values that must outlive every other slot (the bucket chain's
//! sentinels); freeing one is a defect and trips a debug assertion.
//!
//! ## Operations
//!
//! | Operation  | Time | Notes                               |
//! |------------|------|-------------------------------------|
//! | `insert`   | O(1) | Reuses a freed slot when available  |
//! | `remove`   | O(1) | Pushes the slot on the free list    |
//! | `get`      | O(1) | `None` for vacant or unknown slots  |
//! | `iter`     | O(n) | Walks every slot, skipping vacants  |

/// Stable handle into a [`SlotArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId(pub(crate) usize);

impl SlotId {
    /// Returns the raw slot index.
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug)]
pub struct SlotArena<T> {
    slots: Vec<Option<T>>,
    free_list: Vec<usize>,
    len: usize,
    pinned: usize,
}

impl<T> SlotArena<T> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_list: Vec::new(),
            len: 0,
            pinned: 0,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_list: Vec::new(),
            len: 0,
            pinned: 0,
        }
    }

    /// Stores `value` and returns its handle.
    pub fn insert(&mut self, value: T) -> SlotId {
        let idx = match self.free_list.pop() {
            Some(idx) => {
                self.slots[idx] = Some(value);
                idx
            },
            None => {
                self.slots.push(Some(value));
                self.slots.len() - 1
            },
        };
        self.len += 1;
        SlotId(idx)
    }

    /// Marks slots `0..count` as permanent.
    ///
    /// Every pinned slot must already be occupied.
    pub fn pin_prefix(&mut self, count: usize) {
        debug_assert!(
            self.slots[..count].iter().all(Option::is_some),
            "pinned slot is vacant"
        );
        self.pinned = count;
    }

    /// Returns `true` if `id` lies in the pinned prefix.
    #[inline]
    pub fn is_pinned(&self, id: SlotId) -> bool {
        id.0 < self.pinned
    }

    /// Takes the value out of `id`, freeing the slot for reuse.
    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        debug_assert!(!self.is_pinned(id), "pinned slot {} freed", id.0);
        let value = self.slots.get_mut(id.0)?.take()?;
        self.free_list.push(id.0);
        self.len -= 1;
        Some(value)
    }

    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        self.slots.get_mut(id.0).and_then(Option::as_mut)
    }

    pub fn contains(&self, id: SlotId) -> bool {
        self.get(id).is_some()
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    /// Drops every value, pinned ones included. Slot numbering restarts at
    /// zero and nothing is pinned afterwards.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free_list.clear();
        self.len = 0;
        self.pinned = 0;
    }

    pub fn shrink_to_fit(&mut self) {
        self.slots.shrink_to_fit();
        self.free_list.shrink_to_fit();
    }

    /// Approximate heap usage of the slot and free-list vectors.
    pub fn approx_bytes(&self) -> usize {
        self.slots.capacity() * std::mem::size_of::<Option<T>>()
            + self.free_list.capacity() * std::mem::size_of::<usize>()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SlotId, &T)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(idx, slot)| slot.as_ref().map(|value| (SlotId(idx), value)))
    }
}

impl<T> Default for SlotArena<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_arena_insert_remove_reuse() {
        let mut arena = SlotArena::new();
        let id1 = arena.insert("a");
        let id2 = arena.insert("b");
        assert_eq!(arena.len(), 2);
        assert_eq!(arena.get(id1), Some(&"a"));
        assert_eq!(arena.get(id2), Some(&"b"));

        assert_eq!(arena.remove(id1), Some("a"));
        assert_eq!(arena.len(), 1);
        assert!(!arena.contains(id1));

        let id3 = arena.insert("c");
        assert_eq!(arena.len(), 2);
        assert_eq!(arena.get(id3), Some(&"c"));
        assert_eq!(id1.index(), id3.index());
    }

    #[test]
    fn slot_arena_double_remove_is_none() {
        let mut arena = SlotArena::new();
        let id = arena.insert(7u64);
        assert_eq!(arena.remove(id), Some(7));
        assert_eq!(arena.remove(id), None);
        assert!(arena.is_empty());
    }

    #[test]
    fn slot_arena_unknown_id_is_none() {
        let mut arena: SlotArena<u8> = SlotArena::new();
        assert_eq!(arena.get(SlotId(3)), None);
        assert_eq!(arena.get_mut(SlotId(3)), None);
        assert_eq!(arena.remove(SlotId(3)), None);
    }

    #[test]
    fn slot_arena_clear_restarts_numbering() {
        let mut arena = SlotArena::new();
        arena.insert(1);
        arena.insert(2);
        arena.clear();
        assert!(arena.is_empty());
        let id = arena.insert(3);
        assert_eq!(id.index(), 0);
    }

    #[test]
    fn slot_arena_iter_skips_vacant_slots() {
        let mut arena = SlotArena::new();
        let a = arena.insert('a');
        let b = arena.insert('b');
        let c = arena.insert('c');
        arena.remove(b);

        let seen: Vec<_> = arena.iter().map(|(id, v)| (id, *v)).collect();
        assert_eq!(seen, vec![(a, 'a'), (c, 'c')]);
    }

    #[test]
    fn slot_arena_pinned_prefix_is_never_recycled() {
        let mut arena = SlotArena::new();
        let head = arena.insert("head");
        let tail = arena.insert("tail");
        arena.pin_prefix(2);
        assert!(arena.is_pinned(head));
        assert!(arena.is_pinned(tail));

        let a = arena.insert("a");
        assert!(!arena.is_pinned(a));
        arena.remove(a);
        let b = arena.insert("b");
        assert_eq!(a, b);
        assert_eq!(arena.get(head), Some(&"head"));

        arena.clear();
        assert!(!arena.is_pinned(head));
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "pinned slot")]
    fn slot_arena_freeing_pinned_slot_panics() {
        let mut arena = SlotArena::new();
        let head = arena.insert(0u8);
        arena.pin_prefix(1);
        arena.remove(head);
    }

    #[test]
    fn slot_arena_get_mut_updates_in_place() {
        let mut arena = SlotArena::new();
        let id = arena.insert(10);
        *arena.get_mut(id).unwrap() += 5;
        assert_eq!(arena.get(id), Some(&15));
    }
}
