//! Indexed Binary Heap implementation
//!
//! An array-backed binary heap whose elements can be re-prioritized in place
//! and removed from any position, not just the root. Every pushed value gets a
//! stable [`EntryId`] handle, and the heap tracks the current array position of
//! each value so callers never have to search for it.
//!
//! # Design
//!
//! Values live in an arena (`slotmap::SlotMap`). The backing array holds only
//! arena keys, and each arena slot records the array position of its key.
//! Every swap performed while sifting rewrites the stored positions of both
//! swapped slots in the same step, so the position of a live entry always
//! equals its true index. External indexes keep [`EntryId`]s, which never
//! change while the entry is alive, and ask the heap for the position when
//! they need it.
//!
//! Ordering comes from an injected [`Compare`] strategy; the element ordered
//! first sits at the root.
//!
//! # Time Complexity
//!
//! | Operation   | Complexity |
//! |-------------|------------|
//! | `push`      | O(log n)   |
//! | `pop`       | O(log n)   |
//! | `peek`      | O(1)       |
//! | `fix`       | O(log n)   |
//! | `remove_at` | O(log n)   |
//! | `position`  | O(1)       |
//!
//! # Example
//!
//! ```rust
//! use rust_indexed_heaps::indexed::IndexedHeap;
//!
//! let mut heap: IndexedHeap<u32> = IndexedHeap::new();
//! let a = heap.push(30);
//! let _b = heap.push(10);
//! let _c = heap.push(20);
//! assert_eq!(heap.peek(), Some(&10));
//!
//! // Lower `a` below everything else and restore heap order around it.
//! *heap.get_mut(a).unwrap() = 5;
//! let position = heap.position(a).unwrap();
//! heap.fix(position).unwrap();
//! assert_eq!(heap.peek(), Some(&5));
//!
//! // Remove an arbitrary element by its position.
//! let position = heap.position(a).unwrap();
//! assert_eq!(heap.remove_at(position), Ok(5));
//! assert_eq!(heap.pop(), Ok(10));
//! ```

use crate::compare::{Compare, MinFirst};
use crate::traits::HeapError;
use slotmap::{new_key_type, SlotMap};
use tracing::trace;

new_key_type! {
    /// Stable handle to a value stored in an [`IndexedHeap`]
    ///
    /// The handle stays valid until the value is popped or removed. A stale
    /// handle is detected: lookups with it return `None`, even if the arena
    /// slot has since been reused.
    pub struct EntryId;
}

#[derive(Debug, Clone)]
struct Slot<V> {
    value: V,
    position: usize,
}

/// A binary heap with position tracking, in-place update and arbitrary removal
#[derive(Debug, Clone)]
pub struct IndexedHeap<V, C = MinFirst> {
    slots: SlotMap<EntryId, Slot<V>>,
    /// Heap-ordered array of arena keys
    order: Vec<EntryId>,
    cmp: C,
}

impl<V, C: Default> IndexedHeap<V, C> {
    /// Creates an empty heap using the comparator's default value
    pub fn new() -> Self {
        Self::with_comparator(C::default())
    }

    /// Creates an empty heap with room for `capacity` values
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_comparator(capacity, C::default())
    }
}

impl<V, C: Default> Default for IndexedHeap<V, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, C> IndexedHeap<V, C> {
    /// Creates an empty heap ordered by `cmp`
    pub fn with_comparator(cmp: C) -> Self {
        Self {
            slots: SlotMap::with_key(),
            order: Vec::new(),
            cmp,
        }
    }

    /// Creates an empty heap ordered by `cmp` with room for `capacity` values
    pub fn with_capacity_and_comparator(capacity: usize, cmp: C) -> Self {
        Self {
            slots: SlotMap::with_capacity_and_key(capacity),
            order: Vec::with_capacity(capacity),
            cmp,
        }
    }

    /// Returns the number of values in the heap
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns true if the heap holds no values
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// The ordering strategy supplied at construction
    pub fn comparator(&self) -> &C {
        &self.cmp
    }

    /// Returns the value ordered first, without removing it
    pub fn peek(&self) -> Option<&V> {
        self.order.first().map(|&id| &self.slots[id].value)
    }

    /// Returns the handle of the value ordered first
    pub fn peek_id(&self) -> Option<EntryId> {
        self.order.first().copied()
    }

    /// Current array position of the value behind `id`
    pub fn position(&self, id: EntryId) -> Option<usize> {
        self.slots.get(id).map(|slot| slot.position)
    }

    /// Handle of the value currently stored at `position`
    pub fn id_at(&self, position: usize) -> Option<EntryId> {
        self.order.get(position).copied()
    }

    /// Returns true if `id` refers to a value still in the heap
    pub fn contains(&self, id: EntryId) -> bool {
        self.slots.contains_key(id)
    }

    pub fn get(&self, id: EntryId) -> Option<&V> {
        self.slots.get(id).map(|slot| &slot.value)
    }

    /// Mutable access to a stored value
    ///
    /// Changing the part of the value the comparator looks at breaks heap
    /// order until [`fix`](Self::fix) is called on the value's position.
    /// Prefer [`update`](Self::update), which does both.
    pub fn get_mut(&mut self, id: EntryId) -> Option<&mut V> {
        self.slots.get_mut(id).map(|slot| &mut slot.value)
    }

    /// Iterates over handles and values in array order (not sorted order)
    pub fn iter(&self) -> impl Iterator<Item = (EntryId, &V)> + '_ {
        self.order.iter().map(move |&id| (id, &self.slots[id].value))
    }

    /// Removes every value, invalidating all handles
    pub fn clear(&mut self) {
        self.slots.clear();
        self.order.clear();
    }

    /// Swap two array positions and record the new positions in both slots
    #[inline]
    fn swap(&mut self, i: usize, j: usize) {
        self.order.swap(i, j);
        let (a, b) = (self.order[i], self.order[j]);
        self.slots[a].position = i;
        self.slots[b].position = j;
    }

    /// Detach the last array element from both the array and the arena
    fn take_last(&mut self) -> Option<V> {
        let id = self.order.pop()?;
        match self.slots.remove(id) {
            Some(slot) => Some(slot.value),
            None => unreachable!("heap array referenced a vacant arena slot"),
        }
    }
}

impl<V, C: Compare<V>> IndexedHeap<V, C> {
    /// Inserts a value, returning its stable handle
    ///
    /// # Time Complexity
    /// O(log n)
    pub fn push(&mut self, value: V) -> EntryId {
        let position = self.order.len();
        let id = self.slots.insert(Slot { value, position });
        self.order.push(id);
        self.sift_up(position);
        id
    }

    /// Removes and returns the value ordered first
    ///
    /// # Errors
    /// Returns [`HeapError::EmptyCollection`] if the heap is empty.
    ///
    /// # Time Complexity
    /// O(log n)
    pub fn pop(&mut self) -> Result<V, HeapError> {
        if self.order.is_empty() {
            return Err(HeapError::EmptyCollection);
        }

        let last = self.order.len() - 1;
        self.swap(0, last);
        let value = self.take_last().ok_or(HeapError::EmptyCollection)?;

        if !self.order.is_empty() {
            self.sift_down(0);
        }

        Ok(value)
    }

    /// Restores heap order around `position` after its value changed
    ///
    /// Sifts up first; if the value did not move, sifts down. A single value
    /// change can only break the order in one direction.
    ///
    /// # Errors
    /// Returns [`HeapError::InvalidIndex`] if `position >= len`.
    ///
    /// # Time Complexity
    /// O(log n)
    pub fn fix(&mut self, position: usize) -> Result<(), HeapError> {
        self.check_bounds(position)?;
        trace!(position, len = self.order.len(), "fixing heap order");
        self.repair(position);
        Ok(())
    }

    /// Removes and returns the value at `position`
    ///
    /// The last element is moved into the vacated position and then sifted
    /// in whichever direction it needs to go.
    ///
    /// # Errors
    /// Returns [`HeapError::InvalidIndex`] if `position >= len`.
    ///
    /// # Time Complexity
    /// O(log n)
    pub fn remove_at(&mut self, position: usize) -> Result<V, HeapError> {
        self.check_bounds(position)?;
        trace!(position, len = self.order.len(), "removing heap element");

        let last = self.order.len() - 1;
        if position != last {
            self.swap(position, last);
        }
        let value = self.take_last().ok_or(HeapError::InvalidIndex {
            position,
            len: last + 1,
        })?;

        if position != last {
            self.repair(position);
        }

        Ok(value)
    }

    /// Removes the value behind `id`, if it is still in the heap
    pub fn remove(&mut self, id: EntryId) -> Option<V> {
        let position = self.position(id)?;
        self.remove_at(position).ok()
    }

    /// Mutates the value behind `id` and restores heap order around it
    ///
    /// Returns `None` if `id` is stale.
    pub fn update<R>(&mut self, id: EntryId, f: impl FnOnce(&mut V) -> R) -> Option<R> {
        let slot = self.slots.get_mut(id)?;
        let result = f(&mut slot.value);
        let position = slot.position;
        self.repair(position);
        Some(result)
    }

    /// Verifies the structural invariants
    ///
    /// - every stored position equals the value's true array index
    /// - the arena and the array hold the same number of values
    /// - no element is ordered before its parent
    pub fn check_invariants(&self) -> bool {
        if self.slots.len() != self.order.len() {
            return false;
        }

        let positions_match = self
            .order
            .iter()
            .enumerate()
            .all(|(i, &id)| self.slots.get(id).is_some_and(|slot| slot.position == i));
        if !positions_match {
            return false;
        }

        (1..self.order.len()).all(|i| !self.less(i, (i - 1) / 2))
    }

    fn check_bounds(&self, position: usize) -> Result<(), HeapError> {
        if position < self.order.len() {
            Ok(())
        } else {
            Err(HeapError::InvalidIndex {
                position,
                len: self.order.len(),
            })
        }
    }

    /// True if the value at `i` is ordered strictly before the value at `j`
    #[inline]
    fn less(&self, i: usize, j: usize) -> bool {
        let a = &self.slots[self.order[i]].value;
        let b = &self.slots[self.order[j]].value;
        self.cmp.before(a, b)
    }

    fn repair(&mut self, position: usize) {
        if !self.sift_up(position) {
            self.sift_down(position);
        }
    }

    /// Move element at index up to maintain heap property
    ///
    /// Returns true if the element moved.
    fn sift_up(&mut self, mut index: usize) -> bool {
        let start = index;
        while index > 0 {
            let parent = (index - 1) / 2;
            if self.less(index, parent) {
                self.swap(index, parent);
                index = parent;
            } else {
                break;
            }
        }
        index != start
    }

    /// Move element at index down to maintain heap property
    fn sift_down(&mut self, mut index: usize) {
        let len = self.order.len();
        loop {
            let left = 2 * index + 1;
            let right = left + 1;
            let mut first = index;

            if left < len && self.less(left, first) {
                first = left;
            }
            if right < len && self.less(right, first) {
                first = right;
            }

            if first == index {
                break;
            }
            self.swap(index, first);
            index = first;
        }
    }
}
