//! Simple Binary Heap implementation
//!
//! A straightforward binary heap that only implements the base [`Heap`] trait,
//! without position tracking, in-place update, or arbitrary removal.
//!
//! This is the lighter choice for ordering tasks where entries never change
//! once pushed, such as k-way merging in [`merge`](crate::merge). When entries
//! must be rescheduled or cancelled, use
//! [`IndexedHeap`](crate::indexed::IndexedHeap) or
//! [`Scheduler`](crate::scheduler::Scheduler).
//!
//! Like every heap in this crate, the ordering is injected: [`SimpleBinaryHeap::new_min`]
//! and [`SimpleBinaryHeap::new_max`] cover the common cases.
//!
//! # Time Complexity
//!
//! | Operation | Complexity |
//! |-----------|------------|
//! | `push`    | O(log n)   |
//! | `pop`     | O(log n)   |
//! | `peek`    | O(1)       |
//! | `merge`   | O(m log(n + m)) |
//!
//! # Example
//!
//! ```rust
//! use rust_indexed_heaps::Heap;
//! use rust_indexed_heaps::simple_binary::SimpleBinaryHeap;
//!
//! let mut heap = SimpleBinaryHeap::new();
//! heap.push(3, "three");
//! heap.push(1, "one");
//! heap.push(2, "two");
//!
//! assert_eq!(heap.peek(), Some((&1, &"one")));
//! assert_eq!(heap.pop(), Some((1, "one")));
//! assert_eq!(heap.pop(), Some((2, "two")));
//! assert_eq!(heap.pop(), Some((3, "three")));
//! assert_eq!(heap.pop(), None);
//! ```

use crate::compare::{Compare, MaxFirst, MinFirst};
use crate::traits::{Heap, HeapError};

/// A simple binary heap over (priority, item) pairs
///
/// Returns the element whose priority is ordered first under `C`; with the
/// default [`MinFirst`] that is the minimum.
#[derive(Debug, Clone)]
pub struct SimpleBinaryHeap<T, P, C = MinFirst> {
    /// The heap data stored as a vector of (priority, item) pairs
    data: Vec<(P, T)>,
    cmp: C,
}

impl<T, P: Ord> SimpleBinaryHeap<T, P, MinFirst> {
    /// Creates an empty min-heap
    ///
    /// Shadows [`Heap::new`] so that `SimpleBinaryHeap::new()` needs no
    /// comparator annotation.
    pub fn new() -> Self {
        Self::with_comparator(MinFirst)
    }

    /// Creates an empty min-heap
    pub fn new_min() -> Self {
        Self::with_comparator(MinFirst)
    }
}

impl<T, P: Ord> SimpleBinaryHeap<T, P, MaxFirst> {
    /// Creates an empty max-heap
    pub fn new_max() -> Self {
        Self::with_comparator(MaxFirst)
    }
}

impl<T, P, C: Compare<P> + Default> Heap<T, P> for SimpleBinaryHeap<T, P, C> {
    fn new() -> Self {
        Self::with_comparator(C::default())
    }

    fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    fn len(&self) -> usize {
        self.data.len()
    }

    fn push(&mut self, priority: P, item: T) {
        self.data.push((priority, item));
        self.sift_up(self.data.len() - 1);
    }

    fn peek(&self) -> Option<(&P, &T)> {
        self.data.first().map(|(p, t)| (p, t))
    }

    fn pop(&mut self) -> Option<(P, T)> {
        if self.data.is_empty() {
            return None;
        }

        let last_idx = self.data.len() - 1;
        self.data.swap(0, last_idx);
        let result = self.data.pop();

        if !self.data.is_empty() {
            self.sift_down(0);
        }

        result
    }

    fn merge(&mut self, other: Self) {
        self.data.reserve(other.data.len());
        for (priority, item) in other.data {
            Heap::push(self, priority, item);
        }
    }
}

impl<T, P, C: Compare<P>> SimpleBinaryHeap<T, P, C> {
    /// Creates an empty heap ordered by `cmp`
    pub fn with_comparator(cmp: C) -> Self {
        Self {
            data: Vec::new(),
            cmp,
        }
    }

    /// Like [`Heap::pop`], but reports an empty heap as an error
    ///
    /// # Errors
    /// Returns [`HeapError::EmptyCollection`] if the heap is empty.
    pub fn try_pop(&mut self) -> Result<(P, T), HeapError>
    where
        C: Default,
    {
        Heap::pop(self).ok_or(HeapError::EmptyCollection)
    }

    /// Move element at index up to maintain heap property
    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if self.cmp.before(&self.data[index].0, &self.data[parent].0) {
                self.data.swap(index, parent);
                index = parent;
            } else {
                break;
            }
        }
    }

    /// Move element at index down to maintain heap property
    fn sift_down(&mut self, mut index: usize) {
        let len = self.data.len();
        loop {
            let left = 2 * index + 1;
            let right = 2 * index + 2;
            let mut first = index;

            if left < len && self.cmp.before(&self.data[left].0, &self.data[first].0) {
                first = left;
            }
            if right < len && self.cmp.before(&self.data[right].0, &self.data[first].0) {
                first = right;
            }

            if first != index {
                self.data.swap(index, first);
                index = first;
            } else {
                break;
            }
        }
    }
}

impl<T, P, C: Compare<P> + Default> Default for SimpleBinaryHeap<T, P, C> {
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}
