//! Deadline scheduler
//!
//! A key-addressable deadline queue built on [`IndexedHeap`]. Each key is
//! scheduled at most once; scheduling it again moves its deadline in place.
//!
//! The scheduler never reads a clock. The caller decides what "now" is and
//! passes it to [`Scheduler::pop_due`], which hands out at most one due entry
//! per call.
//!
//! # Design
//!
//! The heap owns every [`Entry`]. The key index maps each key to the entry's
//! [`EntryId`] handle, which stays fixed while the heap shuffles positions, so
//! the index never has to be touched by a sift. The current array position is
//! read from the heap whenever `fix` or `remove_at` needs it.
//!
//! # Example
//!
//! ```rust
//! use rust_indexed_heaps::scheduler::Scheduler;
//! use std::time::{Duration, Instant};
//!
//! let now = Instant::now();
//! let hour = Duration::from_secs(3600);
//!
//! let mut scheduler = Scheduler::new();
//! scheduler.add_or_update("backup", now + hour);
//! scheduler.add_or_update("report", now + 2 * hour);
//!
//! // Nothing is due yet.
//! assert!(scheduler.pop_due(&now).is_none());
//!
//! // Both are due three hours from now, but only the earliest comes out.
//! let due = scheduler.pop_due(&(now + 3 * hour)).unwrap();
//! assert_eq!(due.key, "backup");
//! assert_eq!(scheduler.len(), 1);
//! ```

use crate::compare::{Compare, MinFirst};
use crate::indexed::{EntryId, IndexedHeap};
use crate::traits::HeapError;
use rustc_hash::FxHashMap;
use std::borrow::Borrow;
use std::hash::Hash;
use tracing::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One scheduled key and its deadline
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Entry<K, T> {
    pub key: K,
    pub deadline: T,
}

/// Orders entries by deadline alone
#[derive(Debug, Clone, Copy)]
struct DeadlineOrder<C>(C);

impl<K, T, C: Compare<T>> Compare<Entry<K, T>> for DeadlineOrder<C> {
    #[inline]
    fn before(&self, a: &Entry<K, T>, b: &Entry<K, T>) -> bool {
        self.0.before(&a.deadline, &b.deadline)
    }
}

/// Broken bookkeeping between the key index and the heap is not recoverable.
#[cold]
fn invariant_broken(err: HeapError) -> ! {
    panic!("scheduler key index out of sync with heap: {err}")
}

/// A deadline queue addressed by key
///
/// With the default [`MinFirst`] order the earliest deadline is served first.
/// [`Scheduler::with_order`] accepts any [`Compare`] strategy, e.g.
/// [`MaxFirst`](crate::compare::MaxFirst) for latest-deadline-first.
///
/// Entries with equal deadlines come out in no particular order.
///
/// Not internally synchronized: every mutating method takes `&mut self`.
/// Share it across threads behind the caller's own lock.
#[derive(Debug, Clone)]
pub struct Scheduler<K, T, C = MinFirst> {
    heap: IndexedHeap<Entry<K, T>, DeadlineOrder<C>>,
    index: FxHashMap<K, EntryId>,
}

impl<K, T> Scheduler<K, T, MinFirst>
where
    K: Eq + Hash + Clone,
    T: Ord,
{
    /// Creates an earliest-deadline-first scheduler
    pub fn new() -> Self {
        Self::with_order(MinFirst)
    }

    /// Creates an earliest-deadline-first scheduler with room for `capacity` keys
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_order(capacity, MinFirst)
    }
}

impl<K, T> Default for Scheduler<K, T, MinFirst>
where
    K: Eq + Hash + Clone,
    T: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, T, C> Scheduler<K, T, C>
where
    K: Eq + Hash + Clone,
    C: Compare<T>,
{
    /// Creates a scheduler that serves deadlines in the order given by `order`
    pub fn with_order(order: C) -> Self {
        Self::with_capacity_and_order(0, order)
    }

    pub fn with_capacity_and_order(capacity: usize, order: C) -> Self {
        Self {
            heap: IndexedHeap::with_capacity_and_comparator(capacity, DeadlineOrder(order)),
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Schedules `key` at `deadline`, or moves it there if already scheduled
    ///
    /// Rescheduling keeps the entry's identity and never changes [`len`](Self::len).
    ///
    /// # Time Complexity
    /// O(log n)
    pub fn add_or_update(&mut self, key: K, deadline: T) {
        if let Some(&id) = self.index.get(&key) {
            let position = self.position(id);
            if let Some(entry) = self.heap.get_mut(id) {
                entry.deadline = deadline;
            }
            if let Err(err) = self.heap.fix(position) {
                invariant_broken(err);
            }
            debug!(from = position, to = self.position(id), "rescheduled entry");
            return;
        }

        let id = self.heap.push(Entry {
            key: key.clone(),
            deadline,
        });
        self.index.insert(key, id);
        debug!(len = self.heap.len(), "scheduled entry");
    }

    /// Unschedules `key`
    ///
    /// Returns false, without side effects, if `key` was not scheduled.
    ///
    /// # Time Complexity
    /// O(log n)
    pub fn remove<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let Some(id) = self.index.remove(key) else {
            return false;
        };
        let position = self.position(id);
        if let Err(err) = self.heap.remove_at(position) {
            invariant_broken(err);
        }
        debug!(position, len = self.heap.len(), "removed entry");
        true
    }

    /// Extracts the first entry if its deadline is not after `threshold`
    ///
    /// At most one entry comes out per call, even when several are due;
    /// call again (or use [`drain_due`](Self::drain_due)) for the next one.
    /// Returns `None` when the scheduler is empty or the first deadline is
    /// strictly after `threshold`.
    ///
    /// # Time Complexity
    /// O(log n)
    pub fn pop_due(&mut self, threshold: &T) -> Option<Entry<K, T>> {
        let root = self.heap.peek()?;
        if self.order().before(threshold, &root.deadline) {
            return None;
        }

        let entry = match self.heap.pop() {
            Ok(entry) => entry,
            Err(err) => invariant_broken(err),
        };
        self.index.remove(&entry.key);
        debug!(len = self.heap.len(), "popped due entry");
        Some(entry)
    }

    /// Iterates over due entries by calling [`pop_due`](Self::pop_due) until
    /// it returns `None`
    ///
    /// Entries not yet consumed when the iterator is dropped stay scheduled.
    pub fn drain_due<'a>(&'a mut self, threshold: &'a T) -> DrainDue<'a, K, T, C> {
        DrainDue {
            scheduler: self,
            threshold,
        }
    }

    /// The entry that would be served next, regardless of whether it is due
    pub fn peek(&self) -> Option<&Entry<K, T>> {
        self.heap.peek()
    }

    /// The deadline `key` is scheduled at
    pub fn deadline_of<Q>(&self, key: &Q) -> Option<&T>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let id = *self.index.get(key)?;
        self.heap.get(id).map(|entry| &entry.deadline)
    }

    /// Current heap position of `key`'s entry
    pub fn position_of<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let id = *self.index.get(key)?;
        self.heap.position(id)
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains_key(key)
    }

    /// Number of scheduled keys
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Iterates over scheduled entries in heap array order
    pub fn iter(&self) -> impl Iterator<Item = &Entry<K, T>> + '_ {
        self.heap.iter().map(|(_, entry)| entry)
    }

    /// Unschedules everything
    pub fn clear(&mut self) {
        self.heap.clear();
        self.index.clear();
    }

    /// Verifies heap order, position tracking, and that the key index is a
    /// bijection with the heap's entries
    pub fn check_invariants(&self) -> bool {
        self.heap.check_invariants()
            && self.index.len() == self.heap.len()
            && self
                .index
                .iter()
                .all(|(key, &id)| self.heap.get(id).is_some_and(|entry| entry.key == *key))
    }

    fn order(&self) -> &C {
        &self.heap.comparator().0
    }

    fn position(&self, id: EntryId) -> usize {
        match self.heap.position(id) {
            Some(position) => position,
            None => panic!("scheduler key index holds a stale entry handle"),
        }
    }
}

/// Iterator returned by [`Scheduler::drain_due`]
#[derive(Debug)]
pub struct DrainDue<'a, K, T, C> {
    scheduler: &'a mut Scheduler<K, T, C>,
    threshold: &'a T,
}

impl<K, T, C> Iterator for DrainDue<'_, K, T, C>
where
    K: Eq + Hash + Clone,
    C: Compare<T>,
{
    type Item = Entry<K, T>;

    fn next(&mut self) -> Option<Self::Item> {
        self.scheduler.pop_due(self.threshold)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.scheduler.len()))
    }
}
