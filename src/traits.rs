//! Common traits and error type for heap data structures
//!
//! - [`Heap`]: base trait for simple push/pop heaps such as
//!   [`SimpleBinaryHeap`](crate::simple_binary::SimpleBinaryHeap)
//! - [`HeapError`]: failures of the structural heap primitives
//!
//! The indexed engine in [`indexed`](crate::indexed) has a richer,
//! position-addressed API and does not implement [`Heap`].

use thiserror::Error;

/// Error type for heap operations
///
/// Both variants describe misuse of the structural primitives, not ordinary
/// absence. Callers that look up entries by key get `Option`/`bool` results
/// instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HeapError {
    /// An element was requested from a heap with no elements
    #[error("heap is empty")]
    EmptyCollection,
    /// A position outside `0..len` was passed to `fix` or `remove_at`
    ///
    /// This signals a broken invariant in the caller's bookkeeping and
    /// should not be retried.
    #[error("position {position} is out of bounds for heap of length {len}")]
    InvalidIndex {
        /// The offending position
        position: usize,
        /// Heap length at the time of the call
        len: usize,
    },
}

/// Base trait for heap/priority queue data structures
///
/// This trait provides a simple API similar to Rust's `BinaryHeap`:
/// - `push` inserts an element
/// - `pop` removes and returns the element ordered first
/// - `peek` returns the element ordered first without removing it
///
/// Unlike `BinaryHeap` which stores values directly, these heaps store
/// (priority, item) pairs to separate the ordering key from the data.
///
/// # Example
///
/// ```rust
/// use rust_indexed_heaps::Heap;
/// use rust_indexed_heaps::simple_binary::SimpleBinaryHeap;
///
/// let mut heap = SimpleBinaryHeap::new();
/// heap.push(3, "three");
/// heap.push(1, "one");
/// heap.push(2, "two");
///
/// assert_eq!(heap.peek(), Some((&1, &"one")));
/// assert_eq!(heap.pop(), Some((1, "one")));
/// ```
pub trait Heap<T, P> {
    /// Creates a new empty heap
    fn new() -> Self;

    /// Returns true if the heap is empty
    fn is_empty(&self) -> bool;

    /// Returns the number of elements in the heap
    fn len(&self) -> usize;

    /// Inserts an element with the given priority
    ///
    /// # Time Complexity
    /// O(log n)
    fn push(&mut self, priority: P, item: T);

    /// Returns the first priority and associated item without removing it
    ///
    /// # Time Complexity
    /// O(1)
    fn peek(&self) -> Option<(&P, &T)>;

    /// Removes and returns the first priority and associated item
    ///
    /// # Time Complexity
    /// O(log n)
    fn pop(&mut self) -> Option<(P, T)>;

    /// Merges another heap into this one, consuming the other heap
    fn merge(&mut self, other: Self);
}
