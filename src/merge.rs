//! K-way merge of sorted streams
//!
//! [`KMerge`] combines any number of individually sorted iterators into one
//! sorted iterator. It keeps one pending item per stream in a
//! [`SimpleBinaryHeap`]; each time an item is yielded, the next item from the
//! same stream takes its place.
//!
//! Streams are assumed to be sorted ascending. An unsorted stream does not
//! break the merge, but the output is then only as sorted as its inputs.
//!
//! # Time Complexity
//!
//! O(log k) per yielded item for k streams.
//!
//! # Example
//!
//! ```rust
//! use rust_indexed_heaps::merge::KMerge;
//!
//! let merged: Vec<i32> = KMerge::new(vec![
//!     vec![1, 4, 7].into_iter(),
//!     vec![2, 5, 8].into_iter(),
//!     vec![3, 6, 9].into_iter(),
//! ])
//! .collect();
//!
//! assert_eq!(merged, (1..=9).collect::<Vec<_>>());
//! ```

use crate::simple_binary::SimpleBinaryHeap;
use crate::traits::Heap;
use std::fmt;

/// Iterator yielding the sorted union of several sorted streams
///
/// Equal items from different streams come out in stream order.
pub struct KMerge<I: Iterator> {
    streams: Vec<I>,
    /// Pending head of each live stream, keyed by (item, stream index)
    heads: SimpleBinaryHeap<(), (I::Item, usize)>,
}

impl<I> KMerge<I>
where
    I: Iterator,
    I::Item: Ord,
{
    /// Primes the merge with the first item of every non-empty stream
    pub fn new(streams: impl IntoIterator<Item = I>) -> Self {
        let mut streams: Vec<I> = streams.into_iter().collect();
        let mut heads = SimpleBinaryHeap::new();
        for (index, stream) in streams.iter_mut().enumerate() {
            if let Some(item) = stream.next() {
                heads.push((item, index), ());
            }
        }
        Self { streams, heads }
    }

    /// Number of streams that still have items pending
    pub fn live_streams(&self) -> usize {
        self.heads.len()
    }
}

impl<I> fmt::Debug for KMerge<I>
where
    I: Iterator,
    I::Item: Ord,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KMerge")
            .field("streams", &self.streams.len())
            .field("live_streams", &self.heads.len())
            .finish()
    }
}

impl<I> Iterator for KMerge<I>
where
    I: Iterator,
    I::Item: Ord,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        let ((item, index), ()) = self.heads.pop()?;
        if let Some(next) = self.streams[index].next() {
            self.heads.push((next, index), ());
        }
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let pending = self.heads.len();
        self.streams
            .iter()
            .map(Iterator::size_hint)
            .fold((pending, Some(pending)), |(lo, hi), (s_lo, s_hi)| {
                (
                    lo.saturating_add(s_lo),
                    hi.zip(s_hi).and_then(|(a, b)| a.checked_add(b)),
                )
            })
    }
}
