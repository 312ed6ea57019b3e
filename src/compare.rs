//! Ordering strategies for heaps
//!
//! Every heap in this crate is parameterized by a [`Compare`] value supplied at
//! construction instead of relying on `Ord` directly. The same engine therefore
//! realizes a min-heap or a max-heap purely through the strategy it is given:
//!
//! - [`MinFirst`]: ascending `Ord`, smallest value at the root (earliest deadline first)
//! - [`MaxFirst`]: descending `Ord`, largest value at the root (latest deadline first)
//! - any `Fn(&T, &T) -> bool` closure returning "`a` is ordered strictly before `b`"
//!
//! # Example
//!
//! ```rust
//! use rust_indexed_heaps::compare::{Compare, MaxFirst, MinFirst};
//!
//! assert!(MinFirst.before(&1, &2));
//! assert!(MaxFirst.before(&2, &1));
//!
//! let by_len = |a: &&str, b: &&str| a.len() < b.len();
//! assert!(by_len.before(&"ab", &"abc"));
//! ```

/// A strict ordering predicate over `T`
///
/// `before(a, b)` must behave like `<` under some total order: irreflexive,
/// transitive, and with incomparability being an equivalence. Heaps place the
/// element ordered first at the root.
pub trait Compare<T: ?Sized> {
    /// Returns true if `a` is ordered strictly before `b`
    fn before(&self, a: &T, b: &T) -> bool;
}

/// Natural ascending order: the smallest value is served first
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MinFirst;

/// Reversed order: the largest value is served first
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MaxFirst;

impl<T: Ord + ?Sized> Compare<T> for MinFirst {
    #[inline]
    fn before(&self, a: &T, b: &T) -> bool {
        a < b
    }
}

impl<T: Ord + ?Sized> Compare<T> for MaxFirst {
    #[inline]
    fn before(&self, a: &T, b: &T) -> bool {
        a > b
    }
}

impl<T: ?Sized, F> Compare<T> for F
where
    F: Fn(&T, &T) -> bool,
{
    #[inline]
    fn before(&self, a: &T, b: &T) -> bool {
        self(a, b)
    }
}
