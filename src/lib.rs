//! Indexed Heaps and a Deadline Scheduler for Rust
//!
//! This crate provides binary heaps whose ordering is injected at construction,
//! and a key-addressed deadline scheduler built on the indexed variant.
//!
//! # Features
//!
//! - **Indexed Binary Heap**: O(log n) push, pop, in-place priority change (`fix`)
//!   and removal from any position (`remove_at`); stable handles with O(1)
//!   position lookup
//! - **Scheduler**: add-or-update by key, remove by key, and extraction of the
//!   next due entry against a caller-supplied time threshold
//! - **Simple Binary Heap**: plain push/pop heap for entries that never change
//! - **K-way Merge**: sorted union of sorted streams
//!
//! Ordering strategies live in [`compare`]: [`MinFirst`](compare::MinFirst),
//! [`MaxFirst`](compare::MaxFirst), or any closure.
//!
//! # Example
//!
//! ```rust
//! use rust_indexed_heaps::Scheduler;
//!
//! let mut scheduler = Scheduler::new();
//! scheduler.add_or_update("a", 10u64);
//! scheduler.add_or_update("b", 20u64);
//! scheduler.add_or_update("a", 40u64);
//!
//! assert_eq!(scheduler.peek().map(|entry| entry.key), Some("b"));
//! assert!(scheduler.remove("b"));
//! assert_eq!(scheduler.pop_due(&50).map(|entry| entry.key), Some("a"));
//! assert!(scheduler.is_empty());
//! ```
//!
//! # Cargo features
//!
//! - `serde`: `Serialize`/`Deserialize` for [`scheduler::Entry`]

pub mod compare;
pub mod indexed;
pub mod merge;
pub mod scheduler;
pub mod simple_binary;
pub mod traits;

// Re-export the main types for convenience
pub use indexed::{EntryId, IndexedHeap};
pub use scheduler::{Entry, Scheduler};
pub use traits::{Heap, HeapError};
