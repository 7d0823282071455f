//! Balanced binary min-heap for Rust
//!
//! This crate provides an array-backed binary min-heap keyed by `i64`, in a
//! single-threaded form and a mutex-guarded form that can be shared between
//! threads.
//!
//! # Features
//!
//! - **[`MinHeap`]**: O(log n) insert and O(2 log n) worst-case remove-min. Removal walks the
//!   hole left by the root down to a leaf and backfills it from the end of the array, preferring
//!   the right child on ties so the tree stays left-leaning.
//! - **[`LockingMinHeap`]**: the same operations behind a `parking_lot::Mutex`, usable from many
//!   threads through a shared reference. Re-entry from an update callback is detected instead of
//!   deadlocking.
//! - **`find_or_update`**: look up an item by key, replace it with a new value computed from the
//!   old one, or insert it when the key is missing.
//!
//! Items with equal keys are allowed and come out in no particular order. For a
//! max-heap, negate the keys.
//!
//! # Example
//!
//! ```rust
//! use balanced_min_heap::{Heap, LockingMinHeap, MinHeap};
//!
//! let mut heap = MinHeap::new();
//! heap.push(13, "thirteen");
//! heap.push(42, "forty-two");
//! heap.push(8, "eight");
//! assert_eq!(heap.pop(), Some("eight"));
//!
//! let shared = LockingMinHeap::from(heap);
//! assert!(shared.find_or_update(42, |previous| {
//!     assert_eq!(previous.map(|item| *item), Some("forty-two"));
//!     "42"
//! }));
//! assert_eq!(shared.pop(), Some("thirteen"));
//! assert_eq!(shared.pop(), Some("42"));
//! assert_eq!(shared.pop(), None);
//! ```

pub mod locking;
pub mod min_heap;
pub mod traits;

// Re-export the main types for convenience
pub use locking::LockingMinHeap;
pub use min_heap::MinHeap;
pub use traits::{Heap, HeapError};
