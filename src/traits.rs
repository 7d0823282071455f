//! Common traits for the heap containers
//!
//! Both [`MinHeap`](crate::min_heap::MinHeap) and
//! [`LockingMinHeap`](crate::locking::LockingMinHeap) implement [`Heap`], so
//! code that only needs exclusive access can be written once against the trait.
//!
//! Keys are always `i64`; the stored item type `T` is opaque to the heap and is
//! never compared or inspected. To get max-heap behavior, negate the keys.

use std::fmt;

/// Error type for heap operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeapError {
    /// A [`LockingMinHeap`](crate::locking::LockingMinHeap) was called again
    /// from inside one of its own update callbacks on the same thread
    ReentrantCall,
}

impl fmt::Display for HeapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeapError::ReentrantCall => {
                write!(f, "heap re-entered from inside its own update callback")
            }
        }
    }
}

impl std::error::Error for HeapError {}

/// Base trait for min-heaps keyed by `i64`
///
/// The API mirrors `BinaryHeap` where it can: `push` inserts, `pop` removes
/// the minimum. Items with equal keys come out in no particular order.
///
/// # Example
///
/// ```rust
/// use balanced_min_heap::Heap;
/// use balanced_min_heap::min_heap::MinHeap;
///
/// let mut heap = MinHeap::new();
/// heap.push(13, "thirteen");
/// heap.push(42, "forty-two");
/// heap.push(8, "eight");
///
/// assert_eq!(heap.pop(), Some("eight"));
/// assert_eq!(heap.pop(), Some("thirteen"));
/// assert_eq!(heap.pop(), Some("forty-two"));
/// assert_eq!(heap.pop(), None);
/// ```
pub trait Heap<T> {
    /// Creates a new empty heap without reserving storage
    fn new() -> Self;

    /// Creates a new empty heap that can hold `capacity` items before it
    /// needs to reallocate
    ///
    /// A capacity of zero is the same as [`Heap::new`].
    fn with_capacity(capacity: usize) -> Self;

    /// Returns the number of items in the heap
    fn len(&self) -> usize;

    /// Returns true if the heap is empty
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Inserts an item with the given key
    ///
    /// # Time Complexity
    /// O(log n)
    fn push(&mut self, key: i64, item: T);

    /// Removes and returns the item with the smallest key
    ///
    /// Returns `None` and leaves the heap untouched when it is empty.
    ///
    /// # Time Complexity
    /// O(log n), at most two passes over the height of the tree.
    fn pop(&mut self) -> Option<T> {
        self.pop_entry().map(|(_, item)| item)
    }

    /// Removes and returns the smallest key together with its item
    fn pop_entry(&mut self) -> Option<(i64, T)>;

    /// Finds the item stored under `key` and replaces it with the value
    /// returned by `update`
    ///
    /// `update` receives `Some(&mut current)` when the key is present and
    /// `None` when it is not; in the latter case a new item is inserted under
    /// `key`. Whatever `update` returns replaces the stored item, so the
    /// previous item can be moved out with `std::mem::take` or
    /// `std::mem::replace` and reused. Returns whether the key already existed.
    ///
    /// When several items share `key`, only the first one met by a
    /// breadth-first walk from the root is updated.
    ///
    /// # Time Complexity
    /// O(n) worst case; subtrees whose root key is not below `key` are skipped.
    fn find_or_update<F>(&mut self, key: i64, update: F) -> bool
    where
        F: FnOnce(Option<&mut T>) -> T;
}
