//! Thread-safe wrapper around [`MinHeap`]
//!
//! [`LockingMinHeap`] owns one [`MinHeap`] behind a `parking_lot::Mutex`.
//! Every method takes the lock, runs the matching `MinHeap` operation to
//! completion and releases the lock on the way out, so concurrent callers see
//! the same results as some serial order of their calls.
//!
//! The update callback given to [`LockingMinHeap::find_or_update`] runs while
//! the lock is held. Calling back into the same heap from that callback would
//! deadlock; instead the re-entry is detected and reported as
//! [`HeapError::ReentrantCall`] by the `try_*` methods, or as a panic by the
//! plain ones.
//!
//! # Example
//!
//! ```rust
//! use balanced_min_heap::locking::LockingMinHeap;
//! use std::thread;
//!
//! let heap = LockingMinHeap::with_capacity(1_000);
//!
//! thread::scope(|s| {
//!     for t in 0..4 {
//!         let heap = &heap;
//!         s.spawn(move || {
//!             for i in 0..250 {
//!                 heap.push(i * 4 + t, i);
//!             }
//!         });
//!     }
//! });
//!
//! assert_eq!(heap.len(), 1_000);
//! assert_eq!(heap.peek_key(), Some(0));
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};

use log::warn;
use parking_lot::{Mutex, MutexGuard};

use crate::min_heap::MinHeap;
use crate::traits::{Heap, HeapError};

/// Identifies the calling thread by the address of a thread-local
///
/// Never zero, and unique among live threads.
fn thread_token() -> usize {
    thread_local! {
        static TOKEN: u8 = const { 0 };
    }
    TOKEN.with(|token| token as *const u8 as usize)
}

/// Marks the heap as held by the current thread until dropped
struct HeldBy<'a> {
    holder: &'a AtomicUsize,
}

impl<'a> HeldBy<'a> {
    fn enter(holder: &'a AtomicUsize, token: usize) -> Self {
        holder.store(token, Ordering::Relaxed);
        Self { holder }
    }
}

impl Drop for HeldBy<'_> {
    fn drop(&mut self) {
        self.holder.store(0, Ordering::Relaxed);
    }
}

/// A [`MinHeap`] guarded by a mutex
///
/// `LockingMinHeap<T>` is `Send + Sync` whenever `T: Send`, so it can be
/// shared by reference across scoped threads or placed in an `Arc`.
#[derive(Debug)]
pub struct LockingMinHeap<T> {
    heap: Mutex<MinHeap<T>>,
    /// Token of the thread currently holding `heap`, or zero
    holder: AtomicUsize,
}

impl<T> LockingMinHeap<T> {
    /// Creates a new empty heap without reserving storage
    pub fn new() -> Self {
        Self::from(MinHeap::new())
    }

    /// Creates a new empty heap that can hold `capacity` items before it
    /// needs to reallocate
    pub fn with_capacity(capacity: usize) -> Self {
        Self::from(MinHeap::with_capacity(capacity))
    }

    /// Runs `op` on the inner heap with the lock held
    ///
    /// Fails instead of blocking when the current thread already holds the
    /// lock, which can only happen from inside an update callback.
    fn locked<R>(&self, op: impl FnOnce(&mut MinHeap<T>) -> R) -> Result<R, HeapError> {
        let token = thread_token();
        if self.holder.load(Ordering::Relaxed) == token {
            warn!("heap re-entered from its own update callback");
            return Err(HeapError::ReentrantCall);
        }

        let mut heap: MutexGuard<'_, MinHeap<T>> = self.heap.lock();
        let _held = HeldBy::enter(&self.holder, token);
        Ok(op(&mut *heap))
    }

    /// Like [`locked`](Self::locked), for the infallible public methods
    fn locked_or_panic<R>(&self, op: impl FnOnce(&mut MinHeap<T>) -> R) -> R {
        match self.locked(op) {
            Ok(result) => result,
            Err(err) => panic!("{}", err),
        }
    }

    /// Inserts an item with the given key
    ///
    /// # Panics
    /// Panics if called from inside this heap's own update callback.
    pub fn push(&self, key: i64, item: T) {
        self.locked_or_panic(|heap| heap.push(key, item))
    }

    /// Removes and returns the item with the smallest key
    ///
    /// # Panics
    /// Panics if called from inside this heap's own update callback.
    pub fn pop(&self) -> Option<T> {
        self.locked_or_panic(|heap| heap.pop())
    }

    /// Removes and returns the smallest key together with its item
    ///
    /// # Panics
    /// Panics if called from inside this heap's own update callback.
    pub fn pop_entry(&self) -> Option<(i64, T)> {
        self.locked_or_panic(|heap| heap.pop_entry())
    }

    /// Finds the item stored under `key` and replaces it with the value
    /// returned by `update`, inserting it when `key` is absent
    ///
    /// Returns whether the key already existed. See [`Heap::find_or_update`].
    /// `update` runs with the lock held and must not call back into this heap.
    ///
    /// # Panics
    /// Panics if called from inside this heap's own update callback, or if
    /// `update` itself calls back into this heap. The lock is released
    /// either way.
    pub fn find_or_update<F>(&self, key: i64, update: F) -> bool
    where
        F: FnOnce(Option<&mut T>) -> T,
    {
        self.locked_or_panic(|heap| heap.find_or_update(key, update))
    }

    /// Returns the number of items in the heap
    ///
    /// # Panics
    /// Panics if called from inside this heap's own update callback.
    pub fn len(&self) -> usize {
        self.locked_or_panic(|heap| heap.len())
    }

    /// Returns true if the heap is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the smallest key without removing it
    pub fn peek_key(&self) -> Option<i64> {
        self.locked_or_panic(|heap| heap.peek().map(|(key, _)| key))
    }

    /// Returns how many items the heap can hold without reallocating
    pub fn capacity(&self) -> usize {
        self.locked_or_panic(|heap| heap.capacity())
    }

    /// Removes every item, keeping the allocated storage
    pub fn clear(&self) {
        self.locked_or_panic(|heap| heap.clear())
    }

    /// Checks the heap property under the lock
    pub fn verify_heap_property(&self) -> bool {
        self.locked_or_panic(|heap| heap.verify_heap_property())
    }

    /// Fallible [`push`](Self::push)
    pub fn try_push(&self, key: i64, item: T) -> Result<(), HeapError> {
        self.locked(|heap| heap.push(key, item))
    }

    /// Fallible [`pop`](Self::pop)
    pub fn try_pop(&self) -> Result<Option<T>, HeapError> {
        self.locked(|heap| heap.pop())
    }

    /// Fallible [`find_or_update`](Self::find_or_update)
    ///
    /// Only re-entry detected on the way in is reported as an error; re-entry
    /// from inside `update` surfaces through `update`'s own calls.
    pub fn try_find_or_update<F>(&self, key: i64, update: F) -> Result<bool, HeapError>
    where
        F: FnOnce(Option<&mut T>) -> T,
    {
        self.locked(|heap| heap.find_or_update(key, update))
    }

    /// Fallible [`len`](Self::len)
    pub fn try_len(&self) -> Result<usize, HeapError> {
        self.locked(|heap| heap.len())
    }

    /// Returns a mutable reference to the inner heap
    ///
    /// No locking is needed since the borrow is exclusive.
    pub fn get_mut(&mut self) -> &mut MinHeap<T> {
        self.heap.get_mut()
    }

    /// Consumes the wrapper and returns the inner heap
    pub fn into_inner(self) -> MinHeap<T> {
        self.heap.into_inner()
    }
}

impl<T> From<MinHeap<T>> for LockingMinHeap<T> {
    fn from(heap: MinHeap<T>) -> Self {
        Self {
            heap: Mutex::new(heap),
            holder: AtomicUsize::new(0),
        }
    }
}

impl<T> Default for LockingMinHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Exclusive access goes straight to the inner heap without locking.
impl<T> Heap<T> for LockingMinHeap<T> {
    fn new() -> Self {
        Self::from(MinHeap::new())
    }

    fn with_capacity(capacity: usize) -> Self {
        Self::from(MinHeap::with_capacity(capacity))
    }

    fn len(&self) -> usize {
        self.locked_or_panic(|heap| heap.len())
    }

    fn push(&mut self, key: i64, item: T) {
        self.get_mut().push(key, item)
    }

    fn pop_entry(&mut self) -> Option<(i64, T)> {
        self.get_mut().pop_entry()
    }

    fn find_or_update<F>(&mut self, key: i64, update: F) -> bool
    where
        F: FnOnce(Option<&mut T>) -> T,
    {
        self.get_mut().find_or_update(key, update)
    }
}
