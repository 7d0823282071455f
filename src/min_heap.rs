//! Array-backed binary min-heap
//!
//! Items live in a `Vec` laid out as a complete binary tree: the children of
//! index `i` sit at `2i + 1` and `2i + 2`, its parent at `(i - 1) / 2`.
//!
//! Removal does not use the usual "move the last item to the root and sift it
//! down" step. Instead the hole left by the root is walked down along the
//! smaller child, preferring the right child on ties, until it reaches a leaf.
//! The last item is then moved into that leaf and sifted up. Preferring the
//! right child makes the right side of the tree erode first under repeated
//! removals, which keeps the tree left-leaning.
//!
//! # Time Complexity
//!
//! | Operation        | Best case | Worst case |
//! |------------------|-----------|------------|
//! | `push`           | O(1)      | O(log n)   |
//! | `pop`            | O(log n)  | O(2 log n) |
//! | `peek`           | O(1)      | O(1)       |
//! | `find_or_update` | O(1)      | O(n)       |
//!
//! # Example
//!
//! ```rust
//! use balanced_min_heap::Heap;
//! use balanced_min_heap::min_heap::MinHeap;
//!
//! let mut heap = MinHeap::with_capacity(4);
//! heap.push(42, "42");
//! heap.push(13, "13");
//! heap.push(8, "8");
//! heap.push(23, "23");
//!
//! let existed = heap.find_or_update(8, |previous| {
//!     assert_eq!(previous.map(|item| *item), Some("8"));
//!     "*8*"
//! });
//! assert!(existed);
//!
//! assert_eq!(heap.peek(), Some((8, &"*8*")));
//! assert_eq!(heap.pop(), Some("*8*"));
//! assert_eq!(heap.pop(), Some("13"));
//! ```

use std::collections::VecDeque;

use log::{debug, trace};

use crate::traits::Heap;

#[derive(Debug, Clone)]
struct Node<T> {
    key: i64,
    item: T,
}

/// A binary min-heap of `(i64, T)` pairs
///
/// Not synchronized; wrap it in a
/// [`LockingMinHeap`](crate::locking::LockingMinHeap) to share it between
/// threads.
#[derive(Debug, Clone)]
pub struct MinHeap<T> {
    nodes: Vec<Node<T>>,
}

impl<T> Heap<T> for MinHeap<T> {
    fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    fn with_capacity(capacity: usize) -> Self {
        if capacity > 0 {
            trace!("reserving storage for {} heap nodes", capacity);
        }
        Self {
            nodes: Vec::with_capacity(capacity),
        }
    }

    fn len(&self) -> usize {
        self.nodes.len()
    }

    fn push(&mut self, key: i64, item: T) {
        self.append(key, item);
    }

    fn pop_entry(&mut self) -> Option<(i64, T)> {
        if self.nodes.is_empty() {
            return None;
        }
        let last = self.nodes.len() - 1;

        let hole = self.sift_hole_down();
        if hole < last {
            // Backfill the hole with the final node, then restore order above it.
            self.nodes.swap(hole, last);
            self.sift_up(hole);
        }

        self.nodes.pop().map(|node| (node.key, node.item))
    }

    fn find_or_update<F>(&mut self, key: i64, update: F) -> bool
    where
        F: FnOnce(Option<&mut T>) -> T,
    {
        match self.search(key) {
            Some(index) => {
                let item = update(Some(&mut self.nodes[index].item));
                self.nodes[index].item = item;
                true
            }
            None => {
                let item = update(None);
                self.append(key, item);
                false
            }
        }
    }
}

impl<T> MinHeap<T> {
    /// Returns the smallest key and its item without removing them
    pub fn peek(&self) -> Option<(i64, &T)> {
        self.nodes.first().map(|node| (node.key, &node.item))
    }

    /// Returns how many items the heap can hold without reallocating
    pub fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    /// Removes every item, keeping the allocated storage
    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    /// Checks that every node's key is no smaller than its parent's key
    pub fn verify_heap_property(&self) -> bool {
        (1..self.nodes.len()).all(|i| self.nodes[(i - 1) / 2].key <= self.nodes[i].key)
    }

    fn append(&mut self, key: i64, item: T) {
        if self.nodes.len() == self.nodes.capacity() && self.nodes.capacity() > 0 {
            debug!(
                "heap storage full at {} nodes, reallocating",
                self.nodes.capacity()
            );
        }
        self.nodes.push(Node { key, item });
        self.sift_up(self.nodes.len() - 1);
    }

    /// Moves the node at `index` towards the root while its parent's key is
    /// strictly greater
    fn sift_up(&mut self, mut index: usize) {
        let key = self.nodes[index].key;
        while index > 0 {
            let parent = (index - 1) / 2;
            if self.nodes[parent].key <= key {
                break;
            }
            self.nodes.swap(index, parent);
            index = parent;
        }
    }

    /// Walks the root down to a leaf, promoting the smaller child at each
    /// level, and returns the leaf index where the old root ends up
    ///
    /// The right child wins ties so the right subtree empties first.
    fn sift_hole_down(&mut self) -> usize {
        let len = self.nodes.len();
        let mut index = 0;
        loop {
            let left = 2 * index + 1;
            if left >= len {
                return index;
            }
            let right = left + 1;
            let child = if right < len && self.nodes[right].key <= self.nodes[left].key {
                right
            } else {
                left
            };
            self.nodes.swap(index, child);
            index = child;
        }
    }

    /// Breadth-first search from the root for the first node holding `key`
    ///
    /// Children are only queued below nodes whose key is strictly smaller
    /// than `key`; anything under a larger key cannot match.
    fn search(&self, key: i64) -> Option<usize> {
        let len = self.nodes.len();
        if len == 0 {
            return None;
        }

        let mut queue = VecDeque::new();
        queue.push_back(0);
        while let Some(index) = queue.pop_front() {
            let current = self.nodes[index].key;
            if current == key {
                return Some(index);
            }
            if current < key {
                let left = 2 * index + 1;
                if left < len {
                    queue.push_back(left);
                    if left + 1 < len {
                        queue.push_back(left + 1);
                    }
                }
            }
        }
        None
    }
}

impl<T> Default for MinHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Extend<(i64, T)> for MinHeap<T> {
    fn extend<I: IntoIterator<Item = (i64, T)>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.nodes.reserve(iter.size_hint().0);
        for (key, item) in iter {
            self.append(key, item);
        }
    }
}

impl<T> FromIterator<(i64, T)> for MinHeap<T> {
    fn from_iter<I: IntoIterator<Item = (i64, T)>>(iter: I) -> Self {
        let mut heap = Self::new();
        heap.extend(iter);
        heap
    }
}
