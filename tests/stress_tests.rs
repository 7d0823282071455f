//! Stress tests that push the heaps through large operation counts
//!
//! These tests perform large numbers of operations in various patterns
//! to catch edge cases and verify correctness under load.

use balanced_min_heap::{Heap, LockingMinHeap, MinHeap};

/// Test massive numbers of inserts and pops
fn test_massive_operations<H: Heap<i64>>() {
    let mut heap = H::new();

    for i in 0..10_000 {
        heap.push(i, i);
    }
    assert_eq!(heap.len(), 10_000);

    for i in 0..10_000 {
        assert_eq!(heap.pop_entry(), Some((i, i)));
    }
    assert!(heap.is_empty());
}

/// Test descending insertion, which sifts every push to the root
fn test_descending_insertion<H: Heap<i64>>() {
    let mut heap = H::with_capacity(5_000);

    for i in (0..5_000).rev() {
        heap.push(i, i);
    }
    for i in 0..5_000 {
        assert_eq!(heap.pop(), Some(i));
    }
    assert_eq!(heap.pop(), None);
}

/// Test alternating insert and pop
fn test_alternating_ops<H: Heap<i64>>() {
    let mut heap = H::new();

    for i in 0..2_000 {
        heap.push(i * 2, i);
        heap.push(i * 2 + 1, i + 10_000);

        // Pop one
        let popped = heap.pop();
        assert!(popped.is_some());
    }
    assert_eq!(heap.len(), 2_000);

    let mut last = i64::MIN;
    while let Some((key, _)) = heap.pop_entry() {
        assert!(key >= last);
        last = key;
    }
    assert!(heap.is_empty());
}

/// Test many items sharing a handful of keys
fn test_many_duplicates<H: Heap<usize>>() {
    let mut heap = H::new();

    for i in 0..3_000 {
        heap.push((i % 5) as i64, i);
    }

    let mut counts = [0usize; 5];
    let mut last = i64::MIN;
    while let Some((key, item)) = heap.pop_entry() {
        assert!(key >= last);
        assert_eq!(item % 5, key as usize);
        last = key;
        counts[key as usize] += 1;
    }
    assert_eq!(counts, [600; 5]);
}

/// Test many updates against a large heap
fn test_many_updates<H: Heap<i64>>() {
    let mut heap = H::new();

    for i in 0..1_000 {
        heap.push(i * 3, 0);
    }
    for i in 0..3_000 {
        let existed = heap.find_or_update(i, |previous| previous.map_or(-1, |v| *v + 1));
        assert_eq!(existed, i % 3 == 0);
    }
    assert_eq!(heap.len(), 3_000);

    for i in 0..3_000 {
        let expected = if i % 3 == 0 { 1 } else { -1 };
        assert_eq!(heap.pop_entry(), Some((i, expected)));
    }
}

/// Test the heap shrinking and regrowing repeatedly
fn test_grow_shrink_cycles<H: Heap<i64>>() {
    let mut heap = H::new();

    for round in 0..20 {
        for i in 0..(round * 50) {
            heap.push((i * 7919) % 1_009, i);
        }
        let mut last = i64::MIN;
        while let Some((key, _)) = heap.pop_entry() {
            assert!(key >= last);
            last = key;
        }
        assert!(heap.is_empty());
    }
}

#[test]
fn test_min_heap_massive() {
    test_massive_operations::<MinHeap<i64>>();
}

#[test]
fn test_locking_min_heap_massive() {
    test_massive_operations::<LockingMinHeap<i64>>();
}

#[test]
fn test_min_heap_descending() {
    test_descending_insertion::<MinHeap<i64>>();
}

#[test]
fn test_locking_min_heap_descending() {
    test_descending_insertion::<LockingMinHeap<i64>>();
}

#[test]
fn test_min_heap_alternating() {
    test_alternating_ops::<MinHeap<i64>>();
}

#[test]
fn test_locking_min_heap_alternating() {
    test_alternating_ops::<LockingMinHeap<i64>>();
}

#[test]
fn test_min_heap_duplicates() {
    test_many_duplicates::<MinHeap<usize>>();
}

#[test]
fn test_locking_min_heap_duplicates() {
    test_many_duplicates::<LockingMinHeap<usize>>();
}

#[test]
fn test_min_heap_updates() {
    test_many_updates::<MinHeap<i64>>();
}

#[test]
fn test_locking_min_heap_updates() {
    test_many_updates::<LockingMinHeap<i64>>();
}

#[test]
fn test_min_heap_grow_shrink() {
    test_grow_shrink_cycles::<MinHeap<i64>>();
}

#[test]
fn test_locking_min_heap_grow_shrink() {
    test_grow_shrink_cycles::<LockingMinHeap<i64>>();
}

#[test]
fn test_min_heap_stays_valid_under_mixed_load() {
    let mut heap = MinHeap::new();
    let mut state = 42u64;

    for step in 0..20_000u32 {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
        let key = ((state >> 40) % 500) as i64;
        match step % 5 {
            0 | 1 | 2 => heap.push(key, step),
            3 => {
                heap.pop();
            }
            _ => {
                heap.find_or_update(key, |previous| previous.copied().unwrap_or(step));
            }
        }
        if step % 1_000 == 0 {
            assert!(heap.verify_heap_property());
        }
    }
    assert!(heap.verify_heap_property());
}
