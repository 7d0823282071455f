//! Prints queued values in key order
//!
//! ```bash
//! RUST_LOG=trace cargo run --example simple
//! ```

use balanced_min_heap::LockingMinHeap;

fn main() {
    simple_logger::init_with_env().unwrap_or_else(|e| eprintln!("logger not installed: {}", e));

    // The capacity hint is optional; with it, no allocation happens until
    // more than `INITIAL_SIZE` items are queued.
    const INITIAL_SIZE: usize = 1_000_000;
    let queue = LockingMinHeap::with_capacity(INITIAL_SIZE);

    queue.push(13, "thirteen");
    queue.push(42, "forty-two");
    queue.push(8, "eight");

    while let Some(value) = queue.pop() {
        println!("{}", value);
    }
}
