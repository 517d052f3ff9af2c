//! Concurrency tests for reactkit-atomic.
//!
//! A producer thread stands in for the interrupt handler; the test thread
//! plays the dispatch loop.

use std::sync::Arc;
use std::thread;

use reactkit_atomic::{DispatchCounters, InterruptLine};

#[test]
fn test_edges_from_interrupt_thread_are_all_counted() {
    let line = Arc::new(InterruptLine::new());
    let edges: u32 = 10_000;

    let producer = {
        let line = Arc::clone(&line);
        thread::spawn(move || {
            for _ in 0..edges {
                line.signal();
            }
        })
    };

    let mut observed_pending = 0u32;
    while !producer.is_finished() {
        if line.take_pending() {
            observed_pending += 1;
        }
    }
    assert!(producer.join().is_ok(), "producer panicked unexpectedly");
    if line.take_pending() {
        observed_pending += 1;
    }

    assert_eq!(line.edges(), edges);
    assert!(observed_pending >= 1);
    assert!(observed_pending <= edges);
    assert!(!line.is_pending());
}

#[test]
fn test_concurrent_counter_increments() {
    let counters = Arc::new(DispatchCounters::new());
    let threads: u64 = 4;
    let per_thread: u64 = 5_000;

    let handles: Vec<_> = (0..threads)
        .map(|_| {
            let counters = Arc::clone(&counters);
            thread::spawn(move || {
                for i in 0..per_thread {
                    counters.inc_pass();
                    counters.record_lateness_ms(i);
                }
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.join().is_ok(), "thread panicked unexpectedly");
    }

    let snapshot = counters.snapshot();
    assert_eq!(snapshot.passes, threads * per_thread);
    assert_eq!(snapshot.max_lateness_ms, per_thread - 1);
}
