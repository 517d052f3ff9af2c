//! # reactkit-atomic
//!
//! Interrupt-safe primitives shared between an interrupt handler and the
//! reactkit dispatch loop.
//!
//! An interrupt handler may run between any two instructions of the main
//! loop. The only state it is allowed to touch lives in this crate: a pending
//! flag and a free-running edge counter per interrupt vector. Everything else
//! (slot tables, queues) is mutated by the dispatch loop alone.
//!
//! ## Guarantees
//!
//! - **No heap allocations**
//! - **No blocking operations**, every method is a single atomic instruction
//!   or a short fixed sequence of them
//! - Works on targets without native read-modify-write atomics through
//!   `portable-atomic`
//!
//! ## Modules
//!
//! - [`flags`] - Pending flag, edge counter and the per-vector interrupt line
//! - [`counters`] - Dispatch counters and their snapshot
//!
//! ## Usage
//!
//! ```rust
//! use reactkit_atomic::{DispatchCounters, InterruptLine};
//!
//! let line = InterruptLine::new();
//!
//! // Interrupt context: record the edge, nothing else
//! line.signal();
//!
//! // Dispatch loop: consume it exactly once
//! assert!(line.take_pending());
//! assert!(!line.take_pending());
//! assert_eq!(line.edges(), 1);
//!
//! let counters = DispatchCounters::new();
//! counters.inc_pass();
//! assert_eq!(counters.snapshot().passes, 1);
//! ```

#![no_std]
#![deny(
    unsafe_op_in_unsafe_fn,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    missing_debug_implementations
)]
#![warn(clippy::pedantic)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod counters;
pub mod flags;

pub mod prelude;

pub use counters::{CounterSnapshot, DispatchCounters};
pub use flags::{EdgeCounter, InterruptLine, PendingFlag};
