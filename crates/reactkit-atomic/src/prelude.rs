//! Prelude for reactkit-atomic.
//!
//! ```rust
//! use reactkit_atomic::prelude::*;
//!
//! let line = InterruptLine::new();
//! line.signal();
//! assert!(line.take_pending());
//! ```

pub use crate::counters::{CounterSnapshot, DispatchCounters};
pub use crate::flags::{EdgeCounter, InterruptLine, PendingFlag};
