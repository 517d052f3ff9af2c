//! Cooperative reaction scheduler for single-threaded embedded main loops.
//!
//! Instead of hand-writing a super-loop that polls timers, serial ports and
//! pin flags, a program registers *reactions* and lets a [`Reactor`] decide
//! which ones to run on each pass:
//!
//! - **Delayed**: once, after an interval
//! - **Repeating**: every interval, measured from the previous fire
//! - **Stream**: whenever a byte source has data
//! - **Tick**: on every pass
//! - **Interrupt**: on the pass after an edge on a pin
//!
//! # Execution model
//!
//! Everything runs on one thread. Interrupt handlers only set a flag on an
//! [`InterruptLine`](reactkit_atomic::InterruptLine); the callback runs later,
//! inline, on the main loop. Callbacks receive `&mut Reactor` and may
//! register or cancel reactions freely.
//!
//! # Resource model
//!
//! - **No allocation per pass**: every table is sized by
//!   [`SchedulerConfig`] and allocated in [`Reactor::new`]
//! - **Bounded registration**: a full table or an empty interrupt vector
//!   pool is an `Err`, never a panic or a resize
//! - **Stale handles are harmless**: cancelling twice or cancelling a fired
//!   delay returns `false`
//!
//! # Example
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! use reactkit_scheduler::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let clock = ManualClock::new(0);
//! let irq = SoftwareInterrupts::new();
//! let reactor = Reactor::new(SchedulerConfig::default(), clock.clone(), irq.clone())?;
//!
//! let presses = Rc::new(Cell::new(0));
//! let seen = Rc::clone(&presses);
//! let mut app = Application::new(reactor, move |r| {
//!     let _ = r.register_on_falling(Pin::new(2), move |_| seen.set(seen.get() + 1));
//! });
//!
//! app.setup();
//! irq.raise(Pin::new(2));
//! app.step();
//! app.step();
//! assert_eq!(presses.get(), 1);
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]
#![deny(static_mut_refs)]
#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod handle;
pub mod reaction;
pub mod reactor;
pub mod slots;
pub mod timed;
pub mod vectors;

pub mod prelude;

pub use app::Application;
pub use config::{MAX_CAPACITY, MAX_INTERRUPT_VECTORS, SchedulerConfig, SchedulerConfigBuilder};
pub use handle::{ReactionHandle, ReactionKind, SlotKey, StoreClass};
pub use reaction::Callback;
pub use reactor::Reactor;
pub use reactkit_errors::{SchedError, SchedResult};
