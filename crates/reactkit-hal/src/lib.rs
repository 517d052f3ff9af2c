//! # reactkit-hal
//!
//! The hardware boundary of the reactkit scheduler.
//!
//! The scheduler never talks to registers. It consumes four capabilities
//! through the traits in this crate:
//!
//! - [`Clock`] - a monotonic millisecond counter that wraps at `u32::MAX`
//! - [`DigitalIo`] - read and write a pin's logic level
//! - [`InterruptController`] - attach and detach an edge interrupt on a pin
//! - [`ByteSource`] - "bytes available" and "read a byte" on an input stream
//!
//! A board support crate implements them for real peripherals. The
//! [`software_impl`] module implements them in memory so the scheduler can
//! run on a host and in tests.
//!
//! ## Interrupt context
//!
//! [`InterruptController::attach`] receives an [`EdgeTrigger`]. The platform
//! stores it in its vector table and calls [`EdgeTrigger::fire`] from the
//! interrupt handler. `fire` only touches an [`InterruptLine`]
//! (a counter and a pending flag); it never calls application code.
//!
//! ## Example
//!
//! ```rust
//! use reactkit_hal::prelude::*;
//!
//! let clock = ManualClock::new(0);
//! clock.advance(25);
//! assert_eq!(clock.now_ms(), 25);
//!
//! let mut pins = SoftwarePins::new();
//! pins.set_level(Pin::new(2), Level::High);
//! assert_eq!(pins.level(Pin::new(2)), Level::High);
//! ```
//!
//! [`InterruptLine`]: reactkit_atomic::InterruptLine

#![no_std]
#![deny(
    unsafe_op_in_unsafe_fn,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    missing_debug_implementations
)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

pub mod clock;
pub mod interrupt;
pub mod io;
pub mod prelude;
pub mod software_impl;
pub mod types;

pub use clock::Clock;
#[cfg(feature = "std")]
pub use clock::SystemClock;
pub use interrupt::{EdgeTrigger, InterruptController};
pub use io::{ByteSource, DigitalIo, SharedSource};
pub use reactkit_errors::{HalError, HalResult};
pub use software_impl::{BufferedSource, HalEvent, ManualClock, SoftwareInterrupts, SoftwarePins};
pub use types::{Edge, EdgeMode, Level, Pin, VectorId};
