//! Convenience re-exports for platform and test code.
//!
//! ```rust
//! use reactkit_hal::prelude::*;
//! ```

pub use crate::clock::Clock;
#[cfg(feature = "std")]
pub use crate::clock::SystemClock;
pub use crate::interrupt::{EdgeTrigger, InterruptController};
pub use crate::io::{ByteSource, DigitalIo, SharedSource};
pub use crate::software_impl::{
    BufferedSource, HalEvent, ManualClock, SoftwareInterrupts, SoftwarePins,
};
pub use crate::types::{Edge, EdgeMode, Level, Pin, VectorId};
pub use reactkit_errors::{HalError, HalResult};
