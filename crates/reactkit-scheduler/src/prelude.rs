//! Everything a sketch needs in one import.
//!
//! ```
//! use reactkit_scheduler::prelude::*;
//! ```

pub use crate::app::Application;
pub use crate::config::{SchedulerConfig, SchedulerConfigBuilder};
pub use crate::handle::{ReactionHandle, ReactionKind, StoreClass};
pub use crate::reaction::Callback;
pub use crate::reactor::Reactor;
pub use reactkit_atomic::CounterSnapshot;
pub use reactkit_errors::{ReactkitError, SchedError, SchedResult};
pub use reactkit_hal::{
    BufferedSource, ByteSource, Clock, DigitalIo, EdgeMode, InterruptController, Level,
    ManualClock, Pin, SharedSource, SoftwareInterrupts, SoftwarePins, SystemClock,
};
