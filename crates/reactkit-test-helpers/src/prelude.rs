//! Convenience re-exports for common test utilities.
//!
//! ```rust,ignore
//! use reactkit_test_helpers::prelude::*;
//! ```

pub use crate::counter::{CallCounter, EventLog};
pub use crate::logging::init_test_logging;
pub use crate::must::{must, must_err, must_some, must_with};

#[cfg(feature = "tracking")]
pub use crate::tracking::{AllocationGuard, TrackingAllocator, track};

#[cfg(feature = "fixtures")]
pub use crate::fixtures::SimRig;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;
