//! Prelude module for convenient error handling imports.
//!
//! ```
//! use reactkit_errors::prelude::*;
//!
//! fn reserve(free: usize) -> SchedResult<usize> {
//!     if free == 0 {
//!         return Err(SchedError::CapacityExhausted);
//!     }
//!     Ok(free - 1)
//! }
//!
//! assert_eq!(reserve(0), Err(SchedError::CapacityExhausted));
//! ```

pub use crate::{
    HalResult, Result, SchedResult,
    common::{ErrorCategory, ErrorSeverity, ReactkitError},
    hal::HalError,
    sched::SchedError,
    validation::ValidationError,
};

/// Return early with an out-of-range validation error.
#[macro_export]
macro_rules! validate_range {
    ($field:expr, $value:expr, $min:expr, $max:expr) => {
        if $value < $min || $value > $max {
            return Err($crate::ValidationError::out_of_range($field, $value, $min, $max).into());
        }
    };
}
