//! Scheduler error codes.
//!
//! These are returned synchronously by registration calls. They are `Copy`
//! and carry a fixed numeric code so they can be reported from the dispatch
//! path without allocating.

use core::fmt;

use crate::common::ErrorSeverity;

/// Scheduler error codes.
///
/// # Examples
///
/// ```
/// use reactkit_errors::{ErrorSeverity, SchedError};
///
/// let err = SchedError::ResourceExhausted;
/// assert_eq!(err.code(), 2);
/// assert_eq!(err.severity(), ErrorSeverity::Warning);
/// assert!(err.is_recoverable());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum SchedError {
    /// The slot table or the timed queue is full
    CapacityExhausted = 1,
    /// No free hardware interrupt vector
    ResourceExhausted = 2,
    /// Handle does not refer to a live reaction
    InvalidHandle = 3,
    /// The pin already has an interrupt vector bound to it
    PinInUse = 4,
    /// The hardware layer refused to attach the interrupt
    AttachFailed = 5,
}

impl SchedError {
    /// Get the numeric error code.
    ///
    /// ```
    /// use reactkit_errors::SchedError;
    ///
    /// assert_eq!(SchedError::CapacityExhausted.code(), 1);
    /// assert_eq!(SchedError::AttachFailed.code(), 5);
    /// ```
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Create an error from a code, `None` for unknown codes.
    ///
    /// ```
    /// use reactkit_errors::SchedError;
    ///
    /// assert_eq!(SchedError::from_code(4), Some(SchedError::PinInUse));
    /// assert_eq!(SchedError::from_code(0), None);
    /// ```
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(SchedError::CapacityExhausted),
            2 => Some(SchedError::ResourceExhausted),
            3 => Some(SchedError::InvalidHandle),
            4 => Some(SchedError::PinInUse),
            5 => Some(SchedError::AttachFailed),
            _ => None,
        }
    }

    /// Get the error severity.
    pub fn severity(self) -> ErrorSeverity {
        match self {
            SchedError::CapacityExhausted => ErrorSeverity::Warning,
            SchedError::ResourceExhausted => ErrorSeverity::Warning,
            SchedError::InvalidHandle => ErrorSeverity::Info,
            SchedError::PinInUse => ErrorSeverity::Error,
            SchedError::AttachFailed => ErrorSeverity::Error,
        }
    }

    /// Whether the caller can reasonably retry after freeing resources.
    pub fn is_recoverable(self) -> bool {
        matches!(
            self,
            SchedError::CapacityExhausted
                | SchedError::ResourceExhausted
                | SchedError::InvalidHandle
        )
    }
}

impl fmt::Display for SchedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchedError::CapacityExhausted => write!(f, "Reaction capacity exhausted"),
            SchedError::ResourceExhausted => write!(f, "No free interrupt vector"),
            SchedError::InvalidHandle => write!(f, "Invalid reaction handle"),
            SchedError::PinInUse => write!(f, "Pin already has an interrupt bound"),
            SchedError::AttachFailed => write!(f, "Hardware interrupt attach failed"),
        }
    }
}

impl core::error::Error for SchedError {}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_sched_error_codes() {
        assert_eq!(SchedError::CapacityExhausted.code(), 1);
        assert_eq!(SchedError::ResourceExhausted.code(), 2);
        assert_eq!(SchedError::InvalidHandle.code(), 3);
    }

    #[test]
    fn test_sched_error_from_code() {
        assert_eq!(SchedError::from_code(1), Some(SchedError::CapacityExhausted));
        assert_eq!(SchedError::from_code(255), None);
    }

    #[test]
    fn test_sched_error_recoverable() {
        assert!(SchedError::ResourceExhausted.is_recoverable());
        assert!(!SchedError::AttachFailed.is_recoverable());
    }

    #[test]
    fn test_sched_error_display() {
        assert_eq!(
            SchedError::CapacityExhausted.to_string(),
            "Reaction capacity exhausted"
        );
    }

    #[test]
    fn test_sched_error_copy() {
        fn assert_copy<T: Copy>() {}
        assert_copy::<SchedError>();
    }
}
