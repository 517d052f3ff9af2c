//! Hardware boundary errors.

use alloc::string::String;

use crate::common::ErrorSeverity;

/// Errors reported by a platform implementation of the hardware traits.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HalError {
    /// The pin cannot raise interrupts
    #[error("Pin {0} does not support interrupts")]
    UnsupportedPin(u8),

    /// The pin cannot detect the requested edge
    #[error("Pin {pin} does not support {mode} edge detection")]
    UnsupportedMode {
        /// Pin number
        pin: u8,
        /// Edge mode name
        mode: &'static str,
    },

    /// The peripheral is owned by someone else
    #[error("Pin {0} is busy")]
    Busy(u8),

    /// Other hardware failure
    #[error("Hardware error: {0}")]
    Hardware(String),
}

impl HalError {
    /// Get the error severity.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            HalError::UnsupportedPin(_) | HalError::UnsupportedMode { .. } => ErrorSeverity::Error,
            HalError::Busy(_) => ErrorSeverity::Warning,
            HalError::Hardware(_) => ErrorSeverity::Critical,
        }
    }

    /// Create a generic hardware error.
    pub fn hardware(msg: impl Into<String>) -> Self {
        HalError::Hardware(msg.into())
    }
}
