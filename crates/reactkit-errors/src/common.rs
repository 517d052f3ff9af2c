//! Top-level error type and classification shared by all reactkit crates.

use alloc::string::String;
use core::fmt;

use crate::{HalError, SchedError, ValidationError};

/// Top-level error type wrapping every reactkit sub-error.
#[derive(Debug, thiserror::Error)]
pub enum ReactkitError {
    /// Scheduler registration errors
    #[error("Scheduler error: {0}")]
    Sched(#[from] SchedError),

    /// Hardware boundary errors
    #[error("Hardware error: {0}")]
    Hal(#[from] HalError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ReactkitError {
    /// Get the error category for classification.
    pub fn category(&self) -> ErrorCategory {
        match self {
            ReactkitError::Sched(_) => ErrorCategory::Scheduler,
            ReactkitError::Hal(_) => ErrorCategory::Hardware,
            ReactkitError::Validation(_) => ErrorCategory::Validation,
            ReactkitError::Config(_) => ErrorCategory::Config,
        }
    }

    /// Get the error severity level.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ReactkitError::Sched(e) => e.severity(),
            ReactkitError::Hal(e) => e.severity(),
            ReactkitError::Validation(e) => e.severity(),
            ReactkitError::Config(_) => ErrorSeverity::Error,
        }
    }

    /// Check if this error is recoverable.
    pub fn is_recoverable(&self) -> bool {
        self.severity() < ErrorSeverity::Critical
    }

    /// Create a configuration error with a message.
    pub fn config(msg: impl Into<String>) -> Self {
        ReactkitError::Config(msg.into())
    }
}

/// Error category for classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ErrorCategory {
    /// Scheduler errors
    Scheduler = 0,
    /// Hardware errors
    Hardware = 1,
    /// Configuration errors
    Config = 2,
    /// Validation errors
    Validation = 3,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCategory::Scheduler => write!(f, "Scheduler"),
            ErrorCategory::Hardware => write!(f, "Hardware"),
            ErrorCategory::Config => write!(f, "Config"),
            ErrorCategory::Validation => write!(f, "Validation"),
        }
    }
}

/// Error severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum ErrorSeverity {
    /// Informational, no action required
    Info = 0,
    /// Warning, may require attention
    Warning = 1,
    /// Error, operation failed
    Error = 2,
    /// Critical, system may be in unstable state
    Critical = 3,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
