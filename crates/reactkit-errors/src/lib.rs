//! Centralized error types for reactkit
//!
//! This crate provides the error vocabulary shared by every reactkit crate.
//! Errors raised on the dispatch path are small `Copy` codes; errors raised
//! while configuring the system may carry owned context.
//!
//! # Architecture
//!
//! - [`common`]: Top-level error type, categories and severities
//! - [`sched`]: Scheduler errors returned by registration calls
//! - [`hal`]: Hardware boundary errors reported by platform implementations
//! - [`validation`]: Configuration validation errors
//!
//! # Example
//!
//! ```
//! use reactkit_errors::prelude::*;
//!
//! fn check_vectors(count: usize) -> Result<usize> {
//!     if !(1..=16).contains(&count) {
//!         return Err(ValidationError::out_of_range("interrupt_vectors", count, 1, 16).into());
//!     }
//!     Ok(count)
//! }
//!
//! assert!(check_vectors(8).is_ok());
//! assert!(check_vectors(0).is_err());
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![warn(missing_docs, rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_cfg))]

extern crate alloc;

pub mod common;
pub mod hal;
pub mod prelude;
pub mod sched;
pub mod validation;

pub use common::{ErrorCategory, ErrorSeverity, ReactkitError};
pub use hal::HalError;
pub use sched::SchedError;
pub use validation::ValidationError;

/// A specialized `Result` type for reactkit operations.
pub type Result<T> = core::result::Result<T, ReactkitError>;

/// A specialized `Result` type for scheduler registration calls.
pub type SchedResult<T = ()> = core::result::Result<T, SchedError>;

/// A specialized `Result` type for hardware boundary calls.
pub type HalResult<T = ()> = core::result::Result<T, HalError>;
