//! Shared test utilities for reactkit.
//!
//! # Modules
//!
//! - [`mod@must`] - Unwrap helpers with good error messages and `#[track_caller]`
//! - [`counter`] - Callbacks that count or log their calls
//! - [`fixtures`] - `SimRig`, a reactor wired to a manual clock and software interrupts
//! - [`tracking`] - Allocation tracking for "the dispatch pass never allocates" tests
//! - [`logging`] - One-line `tracing` setup for tests
//! - [`prelude`] - Convenience re-exports
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! reactkit-test-helpers = { path = "crates/reactkit-test-helpers" }
//! ```
//!
//! ```rust,ignore
//! use reactkit_test_helpers::prelude::*;
//! ```

#![deny(unsafe_op_in_unsafe_fn)]
#![allow(
    clippy::unwrap_used,
    clippy::panic,
    reason = "test helpers panic to fail the calling test"
)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod counter;
pub mod logging;
pub mod must;
pub mod prelude;

#[cfg(feature = "tracking")]
#[cfg_attr(docsrs, doc(cfg(feature = "tracking")))]
pub mod tracking;

#[cfg(all(test, feature = "tracking"))]
#[global_allocator]
static GLOBAL_TEST: tracking::TrackingAllocator = tracking::TrackingAllocator;

#[cfg(feature = "fixtures")]
#[cfg_attr(docsrs, doc(cfg(feature = "fixtures")))]
pub mod fixtures;

pub use counter::{CallCounter, EventLog};
pub use logging::init_test_logging;
pub use must::*;

#[cfg(feature = "tracking")]
pub use tracking::track;
