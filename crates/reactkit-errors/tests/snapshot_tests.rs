//! Snapshot tests for error message formatting.
//!
//! Messages end up in field logs, so their wording is pinned here.

use insta::assert_snapshot;
use reactkit_errors::{HalError, ReactkitError, SchedError, ValidationError};

#[test]
fn test_capacity_exhausted() {
    assert_snapshot!(SchedError::CapacityExhausted.to_string(), @"Reaction capacity exhausted");
}

#[test]
fn test_resource_exhausted() {
    assert_snapshot!(SchedError::ResourceExhausted.to_string(), @"No free interrupt vector");
}

#[test]
fn test_pin_in_use() {
    assert_snapshot!(SchedError::PinInUse.to_string(), @"Pin already has an interrupt bound");
}

#[test]
fn test_unsupported_mode() {
    let err = HalError::UnsupportedMode { pin: 4, mode: "rising" };
    assert_snapshot!(err.to_string(), @"Pin 4 does not support rising edge detection");
}

#[test]
fn test_out_of_range() {
    let err = ValidationError::out_of_range("interrupt_vectors", 32usize, 1, 16);
    assert_snapshot!(err.to_string(), @"interrupt_vectors value 32 is out of range [1, 16]");
}

#[test]
fn test_wrapped_hal_error() {
    let err: ReactkitError = HalError::Busy(7).into();
    assert_snapshot!(err.to_string(), @"Hardware error: Pin 7 is busy");
}
