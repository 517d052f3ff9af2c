//! Unit tests for all error variants.
//!
//! Tests Display implementations, `Error` implementations and `From`
//! conversions.

use reactkit_errors::{
    ErrorCategory, ErrorSeverity, HalError, ReactkitError, Result, SchedError, ValidationError,
};

const ALL_SCHED: [SchedError; 5] = [
    SchedError::CapacityExhausted,
    SchedError::ResourceExhausted,
    SchedError::InvalidHandle,
    SchedError::PinInUse,
    SchedError::AttachFailed,
];

mod sched_error_tests {
    use super::*;

    #[test]
    fn test_all_variants_display() -> Result<()> {
        for variant in ALL_SCHED {
            assert!(
                !variant.to_string().is_empty(),
                "SchedError variant should have display message"
            );
        }
        Ok(())
    }

    #[test]
    fn test_codes_are_unique_and_stable() -> Result<()> {
        let codes: Vec<u8> = ALL_SCHED.iter().map(|e| e.code()).collect();
        assert_eq!(codes, vec![1, 2, 3, 4, 5]);
        Ok(())
    }

    #[test]
    fn test_invalid_handle_is_informational() -> Result<()> {
        assert_eq!(SchedError::InvalidHandle.severity(), ErrorSeverity::Info);
        Ok(())
    }

    #[test]
    fn test_std_error_impl() -> Result<()> {
        let err = SchedError::AttachFailed;
        let _: &dyn std::error::Error = &err;
        Ok(())
    }
}

mod conversion_tests {
    use super::*;

    #[test]
    fn test_from_sched() -> Result<()> {
        let err: ReactkitError = SchedError::ResourceExhausted.into();
        assert!(matches!(
            err,
            ReactkitError::Sched(SchedError::ResourceExhausted)
        ));
        Ok(())
    }

    #[test]
    fn test_from_hal() -> Result<()> {
        let err: ReactkitError = HalError::UnsupportedPin(9).into();
        assert_eq!(err.category(), ErrorCategory::Hardware);
        Ok(())
    }

    #[test]
    fn test_from_validation() -> Result<()> {
        let err: ReactkitError = ValidationError::constraint("zero vectors").into();
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert_eq!(err.severity(), ErrorSeverity::Error);
        Ok(())
    }

    #[test]
    fn test_question_mark_propagation() -> Result<()> {
        fn inner() -> core::result::Result<(), SchedError> {
            Err(SchedError::CapacityExhausted)
        }
        fn outer() -> Result<()> {
            inner()?;
            Ok(())
        }
        let err = match outer() {
            Ok(()) => return Err(ReactkitError::config("expected an error")),
            Err(e) => e,
        };
        assert_eq!(err.category(), ErrorCategory::Scheduler);
        Ok(())
    }
}

mod std_feature_tests {
    use super::*;

    #[test]
    fn test_errors_box_into_std_error_with_source() {
        let boxed: Box<dyn std::error::Error> = Box::new(ReactkitError::from(HalError::Busy(4)));
        assert!(boxed.source().is_some());
        assert_eq!(
            boxed.source().map(ToString::to_string),
            Some(HalError::Busy(4).to_string())
        );

        let sched: Box<dyn std::error::Error + Send + Sync> = Box::new(SchedError::PinInUse);
        assert!(sched.source().is_none());
    }
}
