//! Millisecond clock trait.

/// A monotonic millisecond clock.
///
/// The value wraps at `u32::MAX` (about 49.7 days). Callers must compare
/// readings with wrapping subtraction, never with `<`.
pub trait Clock {
    /// Milliseconds since an arbitrary epoch, wrapping.
    fn now_ms(&self) -> u32;
}

impl<C: Clock + ?Sized> Clock for alloc::boxed::Box<C> {
    fn now_ms(&self) -> u32 {
        (**self).now_ms()
    }
}

/// Wall clock for hosted builds, measured from construction.
#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    start: std::time::Instant,
}

#[cfg(feature = "std")]
impl SystemClock {
    /// Start counting from now.
    #[must_use]
    pub fn new() -> Self {
        Self {
            start: std::time::Instant::now(),
        }
    }
}

#[cfg(feature = "std")]
impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "std")]
impl Clock for SystemClock {
    #[expect(
        clippy::cast_possible_truncation,
        reason = "the clock is defined to wrap at u32::MAX"
    )]
    fn now_ms(&self) -> u32 {
        self.start.elapsed().as_millis() as u32
    }
}

#[cfg(all(test, feature = "std"))]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_is_monotonic() {
        let clock = SystemClock::new();
        let a = clock.now_ms();
        let b = clock.now_ms();
        assert!(b.wrapping_sub(a) < 1_000);
    }
}
