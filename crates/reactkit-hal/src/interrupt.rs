//! Interrupt attach/detach boundary.

use alloc::sync::Arc;

use reactkit_atomic::InterruptLine;
use reactkit_errors::HalResult;

use crate::types::{EdgeMode, Pin, VectorId};

/// The interrupt-side handle of one bound vector.
///
/// The platform keeps this in its vector table and calls [`fire`] from the
/// interrupt handler. Cloning is cheap and shares the same line.
///
/// [`fire`]: EdgeTrigger::fire
#[derive(Debug, Clone)]
pub struct EdgeTrigger {
    vector: VectorId,
    line: Arc<InterruptLine>,
}

impl EdgeTrigger {
    /// Bind a vector id to its line.
    #[must_use]
    pub fn new(vector: VectorId, line: Arc<InterruptLine>) -> Self {
        Self { vector, line }
    }

    /// Record one edge. Safe to call from interrupt context.
    #[inline]
    pub fn fire(&self) {
        self.line.signal();
    }

    /// The vector this trigger belongs to.
    #[must_use]
    pub fn vector(&self) -> VectorId {
        self.vector
    }

    /// Edges recorded on the line since it was bound.
    #[must_use]
    pub fn edges(&self) -> u32 {
        self.line.edges()
    }
}

/// Attaches edge interrupts to pins.
///
/// # Requirements
///
/// 1. After `attach` returns `Ok`, every matching edge on `pin` must call
///    `trigger.fire()`.
/// 2. After `detach` returns, the trigger for `pin` must never fire again.
///    The scheduler recycles the vector right after detaching.
/// 3. A failed `attach` must leave the pin detached.
pub trait InterruptController {
    /// Route edges matching `mode` on `pin` to `trigger`.
    ///
    /// # Errors
    ///
    /// Returns a [`HalError`](reactkit_errors::HalError) if the pin cannot
    /// raise interrupts for this mode.
    fn attach(&mut self, pin: Pin, mode: EdgeMode, trigger: EdgeTrigger) -> HalResult;

    /// Stop routing edges on `pin`. Detaching an unattached pin is a no-op.
    fn detach(&mut self, pin: Pin);
}

impl<I: InterruptController + ?Sized> InterruptController for alloc::boxed::Box<I> {
    fn attach(&mut self, pin: Pin, mode: EdgeMode, trigger: EdgeTrigger) -> HalResult {
        (**self).attach(pin, mode, trigger)
    }

    fn detach(&mut self, pin: Pin) {
        (**self).detach(pin);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trigger_fire_signals_line() {
        let line = Arc::new(InterruptLine::new());
        let trigger = EdgeTrigger::new(VectorId::new(3), Arc::clone(&line));

        trigger.fire();
        trigger.clone().fire();

        assert_eq!(trigger.edges(), 2);
        assert!(line.take_pending());
        assert_eq!(trigger.vector().index(), 3);
    }
}
