//! Simulated hardware rig around a reactor.

use reactkit_hal::{Edge, ManualClock, Pin, SoftwareInterrupts, SoftwarePins};
use reactkit_scheduler::{Reactor, SchedulerConfig};

use crate::must::must_with;

/// A reactor wired to a manual clock, software interrupts and software pins.
///
/// The pins are looped back to the interrupt controller, so driving an
/// output raises an edge on the same pin number.
#[derive(Debug)]
pub struct SimRig {
    /// The clock the reactor reads
    pub clock: ManualClock,
    /// The interrupt controller the reactor attaches to
    pub interrupts: SoftwareInterrupts,
    /// Digital pins, looped back to `interrupts`
    pub pins: SoftwarePins,
    /// The reactor under test
    pub reactor: Reactor,
}

impl SimRig {
    /// Default configuration, clock at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(SchedulerConfig::default())
    }

    /// Custom configuration, clock at zero.
    ///
    /// # Panics
    ///
    /// Panics if `config` is invalid.
    #[must_use]
    pub fn with_config(config: SchedulerConfig) -> Self {
        Self::starting_at(0, config)
    }

    /// Custom configuration, clock at `start_ms`.
    ///
    /// # Panics
    ///
    /// Panics if `config` is invalid.
    #[must_use]
    pub fn starting_at(start_ms: u32, config: SchedulerConfig) -> Self {
        let clock = ManualClock::new(start_ms);
        let interrupts = SoftwareInterrupts::new();
        let pins = SoftwarePins::wired_to(interrupts.clone());
        let reactor = must_with(
            Reactor::new(config, clock.clone(), interrupts.clone()),
            "SimRig reactor",
        );
        Self {
            clock,
            interrupts,
            pins,
            reactor,
        }
    }

    /// One pass without moving the clock.
    pub fn step(&mut self) {
        self.reactor.tick();
    }

    /// Move the clock by `ms`, then run one pass.
    pub fn advance(&mut self, ms: u32) {
        self.clock.advance(ms);
        self.reactor.tick();
    }

    /// Run passes every `step_ms` until `total_ms` have elapsed. Returns the
    /// number of passes.
    pub fn run_for(&mut self, total_ms: u32, step_ms: u32) -> u32 {
        let step_ms = step_ms.max(1);
        let mut elapsed = 0;
        let mut passes = 0;
        while elapsed < total_ms {
            let delta = step_ms.min(total_ms - elapsed);
            self.advance(delta);
            elapsed += delta;
            passes += 1;
        }
        passes
    }

    /// Deliver an edge on `pin` as the hardware would.
    pub fn edge(&self, pin: Pin, edge: Edge) -> bool {
        self.interrupts.edge(pin, edge)
    }

    /// Fire whatever is attached to `pin`.
    pub fn raise(&self, pin: Pin) -> bool {
        self.interrupts.raise(pin)
    }
}

impl Default for SimRig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::counter::CallCounter;
    use crate::must::must;

    #[test]
    fn test_run_for_counts_passes() {
        let mut rig = SimRig::new();
        let ticks = CallCounter::new();
        must(rig.reactor.register_on_tick(ticks.callback()));

        assert_eq!(rig.run_for(95, 10), 10);
        assert_eq!(ticks.get(), 10);
        assert_eq!(rig.reactor.now(), 95);
    }

    #[test]
    fn test_looped_back_pins() {
        use reactkit_hal::{DigitalIo, Level};

        let mut rig = SimRig::new();
        let edges = CallCounter::new();
        must(rig.reactor.register_on_rising(Pin::new(3), edges.callback()));

        rig.pins.set_level(Pin::new(3), Level::High);
        rig.step();
        rig.pins.set_level(Pin::new(3), Level::Low);
        rig.step();

        assert_eq!(edges.get(), 1);
    }
}
