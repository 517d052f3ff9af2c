//! Host entry points: one-time setup and the forever loop.

use tracing::{info, warn};

use crate::reactor::Reactor;

type Setup = Box<dyn FnOnce(&mut Reactor)>;

/// Owns the single [`Reactor`] of a program and its startup routine.
///
/// A board's `main` calls [`setup`](Self::setup) once and then
/// [`step`](Self::step) forever, or hands control to [`run`](Self::run).
pub struct Application {
    reactor: Reactor,
    setup: Option<Setup>,
}

impl Application {
    /// Pair a reactor with the routine that registers its first reactions.
    pub fn new(reactor: Reactor, setup: impl FnOnce(&mut Reactor) + 'static) -> Self {
        Self {
            reactor,
            setup: Some(Box::new(setup)),
        }
    }

    /// Run the startup routine. Returns `false` (and does nothing) if it
    /// already ran.
    pub fn setup(&mut self) -> bool {
        let Some(setup) = self.setup.take() else {
            warn!("setup called more than once; ignoring");
            return false;
        };
        setup(&mut self.reactor);
        info!(
            reactions = self.reactor.len(),
            "application setup complete"
        );
        true
    }

    /// Whether [`setup`](Self::setup) has run.
    #[must_use]
    pub fn is_set_up(&self) -> bool {
        self.setup.is_none()
    }

    /// One main-loop iteration.
    pub fn step(&mut self) {
        self.reactor.tick();
    }

    /// Run setup if it has not run yet, then step forever.
    pub fn run(mut self) -> ! {
        if !self.is_set_up() {
            self.setup();
        }
        loop {
            self.step();
            std::hint::spin_loop();
        }
    }

    /// The reactor.
    #[must_use]
    pub fn reactor(&self) -> &Reactor {
        &self.reactor
    }

    /// The reactor, mutably.
    pub fn reactor_mut(&mut self) -> &mut Reactor {
        &mut self.reactor
    }

    /// Give up the application and keep the reactor.
    #[must_use]
    pub fn into_reactor(self) -> Reactor {
        self.reactor
    }
}

impl std::fmt::Debug for Application {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Application")
            .field("reactor", &self.reactor)
            .field("set_up", &self.is_set_up())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SchedulerConfig;
    use reactkit_hal::{ManualClock, SoftwareInterrupts};
    use std::cell::Cell;
    use std::rc::Rc;

    fn app(runs: Rc<Cell<u32>>) -> Result<Application, reactkit_errors::ReactkitError> {
        let reactor = Reactor::new(
            SchedulerConfig::default(),
            ManualClock::new(0),
            SoftwareInterrupts::new(),
        )?;
        Ok(Application::new(reactor, move |r| {
            runs.set(runs.get() + 1);
            let ticks = Rc::clone(&runs);
            let _ = r.register_on_tick(move |_| ticks.set(ticks.get() + 10));
        }))
    }

    #[test]
    fn test_setup_runs_once() -> Result<(), Box<dyn std::error::Error>> {
        let runs = Rc::new(Cell::new(0));
        let mut app = app(Rc::clone(&runs))?;

        assert!(!app.is_set_up());
        assert!(app.setup());
        assert!(!app.setup());
        assert_eq!(runs.get(), 1);
        assert_eq!(app.reactor().len(), 1);
        Ok(())
    }

    #[test]
    fn test_step_dispatches() -> Result<(), Box<dyn std::error::Error>> {
        let runs = Rc::new(Cell::new(0));
        let mut app = app(Rc::clone(&runs))?;
        app.setup();
        app.step();
        app.step();
        assert_eq!(runs.get(), 21);
        assert_eq!(app.into_reactor().stats().passes, 2);
        Ok(())
    }
}
