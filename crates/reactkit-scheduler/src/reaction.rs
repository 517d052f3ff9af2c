//! The reaction record and its trigger variants.

use std::fmt;
use std::sync::Arc;

use reactkit_atomic::InterruptLine;
use reactkit_hal::{EdgeMode, Pin, SharedSource, VectorId};

use crate::handle::ReactionKind;
use crate::reactor::Reactor;

/// A reaction body. It receives the reactor so it can register or cancel
/// reactions, including itself.
pub type Callback = Box<dyn FnMut(&mut Reactor)>;

/// Pin binding held by an interrupt reaction.
#[derive(Debug, Clone)]
pub(crate) struct InterruptBinding {
    pub pin: Pin,
    pub mode: EdgeMode,
    pub vector: VectorId,
    pub line: Arc<InterruptLine>,
}

/// What makes a reaction ready.
///
/// Timed variants carry `last`, the extended clock reading at registration
/// or at the previous fire. They are due at `last + interval`.
pub(crate) enum Trigger {
    Delay { interval: u32, last: u64 },
    Repeat { interval: u32, last: u64 },
    Available(SharedSource),
    Tick,
    Interrupt(InterruptBinding),
}

impl Trigger {
    pub fn kind(&self) -> ReactionKind {
        match self {
            Trigger::Delay { .. } => ReactionKind::Delay,
            Trigger::Repeat { .. } => ReactionKind::Repeat,
            Trigger::Available(_) => ReactionKind::Available,
            Trigger::Tick => ReactionKind::Tick,
            Trigger::Interrupt(_) => ReactionKind::Interrupt,
        }
    }

    /// Next fire time for timed variants.
    pub fn due(&self) -> Option<u64> {
        match self {
            Trigger::Delay { interval, last } | Trigger::Repeat { interval, last } => {
                Some(last.saturating_add(u64::from(*interval)))
            }
            _ => None,
        }
    }

    /// Readiness at extended time `now`.
    ///
    /// Consumes the pending flag of an interrupt binding: a `true` answer is
    /// the one fire owed for the edges seen since the last poll.
    pub fn is_ready(&self, now: u64) -> bool {
        match self {
            Trigger::Delay { .. } | Trigger::Repeat { .. } => {
                self.due().is_some_and(|due| now >= due)
            }
            // A source already borrowed by a running callback reads as empty.
            Trigger::Available(source) => source
                .try_borrow()
                .map(|source| source.available() > 0)
                .unwrap_or(false),
            Trigger::Tick => true,
            Trigger::Interrupt(binding) => binding.line.take_pending(),
        }
    }

    /// Discard edges seen while the reaction was disabled.
    pub fn drain(&self) {
        if let Trigger::Interrupt(binding) = self {
            binding.line.clear_pending();
        }
    }
}

impl fmt::Debug for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trigger::Delay { interval, last } => f
                .debug_struct("Delay")
                .field("interval", interval)
                .field("last", last)
                .finish(),
            Trigger::Repeat { interval, last } => f
                .debug_struct("Repeat")
                .field("interval", interval)
                .field("last", last)
                .finish(),
            Trigger::Available(_) => f.write_str("Available"),
            Trigger::Tick => f.write_str("Tick"),
            Trigger::Interrupt(binding) => f.debug_tuple("Interrupt").field(binding).finish(),
        }
    }
}

/// One registered reaction.
///
/// `callback` is `None` only while the callback is running.
pub(crate) struct Reaction {
    pub trigger: Trigger,
    pub callback: Option<Callback>,
    pub enabled: bool,
}

impl Reaction {
    pub fn new(trigger: Trigger, callback: Callback) -> Self {
        Self {
            trigger,
            callback: Some(callback),
            enabled: true,
        }
    }

    pub fn kind(&self) -> ReactionKind {
        self.trigger.kind()
    }

    /// Put a callback back after it ran, unless the slot was refilled.
    pub fn restore(&mut self, callback: Callback) {
        if self.callback.is_none() {
            self.callback = Some(callback);
        }
    }
}

impl fmt::Debug for Reaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reaction")
            .field("trigger", &self.trigger)
            .field("enabled", &self.enabled)
            .field("running", &self.callback.is_none())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reactkit_hal::BufferedSource;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_timed_due() {
        let delay = Trigger::Delay {
            interval: 250,
            last: 1_000,
        };
        assert_eq!(delay.due(), Some(1_250));
        assert!(!delay.is_ready(1_249));
        assert!(delay.is_ready(1_250));
        assert_eq!(Trigger::Tick.due(), None);
    }

    #[test]
    fn test_available_reads_byte_count() {
        let source = Rc::new(RefCell::new(BufferedSource::new()));
        let trigger = Trigger::Available(source.clone());
        assert!(!trigger.is_ready(0));

        source.borrow_mut().push(b"x");
        assert!(trigger.is_ready(0));

        let _held = source.borrow_mut();
        assert!(!trigger.is_ready(0));
    }

    #[test]
    fn test_interrupt_ready_consumes_pending() {
        let line = Arc::new(InterruptLine::new());
        let trigger = Trigger::Interrupt(InterruptBinding {
            pin: Pin::new(2),
            mode: EdgeMode::Rising,
            vector: VectorId::new(0),
            line: Arc::clone(&line),
        });

        line.signal();
        line.signal();
        assert!(trigger.is_ready(0));
        assert!(!trigger.is_ready(0));

        line.signal();
        trigger.drain();
        assert!(!trigger.is_ready(0));
        assert_eq!(line.edges(), 3);
    }
}
