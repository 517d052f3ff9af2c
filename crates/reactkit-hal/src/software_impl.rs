//! In-memory implementations of the hardware traits.
//!
//! These back host builds and tests. Each type is a cheap clonable handle
//! over shared state so a test can keep one copy while the scheduler owns
//! another.

use alloc::collections::{BTreeMap, BTreeSet, VecDeque};
use alloc::rc::Rc;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::cell::RefCell;

use portable_atomic::{AtomicU32, Ordering};
use reactkit_errors::{HalError, HalResult};

use crate::clock::Clock;
use crate::interrupt::{EdgeTrigger, InterruptController};
use crate::io::{ByteSource, DigitalIo};
use crate::types::{Edge, EdgeMode, Level, Pin, VectorId};

/// A clock that only moves when told to.
///
/// Clones share the same counter.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Arc<AtomicU32>,
}

impl ManualClock {
    /// Start at `start_ms`.
    #[must_use]
    pub fn new(start_ms: u32) -> Self {
        Self {
            now: Arc::new(AtomicU32::new(start_ms)),
        }
    }

    /// Jump to an absolute reading.
    pub fn set(&self, ms: u32) {
        self.now.store(ms, Ordering::Release);
    }

    /// Move forward by `ms`, wrapping at `u32::MAX`. Returns the new reading.
    pub fn advance(&self, ms: u32) -> u32 {
        self.now
            .fetch_add(ms, Ordering::AcqRel)
            .wrapping_add(ms)
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u32 {
        self.now.load(Ordering::Acquire)
    }
}

/// One call made into [`SoftwareInterrupts`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HalEvent {
    /// A successful attach
    Attached {
        /// Pin
        pin: Pin,
        /// Requested edge mode
        mode: EdgeMode,
        /// Vector the trigger belongs to
        vector: VectorId,
    },
    /// An attach that was refused
    Refused {
        /// Pin
        pin: Pin,
        /// Requested edge mode
        mode: EdgeMode,
    },
    /// A detach
    Detached {
        /// Pin
        pin: Pin,
    },
}

#[derive(Debug, Default)]
struct InterruptTable {
    attached: BTreeMap<Pin, (EdgeMode, EdgeTrigger)>,
    refused: BTreeSet<Pin>,
    events: Vec<HalEvent>,
}

/// Interrupt controller that routes simulated edges to attached triggers.
///
/// Clones share the same table, so a test can raise edges on a copy while
/// the scheduler owns another.
#[derive(Debug, Clone, Default)]
pub struct SoftwareInterrupts {
    table: Rc<RefCell<InterruptTable>>,
}

impl SoftwareInterrupts {
    /// A controller with every pin usable.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make future `attach` calls on `pin` fail with [`HalError::UnsupportedPin`].
    pub fn refuse_pin(&self, pin: Pin) {
        self.table.borrow_mut().refused.insert(pin);
    }

    /// Deliver an edge on `pin`. Returns `true` if a trigger fired.
    pub fn edge(&self, pin: Pin, edge: Edge) -> bool {
        let table = self.table.borrow();
        match table.attached.get(&pin) {
            Some((mode, trigger)) if mode.matches(edge) => {
                trigger.fire();
                true
            }
            _ => false,
        }
    }

    /// Fire the trigger on `pin` regardless of its edge mode.
    pub fn raise(&self, pin: Pin) -> bool {
        let table = self.table.borrow();
        match table.attached.get(&pin) {
            Some((_, trigger)) => {
                trigger.fire();
                true
            }
            None => false,
        }
    }

    /// Whether a trigger is attached to `pin`.
    #[must_use]
    pub fn is_attached(&self, pin: Pin) -> bool {
        self.table.borrow().attached.contains_key(&pin)
    }

    /// The edge mode attached to `pin`.
    #[must_use]
    pub fn mode(&self, pin: Pin) -> Option<EdgeMode> {
        self.table.borrow().attached.get(&pin).map(|(mode, _)| *mode)
    }

    /// Number of attached pins.
    #[must_use]
    pub fn attached_count(&self) -> usize {
        self.table.borrow().attached.len()
    }

    /// Every attach/detach call so far, oldest first.
    #[must_use]
    pub fn events(&self) -> Vec<HalEvent> {
        self.table.borrow().events.clone()
    }
}

impl InterruptController for SoftwareInterrupts {
    fn attach(&mut self, pin: Pin, mode: EdgeMode, trigger: EdgeTrigger) -> HalResult {
        let mut table = self.table.borrow_mut();
        if table.refused.contains(&pin) {
            table.events.push(HalEvent::Refused { pin, mode });
            return Err(HalError::UnsupportedPin(pin.number()));
        }
        if table.attached.contains_key(&pin) {
            table.events.push(HalEvent::Refused { pin, mode });
            return Err(HalError::Busy(pin.number()));
        }
        let vector = trigger.vector();
        table.attached.insert(pin, (mode, trigger));
        table.events.push(HalEvent::Attached { pin, mode, vector });
        Ok(())
    }

    fn detach(&mut self, pin: Pin) {
        let mut table = self.table.borrow_mut();
        if table.attached.remove(&pin).is_some() {
            table.events.push(HalEvent::Detached { pin });
        }
    }
}

#[derive(Debug, Default)]
struct PinBank {
    levels: BTreeMap<Pin, Level>,
    wired: Option<SoftwareInterrupts>,
}

/// Digital pins held in memory. Unset pins read low.
///
/// When wired to a [`SoftwareInterrupts`], every level change is delivered
/// as an edge on the same pin, which models an output looped back to an
/// interrupt-capable input.
#[derive(Debug, Clone, Default)]
pub struct SoftwarePins {
    bank: Rc<RefCell<PinBank>>,
}

impl SoftwarePins {
    /// All pins low, no interrupt wiring.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pins whose level changes raise edges on `interrupts`.
    #[must_use]
    pub fn wired_to(interrupts: SoftwareInterrupts) -> Self {
        let pins = Self::new();
        pins.bank.borrow_mut().wired = Some(interrupts);
        pins
    }
}

impl DigitalIo for SoftwarePins {
    fn set_level(&mut self, pin: Pin, level: Level) {
        let wired = {
            let mut bank = self.bank.borrow_mut();
            let previous = bank.levels.insert(pin, level).unwrap_or_default();
            Edge::between(previous, level).and_then(|edge| bank.wired.clone().map(|w| (w, edge)))
        };
        if let Some((interrupts, edge)) = wired {
            interrupts.edge(pin, edge);
        }
    }

    fn level(&self, pin: Pin) -> Level {
        self.bank
            .borrow()
            .levels
            .get(&pin)
            .copied()
            .unwrap_or_default()
    }
}

/// A byte stream backed by a queue.
#[derive(Debug, Clone, Default)]
pub struct BufferedSource {
    bytes: VecDeque<u8>,
}

impl BufferedSource {
    /// An empty stream.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue bytes as if they had just arrived.
    pub fn push(&mut self, bytes: &[u8]) {
        self.bytes.extend(bytes.iter().copied());
    }

    /// Drop everything buffered.
    pub fn clear(&mut self) {
        self.bytes.clear();
    }
}

impl ByteSource for BufferedSource {
    fn available(&self) -> usize {
        self.bytes.len()
    }

    fn read_byte(&mut self) -> Option<u8> {
        self.bytes.pop_front()
    }
}
