//! Flags written from interrupt context and consumed by the dispatch loop.
//!
//! Each interrupt vector owns one [`InterruptLine`]. The interrupt handler is
//! the single writer of the raise side; the dispatch loop is the single
//! reader that clears it.

use portable_atomic::{AtomicBool, AtomicU32, Ordering};

/// A single-writer/single-reader "something happened" flag.
///
/// `raise` uses `Release` and `take` uses `AcqRel`, so anything the interrupt
/// handler wrote before raising is visible to the loop after taking.
#[derive(Debug, Default)]
pub struct PendingFlag {
    raised: AtomicBool,
}

impl PendingFlag {
    /// Create a lowered flag.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            raised: AtomicBool::new(false),
        }
    }

    /// Raise the flag. Safe to call from interrupt context.
    #[inline]
    pub fn raise(&self) {
        self.raised.store(true, Ordering::Release);
    }

    /// Lower the flag and report whether it was raised.
    ///
    /// Several raises between two takes collapse into one.
    #[inline]
    pub fn take(&self) -> bool {
        self.raised.swap(false, Ordering::AcqRel)
    }

    /// Peek without consuming.
    #[inline]
    pub fn is_raised(&self) -> bool {
        self.raised.load(Ordering::Acquire)
    }

    /// Lower the flag unconditionally.
    #[inline]
    pub fn clear(&self) {
        self.raised.store(false, Ordering::Release);
    }
}

/// Free-running edge counter. Wraps at `u32::MAX`.
#[derive(Debug, Default)]
pub struct EdgeCounter {
    count: AtomicU32,
}

impl EdgeCounter {
    /// Create a counter at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            count: AtomicU32::new(0),
        }
    }

    /// Count one edge. Safe to call from interrupt context.
    #[inline]
    pub fn increment(&self) {
        self.count.fetch_add(1, Ordering::Relaxed);
    }

    /// Current count.
    #[inline]
    pub fn get(&self) -> u32 {
        self.count.load(Ordering::Relaxed)
    }

    /// Reset to zero.
    #[inline]
    pub fn reset(&self) {
        self.count.store(0, Ordering::Relaxed);
    }
}

/// The interrupt-side state of one hardware interrupt vector.
///
/// ```rust
/// use reactkit_atomic::InterruptLine;
///
/// let line = InterruptLine::new();
/// line.signal();
/// line.signal();
///
/// assert_eq!(line.edges(), 2);
/// assert!(line.take_pending());
/// assert!(!line.is_pending());
/// ```
#[derive(Debug, Default)]
pub struct InterruptLine {
    pending: PendingFlag,
    edges: EdgeCounter,
}

impl InterruptLine {
    /// Create an idle line.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pending: PendingFlag::new(),
            edges: EdgeCounter::new(),
        }
    }

    /// Record one edge. This is the whole body of an interrupt handler.
    #[inline]
    pub fn signal(&self) {
        self.edges.increment();
        self.pending.raise();
    }

    /// Consume the pending flag.
    #[inline]
    pub fn take_pending(&self) -> bool {
        self.pending.take()
    }

    /// Peek at the pending flag.
    #[inline]
    pub fn is_pending(&self) -> bool {
        self.pending.is_raised()
    }

    /// Drop the pending flag, keeping the edge count.
    #[inline]
    pub fn clear_pending(&self) {
        self.pending.clear();
    }

    /// Edges seen since the line was last reset.
    #[inline]
    pub fn edges(&self) -> u32 {
        self.edges.get()
    }

    /// Return the line to idle before it is handed to a new owner.
    pub fn reset(&self) {
        self.pending.clear();
        self.edges.reset();
    }
}
