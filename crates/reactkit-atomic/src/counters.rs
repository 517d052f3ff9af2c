//! Atomic counters describing what the dispatch loop has done.
//!
//! All counters use `Ordering::Relaxed`: they are statistics, not
//! synchronization, and a reader only needs eventually consistent values.

use portable_atomic::{AtomicU64, Ordering};

/// Counter snapshot returned by [`DispatchCounters::snapshot`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CounterSnapshot {
    /// Dispatch passes run
    pub passes: u64,
    /// Timed reactions fired
    pub timed_fires: u64,
    /// Untimed reactions fired
    pub untimed_fires: u64,
    /// Successful registrations
    pub registrations: u64,
    /// Reactions canceled by their owner. Fired one-shots are not counted.
    pub cancellations: u64,
    /// Registrations refused for lack of slots, queue space or vectors
    pub rejections: u64,
    /// Largest delay between a timed reaction's due time and its firing, in ms
    pub max_lateness_ms: u64,
}

impl CounterSnapshot {
    /// Total callbacks run.
    #[must_use]
    pub fn total_fires(&self) -> u64 {
        self.timed_fires.saturating_add(self.untimed_fires)
    }
}

/// Atomic dispatch counters.
///
/// # Example
///
/// ```rust
/// use reactkit_atomic::DispatchCounters;
///
/// let counters = DispatchCounters::new();
/// counters.inc_pass();
/// counters.inc_timed_fire();
/// counters.record_lateness_ms(3);
/// counters.record_lateness_ms(1);
///
/// let snapshot = counters.snapshot();
/// assert_eq!(snapshot.passes, 1);
/// assert_eq!(snapshot.max_lateness_ms, 3);
/// ```
#[derive(Debug, Default)]
pub struct DispatchCounters {
    passes: AtomicU64,
    timed_fires: AtomicU64,
    untimed_fires: AtomicU64,
    registrations: AtomicU64,
    cancellations: AtomicU64,
    rejections: AtomicU64,
    max_lateness_ms: AtomicU64,
}

impl DispatchCounters {
    /// Create counters at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            passes: AtomicU64::new(0),
            timed_fires: AtomicU64::new(0),
            untimed_fires: AtomicU64::new(0),
            registrations: AtomicU64::new(0),
            cancellations: AtomicU64::new(0),
            rejections: AtomicU64::new(0),
            max_lateness_ms: AtomicU64::new(0),
        }
    }

    /// Count one dispatch pass.
    #[inline]
    pub fn inc_pass(&self) {
        self.passes.fetch_add(1, Ordering::Relaxed);
    }

    /// Count one timed callback.
    #[inline]
    pub fn inc_timed_fire(&self) {
        self.timed_fires.fetch_add(1, Ordering::Relaxed);
    }

    /// Count one untimed callback.
    #[inline]
    pub fn inc_untimed_fire(&self) {
        self.untimed_fires.fetch_add(1, Ordering::Relaxed);
    }

    /// Count one successful registration.
    #[inline]
    pub fn inc_registration(&self) {
        self.registrations.fetch_add(1, Ordering::Relaxed);
    }

    /// Count one owner cancellation.
    #[inline]
    pub fn inc_cancellation(&self) {
        self.cancellations.fetch_add(1, Ordering::Relaxed);
    }

    /// Count one refused registration.
    #[inline]
    pub fn inc_rejection(&self) {
        self.rejections.fetch_add(1, Ordering::Relaxed);
    }

    /// Keep the maximum lateness seen.
    #[inline]
    pub fn record_lateness_ms(&self, lateness_ms: u64) {
        self.max_lateness_ms.fetch_max(lateness_ms, Ordering::Relaxed);
    }

    /// Dispatch passes so far.
    #[must_use]
    pub fn passes(&self) -> u64 {
        self.passes.load(Ordering::Relaxed)
    }

    /// Read every counter.
    #[must_use]
    pub fn snapshot(&self) -> CounterSnapshot {
        CounterSnapshot {
            passes: self.passes.load(Ordering::Relaxed),
            timed_fires: self.timed_fires.load(Ordering::Relaxed),
            untimed_fires: self.untimed_fires.load(Ordering::Relaxed),
            registrations: self.registrations.load(Ordering::Relaxed),
            cancellations: self.cancellations.load(Ordering::Relaxed),
            rejections: self.rejections.load(Ordering::Relaxed),
            max_lateness_ms: self.max_lateness_ms.load(Ordering::Relaxed),
        }
    }

    /// Read every counter and reset it to zero.
    pub fn snapshot_and_reset(&self) -> CounterSnapshot {
        CounterSnapshot {
            passes: self.passes.swap(0, Ordering::Relaxed),
            timed_fires: self.timed_fires.swap(0, Ordering::Relaxed),
            untimed_fires: self.untimed_fires.swap(0, Ordering::Relaxed),
            registrations: self.registrations.swap(0, Ordering::Relaxed),
            cancellations: self.cancellations.swap(0, Ordering::Relaxed),
            rejections: self.rejections.swap(0, Ordering::Relaxed),
            max_lateness_ms: self.max_lateness_ms.swap(0, Ordering::Relaxed),
        }
    }

    /// Reset every counter to zero.
    pub fn reset(&self) {
        let _ = self.snapshot_and_reset();
    }
}
