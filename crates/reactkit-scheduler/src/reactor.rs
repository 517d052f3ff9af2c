//! The reaction store and dispatch loop.
//!
//! A [`Reactor`] owns every registered reaction. Each call to
//! [`Reactor::tick`] is one pass of the main loop:
//!
//! 1. Read the clock once.
//! 2. Fire timed reactions that are due, earliest first. Entries queued
//!    during this pass wait for the next one.
//! 3. Poll untimed reactions in slot order, up to the high-water mark as it
//!    stands at each step.
//!
//! Callbacks run inline and get `&mut Reactor`, so they can register and
//! cancel reactions (their own included) while the pass is running.

use std::sync::Arc;

use reactkit_atomic::{CounterSnapshot, DispatchCounters};
use reactkit_errors::{ReactkitError, SchedError, SchedResult};
use reactkit_hal::{Clock, EdgeMode, EdgeTrigger, InterruptController, Pin, SharedSource};
use tracing::{debug, trace, warn};

use crate::config::SchedulerConfig;
use crate::handle::{ReactionHandle, ReactionKind, StoreClass};
use crate::reaction::{Callback, InterruptBinding, Reaction, Trigger};
use crate::slots::SlotTable;
use crate::timed::{Timeline, TimedQueue};
use crate::vectors::VectorPool;

/// Cooperative scheduler for one main loop.
///
/// # Example
///
/// ```
/// use std::cell::Cell;
/// use std::rc::Rc;
///
/// use reactkit_hal::{ManualClock, SoftwareInterrupts};
/// use reactkit_scheduler::{Reactor, SchedulerConfig};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let clock = ManualClock::new(0);
/// let mut reactor = Reactor::new(
///     SchedulerConfig::default(),
///     clock.clone(),
///     SoftwareInterrupts::new(),
/// )?;
///
/// let fired = Rc::new(Cell::new(0));
/// let counter = Rc::clone(&fired);
/// reactor.register_repeating(100, move |_| counter.set(counter.get() + 1))?;
///
/// for _ in 0..3 {
///     clock.advance(100);
///     reactor.tick();
/// }
/// assert_eq!(fired.get(), 3);
/// # Ok(())
/// # }
/// ```
pub struct Reactor {
    config: SchedulerConfig,
    clock: Box<dyn Clock>,
    interrupts: Box<dyn InterruptController>,
    timeline: Timeline,
    timed: SlotTable<Reaction>,
    queue: TimedQueue,
    untimed: SlotTable<Reaction>,
    vectors: VectorPool,
    counters: DispatchCounters,
}

impl Reactor {
    /// Build a reactor over the given clock and interrupt controller.
    ///
    /// All tables are allocated here.
    ///
    /// # Errors
    ///
    /// Returns [`ReactkitError::Validation`] if `config` is out of range.
    pub fn new(
        config: SchedulerConfig,
        clock: impl Clock + 'static,
        interrupts: impl InterruptController + 'static,
    ) -> Result<Self, ReactkitError> {
        config.validate()?;
        let timeline = Timeline::new(clock.now_ms());
        debug!(
            untimed = config.untimed_capacity,
            timed = config.timed_capacity,
            vectors = config.interrupt_vectors,
            "reactor created"
        );
        Ok(Self {
            config,
            clock: Box::new(clock),
            interrupts: Box::new(interrupts),
            timeline,
            timed: SlotTable::with_capacity(config.timed_capacity),
            queue: TimedQueue::with_capacity(config.timed_capacity),
            untimed: SlotTable::with_capacity(config.untimed_capacity),
            vectors: VectorPool::new(config.interrupt_vectors),
            counters: DispatchCounters::new(),
        })
    }

    /// The configuration the reactor was built with.
    #[must_use]
    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    // ---------------------------------------------------------------------
    // Registration
    // ---------------------------------------------------------------------

    /// Run `callback` once, `interval_ms` from now.
    ///
    /// The reaction retires before its callback runs: the handle is already
    /// invalid inside the callback, and the slot is free for the callback to
    /// reuse.
    ///
    /// # Errors
    ///
    /// [`SchedError::CapacityExhausted`] when the timed table is full.
    pub fn register_delayed(
        &mut self,
        interval_ms: u32,
        callback: impl FnMut(&mut Reactor) + 'static,
    ) -> SchedResult<ReactionHandle> {
        self.register_timed(ReactionKind::Delay, interval_ms, Box::new(callback))
    }

    /// Run `callback` every `interval_ms`, measured from each actual fire.
    ///
    /// A late pass delays every later fire; missed cycles are not replayed.
    ///
    /// # Errors
    ///
    /// [`SchedError::CapacityExhausted`] when the timed table is full.
    pub fn register_repeating(
        &mut self,
        interval_ms: u32,
        callback: impl FnMut(&mut Reactor) + 'static,
    ) -> SchedResult<ReactionHandle> {
        self.register_timed(ReactionKind::Repeat, interval_ms, Box::new(callback))
    }

    /// Run `callback` on every pass while `source` has at least one byte.
    ///
    /// The callback is expected to read; if it leaves bytes behind it fires
    /// again next pass.
    ///
    /// # Errors
    ///
    /// [`SchedError::CapacityExhausted`] when the untimed table is full.
    pub fn register_on_available(
        &mut self,
        source: SharedSource,
        callback: impl FnMut(&mut Reactor) + 'static,
    ) -> SchedResult<ReactionHandle> {
        self.register_untimed(Trigger::Available(source), Box::new(callback))
    }

    /// Run `callback` on every pass.
    ///
    /// # Errors
    ///
    /// [`SchedError::CapacityExhausted`] when the untimed table is full.
    pub fn register_on_tick(
        &mut self,
        callback: impl FnMut(&mut Reactor) + 'static,
    ) -> SchedResult<ReactionHandle> {
        self.register_untimed(Trigger::Tick, Box::new(callback))
    }

    /// Run `callback` on the first pass after an edge on `pin`.
    ///
    /// Edges arriving between two passes collapse into a single fire.
    ///
    /// # Errors
    ///
    /// - [`SchedError::CapacityExhausted`] when the untimed table is full
    /// - [`SchedError::PinInUse`] when `pin` already has a reaction
    /// - [`SchedError::ResourceExhausted`] when no interrupt vector is free
    /// - [`SchedError::AttachFailed`] when the controller refuses the pin
    ///
    /// On any error nothing is attached and no slot or vector is held.
    pub fn register_on_interrupt(
        &mut self,
        pin: Pin,
        mode: EdgeMode,
        callback: impl FnMut(&mut Reactor) + 'static,
    ) -> SchedResult<ReactionHandle> {
        if self.untimed.is_full() {
            return Err(self.reject(SchedError::CapacityExhausted, ReactionKind::Interrupt));
        }
        if self.vectors.is_bound(pin) {
            return Err(self.reject(SchedError::PinInUse, ReactionKind::Interrupt));
        }
        let Some((vector, line)) = self.vectors.acquire(pin) else {
            return Err(self.reject(SchedError::ResourceExhausted, ReactionKind::Interrupt));
        };

        let binding = InterruptBinding {
            pin,
            mode,
            vector,
            line: Arc::clone(&line),
        };
        let reaction = Reaction::new(Trigger::Interrupt(binding), Box::new(callback));
        let Some(key) = self.untimed.insert(reaction) else {
            self.vectors.release(vector);
            return Err(self.reject(SchedError::CapacityExhausted, ReactionKind::Interrupt));
        };

        if let Err(err) = self
            .interrupts
            .attach(pin, mode, EdgeTrigger::new(vector, line))
        {
            self.untimed.remove(key);
            self.vectors.release(vector);
            self.counters.inc_rejection();
            warn!(%pin, %mode, error = %err, "interrupt attach failed");
            return Err(SchedError::AttachFailed);
        }

        let handle = ReactionHandle::new(StoreClass::Untimed, key);
        self.counters.inc_registration();
        debug!(%handle, %pin, %mode, %vector, "interrupt reaction registered");
        Ok(handle)
    }

    /// [`register_on_interrupt`](Self::register_on_interrupt) for low-to-high edges.
    ///
    /// # Errors
    ///
    /// Same as [`register_on_interrupt`](Self::register_on_interrupt).
    pub fn register_on_rising(
        &mut self,
        pin: Pin,
        callback: impl FnMut(&mut Reactor) + 'static,
    ) -> SchedResult<ReactionHandle> {
        self.register_on_interrupt(pin, EdgeMode::Rising, callback)
    }

    /// [`register_on_interrupt`](Self::register_on_interrupt) for high-to-low edges.
    ///
    /// # Errors
    ///
    /// Same as [`register_on_interrupt`](Self::register_on_interrupt).
    pub fn register_on_falling(
        &mut self,
        pin: Pin,
        callback: impl FnMut(&mut Reactor) + 'static,
    ) -> SchedResult<ReactionHandle> {
        self.register_on_interrupt(pin, EdgeMode::Falling, callback)
    }

    /// [`register_on_interrupt`](Self::register_on_interrupt) for both edges.
    ///
    /// # Errors
    ///
    /// Same as [`register_on_interrupt`](Self::register_on_interrupt).
    pub fn register_on_change(
        &mut self,
        pin: Pin,
        callback: impl FnMut(&mut Reactor) + 'static,
    ) -> SchedResult<ReactionHandle> {
        self.register_on_interrupt(pin, EdgeMode::Change, callback)
    }

    fn register_timed(
        &mut self,
        kind: ReactionKind,
        interval: u32,
        callback: Callback,
    ) -> SchedResult<ReactionHandle> {
        if self.timed.is_full() {
            return Err(self.reject(SchedError::CapacityExhausted, kind));
        }
        let last = self.timeline.observe(self.clock.now_ms());
        let trigger = match kind {
            ReactionKind::Repeat => Trigger::Repeat { interval, last },
            _ => Trigger::Delay { interval, last },
        };
        let due = trigger.due().unwrap_or(last);
        let Some(key) = self.timed.insert(Reaction::new(trigger, callback)) else {
            return Err(self.reject(SchedError::CapacityExhausted, kind));
        };
        self.queue.push(due, key);

        let handle = ReactionHandle::new(StoreClass::Timed, key);
        self.counters.inc_registration();
        debug!(%handle, ?kind, interval_ms = interval, due, "timed reaction registered");
        Ok(handle)
    }

    fn register_untimed(
        &mut self,
        trigger: Trigger,
        callback: Callback,
    ) -> SchedResult<ReactionHandle> {
        let kind = trigger.kind();
        let Some(key) = self.untimed.insert(Reaction::new(trigger, callback)) else {
            return Err(self.reject(SchedError::CapacityExhausted, kind));
        };

        let handle = ReactionHandle::new(StoreClass::Untimed, key);
        self.counters.inc_registration();
        debug!(%handle, ?kind, "untimed reaction registered");
        Ok(handle)
    }

    fn reject(&self, err: SchedError, kind: ReactionKind) -> SchedError {
        self.counters.inc_rejection();
        warn!(?kind, error = %err, "registration rejected");
        err
    }

    // ---------------------------------------------------------------------
    // Lifecycle
    // ---------------------------------------------------------------------

    /// Remove a reaction. Returns `false` if the handle was already invalid.
    ///
    /// An interrupt reaction is detached from the hardware before its vector
    /// returns to the pool. Safe to call from any callback, including the
    /// reaction's own.
    pub fn cancel(&mut self, handle: ReactionHandle) -> bool {
        let key = handle.key();
        let removed = match handle.class() {
            StoreClass::Timed => {
                let removed = self.timed.remove(key);
                if removed.is_some() {
                    self.queue.remove(key);
                }
                removed
            }
            StoreClass::Untimed => {
                let binding = self.untimed.get(key).map(|reaction| match &reaction.trigger {
                    Trigger::Interrupt(binding) => Some((binding.pin, binding.mode, binding.vector)),
                    _ => None,
                });
                match binding {
                    None => None,
                    Some(bound) => {
                        if let Some((pin, mode, vector)) = bound {
                            self.interrupts.detach(pin);
                            self.vectors.release(vector);
                            debug!(%handle, %pin, %mode, %vector, "interrupt reaction detached");
                        }
                        self.untimed.remove(key)
                    }
                }
            }
        };

        match removed {
            Some(reaction) => {
                self.counters.inc_cancellation();
                debug!(%handle, kind = ?reaction.kind(), "reaction cancelled");
                true
            }
            None => false,
        }
    }

    /// Cancel every reaction. Returns how many were removed.
    pub fn cancel_all(&mut self) -> usize {
        let mut cancelled = 0;
        for index in (0..self.untimed.top()).rev() {
            if let Some(key) = self.untimed.key_at(index)
                && self.cancel(ReactionHandle::new(StoreClass::Untimed, key))
            {
                cancelled += 1;
            }
        }
        for index in (0..self.timed.top()).rev() {
            if let Some(key) = self.timed.key_at(index)
                && self.cancel(ReactionHandle::new(StoreClass::Timed, key))
            {
                cancelled += 1;
            }
        }
        cancelled
    }

    /// Whether `handle` still names a live reaction.
    #[must_use]
    pub fn is_valid(&self, handle: ReactionHandle) -> bool {
        self.reaction(handle).is_some()
    }

    /// Enable or disable a reaction without removing it.
    ///
    /// A disabled reaction keeps its slot (and vector). Untimed ones are
    /// skipped; an interrupt reaction drops edges seen while disabled. A
    /// disabled repeating reaction keeps its schedule but does not run; a
    /// disabled delayed reaction retires silently when it comes due.
    ///
    /// Returns `false` if the handle is invalid.
    pub fn set_enabled(&mut self, handle: ReactionHandle, enabled: bool) -> bool {
        let Some(reaction) = self.reaction_mut(handle) else {
            return false;
        };
        reaction.enabled = enabled;
        debug!(%handle, enabled, "reaction enable changed");
        true
    }

    /// Enable flag of a live reaction.
    #[must_use]
    pub fn is_enabled(&self, handle: ReactionHandle) -> Option<bool> {
        self.reaction(handle).map(|reaction| reaction.enabled)
    }

    /// Variant of a live reaction.
    #[must_use]
    pub fn kind(&self, handle: ReactionHandle) -> Option<ReactionKind> {
        self.reaction(handle).map(Reaction::kind)
    }

    /// Next due time of a live timed reaction, on the reactor's extended
    /// clock.
    #[must_use]
    pub fn due_at(&self, handle: ReactionHandle) -> Option<u64> {
        self.reaction(handle)
            .and_then(|reaction| reaction.trigger.due())
    }

    /// Pin and edge mode of a live interrupt reaction.
    #[must_use]
    pub fn interrupt_binding(&self, handle: ReactionHandle) -> Option<(Pin, EdgeMode)> {
        match &self.reaction(handle)?.trigger {
            Trigger::Interrupt(binding) => Some((binding.pin, binding.mode)),
            _ => None,
        }
    }

    fn reaction(&self, handle: ReactionHandle) -> Option<&Reaction> {
        match handle.class() {
            StoreClass::Timed => self.timed.get(handle.key()),
            StoreClass::Untimed => self.untimed.get(handle.key()),
        }
    }

    fn reaction_mut(&mut self, handle: ReactionHandle) -> Option<&mut Reaction> {
        match handle.class() {
            StoreClass::Timed => self.timed.get_mut(handle.key()),
            StoreClass::Untimed => self.untimed.get_mut(handle.key()),
        }
    }

    // ---------------------------------------------------------------------
    // Dispatch
    // ---------------------------------------------------------------------

    /// Run one pass of the main loop. Never blocks and never allocates.
    pub fn tick(&mut self) {
        self.counters.inc_pass();
        let now = self.timeline.observe(self.clock.now_ms());
        self.run_timed(now);
        self.run_untimed(now);
    }

    fn run_timed(&mut self, now: u64) {
        let horizon = self.queue.next_seq();
        while let Some(entry) = self.queue.peek() {
            if entry.seq >= horizon || entry.due > now {
                break;
            }
            self.queue.pop();

            let Some(reaction) = self.timed.get_mut(entry.key) else {
                continue;
            };
            if !reaction.trigger.is_ready(now) {
                continue;
            }
            self.counters.record_lateness_ms(now - entry.due);
            let handle = ReactionHandle::new(StoreClass::Timed, entry.key);

            let Some(interval) = repeat_interval(&reaction.trigger) else {
                let Some(retired) = self.timed.remove(entry.key) else {
                    continue;
                };
                if retired.enabled
                    && let Some(mut callback) = retired.callback
                {
                    self.counters.inc_timed_fire();
                    trace!(%handle, now, "delay fired");
                    callback(self);
                }
                continue;
            };

            reaction.trigger = Trigger::Repeat { interval, last: now };
            let callback = if reaction.enabled {
                reaction.callback.take()
            } else {
                None
            };
            self.queue
                .push(now.saturating_add(u64::from(interval)), entry.key);

            if let Some(mut callback) = callback {
                self.counters.inc_timed_fire();
                trace!(%handle, now, "repeat fired");
                callback(self);
                if let Some(reaction) = self.timed.get_mut(entry.key) {
                    reaction.restore(callback);
                }
            }
        }
    }

    fn run_untimed(&mut self, now: u64) {
        let mut index = 0;
        while index < self.untimed.top() {
            let ready = self.untimed.occupant_mut(index).and_then(|(key, reaction)| {
                // Running further up the stack: leave its pending edge alone.
                if reaction.callback.is_none() {
                    return None;
                }
                if !reaction.enabled {
                    reaction.trigger.drain();
                    return None;
                }
                if reaction.trigger.is_ready(now) {
                    reaction.callback.take().map(|callback| (key, callback))
                } else {
                    None
                }
            });

            if let Some((key, mut callback)) = ready {
                self.counters.inc_untimed_fire();
                trace!(handle = %ReactionHandle::new(StoreClass::Untimed, key), "untimed fired");
                callback(self);
                if let Some(reaction) = self.untimed.get_mut(key) {
                    reaction.restore(callback);
                }
            }
            index += 1;
        }
    }

    // ---------------------------------------------------------------------
    // Introspection
    // ---------------------------------------------------------------------

    /// Extended clock time seen by the latest pass or registration.
    #[must_use]
    pub fn now(&self) -> u64 {
        self.timeline.now()
    }

    /// Live reactions of every kind.
    #[must_use]
    pub fn len(&self) -> usize {
        self.timed.len() + self.untimed.len()
    }

    /// No live reactions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Live delayed and repeating reactions.
    #[must_use]
    pub fn timed_len(&self) -> usize {
        self.timed.len()
    }

    /// Live tick, stream and interrupt reactions.
    #[must_use]
    pub fn untimed_len(&self) -> usize {
        self.untimed.len()
    }

    /// One past the highest occupied untimed slot.
    #[must_use]
    pub fn high_water_mark(&self) -> usize {
        self.untimed.top()
    }

    /// Interrupt vectors not bound to a pin.
    #[must_use]
    pub fn free_vectors(&self) -> usize {
        self.vectors.free_count()
    }

    /// Dispatch counters since construction.
    #[must_use]
    pub fn stats(&self) -> CounterSnapshot {
        self.counters.snapshot()
    }

    /// Read and zero the dispatch counters.
    pub fn take_stats(&self) -> CounterSnapshot {
        self.counters.snapshot_and_reset()
    }
}

fn repeat_interval(trigger: &Trigger) -> Option<u32> {
    match trigger {
        Trigger::Repeat { interval, .. } => Some(*interval),
        _ => None,
    }
}

impl std::fmt::Debug for Reactor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reactor")
            .field("config", &self.config)
            .field("now", &self.timeline.now())
            .field("timed", &self.timed.len())
            .field("untimed", &self.untimed.len())
            .field("high_water_mark", &self.untimed.top())
            .field("free_vectors", &self.vectors.free_count())
            .finish_non_exhaustive()
    }
}

impl Drop for Reactor {
    fn drop(&mut self) {
        for index in 0..self.untimed.top() {
            let pin = self
                .untimed
                .occupant_mut(index)
                .and_then(|(_, reaction)| match &reaction.trigger {
                    Trigger::Interrupt(binding) => Some(binding.pin),
                    _ => None,
                });
            if let Some(pin) = pin {
                self.interrupts.detach(pin);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reactkit_hal::{ManualClock, SoftwareInterrupts};
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    fn reactor(clock: &ManualClock) -> Result<Reactor, ReactkitError> {
        Reactor::new(
            SchedulerConfig::builder()
                .untimed_capacity(4)
                .timed_capacity(4)
                .interrupt_vectors(2)
                .build()?,
            clock.clone(),
            SoftwareInterrupts::new(),
        )
    }

    fn counter() -> (Rc<Cell<u32>>, impl FnMut(&mut Reactor) + 'static) {
        let count = Rc::new(Cell::new(0));
        let inner = Rc::clone(&count);
        (count, move |_: &mut Reactor| inner.set(inner.get() + 1))
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = SchedulerConfig {
            timed_capacity: 0,
            ..SchedulerConfig::default()
        };
        let result = Reactor::new(config, ManualClock::new(0), SoftwareInterrupts::new());
        assert!(matches!(result, Err(ReactkitError::Validation(_))));
    }

    #[test]
    fn test_delay_retires_before_callback() -> Result<(), Box<dyn std::error::Error>> {
        let clock = ManualClock::new(0);
        let mut reactor = reactor(&clock)?;
        let seen = Rc::new(Cell::new(None));
        let slot = Rc::new(Cell::new(None));

        let seen_in = Rc::clone(&seen);
        let slot_in = Rc::clone(&slot);
        let handle = reactor.register_delayed(10, move |r| {
            seen_in.set(slot_in.get().map(|h| r.is_valid(h)));
        })?;
        slot.set(Some(handle));

        clock.set(10);
        reactor.tick();
        assert_eq!(seen.get(), Some(false));
        assert!(!reactor.is_valid(handle));
        assert_eq!(reactor.timed_len(), 0);
        Ok(())
    }

    #[test]
    fn test_interval_zero_fires_once_per_pass() -> Result<(), Box<dyn std::error::Error>> {
        let clock = ManualClock::new(0);
        let mut reactor = reactor(&clock)?;
        let (count, cb) = counter();
        reactor.register_repeating(0, cb)?;

        reactor.tick();
        reactor.tick();
        reactor.tick();
        assert_eq!(count.get(), 3);
        Ok(())
    }

    #[test]
    fn test_delay_registered_in_callback_waits_for_next_pass()
    -> Result<(), Box<dyn std::error::Error>> {
        let clock = ManualClock::new(0);
        let mut reactor = reactor(&clock)?;
        let (count, mut cb) = counter();
        let mut pending = Some(move |r: &mut Reactor| cb(r));

        reactor.register_delayed(0, move |r| {
            if let Some(next) = pending.take() {
                let _ = r.register_delayed(0, next);
            }
        })?;

        reactor.tick();
        assert_eq!(count.get(), 0);
        assert_eq!(reactor.timed_len(), 1);
        reactor.tick();
        assert_eq!(count.get(), 1);
        Ok(())
    }

    #[test]
    fn test_disabled_repeat_keeps_schedule() -> Result<(), Box<dyn std::error::Error>> {
        let clock = ManualClock::new(0);
        let mut reactor = reactor(&clock)?;
        let (count, cb) = counter();
        let handle = reactor.register_repeating(10, cb)?;

        assert!(reactor.set_enabled(handle, false));
        clock.set(10);
        reactor.tick();
        assert_eq!(count.get(), 0);
        assert_eq!(reactor.due_at(handle), Some(20));

        assert!(reactor.set_enabled(handle, true));
        clock.set(20);
        reactor.tick();
        assert_eq!(count.get(), 1);
        assert_eq!(reactor.is_enabled(handle), Some(true));
        Ok(())
    }

    #[test]
    fn test_disabled_delay_retires_silently() -> Result<(), Box<dyn std::error::Error>> {
        let clock = ManualClock::new(0);
        let mut reactor = reactor(&clock)?;
        let (count, cb) = counter();
        let handle = reactor.register_delayed(5, cb)?;
        reactor.set_enabled(handle, false);

        clock.set(5);
        reactor.tick();
        assert_eq!(count.get(), 0);
        assert!(!reactor.is_valid(handle));
        Ok(())
    }

    #[test]
    fn test_repeat_can_cancel_itself() -> Result<(), Box<dyn std::error::Error>> {
        let clock = ManualClock::new(0);
        let mut reactor = reactor(&clock)?;
        let me = Rc::new(Cell::new(None));
        let fired = Rc::new(Cell::new(0));

        let me_in = Rc::clone(&me);
        let fired_in = Rc::clone(&fired);
        let handle = reactor.register_repeating(1, move |r| {
            fired_in.set(fired_in.get() + 1);
            if let Some(h) = me_in.get() {
                r.cancel(h);
            }
        })?;
        me.set(Some(handle));

        for t in 1..5 {
            clock.set(t);
            reactor.tick();
        }
        assert_eq!(fired.get(), 1);
        assert!(reactor.is_empty());
        Ok(())
    }

    #[test]
    fn test_tick_added_mid_pass_runs_same_pass() -> Result<(), Box<dyn std::error::Error>> {
        let clock = ManualClock::new(0);
        let mut reactor = reactor(&clock)?;
        let log = Rc::new(RefCell::new(Vec::new()));

        let log_in = Rc::clone(&log);
        let mut added = false;
        reactor.register_on_tick(move |r| {
            log_in.borrow_mut().push("first");
            if !added {
                added = true;
                let log_late = Rc::clone(&log_in);
                let _ = r.register_on_tick(move |_| log_late.borrow_mut().push("second"));
            }
        })?;

        reactor.tick();
        assert_eq!(*log.borrow(), vec!["first", "second"]);
        Ok(())
    }

    #[test]
    fn test_counters_track_activity() -> Result<(), Box<dyn std::error::Error>> {
        let clock = ManualClock::new(0);
        let mut reactor = reactor(&clock)?;
        let (_, tick) = counter();
        let (_, late) = counter();
        reactor.register_on_tick(tick)?;
        let handle = reactor.register_delayed(10, late)?;

        clock.set(15);
        reactor.tick();
        assert!(!reactor.cancel(handle));

        let stats = reactor.stats();
        assert_eq!(stats.passes, 1);
        assert_eq!(stats.timed_fires, 1);
        assert_eq!(stats.untimed_fires, 1);
        assert_eq!(stats.registrations, 2);
        assert_eq!(stats.cancellations, 0);
        assert_eq!(stats.max_lateness_ms, 5);
        Ok(())
    }

    #[test]
    fn test_only_owner_cancels_are_counted() -> Result<(), Box<dyn std::error::Error>> {
        let clock = ManualClock::new(0);
        let mut reactor = reactor(&clock)?;
        let (fired, once) = counter();
        reactor.register_delayed(5, once)?;
        let repeat = reactor.register_repeating(50, |_| {})?;

        clock.set(5);
        reactor.tick();
        assert_eq!(fired.get(), 1);
        assert_eq!(reactor.stats().cancellations, 0);

        assert!(reactor.cancel(repeat));
        assert_eq!(reactor.stats().cancellations, 1);
        Ok(())
    }

    #[test]
    fn test_interrupt_binding_reports_pin_and_mode() -> Result<(), Box<dyn std::error::Error>> {
        let clock = ManualClock::new(0);
        let mut reactor = reactor(&clock)?;
        let falling = reactor.register_on_falling(Pin::new(4), |_| {})?;
        let tick = reactor.register_on_tick(|_| {})?;

        assert_eq!(
            reactor.interrupt_binding(falling),
            Some((Pin::new(4), EdgeMode::Falling))
        );
        assert_eq!(reactor.interrupt_binding(tick), None);

        reactor.cancel(falling);
        assert_eq!(reactor.interrupt_binding(falling), None);
        Ok(())
    }

    #[test]
    fn test_take_stats_starts_a_new_window() -> Result<(), Box<dyn std::error::Error>> {
        let clock = ManualClock::new(0);
        let mut reactor = reactor(&clock)?;
        let (_, tick) = counter();
        reactor.register_on_tick(tick)?;
        reactor.tick();
        reactor.tick();

        let first = reactor.take_stats();
        assert_eq!(first.passes, 2);
        assert_eq!(first.untimed_fires, 2);

        reactor.tick();
        let second = reactor.take_stats();
        assert_eq!(second.passes, 1);
        assert_eq!(second.registrations, 0);
        Ok(())
    }

    #[test]
    fn test_drop_detaches_interrupts() -> Result<(), Box<dyn std::error::Error>> {
        let irq = SoftwareInterrupts::new();
        let mut reactor = Reactor::new(SchedulerConfig::default(), ManualClock::new(0), irq.clone())?;
        reactor.register_on_rising(Pin::new(2), |_| {})?;
        assert!(irq.is_attached(Pin::new(2)));

        drop(reactor);
        assert!(!irq.is_attached(Pin::new(2)));
        Ok(())
    }
}
