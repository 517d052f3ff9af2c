//! Callbacks that record their calls.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use reactkit_scheduler::Reactor;

/// Shared call count. Clones see the same count.
///
/// Counting never allocates, so a counter callback is safe inside an
/// allocation-tracked pass.
#[derive(Debug, Clone, Default)]
pub struct CallCounter {
    count: Rc<Cell<u32>>,
}

impl CallCounter {
    /// A counter at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A callback that bumps this counter.
    #[must_use]
    pub fn callback(&self) -> impl FnMut(&mut Reactor) + 'static {
        let count = Rc::clone(&self.count);
        move |_: &mut Reactor| count.set(count.get() + 1)
    }

    /// Calls so far.
    #[must_use]
    pub fn get(&self) -> u32 {
        self.count.get()
    }

    /// Back to zero.
    pub fn reset(&self) {
        self.count.set(0);
    }
}

/// Ordered record of which callbacks ran. Clones share the log.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Rc<RefCell<Vec<&'static str>>>,
}

impl EventLog {
    /// An empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A callback that appends `label`.
    #[must_use]
    pub fn recorder(&self, label: &'static str) -> impl FnMut(&mut Reactor) + 'static {
        let events = Rc::clone(&self.events);
        move |_: &mut Reactor| events.borrow_mut().push(label)
    }

    /// Append `label` directly.
    pub fn push(&self, label: &'static str) {
        self.events.borrow_mut().push(label);
    }

    /// Everything logged so far, oldest first.
    #[must_use]
    pub fn events(&self) -> Vec<&'static str> {
        self.events.borrow().clone()
    }

    /// How many times `label` was logged.
    #[must_use]
    pub fn count(&self, label: &str) -> usize {
        self.events.borrow().iter().filter(|e| **e == label).count()
    }

    /// Forget everything.
    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }
}
