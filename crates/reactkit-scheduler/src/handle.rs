//! Opaque reaction handles.

use core::fmt;

/// Which table a reaction lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreClass {
    /// Delayed and repeating reactions, ordered by due time.
    Timed,
    /// Tick, stream and interrupt reactions, polled in slot order.
    Untimed,
}

/// The variant of a live reaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReactionKind {
    /// Fires once after an interval, then retires.
    Delay,
    /// Fires every interval, measured from the previous fire.
    Repeat,
    /// Fires on each pass while its byte source has data.
    Available,
    /// Fires on every pass.
    Tick,
    /// Fires on the pass after a pin edge.
    Interrupt,
}

impl ReactionKind {
    /// The table reactions of this kind are stored in.
    #[must_use]
    pub const fn class(self) -> StoreClass {
        match self {
            ReactionKind::Delay | ReactionKind::Repeat => StoreClass::Timed,
            ReactionKind::Available | ReactionKind::Tick | ReactionKind::Interrupt => {
                StoreClass::Untimed
            }
        }
    }
}

/// Reference to a registered reaction.
///
/// A handle stays valid until its reaction is cancelled or, for a delayed
/// reaction, until it fires. A stale handle never aliases a newer reaction
/// that reuses the slot: the generation differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReactionHandle {
    class: StoreClass,
    key: SlotKey,
}

impl ReactionHandle {
    pub(crate) const fn new(class: StoreClass, key: SlotKey) -> Self {
        Self { class, key }
    }

    /// The table this handle points into.
    #[must_use]
    pub const fn class(&self) -> StoreClass {
        self.class
    }

    /// Slot index inside its table.
    #[must_use]
    pub const fn index(&self) -> u16 {
        self.key.index
    }

    /// Generation of the slot when the reaction was registered.
    #[must_use]
    pub const fn generation(&self) -> u32 {
        self.key.generation
    }

    pub(crate) const fn key(&self) -> SlotKey {
        self.key
    }
}

impl fmt::Display for ReactionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = match self.class {
            StoreClass::Timed => 't',
            StoreClass::Untimed => 'u',
        };
        write!(f, "{prefix}{}#{}", self.key.index, self.key.generation)
    }
}

/// Index and generation of an occupied slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotKey {
    /// Slot index
    pub index: u16,
    /// Generation at allocation time
    pub generation: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_class() {
        assert_eq!(ReactionKind::Delay.class(), StoreClass::Timed);
        assert_eq!(ReactionKind::Repeat.class(), StoreClass::Timed);
        assert_eq!(ReactionKind::Interrupt.class(), StoreClass::Untimed);
    }

    #[test]
    fn test_handle_display() {
        let handle = ReactionHandle::new(
            StoreClass::Untimed,
            SlotKey {
                index: 3,
                generation: 7,
            },
        );
        assert_eq!(handle.to_string(), "u3#7");
        assert_eq!(handle.index(), 3);
        assert_eq!(handle.generation(), 7);
    }
}
