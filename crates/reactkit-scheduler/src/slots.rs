//! Fixed-capacity slot table with generation-checked keys.
//!
//! The table is dense from zero up to a high-water mark (`top`). Allocation
//! takes the lowest free slot below `top` before growing it; freeing the top
//! slot retracts `top` past every trailing free slot. Each free bumps the
//! slot's generation so keys handed out earlier stop resolving.

use crate::handle::SlotKey;

#[derive(Debug)]
struct Slot<T> {
    generation: u32,
    entry: Option<T>,
}

/// Arena of `capacity` slots, allocated up front.
#[derive(Debug)]
pub struct SlotTable<T> {
    slots: Vec<Slot<T>>,
    top: usize,
    live: usize,
}

impl<T> SlotTable<T> {
    /// Allocate every slot now. Capacity is capped at `u16::MAX + 1` slots.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.min(usize::from(u16::MAX) + 1);
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || Slot {
            generation: 0,
            entry: None,
        });
        Self {
            slots,
            top: 0,
            live: 0,
        }
    }

    /// Total slots.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Occupied slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.live
    }

    /// No occupied slots.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Every slot is occupied.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.live >= self.slots.len()
    }

    /// One past the highest occupied slot.
    #[must_use]
    pub fn top(&self) -> usize {
        self.top
    }

    /// Store `value` in the lowest free slot. `None` when full.
    pub fn insert(&mut self, value: T) -> Option<SlotKey> {
        let index = self
            .slots
            .iter()
            .take(self.top)
            .position(|slot| slot.entry.is_none())
            .unwrap_or(self.top);
        let key_index = u16::try_from(index).ok()?;
        let slot = self.slots.get_mut(index)?;

        slot.entry = Some(value);
        self.live += 1;
        if index >= self.top {
            self.top = index + 1;
        }
        Some(SlotKey {
            index: key_index,
            generation: slot.generation,
        })
    }

    /// Whether `key` still names an occupied slot.
    #[must_use]
    pub fn contains(&self, key: SlotKey) -> bool {
        self.get(key).is_some()
    }

    /// Borrow the entry behind `key`.
    #[must_use]
    pub fn get(&self, key: SlotKey) -> Option<&T> {
        self.slots
            .get(usize::from(key.index))
            .filter(|slot| slot.generation == key.generation)
            .and_then(|slot| slot.entry.as_ref())
    }

    /// Mutably borrow the entry behind `key`.
    pub fn get_mut(&mut self, key: SlotKey) -> Option<&mut T> {
        self.slots
            .get_mut(usize::from(key.index))
            .filter(|slot| slot.generation == key.generation)
            .and_then(|slot| slot.entry.as_mut())
    }

    /// The occupant of slot `index`, with its key, if any.
    pub fn occupant_mut(&mut self, index: usize) -> Option<(SlotKey, &mut T)> {
        let key_index = u16::try_from(index).ok()?;
        let slot = self.slots.get_mut(index)?;
        let generation = slot.generation;
        slot.entry.as_mut().map(|entry| {
            (
                SlotKey {
                    index: key_index,
                    generation,
                },
                entry,
            )
        })
    }

    /// The key of the occupant of slot `index`, if any.
    #[must_use]
    pub fn key_at(&self, index: usize) -> Option<SlotKey> {
        let key_index = u16::try_from(index).ok()?;
        let slot = self.slots.get(index)?;
        slot.entry.as_ref().map(|_| SlotKey {
            index: key_index,
            generation: slot.generation,
        })
    }

    /// Free the slot behind `key` and hand back its entry.
    pub fn remove(&mut self, key: SlotKey) -> Option<T> {
        let slot = self
            .slots
            .get_mut(usize::from(key.index))
            .filter(|slot| slot.generation == key.generation)?;
        let entry = slot.entry.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.live -= 1;

        while self.top > 0
            && self
                .slots
                .get(self.top - 1)
                .is_some_and(|slot| slot.entry.is_none())
        {
            self.top -= 1;
        }
        Some(entry)
    }
}
