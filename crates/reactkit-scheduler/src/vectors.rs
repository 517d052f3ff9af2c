//! The fixed pool of hardware interrupt vectors.

use std::sync::Arc;

use reactkit_atomic::InterruptLine;
use reactkit_hal::{Pin, VectorId};

/// Interrupt vectors and the pins bound to them.
///
/// Each vector owns one [`InterruptLine`] for its whole life; binding a new
/// pin resets the line instead of allocating a new one.
#[derive(Debug)]
pub struct VectorPool {
    lines: Vec<Arc<InterruptLine>>,
    bound: Vec<Option<Pin>>,
}

impl VectorPool {
    /// Create `count` idle vectors. Count is capped at 256.
    #[must_use]
    pub fn new(count: usize) -> Self {
        let count = count.min(usize::from(u8::MAX) + 1);
        Self {
            lines: (0..count).map(|_| Arc::new(InterruptLine::new())).collect(),
            bound: vec![None; count],
        }
    }

    /// Total vectors.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.bound.len()
    }

    /// Vectors not bound to a pin.
    #[must_use]
    pub fn free_count(&self) -> usize {
        self.bound.iter().filter(|pin| pin.is_none()).count()
    }

    /// Whether some vector is bound to `pin`.
    #[must_use]
    pub fn is_bound(&self, pin: Pin) -> bool {
        self.bound.contains(&Some(pin))
    }

    /// Bind the lowest free vector to `pin`. `None` when every vector is taken.
    pub fn acquire(&mut self, pin: Pin) -> Option<(VectorId, Arc<InterruptLine>)> {
        let index = self.bound.iter().position(Option::is_none)?;
        let id = VectorId::new(u8::try_from(index).ok()?);
        let line = self.lines.get(index)?;
        line.reset();
        let line = Arc::clone(line);
        if let Some(slot) = self.bound.get_mut(index) {
            *slot = Some(pin);
        }
        Some((id, line))
    }

    /// Return a vector to the pool. Releasing a free vector is a no-op.
    pub fn release(&mut self, vector: VectorId) {
        if let Some(slot) = self.bound.get_mut(vector.index()) {
            *slot = None;
        }
        if let Some(line) = self.lines.get(vector.index()) {
            line.reset();
        }
    }
}
