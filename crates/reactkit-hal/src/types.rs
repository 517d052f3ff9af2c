//! Small value types shared across the hardware boundary.

use core::fmt;

/// A digital pin number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pin(u8);

impl Pin {
    /// Wrap a board pin number.
    #[must_use]
    pub const fn new(number: u8) -> Self {
        Self(number)
    }

    /// The board pin number.
    #[must_use]
    pub const fn number(self) -> u8 {
        self.0
    }
}

impl From<u8> for Pin {
    fn from(number: u8) -> Self {
        Self(number)
    }
}

impl fmt::Display for Pin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

/// Logic level of a digital pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Level {
    /// Logic low
    #[default]
    Low,
    /// Logic high
    High,
}

impl Level {
    /// The opposite level.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Level::Low => Level::High,
            Level::High => Level::Low,
        }
    }

    /// `true` for [`Level::High`].
    #[must_use]
    pub const fn is_high(self) -> bool {
        matches!(self, Level::High)
    }
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high { Level::High } else { Level::Low }
    }
}

/// A single observed transition on a pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    /// Low to high
    Rising,
    /// High to low
    Falling,
}

impl Edge {
    /// The edge produced by going from `from` to `to`, if the level changed.
    #[must_use]
    pub fn between(from: Level, to: Level) -> Option<Self> {
        match (from, to) {
            (Level::Low, Level::High) => Some(Edge::Rising),
            (Level::High, Level::Low) => Some(Edge::Falling),
            _ => None,
        }
    }
}

/// Which edges an interrupt should fire on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeMode {
    /// Low to high transitions only
    Rising,
    /// High to low transitions only
    Falling,
    /// Either transition
    Change,
}

impl EdgeMode {
    /// Whether an observed edge should fire under this mode.
    #[must_use]
    pub const fn matches(self, edge: Edge) -> bool {
        matches!(
            (self, edge),
            (EdgeMode::Change, _)
                | (EdgeMode::Rising, Edge::Rising)
                | (EdgeMode::Falling, Edge::Falling)
        )
    }

    /// Lowercase name, used in logs and errors.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            EdgeMode::Rising => "rising",
            EdgeMode::Falling => "falling",
            EdgeMode::Change => "change",
        }
    }
}

impl fmt::Display for EdgeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Index of a hardware interrupt vector in the fixed vector pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VectorId(u8);

impl VectorId {
    /// Wrap a vector index.
    #[must_use]
    pub const fn new(index: u8) -> Self {
        Self(index)
    }

    /// The vector index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for VectorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "isr{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_between() {
        assert_eq!(Edge::between(Level::Low, Level::High), Some(Edge::Rising));
        assert_eq!(Edge::between(Level::High, Level::Low), Some(Edge::Falling));
        assert_eq!(Edge::between(Level::High, Level::High), None);
    }

    #[test]
    fn test_edge_mode_matches() {
        assert!(EdgeMode::Change.matches(Edge::Rising));
        assert!(EdgeMode::Change.matches(Edge::Falling));
        assert!(EdgeMode::Rising.matches(Edge::Rising));
        assert!(!EdgeMode::Rising.matches(Edge::Falling));
        assert!(!EdgeMode::Falling.matches(Edge::Rising));
    }

    #[test]
    fn test_level_toggle() {
        assert_eq!(Level::Low.toggled(), Level::High);
        assert_eq!(Level::from(true), Level::High);
        assert!(!Level::default().is_high());
    }
}
