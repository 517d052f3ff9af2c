//! Reactor sizing.

use reactkit_errors::{ValidationError, validate_range};

/// Largest reaction table the reactor accepts.
pub const MAX_CAPACITY: usize = 4096;

/// Hardware interrupt vectors are a small fixed pool on every supported part.
pub const MAX_INTERRUPT_VECTORS: usize = 16;

/// Storage limits for a [`Reactor`](crate::Reactor).
///
/// Every table is allocated once when the reactor is built. Registration
/// beyond these limits fails; the dispatch pass never allocates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerConfig {
    /// Slots for tick, stream and interrupt reactions.
    ///
    /// Default: 16.
    pub untimed_capacity: usize,

    /// Slots for delayed and repeating reactions.
    ///
    /// Default: 16.
    pub timed_capacity: usize,

    /// Interrupt vectors available for pin bindings.
    ///
    /// Default: 8.
    pub interrupt_vectors: usize,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            untimed_capacity: 16,
            timed_capacity: 16,
            interrupt_vectors: 8,
        }
    }
}

impl SchedulerConfig {
    /// Create a configuration builder.
    #[must_use]
    pub fn builder() -> SchedulerConfigBuilder {
        SchedulerConfigBuilder::default()
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::OutOfRange`] for a zero or oversized table,
    /// and [`ValidationError::Constraint`] when there are more interrupt
    /// vectors than untimed slots to hold their reactions.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_range!("untimed_capacity", self.untimed_capacity, 1, MAX_CAPACITY);
        validate_range!("timed_capacity", self.timed_capacity, 1, MAX_CAPACITY);
        validate_range!(
            "interrupt_vectors",
            self.interrupt_vectors,
            1,
            MAX_INTERRUPT_VECTORS
        );
        if self.interrupt_vectors > self.untimed_capacity {
            return Err(ValidationError::constraint(
                "interrupt_vectors must not exceed untimed_capacity",
            ));
        }
        Ok(())
    }

    /// Clamp every field into its valid range.
    #[must_use]
    pub fn normalize(mut self) -> Self {
        self.untimed_capacity = self.untimed_capacity.clamp(1, MAX_CAPACITY);
        self.timed_capacity = self.timed_capacity.clamp(1, MAX_CAPACITY);
        self.interrupt_vectors = self
            .interrupt_vectors
            .clamp(1, MAX_INTERRUPT_VECTORS)
            .min(self.untimed_capacity);
        self
    }

    /// Total reactions the reactor can hold at once.
    #[must_use]
    pub fn total_capacity(&self) -> usize {
        self.untimed_capacity + self.timed_capacity
    }
}

/// Builder for [`SchedulerConfig`].
#[derive(Debug, Default)]
pub struct SchedulerConfigBuilder {
    config: SchedulerConfig,
}

impl SchedulerConfigBuilder {
    /// Set the untimed table size.
    #[must_use]
    pub fn untimed_capacity(mut self, slots: usize) -> Self {
        self.config.untimed_capacity = slots;
        self
    }

    /// Set the timed table size.
    #[must_use]
    pub fn timed_capacity(mut self, slots: usize) -> Self {
        self.config.timed_capacity = slots;
        self
    }

    /// Set the interrupt vector pool size.
    #[must_use]
    pub fn interrupt_vectors(mut self, vectors: usize) -> Self {
        self.config.interrupt_vectors = vectors;
        self
    }

    /// Build the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn build(self) -> Result<SchedulerConfig, ValidationError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SchedulerConfig::default();
        assert_eq!(config.untimed_capacity, 16);
        assert_eq!(config.timed_capacity, 16);
        assert_eq!(config.interrupt_vectors, 8);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let result = SchedulerConfig::builder()
            .untimed_capacity(4)
            .timed_capacity(32)
            .interrupt_vectors(2)
            .build();
        assert!(result.is_ok());
        if let Ok(config) = result {
            assert_eq!(config.untimed_capacity, 4);
            assert_eq!(config.timed_capacity, 32);
            assert_eq!(config.total_capacity(), 36);
        }
    }

    #[test]
    fn test_config_validation() {
        let zero = SchedulerConfig::builder().timed_capacity(0).build();
        assert!(matches!(zero, Err(ValidationError::OutOfRange { .. })));

        let vectors = SchedulerConfig::builder().interrupt_vectors(17).build();
        assert!(matches!(vectors, Err(ValidationError::OutOfRange { .. })));

        let starved = SchedulerConfig::builder()
            .untimed_capacity(2)
            .interrupt_vectors(4)
            .build();
        assert!(matches!(starved, Err(ValidationError::Constraint(_))));
    }

    #[test]
    fn test_normalize_clamps() {
        let config = SchedulerConfig {
            untimed_capacity: 0,
            timed_capacity: 100_000,
            interrupt_vectors: 99,
        }
        .normalize();

        assert_eq!(config.untimed_capacity, 1);
        assert_eq!(config.timed_capacity, MAX_CAPACITY);
        assert_eq!(config.interrupt_vectors, 1);
        assert!(config.validate().is_ok());
    }
}
