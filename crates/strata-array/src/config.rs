//! Container configuration parameters.

use strata_core::ArrayError;

/// Configuration for a [`DynamicArray`](crate::DynamicArray).
///
/// Controls the initial allocation, the growth factor applied when an
/// insertion finds the buffer full, and an optional capacity ceiling.
/// Validated at construction; immutable for the lifetime of the container.
#[derive(Clone, Debug, PartialEq)]
pub struct ArrayConfig {
    /// Number of element slots allocated at construction.
    ///
    /// Default: 8. Zero is allowed and performs no allocation.
    pub initial_capacity: usize,

    /// Multiplier applied to the capacity on each growth step.
    ///
    /// Default: 1.6. Must be finite and strictly greater than 1.0.
    pub growth_factor: f64,

    /// Upper bound on capacity in elements, or `None` for unbounded.
    ///
    /// Growth is clamped to this value; once reached, further insertions
    /// into a full container fail with [`ArrayError::CapacityExceeded`].
    pub max_capacity: Option<usize>,
}

impl ArrayConfig {
    /// Default initial capacity in elements.
    pub const DEFAULT_INITIAL_CAPACITY: usize = 8;

    /// Default growth factor.
    pub const DEFAULT_GROWTH_FACTOR: f64 = 1.6;

    /// Create a config with default values for every parameter.
    pub fn new() -> Self {
        Self {
            initial_capacity: Self::DEFAULT_INITIAL_CAPACITY,
            growth_factor: Self::DEFAULT_GROWTH_FACTOR,
            max_capacity: None,
        }
    }

    /// Replace the initial capacity.
    #[must_use]
    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Replace the growth factor.
    #[must_use]
    pub fn with_growth_factor(mut self, factor: f64) -> Self {
        self.growth_factor = factor;
        self
    }

    /// Set a capacity ceiling.
    #[must_use]
    pub fn with_max_capacity(mut self, max: usize) -> Self {
        self.max_capacity = Some(max);
        self
    }

    /// Check every parameter, returning [`ArrayError::InvalidConfig`] on
    /// the first violation.
    pub fn validate(&self) -> Result<(), ArrayError> {
        if !self.growth_factor.is_finite() || self.growth_factor <= 1.0 {
            return Err(ArrayError::InvalidConfig {
                reason: format!(
                    "growth_factor must be finite and > 1.0, got {}",
                    self.growth_factor
                ),
            });
        }
        if let Some(max) = self.max_capacity {
            if self.initial_capacity > max {
                return Err(ArrayError::InvalidConfig {
                    reason: format!(
                        "initial_capacity {} exceeds max_capacity {max}",
                        self.initial_capacity
                    ),
                });
            }
        }
        Ok(())
    }

    /// Capacity to grow to from `current`.
    ///
    /// `max(current + 1, floor(current * growth_factor))`, clamped to
    /// `max_capacity`. The `+ 1` floor keeps growth strict for small
    /// capacities, where `floor(1 * 1.6)` would otherwise stall at 1.
    pub fn next_capacity(&self, current: usize) -> Result<usize, ArrayError> {
        let minimum = current
            .checked_add(1)
            .ok_or(ArrayError::CapacityOverflow { requested: current })?;
        // `as usize` saturates and truncates toward zero, i.e. floors.
        let scaled = (current as f64 * self.growth_factor) as usize;
        let target = minimum.max(scaled);
        match self.max_capacity {
            Some(max) if current >= max => Err(ArrayError::CapacityExceeded {
                requested: minimum,
                max,
            }),
            Some(max) => Ok(target.min(max)),
            None => Ok(target),
        }
    }
}

impl Default for ArrayConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_constants() {
        let config = ArrayConfig::default();
        assert_eq!(config.initial_capacity, 8);
        assert_eq!(config.growth_factor, 1.6);
        assert_eq!(config.max_capacity, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn growth_sequence_from_default() {
        let config = ArrayConfig::new();
        assert_eq!(config.next_capacity(8).unwrap(), 12);
        assert_eq!(config.next_capacity(12).unwrap(), 19);
        assert_eq!(config.next_capacity(19).unwrap(), 30);
    }

    #[test]
    fn small_capacities_still_grow() {
        let config = ArrayConfig::new();
        assert_eq!(config.next_capacity(0).unwrap(), 1);
        assert_eq!(config.next_capacity(1).unwrap(), 2);
        assert_eq!(config.next_capacity(2).unwrap(), 3);
    }

    #[test]
    fn doubling_factor() {
        let config = ArrayConfig::new().with_growth_factor(2.0);
        assert_eq!(config.next_capacity(0).unwrap(), 1);
        assert_eq!(config.next_capacity(8).unwrap(), 16);
    }

    #[test]
    fn growth_clamped_to_max() {
        let config = ArrayConfig::new().with_max_capacity(10);
        assert_eq!(config.next_capacity(8).unwrap(), 10);
        assert!(matches!(
            config.next_capacity(10),
            Err(ArrayError::CapacityExceeded { max: 10, .. })
        ));
    }

    #[test]
    fn overflow_is_reported() {
        let config = ArrayConfig::new();
        assert!(matches!(
            config.next_capacity(usize::MAX),
            Err(ArrayError::CapacityOverflow { .. })
        ));
    }

    #[test]
    fn rejects_bad_growth_factor() {
        for factor in [1.0, 0.5, -2.0, f64::NAN, f64::INFINITY] {
            let config = ArrayConfig::new().with_growth_factor(factor);
            assert!(
                matches!(config.validate(), Err(ArrayError::InvalidConfig { .. })),
                "factor {factor} should be rejected"
            );
        }
    }

    #[test]
    fn rejects_initial_above_max() {
        let config = ArrayConfig::new().with_initial_capacity(32).with_max_capacity(16);
        assert!(matches!(
            config.validate(),
            Err(ArrayError::InvalidConfig { .. })
        ));
    }
}
