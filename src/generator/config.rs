//! Generator configuration.

use crate::domain::UNIVERSE_SIZE;
use crate::error::{Result, SetExprError};

/// Size ranges for random instance generation.
///
/// Every range is inclusive. Elements are drawn from `0..universe_size`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeneratorConfig {
    /// Number of addressable elements (at most [`UNIVERSE_SIZE`]).
    pub universe_size: usize,

    /// Smallest target size; the largest is `universe_size`.
    pub target_size_min: usize,

    /// Family size range.
    pub family_min: usize,
    pub family_max: usize,

    /// Size range of each base set.
    pub set_size_min: usize,
    pub set_size_max: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            universe_size: UNIVERSE_SIZE,
            target_size_min: 10,
            family_min: 6,
            family_max: 10,
            set_size_min: 10,
            set_size_max: 80,
        }
    }
}

impl GeneratorConfig {
    pub fn with_universe_size(mut self, n: usize) -> Self {
        self.universe_size = n;
        self
    }

    pub fn with_target_size_min(mut self, n: usize) -> Self {
        self.target_size_min = n;
        self
    }

    pub fn with_family_range(mut self, min: usize, max: usize) -> Self {
        self.family_min = min;
        self.family_max = max;
        self
    }

    pub fn with_set_size_range(mut self, min: usize, max: usize) -> Self {
        self.set_size_min = min;
        self.set_size_max = max;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(SetExprError::InvalidConfig(msg));

        if self.universe_size == 0 || self.universe_size > UNIVERSE_SIZE {
            return invalid(format!(
                "universe_size must be in 1..={UNIVERSE_SIZE}, got {}",
                self.universe_size
            ));
        }
        if self.target_size_min > self.universe_size {
            return invalid(format!(
                "target_size_min {} exceeds universe_size {}",
                self.target_size_min, self.universe_size
            ));
        }
        if self.family_min > self.family_max {
            return invalid(format!(
                "family range is empty: {}..={}",
                self.family_min, self.family_max
            ));
        }
        if self.set_size_min > self.set_size_max {
            return invalid(format!(
                "set size range is empty: {}..={}",
                self.set_size_min, self.set_size_max
            ));
        }
        if self.set_size_max > self.universe_size {
            return invalid(format!(
                "set_size_max {} exceeds universe_size {}",
                self.set_size_max, self.universe_size
            ));
        }
        Ok(())
    }
}
