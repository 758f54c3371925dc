//! Exhaustive search configuration.

use crate::error::{Result, SetExprError};

/// Largest operation budget the enumerator accepts.
///
/// Level sizes grow roughly as `|F|^(2^s)`; even tiny families are out of
/// reach well before this bound.
pub const MAX_EXHAUSTIVE_OPS: usize = 12;

/// Configuration for [`ExhaustiveRunner`](super::ExhaustiveRunner).
///
/// # Examples
///
/// ```
/// use u_setexpr::exhaustive::ExhaustiveConfig;
///
/// let config = ExhaustiveConfig::default()
///     .with_max_ops(3)
///     .with_prune_duplicate_sets(true);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExhaustiveConfig {
    /// Operation budget `k`. Every expression with `n_ops <= k` is scored.
    pub max_ops: usize,

    /// Drop an expression whose set was already produced by an expression
    /// using at most as many base sets.
    ///
    /// Pruned expressions are neither scored nor reused as operands, so the
    /// search is faster but no longer complete over expression strings.
    pub prune_duplicate_sets: bool,

    /// Also score the canonical `∅` expression once, after enumeration.
    /// It is never used as an operand.
    pub include_empty_set: bool,
}

impl Default for ExhaustiveConfig {
    fn default() -> Self {
        Self {
            max_ops: 2,
            prune_duplicate_sets: false,
            include_empty_set: false,
        }
    }
}

impl ExhaustiveConfig {
    /// Sets the operation budget.
    pub fn with_max_ops(mut self, k: usize) -> Self {
        self.max_ops = k;
        self
    }

    /// Enables or disables duplicate-set pruning.
    pub fn with_prune_duplicate_sets(mut self, prune: bool) -> Self {
        self.prune_duplicate_sets = prune;
        self
    }

    /// Enables or disables scoring of the empty expression.
    pub fn with_include_empty_set(mut self, include: bool) -> Self {
        self.include_empty_set = include;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.max_ops > MAX_EXHAUSTIVE_OPS {
            return Err(SetExprError::InvalidConfig(format!(
                "max_ops must be at most {MAX_EXHAUSTIVE_OPS} for exhaustive search, got {}",
                self.max_ops
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ExhaustiveConfig::default();
        assert_eq!(config.max_ops, 2);
        assert!(!config.prune_duplicate_sets);
        assert!(!config.include_empty_set);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = ExhaustiveConfig::default()
            .with_max_ops(4)
            .with_prune_duplicate_sets(true)
            .with_include_empty_set(true);
        assert_eq!(config.max_ops, 4);
        assert!(config.prune_duplicate_sets);
        assert!(config.include_empty_set);
    }

    #[test]
    fn test_validate_budget_too_large() {
        let config = ExhaustiveConfig::default().with_max_ops(MAX_EXHAUSTIVE_OPS + 1);
        assert!(matches!(
            config.validate(),
            Err(SetExprError::InvalidConfig(_))
        ));
    }
}
