//! Greedy search configuration.

use crate::error::{Result, SetExprError};

/// Configuration for [`GreedyRunner`](super::GreedyRunner).
///
/// ```
/// use u_setexpr::greedy::GreedyConfig;
///
/// let config = GreedyConfig::default().with_max_ops(8);
/// assert_eq!(config.max_ops, 8);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GreedyConfig {
    /// Operation budget `k`: the frontier is extended at most `k` times.
    pub max_ops: usize,
}

impl Default for GreedyConfig {
    fn default() -> Self {
        Self { max_ops: 5 }
    }
}

impl GreedyConfig {
    /// Sets the operation budget.
    pub fn with_max_ops(mut self, k: usize) -> Self {
        self.max_ops = k;
        self
    }
}

/// Configuration for [`HillClimbRunner`](super::HillClimbRunner).
///
/// # Examples
///
/// ```
/// use u_setexpr::greedy::HillClimbConfig;
///
/// let config = HillClimbConfig::default()
///     .with_max_ops(5)
///     .with_tolerance(1e-9);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HillClimbConfig {
    /// Operation budget. The opening move from `∅` is not counted.
    pub max_ops: usize,

    /// The climb stops once jaccard is within this distance of 1.0.
    pub tolerance: f64,

    /// Scan candidates with rayon. Only effective with the `parallel`
    /// feature; the chosen move is identical either way.
    pub parallel: bool,
}

impl Default for HillClimbConfig {
    fn default() -> Self {
        Self {
            max_ops: 5,
            tolerance: 1e-6,
            parallel: false,
        }
    }
}

impl HillClimbConfig {
    /// Sets the operation budget.
    pub fn with_max_ops(mut self, k: usize) -> Self {
        self.max_ops = k;
        self
    }

    /// Sets the convergence tolerance.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Enables or disables the parallel candidate scan.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..1.0).contains(&self.tolerance) {
            return Err(SetExprError::InvalidConfig(format!(
                "tolerance must be in [0, 1), got {}",
                self.tolerance
            )));
        }
        Ok(())
    }
}
