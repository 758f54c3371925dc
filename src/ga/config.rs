//! NSGA-II configuration.
//!
//! [`NsgaConfig`] holds all parameters that control the evolutionary loop.

use super::construction::DEFAULT_CONSTRUCTION_ATTEMPTS;
use super::operators::{CrossoverPolicy, MutationPolicy};
use crate::error::{Result, SetExprError};

/// Configuration for the NSGA-II expression search.
///
/// # Defaults
///
/// ```
/// use u_setexpr::ga::NsgaConfig;
///
/// let config = NsgaConfig::default();
/// assert_eq!(config.population_size, 200);
/// assert_eq!(config.tournament_size, 2);
/// assert_eq!(config.time_limit_ms, Some(300_000));
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_setexpr::ga::{CrossoverPolicy, NsgaConfig};
///
/// let config = NsgaConfig::default()
///     .with_population_size(100)
///     .with_max_ops(6)
///     .with_crossover_policy(CrossoverPolicy::Recombine)
///     .with_mutation_rate(0.3)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NsgaConfig {
    /// Number of individuals kept after survivor selection.
    pub population_size: usize,

    /// Maximum number of generations before termination.
    ///
    /// The default is effectively unbounded; the time limit is the
    /// practical stop.
    pub max_generations: usize,

    /// Probability of applying crossover to a pair of parents (0.0–1.0).
    ///
    /// When crossover is not applied, a copy of one parent (chosen at
    /// random) is used.
    pub crossover_rate: f64,

    /// Probability of applying mutation to a child (0.0–1.0).
    pub mutation_rate: f64,

    /// Number of members drawn per tournament.
    pub tournament_size: usize,

    /// Optional wall-clock time limit in milliseconds.
    ///
    /// Checked at the start of each generation, so the actual runtime may
    /// exceed this limit by one generation's worth of work.
    pub time_limit_ms: Option<u64>,

    /// Random seed for reproducibility.
    ///
    /// `None` draws a fresh seed, reported in the result.
    pub seed: Option<u64>,

    /// Operation budget `k` of every expression in the population.
    pub max_ops: usize,

    /// Consecutive failed merges before random construction gives up.
    ///
    /// Also scales the stale-draw guard: initialization and offspring
    /// generation stop after `population_size * construction_attempts`
    /// consecutive duplicates.
    pub construction_attempts: usize,

    /// Crossover policy.
    pub crossover: CrossoverPolicy,

    /// Mutation policy.
    pub mutation: MutationPolicy,

    /// Stop as soon as a member reaches jaccard within
    /// [`PERFECT_JACCARD_TOLERANCE`](super::PERFECT_JACCARD_TOLERANCE) of 1.0.
    pub stop_on_perfect: bool,

    /// Collapse front members that evaluate to the same set.
    pub unique_sets: bool,

    /// Breed offspring in parallel with rayon. Only effective with the
    /// `parallel` feature; results are identical either way.
    pub parallel: bool,
}

impl Default for NsgaConfig {
    fn default() -> Self {
        Self {
            population_size: 200,
            max_generations: 1_000_000_000,
            crossover_rate: 0.8,
            mutation_rate: 0.4,
            tournament_size: 2,
            time_limit_ms: Some(300_000),
            seed: None,
            max_ops: 10,
            construction_attempts: DEFAULT_CONSTRUCTION_ATTEMPTS,
            crossover: CrossoverPolicy::default(),
            mutation: MutationPolicy::default(),
            stop_on_perfect: true,
            unique_sets: false,
            parallel: false,
        }
    }
}

impl NsgaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the maximum number of generations.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the crossover rate.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the tournament size.
    pub fn with_tournament_size(mut self, k: usize) -> Self {
        self.tournament_size = k;
        self
    }

    /// Sets the wall-clock time limit in milliseconds.
    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = Some(ms);
        self
    }

    /// Removes the time limit.
    pub fn without_time_limit(mut self) -> Self {
        self.time_limit_ms = None;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the operation budget.
    pub fn with_max_ops(mut self, k: usize) -> Self {
        self.max_ops = k;
        self
    }

    /// Sets the construction failure cap.
    pub fn with_construction_attempts(mut self, attempts: usize) -> Self {
        self.construction_attempts = attempts;
        self
    }

    /// Sets the crossover policy.
    pub fn with_crossover_policy(mut self, policy: CrossoverPolicy) -> Self {
        self.crossover = policy;
        self
    }

    /// Sets the mutation policy. A growth probability is clamped to `[0, 1]`.
    pub fn with_mutation_policy(mut self, policy: MutationPolicy) -> Self {
        self.mutation = match policy {
            MutationPolicy::GrowthOrRebuild { growth_probability } => {
                MutationPolicy::GrowthOrRebuild {
                    growth_probability: growth_probability.clamp(0.0, 1.0),
                }
            }
            other => other,
        };
        self
    }

    /// Enables or disables the early exit on a perfect match.
    pub fn with_stop_on_perfect(mut self, stop: bool) -> Self {
        self.stop_on_perfect = stop;
        self
    }

    /// Enables or disables set-level deduplication of the final front.
    pub fn with_unique_sets(mut self, unique: bool) -> Self {
        self.unique_sets = unique;
        self
    }

    /// Enables or disables parallel offspring generation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(SetExprError::InvalidConfig(msg));

        if self.population_size == 0 {
            return invalid("population_size must be at least 1".into());
        }
        if self.max_generations == 0 {
            return invalid("max_generations must be at least 1".into());
        }
        if !(0.0..=1.0).contains(&self.crossover_rate) {
            return invalid(format!(
                "crossover_rate must be in [0, 1], got {}",
                self.crossover_rate
            ));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return invalid(format!(
                "mutation_rate must be in [0, 1], got {}",
                self.mutation_rate
            ));
        }
        if self.tournament_size == 0 {
            return invalid("tournament_size must be at least 1".into());
        }
        if self.time_limit_ms == Some(0) {
            return invalid("time_limit_ms must be positive or None".into());
        }
        if self.construction_attempts == 0 {
            return invalid("construction_attempts must be at least 1".into());
        }
        if let MutationPolicy::GrowthOrRebuild { growth_probability } = self.mutation {
            if !(0.0..=1.0).contains(&growth_probability) {
                return invalid(format!(
                    "growth_probability must be in [0, 1], got {growth_probability}"
                ));
            }
        }
        Ok(())
    }
}
