//! Instances with a known optimum.

use log::debug;

use super::config::GeneratorConfig;
use super::sampling::generate_family;
use crate::domain::Bitset;
use crate::error::Result;
use crate::expr::Expression;
use crate::ga::{build_random_expression, DEFAULT_CONSTRUCTION_ATTEMPTS};
use crate::instance::Instance;
use crate::random::create_rng;

/// Parameters of a ground-truth instance.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GroundTruthConfig {
    pub generator: GeneratorConfig,
    /// Operation budget of the reference expression.
    pub max_ops: usize,
    pub seed: u64,
}

impl Default for GroundTruthConfig {
    fn default() -> Self {
        Self {
            generator: GeneratorConfig::default(),
            max_ops: 10,
            seed: 1030,
        }
    }
}

impl GroundTruthConfig {
    pub fn with_generator(mut self, generator: GeneratorConfig) -> Self {
        self.generator = generator;
        self
    }

    pub fn with_max_ops(mut self, k: usize) -> Self {
        self.max_ops = k;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

/// A random family together with a reference expression whose set is the
/// target, so jaccard 1.0 is reachable within `max_ops` operations.
#[derive(Debug, Clone)]
pub struct GroundTruthInstance {
    pub family: Vec<Bitset>,
    pub universe: Bitset,
    pub target: Bitset,
    pub reference: Expression,
    pub seed: u64,
}

impl GroundTruthInstance {
    /// Generates an instance from `config.seed`.
    ///
    /// The family and the reference expression come from one RNG stream:
    /// the family is drawn first, then the reference is built over every
    /// base set and the universe with at most `config.max_ops` operations.
    ///
    /// # Errors
    /// `InvalidConfig` if the generator configuration fails validation.
    ///
    /// # Example
    ///
    /// ```
    /// use u_setexpr::generator::{GroundTruthConfig, GroundTruthInstance};
    ///
    /// let config = GroundTruthConfig::default().with_max_ops(4).with_seed(7);
    /// let gt = GroundTruthInstance::generate(&config).unwrap();
    /// assert_eq!(gt.reference.set(), &gt.target);
    /// assert!(gt.reference.n_ops() <= 4);
    /// ```
    pub fn generate(config: &GroundTruthConfig) -> Result<Self> {
        let mut rng = create_rng(config.seed);
        let family = generate_family(&config.generator, &mut rng)?;
        let universe = Bitset::prefix(config.generator.universe_size)?;

        let builder = Instance::new(family, Bitset::empty()).with_universe(universe);
        let reference = build_random_expression(
            &builder,
            &builder.leaves(),
            config.max_ops,
            DEFAULT_CONSTRUCTION_ATTEMPTS,
            &mut rng,
        );
        let target = *reference.set();
        debug!(
            "ground truth (seed {}): |F|={}, reference {reference} with {} ops, |G|={}",
            config.seed,
            builder.family().len(),
            reference.n_ops(),
            target.len()
        );

        Ok(Self {
            family: builder.family().to_vec(),
            universe,
            target,
            reference,
            seed: config.seed,
        })
    }

    /// The search instance: same family and universe, reference set as target.
    pub fn instance(&self) -> Instance {
        Instance::new(self.family.clone(), self.target).with_universe(self.universe)
    }
}
