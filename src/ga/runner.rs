//! NSGA-II evolutionary loop execution.
//!
//! [`NsgaRunner`] orchestrates the complete evolutionary process:
//! initialization → ranking → selection → crossover → mutation →
//! survivor selection → repeat.

use std::collections::{BTreeSet, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use log::{debug, info, trace};
use rand::Rng;

use super::config::NsgaConfig;
use super::construction::build_random_expression;
use super::multi_objective::{crowding_distance, non_dominated_sort};
use super::operators::{crossover, mutate, OperatorContext};
use super::selection::tournament;
use super::types::Individual;
use crate::error::Result;
use crate::expr::{Leaf, Node};
use crate::instance::Instance;
use crate::objective::{best_jaccard, pareto_front, unique_by_set, Scored};
use crate::random::{create_rng, resolve_seed, shuffle};

/// A member within this distance of jaccard 1.0 counts as a perfect match.
pub const PERFECT_JACCARD_TOLERANCE: f64 = 1e-5;

/// Why the evolutionary loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StopReason {
    MaxGenerations,
    TimeLimit,
    Cancelled,
    /// A member reached jaccard 1.0 (within tolerance).
    TargetReached,
}

/// Result of an NSGA-II run.
#[derive(Debug, Clone)]
pub struct NsgaResult {
    /// Pareto front of the final population, sorted by jaccard descending.
    pub front: Vec<Individual>,

    /// Final population with ranks and crowding distances.
    pub population: Vec<Individual>,

    /// Number of generations executed.
    pub generations: usize,

    /// Wall-clock duration of the run.
    pub elapsed: Duration,

    pub stop_reason: StopReason,

    /// Best jaccard of the initial population, then after each generation.
    pub best_jaccard_history: Vec<f64>,

    /// Seed the run used. Pass it back through
    /// [`NsgaConfig::with_seed`] to reproduce the run.
    pub seed: u64,
}

/// Executes the NSGA-II loop.
///
/// # Usage
///
/// ```
/// use u_setexpr::domain::Bitset;
/// use u_setexpr::ga::{NsgaConfig, NsgaRunner};
/// use u_setexpr::instance::Instance;
///
/// let family = vec![
///     Bitset::from_elements([1, 2, 3]).unwrap(),
///     Bitset::from_elements([3, 4]).unwrap(),
///     Bitset::from_elements([7, 8]).unwrap(),
/// ];
/// let instance = Instance::new(family, Bitset::from_elements([1, 2]).unwrap());
/// let config = NsgaConfig::default()
///     .with_population_size(20)
///     .with_max_generations(30)
///     .with_max_ops(3)
///     .with_seed(42);
///
/// let result = NsgaRunner::run(&instance, &config).unwrap();
/// assert!(!result.front.is_empty());
/// assert_eq!(result.seed, 42);
/// ```
pub struct NsgaRunner;

impl NsgaRunner {
    /// Runs NSGA-II on `instance`.
    ///
    /// # Errors
    /// Returns [`SetExprError::InvalidConfig`](crate::error::SetExprError::InvalidConfig)
    /// if `config` fails validation.
    pub fn run(instance: &Instance, config: &NsgaConfig) -> Result<NsgaResult> {
        Self::run_with_cancel(instance, config, None)
    }

    /// Runs NSGA-II with an optional cancellation token.
    ///
    /// If `cancel` is `Some` and the flag is set to `true`, the loop stops
    /// at the start of the next generation and returns the current
    /// population.
    pub fn run_with_cancel(
        instance: &Instance,
        config: &NsgaConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<NsgaResult> {
        config.validate()?;
        let start = Instant::now();
        let seed = resolve_seed(config.seed);
        let mut rng = create_rng(seed);
        let ctx = OperatorContext::new(instance, config.max_ops, config.construction_attempts);

        info!(
            "nsga-ii: |F|={}, max_ops={}, population={}, seed={seed}",
            instance.family().len(),
            config.max_ops,
            config.population_size
        );

        // 1. Initialize and rank the population
        let initial = initialize(instance, config, &mut rng);
        if initial.len() < config.population_size {
            debug!(
                "expression space exhausted: initial population {} of {}",
                initial.len(),
                config.population_size
            );
        }
        let initial_len = initial.len();
        let mut population = environmental_selection(initial, initial_len);

        let mut best = best_jaccard(&population).unwrap_or(0.0);
        let mut best_jaccard_history = vec![best];
        let mut generations = 0usize;

        // 2. Evolutionary loop
        let stop_reason = loop {
            if generations >= config.max_generations {
                break StopReason::MaxGenerations;
            }
            if let Some(limit) = config.time_limit_ms {
                if start.elapsed() >= Duration::from_millis(limit) {
                    break StopReason::TimeLimit;
                }
            }
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    break StopReason::Cancelled;
                }
            }
            if config.stop_on_perfect && best >= 1.0 - PERFECT_JACCARD_TOLERANCE {
                break StopReason::TargetReached;
            }

            let offspring = breed_offspring(&population, &ctx, config, &mut rng);
            let produced = offspring.len();
            population.extend(offspring);
            population = environmental_selection(population, config.population_size);
            generations += 1;

            best = best_jaccard(&population).unwrap_or(0.0);
            best_jaccard_history.push(best);
            debug!(
                "generation {generations}: offspring={produced}, best jaccard={best:.6}, rank-0={}",
                population.iter().filter(|ind| ind.rank == 0).count()
            );
        };

        let mut front = pareto_front(population.clone());
        if config.unique_sets {
            front = unique_by_set(front);
        }
        let elapsed = start.elapsed();
        info!(
            "nsga-ii finished: {stop_reason:?} after {generations} generations, front size {}, best jaccard {best:.6}, {elapsed:?}",
            front.len()
        );

        Ok(NsgaResult {
            front,
            population,
            generations,
            elapsed,
            stop_reason,
            best_jaccard_history,
            seed,
        })
    }
}

/// Consecutive duplicate draws tolerated before a population fill stops.
fn stale_limit(config: &NsgaConfig) -> usize {
    config
        .population_size
        .saturating_mul(config.construction_attempts)
}

/// Random structurally-unique expressions, each over
/// `1..=min(|F| + 1, max_ops + 1)` sampled leaves.
fn initialize<R: Rng>(instance: &Instance, config: &NsgaConfig, rng: &mut R) -> Vec<Individual> {
    let max_leaves = (instance.family().len() + 1).min(config.max_ops + 1);
    let limit = stale_limit(config);

    let mut population = Vec::with_capacity(config.population_size);
    let mut seen: HashSet<Arc<Node>> = HashSet::new();
    let mut stale = 0usize;

    while population.len() < config.population_size && stale < limit {
        let count = rng.random_range(1..=max_leaves);
        let chosen: BTreeSet<Leaf> = (0..count).map(|_| instance.random_leaf(rng)).collect();
        let mut leaves: Vec<Leaf> = chosen.into_iter().collect();
        shuffle(&mut leaves, rng);

        let expr = build_random_expression(
            instance,
            &leaves,
            config.max_ops,
            config.construction_attempts,
            rng,
        );
        if seen.insert(Arc::clone(expr.node())) {
            population.push(Individual::new(expr, instance.target()));
            stale = 0;
        } else {
            stale += 1;
        }
    }
    population
}

/// Up to `population_size` structurally-new children.
///
/// Children are bred in batches; each child draws its own seed from the
/// master RNG first, so the batch yields the same children whether it is
/// bred sequentially or in parallel. Acceptance is sequential against
/// everything seen this generation, parents included.
fn breed_offspring<R: Rng>(
    population: &[Individual],
    ctx: &OperatorContext<'_>,
    config: &NsgaConfig,
    rng: &mut R,
) -> Vec<Individual> {
    let limit = stale_limit(config);
    let mut seen: HashSet<Arc<Node>> = population
        .iter()
        .map(|ind| Arc::clone(ind.expression().node()))
        .collect();
    let mut offspring = Vec::with_capacity(config.population_size);
    let mut stale = 0usize;

    'fill: while offspring.len() < config.population_size {
        let needed = config.population_size - offspring.len();
        let seeds: Vec<u64> = (0..needed).map(|_| rng.random()).collect();

        for child in breed_batch(population, ctx, config, &seeds) {
            if seen.insert(Arc::clone(child.expression().node())) {
                offspring.push(child);
                stale = 0;
            } else {
                stale += 1;
                trace!("rejected duplicate child {}", child.expression());
                if stale >= limit {
                    debug!(
                        "no new child in {limit} draws, offspring stopped at {}",
                        offspring.len()
                    );
                    break 'fill;
                }
            }
        }
    }
    offspring
}

#[cfg(feature = "parallel")]
fn breed_batch(
    population: &[Individual],
    ctx: &OperatorContext<'_>,
    config: &NsgaConfig,
    seeds: &[u64],
) -> Vec<Individual> {
    use rayon::prelude::*;

    if config.parallel {
        seeds
            .par_iter()
            .map(|&seed| breed_child(population, ctx, config, seed))
            .collect()
    } else {
        seeds
            .iter()
            .map(|&seed| breed_child(population, ctx, config, seed))
            .collect()
    }
}

#[cfg(not(feature = "parallel"))]
fn breed_batch(
    population: &[Individual],
    ctx: &OperatorContext<'_>,
    config: &NsgaConfig,
    seeds: &[u64],
) -> Vec<Individual> {
    seeds
        .iter()
        .map(|&seed| breed_child(population, ctx, config, seed))
        .collect()
}

/// Selection, crossover and mutation of one child from its own RNG stream.
fn breed_child(
    population: &[Individual],
    ctx: &OperatorContext<'_>,
    config: &NsgaConfig,
    seed: u64,
) -> Individual {
    let mut rng = create_rng(seed);
    let p1 = &population[tournament(population, config.tournament_size, &mut rng)];
    let p2 = &population[tournament(population, config.tournament_size, &mut rng)];

    let mut child = if rng.random_bool(config.crossover_rate) {
        crossover(config.crossover, ctx, p1, p2, &mut rng)
    } else if rng.random_bool(0.5) {
        p1.clone()
    } else {
        p2.clone()
    };

    if rng.random_bool(config.mutation_rate) {
        child = mutate(config.mutation, ctx, &child, &mut rng);
    }

    child.rank = 0;
    child.crowding = 0.0;
    child
}

/// Survivor selection: ranks `pool`, assigns crowding per front and keeps
/// at most `size` members, filling whole fronts first and truncating the
/// overflowing front by crowding distance (descending).
fn environmental_selection(mut pool: Vec<Individual>, size: usize) -> Vec<Individual> {
    let sorted = non_dominated_sort(&pool);
    for (ind, &rank) in pool.iter_mut().zip(&sorted.ranks) {
        ind.rank = rank;
    }
    for front in &sorted.fronts {
        let members: Vec<&Individual> = front.iter().map(|&i| &pool[i]).collect();
        let distances = crowding_distance(&members);
        for (&i, d) in front.iter().zip(distances) {
            pool[i].crowding = d;
        }
    }

    let mut selected: Vec<usize> = Vec::with_capacity(size.min(pool.len()));
    for front in &sorted.fronts {
        let room = size - selected.len();
        if front.len() <= room {
            selected.extend_from_slice(front);
        } else {
            let mut by_crowding = front.clone();
            by_crowding.sort_by(|&a, &b| pool[b].crowding.total_cmp(&pool[a].crowding));
            selected.extend_from_slice(&by_crowding[..room]);
        }
        if selected.len() == size {
            break;
        }
    }

    let mut slots: Vec<Option<Individual>> = pool.into_iter().map(Some).collect();
    selected
        .into_iter()
        .filter_map(|i| slots[i].take())
        .collect()
}

// ============================================================================
// Tests
// ============================================================================
