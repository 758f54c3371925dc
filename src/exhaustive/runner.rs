//! Level-by-level enumeration.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use log::{debug, info};

use super::config::ExhaustiveConfig;
use crate::domain::{Bitset, Op};
use crate::error::Result;
use crate::expr::Expression;
use crate::instance::Instance;
use crate::objective::{pareto_front, Solution};

/// Result of an exhaustive search.
#[derive(Debug, Clone)]
pub struct ExhaustiveResult {
    /// Pareto front over every scored expression.
    pub front: Vec<Solution>,

    /// Number of expressions scored.
    pub evaluated: usize,

    /// Number of expressions kept at each level `0..=max_ops`.
    pub level_sizes: Vec<usize>,

    /// Wall-clock duration of the search.
    pub elapsed: Duration,
}

/// Enumerates every expression with at most `max_ops` operations.
///
/// Level 0 holds one leaf per base set followed by the universe. Level `s`
/// combines `levels[a]` with `levels[s - 1 - a]` for every operator and every
/// split `a`, so each level-`s` expression has exactly `s` operations.
///
/// The search is exact over this grammar but its cost explodes with the
/// family size and the budget; keep both small.
///
/// # Usage
///
/// ```
/// use u_setexpr::domain::Bitset;
/// use u_setexpr::exhaustive::{ExhaustiveConfig, ExhaustiveRunner};
/// use u_setexpr::instance::Instance;
///
/// let family = vec![
///     Bitset::from_elements([1, 2, 3]).unwrap(),
///     Bitset::from_elements([3, 4]).unwrap(),
/// ];
/// let target = Bitset::from_elements([1, 2]).unwrap();
/// let instance = Instance::new(family, target);
///
/// let result = ExhaustiveRunner::run(&instance, &ExhaustiveConfig::default()).unwrap();
/// assert_eq!(result.front[0].to_string(), "(F0 \\ F1) [jaccard=1.000000, ops=1, |H|=2]");
/// ```
pub struct ExhaustiveRunner;

impl ExhaustiveRunner {
    /// Runs the single-pass search: each level is scored as soon as it is
    /// built and folded into a running front.
    pub fn run(instance: &Instance, config: &ExhaustiveConfig) -> Result<ExhaustiveResult> {
        config.validate()?;
        let start = Instant::now();
        info!(
            "exhaustive search: |F|={}, max_ops={}, prune={}",
            instance.family().len(),
            config.max_ops,
            config.prune_duplicate_sets
        );

        let target = instance.target();
        let mut filter = SetFilter::new(config.prune_duplicate_sets);
        let mut levels: Vec<Vec<Expression>> = Vec::with_capacity(config.max_ops + 1);
        let mut front: Vec<Solution> = Vec::new();
        let mut evaluated = 0usize;

        for s in 0..=config.max_ops {
            let level = if s == 0 {
                base_level(instance, &mut filter)
            } else {
                build_level(&levels, s, &mut filter)
            };
            evaluated += level.len();

            let mut merged = front;
            merged.extend(level.iter().map(|e| Solution::evaluate(e.clone(), target)));
            front = pareto_front(merged);

            debug!(
                "level {s}: {} expressions, front size {}",
                level.len(),
                front.len()
            );
            levels.push(level);
        }

        if config.include_empty_set {
            front.push(Solution::evaluate(Expression::empty(), target));
            front = pareto_front(front);
            evaluated += 1;
        }

        let elapsed = start.elapsed();
        info!(
            "exhaustive search finished: {evaluated} evaluated, front size {}, {:?}",
            front.len(),
            elapsed
        );

        Ok(ExhaustiveResult {
            front,
            evaluated,
            level_sizes: levels.iter().map(Vec::len).collect(),
            elapsed,
        })
    }

    /// Materializes every level without scoring anything.
    ///
    /// `levels[s]` holds the expressions with exactly `s` operations.
    pub fn enumerate(instance: &Instance, config: &ExhaustiveConfig) -> Result<Vec<Vec<Expression>>> {
        config.validate()?;
        let mut filter = SetFilter::new(config.prune_duplicate_sets);
        let mut levels = Vec::with_capacity(config.max_ops + 1);
        levels.push(base_level(instance, &mut filter));
        for s in 1..=config.max_ops {
            let level = build_level(&levels, s, &mut filter);
            levels.push(level);
        }
        Ok(levels)
    }

    /// Scores materialized levels and reduces them to a Pareto front.
    pub fn evaluate_levels(
        levels: &[Vec<Expression>],
        target: &Bitset,
        include_empty_set: bool,
    ) -> Vec<Solution> {
        let mut solutions: Vec<Solution> = levels
            .iter()
            .flatten()
            .map(|e| Solution::evaluate(e.clone(), target))
            .collect();
        if include_empty_set {
            solutions.push(Solution::evaluate(Expression::empty(), target));
        }
        pareto_front(solutions)
    }

    /// Two-pass variant: [`enumerate`](Self::enumerate) then
    /// [`evaluate_levels`](Self::evaluate_levels).
    ///
    /// Produces the same front as [`run`](Self::run) at the cost of holding
    /// every scored expression at once.
    pub fn run_two_pass(instance: &Instance, config: &ExhaustiveConfig) -> Result<ExhaustiveResult> {
        let start = Instant::now();
        let levels = Self::enumerate(instance, config)?;
        let level_sizes: Vec<usize> = levels.iter().map(Vec::len).collect();
        let evaluated =
            level_sizes.iter().sum::<usize>() + usize::from(config.include_empty_set);
        let front = Self::evaluate_levels(&levels, instance.target(), config.include_empty_set);

        Ok(ExhaustiveResult {
            front,
            evaluated,
            level_sizes,
            elapsed: start.elapsed(),
        })
    }
}

/// Duplicate-set suppression.
///
/// Remembers, per resulting set, the smallest `size_h` seen so far. When
/// disabled every expression is admitted.
struct SetFilter {
    enabled: bool,
    best_size_h: HashMap<Bitset, usize>,
}

impl SetFilter {
    fn new(enabled: bool) -> Self {
        Self {
            enabled,
            best_size_h: HashMap::new(),
        }
    }

    fn admit(&mut self, expr: &Expression) -> bool {
        if !self.enabled {
            return true;
        }
        let size_h = expr.size_h();
        match self.best_size_h.get(expr.set()) {
            Some(&seen) if seen <= size_h => false,
            _ => {
                self.best_size_h.insert(*expr.set(), size_h);
                true
            }
        }
    }
}

fn base_level(instance: &Instance, filter: &mut SetFilter) -> Vec<Expression> {
    instance
        .base_blocks()
        .into_iter()
        .filter(|e| filter.admit(e))
        .collect()
}

fn build_level(levels: &[Vec<Expression>], s: usize, filter: &mut SetFilter) -> Vec<Expression> {
    let mut level = Vec::new();
    for op in Op::ALL {
        for a in 0..s {
            let b = s - 1 - a;
            for left in &levels[a] {
                for right in &levels[b] {
                    let e = Expression::combine(op, left, right);
                    if filter.admit(&e) {
                        level.push(e);
                    }
                }
            }
        }
    }
    level
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objective::{best_jaccard, Scored};
    use test_log::test;

    fn set(elements: &[usize]) -> Bitset {
        Bitset::from_elements(elements.iter().copied()).unwrap()
    }

    fn triples(front: &[Solution]) -> Vec<(String, f64, usize, usize)> {
        front
            .iter()
            .map(|s| (s.expression().to_string(), s.jaccard(), s.size_h(), s.n_ops()))
            .collect()
    }

    /// Front members keyed by expression text, independent of tie order.
    fn sorted_triples(front: &[Solution]) -> Vec<(String, f64, usize, usize)> {
        let mut t = triples(front);
        t.sort_by(|a, b| a.0.cmp(&b.0));
        t
    }

    fn small_instance() -> Instance {
        Instance::new(
            vec![set(&[0, 1, 2]), set(&[2, 3, 4]), set(&[4, 5, 6, 7])],
            set(&[0, 1, 4]),
        )
        .with_universe_size(10)
        .unwrap()
    }

    #[test]
    fn test_k0_scores_exactly_the_leaves() {
        let a = set(&[1, 2, 3]);
        let b = set(&[3, 4]);
        let target = set(&[1, 2, 3, 4, 5]);
        let instance = Instance::new(vec![a, b], target).with_universe_size(8).unwrap();
        let config = ExhaustiveConfig::default().with_max_ops(0);

        let result = ExhaustiveRunner::run(&instance, &config).unwrap();
        assert_eq!(result.evaluated, 3);
        assert_eq!(result.level_sizes, vec![3]);

        let expected = pareto_front(
            instance
                .base_blocks()
                .into_iter()
                .map(|e| Solution::evaluate(e, &target))
                .collect(),
        );
        assert_eq!(triples(&result.front), triples(&expected));
    }

    #[test]
    fn test_level_sizes() {
        // 3 leaves; level 1 = 3 ops * 3 * 3.
        let instance = Instance::new(vec![set(&[1]), set(&[2])], set(&[1, 2]));
        let config = ExhaustiveConfig::default().with_max_ops(1);
        let result = ExhaustiveRunner::run(&instance, &config).unwrap();
        assert_eq!(result.level_sizes, vec![3, 27]);
        assert_eq!(result.evaluated, 30);
    }

    #[test]
    fn test_finds_exact_union() {
        let instance = Instance::new(vec![set(&[1]), set(&[2]), set(&[3])], set(&[1, 3]));
        let result = ExhaustiveRunner::run(&instance, &ExhaustiveConfig::default()).unwrap();
        let best = &result.front[0];
        assert_eq!(best.jaccard(), 1.0);
        assert_eq!(best.n_ops(), 1);
        assert_eq!(best.size_h(), 2);
    }

    #[test]
    fn test_single_and_two_pass_agree() {
        for prune in [false, true] {
            for include_empty in [false, true] {
                let config = ExhaustiveConfig::default()
                    .with_max_ops(2)
                    .with_prune_duplicate_sets(prune)
                    .with_include_empty_set(include_empty);
                let single = ExhaustiveRunner::run(&small_instance(), &config).unwrap();
                let double = ExhaustiveRunner::run_two_pass(&small_instance(), &config).unwrap();
                assert_eq!(sorted_triples(&single.front), sorted_triples(&double.front));
                assert_eq!(single.evaluated, double.evaluated);
                assert_eq!(single.level_sizes, double.level_sizes);
            }
        }
    }

    #[test]
    fn test_prune_shrinks_levels_without_improving() {
        let full = ExhaustiveRunner::run(
            &small_instance(),
            &ExhaustiveConfig::default().with_max_ops(2),
        )
        .unwrap();
        let pruned = ExhaustiveRunner::run(
            &small_instance(),
            &ExhaustiveConfig::default()
                .with_max_ops(2)
                .with_prune_duplicate_sets(true),
        )
        .unwrap();

        assert!(pruned.evaluated < full.evaluated);
        assert!(best_jaccard(&pruned.front).unwrap() <= best_jaccard(&full.front).unwrap());
    }

    #[test]
    fn test_empty_set_expression_when_target_empty() {
        let instance = Instance::new(vec![set(&[1])], Bitset::empty());
        let config = ExhaustiveConfig::default()
            .with_max_ops(0)
            .with_include_empty_set(true);
        let result = ExhaustiveRunner::run(&instance, &config).unwrap();
        // ∅ is exact and uses nothing, so it dominates both leaves.
        assert_eq!(result.front.len(), 1);
        assert!(result.front[0].expression().is_empty_expression());
        assert_eq!(result.front[0].jaccard(), 1.0);
    }

    #[test]
    fn test_empty_family() {
        let instance = Instance::new(Vec::new(), set(&[1]));
        let result = ExhaustiveRunner::run(&instance, &ExhaustiveConfig::default()).unwrap();
        assert_eq!(result.level_sizes[0], 1);
        assert!(!result.front.is_empty());
    }

    #[test]
    fn test_invalid_config() {
        let config = ExhaustiveConfig::default().with_max_ops(100);
        assert!(ExhaustiveRunner::run(&small_instance(), &config).is_err());
    }
}
