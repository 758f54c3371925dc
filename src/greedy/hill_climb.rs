//! Single-objective hill climbing on jaccard.

use std::cmp::Ordering;
use std::time::{Duration, Instant};

use log::{debug, info};

use super::config::HillClimbConfig;
use crate::domain::Op;
use crate::error::Result;
use crate::expr::{Expression, Leaf};
use crate::instance::Instance;
use crate::objective::{Scored, Solution};

/// One accepted move of the climb.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HillClimbStep {
    /// 1-based move number.
    pub iteration: usize,

    /// Operator applied, or `None` for the opening move that takes a base
    /// set as the incumbent.
    pub op: Option<Op>,

    /// Index of the base set used.
    pub block: usize,

    /// Jaccard of the incumbent after the move.
    pub jaccard: f64,
}

/// Result of a hill climb.
#[derive(Debug, Clone)]
pub struct HillClimbResult {
    /// Final incumbent. `∅` if no move was ever accepted.
    pub best: Solution,

    /// Accepted moves in order; jaccard is strictly increasing.
    pub history: Vec<HillClimbStep>,

    /// Wall-clock duration of the climb.
    pub elapsed: Duration,
}

/// Greedy single-objective climb over `(operator, base set)` moves.
///
/// The incumbent starts as `∅`; the opening move picks a base set, every
/// later move combines the incumbent with one base set and costs one of the
/// `max_ops` operations. Each iteration
/// scores every candidate and keeps the best by jaccard (descending), then
/// `size_h`, then `n_ops` (ascending), then the lowest candidate index. The
/// move is taken only if it strictly improves jaccard.
///
/// # Usage
///
/// ```
/// use u_setexpr::domain::Bitset;
/// use u_setexpr::greedy::{HillClimbConfig, HillClimbRunner};
/// use u_setexpr::instance::Instance;
/// use u_setexpr::objective::Scored;
///
/// let family = vec![
///     Bitset::from_elements([1, 2]).unwrap(),
///     Bitset::from_elements([3]).unwrap(),
/// ];
/// let instance = Instance::new(family, Bitset::from_elements([1, 2, 3]).unwrap());
///
/// let result = HillClimbRunner::run(&instance, &HillClimbConfig::default()).unwrap();
/// assert_eq!(result.best.jaccard(), 1.0);
/// assert_eq!(result.history.len(), 2);
/// ```
pub struct HillClimbRunner;

impl HillClimbRunner {
    pub fn run(instance: &Instance, config: &HillClimbConfig) -> Result<HillClimbResult> {
        config.validate()?;
        let start = Instant::now();
        let target = instance.target();
        info!(
            "hill climb: |F|={}, max_ops={}, parallel={}",
            instance.family().len(),
            config.max_ops,
            config.parallel
        );

        let mut incumbent = Solution::evaluate(Expression::empty(), target);
        let mut history = Vec::new();

        // The opening move takes a base set and costs no operation.
        while (incumbent.expression().is_empty_expression() || incumbent.n_ops() < config.max_ops)
            && incumbent.jaccard() < 1.0 - config.tolerance
        {
            let Some(best) = best_candidate(instance, incumbent.expression(), config.parallel)
            else {
                break;
            };
            if best.solution.jaccard() <= incumbent.jaccard() {
                debug!(
                    "no improving move from jaccard {:.6}; stopping",
                    incumbent.jaccard()
                );
                break;
            }

            let step = HillClimbStep {
                iteration: history.len() + 1,
                op: best.op,
                block: best.block,
                jaccard: best.solution.jaccard(),
            };
            debug!(
                "step {}: F{} via {:?}, jaccard {:.6}",
                step.iteration, step.block, step.op, step.jaccard
            );
            history.push(step);
            incumbent = best.solution;
        }

        let elapsed = start.elapsed();
        info!(
            "hill climb finished: {} moves, jaccard {:.6}, {:?}",
            history.len(),
            incumbent.jaccard(),
            elapsed
        );

        Ok(HillClimbResult {
            best: incumbent,
            history,
            elapsed,
        })
    }
}

#[derive(Debug, Clone)]
struct Candidate {
    index: usize,
    op: Option<Op>,
    block: usize,
    solution: Solution,
}

/// Total order on candidates; `Less` means `a` is preferred.
fn preference(a: &Candidate, b: &Candidate) -> Ordering {
    b.solution
        .jaccard()
        .total_cmp(&a.solution.jaccard())
        .then_with(|| a.solution.size_h().cmp(&b.solution.size_h()))
        .then_with(|| a.solution.n_ops().cmp(&b.solution.n_ops()))
        .then_with(|| a.index.cmp(&b.index))
}

fn pick(a: Candidate, b: Candidate) -> Candidate {
    if preference(&b, &a) == Ordering::Less {
        b
    } else {
        a
    }
}

/// Builds the candidate with the given index.
///
/// From `∅` candidate `i` is the base set `F_i`. Otherwise candidate
/// `i * 3 + j` is `(incumbent op_j F_i)`.
fn candidate(instance: &Instance, incumbent: &Expression, index: usize) -> Candidate {
    let target = instance.target();
    if incumbent.is_empty_expression() {
        let leaf = instance.leaf(Leaf::Base(index));
        return Candidate {
            index,
            op: None,
            block: index,
            solution: Solution::evaluate(leaf, target),
        };
    }

    let block = index / Op::ALL.len();
    let op = Op::ALL[index % Op::ALL.len()];
    let expr = Expression::combine(op, incumbent, &instance.leaf(Leaf::Base(block)));
    Candidate {
        index,
        op: Some(op),
        block,
        solution: Solution::evaluate(expr, target),
    }
}

fn candidate_count(instance: &Instance, incumbent: &Expression) -> usize {
    if incumbent.is_empty_expression() {
        instance.family().len()
    } else {
        instance.family().len() * Op::ALL.len()
    }
}

#[cfg(feature = "parallel")]
fn best_candidate(instance: &Instance, incumbent: &Expression, parallel: bool) -> Option<Candidate> {
    use rayon::prelude::*;

    let count = candidate_count(instance, incumbent);
    if parallel {
        (0..count)
            .into_par_iter()
            .map(|i| candidate(instance, incumbent, i))
            .reduce_with(pick)
    } else {
        (0..count)
            .map(|i| candidate(instance, incumbent, i))
            .reduce(pick)
    }
}

#[cfg(not(feature = "parallel"))]
fn best_candidate(instance: &Instance, incumbent: &Expression, _parallel: bool) -> Option<Candidate> {
    (0..candidate_count(instance, incumbent))
        .map(|i| candidate(instance, incumbent, i))
        .reduce(pick)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Bitset;
    use test_log::test;

    fn set(elements: &[usize]) -> Bitset {
        Bitset::from_elements(elements.iter().copied()).unwrap()
    }

    fn scenario() -> Instance {
        Instance::new(
            vec![
                set(&[1, 2, 3]),
                set(&[2, 4, 5]),
                set(&[6, 7]),
                set(&[3, 5, 7, 8]),
                set(&[9, 10]),
            ],
            set(&[1, 2, 3, 5, 7, 9]),
        )
    }

    #[test]
    fn test_scenario_strictly_increasing() {
        let instance = scenario();
        let result =
            HillClimbRunner::run(&instance, &HillClimbConfig::default().with_max_ops(5)).unwrap();

        assert!(result.history.len() >= 2);
        for pair in result.history.windows(2) {
            assert!(pair[1].jaccard > pair[0].jaccard);
        }
        assert_eq!(
            result.history.last().map(|s| s.jaccard),
            Some(result.best.jaccard())
        );

        let family_union = instance
            .family()
            .iter()
            .fold(Bitset::empty(), |acc, f| acc.union(f));
        assert!(result.best.expression().set().is_subset(&family_union));
        assert!(!result.best.expression().uses_universe());
    }

    #[test]
    fn test_scenario_moves() {
        let result =
            HillClimbRunner::run(&scenario(), &HillClimbConfig::default().with_max_ops(5)).unwrap();

        let moves: Vec<(Option<Op>, usize)> =
            result.history.iter().map(|s| (s.op, s.block)).collect();
        assert_eq!(
            moves,
            vec![(None, 0), (Some(Op::Union), 3), (Some(Op::Union), 4)]
        );
        assert!((result.best.jaccard() - 0.75).abs() < 1e-12);
        assert_eq!(result.best.n_ops(), 2);
        assert_eq!(result.best.size_h(), 3);
    }

    #[test]
    fn test_respects_operation_budget() {
        let result =
            HillClimbRunner::run(&scenario(), &HillClimbConfig::default().with_max_ops(1)).unwrap();
        assert_eq!(result.history.len(), 2);
        assert_eq!(result.best.n_ops(), 1);

        let result =
            HillClimbRunner::run(&scenario(), &HillClimbConfig::default().with_max_ops(0)).unwrap();
        assert_eq!(result.history.len(), 1);
        assert_eq!(result.history[0].op, None);
        assert_eq!(result.best.n_ops(), 0);
    }

    #[test]
    fn test_budget_counts_operations_not_moves() {
        let instance = Instance::new(
            vec![set(&[1]), set(&[2]), set(&[3])],
            set(&[1, 2, 3]),
        );
        let result =
            HillClimbRunner::run(&instance, &HillClimbConfig::default().with_max_ops(2)).unwrap();
        assert_eq!(result.best.jaccard(), 1.0);
        assert_eq!(result.best.n_ops(), 2);
        assert_eq!(result.history.len(), 3);
    }

    #[test]
    fn test_stops_at_exact_match() {
        let instance = Instance::new(
            vec![set(&[1, 2]), set(&[3]), set(&[4])],
            set(&[1, 2, 3]),
        );
        let result =
            HillClimbRunner::run(&instance, &HillClimbConfig::default().with_max_ops(10)).unwrap();
        assert_eq!(result.best.jaccard(), 1.0);
        assert_eq!(result.history.len(), 2);
    }

    #[test]
    fn test_empty_family_and_empty_target() {
        let no_family = Instance::new(Vec::new(), set(&[1]));
        let result = HillClimbRunner::run(&no_family, &HillClimbConfig::default()).unwrap();
        assert!(result.history.is_empty());
        assert!(result.best.expression().is_empty_expression());

        let no_target = Instance::new(vec![set(&[1])], Bitset::empty());
        let result = HillClimbRunner::run(&no_target, &HillClimbConfig::default()).unwrap();
        assert!(result.history.is_empty());
        assert_eq!(result.best.jaccard(), 1.0);
    }

    #[test]
    fn test_parallel_flag_same_result() {
        let sequential =
            HillClimbRunner::run(&scenario(), &HillClimbConfig::default()).unwrap();
        let parallel = HillClimbRunner::run(
            &scenario(),
            &HillClimbConfig::default().with_parallel(true),
        )
        .unwrap();
        assert_eq!(sequential.history, parallel.history);
        assert!(sequential
            .best
            .expression()
            .same_structure(parallel.best.expression()));
    }

    #[test]
    fn test_tie_breaks_on_lowest_index() {
        // F0 and F1 score identically; F0 wins.
        let instance = Instance::new(vec![set(&[1]), set(&[2])], set(&[1, 2, 3, 4]));
        let result =
            HillClimbRunner::run(&instance, &HillClimbConfig::default().with_max_ops(1)).unwrap();
        assert_eq!(result.history[0].block, 0);
    }
}
