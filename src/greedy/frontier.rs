//! Pareto-frontier expansion.

use std::time::{Duration, Instant};

use log::{debug, info};

use super::config::GreedyConfig;
use crate::domain::Op;
use crate::expr::Expression;
use crate::instance::Instance;
use crate::objective::{pareto_front, Scored, Solution};

/// Result of a greedy frontier search.
#[derive(Debug, Clone)]
pub struct GreedyResult {
    /// Global Pareto front, any operation count up to `max_ops`.
    pub front: Vec<Solution>,

    /// Number of levels actually extended (at most `max_ops`).
    pub levels_built: usize,

    /// Number of expressions scored, level-0 blocks included.
    pub evaluated: usize,

    /// Wall-clock duration of the search.
    pub elapsed: Duration,
}

/// Greedy Pareto-frontier expansion.
///
/// Keeps a global front and a construction front (the members of the global
/// front with exactly `s - 1` operations). Level `s` combines every member
/// of the construction front with every level-0 block under every operator,
/// merges the candidates' front into the global one and keeps the members
/// with `s` operations as the next construction front. Expansion stops when
/// that front is empty or `s` exceeds the budget.
///
/// Expressions pruned from the front are never reconsidered as building
/// blocks, so the result approximates the exact front at polynomial cost
/// per level.
pub struct GreedyRunner;

impl GreedyRunner {
    pub fn run(instance: &Instance, config: &GreedyConfig) -> GreedyResult {
        let start = Instant::now();
        let target = instance.target();
        info!(
            "greedy frontier search: |F|={}, max_ops={}",
            instance.family().len(),
            config.max_ops
        );

        let blocks: Vec<Solution> = instance
            .base_blocks()
            .into_iter()
            .map(|e| Solution::evaluate(e, target))
            .collect();
        let mut evaluated = blocks.len();

        let mut global = pareto_front(blocks.clone());
        let mut construction: Vec<Solution> = global.clone();
        let mut levels_built = 0usize;

        for s in 1..=config.max_ops {
            if construction.is_empty() {
                break;
            }

            let mut candidates = Vec::with_capacity(Op::ALL.len() * construction.len() * blocks.len());
            for op in Op::ALL {
                for left in &construction {
                    for right in &blocks {
                        let e = Expression::combine(op, left.expression(), right.expression());
                        candidates.push(Solution::evaluate(e, target));
                    }
                }
            }
            evaluated += candidates.len();

            let level_front = pareto_front(candidates);
            let level_front_len = level_front.len();
            global.extend(level_front);
            global = pareto_front(global);

            construction = global.iter().filter(|sol| sol.n_ops() == s).cloned().collect();
            levels_built = s;

            debug!(
                "level {s}: local front {level_front_len}, global front {}, next construction {}",
                global.len(),
                construction.len()
            );
        }

        let elapsed = start.elapsed();
        info!(
            "greedy frontier search finished: {levels_built} levels, front size {}, {:?}",
            global.len(),
            elapsed
        );

        GreedyResult {
            front: global,
            levels_built,
            evaluated,
            elapsed,
        }
    }
}
