//! Crossover and mutation over expression trees.
//!
//! Two crossover policies:
//!
//! - [`CrossoverPolicy::Splice`]: join both parents' whole trees under one
//!   random operator, falling back to the better parent when the result
//!   would exceed the operation budget
//! - [`CrossoverPolicy::Recombine`]: pool the parents' leaves (each with
//!   probability 1/2) and build a fresh random expression over them
//!
//! Two mutation policies:
//!
//! - [`MutationPolicy::GrowthOrRebuild`]: usually grow the tree by one
//!   operation against a level-0 block, otherwise perturb the leaf list and
//!   rebuild
//! - [`MutationPolicy::Rebuild`]: always perturb the leaf list (shuffle,
//!   replace one, or add one) and rebuild
//!
//! Every operator returns a freshly scored [`Individual`] and never
//! exceeds the operation budget.

use std::collections::BTreeSet;

use rand::Rng;

use super::construction::build_random_expression;
use super::types::Individual;
use crate::domain::Op;
use crate::expr::{Expression, Leaf};
use crate::instance::Instance;
use crate::objective::Scored;
use crate::random::shuffle;

/// How two parents are combined into a child.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CrossoverPolicy {
    /// `(left op right)` over the parents' whole expressions, with the
    /// operand order drawn at random.
    #[default]
    Splice,
    /// Fresh construction over a random half of the parents' leaves.
    Recombine,
}

/// How a child is perturbed.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MutationPolicy {
    /// Growth with probability `growth_probability`, else add-or-replace
    /// one leaf and rebuild.
    GrowthOrRebuild { growth_probability: f64 },
    /// Shuffle, replace one leaf, or add one leaf, then rebuild.
    Rebuild,
}

impl Default for MutationPolicy {
    fn default() -> Self {
        MutationPolicy::GrowthOrRebuild {
            growth_probability: 0.8,
        }
    }
}

/// Shared inputs of the genetic operators.
#[derive(Debug, Clone)]
pub struct OperatorContext<'a> {
    pub instance: &'a Instance,
    /// Level-0 blocks used by growth mutation.
    pub blocks: Vec<Expression>,
    pub max_ops: usize,
    pub max_failures: usize,
}

impl<'a> OperatorContext<'a> {
    pub fn new(instance: &'a Instance, max_ops: usize, max_failures: usize) -> Self {
        Self {
            instance,
            blocks: instance.base_blocks(),
            max_ops,
            max_failures,
        }
    }

    fn rebuild<R: Rng>(&self, leaves: &[Leaf], rng: &mut R) -> Individual {
        let expr =
            build_random_expression(self.instance, leaves, self.max_ops, self.max_failures, rng);
        Individual::new(expr, self.instance.target())
    }
}

fn random_op<R: Rng>(rng: &mut R) -> Op {
    Op::ALL[rng.random_range(0..Op::ALL.len())]
}

// ============================================================================
// Crossover
// ============================================================================

/// Produces one child from two parents.
pub fn crossover<R: Rng>(
    policy: CrossoverPolicy,
    ctx: &OperatorContext<'_>,
    p1: &Individual,
    p2: &Individual,
    rng: &mut R,
) -> Individual {
    match policy {
        CrossoverPolicy::Splice => splice(ctx, p1, p2, rng),
        CrossoverPolicy::Recombine => recombine(ctx, p1, p2, rng),
    }
}

fn better_parent(p1: &Individual, p2: &Individual) -> Individual {
    if p1.beats(p2) {
        p1.clone()
    } else {
        p2.clone()
    }
}

fn splice<R: Rng>(
    ctx: &OperatorContext<'_>,
    p1: &Individual,
    p2: &Individual,
    rng: &mut R,
) -> Individual {
    let (left, right) = if rng.random_bool(0.5) { (p1, p2) } else { (p2, p1) };
    if left.n_ops() + right.n_ops() + 1 > ctx.max_ops {
        return better_parent(p1, p2);
    }
    let expr = Expression::combine(random_op(rng), left.expression(), right.expression());
    Individual::new(expr, ctx.instance.target())
}

fn recombine<R: Rng>(
    ctx: &OperatorContext<'_>,
    p1: &Individual,
    p2: &Individual,
    rng: &mut R,
) -> Individual {
    let parents_leaves: Vec<Leaf> = p1
        .expression()
        .used()
        .iter()
        .chain(p2.expression().used())
        .copied()
        .collect();
    if parents_leaves.is_empty() {
        return better_parent(p1, p2);
    }

    let mut chosen: BTreeSet<Leaf> = parents_leaves
        .iter()
        .copied()
        .filter(|_| rng.random_bool(0.5))
        .collect();
    if chosen.is_empty() {
        chosen.insert(parents_leaves[rng.random_range(0..parents_leaves.len())]);
    }

    let mut leaves: Vec<Leaf> = chosen.into_iter().collect();
    shuffle(&mut leaves, rng);
    ctx.rebuild(&leaves, rng)
}

// ============================================================================
// Mutation
// ============================================================================

/// Perturbs `ind` and returns the rescored result.
///
/// # Panics
/// Panics if a `growth_probability` outside `[0, 1]` reaches this point;
/// [`NsgaConfig::validate`](super::NsgaConfig::validate) rejects it.
pub fn mutate<R: Rng>(
    policy: MutationPolicy,
    ctx: &OperatorContext<'_>,
    ind: &Individual,
    rng: &mut R,
) -> Individual {
    match policy {
        MutationPolicy::GrowthOrRebuild { growth_probability } => {
            if rng.random_bool(growth_probability) {
                grow(ctx, ind, rng)
            } else {
                add_or_replace(ctx, ind, rng)
            }
        }
        MutationPolicy::Rebuild => perturb(ctx, ind, rng),
    }
}

/// `(ind op block)` or `(block op ind)` against a random level-0 block.
/// A no-op when the budget is already used up.
fn grow<R: Rng>(ctx: &OperatorContext<'_>, ind: &Individual, rng: &mut R) -> Individual {
    if ind.n_ops() + 1 > ctx.max_ops || ctx.blocks.is_empty() {
        return ind.clone();
    }
    let op = random_op(rng);
    let block = &ctx.blocks[rng.random_range(0..ctx.blocks.len())];
    let expr = if rng.random_bool(0.5) {
        Expression::combine(op, ind.expression(), block)
    } else {
        Expression::combine(op, block, ind.expression())
    };
    Individual::new(expr, ctx.instance.target())
}

fn leaf_list(ind: &Individual) -> Vec<Leaf> {
    ind.expression().used().iter().copied().collect()
}

fn add_or_replace<R: Rng>(ctx: &OperatorContext<'_>, ind: &Individual, rng: &mut R) -> Individual {
    let mut leaves = leaf_list(ind);
    if leaves.is_empty() || rng.random_bool(0.5) {
        leaves.push(ctx.instance.random_leaf(rng));
    } else {
        let pos = rng.random_range(0..leaves.len());
        leaves[pos] = ctx.instance.random_leaf(rng);
    }
    shuffle(&mut leaves, rng);
    ctx.rebuild(&leaves, rng)
}

fn perturb<R: Rng>(ctx: &OperatorContext<'_>, ind: &Individual, rng: &mut R) -> Individual {
    let mut leaves = leaf_list(ind);
    match rng.random_range(0..3) {
        0 if !leaves.is_empty() => shuffle(&mut leaves, rng),
        1 if !leaves.is_empty() => {
            let pos = rng.random_range(0..leaves.len());
            leaves[pos] = ctx.instance.random_leaf(rng);
        }
        _ => leaves.push(ctx.instance.random_leaf(rng)),
    }
    ctx.rebuild(&leaves, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Bitset;
    use crate::random::create_rng;

    fn instance() -> Instance {
        Instance::new(
            vec![
                Bitset::from_elements([0, 1, 2]).unwrap(),
                Bitset::from_elements([2, 3]).unwrap(),
                Bitset::from_elements([4, 5, 6]).unwrap(),
                Bitset::from_elements([1, 6]).unwrap(),
            ],
            Bitset::from_elements([0, 1, 6]).unwrap(),
        )
        .with_universe_size(8)
        .unwrap()
    }

    fn random_individual<R: Rng>(ctx: &OperatorContext<'_>, rng: &mut R) -> Individual {
        let leaves = ctx.instance.leaves();
        ctx.rebuild(&leaves, rng)
    }

    fn leaf(inst: &Instance, i: usize) -> Individual {
        Individual::new(inst.leaf(Leaf::Base(i)), inst.target())
    }

    #[test]
    fn test_all_operators_respect_budget() {
        let inst = instance();
        let mut rng = create_rng(5);
        for max_ops in 0..4 {
            let ctx = OperatorContext::new(&inst, max_ops, 100);
            for _ in 0..100 {
                let p1 = random_individual(&ctx, &mut rng);
                let p2 = random_individual(&ctx, &mut rng);
                for policy in [CrossoverPolicy::Splice, CrossoverPolicy::Recombine] {
                    let child = crossover(policy, &ctx, &p1, &p2, &mut rng);
                    assert!(child.n_ops() <= max_ops);
                }
                for policy in [MutationPolicy::default(), MutationPolicy::Rebuild] {
                    let child = mutate(policy, &ctx, &p1, &mut rng);
                    assert!(child.n_ops() <= max_ops);
                }
            }
        }
    }

    #[test]
    fn test_splice_combines_within_budget() {
        let inst = instance();
        let ctx = OperatorContext::new(&inst, 3, 100);
        let mut rng = create_rng(1);
        let child = crossover(
            CrossoverPolicy::Splice,
            &ctx,
            &leaf(&inst, 0),
            &leaf(&inst, 2),
            &mut rng,
        );
        assert_eq!(child.n_ops(), 1);
        assert_eq!(child.size_h(), 2);
    }

    #[test]
    fn test_splice_over_budget_returns_better_parent() {
        let inst = instance();
        let ctx = OperatorContext::new(&inst, 0, 100);
        let mut rng = create_rng(1);
        let mut p1 = leaf(&inst, 0);
        let mut p2 = leaf(&inst, 1);
        p1.rank = 2;
        p2.rank = 0;
        let child = crossover(CrossoverPolicy::Splice, &ctx, &p1, &p2, &mut rng);
        assert!(child.expression().same_structure(p2.expression()));
        assert_eq!(child.rank, 0);
    }

    #[test]
    fn test_recombine_draws_from_parents() {
        let inst = instance();
        let ctx = OperatorContext::new(&inst, 3, 100);
        let mut rng = create_rng(8);
        let p1 = leaf(&inst, 0);
        let p2 = leaf(&inst, 3);
        for _ in 0..50 {
            let child = crossover(CrossoverPolicy::Recombine, &ctx, &p1, &p2, &mut rng);
            assert!(!child.expression().used().is_empty());
            assert!(child
                .expression()
                .used()
                .iter()
                .all(|l| *l == Leaf::Base(0) || *l == Leaf::Base(3)));
        }
    }

    #[test]
    fn test_growth_adds_one_operation() {
        let inst = instance();
        let ctx = OperatorContext::new(&inst, 2, 100);
        let mut rng = create_rng(2);
        let always_grow = MutationPolicy::GrowthOrRebuild {
            growth_probability: 1.0,
        };

        let grown = mutate(always_grow, &ctx, &leaf(&inst, 1), &mut rng);
        assert_eq!(grown.n_ops(), 1);
        let grown = mutate(always_grow, &ctx, &grown, &mut rng);
        assert_eq!(grown.n_ops(), 2);
        // Budget reached: unchanged.
        let same = mutate(always_grow, &ctx, &grown, &mut rng);
        assert!(same.expression().same_structure(grown.expression()));
    }

    #[test]
    fn test_rebuild_from_empty_adds_leaf() {
        let inst = instance();
        let ctx = OperatorContext::new(&inst, 2, 100);
        let mut rng = create_rng(4);
        let empty = Individual::new(Expression::empty(), inst.target());
        for policy in [
            MutationPolicy::Rebuild,
            MutationPolicy::GrowthOrRebuild {
                growth_probability: 0.0,
            },
        ] {
            let child = mutate(policy, &ctx, &empty, &mut rng);
            assert!(!child.expression().is_empty_expression());
            assert_eq!(child.expression().used().len(), 1);
        }
    }

    #[test]
    fn test_mutation_rescores() {
        let inst = instance();
        let ctx = OperatorContext::new(&inst, 3, 100);
        let mut rng = create_rng(21);
        let parent = leaf(&inst, 0);
        for _ in 0..30 {
            let child = mutate(MutationPolicy::Rebuild, &ctx, &parent, &mut rng);
            let expected = crate::objective::jaccard(child.expression().set(), inst.target());
            assert_eq!(child.jaccard(), expected);
        }
    }
}
