//! Immutable expressions.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use super::node::{Leaf, Node};
use crate::domain::{Bitset, Op};

/// A derived set together with the tree that produced it.
///
/// Holds the resulting [`Bitset`], the structural [`Node`], the distinct
/// leaves it draws from, and its operation count. Composite expressions have
/// `n_ops = left.n_ops + right.n_ops + 1`.
///
/// # Example
///
/// ```
/// use u_setexpr::domain::{Bitset, Op};
/// use u_setexpr::expr::{Expression, Leaf};
///
/// let f0 = Expression::leaf(Leaf::Base(0), Bitset::from_elements([1, 2]).unwrap());
/// let f1 = Expression::leaf(Leaf::Base(1), Bitset::from_elements([2, 3]).unwrap());
/// let e = Expression::combine(Op::Union, &f0, &f1);
///
/// assert_eq!(e.to_string(), "(F0 ∪ F1)");
/// assert_eq!(e.n_ops(), 1);
/// assert_eq!(e.size_h(), 2);
/// assert_eq!(e.set().len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct Expression {
    set: Bitset,
    node: Arc<Node>,
    used: BTreeSet<Leaf>,
    n_ops: usize,
}

impl Expression {
    /// The canonical empty-set expression `∅`.
    ///
    /// Produced when there is nothing to build from (empty family, empty
    /// leaf list). It uses no leaves and no operations.
    pub fn empty() -> Self {
        Self {
            set: Bitset::empty(),
            node: Arc::new(Node::Empty),
            used: BTreeSet::new(),
            n_ops: 0,
        }
    }

    /// A single base set or the universe.
    pub fn leaf(leaf: Leaf, set: Bitset) -> Self {
        Self {
            set,
            node: Arc::new(Node::Leaf(leaf)),
            used: BTreeSet::from([leaf]),
            n_ops: 0,
        }
    }

    /// `(left op right)`.
    pub fn combine(op: Op, left: &Expression, right: &Expression) -> Self {
        let mut used = left.used.clone();
        used.extend(right.used.iter().copied());
        Self {
            set: op.apply(&left.set, &right.set),
            node: Arc::new(Node::Apply {
                op,
                left: Arc::clone(&left.node),
                right: Arc::clone(&right.node),
            }),
            used,
            n_ops: left.n_ops + right.n_ops + 1,
        }
    }

    /// The set this expression evaluates to.
    #[inline]
    pub fn set(&self) -> &Bitset {
        &self.set
    }

    /// Structural identity of this expression.
    #[inline]
    pub fn node(&self) -> &Arc<Node> {
        &self.node
    }

    /// Distinct leaves the expression draws from.
    #[inline]
    pub fn used(&self) -> &BTreeSet<Leaf> {
        &self.used
    }

    /// Number of set operations.
    #[inline]
    pub fn n_ops(&self) -> usize {
        self.n_ops
    }

    /// Number of distinct base sets used. The universe does not count.
    pub fn size_h(&self) -> usize {
        self.used.iter().filter(|leaf| leaf.base_index().is_some()).count()
    }

    pub fn uses_universe(&self) -> bool {
        self.used.contains(&Leaf::Universe)
    }

    /// `true` for the canonical `∅` expression.
    pub fn is_empty_expression(&self) -> bool {
        matches!(*self.node, Node::Empty)
    }

    /// Structural equality (same tree), independent of the resulting set.
    pub fn same_structure(&self, other: &Expression) -> bool {
        Arc::ptr_eq(&self.node, &other.node) || self.node == other.node
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(i: usize, elements: &[usize]) -> Expression {
        Expression::leaf(
            Leaf::Base(i),
            Bitset::from_elements(elements.iter().copied()).unwrap(),
        )
    }

    #[test]
    fn test_empty_expression() {
        let e = Expression::empty();
        assert!(e.set().is_empty());
        assert_eq!(e.n_ops(), 0);
        assert_eq!(e.size_h(), 0);
        assert!(e.is_empty_expression());
        assert_eq!(e.to_string(), "∅");
    }

    #[test]
    fn test_combine_counts_ops_and_leaves() {
        let a = leaf(0, &[1, 2, 3]);
        let b = leaf(1, &[2, 4]);
        let u = Expression::leaf(Leaf::Universe, Bitset::full());

        let ab = Expression::combine(Op::Intersect, &a, &b);
        let abu = Expression::combine(Op::Difference, &u, &ab);
        let nested = Expression::combine(Op::Union, &abu, &ab);

        assert_eq!(ab.n_ops(), 1);
        assert_eq!(abu.n_ops(), 2);
        assert_eq!(nested.n_ops(), 4);
        assert_eq!(nested.size_h(), 2);
        assert!(nested.uses_universe());
        assert_eq!(
            nested.used().iter().copied().collect::<Vec<_>>(),
            vec![Leaf::Universe, Leaf::Base(0), Leaf::Base(1)]
        );
        assert_eq!(ab.set(), &Bitset::from_elements([2]).unwrap());
    }

    #[test]
    fn test_same_set_different_structure_are_distinct() {
        let a = leaf(0, &[1, 2]);
        let b = leaf(1, &[1, 2]);
        let ab = Expression::combine(Op::Union, &a, &b);
        let ba = Expression::combine(Op::Union, &b, &a);

        assert_eq!(ab.set(), ba.set());
        assert!(!ab.same_structure(&ba));
        assert!(ab.same_structure(&ab.clone()));
        assert!(ab.same_structure(&Expression::combine(Op::Union, &a, &b)));
    }

    #[test]
    fn test_repeated_leaf_counts_once() {
        let a = leaf(3, &[5]);
        let aa = Expression::combine(Op::Union, &a, &a);
        assert_eq!(aa.size_h(), 1);
        assert_eq!(aa.n_ops(), 1);
        assert_eq!(aa.to_string(), "(F3 ∪ F3)");
    }
}
