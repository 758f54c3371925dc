//! Scored solutions.

use std::fmt;

use super::metric::jaccard;
use crate::domain::Bitset;
use crate::expr::Expression;

/// Anything carrying an expression and its three objective values.
///
/// Implemented by [`Solution`] and by the GA's
/// [`Individual`](crate::ga::Individual).
pub trait Scored {
    fn expression(&self) -> &Expression;

    /// Jaccard similarity to the target (maximized).
    fn jaccard(&self) -> f64;

    /// Distinct base sets used (minimized).
    fn size_h(&self) -> usize;

    /// Operation count (minimized).
    fn n_ops(&self) -> usize;
}

impl<T: Scored + ?Sized> Scored for &T {
    fn expression(&self) -> &Expression {
        (**self).expression()
    }

    fn jaccard(&self) -> f64 {
        (**self).jaccard()
    }

    fn size_h(&self) -> usize {
        (**self).size_h()
    }

    fn n_ops(&self) -> usize {
        (**self).n_ops()
    }
}

/// An expression with its cached objective values.
///
/// Created once per evaluated expression and never modified.
#[derive(Debug, Clone)]
pub struct Solution {
    expr: Expression,
    jaccard: f64,
    size_h: usize,
    n_ops: usize,
}

impl Solution {
    /// Scores `expr` against `target`.
    pub fn evaluate(expr: Expression, target: &Bitset) -> Self {
        Self {
            jaccard: jaccard(expr.set(), target),
            size_h: expr.size_h(),
            n_ops: expr.n_ops(),
            expr,
        }
    }

    pub fn into_expression(self) -> Expression {
        self.expr
    }
}

impl Scored for Solution {
    fn expression(&self) -> &Expression {
        &self.expr
    }

    fn jaccard(&self) -> f64 {
        self.jaccard
    }

    fn size_h(&self) -> usize {
        self.size_h
    }

    fn n_ops(&self) -> usize {
        self.n_ops
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [jaccard={:.6}, ops={}, |H|={}]",
            self.expr, self.jaccard, self.n_ops, self.size_h
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Op;
    use crate::expr::Leaf;

    #[test]
    fn test_evaluate_caches_objectives() {
        let a = Expression::leaf(Leaf::Base(0), Bitset::from_elements([1, 2]).unwrap());
        let b = Expression::leaf(Leaf::Base(1), Bitset::from_elements([2, 3]).unwrap());
        let e = Expression::combine(Op::Union, &a, &b);
        let s = Solution::evaluate(e, &Bitset::from_elements([1, 2, 3, 4]).unwrap());

        assert!((s.jaccard() - 0.75).abs() < 1e-12);
        assert_eq!(s.size_h(), 2);
        assert_eq!(s.n_ops(), 1);
        assert_eq!(
            s.to_string(),
            "(F0 ∪ F1) [jaccard=0.750000, ops=1, |H|=2]"
        );
    }
}
