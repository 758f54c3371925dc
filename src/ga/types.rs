//! Population members.

use std::fmt;

use crate::domain::Bitset;
use crate::expr::Expression;
use crate::objective::{Scored, Solution};

/// A scored expression with its NSGA-II bookkeeping.
///
/// `rank` (front index, 0 = non-dominated) and `crowding` are reassigned
/// every generation by survivor selection and carry no meaning outside the
/// genetic runner. Freshly bred children start at rank 0, crowding 0.
#[derive(Debug, Clone)]
pub struct Individual {
    pub solution: Solution,
    pub rank: usize,
    pub crowding: f64,
}

impl Individual {
    /// Scores `expr` against `target`.
    pub fn new(expr: Expression, target: &Bitset) -> Self {
        Self::from_solution(Solution::evaluate(expr, target))
    }

    pub fn from_solution(solution: Solution) -> Self {
        Self {
            solution,
            rank: 0,
            crowding: 0.0,
        }
    }

    /// `true` if `self` wins a tournament against `other`: smaller rank,
    /// ties broken by larger crowding distance.
    pub fn beats(&self, other: &Individual) -> bool {
        self.rank < other.rank || (self.rank == other.rank && self.crowding > other.crowding)
    }
}

impl Scored for Individual {
    fn expression(&self) -> &Expression {
        self.solution.expression()
    }

    fn jaccard(&self) -> f64 {
        self.solution.jaccard()
    }

    fn size_h(&self) -> usize {
        self.solution.size_h()
    }

    fn n_ops(&self) -> usize {
        self.solution.n_ops()
    }
}

impl fmt::Display for Individual {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} rank={}", self.solution, self.rank)
    }
}
