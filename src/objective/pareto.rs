//! Pareto dominance and front filtering.

use std::cmp::Ordering;
use std::collections::HashSet;

use super::solution::Scored;

/// Returns `true` if `a` Pareto-dominates `b`.
///
/// `a` dominates `b` when it is at least as good on every objective
/// (`jaccard >=`, `n_ops <=`, `size_h <=`) and strictly better on one.
pub fn dominates<A: Scored + ?Sized, B: Scored + ?Sized>(a: &A, b: &B) -> bool {
    let no_worse =
        a.jaccard() >= b.jaccard() && a.n_ops() <= b.n_ops() && a.size_h() <= b.size_h();
    let better = a.jaccard() > b.jaccard() || a.n_ops() < b.n_ops() || a.size_h() < b.size_h();
    no_worse && better
}

/// Presentation order of a front: jaccard descending, then `size_h`
/// ascending, then `n_ops` ascending.
fn front_order<T: Scored>(a: &T, b: &T) -> Ordering {
    b.jaccard()
        .total_cmp(&a.jaccard())
        .then_with(|| a.size_h().cmp(&b.size_h()))
        .then_with(|| a.n_ops().cmp(&b.n_ops()))
}

/// Non-dominated subset of `candidates`.
///
/// Each candidate is checked against a running front: it is discarded if a
/// front member dominates it, otherwise it evicts every member it dominates
/// and joins the front. Members with identical objective values do not
/// dominate each other and are all kept. The result is stably sorted by
/// jaccard descending, `size_h` ascending, `n_ops` ascending.
///
/// # Complexity
///
/// O(n · f) where f is the front size; O(n²) in the worst case.
///
/// # Example
///
/// ```
/// use u_setexpr::domain::Bitset;
/// use u_setexpr::expr::{Expression, Leaf};
/// use u_setexpr::objective::{pareto_front, Scored, Solution};
///
/// let target = Bitset::from_elements([1, 2]).unwrap();
/// let exact = Solution::evaluate(
///     Expression::leaf(Leaf::Base(0), Bitset::from_elements([1, 2]).unwrap()),
///     &target,
/// );
/// let worse = Solution::evaluate(
///     Expression::leaf(Leaf::Base(1), Bitset::from_elements([1]).unwrap()),
///     &target,
/// );
///
/// let front = pareto_front(vec![worse, exact]);
/// assert_eq!(front.len(), 1);
/// assert_eq!(front[0].jaccard(), 1.0);
/// ```
pub fn pareto_front<T: Scored>(candidates: Vec<T>) -> Vec<T> {
    let mut front: Vec<T> = Vec::with_capacity(candidates.len() / 10 + 1);

    'candidates: for candidate in candidates {
        let mut i = 0;
        while i < front.len() {
            if dominates(&front[i], &candidate) {
                continue 'candidates;
            }
            if dominates(&candidate, &front[i]) {
                front.swap_remove(i);
            } else {
                i += 1;
            }
        }
        front.push(candidate);
    }

    front.sort_by(front_order);
    front
}

/// Collapses members that evaluate to the same set, keeping the first one.
///
/// Applied to a sorted front this keeps the best-ranked representative.
pub fn unique_by_set<T: Scored>(solutions: Vec<T>) -> Vec<T> {
    let mut seen = HashSet::with_capacity(solutions.len());
    solutions
        .into_iter()
        .filter(|s| seen.insert(*s.expression().set()))
        .collect()
}

/// Highest jaccard among `solutions`, or `None` if empty.
pub fn best_jaccard<T: Scored>(solutions: &[T]) -> Option<f64> {
    solutions.iter().map(Scored::jaccard).max_by(f64::total_cmp)
}
