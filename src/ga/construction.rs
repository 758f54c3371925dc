//! Random expression construction.

use log::trace;
use rand::Rng;

use crate::domain::Op;
use crate::expr::{Expression, Leaf};
use crate::instance::Instance;

/// Default cap on consecutive failed merge attempts.
pub const DEFAULT_CONSTRUCTION_ATTEMPTS: usize = 100;

/// Builds a random expression over `leaves` with at most `max_ops`
/// operations.
///
/// The pool starts with one leaf expression per entry of `leaves`. Each
/// attempt draws two pool positions uniformly; if they differ and the
/// merged operation count stays within `max_ops`, the lower position is
/// replaced by `(lower op higher)` under a random operator and the higher
/// one is removed. A repeated position or an over-budget merge counts as a
/// failure. Construction stops when one node remains or after
/// `max_failures` consecutive failures, and returns the first pool entry,
/// so not every leaf is guaranteed to be used.
///
/// An empty `leaves` slice yields the empty expression `∅`.
///
/// # Example
///
/// ```
/// use u_setexpr::domain::Bitset;
/// use u_setexpr::expr::Leaf;
/// use u_setexpr::ga::build_random_expression;
/// use u_setexpr::instance::Instance;
/// use u_setexpr::random::create_rng;
///
/// let instance = Instance::new(
///     vec![Bitset::from_elements([1]).unwrap(), Bitset::from_elements([2]).unwrap()],
///     Bitset::from_elements([1, 2]).unwrap(),
/// );
/// let mut rng = create_rng(42);
/// let leaves = [Leaf::Base(0), Leaf::Base(1), Leaf::Universe];
///
/// let e = build_random_expression(&instance, &leaves, 2, 100, &mut rng);
/// assert!(e.n_ops() <= 2);
/// ```
pub fn build_random_expression<R: Rng>(
    instance: &Instance,
    leaves: &[Leaf],
    max_ops: usize,
    max_failures: usize,
    rng: &mut R,
) -> Expression {
    let mut pool: Vec<Expression> = leaves.iter().map(|&leaf| instance.leaf(leaf)).collect();
    if pool.is_empty() {
        return Expression::empty();
    }

    let mut failures = 0usize;
    while pool.len() > 1 && failures < max_failures {
        let a = rng.random_range(0..pool.len());
        let b = rng.random_range(0..pool.len());
        if a == b {
            failures += 1;
            continue;
        }
        let (lo, hi) = if a < b { (a, b) } else { (b, a) };

        let op = Op::ALL[rng.random_range(0..Op::ALL.len())];
        if pool[lo].n_ops() + pool[hi].n_ops() + 1 > max_ops {
            failures += 1;
            continue;
        }

        pool[lo] = Expression::combine(op, &pool[lo], &pool[hi]);
        pool.remove(hi);
        failures = 0;
    }

    if pool.len() > 1 {
        trace!(
            "construction gave up after {max_failures} failures with {} nodes left",
            pool.len()
        );
    }
    pool.swap_remove(0)
}
