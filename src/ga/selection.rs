//! Parent selection.
//!
//! # References
//!
//! - Deb et al. (2002), crowded-comparison operator

use rand::Rng;

use super::types::Individual;

/// Crowded tournament selection with replacement.
///
/// Draws `k` members uniformly (a member may be drawn more than once) and
/// returns the index of the winner: smallest rank, ties broken by larger
/// crowding distance. On a full tie the first drawn member wins.
///
/// # Complexity
/// O(k) per selection
///
/// # Panics
/// Panics if `population` is empty.
pub fn tournament<R: Rng>(population: &[Individual], k: usize, rng: &mut R) -> usize {
    assert!(
        !population.is_empty(),
        "cannot select from empty population"
    );
    let n = population.len();

    let mut best_idx = rng.random_range(0..n);
    for _ in 1..k.max(1) {
        let idx = rng.random_range(0..n);
        if population[idx].beats(&population[best_idx]) {
            best_idx = idx;
        }
    }
    best_idx
}
