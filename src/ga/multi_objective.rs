//! NSGA-II ranking utilities.
//!
//! # Algorithms
//!
//! - [`non_dominated_sort`]: Fast non-dominated sorting (Deb et al., 2002)
//! - [`crowding_distance`]: Crowding distance assignment for diversity preservation
//!
//! Both operate on anything implementing [`Scored`], using the crate's
//! dominance relation (jaccard maximized, `size_h` and `n_ops` minimized).
//!
//! # References
//!
//! - Deb et al. (2002), "A Fast and Elitist Multiobjective Genetic Algorithm: NSGA-II"
//! - IEEE Transactions on Evolutionary Computation, 6(2), 182-197

use crate::objective::{dominates, Scored};

/// Number of objectives every member is scored on.
const OBJECTIVES: usize = 3;

/// Result of non-dominated sorting.
///
/// Each element of `ranks` corresponds to the Pareto rank of the solution
/// at the same index. Rank 0 is the Pareto front (non-dominated solutions).
#[derive(Debug, Clone, Default)]
pub struct NondominatedSortResult {
    /// Pareto rank for each solution (0 = front).
    pub ranks: Vec<usize>,

    /// Indices grouped by front: `fronts[0]` contains rank-0 indices, etc.
    pub fronts: Vec<Vec<usize>>,
}

/// Fast non-dominated sorting.
///
/// # Algorithm (Deb et al., 2002)
///
/// 1. For each pair of solutions, determine dominance
/// 2. Solutions dominated by no other belong to front 0 (rank 0)
/// 3. Remove front 0, repeat to find subsequent fronts
///
/// # Complexity
///
/// O(n²) dominance checks for n solutions.
///
/// An empty input yields no ranks and no fronts.
pub fn non_dominated_sort<T: Scored>(population: &[T]) -> NondominatedSortResult {
    let n = population.len();
    if n == 0 {
        return NondominatedSortResult::default();
    }

    let mut domination_count = vec![0usize; n];
    let mut dominated_by: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut ranks = vec![0usize; n];

    for i in 0..n {
        for j in (i + 1)..n {
            if dominates(&population[i], &population[j]) {
                dominated_by[i].push(j);
                domination_count[j] += 1;
            } else if dominates(&population[j], &population[i]) {
                dominated_by[j].push(i);
                domination_count[i] += 1;
            }
        }
    }

    let front_0: Vec<usize> = (0..n).filter(|&i| domination_count[i] == 0).collect();
    let mut fronts = vec![front_0];
    loop {
        let Some(current) = fronts.last() else {
            break;
        };
        let mut next_front = Vec::new();

        for &i in current {
            for &j in &dominated_by[i] {
                domination_count[j] -= 1;
                if domination_count[j] == 0 {
                    ranks[j] = fronts.len();
                    next_front.push(j);
                }
            }
        }

        if next_front.is_empty() {
            break;
        }
        fronts.push(next_front);
    }

    NondominatedSortResult { ranks, fronts }
}

/// Objective vector in minimization form: `[-jaccard, size_h, n_ops]`.
fn objective_vector<T: Scored>(member: &T) -> [f64; OBJECTIVES] {
    [
        -member.jaccard(),
        member.size_h() as f64,
        member.n_ops() as f64,
    ]
}

/// Crowding distance assignment for diversity preservation.
///
/// Computes the crowding distance for each member of one front. Higher
/// distance means the member is more isolated (more diverse).
///
/// Boundary members (min/max for any objective) receive `f64::INFINITY`.
/// An objective whose range within the front is zero contributes nothing.
///
/// # Algorithm (Deb et al., 2002)
///
/// For each objective:
/// 1. Sort members by objective value
/// 2. Assign infinity to boundary members
/// 3. For interior members, add the normalized distance between neighbors
///
/// # Complexity
///
/// O(n log n) per objective
pub fn crowding_distance<T: Scored>(front: &[T]) -> Vec<f64> {
    let n = front.len();
    if n <= 2 {
        return vec![f64::INFINITY; n];
    }

    let objectives: Vec<[f64; OBJECTIVES]> = front.iter().map(objective_vector).collect();
    let mut distances = vec![0.0f64; n];

    for obj_idx in 0..OBJECTIVES {
        let mut indices: Vec<usize> = (0..n).collect();
        indices.sort_by(|&a, &b| objectives[a][obj_idx].total_cmp(&objectives[b][obj_idx]));

        distances[indices[0]] = f64::INFINITY;
        distances[indices[n - 1]] = f64::INFINITY;

        let range = objectives[indices[n - 1]][obj_idx] - objectives[indices[0]][obj_idx];
        if range > 0.0 {
            for i in 1..(n - 1) {
                let prev = objectives[indices[i - 1]][obj_idx];
                let next = objectives[indices[i + 1]][obj_idx];
                distances[indices[i]] += (next - prev) / range;
            }
        }
    }

    distances
}

// ============================================================================
// Tests
// ============================================================================
