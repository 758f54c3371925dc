//! Objective evaluation and Pareto dominance.
//!
//! Every candidate expression is scored on three competing objectives:
//!
//! - **Jaccard** similarity to the target (maximize)
//! - **sizeH**, the number of distinct base sets used (minimize)
//! - **n_ops**, the number of set operations (minimize)
//!
//! The dominance predicate and the Pareto filter are generic over
//! [`Scored`], so plain [`Solution`]s and ranked GA individuals share one
//! implementation.

mod metric;
mod pareto;
mod solution;

pub use metric::{f1, jaccard, precision, recall, Metric};
pub use pareto::{best_jaccard, dominates, pareto_front, unique_by_set};
pub use solution::{Scored, Solution};
