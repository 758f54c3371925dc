//! Greedy search strategies.
//!
//! - [`GreedyRunner`]: multi-objective Pareto-frontier expansion. Only the
//!   current frontier is extended, one operation per level, against the
//!   level-0 blocks.
//! - [`HillClimbRunner`]: single-objective climb on jaccard, one
//!   `(operator, base set)` move at a time.
//!
//! Both trade exactness for speed; neither reconsiders a pruned expression.

mod config;
mod frontier;
mod hill_climb;

pub use config::{GreedyConfig, HillClimbConfig};
pub use frontier::{GreedyResult, GreedyRunner};
pub use hill_climb::{HillClimbResult, HillClimbRunner, HillClimbStep};
