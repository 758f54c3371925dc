//! NSGA-II genetic search over set expressions.
//!
//! A population of structurally distinct expressions evolves under
//! tournament selection, crossover and mutation, and survivors are chosen
//! by Pareto rank and crowding distance on the three objectives (jaccard
//! maximized, `size_h` and `n_ops` minimized).
//!
//! # Key Types
//!
//! - [`NsgaConfig`]: Algorithm parameters (population size, rates, operator policies)
//! - [`NsgaRunner`]: Executes the evolutionary loop
//! - [`NsgaResult`]: Final front, population and run statistics
//! - [`Individual`]: A scored expression with its rank and crowding distance
//!
//! # Submodules
//!
//! - [`operators`]: Crossover and mutation policies
//! - [`multi_objective`]: Pareto non-dominated sorting and crowding distance
//!
//! # References
//!
//! - Deb et al. (2002), *A Fast and Elitist Multiobjective GA: NSGA-II*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*

mod config;
mod construction;
pub mod multi_objective;
pub mod operators;
mod runner;
mod selection;
mod types;

pub use config::NsgaConfig;
pub use construction::{build_random_expression, DEFAULT_CONSTRUCTION_ATTEMPTS};
pub use operators::{CrossoverPolicy, MutationPolicy, OperatorContext};
pub use runner::{NsgaResult, NsgaRunner, StopReason, PERFECT_JACCARD_TOLERANCE};
pub use selection::tournament;
pub use types::Individual;
