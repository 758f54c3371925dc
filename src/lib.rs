//! Multi-objective search for compact set-algebra expressions.
//!
//! Given a family of base sets `F`, a universe `U` and a target set `G`,
//! find expressions built from union, intersection and difference over
//! `F ∪ {U}` whose result approximates `G`, trading off three objectives:
//!
//! - **Jaccard** similarity to `G` (maximize)
//! - **sizeH**, the number of distinct base sets used (minimize)
//! - **n_ops**, the number of operations (minimize)
//!
//! Three interchangeable strategies search the same expression space and
//! each returns a Pareto front:
//!
//! - **Exhaustive**: depth-bounded enumeration of every expression with at
//!   most `k` operations. Exact, but only tractable for small inputs.
//! - **Greedy**: Pareto-frontier expansion one operation at a time, plus a
//!   single-objective hill climb.
//! - **NSGA-II**: elitist multi-objective genetic search.
//!
//! The [`generator`] module produces random instances, including
//! ground-truth instances whose target is the set of a known expression.
//!
//! # Example
//!
//! ```
//! use u_setexpr::domain::Bitset;
//! use u_setexpr::exhaustive::{ExhaustiveConfig, ExhaustiveRunner};
//! use u_setexpr::instance::Instance;
//! use u_setexpr::objective::Scored;
//!
//! let family = vec![
//!     Bitset::from_elements([1, 2, 3]).unwrap(),
//!     Bitset::from_elements([3, 4]).unwrap(),
//! ];
//! let target = Bitset::from_elements([1, 2, 3, 4]).unwrap();
//! let instance = Instance::new(family, target);
//!
//! let result = ExhaustiveRunner::run(&instance, &ExhaustiveConfig::default()).unwrap();
//! assert_eq!(result.front[0].jaccard(), 1.0);
//! assert_eq!(result.front[0].n_ops(), 1);
//! ```

pub mod domain;
pub mod error;
pub mod exhaustive;
pub mod expr;
pub mod ga;
pub mod generator;
pub mod greedy;
pub mod instance;
pub mod objective;
pub mod random;
