//! Exhaustive depth-bounded search.
//!
//! Enumerates every expression with at most `k` operations over the base
//! family and the universe, scores them all and keeps the Pareto front.
//! This is the only strategy that guarantees the exact front, and it is
//! only tractable for small families and budgets.
//!
//! - [`ExhaustiveConfig`]: operation budget and duplicate-set pruning
//! - [`ExhaustiveRunner`]: single-pass and two-pass enumeration
//! - [`ExhaustiveResult`]: front and enumeration statistics

mod config;
mod runner;

pub use config::{ExhaustiveConfig, MAX_EXHAUSTIVE_OPS};
pub use runner::{ExhaustiveResult, ExhaustiveRunner};
