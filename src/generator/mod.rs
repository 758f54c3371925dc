//! Random instance generation.
//!
//! - [`generate_target`] and [`generate_family`] draw independent random
//!   sets for self-test runs.
//! - [`GroundTruthInstance`] draws a family and a reference expression over
//!   it, then uses the reference's set as the target, so a perfect match is
//!   known to exist within the operation budget.

mod config;
mod ground_truth;
mod sampling;

pub use config::GeneratorConfig;
pub use ground_truth::{GroundTruthConfig, GroundTruthInstance};
pub use sampling::{generate_family, generate_target};
