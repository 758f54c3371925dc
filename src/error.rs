//! Error type shared by every module of the crate.
//!
//! Only genuinely invalid input is reported here. Budget exhaustion during
//! construction, crossover or mutation is handled by declining the operation,
//! and degenerate inputs (empty family, empty leaf list) resolve to the empty
//! expression instead of failing.

use thiserror::Error;

/// Errors surfaced by the search library.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SetExprError {
    /// An operator code outside `0..=2` was supplied.
    #[error("invalid operator code: {0} (expected 0=union, 1=intersect, 2=difference)")]
    InvalidOperator(i64),

    /// A metric name that does not match any [`Metric`](crate::objective::Metric).
    #[error("unknown metric: {0}")]
    UnknownMetric(String),

    /// An argument outside its admissible range.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A configuration that failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// An element index that does not fit the compiled universe capacity.
    #[error("element {element} is outside the universe capacity {capacity}")]
    ElementOutOfRange { element: usize, capacity: usize },
}

pub type Result<T> = std::result::Result<T, SetExprError>;
