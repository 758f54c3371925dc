//! Binary set operators.

use std::fmt;

use super::bitset::Bitset;
use crate::error::{Result, SetExprError};

/// A binary set operator.
///
/// Operator codes follow the classic numbering: `0` = union,
/// `1` = intersection, `2` = difference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Op {
    /// `A ∪ B`
    Union,
    /// `A ∩ B`
    Intersect,
    /// `A \ B`
    Difference,
}

impl Op {
    /// All operators, in code order.
    pub const ALL: [Op; 3] = [Op::Union, Op::Intersect, Op::Difference];

    /// Decodes an operator code.
    ///
    /// # Errors
    /// [`SetExprError::InvalidOperator`] for codes outside `0..=2`.
    pub fn from_code(code: i64) -> Result<Op> {
        match code {
            0 => Ok(Op::Union),
            1 => Ok(Op::Intersect),
            2 => Ok(Op::Difference),
            other => Err(SetExprError::InvalidOperator(other)),
        }
    }

    /// The numeric code of this operator.
    pub fn code(self) -> i64 {
        match self {
            Op::Union => 0,
            Op::Intersect => 1,
            Op::Difference => 2,
        }
    }

    /// Applies the operator to two sets.
    #[inline]
    pub fn apply(self, a: &Bitset, b: &Bitset) -> Bitset {
        match self {
            Op::Union => a.union(b),
            Op::Intersect => a.intersect(b),
            Op::Difference => a.difference(b),
        }
    }

    /// The mathematical symbol used when rendering expressions.
    pub fn symbol(self) -> &'static str {
        match self {
            Op::Union => "∪",
            Op::Intersect => "∩",
            Op::Difference => "\\",
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Applies the operator with the given code to `a` and `b`.
///
/// # Errors
/// [`SetExprError::InvalidOperator`] if `code` is not 0, 1 or 2.
///
/// # Example
///
/// ```
/// use u_setexpr::domain::{apply, Bitset};
///
/// let a = Bitset::from_elements([1, 2]).unwrap();
/// let b = Bitset::from_elements([2, 3]).unwrap();
/// assert_eq!(apply(2, &a, &b).unwrap(), Bitset::from_elements([1]).unwrap());
/// assert!(apply(3, &a, &b).is_err());
/// ```
pub fn apply(code: i64, a: &Bitset, b: &Bitset) -> Result<Bitset> {
    Ok(Op::from_code(code)?.apply(a, b))
}
