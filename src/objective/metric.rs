//! Objective metrics.

use std::fmt;
use std::str::FromStr;

use crate::domain::Bitset;
use crate::error::SetExprError;
use crate::expr::Expression;

/// Jaccard similarity `|h ∩ g| / |h ∪ g|`.
///
/// Two empty sets are identical, so their similarity is defined as `1.0`.
///
/// # Example
///
/// ```
/// use u_setexpr::domain::Bitset;
/// use u_setexpr::objective::jaccard;
///
/// let h = Bitset::from_elements([1, 2, 3]).unwrap();
/// let g = Bitset::from_elements([2, 3, 4]).unwrap();
/// assert!((jaccard(&h, &g) - 0.5).abs() < 1e-12);
/// assert_eq!(jaccard(&Bitset::empty(), &Bitset::empty()), 1.0);
/// ```
pub fn jaccard(h: &Bitset, g: &Bitset) -> f64 {
    let union_size = h.union(g).len();
    if union_size == 0 {
        return 1.0;
    }
    h.intersect(g).len() as f64 / union_size as f64
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

/// Precision `|h ∩ g| / |h|`, or `0.0` when `h` is empty.
pub fn precision(h: &Bitset, g: &Bitset) -> f64 {
    ratio(h.intersect(g).len(), h.len())
}

/// Recall `|h ∩ g| / |g|`, or `0.0` when `g` is empty.
pub fn recall(h: &Bitset, g: &Bitset) -> f64 {
    ratio(h.intersect(g).len(), g.len())
}

/// Harmonic mean of [`precision`] and [`recall`], or `0.0` when both are zero.
///
/// ```
/// use u_setexpr::domain::Bitset;
/// use u_setexpr::objective::f1;
///
/// let h = Bitset::from_elements([1, 2]).unwrap();
/// let g = Bitset::from_elements([2, 3, 4, 5]).unwrap();
/// // precision 0.5, recall 0.25
/// assert!((f1(&h, &g) - 1.0 / 3.0).abs() < 1e-12);
/// ```
pub fn f1(h: &Bitset, g: &Bitset) -> f64 {
    let (p, r) = (precision(h, g), recall(h, g));
    if p + r == 0.0 {
        0.0
    } else {
        2.0 * p * r / (p + r)
    }
}

/// The objectives an expression can be scored on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Metric {
    /// Jaccard similarity to the target (maximized).
    Jaccard,
    Precision,
    Recall,
    F1,
    /// Distinct base sets used (minimized).
    SizeH,
    /// Operation count (minimized).
    OpSize,
}

impl Metric {
    pub const ALL: [Metric; 6] = [
        Metric::Jaccard,
        Metric::Precision,
        Metric::Recall,
        Metric::F1,
        Metric::SizeH,
        Metric::OpSize,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Metric::Jaccard => "Jaccard",
            Metric::Precision => "Precision",
            Metric::Recall => "Recall",
            Metric::F1 => "F1",
            Metric::SizeH => "SizeH",
            Metric::OpSize => "OpSize",
        }
    }

    /// `true` if larger values are better.
    pub fn is_maximization(self) -> bool {
        !matches!(self, Metric::SizeH | Metric::OpSize)
    }

    /// Scores `expr` against `target`.
    pub fn evaluate(self, expr: &Expression, target: &Bitset) -> f64 {
        match self {
            Metric::Jaccard => jaccard(expr.set(), target),
            Metric::Precision => precision(expr.set(), target),
            Metric::Recall => recall(expr.set(), target),
            Metric::F1 => f1(expr.set(), target),
            Metric::SizeH => expr.size_h() as f64,
            Metric::OpSize => expr.n_ops() as f64,
        }
    }
}

impl FromStr for Metric {
    type Err = SetExprError;

    /// Parses a metric name, case-insensitively.
    ///
    /// Accepts `jaccard`/`iou`, `precision`, `recall`, `f1`, `sizeh`/`size`,
    /// `opsize`/`op_size`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "jaccard" | "iou" => Ok(Metric::Jaccard),
            "precision" => Ok(Metric::Precision),
            "recall" => Ok(Metric::Recall),
            "f1" => Ok(Metric::F1),
            "sizeh" | "size" => Ok(Metric::SizeH),
            "opsize" | "op_size" => Ok(Metric::OpSize),
            _ => Err(SetExprError::UnknownMetric(s.to_string())),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
