//! Operator trees.

use std::fmt;
use std::sync::Arc;

use crate::domain::Op;

/// A terminal of an expression tree.
///
/// `Universe` orders before every base set, mirroring its role as the
/// reserved index `-1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Leaf {
    /// The universal set `U`.
    Universe,
    /// The base set `F_i`.
    Base(usize),
}

impl Leaf {
    /// Returns the base index, or `None` for the universe.
    pub fn base_index(self) -> Option<usize> {
        match self {
            Leaf::Universe => None,
            Leaf::Base(i) => Some(i),
        }
    }
}

impl fmt::Display for Leaf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Leaf::Universe => f.write_str("U"),
            Leaf::Base(i) => write!(f, "F{i}"),
        }
    }
}

/// Structure of an expression.
///
/// Subtrees are shared through `Arc`, so combining two expressions never
/// copies their trees. Equality and hashing are structural.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Node {
    /// The canonical empty-set expression `∅`.
    Empty,
    /// A base set or the universe.
    Leaf(Leaf),
    /// `(left op right)`
    Apply {
        op: Op,
        left: Arc<Node>,
        right: Arc<Node>,
    },
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Empty => f.write_str("∅"),
            Node::Leaf(leaf) => write!(f, "{leaf}"),
            Node::Apply { op, left, right } => write!(f, "({left} {op} {right})"),
        }
    }
}
