//! Expression model.
//!
//! An [`Expression`] is a derived set together with the operator tree that
//! produced it. Expressions are immutable: new ones are only ever built by
//! combining two existing expressions with one [`Op`](crate::domain::Op).
//!
//! Structural identity is carried by [`Node`], a shared tree with derived
//! structural equality and hashing. Two expressions are duplicates for
//! construction purposes when their trees are equal, regardless of whether
//! they evaluate to the same set.

mod expression;
mod node;

pub use expression::Expression;
pub use node::{Leaf, Node};
