//! Search instances.
//!
//! An [`Instance`] bundles everything a search strategy consumes: the base
//! family `F`, the universe `U` and the target `G`. It is immutable for the
//! duration of a search.

use rand::Rng;

use crate::domain::Bitset;
use crate::error::Result;
use crate::expr::{Expression, Leaf};

/// Base family, universe and target of one search.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Instance {
    family: Vec<Bitset>,
    universe: Bitset,
    target: Bitset,
}

impl Instance {
    /// Creates an instance whose universe is the full compiled capacity.
    pub fn new(family: Vec<Bitset>, target: Bitset) -> Self {
        Self {
            family,
            universe: Bitset::full(),
            target,
        }
    }

    /// Replaces the universe set.
    pub fn with_universe(mut self, universe: Bitset) -> Self {
        self.universe = universe;
        self
    }

    /// Restricts the universe to the elements `0..n`.
    ///
    /// # Errors
    /// `InvalidArgument` if `n` exceeds the compiled capacity.
    pub fn with_universe_size(self, n: usize) -> Result<Self> {
        Ok(self.with_universe(Bitset::prefix(n)?))
    }

    #[inline]
    pub fn family(&self) -> &[Bitset] {
        &self.family
    }

    #[inline]
    pub fn universe(&self) -> &Bitset {
        &self.universe
    }

    #[inline]
    pub fn target(&self) -> &Bitset {
        &self.target
    }

    /// The expression for a single leaf.
    ///
    /// # Panics
    /// Panics if `leaf` is `Base(i)` with `i >= family().len()`.
    pub fn leaf(&self, leaf: Leaf) -> Expression {
        match leaf {
            Leaf::Universe => Expression::leaf(leaf, self.universe),
            Leaf::Base(i) => Expression::leaf(leaf, self.family[i]),
        }
    }

    /// Every leaf of the instance: each base set in order, then the universe.
    pub fn leaves(&self) -> Vec<Leaf> {
        (0..self.family.len())
            .map(Leaf::Base)
            .chain(std::iter::once(Leaf::Universe))
            .collect()
    }

    /// Level-0 building blocks: one expression per base set, then `U`.
    pub fn base_blocks(&self) -> Vec<Expression> {
        self.leaves().into_iter().map(|leaf| self.leaf(leaf)).collect()
    }

    /// Draws a leaf uniformly from `{U} ∪ F`.
    pub fn random_leaf<R: Rng>(&self, rng: &mut R) -> Leaf {
        let idx = rng.random_range(0..=self.family.len());
        if idx == 0 {
            Leaf::Universe
        } else {
            Leaf::Base(idx - 1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    fn instance() -> Instance {
        Instance::new(
            vec![
                Bitset::from_elements([1, 2]).unwrap(),
                Bitset::from_elements([3]).unwrap(),
            ],
            Bitset::from_elements([1, 3]).unwrap(),
        )
    }

    #[test]
    fn test_base_blocks_order() {
        let blocks = instance().base_blocks();
        let names: Vec<String> = blocks.iter().map(|e| e.to_string()).collect();
        assert_eq!(names, vec!["F0", "F1", "U"]);
        assert_eq!(blocks[2].set(), &Bitset::full());
    }

    #[test]
    fn test_universe_size() {
        let inst = instance().with_universe_size(10).unwrap();
        assert_eq!(inst.universe().len(), 10);
        assert!(instance().with_universe_size(100_000).is_err());
    }

    #[test]
    fn test_random_leaf_covers_all() {
        let inst = instance();
        let mut rng = create_rng(3);
        let mut seen = std::collections::BTreeSet::new();
        for _ in 0..200 {
            seen.insert(inst.random_leaf(&mut rng));
        }
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn test_random_leaf_empty_family() {
        let inst = Instance::new(Vec::new(), Bitset::empty());
        let mut rng = create_rng(3);
        assert_eq!(inst.random_leaf(&mut rng), Leaf::Universe);
    }
}
