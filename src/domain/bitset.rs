//! Fixed-capacity bit-vector sets.

use std::fmt;
use std::ops::{BitAnd, BitOr, Not, Sub};

use crate::error::{Result, SetExprError};

/// Number of elements in the universe.
///
/// Every [`Bitset`] is defined relative to the index range
/// `[0, UNIVERSE_SIZE)`. Changing it requires a rebuild.
pub const UNIVERSE_SIZE: usize = 128;

const WORD_BITS: usize = u64::BITS as usize;
const WORDS: usize = UNIVERSE_SIZE.div_ceil(WORD_BITS);

/// Mask of the valid bits in the last word.
const LAST_WORD_MASK: u64 = if UNIVERSE_SIZE % WORD_BITS == 0 {
    u64::MAX
} else {
    (1u64 << (UNIVERSE_SIZE % WORD_BITS)) - 1
};

/// A subset of the universe, stored as a fixed-width bit vector.
///
/// Bit `i` is set if and only if element `i` belongs to the set. Bits at or
/// above [`UNIVERSE_SIZE`] are always zero, so two bitsets are equal exactly
/// when they contain the same elements.
///
/// # Examples
///
/// ```
/// use u_setexpr::domain::Bitset;
///
/// let a = Bitset::from_elements([1, 2, 3]).unwrap();
/// let b = Bitset::from_elements([3, 4]).unwrap();
///
/// assert_eq!(a.union(&b).len(), 4);
/// assert_eq!(a.intersect(&b), Bitset::from_elements([3]).unwrap());
/// assert_eq!(a.difference(&b), Bitset::from_elements([1, 2]).unwrap());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bitset {
    words: [u64; WORDS],
}

impl Bitset {
    /// The empty set.
    pub const fn empty() -> Self {
        Self { words: [0; WORDS] }
    }

    /// The set of every element the capacity can hold.
    pub fn full() -> Self {
        let mut words = [u64::MAX; WORDS];
        words[WORDS - 1] &= LAST_WORD_MASK;
        Self { words }
    }

    /// The set `{0, 1, ..., n - 1}`.
    ///
    /// Used to model universes smaller than the compiled capacity.
    pub fn prefix(n: usize) -> Result<Self> {
        if n > UNIVERSE_SIZE {
            return Err(SetExprError::InvalidArgument(format!(
                "universe size {n} exceeds capacity {UNIVERSE_SIZE}"
            )));
        }
        let mut set = Self::empty();
        let full_words = n / WORD_BITS;
        for word in set.words.iter_mut().take(full_words) {
            *word = u64::MAX;
        }
        let rest = n % WORD_BITS;
        if rest > 0 {
            set.words[full_words] = (1u64 << rest) - 1;
        }
        Ok(set)
    }

    /// Builds a set from element indices.
    ///
    /// Fails with [`SetExprError::ElementOutOfRange`] if any element does not
    /// fit the universe capacity.
    pub fn from_elements<I: IntoIterator<Item = usize>>(elements: I) -> Result<Self> {
        let mut set = Self::empty();
        for element in elements {
            if element >= UNIVERSE_SIZE {
                return Err(SetExprError::ElementOutOfRange {
                    element,
                    capacity: UNIVERSE_SIZE,
                });
            }
            set.insert(element);
        }
        Ok(set)
    }

    fn from_words(mut words: [u64; WORDS]) -> Self {
        words[WORDS - 1] &= LAST_WORD_MASK;
        Self { words }
    }

    /// Adds an element. Returns `true` if it was not already present.
    ///
    /// # Panics
    /// Panics if `element >= UNIVERSE_SIZE`.
    pub fn insert(&mut self, element: usize) -> bool {
        assert!(
            element < UNIVERSE_SIZE,
            "element {element} outside universe capacity {UNIVERSE_SIZE}"
        );
        let (word, bit) = (element / WORD_BITS, element % WORD_BITS);
        let was_set = self.words[word] & (1u64 << bit) != 0;
        self.words[word] |= 1u64 << bit;
        !was_set
    }

    /// Removes an element. Returns `true` if it was present.
    pub fn remove(&mut self, element: usize) -> bool {
        if element >= UNIVERSE_SIZE {
            return false;
        }
        let (word, bit) = (element / WORD_BITS, element % WORD_BITS);
        let was_set = self.words[word] & (1u64 << bit) != 0;
        self.words[word] &= !(1u64 << bit);
        was_set
    }

    /// Membership test. Elements outside the capacity are never members.
    #[inline]
    pub fn contains(&self, element: usize) -> bool {
        element < UNIVERSE_SIZE && self.words[element / WORD_BITS] & (1u64 << (element % WORD_BITS)) != 0
    }

    /// Cardinality (population count).
    #[inline]
    pub fn len(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    /// `self ∪ other`
    #[inline]
    pub fn union(&self, other: &Bitset) -> Bitset {
        self.zip_with(other, |a, b| a | b)
    }

    /// `self ∩ other`
    #[inline]
    pub fn intersect(&self, other: &Bitset) -> Bitset {
        self.zip_with(other, |a, b| a & b)
    }

    /// `self \ other`, i.e. `self ∧ ¬other`.
    #[inline]
    pub fn difference(&self, other: &Bitset) -> Bitset {
        self.zip_with(other, |a, b| a & !b)
    }

    /// Complement with respect to the full capacity.
    pub fn complement(&self) -> Bitset {
        let mut words = self.words;
        for w in words.iter_mut() {
            *w = !*w;
        }
        Self::from_words(words)
    }

    /// `true` if every element of `self` is in `other`.
    pub fn is_subset(&self, other: &Bitset) -> bool {
        self.difference(other).is_empty()
    }

    /// Iterates the elements in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.words.iter().enumerate().flat_map(|(i, &word)| {
            let mut rest = word;
            std::iter::from_fn(move || {
                if rest == 0 {
                    return None;
                }
                let bit = rest.trailing_zeros() as usize;
                rest &= rest - 1;
                Some(i * WORD_BITS + bit)
            })
        })
    }

    #[inline]
    fn zip_with(&self, other: &Bitset, f: impl Fn(u64, u64) -> u64) -> Bitset {
        let mut words = [0u64; WORDS];
        for (out, (&a, &b)) in words.iter_mut().zip(self.words.iter().zip(other.words.iter())) {
            *out = f(a, b);
        }
        Bitset { words }
    }
}

impl BitOr for Bitset {
    type Output = Bitset;
    fn bitor(self, rhs: Bitset) -> Bitset {
        self.union(&rhs)
    }
}

impl BitAnd for Bitset {
    type Output = Bitset;
    fn bitand(self, rhs: Bitset) -> Bitset {
        self.intersect(&rhs)
    }
}

impl Sub for Bitset {
    type Output = Bitset;
    fn sub(self, rhs: Bitset) -> Bitset {
        self.difference(&rhs)
    }
}

impl Not for Bitset {
    type Output = Bitset;
    fn not(self) -> Bitset {
        self.complement()
    }
}

impl fmt::Display for Bitset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, element) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{element}")?;
        }
        f.write_str("}")
    }
}

impl fmt::Debug for Bitset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bitset{self}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn set(elements: &[usize]) -> Bitset {
        Bitset::from_elements(elements.iter().copied()).unwrap()
    }

    fn any_bitset() -> impl Strategy<Value = Bitset> {
        any::<[u64; WORDS]>().prop_map(Bitset::from_words)
    }

    #[test]
    fn test_empty_and_full() {
        assert!(Bitset::empty().is_empty());
        assert_eq!(Bitset::full().len(), UNIVERSE_SIZE);
        assert_eq!(Bitset::empty().complement(), Bitset::full());
    }

    #[test]
    fn test_prefix() {
        let p = Bitset::prefix(10).unwrap();
        assert_eq!(p.len(), 10);
        assert!(p.contains(9));
        assert!(!p.contains(10));
        assert_eq!(Bitset::prefix(UNIVERSE_SIZE).unwrap(), Bitset::full());
        assert_eq!(Bitset::prefix(64).unwrap().len(), 64);
        assert!(Bitset::prefix(UNIVERSE_SIZE + 1).is_err());
    }

    #[test]
    fn test_from_elements_out_of_range() {
        let err = Bitset::from_elements([1, UNIVERSE_SIZE]).unwrap_err();
        assert_eq!(
            err,
            SetExprError::ElementOutOfRange {
                element: UNIVERSE_SIZE,
                capacity: UNIVERSE_SIZE
            }
        );
    }

    #[test]
    fn test_insert_remove() {
        let mut s = Bitset::empty();
        assert!(s.insert(70));
        assert!(!s.insert(70));
        assert!(s.contains(70));
        assert!(s.remove(70));
        assert!(!s.remove(70));
        assert!(!s.remove(UNIVERSE_SIZE + 5));
    }

    #[test]
    #[should_panic(expected = "outside universe capacity")]
    fn test_insert_past_capacity_panics() {
        Bitset::empty().insert(UNIVERSE_SIZE);
    }

    #[test]
    fn test_primitives() {
        let a = set(&[1, 2, 3, 100]);
        let b = set(&[3, 4, 100]);
        assert_eq!(a.union(&b), set(&[1, 2, 3, 4, 100]));
        assert_eq!(a.intersect(&b), set(&[3, 100]));
        assert_eq!(a.difference(&b), set(&[1, 2]));
        assert_eq!(a | b, a.union(&b));
        assert_eq!(a & b, a.intersect(&b));
        assert_eq!(a - b, a.difference(&b));
        assert_eq!((!a).len(), UNIVERSE_SIZE - 4);
    }

    #[test]
    fn test_iter_ascending() {
        let s = set(&[127, 0, 64, 63, 5]);
        assert_eq!(s.iter().collect::<Vec<_>>(), vec![0, 5, 63, 64, 127]);
    }

    #[test]
    fn test_display() {
        assert_eq!(set(&[3, 1, 2]).to_string(), "{1, 2, 3}");
        assert_eq!(Bitset::empty().to_string(), "{}");
    }

    proptest! {
        #[test]
        fn prop_union_intersect_commute(a in any_bitset(), b in any_bitset()) {
            prop_assert_eq!(a.union(&b), b.union(&a));
            prop_assert_eq!(a.intersect(&b), b.intersect(&a));
        }

        #[test]
        fn prop_self_difference_is_empty(a in any_bitset()) {
            prop_assert!(a.difference(&a).is_empty());
        }

        #[test]
        fn prop_absorption_through_difference(a in any_bitset(), b in any_bitset()) {
            let grown = a.union(&b.difference(&a));
            prop_assert_eq!(grown.intersect(&a), a);
            prop_assert_eq!(grown, a.union(&b));
            prop_assert_eq!(grown.intersect(&b), b);
        }

        #[test]
        fn prop_cardinality_inclusion_exclusion(a in any_bitset(), b in any_bitset()) {
            prop_assert_eq!(
                a.union(&b).len() + a.intersect(&b).len(),
                a.len() + b.len()
            );
        }

        #[test]
        fn prop_complement_stays_in_capacity(a in any_bitset()) {
            prop_assert_eq!(a.complement().complement(), a);
            prop_assert_eq!(a.len() + a.complement().len(), UNIVERSE_SIZE);
        }
    }
}
