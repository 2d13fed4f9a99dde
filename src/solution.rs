//! # Solution
//!
//! A `Solution` is a set of selected candidate sets, stored as a sorted,
//! de-duplicated list of dense set indices. Two solutions holding the same sets are
//! equal and hash equally no matter in which order the sets were added, which is
//! what the tabu memory and the evaluation caches compare on.
//!
//! ## Example
//!
//! ```rust
//! use camcover::solution::Solution;
//!
//! let a: Solution = vec![2, 0, 2, 1].into_iter().collect();
//! let b: Solution = vec![1, 0, 2].into_iter().collect();
//! assert_eq!(a, b);
//! assert_eq!(a.len(), 3);
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Dense index of a candidate set inside a [`CoverageIndex`](crate::coverage::CoverageIndex).
pub type SetIdx = usize;

/// Dense index of a universe point inside a [`CoverageIndex`](crate::coverage::CoverageIndex).
pub type PointIdx = usize;

/// A canonical (sorted, duplicate free) collection of selected candidate sets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Solution {
    sets: Vec<SetIdx>,
}

impl Solution {
    /// Creates an empty solution.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct selected sets.
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    /// `true` when no set is selected.
    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// `true` if `set` is selected.
    pub fn contains(&self, set: SetIdx) -> bool {
        self.sets.binary_search(&set).is_ok()
    }

    /// Adds `set`; returns `false` if it was already selected.
    pub fn insert(&mut self, set: SetIdx) -> bool {
        match self.sets.binary_search(&set) {
            Ok(_) => false,
            Err(pos) => {
                self.sets.insert(pos, set);
                true
            }
        }
    }

    /// Removes `set`; returns `false` if it was not selected.
    pub fn remove(&mut self, set: SetIdx) -> bool {
        match self.sets.binary_search(&set) {
            Ok(pos) => {
                self.sets.remove(pos);
                true
            }
            Err(_) => false,
        }
    }

    /// Returns a copy with the membership of `set` flipped.
    pub fn toggled(&self, set: SetIdx) -> Self {
        let mut next = self.clone();
        if !next.remove(set) {
            next.insert(set);
        }
        next
    }

    /// Iterates the selected set indices in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = SetIdx> + '_ {
        self.sets.iter().copied()
    }

    /// The selected set indices, sorted ascending.
    pub fn as_slice(&self) -> &[SetIdx] {
        &self.sets
    }
}

impl FromIterator<SetIdx> for Solution {
    fn from_iter<I: IntoIterator<Item = SetIdx>>(iter: I) -> Self {
        let mut sets: Vec<SetIdx> = iter.into_iter().collect();
        sets.sort_unstable();
        sets.dedup();
        Self { sets }
    }
}

impl<'a> IntoIterator for &'a Solution {
    type Item = SetIdx;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, SetIdx>>;

    fn into_iter(self) -> Self::IntoIter {
        self.sets.iter().copied()
    }
}
