//! # Coverage Index
//!
//! The `CoverageIndex` is the static, read-only description of a set-cover instance:
//! the universe of points and, for every candidate set ("camera"), the points it
//! covers. Identifiers are interned into dense indices on construction so that the
//! search works on `usize` values; the index converts back to identifiers at the
//! edges.
//!
//! Candidate sets are enumerated in the order they first appear in the input. That
//! order is the enumeration order of the neighborhood and decides tie-breaks.
//!
//! ## Example
//!
//! ```rust
//! use camcover::coverage::CoverageIndex;
//!
//! let index = CoverageIndex::new(
//!     vec!["p1".into(), "p2".into(), "p3".into()],
//!     vec![
//!         ("c1".into(), vec!["p1".into(), "p2".into()]),
//!         ("c2".into(), vec!["p2".into(), "p3".into()]),
//!     ],
//! )
//! .unwrap();
//!
//! assert_eq!(index.set_count(), 2);
//! assert_eq!(index.coverage("c2").unwrap().len(), 2);
//! assert!(index.coverage("c9").is_err());
//! ```

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::error::{CoverError, Result};
use crate::instance::Instance;
use crate::solution::{PointIdx, SetIdx, Solution};

/// Static mapping from candidate set to the universe points it covers.
#[derive(Debug, Clone)]
pub struct CoverageIndex {
    points: Vec<String>,
    set_ids: Vec<String>,
    set_lookup: HashMap<String, SetIdx>,
    coverage: Vec<Vec<PointIdx>>,
}

impl CoverageIndex {
    /// Builds the index from the universe and the candidate sets.
    ///
    /// Duplicate universe points collapse into one. Coverage entries that name a
    /// point outside the universe are ignored. If a set identifier appears twice,
    /// the later coverage replaces the earlier one.
    ///
    /// # Errors
    ///
    /// Returns `CoverError::EmptyInstance` if the universe or the set collection is
    /// empty.
    pub fn new<U, S>(universe: U, sets: S) -> Result<Self>
    where
        U: IntoIterator<Item = String>,
        S: IntoIterator<Item = (String, Vec<String>)>,
    {
        let mut points = Vec::new();
        let mut point_lookup = HashMap::new();
        for point in universe {
            if !point_lookup.contains_key(&point) {
                point_lookup.insert(point.clone(), points.len());
                points.push(point);
            }
        }
        if points.is_empty() {
            return Err(CoverError::EmptyInstance(
                "the universe contains no points".to_string(),
            ));
        }

        let mut set_ids: Vec<String> = Vec::new();
        let mut set_lookup: HashMap<String, SetIdx> = HashMap::new();
        let mut coverage: Vec<Vec<PointIdx>> = Vec::new();
        let mut ignored = 0usize;

        for (id, members) in sets {
            let mut covered: Vec<PointIdx> = Vec::with_capacity(members.len());
            for member in &members {
                match point_lookup.get(member) {
                    Some(&p) => covered.push(p),
                    None => ignored += 1,
                }
            }
            covered.sort_unstable();
            covered.dedup();

            match set_lookup.get(&id) {
                Some(&existing) => {
                    warn!(set = %id, "duplicate candidate set, replacing earlier coverage");
                    coverage[existing] = covered;
                }
                None => {
                    set_lookup.insert(id.clone(), set_ids.len());
                    set_ids.push(id);
                    coverage.push(covered);
                }
            }
        }
        if set_ids.is_empty() {
            return Err(CoverError::EmptyInstance(
                "the instance contains no candidate sets".to_string(),
            ));
        }
        if ignored > 0 {
            debug!(ignored, "coverage entries outside the universe were ignored");
        }

        Ok(Self {
            points,
            set_ids,
            set_lookup,
            coverage,
        })
    }

    /// Builds the index from a parsed [`Instance`].
    pub fn from_instance(instance: &Instance) -> Result<Self> {
        Self::new(
            instance.points().iter().cloned(),
            instance
                .sets()
                .iter()
                .map(|(id, members)| (id.clone(), members.clone())),
        )
    }

    /// Number of universe points.
    pub fn universe_len(&self) -> usize {
        self.points.len()
    }

    /// Number of candidate sets in the pool.
    pub fn set_count(&self) -> usize {
        self.set_ids.len()
    }

    /// All candidate set indices, in enumeration order.
    pub fn set_indices(&self) -> std::ops::Range<SetIdx> {
        0..self.set_ids.len()
    }

    /// All candidate set identifiers, in enumeration order.
    pub fn set_ids(&self) -> impl Iterator<Item = &str> {
        self.set_ids.iter().map(String::as_str)
    }

    /// Universe point identifiers.
    pub fn points(&self) -> impl Iterator<Item = &str> {
        self.points.iter().map(String::as_str)
    }

    /// Identifier of the universe point at `point`.
    pub fn point_id(&self, point: PointIdx) -> Option<&str> {
        self.points.get(point).map(String::as_str)
    }

    /// Identifier of the set at `set`.
    pub fn set_id(&self, set: SetIdx) -> Result<&str> {
        self.set_ids
            .get(set)
            .map(String::as_str)
            .ok_or_else(|| CoverError::UnknownSet(format!("#{}", set)))
    }

    /// Dense index of the set named `id`.
    pub fn index_of(&self, id: &str) -> Result<SetIdx> {
        self.set_lookup
            .get(id)
            .copied()
            .ok_or_else(|| CoverError::UnknownSet(id.to_string()))
    }

    /// Points covered by the set named `id`.
    pub fn coverage(&self, id: &str) -> Result<&[PointIdx]> {
        let set = self.index_of(id)?;
        self.coverage_of(set)
    }

    /// Points covered by the set at `set`.
    pub fn coverage_of(&self, set: SetIdx) -> Result<&[PointIdx]> {
        self.coverage
            .get(set)
            .map(Vec::as_slice)
            .ok_or_else(|| CoverError::UnknownSet(format!("#{}", set)))
    }

    /// Universe points that no candidate set covers.
    pub fn uncovered_by_pool(&self) -> Vec<&str> {
        let mut covered = vec![false; self.points.len()];
        for set in &self.coverage {
            for &p in set {
                covered[p] = true;
            }
        }
        covered
            .iter()
            .enumerate()
            .filter(|&(_, &c)| !c)
            .map(|(p, _)| self.points[p].as_str())
            .collect()
    }

    /// `true` when the union of all candidate sets equals the universe.
    pub fn is_coverable(&self) -> bool {
        self.uncovered_by_pool().is_empty()
    }

    /// Converts identifiers into a canonical [`Solution`].
    pub fn solution_from_ids<I, S>(&self, ids: I) -> Result<Solution>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        ids.into_iter()
            .map(|id| self.index_of(id.as_ref()))
            .collect::<Result<Vec<_>>>()
            .map(|sets| sets.into_iter().collect())
    }

    /// Identifiers of the sets in `solution`, in ascending index order.
    pub fn solution_ids(&self, solution: &Solution) -> Result<Vec<String>> {
        solution
            .iter()
            .map(|set| self.set_id(set).map(str::to_string))
            .collect()
    }
}
