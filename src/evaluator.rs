//! # Solution Evaluator
//!
//! Evaluating a solution yields two numbers: how many distinct candidate sets it
//! uses and how many universe points it leaves uncovered. A solution is *feasible*
//! when nothing is left uncovered.
//!
//! This is the hot path of the search: the neighborhood generator evaluates one
//! toggled variant per candidate set in every iteration. The [`Evaluate`] trait is
//! the seam where the memoizing wrappers from [`crate::caching`] plug in.
//!
//! ## Example
//!
//! ```rust
//! use camcover::coverage::CoverageIndex;
//! use camcover::evaluator::{Evaluate, SolutionEvaluator};
//!
//! let index = CoverageIndex::new(
//!     vec!["p1".into(), "p2".into(), "p3".into()],
//!     vec![
//!         ("c1".into(), vec!["p1".into(), "p2".into()]),
//!         ("c2".into(), vec!["p2".into(), "p3".into()]),
//!     ],
//! )
//! .unwrap();
//! let evaluator = SolutionEvaluator::new(&index);
//!
//! let both = index.solution_from_ids(["c1", "c2"]).unwrap();
//! let eval = evaluator.evaluate(&both).unwrap();
//! assert_eq!((eval.used, eval.uncovered), (2, 0));
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::coverage::CoverageIndex;
use crate::error::Result;
use crate::solution::Solution;

/// Outcome of evaluating a [`Solution`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Evaluation {
    /// Number of distinct candidate sets used. This is the cost being minimized.
    pub used: usize,
    /// Number of universe points no selected set covers.
    pub uncovered: usize,
}

impl Evaluation {
    pub fn is_feasible(&self) -> bool {
        self.uncovered == 0
    }
}

/// Computes the [`Evaluation`] of a solution.
///
/// Implementations must be pure: evaluating the same solution twice yields the same
/// result.
pub trait Evaluate: Send + Sync {
    /// Evaluates `solution`.
    ///
    /// # Errors
    ///
    /// Returns `CoverError::UnknownSet` if the solution references a set the
    /// coverage index does not contain.
    fn evaluate(&self, solution: &Solution) -> Result<Evaluation>;
}

impl<E: Evaluate + ?Sized> Evaluate for &E {
    fn evaluate(&self, solution: &Solution) -> Result<Evaluation> {
        (**self).evaluate(solution)
    }
}

/// The plain evaluator: recomputes the union of coverages on every call.
#[derive(Debug, Clone, Copy)]
pub struct SolutionEvaluator<'a> {
    index: &'a CoverageIndex,
}

impl<'a> SolutionEvaluator<'a> {
    pub fn new(index: &'a CoverageIndex) -> Self {
        Self { index }
    }

    pub fn index(&self) -> &'a CoverageIndex {
        self.index
    }

    /// Identifiers of the universe points `solution` leaves uncovered.
    pub fn uncovered_points(&self, solution: &Solution) -> Result<Vec<String>> {
        let covered = self.covered_mask(solution)?;
        Ok(covered
            .iter()
            .enumerate()
            .filter(|&(_, &c)| !c)
            .filter_map(|(p, _)| self.index.point_id(p).map(str::to_string))
            .collect())
    }

    fn covered_mask(&self, solution: &Solution) -> Result<Vec<bool>> {
        let mut covered = vec![false; self.index.universe_len()];
        for set in solution {
            for &p in self.index.coverage_of(set)? {
                covered[p] = true;
            }
        }
        Ok(covered)
    }
}

impl Evaluate for SolutionEvaluator<'_> {
    fn evaluate(&self, solution: &Solution) -> Result<Evaluation> {
        let covered = self.covered_mask(solution)?;
        let uncovered = covered.iter().filter(|&&c| !c).count();
        Ok(Evaluation {
            used: solution.len(),
            uncovered,
        })
    }
}
