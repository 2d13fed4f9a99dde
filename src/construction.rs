//! # Initial Solution Builder
//!
//! Builds the first feasible cover by drawing candidate sets uniformly at random
//! from the whole pool until every point is covered. The draw ignores how many new
//! points a set would add, so the result is usually far from minimal and may
//! contain sets that became redundant later on; improving it is the job of the
//! tabu search.
//!
//! Construction fails with `CoverError::InstanceUncoverable` instead of looping
//! forever when the pool cannot cover the universe, or when an optional draw cap is
//! exhausted.

use tracing::debug;

use crate::coverage::CoverageIndex;
use crate::error::{CoverError, Result};
use crate::rng::RandomNumberGenerator;
use crate::solution::Solution;

/// Randomized construction of a feasible starting solution.
#[derive(Debug, Clone, Copy)]
pub struct InitialSolutionBuilder<'a> {
    index: &'a CoverageIndex,
    max_draws: Option<usize>,
}

impl<'a> InitialSolutionBuilder<'a> {
    /// Creates a builder without a draw cap.
    ///
    /// Termination is still guaranteed because [`build`](Self::build) checks that
    /// the instance is coverable before drawing.
    pub fn new(index: &'a CoverageIndex) -> Self {
        Self {
            index,
            max_draws: None,
        }
    }

    /// Limits the number of random draws.
    ///
    /// # Errors
    ///
    /// Returns `CoverError::Configuration` if `max_draws` is 0.
    pub fn with_max_draws(mut self, max_draws: usize) -> Result<Self> {
        if max_draws == 0 {
            return Err(CoverError::Configuration(
                "Maximum draws must be greater than 0".to_string(),
            ));
        }
        self.max_draws = Some(max_draws);
        Ok(self)
    }

    /// Draws sets until the selection covers the universe.
    ///
    /// # Errors
    ///
    /// Returns `CoverError::InstanceUncoverable` if some point is covered by no set
    /// at all, or if the draw cap is reached before full coverage.
    pub fn build(&self, rng: &mut RandomNumberGenerator) -> Result<Solution> {
        let uncovered = self.index.uncovered_by_pool();
        if !uncovered.is_empty() {
            return Err(CoverError::InstanceUncoverable {
                reason: format!("{} point(s) are not covered by any set", uncovered.len()),
                uncovered: uncovered.into_iter().map(str::to_string).collect(),
            });
        }

        let pool = self.index.set_count();
        let mut covered = vec![false; self.index.universe_len()];
        let mut remaining = covered.len();
        let mut solution = Solution::new();
        let mut draws = 0usize;

        while remaining > 0 {
            if let Some(cap) = self.max_draws {
                if draws >= cap {
                    return Err(CoverError::InstanceUncoverable {
                        uncovered: Vec::new(),
                        reason: format!(
                            "{} point(s) still uncovered after {} draws",
                            remaining, draws
                        ),
                    });
                }
            }

            let set = rng.pick_index(pool);
            draws += 1;
            solution.insert(set);
            for &p in self.index.coverage_of(set)? {
                if !covered[p] {
                    covered[p] = true;
                    remaining -= 1;
                }
            }
        }

        debug!(draws, sets = solution.len(), "initial cover constructed");
        Ok(solution)
    }
}
