//! # Neighborhood Generator
//!
//! The neighborhood of a solution contains one variant per candidate set in the
//! pool: the solution with that set's membership flipped. Only feasible variants
//! are kept; toggles that break coverage (in practice, removals of a set that is
//! the only cover of some point) are dropped silently.
//!
//! Variants are produced in pool enumeration order. When the pool is at least
//! `parallel_threshold` sets large, toggles are evaluated on the rayon thread pool;
//! the indexed collect keeps the sequential order, so both paths return the same
//! list.

use rayon::prelude::*;

use crate::coverage::CoverageIndex;
use crate::error::Result;
use crate::evaluator::{Evaluate, Evaluation};
use crate::solution::{SetIdx, Solution};

/// The single-set flip that produced a neighbor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Toggle {
    Add(SetIdx),
    Remove(SetIdx),
}

/// A feasible variant of the current solution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Neighbor {
    pub solution: Solution,
    pub evaluation: Evaluation,
    pub toggle: Toggle,
}

/// Generates the feasible single-toggle neighborhood of a solution.
#[derive(Debug, Clone, Copy)]
pub struct NeighborhoodGenerator<'a, E>
where
    E: Evaluate,
{
    index: &'a CoverageIndex,
    evaluator: &'a E,
    parallel_threshold: usize,
}

impl<'a, E> NeighborhoodGenerator<'a, E>
where
    E: Evaluate,
{
    pub fn new(index: &'a CoverageIndex, evaluator: &'a E, parallel_threshold: usize) -> Self {
        Self {
            index,
            evaluator,
            parallel_threshold,
        }
    }

    /// Returns every feasible toggle variant of `current`, in pool order.
    ///
    /// # Errors
    ///
    /// Propagates evaluation errors (`CoverError::UnknownSet`).
    pub fn generate(&self, current: &Solution) -> Result<Vec<Neighbor>> {
        let pool = self.index.set_indices();

        let variants: Vec<Option<Neighbor>> = if pool.len() >= self.parallel_threshold {
            pool.into_par_iter()
                .map(|set| self.toggle(current, set))
                .collect::<Result<Vec<_>>>()?
        } else {
            pool.map(|set| self.toggle(current, set))
                .collect::<Result<Vec<_>>>()?
        };

        Ok(variants.into_iter().flatten().collect())
    }

    fn toggle(&self, current: &Solution, set: SetIdx) -> Result<Option<Neighbor>> {
        let toggle = if current.contains(set) {
            Toggle::Remove(set)
        } else {
            Toggle::Add(set)
        };
        let solution = current.toggled(set);
        let evaluation = self.evaluator.evaluate(&solution)?;

        if !evaluation.is_feasible() {
            return Ok(None);
        }
        Ok(Some(Neighbor {
            solution,
            evaluation,
            toggle,
        }))
    }
}
