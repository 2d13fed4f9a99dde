//! # Tabu Search
//!
//! The search starts from a random feasible cover and, in every iteration, moves to
//! the smallest admissible feasible neighbor, even when that neighbor is worse than
//! the current solution. Recently visited solutions are tabu; the aspiration
//! criterion lets a tabu neighbor through if it beats the best cost found so far.
//! The run stops after a fixed number of iterations (or an optional time limit)
//! and returns the best cover seen.
//!
//! Progress is reported through a [`ProgressSink`], one [`ProgressRecord`] per
//! iteration.

pub mod engine;
pub mod options;
pub mod progress;

pub use engine::{
    select_move, SearchOutcome, SearchPhase, SearchStats, Selection, SelectionReport,
    TabuSearchEngine,
};
pub use options::{TabuSearchOptions, TabuSearchOptionsBuilder};
pub use progress::{
    NoProgress, ProgressHistory, ProgressRecord, ProgressSink, TsvProgressLog, PROGRESS_HEADER,
};

use crate::coverage::CoverageIndex;
use crate::error::Result;
use crate::rng::RandomNumberGenerator;
use crate::solution::Solution;

/// Runs a tabu search with the given budget and returns
/// `(best_solution, best_cost, aspiration_uses)`.
///
/// This is a thin wrapper around [`TabuSearchEngine::run`] using the default values
/// for every other option.
pub fn tabu_search<S>(
    index: &CoverageIndex,
    max_iter: usize,
    tabu_size: usize,
    aspiration: bool,
    rng: &mut RandomNumberGenerator,
    sink: &mut S,
) -> Result<(Solution, usize, usize)>
where
    S: ProgressSink + ?Sized,
{
    let options = TabuSearchOptions::new(max_iter, tabu_size, aspiration);
    let outcome = TabuSearchEngine::new(index, options).run(rng, sink)?;
    Ok((outcome.best_solution, outcome.best_cost, outcome.aspiration_uses))
}
