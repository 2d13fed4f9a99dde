//! # camcover
//!
//! Tabu search for the minimum set-cover problem: given a universe of points and a
//! pool of candidate sets ("cameras"), find a small collection of sets whose union
//! covers every point.
//!
//! ## Example
//!
//! ```rust
//! use camcover::{CoverageIndex, Instance, RandomNumberGenerator};
//! use camcover::search::{ProgressHistory, TabuSearchEngine, TabuSearchOptions};
//!
//! let instance: Instance = "points: p1, p2, p3\nc1: p1, p2\nc2: p2, p3\nc3: p1, p3\n"
//!     .parse()
//!     .unwrap();
//! let index = CoverageIndex::from_instance(&instance).unwrap();
//!
//! let engine = TabuSearchEngine::new(&index, TabuSearchOptions::new(20, 5, true));
//! let mut history = ProgressHistory::new();
//! let outcome = engine
//!     .run(&mut RandomNumberGenerator::from_seed(3), &mut history)
//!     .unwrap();
//!
//! assert_eq!(outcome.best_cost, 2);
//! assert_eq!(history.records.len(), 20);
//! ```

pub mod caching;
pub mod construction;
pub mod coverage;
pub mod error;
pub mod evaluator;
pub mod instance;
pub mod neighborhood;
pub mod rng;
pub mod search;
pub mod solution;
pub mod tabu;

// Re-export commonly used types for convenience
pub use coverage::CoverageIndex;
pub use error::{CoverError, OptionExt, Result, ResultExt};
pub use evaluator::{Evaluate, Evaluation, SolutionEvaluator};
pub use instance::Instance;
pub use rng::RandomNumberGenerator;
pub use search::{tabu_search, SearchOutcome, TabuSearchEngine, TabuSearchOptions};
pub use solution::Solution;
