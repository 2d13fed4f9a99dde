//! # TabuSearchOptions
//!
//! The `TabuSearchOptions` struct holds the parameters of a tabu search run: the
//! iteration budget, the tabu memory capacity, whether the aspiration criterion is
//! enabled, plus the knobs that do not change the algorithm's results (parallel
//! threshold, initial construction draw cap, wall-clock limit).
//!
//! ## Example
//!
//! ```rust
//! use camcover::search::TabuSearchOptions;
//!
//! // Create options with custom parameters
//! let custom = TabuSearchOptions::new(200, 15, false);
//! assert_eq!(custom.get_max_iter(), 200);
//!
//! // Or through the builder
//! let options = TabuSearchOptions::builder()
//!     .max_iter(1000)
//!     .tabu_size(30)
//!     .aspiration(true)
//!     .parallel_threshold(500)
//!     .build();
//! assert_eq!(options.get_tabu_size(), 30);
//! ```

use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{CoverError, Result};

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TabuSearchOptions {
    max_iter: usize,
    tabu_size: usize,
    aspiration: bool,
    /// Minimum pool size for evaluating the neighborhood in parallel
    parallel_threshold: usize,
    /// Cap on random draws during initial construction
    max_draws: Option<usize>,
    time_limit: Option<Duration>,
}

impl TabuSearchOptions {
    pub fn new(max_iter: usize, tabu_size: usize, aspiration: bool) -> Self {
        Self {
            max_iter,
            tabu_size,
            aspiration,
            ..Self::default()
        }
    }

    pub fn get_max_iter(&self) -> usize {
        self.max_iter
    }

    pub fn get_tabu_size(&self) -> usize {
        self.tabu_size
    }

    pub fn get_aspiration(&self) -> bool {
        self.aspiration
    }

    /// Returns the minimum pool size for parallel neighborhood evaluation.
    pub fn get_parallel_threshold(&self) -> usize {
        self.parallel_threshold
    }

    pub fn get_max_draws(&self) -> Option<usize> {
        self.max_draws
    }

    pub fn get_time_limit(&self) -> Option<Duration> {
        self.time_limit
    }

    /// Sets the iteration budget.
    pub fn set_max_iter(&mut self, max_iter: usize) {
        self.max_iter = max_iter;
    }

    /// Sets the tabu memory capacity.
    pub fn set_tabu_size(&mut self, tabu_size: usize) {
        self.tabu_size = tabu_size;
    }

    pub fn set_aspiration(&mut self, aspiration: bool) {
        self.aspiration = aspiration;
    }

    pub fn set_parallel_threshold(&mut self, threshold: usize) {
        self.parallel_threshold = threshold;
    }

    pub fn set_max_draws(&mut self, max_draws: Option<usize>) {
        self.max_draws = max_draws;
    }

    pub fn set_time_limit(&mut self, time_limit: Option<Duration>) {
        self.time_limit = time_limit;
    }

    /// Checks the options for values no run can use.
    ///
    /// # Errors
    ///
    /// Returns `CoverError::Configuration` if the draw cap is 0.
    pub fn validate(&self) -> Result<()> {
        if self.max_draws == Some(0) {
            return Err(CoverError::Configuration(
                "Maximum draws must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Returns a builder for creating a `TabuSearchOptions` instance.
    pub fn builder() -> TabuSearchOptionsBuilder {
        TabuSearchOptionsBuilder::default()
    }
}

impl Default for TabuSearchOptions {
    fn default() -> Self {
        Self {
            max_iter: 500,
            tabu_size: 20,
            aspiration: true,
            parallel_threshold: 1000,
            max_draws: None,
            time_limit: None,
        }
    }
}

/// Builder for `TabuSearchOptions`.
#[derive(Debug, Clone, Default)]
pub struct TabuSearchOptionsBuilder {
    max_iter: Option<usize>,
    tabu_size: Option<usize>,
    aspiration: Option<bool>,
    parallel_threshold: Option<usize>,
    max_draws: Option<usize>,
    time_limit: Option<Duration>,
}

impl TabuSearchOptionsBuilder {
    pub fn max_iter(mut self, value: usize) -> Self {
        self.max_iter = Some(value);
        self
    }

    pub fn tabu_size(mut self, value: usize) -> Self {
        self.tabu_size = Some(value);
        self
    }

    pub fn aspiration(mut self, value: bool) -> Self {
        self.aspiration = Some(value);
        self
    }

    pub fn parallel_threshold(mut self, value: usize) -> Self {
        self.parallel_threshold = Some(value);
        self
    }

    pub fn max_draws(mut self, value: usize) -> Self {
        self.max_draws = Some(value);
        self
    }

    pub fn time_limit(mut self, value: Duration) -> Self {
        self.time_limit = Some(value);
        self
    }

    /// Builds the `TabuSearchOptions` instance, filling unset fields with defaults.
    pub fn build(self) -> TabuSearchOptions {
        let defaults = TabuSearchOptions::default();
        TabuSearchOptions {
            max_iter: self.max_iter.unwrap_or(defaults.max_iter),
            tabu_size: self.tabu_size.unwrap_or(defaults.tabu_size),
            aspiration: self.aspiration.unwrap_or(defaults.aspiration),
            parallel_threshold: self
                .parallel_threshold
                .unwrap_or(defaults.parallel_threshold),
            max_draws: self.max_draws.or(defaults.max_draws),
            time_limit: self.time_limit.or(defaults.time_limit),
        }
    }
}
