//! # Caching Module
//!
//! Memoizing wrappers around an [`Evaluate`] implementation. A tabu search revisits
//! the same neighbors over and over (the neighborhoods of consecutive solutions
//! overlap heavily), so caching evaluations keyed by the canonical [`Solution`]
//! saves most of the coverage unions. Caching never changes results; failed
//! evaluations are not cached.

use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::Result;
use crate::evaluator::{Evaluate, Evaluation};
use crate::solution::Solution;

/// An evaluator with one cache shared by all threads.
#[derive(Debug, Clone)]
pub struct CachedEvaluator<E>
where
    E: Evaluate,
{
    /// The wrapped evaluator
    evaluator: E,
    cache: Arc<Mutex<HashMap<Solution, Evaluation>>>,
}

impl<E> CachedEvaluator<E>
where
    E: Evaluate,
{
    /// Creates a new cached evaluator wrapping the given evaluator.
    pub fn new(evaluator: E) -> Self {
        Self {
            evaluator,
            cache: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Returns a reference to the wrapped evaluator.
    pub fn inner(&self) -> &E {
        &self.evaluator
    }

    /// Returns the number of cached evaluations.
    pub fn cache_size(&self) -> usize {
        self.lock().len()
    }

    /// Clears the cache.
    pub fn clear_cache(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<Solution, Evaluation>> {
        // a panic while holding the lock cannot leave a half-written entry
        self.cache.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<E> Evaluate for CachedEvaluator<E>
where
    E: Evaluate,
{
    fn evaluate(&self, solution: &Solution) -> Result<Evaluation> {
        if let Some(eval) = self.lock().get(solution) {
            return Ok(*eval);
        }

        // Evaluate outside the lock so parallel neighborhoods do not serialize.
        let eval = self.evaluator.evaluate(solution)?;
        self.lock().insert(solution.clone(), eval);
        Ok(eval)
    }
}

/// An evaluator with a separate cache per thread.
///
/// Designed for parallel neighborhood evaluation where a shared lock would be
/// contended.
#[derive(Debug)]
pub struct ThreadLocalCachedEvaluator<E>
where
    E: Evaluate,
{
    evaluator: E,
    cache: thread_local::ThreadLocal<RefCell<HashMap<Solution, Evaluation>>>,
}

impl<E> ThreadLocalCachedEvaluator<E>
where
    E: Evaluate,
{
    pub fn new(evaluator: E) -> Self {
        Self {
            evaluator,
            cache: thread_local::ThreadLocal::new(),
        }
    }

    pub fn inner(&self) -> &E {
        &self.evaluator
    }

    /// Returns the number of cached evaluations for the current thread.
    pub fn cache_size(&self) -> usize {
        self.cache
            .get()
            .and_then(|cell| cell.try_borrow().ok())
            .map_or(0, |cache| cache.len())
    }

    /// Clears the cache for the current thread.
    pub fn clear_cache(&self) {
        if let Some(cell) = self.cache.get() {
            if let Ok(mut cache) = cell.try_borrow_mut() {
                cache.clear();
            }
        }
    }
}

impl<E> Evaluate for ThreadLocalCachedEvaluator<E>
where
    E: Evaluate,
{
    fn evaluate(&self, solution: &Solution) -> Result<Evaluation> {
        let cell = self.cache.get_or(|| RefCell::new(HashMap::new()));

        if let Some(eval) = cell.borrow().get(solution) {
            return Ok(*eval);
        }

        let eval = self.evaluator.evaluate(solution)?;
        cell.borrow_mut().insert(solution.clone(), eval);
        Ok(eval)
    }
}
