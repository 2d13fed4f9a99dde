//! # Tabu Memory
//!
//! A bounded FIFO of recently visited solutions. A neighbor is tabu when it equals
//! one of the stored solutions as a set of candidate sets; since [`Solution`] is
//! canonical, plain equality is order-independent.
//!
//! Forbidding exact revisits of whole solutions is a coarse criterion: with a
//! neighborhood of single toggles the search rarely lands on a stored solution
//! again except by undoing the previous move.

use std::collections::VecDeque;

use crate::solution::Solution;

/// Recency list of visited solutions with FIFO eviction.
#[derive(Debug, Clone, Default)]
pub struct TabuMemory {
    entries: VecDeque<Solution>,
    capacity: usize,
}

impl TabuMemory {
    /// Creates an empty memory holding at most `capacity` solutions.
    ///
    /// A capacity of 0 yields a memory that never forbids anything.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity.saturating_add(1)),
            capacity,
        }
    }

    pub fn contains(&self, solution: &Solution) -> bool {
        self.entries.contains(solution)
    }

    /// Appends a snapshot of `solution`, evicting the oldest entry when over capacity.
    pub fn record(&mut self, solution: Solution) {
        self.entries.push_back(solution);
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Stored solutions, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Solution> {
        self.entries.iter()
    }
}
