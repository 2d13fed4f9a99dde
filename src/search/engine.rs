//! # Tabu Search Engine
//!
//! The search loop: build (or accept) a feasible start, then for a fixed number of
//! iterations move to the smallest admissible neighbor, remember the visited
//! solution in the tabu memory and report one [`ProgressRecord`] per iteration.
//! The best cover seen is returned in a [`SearchOutcome`].

use std::time::{Duration, Instant};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use super::options::TabuSearchOptions;
use super::progress::{ProgressRecord, ProgressSink};
use crate::construction::InitialSolutionBuilder;
use crate::coverage::CoverageIndex;
use crate::error::{CoverError, Result};
use crate::evaluator::{Evaluate, SolutionEvaluator};
use crate::neighborhood::{Neighbor, NeighborhoodGenerator};
use crate::rng::RandomNumberGenerator;
use crate::solution::Solution;
use crate::tabu::TabuMemory;

/// Lifecycle of a search run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    Initializing,
    Iterating,
    Terminated,
}

/// Diagnostics gathered during a run.
///
/// These complement the legacy counters of [`ProgressRecord`]: `tabu_rejections`
/// and `aspiration_overrides` count what their names say.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SearchStats {
    /// Feasible neighbors skipped because they were in the tabu memory.
    pub tabu_rejections: usize,
    /// Iterations whose selected neighbor was tabu but admitted by aspiration.
    pub aspiration_overrides: usize,
    /// Iterations without any admissible neighbor.
    pub idle_iterations: usize,
    /// Iterations that lowered the best cost.
    pub improvements: usize,
    /// Feasible neighbors generated over the whole run.
    pub feasible_neighbors: usize,
}

/// Result of a completed run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SearchOutcome {
    /// The best (smallest) feasible cover found.
    pub best_solution: Solution,
    /// Number of sets in `best_solution`.
    pub best_cost: usize,
    /// Legacy aspiration counter. Always 0; see `stats.aspiration_overrides`.
    pub aspiration_uses: usize,
    /// Identifiers of the sets in `best_solution`.
    pub best_set_ids: Vec<String>,
    pub initial_solution: Solution,
    /// The current solution when the run terminated.
    pub final_solution: Solution,
    /// Iterations actually performed (less than `max_iter` only on a time limit).
    pub iterations: usize,
    pub stats: SearchStats,
    pub elapsed: Duration,
}

/// The neighbor picked by [`select_move`].
#[derive(Debug, Clone, Copy)]
pub struct Selection<'n> {
    pub neighbor: &'n Neighbor,
    /// `true` if the neighbor is tabu and was admitted by the aspiration criterion.
    pub by_aspiration: bool,
}

/// Outcome of scanning one neighborhood.
#[derive(Debug, Clone, Copy)]
pub struct SelectionReport<'n> {
    pub chosen: Option<Selection<'n>>,
    pub tabu_rejections: usize,
}

/// Picks the admissible neighbor with the fewest sets.
///
/// A neighbor is admissible if it is not in `memory`, or if `aspiration` is enabled
/// and it uses strictly fewer sets than `best_cost`. Among equally small admissible
/// neighbors the first one in `neighborhood` wins.
pub fn select_move<'n>(
    neighborhood: &'n [Neighbor],
    memory: &TabuMemory,
    best_cost: usize,
    aspiration: bool,
) -> SelectionReport<'n> {
    let mut chosen: Option<Selection<'n>> = None;
    let mut tabu_rejections = 0;

    for neighbor in neighborhood {
        let is_tabu = memory.contains(&neighbor.solution);
        if is_tabu && !(aspiration && neighbor.evaluation.used < best_cost) {
            tabu_rejections += 1;
            continue;
        }

        let better = chosen.map_or(true, |c| neighbor.evaluation.used < c.neighbor.evaluation.used);
        if better {
            chosen = Some(Selection {
                neighbor,
                by_aspiration: is_tabu,
            });
        }
    }

    SelectionReport {
        chosen,
        tabu_rejections,
    }
}

struct SearchState {
    phase: SearchPhase,
    current: Solution,
    best: Solution,
    best_cost: usize,
    iteration: usize,
    memory: TabuMemory,
    aspiration_uses: usize,
}

impl SearchState {
    fn transition(&mut self, next: SearchPhase) {
        debug!(from = ?self.phase, to = ?next, iteration = self.iteration, "search phase");
        self.phase = next;
    }
}

/// Tabu search over the single-toggle neighborhood of a cover.
///
/// ## Example
///
/// ```rust
/// use camcover::coverage::CoverageIndex;
/// use camcover::rng::RandomNumberGenerator;
/// use camcover::search::{NoProgress, TabuSearchEngine, TabuSearchOptions};
///
/// let index = CoverageIndex::new(
///     vec!["p1".into(), "p2".into(), "p3".into()],
///     vec![
///         ("c1".into(), vec!["p1".into(), "p2".into()]),
///         ("c2".into(), vec!["p2".into(), "p3".into()]),
///         ("c3".into(), vec!["p1".into(), "p3".into()]),
///     ],
/// )
/// .unwrap();
///
/// let engine = TabuSearchEngine::new(&index, TabuSearchOptions::new(50, 5, true));
/// let mut rng = RandomNumberGenerator::from_seed(1);
/// let outcome = engine.run(&mut rng, &mut NoProgress).unwrap();
/// assert_eq!(outcome.best_cost, 2);
/// ```
#[derive(Debug, Clone)]
pub struct TabuSearchEngine<'a, E>
where
    E: Evaluate,
{
    index: &'a CoverageIndex,
    evaluator: E,
    options: TabuSearchOptions,
}

impl<'a> TabuSearchEngine<'a, SolutionEvaluator<'a>> {
    /// Creates an engine using the plain [`SolutionEvaluator`].
    pub fn new(index: &'a CoverageIndex, options: TabuSearchOptions) -> Self {
        Self::with_evaluator(index, SolutionEvaluator::new(index), options)
    }
}

impl<'a, E> TabuSearchEngine<'a, E>
where
    E: Evaluate,
{
    /// Creates an engine with a custom evaluator, e.g. a cached one.
    pub fn with_evaluator(
        index: &'a CoverageIndex,
        evaluator: E,
        options: TabuSearchOptions,
    ) -> Self {
        Self {
            index,
            evaluator,
            options,
        }
    }

    pub fn options(&self) -> &TabuSearchOptions {
        &self.options
    }

    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }

    /// Builds a random initial cover and improves it for `max_iter` iterations.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the options are invalid (`Configuration`)
    /// - the instance cannot be covered (`InstanceUncoverable`)
    /// - an evaluation references an unknown set (`UnknownSet`)
    /// - the progress sink fails (`Io`)
    ///
    /// No partial result is returned on error.
    #[tracing::instrument(level = "debug", name = "Tabu Search", skip_all, fields(
        sets = self.index.set_count(),
        points = self.index.universe_len(),
    ))]
    pub fn run<S>(&self, rng: &mut RandomNumberGenerator, sink: &mut S) -> Result<SearchOutcome>
    where
        S: ProgressSink + ?Sized,
    {
        self.options.validate()?;

        let mut builder = InitialSolutionBuilder::new(self.index);
        if let Some(cap) = self.options.get_max_draws() {
            builder = builder.with_max_draws(cap)?;
        }
        let initial = builder.build(rng)?;

        self.run_from(initial, sink)
    }

    /// Improves the given feasible cover for `max_iter` iterations.
    ///
    /// # Errors
    ///
    /// Returns `CoverError::Configuration` if `initial` is not feasible, otherwise the
    /// same errors as [`run`](Self::run).
    pub fn run_from<S>(&self, initial: Solution, sink: &mut S) -> Result<SearchOutcome>
    where
        S: ProgressSink + ?Sized,
    {
        let started = Instant::now();
        let aspiration = self.options.get_aspiration();

        let mut state = SearchState {
            phase: SearchPhase::Initializing,
            current: initial.clone(),
            best: initial.clone(),
            best_cost: 0,
            iteration: 0,
            memory: TabuMemory::new(self.options.get_tabu_size()),
            aspiration_uses: 0,
        };

        let evaluation = self.evaluator.evaluate(&initial)?;
        if !evaluation.is_feasible() {
            return Err(CoverError::Configuration(format!(
                "initial solution leaves {} point(s) uncovered",
                evaluation.uncovered
            )));
        }
        state.best_cost = evaluation.used;
        state.memory.clear();
        info!(initial_cost = state.best_cost, "starting tabu search");

        let generator = NeighborhoodGenerator::new(
            self.index,
            &self.evaluator,
            self.options.get_parallel_threshold(),
        );
        let mut stats = SearchStats::default();

        sink.begin()?;
        state.transition(SearchPhase::Iterating);

        while state.iteration < self.options.get_max_iter() {
            if let Some(limit) = self.options.get_time_limit() {
                if started.elapsed() >= limit {
                    info!(iteration = state.iteration, "time limit reached");
                    break;
                }
            }

            state.iteration += 1;
            let neighborhood = generator.generate(&state.current)?;
            stats.feasible_neighbors += neighborhood.len();

            let report = select_move(&neighborhood, &state.memory, state.best_cost, aspiration);
            stats.tabu_rejections += report.tabu_rejections;

            let mut tabu_violations = 0;
            match report.chosen {
                Some(selection) => {
                    if selection.by_aspiration {
                        stats.aspiration_overrides += 1;
                    }
                    state.current = selection.neighbor.solution.clone();
                    let current_cost = selection.neighbor.evaluation.used;

                    if current_cost < state.best_cost {
                        state.best = state.current.clone();
                        state.best_cost = current_cost;
                        stats.improvements += 1;
                        debug!(
                            iteration = state.iteration,
                            best_cost = state.best_cost,
                            toggle = ?selection.neighbor.toggle,
                            "new best cover"
                        );
                    } else {
                        tabu_violations += 1;
                    }
                }
                None => {
                    stats.idle_iterations += 1;
                    trace!(iteration = state.iteration, "no admissible neighbor");
                }
            }

            state.memory.record(state.current.clone());

            sink.record(&ProgressRecord {
                iteration: state.iteration,
                best_cost: state.best_cost,
                tabu_violations,
                aspiration_uses: state.aspiration_uses,
            })?;
        }

        state.transition(SearchPhase::Terminated);
        sink.finish()?;

        let best_set_ids = self.index.solution_ids(&state.best)?;
        let elapsed = started.elapsed();
        info!(
            best_cost = state.best_cost,
            iterations = state.iteration,
            tabu_rejections = stats.tabu_rejections,
            aspiration_overrides = stats.aspiration_overrides,
            elapsed_ms = elapsed.as_millis() as u64,
            "tabu search finished"
        );

        Ok(SearchOutcome {
            best_solution: state.best,
            best_cost: state.best_cost,
            aspiration_uses: state.aspiration_uses,
            best_set_ids,
            initial_solution: initial,
            final_solution: state.current,
            iterations: state.iteration,
            stats,
            elapsed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluator::Evaluation;
    use crate::neighborhood::Toggle;
    use crate::search::progress::{NoProgress, ProgressHistory, TsvProgressLog, PROGRESS_HEADER};

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn triangle() -> CoverageIndex {
        CoverageIndex::new(
            strings(&["p1", "p2", "p3"]),
            vec![
                ("c1".to_string(), strings(&["p1", "p2"])),
                ("c2".to_string(), strings(&["p2", "p3"])),
                ("c3".to_string(), strings(&["p1", "p3"])),
            ],
        )
        .unwrap()
    }

    fn neighbor(sets: &[usize], toggled: usize) -> Neighbor {
        let solution: Solution = sets.iter().copied().collect();
        Neighbor {
            evaluation: Evaluation {
                used: solution.len(),
                uncovered: 0,
            },
            solution,
            toggle: Toggle::Add(toggled),
        }
    }

    #[test]
    fn test_select_prefers_fewest_sets_then_first() {
        let neighborhood = vec![
            neighbor(&[0, 1, 2], 2),
            neighbor(&[0, 1], 0),
            neighbor(&[1, 2], 1),
        ];
        let report = select_move(&neighborhood, &TabuMemory::new(5), 10, true);
        let chosen = report.chosen.unwrap();
        assert_eq!(chosen.neighbor.solution, neighborhood[1].solution);
        assert!(!chosen.by_aspiration);
        assert_eq!(report.tabu_rejections, 0);
    }

    #[test]
    fn test_tabu_neighbor_never_selected_without_aspiration() {
        let neighborhood = vec![neighbor(&[0], 0), neighbor(&[0, 1, 2], 2)];
        let mut memory = TabuMemory::new(5);
        memory.record(neighborhood[0].solution.clone());

        // [0] would beat the best cost of 2, but aspiration is off
        let report = select_move(&neighborhood, &memory, 2, false);
        let chosen = report.chosen.unwrap();
        assert_eq!(chosen.neighbor.solution, neighborhood[1].solution);
        assert_eq!(report.tabu_rejections, 1);
    }

    #[test]
    fn test_aspiration_admits_improving_tabu_neighbor() {
        let neighborhood = vec![neighbor(&[0], 0), neighbor(&[0, 1, 2], 2)];
        let mut memory = TabuMemory::new(5);
        memory.record(neighborhood[0].solution.clone());

        let report = select_move(&neighborhood, &memory, 2, true);
        let chosen = report.chosen.unwrap();
        assert_eq!(chosen.neighbor.solution, neighborhood[0].solution);
        assert!(chosen.by_aspiration);
    }

    #[test]
    fn test_aspiration_requires_strict_improvement() {
        let neighborhood = vec![neighbor(&[0, 1], 1)];
        let mut memory = TabuMemory::new(5);
        memory.record(neighborhood[0].solution.clone());

        let report = select_move(&neighborhood, &memory, 2, true);
        assert!(report.chosen.is_none());
        assert_eq!(report.tabu_rejections, 1);
    }

    #[test]
    fn test_zero_iterations_returns_initial() {
        let index = triangle();
        let options = TabuSearchOptions::new(0, 5, true);
        let engine = TabuSearchEngine::new(&index, options);
        let mut log = TsvProgressLog::new(Vec::new());

        let initial = index.solution_from_ids(["c1", "c2", "c3"]).unwrap();
        let outcome = engine.run_from(initial.clone(), &mut log).unwrap();

        assert_eq!(outcome.best_solution, initial);
        assert_eq!(outcome.final_solution, initial);
        assert_eq!(outcome.best_cost, 3);
        assert_eq!(outcome.iterations, 0);
        let text = String::from_utf8(log.into_inner()).unwrap();
        assert_eq!(text, format!("{}\n", PROGRESS_HEADER));
    }

    #[test]
    fn test_finds_two_set_cover() {
        let index = triangle();
        let engine = TabuSearchEngine::new(&index, TabuSearchOptions::new(10, 3, true));
        let initial = index.solution_from_ids(["c1", "c2", "c3"]).unwrap();
        let mut history = ProgressHistory::new();

        let outcome = engine.run_from(initial, &mut history).unwrap();

        // the first removal in pool order is c1
        assert_eq!(outcome.best_cost, 2);
        assert_eq!(outcome.best_set_ids, strings(&["c2", "c3"]));
        assert_eq!(history.records.len(), 10);
        assert_eq!(history.records[0].best_cost, 2);
        assert_eq!(history.records[0].tabu_violations, 0);
        assert!(history.records.iter().all(|r| r.aspiration_uses == 0));
        assert_eq!(outcome.aspiration_uses, 0);
    }

    #[test]
    fn test_infeasible_start_rejected() {
        let index = triangle();
        let engine = TabuSearchEngine::new(&index, TabuSearchOptions::default());
        let initial = index.solution_from_ids(["c1"]).unwrap();
        assert!(matches!(
            engine.run_from(initial, &mut NoProgress),
            Err(CoverError::Configuration(_))
        ));
    }

    #[test]
    fn test_unknown_set_aborts_run() {
        let index = triangle();
        let engine = TabuSearchEngine::new(&index, TabuSearchOptions::default());
        let corrupted: Solution = vec![0, 1, 7].into_iter().collect();
        assert!(matches!(
            engine.run_from(corrupted, &mut NoProgress),
            Err(CoverError::UnknownSet(_))
        ));
    }

    #[test]
    fn test_time_limit_stops_early() {
        let index = triangle();
        let options = TabuSearchOptions::builder()
            .max_iter(1_000_000)
            .time_limit(Duration::ZERO)
            .build();
        let engine = TabuSearchEngine::new(&index, options);
        let initial = index.solution_from_ids(["c1", "c2"]).unwrap();
        let outcome = engine.run_from(initial, &mut NoProgress).unwrap();
        assert_eq!(outcome.iterations, 0);
    }
}
