use camcover::{
    error::CoverError,
    evaluator::{Evaluate, SolutionEvaluator},
    instance::{InstanceGenerator, InstanceGeneratorOptions},
    rng::RandomNumberGenerator,
    search::{
        tabu_search, NoProgress, ProgressHistory, TabuSearchEngine, TabuSearchOptions,
        TsvProgressLog, PROGRESS_HEADER,
    },
    CoverageIndex, Instance,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn triangle() -> CoverageIndex {
    let instance: Instance = "points: p1, p2, p3\nc1: p1, p2\nc2: p2, p3\nc3: p1, p3\n"
        .parse()
        .unwrap();
    CoverageIndex::from_instance(&instance).unwrap()
}

fn generated(seed: u64) -> CoverageIndex {
    let options = InstanceGeneratorOptions::builder()
        .num_points(60)
        .base_groups(8, 12)
        .total_groups(40)
        .build();
    let generator = InstanceGenerator::new(options).unwrap();
    let instance = generator.generate(&mut RandomNumberGenerator::from_seed(seed));
    CoverageIndex::from_instance(&instance).unwrap()
}

#[test]
fn test_best_is_feasible_and_no_worse_than_start() {
    init_tracing();
    let index = generated(17);
    let engine = TabuSearchEngine::new(&index, TabuSearchOptions::new(60, 10, true));
    let mut rng = RandomNumberGenerator::from_seed(99);

    let outcome = engine.run(&mut rng, &mut NoProgress).unwrap();

    let evaluator = SolutionEvaluator::new(&index);
    let best = evaluator.evaluate(&outcome.best_solution).unwrap();
    assert!(best.is_feasible());
    assert_eq!(best.used, outcome.best_cost);
    assert!(outcome.best_cost <= outcome.initial_solution.len());
    assert_eq!(outcome.best_set_ids.len(), outcome.best_cost);
    assert_eq!(outcome.iterations, 60);
    assert!(evaluator.evaluate(&outcome.final_solution).unwrap().is_feasible());
}

#[test]
fn test_best_cost_never_increases() {
    let index = generated(5);
    let engine = TabuSearchEngine::new(&index, TabuSearchOptions::new(80, 5, true));
    let mut history = ProgressHistory::new();

    let outcome = engine
        .run(&mut RandomNumberGenerator::from_seed(1), &mut history)
        .unwrap();

    assert_eq!(history.records.len(), 80);
    for pair in history.records.windows(2) {
        assert!(pair[1].best_cost <= pair[0].best_cost);
        assert_eq!(pair[1].iteration, pair[0].iteration + 1);
    }
    assert_eq!(history.records.last().unwrap().best_cost, outcome.best_cost);
    assert!(history
        .records
        .iter()
        .all(|r| r.tabu_violations <= 1 && r.aspiration_uses == 0));
}

#[test]
fn test_same_seed_is_reproducible() {
    let index = generated(23);
    let engine = TabuSearchEngine::new(&index, TabuSearchOptions::new(40, 8, true));

    let mut first_log = ProgressHistory::new();
    let mut second_log = ProgressHistory::new();
    let first = engine
        .run(&mut RandomNumberGenerator::from_seed(7), &mut first_log)
        .unwrap();
    let second = engine
        .run(&mut RandomNumberGenerator::from_seed(7), &mut second_log)
        .unwrap();

    assert_eq!(first.best_solution, second.best_solution);
    assert_eq!(first.final_solution, second.final_solution);
    assert_eq!(first.stats, second.stats);
    assert_eq!(first_log.records, second_log.records);
}

#[test]
fn test_parallel_neighborhood_gives_same_run() {
    let index = generated(31);
    let sequential = TabuSearchOptions::builder()
        .max_iter(30)
        .tabu_size(6)
        .parallel_threshold(usize::MAX)
        .build();
    let parallel = TabuSearchOptions::builder()
        .max_iter(30)
        .tabu_size(6)
        .parallel_threshold(0)
        .build();

    let a = TabuSearchEngine::new(&index, sequential)
        .run(&mut RandomNumberGenerator::from_seed(4), &mut NoProgress)
        .unwrap();
    let b = TabuSearchEngine::new(&index, parallel)
        .run(&mut RandomNumberGenerator::from_seed(4), &mut NoProgress)
        .unwrap();

    assert_eq!(a.best_solution, b.best_solution);
    assert_eq!(a.final_solution, b.final_solution);
    assert_eq!(a.stats, b.stats);
}

#[test]
fn test_zero_iterations_writes_header_only() {
    let index = triangle();
    let engine = TabuSearchEngine::new(&index, TabuSearchOptions::new(0, 10, true));
    let mut log = TsvProgressLog::new(Vec::new());

    let outcome = engine
        .run(&mut RandomNumberGenerator::from_seed(12), &mut log)
        .unwrap();

    assert_eq!(outcome.best_solution, outcome.initial_solution);
    assert_eq!(outcome.final_solution, outcome.initial_solution);
    assert_eq!(outcome.best_cost, outcome.initial_solution.len());
    let text = String::from_utf8(log.into_inner()).unwrap();
    assert_eq!(text, format!("{}\n", PROGRESS_HEADER));
}

#[test]
fn test_progress_log_file() {
    let index = triangle();
    let path = std::env::temp_dir().join(format!("camcover_progress_{}.tsv", std::process::id()));
    let mut log = TsvProgressLog::create(&path).unwrap();

    let engine = TabuSearchEngine::new(&index, TabuSearchOptions::new(4, 2, true));
    let outcome = engine
        .run(&mut RandomNumberGenerator::from_seed(2), &mut log)
        .unwrap();
    drop(log);

    let text = std::fs::read_to_string(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 5);
    assert_eq!(lines[0], PROGRESS_HEADER);
    assert!(lines[4].starts_with(&format!("4\t{}\t", outcome.best_cost)));
    assert!(lines[4].ends_with("\t0"));
}

#[test]
fn test_uncoverable_instance_fails_before_searching() {
    let instance: Instance = "points: p1\nc1: p2\n".parse().unwrap();
    let index = CoverageIndex::from_instance(&instance).unwrap();
    let engine = TabuSearchEngine::new(&index, TabuSearchOptions::default());
    let mut history = ProgressHistory::new();

    let result = engine.run(&mut RandomNumberGenerator::from_seed(0), &mut history);

    assert!(matches!(result, Err(CoverError::InstanceUncoverable { .. })));
    assert!(history.records.is_empty());
}

#[test]
fn test_empty_instance_rejected() {
    let instance: Instance = "points: \nc1: p1\n".parse().unwrap();
    assert!(matches!(
        CoverageIndex::from_instance(&instance),
        Err(CoverError::EmptyInstance(_))
    ));

    let instance: Instance = "points: p1\n".parse().unwrap();
    assert!(matches!(
        CoverageIndex::from_instance(&instance),
        Err(CoverError::EmptyInstance(_))
    ));
}

#[test]
fn test_tabu_search_entry_point() {
    let index = triangle();
    let mut rng = RandomNumberGenerator::from_seed(21);
    let (best, cost, aspiration_uses) =
        tabu_search(&index, 25, 4, false, &mut rng, &mut NoProgress).unwrap();

    assert_eq!(cost, 2);
    assert_eq!(best.len(), 2);
    assert_eq!(aspiration_uses, 0);
}

#[test]
fn test_single_set_instance_idles_every_iteration() {
    let instance: Instance = "points: p1, p2\nc1: p1, p2\n".parse().unwrap();
    let index = CoverageIndex::from_instance(&instance).unwrap();
    let engine = TabuSearchEngine::new(&index, TabuSearchOptions::new(3, 10, true));
    let mut log = TsvProgressLog::new(Vec::new());

    let outcome = engine
        .run(&mut RandomNumberGenerator::from_seed(1), &mut log)
        .unwrap();

    let text = String::from_utf8(log.into_inner()).unwrap();
    assert_eq!(
        text,
        format!("{}\n1\t1\t0\t0\n2\t1\t0\t0\n3\t1\t0\t0\n", PROGRESS_HEADER)
    );
    assert_eq!(outcome.best_cost, 1);
    assert_eq!(outcome.stats.idle_iterations, 3);
    assert_eq!(outcome.stats.feasible_neighbors, 0);
    assert_eq!(outcome.final_solution, outcome.initial_solution);
}

#[test]
fn test_without_aspiration_tabu_moves_are_never_admitted() {
    let index = triangle();
    let engine = TabuSearchEngine::new(&index, TabuSearchOptions::new(30, 50, false));

    let outcome = engine
        .run(&mut RandomNumberGenerator::from_seed(21), &mut NoProgress)
        .unwrap();

    let evaluator = SolutionEvaluator::new(&index);
    assert!(evaluator.evaluate(&outcome.best_solution).unwrap().is_feasible());
    assert_eq!(outcome.best_cost, 2);
    assert_eq!(outcome.stats.aspiration_overrides, 0);
    assert_eq!(outcome.iterations, 30);
}
