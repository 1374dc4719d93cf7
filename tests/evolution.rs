//! End-to-end tests of the evolution loop on arithmetic regression.

use std::collections::HashMap;
use u_gep::arith::ArithProblem;
use u_gep::gep::{
    evolve, generation_step, operators::random_population, Generation, Genome, GepRunner, Rates,
    SimParams, TestSet,
};
use u_gep::random::create_rng;

fn genome(num_genes: usize) -> Genome {
    Genome::new(vec!['a'], vec!['+', '-', '*', '/'], '+', 2, 6, num_genes)
}

/// Samples `f` at a = 1..=10.
fn tests_for(f: impl Fn(f64) -> f64) -> TestSet<f64> {
    let xs: Vec<f64> = (1..=10).map(f64::from).collect();
    TestSet::new(
        xs.iter().map(|&x| HashMap::from([('a', x)])).collect(),
        xs.iter().map(|&x| f(x)).collect(),
    )
    .unwrap()
}

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn params() -> SimParams {
    SimParams::default()
        .with_pop_size(30)
        .with_selection_range(100.0)
        .with_max_fitness(1000.0)
        .with_num_generations(60)
        .with_seed(2024)
}

#[test]
fn seeded_runs_are_identical() {
    let g = genome(3);
    let tests = tests_for(|a| a * a + a);
    let initial = random_population(&g, 30, &mut create_rng(5));

    let trace = |seed: u64| -> Vec<Generation> {
        let mut rng = create_rng(seed);
        let mut population = initial.clone();
        let mut out = Vec::new();
        for _ in 0..20 {
            let step = generation_step(
                &population,
                &g,
                &params(),
                &Rates::default(),
                &ArithProblem,
                &tests,
                &mut rng,
            )
            .unwrap();
            population = step.population.clone();
            out.push(step);
        }
        out
    };

    assert_eq!(trace(99), trace(99));
}

#[test]
fn different_seeds_diverge() {
    let g = genome(3);
    let tests = tests_for(|a| a * a + a);
    let a = GepRunner::run(&ArithProblem, &g, &params().with_seed(1), &Rates::default(), &tests)
        .unwrap();
    let b = GepRunner::run(&ArithProblem, &g, &params().with_seed(2), &Rates::default(), &tests)
        .unwrap();
    assert_ne!(a.population, b.population);
}

#[test]
fn stops_exactly_when_target_first_hit() {
    init_logger();
    let g = genome(2);
    let tests = tests_for(|a| a * a * a - a);
    let p = params().with_max_fitness(1e12);

    let full = GepRunner::run(&ArithProblem, &g, &p, &Rates::default(), &tests).unwrap();
    assert!(!full.converged);
    assert_eq!(full.generations, p.num_generations);

    let target = full.fitness_history[9];
    let first_hit = full
        .fitness_history
        .iter()
        .position(|&f| f == target)
        .unwrap();

    let early =
        GepRunner::run(&ArithProblem, &g, &p.clone().with_max_fitness(target), &Rates::default(), &tests)
            .unwrap();
    assert!(early.converged);
    assert_eq!(early.generations, first_hit + 1);
    assert_eq!(early.best_fitness, target);
    assert_eq!(&early.fitness_history[..], &full.fitness_history[..=first_hit]);
}

#[test]
fn finds_identity_function() {
    init_logger();
    // A bare 'a' root is common in a random population, and scores the
    // maximum 10 * 100.
    let g = genome(1);
    let tests = tests_for(|a| a);
    let result = GepRunner::run(&ArithProblem, &g, &params(), &Rates::default(), &tests).unwrap();

    assert!(result.converged, "history: {:?}", result.fitness_history);
    assert_eq!(result.best_fitness, 1000.0);
    let expr = u_gep::arith::express(&result.best, &g).unwrap();
    for x in 1..=10 {
        let input = HashMap::from([('a', f64::from(x))]);
        assert!((expr.evaluate(&input) - f64::from(x)).abs() < 1e-9, "{expr}");
    }
}

#[test]
fn best_fitness_never_decreases() {
    let g = genome(3);
    let tests = tests_for(|a| a * a + a);
    let result = GepRunner::run(
        &ArithProblem,
        &g,
        &params().with_max_fitness(1e12),
        &Rates::default(),
        &tests,
    )
    .unwrap();

    for w in result.fitness_history.windows(2) {
        assert!(w[1] >= w[0], "elite lost: {w:?}");
    }
}

#[test]
fn survives_all_degenerate_population() {
    init_logger();
    // With a / (a - a) everywhere, every individual divides by zero.
    let g = Genome::new(vec!['a'], vec!['/', '-'], '/', 2, 2, 1);
    let tests = tests_for(|a| a);
    let degenerate: Vec<Vec<char>> = (0..10).map(|_| "/a-aa".chars().collect()).collect();
    let mut rng = create_rng(3);

    let result = evolve(
        degenerate,
        &g,
        &params().with_pop_size(10),
        &Rates::none(),
        &ArithProblem,
        &tests,
        1,
        1e12,
        &mut rng,
    )
    .unwrap();

    assert_eq!(result.best_fitness, 0.0);
    assert_eq!(result.population.len(), 10);
    for c in &result.population {
        assert_eq!(c.len(), g.chromosome_length());
    }
}
