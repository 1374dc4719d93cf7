//! Generation step and evolution loop.
//!
//! One generation is: score → filter → elite → gap-fill → rank → roulette →
//! mutation → IS → RIS → gene transposition → 1-point → 2-point → gene
//! recombination → `[elite] ++ offspring`. The order is fixed because every
//! stage draws from the same random stream; a seeded run is reproducible
//! only as long as this order is kept.

use super::config::{Genome, Rates, SimParams};
use super::fitness::{best_of, evaluate_fitness, filter_degenerate, sort_by_fitness, Scored};
use super::merge::splice;
use super::operators::{
    gene_recombine, gene_transpose, is_transpose, mutate, one_point_recombine, random_chromosome,
    random_population, ris_transpose, two_point_recombine,
};
use super::selection::{rank_weights, roulette_sample};
use super::types::{Chromosome, GepProblem, Population, Symbol, TestSet};
use crate::error::{GepError, Result};
use crate::random::{create_rng, random_pairs, sample_unique};
use log::{debug, info, trace, warn};
use rand::Rng;

/// Output of one generation.
///
/// `population[0]` is the elite and `best_fitness` is its fitness, measured
/// before breeding.
#[derive(Debug, Clone, PartialEq)]
pub struct Generation {
    pub best_fitness: f64,
    pub population: Population,
}

impl Generation {
    /// The elite chromosome.
    pub fn best(&self) -> &Chromosome {
        &self.population[0]
    }
}

/// Result of a GEP run.
#[derive(Debug, Clone)]
pub struct GepResult {
    /// Elite of the last generation.
    pub best: Chromosome,

    /// Fitness of `best`.
    pub best_fitness: f64,

    /// Number of generations executed.
    pub generations: usize,

    /// Whether the run stopped on an exact target-fitness match.
    pub converged: bool,

    /// Best fitness of each generation.
    pub fitness_history: Vec<f64>,

    /// Final population, elite first.
    pub population: Population,
}

/// Runs one generation.
///
/// Individuals with NaN or infinite fitness are dropped before selection.
/// If none survive, a fresh random chromosome with fitness `0.0` takes the
/// elite slot. The breeding pool is topped up with random chromosomes of
/// fitness `0.0` to `N - 1` members.
///
/// Operator stages sample from the whole offspring range independently and
/// write their results back by index; unselected offspring pass through.
pub fn generation_step<P: GepProblem, R: Rng>(
    population: &[Chromosome],
    genome: &Genome,
    params: &SimParams,
    rates: &Rates,
    problem: &P,
    tests: &TestSet<P::Value>,
    rng: &mut R,
) -> Result<Generation> {
    let n = population.len();
    if n < 2 {
        return Err(GepError::InvalidParams(format!(
            "population needs at least 2 individuals, got {n}"
        )));
    }
    let breed = n - 1;

    let fitness = evaluate_fitness(problem, population, genome, tests, params.selection_range);
    let mut pool: Vec<Scored> = filter_degenerate(fitness, population.to_vec());
    let survivors = pool.len();

    let (best_fitness, best) = match best_of(&pool) {
        Some((f, c)) => (*f, c.clone()),
        None => {
            warn!("every individual has degenerate fitness; seeding a random elite");
            (0.0, random_chromosome(genome, rng))
        }
    };

    let gap = breed.saturating_sub(pool.len());
    pool.extend((0..gap).map(|_| (0.0, random_chromosome(genome, rng))));

    let ranked = sort_by_fitness(pool);
    let weights = rank_weights(ranked.len(), params.roulette_exponent);
    let selected: Population = roulette_sample(&weights, breed, rng)
        .into_iter()
        .map(|i| ranked[i].1.clone())
        .collect();

    debug!(
        "generation: best={best_fitness}, survivors={survivors}/{n}, gap_filled={gap}"
    );

    let offspring = reproduce(selected, genome, params, rates, rng)?;

    let mut next = Vec::with_capacity(n);
    next.push(best);
    next.extend(offspring);
    Ok(Generation {
        best_fitness,
        population: next,
    })
}

/// Iterates [`generation_step`] until `max_generations` steps have run or a
/// step's best fitness equals `target_fitness` exactly.
#[allow(clippy::too_many_arguments)]
pub fn evolve<P: GepProblem, R: Rng>(
    initial: Population,
    genome: &Genome,
    params: &SimParams,
    rates: &Rates,
    problem: &P,
    tests: &TestSet<P::Value>,
    max_generations: usize,
    target_fitness: f64,
    rng: &mut R,
) -> Result<GepResult> {
    if max_generations == 0 {
        return Err(GepError::InvalidParams(
            "max_generations must be at least 1".into(),
        ));
    }

    let mut population = initial;
    let mut fitness_history = Vec::with_capacity(max_generations);
    let mut generations = 0;

    let (last, converged) = loop {
        let step = generation_step(&population, genome, params, rates, problem, tests, rng)?;
        generations += 1;
        fitness_history.push(step.best_fitness);
        problem.on_generation(generations, step.best_fitness);

        // Exact match, no tolerance.
        if step.best_fitness == target_fitness {
            info!("target fitness {target_fitness} reached after {generations} generations");
            break (step, true);
        }
        if generations == max_generations {
            break (step, false);
        }
        population = step.population;
    };

    info!(
        "evolution finished: generations={generations}, best={}, converged={converged}",
        last.best_fitness
    );

    Ok(GepResult {
        best: last.best().clone(),
        best_fitness: last.best_fitness,
        generations,
        converged,
        fitness_history,
        population: last.population,
    })
}

/// Executes a full GEP run from validated configuration.
///
/// # Usage
///
/// ```ignore
/// let result = GepRunner::run(&problem, &genome, &params, &rates, &tests)?;
/// println!("best fitness: {}", result.best_fitness);
/// ```
pub struct GepRunner;

impl GepRunner {
    /// Validates the configuration, seeds a generator from `params.seed`,
    /// creates a random population of `params.pop_size` and evolves it.
    pub fn run<P: GepProblem>(
        problem: &P,
        genome: &Genome,
        params: &SimParams,
        rates: &Rates,
        tests: &TestSet<P::Value>,
    ) -> Result<GepResult> {
        Self::validate(genome, params, rates)?;

        let mut rng = match params.seed {
            Some(seed) => create_rng(seed),
            None => create_rng(rand::random()),
        };
        let initial = random_population(genome, params.pop_size, &mut rng);
        Self::run_from(initial, problem, genome, params, rates, tests, &mut rng)
    }

    /// Evolves a caller-supplied initial population with a caller-supplied
    /// generator.
    ///
    /// The configuration is validated first, and every chromosome of
    /// `initial` must have the genome's chromosome length.
    pub fn run_from<P: GepProblem, R: Rng>(
        initial: Population,
        problem: &P,
        genome: &Genome,
        params: &SimParams,
        rates: &Rates,
        tests: &TestSet<P::Value>,
        rng: &mut R,
    ) -> Result<GepResult> {
        Self::validate(genome, params, rates)?;
        let expected = genome.chromosome_length();
        if let Some(bad) = initial.iter().find(|c| c.len() != expected) {
            return Err(GepError::InvalidGenome(format!(
                "initial chromosome has {} symbols, genome expects {expected}",
                bad.len()
            )));
        }

        evolve(
            initial,
            genome,
            params,
            rates,
            problem,
            tests,
            params.num_generations,
            params.max_fitness,
            rng,
        )
    }

    fn validate(genome: &Genome, params: &SimParams, rates: &Rates) -> Result<()> {
        genome.validate()?;
        rates.validate()?;
        params.validate()
    }
}

// ============================================================================
// Operator pipeline
// ============================================================================

/// Applies every operator stage in order to the selected offspring.
fn reproduce<R: Rng>(
    selected: Population,
    genome: &Genome,
    params: &SimParams,
    rates: &Rates,
    rng: &mut R,
) -> Result<Population> {
    let n = selected.len();

    let pool: Population = selected
        .iter()
        .map(|c| mutate(c, genome, rates.mutation, rng))
        .collect();

    let pool = transpose_stage(&pool, stage_size(n, rates.is_transposition), rng, |c, rng| {
        is_transpose(c, genome, params.max_is_len, rng)
    })?;
    let pool = transpose_stage(&pool, stage_size(n, rates.ris_transposition), rng, |c, rng| {
        ris_transpose(c, genome, params.max_ris_len, rng)
    })?;
    let pool = transpose_stage(&pool, stage_size(n, rates.gene_transposition), rng, |c, rng| {
        gene_transpose(c, genome, rng)
    })?;

    let pool = recombine_stage(
        &pool,
        stage_size(n, rates.one_point_recombination),
        rng,
        |a, b, rng| one_point_recombine(a, b, rng),
    )?;
    let pool = recombine_stage(
        &pool,
        stage_size(n, rates.two_point_recombination),
        rng,
        |a, b, rng| two_point_recombine(a, b, rng),
    )?;
    recombine_stage(
        &pool,
        stage_size(n, rates.gene_recombination),
        rng,
        |a, b, rng| gene_recombine(a, b, genome, rng),
    )
}

/// `floor(n * rate)`.
fn stage_size(n: usize, rate: f64) -> usize {
    (n as f64 * rate).floor() as usize
}

/// Rewrites `count` distinct, uniformly chosen members with `op`.
fn transpose_stage<R, F>(pool: &[Chromosome], count: usize, rng: &mut R, op: F) -> Result<Population>
where
    R: Rng,
    F: Fn(&[Symbol], &mut R) -> Chromosome,
{
    let chosen = sample_unique(rng, pool.len(), count);
    trace!("transposition stage: {} of {}", chosen.len(), pool.len());
    let replacements = chosen.iter().map(|&i| op(&pool[i], rng)).collect();
    splice(pool, &chosen, replacements)
}

/// Recombines `count` disjoint random pairs with `op`.
fn recombine_stage<R, F>(pool: &[Chromosome], count: usize, rng: &mut R, op: F) -> Result<Population>
where
    R: Rng,
    F: Fn(&[Symbol], &[Symbol], &mut R) -> (Chromosome, Chromosome),
{
    if count == 0 {
        return Ok(pool.to_vec());
    }

    let pairs: Vec<(usize, usize)> = random_pairs(rng, pool.len())
        .into_iter()
        .take(count)
        .collect();
    trace!("recombination stage: {} pairs of {}", pairs.len(), pool.len());

    let mut offspring = Vec::with_capacity(pairs.len() * 2);
    for (i, j) in pairs {
        let (a, b) = op(&pool[i], &pool[j], rng);
        offspring.push((i, a));
        offspring.push((j, b));
    }
    offspring.sort_by_key(|(i, _)| *i);

    let (indices, replacements): (Vec<usize>, Population) = offspring.into_iter().unzip();
    splice(pool, &indices, replacements)
}

// ============================================================================
// Tests
// ============================================================================
