//! Fitness pipeline: scoring, degenerate-value filtering and ranking.
//!
//! Fitness is maximized. A population passes through
//! [`evaluate_fitness`] → [`filter_degenerate`] → [`best_of`] /
//! [`sort_by_fitness`] once per generation.

use super::config::Genome;
use super::types::{Chromosome, GepProblem, TestSet};

/// A chromosome paired with its aggregate fitness.
pub type Scored = (f64, Chromosome);

/// Sums per-case scores for one expressed individual.
pub fn aggregate_fitness<P: GepProblem>(
    problem: &P,
    expressed: &P::Expressed,
    tests: &TestSet<P::Value>,
    m: f64,
) -> f64 {
    tests
        .cases()
        .map(|(input, expected)| problem.score(expressed, input, expected, m))
        .sum()
}

/// Expresses and scores every chromosome, in population order.
pub fn evaluate_fitness<P: GepProblem>(
    problem: &P,
    population: &[Chromosome],
    genome: &Genome,
    tests: &TestSet<P::Value>,
    m: f64,
) -> Vec<f64> {
    population
        .iter()
        .map(|chromosome| {
            let expressed = problem.express(chromosome, genome);
            aggregate_fitness(problem, &expressed, tests, m)
        })
        .collect()
}

/// Drops pairs whose fitness is NaN or infinite, keeping relative order.
///
/// # Examples
///
/// ```
/// use u_gep::gep::filter_degenerate;
///
/// let kept = filter_degenerate(
///     vec![1.0, f64::NAN, 3.0, f64::INFINITY, 2.0],
///     vec!['A', 'B', 'C', 'D', 'E'],
/// );
/// assert_eq!(kept, vec![(1.0, 'A'), (3.0, 'C'), (2.0, 'E')]);
/// ```
pub fn filter_degenerate<T>(fitness: Vec<f64>, items: Vec<T>) -> Vec<(f64, T)> {
    fitness
        .into_iter()
        .zip(items)
        .filter(|(f, _)| f.is_finite())
        .collect()
}

/// Orders pairs best first.
///
/// Stable ascending sort followed by a reversal, so equal-fitness pairs end
/// up in the reverse of their input order.
///
/// ```
/// use u_gep::gep::sort_by_fitness;
///
/// let ranked = sort_by_fitness(vec![(1.0, "a"), (2.0, "b"), (1.0, "c")]);
/// assert_eq!(ranked, vec![(2.0, "b"), (1.0, "c"), (1.0, "a")]);
/// ```
pub fn sort_by_fitness<T>(mut pairs: Vec<(f64, T)>) -> Vec<(f64, T)> {
    pairs.sort_by(|a, b| a.0.total_cmp(&b.0));
    pairs.reverse();
    pairs
}

/// The pair with maximum fitness; on ties, the last one.
///
/// `None` for an empty slice.
pub fn best_of<T>(pairs: &[(f64, T)]) -> Option<&(f64, T)> {
    pairs.iter().max_by(|a, b| a.0.total_cmp(&b.0))
}
