//! Core types and the problem trait.
//!
//! [`GepProblem`] is the contract between the generic engine and a
//! domain-specific expression evaluator: the engine never looks inside the
//! expressed form, it only asks for per-case scores.

use super::config::Genome;
use crate::error::{GepError, Result};
use std::collections::HashMap;
use std::marker::PhantomData;

/// One alphabet character.
pub type Symbol = char;

/// Flat symbol sequence of length `num_genes * gene_length`.
///
/// Gene boundaries are not stored; they follow from [`Genome::gene_length`].
pub type Chromosome = Vec<Symbol>;

/// Ordered set of chromosomes.
pub type Population = Vec<Chromosome>;

/// Terminal bindings for one test case.
pub type TestInput<V> = HashMap<Symbol, V>;

/// Fitness cases: parallel inputs and expected outputs.
#[derive(Debug, Clone, PartialEq)]
pub struct TestSet<V> {
    inputs: Vec<TestInput<V>>,
    outputs: Vec<f64>,
}

impl<V> TestSet<V> {
    /// Pairs inputs with expected outputs.
    ///
    /// Fails with [`GepError::TestSetMismatch`] if the lengths differ.
    pub fn new(inputs: Vec<TestInput<V>>, outputs: Vec<f64>) -> Result<Self> {
        if inputs.len() != outputs.len() {
            return Err(GepError::TestSetMismatch {
                inputs: inputs.len(),
                outputs: outputs.len(),
            });
        }
        Ok(Self { inputs, outputs })
    }

    pub fn inputs(&self) -> &[TestInput<V>] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[f64] {
        &self.outputs
    }

    pub fn len(&self) -> usize {
        self.outputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outputs.is_empty()
    }

    /// Iterates `(input, expected)` pairs.
    pub fn cases(&self) -> impl Iterator<Item = (&TestInput<V>, f64)> {
        self.inputs.iter().zip(self.outputs.iter().copied())
    }
}

/// Defines a GEP problem.
///
/// Implementors supply the two domain-specific pieces of the fitness
/// pipeline:
///
/// 1. **Expression**: turning a chromosome into something evaluable
/// 2. **Scoring**: grading that expressed form on one test case
///
/// Aggregate fitness is the sum of per-case scores. Higher is better.
/// Scores may be NaN or infinite; such individuals are filtered out.
pub trait GepProblem {
    /// Value bound to each terminal in a test case.
    type Value;

    /// Expressed individual, opaque to the engine.
    type Expressed;

    /// Expresses a chromosome.
    fn express(&self, chromosome: &[Symbol], genome: &Genome) -> Self::Expressed;

    /// Scores one test case with selection range `m`.
    fn score(
        &self,
        expressed: &Self::Expressed,
        input: &TestInput<Self::Value>,
        expected: f64,
        m: f64,
    ) -> f64;

    /// Called after every generation with its best fitness.
    ///
    /// The default implementation is a no-op.
    fn on_generation(&self, _generation: usize, _best_fitness: f64) {}
}

/// [`GepProblem`] built from a pair of closures.
///
/// ```
/// use u_gep::gep::{FnProblem, GepProblem, Genome};
///
/// let problem: FnProblem<_, _, f64> = FnProblem::new(
///     |chromosome: &[char], _genome: &Genome| chromosome.len(),
///     |len: &usize, _input: &std::collections::HashMap<char, f64>, expected: f64, m: f64| {
///         m - (*len as f64 - expected).abs()
///     },
/// );
/// let genome = Genome::new(vec!['a'], vec!['+'], '+', 2, 2, 1);
/// let expressed = problem.express(&['+', 'a', 'a', 'a', 'a'], &genome);
/// assert_eq!(expressed, 5);
/// ```
pub struct FnProblem<E, S, V> {
    express_fn: E,
    score_fn: S,
    _value: PhantomData<fn(&V)>,
}

impl<E, S, V> FnProblem<E, S, V> {
    pub fn new(express_fn: E, score_fn: S) -> Self {
        Self {
            express_fn,
            score_fn,
            _value: PhantomData,
        }
    }
}

impl<E, S, X, V> GepProblem for FnProblem<E, S, V>
where
    E: Fn(&[Symbol], &Genome) -> X,
    S: Fn(&X, &TestInput<V>, f64, f64) -> f64,
{
    type Value = V;
    type Expressed = X;

    fn express(&self, chromosome: &[Symbol], genome: &Genome) -> X {
        (self.express_fn)(chromosome, genome)
    }

    fn score(&self, expressed: &X, input: &TestInput<V>, expected: f64, m: f64) -> f64 {
        (self.score_fn)(expressed, input, expected, m)
    }
}
