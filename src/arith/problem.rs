//! Symbolic regression problem over arithmetic expressions.

use super::expression::{express, Expr};
use crate::error::Result;
use crate::gep::{Genome, GepProblem, Symbol, TestInput};

/// Per-case fitness `m - |value - expected|`.
///
/// A perfect hit scores `m`; non-finite values propagate so the individual
/// is filtered out.
pub fn absolute_error_fitness(value: f64, expected: f64, m: f64) -> f64 {
    m - (value - expected).abs()
}

/// Symbolic regression with Karva-decoded arithmetic expressions and
/// absolute-error fitness.
///
/// With `n` test cases the best attainable fitness is `n * m`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArithProblem;

impl GepProblem for ArithProblem {
    type Value = f64;
    type Expressed = Result<Expr>;

    fn express(&self, chromosome: &[Symbol], genome: &Genome) -> Result<Expr> {
        express(chromosome, genome)
    }

    fn score(&self, expressed: &Result<Expr>, input: &TestInput<f64>, expected: f64, m: f64) -> f64 {
        match expressed {
            Ok(expr) => absolute_error_fitness(expr.evaluate(input), expected, m),
            Err(_) => f64::NAN,
        }
    }
}
