//! Arithmetic symbolic regression.
//!
//! A ready-made [`GepProblem`](crate::gep::GepProblem) for fitting
//! `+ - * /` expressions to data. Chromosomes are read gene by gene in
//! Karva (breadth-first) order, genes are joined with the genome's connector,
//! and each test case scores `M - |value - expected|`.
//!
//! Division is unprotected: a zero divisor produces an infinite or NaN
//! result, and the engine filters such individuals out.
//!
//! # References
//!
//! - Ferreira (2006), *Gene Expression Programming: Mathematical Modeling by
//!   an Artificial Intelligence*, ch. 2–3

mod expression;
mod problem;

pub use expression::{decode_gene, express, Expr, Op};
pub use problem::{absolute_error_fitness, ArithProblem};
