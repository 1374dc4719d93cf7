//! Gene Expression Programming engine.
//!
//! Chromosomes are flat symbol strings of fixed-length genes, each gene a
//! head (any symbol) followed by a tail (terminals only). Users plug in the
//! domain by implementing [`GepProblem`]: how a chromosome is expressed and
//! how an expressed individual scores on one test case.
//!
//! # Core Traits
//!
//! - [`GepProblem`]: expression and per-case scoring
//!
//! # Key Types
//!
//! - [`Genome`], [`Rates`], [`SimParams`]: run-wide configuration
//! - [`TestSet`]: fitness cases
//! - [`GepRunner`]: executes the evolutionary loop
//! - [`GepResult`]: final population with run statistics
//!
//! # Generation Pipeline
//!
//! [`generation_step`] scores the population, drops NaN/infinite fitness,
//! keeps the best as elite, tops the breeding pool up with random
//! chromosomes, selects `N - 1` parents by rank roulette and passes them
//! through mutation, IS/RIS/gene transposition and 1-point/2-point/gene
//! recombination. [`evolve`] repeats this until the generation budget runs
//! out or the best fitness hits the target exactly.
//!
//! # References
//!
//! - Ferreira (2001), "Gene Expression Programming: A New Adaptive Algorithm
//!   for Solving Problems", *Complex Systems* 13(2), 87–129
//! - Ferreira (2006), *Gene Expression Programming: Mathematical Modeling by
//!   an Artificial Intelligence*, 2nd ed.

mod config;
mod fitness;
mod merge;
pub mod operators;
mod runner;
mod selection;
mod types;

pub use config::{Genome, Rates, SimParams};
pub use fitness::{
    aggregate_fitness, best_of, evaluate_fitness, filter_degenerate, sort_by_fitness, Scored,
};
pub use merge::splice;
pub use runner::{evolve, generation_step, Generation, GepResult, GepRunner};
pub use selection::{rank_weights, roulette_sample};
pub use types::{Chromosome, FnProblem, GepProblem, Population, Symbol, TestInput, TestSet};
