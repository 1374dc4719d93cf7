//! Gene Expression Programming for symbolic regression.
//!
//! Provides a generational GEP engine:
//!
//! - **Chromosomes**: linear symbol strings of head/tail genes, described by
//!   a [`Genome`](gep::Genome).
//! - **Operators**: point mutation, IS/RIS/gene transposition and
//!   1-point/2-point/gene recombination.
//! - **Fitness**: summed per-case scores with NaN/infinite filtering and
//!   descending rank ordering.
//! - **Selection**: rank-weighted roulette with a single elite slot.
//! - **Arithmetic problems**: Karva-decoded `+ - * /` expressions with
//!   absolute-error fitness.
//!
//! # Architecture
//!
//! All randomness flows through one explicitly passed generator, consumed in
//! a fixed order per generation, so a seeded run is reproducible bit for
//! bit. The engine performs no I/O; configuration loading and reporting
//! belong to the caller. Progress is reported through the `log` facade.

pub mod arith;
mod error;
pub mod gep;
pub mod random;

pub use error::{GepError, Result};
