//! Error types for u-gep.
//!
//! Configuration problems and index-bookkeeping violations are reported
//! through [`GepError`]. Degenerate fitness values (NaN, infinite) are not
//! errors: the fitness pipeline filters them out.

use thiserror::Error;

/// Error type for the GEP engine.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GepError {
    /// The genome description is structurally invalid.
    #[error("Invalid genome: {0}")]
    InvalidGenome(String),

    /// One of the operator rates is outside `[0, 1]`.
    #[error("Invalid rates: {0}")]
    InvalidRates(String),

    /// A simulation parameter is out of range.
    #[error("Invalid simulation parameters: {0}")]
    InvalidParams(String),

    /// Test inputs and expected outputs differ in length.
    #[error("Test set mismatch: {inputs} inputs but {outputs} expected outputs")]
    TestSetMismatch { inputs: usize, outputs: usize },

    /// A chosen index lies outside the sequence being spliced.
    #[error("Index {index} out of range for sequence of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// Splice indices were not strictly ascending.
    #[error("Splice indices must be strictly ascending")]
    UnsortedIndices,

    /// Splice indices and replacements differ in length.
    #[error("Length mismatch: {indices} indices but {replacements} replacements")]
    LengthMismatch { indices: usize, replacements: usize },

    /// A chromosome could not be expressed.
    #[error("Malformed expression: {0}")]
    MalformedExpression(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GepError>;
