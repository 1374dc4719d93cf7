//! Run-wide configuration records.
//!
//! [`Genome`] fixes the chromosome layout, [`Rates`] the operator
//! probabilities and [`SimParams`] the population and termination settings.
//! All three are built once and stay immutable for the run; call `validate`
//! before handing them to the engine.

use super::types::Symbol;
use crate::error::{GepError, Result};
use std::collections::HashSet;

/// Chromosome layout: alphabet, gene shape and gene count.
///
/// # Examples
///
/// ```
/// use u_gep::gep::Genome;
///
/// let genome = Genome::new(vec!['a', 'b'], vec!['+', '*'], '+', 2, 4, 3);
/// assert_eq!(genome.tail_length(), 5);
/// assert_eq!(genome.gene_length(), 9);
/// assert_eq!(genome.chromosome_length(), 27);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Genome {
    /// Leaf symbols. Tail positions only ever hold these.
    pub terminals: Vec<Symbol>,

    /// Function symbols.
    pub nonterminals: Vec<Symbol>,

    /// Symbol that links the expressed genes together.
    pub gene_connector: Symbol,

    /// Highest arity of any nonterminal.
    pub max_arity: usize,

    /// Number of head positions per gene.
    pub head_length: usize,

    /// Number of genes per chromosome.
    pub num_genes: usize,
}

impl Genome {
    /// Creates a genome description.
    pub fn new(
        terminals: Vec<Symbol>,
        nonterminals: Vec<Symbol>,
        gene_connector: Symbol,
        max_arity: usize,
        head_length: usize,
        num_genes: usize,
    ) -> Self {
        Self {
            terminals,
            nonterminals,
            gene_connector,
            max_arity,
            head_length,
            num_genes,
        }
    }

    /// `head_length * (max_arity - 1) + 1`: enough terminals to close any head.
    pub fn tail_length(&self) -> usize {
        self.head_length * (self.max_arity - 1) + 1
    }

    /// Head plus tail.
    pub fn gene_length(&self) -> usize {
        self.head_length + self.tail_length()
    }

    /// Total symbols in a chromosome.
    pub fn chromosome_length(&self) -> usize {
        self.num_genes * self.gene_length()
    }

    /// Nonterminals followed by terminals.
    ///
    /// Head mutation draws from this list.
    pub fn all_symbols(&self) -> Vec<Symbol> {
        self.nonterminals
            .iter()
            .chain(self.terminals.iter())
            .copied()
            .collect()
    }

    /// Whether `symbol` is a terminal.
    pub fn is_terminal(&self, symbol: Symbol) -> bool {
        self.terminals.contains(&symbol)
    }

    /// Whether `symbol` is a nonterminal.
    pub fn is_nonterminal(&self, symbol: Symbol) -> bool {
        self.nonterminals.contains(&symbol)
    }

    /// Whether chromosome position `pos` falls in a gene's head.
    pub fn is_head_position(&self, pos: usize) -> bool {
        pos % self.gene_length() < self.head_length
    }

    /// Validates the genome.
    pub fn validate(&self) -> Result<()> {
        if self.head_length == 0 {
            return Err(GepError::InvalidGenome(
                "head_length must be at least 1".into(),
            ));
        }
        if self.max_arity == 0 {
            return Err(GepError::InvalidGenome("max_arity must be at least 1".into()));
        }
        if self.num_genes == 0 {
            return Err(GepError::InvalidGenome("num_genes must be at least 1".into()));
        }
        if self.terminals.is_empty() {
            return Err(GepError::InvalidGenome("terminal set is empty".into()));
        }

        let terminals: HashSet<Symbol> = self.terminals.iter().copied().collect();
        if terminals.len() != self.terminals.len() {
            return Err(GepError::InvalidGenome("duplicate terminal symbol".into()));
        }
        let nonterminals: HashSet<Symbol> = self.nonterminals.iter().copied().collect();
        if nonterminals.len() != self.nonterminals.len() {
            return Err(GepError::InvalidGenome("duplicate nonterminal symbol".into()));
        }
        if let Some(shared) = terminals.intersection(&nonterminals).next() {
            return Err(GepError::InvalidGenome(format!(
                "symbol '{shared}' is both terminal and nonterminal"
            )));
        }
        Ok(())
    }
}

/// Operator probabilities, each in `[0, 1]`.
///
/// `mutation` applies per symbol; the others are the fraction of the
/// breeding pool an operator touches each generation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rates {
    pub mutation: f64,
    pub one_point_recombination: f64,
    pub two_point_recombination: f64,
    pub gene_recombination: f64,
    pub is_transposition: f64,
    pub ris_transposition: f64,
    pub gene_transposition: f64,
}

impl Default for Rates {
    /// Ferreira's usual settings.
    fn default() -> Self {
        Self {
            mutation: 0.044,
            one_point_recombination: 0.3,
            two_point_recombination: 0.3,
            gene_recombination: 0.1,
            is_transposition: 0.1,
            ris_transposition: 0.1,
            gene_transposition: 0.1,
        }
    }
}

impl Rates {
    /// Rates with every operator disabled.
    pub fn none() -> Self {
        Self {
            mutation: 0.0,
            one_point_recombination: 0.0,
            two_point_recombination: 0.0,
            gene_recombination: 0.0,
            is_transposition: 0.0,
            ris_transposition: 0.0,
            gene_transposition: 0.0,
        }
    }

    /// Sets the per-symbol mutation probability (clamped to [0, 1]).
    pub fn with_mutation(mut self, p: f64) -> Self {
        self.mutation = p.clamp(0.0, 1.0);
        self
    }

    /// Sets the one-point recombination rate (clamped to [0, 1]).
    pub fn with_one_point_recombination(mut self, p: f64) -> Self {
        self.one_point_recombination = p.clamp(0.0, 1.0);
        self
    }

    /// Sets the two-point recombination rate (clamped to [0, 1]).
    pub fn with_two_point_recombination(mut self, p: f64) -> Self {
        self.two_point_recombination = p.clamp(0.0, 1.0);
        self
    }

    /// Sets the gene recombination rate (clamped to [0, 1]).
    pub fn with_gene_recombination(mut self, p: f64) -> Self {
        self.gene_recombination = p.clamp(0.0, 1.0);
        self
    }

    /// Sets the IS transposition rate (clamped to [0, 1]).
    pub fn with_is_transposition(mut self, p: f64) -> Self {
        self.is_transposition = p.clamp(0.0, 1.0);
        self
    }

    /// Sets the RIS transposition rate (clamped to [0, 1]).
    pub fn with_ris_transposition(mut self, p: f64) -> Self {
        self.ris_transposition = p.clamp(0.0, 1.0);
        self
    }

    /// Sets the gene transposition rate (clamped to [0, 1]).
    pub fn with_gene_transposition(mut self, p: f64) -> Self {
        self.gene_transposition = p.clamp(0.0, 1.0);
        self
    }

    /// Validates that every rate is a finite probability.
    pub fn validate(&self) -> Result<()> {
        let named = [
            ("mutation", self.mutation),
            ("one_point_recombination", self.one_point_recombination),
            ("two_point_recombination", self.two_point_recombination),
            ("gene_recombination", self.gene_recombination),
            ("is_transposition", self.is_transposition),
            ("ris_transposition", self.ris_transposition),
            ("gene_transposition", self.gene_transposition),
        ];
        for (name, p) in named {
            if !(0.0..=1.0).contains(&p) {
                return Err(GepError::InvalidRates(format!(
                    "{name} must be in [0, 1], got {p}"
                )));
            }
        }
        Ok(())
    }
}

/// Population, fitness and termination settings.
///
/// # Builder Pattern
///
/// ```
/// use u_gep::gep::SimParams;
///
/// let params = SimParams::default()
///     .with_pop_size(30)
///     .with_num_generations(200)
///     .with_seed(42);
/// assert!(params.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimParams {
    /// Individuals per generation, elite slot included.
    pub pop_size: usize,

    /// Selection range `M` handed to the fitness function.
    pub selection_range: f64,

    /// Fitness that stops the run when hit exactly.
    pub max_fitness: f64,

    /// Generation budget.
    pub num_generations: usize,

    /// Longest IS element.
    pub max_is_len: usize,

    /// Longest RIS element.
    pub max_ris_len: usize,

    /// Exponent applied to ranks when building roulette weights.
    pub roulette_exponent: f64,

    /// Random seed. `None` draws one from the OS.
    pub seed: Option<u64>,
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            pop_size: 50,
            selection_range: 100.0,
            max_fitness: 1000.0,
            num_generations: 500,
            max_is_len: 3,
            max_ris_len: 3,
            roulette_exponent: 2.0,
            seed: None,
        }
    }
}

impl SimParams {
    /// Sets the population size.
    pub fn with_pop_size(mut self, n: usize) -> Self {
        self.pop_size = n;
        self
    }

    /// Sets the selection range `M`.
    pub fn with_selection_range(mut self, m: f64) -> Self {
        self.selection_range = m;
        self
    }

    /// Sets the target fitness.
    pub fn with_max_fitness(mut self, f: f64) -> Self {
        self.max_fitness = f;
        self
    }

    /// Sets the generation budget.
    pub fn with_num_generations(mut self, n: usize) -> Self {
        self.num_generations = n;
        self
    }

    /// Sets the longest IS element.
    pub fn with_max_is_len(mut self, n: usize) -> Self {
        self.max_is_len = n;
        self
    }

    /// Sets the longest RIS element.
    pub fn with_max_ris_len(mut self, n: usize) -> Self {
        self.max_ris_len = n;
        self
    }

    /// Sets the roulette rank exponent.
    pub fn with_roulette_exponent(mut self, e: f64) -> Self {
        self.roulette_exponent = e;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the parameters.
    pub fn validate(&self) -> Result<()> {
        if self.pop_size < 2 {
            return Err(GepError::InvalidParams("pop_size must be at least 2".into()));
        }
        if self.num_generations == 0 {
            return Err(GepError::InvalidParams(
                "num_generations must be at least 1".into(),
            ));
        }
        if self.max_is_len == 0 || self.max_ris_len == 0 {
            return Err(GepError::InvalidParams(
                "transposition lengths must be at least 1".into(),
            ));
        }
        if !self.roulette_exponent.is_finite() || self.roulette_exponent <= 0.0 {
            return Err(GepError::InvalidParams(
                "roulette_exponent must be positive and finite".into(),
            ));
        }
        if !self.selection_range.is_finite() || !self.max_fitness.is_finite() {
            return Err(GepError::InvalidParams(
                "selection_range and max_fitness must be finite".into(),
            ));
        }
        Ok(())
    }
}
