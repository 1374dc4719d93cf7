//! Arithmetic expression trees decoded from Karva notation.

use crate::error::{GepError, Result};
use crate::gep::{Genome, Symbol, TestInput};
use std::fmt;

/// Binary arithmetic operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Add,
    Sub,
    Mul,
    /// Unprotected division: `x / 0` yields an infinite or NaN result.
    Div,
}

impl Op {
    /// Maps `+ - * /` to operators.
    pub fn from_symbol(symbol: Symbol) -> Option<Self> {
        match symbol {
            '+' => Some(Op::Add),
            '-' => Some(Op::Sub),
            '*' => Some(Op::Mul),
            '/' => Some(Op::Div),
            _ => None,
        }
    }

    pub fn symbol(self) -> Symbol {
        match self {
            Op::Add => '+',
            Op::Sub => '-',
            Op::Mul => '*',
            Op::Div => '/',
        }
    }

    pub fn apply(self, a: f64, b: f64) -> f64 {
        match self {
            Op::Add => a + b,
            Op::Sub => a - b,
            Op::Mul => a * b,
            Op::Div => a / b,
        }
    }
}

/// Expression tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Variable looked up in the test input.
    Var(Symbol),
    Binary(Op, Box<Expr>, Box<Expr>),
}

impl Expr {
    /// Evaluates against terminal bindings.
    ///
    /// Unbound variables evaluate to NaN.
    pub fn evaluate(&self, input: &TestInput<f64>) -> f64 {
        match self {
            Expr::Var(s) => input.get(s).copied().unwrap_or(f64::NAN),
            Expr::Binary(op, a, b) => op.apply(a.evaluate(input), b.evaluate(input)),
        }
    }

    /// Number of nodes.
    pub fn size(&self) -> usize {
        match self {
            Expr::Var(_) => 1,
            Expr::Binary(_, a, b) => 1 + a.size() + b.size(),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Var(s) => write!(f, "{s}"),
            Expr::Binary(op, a, b) => write!(f, "({a} {} {b})", op.symbol()),
        }
    }
}

/// Decodes one gene read breadth-first (Karva notation).
///
/// Only the open reading frame is used; symbols past it are ignored.
pub fn decode_gene(gene: &[Symbol]) -> Result<Expr> {
    if gene.is_empty() {
        return Err(GepError::MalformedExpression("empty gene".into()));
    }

    // children[i] lists the arena indices of node i's arguments.
    let mut children: Vec<Vec<usize>> = Vec::new();
    let mut next = 1;
    let mut i = 0;
    while i < next {
        let arity = if Op::from_symbol(gene[i]).is_some() { 2 } else { 0 };
        if next + arity > gene.len() {
            return Err(GepError::MalformedExpression(format!(
                "gene '{}' ends before its open reading frame closes",
                gene.iter().collect::<String>()
            )));
        }
        children.push((next..next + arity).collect());
        next += arity;
        i += 1;
    }

    Ok(build(gene, &children, 0))
}

fn build(gene: &[Symbol], children: &[Vec<usize>], node: usize) -> Expr {
    match (Op::from_symbol(gene[node]), children[node].as_slice()) {
        (Some(op), &[a, b]) => Expr::Binary(
            op,
            Box::new(build(gene, children, a)),
            Box::new(build(gene, children, b)),
        ),
        _ => Expr::Var(gene[node]),
    }
}

/// Decodes every gene and joins them left to right with the genome's
/// connector.
pub fn express(chromosome: &[Symbol], genome: &Genome) -> Result<Expr> {
    let connector = Op::from_symbol(genome.gene_connector).ok_or_else(|| {
        GepError::MalformedExpression(format!(
            "gene connector '{}' is not an arithmetic operator",
            genome.gene_connector
        ))
    })?;

    let mut genes = chromosome.chunks(genome.gene_length()).map(decode_gene);
    let first = genes
        .next()
        .ok_or_else(|| GepError::MalformedExpression("empty chromosome".into()))??;
    genes.try_fold(first, |acc, gene| -> Result<Expr> {
        Ok(Expr::Binary(connector, Box::new(acc), Box::new(gene?)))
    })
}
