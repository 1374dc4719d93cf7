//! GEP genetic operators.
//!
//! Every operator is length-preserving and keeps tails terminal-only: head
//! positions may receive any symbol, tail positions only terminals. Operators
//! return fresh chromosomes; inputs are never modified.
//!
//! # Mutation
//!
//! - [`mutate`]: per-symbol point mutation respecting head/tail alphabets
//!
//! # Transposition
//!
//! - [`is_transpose`]: insertion sequence copied from a tail into a head
//! - [`ris_transpose`]: root insertion sequence starting at a nonterminal
//! - [`gene_transpose`]: whole gene moved to the front
//!
//! # Recombination
//!
//! - [`one_point_recombine`], [`two_point_recombine`], [`gene_recombine`]
//!
//! # References
//!
//! - Ferreira (2001), "Gene Expression Programming: A New Adaptive Algorithm
//!   for Solving Problems", *Complex Systems* 13(2), 87–129

use super::config::Genome;
use super::types::{Chromosome, Population, Symbol};
use crate::random::{uniform_int, uniform_unit};
use rand::Rng;

// ============================================================================
// Creation
// ============================================================================

/// Creates a random chromosome: heads from the full alphabet, tails from
/// terminals.
pub fn random_chromosome<R: Rng>(genome: &Genome, rng: &mut R) -> Chromosome {
    let alphabet = genome.all_symbols();
    (0..genome.chromosome_length())
        .map(|pos| {
            if genome.is_head_position(pos) {
                pick(&alphabet, rng)
            } else {
                pick(&genome.terminals, rng)
            }
        })
        .collect()
}

/// Creates `n` random chromosomes.
pub fn random_population<R: Rng>(genome: &Genome, n: usize, rng: &mut R) -> Population {
    (0..n).map(|_| random_chromosome(genome, rng)).collect()
}

// ============================================================================
// Mutation
// ============================================================================

/// Point mutation.
///
/// Each position is replaced with probability `rate`; one uniform draw per
/// position, plus one symbol draw per replacement.
pub fn mutate<R: Rng>(chromosome: &[Symbol], genome: &Genome, rate: f64, rng: &mut R) -> Chromosome {
    let alphabet = genome.all_symbols();
    chromosome
        .iter()
        .enumerate()
        .map(|(pos, &symbol)| {
            if uniform_unit(rng) >= rate {
                symbol
            } else if genome.is_head_position(pos) {
                pick(&alphabet, rng)
            } else {
                pick(&genome.terminals, rng)
            }
        })
        .collect()
}

// ============================================================================
// Transposition
// ============================================================================

/// IS transposition.
///
/// Copies a run of at most `max_len` symbols from a random gene's tail and
/// inserts it into a random gene's head after the root. Head symbols past the
/// insertion shift right; whatever overflows the head is dropped.
///
/// Heads of length 1 have no insertion point; the chromosome is returned
/// unchanged without drawing.
pub fn is_transpose<R: Rng>(
    chromosome: &[Symbol],
    genome: &Genome,
    max_len: usize,
    rng: &mut R,
) -> Chromosome {
    let h = genome.head_length;
    let gl = genome.gene_length();
    let mut out = chromosome.to_vec();
    if h < 2 {
        return out;
    }

    let src_gene = uniform_int(rng, 0, genome.num_genes - 1);
    let start = uniform_int(rng, h, gl - 1);
    let len = uniform_int(rng, 1, max_len.max(1).min(gl - start));
    let src = src_gene * gl + start;
    let element = &chromosome[src..src + len];

    let dst_gene = uniform_int(rng, 0, genome.num_genes - 1);
    let point = uniform_int(rng, 1, h - 1);
    let head = dst_gene * gl;
    insert_into_head(&mut out[head..head + h], &chromosome[head..head + h], element, point);
    out
}

/// RIS transposition.
///
/// Picks a nonterminal in a random gene's head and moves the run starting
/// there (at most `max_len` symbols, clipped to the head) to the head's
/// front.
///
/// The gene is drawn before any nonterminal is looked for. If the drawn
/// gene's head holds no nonterminal, the chromosome is returned unchanged,
/// even when another gene's head has one.
pub fn ris_transpose<R: Rng>(
    chromosome: &[Symbol],
    genome: &Genome,
    max_len: usize,
    rng: &mut R,
) -> Chromosome {
    let h = genome.head_length;
    let gl = genome.gene_length();
    let mut out = chromosome.to_vec();

    let gene = uniform_int(rng, 0, genome.num_genes - 1);
    let head = gene * gl;
    let roots: Vec<usize> = (0..h)
        .filter(|&i| genome.is_nonterminal(chromosome[head + i]))
        .collect();
    if roots.is_empty() {
        return out;
    }

    let pos = roots[uniform_int(rng, 0, roots.len() - 1)];
    let len = uniform_int(rng, 1, max_len.max(1).min(h - pos));
    let element = &chromosome[head + pos..head + pos + len];
    insert_into_head(&mut out[head..head + h], &chromosome[head..head + h], element, 0);
    out
}

/// Gene transposition: a random non-first gene moves to the front and the
/// genes before it shift back one slot.
///
/// Single-gene chromosomes are returned unchanged without drawing.
pub fn gene_transpose<R: Rng>(chromosome: &[Symbol], genome: &Genome, rng: &mut R) -> Chromosome {
    let mut out = chromosome.to_vec();
    if genome.num_genes < 2 {
        return out;
    }
    let gl = genome.gene_length();
    let gene = uniform_int(rng, 1, genome.num_genes - 1);
    out[..(gene + 1) * gl].rotate_right(gl);
    out
}

// ============================================================================
// Recombination
// ============================================================================

/// One-point recombination.
///
/// Both children swap everything from a shared cut point onward.
///
/// # Panics
/// Panics if parents have different lengths.
pub fn one_point_recombine<R: Rng>(
    parent1: &[Symbol],
    parent2: &[Symbol],
    rng: &mut R,
) -> (Chromosome, Chromosome) {
    let n = parent1.len();
    assert_eq!(n, parent2.len(), "parents must have equal length");
    let mut c1 = parent1.to_vec();
    let mut c2 = parent2.to_vec();
    if n < 2 {
        return (c1, c2);
    }

    let cut = uniform_int(rng, 1, n - 1);
    c1[cut..].swap_with_slice(&mut c2[cut..]);
    (c1, c2)
}

/// Two-point recombination.
///
/// Both children swap the segment between two shared cut points.
///
/// # Panics
/// Panics if parents have different lengths.
pub fn two_point_recombine<R: Rng>(
    parent1: &[Symbol],
    parent2: &[Symbol],
    rng: &mut R,
) -> (Chromosome, Chromosome) {
    let n = parent1.len();
    assert_eq!(n, parent2.len(), "parents must have equal length");
    let mut c1 = parent1.to_vec();
    let mut c2 = parent2.to_vec();

    let a = uniform_int(rng, 0, n);
    let b = uniform_int(rng, 0, n);
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    c1[lo..hi].swap_with_slice(&mut c2[lo..hi]);
    (c1, c2)
}

/// Gene recombination: one randomly chosen gene is exchanged whole.
///
/// # Panics
/// Panics if parents have different lengths.
pub fn gene_recombine<R: Rng>(
    parent1: &[Symbol],
    parent2: &[Symbol],
    genome: &Genome,
    rng: &mut R,
) -> (Chromosome, Chromosome) {
    assert_eq!(parent1.len(), parent2.len(), "parents must have equal length");
    let gl = genome.gene_length();
    let mut c1 = parent1.to_vec();
    let mut c2 = parent2.to_vec();

    let gene = uniform_int(rng, 0, genome.num_genes - 1);
    let range = gene * gl..(gene + 1) * gl;
    c1[range.clone()].swap_with_slice(&mut c2[range]);
    (c1, c2)
}

// ============================================================================
// Helpers
// ============================================================================

fn pick<R: Rng>(symbols: &[Symbol], rng: &mut R) -> Symbol {
    symbols[uniform_int(rng, 0, symbols.len() - 1)]
}

/// Writes `original` into `head` with `element` inserted at `point`,
/// truncated to the head length.
fn insert_into_head(head: &mut [Symbol], original: &[Symbol], element: &[Symbol], point: usize) {
    let shifted = original[..point]
        .iter()
        .chain(element)
        .chain(&original[point..]);
    for (slot, &symbol) in head.iter_mut().zip(shifted) {
        *slot = symbol;
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    fn genome() -> Genome {
        Genome::new(vec!['a', 'b'], vec!['+', '-', '*', '/'], '+', 2, 5, 3)
    }

    fn tails_terminal(chromosome: &[Symbol], genome: &Genome) -> bool {
        chromosome
            .iter()
            .enumerate()
            .filter(|(pos, _)| !genome.is_head_position(*pos))
            .all(|(_, &s)| genome.is_terminal(s))
    }

    fn genes(chromosome: &[Symbol], genome: &Genome) -> Vec<String> {
        chromosome
            .chunks(genome.gene_length())
            .map(|g| g.iter().collect())
            .collect()
    }

    // ---- Creation ----

    #[test]
    fn test_random_chromosome_shape() {
        let g = genome();
        let mut rng = create_rng(42);
        for _ in 0..50 {
            let c = random_chromosome(&g, &mut rng);
            assert_eq!(c.len(), g.chromosome_length());
            assert!(tails_terminal(&c, &g), "tail holds a nonterminal: {c:?}");
        }
    }

    #[test]
    fn test_random_population_size() {
        let g = genome();
        let mut rng = create_rng(42);
        assert_eq!(random_population(&g, 12, &mut rng).len(), 12);
    }

    // ---- Mutation ----

    #[test]
    fn test_mutate_zero_rate_is_identity() {
        let g = genome();
        let mut rng = create_rng(42);
        let c = random_chromosome(&g, &mut rng);
        assert_eq!(mutate(&c, &g, 0.0, &mut rng), c);
    }

    #[test]
    fn test_mutate_full_rate_keeps_tails_terminal() {
        let g = genome();
        let mut rng = create_rng(7);
        let c = random_chromosome(&g, &mut rng);
        for _ in 0..50 {
            let m = mutate(&c, &g, 1.0, &mut rng);
            assert_eq!(m.len(), c.len());
            assert!(tails_terminal(&m, &g));
        }
    }

    // ---- IS ----

    #[test]
    fn test_is_transpose_preserves_tails() {
        let g = genome();
        let mut rng = create_rng(42);
        for _ in 0..100 {
            let c = random_chromosome(&g, &mut rng);
            let t = is_transpose(&c, &g, 3, &mut rng);
            assert_eq!(t.len(), c.len());
            // Tails are never written.
            for pos in (0..c.len()).filter(|&p| !g.is_head_position(p)) {
                assert_eq!(t[pos], c[pos]);
            }
        }
    }

    #[test]
    fn test_is_transpose_keeps_roots() {
        let g = genome();
        let mut rng = create_rng(3);
        for _ in 0..100 {
            let c = random_chromosome(&g, &mut rng);
            let t = is_transpose(&c, &g, 3, &mut rng);
            for gene in 0..g.num_genes {
                let root = gene * g.gene_length();
                assert_eq!(t[root], c[root], "IS must not touch position 0");
            }
        }
    }

    #[test]
    fn test_is_transpose_single_head_unchanged() {
        let g = Genome::new(vec!['a'], vec!['+'], '+', 2, 1, 2);
        let mut rng = create_rng(42);
        let c: Chromosome = "+aa+aa".chars().collect();
        assert_eq!(is_transpose(&c, &g, 3, &mut rng), c);
    }

    // ---- RIS ----

    #[test]
    fn test_ris_transpose_starts_with_nonterminal() {
        let g = Genome::new(vec!['a', 'b'], vec!['+', '*'], '+', 2, 5, 1);
        let mut rng = create_rng(42);
        let c: Chromosome = "ab*+aababab".chars().collect();
        for _ in 0..50 {
            let t = ris_transpose(&c, &g, 3, &mut rng);
            assert_eq!(t.len(), c.len());
            assert!(g.is_nonterminal(t[0]), "root should be a function: {t:?}");
            assert_eq!(&t[5..], &c[5..]);
        }
    }

    #[test]
    fn test_ris_transpose_without_nonterminal_unchanged() {
        let g = Genome::new(vec!['a', 'b'], vec!['+'], '+', 2, 3, 1);
        let mut rng = create_rng(42);
        let c: Chromosome = "abaabab".chars().collect();
        assert_eq!(ris_transpose(&c, &g, 2, &mut rng), c);
    }

    #[test]
    fn test_ris_transpose_draws_gene_first() {
        // Gene 0 has a '+' root, gene 1's head is all terminals. Drawing gene 1
        // is a no-op; drawing gene 0 always rewrites its head.
        let g = Genome::new(vec!['a', 'b'], vec!['+'], '+', 2, 3, 2);
        let mut rng = create_rng(42);
        let c: Chromosome = "+aabbbbabababa".chars().collect();

        let mut unchanged = 0;
        for _ in 0..200 {
            let t = ris_transpose(&c, &g, 2, &mut rng);
            assert_eq!(&t[7..], &c[7..], "gene 1 must never change");
            if t == c {
                unchanged += 1;
            }
        }
        assert!(unchanged > 0 && unchanged < 200, "unchanged: {unchanged}");
    }

    #[test]
    fn test_ris_transpose_full_head_shift() {
        // Only nonterminal is at head position 3; with max_len 1 the result is
        // deterministic: '*' prepended, last head symbol dropped.
        let g = Genome::new(vec!['a', 'b'], vec!['*'], '+', 2, 4, 1);
        let mut rng = create_rng(42);
        let c: Chromosome = "aba*bbbab".chars().collect();
        let t = ris_transpose(&c, &g, 1, &mut rng);
        let expected: Chromosome = "*ababbbab".chars().collect();
        assert_eq!(t, expected);
    }

    // ---- Gene transposition ----

    #[test]
    fn test_gene_transpose_moves_gene_to_front() {
        let g = Genome::new(vec!['a', 'b'], vec!['+'], '+', 2, 1, 3);
        let mut rng = create_rng(42);
        let c: Chromosome = "+ab-aa*bb".chars().collect();
        for _ in 0..20 {
            let t = gene_transpose(&c, &g, &mut rng);
            let got = genes(&t, &g);
            assert!(
                got == ["-aa", "+ab", "*bb"] || got == ["*bb", "+ab", "-aa"],
                "unexpected gene order: {got:?}"
            );
        }
    }

    #[test]
    fn test_gene_transpose_single_gene_unchanged() {
        let g = Genome::new(vec!['a'], vec!['+'], '+', 2, 2, 1);
        let mut rng = create_rng(42);
        let c: Chromosome = "+aaaa".chars().collect();
        assert_eq!(gene_transpose(&c, &g, &mut rng), c);
    }

    // ---- Recombination ----

    #[test]
    fn test_one_point_recombine_complementary() {
        let mut rng = create_rng(42);
        let p1: Chromosome = "AAAAAAAA".chars().collect();
        let p2: Chromosome = "BBBBBBBB".chars().collect();
        for _ in 0..50 {
            let (c1, c2) = one_point_recombine(&p1, &p2, &mut rng);
            assert_eq!(c1.len(), 8);
            assert_eq!(c2.len(), 8);
            assert_eq!(c1[0], 'A');
            assert_eq!(c2[0], 'B');
            assert_eq!(c1[7], 'B');
            for i in 0..8 {
                assert_ne!(c1[i], c2[i]);
            }
        }
    }

    #[test]
    fn test_two_point_recombine_single_segment() {
        let mut rng = create_rng(42);
        let p1: Chromosome = "AAAAAAAA".chars().collect();
        let p2: Chromosome = "BBBBBBBB".chars().collect();
        for _ in 0..50 {
            let (c1, c2) = two_point_recombine(&p1, &p2, &mut rng);
            for i in 0..8 {
                assert_ne!(c1[i], c2[i]);
            }
            // At most two switches between 'A' and 'B' runs in child 1.
            let switches = c1.windows(2).filter(|w| w[0] != w[1]).count();
            assert!(switches <= 2, "{c1:?}");
        }
    }

    #[test]
    fn test_gene_recombine_swaps_whole_gene() {
        let g = Genome::new(vec!['a', 'b'], vec!['+'], '+', 2, 1, 3);
        let mut rng = create_rng(42);
        let p1: Chromosome = "+aa+aa+aa".chars().collect();
        let p2: Chromosome = "+bb+bb+bb".chars().collect();
        let (c1, c2) = gene_recombine(&p1, &p2, &g, &mut rng);

        let g1 = genes(&c1, &g);
        let g2 = genes(&c2, &g);
        assert_eq!(g1.iter().filter(|s| *s == "+bb").count(), 1);
        assert_eq!(g2.iter().filter(|s| *s == "+aa").count(), 1);
        let swapped = g1.iter().position(|s| s == "+bb");
        assert_eq!(swapped, g2.iter().position(|s| s == "+aa"));
    }

    #[test]
    #[should_panic(expected = "parents must have equal length")]
    fn test_recombine_unequal_panics() {
        let mut rng = create_rng(42);
        one_point_recombine(&['a', 'b'], &['a'], &mut rng);
    }
}
