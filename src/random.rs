//! Deterministic random stream.
//!
//! Every stochastic function in this crate takes `&mut R where R: Rng` and
//! draws from it in a fixed order, so a seeded generator reproduces a run
//! exactly. [`create_rng`] returns a ChaCha8 generator, whose output is
//! stable across platforms and `rand` releases.
//!
//! Indices are zero-based throughout.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Generator type used by [`crate::gep::GepRunner`].
pub type GepRng = ChaCha8Rng;

/// Creates a seeded generator.
///
/// # Examples
///
/// ```
/// use rand::Rng;
/// use u_gep::random::create_rng;
///
/// let a: u64 = create_rng(7).random();
/// let b: u64 = create_rng(7).random();
/// assert_eq!(a, b);
/// ```
pub fn create_rng(seed: u64) -> GepRng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Uniform integer in the inclusive range `[lo, hi]`.
///
/// # Panics
/// Panics if `lo > hi`.
pub fn uniform_int<R: Rng>(rng: &mut R, lo: usize, hi: usize) -> usize {
    assert!(lo <= hi, "empty range [{lo}, {hi}]");
    rng.random_range(lo..=hi)
}

/// Uniform real in `[0, 1)`.
pub fn uniform_unit<R: Rng>(rng: &mut R) -> f64 {
    rng.random::<f64>()
}

/// Samples `k` distinct indices from `0..n` without replacement.
///
/// The result is sorted ascending, ready for [`crate::gep::splice`].
/// `k` is clamped to `n`.
pub fn sample_unique<R: Rng>(rng: &mut R, n: usize, k: usize) -> Vec<usize> {
    let k = k.min(n);
    if k == 0 {
        return Vec::new();
    }
    let mut chosen = rand::seq::index::sample(rng, n, k).into_vec();
    chosen.sort_unstable();
    chosen
}

/// Partitions a shuffled `0..n` into disjoint pairs.
///
/// Returns `n / 2` pairs; with odd `n` one index is left unpaired.
/// Every index appears in at most one pair.
pub fn random_pairs<R: Rng>(rng: &mut R, n: usize) -> Vec<(usize, usize)> {
    let mut order: Vec<usize> = (0..n).collect();
    order.shuffle(rng);
    order
        .chunks_exact(2)
        .map(|pair| (pair[0], pair[1]))
        .collect()
}
