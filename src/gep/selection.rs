//! Rank-weighted roulette selection.
//!
//! The breeding pool is ranked best first; rank `i` (zero-based) of `n` gets
//! weight `(n - i)^exponent`. Larger exponents concentrate selection on the
//! top ranks. Sampling is with replacement, one uniform draw per pick.
//!
//! # References
//!
//! - Baker (1985), "Adaptive Selection Methods for Genetic Algorithms"
//! - Goldberg & Deb (1991), "A Comparative Analysis of Selection Schemes
//!   Used in Genetic Algorithms"

use crate::random::uniform_unit;
use rand::Rng;

/// Roulette weights for `n` ranked individuals.
///
/// Strictly decreasing for any positive `exponent`.
///
/// ```
/// use u_gep::gep::rank_weights;
///
/// assert_eq!(rank_weights(3, 2.0), vec![9.0, 4.0, 1.0]);
/// ```
pub fn rank_weights(n: usize, exponent: f64) -> Vec<f64> {
    (0..n).map(|i| ((n - i) as f64).powf(exponent)).collect()
}

/// Draws `k` indices with replacement, index `i` with probability
/// proportional to `weights[i]`.
///
/// Each pick inverts the cumulative weights against a fresh uniform draw.
/// If every weight is zero the picks are uniform.
///
/// # Panics
/// Panics if `weights` is empty and `k > 0`.
pub fn roulette_sample<R: Rng>(weights: &[f64], k: usize, rng: &mut R) -> Vec<usize> {
    if k == 0 {
        return Vec::new();
    }
    assert!(!weights.is_empty(), "cannot select from empty population");

    let total: f64 = weights.iter().sum();
    (0..k).map(|_| spin(weights, total, rng)).collect()
}

fn spin<R: Rng>(weights: &[f64], total: f64, rng: &mut R) -> usize {
    let n = weights.len();
    let u = uniform_unit(rng);
    if total <= 0.0 {
        return ((u * n as f64) as usize).min(n - 1);
    }

    let threshold = u * total;
    let mut cumulative = 0.0;
    for (i, &w) in weights.iter().enumerate() {
        cumulative += w;
        if cumulative > threshold {
            return i;
        }
    }

    n - 1 // floating-point fallback
}
