//! Index splice: putting a partially modified subpopulation back together.

use crate::error::{GepError, Result};

/// Replaces the elements at `indices` with `replacements`, leaving every
/// other position untouched.
///
/// `indices` must be strictly ascending and parallel to `replacements`. The
/// output always has the length of `original`; malformed index lists are
/// rejected instead of producing a shorter sequence.
///
/// # Examples
///
/// ```
/// use u_gep::gep::splice;
///
/// let merged = splice(&['A', 'B', 'C', 'D'], &[1, 3], vec!['X', 'Y']).unwrap();
/// assert_eq!(merged, vec!['A', 'X', 'C', 'Y']);
/// ```
pub fn splice<T: Clone>(original: &[T], indices: &[usize], replacements: Vec<T>) -> Result<Vec<T>> {
    if indices.len() != replacements.len() {
        return Err(GepError::LengthMismatch {
            indices: indices.len(),
            replacements: replacements.len(),
        });
    }
    if indices.windows(2).any(|w| w[0] >= w[1]) {
        return Err(GepError::UnsortedIndices);
    }
    if let Some(&index) = indices.last().filter(|&&i| i >= original.len()) {
        return Err(GepError::IndexOutOfRange {
            index,
            len: original.len(),
        });
    }

    let mut pending = indices.iter().copied().zip(replacements).peekable();
    let merged = original
        .iter()
        .enumerate()
        .map(|(pos, item)| match pending.next_if(|(index, _)| *index == pos) {
            Some((_, replacement)) => replacement,
            None => item.clone(),
        })
        .collect();
    Ok(merged)
}
