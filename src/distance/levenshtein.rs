//! Levenshtein and optimal string alignment distances.

use smallvec::SmallVec;

use super::{normalized, Comparator, ComparatorProfile, DistanceResult};
use crate::token::Token;

/// Computes the Levenshtein distance between two strings.
///
/// The minimum number of single-character insertions, deletions and
/// substitutions turning `source` into `target`, counted in Unicode scalar
/// values.
///
/// # Example
///
/// ```rust
/// use libphonetic::distance::standard_distance;
///
/// assert_eq!(standard_distance("kitten", "sitting"), 3);
/// assert_eq!(standard_distance("test", "test"), 0);
/// ```
pub fn standard_distance(source: &str, target: &str) -> usize {
    let source_chars: SmallVec<[char; 32]> = source.chars().collect();
    let target_chars: SmallVec<[char; 32]> = target.chars().collect();

    let m = source_chars.len();
    let n = target_chars.len();

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    // Two rows instead of the full matrix
    let mut prev_row: Vec<usize> = (0..=n).collect();
    let mut curr_row = vec![0; n + 1];

    for i in 1..=m {
        curr_row[0] = i;

        for j in 1..=n {
            let cost = usize::from(source_chars[i - 1] != target_chars[j - 1]);

            curr_row[j] = (prev_row[j] + 1) // deletion
                .min(curr_row[j - 1] + 1) // insertion
                .min(prev_row[j - 1] + cost); // substitution
        }

        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[n]
}

/// Computes the optimal string alignment distance.
///
/// Levenshtein distance extended with transpositions of two adjacent
/// characters. No substring is edited twice, so the result does not obey
/// the triangle inequality (`ca -> ac -> abc` is 2 edits, `ca -> abc` is 3).
///
/// # Example
///
/// ```rust
/// use libphonetic::distance::transposition_distance;
///
/// assert_eq!(transposition_distance("ab", "ba"), 1);
/// assert_eq!(transposition_distance("test", "tset"), 1);
/// ```
pub fn transposition_distance(source: &str, target: &str) -> usize {
    let source_chars: SmallVec<[char; 32]> = source.chars().collect();
    let target_chars: SmallVec<[char; 32]> = target.chars().collect();

    let m = source_chars.len();
    let n = target_chars.len();

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    // Transpositions look two rows back
    let mut two_ago = vec![0; n + 1];
    let mut prev_row: Vec<usize> = (0..=n).collect();
    let mut curr_row = vec![0; n + 1];

    for i in 1..=m {
        curr_row[0] = i;

        for j in 1..=n {
            let cost = usize::from(source_chars[i - 1] != target_chars[j - 1]);

            curr_row[j] = (prev_row[j] + 1)
                .min(curr_row[j - 1] + 1)
                .min(prev_row[j - 1] + cost);

            if i > 1
                && j > 1
                && source_chars[i - 1] == target_chars[j - 2]
                && source_chars[i - 2] == target_chars[j - 1]
            {
                curr_row[j] = curr_row[j].min(two_ago[j - 2] + 1);
            }
        }

        std::mem::swap(&mut two_ago, &mut prev_row);
        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[n]
}

/// Levenshtein distance as a comparator.
#[derive(Debug, Clone, Copy, Default)]
pub struct Levenshtein;

impl Comparator for Levenshtein {
    fn compare(&self, a: &Token, b: &Token) -> DistanceResult {
        DistanceResult::distance(standard_distance(a.as_str(), b.as_str()) as f64)
    }

    fn profile(&self) -> ComparatorProfile {
        ComparatorProfile::edit_distance(true)
    }

    fn description(&self) -> &'static str {
        "Levenshtein edit distance"
    }
}

/// Levenshtein similarity: one minus the distance divided by the length of
/// the longer input. Two empty tokens have similarity 1.
#[derive(Debug, Clone, Copy, Default)]
pub struct NormalizedLevenshtein;

impl Comparator for NormalizedLevenshtein {
    fn compare(&self, a: &Token, b: &Token) -> DistanceResult {
        if a.as_str() == b.as_str() {
            return DistanceResult::similarity(1.0);
        }
        let d = standard_distance(a.as_str(), b.as_str()) as f64;
        DistanceResult::similarity(1.0 - normalized(d, a.char_len(), b.char_len(), 1.0))
    }

    fn profile(&self) -> ComparatorProfile {
        ComparatorProfile::unit_similarity()
    }

    fn description(&self) -> &'static str {
        "Levenshtein similarity normalized to [0, 1]"
    }
}

/// Optimal string alignment distance as a comparator. Not a metric.
#[derive(Debug, Clone, Copy, Default)]
pub struct DamerauOsa;

impl Comparator for DamerauOsa {
    fn compare(&self, a: &Token, b: &Token) -> DistanceResult {
        DistanceResult::distance(transposition_distance(a.as_str(), b.as_str()) as f64)
    }

    fn profile(&self) -> ComparatorProfile {
        ComparatorProfile::edit_distance(false)
    }

    fn description(&self) -> &'static str {
        "Damerau-Levenshtein distance (optimal string alignment)"
    }
}
