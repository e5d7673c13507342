//! Editex, an edit distance aware of letter sound groups.
//!
//! Substituting a letter by one of its phonetic group (`D`/`T`, `M`/`N`,
//! ...) costs less than an arbitrary substitution, and deleting a silent
//! `H` or `W` costs less than deleting any other letter.

use unicode_normalization::UnicodeNormalization;

use super::{normalized, Comparator, ComparatorProfile, DistanceResult, Direction, ScoreRange};
use crate::token::Token;

const MATCH: u64 = 0;
const GROUP: u64 = 1;
const MISMATCH: u64 = 2;

const LETTER_GROUPS: &[&str] = &[
    "AEIOUY", "BP", "CKQ", "DT", "LR", "MN", "GJ", "FPV", "SXZ", "CSZ",
];

// H and W belong to no group.
const GROUPED_LETTERS: &str = "ABCDEFGIJKLMNOPQRSTUVXYZ";

fn r_cost(a: char, b: char) -> u64 {
    if a == b {
        return MATCH;
    }
    if GROUPED_LETTERS.contains(a)
        && GROUPED_LETTERS.contains(b)
        && LETTER_GROUPS.iter().any(|g| g.contains(a) && g.contains(b))
    {
        return GROUP;
    }
    MISMATCH
}

fn d_cost(previous: char, current: char) -> u64 {
    if previous != current && matches!(previous, 'H' | 'W') {
        return GROUP;
    }
    r_cost(previous, current)
}

fn prepare(word: &str) -> Vec<char> {
    word.to_uppercase().nfkd().collect()
}

fn editex_chars(src: &[char], tar: &[char], local: bool) -> u64 {
    if src == tar {
        return 0;
    }
    if src.is_empty() {
        return tar.len() as u64 * MISMATCH;
    }
    if tar.is_empty() {
        return src.len() as u64 * MISMATCH;
    }

    let (m, n) = (src.len(), tar.len());
    // Index 0 of each word is a space so that d_cost(s[i - 1], s[i]) is
    // defined for the first letter.
    let s: Vec<char> = std::iter::once(' ').chain(src.iter().copied()).collect();
    let t: Vec<char> = std::iter::once(' ').chain(tar.iter().copied()).collect();

    let width = n + 1;
    let mut d = vec![0u64; (m + 1) * width];
    if !local {
        for i in 1..=m {
            d[i * width] = d[(i - 1) * width] + d_cost(s[i - 1], s[i]);
        }
    }
    for j in 1..=n {
        d[j] = d[j - 1] + d_cost(t[j - 1], t[j]);
    }
    for i in 1..=m {
        for j in 1..=n {
            let delete = d[(i - 1) * width + j] + d_cost(s[i - 1], s[i]);
            let insert = d[i * width + j - 1] + d_cost(t[j - 1], t[j]);
            let substitute = d[(i - 1) * width + j - 1] + r_cost(s[i], t[j]);
            d[i * width + j] = delete.min(insert).min(substitute);
        }
    }
    d[m * width + n]
}

/// Computes the Editex distance between two strings.
///
/// Both strings are uppercased and compatibility-decomposed first. Costs
/// are 0 for a match, 1 within a letter group and 2 otherwise. The local
/// variant does not charge for deleting a prefix of `src`.
///
/// ```rust
/// use libphonetic::distance::editex;
///
/// assert_eq!(editex("cat", "hat", false), 2);
/// assert_eq!(editex("Niall", "Neil", false), 2);
/// assert_eq!(editex("aluminum", "Catalan", false), 12);
/// ```
pub fn editex(src: &str, tar: &str, local: bool) -> u64 {
    editex_chars(&prepare(src), &prepare(tar), local)
}

/// Editex distance as a comparator.
#[derive(Debug, Clone, Copy, Default)]
pub struct Editex {
    local: bool,
}

impl Editex {
    /// The global Editex distance.
    pub fn new() -> Self {
        Self { local: false }
    }

    /// The local variant. It is not symmetric.
    pub fn local() -> Self {
        Self { local: true }
    }
}

impl Comparator for Editex {
    fn compare(&self, a: &Token, b: &Token) -> DistanceResult {
        DistanceResult::distance(editex(a.as_str(), b.as_str(), self.local) as f64)
    }

    fn profile(&self) -> ComparatorProfile {
        ComparatorProfile {
            direction: Direction::Distance,
            range: ScoreRange::NON_NEGATIVE,
            identity: 0.0,
            symmetric: !self.local,
            metric: false,
        }
    }

    fn description(&self) -> &'static str {
        if self.local {
            "Editex distance, local variant"
        } else {
            "Editex phonetic edit distance"
        }
    }
}

/// Editex similarity in `[0, 1]`.
///
/// One minus the Editex distance divided by twice the length of the longer
/// (decomposed) input.
#[derive(Debug, Clone, Copy, Default)]
pub struct EditexSimilarity;

impl Comparator for EditexSimilarity {
    fn compare(&self, a: &Token, b: &Token) -> DistanceResult {
        let src = prepare(a.as_str());
        let tar = prepare(b.as_str());
        let cost = editex_chars(&src, &tar, false) as f64;
        DistanceResult::similarity(1.0 - normalized(cost, src.len(), tar.len(), MISMATCH as f64))
    }

    fn profile(&self) -> ComparatorProfile {
        ComparatorProfile::unit_similarity()
    }

    fn description(&self) -> &'static str {
        "Editex similarity normalized to [0, 1]"
    }
}
