//! Pairwise string comparators.
//!
//! A comparator scores a pair of tokens. Every comparator declares a
//! [`ComparatorProfile`]: whether larger values mean "more alike"
//! ([`Direction::Similarity`]) or "further apart" ([`Direction::Distance`]),
//! the range of its values, the value it gives identical inputs, and
//! whether it is symmetric and a true metric.
//!
//! # Comparators
//!
//! | Comparator | Direction | Range | Identity |
//! |------------|-----------|-------|----------|
//! | [`Levenshtein`] | distance | `[0, inf)` | 0 |
//! | [`NormalizedLevenshtein`] | similarity | `[0, 1]` | 1 |
//! | [`DamerauOsa`] | distance | `[0, inf)` | 0 |
//! | [`Editex`] | distance | `[0, inf)` | 0 |
//! | [`EditexSimilarity`] | similarity | `[0, 1]` | 1 |
//! | [`MraRating`] | similarity | `[0, 6]` | 6 |
//! | [`MraSimilarity`] | similarity | `[0, 1]` | 1 |
//! | [`Typo`] | distance | `[0, inf)` | 0 |
//! | [`TypoSimilarity`] | similarity | `[0, 1]` | 1 |
//!
//! Results are bit-for-bit deterministic: no comparator iterates an
//! unordered container or reorders its floating-point accumulation.
//!
//! # Example
//!
//! ```rust
//! use libphonetic::distance::{Comparator, Levenshtein};
//! use libphonetic::token::Token;
//!
//! let result = Levenshtein.compare(&Token::raw("kitten"), &Token::raw("sitting"));
//! assert_eq!(result.value, 3.0);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::token::Token;

mod editex;
mod levenshtein;
mod mra;
mod typo;

pub use editex::{editex, Editex, EditexSimilarity};
pub use levenshtein::{
    standard_distance, transposition_distance, DamerauOsa, Levenshtein, NormalizedLevenshtein,
};
pub use mra::{mra_compare, MraRating, MraSimilarity};
pub use typo::{typo, KeyboardLayout, KeyboardMetric, Typo, TypoSimilarity};

/// Whether larger values mean closer or further apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Larger values mean the inputs are further apart.
    Distance,
    /// Larger values mean the inputs are more alike.
    Similarity,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Distance => f.write_str("distance"),
            Direction::Similarity => f.write_str("similarity"),
        }
    }
}

/// The closed range `[min, max]`, or `[min, inf)` when `max` is `None`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreRange {
    /// Smallest possible value.
    pub min: f64,
    /// Largest possible value, if bounded.
    pub max: Option<f64>,
}

impl ScoreRange {
    /// `[0, inf)`.
    pub const NON_NEGATIVE: ScoreRange = ScoreRange { min: 0.0, max: None };

    /// `[0, 1]`.
    pub const UNIT: ScoreRange = ScoreRange {
        min: 0.0,
        max: Some(1.0),
    };

    /// `[min, max]`.
    pub const fn bounded(min: f64, max: f64) -> Self {
        ScoreRange {
            min,
            max: Some(max),
        }
    }

    /// Returns true if `value` is finite and lies in the range.
    pub fn contains(&self, value: f64) -> bool {
        value.is_finite() && value >= self.min && self.max.map_or(true, |max| value <= max)
    }
}

impl fmt::Display for ScoreRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.max {
            Some(max) => write!(f, "[{}, {}]", self.min, max),
            None => write!(f, "[{}, inf)", self.min),
        }
    }
}

/// The declared behaviour of a comparator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComparatorProfile {
    /// Meaning of larger values.
    pub direction: Direction,
    /// Range of every returned value.
    pub range: ScoreRange,
    /// Value of `compare(a, a)` for every `a`.
    pub identity: f64,
    /// `compare(a, b) == compare(b, a)` bit for bit.
    pub symmetric: bool,
    /// Satisfies the triangle inequality.
    pub metric: bool,
}

impl ComparatorProfile {
    /// Profile of an unbounded edit distance.
    pub const fn edit_distance(metric: bool) -> Self {
        ComparatorProfile {
            direction: Direction::Distance,
            range: ScoreRange::NON_NEGATIVE,
            identity: 0.0,
            symmetric: true,
            metric,
        }
    }

    /// Profile of a similarity normalized to `[0, 1]`.
    pub const fn unit_similarity() -> Self {
        ComparatorProfile {
            direction: Direction::Similarity,
            range: ScoreRange::UNIT,
            identity: 1.0,
            symmetric: true,
            metric: false,
        }
    }
}

/// A score together with its direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceResult {
    /// The score.
    pub value: f64,
    /// Meaning of larger scores.
    pub direction: Direction,
}

impl DistanceResult {
    /// A distance score.
    #[inline]
    pub fn distance(value: f64) -> Self {
        DistanceResult {
            value,
            direction: Direction::Distance,
        }
    }

    /// A similarity score.
    #[inline]
    pub fn similarity(value: f64) -> Self {
        DistanceResult {
            value,
            direction: Direction::Similarity,
        }
    }
}

impl fmt::Display for DistanceResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.value, self.direction)
    }
}

/// Capability contract for pairwise comparators.
///
/// Implementations are pure: the result depends only on the two tokens
/// and the comparator's own fields. They accept tokens of any length,
/// including empty ones.
pub trait Comparator: Send + Sync {
    /// Scores a pair of tokens.
    fn compare(&self, a: &Token, b: &Token) -> DistanceResult;

    /// The declared behaviour of [`compare`](Comparator::compare).
    fn profile(&self) -> ComparatorProfile;

    /// One-line description for listings.
    fn description(&self) -> &'static str;
}

/// Normalizes an edit cost by the cost of deleting or inserting the longer
/// input, clamped to `[0, 1]`.
pub(crate) fn normalized(cost: f64, len_a: usize, len_b: usize, unit: f64) -> f64 {
    let denominator = (len_a as f64 * unit).max(len_b as f64 * unit);
    if denominator == 0.0 {
        return 0.0;
    }
    (cost / denominator).min(1.0)
}
