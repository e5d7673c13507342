//! Match Rating Approach comparison.

use super::{Comparator, ComparatorProfile, DistanceResult, Direction, ScoreRange};
use crate::phonetic::mra_codex;
use crate::token::Token;

/// Highest rating, given to identical inputs.
const MAX_RATING: u8 = 6;

/// Computes the MRA comparison rating of two names, from 0 to 6.
///
/// Both names are reduced to their MRA codices. Codices differing in length
/// by more than two rate 0. Otherwise matching characters are removed in a
/// left-to-right pass and then a right-to-left pass, and the rating is six
/// minus the length of the longer remainder, or 0 when that falls below
/// the threshold for the combined codex length.
///
/// ```rust
/// use libphonetic::distance::mra_compare;
///
/// assert_eq!(mra_compare("cat", "hat"), 5);
/// assert_eq!(mra_compare("Niall", "Neil"), 6);
/// assert_eq!(mra_compare("aluminum", "Catalan"), 0);
/// ```
pub fn mra_compare(src: &str, tar: &str) -> u8 {
    if src == tar {
        return MAX_RATING;
    }
    if src.is_empty() || tar.is_empty() {
        return 0;
    }

    let mut s: Vec<char> = mra_codex(src).chars().collect();
    let mut t: Vec<char> = mra_codex(tar).chars().collect();
    if s.len().abs_diff(t.len()) > 2 {
        return 0;
    }

    let min_rating = match s.len() + t.len() {
        0..=4 => 5,
        5..=7 => 4,
        8..=11 => 3,
        _ => 2,
    };

    for _ in 0..2 {
        let shared = s.len().min(t.len());
        let mut new_s = Vec::with_capacity(s.len());
        let mut new_t = Vec::with_capacity(t.len());
        for i in 0..shared {
            if s[i] != t[i] {
                new_s.push(s[i]);
                new_t.push(t[i]);
            }
        }
        new_s.extend_from_slice(&s[shared..]);
        new_t.extend_from_slice(&t[shared..]);
        new_s.reverse();
        new_t.reverse();
        s = new_s;
        t = new_t;
    }

    let unmatched = s.len().max(t.len());
    let similarity = usize::from(MAX_RATING).saturating_sub(unmatched);
    if similarity >= min_rating {
        similarity as u8
    } else {
        0
    }
}

/// The MRA rating as a comparator, in `[0, 6]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MraRating;

impl Comparator for MraRating {
    fn compare(&self, a: &Token, b: &Token) -> DistanceResult {
        DistanceResult::similarity(f64::from(mra_compare(a.as_str(), b.as_str())))
    }

    fn profile(&self) -> ComparatorProfile {
        ComparatorProfile {
            direction: Direction::Similarity,
            range: ScoreRange::bounded(0.0, f64::from(MAX_RATING)),
            identity: f64::from(MAX_RATING),
            symmetric: true,
            metric: false,
        }
    }

    fn description(&self) -> &'static str {
        "Match Rating Approach comparison rating"
    }
}

/// The MRA rating divided by six.
#[derive(Debug, Clone, Copy, Default)]
pub struct MraSimilarity;

impl Comparator for MraSimilarity {
    fn compare(&self, a: &Token, b: &Token) -> DistanceResult {
        let rating = mra_compare(a.as_str(), b.as_str());
        DistanceResult::similarity(f64::from(rating) / f64::from(MAX_RATING))
    }

    fn profile(&self) -> ComparatorProfile {
        ComparatorProfile::unit_similarity()
    }

    fn description(&self) -> &'static str {
        "Match Rating Approach similarity in [0, 1]"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_ratings() {
        assert_eq!(mra_compare("cat", "hat"), 5);
        assert_eq!(mra_compare("Niall", "Neil"), 6);
        assert_eq!(mra_compare("aluminum", "Catalan"), 0);
        assert_eq!(mra_compare("ATCG", "TAGC"), 5);
    }

    #[test]
    fn test_empty_inputs() {
        assert_eq!(mra_compare("", ""), 6);
        assert_eq!(mra_compare("", "smith"), 0);
        assert_eq!(mra_compare("smith", ""), 0);
    }

    #[test]
    fn test_similarity() {
        let sim = |a: &str, b: &str| MraSimilarity.compare(&Token::raw(a), &Token::raw(b)).value;
        assert_eq!(sim("cat", "hat"), 0.8333333333333334);
        assert_eq!(sim("Niall", "Neil"), 1.0);
        assert_eq!(sim("aluminum", "Catalan"), 0.0);
    }

    #[test]
    fn test_symmetric() {
        for (a, b) in [("Byrne", "Boern"), ("Smith", "Smyth"), ("Catherine", "Kathryn")] {
            assert_eq!(mra_compare(a, b), mra_compare(b, a));
        }
    }
}
