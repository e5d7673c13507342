//! Western Airlines Match Rating Approach (MRA) codex.

use super::{delete_consecutive_repeats, CodeLength, PhoneticCode, PhoneticEncoder};
use crate::token::Token;

/// Computes the MRA codex of a word.
///
/// The word is uppercased, vowels after the first letter are dropped,
/// repeated letters collapsed, and codices longer than six characters keep
/// their first and last three characters.
pub fn mra_codex(word: &str) -> String {
    let upper = word.to_uppercase().replace('ß', "SS");
    let mut chars = upper.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };

    let mut stripped = String::with_capacity(upper.len());
    stripped.push(first);
    stripped.extend(chars.filter(|c| !matches!(c, 'A' | 'E' | 'I' | 'O' | 'U')));

    let collapsed: Vec<char> = delete_consecutive_repeats(&stripped).chars().collect();
    if collapsed.len() > 6 {
        collapsed[..3].iter().chain(&collapsed[collapsed.len() - 3..]).collect()
    } else {
        collapsed.into_iter().collect()
    }
}

/// MRA codex encoder.
///
/// Any character may appear in the codex; only the vowels `AEIOU` after the
/// first position are removed. The empty token encodes to the empty codex.
#[derive(Debug, Clone, Copy, Default)]
pub struct MatchRatingCodex;

impl MatchRatingCodex {
    /// Creates the encoder.
    pub fn new() -> Self {
        Self
    }
}

impl PhoneticEncoder for MatchRatingCodex {
    fn encode(&self, token: &Token) -> PhoneticCode {
        PhoneticCode::single(mra_codex(token.as_str()))
    }

    fn code_length(&self) -> CodeLength {
        CodeLength::AtMost(6)
    }

    fn description(&self) -> &'static str {
        "Match Rating Approach codex"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codex() {
        assert_eq!(mra_codex("Byrne"), "BYRN");
        assert_eq!(mra_codex("Boern"), "BRN");
        assert_eq!(mra_codex("Smith"), "SMTH");
        assert_eq!(mra_codex("Catherine"), "CTHRN");
        assert_eq!(mra_codex("Aubrey"), "ABRY");
        assert_eq!(mra_codex("Christopher"), "CHRPHR");
    }

    #[test]
    fn test_empty_and_single() {
        assert_eq!(mra_codex(""), "");
        assert_eq!(mra_codex("a"), "A");
        assert_eq!(mra_codex("ß"), "S");
    }
}
