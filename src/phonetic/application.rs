//! Rule application for rewrite cascades.
//!
//! A rule with alternatives is applied the way a regular-expression `sub`
//! works: the word is scanned left to right, at each position the first
//! matching alternative is replaced and scanning resumes after the match,
//! otherwise the character is copied. Matches never overlap, and contexts
//! look at the input word, not at the partially rewritten output.
//!
//! # Termination
//!
//! Each rule is applied exactly once per cascade, and a single application
//! is linear in the word length, so a cascade of `r` rules runs in
//! `O(r * n)`. A rule with alternatives produces at most `n` times its
//! longest replacement.

use super::matching::alternative_matches_at;
use super::types::{Alternative, Rewrite, RewriteRule};

/// Returns the first alternative matching at `pos`.
///
/// Alternatives with an empty pattern never match.
#[inline]
pub fn find_alternative_at<'a>(alternatives: &'a [Alternative], word: &[char], pos: usize) -> Option<&'a Alternative> {
    alternatives
        .iter()
        .find(|alt| !alt.pattern.is_empty() && alternative_matches_at(alt, word, pos))
}

/// Apply one rule to the whole word.
pub fn apply_rule(rule: &RewriteRule, word: &[char]) -> Vec<char> {
    match &rule.rewrite {
        Rewrite::Alternatives(alternatives) => {
            let mut out = Vec::with_capacity(word.len());
            let mut pos = 0;
            while pos < word.len() {
                match find_alternative_at(alternatives, word, pos) {
                    Some(alt) => {
                        out.extend_from_slice(&alt.replacement);
                        pos += alt.pattern.len();
                    }
                    None => {
                        out.push(word[pos]);
                        pos += 1;
                    }
                }
            }
            out
        }
        Rewrite::Squeeze { from, to } => {
            let mut out = Vec::with_capacity(word.len());
            let mut previous = None;
            for &c in word {
                if c == *from {
                    if previous != Some(*from) {
                        out.push(*to);
                    }
                } else {
                    out.push(c);
                }
                previous = Some(c);
            }
            out
        }
        Rewrite::Custom(rewrite) => rewrite(word),
    }
}

/// Apply each rule once, in order, feeding each the previous rule's output.
pub fn apply_cascade(rules: &[RewriteRule], word: &[char]) -> Vec<char> {
    let mut current = word.to_vec();
    for rule in rules {
        current = apply_rule(rule, &current);
    }
    current
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::phonetic::types::Context;

    fn run(rule: &RewriteRule, word: &str) -> String {
        let chars: Vec<char> = word.chars().collect();
        apply_rule(rule, &chars).into_iter().collect()
    }

    #[test]
    fn test_literal_is_non_overlapping() {
        let rule = RewriteRule::literal("ss", "SS", "S");
        assert_eq!(run(&rule, "SSS"), "SS");
        assert_eq!(run(&rule, "SSSS"), "SS");
    }

    #[test]
    fn test_contexts_see_the_input_word() {
        // Rewriting the first I must not hide the vowel preceding the second
        let rule = RewriteRule::one(
            "i-between-vowels",
            Alternative::new("I", "Y")
                .before(Context::In("AEIOUY"))
                .after(Context::In("AEIOUY")),
        );
        assert_eq!(run(&rule, "AIIA"), "AYYA");
    }

    #[test]
    fn test_first_alternative_wins() {
        let rule = RewriteRule::any(
            "eau",
            vec![Alternative::new("EAU", "O"), Alternative::new("AU", "O")],
        );
        assert_eq!(run(&rule, "BEAUAU"), "BOO");
    }

    #[test]
    fn test_squeeze() {
        let rule = RewriteRule::squeeze("s", 's', 'S');
        assert_eq!(run(&rule, "assessss"), "aSeS");
        assert_eq!(run(&rule, ""), "");
    }

    #[test]
    fn test_anchored_alternative_only_matches_at_the_end() {
        let rule = RewriteRule::one("final-t", Alternative::new("T", "").at_end());
        assert_eq!(run(&rule, "TAT"), "TA");
    }

    #[test]
    fn test_custom_rule_sees_the_whole_word() {
        fn reverse(word: &[char]) -> Vec<char> {
            word.iter().rev().copied().collect()
        }
        let rule = RewriteRule::custom("reverse", reverse);
        assert_eq!(run(&rule, "ABC"), "CBA");
    }

    #[test]
    fn test_cascade_order_matters() {
        let rules = vec![
            RewriteRule::literal("c-k", "C", "K"),
            RewriteRule::literal("k-q", "K", "Q"),
        ];
        let word: Vec<char> = "CK".chars().collect();
        let out: String = apply_cascade(&rules, &word).into_iter().collect();
        assert_eq!(out, "QQ");
    }
}
