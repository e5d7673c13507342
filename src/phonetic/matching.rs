//! Context and pattern matching for rewrite rules.

use super::types::{Alternative, Context};

/// Check if a context is satisfied by the neighbour of a match.
///
/// `boundary` is the match start when checking a `before` context and the
/// match end when checking an `after` context; `neighbour` is the character
/// on the outer side of that boundary, if any.
pub fn context_matches(ctx: &Context, word: &[char], boundary: usize, neighbour: Option<char>) -> bool {
    match *ctx {
        Context::Anywhere => true,
        Context::Edge => neighbour.is_none(),
        Context::In(set) => neighbour.is_some_and(|c| set.contains(c)),
        Context::NotIn(set) => neighbour.map_or(true, |c| !set.contains(c)),
        Context::InOrEdge(set) => neighbour.map_or(true, |c| set.contains(c)),
        Context::AnyChar => neighbour.is_some(),
        Context::Test(test) => test(word, boundary),
    }
}

/// Check if `pattern` occurs in `word` at `pos`.
#[inline]
pub fn pattern_matches_at(pattern: &[char], word: &[char], pos: usize) -> bool {
    word.get(pos..pos + pattern.len())
        .is_some_and(|slice| slice == pattern)
}

/// Check if an alternative matches at `pos`, contexts included.
pub fn alternative_matches_at(alt: &Alternative, word: &[char], pos: usize) -> bool {
    if !pattern_matches_at(&alt.pattern, word, pos) {
        return false;
    }
    let end = pos + alt.pattern.len();
    let before = pos.checked_sub(1).map(|i| word[i]);
    let after = word.get(end).copied();
    context_matches(&alt.before, word, pos, before) && context_matches(&alt.after, word, end, after)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_edge_contexts() {
        let word = chars("CAT");
        let start = Alternative::new("C", "K").at_start();
        assert!(alternative_matches_at(&start, &word, 0));

        let end = Alternative::new("T", "D").at_end();
        assert!(alternative_matches_at(&end, &word, 2));
        assert!(!alternative_matches_at(&Alternative::new("A", "E").at_end(), &word, 1));
    }

    #[test]
    fn test_set_contexts() {
        let word = chars("OCE");
        let alt = Alternative::new("C", "SS")
            .before(Context::In("AEIOUY"))
            .after(Context::In("EIY"));
        assert!(alternative_matches_at(&alt, &word, 1));

        let not_after_g = Alternative::new("AY", "E").before(Context::NotIn("G"));
        assert!(alternative_matches_at(&not_after_g, &chars("AY"), 0));
        assert!(!alternative_matches_at(&not_after_g, &chars("GAY"), 1));
        assert!(alternative_matches_at(&not_after_g, &chars("MAY"), 1));
    }

    #[test]
    fn test_pattern_past_end() {
        assert!(!pattern_matches_at(&chars("AB"), &chars("A"), 0));
        assert!(!pattern_matches_at(&chars("A"), &chars("A"), 1));
        assert!(pattern_matches_at(&[], &chars("A"), 1));
    }
}
