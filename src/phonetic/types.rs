//! Type definitions for context-sensitive rewrite rules.
//!
//! Several encoders (Caverphone, FONEM) are cascades of string rewrites, each
//! of the form "replace `pattern` with `replacement` when preceded by X and
//! followed by Y". This module provides the vocabulary for such rules; the
//! matching and application logic lives in [`matching`](super::matching) and
//! [`application`](super::application).
//!
//! ```text
//! Rule        := Alternatives [Alternative] | Squeeze char char | Custom fn
//! Alternative := before:Context  pattern:[char]  after:Context  -> replacement
//! Context     := Anywhere | Edge | In set | NotIn set | InOrEdge set | AnyChar | Test fn
//! ```

/// Condition on the character adjacent to a match.
///
/// A context is checked on the character immediately *before* the match (for
/// [`Alternative::before`]) or immediately *after* it (for
/// [`Alternative::after`]). Contexts are always evaluated against the word as
/// it was before the rule started rewriting it.
#[derive(Debug, Clone, Copy)]
pub enum Context {
    /// No restriction
    Anywhere,
    /// The match touches the start (before) or the end (after) of the word
    Edge,
    /// The neighbouring character exists and belongs to the set
    In(&'static str),
    /// The neighbouring character is absent or does not belong to the set
    NotIn(&'static str),
    /// The neighbouring character is absent or belongs to the set
    InOrEdge(&'static str),
    /// Some neighbouring character exists
    AnyChar,
    /// Arbitrary predicate over the word and the boundary position
    Test(fn(&[char], usize) -> bool),
}

/// One alternative of a rewrite rule.
///
/// Alternatives of a rule are tried in order at every position; the first one
/// that matches wins.
#[derive(Debug, Clone)]
pub struct Alternative {
    /// Condition on the character preceding the match
    pub before: Context,
    /// Characters to match
    pub pattern: Vec<char>,
    /// Condition on the character following the match
    pub after: Context,
    /// Replacement text
    pub replacement: Vec<char>,
}

impl Alternative {
    /// Unconditional replacement of `pattern` by `replacement`.
    pub fn new(pattern: &str, replacement: &str) -> Self {
        Self {
            before: Context::Anywhere,
            pattern: pattern.chars().collect(),
            after: Context::Anywhere,
            replacement: replacement.chars().collect(),
        }
    }

    /// Sets the context preceding the match.
    pub fn before(mut self, context: Context) -> Self {
        self.before = context;
        self
    }

    /// Sets the context following the match.
    pub fn after(mut self, context: Context) -> Self {
        self.after = context;
        self
    }

    /// Anchors the match at the start of the word.
    pub fn at_start(self) -> Self {
        self.before(Context::Edge)
    }

    /// Anchors the match at the end of the word.
    pub fn at_end(self) -> Self {
        self.after(Context::Edge)
    }
}

/// How a rule rewrites a word.
#[derive(Debug, Clone)]
pub enum Rewrite {
    /// Leftmost, non-overlapping replacement of the first matching alternative
    Alternatives(Vec<Alternative>),
    /// Collapse every run of `from` into a single `to`
    Squeeze {
        /// Character whose runs are collapsed
        from: char,
        /// Character each run becomes
        to: char,
    },
    /// Rewrites that need back-references or whole-word inspection
    Custom(fn(&[char]) -> Vec<char>),
}

/// A named rewrite rule.
#[derive(Debug, Clone)]
pub struct RewriteRule {
    /// Human-readable name, used in debug output
    pub name: &'static str,
    /// The rewrite performed by this rule
    pub rewrite: Rewrite,
}

impl RewriteRule {
    /// A rule made of a single unconditional replacement, like `str::replace`.
    pub fn literal(name: &'static str, pattern: &str, replacement: &str) -> Self {
        Self::one(name, Alternative::new(pattern, replacement))
    }

    /// A rule with a single alternative.
    pub fn one(name: &'static str, alternative: Alternative) -> Self {
        Self::any(name, vec![alternative])
    }

    /// A rule whose alternatives are tried in order.
    pub fn any(name: &'static str, alternatives: Vec<Alternative>) -> Self {
        Self {
            name,
            rewrite: Rewrite::Alternatives(alternatives),
        }
    }

    /// A rule collapsing runs of `from` into one `to`.
    pub fn squeeze(name: &'static str, from: char, to: char) -> Self {
        Self {
            name,
            rewrite: Rewrite::Squeeze { from, to },
        }
    }

    /// A rule implemented by a function over the whole word.
    pub fn custom(name: &'static str, rewrite: fn(&[char]) -> Vec<char>) -> Self {
        Self {
            name,
            rewrite: Rewrite::Custom(rewrite),
        }
    }
}
