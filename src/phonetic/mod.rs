//! Phonetic encoders.
//!
//! Every encoder implements [`PhoneticEncoder`]: a pure function from a
//! [`Token`] to a [`PhoneticCode`]. Two tokens are phonetically equivalent
//! under an encoder exactly when their codes compare equal.
//!
//! # Encoders
//!
//! | Encoder | Language | Code length |
//! |---------|----------|-------------|
//! | [`Soundex`] | English | fixed, 4 |
//! | [`Caverphone`] | English (New Zealand) | fixed, 6 or 10 |
//! | [`DaitchMokotoff`] | Eastern European | fixed, 6, several alternatives |
//! | [`Fonem`] | French | unbounded |
//! | [`HenryEarly`] | French | at most 3 |
//! | [`SfinxBis`] | Swedish | unbounded, one code per name |
//! | [`Norphone`] | Norwegian | unbounded |
//! | [`MatchRatingCodex`] | English | at most 6 |
//!
//! The [`fingerprint`](crate::fingerprint) and [`stemmer`](crate::stemmer)
//! modules provide further encoders with the same interface.
//!
//! # Rewrite cascades
//!
//! Encoders defined as ordered lists of contextual rewrites are built from
//! the rule engine in [`types`], [`matching`] and [`application`].
//!
//! # Usage
//!
//! ```rust
//! use libphonetic::phonetic::{PhoneticEncoder, Soundex};
//! use libphonetic::token::Token;
//!
//! let code = Soundex::new().encode(&Token::raw("Robert"));
//! assert_eq!(code.to_string(), "R163");
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use unicode_normalization::UnicodeNormalization;

use crate::token::Token;

pub mod application;
pub mod matching;
pub mod types;

mod caverphone;
mod daitch_mokotoff;
mod fonem;
mod henry;
mod mra;
mod norphone;
mod sfinxbis;
mod soundex;

pub use application::{apply_cascade, apply_rule};
pub use caverphone::{Caverphone, CaverphoneVersion};
pub use daitch_mokotoff::DaitchMokotoff;
pub use fonem::Fonem;
pub use henry::HenryEarly;
pub use mra::{mra_codex, MatchRatingCodex};
pub use norphone::Norphone;
pub use sfinxbis::SfinxBis;
pub use soundex::Soundex;
pub use types::{Alternative, Context, Rewrite, RewriteRule};

/// The code an encoder assigns to a token.
///
/// A code has one or more parts:
/// - a single code ([`PhoneticCode::single`]),
/// - a set of alternative codes, kept sorted and deduplicated
///   ([`PhoneticCode::alternatives`]),
/// - an ordered sequence of codes, one per component of the input
///   ([`PhoneticCode::sequence`]).
///
/// Codes serialize as a JSON array of strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhoneticCode {
    parts: SmallVec<[String; 1]>,
}

impl PhoneticCode {
    /// A code with exactly one part.
    pub fn single(code: impl Into<String>) -> Self {
        let mut parts = SmallVec::new();
        parts.push(code.into());
        Self { parts }
    }

    /// A set of alternative codes. Order and duplicates are irrelevant.
    pub fn alternatives<I>(codes: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let mut parts: SmallVec<[String; 1]> = codes.into_iter().map(Into::into).collect();
        parts.sort_unstable();
        parts.dedup();
        if parts.is_empty() {
            parts.push(String::new());
        }
        Self { parts }
    }

    /// An ordered sequence of codes.
    pub fn sequence<I>(codes: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let mut parts: SmallVec<[String; 1]> = codes.into_iter().map(Into::into).collect();
        if parts.is_empty() {
            parts.push(String::new());
        }
        Self { parts }
    }

    /// The parts of the code.
    #[inline]
    pub fn parts(&self) -> &[String] {
        &self.parts
    }

    /// Returns true when every part is empty.
    pub fn is_empty(&self) -> bool {
        self.parts.iter().all(String::is_empty)
    }
}

impl fmt::Display for PhoneticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.parts.as_slice() {
            [single] => f.write_str(single),
            parts => write!(f, "[{}]", parts.join(", ")),
        }
    }
}

/// Length policy of the parts of a code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeLength {
    /// Every part has exactly this many characters (padded, then truncated)
    Fixed(usize),
    /// Parts are truncated to at most this many characters
    AtMost(usize),
    /// Parts grow with the input
    Unbounded,
}

impl CodeLength {
    /// Checks one part of a code against the policy.
    pub fn admits(&self, part: &str) -> bool {
        let len = part.chars().count();
        match *self {
            CodeLength::Fixed(n) => len == n,
            CodeLength::AtMost(n) => len <= n,
            CodeLength::Unbounded => true,
        }
    }
}

impl fmt::Display for CodeLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodeLength::Fixed(n) => write!(f, "exactly {n}"),
            CodeLength::AtMost(n) => write!(f, "at most {n}"),
            CodeLength::Unbounded => f.write_str("unbounded"),
        }
    }
}

/// A phonetic encoding algorithm.
///
/// Implementations are immutable values configured at construction time and
/// shared between threads, so `encode` must not depend on anything but its
/// argument and the encoder's own fields.
pub trait PhoneticEncoder: Send + Sync {
    /// Encodes a token.
    ///
    /// Never fails: empty tokens and tokens without any letter the encoder
    /// understands produce the encoder's documented "empty" code.
    fn encode(&self, token: &Token) -> PhoneticCode;

    /// The length policy every part of the returned codes obeys.
    fn code_length(&self) -> CodeLength;

    /// One-line description for listings.
    fn description(&self) -> &'static str;
}

/// Collapses runs of identical characters into one.
pub(crate) fn delete_consecutive_repeats(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    let mut previous = None;
    for c in word.chars() {
        if previous != Some(c) {
            out.push(c);
        }
        previous = Some(c);
    }
    out
}

/// Uppercases, applies compatibility decomposition and keeps the characters
/// accepted by `keep`.
pub(crate) fn upper_decomposed(word: &str, keep: impl Fn(char) -> bool) -> Vec<char> {
    word.to_uppercase().nfkd().filter(|&c| keep(c)).collect()
}

/// Truncates to `max` characters.
pub(crate) fn truncate_chars(code: &mut String, max: usize) {
    if let Some((idx, _)) = code.char_indices().nth(max) {
        code.truncate(idx);
    }
}
