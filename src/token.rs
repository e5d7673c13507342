//! Token model: the canonical form of an input string.
//!
//! Every algorithm in the crate consumes [`Token`]s. A token is produced either
//! verbatim with [`Token::raw`] or through [`normalize`], which applies the
//! requested [`NormalizeOptions`] and records them as the token's state.
//!
//! # Pipeline
//!
//! 1. Decomposition: NFD when stripping diacritics, NFKD when transliterating
//!    to ASCII (so that ligatures and compatibility forms decompose too).
//! 2. Unicode lowercasing when case folding.
//! 3. Removal of combining marks, then NFC recomposition.
//! 4. ASCII transliteration of letters that have no decomposition
//!    (`ß` → `ss`, `æ` → `ae`, `ø` → `o`, ...).
//!
//! The pipeline runs until it reaches a fixed point, so normalizing a
//! normalized token with the same options always returns it unchanged.
//!
//! # Example
//!
//! ```rust
//! use libphonetic::token::{normalize, NormalizeOptions};
//!
//! let token = normalize("Ĳsselmeer Straße", NormalizeOptions::ASCII).unwrap();
//! assert_eq!(token.as_str(), "ijsselmeer strasse");
//!
//! let again = normalize(token.as_str(), NormalizeOptions::ASCII).unwrap();
//! assert_eq!(again, token);
//! ```

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::error::{Error, Result};

/// Upper bound on pipeline passes while searching for a fixed point.
const MAX_PASSES: usize = 4;

/// Normalization options. Also used as the normalization state of a [`Token`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizeOptions {
    /// Lowercase using the Unicode case mappings.
    pub case_fold: bool,
    /// Remove combining marks after canonical decomposition.
    pub strip_diacritics: bool,
    /// Transliterate to ASCII; fails on characters without a transliteration.
    pub ascii_only: bool,
}

impl NormalizeOptions {
    /// No normalization at all.
    pub const RAW: Self = Self {
        case_fold: false,
        strip_diacritics: false,
        ascii_only: false,
    };

    /// Lowercase only.
    pub const CASE_FOLDED: Self = Self {
        case_fold: true,
        strip_diacritics: false,
        ascii_only: false,
    };

    /// Lowercase with diacritics removed.
    pub const FOLDED: Self = Self {
        case_fold: true,
        strip_diacritics: true,
        ascii_only: false,
    };

    /// Lowercase ASCII.
    pub const ASCII: Self = Self {
        case_fold: true,
        strip_diacritics: true,
        ascii_only: true,
    };

    /// Returns true when no option is enabled.
    pub fn is_raw(&self) -> bool {
        *self == Self::RAW
    }

    fn decomposes(&self) -> bool {
        self.strip_diacritics || self.ascii_only
    }
}

impl fmt::Display for NormalizeOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_raw() {
            return f.write_str("raw");
        }
        let mut flags = Vec::with_capacity(3);
        if self.case_fold {
            flags.push("case-fold");
        }
        if self.strip_diacritics {
            flags.push("strip-diacritics");
        }
        if self.ascii_only {
            flags.push("ascii-only");
        }
        f.write_str(&flags.join("+"))
    }
}

/// An immutable input string together with the normalization applied to it.
///
/// Tokens are cheap to clone: the text is shared.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
    text: Arc<str>,
    state: NormalizeOptions,
}

impl Token {
    /// Wraps `text` without normalizing it.
    pub fn raw(text: impl AsRef<str>) -> Self {
        Self {
            text: Arc::from(text.as_ref()),
            state: NormalizeOptions::RAW,
        }
    }

    /// The token text.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// The normalization options this token was produced with.
    #[inline]
    pub fn state(&self) -> NormalizeOptions {
        self.state
    }

    /// Iterates over the code points of the token.
    #[inline]
    pub fn chars(&self) -> std::str::Chars<'_> {
        self.text.chars()
    }

    /// Number of code points.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Returns true for the empty token.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Normalizes this token's text again with `options`.
    pub fn renormalize(&self, options: NormalizeOptions) -> Result<Token> {
        normalize(&self.text, options)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl From<&str> for Token {
    fn from(text: &str) -> Self {
        Token::raw(text)
    }
}

impl From<String> for Token {
    fn from(text: String) -> Self {
        Self {
            text: Arc::from(text),
            state: NormalizeOptions::RAW,
        }
    }
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

/// Normalizes `raw` according to `options`.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] only when `options.ascii_only` is set and a
/// character has no ASCII transliteration. Without `ascii_only` this function
/// never fails; characters it cannot map pass through unchanged.
pub fn normalize(raw: &str, options: NormalizeOptions) -> Result<Token> {
    if options.is_raw() {
        return Ok(Token::raw(raw));
    }

    let mut current = normalize_pass(raw, options).map_err(|reason| Error::InvalidInput {
        input: raw.to_string(),
        reason,
    })?;

    for _ in 1..MAX_PASSES {
        let next = normalize_pass(&current, options).map_err(|reason| Error::InvalidInput {
            input: raw.to_string(),
            reason,
        })?;
        if next == current {
            break;
        }
        current = next;
    }

    Ok(Token {
        text: Arc::from(current),
        state: options,
    })
}

fn normalize_pass(input: &str, options: NormalizeOptions) -> std::result::Result<String, String> {
    let mut text: String = if options.ascii_only {
        input.nfkd().collect()
    } else if options.strip_diacritics {
        input.nfd().collect()
    } else {
        input.to_string()
    };

    if options.case_fold {
        text = text.to_lowercase();
    }

    if options.decomposes() {
        text = text.chars().filter(|&c| !is_combining_mark(c)).nfc().collect();
    }

    if options.ascii_only {
        text = transliterate(&text)?;
    }

    Ok(text)
}

fn transliterate(text: &str) -> std::result::Result<String, String> {
    let mut out = String::with_capacity(text.len());
    for (position, c) in text.chars().enumerate() {
        if c.is_ascii() {
            out.push(c);
        } else if let Some(replacement) = ascii_replacement(c) {
            out.push_str(replacement);
        } else {
            return Err(format!(
                "no ASCII transliteration for {c:?} (U+{:04X}) at position {position}",
                c as u32
            ));
        }
    }
    Ok(out)
}

/// Letters and punctuation that survive NFKD without becoming ASCII.
fn ascii_replacement(c: char) -> Option<&'static str> {
    let replacement = match c {
        'ß' => "ss",
        'ẞ' => "SS",
        'æ' => "ae",
        'Æ' => "AE",
        'œ' => "oe",
        'Œ' => "OE",
        'ø' => "o",
        'Ø' => "O",
        'đ' | 'ð' => "d",
        'Đ' | 'Ð' => "D",
        'þ' => "th",
        'Þ' => "TH",
        'ł' => "l",
        'Ł' => "L",
        'ı' => "i",
        'ħ' => "h",
        'Ħ' => "H",
        'ŧ' => "t",
        'Ŧ' => "T",
        'ŋ' => "ng",
        'Ŋ' => "NG",
        '‘' | '’' | '‚' | '‛' | '′' => "'",
        '“' | '”' | '„' | '‟' | '«' | '»' | '″' => "\"",
        '‐' | '‑' | '‒' | '–' | '—' | '―' | '−' => "-",
        '¡' => "!",
        '¿' => "?",
        '×' => "x",
        '·' | '•' => ".",
        _ => return None,
    };
    Some(replacement)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_is_untouched() {
        let token = normalize("Ünïcödé  ", NormalizeOptions::RAW).unwrap();
        assert_eq!(token.as_str(), "Ünïcödé  ");
        assert!(token.state().is_raw());
    }

    #[test]
    fn test_case_fold() {
        let token = normalize("MÜLLER", NormalizeOptions::CASE_FOLDED).unwrap();
        assert_eq!(token.as_str(), "müller");
        assert_eq!(token.state(), NormalizeOptions::CASE_FOLDED);
    }

    #[test]
    fn test_strip_diacritics_keeps_case() {
        let options = NormalizeOptions {
            strip_diacritics: true,
            ..NormalizeOptions::RAW
        };
        let token = normalize("Ångström Crème", options).unwrap();
        assert_eq!(token.as_str(), "Angstrom Creme");
    }

    #[test]
    fn test_strip_diacritics_passes_unmappable_through() {
        let token = normalize("Straße Ørsted 東京", NormalizeOptions::FOLDED).unwrap();
        assert_eq!(token.as_str(), "straße ørsted 東京");
    }

    #[test]
    fn test_ascii_transliteration() {
        let token = normalize("Straße Ørsted Łódź Þór", NormalizeOptions::ASCII).unwrap();
        assert_eq!(token.as_str(), "strasse orsted lodz thor");
    }

    #[test]
    fn test_ascii_keeps_case_without_case_fold() {
        let options = NormalizeOptions {
            ascii_only: true,
            ..NormalizeOptions::RAW
        };
        let token = normalize("Æsir ﬁne", options).unwrap();
        assert_eq!(token.as_str(), "AEsir fine");
    }

    #[test]
    fn test_ascii_rejects_untransliterable() {
        let err = normalize("abc東", NormalizeOptions::ASCII).unwrap_err();
        match err {
            Error::InvalidInput { input, reason } => {
                assert_eq!(input, "abc東");
                assert!(reason.contains("position 3"), "{reason}");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_input() {
        for options in [
            NormalizeOptions::RAW,
            NormalizeOptions::CASE_FOLDED,
            NormalizeOptions::FOLDED,
            NormalizeOptions::ASCII,
        ] {
            let token = normalize("", options).unwrap();
            assert!(token.is_empty());
        }
    }

    #[test]
    fn test_idempotent_on_tricky_input() {
        let inputs = ["İstanbul", "ΣΊΣΥΦΟΣ", "e\u{301}\u{301}\u{327}", "ǅemal", "ﬃ", "\u{0}\t"];
        for input in inputs {
            for options in [NormalizeOptions::CASE_FOLDED, NormalizeOptions::FOLDED] {
                let once = normalize(input, options).unwrap();
                let twice = once.renormalize(options).unwrap();
                assert_eq!(once, twice, "input {input:?} options {options}");
            }
        }
    }

    #[test]
    fn test_display_options() {
        assert_eq!(NormalizeOptions::RAW.to_string(), "raw");
        assert_eq!(
            NormalizeOptions::ASCII.to_string(),
            "case-fold+strip-diacritics+ascii-only"
        );
    }
}
