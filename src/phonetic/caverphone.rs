//! Caverphone, versions 1 and 2.
//!
//! Caverphone was designed for matching names in New Zealand electoral rolls.
//! Both versions are a fixed cascade of rewrites over lowercase ASCII letters,
//! followed by padding with `1`s. Version 2 revises several rules and yields
//! ten-character codes instead of six.

use super::application::apply_cascade;
use super::types::{Alternative, RewriteRule};
use super::{CodeLength, PhoneticCode, PhoneticEncoder};
use crate::token::Token;

/// Caverphone version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaverphoneVersion {
    /// Original 2002 algorithm, six-character codes
    V1,
    /// Revised 2004 algorithm, ten-character codes
    V2,
}

/// Caverphone encoder.
///
/// Letters outside `a`-`z` (after lowercasing) are ignored, so tokens without
/// ASCII letters encode to a code made only of `1`s.
#[derive(Debug, Clone)]
pub struct Caverphone {
    version: CaverphoneVersion,
    rules: Vec<RewriteRule>,
}

impl Caverphone {
    /// Creates an encoder for the given version.
    pub fn new(version: CaverphoneVersion) -> Self {
        Self {
            version,
            rules: rules(version),
        }
    }

    /// The version this encoder implements.
    pub fn version(&self) -> CaverphoneVersion {
        self.version
    }

    fn length(&self) -> usize {
        match self.version {
            CaverphoneVersion::V1 => 6,
            CaverphoneVersion::V2 => 10,
        }
    }
}

impl Default for Caverphone {
    fn default() -> Self {
        Self::new(CaverphoneVersion::V2)
    }
}

impl PhoneticEncoder for Caverphone {
    fn encode(&self, token: &Token) -> PhoneticCode {
        let word: Vec<char> = token
            .as_str()
            .to_lowercase()
            .chars()
            .filter(char::is_ascii_lowercase)
            .collect();

        let length = self.length();
        let mut code: String = apply_cascade(&self.rules, &word).into_iter().collect();
        code.extend(std::iter::repeat('1').take(length));
        code.truncate(length);
        PhoneticCode::single(code)
    }

    fn code_length(&self) -> CodeLength {
        CodeLength::Fixed(self.length())
    }

    fn description(&self) -> &'static str {
        match self.version {
            CaverphoneVersion::V1 => "Caverphone 1 (New Zealand names)",
            CaverphoneVersion::V2 => "Caverphone 2 (New Zealand names)",
        }
    }
}

fn rules(version: CaverphoneVersion) -> Vec<RewriteRule> {
    let v2 = version == CaverphoneVersion::V2;
    let mut rules = Vec::with_capacity(64);

    if v2 {
        rules.push(RewriteRule::one("final-e", Alternative::new("e", "").at_end()));
    }
    for (name, prefix, replacement) in [
        ("cough", "cough", "cou2f"),
        ("rough", "rough", "rou2f"),
        ("tough", "tough", "tou2f"),
        ("enough", "enough", "enou2f"),
    ] {
        rules.push(RewriteRule::one(name, Alternative::new(prefix, replacement).at_start()));
    }
    if v2 {
        rules.push(RewriteRule::one("trough", Alternative::new("trough", "trou2f").at_start()));
    }
    rules.push(RewriteRule::one("gn", Alternative::new("gn", "2n").at_start()));
    rules.push(RewriteRule::one("mb", Alternative::new("mb", "m2").at_end()));

    for (pattern, replacement) in [
        ("cq", "2q"),
        ("ci", "si"),
        ("ce", "se"),
        ("cy", "sy"),
        ("tch", "2ch"),
        ("c", "k"),
        ("q", "k"),
        ("x", "k"),
        ("v", "f"),
        ("dg", "2g"),
        ("tio", "sio"),
        ("tia", "sia"),
        ("d", "t"),
        ("ph", "fh"),
        ("b", "p"),
        ("sh", "s2"),
        ("z", "s"),
    ] {
        rules.push(RewriteRule::literal("consonants", pattern, replacement));
    }

    rules.push(RewriteRule::any(
        "initial-vowel",
        "aeiou"
            .chars()
            .map(|v| Alternative::new(&v.to_string(), "A").at_start())
            .collect(),
    ));
    for vowel in ["a", "e", "i", "o", "u"] {
        rules.push(RewriteRule::literal("vowels", vowel, "3"));
    }

    if v2 {
        rules.push(RewriteRule::literal("j", "j", "y"));
        rules.push(RewriteRule::one("initial-y3", Alternative::new("y3", "Y3").at_start()));
        rules.push(RewriteRule::one("initial-y", Alternative::new("y", "A").at_start()));
        rules.push(RewriteRule::literal("y", "y", "3"));
    }

    rules.push(RewriteRule::literal("3gh3", "3gh3", "3kh3"));
    rules.push(RewriteRule::literal("gh", "gh", "22"));
    rules.push(RewriteRule::literal("g", "g", "k"));

    for (from, to) in [('s', 'S'), ('t', 'T'), ('p', 'P'), ('k', 'K'), ('f', 'F'), ('m', 'M'), ('n', 'N')] {
        rules.push(RewriteRule::squeeze("squeeze", from, to));
    }

    rules.push(RewriteRule::literal("w3", "w3", "W3"));
    if !v2 {
        rules.push(RewriteRule::literal("wy", "wy", "Wy"));
    }
    rules.push(RewriteRule::literal("wh3", "wh3", "Wh3"));
    if !v2 {
        rules.push(RewriteRule::literal("why", "why", "Why"));
    }
    if v2 {
        rules.push(RewriteRule::one("final-w", Alternative::new("w", "3").at_end()));
    }
    rules.push(RewriteRule::literal("w", "w", "2"));
    rules.push(RewriteRule::one("initial-h", Alternative::new("h", "A").at_start()));
    rules.push(RewriteRule::literal("h", "h", "2"));

    rules.push(RewriteRule::literal("r3", "r3", "R3"));
    if !v2 {
        rules.push(RewriteRule::literal("ry", "ry", "Ry"));
    }
    if v2 {
        rules.push(RewriteRule::one("final-r", Alternative::new("r", "3").at_end()));
    }
    rules.push(RewriteRule::literal("r", "r", "2"));

    rules.push(RewriteRule::literal("l3", "l3", "L3"));
    if !v2 {
        rules.push(RewriteRule::literal("ly", "ly", "Ly"));
    }
    if v2 {
        rules.push(RewriteRule::one("final-l", Alternative::new("l", "3").at_end()));
    }
    rules.push(RewriteRule::literal("l", "l", "2"));

    if !v2 {
        rules.push(RewriteRule::literal("j", "j", "y"));
        rules.push(RewriteRule::literal("y3", "y3", "Y3"));
        rules.push(RewriteRule::literal("y", "y", "2"));
    }

    rules.push(RewriteRule::literal("drop-2", "2", ""));
    if v2 {
        rules.push(RewriteRule::one("final-3", Alternative::new("3", "A").at_end()));
    }
    rules.push(RewriteRule::literal("drop-3", "3", ""));
    rules
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(version: CaverphoneVersion, word: &str) -> String {
        Caverphone::new(version).encode(&Token::raw(word)).to_string()
    }

    #[test]
    fn test_version_2() {
        assert_eq!(encode(CaverphoneVersion::V2, "Christopher"), "KRSTFA1111");
        assert_eq!(encode(CaverphoneVersion::V2, "Niall"), "NA11111111");
        assert_eq!(encode(CaverphoneVersion::V2, "Smith"), "SMT1111111");
        assert_eq!(encode(CaverphoneVersion::V2, "Schmidt"), "SKMT111111");
    }

    #[test]
    fn test_version_1() {
        assert_eq!(encode(CaverphoneVersion::V1, "Christopher"), "KRSTF1");
        assert_eq!(encode(CaverphoneVersion::V1, "Niall"), "N11111");
        assert_eq!(encode(CaverphoneVersion::V1, "Smith"), "SMT111");
        assert_eq!(encode(CaverphoneVersion::V1, "Schmidt"), "SKMT11");
    }

    #[test]
    fn test_empty_and_non_letters() {
        assert_eq!(encode(CaverphoneVersion::V2, ""), "1111111111");
        assert_eq!(encode(CaverphoneVersion::V2, "e"), "1111111111");
        assert_eq!(encode(CaverphoneVersion::V1, "42 ☃"), "111111");
    }
}
