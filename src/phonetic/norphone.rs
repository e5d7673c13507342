//! Norphone, a phonetic code for Norwegian (and Swedish) names.

use super::{delete_consecutive_repeats, CodeLength, PhoneticCode, PhoneticEncoder};
use crate::token::Token;

const VOWELS: &str = "AEIOUYÅÆØÄÖ";

/// Letter groups and their codes, longest groups first.
const GROUPS: &[(&str, &str)] = &[
    ("SKEI", "X"),
    ("SKJ", "X"),
    ("KEI", "X"),
    ("CH", "K"),
    ("CK", "K"),
    ("GJ", "J"),
    ("GH", "K"),
    ("HG", "K"),
    ("HJ", "J"),
    ("HL", "L"),
    ("HR", "R"),
    ("KJ", "X"),
    ("KI", "X"),
    ("LD", "L"),
    ("ND", "N"),
    ("PH", "F"),
    ("TH", "T"),
    ("SJ", "X"),
    ("W", "V"),
    ("X", "KS"),
    ("Z", "S"),
    ("D", "T"),
    ("G", "K"),
];

/// Initial letter groups with their own codes.
const INITIALS: &[(&str, &str)] = &[
    ("AA", "Å"),
    ("GI", "J"),
    ("SKY", "X"),
    ("EI", "Æ"),
    ("KY", "X"),
    ("C", "K"),
    ("Ä", "Æ"),
    ("Ö", "Ø"),
];

fn is_vowel(c: Option<char>) -> bool {
    c.is_some_and(|c| VOWELS.contains(c))
}

fn starts_with_at(word: &[char], pos: usize, group: &str) -> bool {
    let mut i = pos;
    for c in group.chars() {
        if word.get(i) != Some(&c) {
            return false;
        }
        i += 1;
    }
    true
}

/// Norphone encoder.
///
/// The input is only uppercased: characters outside the Norwegian alphabet
/// are copied into the code unchanged, and the empty token encodes to the
/// empty code. Non-initial vowels are dropped and repeated characters
/// collapsed. There is no maximum length: long tokens give long codes.
#[derive(Debug, Clone, Copy, Default)]
pub struct Norphone;

impl Norphone {
    /// Creates the encoder.
    pub fn new() -> Self {
        Self
    }
}

impl PhoneticEncoder for Norphone {
    fn encode(&self, token: &Token) -> PhoneticCode {
        let mut word: Vec<char> = token.as_str().to_uppercase().chars().collect();
        let mut code = String::with_capacity(word.len());
        let mut skip = 0;

        if let Some((group, initial)) = INITIALS.iter().find(|(group, _)| starts_with_at(&word, 0, group)) {
            code.push_str(initial);
            skip = group.chars().count();
        }

        let n = word.len();
        if word.ends_with(&['D', 'T']) {
            word.truncate(n - 2);
            word.push('T');
        } else if n >= 2 && is_vowel(Some(word[n - 2])) && word[n - 1] == 'D' {
            word.truncate(n - 2);
        }

        for (pos, &c) in word.iter().enumerate() {
            if skip > 0 {
                skip -= 1;
                continue;
            }
            match GROUPS.iter().find(|(group, _)| starts_with_at(&word, pos, group)) {
                Some((group, replacement)) => {
                    code.push_str(replacement);
                    skip = group.chars().count() - 1;
                }
                None => {
                    if pos == 0 || !is_vowel(Some(c)) {
                        code.push(c);
                    }
                }
            }
        }

        PhoneticCode::single(delete_consecutive_repeats(&code))
    }

    fn code_length(&self) -> CodeLength {
        CodeLength::Unbounded
    }

    fn description(&self) -> &'static str {
        "Norphone (Norwegian names)"
    }
}
