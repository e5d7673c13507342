//! Daitch-Mokotoff Soundex.
//!
//! Letter groups map to one of three codes depending on their position: at
//! the start of the word, before a vowel, or elsewhere. Some groups are
//! ambiguous and map to two codes, so a word encodes to a *set* of codes.

use std::collections::BTreeSet;

use rustc_hash::FxHashMap;
use smallvec::{smallvec, SmallVec};

use super::{upper_decomposed, CodeLength, PhoneticCode, PhoneticEncoder};
use crate::token::Token;

/// Placeholder for "no code"; removed after repeats are collapsed.
const PLACEHOLDER: char = '_';

/// Number of candidate codes kept while encoding one word.
///
/// Each ambiguous letter group doubles the number of candidate codes. The
/// candidates are deduplicated and stop growing once they fill the code
/// length, which keeps ordinary names far below this bound; inputs that
/// exceed it keep the lexicographically smallest candidates, so a code never
/// has more than this many alternatives.
pub const MAX_BRANCHES: usize = 1024;

/// Longest letter group in the table.
const MAX_GROUP: usize = 7;

/// Vowels for the "before a vowel" position.
const VOWELS: &str = "AEIJOUY";

#[derive(Debug, Clone, Copy)]
enum Value {
    Code(&'static str),
    Either(&'static str, &'static str),
}

use Value::{Code as C, Either as E};

/// (letter group, [at start, before a vowel, elsewhere])
#[rustfmt::skip]
const TABLE: &[(&str, [Value; 3])] = &[
    ("A", [C("0"), C("_"), C("_")]),
    ("AI", [C("0"), C("1"), C("_")]),
    ("AJ", [C("0"), C("1"), C("_")]),
    ("AU", [C("0"), C("7"), C("_")]),
    ("AY", [C("0"), C("1"), C("_")]),
    ("B", [C("7"), C("7"), C("7")]),
    ("C", [E("5", "4"), E("5", "4"), E("5", "4")]),
    ("CH", [E("5", "4"), E("5", "4"), E("5", "4")]),
    ("CHS", [C("5"), C("54"), C("54")]),
    ("CK", [E("5", "45"), E("5", "45"), E("5", "45")]),
    ("CS", [C("4"), C("4"), C("4")]),
    ("CSZ", [C("4"), C("4"), C("4")]),
    ("CZ", [C("4"), C("4"), C("4")]),
    ("CZS", [C("4"), C("4"), C("4")]),
    ("D", [C("3"), C("3"), C("3")]),
    ("DRS", [C("4"), C("4"), C("4")]),
    ("DRZ", [C("4"), C("4"), C("4")]),
    ("DS", [C("4"), C("4"), C("4")]),
    ("DSH", [C("4"), C("4"), C("4")]),
    ("DSZ", [C("4"), C("4"), C("4")]),
    ("DT", [C("3"), C("3"), C("3")]),
    ("DZ", [C("4"), C("4"), C("4")]),
    ("DZH", [C("4"), C("4"), C("4")]),
    ("DZS", [C("4"), C("4"), C("4")]),
    ("E", [C("0"), C("_"), C("_")]),
    ("EI", [C("0"), C("1"), C("_")]),
    ("EJ", [C("0"), C("1"), C("_")]),
    ("EU", [C("1"), C("1"), C("_")]),
    ("EY", [C("0"), C("1"), C("_")]),
    ("F", [C("7"), C("7"), C("7")]),
    ("FB", [C("7"), C("7"), C("7")]),
    ("G", [C("5"), C("5"), C("5")]),
    ("H", [C("5"), C("5"), C("_")]),
    ("I", [C("0"), C("_"), C("_")]),
    ("IA", [C("1"), C("_"), C("_")]),
    ("IE", [C("1"), C("_"), C("_")]),
    ("IO", [C("1"), C("_"), C("_")]),
    ("IU", [C("1"), C("_"), C("_")]),
    ("J", [E("1", "4"), E("_", "4"), E("_", "4")]),
    ("K", [C("5"), C("5"), C("5")]),
    ("KH", [C("5"), C("5"), C("5")]),
    ("KS", [C("5"), C("54"), C("54")]),
    ("L", [C("8"), C("8"), C("8")]),
    ("M", [C("6"), C("6"), C("6")]),
    ("MN", [C("6_6"), C("6_6"), C("6_6")]),
    ("N", [C("6"), C("6"), C("6")]),
    ("NM", [C("6_6"), C("6_6"), C("6_6")]),
    ("O", [C("0"), C("_"), C("_")]),
    ("OI", [C("0"), C("1"), C("_")]),
    ("OJ", [C("0"), C("1"), C("_")]),
    ("OY", [C("0"), C("1"), C("_")]),
    ("P", [C("7"), C("7"), C("7")]),
    ("PF", [C("7"), C("7"), C("7")]),
    ("PH", [C("7"), C("7"), C("7")]),
    ("Q", [C("5"), C("5"), C("5")]),
    ("R", [C("9"), C("9"), C("9")]),
    ("RS", [E("94", "4"), E("94", "4"), E("94", "4")]),
    ("RZ", [E("94", "4"), E("94", "4"), E("94", "4")]),
    ("S", [C("4"), C("4"), C("4")]),
    ("SC", [C("2"), C("4"), C("4")]),
    ("SCH", [C("4"), C("4"), C("4")]),
    ("SCHD", [C("2"), C("43"), C("43")]),
    ("SCHT", [C("2"), C("43"), C("43")]),
    ("SCHTCH", [C("2"), C("4"), C("4")]),
    ("SCHTSCH", [C("2"), C("4"), C("4")]),
    ("SCHTSH", [C("2"), C("4"), C("4")]),
    ("SD", [C("2"), C("43"), C("43")]),
    ("SH", [C("4"), C("4"), C("4")]),
    ("SHCH", [C("2"), C("4"), C("4")]),
    ("SHD", [C("2"), C("43"), C("43")]),
    ("SHT", [C("2"), C("43"), C("43")]),
    ("SHTCH", [C("2"), C("4"), C("4")]),
    ("SHTSH", [C("2"), C("4"), C("4")]),
    ("ST", [C("2"), C("43"), C("43")]),
    ("STCH", [C("2"), C("4"), C("4")]),
    ("STRS", [C("2"), C("4"), C("4")]),
    ("STRZ", [C("2"), C("4"), C("4")]),
    ("STSCH", [C("2"), C("4"), C("4")]),
    ("STSH", [C("2"), C("4"), C("4")]),
    ("SZ", [C("4"), C("4"), C("4")]),
    ("SZCS", [C("2"), C("4"), C("4")]),
    ("SZCZ", [C("2"), C("4"), C("4")]),
    ("SZD", [C("2"), C("43"), C("43")]),
    ("SZT", [C("2"), C("43"), C("43")]),
    ("T", [C("3"), C("3"), C("3")]),
    ("TC", [C("4"), C("4"), C("4")]),
    ("TCH", [C("4"), C("4"), C("4")]),
    ("TH", [C("3"), C("3"), C("3")]),
    ("THS", [C("4"), C("4"), C("4")]),
    ("TRS", [C("4"), C("4"), C("4")]),
    ("TRZ", [C("4"), C("4"), C("4")]),
    ("TS", [C("4"), C("4"), C("4")]),
    ("TSCH", [C("4"), C("4"), C("4")]),
    ("TSH", [C("4"), C("4"), C("4")]),
    ("TSZ", [C("4"), C("4"), C("4")]),
    ("TTCH", [C("4"), C("4"), C("4")]),
    ("TTS", [C("4"), C("4"), C("4")]),
    ("TTSCH", [C("4"), C("4"), C("4")]),
    ("TTSZ", [C("4"), C("4"), C("4")]),
    ("TTZ", [C("4"), C("4"), C("4")]),
    ("TZ", [C("4"), C("4"), C("4")]),
    ("TZS", [C("4"), C("4"), C("4")]),
    ("U", [C("0"), C("_"), C("_")]),
    ("UE", [C("0"), C("_"), C("_")]),
    ("UI", [C("0"), C("1"), C("_")]),
    ("UJ", [C("0"), C("1"), C("_")]),
    ("UY", [C("0"), C("1"), C("_")]),
    ("V", [C("7"), C("7"), C("7")]),
    ("W", [C("7"), C("7"), C("7")]),
    ("X", [C("5"), C("54"), C("54")]),
    ("Y", [C("1"), C("_"), C("_")]),
    ("Z", [C("4"), C("4"), C("4")]),
    ("ZD", [C("2"), C("43"), C("43")]),
    ("ZDZ", [C("2"), C("4"), C("4")]),
    ("ZDZH", [C("2"), C("4"), C("4")]),
    ("ZH", [C("4"), C("4"), C("4")]),
    ("ZHD", [C("2"), C("43"), C("43")]),
    ("ZHDZH", [C("2"), C("4"), C("4")]),
    ("ZS", [C("4"), C("4"), C("4")]),
    ("ZSCH", [C("4"), C("4"), C("4")]),
    ("ZSH", [C("4"), C("4"), C("4")]),
];

/// Daitch-Mokotoff Soundex encoder.
///
/// Only the letters `A`-`Z` are coded (after uppercasing and compatibility
/// decomposition, with `ß` read as `SS`). A token with no such letter encodes
/// to a single all-zero code.
#[derive(Debug, Clone)]
pub struct DaitchMokotoff {
    max_length: usize,
    zero_pad: bool,
    table: FxHashMap<&'static str, [Value; 3]>,
}

impl DaitchMokotoff {
    /// Creates an encoder producing zero-padded codes of `max_length` digits.
    ///
    /// `max_length` is clamped to `6..=64`.
    pub fn new(max_length: usize) -> Self {
        Self {
            max_length: max_length.clamp(6, 64),
            zero_pad: true,
            table: TABLE.iter().copied().collect(),
        }
    }

    /// Disables zero padding: codes are truncated but not padded.
    pub fn without_padding(mut self) -> Self {
        self.zero_pad = false;
        self
    }

    fn longest_group(&self, word: &str, pos: usize) -> Option<(usize, &[Value; 3])> {
        let longest = MAX_GROUP.min(word.len() - pos);
        (1..=longest)
            .rev()
            .find_map(|len| self.table.get(&word[pos..pos + len]).map(|value| (len, value)))
    }

    fn finish(&self, code: &str) -> String {
        let mut digits: String = code.chars().filter(|&c| c != PLACEHOLDER).take(self.max_length).collect();
        if self.zero_pad {
            while digits.len() < self.max_length {
                digits.push('0');
            }
        }
        digits
    }

    fn is_complete(&self, code: &str) -> bool {
        code.chars().filter(|&c| c != PLACEHOLDER).count() >= self.max_length
    }
}

impl Default for DaitchMokotoff {
    fn default() -> Self {
        Self::new(6)
    }
}

fn truncate_set(codes: &mut BTreeSet<String>) {
    while codes.len() > MAX_BRANCHES {
        codes.pop_last();
    }
}

/// Appends `value`, skipping characters equal to the previous one.
fn append_collapsed(code: &mut String, value: &str) {
    for c in value.chars() {
        if !code.ends_with(c) {
            code.push(c);
        }
    }
}

impl PhoneticEncoder for DaitchMokotoff {
    fn encode(&self, token: &Token) -> PhoneticCode {
        let word: String = upper_decomposed(&token.as_str().replace('ß', "SS"), |c| c.is_ascii_uppercase())
            .into_iter()
            .collect();

        if word.is_empty() {
            return PhoneticCode::single(self.finish(if self.zero_pad { "" } else { "0" }));
        }

        let mut active: BTreeSet<String> = BTreeSet::new();
        active.insert(String::new());
        let mut complete: BTreeSet<String> = BTreeSet::new();

        let mut pos = 0;
        while pos < word.len() && !active.is_empty() {
            let Some((len, values)) = self.longest_group(&word, pos) else {
                // Every single letter has an entry, so this is unreachable
                pos += 1;
                continue;
            };
            let value = if pos == 0 {
                values[0]
            } else if word[pos + len..].starts_with(|c: char| VOWELS.contains(c)) {
                values[1]
            } else {
                values[2]
            };

            let branches: SmallVec<[&str; 2]> = match value {
                Value::Code(a) => smallvec![a],
                Value::Either(a, b) => smallvec![a, b],
            };

            let mut next = BTreeSet::new();
            for code in &active {
                for branch in &branches {
                    let mut extended = code.clone();
                    append_collapsed(&mut extended, branch);
                    if self.is_complete(&extended) {
                        complete.insert(self.finish(&extended));
                    } else {
                        next.insert(extended);
                    }
                }
            }
            truncate_set(&mut next);
            truncate_set(&mut complete);
            active = next;
            pos += len;
        }

        complete.extend(active.iter().map(|code| self.finish(code)));
        truncate_set(&mut complete);
        PhoneticCode::alternatives(complete)
    }

    fn code_length(&self) -> CodeLength {
        if self.zero_pad {
            CodeLength::Fixed(self.max_length)
        } else {
            CodeLength::AtMost(self.max_length)
        }
    }

    fn description(&self) -> &'static str {
        "Daitch-Mokotoff Soundex (Eastern European names)"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dm(word: &str) -> Vec<String> {
        DaitchMokotoff::default()
            .encode(&Token::raw(word))
            .parts()
            .to_vec()
    }

    #[test]
    fn test_reference_codes() {
        assert_eq!(dm("Christopher"), ["494379", "594379"]);
        assert_eq!(dm("Niall"), ["680000"]);
        assert_eq!(dm("Smith"), ["463000"]);
        assert_eq!(dm("Schmidt"), ["463000"]);
    }

    #[test]
    fn test_long_unpadded() {
        let encoder = DaitchMokotoff::new(20).without_padding();
        let code = encoder.encode(&Token::raw("The quick brown fox"));
        assert_eq!(code.parts(), ["35457976754", "3557976754"]);
    }

    #[test]
    fn test_no_letters() {
        assert_eq!(dm(""), ["000000"]);
        assert_eq!(dm("¿123?"), ["000000"]);
        let unpadded = DaitchMokotoff::default().without_padding();
        assert_eq!(unpadded.encode(&Token::raw("")).parts(), ["0"]);
    }

    #[test]
    fn test_max_length_is_clamped() {
        assert_eq!(DaitchMokotoff::new(2).code_length(), CodeLength::Fixed(6));
        assert_eq!(DaitchMokotoff::new(100).code_length(), CodeLength::Fixed(64));
    }

    #[test]
    fn test_branching_stays_bounded() {
        let word = "CHL".repeat(200);
        let encoder = DaitchMokotoff::new(64);
        let code = encoder.encode(&Token::raw(&word));
        assert!(code.parts().len() <= MAX_BRANCHES);
        assert!(code.parts().iter().all(|part| part.len() == 64));
    }
}
