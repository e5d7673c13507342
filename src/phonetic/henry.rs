//! Early Henry code for French names.
//!
//! This is the early form of Louis Henry's code, as used by Légaré et al.
//! (1972), not the later 1976 revision. Initial vowels and diphthongs are
//! adjusted first (rule I), then letters are coded left to right (rule II),
//! endings are simplified and non-initial vowels dropped.

use super::{upper_decomposed, CodeLength, PhoneticCode, PhoneticEncoder};
use crate::token::Token;

const VOWELS: &str = "AEIOUY";
const CONSONANTS: &str = "BCDFGHJKLMNPQRSTVWXZ";

#[inline]
fn is_vowel(c: Option<char>) -> bool {
    c.is_some_and(|c| VOWELS.contains(c))
}

#[inline]
fn is_consonant(c: Option<char>) -> bool {
    c.is_some_and(|c| CONSONANTS.contains(c))
}

#[inline]
fn is_one_of(c: Option<char>, set: &str) -> bool {
    c.is_some_and(|c| set.contains(c))
}

fn diphthong(first: char, second: Option<char>) -> Option<char> {
    match (first, second?) {
        ('A', 'I' | 'Y') | ('E', 'I') => Some('E'),
        ('A', 'U') | ('O', 'I' | 'U') => Some('O'),
        ('E', 'U') => Some('U'),
        _ => None,
    }
}

/// Early Henry code encoder.
///
/// Only `A`-`Z` are considered after uppercasing and decomposition; tokens
/// without such letters encode to the empty code.
#[derive(Debug, Clone, Copy)]
pub struct HenryEarly {
    max_length: usize,
}

impl HenryEarly {
    /// Creates an encoder truncating codes to `max_length` characters.
    pub fn new(max_length: usize) -> Self {
        Self { max_length }
    }
}

impl Default for HenryEarly {
    fn default() -> Self {
        Self::new(3)
    }
}

/// Rule I: adjustments of an initial vowel.
fn adjust_initial_vowel(word: &mut Vec<char>) {
    let first = word[0];
    if !VOWELS.contains(first) {
        return;
    }
    let second = word.get(1).copied();
    let third = word.get(2).copied();

    if (is_consonant(second) && !is_one_of(second, "MN") && is_consonant(third))
        || (is_consonant(second) && !is_consonant(third))
    {
        if first == 'Y' {
            word[0] = 'I';
        }
    } else if is_one_of(second, "MN") && is_consonant(third) {
        if first == 'E' {
            word[0] = 'A';
        } else if matches!(first, 'I' | 'U' | 'Y') {
            word[0] = 'E';
        }
    } else if let Some(replacement) = diphthong(first, second) {
        word.splice(0..2, [replacement]);
    } else if is_vowel(second) && first == 'Y' {
        word[0] = 'I';
    }
}

/// Rule II: letter-by-letter coding.
fn code_letters(word: &[char]) -> String {
    let at = |i: usize| word.get(i).copied();
    let mut code = String::with_capacity(word.len());
    let mut skip = 0;

    for (pos, &c) in word.iter().enumerate() {
        let next = at(pos + 1);
        let prev = pos.checked_sub(1).and_then(at);

        if skip > 0 {
            skip -= 1;
        } else if VOWELS.contains(c) {
            code.push(c);
        } else if Some(c) == next {
            skip = 1;
            code.push(c);
        } else if matches!((c, next), ('C', Some('Q')) | ('D', Some('T')) | ('S', Some('C'))) {
            continue;
        } else if let Some(simple) = match c {
            'W' => Some('V'),
            'X' | 'Z' => Some('S'),
            _ => None,
        } {
            code.push(simple);
        } else if c == 'C' {
            if is_one_of(next, "AOULR") {
                code.push('K');
            } else if is_one_of(next, "EIY") {
                code.push('S');
            } else if next == Some('H') {
                code.push(if is_vowel(at(pos + 2)) { 'C' } else { 'K' });
            } else {
                code.push('C');
            }
        } else if c == 'G' {
            if is_one_of(next, "AOULR") {
                code.push('G');
            } else if is_one_of(next, "EIY") {
                code.push('J');
            } else if next == Some('N') {
                code.push('N');
            }
        } else if c == 'P' {
            code.push(if next == Some('H') { 'F' } else { 'P' });
        } else if c == 'Q' {
            let follows_ue = next == Some('U') && is_one_of(at(pos + 2), "EIY");
            code.push(if follows_ue { 'G' } else { 'K' });
        } else if c == 'S' {
            let rest = &word[pos..];
            if rest.starts_with(&['S', 'A', 'I', 'N', 'T', 'E']) {
                code.push('X');
                skip = 5;
            } else if rest.starts_with(&['S', 'A', 'I', 'N', 'T']) {
                code.push('X');
                skip = 4;
            } else if rest.starts_with(&['S', 'T', 'E']) {
                code.push('X');
                skip = 2;
            } else if rest.starts_with(&['S', 'T']) {
                code.push('X');
                skip = 1;
            } else if !is_consonant(next) {
                code.push('S');
            }
        } else if (c == 'H' && is_consonant(prev))
            || (CONSONANTS.contains(c) && !"LR".contains(c) && is_consonant(next) && !is_one_of(next, "LR"))
            || (c == 'L' && is_one_of(next, "MN"))
            || ("MN".contains(c) && is_vowel(prev) && is_consonant(next))
        {
            continue;
        } else {
            code.push(c);
        }
    }
    code
}

/// Final simplifications of rule II.
fn simplify_ending(code: &mut String) {
    let chars: Vec<char> = code.chars().collect();
    let n = chars.len();
    let last = chars.last().copied();
    let second_last = n.checked_sub(2).map(|i| chars[i]);

    if code.ends_with("AULT") || code.ends_with("EULT") || code.ends_with("OULT") {
        code.truncate(code.len() - 2);
    } else if second_last == Some('R') && is_consonant(last) {
        code.pop();
    } else if is_vowel(second_last) && is_one_of(last, "DMNST") {
        code.pop();
    } else if code.ends_with("ER") {
        code.pop();
    }
}

impl PhoneticEncoder for HenryEarly {
    fn encode(&self, token: &Token) -> PhoneticCode {
        let mut word = upper_decomposed(token.as_str(), |c| c.is_ascii_uppercase());
        if word.is_empty() {
            return PhoneticCode::single("");
        }

        adjust_initial_vowel(&mut word);
        let mut code = code_letters(&word);
        simplify_ending(&mut code);

        let mut chars = code.chars();
        let mut result: String = chars.next().into_iter().collect();
        result.extend(chars.filter(|c| !VOWELS.contains(*c)));
        super::truncate_chars(&mut result, self.max_length);
        PhoneticCode::single(result)
    }

    fn code_length(&self) -> CodeLength {
        CodeLength::AtMost(self.max_length)
    }

    fn description(&self) -> &'static str {
        "Henry code, early version (French names)"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn henry(word: &str) -> String {
        HenryEarly::default().encode(&Token::raw(word)).to_string()
    }

    #[test]
    fn test_reference_codes() {
        assert_eq!(henry("Marchand"), "MRC");
        assert_eq!(henry("Beaulieu"), "BL");
        assert_eq!(henry("Beaumont"), "BM");
        assert_eq!(henry("Legrand"), "LGR");
        assert_eq!(henry("Pelletier"), "PLT");
    }

    #[test]
    fn test_no_letters() {
        assert_eq!(henry(""), "");
        assert_eq!(henry("-- 42"), "");
    }

    #[test]
    fn test_saint_prefix_codes_as_x() {
        assert!(henry("Saint-Pierre").starts_with('X'));
    }
}
