//! American Soundex.

use super::{CodeLength, PhoneticCode, PhoneticEncoder};
use crate::token::Token;

/// Soundex digit for each ASCII letter; `0` for vowels, H, W and Y.
const SOUNDEX_DIGITS: &[u8; 26] = b"01230120022455012623010202";

/// American Soundex, with the rule that H and W do not separate letters
/// carrying the same digit.
///
/// Only ASCII letters are considered; everything else is ignored. A token
/// without ASCII letters encodes to `0000`. Codes are padded with zeros and
/// truncated to four characters.
#[derive(Debug, Clone, Copy, Default)]
pub struct Soundex;

impl Soundex {
    /// Creates the encoder.
    pub fn new() -> Self {
        Self
    }
}

impl PhoneticEncoder for Soundex {
    fn encode(&self, token: &Token) -> PhoneticCode {
        let mut letters = token
            .chars()
            .filter(char::is_ascii_alphabetic)
            .map(|c| c.to_ascii_uppercase());

        let Some(first) = letters.next() else {
            return PhoneticCode::single("0000");
        };

        let mut code = String::with_capacity(4);
        code.push(first);
        let mut previous = digit(first);

        for letter in letters {
            if code.len() == 4 {
                break;
            }
            let current = digit(letter);
            if current != b'0' && current != previous {
                code.push(current as char);
            }
            if current != b'0' || !matches!(letter, 'H' | 'W') {
                previous = current;
            }
        }

        while code.len() < 4 {
            code.push('0');
        }
        PhoneticCode::single(code)
    }

    fn code_length(&self) -> CodeLength {
        CodeLength::Fixed(4)
    }

    fn description(&self) -> &'static str {
        "American Soundex"
    }
}

#[inline]
fn digit(letter: char) -> u8 {
    SOUNDEX_DIGITS[(letter as u8 - b'A') as usize]
}
