//! FONEM, a phonetic code for French surnames.
//!
//! FONEM was designed for surnames of the Saguenay region in Québec. It is a
//! cascade of about sixty rewrite rules on vowels (`V-*`) and consonants
//! (`C-*`), applied in a fixed order. Rules C-11, C-16 and C-17 insert a `#`
//! marker to block later rules from applying to their output; the final
//! rules C-34 and C-35 remove the markers.

use super::application::apply_cascade;
use super::types::{Alternative, Context, RewriteRule};
use super::{upper_decomposed, CodeLength, PhoneticCode, PhoneticEncoder};
use crate::token::Token;

const VOWELS: &str = "AEIOUY";
const CONSONANTS: &str = "BCDFGHJKLMNPQRSTVWXZ";
const CONSONANTS_NO_N: &str = "BCDFGHJKLMPQRSTVWXZ";

/// FONEM encoder.
///
/// Input is uppercased and decomposed; `Æ` and `Œ` are expanded, and
/// everything except `A`-`Z` and `-` is dropped. Tokens without letters
/// encode to the empty code (or to the hyphens they contain). Tokens of
/// any length are accepted; the code is never truncated.
#[derive(Debug, Clone)]
pub struct Fonem {
    rules: Vec<RewriteRule>,
}

impl Fonem {
    /// Creates the encoder.
    pub fn new() -> Self {
        Self { rules: rules() }
    }
}

impl Default for Fonem {
    fn default() -> Self {
        Self::new()
    }
}

impl PhoneticEncoder for Fonem {
    fn encode(&self, token: &Token) -> PhoneticCode {
        let expanded = token
            .as_str()
            .to_uppercase()
            .replace('Æ', "AE")
            .replace('Œ', "OE");
        let word = upper_decomposed(&expanded, |c| c.is_ascii_uppercase() || c == '-');
        PhoneticCode::single(apply_cascade(&self.rules, &word).into_iter().collect::<String>())
    }

    fn code_length(&self) -> CodeLength {
        CodeLength::Unbounded
    }

    fn description(&self) -> &'static str {
        "FONEM (French surnames)"
    }
}

fn alt(pattern: &str, replacement: &str) -> Alternative {
    Alternative::new(pattern, replacement)
}

fn alts(patterns: &[&str], replacement: &str) -> Vec<Alternative> {
    patterns.iter().map(|p| alt(p, replacement)).collect()
}

fn alts_at_end(patterns: &[&str], replacement: &str) -> Vec<Alternative> {
    patterns.iter().map(|p| alt(p, replacement).at_end()).collect()
}

/// V-14: a vowel followed by the same vowel is dropped.
fn drop_doubled_vowels(word: &[char]) -> Vec<char> {
    word.iter()
        .enumerate()
        .filter(|&(i, c)| !(VOWELS.contains(*c) && word.get(i + 1) == Some(c)))
        .map(|(_, &c)| c)
        .collect()
}

/// C-28: doubled consonants (other than C, L and S) are reduced to one.
fn reduce_doubled_consonants(word: &[char]) -> Vec<char> {
    let mut out = Vec::with_capacity(word.len());
    let mut pos = 0;
    while pos < word.len() {
        let c = word[pos];
        out.push(c);
        if "BDFGHJKMNPQRTVWXZ".contains(c) && word.get(pos + 1) == Some(&c) {
            pos += 2;
        } else {
            pos += 1;
        }
    }
    out
}

/// C-29: a final consonant cluster loses its last consonant, except for
/// the endings -ILS, -CH, -SH, -MP, -NP and R followed by C, F, K, L, N, S or X.
fn simplify_final_cluster(word: &[char]) -> Vec<char> {
    let n = word.len();
    if word.ends_with(&['I', 'L', 'S']) || n < 2 {
        return word.to_vec();
    }
    let (a, b) = (word[n - 2], word[n - 1]);
    let kept = matches!((a, b), ('C' | 'S', 'H') | ('M' | 'N', 'P'))
        || (a == 'R' && "CFKLNSX".contains(b));
    if !kept && CONSONANTS.contains(a) && CONSONANTS.contains(b) {
        word[..n - 1].to_vec()
    } else {
        word.to_vec()
    }
}

/// C-30 and C-32: SAINT, SAIN, SINT, SIN, SEIN, SEIM, CINQ, CIN or ST at the
/// start of the word, not followed by E, optionally followed by a hyphen,
/// become `ST-`.
fn saint_prefix(word: &[char]) -> Vec<char> {
    const PREFIXES: [&str; 9] = ["SAINT", "SAIN", "SINT", "SIN", "SEIN", "SEIM", "CINQ", "CIN", "ST"];
    for prefix in PREFIXES {
        let prefix: Vec<char> = prefix.chars().collect();
        if !word.starts_with(&prefix) || word.get(prefix.len()) == Some(&'E') {
            continue;
        }
        let mut consumed = prefix.len();
        if word.get(consumed) == Some(&'-') {
            consumed += 1;
        }
        let mut out: Vec<char> = "ST-".chars().collect();
        out.extend_from_slice(&word[consumed..]);
        return out;
    }
    word.to_vec()
}

/// `I?[MN]` follows the boundary.
fn before_nasal(word: &[char], pos: usize) -> bool {
    match word.get(pos) {
        Some('M' | 'N') => true,
        Some('I') => matches!(word.get(pos + 1), Some('M' | 'N')),
        _ => false,
    }
}

/// `I(?!LL)` follows the boundary.
fn before_i_not_ll(word: &[char], pos: usize) -> bool {
    word.get(pos) == Some(&'I') && !(word.get(pos + 1) == Some(&'L') && word.get(pos + 2) == Some(&'L'))
}

fn doubled_letter_rules() -> Vec<RewriteRule> {
    vec![
        RewriteRule::custom("V-14", drop_doubled_vowels),
        RewriteRule::custom("C-28", reduce_doubled_consonants),
        RewriteRule::one("C-28a", alt("CC", "C").after(Context::InOrEdge(CONSONANTS))),
        RewriteRule::one("C-28b", alt("SS", "S").before(Context::InOrEdge(CONSONANTS))),
        RewriteRule::one("C-28bb", alt("SS", "S").after(Context::InOrEdge(CONSONANTS))),
        RewriteRule::one("C-28c", alt("LL", "L").before(Context::NotIn("I"))),
        RewriteRule::one("C-28d", alt("ILE", "ILLE").at_end()),
    ]
}

fn rules() -> Vec<RewriteRule> {
    let mut rules = doubled_letter_rules();

    rules.extend([
        RewriteRule::any("C-12", alts(&["GEO", "GEAU"], "JO")),
        RewriteRule::one("C-8", alt("CC", "K").after(Context::In("AOU"))),
        RewriteRule::one("C-9", alt("CC", "X").after(Context::In("EIY"))),
        RewriteRule::one("C-10", alt("G", "J").after(Context::In("EIY"))),
        RewriteRule::one("C-16", alt("MAC", "MA#").at_start().after(Context::In(CONSONANTS))),
        RewriteRule::one("C-17", alt("MC", "MA#").at_start()),
        RewriteRule::one(
            "C-2",
            alt("C", "SS").before(Context::In(VOWELS)).after(Context::In("EIY")),
        ),
        RewriteRule::one(
            "C-3",
            alt("C", "S")
                .before(Context::In("BDFGHJKLMNPQRSTVWZ"))
                .after(Context::In("EIY")),
        ),
        RewriteRule::one("C-7", alt("C", "K").after(Context::In("BDFGJKLMNPQRSTVWXZ"))),
        RewriteRule::any("V-2,5", alts_at_end(&["EAULT", "EAULX", "AULT", "AULX", "OLT", "OLX"], "O")),
        RewriteRule::any("V-3,4", alts_at_end(&["EAUT", "EAUX", "AUT", "AUX"], "O")),
        RewriteRule::any("V-6", alts_at_end(&["EAULD", "EAUD", "AULD", "AUD"], "O")),
        RewriteRule::any("V-1", alts(&["EAU", "AU"], "O")),
        RewriteRule::one("C-14", alt("H", "").before(Context::NotIn("PCS"))),
        RewriteRule::any(
            "C-31,33",
            ["SAINTE-", "SAINTE", "STE-", "STE"]
                .iter()
                .map(|p| alt(p, "STE-").at_start())
                .collect(),
        ),
        RewriteRule::custom("C-30,32", saint_prefix),
        RewriteRule::one("C-11", alt("GA", "G#").after(Context::Test(before_nasal))),
        RewriteRule::any(
            "V-15",
            alts(&["AM", "EM"], "EN")
                .into_iter()
                .map(|a| a.after(Context::In(CONSONANTS_NO_N)))
                .collect(),
        ),
        RewriteRule::one("V-17", alt("AN", "EN").after(Context::In(CONSONANTS))),
        RewriteRule::any(
            "V-18",
            alts(&["AIM", "AIN", "EIN"], "IN")
                .into_iter()
                .map(|a| a.after(Context::InOrEdge(CONSONANTS)))
                .collect(),
        ),
        RewriteRule::one("V-7", alt("AY", "E").before(Context::NotIn("G")).at_end()),
        RewriteRule::one("V-8", alt("EUX", "EU").at_end()),
        RewriteRule::one("V-9", alt("EY", "E").after(Context::InOrEdge(CONSONANTS))),
        RewriteRule::literal("V-10", "Y", "I"),
        RewriteRule::one(
            "V-11",
            alt("I", "Y").before(Context::In(VOWELS)).after(Context::In(VOWELS)),
        ),
        RewriteRule::one("V-12", alt("ILL", "Y").before(Context::In(VOWELS))),
        RewriteRule::any(
            "V-13",
            vec![
                alt("OU", "W").after(Context::In("AEOU")),
                alt("OU", "W").after(Context::Test(before_i_not_ll)),
            ],
        ),
        RewriteRule::one("V-16", alt("OM", "ON").after(Context::In(CONSONANTS_NO_N))),
        RewriteRule::any(
            "V-19",
            alts_at_end(&["BORNE", "BORN", "BURNE", "BURN", "BOURNE", "BOURN"], "BURN"),
        ),
        RewriteRule::any(
            "V-20",
            vec![
                alt("IM", "IN").at_start(),
                alt("IM", "IN")
                    .before(Context::In(CONSONANTS))
                    .after(Context::In(CONSONANTS_NO_N)),
            ],
        ),
        RewriteRule::literal("C-1", "BV", "V"),
        RewriteRule::one("C-4", alt("C", "S").at_start().after(Context::In("EIY"))),
        RewriteRule::one("C-5", alt("C", "K").at_start().after(Context::In("OUA"))),
        RewriteRule::one("C-6", alt("C", "K").before(Context::In(VOWELS)).at_end()),
        RewriteRule::one("C-13", alt("GNI", "GN").after(Context::In(VOWELS))),
        RewriteRule::literal("C-15", "JEA", "JA"),
        RewriteRule::literal("C-18", "PH", "F"),
        RewriteRule::literal("C-19", "QU", "K"),
        RewriteRule::one("C-20", alt("SC", "S").at_start().after(Context::In("EIY"))),
        RewriteRule::one(
            "C-21",
            alt("SC", "SS").before(Context::AnyChar).after(Context::In("EIY")),
        ),
        RewriteRule::one(
            "C-22",
            alt("SC", "SK").before(Context::AnyChar).after(Context::In("AOU")),
        ),
        RewriteRule::literal("C-23", "SH", "CH"),
        RewriteRule::one("C-24", alt("TIA", "SSIA").at_end()),
        RewriteRule::one("C-25", alt("W", "").before(Context::In("AIOUY"))),
        RewriteRule::any("C-26", alts(&["XC", "XS", "XZ"], "X")),
        RewriteRule::any(
            "C-27",
            vec![
                alt("Z", "S").before(Context::In(VOWELS)),
                alt("Z", "S")
                    .before(Context::In(CONSONANTS))
                    .after(Context::In(CONSONANTS)),
            ],
        ),
        RewriteRule::custom("C-29", simplify_final_cluster),
    ]);

    rules.extend(doubled_letter_rules());
    rules.push(RewriteRule::literal("C-34", "G#", "GA"));
    rules.push(RewriteRule::literal("C-35", "MA#", "MAC"));
    rules
}
