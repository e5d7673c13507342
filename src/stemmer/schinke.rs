//! The Schinke Latin stemmer.

use unicode_normalization::UnicodeNormalization;

use crate::phonetic::{CodeLength, PhoneticCode, PhoneticEncoder};
use crate::token::Token;

/// Words whose final "que" is part of the word rather than the enclitic.
const KEEP_QUE: &[&str] = &[
    "at", "quo", "ne", "ita", "abs", "aps", "abus", "adae", "adus", "deni", "de", "sus", "obli",
    "perae", "plenis", "quando", "quis", "quae", "cuius", "cui", "quem", "quam", "qua", "qui",
    "quorum", "quarum", "quibus", "quos", "quas", "quotusquis", "quous", "ubi", "undi", "us",
    "uter", "uti", "utro", "utribi", "tor", "co", "conco", "contor", "detor", "deco", "exco",
    "extor", "obtor", "optor", "retor", "reco", "attor", "inco", "intor", "praetor",
];

/// Noun endings, longest first.
const NOUN_ENDINGS: &[&str] = &[
    "ibus", "ius", "is", "nt", "ae", "os", "am", "ud", "as", "um", "em", "us", "es", "ia", "a",
    "e", "i", "o", "u",
];

enum VerbEnding {
    Strip(&'static str),
    Replace(&'static str, &'static str),
}

/// Verb endings, longest first. Replacements keep a stem marker.
const VERB_ENDINGS: &[VerbEnding] = &[
    VerbEnding::Replace("iuntur", "i"),
    VerbEnding::Replace("beris", "bi"),
    VerbEnding::Replace("erunt", "i"),
    VerbEnding::Replace("untur", "i"),
    VerbEnding::Strip("mini"),
    VerbEnding::Strip("ntur"),
    VerbEnding::Strip("stis"),
    VerbEnding::Replace("iunt", "i"),
    VerbEnding::Strip("mur"),
    VerbEnding::Strip("mus"),
    VerbEnding::Strip("ris"),
    VerbEnding::Strip("sti"),
    VerbEnding::Strip("tis"),
    VerbEnding::Strip("tur"),
    VerbEnding::Replace("bor", "bi"),
    VerbEnding::Replace("ero", "eri"),
    VerbEnding::Replace("unt", "i"),
    VerbEnding::Strip("ns"),
    VerbEnding::Strip("nt"),
    VerbEnding::Strip("ri"),
    VerbEnding::Replace("bo", "bi"),
    VerbEnding::Strip("m"),
    VerbEnding::Strip("r"),
    VerbEnding::Strip("s"),
    VerbEnding::Strip("t"),
];

/// A stem must keep at least this many letters.
const MIN_STEM: usize = 2;

/// The noun and verb stems of a Latin word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LatinStems {
    /// Stem under noun inflection.
    pub noun: String,
    /// Stem under verb conjugation.
    pub verb: String,
}

fn noun_stem(word: &str) -> String {
    match NOUN_ENDINGS.iter().find(|e| word.ends_with(*e)) {
        Some(e) if word.len() >= e.len() + MIN_STEM => word[..word.len() - e.len()].to_string(),
        _ => word.to_string(),
    }
}

fn verb_stem(word: &str) -> String {
    for ending in VERB_ENDINGS {
        match *ending {
            VerbEnding::Strip(e) if word.ends_with(e) => {
                return if word.len() >= e.len() + MIN_STEM {
                    word[..word.len() - e.len()].to_string()
                } else {
                    word.to_string()
                };
            }
            VerbEnding::Replace(e, marker) if word.ends_with(e) => {
                let stem = &word[..word.len() - e.len()];
                return if stem.len() >= MIN_STEM {
                    format!("{stem}{marker}")
                } else {
                    word.to_string()
                };
            }
            _ => {}
        }
    }
    word.to_string()
}

/// Stems a Latin word.
///
/// The word is lowercased, decomposed and reduced to the letters `a` to
/// `z`; `j` becomes `i` and `v` becomes `u`. An enclitic "que" is removed
/// unless the word is in the list of words ending in "que" (or is "que"
/// itself), in which case both stems are the whole word.
///
/// ```rust
/// use libphonetic::stemmer::schinke;
///
/// let stems = schinke("populusque");
/// assert_eq!(stems.noun, "popul");
/// assert_eq!(stems.verb, "populu");
/// ```
pub fn schinke(word: &str) -> LatinStems {
    let word: String = word
        .to_lowercase()
        .nfkd()
        .filter(char::is_ascii_lowercase)
        .map(|c| match c {
            'j' => 'i',
            'v' => 'u',
            c => c,
        })
        .collect();

    let word = match word.strip_suffix("que") {
        Some(head) if head.is_empty() || KEEP_QUE.contains(&head) => {
            return LatinStems {
                noun: word.clone(),
                verb: word,
            };
        }
        Some(head) => head.to_string(),
        None => word,
    };

    LatinStems {
        noun: noun_stem(&word),
        verb: verb_stem(&word),
    }
}

/// Schinke stemmer as an encoder: a two-part code of noun and verb stem.
///
/// Words of any length are accepted and the stems are never truncated.
#[derive(Debug, Clone, Copy, Default)]
pub struct Schinke;

impl Schinke {
    /// Creates the encoder.
    pub fn new() -> Self {
        Self
    }
}

impl PhoneticEncoder for Schinke {
    fn encode(&self, token: &Token) -> PhoneticCode {
        let stems = schinke(token.as_str());
        PhoneticCode::sequence([stems.noun, stems.verb])
    }

    fn code_length(&self) -> CodeLength {
        CodeLength::Unbounded
    }

    fn description(&self) -> &'static str {
        "Schinke Latin stemmer (noun stem, verb stem)"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stems(word: &str) -> (String, String) {
        let s = schinke(word);
        (s.noun, s.verb)
    }

    fn pair(noun: &str, verb: &str) -> (String, String) {
        (noun.to_string(), verb.to_string())
    }

    #[test]
    fn test_reference_words() {
        assert_eq!(stems("atque"), pair("atque", "atque"));
        assert_eq!(stems("census"), pair("cens", "censu"));
        assert_eq!(stems("virum"), pair("uir", "uiru"));
        assert_eq!(stems("populusque"), pair("popul", "populu"));
        assert_eq!(stems("senatus"), pair("senat", "senatu"));
    }

    #[test]
    fn test_que_words() {
        assert_eq!(stems("que"), pair("que", "que"));
        assert_eq!(stems("itaque"), pair("itaque", "itaque"));
    }

    #[test]
    fn test_verb_replacements() {
        assert_eq!(stems("amabuntur"), pair("amabuntur", "amabi"));
        assert_eq!(stems("audiuntur"), pair("audiuntur", "audi"));
        assert_eq!(stems("legerunt"), pair("legeru", "legi"));
        assert_eq!(stems("amabo"), pair("amab", "amabi"));
        assert_eq!(stems("amaberis"), pair("amaber", "amabi"));
        assert_eq!(stems("amantur"), pair("amantur", "ama"));
    }

    #[test]
    fn test_short_stems_are_kept() {
        assert_eq!(stems("ius"), pair("ius", "iu"));
        assert_eq!(stems("est"), pair("est", "es"));
        assert_eq!(stems(""), pair("", ""));
    }

    #[test]
    fn test_letters_are_folded() {
        assert_eq!(stems("Über"), pair("uber", "ube"));
        assert_eq!(stems("jovem"), pair("iou", "ioue"));
    }

    #[test]
    fn test_encoder_emits_noun_then_verb() {
        let code = Schinke::new().encode(&Token::raw("senatus"));
        assert_eq!(code.parts(), ["senat", "senatu"]);
    }
}
