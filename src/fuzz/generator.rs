//! Reproducible adversarial input generation.
//!
//! Every case is derived from `(seed, index)` alone, so any case of a run
//! can be regenerated without replaying the cases before it.

use std::fmt;
use std::ops::Range;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Upper bound on the length of a generated input, in code points.
pub const MAX_LEN: usize = 256;

/// The family of strings a case was drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    /// The empty string
    Empty,
    /// Only whitespace, including non-ASCII spaces and zero-width characters
    Whitespace,
    /// Only digits, ASCII or not
    Digits,
    /// Printable ASCII
    Ascii,
    /// Latin letters with diacritics
    Latin,
    /// Combining marks, possibly with no base character
    Combining,
    /// Characters from several scripts, including emoji
    MixedScripts,
    /// Control characters mixed with letters
    Control,
    /// Uniformly random scalar values
    AnyChar,
    /// Characters with unusual case mappings or decompositions
    Tricky,
    /// Names assembled from particles, titles and numerals
    Name,
    /// Long strings of mixed characters
    Long,
    /// A short unit repeated many times
    Repeated,
}

const SHAPES: [Shape; 13] = [
    Shape::Empty,
    Shape::Whitespace,
    Shape::Digits,
    Shape::Ascii,
    Shape::Latin,
    Shape::Combining,
    Shape::MixedScripts,
    Shape::Control,
    Shape::AnyChar,
    Shape::Tricky,
    Shape::Name,
    Shape::Long,
    Shape::Repeated,
];

const WHITESPACE: &[char] = &[
    ' ', '\t', '\n', '\r', '\u{a0}', '\u{2003}', '\u{3000}', '\u{200b}', '\u{feff}',
];

const DIGITS: &[char] = &[
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', '٣', '१', '①', '²', '５',
];

const ACCENTED: &str = "áàâäãåæçéèêëíìîïñóòôöõøœßúùûüýÿþðłśźżčřšžőűÁÄÅÇÉÑÖØÜŁŠŽ";

const TRICKY: &[char] = &[
    'İ', 'ı', 'ß', 'ẞ', 'ŉ', 'Σ', 'ς', 'ǅ', 'ǈ', 'ﬁ', 'ﬀ', 'Ａ', '℃', 'Ⅻ', 'ſ', 'K', 'Å', 'ᾼ',
    'ǰ', 'ﬃ', '㎒', '\u{301}', '\u{fffd}',
];

const SCRIPTS: &[(u32, u32)] = &[
    (0x0041, 0x005a),
    (0x0061, 0x007a),
    (0x0370, 0x03ff),
    (0x0400, 0x04ff),
    (0x0590, 0x05ff),
    (0x0600, 0x06ff),
    (0x0900, 0x097f),
    (0x0e00, 0x0e7f),
    (0x3040, 0x30ff),
    (0x4e00, 0x9fff),
    (0xac00, 0xd7a3),
    (0x1f300, 0x1f64f),
];

const NAME_PARTS: &[&str] = &[
    "van", "der", "de", "la", "di", "von", "Mc", "O'", "St.", "Saint-", "Ste.-", "Jr.", "Sr.",
    "II", "IV", "XVI", "the", "Elder", "Younger", ",", "-", "Smith", "Müller", "Åström",
    "Ñúñez", "Leonardo", "Bruegel", "Dupont", "Lindqvist", "Øvrebø", "Schwarzenegger",
    "Moskowitz", "Tchaikovsky",
];

const REPEAT_UNITS: &[&str] = &[
    "a", "h", "ch", "sz", "cs", "rz", "zs", "tsch", "ij", "ä", "ß", "ck", " ", "-",
];

/// A generated input together with the coordinates that regenerate it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuzzCase {
    /// Seed of the run.
    pub seed: u64,
    /// Position of the case in the run.
    pub index: u64,
    /// Family the input was drawn from.
    pub shape: Shape,
    /// Input for encoders, first input for comparators.
    pub input: String,
    /// Second input for comparators.
    pub partner: String,
}

impl FuzzCase {
    /// A one-line description from which the case can be replayed.
    pub fn label(&self) -> String {
        format!(
            "seed={} index={} input={:?} partner={:?}",
            self.seed, self.index, self.input, self.partner
        )
    }
}

impl fmt::Display for FuzzCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// Generates [`FuzzCase`]s for one seed.
///
/// # Example
///
/// ```rust
/// use libphonetic::fuzz::CaseGenerator;
///
/// let generator = CaseGenerator::new(42);
/// assert_eq!(generator.case(17), generator.case(17));
/// assert_eq!(generator.cases(0..10).count(), 10);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CaseGenerator {
    seed: u64,
}

impl CaseGenerator {
    /// Creates a generator for `seed`.
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// The seed of this generator.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// The case at `index`.
    pub fn case(&self, index: u64) -> FuzzCase {
        let mut rng = StdRng::seed_from_u64(case_seed(self.seed, index));
        let shape = SHAPES[rng.gen_range(0..SHAPES.len())];
        let input = generate(&mut rng, shape);
        let partner = match rng.gen_range(0..4) {
            0 => input.clone(),
            1 => mutate(&mut rng, &input),
            _ => {
                let other = SHAPES[rng.gen_range(0..SHAPES.len())];
                generate(&mut rng, other)
            }
        };
        FuzzCase {
            seed: self.seed,
            index,
            shape,
            input,
            partner,
        }
    }

    /// The cases at `indices`, in order.
    pub fn cases(&self, indices: Range<u64>) -> impl Iterator<Item = FuzzCase> + '_ {
        indices.map(move |index| self.case(index))
    }
}

fn splitmix64(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9e37_79b9_7f4a_7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

fn case_seed(seed: u64, index: u64) -> u64 {
    splitmix64(seed ^ splitmix64(index))
}

fn pick<T: Copy>(rng: &mut StdRng, items: &[T]) -> T {
    items[rng.gen_range(0..items.len())]
}

fn in_range(rng: &mut StdRng, lo: u32, hi: u32) -> char {
    char::from_u32(rng.gen_range(lo..=hi)).unwrap_or(char::REPLACEMENT_CHARACTER)
}

fn accented(rng: &mut StdRng) -> char {
    let count = ACCENTED.chars().count();
    ACCENTED
        .chars()
        .nth(rng.gen_range(0..count))
        .unwrap_or('é')
}

fn control(rng: &mut StdRng) -> char {
    if rng.gen_bool(0.5) {
        in_range(rng, 0x00, 0x1f)
    } else {
        in_range(rng, 0x7f, 0x9f)
    }
}

fn any_char(rng: &mut StdRng) -> char {
    match rng.gen_range(0..8) {
        0 => rng.gen_range('a'..='z'),
        1 => accented(rng),
        2 => in_range(rng, 0x300, 0x36f),
        3 => {
            let (lo, hi) = pick(rng, SCRIPTS);
            in_range(rng, lo, hi)
        }
        4 => control(rng),
        5 => pick(rng, DIGITS),
        6 => pick(rng, TRICKY),
        _ => rng.gen::<char>(),
    }
}

fn repeat_with(rng: &mut StdRng, len: Range<usize>, mut f: impl FnMut(&mut StdRng) -> char) -> String {
    let n = rng.gen_range(len);
    (0..n).map(|_| f(rng)).collect()
}

fn generate(rng: &mut StdRng, shape: Shape) -> String {
    match shape {
        Shape::Empty => String::new(),
        Shape::Whitespace => repeat_with(rng, 1..9, |r| pick(r, WHITESPACE)),
        Shape::Digits => repeat_with(rng, 1..13, |r| pick(r, DIGITS)),
        Shape::Ascii => repeat_with(rng, 1..17, |r| char::from(r.gen_range(0x20u8..0x7f))),
        Shape::Latin => repeat_with(rng, 1..17, |r| {
            if r.gen_bool(0.4) {
                accented(r)
            } else if r.gen_bool(0.5) {
                r.gen_range('a'..='z')
            } else {
                r.gen_range('A'..='Z')
            }
        }),
        Shape::Combining => {
            let mut out = String::new();
            for _ in 0..rng.gen_range(1..6) {
                if rng.gen_bool(0.8) {
                    out.push(rng.gen_range('a'..='z'));
                }
                for _ in 0..rng.gen_range(1..5) {
                    out.push(in_range(rng, 0x300, 0x36f));
                }
            }
            out
        }
        Shape::MixedScripts => repeat_with(rng, 1..13, |r| {
            let (lo, hi) = pick(r, SCRIPTS);
            in_range(r, lo, hi)
        }),
        Shape::Control => repeat_with(rng, 1..13, |r| {
            if r.gen_bool(0.5) {
                control(r)
            } else {
                r.gen_range('a'..='z')
            }
        }),
        Shape::AnyChar => repeat_with(rng, 1..17, |r| r.gen::<char>()),
        Shape::Tricky => repeat_with(rng, 1..9, |r| {
            if r.gen_bool(0.6) {
                pick(r, TRICKY)
            } else {
                r.gen_range('a'..='z')
            }
        }),
        Shape::Name => {
            let parts: Vec<&str> = (0..rng.gen_range(1..6))
                .map(|_| pick(rng, NAME_PARTS))
                .collect();
            parts.join(" ")
        }
        Shape::Long => repeat_with(rng, 64..MAX_LEN + 1, any_char),
        Shape::Repeated => {
            let unit = pick(rng, REPEAT_UNITS);
            let times = rng.gen_range(16..=MAX_LEN / 4 / unit.chars().count().max(1));
            unit.repeat(times)
        }
    }
}

/// Applies one to three random edits, the way typing errors happen.
fn mutate(rng: &mut StdRng, word: &str) -> String {
    let mut chars: Vec<char> = word.chars().collect();
    for _ in 0..rng.gen_range(1..4) {
        match rng.gen_range(0..4) {
            0 if !chars.is_empty() => {
                let pos = rng.gen_range(0..chars.len());
                chars.remove(pos);
            }
            1 if !chars.is_empty() => {
                let pos = rng.gen_range(0..chars.len());
                chars[pos] = any_char(rng);
            }
            2 if chars.len() >= 2 => {
                let pos = rng.gen_range(0..chars.len() - 1);
                chars.swap(pos, pos + 1);
            }
            _ => {
                let pos = rng.gen_range(0..=chars.len());
                let c = any_char(rng);
                chars.insert(pos, c);
            }
        }
    }
    chars.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cases_are_reproducible() {
        let a = CaseGenerator::new(7);
        let b = CaseGenerator::new(7);
        for index in 0..200 {
            assert_eq!(a.case(index), b.case(index));
        }
    }

    #[test]
    fn test_seeds_differ() {
        let a: Vec<_> = CaseGenerator::new(1).cases(0..50).map(|c| c.input).collect();
        let b: Vec<_> = CaseGenerator::new(2).cases(0..50).map(|c| c.input).collect();
        assert_ne!(a, b);
    }

    #[test]
    fn test_inputs_stay_bounded() {
        for case in CaseGenerator::new(42).cases(0..2_000) {
            assert!(case.input.chars().count() <= MAX_LEN, "{case}");
            assert!(case.partner.chars().count() <= MAX_LEN + 3, "{case}");
        }
    }

    #[test]
    fn test_every_shape_is_drawn() {
        let drawn: std::collections::HashSet<Shape> =
            CaseGenerator::new(42).cases(0..2_000).map(|c| c.shape).collect();
        assert_eq!(drawn.len(), SHAPES.len());
    }

    #[test]
    fn test_label_names_the_coordinates() {
        let case = CaseGenerator::new(42).case(3);
        assert!(case.label().starts_with("seed=42 index=3 input="));
    }

    #[test]
    fn test_mutation_edits_the_word() {
        let mut rng = StdRng::seed_from_u64(0);
        for _ in 0..100 {
            let mutated = mutate(&mut rng, "smith");
            let len = mutated.chars().count();
            assert!((2..=8).contains(&len), "{mutated:?}");
        }
    }
}
