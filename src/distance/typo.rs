//! Typo distance: an edit distance whose substitution cost grows with the
//! distance between the two keys on a keyboard.

use std::fmt;

use rustc_hash::FxHashMap;

use super::{Comparator, ComparatorProfile, DistanceResult, Direction, ScoreRange};
use crate::token::Token;

/// Marks a position with no key.
const NO_KEY: char = '\0';

type Layer = [&'static str; 4];

const QWERTY: [Layer; 2] = [
    ["`1234567890-=", "\0qwertyuiop[]\\", "\0asdfghjkl;'", "\0zxcvbnm,./"],
    ["~!@#$%^&*()_+", "\0QWERTYUIOP{}|", "\0ASDFGHJKL:\"", "\0ZXCVBNM<>?"],
];

const DVORAK: [Layer; 2] = [
    ["`1234567890[]", "\0',.pyfgcrl/=\\", "\0aoeuidhtns-", "\0;qjkxbmwvz"],
    ["~!@#$%^&*(){}", "\0\"<>PYFGCRL?+|", "\0AOEUIDHTNS_", "\0:QJKXBMWVZ"],
];

const AZERTY: [Layer; 2] = [
    ["²&é\"'(-è_çà)=", "\0azertyuiop\0$", "\0qsdfghjklmù*", "<wxcvbn,;:!"],
    ["~1234567890°+", "\0AWERTYUIOP\0£", "\0QSDFGHJKLMÙμ", ">WXCVBN?./§"],
];

const QWERTZ: [Layer; 2] = [
    ["\u{0}1234567890ß\0", "\0qwertzuiopü+\\", "\0asdfghjklöä#", "<yxcvbnm,.-"],
    ["°!\"§$%&/()=?\0", "\0QWERTZUIOPÜ*\0", "\0ASDFGHJKLÖÄ'", ">YXCVBNM;:_"],
];

/// Keyboard layout used to place characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyboardLayout {
    /// US QWERTY.
    #[default]
    Qwerty,
    /// Dvorak simplified keyboard.
    Dvorak,
    /// French AZERTY.
    Azerty,
    /// German QWERTZ.
    Qwertz,
}

impl KeyboardLayout {
    fn layers(self) -> &'static [Layer; 2] {
        match self {
            KeyboardLayout::Qwerty => &QWERTY,
            KeyboardLayout::Dvorak => &DVORAK,
            KeyboardLayout::Azerty => &AZERTY,
            KeyboardLayout::Qwertz => &QWERTZ,
        }
    }
}

impl fmt::Display for KeyboardLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            KeyboardLayout::Qwerty => "QWERTY",
            KeyboardLayout::Dvorak => "Dvorak",
            KeyboardLayout::Azerty => "AZERTY",
            KeyboardLayout::Qwertz => "QWERTZ",
        };
        f.write_str(name)
    }
}

/// Distance between two keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyboardMetric {
    /// Straight-line distance in key units.
    #[default]
    Euclidean,
    /// Rows plus columns.
    Manhattan,
    /// `ln(1 + euclidean)`.
    LogEuclidean,
    /// `ln(1 + manhattan)`.
    LogManhattan,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Key {
    shifted: bool,
    row: i32,
    col: i32,
}

impl KeyboardMetric {
    fn between(self, a: Key, b: Key) -> f64 {
        let (dr, dc) = (a.row - b.row, a.col - b.col);
        let euclidean = || f64::from(dr * dr + dc * dc).sqrt();
        let manhattan = || f64::from(dr.abs() + dc.abs());
        match self {
            KeyboardMetric::Euclidean => euclidean(),
            KeyboardMetric::Manhattan => manhattan(),
            KeyboardMetric::LogEuclidean => (1.0 + euclidean()).ln(),
            KeyboardMetric::LogManhattan => (1.0 + manhattan()).ln(),
        }
    }
}

/// Edit costs of the typo distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TypoCosts {
    /// Inserting a character.
    pub insert: f64,
    /// Deleting a character.
    pub delete: f64,
    /// Multiplier of the key distance for a substitution.
    pub substitute: f64,
    /// Added to the key distance when exactly one key needs shift.
    pub shift: f64,
}

impl Default for TypoCosts {
    fn default() -> Self {
        TypoCosts {
            insert: 1.0,
            delete: 1.0,
            substitute: 0.5,
            shift: 0.5,
        }
    }
}

/// Typo distance comparator.
///
/// Distances are accumulated in `f64` and every cell of the edit matrix is
/// stored as `f32`, so results carry single precision. A substitution
/// involving a character that is not on the layout costs a deletion plus
/// an insertion.
#[derive(Debug, Clone)]
pub struct Typo {
    layout: KeyboardLayout,
    metric: KeyboardMetric,
    costs: TypoCosts,
    keys: FxHashMap<char, Key>,
}

impl Default for Typo {
    fn default() -> Self {
        Self::new(KeyboardLayout::Qwerty, KeyboardMetric::Euclidean)
    }
}

impl Typo {
    /// Creates a typo comparator with the default costs.
    pub fn new(layout: KeyboardLayout, metric: KeyboardMetric) -> Self {
        let mut keys = FxHashMap::default();
        // Unshifted keys win over shifted ones, earlier rows over later ones.
        for (layer, shifted) in layout.layers().iter().zip([false, true]) {
            for (row, keys_in_row) in layer.iter().enumerate() {
                for (col, c) in keys_in_row.chars().enumerate() {
                    if c == NO_KEY {
                        continue;
                    }
                    keys.entry(c).or_insert(Key {
                        shifted,
                        row: row as i32,
                        col: col as i32,
                    });
                }
            }
        }
        Typo {
            layout,
            metric,
            costs: TypoCosts::default(),
            keys,
        }
    }

    /// Replaces the edit costs.
    pub fn with_costs(mut self, costs: TypoCosts) -> Self {
        self.costs = costs;
        self
    }

    /// The keyboard layout.
    pub fn layout(&self) -> KeyboardLayout {
        self.layout
    }

    fn substitution(&self, a: char, b: char) -> f64 {
        match (self.keys.get(&a), self.keys.get(&b)) {
            (Some(&ka), Some(&kb)) => {
                let shift = if ka.shifted != kb.shifted {
                    self.costs.shift
                } else {
                    0.0
                };
                self.costs.substitute * (self.metric.between(ka, kb) + shift)
            }
            _ => self.costs.insert + self.costs.delete,
        }
    }

    /// The unnormalized typo distance.
    pub fn distance(&self, src: &str, tar: &str) -> f64 {
        if src == tar {
            return 0.0;
        }
        let s: Vec<char> = src.chars().collect();
        let t: Vec<char> = tar.chars().collect();
        if s.is_empty() {
            return t.len() as f64 * self.costs.insert;
        }
        if t.is_empty() {
            return s.len() as f64 * self.costs.delete;
        }

        let width = t.len() + 1;
        let mut d = vec![0f32; (s.len() + 1) * width];
        for i in 0..=s.len() {
            d[i * width] = (i as f64 * self.costs.delete) as f32;
        }
        for j in 0..=t.len() {
            d[j] = (j as f64 * self.costs.insert) as f32;
        }
        for i in 0..s.len() {
            for j in 0..t.len() {
                let insert = f64::from(d[(i + 1) * width + j]) + self.costs.insert;
                let delete = f64::from(d[i * width + j + 1]) + self.costs.delete;
                let substitute = f64::from(d[i * width + j])
                    + if s[i] != t[j] {
                        self.substitution(s[i], t[j])
                    } else {
                        0.0
                    };
                d[(i + 1) * width + j + 1] = insert.min(delete).min(substitute) as f32;
            }
        }
        f64::from(d[s.len() * width + t.len()])
    }

    /// The typo distance divided by the cost of deleting or inserting the
    /// longer input, clamped to `[0, 1]`.
    pub fn normalized_distance(&self, src: &str, tar: &str) -> f64 {
        if src == tar {
            return 0.0;
        }
        let cost = self.distance(src, tar);
        let denominator = (src.chars().count() as f64 * self.costs.delete)
            .max(tar.chars().count() as f64 * self.costs.insert);
        (cost / denominator).min(1.0)
    }
}

impl Comparator for Typo {
    fn compare(&self, a: &Token, b: &Token) -> DistanceResult {
        DistanceResult::distance(self.distance(a.as_str(), b.as_str()))
    }

    fn profile(&self) -> ComparatorProfile {
        ComparatorProfile {
            direction: Direction::Distance,
            range: ScoreRange::NON_NEGATIVE,
            identity: 0.0,
            symmetric: self.costs.insert == self.costs.delete,
            metric: false,
        }
    }

    fn description(&self) -> &'static str {
        match self.metric {
            KeyboardMetric::Euclidean => "typo distance, Euclidean key metric",
            KeyboardMetric::Manhattan => "typo distance, Manhattan key metric",
            KeyboardMetric::LogEuclidean => "typo distance, log-Euclidean key metric",
            KeyboardMetric::LogManhattan => "typo distance, log-Manhattan key metric",
        }
    }
}

/// Typo similarity in `[0, 1]`: one minus the normalized typo distance.
#[derive(Debug, Clone, Default)]
pub struct TypoSimilarity {
    typo: Typo,
}

impl TypoSimilarity {
    /// Wraps a typo comparator.
    pub fn new(typo: Typo) -> Self {
        Self { typo }
    }
}

impl Comparator for TypoSimilarity {
    fn compare(&self, a: &Token, b: &Token) -> DistanceResult {
        DistanceResult::similarity(1.0 - self.typo.normalized_distance(a.as_str(), b.as_str()))
    }

    fn profile(&self) -> ComparatorProfile {
        ComparatorProfile::unit_similarity()
    }

    fn description(&self) -> &'static str {
        "typo similarity normalized to [0, 1]"
    }
}

/// Computes the typo distance with the default costs.
///
/// ```rust
/// use libphonetic::distance::{typo, KeyboardLayout, KeyboardMetric};
///
/// let d = typo("ATCG", "TAGC", KeyboardMetric::Manhattan, KeyboardLayout::Qwerty);
/// assert_eq!(d, 2.5);
/// ```
pub fn typo(src: &str, tar: &str, metric: KeyboardMetric, layout: KeyboardLayout) -> f64 {
    Typo::new(layout, metric).distance(src, tar)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAIRS: [(&str, &str); 4] = [
        ("cat", "hat"),
        ("Niall", "Neil"),
        ("Colin", "Cuilen"),
        ("ATCG", "TAGC"),
    ];

    fn distances(metric: KeyboardMetric) -> Vec<f64> {
        PAIRS
            .iter()
            .map(|(a, b)| typo(a, b, metric, KeyboardLayout::Qwerty))
            .collect()
    }

    #[test]
    fn test_euclidean() {
        assert_eq!(
            distances(KeyboardMetric::Euclidean),
            [1.5811388492584229, 2.8251407146453857, 3.4142136573791504, 2.5]
        );
    }

    #[test]
    fn test_manhattan() {
        assert_eq!(distances(KeyboardMetric::Manhattan), [2.0, 3.0, 3.5, 2.5]);
    }

    #[test]
    fn test_log_manhattan() {
        assert_eq!(
            distances(KeyboardMetric::LogManhattan),
            [
                0.8047189712524414,
                2.2424533367156982,
                2.2424533367156982,
                2.3465735912323
            ]
        );
    }

    #[test]
    fn test_empty_and_identical() {
        assert_eq!(typo("", "abc", KeyboardMetric::Euclidean, KeyboardLayout::Qwerty), 3.0);
        assert_eq!(typo("ab", "", KeyboardMetric::Euclidean, KeyboardLayout::Qwerty), 2.0);
        assert_eq!(typo("abc", "abc", KeyboardMetric::Euclidean, KeyboardLayout::Qwerty), 0.0);
    }

    #[test]
    fn test_unknown_characters_cost_delete_plus_insert() {
        let d = typo("a", "語", KeyboardMetric::Euclidean, KeyboardLayout::Qwerty);
        assert_eq!(d, 2.0);
    }

    #[test]
    fn test_normalized() {
        let t = Typo::default();
        assert!((t.normalized_distance("cat", "hat") - 0.527046283086).abs() < 1e-9);
        assert!((t.normalized_distance("Niall", "Neil") - 0.565028142929).abs() < 1e-9);
        assert_eq!(t.normalized_distance("ATCG", "TAGC"), 0.625);
        assert_eq!(t.normalized_distance("", ""), 0.0);
    }

    #[test]
    fn test_other_layouts_place_letters() {
        for layout in [
            KeyboardLayout::Dvorak,
            KeyboardLayout::Azerty,
            KeyboardLayout::Qwertz,
        ] {
            let t = Typo::new(layout, KeyboardMetric::Euclidean);
            let d = t.distance("a", "b");
            assert!(d > 0.0 && d <= 2.0, "{layout}: {d}");
        }
    }
}
