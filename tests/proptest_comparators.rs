//! Property-based tests for the declared behaviour of every comparator.
//!
//! For each registered comparator:
//!
//! 1. **Range**: every value is finite and inside the declared range
//! 2. **Identity**: compare(x, x) equals the declared identity value
//! 3. **Symmetry**: compare(x, y) == compare(y, x) bit for bit, when declared
//! 4. **Triangle inequality**: d(x, z) <= d(x, y) + d(y, z), for metrics

use libphonetic::distance::{editex, standard_distance, transposition_distance, EditexSimilarity};
use libphonetic::prelude::*;
use proptest::prelude::*;

fn arb_string() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z]{0,12}").unwrap()
}

fn arb_unicode_string() -> impl Strategy<Value = String> {
    prop::collection::vec(any::<char>(), 0..12).prop_map(|chars| chars.into_iter().collect())
}

fn comparators() -> Vec<(AlgorithmId, std::sync::Arc<dyn Comparator>)> {
    let registry = catalog::builtin().unwrap();
    registry
        .list(AlgorithmKind::Comparator)
        .into_iter()
        .map(|id| (id.clone(), registry.comparator(id.as_str()).unwrap()))
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn comparator_values_stay_in_range(a in arb_unicode_string(), b in arb_unicode_string()) {
        let (a, b) = (Token::raw(&a), Token::raw(&b));
        for (id, comparator) in comparators() {
            let profile = comparator.profile();
            let result = comparator.compare(&a, &b);
            prop_assert!(
                profile.range.contains(result.value),
                "{}: {} outside {}", id, result.value, profile.range
            );
            prop_assert_eq!(result.direction, profile.direction);
        }
    }

    #[test]
    fn comparator_identity(a in arb_unicode_string()) {
        let a = Token::raw(&a);
        for (id, comparator) in comparators() {
            let value = comparator.compare(&a, &a).value;
            prop_assert_eq!(value, comparator.profile().identity, "{}", id);
        }
    }

    #[test]
    fn comparator_declared_symmetry(a in arb_string(), b in arb_unicode_string()) {
        let (a, b) = (Token::raw(&a), Token::raw(&b));
        for (id, comparator) in comparators() {
            if !comparator.profile().symmetric {
                continue;
            }
            let ab = comparator.compare(&a, &b).value;
            let ba = comparator.compare(&b, &a).value;
            prop_assert_eq!(ab.to_bits(), ba.to_bits(), "{}: {} vs {}", id, ab, ba);
        }
    }

    #[test]
    fn metric_triangle_inequality(a in arb_string(), b in arb_string(), c in arb_string()) {
        let (a, b, c) = (Token::raw(&a), Token::raw(&b), Token::raw(&c));
        for (id, comparator) in comparators() {
            if !comparator.profile().metric {
                continue;
            }
            let d_ac = comparator.compare(&a, &c).value;
            let d_ab = comparator.compare(&a, &b).value;
            let d_bc = comparator.compare(&b, &c).value;
            prop_assert!(
                d_ac <= d_ab + d_bc,
                "{}: d({}, {}) = {} > {} + {}", id, a, c, d_ac, d_ab, d_bc
            );
        }
    }

    #[test]
    fn levenshtein_bounded_by_longer_length(a in arb_unicode_string(), b in arb_unicode_string()) {
        let d = standard_distance(&a, &b);
        prop_assert!(d <= a.chars().count().max(b.chars().count()));
        prop_assert!(transposition_distance(&a, &b) <= d);
    }

    #[test]
    fn editex_similarity_complements_distance(a in arb_string(), b in arb_string()) {
        let sim = EditexSimilarity.compare(&Token::raw(&a), &Token::raw(&b)).value;
        let zero_distance = editex(&a, &b, false) == 0;
        prop_assert_eq!(sim == 1.0, zero_distance);
    }
}

#[test]
fn test_osa_is_not_declared_metric() {
    let registry = catalog::builtin().unwrap();
    let osa = registry.comparator("damerau-osa").unwrap();
    assert!(!osa.profile().metric);

    let d = |a: &str, b: &str| osa.compare(&Token::raw(a), &Token::raw(b)).value;
    assert!(d("ca", "abc") > d("ca", "ac") + d("ac", "abc"));
}

#[test]
fn test_empty_pair_gives_identity() {
    let empty = Token::raw("");
    for (id, comparator) in comparators() {
        assert_eq!(
            comparator.compare(&empty, &empty).value,
            comparator.profile().identity,
            "{id}"
        );
    }
}
