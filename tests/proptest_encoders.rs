//! Property-based tests for every registered encoder.
//!
//! 1. **Determinism**: the same token always yields the same code
//! 2. **Length policy**: every part of every code obeys the declared policy
//! 3. **Stability**: renormalizing a normalized token does not change its code

use libphonetic::prelude::*;
use proptest::prelude::*;
use std::sync::Arc;

fn arb_name() -> impl Strategy<Value = String> {
    prop::string::string_regex("[A-Za-zÀ-ÿ' ,.-]{0,24}").unwrap()
}

fn arb_unicode_string() -> impl Strategy<Value = String> {
    prop::collection::vec(any::<char>(), 0..24).prop_map(|chars| chars.into_iter().collect())
}

fn encoders() -> Vec<(AlgorithmId, Arc<dyn PhoneticEncoder>)> {
    let registry = catalog::builtin().unwrap();
    registry
        .list(AlgorithmKind::Encoder)
        .into_iter()
        .map(|id| (id.clone(), registry.encoder(id.as_str()).unwrap()))
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn encoders_respect_length_policy(word in arb_unicode_string()) {
        let token = Token::raw(&word);
        for (id, encoder) in encoders() {
            let code = encoder.encode(&token);
            let length = encoder.code_length();
            for part in code.parts() {
                prop_assert!(length.admits(part), "{}: {:?} is not {}", id, part, length);
            }
        }
    }

    #[test]
    fn encoders_are_deterministic(word in arb_name()) {
        let token = Token::raw(&word);
        for (id, encoder) in encoders() {
            prop_assert_eq!(encoder.encode(&token), encoder.encode(&token), "{}", id);
        }
    }

    #[test]
    fn codes_survive_renormalization(word in arb_unicode_string()) {
        for options in [NormalizeOptions::CASE_FOLDED, NormalizeOptions::FOLDED] {
            let token = normalize(&word, options).unwrap();
            let again = token.renormalize(options).unwrap();
            prop_assert_eq!(&token, &again);
            for (id, encoder) in encoders() {
                prop_assert_eq!(encoder.encode(&token), encoder.encode(&again), "{}", id);
            }
        }
    }

    #[test]
    fn ascii_normalization_fails_only_with_invalid_input(word in arb_unicode_string()) {
        match normalize(&word, NormalizeOptions::ASCII) {
            Ok(token) => prop_assert!(token.as_str().is_ascii()),
            Err(Error::InvalidInput { .. }) => {}
            Err(other) => prop_assert!(false, "unexpected error {}", other),
        }
    }

    #[test]
    fn soundex_ignores_case(word in "[a-z]{1,10}") {
        let soundex = catalog::builtin().unwrap().encoder("soundex").unwrap();
        prop_assert_eq!(
            soundex.encode(&Token::raw(&word)),
            soundex.encode(&Token::raw(word.to_uppercase()))
        );
    }
}

#[test]
fn test_soundex_robert_is_stable() {
    let registry = catalog::builtin().unwrap();
    let soundex = registry.encoder("soundex").unwrap();
    for _ in 0..3 {
        assert_eq!(soundex.encode(&Token::raw("Robert")).to_string(), "R163");
    }
}

#[test]
fn test_every_encoder_handles_empty_and_letterless_input() {
    for (id, encoder) in encoders() {
        for input in ["", "   ", "1234", "?!", "\u{301}", "\u{0}"] {
            let code = encoder.encode(&Token::raw(input));
            assert!(
                code.parts().iter().all(|p| encoder.code_length().admits(p)),
                "{id}: {input:?} gave {code}"
            );
        }
    }
}

#[test]
fn test_unbounded_encoders_accept_long_tokens() {
    let long = "Bergström-Tranströmer Johansson ".repeat(60);
    let token = Token::raw(&long);
    for (id, encoder) in encoders() {
        let code = encoder.encode(&token);
        assert!(
            code.parts().iter().all(|p| encoder.code_length().admits(p)),
            "{id}: {code}"
        );
        assert_eq!(encoder.encode(&token), code, "{id}");
    }

    let registry = catalog::builtin().unwrap();
    let norphone = registry.encoder("norphone").unwrap().encode(&token);
    assert!(norphone.parts()[0].chars().count() > 100, "{norphone}");
}
