//! Integration tests for the algorithm registry

use libphonetic::distance::Levenshtein;
use libphonetic::phonetic::Soundex;
use libphonetic::prelude::*;

#[test]
fn test_builtin_ids() {
    let registry = catalog::builtin().unwrap();
    let encoders: Vec<&str> = registry
        .list(AlgorithmKind::Encoder)
        .into_iter()
        .map(AlgorithmId::as_str)
        .collect();
    assert_eq!(
        encoders,
        [
            "caverphone",
            "caverphone.v1",
            "daitch-mokotoff",
            "fonem",
            "henry-early",
            "mra",
            "norphone",
            "schinke",
            "sfinxbis",
            "soundex",
            "synoname",
        ]
    );

    let comparators: Vec<&str> = registry
        .list(AlgorithmKind::Comparator)
        .into_iter()
        .map(AlgorithmId::as_str)
        .collect();
    assert_eq!(
        comparators,
        [
            "damerau-osa",
            "editex",
            "editex-local",
            "editex-similarity",
            "levenshtein",
            "levenshtein-normalized",
            "mra-rating",
            "mra-similarity",
            "typo",
            "typo-log-euclidean",
            "typo-log-manhattan",
            "typo-manhattan",
            "typo-similarity",
        ]
    );
}

#[test]
fn test_lookup_errors() {
    let registry = catalog::builtin().unwrap();
    assert!(matches!(
        registry.lookup("nysiis"),
        Err(Error::UnknownAlgorithm(id)) if id == "nysiis"
    ));

    let err = registry.comparator("soundex").err().unwrap();
    assert_eq!(
        err.to_string(),
        "algorithm soundex has kind encoder, expected comparator"
    );
    assert!(matches!(
        registry.encoder("typo"),
        Err(Error::KindMismatch { .. })
    ));
}

#[test]
fn test_duplicate_registration_fails() {
    let mut builder = RegistryBuilder::new();
    builder
        .register("soundex", Algorithm::encoder(Soundex::new()))
        .unwrap();
    let err = builder
        .register("soundex", Algorithm::comparator(Levenshtein))
        .unwrap_err();
    assert!(matches!(err, Error::DuplicateAlgorithm(id) if id.as_str() == "soundex"));
}

#[test]
fn test_invalid_ids_are_rejected() {
    for id in ["", "Soundex", "sound ex", "-soundex", "soundex.", "a..b", "a_b"] {
        assert!(
            matches!(AlgorithmId::new(id), Err(Error::InvalidAlgorithmId { .. })),
            "{id:?} was accepted"
        );
    }
    for id in ["soundex", "soundex.v2", "caverphone.v1", "typo-log-euclidean", "x9"] {
        assert!(AlgorithmId::new(id).is_ok(), "{id:?} was rejected");
    }
}

#[test]
fn test_registry_is_shareable_across_threads() {
    let registry = std::sync::Arc::new(catalog::builtin().unwrap());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let registry = std::sync::Arc::clone(&registry);
            std::thread::spawn(move || {
                registry
                    .encoder("soundex")
                    .unwrap()
                    .encode(&Token::raw("Robert"))
                    .to_string()
            })
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), "R163");
    }
}
