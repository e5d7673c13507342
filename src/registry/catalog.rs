//! The algorithms shipped with the crate.

use super::{Algorithm, Registry, RegistryBuilder};
use crate::distance::{
    DamerauOsa, Editex, EditexSimilarity, KeyboardLayout, KeyboardMetric, Levenshtein,
    MraRating, MraSimilarity, NormalizedLevenshtein, Typo, TypoSimilarity,
};
use crate::error::Result;
use crate::fingerprint::Synoname;
use crate::phonetic::{
    Caverphone, CaverphoneVersion, DaitchMokotoff, Fonem, HenryEarly, MatchRatingCodex,
    Norphone, SfinxBis, Soundex,
};
use crate::stemmer::Schinke;

/// Registers every built-in encoder.
pub fn register_encoders(builder: &mut RegistryBuilder) -> Result<()> {
    builder.register("soundex", Algorithm::encoder(Soundex::new()))?;
    builder.register(
        "caverphone",
        Algorithm::encoder(Caverphone::new(CaverphoneVersion::V2)),
    )?;
    builder.register(
        "caverphone.v1",
        Algorithm::encoder(Caverphone::new(CaverphoneVersion::V1)),
    )?;
    builder.register("daitch-mokotoff", Algorithm::encoder(DaitchMokotoff::default()))?;
    builder.register("fonem", Algorithm::encoder(Fonem::new()))?;
    builder.register("henry-early", Algorithm::encoder(HenryEarly::default()))?;
    builder.register("sfinxbis", Algorithm::encoder(SfinxBis::new()))?;
    builder.register("norphone", Algorithm::encoder(Norphone::new()))?;
    builder.register("mra", Algorithm::encoder(MatchRatingCodex::new()))?;
    builder.register("synoname", Algorithm::encoder(Synoname::new()))?;
    builder.register("schinke", Algorithm::encoder(Schinke::new()))?;
    Ok(())
}

/// Registers every built-in comparator.
pub fn register_comparators(builder: &mut RegistryBuilder) -> Result<()> {
    builder.register("levenshtein", Algorithm::comparator(Levenshtein))?;
    builder.register(
        "levenshtein-normalized",
        Algorithm::comparator(NormalizedLevenshtein),
    )?;
    builder.register("damerau-osa", Algorithm::comparator(DamerauOsa))?;
    builder.register("editex", Algorithm::comparator(Editex::new()))?;
    builder.register("editex-local", Algorithm::comparator(Editex::local()))?;
    builder.register("editex-similarity", Algorithm::comparator(EditexSimilarity))?;
    builder.register("mra-rating", Algorithm::comparator(MraRating))?;
    builder.register("mra-similarity", Algorithm::comparator(MraSimilarity))?;

    let typo = |metric| Typo::new(KeyboardLayout::Qwerty, metric);
    builder.register("typo", Algorithm::comparator(typo(KeyboardMetric::Euclidean)))?;
    builder.register(
        "typo-manhattan",
        Algorithm::comparator(typo(KeyboardMetric::Manhattan)),
    )?;
    builder.register(
        "typo-log-euclidean",
        Algorithm::comparator(typo(KeyboardMetric::LogEuclidean)),
    )?;
    builder.register(
        "typo-log-manhattan",
        Algorithm::comparator(typo(KeyboardMetric::LogManhattan)),
    )?;
    builder.register(
        "typo-similarity",
        Algorithm::comparator(TypoSimilarity::new(typo(KeyboardMetric::Euclidean))),
    )?;
    Ok(())
}

/// Builds the registry of all built-in algorithms.
///
/// # Errors
///
/// Only if two built-in algorithms share an id, which the tests rule out.
pub fn builtin() -> Result<Registry> {
    let mut builder = RegistryBuilder::new();
    register_encoders(&mut builder)?;
    register_comparators(&mut builder)?;
    Ok(builder.build())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::AlgorithmKind;
    use crate::token::Token;

    #[test]
    fn test_builtin_builds() {
        let registry = builtin().unwrap();
        assert_eq!(registry.list(AlgorithmKind::Encoder).len(), 11);
        assert_eq!(registry.list(AlgorithmKind::Comparator).len(), 13);
    }

    #[test]
    fn test_lists_are_sorted() {
        let registry = builtin().unwrap();
        for kind in [AlgorithmKind::Encoder, AlgorithmKind::Comparator] {
            let ids = registry.list(kind);
            assert!(ids.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn test_soundex_robert() {
        let registry = builtin().unwrap();
        let code = registry
            .encoder("soundex")
            .unwrap()
            .encode(&Token::raw("Robert"));
        assert_eq!(code.to_string(), "R163");
    }
}
