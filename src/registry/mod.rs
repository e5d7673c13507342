//! Algorithm registry.
//!
//! The registry maps stable [`AlgorithmId`]s to encoders and comparators.
//! It is assembled once through a [`RegistryBuilder`] and is read-only
//! afterwards, so it can be shared between threads behind an `Arc` without
//! locking.
//!
//! # Example
//!
//! ```rust
//! use libphonetic::registry::{catalog, AlgorithmKind};
//! use libphonetic::token::Token;
//!
//! let registry = catalog::builtin().unwrap();
//! let soundex = registry.encoder("soundex").unwrap();
//! assert_eq!(soundex.encode(&Token::raw("Robert")).to_string(), "R163");
//!
//! let comparators = registry.list(AlgorithmKind::Comparator);
//! assert!(comparators.iter().any(|id| id.as_str() == "levenshtein"));
//! ```

use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::distance::Comparator;
use crate::error::{Error, Result};
use crate::phonetic::PhoneticEncoder;

pub mod catalog;

/// Stable, human-readable algorithm key such as `soundex` or
/// `caverphone.v1`.
///
/// Ids consist of lowercase ASCII letters and digits, separated by single
/// `-` or `.` characters. A behaviour change is published under a new
/// version suffix rather than by changing what an existing id computes.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AlgorithmId(Arc<str>);

impl AlgorithmId {
    /// Validates and wraps an id.
    pub fn new(id: &str) -> Result<Self> {
        let reject = |reason| {
            Err(Error::InvalidAlgorithmId {
                id: id.to_string(),
                reason,
            })
        };
        if id.is_empty() {
            return reject("id is empty");
        }
        let mut previous_separator = true;
        for c in id.chars() {
            match c {
                'a'..='z' | '0'..='9' => previous_separator = false,
                '-' | '.' if previous_separator => {
                    return reject("separators must sit between letters or digits")
                }
                '-' | '.' => previous_separator = true,
                _ => return reject("only lowercase ASCII letters, digits, '-' and '.' are allowed"),
            }
        }
        if previous_separator {
            return reject("separators must sit between letters or digits");
        }
        Ok(Self(Arc::from(id)))
    }

    /// The id as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AlgorithmId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for AlgorithmId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<String> for AlgorithmId {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        Self::new(&s)
    }
}

impl From<AlgorithmId> for String {
    fn from(id: AlgorithmId) -> Self {
        id.0.to_string()
    }
}

impl AsRef<str> for AlgorithmId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for AlgorithmId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// The two kinds of algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum AlgorithmKind {
    /// Maps one token to a phonetic code.
    Encoder,
    /// Scores a pair of tokens.
    Comparator,
}

impl fmt::Display for AlgorithmKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlgorithmKind::Encoder => write!(f, "encoder"),
            AlgorithmKind::Comparator => write!(f, "comparator"),
        }
    }
}

/// A registered algorithm.
#[derive(Clone)]
pub enum Algorithm {
    /// A phonetic encoder
    Encoder(Arc<dyn PhoneticEncoder>),
    /// A pairwise comparator
    Comparator(Arc<dyn Comparator>),
}

impl Algorithm {
    /// Wraps an encoder.
    pub fn encoder(encoder: impl PhoneticEncoder + 'static) -> Self {
        Algorithm::Encoder(Arc::new(encoder))
    }

    /// Wraps a comparator.
    pub fn comparator(comparator: impl Comparator + 'static) -> Self {
        Algorithm::Comparator(Arc::new(comparator))
    }

    /// The kind of this algorithm.
    pub fn kind(&self) -> AlgorithmKind {
        match self {
            Algorithm::Encoder(_) => AlgorithmKind::Encoder,
            Algorithm::Comparator(_) => AlgorithmKind::Comparator,
        }
    }

    /// One-line description.
    pub fn description(&self) -> &'static str {
        match self {
            Algorithm::Encoder(e) => e.description(),
            Algorithm::Comparator(c) => c.description(),
        }
    }
}

impl fmt::Debug for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Algorithm")
            .field("kind", &self.kind())
            .field("description", &self.description())
            .finish()
    }
}

/// Collects algorithms before freezing them into a [`Registry`].
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    entries: BTreeMap<AlgorithmId, Algorithm>,
}

impl RegistryBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an algorithm under `id`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidAlgorithmId`] for a malformed id,
    /// [`Error::DuplicateAlgorithm`] if the id is taken.
    pub fn register(&mut self, id: &str, algorithm: Algorithm) -> Result<()> {
        let id = AlgorithmId::new(id)?;
        if self.entries.contains_key(&id) {
            return Err(Error::DuplicateAlgorithm(id));
        }
        trace!(%id, kind = %algorithm.kind(), "registered algorithm");
        self.entries.insert(id, algorithm);
        Ok(())
    }

    /// Chaining form of [`register`](Self::register).
    pub fn with(mut self, id: &str, algorithm: Algorithm) -> Result<Self> {
        self.register(id, algorithm)?;
        Ok(self)
    }

    /// Freezes the registry.
    pub fn build(self) -> Registry {
        debug!(algorithms = self.entries.len(), "registry built");
        Registry {
            entries: self.entries,
        }
    }
}

/// Read-only map from ids to algorithms.
#[derive(Debug, Clone)]
pub struct Registry {
    entries: BTreeMap<AlgorithmId, Algorithm>,
}

impl Registry {
    /// Looks up an algorithm of any kind.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownAlgorithm`] if nothing is registered under `id`.
    pub fn lookup(&self, id: &str) -> Result<&Algorithm> {
        self.entries
            .get(id)
            .ok_or_else(|| Error::UnknownAlgorithm(id.to_string()))
    }

    /// Looks up an encoder.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownAlgorithm`], or [`Error::KindMismatch`] if `id`
    /// names a comparator.
    pub fn encoder(&self, id: &str) -> Result<Arc<dyn PhoneticEncoder>> {
        match self.lookup(id)? {
            Algorithm::Encoder(e) => Ok(Arc::clone(e)),
            other => Err(self.mismatch(id, AlgorithmKind::Encoder, other.kind())),
        }
    }

    /// Looks up a comparator.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownAlgorithm`], or [`Error::KindMismatch`] if `id`
    /// names an encoder.
    pub fn comparator(&self, id: &str) -> Result<Arc<dyn Comparator>> {
        match self.lookup(id)? {
            Algorithm::Comparator(c) => Ok(Arc::clone(c)),
            other => Err(self.mismatch(id, AlgorithmKind::Comparator, other.kind())),
        }
    }

    fn mismatch(&self, id: &str, expected: AlgorithmKind, actual: AlgorithmKind) -> Error {
        match self.entries.get_key_value(id) {
            Some((id, _)) => Error::KindMismatch {
                id: id.clone(),
                expected,
                actual,
            },
            None => Error::UnknownAlgorithm(id.to_string()),
        }
    }

    /// Ids of all algorithms of `kind`, in lexicographic order.
    pub fn list(&self, kind: AlgorithmKind) -> Vec<&AlgorithmId> {
        self.entries
            .iter()
            .filter(|(_, a)| a.kind() == kind)
            .map(|(id, _)| id)
            .collect()
    }

    /// All ids, in lexicographic order.
    pub fn ids(&self) -> impl Iterator<Item = &AlgorithmId> {
        self.entries.keys()
    }

    /// All entries, in lexicographic order of id.
    pub fn iter(&self) -> impl Iterator<Item = (&AlgorithmId, &Algorithm)> {
        self.entries.iter()
    }

    /// Number of registered algorithms.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
