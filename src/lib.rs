//! # libphonetic
//!
//! Phonetic encoders and string distance measures behind one registry.
//!
//! Every algorithm is reachable by a stable id and implements one of two
//! interfaces:
//!
//! - [`PhoneticEncoder`](phonetic::PhoneticEncoder): token to code
//!   (Soundex, Caverphone, Daitch-Mokotoff, FONEM, Henry, SfinxBis,
//!   Norphone, MRA, Synoname, Schinke);
//! - [`Comparator`](distance::Comparator): pair of tokens to a score with a
//!   declared direction and range (Levenshtein, optimal string alignment,
//!   Editex, MRA rating, typo distance).
//!
//! Inputs go through the [`token`] model first, which normalizes case,
//! diacritics and script on request.
//!
//! Two harnesses drive the whole [`registry`]:
//!
//! - the [`regression`] oracle replays a versioned store of recorded
//!   outputs and reports every mismatch;
//! - the [`fuzz`] harness feeds seeded adversarial inputs to every
//!   algorithm and reports panics, hangs and broken invariants.
//!
//! Both run on the supervised worker pool of [`harness`], which enforces a
//! per-call timeout.
//!
//! ## Example
//!
//! ```rust
//! use libphonetic::prelude::*;
//!
//! let registry = catalog::builtin()?;
//!
//! let soundex = registry.encoder("soundex")?;
//! assert_eq!(soundex.encode(&Token::raw("Robert")).to_string(), "R163");
//!
//! let editex = registry.comparator("editex")?;
//! let a = normalize("Niall", NormalizeOptions::FOLDED)?;
//! let b = normalize("Neil", NormalizeOptions::FOLDED)?;
//! assert_eq!(editex.compare(&a, &b).value, 2.0);
//! # Ok::<(), libphonetic::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod distance;
pub mod error;
pub mod fingerprint;
pub mod fuzz;
pub mod harness;
pub mod phonetic;
pub mod registry;
pub mod regression;
pub mod stemmer;
pub mod token;

/// CLI interface and utilities
#[cfg(feature = "cli")]
pub mod cli;

pub use error::{Error, Result};

/// Common imports for convenient usage
pub mod prelude {
    pub use crate::distance::{Comparator, ComparatorProfile, Direction, DistanceResult, ScoreRange};
    pub use crate::error::{Error, Result};
    pub use crate::fuzz::{CaseGenerator, FuzzCase, FuzzHarness};
    pub use crate::harness::{HarnessConfig, RunReport, Supervisor};
    pub use crate::phonetic::{CodeLength, PhoneticCode, PhoneticEncoder};
    pub use crate::registry::{catalog, Algorithm, AlgorithmId, AlgorithmKind, Registry, RegistryBuilder};
    pub use crate::regression::{RegressionOracle, RegressionRecord, RegressionStore};
    pub use crate::token::{normalize, NormalizeOptions, Token};
}
