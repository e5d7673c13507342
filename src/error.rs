//! Error types shared by every component of the crate.

use std::time::Duration;

use thiserror::Error;

use crate::registry::{AlgorithmId, AlgorithmKind};

/// Errors produced by normalization, registry lookups and the harnesses.
///
/// Algorithm calls themselves never return errors: the variants describing
/// algorithm misbehaviour (`Timeout`, `Fault`, `RegressionMismatch`,
/// `InvariantViolation`) are produced by the harnesses and recorded as
/// failures rather than propagated.
#[derive(Debug, Error)]
pub enum Error {
    /// Input violates an explicit precondition.
    ///
    /// Raised by [`normalize`](crate::token::normalize) when ASCII-only output is
    /// requested and a character has no ASCII transliteration.
    #[error("invalid input {input:?}: {reason}")]
    InvalidInput {
        /// The offending input
        input: String,
        /// What went wrong
        reason: String,
    },

    /// No algorithm is registered under the requested id.
    #[error("unknown algorithm: {0}")]
    UnknownAlgorithm(String),

    /// The same id was registered twice while building a registry.
    #[error("algorithm {0} is already registered")]
    DuplicateAlgorithm(AlgorithmId),

    /// A string is not a well-formed algorithm id.
    #[error("invalid algorithm id {id:?}: {reason}")]
    InvalidAlgorithmId {
        /// The rejected id
        id: String,
        /// Why it was rejected
        reason: &'static str,
    },

    /// The algorithm exists but is of another kind than the one requested.
    #[error("algorithm {id} has kind {actual}, expected {expected}")]
    KindMismatch {
        /// The algorithm id
        id: AlgorithmId,
        /// Kind the caller asked for
        expected: AlgorithmKind,
        /// Kind actually registered
        actual: AlgorithmKind,
    },

    /// An algorithm call exceeded its wall-clock budget.
    #[error("{algorithm} did not finish within {}ms", budget.as_millis())]
    Timeout {
        /// The algorithm that hung
        algorithm: AlgorithmId,
        /// The per-case budget that was exceeded
        budget: Duration,
    },

    /// An algorithm call panicked.
    #[error("{algorithm} panicked: {message}")]
    Fault {
        /// The algorithm that panicked
        algorithm: AlgorithmId,
        /// The panic payload, when it was a string
        message: String,
    },

    /// A recorded regression output no longer matches.
    #[error("{algorithm}{input:?}: expected {expected}, got {actual}")]
    RegressionMismatch {
        /// The algorithm under test
        algorithm: AlgorithmId,
        /// The recorded input(s)
        input: Vec<String>,
        /// The recorded output
        expected: String,
        /// The output produced now
        actual: String,
    },

    /// The fuzz harness detected a breach of a declared structural constraint.
    #[error("{algorithm} violated an invariant: {detail}")]
    InvariantViolation {
        /// The algorithm under test
        algorithm: AlgorithmId,
        /// Which constraint was breached and how
        detail: String,
    },

    /// A registered algorithm has no regression record.
    #[error("{0} has no regression record")]
    MissingRegression(AlgorithmId),

    /// The regression store was written by an incompatible version.
    #[error("unsupported regression store version {found} (expected {expected})")]
    UnsupportedStoreVersion {
        /// Version found in the file
        found: u32,
        /// Version this crate reads
        expected: u32,
    },

    /// I/O error while reading or writing a store or configuration file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON in a store or configuration file.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Returns the algorithm this error is attributed to, if any.
    pub fn algorithm(&self) -> Option<&AlgorithmId> {
        match self {
            Error::DuplicateAlgorithm(id) | Error::MissingRegression(id) => Some(id),
            Error::KindMismatch { id, .. } => Some(id),
            Error::Timeout { algorithm, .. }
            | Error::Fault { algorithm, .. }
            | Error::RegressionMismatch { algorithm, .. }
            | Error::InvariantViolation { algorithm, .. } => Some(algorithm),
            _ => None,
        }
    }
}

/// A specialized `Result` type for this crate.
pub type Result<T> = std::result::Result<T, Error>;
