//! Regression records: one recorded algorithm output each.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::phonetic::PhoneticCode;
use crate::registry::{Algorithm, AlgorithmId, Registry};
use crate::token::{normalize, NormalizeOptions, Token};

/// A recorded algorithm output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expected {
    /// Output of an encoder.
    Code(PhoneticCode),
    /// Value of a comparator.
    Score(f64),
}

impl Expected {
    /// Compares an observed output with this expectation.
    ///
    /// Codes must be equal. Scores must be bit-identical when `tolerance`
    /// is zero and within `tolerance` otherwise.
    pub fn admits(&self, actual: &Expected, tolerance: f64) -> bool {
        match (self, actual) {
            (Expected::Code(e), Expected::Code(a)) => e == a,
            (Expected::Score(e), Expected::Score(a)) if tolerance == 0.0 => {
                e.to_bits() == a.to_bits()
            }
            (Expected::Score(e), Expected::Score(a)) => (e - a).abs() <= tolerance,
            _ => false,
        }
    }
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expected::Code(code) => write!(f, "{code}"),
            Expected::Score(score) => write!(f, "{score}"),
        }
    }
}

fn is_zero(tolerance: &f64) -> bool {
    *tolerance == 0.0
}

/// `(algorithm, input, normalization, expected output, tolerance)`.
///
/// Encoders take one input, comparators two.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionRecord {
    /// The algorithm under test.
    pub algorithm: AlgorithmId,
    /// Raw input strings.
    pub input: Vec<String>,
    /// Normalization applied to every input before the call.
    #[serde(default, skip_serializing_if = "NormalizeOptions::is_raw")]
    pub normalize: NormalizeOptions,
    /// The recorded output.
    pub expected: Expected,
    /// Accepted absolute deviation of a score; zero means bit-exact.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub tolerance: f64,
}

impl RegressionRecord {
    /// A record for an encoder.
    pub fn encoder(algorithm: &str, input: &str, expected: PhoneticCode) -> Result<Self> {
        Ok(Self {
            algorithm: AlgorithmId::new(algorithm)?,
            input: vec![input.to_string()],
            normalize: NormalizeOptions::RAW,
            expected: Expected::Code(expected),
            tolerance: 0.0,
        })
    }

    /// A record for a comparator.
    pub fn comparator(algorithm: &str, a: &str, b: &str, expected: f64) -> Result<Self> {
        Ok(Self {
            algorithm: AlgorithmId::new(algorithm)?,
            input: vec![a.to_string(), b.to_string()],
            normalize: NormalizeOptions::RAW,
            expected: Expected::Score(expected),
            tolerance: 0.0,
        })
    }

    /// Records the current output of `algorithm` for `input`.
    pub fn capture(
        registry: &Registry,
        algorithm: &str,
        input: Vec<String>,
        options: NormalizeOptions,
    ) -> Result<Self> {
        let mut record = Self {
            algorithm: AlgorithmId::new(algorithm)?,
            input,
            normalize: options,
            expected: Expected::Score(0.0),
            tolerance: 0.0,
        };
        record.expected = record.observe(registry)?;
        Ok(record)
    }

    /// Sets the normalization options.
    pub fn with_normalization(mut self, options: NormalizeOptions) -> Self {
        self.normalize = options;
        self
    }

    /// Sets the score tolerance.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// The inputs, for failure reports.
    pub fn case_label(&self) -> String {
        format!("{:?}", self.input)
    }

    fn arity_error(&self, expected: usize) -> Error {
        Error::InvalidInput {
            input: self.case_label(),
            reason: format!(
                "{} takes {expected} input(s), the record has {}",
                self.algorithm,
                self.input.len()
            ),
        }
    }

    /// Normalizes the inputs and runs the algorithm on them.
    pub fn observe(&self, registry: &Registry) -> Result<Expected> {
        let tokens = self
            .input
            .iter()
            .map(|raw| normalize(raw, self.normalize))
            .collect::<Result<Vec<Token>>>()?;

        match registry.lookup(self.algorithm.as_str())? {
            Algorithm::Encoder(encoder) => match tokens.as_slice() {
                [token] => Ok(Expected::Code(encoder.encode(token))),
                _ => Err(self.arity_error(1)),
            },
            Algorithm::Comparator(comparator) => match tokens.as_slice() {
                [a, b] => Ok(Expected::Score(comparator.compare(a, b).value)),
                _ => Err(self.arity_error(2)),
            },
        }
    }

    /// Checks the current output against the recorded one.
    ///
    /// # Errors
    ///
    /// [`Error::RegressionMismatch`] when the output differs, or the error
    /// that prevented the call.
    pub fn check(&self, registry: &Registry) -> Result<()> {
        let actual = self.observe(registry)?;
        if self.expected.admits(&actual, self.tolerance) {
            return Ok(());
        }
        Err(Error::RegressionMismatch {
            algorithm: self.algorithm.clone(),
            input: self.input.clone(),
            expected: self.expected.to_string(),
            actual: actual.to_string(),
        })
    }
}
