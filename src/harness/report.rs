//! Failure records and run summaries.

use std::fmt;
use std::time::Duration;

use super::pool::JobOutcome;
use crate::error::{Error, Result};
use crate::registry::AlgorithmId;

/// One algorithm-level failure. Failures never stop a run.
#[derive(Debug)]
pub struct Failure {
    /// The algorithm at fault.
    pub algorithm: AlgorithmId,
    /// The case that triggered it, in a form that can be replayed.
    pub case: String,
    /// What went wrong.
    pub reason: Error,
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.case.is_empty() {
            write!(f, "{}: {}", self.algorithm, self.reason)
        } else {
            write!(f, "{} [{}]: {}", self.algorithm, self.case, self.reason)
        }
    }
}

impl Failure {
    /// Turns the outcome of a supervised job into its value or a failure.
    pub(crate) fn settle<T>(
        outcome: JobOutcome<Result<T>>,
        algorithm: &AlgorithmId,
        case: impl FnOnce() -> String,
        budget: Duration,
    ) -> std::result::Result<T, Failure> {
        let reason = match outcome {
            JobOutcome::Completed(Ok(value)) => return Ok(value),
            JobOutcome::Completed(Err(e)) => e,
            JobOutcome::Panicked(message) => Error::Fault {
                algorithm: algorithm.clone(),
                message,
            },
            // A skipped job belongs to an algorithm that already hung.
            JobOutcome::TimedOut | JobOutcome::Skipped => Error::Timeout {
                algorithm: algorithm.clone(),
                budget,
            },
        };
        Err(Failure {
            algorithm: algorithm.clone(),
            case: case(),
            reason,
        })
    }
}

/// Outcome of an oracle or fuzz run.
#[derive(Debug, Default)]
pub struct RunReport {
    /// Number of (case, algorithm) checks executed.
    pub checked: usize,
    /// Every failure, in case order.
    pub failures: Vec<Failure>,
}

impl RunReport {
    /// Returns true if nothing failed.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Failures caused by a timeout.
    pub fn timeouts(&self) -> impl Iterator<Item = &Failure> {
        self.failures
            .iter()
            .filter(|f| matches!(f.reason, Error::Timeout { .. }))
    }

    /// Failures caused by a panic.
    pub fn faults(&self) -> impl Iterator<Item = &Failure> {
        self.failures
            .iter()
            .filter(|f| matches!(f.reason, Error::Fault { .. }))
    }

    /// Algorithms without a regression record.
    pub fn coverage_gaps(&self) -> impl Iterator<Item = &AlgorithmId> {
        self.failures.iter().filter_map(|f| match &f.reason {
            Error::MissingRegression(id) => Some(id),
            _ => None,
        })
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} checks, {} failures ({} timeouts, {} faults)",
            self.checked,
            self.failures.len(),
            self.timeouts().count(),
            self.faults().count()
        )
    }
}
