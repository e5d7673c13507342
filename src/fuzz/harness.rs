//! Runs generated cases through every registered algorithm.

use std::ops::Range;
use std::sync::Arc;

use rustc_hash::FxHashSet;
use tracing::{debug, info, warn};

use super::generator::{CaseGenerator, FuzzCase};
use crate::distance::Comparator;
use crate::error::{Error, Result};
use crate::harness::{Failure, HarnessConfig, Job, JobOutcome, RunReport, Supervisor};
use crate::phonetic::PhoneticEncoder;
use crate::registry::{Algorithm, AlgorithmId, Registry};
use crate::token::{normalize, NormalizeOptions, Token};

/// Cases submitted to the pool at once.
const BATCH: u64 = 256;

/// Normalizations every encoder is exercised under.
const PRESETS: [NormalizeOptions; 4] = [
    NormalizeOptions::RAW,
    NormalizeOptions::CASE_FOLDED,
    NormalizeOptions::FOLDED,
    NormalizeOptions::ASCII,
];

/// Drives a seeded stream of [`FuzzCase`]s through a registry.
///
/// For every (case, algorithm) pair one supervised job checks that the
/// call returns, does not panic and honours the algorithm's declared
/// constraints:
///
/// - encoders: deterministic, stable under renormalization, every code part
///   within the declared [`CodeLength`](crate::phonetic::CodeLength);
/// - comparators: finite, inside the declared range, deterministic, equal
///   to the identity value on identical inputs (including two empty
///   tokens) and bit-exactly symmetric when declared symmetric.
pub struct FuzzHarness {
    registry: Arc<Registry>,
    supervisor: Supervisor,
    generator: CaseGenerator,
    case_count: u64,
}

impl FuzzHarness {
    /// Creates a harness over `case_count` cases of `seed`.
    pub fn new(registry: Arc<Registry>, supervisor: Supervisor, seed: u64, case_count: usize) -> Self {
        Self {
            registry,
            supervisor,
            generator: CaseGenerator::new(seed),
            case_count: case_count as u64,
        }
    }

    /// Creates a harness from a run configuration.
    pub fn from_config(registry: Arc<Registry>, config: &HarnessConfig) -> Self {
        Self::new(
            registry,
            Supervisor::new(config.parallelism, config.timeout()),
            config.seed,
            config.case_count,
        )
    }

    /// The case generator.
    pub fn generator(&self) -> &CaseGenerator {
        &self.generator
    }

    /// Runs every case.
    pub fn run(&self) -> Result<RunReport> {
        self.run_range(0..self.case_count)
    }

    /// Runs a single case again.
    pub fn replay(&self, index: u64) -> Result<RunReport> {
        self.run_range(index..index + 1)
    }

    /// Runs the cases at `indices`.
    ///
    /// An algorithm that times out once is not called again for the rest
    /// of the run; its remaining cases are reported as timeouts.
    pub fn run_range(&self, indices: Range<u64>) -> Result<RunReport> {
        let mut report = RunReport::default();
        let mut hung = FxHashSet::default();
        let mut start = indices.start;
        while start < indices.end {
            let end = indices.end.min(start + BATCH);
            self.run_batch(start..end, &mut hung, &mut report)?;
            start = end;
        }
        if !hung.is_empty() {
            warn!(algorithms = hung.len(), "algorithms abandoned after a timeout");
        }
        info!(
            seed = self.generator.seed(),
            cases = indices.end.saturating_sub(indices.start),
            checks = report.checked,
            failures = report.failures.len(),
            "fuzz run finished"
        );
        Ok(report)
    }

    fn run_batch(
        &self,
        indices: Range<u64>,
        hung: &mut FxHashSet<AlgorithmId>,
        report: &mut RunReport,
    ) -> Result<()> {
        debug!(from = indices.start, to = indices.end, "fuzz batch");
        let cases: Vec<Arc<FuzzCase>> = self.generator.cases(indices).map(Arc::new).collect();

        // (case, algorithm, submitted to the pool)
        let mut targets: Vec<(Arc<FuzzCase>, AlgorithmId, bool)> =
            Vec::with_capacity(cases.len() * self.registry.len());
        let mut jobs: Vec<(usize, Job<Result<()>>)> = Vec::with_capacity(targets.capacity());
        for case in &cases {
            for (group, (id, algorithm)) in self.registry.iter().enumerate() {
                let submitted = !hung.contains(id);
                targets.push((Arc::clone(case), id.clone(), submitted));
                if !submitted {
                    continue;
                }
                let job_case = Arc::clone(case);
                let job_id = id.clone();
                let job: Job<Result<()>> = match algorithm {
                    Algorithm::Encoder(encoder) => {
                        let encoder = Arc::clone(encoder);
                        Box::new(move || check_encoder(&job_id, encoder.as_ref(), &job_case))
                    }
                    Algorithm::Comparator(comparator) => {
                        let comparator = Arc::clone(comparator);
                        Box::new(move || check_comparator(&job_id, comparator.as_ref(), &job_case))
                    }
                };
                jobs.push((group, job));
            }
        }

        let mut outcomes = self.supervisor.run_grouped(jobs)?.into_iter();
        report.checked += targets.len();
        for (case, id, submitted) in targets {
            let outcome = if submitted {
                outcomes.next().unwrap_or(JobOutcome::Skipped)
            } else {
                JobOutcome::Skipped
            };
            if matches!(outcome, JobOutcome::TimedOut) {
                hung.insert(id.clone());
            }
            if let Err(failure) =
                Failure::settle(outcome, &id, || case.label(), self.supervisor.timeout())
            {
                report.failures.push(failure);
            }
        }
        Ok(())
    }
}

fn violation(id: &AlgorithmId, detail: String) -> Error {
    Error::InvariantViolation {
        algorithm: id.clone(),
        detail,
    }
}

/// Checks one encoder on one case.
pub fn check_encoder(id: &AlgorithmId, encoder: &dyn PhoneticEncoder, case: &FuzzCase) -> Result<()> {
    let length = encoder.code_length();
    for options in PRESETS {
        let token = match normalize(&case.input, options) {
            Ok(token) => token,
            // Not every input has an ASCII transliteration.
            Err(Error::InvalidInput { .. }) if options.ascii_only => continue,
            Err(e) => return Err(e),
        };
        let again = token.renormalize(options)?;
        if again != token {
            return Err(violation(
                id,
                format!("normalization ({options}) is not idempotent: {token:?} became {again:?}"),
            ));
        }

        let code = encoder.encode(&token);
        let repeated = encoder.encode(&token);
        if repeated != code {
            return Err(violation(
                id,
                format!("encoding ({options}) is not deterministic: {code} then {repeated}"),
            ));
        }
        let renormalized = encoder.encode(&again);
        if renormalized != code {
            return Err(violation(
                id,
                format!("encoding ({options}) changed under renormalization: {code} then {renormalized}"),
            ));
        }
        if let Some(part) = code.parts().iter().find(|part| !length.admits(part)) {
            return Err(violation(
                id,
                format!("code part {part:?} ({options}) is not of length {length}"),
            ));
        }
    }
    Ok(())
}

/// Checks one comparator on one case.
pub fn check_comparator(id: &AlgorithmId, comparator: &dyn Comparator, case: &FuzzCase) -> Result<()> {
    let profile = comparator.profile();
    let a = Token::raw(&case.input);
    let b = Token::raw(&case.partner);

    let forward = comparator.compare(&a, &b);
    if forward.direction != profile.direction {
        return Err(violation(
            id,
            format!("returned a {} for a {} profile", forward.direction, profile.direction),
        ));
    }
    if !profile.range.contains(forward.value) {
        return Err(violation(
            id,
            format!("value {} is outside {}", forward.value, profile.range),
        ));
    }

    let repeated = comparator.compare(&a, &b);
    if repeated.value.to_bits() != forward.value.to_bits() {
        return Err(violation(
            id,
            format!("not deterministic: {} then {}", forward.value, repeated.value),
        ));
    }

    if profile.symmetric {
        let backward = comparator.compare(&b, &a);
        if backward.value.to_bits() != forward.value.to_bits() {
            return Err(violation(
                id,
                format!("declared symmetric but gave {} and {}", forward.value, backward.value),
            ));
        }
    }

    for token in [&a, &b, &Token::raw("")] {
        let value = comparator.compare(token, token).value;
        if value != profile.identity {
            return Err(violation(
                id,
                format!(
                    "compare({:?}, itself) = {value}, identity is {}",
                    token.as_str(),
                    profile.identity
                ),
            ));
        }
    }
    Ok(())
}
