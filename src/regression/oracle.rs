//! Replays a regression store against a registry.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use tracing::{info, warn};

use super::record::{Expected, RegressionRecord};
use super::store::RegressionStore;
use crate::error::{Error, Result};
use crate::harness::{Failure, HarnessConfig, Job, RunReport, Supervisor};
use crate::registry::{Algorithm, AlgorithmId, Registry};
use crate::token::NormalizeOptions;

const SAMPLE_WORDS: &[&str] = &["Robert", "Ashcraft", "Müller", ""];

const SAMPLE_PAIRS: &[(&str, &str)] = &[("cat", "hat"), ("Niall", "Neil"), ("", "")];

/// Outcome of [`RegressionOracle::bless`].
#[derive(Debug, Default)]
pub struct BlessReport {
    /// Records whose expected output changed.
    pub updated: usize,
    /// Records that could not be observed. Their expectation is kept.
    pub report: RunReport,
}

/// Outcome of [`RegressionOracle::cover_missing`].
#[derive(Debug, Default)]
pub struct CoverReport {
    /// Algorithms that received sample records, in id order.
    pub added: Vec<AlgorithmId>,
    /// Samples that could not be observed.
    pub report: RunReport,
}

/// Checks every record of a store on a supervised worker pool.
pub struct RegressionOracle {
    registry: Arc<Registry>,
    supervisor: Supervisor,
}

impl RegressionOracle {
    /// Creates an oracle running on `supervisor`.
    pub fn new(registry: Arc<Registry>, supervisor: Supervisor) -> Self {
        Self {
            registry,
            supervisor,
        }
    }

    /// Creates an oracle with the pool settings of `config`.
    pub fn from_config(registry: Arc<Registry>, config: &HarnessConfig) -> Self {
        Self::new(registry, Supervisor::new(config.parallelism, config.timeout()))
    }

    /// Observes every record on the pool, in order. Records of one
    /// algorithm share a pool group, so an algorithm that hangs once is not
    /// called again.
    fn observe_all(
        &self,
        records: &[RegressionRecord],
    ) -> Result<Vec<std::result::Result<Expected, Failure>>> {
        let mut groups: BTreeMap<&AlgorithmId, usize> = BTreeMap::new();
        let jobs: Vec<(usize, Job<Result<Expected>>)> = records
            .iter()
            .map(|record| {
                let next = groups.len();
                let group = *groups.entry(&record.algorithm).or_insert(next);
                let registry = Arc::clone(&self.registry);
                let record = record.clone();
                let job: Job<Result<Expected>> = Box::new(move || record.observe(&registry));
                (group, job)
            })
            .collect();

        let outcomes = self.supervisor.run_grouped(jobs)?;
        Ok(outcomes
            .into_iter()
            .zip(records)
            .map(|(outcome, record)| {
                Failure::settle(
                    outcome,
                    &record.algorithm,
                    || record.case_label(),
                    self.supervisor.timeout(),
                )
            })
            .collect())
    }

    /// Checks every record, then reports registered algorithms without one.
    ///
    /// Mismatches, timeouts and panics become failures; only a failure to
    /// start the worker pool is returned as an error.
    pub fn run(&self, store: &RegressionStore) -> Result<RunReport> {
        let observed = self.observe_all(&store.records)?;
        let mut report = RunReport {
            checked: observed.len(),
            failures: Vec::new(),
        };

        for (record, result) in store.records.iter().zip(observed) {
            match result {
                Ok(actual) if record.expected.admits(&actual, record.tolerance) => {}
                Ok(actual) => report.failures.push(Failure {
                    algorithm: record.algorithm.clone(),
                    case: record.case_label(),
                    reason: Error::RegressionMismatch {
                        algorithm: record.algorithm.clone(),
                        input: record.input.clone(),
                        expected: record.expected.to_string(),
                        actual: actual.to_string(),
                    },
                }),
                Err(failure) => report.failures.push(failure),
            }
        }

        let covered: BTreeSet<&str> = store.records.iter().map(|r| r.algorithm.as_str()).collect();
        for id in self.registry.ids() {
            if !covered.contains(id.as_str()) {
                warn!(%id, "algorithm has no regression record");
                report.failures.push(Failure {
                    algorithm: id.clone(),
                    case: String::new(),
                    reason: Error::MissingRegression(id.clone()),
                });
            }
        }

        info!(
            records = report.checked,
            failures = report.failures.len(),
            "regression run finished"
        );
        Ok(report)
    }

    /// Re-records the current output of every record.
    pub fn bless(&self, store: &mut RegressionStore) -> Result<BlessReport> {
        let observed = self.observe_all(&store.records)?;
        let mut bless = BlessReport::default();
        bless.report.checked = observed.len();

        for (record, result) in store.records.iter_mut().zip(observed) {
            match result {
                Ok(actual) => {
                    if !record.expected.admits(&actual, 0.0) {
                        info!(algorithm = %record.algorithm, input = ?record.input, "expected output changed");
                        record.expected = actual;
                        bless.updated += 1;
                    }
                }
                Err(failure) => bless.report.failures.push(failure),
            }
        }
        Ok(bless)
    }

    /// Adds records for every registered algorithm that has none, using
    /// the built-in sample inputs.
    ///
    /// The samples are observed on the pool. An algorithm is only added
    /// when all of its samples could be observed; otherwise its failures
    /// are reported and it stays uncovered.
    pub fn cover_missing(&self, store: &mut RegressionStore) -> Result<CoverReport> {
        let covered: BTreeSet<AlgorithmId> =
            store.records.iter().map(|r| r.algorithm.clone()).collect();
        let mut samples = Vec::new();
        for (id, algorithm) in self.registry.iter() {
            if covered.contains(id) {
                continue;
            }
            let inputs: Vec<Vec<String>> = match algorithm {
                Algorithm::Encoder(_) => SAMPLE_WORDS
                    .iter()
                    .map(|w| vec![w.to_string()])
                    .collect(),
                Algorithm::Comparator(_) => SAMPLE_PAIRS
                    .iter()
                    .map(|(a, b)| vec![a.to_string(), b.to_string()])
                    .collect(),
            };
            samples.extend(inputs.into_iter().map(|input| RegressionRecord {
                algorithm: id.clone(),
                input,
                normalize: NormalizeOptions::RAW,
                expected: Expected::Score(0.0),
                tolerance: 0.0,
            }));
        }

        let observed = self.observe_all(&samples)?;
        let mut cover = CoverReport::default();
        cover.report.checked = observed.len();

        let mut captured: BTreeMap<AlgorithmId, Vec<RegressionRecord>> = BTreeMap::new();
        let mut failed: BTreeSet<AlgorithmId> = BTreeSet::new();
        for (mut record, result) in samples.into_iter().zip(observed) {
            match result {
                Ok(actual) => {
                    record.expected = actual;
                    captured.entry(record.algorithm.clone()).or_default().push(record);
                }
                Err(failure) => {
                    failed.insert(record.algorithm.clone());
                    cover.report.failures.push(failure);
                }
            }
        }

        for (id, records) in captured {
            if failed.contains(&id) {
                warn!(%id, "sample records not added; the algorithm failed on a sample");
                continue;
            }
            for record in records {
                store.push(record);
            }
            cover.added.push(id);
        }
        info!(added = cover.added.len(), failures = cover.report.failures.len(), "coverage filled");
        Ok(cover)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::phonetic::PhoneticCode;
    use crate::registry::{catalog, RegistryBuilder};

    fn oracle(registry: Registry) -> RegressionOracle {
        RegressionOracle::new(Arc::new(registry), Supervisor::new(2, Duration::from_secs(5)))
    }

    fn small_registry() -> Registry {
        RegistryBuilder::new()
            .with("soundex", Algorithm::encoder(crate::phonetic::Soundex::new()))
            .unwrap()
            .with("levenshtein", Algorithm::comparator(crate::distance::Levenshtein))
            .unwrap()
            .build()
    }

    #[test]
    fn test_clean_run() {
        let mut store = RegressionStore::new();
        store.push(RegressionRecord::encoder("soundex", "Robert", PhoneticCode::single("R163")).unwrap());
        store.push(RegressionRecord::comparator("levenshtein", "kitten", "sitting", 3.0).unwrap());

        let report = oracle(small_registry()).run(&store).unwrap();
        assert!(report.is_clean(), "{report}");
        assert_eq!(report.checked, 2);
    }

    #[test]
    fn test_mismatches_and_gaps_are_collected() {
        let mut store = RegressionStore::new();
        store.push(RegressionRecord::encoder("soundex", "Robert", PhoneticCode::single("X000")).unwrap());
        store.push(RegressionRecord::encoder("soundex", "Rupert", PhoneticCode::single("R163")).unwrap());

        let report = oracle(small_registry()).run(&store).unwrap();
        assert_eq!(report.failures.len(), 2);
        assert!(matches!(report.failures[0].reason, Error::RegressionMismatch { .. }));
        assert_eq!(report.coverage_gaps().count(), 1);
        assert_eq!(report.failures[1].algorithm.as_str(), "levenshtein");
    }

    #[test]
    fn test_unknown_algorithm_is_a_failure() {
        let mut store = RegressionStore::new();
        store.push(RegressionRecord::encoder("nysiis", "Robert", PhoneticCode::single("RABAD")).unwrap());
        let report = oracle(small_registry()).run(&store).unwrap();
        assert!(report
            .failures
            .iter()
            .any(|f| matches!(f.reason, Error::UnknownAlgorithm(_))));
    }

    #[test]
    fn test_bless_updates_changed_records() {
        let mut store = RegressionStore::new();
        store.push(RegressionRecord::encoder("soundex", "Robert", PhoneticCode::single("X000")).unwrap());
        store.push(RegressionRecord::comparator("levenshtein", "kitten", "sitting", 3.0).unwrap());

        let oracle = oracle(small_registry());
        let bless = oracle.bless(&mut store).unwrap();
        assert_eq!(bless.updated, 1);
        assert!(bless.report.is_clean());
        assert_eq!(store.records[0].expected, Expected::Code(PhoneticCode::single("R163")));
        assert!(oracle.run(&store).unwrap().is_clean());
    }

    #[test]
    fn test_cover_missing_fills_every_gap() {
        let oracle = oracle(catalog::builtin().unwrap());
        let mut store = RegressionStore::new();
        let cover = oracle.cover_missing(&mut store).unwrap();
        assert_eq!(cover.added.len(), 24);
        assert!(cover.report.is_clean());
        assert!(oracle.run(&store).unwrap().is_clean());
    }

    /// Sleeps far past any budget used here.
    struct Sleepy;

    impl crate::phonetic::PhoneticEncoder for Sleepy {
        fn encode(&self, _token: &crate::token::Token) -> PhoneticCode {
            std::thread::sleep(Duration::from_secs(3));
            PhoneticCode::single("")
        }

        fn code_length(&self) -> crate::phonetic::CodeLength {
            crate::phonetic::CodeLength::Unbounded
        }

        fn description(&self) -> &'static str {
            "sleeps"
        }
    }

    #[test]
    fn test_cover_missing_respects_the_timeout() {
        let registry = RegistryBuilder::new()
            .with("sleepy", Algorithm::encoder(Sleepy))
            .unwrap()
            .with("soundex", Algorithm::encoder(crate::phonetic::Soundex::new()))
            .unwrap()
            .build();
        let oracle = RegressionOracle::new(
            Arc::new(registry),
            Supervisor::new(2, Duration::from_millis(100)),
        );
        let mut store = RegressionStore::new();

        let started = std::time::Instant::now();
        let cover = oracle.cover_missing(&mut store).unwrap();
        assert!(started.elapsed() < Duration::from_secs(3));

        let added: Vec<&str> = cover.added.iter().map(AlgorithmId::as_str).collect();
        assert_eq!(added, ["soundex"]);
        assert_eq!(store.len(), SAMPLE_WORDS.len());
        assert_eq!(cover.report.timeouts().count(), SAMPLE_WORDS.len());
        assert!(cover.report.timeouts().all(|f| f.algorithm.as_str() == "sleepy"));
    }
}
