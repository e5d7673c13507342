//! Fuzzing the built-in registry, and the harness's handling of
//! misbehaving algorithms.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use libphonetic::distance::Levenshtein;
use libphonetic::harness::{Job, JobOutcome};
use libphonetic::prelude::*;

#[test]
fn test_ten_thousand_cases_without_faults_or_timeouts() {
    let config = HarnessConfig {
        seed: 42,
        case_count: 10_000,
        timeout_ms: 10_000,
        ..HarnessConfig::default()
    };
    let harness = FuzzHarness::from_config(Arc::new(catalog::builtin().unwrap()), &config);
    let report = harness.run().unwrap();

    for failure in report.failures.iter().take(20) {
        eprintln!("{failure}");
    }
    assert_eq!(report.checked, 10_000 * 24);
    assert_eq!(report.faults().count(), 0, "{report}");
    assert_eq!(report.timeouts().count(), 0, "{report}");
    assert!(report.is_clean(), "{report}");
}

/// Never returns within any reasonable budget.
struct Hanging;

impl PhoneticEncoder for Hanging {
    fn encode(&self, _token: &Token) -> PhoneticCode {
        thread::sleep(Duration::from_secs(2));
        PhoneticCode::single("")
    }

    fn code_length(&self) -> CodeLength {
        CodeLength::Unbounded
    }

    fn description(&self) -> &'static str {
        "sleeps"
    }
}

/// Panics on every non-empty input.
struct Panicking;

impl PhoneticEncoder for Panicking {
    fn encode(&self, token: &Token) -> PhoneticCode {
        if !token.is_empty() {
            panic!("cannot encode {token}");
        }
        PhoneticCode::single("")
    }

    fn code_length(&self) -> CodeLength {
        CodeLength::Unbounded
    }

    fn description(&self) -> &'static str {
        "panics"
    }
}

fn misbehaving_registry() -> Registry {
    RegistryBuilder::new()
        .with("hanging", Algorithm::encoder(Hanging))
        .unwrap()
        .with("panicking", Algorithm::encoder(Panicking))
        .unwrap()
        .with("levenshtein", Algorithm::comparator(Levenshtein))
        .unwrap()
        .build()
}

#[test]
fn test_hangs_and_panics_are_isolated() {
    let harness = FuzzHarness::new(
        Arc::new(misbehaving_registry()),
        Supervisor::new(2, Duration::from_millis(100)),
        7,
        8,
    );
    let report = harness.run().unwrap();

    assert_eq!(report.checked, 8 * 3);
    assert_eq!(report.timeouts().count(), 8);
    assert!(report.timeouts().all(|f| f.algorithm.as_str() == "hanging"));
    assert!(report.faults().all(|f| f.algorithm.as_str() == "panicking"));
    assert!(report
        .failures
        .iter()
        .all(|f| f.algorithm.as_str() != "levenshtein"));
    assert!(report.failures.iter().all(|f| f.case.starts_with("seed=7 index=")));
}

#[test]
fn test_pool_replaces_timed_out_workers() {
    let completed = Arc::new(AtomicUsize::new(0));
    let mut jobs: Vec<Job<()>> = Vec::new();
    for i in 0..6 {
        let completed = Arc::clone(&completed);
        jobs.push(Box::new(move || {
            if i % 2 == 0 {
                thread::sleep(Duration::from_secs(2));
            }
            completed.fetch_add(1, Ordering::SeqCst);
        }));
    }

    let outcomes = Supervisor::new(1, Duration::from_millis(100)).run(jobs).unwrap();
    let timed_out = outcomes
        .iter()
        .filter(|o| matches!(o, JobOutcome::TimedOut))
        .count();
    assert_eq!(timed_out, 3);
    assert!(completed.load(Ordering::SeqCst) >= 3);
}

#[test]
fn test_replayed_case_matches_original() {
    let registry = Arc::new(catalog::builtin().unwrap());
    let harness = FuzzHarness::new(registry, Supervisor::new(2, Duration::from_secs(10)), 99, 50);
    let case = harness.generator().case(17);
    assert_eq!(case, CaseGenerator::new(99).case(17));
    assert!(harness.replay(17).unwrap().is_clean());
}
