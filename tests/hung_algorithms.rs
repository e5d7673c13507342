//! An algorithm that never returns must not slow down, or be confused
//! with, the algorithms running next to it.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use libphonetic::distance::Levenshtein;
use libphonetic::prelude::*;

static RELEASE: AtomicBool = AtomicBool::new(false);
static CALLS: AtomicUsize = AtomicUsize::new(0);

/// Busy-loops until the test releases it.
struct Spinning;

impl PhoneticEncoder for Spinning {
    fn encode(&self, _token: &Token) -> PhoneticCode {
        CALLS.fetch_add(1, Ordering::SeqCst);
        while !RELEASE.load(Ordering::SeqCst) {
            std::hint::spin_loop();
        }
        PhoneticCode::single("")
    }

    fn code_length(&self) -> CodeLength {
        CodeLength::Unbounded
    }

    fn description(&self) -> &'static str {
        "spins"
    }
}

#[test]
fn test_spinning_encoder_is_abandoned_and_blamed_alone() {
    let registry = RegistryBuilder::new()
        .with("spin", Algorithm::encoder(Spinning))
        .unwrap()
        .with("levenshtein", Algorithm::comparator(Levenshtein))
        .unwrap()
        .build();
    let supervisor = Supervisor::new(2, Duration::from_millis(500));
    // More cases than one batch, so the abandonment carries over.
    let harness = FuzzHarness::new(Arc::new(registry), supervisor, 11, 600);

    let report = harness.run().unwrap();
    let calls = CALLS.load(Ordering::SeqCst);
    RELEASE.store(true, Ordering::SeqCst);

    assert_eq!(report.checked, 600 * 2);
    assert!(
        calls <= supervisor.parallelism(),
        "{calls} calls reached the spinning encoder"
    );
    assert_eq!(report.timeouts().count(), 600);
    assert!(report.timeouts().all(|f| f.algorithm.as_str() == "spin"));
    assert!(
        report
            .failures
            .iter()
            .all(|f| f.algorithm.as_str() != "levenshtein"),
        "{report}"
    );
}
