//! Regression oracle: recorded outputs replayed against the registry.
//!
//! A [`RegressionStore`] holds [`RegressionRecord`]s, each pinning the
//! output of one algorithm for one input. [`RegressionOracle::run`] checks
//! every record on the worker pool and reports mismatches, timeouts, panics
//! and algorithms that have no record at all. [`RegressionOracle::bless`]
//! re-records the current outputs after an intentional change.
//!
//! ```rust
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! use libphonetic::harness::Supervisor;
//! use libphonetic::phonetic::PhoneticCode;
//! use libphonetic::regression::{RegressionOracle, RegressionRecord, RegressionStore};
//! use libphonetic::registry::catalog;
//!
//! let registry = Arc::new(catalog::builtin().unwrap());
//! let mut store = RegressionStore::new();
//! store.push(RegressionRecord::encoder("soundex", "Robert", PhoneticCode::single("R163")).unwrap());
//!
//! let oracle = RegressionOracle::new(registry, Supervisor::new(2, Duration::from_secs(2)));
//! let report = oracle.run(&store).unwrap();
//! assert_eq!(report.checked, 1);
//! // Every other algorithm is reported as missing a record.
//! assert!(report.coverage_gaps().count() > 0);
//! ```

mod oracle;
mod record;
mod store;

pub use oracle::{BlessReport, CoverReport, RegressionOracle};
pub use record::{Expected, RegressionRecord};
pub use store::{RegressionStore, STORE_VERSION};
