//! The on-disk regression store.
//!
//! A versioned JSON document:
//!
//! ```json
//! {
//!   "version": 1,
//!   "records": [
//!     { "algorithm": "soundex", "input": ["Robert"], "expected": { "code": ["R163"] } },
//!     { "algorithm": "levenshtein", "input": ["kitten", "sitting"], "expected": { "score": 3.0 } }
//!   ]
//! }
//! ```
//!
//! Records are written sorted by algorithm and input so that re-blessing an
//! unchanged store produces an identical file.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::record::RegressionRecord;
use crate::error::{Error, Result};

/// Format version written by this crate.
pub const STORE_VERSION: u32 = 1;

/// A collection of regression records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionStore {
    /// Format version of the file the store was read from.
    pub version: u32,
    /// The records, in file order.
    pub records: Vec<RegressionRecord>,
}

impl Default for RegressionStore {
    fn default() -> Self {
        Self {
            version: STORE_VERSION,
            records: Vec::new(),
        }
    }
}

#[derive(Serialize)]
struct SortedView<'a> {
    version: u32,
    records: Vec<&'a RegressionRecord>,
}

impl RegressionStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record.
    pub fn push(&mut self, record: RegressionRecord) {
        self.records.push(record);
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the store holds no record.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Parses a store, rejecting unknown versions.
    pub fn from_json(json: &str) -> Result<Self> {
        let store: Self = serde_json::from_str(json)?;
        if store.version != STORE_VERSION {
            return Err(Error::UnsupportedStoreVersion {
                found: store.version,
                expected: STORE_VERSION,
            });
        }
        Ok(store)
    }

    /// Reads a store from a file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let store = Self::from_json(&fs::read_to_string(path)?)?;
        tracing::debug!(path = %path.display(), records = store.len(), "loaded regression store");
        Ok(store)
    }

    /// Serializes the store with records in canonical order.
    pub fn to_json(&self) -> Result<String> {
        let mut records: Vec<&RegressionRecord> = self.records.iter().collect();
        records.sort_by(|a, b| {
            a.algorithm
                .as_str()
                .cmp(b.algorithm.as_str())
                .then_with(|| a.input.cmp(&b.input))
        });
        let view = SortedView {
            version: STORE_VERSION,
            records,
        };
        let mut json = serde_json::to_string_pretty(&view)?;
        json.push('\n');
        Ok(json)
    }

    /// Writes the store to a file, creating parent directories.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, self.to_json()?)?;
        tracing::debug!(path = %path.display(), records = self.len(), "saved regression store");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::phonetic::PhoneticCode;
    use tempfile::TempDir;

    fn sample() -> RegressionStore {
        let mut store = RegressionStore::new();
        store.push(RegressionRecord::comparator("levenshtein", "kitten", "sitting", 3.0).unwrap());
        store.push(RegressionRecord::encoder("soundex", "Robert", PhoneticCode::single("R163")).unwrap());
        store.push(RegressionRecord::encoder("soundex", "Ashcraft", PhoneticCode::single("A261")).unwrap());
        store
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("store.json");
        let store = sample();
        store.save(&path).unwrap();

        let loaded = RegressionStore::load(&path).unwrap();
        assert_eq!(loaded.len(), 3);
        assert_eq!(loaded.records[0].algorithm.as_str(), "levenshtein");
        assert_eq!(loaded.records[1].input, ["Ashcraft"]);
    }

    #[test]
    fn test_output_is_canonical() {
        let store = sample();
        let mut reversed = store.clone();
        reversed.records.reverse();
        assert_eq!(store.to_json().unwrap(), reversed.to_json().unwrap());
        assert!(store.to_json().unwrap().ends_with("}\n"));
    }

    #[test]
    fn test_scores_round_trip_exactly() {
        let mut store = RegressionStore::new();
        let score = 0.1 + 0.2;
        store.push(RegressionRecord::comparator("typo", "a", "b", score).unwrap());
        let back = RegressionStore::from_json(&store.to_json().unwrap()).unwrap();
        match &back.records[0].expected {
            crate::regression::Expected::Score(s) => assert_eq!(s.to_bits(), score.to_bits()),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_rejects_unknown_version() {
        let err = RegressionStore::from_json(r#"{"version": 2, "records": []}"#).unwrap_err();
        assert!(matches!(
            err,
            Error::UnsupportedStoreVersion {
                found: 2,
                expected: STORE_VERSION
            }
        ));
    }

    #[test]
    fn test_rejects_malformed_records() {
        let json = r#"{"version": 1, "records": [{"algorithm": "Bad Id", "input": [], "expected": {"score": 0.0}}]}"#;
        assert!(matches!(RegressionStore::from_json(json), Err(Error::Json(_))));
    }
}
