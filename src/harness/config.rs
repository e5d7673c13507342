//! Run configuration shared by the regression oracle and the fuzz harness.
//!
//! Values come from a JSON file and/or command-line flags; flags win.
//!
//! ```json
//! {
//!   "seed": 42,
//!   "case_count": 10000,
//!   "timeout_ms": 2000,
//!   "parallelism": 8,
//!   "store": "data/regression.json"
//! }
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Default fuzz seed.
pub const DEFAULT_SEED: u64 = 42;
/// Default number of fuzz cases.
pub const DEFAULT_CASE_COUNT: usize = 10_000;
/// Default wall-clock budget per algorithm call, in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 2_000;
/// Default location of the regression store.
pub const DEFAULT_STORE: &str = "data/regression.json";

/// Configuration of oracle and fuzz runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    /// Seed of the fuzz case generator.
    pub seed: u64,
    /// Number of fuzz cases.
    pub case_count: usize,
    /// Budget per (case, algorithm) job, in milliseconds.
    pub timeout_ms: u64,
    /// Number of worker threads.
    pub parallelism: usize,
    /// Path of the regression store.
    pub store: PathBuf,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            case_count: DEFAULT_CASE_COUNT,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            parallelism: num_cpus::get(),
            store: PathBuf::from(DEFAULT_STORE),
        }
    }
}

impl HarnessConfig {
    /// Loads a configuration file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Loads `path` if given, otherwise returns the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Writes the configuration as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Merge with command-line options (CLI options take precedence)
    pub fn merge_with_cli(
        &self,
        seed: Option<u64>,
        case_count: Option<usize>,
        timeout_ms: Option<u64>,
        parallelism: Option<usize>,
        store: Option<PathBuf>,
    ) -> Self {
        Self {
            seed: seed.unwrap_or(self.seed),
            case_count: case_count.unwrap_or(self.case_count),
            timeout_ms: timeout_ms.unwrap_or(self.timeout_ms),
            parallelism: parallelism.unwrap_or(self.parallelism),
            store: store.unwrap_or_else(|| self.store.clone()),
        }
    }

    /// The per-job budget.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: HarnessConfig = serde_json::from_str(r#"{"seed": 7}"#).unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.case_count, DEFAULT_CASE_COUNT);
        assert_eq!(config.timeout(), Duration::from_millis(DEFAULT_TIMEOUT_MS));
    }

    #[test]
    fn test_cli_overrides_file() {
        let file = HarnessConfig {
            seed: 1,
            case_count: 5,
            timeout_ms: 10,
            parallelism: 2,
            store: PathBuf::from("a.json"),
        };
        let merged = file.merge_with_cli(Some(9), None, Some(50), None, None);
        assert_eq!(merged.seed, 9);
        assert_eq!(merged.case_count, 5);
        assert_eq!(merged.timeout_ms, 50);
        assert_eq!(merged.parallelism, 2);
        assert_eq!(merged.store, PathBuf::from("a.json"));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let config = HarnessConfig {
            parallelism: 3,
            ..HarnessConfig::default()
        };
        config.save(&path).unwrap();
        assert_eq!(HarnessConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(HarnessConfig::load(&dir.path().join("nope.json")).is_err());
    }
}
