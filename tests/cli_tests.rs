//! Integration tests for CLI functionality

#[cfg(feature = "cli")]
mod cli_integration_tests {
    use std::fs;

    use clap::Parser;
    use tempfile::TempDir;

    use libphonetic::cli::{commands, Cli};
    use libphonetic::harness::HarnessConfig;
    use libphonetic::regression::RegressionStore;

    fn run(args: &[&str]) -> anyhow::Result<()> {
        let mut argv = vec!["libphonetic"];
        argv.extend_from_slice(args);
        commands::execute(Cli::try_parse_from(argv)?)
    }

    #[test]
    fn test_list_encode_compare() {
        run(&["list"]).unwrap();
        run(&["list", "--kind", "comparator"]).unwrap();
        run(&["encode", "soundex", "Robert"]).unwrap();
        run(&["encode", "soundex", "Müller", "--strip-diacritics"]).unwrap();
        run(&["compare", "levenshtein", "kitten", "sitting"]).unwrap();
    }

    #[test]
    fn test_wrong_kind_and_unknown_algorithm_fail() {
        assert!(run(&["encode", "levenshtein", "Robert"]).is_err());
        assert!(run(&["compare", "no-such-thing", "a", "b"]).is_err());
        assert!(run(&["encode", "soundex", "東京", "--ascii-only"]).is_err());
    }

    #[test]
    fn test_bless_then_regress() {
        let dir = TempDir::new().unwrap();
        let store = dir.path().join("store.json");
        let store_arg = store.to_str().unwrap();

        // A missing store is an error without --cover.
        assert!(run(&["regress", "--store", store_arg]).is_err());

        run(&["bless", "--store", store_arg, "--cover", "-j", "2"]).unwrap();
        let written = RegressionStore::load(&store).unwrap();
        assert!(!written.is_empty());

        run(&["regress", "--store", store_arg]).unwrap();
    }

    #[test]
    fn test_regress_fails_on_mismatch() {
        let dir = TempDir::new().unwrap();
        let store = dir.path().join("store.json");
        fs::write(
            &store,
            r#"{"version": 1, "records": [{"algorithm": "soundex", "input": ["Robert"], "expected": {"code": ["X000"]}}]}"#,
        )
        .unwrap();
        assert!(run(&["regress", "--store", store.to_str().unwrap()]).is_err());
    }

    #[test]
    fn test_fuzz_with_config_file() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.json");
        let config = HarnessConfig {
            seed: 5,
            case_count: 20,
            parallelism: 2,
            ..HarnessConfig::default()
        };
        config.save(&config_path).unwrap();

        run(&["fuzz", "--config", config_path.to_str().unwrap()]).unwrap();
        run(&["fuzz", "--replay", "3", "--seed", "5"]).unwrap();
    }

    #[test]
    fn test_malformed_config_is_reported() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.json");
        fs::write(&config_path, "{ not json").unwrap();
        let err = run(&["list", "--config", config_path.to_str().unwrap()]).unwrap_err();
        assert!(format!("{err:#}").contains("configuration"));
    }
}
