//! CLI command implementations

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use colored::Colorize;

use crate::fuzz::FuzzHarness;
use crate::harness::{HarnessConfig, RunReport};
use crate::registry::{catalog, Algorithm, AlgorithmKind, Registry};
use crate::regression::{RegressionOracle, RegressionStore};
use crate::token::{normalize, NormalizeOptions};

use super::args::{Cli, Commands};

/// Execute a CLI command
pub fn execute(cli: Cli) -> Result<()> {
    let file_config = HarnessConfig::load_or_default(cli.config.as_deref())
        .context("failed to load the harness configuration")?;
    let registry = Arc::new(catalog::builtin().context("failed to build the algorithm registry")?);

    match cli.command {
        Commands::List { kind } => cmd_list(&registry, kind),
        Commands::Encode {
            algorithm,
            word,
            normalize,
        } => cmd_encode(&registry, &algorithm, &word, normalize.into()),
        Commands::Compare {
            algorithm,
            a,
            b,
            normalize,
        } => cmd_compare(&registry, &algorithm, &a, &b, normalize.into()),
        Commands::Regress { store } => {
            let config =
                file_config.merge_with_cli(None, None, cli.timeout_ms, cli.parallelism, store);
            cmd_regress(registry, &config)
        }
        Commands::Bless { store, cover } => {
            let config =
                file_config.merge_with_cli(None, None, cli.timeout_ms, cli.parallelism, store);
            cmd_bless(registry, &config, cover)
        }
        Commands::Fuzz {
            seed,
            cases,
            replay,
        } => {
            let config =
                file_config.merge_with_cli(seed, cases, cli.timeout_ms, cli.parallelism, None);
            cmd_fuzz(registry, &config, replay)
        }
    }
}

/// List command
fn cmd_list(registry: &Registry, kind: Option<AlgorithmKind>) -> Result<()> {
    for (id, algorithm) in registry.iter() {
        if kind.is_some_and(|k| k != algorithm.kind()) {
            continue;
        }
        let detail = match algorithm {
            Algorithm::Encoder(e) => format!("code length {}", e.code_length()),
            Algorithm::Comparator(c) => {
                let profile = c.profile();
                format!("{} in {}", profile.direction, profile.range)
            }
        };
        println!(
            "  {:<24} {:<11} {:<26} {}",
            id.to_string().green(),
            algorithm.kind().to_string().cyan(),
            detail,
            algorithm.description().dimmed()
        );
    }
    Ok(())
}

/// Encode command
fn cmd_encode(
    registry: &Registry,
    algorithm: &str,
    word: &str,
    options: NormalizeOptions,
) -> Result<()> {
    let encoder = registry.encoder(algorithm)?;
    let token = normalize(word, options)?;
    println!("{}", encoder.encode(&token));
    Ok(())
}

/// Compare command
fn cmd_compare(
    registry: &Registry,
    algorithm: &str,
    a: &str,
    b: &str,
    options: NormalizeOptions,
) -> Result<()> {
    let comparator = registry.comparator(algorithm)?;
    let a = normalize(a, options)?;
    let b = normalize(b, options)?;
    println!("{}", comparator.compare(&a, &b));
    Ok(())
}

/// Regress command
fn cmd_regress(registry: Arc<Registry>, config: &HarnessConfig) -> Result<()> {
    let store = RegressionStore::load(&config.store).with_context(|| {
        format!(
            "failed to load regression store {}",
            config.store.display()
        )
    })?;
    println!(
        "{} Checking {} records from {}",
        "→".cyan(),
        store.len().to_string().green(),
        config.store.display().to_string().yellow()
    );

    let report = RegressionOracle::from_config(registry, config).run(&store)?;
    finish(&report)
}

/// Bless command
fn cmd_bless(registry: Arc<Registry>, config: &HarnessConfig, cover: bool) -> Result<()> {
    let mut store = if config.store.exists() || !cover {
        RegressionStore::load(&config.store).with_context(|| {
            format!(
                "failed to load regression store {}",
                config.store.display()
            )
        })?
    } else {
        RegressionStore::new()
    };

    let oracle = RegressionOracle::from_config(registry, config);
    let mut blessed = oracle.bless(&mut store)?;
    println!(
        "  Updated {} of {} record(s)",
        blessed.updated.to_string().green(),
        store.len()
    );

    if cover {
        let filled = oracle.cover_missing(&mut store)?;
        for id in &filled.added {
            println!("  Added sample records for {}", id.to_string().green());
        }
        blessed.report.checked += filled.report.checked;
        blessed.report.failures.extend(filled.report.failures);
    }

    store
        .save(&config.store)
        .with_context(|| format!("failed to write {}", config.store.display()))?;
    println!(
        "{} Wrote {}",
        "→".cyan(),
        config.store.display().to_string().yellow()
    );
    finish(&blessed.report)
}

/// Fuzz command
fn cmd_fuzz(registry: Arc<Registry>, config: &HarnessConfig, replay: Option<u64>) -> Result<()> {
    let harness = FuzzHarness::from_config(registry, config);
    let report = match replay {
        Some(index) => {
            let case = harness.generator().case(index);
            println!("  Shape:   {:?}", case.shape);
            println!("  Input:   {:?}", case.input);
            println!("  Partner: {:?}", case.partner);
            harness.replay(index)?
        }
        None => {
            println!(
                "{} Fuzzing {} cases with seed {}",
                "→".cyan(),
                config.case_count.to_string().green(),
                config.seed.to_string().yellow()
            );
            harness.run()?
        }
    };
    finish(&report)
}

/// Prints every failure and the summary; fails when anything failed.
fn finish(report: &RunReport) -> Result<()> {
    for failure in &report.failures {
        println!("  {} {}", "✗".red(), failure);
    }
    println!();
    if report.is_clean() {
        println!("{}", report.to_string().green().bold());
        Ok(())
    } else {
        bail!("{report}")
    }
}
