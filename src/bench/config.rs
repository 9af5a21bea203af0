//! Benchmark suite configuration.
//!
//! # Environment Variables
//!
//! - `FANOUT_SIZES`: comma-separated element counts (default: `1000,10000,100000`)
//! - `FANOUT_SCENARIOS`: comma-separated scenario names (default: all five)
//! - `FANOUT_MIN_DEGREE`: B-tree minimum degree (default: `100`)
//! - `FANOUT_SEED`: seed for the random generators (default: `42`)
//! - `FANOUT_REPETITIONS`: timed runs per tree and workload (default: `1`)
//! - `FANOUT_SIMULATE_DISK`: count simulated block reads and writes; accepts
//!   `true`/`false`, `1`/`0`, `yes`/`no`, `on`/`off` in any case (default: `false`)
//! - `FANOUT_OUTPUT_DIR`: directory for CSV reports (default: `results`)
//!
//! # Invariants
//!
//! - `sizes` and `scenarios` are never empty
//! - every size is at least 1
//! - `2 <= min_degree <= 65536` and `repetitions >= 1`

use std::path::PathBuf;

use crate::bench::disk::DiskModel;
use crate::bench::generator::Scenario;
use crate::common::config::{
    DEFAULT_MIN_DEGREE, DEFAULT_OUTPUT_DIR, DEFAULT_SEED, DEFAULT_SIZES, MAX_MIN_DEGREE,
    MIN_MIN_DEGREE,
};
use crate::common::{Error, Result};

/// Everything that shapes one run of the benchmark suite.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkConfig {
    /// Element counts to benchmark, in run order.
    pub sizes: Vec<usize>,
    /// Workloads to run at every size.
    pub scenarios: Vec<Scenario>,
    /// Minimum degree of the B-tree under test.
    pub min_degree: usize,
    /// Seed for the random workloads.
    pub seed: u64,
    /// Timed runs per tree and workload; the median run is reported.
    pub repetitions: usize,
    /// Count simulated block I/O alongside wall-clock timings.
    pub simulate_disk: bool,
    /// Latencies used to price simulated block I/O.
    pub disk: DiskModel,
    /// Where CSV reports are written.
    pub output_dir: PathBuf,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            sizes: DEFAULT_SIZES.to_vec(),
            scenarios: Scenario::ALL.to_vec(),
            min_degree: DEFAULT_MIN_DEGREE,
            seed: DEFAULT_SEED,
            repetitions: 1,
            simulate_disk: false,
            disk: DiskModel::default(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}

impl BenchmarkConfig {
    /// Load configuration from `FANOUT_*` environment variables.
    ///
    /// # Errors
    /// Returns `Error::Config` if a variable is set but malformed or out of
    /// range.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to
    /// its value. Unset variables fall back to the defaults.
    ///
    /// # Errors
    /// Returns `Error::Config` if a value is malformed or out of range.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let config = Self {
            sizes: match lookup("FANOUT_SIZES") {
                Some(raw) => parse_list("FANOUT_SIZES", &raw)?,
                None => defaults.sizes,
            },
            scenarios: match lookup("FANOUT_SCENARIOS") {
                Some(raw) => parse_list("FANOUT_SCENARIOS", &raw)?,
                None => defaults.scenarios,
            },
            min_degree: parse_or("FANOUT_MIN_DEGREE", lookup("FANOUT_MIN_DEGREE"), defaults.min_degree)?,
            seed: parse_or("FANOUT_SEED", lookup("FANOUT_SEED"), defaults.seed)?,
            repetitions: parse_or("FANOUT_REPETITIONS", lookup("FANOUT_REPETITIONS"), defaults.repetitions)?,
            simulate_disk: match lookup("FANOUT_SIMULATE_DISK") {
                Some(raw) => parse_flag("FANOUT_SIMULATE_DISK", &raw)?,
                None => defaults.simulate_disk,
            },
            disk: defaults.disk,
            output_dir: lookup("FANOUT_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.output_dir),
        };

        config.validate()?;
        Ok(config)
    }

    /// Check the invariants listed in the module docs.
    ///
    /// # Errors
    /// Returns `Error::Config` naming the first offending setting.
    pub fn validate(&self) -> Result<()> {
        if self.sizes.is_empty() {
            return Err(Error::config("FANOUT_SIZES", "must list at least one size"));
        }
        if self.sizes.contains(&0) {
            return Err(Error::config("FANOUT_SIZES", "sizes must be at least 1"));
        }
        if self.scenarios.is_empty() {
            return Err(Error::config("FANOUT_SCENARIOS", "must list at least one scenario"));
        }
        if !(MIN_MIN_DEGREE..=MAX_MIN_DEGREE).contains(&self.min_degree) {
            return Err(Error::config(
                "FANOUT_MIN_DEGREE",
                format!(
                    "must be between {} and {}, got {}",
                    MIN_MIN_DEGREE, MAX_MIN_DEGREE, self.min_degree
                ),
            ));
        }
        if self.repetitions == 0 {
            return Err(Error::config("FANOUT_REPETITIONS", "must be at least 1"));
        }
        Ok(())
    }

    /// Total number of (size, scenario, tree) benchmark runs.
    pub fn total_runs(&self) -> usize {
        self.sizes.len() * self.scenarios.len() * 2
    }
}

fn parse_or<T: std::str::FromStr>(name: &str, raw: Option<String>, default: T) -> Result<T> {
    match raw {
        Some(value) => value
            .trim()
            .parse::<T>()
            .map_err(|_| Error::config(name, format!("'{}' could not be parsed", value))),
        None => Ok(default),
    }
}

fn parse_flag(name: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(Error::config(name, format!("'{}' is not a boolean", raw))),
    }
}

fn parse_list<T: std::str::FromStr>(name: &str, raw: &str) -> Result<Vec<T>> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| {
            item.parse::<T>()
                .map_err(|_| Error::config(name, format!("'{}' could not be parsed", item)))
        })
        .collect()
}
