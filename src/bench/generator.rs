//! Workload generators.
//!
//! Every scenario is deterministic for a given seed, so two runs of the
//! suite insert exactly the same keys in the same order.

use std::fmt;
use std::str::FromStr;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::common::Error;

/// Shape of the key sequence fed to both trees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scenario {
    /// 1, 2, 3, ... (degenerates the BST into a list).
    Sequential,
    /// Uniform random keys in `1..=10n`.
    Random,
    /// n, n-1, ..., 1.
    Reverse,
    /// Uniform random keys in `1..=n/10`, so about 90% are repeats.
    DuplicateHeavy,
    /// 90% of keys in `1..=100`, 10% in `1000..=10000`.
    Skewed,
}

impl Scenario {
    /// Every scenario, in report order.
    pub const ALL: [Scenario; 5] = [
        Scenario::Sequential,
        Scenario::Random,
        Scenario::Reverse,
        Scenario::DuplicateHeavy,
        Scenario::Skewed,
    ];

    /// Short label used in CSV output.
    pub fn name(&self) -> &'static str {
        match self {
            Scenario::Sequential => "Sequential",
            Scenario::Random => "Random",
            Scenario::Reverse => "Reverse",
            Scenario::DuplicateHeavy => "DuplicateHeavy",
            Scenario::Skewed => "Skewed",
        }
    }

    /// Long label used in console report headers.
    pub fn description(&self) -> &'static str {
        match self {
            Scenario::Sequential => "Sequential Insert (Best Case for BST)",
            Scenario::Random => "Random Insert (Typical Case)",
            Scenario::Reverse => "Reverse Insert (Worst Case for BST)",
            Scenario::DuplicateHeavy => "Duplicate-Heavy (90% duplicates)",
            Scenario::Skewed => "Skewed Distribution (90-10 rule)",
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Scenario {
    type Err = Error;

    /// Parse a scenario name, ignoring case, `-` and `_`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .map(|c| c.to_ascii_lowercase())
            .collect();

        Scenario::ALL
            .into_iter()
            .find(|scenario| scenario.name().to_ascii_lowercase() == normalized)
            .ok_or_else(|| Error::config("scenario", format!("unknown scenario '{}'", s.trim())))
    }
}

/// Generate `count` keys for `scenario`.
pub fn generate(scenario: Scenario, count: usize, seed: u64) -> Vec<u64> {
    match scenario {
        Scenario::Sequential => sequential(count),
        Scenario::Random => random(count, seed),
        Scenario::Reverse => reverse(count),
        Scenario::DuplicateHeavy => duplicate_heavy(count, seed),
        Scenario::Skewed => skewed(count, seed),
    }
}

/// `1..=count` ascending.
pub fn sequential(count: usize) -> Vec<u64> {
    (1..=count as u64).collect()
}

/// `count..=1` descending.
pub fn reverse(count: usize) -> Vec<u64> {
    (1..=count as u64).rev().collect()
}

/// Uniform keys in `1..=10 * count`.
pub fn random(count: usize, seed: u64) -> Vec<u64> {
    let upper = (count as u64 * 10).max(1);
    uniform(count, seed, upper)
}

/// Uniform keys in `1..=count / 10`.
pub fn duplicate_heavy(count: usize, seed: u64) -> Vec<u64> {
    let upper = (count as u64 / 10).max(1);
    uniform(count, seed, upper)
}

/// 90% small keys (`1..=100`), 10% large keys (`1000..=10000`).
pub fn skewed(count: usize, seed: u64) -> Vec<u64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            if rng.gen_bool(0.9) {
                rng.gen_range(1..=100)
            } else {
                rng.gen_range(1_000..=10_000)
            }
        })
        .collect()
}

fn uniform(count: usize, seed: u64, upper: u64) -> Vec<u64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count).map(|_| rng.gen_range(1..=upper)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::config::DEFAULT_SEED;

    #[test]
    fn test_sequential_and_reverse() {
        assert_eq!(sequential(5), vec![1, 2, 3, 4, 5]);
        assert_eq!(reverse(5), vec![5, 4, 3, 2, 1]);
        assert!(sequential(0).is_empty());
    }

    #[test]
    fn test_random_is_seeded() {
        let a = random(1_000, DEFAULT_SEED);
        let b = random(1_000, DEFAULT_SEED);
        let c = random(1_000, DEFAULT_SEED + 1);

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a.iter().all(|&k| (1..=10_000).contains(&k)));
    }

    #[test]
    fn test_duplicate_heavy_range() {
        let keys = duplicate_heavy(1_000, DEFAULT_SEED);
        assert_eq!(keys.len(), 1_000);
        assert!(keys.iter().all(|&k| (1..=100).contains(&k)));

        // Tiny counts still produce valid keys.
        assert!(duplicate_heavy(5, DEFAULT_SEED).iter().all(|&k| k == 1));
    }

    #[test]
    fn test_skewed_split() {
        let keys = skewed(10_000, DEFAULT_SEED);
        let small = keys.iter().filter(|&&k| k <= 100).count();
        let large = keys.iter().filter(|&&k| (1_000..=10_000).contains(&k)).count();

        assert_eq!(small + large, keys.len());
        assert!(small > 8_500 && small < 9_500);
    }

    #[test]
    fn test_generate_lengths() {
        for scenario in Scenario::ALL {
            assert_eq!(generate(scenario, 250, DEFAULT_SEED).len(), 250);
            assert!(generate(scenario, 0, DEFAULT_SEED).is_empty());
        }
    }

    #[test]
    fn test_scenario_parse() {
        assert_eq!("random".parse::<Scenario>().unwrap(), Scenario::Random);
        assert_eq!(
            "duplicate-heavy".parse::<Scenario>().unwrap(),
            Scenario::DuplicateHeavy
        );
        assert_eq!(" Skewed ".parse::<Scenario>().unwrap(), Scenario::Skewed);
        assert!("zigzag".parse::<Scenario>().is_err());
    }

    #[test]
    fn test_scenario_labels() {
        assert_eq!(Scenario::DuplicateHeavy.to_string(), "DuplicateHeavy");
        assert_eq!(
            Scenario::Reverse.description(),
            "Reverse Insert (Worst Case for BST)"
        );
    }
}
