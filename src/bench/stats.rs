//! Summary statistics over timing samples.
//!
//! Every function returns 0 for an empty sample set rather than failing.

use std::fmt;

/// Arithmetic mean.
pub fn mean(samples: &[u64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    samples.iter().map(|&s| s as f64).sum::<f64>() / samples.len() as f64
}

/// Sample standard deviation (n - 1 denominator). 0 for fewer than 2 samples.
pub fn stddev(samples: &[u64]) -> f64 {
    if samples.len() < 2 {
        return 0.0;
    }
    let avg = mean(samples);
    let sum_sq_diff: f64 = samples
        .iter()
        .map(|&s| {
            let diff = s as f64 - avg;
            diff * diff
        })
        .sum();
    (sum_sq_diff / (samples.len() - 1) as f64).sqrt()
}

pub fn min(samples: &[u64]) -> u64 {
    samples.iter().copied().min().unwrap_or(0)
}

pub fn max(samples: &[u64]) -> u64 {
    samples.iter().copied().max().unwrap_or(0)
}

/// Median; the mean of the two middle values for an even count.
pub fn median(samples: &[u64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    let mut sorted = samples.to_vec();
    sorted.sort_unstable();

    let n = sorted.len();
    if n % 2 == 0 {
        (sorted[n / 2 - 1] as f64 + sorted[n / 2] as f64) / 2.0
    } else {
        sorted[n / 2] as f64
    }
}

/// All of the above for one sample set.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Summary {
    pub samples: usize,
    pub mean: f64,
    pub stddev: f64,
    pub min: u64,
    pub max: u64,
    pub median: f64,
}

impl Summary {
    pub fn of(samples: &[u64]) -> Self {
        Self {
            samples: samples.len(),
            mean: mean(samples),
            stddev: stddev(samples),
            min: min(samples),
            max: max(samples),
            median: median(samples),
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "median {:.1} (mean {:.1} ± {:.1}, min {}, max {}, n={})",
            self.median, self.mean, self.stddev, self.min, self.max, self.samples
        )
    }
}
