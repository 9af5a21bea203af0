//! Simulated disk latency.
//!
//! The trees live in memory; this module prices their node visits as if each
//! one were a block read from a spinning disk. Nothing sleeps: counts are
//! converted into durations arithmetically.

use std::time::Duration;

use crate::common::config::{DISK_READ_TIME, DISK_WRITE_TIME};

/// Per-block latencies used to price node visits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiskModel {
    pub read_latency: Duration,
    pub write_latency: Duration,
}

impl DiskModel {
    pub fn new(read_latency: Duration, write_latency: Duration) -> Self {
        Self {
            read_latency,
            write_latency,
        }
    }

    /// Time spent on `reads` block reads.
    pub fn read_time(&self, reads: u64) -> Duration {
        scale(self.read_latency, reads)
    }

    /// Time spent on `writes` block writes.
    pub fn write_time(&self, writes: u64) -> Duration {
        scale(self.write_latency, writes)
    }

    /// Time for one root-to-leaf search in a tree of `height` levels.
    pub fn search_time(&self, height: usize) -> Duration {
        self.read_time(height as u64)
    }
}

impl Default for DiskModel {
    fn default() -> Self {
        Self::new(DISK_READ_TIME, DISK_WRITE_TIME)
    }
}

fn scale(latency: Duration, count: u64) -> Duration {
    let count = u32::try_from(count).unwrap_or(u32::MAX);
    latency.saturating_mul(count)
}

/// Theoretical B-tree height for `n` keys: `ceil(log_degree(n))`.
pub fn btree_height_estimate(n: usize, degree: usize) -> usize {
    if degree < 2 {
        return 0;
    }
    ceil_log(n, degree)
}

/// Perfectly balanced BST height: `ceil(log2(n))`.
pub fn bst_best_height(n: usize) -> usize {
    ceil_log(n, 2)
}

/// Smallest `h` with `base^h >= n`, computed without floating point so
/// exact powers do not round up.
fn ceil_log(n: usize, base: usize) -> usize {
    let target = n as u128;
    let mut reach: u128 = 1;
    let mut levels = 0;
    while reach < target {
        reach *= base as u128;
        levels += 1;
    }
    levels
}

/// Expected random-insertion BST height: `ceil(1.39 * log2(n))`.
pub fn bst_average_height(n: usize) -> usize {
    if n <= 1 {
        return 0;
    }
    (1.39 * (n as f64).log2()).ceil() as usize
}

/// Degenerate (list-shaped) BST height: `n`.
pub fn bst_worst_height(n: usize) -> usize {
    n
}

/// One row of the theoretical height table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeightRow {
    pub num_elements: usize,
    pub btree: usize,
    pub bst_best: usize,
    pub bst_average: usize,
    pub bst_worst: usize,
}

impl HeightRow {
    pub fn for_size(num_elements: usize, degree: usize) -> Self {
        Self {
            num_elements,
            btree: btree_height_estimate(num_elements, degree),
            bst_best: bst_best_height(num_elements),
            bst_average: bst_average_height(num_elements),
            bst_worst: bst_worst_height(num_elements),
        }
    }
}

/// One row of the theoretical per-search disk time table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiskIoRow {
    pub num_elements: usize,
    pub btree_time: Duration,
    pub bst_time: Duration,
}

impl DiskIoRow {
    /// Price one search in each tree, using the average BST height.
    pub fn for_size(num_elements: usize, degree: usize, disk: &DiskModel) -> Self {
        Self {
            num_elements,
            btree_time: disk.search_time(btree_height_estimate(num_elements, degree)),
            bst_time: disk.search_time(bst_average_height(num_elements)),
        }
    }

    /// How many times faster the B-tree search is. `None` if it costs nothing.
    pub fn speedup(&self) -> Option<f64> {
        ratio(self.bst_time.as_secs_f64(), self.btree_time.as_secs_f64())
    }
}

/// `numerator / denominator`, or `None` when the denominator is zero.
pub fn ratio(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator == 0.0 {
        None
    } else {
        Some(numerator / denominator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_latency() {
        let disk = DiskModel::default();
        assert_eq!(disk.read_latency, Duration::from_millis(10));
        assert_eq!(disk.read_time(3), Duration::from_millis(30));
        assert_eq!(disk.write_time(0), Duration::ZERO);
        assert_eq!(disk.search_time(2), Duration::from_millis(20));
    }

    #[test]
    fn test_scale_saturates() {
        let disk = DiskModel::new(Duration::from_secs(1), Duration::from_secs(1));
        assert_eq!(disk.read_time(u64::MAX), Duration::from_secs(u32::MAX as u64));
    }

    #[test]
    fn test_height_estimates() {
        assert_eq!(btree_height_estimate(1_000, 100), 2);
        assert_eq!(btree_height_estimate(1_000_000, 100), 3);
        assert_eq!(btree_height_estimate(1, 100), 0);
        assert_eq!(bst_best_height(1_024), 10);
        assert_eq!(bst_best_height(1_000), 10);
        assert_eq!(bst_average_height(1_000), 14);
        assert_eq!(bst_worst_height(500), 500);
        assert_eq!(btree_height_estimate(100, 100), 1);
        assert_eq!(btree_height_estimate(101, 100), 2);
    }

    #[test]
    fn test_height_row() {
        let row = HeightRow::for_size(10_000, 100);
        assert_eq!(row.btree, 2);
        assert_eq!(row.bst_best, 14);
        assert_eq!(row.bst_worst, 10_000);
    }

    #[test]
    fn test_disk_io_row() {
        let row = DiskIoRow::for_size(1_000, 100, &DiskModel::default());
        assert_eq!(row.btree_time, Duration::from_millis(20));
        assert_eq!(row.bst_time, Duration::from_millis(140));
        assert!((row.speedup().unwrap() - 7.0).abs() < 1e-9);
    }

    #[test]
    fn test_ratio() {
        assert_eq!(ratio(4.0, 2.0), Some(2.0));
        assert_eq!(ratio(4.0, 0.0), None);
    }
}
