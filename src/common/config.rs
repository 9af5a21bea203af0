//! Configuration constants for fanout.

use std::time::Duration;

/// Smallest minimum degree a B-tree accepts.
///
/// With `t = 2` a node holds 1 to 3 keys (a 2-3-4 tree). Anything lower
/// cannot be split into two non-empty halves around a median.
pub const MIN_MIN_DEGREE: usize = 2;

/// Largest minimum degree a B-tree accepts.
///
/// Every node reserves room for `2t - 1` keys when it is created, so the
/// degree is capped well below the point where that reservation overflows.
pub const MAX_MIN_DEGREE: usize = 65_536;

/// Minimum degree used by the benchmark suite and `BTree::default()`.
///
/// # Fan-out
/// With `t = 100` a node holds up to 199 keys and 200 children:
/// - 1,000 keys fit in 2 levels
/// - 1,000,000 keys fit in 3 levels
pub const DEFAULT_MIN_DEGREE: usize = 100;

/// Seed for the random data generators, so benchmark runs are reproducible.
pub const DEFAULT_SEED: u64 = 42;

/// Element counts benchmarked when nothing else is configured.
pub const DEFAULT_SIZES: [usize; 3] = [1_000, 10_000, 100_000];

/// Number of leading search keys timed as a "range query".
pub const RANGE_QUERY_KEYS: usize = 100;

/// Simulated latency of one block read (one node visit).
pub const DISK_READ_TIME: Duration = Duration::from_millis(10);

/// Simulated latency of one block write.
pub const DISK_WRITE_TIME: Duration = Duration::from_millis(10);

/// Directory the CSV reports are written to.
pub const DEFAULT_OUTPUT_DIR: &str = "results";
