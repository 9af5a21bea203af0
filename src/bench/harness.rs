//! Benchmark harness: timed insert/search runs over any [`OrderedIndex`].

use std::hint::black_box;
use std::time::{Duration, Instant};

use crate::bench::config::BenchmarkConfig;
use crate::bench::disk::{ratio, DiskModel};
use crate::bench::generator::{self, Scenario};
use crate::bench::stats::Summary;
use crate::common::config::RANGE_QUERY_KEYS;
use crate::common::Result;
use crate::index::btree::BTree;
use crate::index::{Bst, OrderedIndex};

/// Measurements from one benchmark run of one index.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct OperationMetrics {
    pub insert_time: Duration,
    pub search_time: Duration,
    /// Time to search the first [`RANGE_QUERY_KEYS`] search keys.
    pub range_query_time: Duration,
    /// Search keys that were found.
    pub hits: usize,
    pub tree_height: usize,
    pub node_count: usize,
    pub memory_bytes: usize,
    /// Node visits during the search phase (zero unless simulating disk).
    pub disk_reads: u64,
    /// Nodes written during the insert phase (zero unless simulating disk).
    pub disk_writes: u64,
    pub avg_keys_per_node: f64,
}

/// Insert `insert_data`, then search `search_data`, timing each phase.
///
/// With `simulate_disk`, inserts also count the nodes they write, and a
/// separate untimed pass prices every search in node visits.
pub fn benchmark_index<K, I>(
    index: &mut I,
    insert_data: &[K],
    search_data: &[K],
    simulate_disk: bool,
) -> OperationMetrics
where
    K: Clone,
    I: OrderedIndex<K> + ?Sized,
{
    let mut metrics = OperationMetrics::default();

    let start = Instant::now();
    if simulate_disk {
        let mut writes = 0u64;
        for key in insert_data {
            writes += index.insert_counted(key.clone()).1 as u64;
        }
        metrics.disk_writes = writes;
    } else {
        for key in insert_data {
            index.insert(key.clone());
        }
    }
    metrics.insert_time = start.elapsed();

    let start = Instant::now();
    let mut hits = 0;
    for key in search_data {
        if index.contains(black_box(key)) {
            hits += 1;
        }
    }
    metrics.search_time = start.elapsed();
    metrics.hits = hits;

    let range = &search_data[..search_data.len().min(RANGE_QUERY_KEYS)];
    let start = Instant::now();
    for key in range {
        black_box(index.contains(black_box(key)));
    }
    metrics.range_query_time = start.elapsed();

    if simulate_disk {
        metrics.disk_reads = search_data
            .iter()
            .map(|key| index.search_cost(key) as u64)
            .sum();
    }

    metrics.tree_height = index.height();
    metrics.node_count = index.node_count();
    metrics.memory_bytes = index.memory_bytes();
    if metrics.node_count > 0 {
        metrics.avg_keys_per_node = index.len() as f64 / metrics.node_count as f64;
    }

    metrics
}

/// Repeated runs of one index over one workload.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexRun {
    /// "BTree" or "BST".
    pub name: &'static str,
    /// The run with the median insert time.
    pub metrics: OperationMetrics,
    /// Insert phase times across repetitions, in microseconds.
    pub insert_us: Summary,
    /// Search phase times across repetitions, in microseconds.
    pub search_us: Summary,
}

/// Benchmark a fresh index from `make` `repetitions` times.
///
/// Every repetition inserts `data` and then searches for the same keys.
pub fn run_index<K, I, F>(make: F, data: &[K], repetitions: usize, simulate_disk: bool) -> IndexRun
where
    K: Clone,
    I: OrderedIndex<K>,
    F: Fn() -> I,
{
    let mut name = "";
    let mut runs = Vec::with_capacity(repetitions.max(1));
    for _ in 0..repetitions.max(1) {
        let mut index = make();
        name = index.name();
        runs.push(benchmark_index(&mut index, data, data, simulate_disk));
    }

    let insert_samples: Vec<u64> = runs.iter().map(|m| micros(m.insert_time)).collect();
    let search_samples: Vec<u64> = runs.iter().map(|m| micros(m.search_time)).collect();

    runs.sort_by_key(|m| m.insert_time);
    let metrics = runs[runs.len() / 2];

    IndexRun {
        name,
        metrics,
        insert_us: Summary::of(&insert_samples),
        search_us: Summary::of(&search_samples),
    }
}

/// Both trees measured on one scenario at one size.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioRun {
    pub scenario: Scenario,
    pub num_elements: usize,
    pub btree: IndexRun,
    pub bst: IndexRun,
}

impl ScenarioRun {
    /// CSV rows for this run, B-tree first.
    pub fn results(&self) -> [BenchmarkResult; 2] {
        [
            BenchmarkResult::new(self.scenario, self.num_elements, &self.btree),
            BenchmarkResult::new(self.scenario, self.num_elements, &self.bst),
        ]
    }

    /// B-tree vs. BST ratios, priced with `disk`.
    pub fn comparison(&self, disk: &DiskModel) -> Comparison {
        Comparison::between(&self.btree.metrics, &self.bst.metrics, disk)
    }
}

/// Run both trees on one scenario at one size.
///
/// # Errors
/// Returns `Error::InvalidMinDegree` if the configured degree is out of range.
pub fn run_scenario(config: &BenchmarkConfig, scenario: Scenario, size: usize) -> Result<ScenarioRun> {
    let data = generator::generate(scenario, size, config.seed);
    let empty_btree: BTree<u64> = BTree::new(config.min_degree)?;

    let btree = run_index(
        || empty_btree.clone(),
        &data,
        config.repetitions,
        config.simulate_disk,
    );
    let bst = run_index(Bst::<u64>::new, &data, config.repetitions, config.simulate_disk);

    Ok(ScenarioRun {
        scenario,
        num_elements: size,
        btree,
        bst,
    })
}

/// Run every configured size and scenario, logging progress as it goes.
///
/// # Errors
/// Returns the first error from [`run_scenario`].
pub fn run_all(config: &BenchmarkConfig) -> Result<Vec<ScenarioRun>> {
    config.validate()?;

    let total = config.total_runs();
    let mut completed = 0;
    let mut runs = Vec::with_capacity(config.sizes.len() * config.scenarios.len());

    for &size in &config.sizes {
        for &scenario in &config.scenarios {
            let run = run_scenario(config, scenario, size)?;
            completed += 2;
            tracing::info!(
                %scenario,
                size,
                btree_height = run.btree.metrics.tree_height,
                bst_height = run.bst.metrics.tree_height,
                "progress {}/{} ({}%)",
                completed,
                total,
                completed * 100 / total
            );
            runs.push(run);
        }
    }

    Ok(runs)
}

/// One CSV row of benchmark output.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkResult {
    pub tree_type: &'static str,
    pub scenario: Scenario,
    pub num_elements: usize,
    pub insert_time_us: u64,
    pub search_time_us: u64,
    pub range_query_time_us: u64,
    pub tree_height: usize,
    /// One root-to-leaf read per searched element: height × elements.
    pub simulated_disk_reads: u64,
    pub insert_per_op_us: f64,
    pub search_per_op_us: f64,
}

impl BenchmarkResult {
    pub fn new(scenario: Scenario, num_elements: usize, run: &IndexRun) -> Self {
        let m = &run.metrics;
        let per_op = |d: Duration| {
            if num_elements == 0 {
                0.0
            } else {
                d.as_secs_f64() * 1e6 / num_elements as f64
            }
        };

        Self {
            tree_type: run.name,
            scenario,
            num_elements,
            insert_time_us: micros(m.insert_time),
            search_time_us: micros(m.search_time),
            range_query_time_us: micros(m.range_query_time),
            tree_height: m.tree_height,
            simulated_disk_reads: (m.tree_height as u64) * (num_elements as u64),
            insert_per_op_us: per_op(m.insert_time),
            search_per_op_us: per_op(m.search_time),
        }
    }
}

/// How the B-tree fared against the BST. Ratios are BST / B-tree, so values
/// above 1.0 favor the B-tree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Comparison {
    pub insert_ratio: Option<f64>,
    pub search_ratio: Option<f64>,
    pub height_ratio: Option<f64>,
    /// Simulated time for one search in the B-tree.
    pub btree_search_disk: Duration,
    /// Simulated time for one search in the BST.
    pub bst_search_disk: Duration,
}

impl Comparison {
    pub fn between(btree: &OperationMetrics, bst: &OperationMetrics, disk: &DiskModel) -> Self {
        Self {
            insert_ratio: ratio(bst.insert_time.as_secs_f64(), btree.insert_time.as_secs_f64()),
            search_ratio: ratio(bst.search_time.as_secs_f64(), btree.search_time.as_secs_f64()),
            height_ratio: ratio(bst.tree_height as f64, btree.tree_height as f64),
            btree_search_disk: disk.search_time(btree.tree_height),
            bst_search_disk: disk.search_time(bst.tree_height),
        }
    }

    /// Disk-bound speedup of one search.
    pub fn disk_speedup(&self) -> Option<f64> {
        ratio(
            self.bst_search_disk.as_secs_f64(),
            self.btree_search_disk.as_secs_f64(),
        )
    }
}

fn micros(d: Duration) -> u64 {
    u64::try_from(d.as_micros()).unwrap_or(u64::MAX)
}
