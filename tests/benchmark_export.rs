//! Benchmark Suite Tests
//!
//! Runs a scaled-down suite end to end and checks the exported CSV files.

use std::fs;

use fanout::bench::report::{self, DISK_IO_FILE, HEIGHT_FILE, RESULTS_FILE};
use fanout::bench::{run_all, BenchmarkConfig, Scenario};
use tempfile::tempdir;

fn small_config(dir: &std::path::Path) -> BenchmarkConfig {
    BenchmarkConfig {
        sizes: vec![100, 300],
        scenarios: Scenario::ALL.to_vec(),
        min_degree: 3,
        simulate_disk: true,
        output_dir: dir.to_path_buf(),
        ..BenchmarkConfig::default()
    }
}

#[test]
fn test_full_run_exports_three_files() {
    let dir = tempdir().unwrap();
    let config = small_config(&dir.path().join("results"));

    let runs = run_all(&config).unwrap();
    assert_eq!(runs.len(), 10);

    let paths = report::export_all(&config.output_dir, &runs, config.min_degree, &config.disk)
        .unwrap();
    assert_eq!(paths.len(), 3);

    let results = fs::read_to_string(config.output_dir.join(RESULTS_FILE)).unwrap();
    let lines: Vec<&str> = results.lines().collect();
    assert_eq!(
        lines[0],
        "TreeType,Scenario,NumElements,InsertTime_us,SearchTime_us,RangeQueryTime_us,\
         TreeHeight,DiskReads,InsertPerOp_us,SearchPerOp_us"
    );
    // One row per tree per (size, scenario).
    assert_eq!(lines.len(), 1 + config.total_runs());
    assert!(lines[1].starts_with("BTree,Sequential,100,"));
    assert!(lines[2].starts_with("BST,Sequential,100,"));

    let heights = fs::read_to_string(config.output_dir.join(HEIGHT_FILE)).unwrap();
    assert!(heights
        .starts_with("NumElements,BTreeHeight,BSTHeight_Best,BSTHeight_Avg,BSTHeight_Worst\n"));
    assert_eq!(heights.lines().count(), 10);

    let disk = fs::read_to_string(config.output_dir.join(DISK_IO_FILE)).unwrap();
    assert!(disk.starts_with("NumElements,BTreeDiskTime_ms,BSTDiskTime_ms,Speedup\n"));
    assert_eq!(disk.lines().count(), 8);
}

#[test]
fn test_sequential_bst_degenerates() {
    let dir = tempdir().unwrap();
    let config = BenchmarkConfig {
        scenarios: vec![Scenario::Sequential, Scenario::Reverse],
        ..small_config(dir.path())
    };

    for run in run_all(&config).unwrap() {
        assert_eq!(run.bst.metrics.tree_height, run.num_elements);
        assert!(run.btree.metrics.tree_height < run.bst.metrics.tree_height);
        assert_eq!(run.bst.metrics.hits, run.num_elements);

        let cmp = run.comparison(&config.disk);
        assert!(cmp.height_ratio.unwrap() > 1.0);
        assert!(cmp.disk_speedup().unwrap() > 1.0);
    }
}

#[test]
fn test_skewed_keys_collapse_to_distinct_set() {
    let dir = tempdir().unwrap();
    let config = BenchmarkConfig {
        sizes: vec![2_000],
        scenarios: vec![Scenario::Skewed],
        ..small_config(dir.path())
    };

    let runs = run_all(&config).unwrap();
    let btree = &runs[0].btree.metrics;

    // Every searched key was inserted first.
    assert_eq!(btree.hits, 2_000);
    // At most 100 small keys plus ~200 large ones survive deduplication.
    assert!(btree.node_count > 0);
    assert!(btree.avg_keys_per_node >= 1.0);
}

#[test]
fn test_render_covers_every_scenario() {
    let dir = tempdir().unwrap();
    let config = BenchmarkConfig {
        sizes: vec![50],
        ..small_config(dir.path())
    };

    let runs = run_all(&config).unwrap();
    for (run, scenario) in runs.iter().zip(Scenario::ALL) {
        let text = report::render_scenario(run, config.min_degree, &config.disk);
        assert!(text.contains(scenario.description()));
        assert!(text.contains("Performance Comparison"));
    }
}
