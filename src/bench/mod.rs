//! B-tree vs. BST benchmark suite.
//!
//! # Components
//! - [`generator`] - Seeded key sequences for each [`Scenario`]
//! - [`harness`] - Timed insert/search runs and B-tree/BST comparisons
//! - [`disk`] - Converts node visits into simulated block I/O time
//! - [`stats`] - Summary statistics over repeated runs
//! - [`config`] - [`BenchmarkConfig`] and its `FANOUT_*` overrides
//! - [`report`] - Console sections and CSV export
//!
//! # Flow
//! ```text
//! BenchmarkConfig ──▶ run_all ──▶ Vec<ScenarioRun> ──┬──▶ write_report (stdout)
//!                       │                            └──▶ export_all (CSV)
//!                       └── per size × scenario: generate ─▶ BTree + Bst
//! ```

pub mod config;
pub mod disk;
pub mod generator;
pub mod harness;
pub mod report;
pub mod stats;

pub use config::BenchmarkConfig;
pub use disk::DiskModel;
pub use generator::Scenario;
pub use harness::{
    benchmark_index, run_all, run_scenario, BenchmarkResult, Comparison, IndexRun,
    OperationMetrics, ScenarioRun,
};
