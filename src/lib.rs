//! fanout - A textbook B-tree and the benchmark suite that pits it against an
//! unbalanced binary search tree.
//!
//! # Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                             fanout                              │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │             Benchmark Suite (bench/)                     │   │
//! │  │   generators → harness → disk model → report / CSV       │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │          OrderedIndex (index/)  [Generic Seam]           │   │
//! │  │        name · insert · contains · search_cost · keys     │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                ↓                              ↓                 │
//! │  ┌──────────────────────────┐   ┌──────────────────────────┐   │
//! │  │   BTree (index/btree/)   │   │     Bst (index/bst)      │   │
//! │  │  split-on-insert, t ≥ 2  │   │  unbalanced, iterative   │   │
//! │  └──────────────────────────┘   └──────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//! - [`common`] - Shared error type and configuration constants
//! - [`index`] - The B-tree, the comparison BST and their common trait
//! - [`bench`] - Workload generators, timing harness and reporting
//!
//! # Quick Start
//! ```
//! use fanout::BTree;
//!
//! let mut tree = BTree::new(2).unwrap();
//! for key in [10, 20, 5, 6, 12, 30, 7, 17] {
//!     tree.insert(key);
//! }
//!
//! assert!(tree.search(&6));
//! assert!(!tree.search(&15));
//! assert_eq!(tree.traverse(), vec![5, 6, 7, 10, 12, 17, 20, 30]);
//! ```

pub mod bench;
pub mod common;
pub mod index;

// Re-export commonly used items at crate root for convenience
pub use common::{Error, Result};

pub use bench::{BenchmarkConfig, DiskModel, Scenario};
pub use index::btree::{height, BTree, InvariantViolation, Node};
pub use index::{bst_height, Bst, OrderedIndex};
