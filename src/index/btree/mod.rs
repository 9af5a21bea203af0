//! B-tree index implementation.
//!
//! # Components
//! - [`BTree`] - The tree: root ownership, insert, search, traversal
//! - [`Node`] - Key storage and the split-on-insert algorithm
//! - [`diagnostics`] - Height, shape statistics, invariant checks
//! - [`SearchTrace`] / [`InsertTrace`] - Per-operation node visit counts
//!
//! # Insertion
//! Full nodes are split on the way down, before descending into them:
//! ```text
//!   insert 6 into a full root (t = 2)
//!
//!   [5, 10, 20]   ──split──▶      [10]      ──descend──▶      [10]
//!                               /      \                    /      \
//!                             [5]     [20]              [5, 6]    [20]
//! ```
//! Because no node on the path is full when it is entered, a split never has
//! to travel back up, and the only way height grows is a root split.

pub mod diagnostics;
mod node;
mod trace;
mod tree;

pub use diagnostics::{height, InvariantViolation, TreeShape};
pub use node::Node;
pub use trace::{InsertTrace, SearchTrace};
pub use tree::BTree;
