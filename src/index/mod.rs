//! Index structures.
//!
//! - [`btree`] - The balanced B-tree
//! - [`Bst`] - Unbalanced binary search tree, the comparison baseline
//! - [`OrderedIndex`] - The surface both share, so benchmarks are generic
//!   over the structure under test

pub mod btree;
mod bst;

pub use bst::{bst_height, Bst};

use std::mem;

use btree::BTree;

/// An in-memory ordered set of keys.
///
/// Implemented by [`BTree`] and [`Bst`]. The benchmark harness drives both
/// through this trait so that they see identical workloads.
pub trait OrderedIndex<K> {
    /// Label used in reports ("BTree", "BST").
    fn name(&self) -> &'static str;

    /// Insert a key. Returns `false` if it was already present.
    fn insert(&mut self, key: K) -> bool;

    /// Insert a key and report how many nodes were written (simulated block
    /// writes). A rejected duplicate writes nothing.
    fn insert_counted(&mut self, key: K) -> (bool, usize);

    /// Whether `key` is stored.
    fn contains(&self, key: &K) -> bool;

    /// Nodes read while searching for `key` (simulated block reads).
    fn search_cost(&self, key: &K) -> usize;

    /// All keys in ascending order.
    fn keys(&self) -> Vec<K>;

    /// Height in levels, 0 when empty.
    fn height(&self) -> usize;

    /// Number of keys stored.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of allocated nodes.
    fn node_count(&self) -> usize;

    /// Approximate heap and header bytes held by the nodes.
    fn memory_bytes(&self) -> usize;
}

impl<K: Ord + Clone> OrderedIndex<K> for BTree<K> {
    fn name(&self) -> &'static str {
        "BTree"
    }

    fn insert(&mut self, key: K) -> bool {
        BTree::insert(self, key)
    }

    fn insert_counted(&mut self, key: K) -> (bool, usize) {
        let trace = self.insert_traced(key);
        (trace.inserted, trace.nodes_written())
    }

    fn contains(&self, key: &K) -> bool {
        self.search(key)
    }

    fn search_cost(&self, key: &K) -> usize {
        self.search_traced(key).nodes_visited
    }

    fn keys(&self) -> Vec<K> {
        self.traverse()
    }

    fn height(&self) -> usize {
        btree::height(self)
    }

    fn len(&self) -> usize {
        BTree::len(self)
    }

    fn node_count(&self) -> usize {
        self.shape().nodes
    }

    fn memory_bytes(&self) -> usize {
        self.shape().memory_bytes
    }
}

impl<K: Ord + Clone> OrderedIndex<K> for Bst<K> {
    fn name(&self) -> &'static str {
        "BST"
    }

    fn insert(&mut self, key: K) -> bool {
        Bst::insert(self, key)
    }

    fn insert_counted(&mut self, key: K) -> (bool, usize) {
        // The new leaf is the only node touched.
        let inserted = Bst::insert(self, key);
        (inserted, usize::from(inserted))
    }

    fn contains(&self, key: &K) -> bool {
        self.search(key)
    }

    fn search_cost(&self, key: &K) -> usize {
        self.search_counted(key).1
    }

    fn keys(&self) -> Vec<K> {
        self.traverse()
    }

    fn height(&self) -> usize {
        bst_height(self)
    }

    fn len(&self) -> usize {
        Bst::len(self)
    }

    fn node_count(&self) -> usize {
        Bst::len(self)
    }

    fn memory_bytes(&self) -> usize {
        // One key and two child links per node.
        Bst::len(self) * (mem::size_of::<K>() + 2 * mem::size_of::<usize>())
    }
}
