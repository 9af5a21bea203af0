//! The B-tree itself: root ownership, insert, search, traversal.

use std::cmp::Ordering;
use std::fmt::{self, Display};

use crate::common::config::{DEFAULT_MIN_DEGREE, MAX_MIN_DEGREE, MIN_MIN_DEGREE};
use crate::common::{Error, Result};

use super::diagnostics::{self, InvariantViolation, TreeShape};
use super::node::Node;
use super::trace::{InsertTrace, SearchTrace};

/// An in-memory B-tree of minimum degree `t`.
///
/// Every node but the root holds between `t - 1` and `2t - 1` keys, and
/// every leaf sits at the same depth. Height only grows when a full root is
/// split, which keeps the tree balanced from the top down.
///
/// Duplicate keys are ignored: inserting a key that is already present
/// leaves the key set unchanged and returns `false`.
///
/// # Example
/// ```
/// use fanout::BTree;
///
/// let mut tree = BTree::new(2)?;
/// for key in [10, 20, 5, 6, 12, 30, 7, 17] {
///     tree.insert(key);
/// }
///
/// assert!(tree.search(&12));
/// assert!(!tree.search(&11));
/// assert_eq!(tree.traverse(), vec![5, 6, 7, 10, 12, 17, 20, 30]);
/// assert_eq!(tree.height(), 2);
/// # Ok::<(), fanout::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct BTree<K> {
    pub(super) root: Option<Box<Node<K>>>,
    min_degree: usize,
    len: usize,
}

impl<K> BTree<K> {
    /// Create an empty tree.
    ///
    /// # Errors
    /// Returns `Error::InvalidMinDegree` if `min_degree` is below 2 or above
    /// [`MAX_MIN_DEGREE`].
    pub fn new(min_degree: usize) -> Result<Self> {
        if !(MIN_MIN_DEGREE..=MAX_MIN_DEGREE).contains(&min_degree) {
            return Err(Error::InvalidMinDegree(min_degree));
        }

        Ok(Self {
            root: None,
            min_degree,
            len: 0,
        })
    }

    /// The minimum degree `t` fixed at construction.
    #[inline]
    pub fn min_degree(&self) -> usize {
        self.min_degree
    }

    /// Number of keys stored.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Read-only view of the root node.
    #[inline]
    pub fn root(&self) -> Option<&Node<K>> {
        self.root.as_deref()
    }

    /// Height in levels (0 for an empty tree).
    pub fn height(&self) -> usize {
        diagnostics::height(self)
    }

    /// Node count, fill and memory statistics.
    pub fn shape(&self) -> TreeShape {
        diagnostics::shape(self)
    }

    /// All keys in ascending order.
    ///
    /// Walks the whole tree on every call.
    pub fn traverse(&self) -> Vec<K>
    where
        K: Clone,
    {
        let mut keys = Vec::with_capacity(self.len);
        if let Some(root) = &self.root {
            root.collect_in_order(&mut keys);
        }
        keys
    }

    /// Indented structural dump, one node per line.
    ///
    /// ```text
    /// [10, 20]
    ///     [5, 6, 7] (leaf)
    ///     [12, 17] (leaf)
    ///     [30] (leaf)
    /// ```
    pub fn dump(&self) -> String
    where
        K: Display,
    {
        self.to_string()
    }
}

impl<K: Ord> BTree<K> {
    /// Insert a key. Returns `false` if it was already present.
    pub fn insert(&mut self, key: K) -> bool {
        self.insert_traced(key).inserted
    }

    /// Insert every key from `keys`, returning how many were new.
    pub fn insert_all<I: IntoIterator<Item = K>>(&mut self, keys: I) -> usize {
        let mut added = 0;
        for key in keys {
            if self.insert(key) {
                added += 1;
            }
        }
        added
    }

    /// Insert a key and report the nodes visited and split on the way.
    pub fn insert_traced(&mut self, key: K) -> InsertTrace {
        let mut trace = InsertTrace::default();
        let t = self.min_degree;

        let inserted = match self.root.take() {
            None => {
                let mut leaf = Node::new(t, true);
                leaf.keys.push(key);
                trace.nodes_visited = 1;
                self.root = Some(Box::new(leaf));
                true
            }
            Some(old_root) if old_root.is_full() => {
                let mut new_root = Node::new(t, false);
                new_root.children.push(old_root);
                new_root.split_child(0);
                trace.splits += 1;
                trace.nodes_visited += 1;

                let inserted = match key.cmp(&new_root.keys[0]) {
                    Ordering::Less => new_root.children[0].insert_non_full(key, &mut trace),
                    Ordering::Greater => new_root.children[1].insert_non_full(key, &mut trace),
                    Ordering::Equal => false,
                };

                self.root = Some(Box::new(new_root));
                tracing::debug!(
                    min_degree = t,
                    height = self.height(),
                    keys = self.len + usize::from(inserted),
                    "root split"
                );
                inserted
            }
            Some(mut root) => {
                let inserted = root.insert_non_full(key, &mut trace);
                self.root = Some(root);
                inserted
            }
        };

        if inserted {
            self.len += 1;
        }
        trace.inserted = inserted;
        trace
    }

    /// Whether `key` is stored in the tree.
    pub fn search(&self, key: &K) -> bool {
        self.search_node(key).is_some()
    }

    /// The node holding `key`, if any.
    pub fn search_node(&self, key: &K) -> Option<&Node<K>> {
        self.root.as_ref().and_then(|root| root.search(key))
    }

    /// Search and report how many nodes were read.
    ///
    /// An empty tree reports zero visits.
    pub fn search_traced(&self, key: &K) -> SearchTrace {
        let mut nodes_visited = 0;
        let found = match &self.root {
            Some(root) => root.search_counted(key, &mut nodes_visited).is_some(),
            None => false,
        };

        SearchTrace {
            found,
            nodes_visited,
        }
    }

    /// Check every structural invariant, returning the first violation.
    pub fn validate(&self) -> std::result::Result<(), InvariantViolation> {
        diagnostics::validate(self)
    }
}

impl<K> Default for BTree<K> {
    fn default() -> Self {
        Self {
            root: None,
            min_degree: DEFAULT_MIN_DEGREE,
            len: 0,
        }
    }
}

impl<K: Display> Display for BTree<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.root {
            Some(root) => root.write_tree(f, 0),
            None => writeln!(f, "(empty tree)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_degenerate_degree() {
        assert!(matches!(
            BTree::<u32>::new(0),
            Err(Error::InvalidMinDegree(0))
        ));
        assert!(matches!(
            BTree::<u32>::new(1),
            Err(Error::InvalidMinDegree(1))
        ));
        assert!(BTree::<u32>::new(2).is_ok());
    }

    #[test]
    fn test_new_rejects_oversized_degree() {
        let mut tree = BTree::<u32>::new(MAX_MIN_DEGREE).unwrap();
        assert!(tree.insert(1));
        assert_eq!(tree.root().unwrap().max_keys(), 2 * MAX_MIN_DEGREE - 1);

        assert!(matches!(
            BTree::<u32>::new(MAX_MIN_DEGREE + 1),
            Err(Error::InvalidMinDegree(_))
        ));
        assert!(matches!(
            BTree::<u32>::new(usize::MAX / 2 + 1),
            Err(Error::InvalidMinDegree(_))
        ));
    }

    #[test]
    fn test_default_uses_benchmark_degree() {
        let tree: BTree<u32> = BTree::default();
        assert_eq!(tree.min_degree(), DEFAULT_MIN_DEGREE);
        assert!(tree.is_empty());
    }

    #[test]
    fn test_empty_tree() {
        let tree: BTree<u32> = BTree::new(3).unwrap();

        assert!(!tree.search(&1));
        assert_eq!(tree.height(), 0);
        assert!(tree.traverse().is_empty());
        assert_eq!(tree.len(), 0);
        assert_eq!(tree.search_traced(&1), SearchTrace::default());
        assert_eq!(tree.dump(), "(empty tree)\n");
    }

    #[test]
    fn test_first_insert_creates_leaf_root() {
        let mut tree = BTree::new(2).unwrap();
        let trace = tree.insert_traced(42);

        assert!(trace.inserted);
        assert_eq!(trace.nodes_visited, 1);
        assert_eq!(trace.splits, 0);

        let root = tree.root().unwrap();
        assert!(root.is_leaf());
        assert_eq!(root.keys(), &[42]);
        assert_eq!(tree.height(), 1);
    }

    #[test]
    fn test_root_split_grows_height() {
        let mut tree = BTree::new(2).unwrap();
        for key in [10, 20, 5] {
            tree.insert(key);
        }
        assert_eq!(tree.height(), 1);
        assert!(tree.root().unwrap().is_full());

        let trace = tree.insert_traced(6);
        assert!(trace.inserted);
        assert_eq!(trace.splits, 1);
        assert_eq!(tree.height(), 2);

        let root = tree.root().unwrap();
        assert_eq!(root.keys(), &[10]);
        assert_eq!(root.child(0).unwrap().keys(), &[5, 6]);
        assert_eq!(root.child(1).unwrap().keys(), &[20]);
    }

    #[test]
    fn test_duplicate_insert_ignored() {
        let mut tree = BTree::new(2).unwrap();
        assert!(tree.insert(1));
        assert!(tree.insert(2));
        assert!(!tree.insert(1));
        assert!(!tree.insert(2));

        assert_eq!(tree.len(), 2);
        assert_eq!(tree.traverse(), vec![1, 2]);
    }

    #[test]
    fn test_duplicate_of_median_during_root_split() {
        let mut tree = BTree::new(2).unwrap();
        tree.insert_all([1, 2, 3]);

        // The root is full; inserting its median splits and then stops.
        let trace = tree.insert_traced(2);
        assert!(!trace.inserted);
        assert_eq!(trace.splits, 1);
        assert_eq!(tree.len(), 3);
        assert_eq!(tree.traverse(), vec![1, 2, 3]);
        assert!(tree.validate().is_ok());
    }

    #[test]
    fn test_insert_all_counts_new_keys() {
        let mut tree = BTree::new(3).unwrap();
        let added = tree.insert_all([5, 3, 5, 1, 3, 9]);

        assert_eq!(added, 4);
        assert_eq!(tree.len(), 4);
    }

    #[test]
    fn test_search_traced_matches_height_at_leaves() {
        let mut tree = BTree::new(2).unwrap();
        tree.insert_all(0..100u32);
        let height = tree.height();

        for key in 0..100u32 {
            let trace = tree.search_traced(&key);
            assert!(trace.found);
            assert!(trace.nodes_visited >= 1 && trace.nodes_visited <= height);
        }

        let miss = tree.search_traced(&1000);
        assert!(!miss.found);
        assert_eq!(miss.nodes_visited, height);
    }

    #[test]
    fn test_search_node_returns_holder() {
        let mut tree = BTree::new(2).unwrap();
        tree.insert_all([10, 20, 5, 6]);

        let node = tree.search_node(&6).unwrap();
        assert!(node.keys().contains(&6));
        assert!(tree.search_node(&7).is_none());
    }

    #[test]
    fn test_generic_string_keys() {
        let mut tree = BTree::new(2).unwrap();
        for word in ["pear", "apple", "fig", "kiwi", "banana"] {
            tree.insert(word.to_string());
        }

        assert!(tree.search(&"fig".to_string()));
        assert_eq!(
            tree.traverse(),
            vec!["apple", "banana", "fig", "kiwi", "pear"]
        );
    }

    #[test]
    fn test_display_matches_dump() {
        let mut tree = BTree::new(2).unwrap();
        tree.insert_all([10, 20, 5, 6]);

        assert_eq!(format!("{}", tree), tree.dump());
        assert_eq!(tree.dump(), "[10]\n    [5, 6] (leaf)\n    [20] (leaf)\n");
    }
}
