//! Unbalanced binary search tree used as the benchmark baseline.
//!
//! Sorted input degenerates this tree into a linked list, so every walk
//! here (insert, search, traversal, height, drop) is iterative. A recursive
//! version would overflow the stack on 100,000 sequential keys.

use std::cmp::Ordering;
use std::fmt::{self, Display, Write};

type Link<K> = Option<Box<BstNode<K>>>;

#[derive(Debug)]
struct BstNode<K> {
    key: K,
    left: Link<K>,
    right: Link<K>,
}

impl<K> BstNode<K> {
    fn new(key: K) -> Self {
        Self {
            key,
            left: None,
            right: None,
        }
    }
}

/// A textbook binary search tree with no rebalancing.
///
/// Duplicate keys are ignored, the same policy as [`BTree`](crate::BTree).
///
/// # Example
/// ```
/// use fanout::index::Bst;
///
/// let mut bst = Bst::new();
/// for key in [50, 30, 70, 20] {
///     bst.insert(key);
/// }
///
/// assert!(bst.search(&70));
/// assert_eq!(bst.traverse(), vec![20, 30, 50, 70]);
/// assert_eq!(fanout::index::bst_height(&bst), 3);
/// ```
#[derive(Debug)]
pub struct Bst<K> {
    root: Link<K>,
    len: usize,
}

impl<K> Bst<K> {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self { root: None, len: 0 }
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

    /// All keys in ascending order.
    pub fn traverse(&self) -> Vec<K>
    where
        K: Clone,
    {
        let mut keys = Vec::with_capacity(self.len);
        let mut stack: Vec<&BstNode<K>> = Vec::new();
        let mut cursor = self.root.as_deref();

        loop {
            while let Some(node) = cursor {
                stack.push(node);
                cursor = node.left.as_deref();
            }
            let Some(node) = stack.pop() else {
                break;
            };
            keys.push(node.key.clone());
            cursor = node.right.as_deref();
        }
        keys
    }

    /// Indented dump, right subtree on top, 4 spaces per level.
    ///
    /// ```text
    ///     [70]
    /// [50]
    ///     [30]
    ///         [20]
    /// ```
    pub fn dump(&self) -> String
    where
        K: Display,
    {
        self.to_string()
    }
}

impl<K: Ord> Bst<K> {
    /// Insert a key. Returns `false` if it was already present.
    pub fn insert(&mut self, key: K) -> bool {
        let mut link = &mut self.root;
        while let Some(node) = link {
            link = match key.cmp(&node.key) {
                Ordering::Less => &mut node.left,
                Ordering::Greater => &mut node.right,
                Ordering::Equal => return false,
            };
        }

        *link = Some(Box::new(BstNode::new(key)));
        self.len += 1;
        true
    }

    /// Whether `key` is stored in the tree.
    pub fn search(&self, key: &K) -> bool {
        self.search_counted(key).0
    }

    /// Search and report how many nodes were compared.
    pub(crate) fn search_counted(&self, key: &K) -> (bool, usize) {
        let mut visited = 0;
        let mut cursor = self.root.as_deref();

        while let Some(node) = cursor {
            visited += 1;
            cursor = match key.cmp(&node.key) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
                Ordering::Equal => return (true, visited),
            };
        }
        (false, visited)
    }
}

impl<K> Default for Bst<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Drop for Bst<K> {
    fn drop(&mut self) {
        // Unlink nodes onto a heap stack so a degenerate chain does not
        // recurse once per node.
        let mut stack: Vec<Box<BstNode<K>>> = self.root.take().into_iter().collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }
    }
}

impl<K: Display> Display for Bst<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.root.is_none() {
            return writeln!(f, "(empty tree)");
        }

        let mut stack: Vec<(&BstNode<K>, usize)> = Vec::new();
        let mut cursor = self.root.as_deref();
        let mut level = 0;

        loop {
            while let Some(node) = cursor {
                stack.push((node, level));
                cursor = node.right.as_deref();
                level += 1;
            }
            let Some((node, node_level)) = stack.pop() else {
                break;
            };
            write!(f, "{:indent$}[{}]", "", node.key, indent = node_level * 4)?;
            f.write_char('\n')?;
            cursor = node.left.as_deref();
            level = node_level + 1;
        }
        Ok(())
    }
}

/// Height of a binary search tree: 0 when empty, else the longest
/// root-to-leaf path counted in nodes.
pub fn bst_height<K>(tree: &Bst<K>) -> usize {
    let mut deepest = 0;
    let mut stack: Vec<(&BstNode<K>, usize)> =
        tree.root.as_deref().map(|root| (root, 1)).into_iter().collect();

    while let Some((node, depth)) = stack.pop() {
        deepest = deepest.max(depth);
        if let Some(left) = node.left.as_deref() {
            stack.push((left, depth + 1));
        }
        if let Some(right) = node.right.as_deref() {
            stack.push((right, depth + 1));
        }
    }
    deepest
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_bst() {
        let bst: Bst<u32> = Bst::new();

        assert!(bst.is_empty());
        assert!(!bst.search(&1));
        assert_eq!(bst_height(&bst), 0);
        assert!(bst.traverse().is_empty());
        assert_eq!(bst.dump(), "(empty tree)\n");
    }

    #[test]
    fn test_insert_and_search() {
        let mut bst = Bst::new();
        for key in [50, 30, 70, 20, 40, 60, 80] {
            assert!(bst.insert(key));
        }

        for key in [50, 30, 70, 20, 40, 60, 80] {
            assert!(bst.search(&key));
        }
        assert!(!bst.search(&45));
        assert_eq!(bst.len(), 7);
        assert_eq!(bst_height(&bst), 3);
    }

    #[test]
    fn test_duplicates_ignored() {
        let mut bst = Bst::new();
        assert!(bst.insert(5));
        assert!(!bst.insert(5));
        assert_eq!(bst.len(), 1);
        assert_eq!(bst.traverse(), vec![5]);
    }

    #[test]
    fn test_traverse_sorted() {
        let mut bst = Bst::new();
        for key in [8, 3, 10, 1, 6, 14, 4, 7, 13] {
            bst.insert(key);
        }
        assert_eq!(bst.traverse(), vec![1, 3, 4, 6, 7, 8, 10, 13, 14]);
    }

    #[test]
    fn test_search_cost_counts_path() {
        let mut bst = Bst::new();
        for key in [50, 30, 70, 20] {
            bst.insert(key);
        }

        assert_eq!(bst.search_counted(&50), (true, 1));
        assert_eq!(bst.search_counted(&20), (true, 3));
        assert_eq!(bst.search_counted(&25), (false, 3));
    }

    #[test]
    fn test_sequential_degenerates_without_overflow() {
        let mut bst = Bst::new();
        for key in 0..20_000u32 {
            bst.insert(key);
        }

        assert_eq!(bst_height(&bst), 20_000);
        assert!(bst.search(&19_999));
        assert_eq!(bst.traverse().len(), 20_000);
        // Dropping the chain must not blow the stack either.
        drop(bst);
    }

    #[test]
    fn test_dump_right_first() {
        let mut bst = Bst::new();
        for key in [50, 30, 70, 20] {
            bst.insert(key);
        }

        assert_eq!(bst.dump(), "    [70]\n[50]\n    [30]\n        [20]\n");
    }
}
