//! B-tree node and the split-on-insert algorithm.
//!
//! A node owns its keys and, when internal, exactly one more child than it
//! has keys. Children are owned through `Box`, so dropping a node frees its
//! whole subtree and no node is ever shared.

use std::cmp::Ordering;
use std::fmt::{self, Display};

use super::trace::InsertTrace;

/// A single B-tree node.
///
/// # Layout (minimum degree `t`)
/// ```text
///            keys:     [ k0 | k1 | ... | k(n-1) ]
///   children:  c0    c1    c2   ...   c(n)
///
///   every key in c(i) < k(i) < every key in c(i+1)
/// ```
///
/// # Capacity
/// - At most `2t - 1` keys and `2t` children
/// - At least `t - 1` keys unless this is the root
#[derive(Debug, Clone)]
pub struct Node<K> {
    pub(super) keys: Vec<K>,
    pub(super) children: Vec<Box<Node<K>>>,
    pub(super) is_leaf: bool,
    pub(super) min_degree: usize,
}

impl<K> Node<K> {
    /// Create an empty node with room for a full key set.
    pub(super) fn new(min_degree: usize, is_leaf: bool) -> Self {
        let children = if is_leaf {
            Vec::new()
        } else {
            Vec::with_capacity(2 * min_degree)
        };

        Self {
            keys: Vec::with_capacity(2 * min_degree - 1),
            children,
            is_leaf,
            min_degree,
        }
    }

    /// Keys stored in this node, ascending.
    #[inline]
    pub fn keys(&self) -> &[K] {
        &self.keys
    }

    /// Children of this node, left to right. Empty for a leaf.
    pub fn children(&self) -> impl ExactSizeIterator<Item = &Node<K>> {
        self.children.iter().map(|child| &**child)
    }

    /// Child at `index`, if this node has one there.
    #[inline]
    pub fn child(&self, index: usize) -> Option<&Node<K>> {
        self.children.get(index).map(|child| &**child)
    }

    /// Whether this node has no children.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.is_leaf
    }

    /// Maximum number of keys a node of this tree may hold (`2t - 1`).
    #[inline]
    pub fn max_keys(&self) -> usize {
        2 * self.min_degree - 1
    }

    /// Whether the node is at capacity and must be split before descending.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.keys.len() == self.max_keys()
    }

    /// Split the full child at `index` around its median.
    ///
    /// ```text
    /// before:   parent [ .. a  b .. ]          after:  parent [ .. a  m  b .. ]
    ///                      |                                    |      |
    ///           child  [x0 .. x(t-2) m y0 .. y(t-2)]    [x0..x(t-2)]  [y0..y(t-2)]
    /// ```
    ///
    /// The right half moves into a new sibling inserted at `index + 1`, the
    /// median is promoted into this node at `index`, and both halves keep
    /// `t - 1` keys. Work is proportional to `t`, not to the subtree size.
    ///
    /// # Panics
    /// Panics if this node has no child at `index`. Debug builds also assert
    /// that the child is full.
    pub(super) fn split_child(&mut self, index: usize) {
        let t = self.min_degree;

        let (median, sibling) = {
            let child = &mut self.children[index];
            debug_assert!(child.is_full(), "split_child on a non-full child");

            let mut sibling = Node::new(t, child.is_leaf);
            sibling.keys.extend(child.keys.drain(t..));
            if !child.is_leaf {
                sibling.children.extend(child.children.drain(t..));
            }

            // Only the median is left past the left half.
            let median = child.keys.remove(t - 1);
            (median, sibling)
        };

        self.keys.insert(index, median);
        self.children.insert(index + 1, Box::new(sibling));
    }

    /// Collect every key of this subtree in ascending order.
    pub(super) fn collect_in_order(&self, out: &mut Vec<K>)
    where
        K: Clone,
    {
        for (i, key) in self.keys.iter().enumerate() {
            if !self.is_leaf {
                self.children[i].collect_in_order(out);
            }
            out.push(key.clone());
        }
        if let Some(last) = self.children.last() {
            last.collect_in_order(out);
        }
    }

    /// Write this subtree as an indented listing, 4 spaces per level.
    pub(super) fn write_tree(&self, f: &mut impl fmt::Write, level: usize) -> fmt::Result
    where
        K: Display,
    {
        write!(f, "{:indent$}[", "", indent = level * 4)?;
        for (i, key) in self.keys.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", key)?;
        }
        f.write_str("]")?;
        if self.is_leaf {
            f.write_str(" (leaf)")?;
        }
        f.write_char('\n')?;

        for child in &self.children {
            child.write_tree(f, level + 1)?;
        }
        Ok(())
    }
}

impl<K: Ord> Node<K> {
    /// Insert `key` into the subtree rooted here.
    ///
    /// The caller guarantees this node is not full. Any full child met on
    /// the way down is split before descending, so a split never has to
    /// propagate back up.
    ///
    /// Returns `false` without storing anything when the key is already
    /// present.
    pub(super) fn insert_non_full(&mut self, key: K, trace: &mut InsertTrace) -> bool {
        debug_assert!(!self.is_full(), "insert_non_full on a full node");
        trace.nodes_visited += 1;

        // Scan from the right. `i` stays one past the candidate slot so the
        // loop stops at 0 instead of wrapping.
        let mut i = self.keys.len();
        while i > 0 && self.keys[i - 1] > key {
            i -= 1;
        }
        if i > 0 && self.keys[i - 1] == key {
            return false;
        }

        if self.is_leaf {
            self.keys.insert(i, key);
            return true;
        }

        if self.children[i].is_full() {
            self.split_child(i);
            trace.splits += 1;

            match key.cmp(&self.keys[i]) {
                Ordering::Greater => i += 1,
                Ordering::Equal => return false,
                Ordering::Less => {}
            }
        }

        self.children[i].insert_non_full(key, trace)
    }

    /// Find the node holding `key` in this subtree.
    ///
    /// Descends into exactly one child per level; `visited` is incremented
    /// once per node read.
    pub(super) fn search_counted(&self, key: &K, visited: &mut usize) -> Option<&Node<K>> {
        *visited += 1;

        match self.keys.binary_search(key) {
            Ok(_) => Some(self),
            Err(_) if self.is_leaf => None,
            Err(i) => self.children[i].search_counted(key, visited),
        }
    }

    /// Find the node holding `key` in this subtree.
    pub fn search(&self, key: &K) -> Option<&Node<K>> {
        let mut visited = 0;
        self.search_counted(key, &mut visited)
    }
}
