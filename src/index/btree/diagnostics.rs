//! Height, shape statistics, and invariant checking.
//!
//! None of this is needed for correctness of insert or search. Reports use
//! [`height`] and [`TreeShape`]; tests use [`validate`] after every mutation.

use std::fmt;
use std::mem;

use thiserror::Error;

use super::node::Node;
use super::tree::BTree;

/// Height of a tree in levels: 0 when empty, 1 for a lone leaf.
///
/// Only the leftmost path is followed, since every leaf is at the same
/// depth.
pub fn height<K>(tree: &BTree<K>) -> usize {
    tree.root().map_or(0, node_height)
}

/// Height of the subtree rooted at `node`.
pub fn node_height<K>(node: &Node<K>) -> usize {
    match node.child(0) {
        Some(first) if !node.is_leaf() => 1 + node_height(first),
        _ => 1,
    }
}

/// Size and fill statistics for a tree.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct TreeShape {
    pub height: usize,
    pub nodes: usize,
    pub leaves: usize,
    pub keys: usize,
    /// Bytes held by node headers plus their reserved key and child buffers.
    pub memory_bytes: usize,
}

impl TreeShape {
    /// Mean keys per node (0.0 for an empty tree).
    pub fn avg_keys_per_node(&self) -> f64 {
        if self.nodes == 0 {
            0.0
        } else {
            self.keys as f64 / self.nodes as f64
        }
    }
}

impl fmt::Display for TreeShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Shape {{ height: {}, nodes: {}, leaves: {}, keys: {}, avg_keys: {:.2}, bytes: {} }}",
            self.height,
            self.nodes,
            self.leaves,
            self.keys,
            self.avg_keys_per_node(),
            self.memory_bytes
        )
    }
}

/// Walk the whole tree and tally its shape.
pub fn shape<K>(tree: &BTree<K>) -> TreeShape {
    let mut shape = TreeShape {
        height: height(tree),
        ..TreeShape::default()
    };

    let mut stack: Vec<&Node<K>> = tree.root().into_iter().collect();
    while let Some(node) = stack.pop() {
        shape.nodes += 1;
        shape.keys += node.keys.len();
        shape.memory_bytes += mem::size_of::<Node<K>>()
            + node.keys.capacity() * mem::size_of::<K>()
            + node.children.capacity() * mem::size_of::<Box<Node<K>>>();

        if node.is_leaf {
            shape.leaves += 1;
        }
        stack.extend(node.children());
    }

    shape
}

/// A broken structural invariant, reported by [`validate`].
///
/// Depth counts from 0 at the root.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("root node holds no keys")]
    EmptyRoot,

    #[error("keys not strictly ascending in node at depth {depth}")]
    KeysOutOfOrder { depth: usize },

    #[error("key at depth {depth} falls outside the range set by its parent")]
    KeyOutOfRange { depth: usize },

    #[error("node at depth {depth} holds {keys} keys, more than {max}")]
    Overfull { depth: usize, keys: usize, max: usize },

    #[error("non-root node at depth {depth} holds {keys} keys, fewer than {min}")]
    Underfull { depth: usize, keys: usize, min: usize },

    #[error("node at depth {depth} has {keys} keys but {children} children")]
    ChildCountMismatch {
        depth: usize,
        keys: usize,
        children: usize,
    },

    #[error("leaf at depth {found}, expected every leaf at depth {expected}")]
    UnevenLeaves { expected: usize, found: usize },

    #[error("tree records {recorded} keys but holds {counted}")]
    LenMismatch { recorded: usize, counted: usize },
}

/// Check ordering, fill bounds, child counts, and leaf depth.
pub fn validate<K: Ord>(tree: &BTree<K>) -> Result<(), InvariantViolation> {
    let Some(root) = tree.root() else {
        return match tree.len() {
            0 => Ok(()),
            recorded => Err(InvariantViolation::LenMismatch {
                recorded,
                counted: 0,
            }),
        };
    };

    if root.keys.is_empty() {
        return Err(InvariantViolation::EmptyRoot);
    }

    let mut checker = Checker {
        min_degree: tree.min_degree(),
        leaf_depth: None,
        counted: 0,
    };
    checker.check(root, 0, None, None)?;

    if checker.counted != tree.len() {
        return Err(InvariantViolation::LenMismatch {
            recorded: tree.len(),
            counted: checker.counted,
        });
    }
    Ok(())
}

struct Checker {
    min_degree: usize,
    leaf_depth: Option<usize>,
    counted: usize,
}

impl Checker {
    fn check<K: Ord>(
        &mut self,
        node: &Node<K>,
        depth: usize,
        lower: Option<&K>,
        upper: Option<&K>,
    ) -> Result<(), InvariantViolation> {
        let keys = node.keys.len();
        let max = 2 * self.min_degree - 1;
        let min = self.min_degree - 1;

        if keys > max {
            return Err(InvariantViolation::Overfull { depth, keys, max });
        }
        if depth > 0 && keys < min {
            return Err(InvariantViolation::Underfull { depth, keys, min });
        }
        if node.keys.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(InvariantViolation::KeysOutOfOrder { depth });
        }

        let below_lower = matches!((lower, node.keys.first()), (Some(l), Some(k)) if k <= l);
        let above_upper = matches!((upper, node.keys.last()), (Some(u), Some(k)) if k >= u);
        if below_lower || above_upper {
            return Err(InvariantViolation::KeyOutOfRange { depth });
        }

        self.counted += keys;

        if node.is_leaf {
            if !node.children.is_empty() {
                return Err(InvariantViolation::ChildCountMismatch {
                    depth,
                    keys,
                    children: node.children.len(),
                });
            }
            return match self.leaf_depth {
                None => {
                    self.leaf_depth = Some(depth);
                    Ok(())
                }
                Some(expected) if expected == depth => Ok(()),
                Some(expected) => Err(InvariantViolation::UnevenLeaves {
                    expected,
                    found: depth,
                }),
            };
        }

        if node.children.len() != keys + 1 {
            return Err(InvariantViolation::ChildCountMismatch {
                depth,
                keys,
                children: node.children.len(),
            });
        }

        for (i, child) in node.children().enumerate() {
            let child_lower = if i == 0 { lower } else { node.keys.get(i - 1) };
            let child_upper = if i == keys { upper } else { node.keys.get(i) };
            self.check(child, depth + 1, child_lower, child_upper)?;
        }
        Ok(())
    }
}
