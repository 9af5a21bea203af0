//! Per-operation cost reports.
//!
//! A node visit stands in for one block read on a disk-resident tree. The
//! counts are returned with each operation instead of being accumulated in
//! shared counters, so callers sum them however they like.

/// Outcome of a traced search.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SearchTrace {
    /// Whether the key is stored in the tree.
    pub found: bool,

    /// Nodes read on the way down, including the one holding the key.
    pub nodes_visited: usize,
}

/// Outcome of a traced insertion.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct InsertTrace {
    /// False when the key was already present and nothing was stored.
    pub inserted: bool,

    /// Nodes read on the way down.
    pub nodes_visited: usize,

    /// Full nodes split on the way down (including a root split).
    pub splits: usize,
}

impl InsertTrace {
    /// Simulated block writes caused by this insertion.
    ///
    /// The receiving leaf is written once; every split rewrites the split
    /// node, its new sibling, and the parent that received the median.
    pub fn nodes_written(&self) -> usize {
        let leaf = usize::from(self.inserted);
        leaf + self.splits * 3
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nodes_written() {
        let trace = InsertTrace {
            inserted: true,
            nodes_visited: 3,
            splits: 2,
        };
        assert_eq!(trace.nodes_written(), 7);

        let duplicate = InsertTrace {
            inserted: false,
            nodes_visited: 2,
            splits: 0,
        };
        assert_eq!(duplicate.nodes_written(), 0);
    }
}
