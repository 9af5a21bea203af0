//! Property tests: the B-tree and the BST must behave like a sorted set.

use std::collections::BTreeSet;

use fanout::{bst_height, height, BTree, Bst, OrderedIndex};
use proptest::prelude::*;

/// Largest height a valid tree of `n` keys and minimum degree `t` can have.
fn max_height(n: usize, t: usize) -> usize {
    if n == 0 {
        return 0;
    }
    // Root holds >= 1 key, every other node >= t - 1, fan-out >= t.
    let mut levels = 1;
    let mut capacity_floor = 1usize;
    let mut nodes_at_level = 2usize;
    loop {
        let next = capacity_floor + nodes_at_level * (t - 1);
        if next > n {
            return levels;
        }
        capacity_floor = next;
        nodes_at_level = nodes_at_level.saturating_mul(t);
        levels += 1;
    }
}

proptest! {
    #[test]
    fn test_btree_matches_btreeset(
        keys in prop::collection::vec(0u32..5_000, 0..600),
        t in 2usize..8,
    ) {
        let mut tree = BTree::new(t).unwrap();
        let mut model = BTreeSet::new();

        for &key in &keys {
            prop_assert_eq!(tree.insert(key), model.insert(key));
        }

        prop_assert_eq!(tree.len(), model.len());
        prop_assert_eq!(tree.traverse(), model.iter().copied().collect::<Vec<_>>());
        prop_assert!(tree.validate().is_ok(), "{:?}", tree.validate());
        prop_assert!(height(&tree) <= max_height(model.len(), t));
    }

    #[test]
    fn test_btree_search_finds_exactly_inserted(
        keys in prop::collection::vec(0u32..1_000, 1..300),
        lookups in prop::collection::vec(0u32..1_000, 1..100),
        t in 2usize..6,
    ) {
        let mut tree = BTree::new(t).unwrap();
        tree.insert_all(keys.iter().copied());

        for key in lookups {
            prop_assert_eq!(tree.search(&key), keys.contains(&key));
            let trace = tree.search_traced(&key);
            prop_assert!(trace.nodes_visited >= 1);
            prop_assert!(trace.nodes_visited <= height(&tree));
        }
    }

    #[test]
    fn test_bst_and_btree_agree(keys in prop::collection::vec(any::<i64>(), 0..400)) {
        let mut btree = BTree::new(3).unwrap();
        let mut bst = Bst::new();

        for &key in &keys {
            prop_assert_eq!(
                OrderedIndex::insert(&mut btree, key),
                OrderedIndex::insert(&mut bst, key)
            );
        }

        prop_assert_eq!(btree.keys(), bst.keys());
        prop_assert!(bst_height(&bst) >= height(&btree));
        prop_assert!(bst_height(&bst) <= bst.len());
    }
}

#[test]
fn test_max_height_bound() {
    assert_eq!(max_height(0, 2), 0);
    assert_eq!(max_height(1, 2), 1);
    assert_eq!(max_height(2, 2), 1);
    assert_eq!(max_height(3, 2), 2);
}
