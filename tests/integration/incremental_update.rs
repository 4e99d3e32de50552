//! Integration tests for in-place leaf updates, inserts and removals

use hmtree::error::TreeError;
use hmtree::tree::MerkleTree;
use hmtree::types::TraversalOrder;
use std::sync::Arc;
use std::thread;

fn numbered(count: usize) -> Vec<Vec<u8>> {
    (0..count).map(|i| format!("block-{}", i).into_bytes()).collect()
}

fn fresh_root(blocks: &[Vec<u8>]) -> String {
    let tree = MerkleTree::new();
    tree.build(blocks).unwrap()
}

/// Every leaf of every size up to 13 updates to the same tree a fresh build gives
#[test]
fn test_update_matches_fresh_build_for_every_index() {
    for count in 1..=13usize {
        for index in 0..count {
            let mut blocks = numbered(count);
            let tree = MerkleTree::new();
            tree.build(&blocks).unwrap();

            let root = tree.update(index, b"replacement").unwrap();
            blocks[index] = b"replacement".to_vec();

            let fresh = MerkleTree::new();
            fresh.build(&blocks).unwrap();
            assert_eq!(root, fresh.root_hex().unwrap(), "count {} index {}", count, index);
            assert_eq!(
                tree.traverse(TraversalOrder::PreOrder),
                fresh.traverse(TraversalOrder::PreOrder),
                "count {} index {}",
                count,
                index
            );
        }
    }
}

#[test]
fn test_repeated_updates_accumulate() {
    let mut blocks = numbered(8);
    let tree = MerkleTree::new();
    tree.build(&blocks).unwrap();

    for (index, content) in [(1usize, "one"), (6, "six"), (1, "uno")] {
        tree.update(index, content.as_bytes()).unwrap();
        blocks[index] = content.as_bytes().to_vec();
    }
    assert_eq!(tree.root_hex().unwrap(), fresh_root(&blocks));
    assert_eq!(tree.blocks(), blocks);
}

#[test]
fn test_update_back_to_original_restores_root() {
    let blocks = numbered(4);
    let tree = MerkleTree::new();
    let original = tree.build(&blocks).unwrap();

    tree.update(2, b"temporary").unwrap();
    let restored = tree.update(2, &blocks[2]).unwrap();
    assert_eq!(restored, original);
}

#[test]
fn test_update_out_of_range() {
    let tree = MerkleTree::new();
    tree.build(&numbered(3)).unwrap();
    assert_eq!(
        tree.update(3, b"x").unwrap_err(),
        TreeError::LeafOutOfRange { index: 3, len: 3 }
    );

    let empty = MerkleTree::new();
    assert_eq!(
        empty.update(0, b"x").unwrap_err(),
        TreeError::LeafOutOfRange { index: 0, len: 0 }
    );
}

#[test]
fn test_insert_and_remove_track_fresh_builds() {
    let mut blocks = numbered(5);
    let tree = MerkleTree::new();
    tree.build(&blocks).unwrap();

    let root = tree.insert(b"appended").unwrap();
    blocks.push(b"appended".to_vec());
    assert_eq!(root, fresh_root(&blocks));
    assert_eq!(tree.leaf_count(), 6);

    let root = tree.remove(0).unwrap();
    blocks.remove(0);
    assert_eq!(root, Some(fresh_root(&blocks)));

    while tree.leaf_count() > 1 {
        tree.remove(0).unwrap();
    }
    assert_eq!(tree.remove(0).unwrap(), None);
    assert!(tree.is_empty());
    assert_eq!(
        tree.remove(0).unwrap_err(),
        TreeError::LeafOutOfRange { index: 0, len: 0 }
    );
}

/// Readers never observe a half-applied update
#[test]
fn test_concurrent_readers_see_consistent_roots() {
    let blocks = numbered(16);
    let tree = Arc::new(MerkleTree::new());
    let before = tree.build(&blocks).unwrap();

    let mut updated = blocks.clone();
    updated[5] = b"concurrent".to_vec();
    let after = fresh_root(&updated);

    thread::scope(|scope| {
        for _ in 0..4 {
            let tree = Arc::clone(&tree);
            let (before, after) = (before.clone(), after.clone());
            scope.spawn(move || {
                for _ in 0..50 {
                    let root = tree.root_hex().unwrap();
                    assert!(root == before || root == after);
                }
            });
        }
        let writer = Arc::clone(&tree);
        scope.spawn(move || {
            writer.update(5, b"concurrent").unwrap();
        });
    });

    assert_eq!(tree.root_hex().unwrap(), after);
}
