//! Integration tests for tree building determinism

use hmtree::crawler;
use hmtree::tree::walker::WalkerConfig;
use hmtree::tree::MerkleTree;
use hmtree::types::TraversalOrder;
use std::fs;
use tempfile::TempDir;

fn blocks(items: &[&str]) -> Vec<Vec<u8>> {
    items.iter().map(|s| s.as_bytes().to_vec()).collect()
}

/// Same blocks in the same order always give the same root
#[test]
fn test_same_blocks_same_root() {
    let input = blocks(&["washing up liquid", "soap", "batteries", "toothpaste"]);

    let first = MerkleTree::new();
    let second = MerkleTree::new();
    let root1 = first.build(&input).unwrap();
    let root2 = second.build(&input).unwrap();

    assert_eq!(root1, root2);
    assert_eq!(
        first.traverse(TraversalOrder::InOrder),
        second.traverse(TraversalOrder::InOrder)
    );
}

/// Rebuilding a tree in place is idempotent
#[test]
fn test_rebuild_is_idempotent() {
    let input = blocks(&["a", "b", "c"]);
    let tree = MerkleTree::new();
    let root1 = tree.build(&input).unwrap();
    let root2 = tree.build(&input).unwrap();
    assert_eq!(root1, root2);
}

/// Changing one block changes the root
#[test]
fn test_content_change_different_root() {
    let tree = MerkleTree::new();
    let root1 = tree.build(&blocks(&["a", "b", "c", "d"])).unwrap();
    let root2 = tree.build(&blocks(&["a", "x", "c", "d"])).unwrap();
    assert_ne!(root1, root2);
}

/// Swapping two siblings keeps the root: interior digests are order-independent
#[test]
fn test_sibling_swap_preserves_root() {
    let tree = MerkleTree::new();
    let root1 = tree.build(&blocks(&["a", "b", "c", "d"])).unwrap();
    let root2 = tree.build(&blocks(&["b", "a", "c", "d"])).unwrap();
    assert_eq!(root1, root2);

    // The in-order sequences still tell the two trees apart
    let left = MerkleTree::new();
    left.build(&blocks(&["a", "b"])).unwrap();
    let right = MerkleTree::new();
    right.build(&blocks(&["b", "a"])).unwrap();
    assert_ne!(
        left.traverse(TraversalOrder::InOrder),
        right.traverse(TraversalOrder::InOrder)
    );
}

/// Same filesystem produces the same root
#[test]
fn test_same_filesystem_same_root() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().to_path_buf();

    fs::write(root.join("file1.txt"), "content1").unwrap();
    fs::write(root.join("file2.txt"), "content2").unwrap();
    fs::create_dir(root.join("dir1")).unwrap();
    fs::write(root.join("dir1").join("file3.txt"), "content3").unwrap();

    let tree1 = crawler::build_directory_tree(&root, WalkerConfig::default()).unwrap();
    let tree2 = crawler::build_directory_tree(&root, WalkerConfig::default()).unwrap();

    assert_eq!(tree1.root_hex(), tree2.root_hex());
}

/// File content changes produce different roots
#[test]
fn test_file_content_change_different_root() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().to_path_buf();

    fs::write(root.join("test.txt"), "content1").unwrap();
    let before = crawler::build_directory_tree(&root, WalkerConfig::default()).unwrap();

    fs::write(root.join("test.txt"), "content2").unwrap();
    let after = crawler::build_directory_tree(&root, WalkerConfig::default()).unwrap();

    assert_ne!(before.root_hex(), after.root_hex());
}

/// File addition produces a different root
#[test]
fn test_file_addition_different_root() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().to_path_buf();

    fs::write(root.join("file1.txt"), "content").unwrap();
    let before = crawler::build_directory_tree(&root, WalkerConfig::default()).unwrap();

    fs::write(root.join("file2.txt"), "other").unwrap();
    let after = crawler::build_directory_tree(&root, WalkerConfig::default()).unwrap();

    assert_ne!(before.root_hex(), after.root_hex());
    assert_eq!(after.leaf_count(), 2);
}

/// Creation order on disk does not affect the crawl order
#[test]
fn test_creation_order_irrelevant() {
    let first = TempDir::new().unwrap();
    fs::write(first.path().join("b.txt"), "b").unwrap();
    fs::write(first.path().join("a.txt"), "a").unwrap();

    let second = TempDir::new().unwrap();
    fs::write(second.path().join("a.txt"), "a").unwrap();
    fs::write(second.path().join("b.txt"), "b").unwrap();

    let tree1 = crawler::build_directory_tree(first.path(), WalkerConfig::default()).unwrap();
    let tree2 = crawler::build_directory_tree(second.path(), WalkerConfig::default()).unwrap();
    assert_eq!(
        tree1.traverse(TraversalOrder::InOrder),
        tree2.traverse(TraversalOrder::InOrder)
    );
}
