//! Integration tests for tree shape, padding and traversal

use hmtree::error::TreeError;
use hmtree::tree::{LtHash, MerkleTree, Node};
use hmtree::types::TraversalOrder;

fn interior(left: &LtHash, right: &LtHash) -> LtHash {
    let mut digest = LtHash::new();
    digest.add(&left.sum());
    digest.add(&right.sum());
    digest
}

#[test]
fn test_empty_input_is_rejected() {
    let tree = MerkleTree::new();
    let blocks: Vec<Vec<u8>> = Vec::new();
    assert_eq!(tree.build(&blocks).unwrap_err(), TreeError::EmptyInput);
    assert!(tree.is_empty());
    assert!(tree.traverse(TraversalOrder::InOrder).is_empty());
}

#[test]
fn test_failed_build_keeps_previous_tree() {
    let tree = MerkleTree::new();
    let root = tree.build(&[b"a", b"b"]).unwrap();
    let empty: Vec<Vec<u8>> = Vec::new();
    assert!(tree.build(&empty).is_err());
    assert_eq!(tree.root_hex(), Some(root));
}

#[test]
fn test_single_block_is_padded_to_pair() {
    let tree = MerkleTree::new();
    tree.build(&[b"lonely"]).unwrap();

    {
        let root = tree.root().unwrap();
        assert!(!root.is_leaf());
        assert_eq!(root.left(), root.right());
    }
    assert_eq!(tree.node_count(), 3);
    assert_eq!(tree.leaf_count(), 1);
}

/// Three blocks: root(P1(a, b), P2(c, c'))
#[test]
fn test_three_block_in_order_sequence() {
    let tree = MerkleTree::new();
    tree.build(&[b"a", b"b", b"c"]).unwrap();

    let ha = LtHash::of(b"a");
    let hb = LtHash::of(b"b");
    let hc = LtHash::of(b"c");
    let p1 = interior(&ha, &hb);
    let p2 = interior(&hc, &hc);
    let root = interior(&p1, &p2);

    let expected: Vec<String> = [&ha, &p1, &hb, &root, &hc, &p2, &hc]
        .iter()
        .map(|h| h.to_hex())
        .collect();
    assert_eq!(tree.traverse(TraversalOrder::InOrder), expected);

    let pre: Vec<String> = [&root, &p1, &ha, &hb, &p2, &hc, &hc]
        .iter()
        .map(|h| h.to_hex())
        .collect();
    assert_eq!(tree.traverse(TraversalOrder::PreOrder), pre);

    let post: Vec<String> = [&ha, &hb, &p1, &hc, &hc, &p2, &root]
        .iter()
        .map(|h| h.to_hex())
        .collect();
    assert_eq!(tree.traverse(TraversalOrder::PostOrder), post);
}

#[test]
fn test_traversal_length_matches_node_count() {
    for leaves in 1..=17usize {
        let blocks: Vec<Vec<u8>> = (0..leaves).map(|i| i.to_le_bytes().to_vec()).collect();
        let tree = MerkleTree::new();
        tree.build(&blocks).unwrap();

        let nodes = tree.node_count();
        for order in [
            TraversalOrder::InOrder,
            TraversalOrder::PreOrder,
            TraversalOrder::PostOrder,
        ] {
            assert_eq!(tree.traverse(order).len(), nodes, "{} leaves, {}", leaves, order);
        }
        // Padding always yields a perfect binary tree
        assert_eq!(nodes, (1usize << (tree.height() + 1)) - 1);
    }
}

#[test]
fn test_digest_is_2048_bytes() {
    let tree = MerkleTree::new();
    let root = tree.build(&[b"a", b"b"]).unwrap();
    assert_eq!(root.len(), 4096);
    assert_eq!(LtHash::of(b"a").sum().len(), 2048);
}

#[test]
fn test_root_node_matches_manual_construction() {
    let tree = MerkleTree::new();
    tree.build(&[b"a", b"b", b"c", b"d"]).unwrap();

    let manual = Node::interior(
        Node::interior(Node::leaf(b"a"), Node::leaf(b"b")),
        Node::interior(Node::leaf(b"c"), Node::leaf(b"d")),
    );
    assert_eq!(tree.root().unwrap(), manual);
}
