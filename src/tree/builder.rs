//! Tree builder: leaf construction and level reduction

use crate::error::TreeError;
use crate::tree::node::Node;
use std::time::Instant;
use tracing::{debug, instrument, trace};

/// Make the length of a sequence even by duplicating its last element
///
/// Sequences of even length (including the empty one) are returned untouched.
pub fn balance<T: Clone>(mut items: Vec<T>) -> Vec<T> {
    if items.len() % 2 != 0 {
        if let Some(last) = items.last().cloned() {
            items.push(last);
        }
    }
    items
}

/// Build leaf nodes from an ordered sequence of content blocks
///
/// The sequence is balanced first, so an odd number of blocks yields one extra
/// leaf carrying the last block.
pub fn read_leaves<B: AsRef<[u8]>>(blocks: &[B]) -> Result<Vec<Node>, TreeError> {
    if blocks.is_empty() {
        return Err(TreeError::EmptyInput);
    }

    let refs: Vec<&[u8]> = balance(blocks.iter().map(|b| b.as_ref()).collect());
    let leaves: Vec<Node> = refs.into_iter().map(Node::leaf).collect();
    trace!(leaf_count = leaves.len(), "Built leaf nodes");
    Ok(leaves)
}

/// Reduce a level of nodes pairwise until a single root remains
///
/// Each odd-sized level is balanced before pairing `(0,1), (2,3), …`.
/// An empty level produces no root.
pub fn build_root(nodes: Vec<Node>) -> Option<Node> {
    let mut level = nodes;
    let mut height = 0usize;

    loop {
        match level.len() {
            0 => return None,
            1 => {
                debug!(height, "Level reduction reached root");
                return level.pop();
            }
            _ => {}
        }

        let balanced = balance(level);
        let mut next = Vec::with_capacity(balanced.len() / 2);
        let mut iter = balanced.into_iter();
        while let (Some(left), Some(right)) = (iter.next(), iter.next()) {
            next.push(Node::interior(left, right));
        }

        height += 1;
        trace!(height, width = next.len(), "Reduced level");
        level = next;
    }
}

/// Build a root from content blocks
#[instrument(skip(blocks), fields(block_count = blocks.len()))]
pub fn build<B: AsRef<[u8]>>(blocks: &[B]) -> Result<Node, TreeError> {
    let start = Instant::now();
    let leaves = read_leaves(blocks)?;
    let root = build_root(leaves).ok_or(TreeError::EmptyInput)?;
    debug!(
        node_count = root.node_count(),
        duration_us = start.elapsed().as_micros() as u64,
        "Tree build completed"
    );
    Ok(root)
}

/// Smallest leaf index whose node is duplicated by padding at some level
///
/// Leaves below the threshold occupy exactly one bottom slot, at their own
/// index, so they can be updated along a single root path. Returns
/// `leaf_count` when no leaf is ever duplicated.
pub fn clone_threshold(leaf_count: usize) -> usize {
    let mut threshold = leaf_count;
    let mut width = leaf_count;
    let mut level = 0u32;

    while width > 1 {
        if width % 2 != 0 {
            threshold = threshold.min((width - 1) << level);
            width += 1;
        }
        width /= 2;
        level += 1;
    }
    // A lone leaf is padded at level 0 as well
    if leaf_count == 1 {
        threshold = 0;
    }
    threshold
}
