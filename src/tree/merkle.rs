//! MerkleTree: a root plus the ordered leaf blocks behind one reader/writer lock
//!
//! Writers (`build`, `update`, `insert`, `remove`) take exclusive access;
//! readers (`traverse`, `root`, `diff`, ...) share it.

use crate::error::TreeError;
use crate::tree::builder::{self, clone_threshold};
use crate::tree::diff::{self, Delta};
use crate::tree::node::Node;
use crate::tree::traversal;
use crate::types::{LeafOrder, TraversalOrder};
use parking_lot::RwLock;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

#[derive(Debug, Default)]
struct TreeState {
    root: Option<Node>,
    /// Unpadded leaf blocks in leaf order
    blocks: Vec<Vec<u8>>,
}

/// Homomorphic Merkle tree over an ordered sequence of content blocks
#[derive(Debug, Default)]
pub struct MerkleTree {
    order: LeafOrder,
    state: RwLock<TreeState>,
}

impl MerkleTree {
    /// Empty tree whose leaves follow caller-supplied order
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty tree labelled with the given leaf ordering convention
    pub fn with_order(order: LeafOrder) -> Self {
        Self {
            order,
            state: RwLock::new(TreeState::default()),
        }
    }

    pub fn leaf_order(&self) -> LeafOrder {
        self.order
    }

    /// Build the tree from content blocks, replacing any previous content
    ///
    /// Returns the root digest in hex. On error the previous content is kept.
    #[instrument(skip(self, blocks), fields(block_count = blocks.len(), order = %self.order))]
    pub fn build<B: AsRef<[u8]>>(&self, blocks: &[B]) -> Result<String, TreeError> {
        let start = Instant::now();
        let mut state = self.state.write();

        let owned: Vec<Vec<u8>> = blocks.iter().map(|b| b.as_ref().to_vec()).collect();
        let root = builder::build(&owned)?;
        let root_hex = root.hex();

        state.root = Some(root);
        state.blocks = owned;

        info!(
            leaf_count = state.blocks.len(),
            root = %short(&root_hex),
            duration_ms = start.elapsed().as_millis() as u64,
            "Merkle tree built"
        );
        Ok(root_hex)
    }

    /// Linearize the tree in the given order
    pub fn traverse(&self, order: TraversalOrder) -> Vec<String> {
        let state = self.state.read();
        traversal::digests(state.root.as_ref(), order)
    }

    /// Copy of the root node, if any
    ///
    /// The read guard is released before returning, so callers may go on to
    /// call other methods on this tree while holding the node.
    pub fn root(&self) -> Option<Node> {
        self.state.read().root.clone()
    }

    pub fn root_hex(&self) -> Option<String> {
        self.state.read().root.as_ref().map(Node::hex)
    }

    /// Number of unpadded leaf blocks
    pub fn leaf_count(&self) -> usize {
        self.state.read().blocks.len()
    }

    pub fn node_count(&self) -> usize {
        self.state.read().root.as_ref().map_or(0, Node::node_count)
    }

    pub fn height(&self) -> usize {
        self.state.read().root.as_ref().map_or(0, Node::height)
    }

    pub fn is_empty(&self) -> bool {
        self.state.read().root.is_none()
    }

    /// Root digest and leaf blocks read under one guard
    ///
    /// Returns `None` for an empty tree.
    pub fn contents(&self) -> Option<(String, Vec<Vec<u8>>)> {
        let state = self.state.read();
        let root = state.root.as_ref()?;
        Some((root.hex(), state.blocks.clone()))
    }

    /// Copy of the unpadded leaf blocks, sufficient to rebuild the tree
    pub fn blocks(&self) -> Vec<Vec<u8>> {
        self.state.read().blocks.clone()
    }

    /// Replace the content of leaf `index`
    ///
    /// Leaves that padding never duplicates are updated in O(depth) by
    /// subtracting each ancestor's old child contribution and adding the new
    /// one. Duplicated tail leaves fall back to a rebuild from the stored blocks.
    #[instrument(skip(self, block))]
    pub fn update(&self, index: usize, block: &[u8]) -> Result<String, TreeError> {
        let mut state = self.state.write();
        let len = state.blocks.len();
        if index >= len {
            return Err(TreeError::LeafOutOfRange { index, len });
        }

        state.blocks[index] = block.to_vec();

        let root_hex = if index < clone_threshold(len) {
            let root = state
                .root
                .as_mut()
                .ok_or(TreeError::LeafOutOfRange { index, len })?;
            let height = root.height();
            root.replace_slot(index, height, block);
            debug!(index, height, "Updated leaf along root path");
            root.hex()
        } else {
            debug!(index, "Leaf is duplicated by padding, rebuilding");
            rebuild(&mut state)?
        };

        Ok(root_hex)
    }

    /// Append a leaf and rebuild the affected levels
    #[instrument(skip(self, block))]
    pub fn insert(&self, block: &[u8]) -> Result<String, TreeError> {
        let mut state = self.state.write();
        state.blocks.push(block.to_vec());
        rebuild(&mut state)
    }

    /// Remove leaf `index`; removing the last leaf empties the tree
    ///
    /// Returns the new root digest, or `None` when the tree became empty.
    #[instrument(skip(self))]
    pub fn remove(&self, index: usize) -> Result<Option<String>, TreeError> {
        let mut state = self.state.write();
        let len = state.blocks.len();
        if index >= len {
            return Err(TreeError::LeafOutOfRange { index, len });
        }

        state.blocks.remove(index);
        if state.blocks.is_empty() {
            warn!("Last leaf removed, tree is now empty");
            state.root = None;
            return Ok(None);
        }
        rebuild(&mut state).map(Some)
    }

    /// Diff this tree (older) against `other` (newer)
    ///
    /// Fails with `StructuralMismatch` when the two trees follow different
    /// leaf ordering conventions.
    pub fn diff(&self, other: &MerkleTree) -> Result<Delta, TreeError> {
        if self.order != other.order {
            return Err(TreeError::StructuralMismatch {
                left: self.order,
                right: other.order,
            });
        }
        if std::ptr::eq(self, other) {
            return Ok(Delta::default());
        }

        // Both guards are always taken in address order
        let (old, new) = if (self as *const Self) < (other as *const Self) {
            let old = self.state.read();
            (old, other.state.read())
        } else {
            let new = other.state.read();
            (self.state.read(), new)
        };
        Ok(diff::diff(old.root.as_ref(), new.root.as_ref()))
    }
}

fn rebuild(state: &mut TreeState) -> Result<String, TreeError> {
    let root = builder::build(&state.blocks)?;
    let root_hex = root.hex();
    state.root = Some(root);
    Ok(root_hex)
}

fn short(hex: &str) -> &str {
    &hex[..hex.len().min(16)]
}
