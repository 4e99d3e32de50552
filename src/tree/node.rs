//! Tree node types

use crate::tree::lthash::LtHash;

/// Node shape: a leaf wraps one content block, an interior node owns two children
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Leaf,
    Interior { left: Box<Node>, right: Box<Node> },
}

/// A node of the homomorphic Merkle tree
///
/// Interior digests are `combine(left, right)`: a fresh accumulator that has
/// absorbed both children's sums.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    digest: LtHash,
    kind: NodeKind,
}

impl Node {
    /// Leaf node for a single content block
    pub fn leaf(block: &[u8]) -> Self {
        Self {
            digest: LtHash::of(block),
            kind: NodeKind::Leaf,
        }
    }

    /// Interior node owning both children
    pub fn interior(left: Node, right: Node) -> Self {
        let mut digest = LtHash::new();
        digest.add(&left.digest.sum());
        digest.add(&right.digest.sum());
        Self {
            digest,
            kind: NodeKind::Interior {
                left: Box::new(left),
                right: Box::new(right),
            },
        }
    }

    pub fn digest(&self) -> &LtHash {
        &self.digest
    }

    /// Hex rendering of the digest, used for display and comparison
    pub fn hex(&self) -> String {
        self.digest.to_hex()
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf)
    }

    pub fn left(&self) -> Option<&Node> {
        match &self.kind {
            NodeKind::Interior { left, .. } => Some(left),
            NodeKind::Leaf => None,
        }
    }

    pub fn right(&self) -> Option<&Node> {
        match &self.kind {
            NodeKind::Interior { right, .. } => Some(right),
            NodeKind::Leaf => None,
        }
    }

    /// Total number of nodes in this subtree
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            if let NodeKind::Interior { left, right } = &node.kind {
                stack.push(left);
                stack.push(right);
            }
        }
        count
    }

    /// Number of levels above the leaves (0 for a lone leaf)
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut node = self;
        while let NodeKind::Interior { left, .. } = &node.kind {
            height += 1;
            node = left;
        }
        height
    }

    /// Replace the content of the bottom slot `slot` and propagate the change
    /// to every ancestor by subtracting the old child sum and adding the new one.
    ///
    /// `level` is this node's height. Returns `(old_sum, new_sum)` of this node.
    pub(crate) fn replace_slot(
        &mut self,
        slot: usize,
        level: usize,
        block: &[u8],
    ) -> (Vec<u8>, Vec<u8>) {
        let old_sum = self.digest.sum();
        match &mut self.kind {
            NodeKind::Leaf => {
                self.digest = LtHash::of(block);
            }
            NodeKind::Interior { left, right } => {
                let child_level = level.saturating_sub(1);
                let child = if (slot >> child_level) & 1 == 0 {
                    left
                } else {
                    right
                };
                let (old_child, new_child) = child.replace_slot(slot, child_level, block);
                self.digest.remove(&old_child);
                self.digest.add(&new_child);
            }
        }
        (old_sum, self.digest.sum())
    }
}
