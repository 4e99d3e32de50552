//! Snapshot persistence
//!
//! A snapshot stores the ordered leaf blocks (hex) plus the balancing policy
//! and leaf ordering, which is enough to rebuild the exact tree. The root
//! digest is stored alongside so a reload can be verified.

use crate::crawler::FileSignature;
use crate::error::ApiError;
use crate::tree::diff::Delta;
use crate::tree::lthash::LtHash;
use crate::tree::merkle::MerkleTree;
use crate::types::{Balancing, LeafOrder};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info};

/// Current snapshot format version
pub const SNAPSHOT_VERSION: u32 = 1;

/// One persisted leaf
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotLeaf {
    /// Relative path for crawled leaves
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Hex-encoded content block
    pub block: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub version: u32,
    pub created_at: DateTime<Utc>,
    pub leaf_order: LeafOrder,
    pub balancing: Balancing,
    /// Hex root digest at the time the snapshot was taken
    pub root: String,
    pub leaves: Vec<SnapshotLeaf>,
}

impl Snapshot {
    /// Snapshot of an already built tree (leaves carry no paths)
    pub fn from_tree(tree: &MerkleTree) -> Result<Self, ApiError> {
        let (root, blocks) = tree
            .contents()
            .ok_or_else(|| ApiError::Snapshot("cannot snapshot an empty tree".to_string()))?;
        let leaves = blocks
            .iter()
            .map(|block| SnapshotLeaf {
                path: None,
                block: hex::encode(block),
            })
            .collect();
        Ok(Self::new(tree.leaf_order(), root, leaves))
    }

    /// Snapshot of a crawl, building its tree to record the root
    pub fn from_crawl(files: &[FileSignature]) -> Result<Self, ApiError> {
        let tree = MerkleTree::with_order(LeafOrder::Lexicographic);
        let blocks: Vec<&[u8]> = files.iter().map(|f| f.signature.as_slice()).collect();
        let root = tree.build(&blocks)?;
        let leaves = files
            .iter()
            .map(|file| SnapshotLeaf {
                path: Some(file.path.clone()),
                block: hex::encode(file.signature),
            })
            .collect();
        Ok(Self::new(LeafOrder::Lexicographic, root, leaves))
    }

    fn new(leaf_order: LeafOrder, root: String, leaves: Vec<SnapshotLeaf>) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            created_at: Utc::now(),
            leaf_order,
            balancing: Balancing::DuplicateLast,
            root,
            leaves,
        }
    }

    /// Decoded leaf blocks in order
    pub fn blocks(&self) -> Result<Vec<Vec<u8>>, ApiError> {
        self.leaves
            .iter()
            .map(|leaf| {
                hex::decode(&leaf.block)
                    .map_err(|e| ApiError::Snapshot(format!("invalid leaf block: {}", e)))
            })
            .collect()
    }

    /// Rebuild the tree this snapshot describes
    pub fn to_tree(&self) -> Result<MerkleTree, ApiError> {
        let tree = MerkleTree::with_order(self.leaf_order);
        tree.build(&self.blocks()?)?;
        Ok(tree)
    }

    /// Rebuild and check the stored root
    pub fn verify(&self) -> Result<MerkleTree, ApiError> {
        let tree = self.to_tree()?;
        let actual = tree.root_hex().unwrap_or_default();
        if actual != self.root {
            return Err(ApiError::SnapshotMismatch {
                expected: self.root.clone(),
                actual,
            });
        }
        Ok(tree)
    }

    /// Paths of leaves whose digest appears in the change set of `delta`
    ///
    /// Leaves without a recorded path are reported by index.
    pub fn changed_paths(&self, delta: &Delta) -> Result<Vec<String>, ApiError> {
        let changed: HashSet<&str> = delta.changed.iter().map(String::as_str).collect();
        let mut paths = Vec::new();
        for (index, (leaf, block)) in self.leaves.iter().zip(self.blocks()?).enumerate() {
            if changed.contains(LtHash::of(&block).to_hex().as_str()) {
                paths.push(leaf.path.clone().unwrap_or_else(|| format!("#{}", index)));
            }
        }
        Ok(paths)
    }

    pub fn write(&self, path: &Path) -> Result<(), ApiError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        info!(path = %path.display(), leaves = self.leaves.len(), "Snapshot written");
        Ok(())
    }

    pub fn read(path: &Path) -> Result<Self, ApiError> {
        let json = std::fs::read_to_string(path)?;
        let snapshot: Snapshot = serde_json::from_str(&json)?;
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(ApiError::Snapshot(format!(
                "unsupported snapshot version {} (expected {})",
                snapshot.version, SNAPSHOT_VERSION
            )));
        }
        debug!(path = %path.display(), leaves = snapshot.leaves.len(), "Snapshot loaded");
        Ok(snapshot)
    }
}
