//! Content sources: anything that yields an ordered, finite sequence of blocks
//!
//! The engine only sees opaque blocks. `DirectoryCrawler` produces one BLAKE3
//! signature per file below a root, ordered by normalized relative path.

use crate::error::ApiError;
use crate::tree::hasher;
use crate::tree::merkle::MerkleTree;
use crate::tree::path;
use crate::tree::walker::{Walker, WalkerConfig};
use crate::types::{LeafOrder, Signature};
use std::path::Path;
use std::time::Instant;
use tracing::{info, instrument, trace};

/// Producer of the ordered content blocks a tree is built from
pub trait ContentSource {
    /// Blocks in a deterministic order
    fn blocks(&self) -> Result<Vec<Vec<u8>>, ApiError>;

    /// Ordering convention the blocks follow
    fn ordering(&self) -> LeafOrder;
}

/// In-memory blocks in caller order
impl ContentSource for Vec<Vec<u8>> {
    fn blocks(&self) -> Result<Vec<Vec<u8>>, ApiError> {
        Ok(self.clone())
    }

    fn ordering(&self) -> LeafOrder {
        LeafOrder::Insertion
    }
}

/// Signature of one crawled file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSignature {
    /// Normalized path relative to the crawl root
    pub path: String,
    pub signature: Signature,
}

/// Crawls a directory tree and signs every file
pub struct DirectoryCrawler {
    walker: Walker,
}

impl DirectoryCrawler {
    /// Crawler over `root` with the given walker configuration
    pub fn new(root: &Path, config: WalkerConfig) -> Result<Self, ApiError> {
        let root = path::canonicalize_root(root)?;
        Ok(Self {
            walker: Walker::with_config(root, config),
        })
    }

    pub fn root(&self) -> &Path {
        self.walker.root()
    }

    /// Walk the root and compute one signature per file, in key order
    #[instrument(skip(self), fields(root = %self.walker.root().display()))]
    pub fn crawl(&self) -> Result<Vec<FileSignature>, ApiError> {
        let start = Instant::now();
        let entries = self.walker.walk()?;

        let mut signatures = Vec::with_capacity(entries.len());
        for entry in entries {
            let signature = hasher::compute_file_signature(&entry.path).map_err(|e| {
                ApiError::Walk(format!("Failed to read {}: {}", entry.path.display(), e))
            })?;
            trace!(path = %entry.key, signature = %hex::encode(signature), "Signed file");
            signatures.push(FileSignature {
                path: entry.key,
                signature,
            });
        }

        info!(
            file_count = signatures.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Crawl completed"
        );
        Ok(signatures)
    }
}

impl ContentSource for DirectoryCrawler {
    fn blocks(&self) -> Result<Vec<Vec<u8>>, ApiError> {
        Ok(self
            .crawl()?
            .into_iter()
            .map(|file| file.signature.to_vec())
            .collect())
    }

    fn ordering(&self) -> LeafOrder {
        LeafOrder::Lexicographic
    }
}

/// Build a tree from any content source
pub fn build_tree(source: &dyn ContentSource) -> Result<MerkleTree, ApiError> {
    let tree = MerkleTree::with_order(source.ordering());
    let blocks = source.blocks()?;
    tree.build(&blocks)?;
    Ok(tree)
}

/// Convenience: crawl `root` and build its tree
pub fn build_directory_tree(root: &Path, config: WalkerConfig) -> Result<MerkleTree, ApiError> {
    let crawler = DirectoryCrawler::new(root, config)?;
    build_tree(&crawler)
}
