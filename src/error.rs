//! Error types for the homomorphic Merkle tree engine and its command layer.

use crate::types::LeafOrder;
use thiserror::Error;

/// Engine-level errors raised by tree construction, update and diff
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("Empty input: at least one content block is required")]
    EmptyInput,

    #[error("Structural mismatch: cannot diff a {left} tree against a {right} tree")]
    StructuralMismatch { left: LeafOrder, right: LeafOrder },

    #[error("Leaf index {index} out of range for tree with {len} leaves")]
    LeafOutOfRange { index: usize, len: usize },
}

/// Errors surfaced by the crawler, snapshot and CLI layers
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Tree error: {0}")]
    Tree(#[from] TreeError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to walk directory: {0}")]
    Walk(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Snapshot error: {0}")]
    Snapshot(String),

    #[error("Snapshot root mismatch: expected {expected}, rebuilt {actual}")]
    SnapshotMismatch { expected: String, actual: String },
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Snapshot(err.to_string())
    }
}
