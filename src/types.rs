//! Shared types used across the engine, crawler and snapshot layers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// BLAKE3 content signature of a single file (32 bytes)
pub type Signature = [u8; 32];

/// Ordering convention of a tree's leaves.
///
/// Two trees are only diffable when their leaves were produced under the same
/// convention; otherwise positional pairing makes the comparison meaningless.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeafOrder {
    /// Leaves follow the caller-supplied block order
    Insertion,
    /// Leaves follow the normalized relative path order of a crawled directory
    Lexicographic,
}

impl Default for LeafOrder {
    fn default() -> Self {
        LeafOrder::Insertion
    }
}

impl fmt::Display for LeafOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LeafOrder::Insertion => write!(f, "insertion"),
            LeafOrder::Lexicographic => write!(f, "lexicographic"),
        }
    }
}

/// Padding policy applied to every odd-sized level before pairing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Balancing {
    /// Duplicate the last element of an odd-sized level
    DuplicateLast,
}

impl Default for Balancing {
    fn default() -> Self {
        Balancing::DuplicateLast
    }
}

/// Linearization order used by traversal and diff
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TraversalOrder {
    InOrder,
    PreOrder,
    PostOrder,
}

impl fmt::Display for TraversalOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraversalOrder::InOrder => write!(f, "in"),
            TraversalOrder::PreOrder => write!(f, "pre"),
            TraversalOrder::PostOrder => write!(f, "post"),
        }
    }
}

impl FromStr for TraversalOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "in" | "inorder" | "in-order" => Ok(TraversalOrder::InOrder),
            "pre" | "preorder" | "pre-order" => Ok(TraversalOrder::PreOrder),
            "post" | "postorder" | "post-order" => Ok(TraversalOrder::PostOrder),
            other => Err(format!(
                "Invalid traversal order: {} (must be 'in', 'pre' or 'post')",
                other
            )),
        }
    }
}
