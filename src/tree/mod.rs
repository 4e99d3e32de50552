//! Homomorphic Merkle Tree
//!
//! Leaves carry additive (LtHash16) digests of content blocks; interior nodes
//! combine their children's digests. Because the combination is commutative
//! and invertible, a changed leaf can be propagated to the root in O(depth)
//! without rehashing its siblings.

pub mod builder;
pub mod diff;
pub mod hasher;
pub mod lthash;
pub mod merkle;
pub mod node;
pub mod path;
pub mod traversal;
pub mod walker;

pub use diff::Delta;
pub use lthash::LtHash;
pub use merkle::MerkleTree;
pub use node::{Node, NodeKind};
