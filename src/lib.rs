//! hmtree: Homomorphic Merkle Trees
//!
//! Binary Merkle trees whose node digests are LtHash16 additive homomorphic
//! hashes. Provides deterministic construction over byte blocks or directory
//! crawls, in/pre/post-order traversal, structural diffing that locates the
//! changed subtree, incremental leaf updates, and JSON snapshots.

pub mod cli;
pub mod config;
pub mod crawler;
pub mod error;
pub mod logging;
pub mod snapshot;
pub mod tree;
pub mod types;
