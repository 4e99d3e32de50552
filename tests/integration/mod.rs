//! Integration tests for homomorphic Merkle trees

mod incremental_update;
mod snapshot_roundtrip;
mod tree_determinism;
mod tree_structure;
