//! Property-based tests for tree invariants
