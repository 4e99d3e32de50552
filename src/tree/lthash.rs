//! Additive lattice hash (LtHash16)
//!
//! The state is a vector of 1024 `u16` lanes. Absorbing a block expands it to
//! 2048 bytes with the BLAKE3 extendable output function and adds it lane-wise
//! with wrapping arithmetic. Addition in `(Z/2^16)^1024` is commutative and
//! invertible, so the digest of a set of blocks is independent of absorption
//! order and individual contributions can be subtracted again.

use std::fmt;

/// Number of 16-bit lanes in the accumulator
pub const LANES: usize = 1024;

/// Size of the digest returned by [`LtHash::sum`] in bytes
pub const DIGEST_LEN: usize = LANES * 2;

/// Homomorphic accumulator over byte blocks
#[derive(Clone, PartialEq, Eq)]
pub struct LtHash {
    lanes: Box<[u16; LANES]>,
}

impl LtHash {
    /// Zero-state accumulator
    pub fn new() -> Self {
        Self {
            lanes: Box::new([0u16; LANES]),
        }
    }

    /// Absorb a block into the accumulator
    pub fn add(&mut self, block: &[u8]) {
        let expanded = expand(block);
        for (lane, delta) in self.lanes.iter_mut().zip(expanded.iter()) {
            *lane = lane.wrapping_add(*delta);
        }
    }

    /// Remove a previously absorbed block
    pub fn remove(&mut self, block: &[u8]) {
        let expanded = expand(block);
        for (lane, delta) in self.lanes.iter_mut().zip(expanded.iter()) {
            *lane = lane.wrapping_sub(*delta);
        }
    }

    /// Add another accumulator's state into this one
    pub fn combine(&mut self, other: &LtHash) {
        for (lane, delta) in self.lanes.iter_mut().zip(other.lanes.iter()) {
            *lane = lane.wrapping_add(*delta);
        }
    }

    /// Subtract another accumulator's state from this one
    pub fn subtract(&mut self, other: &LtHash) {
        for (lane, delta) in self.lanes.iter_mut().zip(other.lanes.iter()) {
            *lane = lane.wrapping_sub(*delta);
        }
    }

    /// Fixed-size digest: lanes serialized little-endian
    pub fn sum(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(DIGEST_LEN);
        for lane in self.lanes.iter() {
            out.extend_from_slice(&lane.to_le_bytes());
        }
        out
    }

    /// Lowercase hex rendering of [`LtHash::sum`]
    pub fn to_hex(&self) -> String {
        hex::encode(self.sum())
    }

    pub fn is_zero(&self) -> bool {
        self.lanes.iter().all(|lane| *lane == 0)
    }

    /// Accumulator with a single block absorbed
    pub fn of(block: &[u8]) -> Self {
        let mut hash = Self::new();
        hash.add(block);
        hash
    }
}

impl Default for LtHash {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LtHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hex = self.to_hex();
        write!(f, "LtHash({}…)", &hex[..16])
    }
}

/// Expand a block into one lane vector via BLAKE3 XOF
fn expand(block: &[u8]) -> [u16; LANES] {
    let mut bytes = [0u8; DIGEST_LEN];
    let mut hasher = blake3::Hasher::new();
    hasher.update(block);
    hasher.finalize_xof().fill(&mut bytes);

    let mut lanes = [0u16; LANES];
    for (lane, chunk) in lanes.iter_mut().zip(bytes.chunks_exact(2)) {
        *lane = u16::from_le_bytes([chunk[0], chunk[1]]);
    }
    lanes
}
