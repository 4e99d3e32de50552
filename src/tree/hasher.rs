//! Per-file content signatures using BLAKE3

use crate::types::Signature;
use blake3::Hasher;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Read buffer size for streamed file hashing
const CHUNK_SIZE: usize = 8192;

/// Compute content hash for file bytes
pub fn compute_content_hash(content: &[u8]) -> Signature {
    let mut hasher = Hasher::new();
    hasher.update(content);
    *hasher.finalize().as_bytes()
}

/// Compute the content signature of a file, streaming it in fixed-size chunks
pub fn compute_file_signature(path: &Path) -> std::io::Result<Signature> {
    let mut file = File::open(path)?;
    let mut hasher = Hasher::new();
    let mut buf = [0u8; CHUNK_SIZE];

    loop {
        let read = file.read(&mut buf)?;
        if read == 0 {
            break;
        }
        hasher.update(&buf[..read]);
    }

    Ok(*hasher.finalize().as_bytes())
}
