//! Path canonicalization and normalization utilities

use crate::error::ApiError;
use std::path::{Component, Path, PathBuf};
use unicode_normalization::UnicodeNormalization;

/// Canonicalize a crawl root (resolves symlinks, `..`, `.`)
pub fn canonicalize_root(path: &Path) -> Result<PathBuf, ApiError> {
    dunce::canonicalize(path).map_err(|e| {
        ApiError::Walk(format!("Failed to canonicalize {}: {}", path.display(), e))
    })
}

/// Ordering key for a file below `root`
///
/// The key is the relative path with `/` separators and NFC-normalized
/// Unicode, so the same tree yields the same order on every platform.
pub fn relative_key(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    let parts: Vec<String> = relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(name) => Some(name.to_string_lossy().nfc().collect::<String>()),
            _ => None,
        })
        .collect();
    parts.join("/")
}
