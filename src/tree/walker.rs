//! Filesystem walker producing the ordered file list of a crawl root

use crate::error::ApiError;
use crate::tree::path;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, trace};
use walkdir::{DirEntry, WalkDir};

/// A regular file found below the crawl root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Absolute path
    pub path: PathBuf,
    /// Normalized relative path used as the ordering key
    pub key: String,
    pub size: u64,
}

/// Filesystem walker configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalkerConfig {
    /// Whether to follow symbolic links (default: false for determinism)
    pub follow_symlinks: bool,
    /// Path components to skip (e.g., ".git", "target", "node_modules")
    pub ignore_patterns: Vec<String>,
    /// Maximum depth to traverse (None = unlimited)
    pub max_depth: Option<usize>,
    /// Only include files with this extension (without the dot)
    pub extension: Option<String>,
    /// Skip files smaller than this many bytes
    pub min_size: u64,
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            follow_symlinks: false,
            ignore_patterns: vec![
                ".git".to_string(),
                "target".to_string(),
                "node_modules".to_string(),
                ".hmtree".to_string(),
            ],
            max_depth: None,
            extension: None,
            min_size: 0,
        }
    }
}

/// Filesystem walker
pub struct Walker {
    root: PathBuf,
    config: WalkerConfig,
}

impl Walker {
    /// Create a new walker for the given root path
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            config: WalkerConfig::default(),
        }
    }

    /// Create a walker with custom configuration
    pub fn with_config(root: PathBuf, config: WalkerConfig) -> Self {
        Self { root, config }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Walk the filesystem and collect all matching files
    ///
    /// Returns entries sorted by their normalized relative path for determinism.
    pub fn walk(&self) -> Result<Vec<FileEntry>, ApiError> {
        let mut entries = Vec::new();

        let walker = WalkDir::new(&self.root)
            .follow_links(self.config.follow_symlinks)
            .max_depth(self.config.max_depth.unwrap_or(usize::MAX))
            .into_iter()
            .filter_entry(|entry| !self.should_ignore(entry));

        for entry in walker {
            let entry = entry.map_err(|e| ApiError::Walk(e.to_string()))?;
            // Directories and, when not following links, symlinks are skipped
            if !entry.file_type().is_file() {
                continue;
            }

            let metadata = entry.metadata().map_err(|e| {
                ApiError::Walk(format!(
                    "Failed to read metadata for {}: {}",
                    entry.path().display(),
                    e
                ))
            })?;

            if !self.matches_filters(entry.path(), metadata.len()) {
                trace!(path = %entry.path().display(), "Filtered out");
                continue;
            }

            entries.push(FileEntry {
                key: path::relative_key(&self.root, entry.path()),
                path: entry.path().to_path_buf(),
                size: metadata.len(),
            });
        }

        entries.sort_by(|a, b| a.key.cmp(&b.key));
        debug!(root = %self.root.display(), file_count = entries.len(), "Walked filesystem");
        Ok(entries)
    }

    /// Check if an entry matches an ignore pattern by path component
    fn should_ignore(&self, entry: &DirEntry) -> bool {
        if entry.depth() == 0 {
            return false;
        }
        let name = entry.file_name().to_string_lossy();
        self.config
            .ignore_patterns
            .iter()
            .any(|pattern| name == pattern.as_str())
    }

    fn matches_filters(&self, path: &Path, size: u64) -> bool {
        if size < self.config.min_size {
            return false;
        }
        match &self.config.extension {
            Some(ext) => path
                .extension()
                .map(|e| e.to_string_lossy().eq_ignore_ascii_case(ext.trim_start_matches('.')))
                .unwrap_or(false),
            None => true,
        }
    }
}
