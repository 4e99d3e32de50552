//! CLI route: single route table and run context. Dispatches to the engine and presentation.

use crate::cli::help::command_name;
use crate::cli::parse::Commands;
use crate::cli::presentation::{
    format_build_summary, format_diff, format_snapshot_written, format_traversal, format_verify,
    BuildSummary, DiffReport,
};
use crate::config::{ConfigLoader, HmtreeConfig};
use crate::crawler::{self, DirectoryCrawler};
use crate::error::ApiError;
use crate::snapshot::Snapshot;
use crate::tree::merkle::MerkleTree;
use crate::tree::node::Node;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, info_span};

/// Runtime context for CLI execution: crawl root and loaded configuration.
pub struct RunContext {
    root: PathBuf,
    config: HmtreeConfig,
}

impl RunContext {
    /// Create run context from root and optional config path. Uses ConfigLoader only.
    pub fn new(root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, ApiError> {
        let config = match config_path {
            Some(ref path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load(&root)?,
        };
        Ok(Self { root, config })
    }

    /// Run context with an already loaded configuration
    pub fn with_config(root: PathBuf, config: HmtreeConfig) -> Self {
        Self { root, config }
    }

    pub fn config(&self) -> &HmtreeConfig {
        &self.config
    }

    /// Execute a command and return its rendered output
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        let span = info_span!("command", name = command_name(command));
        let _guard = span.enter();
        let started = Instant::now();

        let result = self.execute_inner(command);
        info!(
            ok = result.is_ok(),
            duration_ms = started.elapsed().as_millis() as u64,
            "Command finished"
        );
        result
    }

    fn execute_inner(&self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::Build { format } => {
                let tree = self.crawl_tree()?;
                let summary = BuildSummary {
                    root: tree.root_hex().unwrap_or_default(),
                    leaf_order: tree.leaf_order(),
                    leaf_count: tree.leaf_count(),
                    node_count: tree.node_count(),
                    height: tree.height(),
                };
                format_build_summary(&summary, format)
            }
            Commands::Traverse {
                order,
                full,
                format,
            } => {
                let tree = self.crawl_tree()?;
                let digests = tree.traverse(*order);
                format_traversal(*order, &digests, *full, format)
            }
            Commands::Snapshot { out } => {
                let snapshot = self.crawl_snapshot()?;
                snapshot.write(out)?;
                Ok(format_snapshot_written(
                    out,
                    &snapshot.root,
                    snapshot.leaves.len(),
                ))
            }
            Commands::Diff {
                old,
                new,
                full,
                format,
            } => {
                let report = self.diff(old, new.as_deref())?;
                format_diff(&report, *full, format)
            }
            Commands::Verify { snapshot } => {
                let snapshot = Snapshot::read(snapshot)?;
                let tree = snapshot.verify()?;
                Ok(format_verify(&snapshot.root, tree.leaf_count()))
            }
        }
    }

    fn crawler(&self) -> Result<DirectoryCrawler, ApiError> {
        DirectoryCrawler::new(&self.root, self.config.crawler.clone())
    }

    fn crawl_tree(&self) -> Result<MerkleTree, ApiError> {
        crawler::build_tree(&self.crawler()?)
    }

    fn crawl_snapshot(&self) -> Result<Snapshot, ApiError> {
        let files = self.crawler()?.crawl()?;
        Snapshot::from_crawl(&files)
    }

    /// Diff an older snapshot against a newer snapshot, or against a fresh crawl
    fn diff(&self, old: &Path, new: Option<&Path>) -> Result<DiffReport, ApiError> {
        let old_snapshot = Snapshot::read(old)?;
        let new_snapshot = match new {
            Some(path) => Snapshot::read(path)?,
            None => self.crawl_snapshot()?,
        };

        let old_tree = old_snapshot.verify()?;
        let new_tree = new_snapshot.verify()?;
        let delta = old_tree.diff(&new_tree)?;
        let changed_paths = new_snapshot.changed_paths(&delta)?;
        debug!(
            changed = delta.changed.len(),
            paths = changed_paths.len(),
            "Snapshot diff computed"
        );

        Ok(DiffReport {
            old_root: old_tree.root_hex(),
            new_root: new_tree.root_hex(),
            subtree_root: delta.subtree.as_ref().map(Node::hex),
            subtree_nodes: delta.subtree.as_ref().map_or(0, Node::node_count),
            changed: delta.changed,
            changed_paths,
        })
    }
}
