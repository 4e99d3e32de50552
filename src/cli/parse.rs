//! CLI parse: clap types for hmtree. No behavior; definitions only.

use crate::types::TraversalOrder;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// hmtree CLI - Homomorphic Merkle trees over directory snapshots
#[derive(Parser, Debug)]
#[command(name = "hmtree")]
#[command(about = "Homomorphic Merkle trees over directory snapshots with subtree diffing")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Root directory to crawl (also the workspace for config loading)
    #[arg(long, global = true, default_value = ".")]
    pub root: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long, global = true)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Crawl the root and build its tree
    Build {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Crawl the root and dump a traversal of its tree
    Traverse {
        /// Traversal order (in, pre, post)
        #[arg(long, default_value = "in")]
        order: TraversalOrder,
        /// Print full digests instead of 16-character prefixes
        #[arg(long)]
        full: bool,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Crawl the root and write a snapshot
    Snapshot {
        /// Snapshot file to write
        #[arg(long)]
        out: PathBuf,
    },
    /// Diff an older snapshot against a newer snapshot or the current root
    Diff {
        /// Older snapshot
        #[arg(long)]
        old: PathBuf,
        /// Newer snapshot (defaults to crawling --root)
        #[arg(long)]
        new: Option<PathBuf>,
        /// Print full digests instead of 16-character prefixes
        #[arg(long)]
        full: bool,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Rebuild a snapshot and check its stored root
    Verify {
        /// Snapshot file to verify
        snapshot: PathBuf,
    },
}
