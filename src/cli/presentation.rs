//! CLI presentation: text and json formatters per command.

use crate::error::ApiError;
use crate::types::{LeafOrder, TraversalOrder};
use comfy_table::Table;
use owo_colors::OwoColorize;
use serde::Serialize;

/// Digest prefix length used by text output unless `--full` is given
const SHORT_DIGEST: usize = 16;

/// Result of `build`
#[derive(Debug, Clone, Serialize)]
pub struct BuildSummary {
    pub root: String,
    pub leaf_order: LeafOrder,
    pub leaf_count: usize,
    pub node_count: usize,
    pub height: usize,
}

/// Result of `diff`
#[derive(Debug, Clone, Serialize)]
pub struct DiffReport {
    pub old_root: Option<String>,
    pub new_root: Option<String>,
    pub changed: Vec<String>,
    pub subtree_root: Option<String>,
    pub subtree_nodes: usize,
    pub changed_paths: Vec<String>,
}

pub fn short_digest(digest: &str, full: bool) -> &str {
    if full {
        digest
    } else {
        &digest[..digest.len().min(SHORT_DIGEST)]
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String, ApiError> {
    serde_json::to_string_pretty(value).map_err(ApiError::from)
}

pub fn format_build_summary(summary: &BuildSummary, format: &str) -> Result<String, ApiError> {
    if format == "json" {
        return to_json(summary);
    }
    let mut table = Table::new();
    table.set_header(vec!["Property", "Value"]);
    table.add_row(vec!["Root".to_string(), short_digest(&summary.root, false).to_string()]);
    table.add_row(vec!["Leaf order".to_string(), summary.leaf_order.to_string()]);
    table.add_row(vec!["Leaves".to_string(), summary.leaf_count.to_string()]);
    table.add_row(vec!["Nodes".to_string(), summary.node_count.to_string()]);
    table.add_row(vec!["Height".to_string(), summary.height.to_string()]);
    Ok(format!("{}\n{}", "Tree built".bold(), table))
}

pub fn format_traversal(
    order: TraversalOrder,
    digests: &[String],
    full: bool,
    format: &str,
) -> Result<String, ApiError> {
    if format == "json" {
        return to_json(&serde_json::json!({
            "order": order.to_string(),
            "digests": digests,
        }));
    }
    let mut lines = vec![format!("{}-order traversal ({} nodes):", order, digests.len())];
    lines.extend(
        digests
            .iter()
            .enumerate()
            .map(|(i, d)| format!("  {:>4}. {}", i + 1, short_digest(d, full))),
    );
    Ok(lines.join("\n"))
}

pub fn format_diff(report: &DiffReport, full: bool, format: &str) -> Result<String, ApiError> {
    if format == "json" {
        return to_json(report);
    }
    if report.changed.is_empty() && report.subtree_root.is_none() {
        return Ok("No changes: trees are identical.".to_string());
    }

    let mut out = format!(
        "{}\n  Changed digests: {}\n",
        "Trees differ".bold(),
        report.changed.len()
    );
    match &report.subtree_root {
        Some(root) => out.push_str(&format!(
            "  Changed subtree: {} ({} nodes)\n",
            short_digest(root, full),
            report.subtree_nodes
        )),
        None => out.push_str("  Changed subtree: none\n"),
    }
    if !report.changed_paths.is_empty() {
        out.push_str(&format!("\nChanged leaves ({}):", report.changed_paths.len()));
        for path in &report.changed_paths {
            out.push_str(&format!("\n  {}", path.yellow()));
        }
    }
    out.push_str("\n\nNew digests:");
    for digest in &report.changed {
        out.push_str(&format!("\n  {}", short_digest(digest, full)));
    }
    Ok(out)
}

pub fn format_verify(root: &str, leaf_count: usize) -> String {
    format!(
        "Snapshot verified:\n  Root: {}\n  Leaves: {}",
        short_digest(root, false),
        leaf_count
    )
}

pub fn format_snapshot_written(path: &std::path::Path, root: &str, leaf_count: usize) -> String {
    format!(
        "Snapshot written to {}\n  Root: {}\n  Leaves: {}",
        path.display(),
        short_digest(root, false),
        leaf_count
    )
}
