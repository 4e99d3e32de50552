//! Subtree diff between two trees
//!
//! The comparison works on in-order digest sequences. Digests of the newer
//! tree that never occur in the older one form the change set; the located
//! subtree is the first node of the newer tree, searched left subtree, node,
//! right subtree, whose digest is in that set. The locator is a leftmost-first
//! heuristic: the returned subtree contains changed material but is not
//! guaranteed to be the minimal subtree enclosing every change.

use crate::tree::node::Node;
use crate::tree::traversal::{self, InOrder};
use crate::types::TraversalOrder;
use std::collections::HashSet;
use tracing::debug;

/// Result of comparing an older tree against a newer one
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Delta {
    /// Digests new to the newer tree, in its in-order sequence order
    pub changed: Vec<String>,
    /// First subtree of the newer tree rooted at a changed digest
    pub subtree: Option<Node>,
}

impl Delta {
    pub fn is_empty(&self) -> bool {
        self.changed.is_empty() && self.subtree.is_none()
    }
}

/// Compare `old` against `new`
pub fn diff(old: Option<&Node>, new: Option<&Node>) -> Delta {
    let old_digests = traversal::digests(old, TraversalOrder::InOrder);
    let new_digests = traversal::digests(new, TraversalOrder::InOrder);

    if old_digests == new_digests {
        return Delta::default();
    }

    let changed = changed_digests(&old_digests, new_digests);
    let subtree = new.and_then(|root| locate_subtree(root, &changed).cloned());

    debug!(
        old_len = old_digests.len(),
        changed = changed.len(),
        located = subtree.is_some(),
        "Computed tree diff"
    );

    Delta { changed, subtree }
}

/// Digests of `new` that do not occur anywhere in `old`, in `new`'s order
///
/// Digests shared with `old` are dropped even when they recur in `new`.
pub fn changed_digests(old: &[String], new: Vec<String>) -> Vec<String> {
    let seen: HashSet<&str> = old.iter().map(String::as_str).collect();
    new.into_iter()
        .filter(|digest| !seen.contains(digest.as_str()))
        .collect()
}

/// First node, in left-node-right search order, whose digest is in `changed`
pub fn locate_subtree<'a>(root: &'a Node, changed: &[String]) -> Option<&'a Node> {
    if changed.is_empty() {
        return None;
    }
    let wanted: HashSet<&str> = changed.iter().map(String::as_str).collect();
    InOrder::new(Some(root)).find(|node| wanted.contains(node.hex().as_str()))
}
