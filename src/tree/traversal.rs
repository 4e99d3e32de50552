//! Depth-first linearizations of a tree
//!
//! All orders use an explicit stack so traversal depth is never bounded by the
//! call stack. The sequences carry no ordering semantics over digest values;
//! they are the comparable projection used by equality checks and diff.

use crate::tree::node::Node;
use crate::types::TraversalOrder;

/// Lazy in-order iterator: left subtree, node, right subtree
pub struct InOrder<'a> {
    stack: Vec<&'a Node>,
    current: Option<&'a Node>,
}

impl<'a> InOrder<'a> {
    pub fn new(root: Option<&'a Node>) -> Self {
        Self {
            stack: Vec::new(),
            current: root,
        }
    }
}

impl<'a> Iterator for InOrder<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.current {
            self.stack.push(node);
            self.current = node.left();
        }
        let node = self.stack.pop()?;
        self.current = node.right();
        Some(node)
    }
}

/// Node references in the requested order
pub fn nodes(root: Option<&Node>, order: TraversalOrder) -> Vec<&Node> {
    match order {
        TraversalOrder::InOrder => InOrder::new(root).collect(),
        TraversalOrder::PreOrder => pre_order(root),
        TraversalOrder::PostOrder => post_order(root),
    }
}

/// Hex digests in the requested order
pub fn digests(root: Option<&Node>, order: TraversalOrder) -> Vec<String> {
    nodes(root, order).into_iter().map(Node::hex).collect()
}

fn pre_order(root: Option<&Node>) -> Vec<&Node> {
    let mut out = Vec::new();
    let mut stack: Vec<&Node> = root.into_iter().collect();
    while let Some(node) = stack.pop() {
        out.push(node);
        if let Some(right) = node.right() {
            stack.push(right);
        }
        if let Some(left) = node.left() {
            stack.push(left);
        }
    }
    out
}

/// Node-right-left pre-order, reversed
fn post_order(root: Option<&Node>) -> Vec<&Node> {
    let mut out = Vec::new();
    let mut stack: Vec<&Node> = root.into_iter().collect();
    while let Some(node) = stack.pop() {
        out.push(node);
        if let Some(left) = node.left() {
            stack.push(left);
        }
        if let Some(right) = node.right() {
            stack.push(right);
        }
    }
    out.reverse();
    out
}
