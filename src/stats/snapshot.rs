//! Read-only view of the namespace tree
//!
//! Snapshots are detached copies of the tree shape; they do not keep the
//! mediator borrowed and never see later changes.

use std::fmt;

use crate::registry::NamespaceNode;

/// Detached copy of one node and its subtree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceSnapshot {
    /// Segment of this node (empty for the forest root)
    pub segment: String,
    /// Number of handlers registered at this node
    pub handlers: usize,
    /// Children in insertion order
    pub children: Vec<NamespaceSnapshot>,
}

impl NamespaceSnapshot {
    /// Capture a node and everything below it
    ///
    /// Walks the tree with an explicit stack, so arbitrarily deep channel
    /// chains are captured without recursion.
    pub fn capture<D: 'static>(segment: &str, node: &NamespaceNode<D>) -> Self {
        let mut stack = vec![Self::frame(segment, node)];
        let mut root = None;

        while let Some((_, rest)) = stack.last_mut() {
            match rest.next() {
                Some((segment, child)) => stack.push(Self::frame(segment, child)),
                None => {
                    if let Some((done, _)) = stack.pop() {
                        match stack.last_mut() {
                            Some((parent, _)) => parent.children.push(done),
                            None => root = Some(done),
                        }
                    }
                }
            }
        }

        root.unwrap_or_else(|| Self::leaf(segment, node))
    }

    fn leaf<D: 'static>(segment: &str, node: &NamespaceNode<D>) -> Self {
        Self {
            segment: segment.to_string(),
            handlers: node.handler_count(),
            children: Vec::new(),
        }
    }

    fn frame<'a, D: 'static>(
        segment: &str,
        node: &'a NamespaceNode<D>,
    ) -> (Self, std::vec::IntoIter<(&'a str, &'a NamespaceNode<D>)>) {
        let children: Vec<_> = node.children().collect();
        (Self::leaf(segment, node), children.into_iter())
    }

    /// Find a direct child by segment
    pub fn child(&self, segment: &str) -> Option<&NamespaceSnapshot> {
        self.children.iter().find(|child| child.segment == segment)
    }

    /// Number of nodes in this subtree, this node included
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut pending = vec![self];
        while let Some(snapshot) = pending.pop() {
            count += 1;
            pending.extend(&snapshot.children);
        }
        count
    }
}

impl fmt::Display for NamespaceSnapshot {
    /// Renders the subtree one node per line, indented by depth, with the
    /// handler count in parentheses. The forest root itself is not printed.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut pending: Vec<(usize, &NamespaceSnapshot)> =
            self.children.iter().rev().map(|child| (0, child)).collect();

        while let Some((depth, snapshot)) = pending.pop() {
            writeln!(
                f,
                "{:indent$}{} ({})",
                "",
                snapshot.segment,
                snapshot.handlers,
                indent = depth * 2
            )?;
            pending.extend(snapshot.children.iter().rev().map(|child| (depth + 1, child)));
        }

        Ok(())
    }
}

impl Drop for NamespaceSnapshot {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut snapshot) = pending.pop() {
            pending.append(&mut snapshot.children);
        }
    }
}
