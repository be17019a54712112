//! Namespace tree nodes
//!
//! A node holds the handlers registered at exactly its path and owns its
//! immediate children. Children keep the order in which their segment was
//! first created, which fixes the sibling order used by broadcasts.

use std::collections::HashMap;
use std::sync::Arc;

use super::handler::Handler;

/// Handler stored in the tree
///
/// Reference counted so a dispatch can capture a node's handler list and
/// release the tree before invoking it.
pub(crate) type SharedHandler<D> = Arc<dyn Handler<D>>;

/// Node of the namespace tree
pub struct NamespaceNode<D> {
    /// Handlers registered at this exact path, in registration order
    handlers: Vec<SharedHandler<D>>,

    /// Immediate children by segment
    children: HashMap<String, NamespaceNode<D>>,

    /// Child segments in first-insertion order
    order: Vec<String>,
}

impl<D: 'static> NamespaceNode<D> {
    /// Create an empty node
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
            children: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Get the number of handlers registered at this node
    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Check if the node has no children
    pub fn is_leaf(&self) -> bool {
        self.order.is_empty()
    }

    /// Get a child by segment
    pub fn child(&self, segment: &str) -> Option<&NamespaceNode<D>> {
        self.children.get(segment)
    }

    /// Iterate over children in insertion order
    pub fn children(&self) -> impl Iterator<Item = (&str, &NamespaceNode<D>)> + '_ {
        self.order.iter().filter_map(move |segment| {
            self.children
                .get(segment)
                .map(|child| (segment.as_str(), child))
        })
    }

    /// Walk down the given segments without creating anything
    pub(crate) fn descend<'a, I>(&self, segments: I) -> Option<&NamespaceNode<D>>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut node = self;
        for segment in segments {
            node = node.children.get(segment)?;
        }
        Some(node)
    }

    /// Mutable variant of [`descend`](Self::descend)
    pub(crate) fn descend_mut<'a, I>(&mut self, segments: I) -> Option<&mut NamespaceNode<D>>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut node = self;
        for segment in segments {
            node = node.children.get_mut(segment)?;
        }
        Some(node)
    }

    /// Walk down the given segments, creating missing nodes on the way
    pub(crate) fn descend_or_create<'a, I>(&mut self, segments: I) -> &mut NamespaceNode<D>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut node = self;
        for segment in segments {
            node = node.child_or_insert(segment);
        }
        node
    }

    fn child_or_insert(&mut self, segment: &str) -> &mut NamespaceNode<D> {
        if !self.children.contains_key(segment) {
            self.order.push(segment.to_string());
        }
        self.children
            .entry(segment.to_string())
            .or_insert_with(NamespaceNode::new)
    }

    /// Snapshot of the handler list
    pub(crate) fn handlers(&self) -> Vec<SharedHandler<D>> {
        self.handlers.clone()
    }

    /// Snapshot of the child segments in insertion order
    pub(crate) fn child_segments(&self) -> Vec<String> {
        self.order.clone()
    }

    pub(crate) fn push_handler(&mut self, handler: SharedHandler<D>) {
        self.handlers.push(handler);
    }

    /// Remove every handler, keeping the children
    pub(crate) fn clear_handlers(&mut self) {
        self.handlers.clear();
    }

    /// Detach the whole subtree below this node
    pub(crate) fn prune(&mut self) {
        self.children.clear();
        self.order.clear();
    }
}

impl<D: 'static> Default for NamespaceNode<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D> std::fmt::Debug for NamespaceNode<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NamespaceNode")
            .field("handlers", &self.handlers.len())
            .field("children", &self.order)
            .finish()
    }
}

impl<D> Drop for NamespaceNode<D> {
    /// Tears the subtree down level by level so dropping a deep chain does
    /// not recurse once per level.
    fn drop(&mut self) {
        let mut pending: Vec<NamespaceNode<D>> =
            self.children.drain().map(|(_, child)| child).collect();
        while let Some(mut node) = pending.pop() {
            pending.extend(node.children.drain().map(|(_, child)| child));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::error::HandlerResult;
    use crate::registry::store::Mediator;

    fn noop() -> SharedHandler<()> {
        Arc::new(|_: &mut Mediator<()>, _: &()| -> HandlerResult { Ok(()) })
    }

    #[test]
    fn test_new_node_is_empty() {
        let node: NamespaceNode<()> = NamespaceNode::new();

        assert_eq!(node.handler_count(), 0);
        assert!(node.is_leaf());
        assert!(node.child("a").is_none());
    }

    #[test]
    fn test_descend_or_create_builds_path() {
        let mut root: NamespaceNode<()> = NamespaceNode::new();
        root.descend_or_create(["a", "b", "c"]);

        let a = root.child("a").unwrap();
        let b = a.child("b").unwrap();
        assert!(b.child("c").unwrap().is_leaf());
        assert!(root.descend(["a", "b", "c"]).is_some());
    }

    #[test]
    fn test_descend_does_not_create() {
        let mut root: NamespaceNode<()> = NamespaceNode::new();
        root.descend_or_create(["a"]);

        assert!(root.descend(["a", "x"]).is_none());
        assert!(root.descend_mut(["a", "x"]).is_none());
        assert!(root.child("a").unwrap().is_leaf());
    }

    #[test]
    fn test_children_keep_insertion_order() {
        let mut root: NamespaceNode<()> = NamespaceNode::new();
        for segment in ["zeta", "alpha", "mid", "alpha"] {
            root.descend_or_create([segment]);
        }

        let order: Vec<&str> = root.children().map(|(segment, _)| segment).collect();
        assert_eq!(order, vec!["zeta", "alpha", "mid"]);
        assert_eq!(root.child_segments(), vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_handlers_allow_duplicates() {
        let mut node = NamespaceNode::new();
        let handler = noop();
        node.push_handler(Arc::clone(&handler));
        node.push_handler(handler);

        assert_eq!(node.handler_count(), 2);
        assert_eq!(node.handlers().len(), 2);
    }

    #[test]
    fn test_clear_handlers_keeps_children() {
        let mut root = NamespaceNode::new();
        root.descend_or_create(["a"]).push_handler(noop());
        root.descend_or_create(["a", "b"]).push_handler(noop());

        let a = root.descend_mut(["a"]).unwrap();
        a.clear_handlers();

        assert_eq!(a.handler_count(), 0);
        assert_eq!(a.child("b").unwrap().handler_count(), 1);
    }

    #[test]
    fn test_prune_detaches_subtree() {
        let mut root = NamespaceNode::new();
        root.descend_or_create(["a", "b", "c"]).push_handler(noop());

        let a = root.descend_mut(["a"]).unwrap();
        a.prune();

        assert!(a.is_leaf());
        assert!(root.descend(["a"]).is_some());
        assert!(root.descend(["a", "b"]).is_none());
    }

    #[test]
    fn test_drop_deep_chain() {
        let segments: Vec<String> = (0..200_000).map(|i| i.to_string()).collect();
        let mut root: NamespaceNode<()> = NamespaceNode::new();
        root.descend_or_create(segments.iter().map(String::as_str));

        root.descend_mut(["0"]).unwrap().prune();
        assert!(root.child("0").unwrap().is_leaf());

        root.descend_or_create(segments.iter().map(String::as_str));
        drop(root);
    }
}
