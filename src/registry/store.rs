//! Mediator implementation
//!
//! The mediator owns a forest of namespace nodes and dispatches payloads to
//! the handlers registered on them.

use std::sync::Arc;

use super::config::RegistryConfig;
use super::error::{HandlerError, HandlerResult, MediatorError};
use super::handler::{Bound, Handler};
use super::node::{NamespaceNode, SharedHandler};
use super::path::ChannelPath;
use crate::stats::{DispatchCounters, NamespaceSnapshot, RegistryStats};

/// Hierarchical publish/subscribe mediator
///
/// Channels are addressed by delimiter-separated paths. [`trigger`] runs the
/// handlers of exactly one channel, [`broadcast`] runs a channel's handlers
/// and then those of every descendant, ancestors before descendants.
///
/// Every operation runs to completion on the caller's thread. Use
/// [`SharedMediator`](super::SharedMediator) to share one mediator between
/// tasks.
///
/// [`trigger`]: Mediator::trigger
/// [`broadcast`]: Mediator::broadcast
pub struct Mediator<D> {
    /// Forest root; its children are the top-level namespaces and it never
    /// holds handlers itself
    roots: NamespaceNode<D>,

    /// Configuration
    config: RegistryConfig,

    /// Dispatch counters
    counters: DispatchCounters,
}

impl<D: 'static> Mediator<D> {
    /// Create a new mediator with the default `:` delimiter
    pub fn new() -> Self {
        Self {
            roots: NamespaceNode::new(),
            config: RegistryConfig::default(),
            counters: DispatchCounters::new(),
        }
    }

    /// Create a new mediator with custom configuration
    pub fn with_config(config: RegistryConfig) -> Result<Self, MediatorError> {
        config.validate()?;

        Ok(Self {
            roots: NamespaceNode::new(),
            config,
            counters: DispatchCounters::new(),
        })
    }

    /// Create a new mediator with a custom delimiter
    pub fn with_delimiter(delimiter: impl Into<String>) -> Result<Self, MediatorError> {
        Self::with_config(RegistryConfig::default().delimiter(delimiter))
    }

    /// Get the mediator configuration
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Get the path delimiter
    pub fn delimiter(&self) -> &str {
        &self.config.delimiter
    }

    /// Register a handler on a channel
    ///
    /// Missing nodes along the path are created. Registering on the empty
    /// path does nothing.
    pub fn on<F>(&mut self, channel: &str, callback: F) -> &mut Self
    where
        F: Fn(&mut Mediator<D>, &D) -> HandlerResult + Send + Sync + 'static,
    {
        self.on_handler(channel, callback)
    }

    /// Register a callback invoked with a bound context
    pub fn on_with<C, F>(&mut self, channel: &str, context: C, callback: F) -> &mut Self
    where
        C: Send + Sync + 'static,
        F: Fn(&C, &mut Mediator<D>, &D) -> HandlerResult + Send + Sync + 'static,
    {
        self.on_handler(channel, Bound::new(context, callback))
    }

    /// Register any [`Handler`] implementation on a channel
    pub fn on_handler<H>(&mut self, channel: &str, handler: H) -> &mut Self
    where
        H: Handler<D>,
    {
        if channel.is_empty() {
            tracing::debug!("Ignoring handler registration on empty channel");
            return self;
        }

        let node = self
            .roots
            .descend_or_create(ChannelPath::split(channel, &self.config.delimiter));
        node.push_handler(Arc::new(handler));

        tracing::debug!(
            channel = %channel,
            handlers = node.handler_count(),
            "Handler registered"
        );

        self
    }

    /// Remove every handler registered on a channel
    ///
    /// Descendant channels keep their handlers. Missing channels are ignored.
    pub fn off(&mut self, channel: &str) -> &mut Self {
        self.off_nested(channel, false)
    }

    /// Remove every handler on a channel, optionally pruning its subtree
    ///
    /// With `with_nested`, every descendant channel is discarded as well; the
    /// channel itself stays registered with no handlers and no children.
    pub fn off_nested(&mut self, channel: &str, with_nested: bool) -> &mut Self {
        let delimiter = &self.config.delimiter;

        let node = if channel.is_empty() {
            None
        } else {
            self.roots
                .descend_mut(ChannelPath::split(channel, delimiter))
        };

        match node {
            Some(node) => {
                let removed = node.handler_count();
                node.clear_handlers();
                if with_nested {
                    node.prune();
                }

                tracing::debug!(
                    channel = %channel,
                    removed = removed,
                    pruned = with_nested,
                    "Handlers removed"
                );
            }
            None => {
                tracing::trace!(channel = %channel, "Ignoring removal of missing channel");
            }
        }

        self
    }

    /// Dispatch a payload to the handlers of exactly one channel
    ///
    /// Handlers run in registration order. The first failing handler aborts
    /// the dispatch and its error is returned.
    pub fn trigger(&mut self, channel: &str, data: &D) -> Result<&mut Self, MediatorError> {
        let handlers = match self.resolve(channel) {
            Some(node) => node.handlers(),
            None => return Err(self.not_found(channel)),
        };

        self.counters.triggers += 1;
        self.counters.nodes_visited += 1;

        tracing::trace!(channel = %channel, handlers = handlers.len(), "Triggering channel");

        if let Err(source) = self.invoke(&handlers, data) {
            return Err(self.handler_failed(channel.to_string(), source));
        }

        Ok(self)
    }

    /// Dispatch a payload to a channel and all of its descendants
    ///
    /// Nodes are visited in pre-order: a channel's handlers run before any
    /// of its descendants', siblings in the order they were first created.
    /// Each node is looked up once, when it is visited, and its child list is
    /// taken at that moment. Handlers that change the tree mid-broadcast
    /// therefore affect the nodes not yet visited, while children created
    /// under an already visited node wait for the next broadcast. The first
    /// failing handler aborts the whole broadcast.
    pub fn broadcast(&mut self, channel: &str, data: &D) -> Result<&mut Self, MediatorError> {
        if !self.has(channel) {
            return Err(self.not_found(channel));
        }

        self.counters.broadcasts += 1;

        // Segments of the node being visited; pending entries record the
        // depth their segment goes at
        let mut path = ChannelPath::segments(channel, &self.config.delimiter);
        let mut pending: Vec<(usize, String)> = path
            .pop()
            .map(|last| (path.len(), last))
            .into_iter()
            .collect();

        while let Some((depth, segment)) = pending.pop() {
            path.truncate(depth);
            path.push(segment);

            let (handlers, children) = match self.roots.descend(path.iter().map(String::as_str)) {
                Some(node) => (node.handlers(), node.child_segments()),
                // Pruned by a handler earlier in this broadcast
                None => continue,
            };

            self.counters.nodes_visited += 1;

            tracing::trace!(
                channel = %path.join(self.config.delimiter.as_str()),
                handlers = handlers.len(),
                "Broadcasting to channel"
            );

            if let Err(source) = self.invoke(&handlers, data) {
                let current = path.join(self.config.delimiter.as_str());
                return Err(self.handler_failed(current, source));
            }

            pending.extend(children.into_iter().rev().map(|child| (depth + 1, child)));
        }

        Ok(self)
    }

    /// Check if a channel exists
    ///
    /// A channel exists once a handler was registered on it or on one of its
    /// descendants, even if its own handlers were removed since. The empty
    /// path never exists.
    pub fn has(&self, channel: &str) -> bool {
        self.resolve(channel).is_some()
    }

    /// Discard every channel and handler
    pub fn clean(&mut self) -> &mut Self {
        self.roots = NamespaceNode::new();
        tracing::debug!("Mediator cleaned");
        self
    }

    /// Check if no channel exists
    pub fn is_empty(&self) -> bool {
        self.roots.is_leaf()
    }

    /// Get the number of handlers registered at exactly this channel
    ///
    /// Returns 0 for missing channels.
    pub fn handler_count(&self, channel: &str) -> usize {
        self.resolve(channel)
            .map(NamespaceNode::handler_count)
            .unwrap_or(0)
    }

    /// List every existing channel in pre-order
    pub fn paths(&self) -> Vec<String> {
        let mut paths = Vec::new();
        let mut pending: Vec<(String, &NamespaceNode<D>)> = self
            .roots
            .children()
            .map(|(segment, node)| (segment.to_string(), node))
            .collect();
        pending.reverse();

        while let Some((path, node)) = pending.pop() {
            let mut children: Vec<(String, &NamespaceNode<D>)> = node
                .children()
                .map(|(segment, child)| {
                    (format!("{}{}{}", path, self.config.delimiter, segment), child)
                })
                .collect();
            children.reverse();
            pending.extend(children);
            paths.push(path);
        }

        paths
    }

    /// Read-only view of the whole forest, for debugging
    pub fn storage(&self) -> NamespaceSnapshot {
        NamespaceSnapshot::capture("", &self.roots)
    }

    /// Get structural statistics and dispatch counters
    pub fn stats(&self) -> RegistryStats {
        let mut stats = RegistryStats {
            root_count: self.roots.children().count(),
            dispatch: self.counters,
            ..Default::default()
        };

        let mut pending: Vec<(usize, &NamespaceNode<D>)> =
            self.roots.children().map(|(_, node)| (1, node)).collect();

        while let Some((depth, node)) = pending.pop() {
            stats.node_count += 1;
            stats.handler_count += node.handler_count();
            stats.max_depth = stats.max_depth.max(depth);
            pending.extend(node.children().map(|(_, child)| (depth + 1, child)));
        }

        stats
    }

    /// Get the cumulative dispatch counters
    pub fn counters(&self) -> &DispatchCounters {
        &self.counters
    }

    fn resolve(&self, channel: &str) -> Option<&NamespaceNode<D>> {
        if channel.is_empty() {
            return None;
        }
        self.roots
            .descend(ChannelPath::split(channel, &self.config.delimiter))
    }

    fn not_found(&mut self, channel: &str) -> MediatorError {
        self.counters.missing_channels += 1;
        tracing::debug!(channel = %channel, "Dispatch to missing channel");
        MediatorError::ChannelNotFound(channel.to_string())
    }

    fn invoke(&mut self, handlers: &[SharedHandler<D>], data: &D) -> HandlerResult {
        for handler in handlers {
            self.counters.handlers_invoked += 1;
            handler.handle(self, data)?;
        }
        Ok(())
    }

    fn handler_failed(&mut self, channel: String, source: HandlerError) -> MediatorError {
        self.counters.handler_failures += 1;
        tracing::warn!(
            channel = %channel,
            error = %source,
            "Handler failed, aborting dispatch"
        );
        MediatorError::HandlerFailed { channel, source }
    }
}

impl<D: 'static> Default for Mediator<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D> std::fmt::Debug for Mediator<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mediator")
            .field("delimiter", &self.config.delimiter)
            .field("roots", &self.roots)
            .field("counters", &self.counters)
            .finish()
    }
}
