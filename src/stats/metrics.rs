//! Statistics and metrics for a mediator

/// Cumulative dispatch counters, updated by every trigger and broadcast
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchCounters {
    /// Successful trigger lookups
    pub triggers: u64,
    /// Successful broadcast lookups
    pub broadcasts: u64,
    /// Nodes visited by dispatch
    pub nodes_visited: u64,
    /// Handler invocations, including failing ones
    pub handlers_invoked: u64,
    /// Handler invocations that returned an error
    pub handler_failures: u64,
    /// Dispatches rejected because the channel did not exist
    pub missing_channels: u64,
}

impl DispatchCounters {
    /// Create zeroed counters
    pub fn new() -> Self {
        Self::default()
    }

    /// Total dispatch calls that reached an existing channel
    pub fn dispatches(&self) -> u64 {
        self.triggers + self.broadcasts
    }
}

/// Point-in-time statistics for a mediator
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistryStats {
    /// Number of top-level namespaces
    pub root_count: usize,
    /// Number of nodes in the forest
    pub node_count: usize,
    /// Number of registered handlers across all nodes
    pub handler_count: usize,
    /// Deepest path length in segments
    pub max_depth: usize,
    /// Cumulative dispatch counters
    pub dispatch: DispatchCounters,
}

impl RegistryStats {
    /// Average handlers per node (0.0 for an empty forest)
    pub fn handlers_per_node(&self) -> f64 {
        if self.node_count > 0 {
            self.handler_count as f64 / self.node_count as f64
        } else {
            0.0
        }
    }
}
