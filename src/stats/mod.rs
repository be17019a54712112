//! Registry statistics and diagnostics
//!
//! This module provides:
//! - Counters and structural statistics for a mediator
//! - A read-only snapshot of the namespace tree for debugging

pub mod metrics;
pub mod snapshot;

pub use metrics::{DispatchCounters, RegistryStats};
pub use snapshot::NamespaceSnapshot;
