//! Query metrics
//!
//! - Counters only, monotonic
//! - Thread-safe, lock-free
//!
//! One registry lives in every index handle; queries issued concurrently
//! against the same handle all update it.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Counters describing the query traffic of one index handle
///
/// Uses Relaxed ordering; the counters carry no synchronization duty.
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    /// Successful queries
    queries_executed: AtomicU64,
    /// Rejected queries (invalid input or failed handle)
    queries_rejected: AtomicU64,
    /// Labels handed back to callers
    labels_returned: AtomicU64,
    /// Tree nodes visited by all queries
    nodes_visited: AtomicU64,
    /// Subtrees skipped because their box missed the query
    subtrees_pruned_spatial: AtomicU64,
    /// Subtrees skipped because their maximum time was below the threshold
    subtrees_pruned_temporal: AtomicU64,
}

impl MetricsRegistry {
    /// Create a new metrics registry with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one answered query
    pub fn record_query(&self, returned: u64, visited: u64, pruned_spatial: u64, pruned_temporal: u64) {
        self.queries_executed.fetch_add(1, Ordering::Relaxed);
        self.labels_returned.fetch_add(returned, Ordering::Relaxed);
        self.nodes_visited.fetch_add(visited, Ordering::Relaxed);
        self.subtrees_pruned_spatial
            .fetch_add(pruned_spatial, Ordering::Relaxed);
        self.subtrees_pruned_temporal
            .fetch_add(pruned_temporal, Ordering::Relaxed);
    }

    /// Increment queries rejected
    pub fn increment_queries_rejected(&self) {
        self.queries_rejected.fetch_add(1, Ordering::Relaxed);
    }

    /// Get queries executed
    pub fn queries_executed(&self) -> u64 {
        self.queries_executed.load(Ordering::Relaxed)
    }

    /// Get all metrics as a snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            queries_executed: self.queries_executed.load(Ordering::Relaxed),
            queries_rejected: self.queries_rejected.load(Ordering::Relaxed),
            labels_returned: self.labels_returned.load(Ordering::Relaxed),
            nodes_visited: self.nodes_visited.load(Ordering::Relaxed),
            subtrees_pruned_spatial: self.subtrees_pruned_spatial.load(Ordering::Relaxed),
            subtrees_pruned_temporal: self.subtrees_pruned_temporal.load(Ordering::Relaxed),
        }
    }

    /// Get current metrics as a JSON object
    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.snapshot()).unwrap_or_default()
    }
}

/// A point-in-time snapshot of all metrics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub queries_executed: u64,
    pub queries_rejected: u64,
    pub labels_returned: u64,
    pub nodes_visited: u64,
    pub subtrees_pruned_spatial: u64,
    pub subtrees_pruned_temporal: u64,
}
