//! Owning handle around a built index
//!
//! `init` never fails: a parse or construction failure is stored in the
//! handle and reported by `is_good` and `diagnostic`.

use std::path::Path;

use crate::config::Config;
use crate::index::EliminationIndex;
use crate::input::import_labels;
use crate::observability::{
    log_event_with_fields, Event, Logger, MetricsRegistry, MetricsSnapshot, Severity,
};
use crate::primitives::{BBox, Label};

use super::errors::{BoundaryError, BoundaryResult, InitError};

/// Outcome of `init`, fixed for the lifetime of the handle.
#[derive(Debug)]
pub enum HandleState {
    Ready(EliminationIndex),
    Failed(InitError),
}

/// A label index owned on behalf of a host.
#[derive(Debug)]
pub struct IndexHandle {
    state: HandleState,
    metrics: MetricsRegistry,
}

impl IndexHandle {
    /// Import the c.e file at `path` and build an index with default limits.
    pub fn init(path: impl AsRef<Path>) -> Self {
        Self::init_with_config(path, &Config::default())
    }

    /// Import the c.e file at `path` and build an index.
    pub fn init_with_config(path: impl AsRef<Path>, config: &Config) -> Self {
        let result = import_labels(path.as_ref())
            .map_err(InitError::from)
            .and_then(|store| EliminationIndex::build(store, config).map_err(InitError::from));
        Self::from_result(result)
    }

    /// Build a handle over labels constructed in memory.
    pub fn from_labels(labels: Vec<Label>, config: &Config) -> Self {
        Self::from_result(EliminationIndex::from_labels(labels, config).map_err(InitError::from))
    }

    /// A handle that is not good from the start.
    pub fn failed(err: InitError) -> Self {
        Self::from_result(Err(err))
    }

    fn from_result(result: Result<EliminationIndex, InitError>) -> Self {
        let state = match result {
            Ok(index) => {
                log_event_with_fields(
                    Event::HandleReady,
                    &[
                        ("labels", index.len().to_string().as_str()),
                        ("nodes", index.node_count().to_string().as_str()),
                    ],
                );
                HandleState::Ready(index)
            }
            Err(err) => {
                log_event_with_fields(
                    Event::HandleFailed,
                    &[("code", err.code()), ("reason", err.to_string().as_str())],
                );
                HandleState::Failed(err)
            }
        };

        Self {
            state,
            metrics: MetricsRegistry::new(),
        }
    }

    /// True iff the handle holds an index.
    pub fn is_good(&self) -> bool {
        matches!(self.state, HandleState::Ready(_))
    }

    pub fn state(&self) -> &HandleState {
        &self.state
    }

    /// All labels inside `bbox` with an elimination time of at least `min_t`.
    ///
    /// # Errors
    ///   * `Precondition` if the handle is not good
    ///   * `InvalidQuery` for a malformed box or a NaN threshold
    pub fn query(&self, bbox: &BBox, min_t: f64) -> BoundaryResult<Vec<&Label>> {
        let index = match &self.state {
            HandleState::Ready(index) => index,
            HandleState::Failed(err) => {
                return Err(self.reject(BoundaryError::Precondition(err.to_string())));
            }
        };

        let (result, stats) = index
            .query_with_stats(bbox, min_t)
            .map_err(|e| self.reject(e.into()))?;

        self.metrics.record_query(
            result.len() as u64,
            stats.nodes_visited,
            stats.pruned_spatial,
            stats.pruned_temporal,
        );

        if Logger::enabled(Severity::Trace) {
            log_event_with_fields(
                Event::QueryExecuted,
                &[
                    ("bbox", bbox.to_string().as_str()),
                    ("min_t", min_t.to_string().as_str()),
                    ("returned", result.len().to_string().as_str()),
                    ("nodes_visited", stats.nodes_visited.to_string().as_str()),
                ],
            );
        }

        Ok(result)
    }

    fn reject(&self, err: BoundaryError) -> BoundaryError {
        self.metrics.increment_queries_rejected();
        log_event_with_fields(
            Event::QueryRejected,
            &[("code", err.code()), ("reason", err.to_string().as_str())],
        );
        err
    }

    /// Why `init` failed, if it did.
    pub fn diagnostic(&self) -> Option<&InitError> {
        match &self.state {
            HandleState::Ready(_) => None,
            HandleState::Failed(err) => Some(err),
        }
    }

    pub fn index(&self) -> Option<&EliminationIndex> {
        match &self.state {
            HandleState::Ready(index) => Some(index),
            HandleState::Failed(_) => None,
        }
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    /// Drops the handle together with its index.
    pub fn release(self) {
        log_event_with_fields(
            Event::HandleReleased,
            &[
                ("good", if self.is_good() { "true" } else { "false" }),
                ("queries", self.metrics.queries_executed().to_string().as_str()),
            ],
        );
    }
}
