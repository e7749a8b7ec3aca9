//! Elimination-time range index
//!
//! A k-d partition of labels where every node also knows the largest
//! elimination time below it. A query descends only into subtrees whose box
//! meets the query box and whose maximum elimination time reaches the
//! threshold.
//!
//! # Design Principles
//!
//! - Immutable after construction: queries take `&self` and need no locks
//! - Iterative: construction and queries use explicit work stacks
//! - Arena storage: nodes refer to each other by index
//!
//! # Invariants
//!
//! - A node's box is the tight box of all labels below it
//! - A node's maximum time is the largest elimination time below it
//! - Every label belongs to exactly one leaf
//! - A query returns exactly the labels inside the box (borders included)
//!   with an elimination time of at least the threshold

mod builder;
mod errors;
mod geo;
mod node;
mod query;
mod render;

pub use errors::{IndexError, IndexErrorCode, IndexResult};
pub use geo::GeoIndex;
pub use node::{Node, NodeId, NodeKind};
pub use query::QueryStats;

use crate::config::Config;
use crate::input::LabelStore;
use crate::observability::{ObservationScope, Phase};
use crate::primitives::{BBox, Label};

use builder::{build_tree, validate_labels};

/// Spatial index over labels with elimination times.
#[derive(Debug, Clone)]
pub struct EliminationIndex {
    /// Labels reordered so that every leaf owns a contiguous range
    labels: Vec<Label>,
    nodes: Vec<Node>,
    depth: usize,
    bucket_leaves: usize,
}

impl EliminationIndex {
    /// Build an index over the labels of a store.
    ///
    /// # Errors
    ///   * `ELIM_RESOURCE_LIMIT` if the store holds more than `max_labels`
    ///   * `ELIM_INVALID_LABEL` for non-finite positions or invalid times
    ///     and size factors
    ///   * `ELIM_DUPLICATE_ID` if two labels share an id and
    ///     `require_unique_ids` is set
    pub fn build(store: LabelStore, config: &Config) -> IndexResult<Self> {
        Self::from_labels(store.into_labels(), config)
    }

    /// Build an index over labels constructed in memory.
    pub fn from_labels(mut labels: Vec<Label>, config: &Config) -> IndexResult<Self> {
        let count = labels.len().to_string();
        let scope = ObservationScope::open(Phase::IndexBuild, &[("labels", count.as_str())]);

        if let Err(e) = validate_labels(&labels, config) {
            scope.fail(&e.to_string());
            return Err(e);
        }

        let tree = build_tree(&mut labels, config);
        scope.complete(&[
            ("nodes", tree.nodes.len().to_string().as_str()),
            ("depth", tree.depth.to_string().as_str()),
            ("bucket_leaves", tree.bucket_leaves.to_string().as_str()),
        ]);

        Ok(Self {
            labels,
            nodes: tree.nodes,
            depth: tree.depth,
            bucket_leaves: tree.bucket_leaves,
        })
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Depth of the deepest node; the root has depth 0.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Leaves above the leaf capacity (coincident labels or depth limit).
    pub fn bucket_leaves(&self) -> usize {
        self.bucket_leaves
    }

    /// Tight box around all labels, `None` for an empty index.
    pub fn bounds(&self) -> Option<BBox> {
        self.nodes.first().map(|root| root.bbox)
    }

    /// Largest elimination time of all labels, `None` for an empty index.
    pub fn max_elimination_time(&self) -> Option<f64> {
        self.nodes.first().map(|root| root.max_t)
    }

    /// All labels in leaf order.
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// The node arena; index 0 is the root.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }
}
