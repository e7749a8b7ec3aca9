//! Range queries with an elimination-time threshold

use serde::Serialize;

use crate::primitives::{BBox, Label};

use super::errors::{validate_query, IndexResult};
use super::node::{NodeKind, ROOT};
use super::EliminationIndex;

/// Traversal counters of one query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct QueryStats {
    /// Nodes taken from the work stack, pruned ones included
    pub nodes_visited: u64,
    /// Subtrees skipped because their box misses the query box
    pub pruned_spatial: u64,
    /// Subtrees skipped because all their labels vanish below the threshold
    pub pruned_temporal: u64,
    /// Labels tested in reached leaves
    pub labels_scanned: u64,
}

impl QueryStats {
    pub fn pruned(&self) -> u64 {
        self.pruned_spatial + self.pruned_temporal
    }
}

impl EliminationIndex {
    /// Returns every label inside `bbox` (borders included) whose elimination
    /// time is at least `min_t`.
    ///
    /// The order of the result is unspecified.
    ///
    /// # Errors
    /// `ELIM_INVALID_QUERY` if `bbox` has a NaN corner or min > max on an axis,
    /// or if `min_t` is NaN.
    pub fn query(&self, bbox: &BBox, min_t: f64) -> IndexResult<Vec<&Label>> {
        self.query_with_stats(bbox, min_t).map(|(result, _)| result)
    }

    /// Like [`EliminationIndex::query`], also reporting traversal counters.
    pub fn query_with_stats(
        &self,
        bbox: &BBox,
        min_t: f64,
    ) -> IndexResult<(Vec<&Label>, QueryStats)> {
        validate_query(bbox, min_t)?;

        let mut result = Vec::new();
        let mut stats = QueryStats::default();
        if self.nodes.is_empty() {
            return Ok((result, stats));
        }

        let mut stack = vec![ROOT];
        while let Some(id) = stack.pop() {
            stats.nodes_visited += 1;
            let node = &self.nodes[id];

            if !node.bbox.intersects(bbox) {
                stats.pruned_spatial += 1;
                continue;
            }
            if node.max_t < min_t {
                stats.pruned_temporal += 1;
                continue;
            }

            match node.kind {
                NodeKind::Leaf { start, end } => {
                    let leaf = &self.labels[start..end];
                    stats.labels_scanned += leaf.len() as u64;

                    if bbox.contains_bbox(&node.bbox) {
                        result.extend(leaf.iter().filter(|l| l.elimination_time() >= min_t));
                    } else {
                        result.extend(leaf.iter().filter(|l| {
                            l.elimination_time() >= min_t && bbox.contains_label(l)
                        }));
                    }
                }
                NodeKind::Branch { left, right, .. } => {
                    stack.push(right);
                    stack.push(left);
                }
            }
        }

        Ok((result, stats))
    }

    /// Number of labels [`EliminationIndex::query`] would return.
    pub fn count(&self, bbox: &BBox, min_t: f64) -> IndexResult<usize> {
        self.query(bbox, min_t).map(|r| r.len())
    }
}
