//! Index construction
//!
//! Two passes over an arena:
//!
//! 1. Top-down partitioning with an explicit work stack. The label array is
//!    reordered in place so that every leaf owns a contiguous range.
//! 2. Bottom-up augmentation. Walking the arena backwards fills in the tight
//!    bounding box and the maximum elimination time of every node.

use std::collections::HashSet;

use crate::config::Config;
use crate::observability::{log_event_with_fields, Event};
use crate::primitives::{Axis, BBox, Label};

use super::errors::{IndexError, IndexResult};
use super::node::{Node, NodeKind, ROOT};

/// Output of the partitioning passes.
#[derive(Debug, Default)]
pub(crate) struct Tree {
    pub nodes: Vec<Node>,
    pub depth: usize,
    pub bucket_leaves: usize,
}

/// Checks the label set before any node is built.
pub(crate) fn validate_labels(labels: &[Label], config: &Config) -> IndexResult<()> {
    if labels.len() > config.max_labels {
        return Err(IndexError::resource_limit(labels.len(), config.max_labels));
    }

    for label in labels {
        label
            .check_values()
            .map_err(|reason| IndexError::invalid_label(label.id(), reason))?;
    }

    if config.require_unique_ids {
        let mut seen = HashSet::with_capacity(labels.len());
        for label in labels {
            if !seen.insert(label.id()) {
                return Err(IndexError::duplicate_id(label.id()));
            }
        }
    }

    Ok(())
}

/// Partitions `labels` in place and builds the augmented node arena.
///
/// Expects labels accepted by [`validate_labels`].
pub(crate) fn build_tree(labels: &mut [Label], config: &Config) -> Tree {
    let mut tree = Tree::default();
    if labels.is_empty() {
        return tree;
    }

    partition(labels, config, &mut tree);
    augment(labels, &mut tree.nodes);
    tree
}

fn partition(labels: &mut [Label], config: &Config, tree: &mut Tree) {
    let leaf_capacity = config.leaf_capacity.max(1);

    tree.nodes.push(Node::pending(0, labels.len(), 0));
    let mut stack = vec![ROOT];

    while let Some(id) = stack.pop() {
        let depth = tree.nodes[id].depth;
        let (start, end) = match tree.nodes[id].kind {
            NodeKind::Leaf { start, end } => (start, end),
            NodeKind::Branch { .. } => continue,
        };
        tree.depth = tree.depth.max(depth);

        let count = end - start;
        if count <= leaf_capacity {
            continue;
        }

        let range = &mut labels[start..end];
        if depth >= config.max_depth {
            tree.bucket_leaves += 1;
            log_bucket_leaf(count, depth, "max_depth");
            continue;
        }
        if all_coincident(range) {
            tree.bucket_leaves += 1;
            log_bucket_leaf(count, depth, "coincident");
            continue;
        }

        let axis = if depth % 2 == 0 { Axis::X } else { Axis::Y };
        let mid = count / 2;
        range.select_nth_unstable_by(mid, |a, b| Label::order_on(axis, a, b));
        let split = range[mid].coord(axis);

        let left = tree.nodes.len();
        tree.nodes.push(Node::pending(start, start + mid, depth + 1));
        let right = tree.nodes.len();
        tree.nodes.push(Node::pending(start + mid, end, depth + 1));

        tree.nodes[id].kind = NodeKind::Branch {
            axis,
            split,
            left,
            right,
        };

        stack.push(right);
        stack.push(left);
    }
}

fn augment(labels: &[Label], nodes: &mut [Node]) {
    for id in (0..nodes.len()).rev() {
        let (bbox, max_t) = match nodes[id].kind {
            NodeKind::Leaf { start, end } => {
                let leaf = &labels[start..end];
                let max_t = leaf
                    .iter()
                    .map(Label::elimination_time)
                    .fold(f64::NEG_INFINITY, f64::max);
                (BBox::around(leaf), max_t)
            }
            NodeKind::Branch { left, right, .. } => (
                nodes[left].bbox.union(&nodes[right].bbox),
                nodes[left].max_t.max(nodes[right].max_t),
            ),
        };
        nodes[id].bbox = bbox;
        nodes[id].max_t = max_t;
    }
}

fn all_coincident(labels: &[Label]) -> bool {
    match labels.split_first() {
        Some((first, rest)) => rest
            .iter()
            .all(|l| l.x() == first.x() && l.y() == first.y()),
        None => true,
    }
}

fn log_bucket_leaf(count: usize, depth: usize, reason: &str) {
    log_event_with_fields(
        Event::IndexBucketLeaf,
        &[
            ("labels", count.to_string().as_str()),
            ("depth", depth.to_string().as_str()),
            ("reason", reason),
        ],
    );
}
