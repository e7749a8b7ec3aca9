//! Arena nodes of the k-d partition
//!
//! Nodes live in one `Vec` and refer to each other by index. A node is always
//! allocated before its children, so a reverse sweep over the arena visits
//! every child before its parent.

use crate::primitives::{Axis, BBox};

/// Index of a node in the arena.
pub type NodeId = usize;

/// Root of a non-empty tree.
pub const ROOT: NodeId = 0;

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Owns the labels in `start..end` of the index's label array.
    Leaf { start: usize, end: usize },
    /// Splits its labels at the median on `axis`.
    ///
    /// `split` is the coordinate of the first label of the right child; labels
    /// equal to it may end up on either side.
    Branch {
        axis: Axis,
        split: f64,
        left: NodeId,
        right: NodeId,
    },
}

/// One subtree summary.
///
/// `bbox` is the tight box of all labels below the node and `max_t` their
/// largest elimination time.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub bbox: BBox,
    pub max_t: f64,
    pub depth: usize,
    pub kind: NodeKind,
}

impl Node {
    /// A node whose summary is filled in after partitioning.
    pub(crate) fn pending(start: usize, end: usize, depth: usize) -> Self {
        Self {
            bbox: BBox::empty(),
            max_t: f64::NEG_INFINITY,
            depth,
            kind: NodeKind::Leaf { start, end },
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf { .. })
    }

    /// Label range of a leaf.
    pub fn range(&self) -> Option<(usize, usize)> {
        match self.kind {
            NodeKind::Leaf { start, end } => Some((start, end)),
            NodeKind::Branch { .. } => None,
        }
    }

    /// Children of a branch.
    pub fn children(&self) -> Option<(NodeId, NodeId)> {
        match self.kind {
            NodeKind::Leaf { .. } => None,
            NodeKind::Branch { left, right, .. } => Some((left, right)),
        }
    }
}
