//! `PaneNode`: binary tree structure for arbitrary pane nesting.

use super::bounds::PaneBounds;
use super::common::{NodeId, SplitId, SplitOrientation, SurfaceId};
use crate::surface::SurfaceHandle;

/// Smallest share of a split either child may get
pub const MIN_SPLIT_RATIO: f32 = 0.05;
/// Largest share of a split either child may get
pub const MAX_SPLIT_RATIO: f32 = 0.95;
/// Ratio given to fresh and equalized splits
pub const DEFAULT_SPLIT_RATIO: f32 = 0.5;

/// Clamp a ratio into the allowed pane fraction, mapping NaN to the default
pub fn clamp_ratio(ratio: f32) -> f32 {
    if ratio.is_nan() {
        DEFAULT_SPLIT_RATIO
    } else {
        ratio.clamp(MIN_SPLIT_RATIO, MAX_SPLIT_RATIO)
    }
}

/// Tree node for pane layout
///
/// The pane tree is a binary tree where:
/// - Leaf nodes hold a terminal surface
/// - Split nodes hold exactly two children with an orientation and ratio
///
/// Nodes are plain values with no parent links. Ancestor lookups walk down
/// from the root.
#[derive(Debug, Clone)]
pub enum PaneNode {
    /// A leaf node holding a terminal surface
    Leaf(SurfaceHandle),
    /// A split containing two child nodes
    Split {
        /// Stable identity of this split
        id: SplitId,
        /// Orientation of the split
        orientation: SplitOrientation,
        /// Share of the first child (width for horizontal, height for vertical)
        ratio: f32,
        /// First child (left for horizontal, top for vertical)
        first: Box<PaneNode>,
        /// Second child (right for horizontal, bottom for vertical)
        second: Box<PaneNode>,
    },
}

impl PaneNode {
    /// Create a new leaf node
    pub fn leaf(handle: SurfaceHandle) -> Self {
        PaneNode::Leaf(handle)
    }

    /// Create a new split node with a fresh id
    pub fn split(
        orientation: SplitOrientation,
        ratio: f32,
        first: PaneNode,
        second: PaneNode,
    ) -> Self {
        PaneNode::Split {
            id: SplitId::new(),
            orientation,
            ratio: clamp_ratio(ratio),
            first: Box::new(first),
            second: Box::new(second),
        }
    }

    /// Address of this node
    pub fn id(&self) -> NodeId {
        match self {
            PaneNode::Leaf(handle) => NodeId::Surface(handle.id()),
            PaneNode::Split { id, .. } => NodeId::Split(*id),
        }
    }

    /// Check if this is a leaf node
    pub fn is_leaf(&self) -> bool {
        matches!(self, PaneNode::Leaf(_))
    }

    /// Get the surface if this is a leaf node
    pub fn as_surface(&self) -> Option<&SurfaceHandle> {
        match self {
            PaneNode::Leaf(handle) => Some(handle),
            PaneNode::Split { .. } => None,
        }
    }

    /// Find a node by id (recursive)
    pub fn find(&self, id: NodeId) -> Option<&PaneNode> {
        if self.id() == id {
            return Some(self);
        }
        match self {
            PaneNode::Leaf(_) => None,
            PaneNode::Split { first, second, .. } => first.find(id).or_else(|| second.find(id)),
        }
    }

    /// Whether a node with this id lives in this subtree
    pub fn contains(&self, id: NodeId) -> bool {
        self.find(id).is_some()
    }

    /// All surfaces in this subtree, pre-order
    pub fn leaves(&self) -> Vec<&SurfaceHandle> {
        match self {
            PaneNode::Leaf(handle) => vec![handle],
            PaneNode::Split { first, second, .. } => {
                let mut leaves = first.leaves();
                leaves.extend(second.leaves());
                leaves
            }
        }
    }

    /// All surface ids in this subtree, pre-order
    pub fn surface_ids(&self) -> Vec<SurfaceId> {
        self.leaves().into_iter().map(SurfaceHandle::id).collect()
    }

    /// Count total number of leaves
    pub fn leaf_count(&self) -> usize {
        match self {
            PaneNode::Leaf(_) => 1,
            PaneNode::Split { first, second, .. } => first.leaf_count() + second.leaf_count(),
        }
    }

    /// First leaf reached by always taking the first child
    pub fn leftmost_leaf(&self) -> &SurfaceHandle {
        match self {
            PaneNode::Leaf(handle) => handle,
            PaneNode::Split { first, .. } => first.leftmost_leaf(),
        }
    }

    /// Ids of every node in this subtree, splits included, pre-order
    pub fn node_ids(&self) -> Vec<NodeId> {
        let mut out = vec![self.id()];
        if let PaneNode::Split { first, second, .. } = self {
            out.extend(first.node_ids());
            out.extend(second.node_ids());
        }
        out
    }

    /// Copy of this node with every split ratio clamped into range
    pub fn sanitized(&self) -> PaneNode {
        match self {
            PaneNode::Leaf(_) => self.clone(),
            PaneNode::Split {
                id,
                orientation,
                ratio,
                first,
                second,
            } => PaneNode::Split {
                id: *id,
                orientation: *orientation,
                ratio: clamp_ratio(*ratio),
                first: Box::new(first.sanitized()),
                second: Box::new(second.sanitized()),
            },
        }
    }

    /// Copy of this node with every split ratio reset, depth-first
    pub fn equalized(&self) -> PaneNode {
        match self {
            PaneNode::Leaf(_) => self.clone(),
            PaneNode::Split {
                id,
                orientation,
                first,
                second,
                ..
            } => PaneNode::Split {
                id: *id,
                orientation: *orientation,
                ratio: DEFAULT_SPLIT_RATIO,
                first: Box::new(first.equalized()),
                second: Box::new(second.equalized()),
            },
        }
    }

    /// Copy of this split with a new ratio; leaves are returned unchanged
    pub fn with_ratio(&self, new_ratio: f32) -> PaneNode {
        match self {
            PaneNode::Leaf(_) => self.clone(),
            PaneNode::Split {
                id,
                orientation,
                first,
                second,
                ..
            } => PaneNode::Split {
                id: *id,
                orientation: *orientation,
                ratio: clamp_ratio(new_ratio),
                first: first.clone(),
                second: second.clone(),
            },
        }
    }

    /// Calculate bounds for every leaf given the area of this node
    ///
    /// Recursively distributes space according to split ratios and appends
    /// `(surface, bounds)` pairs in pre-order.
    pub fn calculate_bounds(&self, bounds: PaneBounds, out: &mut Vec<(SurfaceId, PaneBounds)>) {
        match self {
            PaneNode::Leaf(handle) => out.push((handle.id(), bounds)),
            PaneNode::Split {
                orientation,
                ratio,
                first,
                second,
                ..
            } => {
                let (first_bounds, second_bounds) = bounds.split(*orientation, *ratio);
                first.calculate_bounds(first_bounds, out);
                second.calculate_bounds(second_bounds, out);
            }
        }
    }

    /// Nearest split enclosing `target` whose orientation matches
    ///
    /// Returns the split's id, current ratio and bounds.
    pub fn nearest_enclosing_split(
        &self,
        target: NodeId,
        orientation: SplitOrientation,
        bounds: PaneBounds,
    ) -> Option<(SplitId, f32, PaneBounds)> {
        match self {
            PaneNode::Leaf(_) => None,
            PaneNode::Split {
                id,
                orientation: split_orientation,
                ratio,
                first,
                second,
            } => {
                let (first_bounds, second_bounds) = bounds.split(*split_orientation, *ratio);
                let (child, child_bounds) = if first.contains(target) {
                    (first, first_bounds)
                } else if second.contains(target) {
                    (second, second_bounds)
                } else {
                    return None;
                };

                // Deeper matches are nearer to the target
                child
                    .nearest_enclosing_split(target, orientation, child_bounds)
                    .or_else(|| (*split_orientation == orientation).then_some((*id, *ratio, bounds)))
            }
        }
    }
}
