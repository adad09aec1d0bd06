//! Serializable structural snapshot of a layout tree.
//!
//! A snapshot records orientation, ratios and surface ids only; engine
//! objects are never serialized. Hosts use it to persist or inspect layouts.

use super::PaneLayoutTree;
use crate::pane::types::{PaneNode, SplitOrientation, SurfaceId};
use serde::{Deserialize, Serialize};

/// Structure of one node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LayoutSnapshot {
    Leaf {
        surface: SurfaceId,
    },
    Split {
        orientation: SplitOrientation,
        ratio: f32,
        first: Box<LayoutSnapshot>,
        second: Box<LayoutSnapshot>,
    },
}

impl LayoutSnapshot {
    fn from_node(node: &PaneNode) -> Self {
        match node {
            PaneNode::Leaf(handle) => LayoutSnapshot::Leaf {
                surface: handle.id(),
            },
            PaneNode::Split {
                orientation,
                ratio,
                first,
                second,
                ..
            } => LayoutSnapshot::Split {
                orientation: *orientation,
                ratio: *ratio,
                first: Box::new(Self::from_node(first)),
                second: Box::new(Self::from_node(second)),
            },
        }
    }

    /// Number of leaves described
    pub fn leaf_count(&self) -> usize {
        match self {
            LayoutSnapshot::Leaf { .. } => 1,
            LayoutSnapshot::Split { first, second, .. } => first.leaf_count() + second.leaf_count(),
        }
    }
}

impl PaneLayoutTree {
    /// Structural snapshot of the tree (None when empty)
    pub fn snapshot(&self) -> Option<LayoutSnapshot> {
        self.root.as_ref().map(LayoutSnapshot::from_node)
    }
}
