//! Typed errors for structural layout operations.

use super::types::{NodeId, SplitId, SplitOrientation, SurfaceId};
use thiserror::Error;

/// Why a layout operation was refused.
///
/// Every failing operation leaves the receiving tree untouched; callers
/// either adopt the returned tree or discard the attempt.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    /// The referenced node is not part of the current tree
    #[error("node {0} is not present in the layout")]
    NodeNotFound(NodeId),

    /// The surface being added already lives in the tree
    #[error("{0} is already part of the layout")]
    DuplicateSurface(SurfaceId),

    /// A replacement subtree repeats a split id or borrows one from elsewhere
    #[error("split {0} appears more than once in the layout")]
    DuplicateSplit(SplitId),

    /// A ratio operation addressed a leaf
    #[error("node {0} is not a split")]
    NotASplit(NodeId),

    /// No ancestor split divides space along the requested axis
    #[error("no {orientation:?} split encloses node {node}")]
    NoMatchingSplit {
        node: NodeId,
        orientation: SplitOrientation,
    },

    /// The supplied view bounds cannot be used to scale a resize
    #[error("view bounds {width}x{height} have no extent along the resize axis")]
    EmptyBounds { width: f32, height: f32 },
}

impl LayoutError {
    /// Duplicate error for whichever kind of node `id` names
    pub(crate) fn duplicate(id: NodeId) -> Self {
        match id {
            NodeId::Surface(surface) => LayoutError::DuplicateSurface(surface),
            NodeId::Split(split) => LayoutError::DuplicateSplit(split),
        }
    }
}
