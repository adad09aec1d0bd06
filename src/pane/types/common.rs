//! Shared ids and direction enums for the pane system.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

pub use crate::surface::SurfaceId;

/// Stable identity of a split node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SplitId(Uuid);

impl SplitId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SplitId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SplitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "split:{}", self.0)
    }
}

/// Address of any node in a layout tree.
///
/// Leaves are addressed by the surface they hold, splits by their own id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum NodeId {
    Surface(SurfaceId),
    Split(SplitId),
}

impl From<SurfaceId> for NodeId {
    fn from(id: SurfaceId) -> Self {
        NodeId::Surface(id)
    }
}

impl From<SplitId> for NodeId {
    fn from(id: SplitId) -> Self {
        NodeId::Split(id)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeId::Surface(id) => id.fmt(f),
            NodeId::Split(id) => id.fmt(f),
        }
    }
}

/// Orientation of a split
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitOrientation {
    /// Children side by side (first = left, second = right)
    Horizontal,
    /// Children stacked (first = top, second = bottom)
    Vertical,
}

/// Compass direction on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpatialDirection {
    Left,
    Right,
    Up,
    Down,
}

impl SpatialDirection {
    /// Orientation of the splits that divide space along this direction
    pub fn orientation(self) -> SplitOrientation {
        match self {
            SpatialDirection::Left | SpatialDirection::Right => SplitOrientation::Horizontal,
            SpatialDirection::Up | SpatialDirection::Down => SplitOrientation::Vertical,
        }
    }

    /// Whether this direction points towards the first child of a split
    pub fn towards_first(self) -> bool {
        matches!(self, SpatialDirection::Left | SpatialDirection::Up)
    }
}

/// Where a new leaf goes relative to its target.
///
/// Same compass set as [`SpatialDirection`]; `Left`/`Up` put the new leaf
/// first, `Right`/`Down` put it second.
pub type InsertDirection = SpatialDirection;

/// Direction for moving focus between panes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FocusDirection {
    /// Previous leaf in traversal order (wraps)
    Previous,
    /// Next leaf in traversal order (wraps)
    Next,
    /// Geometrically nearest leaf in a compass direction
    Spatial(SpatialDirection),
}
