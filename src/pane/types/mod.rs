//! Core types for the pane system.
//!
//! This module defines the fundamental data structures for split panes:
//! - Binary tree structure for arbitrary nesting
//! - Ids and direction enums shared by every layout operation
//! - Bounds calculation for spatial navigation and resizing
//!
//! Sub-modules:
//! - [`bounds`]   : `PaneBounds` pixel-space bounding box
//! - [`common`]   : `SplitId`, `NodeId`, `SplitOrientation`, direction enums
//! - [`pane_node`]: `PaneNode` binary tree for pane layout

mod bounds;
mod common;
mod pane_node;

#[cfg(test)]
mod tests;

pub use bounds::PaneBounds;
pub use common::{
    FocusDirection, InsertDirection, NodeId, SpatialDirection, SplitId, SplitOrientation,
    SurfaceId,
};
pub use pane_node::{
    DEFAULT_SPLIT_RATIO, MAX_SPLIT_RATIO, MIN_SPLIT_RATIO, PaneNode, clamp_ratio,
};
