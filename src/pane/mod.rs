//! Pane layout for split terminal support
//!
//! This module provides the layout engine for split terminals:
//! - `PaneNode`: Tree structure for nested pane splits
//! - `PaneLayoutTree`: Immutable layout of one tab, with zoom and view bounds
//! - `LayoutError`: Why a structural operation was refused
//! - `NodeId`/`SplitId`: Addresses of nodes within a tree

mod error;
mod tree;
mod types;

pub use error::LayoutError;
pub use tree::{LayoutSnapshot, PaneLayoutTree};
pub use types::{
    DEFAULT_SPLIT_RATIO, FocusDirection, InsertDirection, MAX_SPLIT_RATIO, MIN_SPLIT_RATIO,
    NodeId, PaneBounds, PaneNode, SpatialDirection, SplitId, SplitOrientation, SurfaceId,
    clamp_ratio,
};
