//! Pane layout tree for a single tab
//!
//! `PaneLayoutTree` is a value: every mutator takes `&self` and returns a new
//! tree, leaving the receiver untouched. A failed operation returns a
//! [`LayoutError`](super::LayoutError) and the caller keeps the old tree.
//!
//! Sub-modules:
//! - [`creation`]: inserting, removing and replacing nodes.
//! - [`layout`]: view bounds, resizing, ratios and equalizing.
//! - [`focus`]: zoom and focus-target resolution.
//! - [`snapshot`]: serializable structural snapshots.

mod creation;
mod focus;
mod layout;
mod snapshot;

pub use snapshot::LayoutSnapshot;

use super::types::{NodeId, PaneBounds, PaneNode, SurfaceId};
use crate::surface::SurfaceHandle;

/// Layout of the panes within one tab
#[derive(Debug, Clone, Default)]
pub struct PaneLayoutTree {
    /// Root of the pane tree (None if no panes yet)
    root: Option<PaneNode>,
    /// Node shown full-tab instead of the whole tree, if any
    zoomed: Option<NodeId>,
    /// Last-known pixel area of the tab content
    view_bounds: PaneBounds,
}

impl PaneLayoutTree {
    /// Create an empty tree
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a tree holding a single leaf
    pub fn single(handle: SurfaceHandle) -> Self {
        Self {
            root: Some(PaneNode::leaf(handle)),
            ..Self::default()
        }
    }

    /// Get access to the root node
    pub fn root(&self) -> Option<&PaneNode> {
        self.root.as_ref()
    }

    /// Find a node by id
    pub fn find(&self, id: NodeId) -> Option<&PaneNode> {
        self.root.as_ref()?.find(id)
    }

    /// Node holding the given surface
    pub fn node(&self, view: SurfaceId) -> Option<&PaneNode> {
        self.find(NodeId::Surface(view))
    }

    /// Check whether a node is present
    pub fn contains(&self, id: NodeId) -> bool {
        self.find(id).is_some()
    }

    /// All surfaces, pre-order
    pub fn leaves(&self) -> Vec<&SurfaceHandle> {
        self.root
            .as_ref()
            .map(|r| r.leaves())
            .unwrap_or_default()
    }

    /// All surface ids, pre-order
    pub fn surface_ids(&self) -> Vec<SurfaceId> {
        self.root
            .as_ref()
            .map(|r| r.surface_ids())
            .unwrap_or_default()
    }

    /// Get the number of leaves
    pub fn leaf_count(&self) -> usize {
        self.root.as_ref().map(|r| r.leaf_count()).unwrap_or(0)
    }

    /// Whether the root is a split
    pub fn is_split(&self) -> bool {
        self.root.as_ref().is_some_and(|r| !r.is_leaf())
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// First leaf reached by always taking the first child
    pub fn leftmost_leaf(&self) -> Option<&SurfaceHandle> {
        self.root.as_ref().map(|r| r.leftmost_leaf())
    }

    /// Currently zoomed node
    pub fn zoomed(&self) -> Option<NodeId> {
        self.zoomed
    }

    /// Last-known pixel area of the tab content
    pub fn view_bounds(&self) -> PaneBounds {
        self.view_bounds
    }

    /// Build a tree from parts, dropping a zoom that no longer applies
    fn from_parts(root: Option<PaneNode>, zoomed: Option<NodeId>, view_bounds: PaneBounds) -> Self {
        let zoomed = zoomed.filter(|z| {
            root.as_ref()
                .is_some_and(|r| r.leaf_count() > 1 && r.contains(*z))
        });
        Self {
            root,
            zoomed,
            view_bounds,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pane::types::{InsertDirection, SplitOrientation};
    use crate::surface::testing::test_handle;

    #[test]
    fn test_empty_tree() {
        let tree = PaneLayoutTree::new();
        assert!(tree.is_empty());
        assert!(!tree.is_split());
        assert_eq!(tree.leaf_count(), 0);
        assert!(tree.leftmost_leaf().is_none());
        assert!(tree.leaves().is_empty());
    }

    #[test]
    fn test_single_leaf_queries() {
        let handle = test_handle();
        let tree = PaneLayoutTree::single(handle.clone());
        assert!(!tree.is_empty());
        assert!(!tree.is_split());
        assert_eq!(tree.leftmost_leaf(), Some(&handle));
        assert!(tree.node(handle.id()).is_some_and(PaneNode::is_leaf));
        assert!(tree.contains(handle.id().into()));
    }

    #[test]
    fn test_insert_right_of_sole_leaf() {
        let l = test_handle();
        let n = test_handle();
        let tree = PaneLayoutTree::single(l.clone())
            .inserting(n.clone(), l.id(), InsertDirection::Right)
            .unwrap();

        assert!(tree.is_split());
        assert_eq!(tree.surface_ids(), vec![l.id(), n.id()]);
        match tree.root().unwrap() {
            PaneNode::Split {
                orientation,
                ratio,
                first,
                second,
                ..
            } => {
                assert_eq!(*orientation, SplitOrientation::Horizontal);
                assert_eq!(*ratio, 0.5);
                assert_eq!(first.as_surface(), Some(&l));
                assert_eq!(second.as_surface(), Some(&n));
            }
            PaneNode::Leaf(_) => panic!("expected split"),
        }
    }

    #[test]
    fn test_from_parts_drops_zoom_on_single_leaf() {
        let handle = test_handle();
        let tree = PaneLayoutTree::from_parts(
            Some(PaneNode::leaf(handle.clone())),
            Some(handle.id().into()),
            PaneBounds::default(),
        );
        assert_eq!(tree.zoomed(), None);
    }
}
