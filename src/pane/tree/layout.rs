//! Layout management operations for PaneLayoutTree
//!
//! Handles view bounds, per-leaf bounds calculation, keyboard resizing,
//! direct ratio updates from drag-resize, and equalizing.

use super::PaneLayoutTree;
use crate::pane::LayoutError;
use crate::pane::types::{NodeId, PaneBounds, PaneNode, SpatialDirection, SplitId, SurfaceId};

impl PaneLayoutTree {
    /// Copy of this tree with new last-known view bounds
    pub fn with_view_bounds(&self, bounds: PaneBounds) -> Self {
        Self {
            view_bounds: bounds,
            ..self.clone()
        }
    }

    /// Bounds used for geometry: the view bounds, or a unit square before
    /// any real size is known
    pub(super) fn effective_bounds(&self) -> PaneBounds {
        if self.view_bounds.is_empty() {
            PaneBounds::unit()
        } else {
            self.view_bounds
        }
    }

    /// Bounds of every leaf in pre-order, ignoring zoom
    pub fn leaf_bounds(&self) -> Vec<(SurfaceId, PaneBounds)> {
        let mut out = Vec::new();
        if let Some(ref root) = self.root {
            root.calculate_bounds(self.effective_bounds(), &mut out);
        }
        out
    }

    /// Move the divider of the nearest matching ancestor split of `node`
    ///
    /// `delta` is in the same units as `view_bounds` and is scaled by the
    /// split's extent along the resize axis. `Left`/`Up` shrink the first
    /// child, `Right`/`Down` grow it.
    pub fn resizing(
        &self,
        node: NodeId,
        delta: f32,
        direction: SpatialDirection,
        view_bounds: PaneBounds,
    ) -> Result<Self, LayoutError> {
        let root = self.root.as_ref().ok_or(LayoutError::NodeNotFound(node))?;
        if !root.contains(node) {
            return Err(LayoutError::NodeNotFound(node));
        }

        let orientation = direction.orientation();
        let (split_id, ratio, split_bounds) = root
            .nearest_enclosing_split(node, orientation, view_bounds)
            .ok_or(LayoutError::NoMatchingSplit { node, orientation })?;

        let extent = split_bounds.extent(orientation);
        if extent <= 0.0 || !extent.is_finite() {
            return Err(LayoutError::EmptyBounds {
                width: view_bounds.width,
                height: view_bounds.height,
            });
        }

        let step = delta / extent;
        let new_ratio = if direction.towards_first() {
            ratio - step
        } else {
            ratio + step
        };

        crate::debug_log!(
            "PANE_RESIZE",
            "Resizing {} {:?} by {}: ratio {:.3} -> {:.3}",
            split_id,
            direction,
            delta,
            ratio,
            new_ratio
        );

        self.setting_ratio(split_id, new_ratio)
    }

    /// Replace the stored ratio of a split (clamped to the allowed range)
    pub fn setting_ratio(&self, split: SplitId, ratio: f32) -> Result<Self, LayoutError> {
        let id = NodeId::Split(split);
        let node = self.find(id).ok_or(LayoutError::NodeNotFound(id))?;
        if node.is_leaf() {
            return Err(LayoutError::NotASplit(id));
        }
        self.replacing(id, node.with_ratio(ratio))
    }

    /// Reset every split ratio to an even share
    pub fn equalized(&self) -> Self {
        Self {
            root: self.root.as_ref().map(PaneNode::equalized),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pane::types::{InsertDirection, MAX_SPLIT_RATIO, MIN_SPLIT_RATIO};
    use crate::surface::SurfaceHandle;
    use crate::surface::testing::test_handle;

    fn root_ratio(tree: &PaneLayoutTree) -> f32 {
        match tree.root().unwrap() {
            PaneNode::Split { ratio, .. } => *ratio,
            PaneNode::Leaf(_) => panic!("expected split"),
        }
    }

    fn side_by_side() -> (PaneLayoutTree, SurfaceHandle, SurfaceHandle) {
        let a = test_handle();
        let b = test_handle();
        let tree = PaneLayoutTree::single(a.clone())
            .inserting(b.clone(), a.id(), InsertDirection::Right)
            .unwrap();
        (tree, a, b)
    }

    #[test]
    fn resize_right_grows_first_child() {
        let (tree, a, _) = side_by_side();
        let bounds = PaneBounds::new(0.0, 0.0, 1000.0, 500.0);
        let resized = tree
            .resizing(a.id().into(), 100.0, SpatialDirection::Right, bounds)
            .unwrap();
        assert!((root_ratio(&resized) - 0.6).abs() < 1e-5);
        assert!((root_ratio(&tree) - 0.5).abs() < 1e-5);
    }

    #[test]
    fn resize_left_from_second_child_moves_same_divider() {
        let (tree, _, b) = side_by_side();
        let bounds = PaneBounds::new(0.0, 0.0, 1000.0, 500.0);
        let resized = tree
            .resizing(b.id().into(), 250.0, SpatialDirection::Left, bounds)
            .unwrap();
        assert!((root_ratio(&resized) - 0.25).abs() < 1e-5);
    }

    #[test]
    fn resize_is_clamped() {
        let (tree, a, _) = side_by_side();
        let bounds = PaneBounds::new(0.0, 0.0, 100.0, 100.0);
        let big = tree
            .resizing(a.id().into(), 10_000.0, SpatialDirection::Right, bounds)
            .unwrap();
        assert_eq!(root_ratio(&big), MAX_SPLIT_RATIO);
        let small = tree
            .resizing(a.id().into(), 10_000.0, SpatialDirection::Left, bounds)
            .unwrap();
        assert_eq!(root_ratio(&small), MIN_SPLIT_RATIO);
    }

    #[test]
    fn resize_without_matching_split_fails_unchanged() {
        let (tree, a, _) = side_by_side();
        let bounds = PaneBounds::new(0.0, 0.0, 1000.0, 500.0);
        let err = tree
            .resizing(a.id().into(), 50.0, SpatialDirection::Up, bounds)
            .unwrap_err();
        assert!(matches!(err, LayoutError::NoMatchingSplit { .. }));
        assert_eq!(root_ratio(&tree), 0.5);

        let single = PaneLayoutTree::single(a.clone());
        assert!(
            single
                .resizing(a.id().into(), 50.0, SpatialDirection::Right, bounds)
                .is_err()
        );
    }

    #[test]
    fn resize_with_empty_bounds_fails() {
        let (tree, a, _) = side_by_side();
        let err = tree
            .resizing(
                a.id().into(),
                10.0,
                SpatialDirection::Right,
                PaneBounds::default(),
            )
            .unwrap_err();
        assert!(matches!(err, LayoutError::EmptyBounds { .. }));
    }

    #[test]
    fn setting_ratio_on_leaf_fails() {
        let (tree, a, _) = side_by_side();
        let root_id = match tree.root().unwrap().id() {
            NodeId::Split(id) => id,
            NodeId::Surface(_) => panic!("expected split"),
        };
        assert!((root_ratio(&tree.setting_ratio(root_id, 0.3).unwrap()) - 0.3).abs() < 1e-6);
        assert!(tree.setting_ratio(SplitId::new(), 0.3).is_err());
        assert!(tree.find(a.id().into()).is_some_and(PaneNode::is_leaf));
    }

    #[test]
    fn equalized_resets_all_ratios() {
        let (tree, a, b) = side_by_side();
        let c = test_handle();
        let bounds = PaneBounds::new(0.0, 0.0, 1000.0, 1000.0);
        let tree = tree
            .inserting(c.clone(), b.id(), InsertDirection::Down)
            .unwrap()
            .resizing(a.id().into(), 200.0, SpatialDirection::Right, bounds)
            .unwrap()
            .resizing(c.id().into(), 100.0, SpatialDirection::Up, bounds)
            .unwrap();

        let equal = tree.equalized();
        let mut ratios = Vec::new();
        fn collect(node: &PaneNode, out: &mut Vec<f32>) {
            if let PaneNode::Split {
                ratio,
                first,
                second,
                ..
            } = node
            {
                out.push(*ratio);
                collect(first, out);
                collect(second, out);
            }
        }
        collect(equal.root().unwrap(), &mut ratios);
        assert_eq!(ratios, vec![0.5, 0.5]);
        assert_eq!(equal.surface_ids(), tree.surface_ids());
    }

    #[test]
    fn leaf_bounds_follow_ratios() {
        let (tree, a, b) = side_by_side();
        let tree = tree.with_view_bounds(PaneBounds::new(0.0, 0.0, 200.0, 100.0));
        let bounds = tree.leaf_bounds();
        assert_eq!(
            bounds,
            vec![
                (a.id(), PaneBounds::new(0.0, 0.0, 100.0, 100.0)),
                (b.id(), PaneBounds::new(100.0, 0.0, 100.0, 100.0)),
            ]
        );
    }
}
