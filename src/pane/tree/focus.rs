//! Zoom and focus-target resolution for PaneLayoutTree

use super::PaneLayoutTree;
use crate::pane::LayoutError;
use crate::pane::types::{FocusDirection, NodeId, PaneBounds, SpatialDirection, SurfaceId};
use std::cmp::Ordering;

/// Distances closer than this are treated as equal when ranking candidates
const GEOMETRY_EPSILON: f32 = 1e-3;

impl PaneLayoutTree {
    /// Set or clear the zoomed node
    ///
    /// Zoom only means something with more than one leaf; on a single-leaf
    /// tree the result is simply unzoomed.
    pub fn setting_zoomed(&self, node: Option<NodeId>) -> Result<Self, LayoutError> {
        if let Some(id) = node
            && !self.contains(id)
        {
            return Err(LayoutError::NodeNotFound(id));
        }
        Ok(Self::from_parts(self.root.clone(), node, self.view_bounds))
    }

    /// Leaf that should receive focus when moving `direction` from `from`
    ///
    /// `Previous`/`Next` walk the leaves in traversal order and wrap around.
    /// `Spatial` picks the nearest leaf lying entirely on that side of
    /// `from`, ranked by edge gap, then center distance, then traversal
    /// order. Returns None when there is nowhere to go.
    pub fn focus_target(&self, direction: FocusDirection, from: SurfaceId) -> Option<SurfaceId> {
        let ids = self.surface_ids();
        let index = ids.iter().position(|id| *id == from)?;
        if ids.len() < 2 {
            return None;
        }

        match direction {
            FocusDirection::Previous => {
                let prev = if index == 0 { ids.len() - 1 } else { index - 1 };
                Some(ids[prev])
            }
            FocusDirection::Next => Some(ids[(index + 1) % ids.len()]),
            FocusDirection::Spatial(dir) => self.spatial_target(dir, from),
        }
    }

    fn spatial_target(&self, direction: SpatialDirection, from: SurfaceId) -> Option<SurfaceId> {
        let leaves = self.leaf_bounds();
        let origin = leaves.iter().find(|(id, _)| *id == from)?.1;
        let (ox, oy) = origin.center();

        let mut best: Option<(SurfaceId, f32, f32)> = None;
        for (id, bounds) in &leaves {
            if *id == from {
                continue;
            }
            let Some(gap) = edge_gap(direction, &origin, bounds) else {
                continue;
            };
            let (cx, cy) = bounds.center();
            let center_distance = ((cx - ox).powi(2) + (cy - oy).powi(2)).sqrt();

            // Leaves are visited in traversal order, so keeping the incumbent
            // on a full tie prefers the earlier leaf.
            let better = match best {
                None => true,
                Some((_, best_gap, best_center)) => {
                    match approx_cmp(gap, best_gap) {
                        Ordering::Less => true,
                        Ordering::Greater => false,
                        Ordering::Equal => {
                            approx_cmp(center_distance, best_center) == Ordering::Less
                        }
                    }
                }
            };
            if better {
                best = Some((*id, gap, center_distance));
            }
        }

        crate::debug_log!(
            "PANE_FOCUS",
            "Spatial {:?} from {} -> {:?}",
            direction,
            from,
            best.map(|(id, _, _)| id)
        );
        best.map(|(id, _, _)| id)
    }
}

/// Gap between `origin` and `candidate` along `direction`, or None if the
/// candidate does not lie entirely on that side
fn edge_gap(direction: SpatialDirection, origin: &PaneBounds, candidate: &PaneBounds) -> Option<f32> {
    let gap = match direction {
        SpatialDirection::Left => origin.x - candidate.right(),
        SpatialDirection::Right => candidate.x - origin.right(),
        SpatialDirection::Up => origin.y - candidate.bottom(),
        SpatialDirection::Down => candidate.y - origin.bottom(),
    };
    (gap >= -GEOMETRY_EPSILON).then_some(gap.max(0.0))
}

fn approx_cmp(a: f32, b: f32) -> Ordering {
    if (a - b).abs() <= GEOMETRY_EPSILON {
        Ordering::Equal
    } else {
        a.total_cmp(&b)
    }
}
