//! Structural operations for PaneLayoutTree
//!
//! Inserting a leaf next to another, removing a node with sibling promotion,
//! and substituting a prebuilt subtree.

use super::PaneLayoutTree;
use crate::pane::LayoutError;
use crate::pane::types::{
    DEFAULT_SPLIT_RATIO, InsertDirection, NodeId, PaneNode, SurfaceId,
};
use crate::surface::SurfaceHandle;
use std::collections::HashSet;

/// Result of attempting to remove a node from a subtree
enum RemoveResult {
    /// Node was removed, returning the new subtree (or None if it emptied)
    Removed(Option<PaneNode>),
    /// Node was not found in this subtree
    NotFound,
}

impl PaneLayoutTree {
    /// Add `view` as a new leaf adjacent to the leaf holding `at`
    ///
    /// `Left`/`Up` make the new leaf the first child, `Right`/`Down` the
    /// second. Inserting clears any zoom so the new pane is visible.
    pub fn inserting(
        &self,
        view: SurfaceHandle,
        at: SurfaceId,
        direction: InsertDirection,
    ) -> Result<Self, LayoutError> {
        let root = self
            .root
            .as_ref()
            .ok_or(LayoutError::NodeNotFound(at.into()))?;
        if root.contains(view.id().into()) {
            return Err(LayoutError::DuplicateSurface(view.id()));
        }

        let new_root = Self::insert_node(root, at, &view, direction)
            .ok_or(LayoutError::NodeNotFound(at.into()))?;

        crate::debug_info!(
            "PANE_SPLIT",
            "Inserted {} {:?} of {} (leaves: {})",
            view.id(),
            direction,
            at,
            new_root.leaf_count()
        );

        Ok(Self::from_parts(Some(new_root), None, self.view_bounds))
    }

    /// Rebuild `node` with the target leaf replaced by a split holding it and `view`
    fn insert_node(
        node: &PaneNode,
        target: SurfaceId,
        view: &SurfaceHandle,
        direction: InsertDirection,
    ) -> Option<PaneNode> {
        match node {
            PaneNode::Leaf(handle) => {
                if handle.id() != target {
                    return None;
                }
                let new_leaf = PaneNode::leaf(view.clone());
                let (first, second) = if direction.towards_first() {
                    (new_leaf, node.clone())
                } else {
                    (node.clone(), new_leaf)
                };
                Some(PaneNode::split(
                    direction.orientation(),
                    DEFAULT_SPLIT_RATIO,
                    first,
                    second,
                ))
            }
            PaneNode::Split {
                id,
                orientation,
                ratio,
                first,
                second,
            } => {
                if let Some(new_first) = Self::insert_node(first, target, view, direction) {
                    return Some(PaneNode::Split {
                        id: *id,
                        orientation: *orientation,
                        ratio: *ratio,
                        first: Box::new(new_first),
                        second: second.clone(),
                    });
                }
                Self::insert_node(second, target, view, direction).map(|new_second| {
                    PaneNode::Split {
                        id: *id,
                        orientation: *orientation,
                        ratio: *ratio,
                        first: first.clone(),
                        second: Box::new(new_second),
                    }
                })
            }
        }
    }

    /// Remove a leaf or subtree, promoting its sibling into the parent's place
    ///
    /// Removing the last leaf yields an empty tree. Zoom is cleared when it
    /// pointed into the removed subtree.
    pub fn removing(&self, node: NodeId) -> Result<Self, LayoutError> {
        let root = self.root.as_ref().ok_or(LayoutError::NodeNotFound(node))?;

        match Self::remove_node(root, node) {
            RemoveResult::Removed(new_root) => {
                crate::debug_info!(
                    "PANE_CLOSE",
                    "Removed {} (remaining leaves: {})",
                    node,
                    new_root.as_ref().map(PaneNode::leaf_count).unwrap_or(0)
                );
                Ok(Self::from_parts(new_root, self.zoomed, self.view_bounds))
            }
            RemoveResult::NotFound => {
                crate::debug_info!("PANE_CLOSE", "{} not found in tree", node);
                Err(LayoutError::NodeNotFound(node))
            }
        }
    }

    fn remove_node(node: &PaneNode, target: NodeId) -> RemoveResult {
        if node.id() == target {
            return RemoveResult::Removed(None);
        }
        match node {
            PaneNode::Leaf(_) => RemoveResult::NotFound,
            PaneNode::Split {
                id,
                orientation,
                ratio,
                first,
                second,
            } => match Self::remove_node(first, target) {
                // First child was the target: the second takes this split's place
                RemoveResult::Removed(None) => RemoveResult::Removed(Some((**second).clone())),
                RemoveResult::Removed(Some(new_first)) => {
                    RemoveResult::Removed(Some(PaneNode::Split {
                        id: *id,
                        orientation: *orientation,
                        ratio: *ratio,
                        first: Box::new(new_first),
                        second: second.clone(),
                    }))
                }
                RemoveResult::NotFound => match Self::remove_node(second, target) {
                    RemoveResult::Removed(None) => RemoveResult::Removed(Some((**first).clone())),
                    RemoveResult::Removed(Some(new_second)) => {
                        RemoveResult::Removed(Some(PaneNode::Split {
                            id: *id,
                            orientation: *orientation,
                            ratio: *ratio,
                            first: first.clone(),
                            second: Box::new(new_second),
                        }))
                    }
                    RemoveResult::NotFound => RemoveResult::NotFound,
                },
            },
        }
    }

    /// Substitute the subtree at `node` with a prebuilt replacement
    ///
    /// The replacement may reuse surfaces and splits from the subtree it
    /// replaces but never ones that live elsewhere in the tree, and may not
    /// hold any node twice. Its ratios are clamped into range.
    pub fn replacing(&self, node: NodeId, with: PaneNode) -> Result<Self, LayoutError> {
        let root = self.root.as_ref().ok_or(LayoutError::NodeNotFound(node))?;
        let replaced = root.find(node).ok_or(LayoutError::NodeNotFound(node))?;

        let incoming = with.node_ids();
        let mut seen = HashSet::with_capacity(incoming.len());
        if let Some(dup) = incoming.iter().find(|id| !seen.insert(**id)) {
            return Err(LayoutError::duplicate(*dup));
        }

        let kept: HashSet<NodeId> = replaced.node_ids().into_iter().collect();
        if let Some(dup) = incoming
            .iter()
            .find(|id| !kept.contains(*id) && root.contains(**id))
        {
            return Err(LayoutError::duplicate(*dup));
        }

        let new_root = Self::replace_node(root, node, &with.sanitized());
        Ok(Self::from_parts(Some(new_root), self.zoomed, self.view_bounds))
    }

    fn replace_node(node: &PaneNode, target: NodeId, with: &PaneNode) -> PaneNode {
        if node.id() == target {
            return with.clone();
        }
        match node {
            PaneNode::Leaf(_) => node.clone(),
            PaneNode::Split {
                id,
                orientation,
                ratio,
                first,
                second,
            } => PaneNode::Split {
                id: *id,
                orientation: *orientation,
                ratio: *ratio,
                first: Box::new(Self::replace_node(first, target, with)),
                second: Box::new(Self::replace_node(second, target, with)),
            },
        }
    }
}
