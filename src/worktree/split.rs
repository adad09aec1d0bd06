//! Split actions and drag operations on a tab's pane layout.
//!
//! Every structural failure is logged and reported as `false`; the tab keeps
//! its previous layout.

use super::WorktreeSession;
use crate::pane::{
    FocusDirection, InsertDirection, LayoutError, PaneLayoutTree, PaneNode, SpatialDirection,
    SplitId,
};
use crate::surface::SurfaceId;
use crate::tab::TabId;
use serde::{Deserialize, Serialize};

/// A split request made from inside a surface (keybinding or menu)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitAction {
    /// Open a new surface next to the requesting one
    NewSplit(InsertDirection),
    /// Move focus
    GotoSplit(FocusDirection),
    /// Move the nearest matching divider by `amount` pixels
    ResizeSplit {
        direction: SpatialDirection,
        amount: u16,
    },
    Equalize,
    ToggleZoom,
}

/// Edge of the destination pane a dragged pane was dropped on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DropZone {
    Top,
    Bottom,
    Left,
    Right,
}

impl DropZone {
    /// Side of the destination the payload is inserted on
    pub fn direction(self) -> InsertDirection {
        match self {
            DropZone::Top => SpatialDirection::Up,
            DropZone::Bottom => SpatialDirection::Down,
            DropZone::Left => SpatialDirection::Left,
            DropZone::Right => SpatialDirection::Right,
        }
    }
}

/// A pointer-driven operation on a tab's layout
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitOperation {
    /// Divider dragged: store a new ratio on a split
    Resize { split: SplitId, ratio: f32 },
    /// Pane dragged onto another pane
    Drop {
        payload: SurfaceId,
        destination: SurfaceId,
        zone: DropZone,
    },
    Equalize,
}

impl WorktreeSession {
    /// Apply a split action on behalf of `surface`
    ///
    /// Returns false when the surface is unknown or the layout refused the
    /// change.
    pub fn perform_split_action(&mut self, surface: SurfaceId, action: SplitAction) -> bool {
        let Some(tab_id) = self.tabs.tab_for_surface(surface) else {
            crate::debug_info!(
                "SPLIT",
                "Ignoring {:?}: {} is not in {}",
                action,
                surface,
                self.worktree.id
            );
            return false;
        };

        match action {
            SplitAction::NewSplit(direction) => self.new_split(tab_id, surface, direction),
            SplitAction::GotoSplit(direction) => self.goto_split(tab_id, surface, direction),
            SplitAction::ResizeSplit { direction, amount } => {
                self.update_layout(tab_id, |layout| {
                    layout.resizing(
                        surface.into(),
                        f32::from(amount),
                        direction,
                        layout.view_bounds(),
                    )
                })
            }
            SplitAction::Equalize => self.update_layout(tab_id, |layout| Ok(layout.equalized())),
            SplitAction::ToggleZoom => {
                let Some(before) = self.tabs.get_tab(tab_id).map(|t| t.layout().zoomed()) else {
                    return false;
                };
                let target = if before.is_some() {
                    None
                } else {
                    Some(surface.into())
                };
                self.update_layout(tab_id, |layout| layout.setting_zoomed(target))
                    && self.tabs.get_tab(tab_id).map(|t| t.layout().zoomed()) != Some(before)
            }
        }
    }

    /// Apply a pointer-driven operation to a tab's layout
    pub fn perform_split_operation(&mut self, tab_id: TabId, operation: SplitOperation) -> bool {
        if self.tabs.get_tab(tab_id).is_none() {
            return false;
        }

        match operation {
            SplitOperation::Resize { split, ratio } => {
                self.update_layout(tab_id, |layout| layout.setting_ratio(split, ratio))
            }
            SplitOperation::Drop {
                payload,
                destination,
                zone,
            } => self.drop_pane(tab_id, payload, destination, zone),
            SplitOperation::Equalize => {
                self.update_layout(tab_id, |layout| Ok(layout.equalized()))
            }
        }
    }

    fn new_split(&mut self, tab_id: TabId, at: SurfaceId, direction: InsertDirection) -> bool {
        let Some(handle) = self.create_surface(None) else {
            return false;
        };
        let new_id = handle.id();

        let inserted = match self.tabs.get_tab(tab_id) {
            Some(tab) => tab.layout().inserting(handle.clone(), at, direction),
            None => return false,
        };
        match inserted {
            Ok(layout) => {
                if let Some(tab) = self.tabs.get_tab_mut(tab_id) {
                    tab.set_layout(layout);
                }
                self.focused.insert(tab_id, new_id);
                self.sync_surfaces();
                self.request_focus_on_selected();
                true
            }
            Err(e) => {
                // The new surface never made it into a tree
                handle.release();
                log::warn!("Split of {} refused: {}", at, e);
                false
            }
        }
    }

    fn goto_split(&mut self, tab_id: TabId, from: SurfaceId, direction: FocusDirection) -> bool {
        let Some(layout) = self.tabs.get_tab(tab_id).map(|t| t.layout().clone()) else {
            return false;
        };
        let Some(target) = layout.focus_target(direction, from) else {
            crate::debug_log!("SPLIT", "No split {:?} of {}", direction, from);
            return false;
        };

        if layout.zoomed().is_some()
            && let Ok(unzoomed) = layout.setting_zoomed(None)
            && let Some(tab) = self.tabs.get_tab_mut(tab_id)
        {
            tab.set_layout(unzoomed);
        }

        self.set_focus(tab_id, target);
        self.request_focus_on_selected();
        true
    }

    fn drop_pane(
        &mut self,
        tab_id: TabId,
        payload: SurfaceId,
        destination: SurfaceId,
        zone: DropZone,
    ) -> bool {
        if payload == destination {
            return false;
        }
        let Some(tab) = self.tabs.get_tab(tab_id) else {
            return false;
        };
        let layout = tab.layout();
        if layout.leaf_count() < 2 || layout.node(destination).is_none() {
            return false;
        }
        let Some(handle) = layout.node(payload).and_then(PaneNode::as_surface).cloned() else {
            return false;
        };

        // The payload handle moves; it is not released
        let moved = layout
            .removing(payload.into())
            .and_then(|without| without.inserting(handle, destination, zone.direction()));
        match moved {
            Ok(new_layout) => {
                if let Some(tab) = self.tabs.get_tab_mut(tab_id) {
                    tab.set_layout(new_layout);
                }
                self.set_focus(tab_id, payload);
                true
            }
            Err(e) => {
                log::warn!("Drop of {} onto {} refused: {}", payload, destination, e);
                false
            }
        }
    }

    /// Run a tree operation on a tab and adopt the result
    fn update_layout(
        &mut self,
        tab_id: TabId,
        op: impl FnOnce(&PaneLayoutTree) -> Result<PaneLayoutTree, LayoutError>,
    ) -> bool {
        let Some(tab) = self.tabs.get_tab_mut(tab_id) else {
            return false;
        };
        match op(tab.layout()) {
            Ok(layout) => {
                tab.set_layout(layout);
                self.sync_surfaces();
                true
            }
            Err(e) => {
                log::warn!("Layout change on tab {} refused: {}", tab_id, e);
                crate::debug_info!("SPLIT", "Tab {} layout unchanged: {}", tab_id, e);
                false
            }
        }
    }
}
