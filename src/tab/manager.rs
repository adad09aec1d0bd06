//! Tab manager for the ordered tabs of one worktree session

use super::{TabId, TabIdentity, TabSession};
use crate::surface::SurfaceId;
use serde::{Deserialize, Serialize};

/// Target of a goto-tab request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GotoTabTarget {
    /// Previous tab (wraps around)
    Previous,
    /// Next tab (wraps around)
    Next,
    /// Last tab
    Last,
    /// 1-based position, clamped to the tab count
    Index(usize),
}

/// A tab that was closed, with the surfaces released while closing it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClosedTab {
    pub identity: TabIdentity,
    pub released: Vec<SurfaceId>,
}

/// Manages the ordered tabs of one worktree
#[derive(Debug)]
pub struct TabManager {
    /// All tabs, in order
    tabs: Vec<TabSession>,
    /// Currently selected tab ID
    selected_tab_id: Option<TabId>,
    /// Counter for generating unique tab IDs
    next_tab_id: TabId,
}

impl TabManager {
    /// Create a new empty tab manager
    pub fn new() -> Self {
        Self {
            tabs: Vec::new(),
            selected_tab_id: None,
            next_tab_id: 1,
        }
    }

    /// Append a tab with an empty layout, select it and return its ID
    pub fn create_tab(&mut self, title: String, icon: Option<String>) -> TabId {
        let id = self.next_tab_id;
        self.next_tab_id += 1;

        self.tabs.push(TabSession::new(id, title, icon));

        // Always switch to the new tab
        self.selected_tab_id = Some(id);

        log::info!("Created new tab {} (total: {})", id, self.tabs.len());

        id
    }

    /// Close a tab by ID, tearing down its surfaces first
    ///
    /// Returns None if the tab does not exist (already closed).
    pub fn close_tab(&mut self, id: TabId) -> Option<ClosedTab> {
        let idx = self.tabs.iter().position(|t| t.id() == id)?;

        log::info!("Closing tab {} (index {})", id, idx);

        // Surfaces go before the identity does
        let released = self.tabs[idx].teardown();
        let tab = self.tabs.remove(idx);

        // If we closed the selected tab, switch to another
        if self.selected_tab_id == Some(id) {
            self.selected_tab_id = if self.tabs.is_empty() {
                None
            } else {
                // Prefer the tab at the same index (or previous if at end)
                let new_idx = idx.min(self.tabs.len().saturating_sub(1));
                Some(self.tabs[new_idx].id())
            };
        }

        Some(ClosedTab {
            identity: tab.identity().clone(),
            released,
        })
    }

    /// Close every tab, in order
    pub fn close_all(&mut self) -> Vec<ClosedTab> {
        let ids: Vec<TabId> = self.tabs.iter().map(TabSession::id).collect();
        ids.into_iter().filter_map(|id| self.close_tab(id)).collect()
    }

    /// Reorder tabs to follow `new_order`
    ///
    /// Unknown ids are ignored; tabs missing from `new_order` keep their
    /// relative order after the listed ones. Selection is left alone.
    pub fn reorder_tabs(&mut self, new_order: &[TabId]) {
        let mut remaining = std::mem::take(&mut self.tabs);
        let mut ordered = Vec::with_capacity(remaining.len());
        for id in new_order {
            if let Some(pos) = remaining.iter().position(|t| t.id() == *id) {
                ordered.push(remaining.remove(pos));
            }
        }
        ordered.append(&mut remaining);
        self.tabs = ordered;

        if let Some(selected) = self.selected_tab_id
            && !self.tabs.iter().any(|t| t.id() == selected)
        {
            self.selected_tab_id = self.tabs.first().map(TabSession::id);
        }

        log::debug!(
            "Reordered tabs: {:?}",
            self.tabs.iter().map(TabSession::id).collect::<Vec<_>>()
        );
    }

    /// Move a tab to a specific index (used by drag-and-drop reordering)
    /// Returns true if the tab was actually moved, false if not found or already at target
    pub fn move_tab_to_index(&mut self, id: TabId, target_index: usize) -> bool {
        let current_idx = match self.tabs.iter().position(|t| t.id() == id) {
            Some(idx) => idx,
            None => return false,
        };

        let clamped_target = target_index.min(self.tabs.len().saturating_sub(1));
        if clamped_target == current_idx {
            return false;
        }

        let tab = self.tabs.remove(current_idx);
        self.tabs.insert(clamped_target, tab);
        log::debug!(
            "Moved tab {} from index {} to {}",
            id,
            current_idx,
            clamped_target
        );
        true
    }

    /// Select a tab by ID. Returns false if it does not exist.
    pub fn select(&mut self, id: TabId) -> bool {
        if !self.tabs.iter().any(|t| t.id() == id) {
            return false;
        }
        self.selected_tab_id = Some(id);
        log::debug!("Switched to tab {}", id);
        true
    }

    /// Resolve a goto target against the current order and selection
    pub fn resolve(&self, target: GotoTabTarget) -> Option<TabId> {
        if self.tabs.is_empty() {
            return None;
        }
        let len = self.tabs.len();
        let current_idx = self.selected_index().unwrap_or(0);
        let idx = match target {
            GotoTabTarget::Previous => {
                if current_idx == 0 {
                    len - 1
                } else {
                    current_idx - 1
                }
            }
            GotoTabTarget::Next => (current_idx + 1) % len,
            GotoTabTarget::Last => len - 1,
            GotoTabTarget::Index(n) => n.clamp(1, len) - 1,
        };
        Some(self.tabs[idx].id())
    }

    /// Get the number of tabs
    pub fn tab_count(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    /// Get the selected tab ID
    pub fn selected_tab_id(&self) -> Option<TabId> {
        self.selected_tab_id
    }

    /// Get index of selected tab (0-based)
    pub fn selected_index(&self) -> Option<usize> {
        self.selected_tab_id
            .and_then(|id| self.tabs.iter().position(|t| t.id() == id))
    }

    /// Get a reference to the selected tab
    pub fn selected_tab(&self) -> Option<&TabSession> {
        self.selected_tab_id.and_then(|id| self.get_tab(id))
    }

    /// Get all tabs as a slice
    pub fn tabs(&self) -> &[TabSession] {
        &self.tabs
    }

    /// Get a tab by ID
    pub fn get_tab(&self, id: TabId) -> Option<&TabSession> {
        self.tabs.iter().find(|t| t.id() == id)
    }

    /// Get a mutable reference to a tab by ID
    pub fn get_tab_mut(&mut self, id: TabId) -> Option<&mut TabSession> {
        self.tabs.iter_mut().find(|t| t.id() == id)
    }

    /// Tab whose layout holds the given surface
    pub fn tab_for_surface(&self, surface: SurfaceId) -> Option<TabId> {
        self.tabs
            .iter()
            .find(|t| t.owns(surface))
            .map(TabSession::id)
    }
}

impl Default for TabManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pane::PaneLayoutTree;
    use crate::surface::testing::{RecordingSurface, test_handle};
    use crate::surface::SurfaceHandle;
    use std::sync::Arc;

    fn manager_with_tabs(count: usize) -> TabManager {
        let mut mgr = TabManager::new();
        for n in 0..count {
            mgr.create_tab(format!("Tab {}", n + 1), None);
        }
        mgr
    }

    fn ids(mgr: &TabManager) -> Vec<TabId> {
        mgr.tabs().iter().map(TabSession::id).collect()
    }

    #[test]
    fn create_tab_selects_and_numbers_uniquely() {
        let mut mgr = manager_with_tabs(2);
        assert_eq!(ids(&mgr), vec![1, 2]);
        assert_eq!(mgr.selected_tab_id(), Some(2));

        mgr.close_tab(2);
        assert_eq!(mgr.create_tab("again".into(), None), 3);
    }

    #[test]
    fn move_tab_to_index_forward() {
        let mut mgr = manager_with_tabs(4);
        // Move tab 1 from index 0 to index 2
        assert!(mgr.move_tab_to_index(1, 2));
        assert_eq!(ids(&mgr), vec![2, 3, 1, 4]);
    }

    #[test]
    fn move_tab_to_index_backward() {
        let mut mgr = manager_with_tabs(4);
        assert!(mgr.move_tab_to_index(3, 0));
        assert_eq!(ids(&mgr), vec![3, 1, 2, 4]);
    }

    #[test]
    fn move_tab_to_index_same_position() {
        let mut mgr = manager_with_tabs(3);
        // Moving to same position is a no-op
        assert!(!mgr.move_tab_to_index(2, 1));
        assert_eq!(ids(&mgr), vec![1, 2, 3]);
    }

    #[test]
    fn move_tab_to_index_out_of_bounds_clamped() {
        let mut mgr = manager_with_tabs(3);
        // Target index 100 should clamp to last position (2)
        assert!(mgr.move_tab_to_index(1, 100));
        assert_eq!(ids(&mgr), vec![2, 3, 1]);
    }

    #[test]
    fn move_tab_to_index_invalid_id() {
        let mut mgr = manager_with_tabs(3);
        assert!(!mgr.move_tab_to_index(99, 0));
        assert_eq!(ids(&mgr), vec![1, 2, 3]);
    }

    #[test]
    fn close_selected_prefers_same_index_then_previous() {
        let mut mgr = manager_with_tabs(3);
        mgr.select(2);
        mgr.close_tab(2);
        assert_eq!(mgr.selected_tab_id(), Some(3));

        mgr.close_tab(3);
        assert_eq!(mgr.selected_tab_id(), Some(1));

        mgr.close_tab(1);
        assert_eq!(mgr.selected_tab_id(), None);
    }

    #[test]
    fn close_tab_tears_down_surfaces_once() {
        let surface = Arc::new(RecordingSurface::default());
        let handle = SurfaceHandle::new(SurfaceId::new(), surface.clone());
        let mut mgr = manager_with_tabs(1);
        mgr.get_tab_mut(1)
            .unwrap()
            .set_layout(PaneLayoutTree::single(handle.clone()));

        let closed = mgr.close_tab(1).unwrap();
        assert_eq!(closed.released, vec![handle.id()]);
        assert_eq!(surface.close_count(), 1);

        assert!(mgr.close_tab(1).is_none());
        assert_eq!(surface.close_count(), 1);
    }

    #[test]
    fn close_all_empties_manager() {
        let mut mgr = manager_with_tabs(3);
        let closed = mgr.close_all();
        assert_eq!(
            closed.iter().map(|c| c.identity.id).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        assert!(mgr.is_empty());
        assert_eq!(mgr.selected_tab_id(), None);
    }

    #[test]
    fn reorder_ignores_unknown_and_appends_missing() {
        let mut mgr = manager_with_tabs(4);
        mgr.select(2);
        mgr.reorder_tabs(&[3, 99, 1]);
        assert_eq!(ids(&mgr), vec![3, 1, 2, 4]);
        assert_eq!(mgr.selected_tab_id(), Some(2));
    }

    #[test]
    fn resolve_goto_targets() {
        let mut mgr = manager_with_tabs(3);
        mgr.select(1);
        assert_eq!(mgr.resolve(GotoTabTarget::Previous), Some(3));
        assert_eq!(mgr.resolve(GotoTabTarget::Next), Some(2));
        assert_eq!(mgr.resolve(GotoTabTarget::Last), Some(3));
        assert_eq!(mgr.resolve(GotoTabTarget::Index(2)), Some(2));
        assert_eq!(mgr.resolve(GotoTabTarget::Index(0)), Some(1));
        assert_eq!(mgr.resolve(GotoTabTarget::Index(42)), Some(3));

        assert_eq!(TabManager::new().resolve(GotoTabTarget::Next), None);
    }

    #[test]
    fn tab_for_surface_finds_owner() {
        let handle = test_handle();
        let mut mgr = manager_with_tabs(2);
        mgr.get_tab_mut(2)
            .unwrap()
            .set_layout(PaneLayoutTree::single(handle.clone()));
        assert_eq!(mgr.tab_for_surface(handle.id()), Some(2));
        assert_eq!(mgr.tab_for_surface(SurfaceId::new()), None);
    }
}
