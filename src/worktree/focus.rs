//! Focus tracking and occlusion/visibility sync for WorktreeSession
//!
//! Exactly one surface is focused per populated tab. The surface flags pushed
//! to the engine are derived from three inputs: whether this session is the
//! selected worktree, the OS window state, and the selected tab (and its zoom).

use super::{SessionEvent, WindowState, WorktreeSession};
use crate::surface::{SurfaceHandle, SurfaceId};
use crate::tab::TabId;
use std::collections::HashSet;

impl WorktreeSession {
    /// Focused surface of the selected tab
    pub fn focused_surface(&self) -> Option<SurfaceId> {
        self.tabs
            .selected_tab_id()
            .and_then(|tab| self.focused_surface_in(tab))
    }

    /// Focused surface of a tab: the last one focused, or its leftmost leaf
    pub fn focused_surface_in(&self, tab: TabId) -> Option<SurfaceId> {
        let session = self.tabs.get_tab(tab)?;
        self.focused
            .get(&tab)
            .copied()
            .filter(|s| session.owns(*s))
            .or_else(|| session.layout().leftmost_leaf().map(SurfaceHandle::id))
    }

    /// Focus a surface, selecting its tab, and ask the engine to focus it
    pub fn focus_surface(&mut self, surface: SurfaceId) -> bool {
        let Some(tab) = self.tabs.tab_for_surface(surface) else {
            return false;
        };
        self.set_focus(tab, surface);
        self.request_focus_on_selected();
        true
    }

    /// Mark this session as the selected worktree (or not)
    pub fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
        if selected {
            self.has_unseen_notification = false;
            if let Some(tab) = self.tabs.selected_tab_id() {
                self.populate(tab);
            }
        }
        crate::debug_info!(
            "SESSION",
            "{} selected={}",
            self.worktree.id,
            selected
        );
        self.sync_surfaces();
    }

    /// Record the OS window state and re-derive surface flags
    pub fn apply_window_state(&mut self, window: WindowState) {
        self.window = window;
        self.sync_surfaces();
    }

    /// Record user-driven focus (already applied on the engine side)
    pub(super) fn set_focus(&mut self, tab: TabId, surface: SurfaceId) {
        self.focused.insert(tab, surface);
        if self.tabs.selected_tab_id() != Some(tab) {
            self.tabs.select(tab);
        }
        if self.notifications.mark_surface_read(surface) > 0
            && self.notifications.unread_count() == 0
        {
            self.has_unseen_notification = false;
        }
        self.sync_surfaces();
    }

    /// Ask the engine to move keyboard focus, if this session is on screen
    pub(super) fn request_focus_on_selected(&self) {
        if !(self.selected && self.window.focused) {
            return;
        }
        if let Some(surface) = self.focused_surface()
            && let Some(handle) = self.handle_for(surface)
        {
            handle.surface().request_focus();
        }
    }

    pub(super) fn handle_for(&self, surface: SurfaceId) -> Option<&SurfaceHandle> {
        let tab = self.tabs.tab_for_surface(surface)?;
        self.tabs
            .get_tab(tab)?
            .layout()
            .node(surface)?
            .as_surface()
    }

    /// Repair the focus map, push occluded/focused flags to every surface and
    /// report a focus change if there was one
    pub(super) fn sync_surfaces(&mut self) {
        let tab_ids: Vec<TabId> = self.tabs.tabs().iter().map(|t| t.id()).collect();
        self.focused.retain(|tab, _| tab_ids.contains(tab));
        for tab in tab_ids {
            match self.focused_surface_in(tab) {
                Some(surface) => {
                    self.focused.insert(tab, surface);
                }
                None => {
                    self.focused.remove(&tab);
                }
            }
        }

        let current = self.focused_surface();
        let selected_tab = self.tabs.selected_tab_id();
        let on_screen = self.selected && self.window.visible;
        let has_focus = self.selected && self.window.focused;

        for tab in self.tabs.tabs() {
            let layout = tab.layout();
            let shown: Option<HashSet<SurfaceId>> = layout
                .zoomed()
                .and_then(|z| layout.find(z))
                .map(|node| node.surface_ids().into_iter().collect());
            let tab_visible = on_screen && Some(tab.id()) == selected_tab;

            for handle in layout.leaves() {
                let visible =
                    tab_visible && shown.as_ref().is_none_or(|ids| ids.contains(&handle.id()));
                handle.surface().set_occluded(!visible);
                handle
                    .surface()
                    .set_focused(has_focus && Some(handle.id()) == current);
            }
        }

        if current != self.last_reported_focus {
            self.last_reported_focus = current;
            if let Some(surface) = current {
                crate::debug_log!("FOCUS", "{} focus -> {}", self.worktree.id, surface);
                self.emit(SessionEvent::FocusChanged { surface });
            }
        }
    }
}
