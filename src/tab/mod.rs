//! Tab management for per-worktree terminal workspaces
//!
//! This module provides the tab infrastructure including:
//! - `TabSession`: One open tab, identity plus its pane layout tree
//! - `TabManager`: Ordered tabs of one worktree with selection
//! - `TabId`: Unique identifier for each tab

mod manager;

pub use manager::{ClosedTab, GotoTabTarget, TabManager};

use crate::pane::PaneLayoutTree;
use crate::surface::SurfaceId;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Unique identifier for a tab within one worktree session
pub type TabId = u64;

/// Whether any task is running in a tab (or worktree)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    #[default]
    Idle,
    Running,
}

/// What the tab bar shows for a tab
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabIdentity {
    pub id: TabId,
    pub title: String,
    pub icon: Option<String>,
    /// True while any pane of the tab runs a task
    pub is_dirty: bool,
}

/// A single tab: identity plus the layout of its panes
///
/// The layout starts empty and is populated lazily by the owning session the
/// first time the tab is accessed.
#[derive(Debug)]
pub struct TabSession {
    identity: TabIdentity,
    layout: PaneLayoutTree,
    /// Surfaces whose foreground task is currently running
    running: HashSet<SurfaceId>,
    /// Text for the first surface, consumed when the layout is populated
    initial_input: Option<String>,
}

impl TabSession {
    /// Create a tab with an empty layout
    pub fn new(id: TabId, title: String, icon: Option<String>) -> Self {
        Self {
            identity: TabIdentity {
                id,
                title,
                icon,
                is_dirty: false,
            },
            layout: PaneLayoutTree::new(),
            running: HashSet::new(),
            initial_input: None,
        }
    }

    pub fn id(&self) -> TabId {
        self.identity.id
    }

    pub fn identity(&self) -> &TabIdentity {
        &self.identity
    }

    pub fn title(&self) -> &str {
        &self.identity.title
    }

    pub fn layout(&self) -> &PaneLayoutTree {
        &self.layout
    }

    /// Adopt a layout produced by a tree operation
    pub fn set_layout(&mut self, layout: PaneLayoutTree) {
        self.layout = layout;
        // Running flags only make sense for surfaces still in the layout
        let present: HashSet<SurfaceId> = self.layout.surface_ids().into_iter().collect();
        self.running.retain(|id| present.contains(id));
        self.update_dirty();
    }

    /// Whether this tab still needs its first surface
    pub fn needs_population(&self) -> bool {
        self.layout.is_empty()
    }

    /// Whether the surface is one of this tab's leaves
    pub fn owns(&self, surface: SurfaceId) -> bool {
        self.layout.node(surface).is_some()
    }

    pub fn set_initial_input(&mut self, input: Option<String>) {
        self.initial_input = input;
    }

    pub fn initial_input(&self) -> Option<&str> {
        self.initial_input.as_deref()
    }

    /// Take the pending first-surface input (one-shot)
    pub fn take_initial_input(&mut self) -> Option<String> {
        self.initial_input.take()
    }

    /// Change the title. Returns true if it actually changed.
    pub fn update_title(&mut self, title: impl Into<String>) -> bool {
        let title = title.into();
        if self.identity.title == title {
            return false;
        }
        log::debug!("Tab {} title -> {:?}", self.identity.id, title);
        self.identity.title = title;
        true
    }

    /// Recompute the dirty flag from the running set. Returns true on change.
    pub fn update_dirty(&mut self) -> bool {
        let dirty = !self.running.is_empty();
        let changed = self.identity.is_dirty != dirty;
        self.identity.is_dirty = dirty;
        changed
    }

    /// Record a surface's activity signal. Returns true if the tab's task
    /// status changed. Unknown surfaces are ignored.
    pub fn set_surface_running(&mut self, surface: SurfaceId, running: bool) -> bool {
        if !self.owns(surface) {
            return false;
        }
        if running {
            self.running.insert(surface);
        } else {
            self.running.remove(&surface);
        }
        self.update_dirty()
    }

    pub fn task_status(&self) -> TaskStatus {
        if self.identity.is_dirty {
            TaskStatus::Running
        } else {
            TaskStatus::Idle
        }
    }

    /// Release every surface, then empty the layout
    ///
    /// Returns the released ids so the caller can drop its bookkeeping.
    /// Calling this on an already torn-down tab releases nothing.
    pub fn teardown(&mut self) -> Vec<SurfaceId> {
        let mut released = Vec::new();
        for handle in self.layout.leaves() {
            handle.release();
            released.push(handle.id());
        }
        self.layout = PaneLayoutTree::new();
        self.running.clear();
        self.identity.is_dirty = false;
        self.initial_input = None;
        crate::debug_info!(
            "TAB",
            "Tore down tab {} ({} surfaces)",
            self.identity.id,
            released.len()
        );
        released
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pane::InsertDirection;
    use crate::surface::testing::test_handle;

    #[test]
    fn new_tab_is_empty_and_clean() {
        let tab = TabSession::new(1, "Terminal".into(), None);
        assert!(tab.needs_population());
        assert!(!tab.identity().is_dirty);
        assert_eq!(tab.task_status(), TaskStatus::Idle);
    }

    #[test]
    fn dirty_follows_any_running_leaf() {
        let a = test_handle();
        let b = test_handle();
        let mut tab = TabSession::new(1, "Terminal".into(), None);
        tab.set_layout(
            PaneLayoutTree::single(a.clone())
                .inserting(b.clone(), a.id(), InsertDirection::Right)
                .unwrap(),
        );

        assert!(tab.set_surface_running(a.id(), true));
        assert!(!tab.set_surface_running(b.id(), true));
        assert!(!tab.set_surface_running(a.id(), false));
        assert_eq!(tab.task_status(), TaskStatus::Running);
        assert!(tab.set_surface_running(b.id(), false));
        assert!(!tab.identity().is_dirty);

        // Surfaces from elsewhere are ignored
        assert!(!tab.set_surface_running(SurfaceId::new(), true));
    }

    #[test]
    fn removing_running_leaf_clears_dirty() {
        let a = test_handle();
        let b = test_handle();
        let mut tab = TabSession::new(1, "Terminal".into(), None);
        tab.set_layout(
            PaneLayoutTree::single(a.clone())
                .inserting(b.clone(), a.id(), InsertDirection::Right)
                .unwrap(),
        );
        tab.set_surface_running(b.id(), true);

        let without_b = tab.layout().removing(b.id().into()).unwrap();
        tab.set_layout(without_b);
        assert!(!tab.identity().is_dirty);
    }

    #[test]
    fn update_title_reports_change() {
        let mut tab = TabSession::new(1, "Terminal".into(), None);
        assert!(!tab.update_title("Terminal"));
        assert!(tab.update_title("vim"));
        assert_eq!(tab.title(), "vim");
    }

    #[test]
    fn teardown_is_idempotent() {
        let a = test_handle();
        let mut tab = TabSession::new(1, "Terminal".into(), None);
        tab.set_layout(PaneLayoutTree::single(a.clone()));

        assert_eq!(tab.teardown(), vec![a.id()]);
        assert!(tab.teardown().is_empty());
        assert!(tab.needs_population());
    }
}
