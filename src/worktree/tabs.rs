//! Tab lifecycle for WorktreeSession.
//!
//! Creating, selecting, reordering and closing tabs, lazily populating a
//! tab's first surface, the dedicated run-script tab, and full teardown.

use super::{SessionEvent, WorktreeSession};
use crate::pane::{PaneBounds, PaneLayoutTree};
use crate::surface::{SurfaceHandle, SurfaceId, SurfaceRequest};
use crate::tab::{ClosedTab, GotoTabTarget, TabId, TaskStatus};

/// Ctrl-C, typed into the run tab to stop its script
const INTERRUPT: &str = "\u{3}";

impl WorktreeSession {
    /// Open a tab with the default title and icon and select it
    ///
    /// Returns None if the engine could not create the tab's first surface;
    /// no tab is left behind in that case.
    pub fn create_tab(&mut self, run_setup_script_if_new: bool) -> Option<TabId> {
        let title = self.config.default_tab_title.clone();
        let icon = self.config.default_tab_icon.clone();
        self.open_tab(title, icon, None, run_setup_script_if_new)
    }

    /// Like [`create_tab`](Self::create_tab), typing `input` into the first surface
    pub fn create_tab_with_input(
        &mut self,
        input: impl Into<String>,
        run_setup_script_if_new: bool,
    ) -> Option<TabId> {
        let title = self.config.default_tab_title.clone();
        let icon = self.config.default_tab_icon.clone();
        self.open_tab(title, icon, Some(input.into()), run_setup_script_if_new)
    }

    /// Make sure the session shows a populated tab, creating one if needed
    pub fn ensure_initial_tab(
        &mut self,
        run_setup_script_if_new: bool,
        focusing: bool,
    ) -> Option<TabId> {
        let tab = match self.tabs.selected_tab_id() {
            Some(tab) => {
                self.populate(tab)?;
                self.sync_surfaces();
                tab
            }
            None => self.create_tab(run_setup_script_if_new)?,
        };
        if focusing {
            self.request_focus_on_selected();
        }
        Some(tab)
    }

    /// Select a tab, populating it if this is its first access
    pub fn select_tab(&mut self, tab: TabId) -> bool {
        if !self.tabs.select(tab) {
            return false;
        }
        self.populate(tab);
        self.sync_surfaces();
        self.request_focus_on_selected();
        true
    }

    /// Resolve a relative or 1-based absolute target and select it
    pub fn handle_goto_tab_request(&mut self, target: GotoTabTarget) -> bool {
        match self.tabs.resolve(target) {
            Some(tab) => self.select_tab(tab),
            None => false,
        }
    }

    /// Reorder tabs; see [`TabManager::reorder_tabs`](crate::tab::TabManager::reorder_tabs)
    pub fn reorder_tabs(&mut self, new_order: &[TabId]) {
        self.tabs.reorder_tabs(new_order);
        self.sync_surfaces();
    }

    /// Move one tab to `index` (drag reordering)
    pub fn move_tab_to_index(&mut self, tab: TabId, index: usize) -> bool {
        if !self.tabs.move_tab_to_index(tab, index) {
            return false;
        }
        crate::debug_info!("TAB", "Moved tab {} to index {}", tab, index);
        self.sync_surfaces();
        true
    }

    /// Record the pixel area of a tab's content, used for resizing and
    /// spatial navigation
    pub fn set_view_bounds(&mut self, tab: TabId, bounds: PaneBounds) -> bool {
        match self.tabs.get_tab_mut(tab) {
            Some(session) => {
                let layout = session.layout().with_view_bounds(bounds);
                session.set_layout(layout);
                true
            }
            None => false,
        }
    }

    pub fn close_focused_tab(&mut self) -> bool {
        match self.tabs.selected_tab_id() {
            Some(tab) => self.close_tab(tab),
            None => false,
        }
    }

    /// Close a tab after tearing down all of its surfaces
    pub fn close_tab(&mut self, tab: TabId) -> bool {
        let Some(closed) = self.tabs.close_tab(tab) else {
            return false;
        };
        self.forget_closed_tab(closed);

        // The newly selected tab may never have been shown
        if let Some(selected) = self.tabs.selected_tab_id() {
            self.populate(selected);
        }
        self.refresh_task_status();
        self.sync_surfaces();
        true
    }

    pub fn close_focused_surface(&mut self) -> bool {
        match self.focused_surface() {
            Some(surface) => self.close_surface(surface),
            None => false,
        }
    }

    /// Tear down one surface, closing its tab if it was the last leaf
    ///
    /// Returns false if the surface is already gone.
    pub fn close_surface(&mut self, surface: SurfaceId) -> bool {
        let Some(tab_id) = self.tabs.tab_for_surface(surface) else {
            return false;
        };
        let Some(tab) = self.tabs.get_tab_mut(tab_id) else {
            return false;
        };
        if tab.layout().leaf_count() <= 1 {
            return self.close_tab(tab_id);
        }

        let removed = match tab.layout().removing(surface.into()) {
            Ok(layout) => layout,
            Err(e) => {
                log::warn!("Cannot close {}: {}", surface, e);
                return false;
            }
        };
        // Engine resource first, bookkeeping second
        if let Some(handle) = tab.layout().node(surface).and_then(|n| n.as_surface()) {
            handle.release();
        }
        tab.set_layout(removed);

        self.notifications.detach_surface(surface);
        if self.focused.get(&tab_id) == Some(&surface) {
            self.focused.remove(&tab_id);
        }
        crate::debug_info!("PANE_CLOSE", "Closed {} in tab {}", surface, tab_id);

        self.refresh_task_status();
        self.settle_run_script(tab_id);
        self.sync_surfaces();
        self.request_focus_on_selected();
        true
    }

    /// Open (or replace) the dedicated run tab with `script` as its input
    pub fn run_script(&mut self, script: impl Into<String>) -> bool {
        if let Some(previous) = self.run_tab {
            self.close_tab(previous);
        }

        let title = self.config.run_script_tab_title.clone();
        let icon = Some(self.config.run_script_tab_icon.clone());
        let Some(tab) = self.open_tab(title, icon, Some(script.into()), false) else {
            return false;
        };

        self.run_tab = Some(tab);
        self.run_script_running = true;
        log::info!("Run script started in tab {} of {}", tab, self.worktree.id);
        self.emit(SessionEvent::RunScriptStatusChanged { running: true });
        true
    }

    /// Interrupt the script in the run tab
    ///
    /// The tab stays open. The script is reported stopped once its surface
    /// goes idle or the tab closes. Returns false if no script is running.
    pub fn stop_run_script(&mut self) -> bool {
        if !self.run_script_running {
            return false;
        }
        let Some(surface) = self.run_tab.and_then(|tab| self.focused_surface_in(tab)) else {
            return false;
        };
        let Some(handle) = self.handle_for(surface) else {
            return false;
        };
        log::info!("Interrupting run script of {} in {}", self.worktree.id, surface);
        handle.surface().send_text(INTERRUPT);
        true
    }

    /// Report the run script stopped once every surface of its tab is idle
    pub(super) fn settle_run_script(&mut self, tab_id: TabId) {
        if !self.run_script_running || self.run_tab != Some(tab_id) {
            return;
        }
        let idle = self
            .tabs
            .get_tab(tab_id)
            .is_some_and(|tab| tab.task_status() == TaskStatus::Idle);
        if idle {
            self.run_script_running = false;
            log::info!("Run script of {} finished", self.worktree.id);
            self.emit(SessionEvent::RunScriptStatusChanged { running: false });
        }
    }

    /// Close every tab. Safe to call more than once.
    pub fn teardown_all(&mut self) {
        let closed = self.tabs.close_all();
        if closed.is_empty() {
            return;
        }
        log::info!(
            "Tearing down {} tabs of worktree {}",
            closed.len(),
            self.worktree.id
        );
        for tab in closed {
            self.forget_closed_tab(tab);
        }
        self.last_reported_focus = None;
        self.search = Default::default();
        self.refresh_task_status();
    }

    fn open_tab(
        &mut self,
        title: String,
        icon: Option<String>,
        input: Option<String>,
        run_setup_script_if_new: bool,
    ) -> Option<TabId> {
        let previous = self.tabs.selected_tab_id();
        let id = self.tabs.create_tab(title, icon);
        if let Some(tab) = self.tabs.get_tab_mut(id) {
            tab.set_initial_input(input);
        }
        if run_setup_script_if_new && !self.setup_consumed && self.setup_pending_tab.is_none() {
            self.setup_pending_tab = Some(id);
        }

        if self.populate(id).is_none() {
            // Never shown, so no TabCreated/TabClosed pair
            self.tabs.close_tab(id);
            if let Some(previous) = previous {
                self.tabs.select(previous);
            }
            if self.setup_pending_tab == Some(id) {
                self.setup_pending_tab = None;
            }
            self.sync_surfaces();
            return None;
        }

        self.emit(SessionEvent::TabCreated { tab: id });
        self.sync_surfaces();
        self.request_focus_on_selected();
        Some(id)
    }

    /// Give an empty tab its first surface; returns the tab's focused surface
    pub(super) fn populate(&mut self, tab_id: TabId) -> Option<SurfaceId> {
        let tab = self.tabs.get_tab(tab_id)?;
        if !tab.needs_population() {
            return self.focused_surface_in(tab_id);
        }

        let setup = if !self.setup_consumed && self.setup_pending_tab == Some(tab_id) {
            self.worktree.setup_script.clone()
        } else {
            None
        };
        let input = compose_input(&[setup.as_deref(), tab.initial_input()]);

        let handle = self.create_surface(input)?;
        let surface = handle.id();

        self.setup_consumed = true;
        self.setup_pending_tab = None;
        if let Some(tab) = self.tabs.get_tab_mut(tab_id) {
            tab.take_initial_input();
            tab.set_layout(PaneLayoutTree::single(handle));
        }
        self.focused.insert(tab_id, surface);

        if setup.is_some() {
            log::info!("Setup script sent to first surface of {}", self.worktree.id);
            self.emit(SessionEvent::SetupScriptConsumed);
        }
        Some(surface)
    }

    /// Ask the engine for a surface in this worktree's directory
    pub(super) fn create_surface(&self, initial_input: Option<String>) -> Option<SurfaceHandle> {
        let id = SurfaceId::new();
        let request = SurfaceRequest {
            id,
            working_directory: self.worktree.working_directory.clone(),
            initial_input,
            events: self.events_tx.clone(),
        };
        match self.engine.create_surface(request) {
            Ok(surface) => {
                crate::debug_info!("SURFACE", "Created {} for {}", id, self.worktree.id);
                Some(SurfaceHandle::new(id, surface))
            }
            Err(e) => {
                log::error!(
                    "Failed to create surface for worktree {}: {:#}",
                    self.worktree.id,
                    e
                );
                crate::debug_error!("SURFACE", "create_surface failed: {:#}", e);
                None
            }
        }
    }

    /// Drop every reference to a closed tab and its released surfaces
    fn forget_closed_tab(&mut self, closed: ClosedTab) {
        let tab = closed.identity.id;
        for surface in &closed.released {
            self.notifications.detach_surface(*surface);
        }
        self.focused.remove(&tab);
        if self.setup_pending_tab == Some(tab) {
            self.setup_pending_tab = None;
        }
        self.emit(SessionEvent::TabClosed { tab });

        if self.run_tab == Some(tab) {
            self.run_tab = None;
            log::info!("Run script tab {} of {} closed", tab, self.worktree.id);
            if std::mem::take(&mut self.run_script_running) {
                self.emit(SessionEvent::RunScriptStatusChanged { running: false });
            }
        }
    }
}

/// Join pieces of shell input, each terminated by a newline
fn compose_input(parts: &[Option<&str>]) -> Option<String> {
    let mut out = String::new();
    for part in parts.iter().flatten().filter(|p| !p.is_empty()) {
        out.push_str(part);
        if !part.ends_with('\n') {
            out.push('\n');
        }
    }
    (!out.is_empty()).then_some(out)
}

#[cfg(test)]
mod tests {
    use super::compose_input;

    #[test]
    fn compose_input_terminates_each_part() {
        assert_eq!(compose_input(&[None, None]), None);
        assert_eq!(compose_input(&[Some(""), None]), None);
        assert_eq!(
            compose_input(&[Some("make setup"), Some("cargo run\n")]),
            Some("make setup\ncargo run\n".to_string())
        );
    }
}
