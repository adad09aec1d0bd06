//! Applying engine callbacks to a WorktreeSession.
//!
//! Callbacks are queued by the engine from its own threads and applied here,
//! on the session's sequential context. A callback whose surface has been
//! closed in the meantime is dropped.

use super::{SessionEvent, WorktreeSession};
use crate::surface::EngineEvent;

impl WorktreeSession {
    /// Apply every queued engine callback. Returns how many were applied.
    pub fn drain_engine_events(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.events_rx.try_recv() {
            if self.handle_engine_event(event) {
                applied += 1;
            }
        }
        applied
    }

    /// Apply one callback. Returns false if it referenced a dead surface.
    pub fn handle_engine_event(&mut self, event: EngineEvent) -> bool {
        let surface = event.surface();
        let Some(tab_id) = self.tabs.tab_for_surface(surface) else {
            crate::debug_trace!(
                "ENGINE",
                "{} dropped stale {:?}",
                self.worktree.id,
                event
            );
            return false;
        };
        crate::debug_trace!("ENGINE", "{} applying {:?}", self.worktree.id, event);

        match event {
            EngineEvent::TitleChanged { title, .. } => {
                if let Some(tab) = self.tabs.get_tab_mut(tab_id) {
                    tab.update_title(title);
                }
            }
            EngineEvent::ActivityChanged { running, .. } => {
                let changed = self
                    .tabs
                    .get_tab_mut(tab_id)
                    .is_some_and(|tab| tab.set_surface_running(surface, running));
                if changed {
                    self.refresh_task_status();
                    if !running {
                        self.settle_run_script(tab_id);
                    }
                }
            }
            EngineEvent::DesktopNotification { title, body, .. } => {
                self.receive_notification(surface, title, body);
            }
            EngineEvent::SplitRequested { action, .. } => {
                self.perform_split_action(surface, action);
            }
            EngineEvent::GotoTabRequested { target, .. } => {
                self.handle_goto_tab_request(target);
            }
            EngineEvent::CloseRequested { .. } => {
                self.close_surface(surface);
            }
            EngineEvent::FocusGained { .. } => {
                self.set_focus(tab_id, surface);
            }
            EngineEvent::CommandPaletteToggleRequested { .. } => {
                self.emit(SessionEvent::CommandPaletteToggleRequested);
            }
            EngineEvent::SearchTotal { total, .. } => {
                self.search.total = total;
            }
            EngineEvent::SearchSelected { selected, .. } => {
                self.search.selected = selected;
            }
        }
        true
    }
}
