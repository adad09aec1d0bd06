//! Commands accepted by the registry.

use super::SessionRegistry;
use crate::pane::PaneBounds;
use crate::surface::SurfaceId;
use crate::tab::{GotoTabTarget, TabId};
use crate::worktree::{NotificationId, SplitAction, SplitOperation, WindowState, Worktree, WorktreeId};
use std::collections::HashSet;

/// A request from the host UI
///
/// Worktree-scoped commands carry the full descriptor so an unknown worktree
/// can get its session created on the spot.
#[derive(Debug, Clone, PartialEq)]
pub enum MuxCommand {
    CreateTab {
        worktree: Worktree,
        run_setup_script_if_new: bool,
    },
    CreateTabWithInput {
        worktree: Worktree,
        input: String,
        run_setup_script_if_new: bool,
    },
    EnsureInitialTab {
        worktree: Worktree,
        run_setup_script_if_new: bool,
        focusing: bool,
    },
    RunScript {
        worktree: Worktree,
        script: String,
    },
    StopRunScript {
        worktree: Worktree,
    },
    CloseFocusedTab {
        worktree: Worktree,
    },
    CloseFocusedSurface {
        worktree: Worktree,
    },
    StartSearch {
        worktree: Worktree,
        needle: Option<String>,
    },
    SearchSelection {
        worktree: Worktree,
    },
    NavigateSearchNext {
        worktree: Worktree,
    },
    NavigateSearchPrevious {
        worktree: Worktree,
    },
    EndSearch {
        worktree: Worktree,
    },
    PerformSplitAction {
        worktree: Worktree,
        surface: SurfaceId,
        action: SplitAction,
    },
    PerformSplitOperation {
        worktree: Worktree,
        tab: TabId,
        operation: SplitOperation,
    },
    GotoTab {
        worktree: Worktree,
        target: GotoTabTarget,
    },
    SelectTab {
        worktree: Worktree,
        tab: TabId,
    },
    ReorderTabs {
        worktree: Worktree,
        order: Vec<TabId>,
    },
    MoveTab {
        worktree: Worktree,
        tab: TabId,
        index: usize,
    },
    FocusSurface {
        worktree: Worktree,
        surface: SurfaceId,
    },
    SetViewBounds {
        worktree: Worktree,
        tab: TabId,
        bounds: PaneBounds,
    },
    MarkNotificationRead {
        worktree: Worktree,
        notification: NotificationId,
    },
    MarkAllNotificationsRead {
        worktree: Worktree,
    },
    DismissNotification {
        worktree: Worktree,
        notification: NotificationId,
    },
    Prune {
        keeping: HashSet<WorktreeId>,
    },
    SetNotificationsEnabled(bool),
    SetSelectedWorktree(Option<WorktreeId>),
    SetWindowState(WindowState),
}

impl SessionRegistry {
    /// Apply one command and publish what it caused
    ///
    /// Returns false when the command was a no-op or failed; failures are
    /// logged, never propagated.
    pub fn handle(&mut self, command: MuxCommand) -> bool {
        crate::debug_log!("COMMAND", "{:?}", command);

        let ok = match command {
            MuxCommand::CreateTab {
                worktree,
                run_setup_script_if_new,
            } => self
                .session_mut(&worktree)
                .create_tab(run_setup_script_if_new)
                .is_some(),
            MuxCommand::CreateTabWithInput {
                worktree,
                input,
                run_setup_script_if_new,
            } => self
                .session_mut(&worktree)
                .create_tab_with_input(input, run_setup_script_if_new)
                .is_some(),
            MuxCommand::EnsureInitialTab {
                worktree,
                run_setup_script_if_new,
                focusing,
            } => self
                .session_mut(&worktree)
                .ensure_initial_tab(run_setup_script_if_new, focusing)
                .is_some(),
            MuxCommand::RunScript { worktree, script } => {
                self.session_mut(&worktree).run_script(script)
            }
            MuxCommand::StopRunScript { worktree } => self.session_mut(&worktree).stop_run_script(),
            MuxCommand::CloseFocusedTab { worktree } => {
                self.session_mut(&worktree).close_focused_tab()
            }
            MuxCommand::CloseFocusedSurface { worktree } => {
                self.session_mut(&worktree).close_focused_surface()
            }
            MuxCommand::StartSearch { worktree, needle } => {
                self.session_mut(&worktree).start_search(needle)
            }
            MuxCommand::SearchSelection { worktree } => {
                self.session_mut(&worktree).search_selection()
            }
            MuxCommand::NavigateSearchNext { worktree } => {
                self.session_mut(&worktree).navigate_search_next()
            }
            MuxCommand::NavigateSearchPrevious { worktree } => {
                self.session_mut(&worktree).navigate_search_previous()
            }
            MuxCommand::EndSearch { worktree } => self.session_mut(&worktree).end_search(),
            MuxCommand::PerformSplitAction {
                worktree,
                surface,
                action,
            } => self
                .session_mut(&worktree)
                .perform_split_action(surface, action),
            MuxCommand::PerformSplitOperation {
                worktree,
                tab,
                operation,
            } => self
                .session_mut(&worktree)
                .perform_split_operation(tab, operation),
            MuxCommand::GotoTab { worktree, target } => {
                self.session_mut(&worktree).handle_goto_tab_request(target)
            }
            MuxCommand::SelectTab { worktree, tab } => self.session_mut(&worktree).select_tab(tab),
            MuxCommand::ReorderTabs { worktree, order } => {
                self.session_mut(&worktree).reorder_tabs(&order);
                true
            }
            MuxCommand::MoveTab {
                worktree,
                tab,
                index,
            } => self.session_mut(&worktree).move_tab_to_index(tab, index),
            MuxCommand::FocusSurface { worktree, surface } => {
                self.session_mut(&worktree).focus_surface(surface)
            }
            MuxCommand::SetViewBounds {
                worktree,
                tab,
                bounds,
            } => self.session_mut(&worktree).set_view_bounds(tab, bounds),
            MuxCommand::MarkNotificationRead {
                worktree,
                notification,
            } => self
                .session_mut(&worktree)
                .mark_notification_read(notification),
            MuxCommand::MarkAllNotificationsRead { worktree } => {
                self.session_mut(&worktree).mark_all_notifications_read();
                true
            }
            MuxCommand::DismissNotification {
                worktree,
                notification,
            } => self
                .session_mut(&worktree)
                .dismiss_notification(notification),
            MuxCommand::Prune { keeping } => {
                self.prune(&keeping);
                true
            }
            MuxCommand::SetNotificationsEnabled(enabled) => {
                self.set_notifications_enabled(enabled);
                true
            }
            MuxCommand::SetSelectedWorktree(id) => {
                self.set_selected_worktree(id);
                true
            }
            MuxCommand::SetWindowState(window) => {
                self.set_window_state(window);
                true
            }
        };

        self.flush_events();
        ok
    }
}
