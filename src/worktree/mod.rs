//! Per-worktree terminal sessions
//!
//! A `WorktreeSession` owns the ordered tabs of one worktree together with
//! focus bookkeeping, task-running state, a notification log, search state
//! and the inbound engine callback channel.
//!
//! Sub-modules:
//! - [`tabs`]: tab lifecycle, surface creation, run script and teardown
//! - [`split`]: split actions and drag operations on a tab's layout
//! - [`focus`]: focus tracking and occlusion/visibility sync
//! - [`engine_events`]: draining and applying engine callbacks
//! - [`search`]: search state and forwarding
//! - [`notifications`]: the bounded notification log

mod engine_events;
mod focus;
pub mod notifications;
mod search;
mod split;
mod tabs;

pub use notifications::{Notification, NotificationId, NotificationLog};
pub use search::SearchState;
pub use split::{DropZone, SplitAction, SplitOperation};

use crate::config::Config;
use crate::surface::{
    EngineEventReceiver, EngineEventSender, SurfaceId, TerminalEngine, engine_channel,
};
use crate::tab::{TabId, TabManager, TabSession, TaskStatus};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Notify;

/// Identifier of a worktree (chosen by the host, e.g. its path or branch)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorktreeId(pub String);

impl WorktreeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WorktreeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WorktreeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Descriptor of a worktree passed with worktree-scoped commands
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Worktree {
    pub id: WorktreeId,
    pub name: String,
    /// Directory new surfaces start in
    pub working_directory: PathBuf,
    /// Typed into the first surface of a new session when requested
    #[serde(default)]
    pub setup_script: Option<String>,
}

impl Worktree {
    pub fn new(id: impl Into<String>, working_directory: impl Into<PathBuf>) -> Self {
        let id = WorktreeId::new(id);
        Self {
            name: id.0.clone(),
            id,
            working_directory: working_directory.into(),
            setup_script: None,
        }
    }

    pub fn with_setup_script(mut self, script: impl Into<String>) -> Self {
        self.setup_script = Some(script.into());
        self
    }
}

/// OS window state, applied to the selected session only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowState {
    pub visible: bool,
    pub focused: bool,
}

impl Default for WindowState {
    fn default() -> Self {
        Self {
            visible: true,
            focused: true,
        }
    }
}

/// Something a session did that observers care about
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    NotificationReceived { title: String, body: String },
    TabCreated { tab: TabId },
    TabClosed { tab: TabId },
    FocusChanged { surface: SurfaceId },
    TaskStatusChanged { status: TaskStatus },
    RunScriptStatusChanged { running: bool },
    CommandPaletteToggleRequested,
    SetupScriptConsumed,
}

/// One worktree's multiplexed terminal workspace
pub struct WorktreeSession {
    worktree: Worktree,
    engine: Arc<dyn TerminalEngine>,
    config: Config,
    tabs: TabManager,
    /// Focused surface per tab
    focused: HashMap<TabId, SurfaceId>,
    /// Last focus reported through `FocusChanged`, for deduplication
    last_reported_focus: Option<SurfaceId>,
    /// Aggregate over all tabs
    task_status: TaskStatus,
    notifications: NotificationLog,
    notifications_enabled: bool,
    has_unseen_notification: bool,
    /// Set once the first surface of this session has been created
    setup_consumed: bool,
    /// Tab whose first surface should receive the setup script
    setup_pending_tab: Option<TabId>,
    /// Dedicated tab opened by `run_script`
    run_tab: Option<TabId>,
    /// Cleared when the run tab goes idle or closes
    run_script_running: bool,
    search: SearchState,
    selected: bool,
    window: WindowState,
    events_tx: EngineEventSender,
    events_rx: EngineEventReceiver,
    outbox: Vec<SessionEvent>,
}

impl fmt::Debug for WorktreeSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorktreeSession")
            .field("worktree", &self.worktree.id)
            .field("tabs", &self.tabs.tab_count())
            .field("selected", &self.selected)
            .field("task_status", &self.task_status)
            .finish()
    }
}

impl WorktreeSession {
    /// Create an empty session. `wake` is poked whenever the engine sends a
    /// callback for one of this session's surfaces.
    pub fn new(
        worktree: Worktree,
        engine: Arc<dyn TerminalEngine>,
        config: &Config,
        wake: Arc<Notify>,
    ) -> Self {
        let (events_tx, events_rx) = engine_channel(wake);
        crate::debug_info!("SESSION", "Created session for {}", worktree.id);
        Self {
            worktree,
            engine,
            notifications: NotificationLog::new(config.max_notifications),
            notifications_enabled: config.notifications_enabled,
            config: config.clone(),
            tabs: TabManager::new(),
            focused: HashMap::new(),
            last_reported_focus: None,
            task_status: TaskStatus::Idle,
            has_unseen_notification: false,
            setup_consumed: false,
            setup_pending_tab: None,
            run_tab: None,
            run_script_running: false,
            search: SearchState::default(),
            selected: false,
            window: WindowState::default(),
            events_tx,
            events_rx,
            outbox: Vec::new(),
        }
    }

    pub fn worktree(&self) -> &Worktree {
        &self.worktree
    }

    pub fn id(&self) -> &WorktreeId {
        &self.worktree.id
    }

    /// Replace the descriptor (e.g. a renamed worktree or a changed setup script)
    pub fn update_worktree(&mut self, worktree: Worktree) {
        self.worktree = worktree;
    }

    pub fn tabs(&self) -> &[TabSession] {
        self.tabs.tabs()
    }

    pub fn tab(&self, id: TabId) -> Option<&TabSession> {
        self.tabs.get_tab(id)
    }

    pub fn selected_tab_id(&self) -> Option<TabId> {
        self.tabs.selected_tab_id()
    }

    pub fn task_status(&self) -> TaskStatus {
        self.task_status
    }

    pub fn notifications(&self) -> &NotificationLog {
        &self.notifications
    }

    pub fn has_unseen_notification(&self) -> bool {
        self.has_unseen_notification
    }

    pub fn notifications_enabled(&self) -> bool {
        self.notifications_enabled
    }

    pub fn search_state(&self) -> &SearchState {
        &self.search
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn window_state(&self) -> WindowState {
        self.window
    }

    pub fn run_script_tab(&self) -> Option<TabId> {
        self.run_tab
    }

    pub fn is_run_script_running(&self) -> bool {
        self.run_script_running
    }

    /// Events emitted since the last call, in causal order
    pub fn take_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.outbox)
    }

    fn emit(&mut self, event: SessionEvent) {
        crate::debug_trace!("SESSION", "{} emits {:?}", self.worktree.id, event);
        self.outbox.push(event);
    }

    /// Recompute the aggregate task status, emitting on change
    fn refresh_task_status(&mut self) {
        let status = if self.tabs.tabs().iter().any(|t| t.identity().is_dirty) {
            TaskStatus::Running
        } else {
            TaskStatus::Idle
        };
        if status != self.task_status {
            self.task_status = status;
            log::debug!("Worktree {} task status -> {:?}", self.worktree.id, status);
            self.emit(SessionEvent::TaskStatusChanged { status });
        }
    }
}

impl Drop for WorktreeSession {
    fn drop(&mut self) {
        // Surfaces must never outlive their session
        for closed in self.tabs.close_all() {
            crate::debug_trace!(
                "SESSION",
                "Dropped tab {} with {} surfaces",
                closed.identity.id,
                closed.released.len()
            );
        }
    }
}
