//! Process-wide registry of worktree sessions
//!
//! `SessionRegistry` maps worktree ids to their `WorktreeSession`, routes
//! commands, keeps only the selected worktree on screen, aggregates the
//! notification indicator and republishes every session's events as one
//! stream.
//!
//! All mutation happens through `&mut self`. [`SessionRegistry::run`] owns
//! the registry on a single task and interleaves commands with engine
//! callback wakeups, so there is exactly one writer.

mod commands;
mod events;

pub use commands::MuxCommand;
pub use events::{MuxEvent, MuxEventReceiver};

use crate::config::Config;
use crate::surface::TerminalEngine;
use crate::worktree::{WindowState, Worktree, WorktreeId, WorktreeSession};
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;
use tokio::sync::{Notify, mpsc};

/// Sending half for host commands
pub type MuxCommandSender = mpsc::UnboundedSender<MuxCommand>;

/// Receiving half consumed by [`SessionRegistry::run`]
pub type MuxCommandReceiver = mpsc::UnboundedReceiver<MuxCommand>;

/// Create the channel the host uses to drive a running registry
pub fn command_channel() -> (MuxCommandSender, MuxCommandReceiver) {
    mpsc::unbounded_channel()
}

/// Owner of every worktree session in the process
pub struct SessionRegistry {
    engine: Arc<dyn TerminalEngine>,
    config: Config,
    sessions: HashMap<WorktreeId, WorktreeSession>,
    selected: Option<WorktreeId>,
    window: WindowState,
    notifications_enabled: bool,
    /// Poked by engine callbacks of any session
    wake: Arc<Notify>,
    subscriber: Option<mpsc::UnboundedSender<MuxEvent>>,
    /// Events emitted while no subscriber was attached
    buffer: VecDeque<MuxEvent>,
    indicator_count: usize,
}

impl SessionRegistry {
    pub fn new(engine: Arc<dyn TerminalEngine>, config: Config) -> Self {
        if config.debug_level > 0 {
            crate::debug::set_level(crate::debug::DebugLevel::from_u8(config.debug_level));
        }
        Self {
            engine,
            notifications_enabled: config.notifications_enabled,
            config,
            sessions: HashMap::new(),
            selected: None,
            window: WindowState::default(),
            wake: Arc::new(Notify::new()),
            subscriber: None,
            buffer: VecDeque::new(),
            indicator_count: 0,
        }
    }

    pub fn session(&self, id: &WorktreeId) -> Option<&WorktreeSession> {
        self.sessions.get(id)
    }

    /// Ids of every live session, sorted
    pub fn session_ids(&self) -> Vec<WorktreeId> {
        let mut ids: Vec<WorktreeId> = self.sessions.keys().cloned().collect();
        ids.sort();
        ids
    }

    pub fn selected_worktree(&self) -> Option<&WorktreeId> {
        self.selected.as_ref()
    }

    pub fn window_state(&self) -> WindowState {
        self.window
    }

    pub fn notifications_enabled(&self) -> bool {
        self.notifications_enabled
    }

    /// Number of worktrees with an unseen notification
    pub fn indicator_count(&self) -> usize {
        self.indicator_count
    }

    /// Session for `worktree`, created on first use
    fn session_mut(&mut self, worktree: &Worktree) -> &mut WorktreeSession {
        let is_new = !self.sessions.contains_key(&worktree.id);
        let is_selected = self.selected.as_ref() == Some(&worktree.id);
        let window = self.window;

        let session = self
            .sessions
            .entry(worktree.id.clone())
            .or_insert_with(|| {
                log::info!("Creating session for worktree {}", worktree.id);
                let mut session = WorktreeSession::new(
                    worktree.clone(),
                    self.engine.clone(),
                    &self.config,
                    self.wake.clone(),
                );
                session.set_notifications_enabled(self.notifications_enabled);
                session
            });

        if is_new && is_selected {
            session.apply_window_state(window);
            session.set_selected(true);
        }
        if session.worktree() != worktree {
            session.update_worktree(worktree.clone());
        }
        session
    }

    /// Tear down and drop every session not in `keeping`
    pub fn prune(&mut self, keeping: &HashSet<WorktreeId>) {
        let stale: Vec<WorktreeId> = self
            .sessions
            .keys()
            .filter(|id| !keeping.contains(*id))
            .cloned()
            .collect();

        for id in stale {
            if let Some(mut session) = self.sessions.remove(&id) {
                log::info!("Pruning session for worktree {}", id);
                session.teardown_all();
                for event in session.take_events() {
                    self.publish(MuxEvent::from_session(&id, event));
                }
            }
            if self.selected.as_ref() == Some(&id) {
                self.selected = None;
            }
        }
        self.refresh_indicator();
    }

    /// Fan the global notification switch out to every session
    pub fn set_notifications_enabled(&mut self, enabled: bool) {
        self.notifications_enabled = enabled;
        for session in self.sessions.values_mut() {
            session.set_notifications_enabled(enabled);
        }
        self.refresh_indicator();
    }

    /// Change which worktree is on screen
    ///
    /// The previous session's surfaces are occluded; window state is applied
    /// to the newly selected session only.
    pub fn set_selected_worktree(&mut self, id: Option<WorktreeId>) {
        if let Some(previous) = self.selected.take()
            && Some(&previous) != id.as_ref()
            && let Some(session) = self.sessions.get_mut(&previous)
        {
            session.set_selected(false);
        }

        crate::debug_info!("REGISTRY", "Selected worktree -> {:?}", id);
        if let Some(ref id) = id
            && let Some(session) = self.sessions.get_mut(id)
        {
            session.apply_window_state(self.window);
            session.set_selected(true);
        }
        self.selected = id;
        self.refresh_indicator();
    }

    /// Record OS window visibility/focus and apply it to the selected session
    pub fn set_window_state(&mut self, window: WindowState) {
        self.window = window;
        if let Some(ref id) = self.selected
            && let Some(session) = self.sessions.get_mut(id)
        {
            session.apply_window_state(window);
        }
    }

    /// Apply queued engine callbacks of every session and publish the results
    pub fn process_engine_events(&mut self) -> usize {
        let applied: usize = self
            .sessions
            .values_mut()
            .map(WorktreeSession::drain_engine_events)
            .sum();
        if applied > 0 {
            crate::debug_trace!("REGISTRY", "Applied {} engine callbacks", applied);
        }
        self.flush_events();
        applied
    }

    /// Serve commands until the channel closes
    ///
    /// Engine callbacks wake the loop between commands; both are applied on
    /// this task only.
    pub async fn run(&mut self, mut commands: MuxCommandReceiver) {
        log::info!("Session registry running");
        let wake = self.wake.clone();
        loop {
            tokio::select! {
                command = commands.recv() => match command {
                    Some(command) => {
                        self.handle(command);
                    }
                    None => break,
                },
                _ = wake.notified() => {}
            }
            self.process_engine_events();
        }
        // Callbacks that raced the close are still applied
        self.process_engine_events();
        log::info!("Command channel closed, session registry stopped");
    }
}
