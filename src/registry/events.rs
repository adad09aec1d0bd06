//! The merged outbound event stream.
//!
//! One subscriber at a time. Events emitted while nobody listens are kept in
//! a bounded buffer and replayed on the next `subscribe`, except indicator
//! counts, which are always sent fresh.

use super::SessionRegistry;
use crate::surface::SurfaceId;
use crate::tab::{TabId, TaskStatus};
use crate::worktree::{SessionEvent, WorktreeId};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// Receiving half of the event stream
pub type MuxEventReceiver = mpsc::UnboundedReceiver<MuxEvent>;

/// Event published by the registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MuxEvent {
    NotificationReceived {
        worktree: WorktreeId,
        title: String,
        body: String,
    },
    /// Number of worktrees with an unseen notification
    NotificationIndicatorChanged { count: usize },
    TabCreated { worktree: WorktreeId, tab: TabId },
    TabClosed { worktree: WorktreeId, tab: TabId },
    FocusChanged {
        worktree: WorktreeId,
        surface: SurfaceId,
    },
    TaskStatusChanged {
        worktree: WorktreeId,
        status: TaskStatus,
    },
    RunScriptStatusChanged { worktree: WorktreeId, running: bool },
    CommandPaletteToggleRequested { worktree: WorktreeId },
    SetupScriptConsumed { worktree: WorktreeId },
}

impl MuxEvent {
    /// Tag a session event with the worktree it came from
    pub fn from_session(worktree: &WorktreeId, event: SessionEvent) -> Self {
        let worktree = worktree.clone();
        match event {
            SessionEvent::NotificationReceived { title, body } => MuxEvent::NotificationReceived {
                worktree,
                title,
                body,
            },
            SessionEvent::TabCreated { tab } => MuxEvent::TabCreated { worktree, tab },
            SessionEvent::TabClosed { tab } => MuxEvent::TabClosed { worktree, tab },
            SessionEvent::FocusChanged { surface } => MuxEvent::FocusChanged { worktree, surface },
            SessionEvent::TaskStatusChanged { status } => {
                MuxEvent::TaskStatusChanged { worktree, status }
            }
            SessionEvent::RunScriptStatusChanged { running } => {
                MuxEvent::RunScriptStatusChanged { worktree, running }
            }
            SessionEvent::CommandPaletteToggleRequested => {
                MuxEvent::CommandPaletteToggleRequested { worktree }
            }
            SessionEvent::SetupScriptConsumed => MuxEvent::SetupScriptConsumed { worktree },
        }
    }

    fn is_indicator(&self) -> bool {
        matches!(self, MuxEvent::NotificationIndicatorChanged { .. })
    }
}

impl SessionRegistry {
    /// Attach the event subscriber, replacing (and ending) any previous one
    pub fn subscribe(&mut self) -> MuxEventReceiver {
        let (tx, rx) = mpsc::unbounded_channel();
        if self.subscriber.take().is_some() {
            log::info!("Replacing event subscriber");
        }

        let replay: Vec<MuxEvent> = self.buffer.drain(..).collect();
        crate::debug_info!("EVENTS", "Replaying {} buffered events", replay.len());
        for event in replay {
            let _ = tx.send(event);
        }
        let _ = tx.send(MuxEvent::NotificationIndicatorChanged {
            count: self.indicator_count,
        });

        self.subscriber = Some(tx);
        rx
    }

    /// Send to the subscriber, or buffer while nobody is listening
    pub(super) fn publish(&mut self, event: MuxEvent) {
        let event = match &self.subscriber {
            Some(tx) => match tx.send(event) {
                Ok(()) => return,
                Err(err) => err.0,
            },
            None => event,
        };
        if self.subscriber.is_some() {
            crate::debug_info!("EVENTS", "Subscriber went away");
            self.subscriber = None;
        }

        if event.is_indicator() {
            return;
        }
        self.buffer.push_back(event);
        while self.buffer.len() > self.config.event_buffer_capacity.max(1) {
            self.buffer.pop_front();
        }
    }

    /// Move every session's pending events to the stream, then refresh the
    /// notification indicator
    pub(super) fn flush_events(&mut self) {
        let mut pending = Vec::new();
        for (id, session) in &mut self.sessions {
            for event in session.take_events() {
                pending.push(MuxEvent::from_session(id, event));
            }
        }
        for event in pending {
            self.publish(event);
        }
        self.refresh_indicator();
    }

    /// Recompute the indicator count, publishing only on change
    pub(super) fn refresh_indicator(&mut self) {
        let count = self
            .sessions
            .values()
            .filter(|s| s.has_unseen_notification())
            .count();
        if count != self.indicator_count {
            self.indicator_count = count;
            log::debug!("Notification indicator -> {}", count);
            self.publish(MuxEvent::NotificationIndicatorChanged { count });
        }
    }
}
