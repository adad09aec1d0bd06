//! Inbound engine callbacks.
//!
//! The engine does its I/O off the multiplexer's sequential context. Instead
//! of invoking closures over session state, it pushes [`EngineEvent`]s into a
//! per-session unbounded channel. The session drains that channel on its own
//! turn and re-validates every surface id before acting on it.

use super::SurfaceId;
use crate::tab::GotoTabTarget;
use crate::worktree::SplitAction;
use std::sync::Arc;
use tokio::sync::{Notify, mpsc};

/// A callback from the terminal engine about one surface
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// The shell set a new window title
    TitleChanged { surface: SurfaceId, title: String },
    /// A foreground task started (`running = true`) or finished
    ActivityChanged { surface: SurfaceId, running: bool },
    /// The shell emitted a desktop notification (OSC 9 / OSC 777)
    DesktopNotification {
        surface: SurfaceId,
        title: String,
        body: String,
    },
    /// The user asked for a split action from inside the surface
    SplitRequested {
        surface: SurfaceId,
        action: SplitAction,
    },
    /// The user asked to jump to another tab
    GotoTabRequested {
        surface: SurfaceId,
        target: GotoTabTarget,
    },
    /// The surface's process exited and the surface wants to be closed
    CloseRequested { surface: SurfaceId },
    /// The user clicked into the surface
    FocusGained { surface: SurfaceId },
    /// The user pressed the command palette shortcut inside the surface
    CommandPaletteToggleRequested { surface: SurfaceId },
    /// Number of search matches changed (None = unknown)
    SearchTotal {
        surface: SurfaceId,
        total: Option<usize>,
    },
    /// Index of the selected search match changed (None = no selection)
    SearchSelected {
        surface: SurfaceId,
        selected: Option<usize>,
    },
}

impl EngineEvent {
    /// The surface this event refers to
    pub fn surface(&self) -> SurfaceId {
        match self {
            EngineEvent::TitleChanged { surface, .. }
            | EngineEvent::ActivityChanged { surface, .. }
            | EngineEvent::DesktopNotification { surface, .. }
            | EngineEvent::SplitRequested { surface, .. }
            | EngineEvent::GotoTabRequested { surface, .. }
            | EngineEvent::CloseRequested { surface }
            | EngineEvent::FocusGained { surface }
            | EngineEvent::CommandPaletteToggleRequested { surface }
            | EngineEvent::SearchTotal { surface, .. }
            | EngineEvent::SearchSelected { surface, .. } => *surface,
        }
    }
}

/// Sending half handed to the engine with each surface request.
///
/// Every successful send also pokes the registry's wakeup so the run loop
/// drains the session promptly.
#[derive(Debug, Clone)]
pub struct EngineEventSender {
    tx: mpsc::UnboundedSender<EngineEvent>,
    wake: Arc<Notify>,
}

impl EngineEventSender {
    /// Deliver an event. Returns false once the owning session is gone.
    pub fn send(&self, event: EngineEvent) -> bool {
        match self.tx.send(event) {
            Ok(()) => {
                self.wake.notify_one();
                true
            }
            Err(err) => {
                crate::debug_trace!(
                    "ENGINE",
                    "Dropping event for {}: session closed",
                    err.0.surface()
                );
                false
            }
        }
    }
}

/// Receiving half owned by a worktree session
pub type EngineEventReceiver = mpsc::UnboundedReceiver<EngineEvent>;

/// Create a session's inbound channel, wired to the registry's wakeup
pub fn engine_channel(wake: Arc<Notify>) -> (EngineEventSender, EngineEventReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (EngineEventSender { tx, wake }, rx)
}
