//! Contract with the external terminal engine.
//!
//! The multiplexer never renders or runs processes itself. It asks a
//! [`TerminalEngine`] for surfaces and owns the resulting [`SurfaceHandle`]s
//! inside pane layout trees. The engine reports back through an
//! [`EngineEventSender`] handed out with every [`SurfaceRequest`].
//!
//! Sub-modules:
//! - [`events`]: inbound engine callbacks and the per-session channel

pub mod events;
#[cfg(test)]
pub(crate) mod testing;

pub use events::{EngineEvent, EngineEventReceiver, EngineEventSender, engine_channel};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use uuid::Uuid;

/// Unique identifier of a terminal surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SurfaceId(Uuid);

impl SurfaceId {
    /// Generate a fresh random id
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SurfaceId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "surface:{}", self.0)
    }
}

/// Search commands forwarded to the focused surface
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchAction {
    /// Open the search UI, optionally pre-filled
    Start { needle: Option<String> },
    /// Search for the current selection
    SearchSelection,
    NavigateNext,
    NavigatePrevious,
    End,
}

/// Everything the engine needs to create a surface
#[derive(Debug, Clone)]
pub struct SurfaceRequest {
    /// Id the multiplexer assigned to the new surface
    pub id: SurfaceId,
    /// Directory the shell starts in
    pub working_directory: PathBuf,
    /// Text typed into the shell once it is ready (setup script, run script)
    pub initial_input: Option<String>,
    /// Channel for callbacks about this surface
    pub events: EngineEventSender,
}

/// A live terminal surface owned by the engine.
///
/// Methods take `&self`; engine objects are shared references whose state
/// lives on the engine side.
pub trait TerminalSurface: Send + Sync {
    /// Release the engine resources. Must be idempotent.
    fn close(&self);

    /// Ask the engine to move keyboard focus to this surface
    fn request_focus(&self);

    /// Tell the surface whether it is the focused surface of a focused window
    fn set_focused(&self, focused: bool);

    /// Mark the surface as not currently visible so it can stop rendering
    fn set_occluded(&self, occluded: bool);

    /// Type text into the surface as if entered by the user
    fn send_text(&self, text: &str);

    /// Forward a search command
    fn perform_search(&self, action: &SearchAction);
}

/// Factory for terminal surfaces
pub trait TerminalEngine: Send + Sync {
    /// Create a surface. Failures are reported, never retried here.
    fn create_surface(&self, request: SurfaceRequest) -> anyhow::Result<Arc<dyn TerminalSurface>>;
}

/// A surface id paired with the engine object it names.
///
/// Cloning a handle does not duplicate the surface: a handle lives in exactly
/// one layout tree, and older tree values share it only until they are dropped.
#[derive(Clone)]
pub struct SurfaceHandle {
    id: SurfaceId,
    surface: Arc<dyn TerminalSurface>,
}

impl SurfaceHandle {
    pub fn new(id: SurfaceId, surface: Arc<dyn TerminalSurface>) -> Self {
        Self { id, surface }
    }

    pub fn id(&self) -> SurfaceId {
        self.id
    }

    /// Access the engine object
    pub fn surface(&self) -> &dyn TerminalSurface {
        self.surface.as_ref()
    }

    /// Release the engine resources behind this handle
    pub fn release(&self) {
        crate::debug_log!("SURFACE", "Releasing {}", self.id);
        self.surface.close();
    }
}

impl fmt::Debug for SurfaceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SurfaceHandle").field(&self.id).finish()
    }
}

impl PartialEq for SurfaceHandle {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for SurfaceHandle {}
