//! Shared integration test helpers for worktree-mux.
//!
//! Integration tests use `mod common;` to bring these in. Only a subset is
//! used per file, hence the `dead_code` allowance.

#![allow(dead_code)]

use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use worktree_mux::surface::{
    EngineEventSender, SearchAction, SurfaceHandle, SurfaceId, SurfaceRequest, TerminalEngine,
    TerminalSurface,
};

/// Surface that counts what the multiplexer asked of it
#[derive(Default)]
pub struct MockSurface {
    pub closed: Mutex<usize>,
    pub focused: Mutex<Option<bool>>,
    pub occluded: Mutex<Option<bool>>,
    pub typed: Mutex<Vec<String>>,
}

impl MockSurface {
    pub fn close_count(&self) -> usize {
        *self.closed.lock()
    }

    pub fn is_occluded(&self) -> Option<bool> {
        *self.occluded.lock()
    }

    pub fn is_focused(&self) -> Option<bool> {
        *self.focused.lock()
    }
}

impl TerminalSurface for MockSurface {
    fn close(&self) {
        *self.closed.lock() += 1;
    }

    fn request_focus(&self) {}

    fn set_focused(&self, focused: bool) {
        *self.focused.lock() = Some(focused);
    }

    fn set_occluded(&self, occluded: bool) {
        *self.occluded.lock() = Some(occluded);
    }

    fn send_text(&self, text: &str) {
        self.typed.lock().push(text.to_string());
    }

    fn perform_search(&self, _action: &SearchAction) {}
}

/// Engine handing out [`MockSurface`]s
#[derive(Default)]
pub struct MockEngine {
    surfaces: Mutex<HashMap<SurfaceId, Arc<MockSurface>>>,
    senders: Mutex<HashMap<SurfaceId, EngineEventSender>>,
    inputs: Mutex<Vec<Option<String>>>,
}

impl MockEngine {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn surface(&self, id: SurfaceId) -> Arc<MockSurface> {
        self.surfaces.lock()[&id].clone()
    }

    pub fn sender(&self, id: SurfaceId) -> EngineEventSender {
        self.senders.lock()[&id].clone()
    }

    pub fn created(&self) -> usize {
        self.surfaces.lock().len()
    }

    /// Initial input of every request, in creation order
    pub fn inputs(&self) -> Vec<Option<String>> {
        self.inputs.lock().clone()
    }

    /// Total `close` calls across every surface ever created
    pub fn total_closes(&self) -> usize {
        self.surfaces.lock().values().map(|s| s.close_count()).sum()
    }
}

impl TerminalEngine for MockEngine {
    fn create_surface(&self, request: SurfaceRequest) -> anyhow::Result<Arc<dyn TerminalSurface>> {
        let surface = Arc::new(MockSurface::default());
        self.surfaces.lock().insert(request.id, surface.clone());
        self.senders.lock().insert(request.id, request.events);
        self.inputs.lock().push(request.initial_input);
        Ok(surface)
    }
}

/// A standalone handle for layout-only tests
pub fn handle() -> SurfaceHandle {
    SurfaceHandle::new(SurfaceId::new(), Arc::new(MockSurface::default()))
}
