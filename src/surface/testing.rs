//! In-crate test doubles for the terminal engine.

use super::{
    EngineEventSender, SearchAction, SurfaceHandle, SurfaceId, SurfaceRequest, TerminalEngine,
    TerminalSurface,
};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

/// Surface that records every call made on it
#[derive(Default)]
pub(crate) struct RecordingSurface {
    pub close_calls: Mutex<usize>,
    pub focused: Mutex<Option<bool>>,
    pub occluded: Mutex<Option<bool>>,
    pub focus_requests: Mutex<usize>,
    pub typed: Mutex<Vec<String>>,
    pub searches: Mutex<Vec<SearchAction>>,
}

impl RecordingSurface {
    pub fn close_count(&self) -> usize {
        *self.close_calls.lock()
    }
}

impl TerminalSurface for RecordingSurface {
    fn close(&self) {
        *self.close_calls.lock() += 1;
    }

    fn request_focus(&self) {
        *self.focus_requests.lock() += 1;
    }

    fn set_focused(&self, focused: bool) {
        *self.focused.lock() = Some(focused);
    }

    fn set_occluded(&self, occluded: bool) {
        *self.occluded.lock() = Some(occluded);
    }

    fn send_text(&self, text: &str) {
        self.typed.lock().push(text.to_string());
    }

    fn perform_search(&self, action: &SearchAction) {
        self.searches.lock().push(action.clone());
    }
}

/// Engine that hands out [`RecordingSurface`]s and remembers each request
#[derive(Default)]
pub(crate) struct RecordingEngine {
    pub surfaces: Mutex<HashMap<SurfaceId, Arc<RecordingSurface>>>,
    pub initial_inputs: Mutex<Vec<(SurfaceId, Option<String>)>>,
    pub senders: Mutex<HashMap<SurfaceId, EngineEventSender>>,
    pub fail_next: Mutex<bool>,
}

impl RecordingEngine {
    pub fn surface(&self, id: SurfaceId) -> Arc<RecordingSurface> {
        self.surfaces.lock()[&id].clone()
    }

    pub fn sender(&self, id: SurfaceId) -> EngineEventSender {
        self.senders.lock()[&id].clone()
    }

    pub fn created(&self) -> usize {
        self.surfaces.lock().len()
    }
}

impl TerminalEngine for RecordingEngine {
    fn create_surface(
        &self,
        request: SurfaceRequest,
    ) -> anyhow::Result<Arc<dyn TerminalSurface>> {
        if std::mem::take(&mut *self.fail_next.lock()) {
            anyhow::bail!("engine refused surface {}", request.id);
        }
        let surface = Arc::new(RecordingSurface::default());
        self.surfaces.lock().insert(request.id, surface.clone());
        self.initial_inputs
            .lock()
            .push((request.id, request.initial_input.clone()));
        self.senders.lock().insert(request.id, request.events);
        Ok(surface)
    }
}

/// A handle backed by a throwaway recording surface
pub(crate) fn test_handle() -> SurfaceHandle {
    SurfaceHandle::new(SurfaceId::new(), Arc::new(RecordingSurface::default()))
}
