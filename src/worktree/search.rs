//! Search commands, forwarded to the focused surface.

use super::WorktreeSession;
use crate::surface::SearchAction;
use serde::{Deserialize, Serialize};

/// What the search bar of a worktree shows
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchState {
    pub needle: Option<String>,
    /// Number of matches, once the engine reports it
    pub total: Option<usize>,
    /// Index of the selected match
    pub selected: Option<usize>,
}

impl WorktreeSession {
    pub fn start_search(&mut self, needle: Option<String>) -> bool {
        self.search = SearchState {
            needle: needle.clone(),
            ..SearchState::default()
        };
        self.forward_search(SearchAction::Start { needle })
    }

    pub fn search_selection(&mut self) -> bool {
        self.forward_search(SearchAction::SearchSelection)
    }

    pub fn navigate_search_next(&mut self) -> bool {
        self.forward_search(SearchAction::NavigateNext)
    }

    pub fn navigate_search_previous(&mut self) -> bool {
        self.forward_search(SearchAction::NavigatePrevious)
    }

    pub fn end_search(&mut self) -> bool {
        self.search = SearchState::default();
        self.forward_search(SearchAction::End)
    }

    /// Returns false when there is no focused surface to search in
    fn forward_search(&self, action: SearchAction) -> bool {
        let Some(handle) = self
            .focused_surface()
            .and_then(|surface| self.handle_for(surface))
        else {
            crate::debug_log!("SEARCH", "No focused surface for {:?}", action);
            return false;
        };
        crate::debug_trace!("SEARCH", "{:?} -> {}", action, handle.id());
        handle.surface().perform_search(&action);
        true
    }
}
