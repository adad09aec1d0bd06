//! Worktree session lifecycle through the public API: tab creation, focus
//! uniqueness across splits and idempotent teardown.

mod common;

use common::MockEngine;
use std::sync::Arc;
use tokio::sync::Notify;
use worktree_mux::config::Config;
use worktree_mux::pane::{FocusDirection, InsertDirection, SpatialDirection};
use worktree_mux::surface::EngineEvent;
use worktree_mux::tab::{GotoTabTarget, TabId};
use worktree_mux::worktree::{SessionEvent, SplitAction, Worktree, WorktreeSession};

fn selected_session(engine: &Arc<MockEngine>) -> WorktreeSession {
    let mut session = WorktreeSession::new(
        Worktree::new("main", "/tmp/main"),
        engine.clone(),
        &Config::default(),
        Arc::new(Notify::new()),
    );
    session.set_selected(true);
    session
}

/// Surfaces of `tab` currently told they hold keyboard focus
fn focused_leaves(engine: &MockEngine, session: &WorktreeSession, tab: TabId) -> usize {
    session
        .tab(tab)
        .unwrap()
        .layout()
        .surface_ids()
        .into_iter()
        .filter(|id| engine.surface(*id).is_focused() == Some(true))
        .count()
}

fn tab_closed_count(events: &[SessionEvent], tab: TabId) -> usize {
    events
        .iter()
        .filter(|e| **e == SessionEvent::TabClosed { tab })
        .count()
}

#[test]
fn test_new_session_first_tab_has_one_focused_leaf() {
    let engine = MockEngine::new();
    let mut session = selected_session(&engine);

    let tab = session.create_tab(false).expect("tab should be created");
    assert_eq!(session.tabs().len(), 1);
    let leaves = session.tab(tab).unwrap().layout().surface_ids();
    assert_eq!(leaves.len(), 1);
    assert_eq!(session.focused_surface(), Some(leaves[0]));
    assert_eq!(engine.surface(leaves[0]).is_focused(), Some(true));
    assert_eq!(engine.surface(leaves[0]).is_occluded(), Some(false));
}

#[test]
fn test_exactly_one_focused_surface_through_splits_and_closes() {
    let engine = MockEngine::new();
    let mut session = selected_session(&engine);
    let tab = session.create_tab(false).unwrap();

    let actions = [
        SplitAction::NewSplit(InsertDirection::Right),
        SplitAction::NewSplit(InsertDirection::Down),
        SplitAction::GotoSplit(FocusDirection::Previous),
        SplitAction::NewSplit(InsertDirection::Left),
        SplitAction::GotoSplit(FocusDirection::Spatial(SpatialDirection::Right)),
        SplitAction::ToggleZoom,
        SplitAction::GotoSplit(FocusDirection::Next),
        SplitAction::Equalize,
    ];
    for action in actions {
        let from = session.focused_surface().unwrap();
        session.perform_split_action(from, action);
        assert_eq!(focused_leaves(&engine, &session, tab), 1, "after {action:?}");
    }

    while session.tab(tab).is_some_and(|t| t.layout().leaf_count() > 1) {
        assert!(session.close_focused_surface());
        assert_eq!(focused_leaves(&engine, &session, tab), 1);
    }
}

#[test]
fn test_only_selected_tab_is_visible() {
    let engine = MockEngine::new();
    let mut session = selected_session(&engine);
    let first = session.create_tab(false).unwrap();
    let a = session.focused_surface().unwrap();
    session.create_tab(false).unwrap();
    let b = session.focused_surface().unwrap();

    assert_eq!(engine.surface(a).is_occluded(), Some(true));
    assert_eq!(engine.surface(b).is_occluded(), Some(false));

    assert!(session.handle_goto_tab_request(GotoTabTarget::Index(1)));
    assert_eq!(session.selected_tab_id(), Some(first));
    assert_eq!(engine.surface(a).is_occluded(), Some(false));
    assert_eq!(engine.surface(b).is_occluded(), Some(true));
    assert_eq!(engine.surface(b).is_focused(), Some(false));
}

#[test]
fn test_double_close_is_idempotent() {
    let engine = MockEngine::new();
    let mut session = selected_session(&engine);
    let tab = session.create_tab(false).unwrap();
    let a = session.focused_surface().unwrap();
    session.perform_split_action(a, SplitAction::NewSplit(InsertDirection::Right));
    let b = session.focused_surface().unwrap();
    session.take_events();

    assert!(session.close_surface(b));
    assert!(!session.close_surface(b));
    assert_eq!(engine.surface(b).close_count(), 1);

    assert!(session.close_tab(tab));
    assert!(!session.close_tab(tab));
    let events = session.take_events();
    assert_eq!(tab_closed_count(&events, tab), 1);
    assert_eq!(engine.surface(a).close_count(), 1);

    session.teardown_all();
    session.teardown_all();
    assert_eq!(engine.total_closes(), 2);
}

#[test]
fn test_close_request_from_engine_closes_last_surface_and_tab() {
    let engine = MockEngine::new();
    let mut session = selected_session(&engine);
    let tab = session.create_tab(false).unwrap();
    let a = session.focused_surface().unwrap();
    session.take_events();

    assert!(engine.sender(a).send(EngineEvent::CloseRequested { surface: a }));
    assert_eq!(session.drain_engine_events(), 1);
    assert!(session.tabs().is_empty());
    assert_eq!(tab_closed_count(&session.take_events(), tab), 1);

    // The surface is gone, so a repeated request is stale
    assert!(!session.handle_engine_event(EngineEvent::CloseRequested { surface: a }));
}

#[test]
fn test_setup_script_runs_before_run_script_input() {
    let engine = MockEngine::new();
    let mut session = WorktreeSession::new(
        Worktree::new("main", "/tmp/main").with_setup_script("npm install"),
        engine.clone(),
        &Config::default(),
        Arc::new(Notify::new()),
    );
    session.set_selected(true);

    session.create_tab(true).unwrap();
    assert!(session.run_script("npm test"));
    assert!(session.is_run_script_running());

    assert_eq!(
        engine.inputs(),
        vec![Some("npm install\n".to_string()), Some("npm test\n".to_string())]
    );
    let run_tab = session.run_script_tab().unwrap();
    assert_eq!(session.tab(run_tab).unwrap().title(), "Run");
}
