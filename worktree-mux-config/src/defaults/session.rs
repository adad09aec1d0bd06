//! Defaults for per-worktree sessions and the registry event stream.

pub fn bool_true() -> bool {
    true
}

/// Notifications kept per worktree before the oldest is evicted
pub fn max_notifications() -> usize {
    50
}

/// Events retained for replay while no subscriber is attached
pub fn event_buffer_capacity() -> usize {
    256
}

/// 0 = off, 1 = errors, 2 = info, 3 = debug, 4 = trace
pub fn debug_level() -> u8 {
    0
}
