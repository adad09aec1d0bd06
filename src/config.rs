//! Configuration re-exports from the worktree-mux-config crate.

pub use worktree_mux_config::{Config, ConfigError, defaults};
