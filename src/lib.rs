// Library exports for hosts embedding the worktree multiplexer
//
// # Concurrency Policy
//
// All session and tree state is mutated from one sequential context: every
// mutating API takes `&mut self` and `SessionRegistry::run` owns the
// registry. Synchronization appears at the edges only:
//
//   - `parking_lot::Mutex`: sync-only state such as the debug log file.
//
//   - `tokio::sync::mpsc`: engine callbacks and the outbound event stream.
//     Engine I/O never touches session state directly.

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[macro_use]
pub mod debug;

pub mod config;
pub mod pane;
pub mod registry;
pub mod surface;
pub mod tab;
pub mod worktree;
