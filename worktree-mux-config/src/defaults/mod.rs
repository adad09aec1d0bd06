//! Default value functions for configuration.
//!
//! Each function is used as a `#[serde(default = "crate::defaults::...")]`
//! attribute on a `Config` field, so a partial YAML file still loads.

mod session;
mod tabs;

// ── Tabs & run script ──────────────────────────────────────────────────────
pub use tabs::{default_tab_icon, default_tab_title, run_script_tab_icon, run_script_tab_title};

// ── Sessions, notifications & event stream ─────────────────────────────────
pub use session::{bool_true, debug_level, event_buffer_capacity, max_notifications};
