//! Configuration system for the worktree-mux session multiplexer.
//!
//! This crate provides configuration loading, saving, and default values
//! for the multiplexer core. It includes:
//!
//! - The [`Config`] struct with tab, run-script, notification and event-stream settings
//! - Default value functions used by serde ([`defaults`])
//! - Typed errors for config I/O and validation ([`ConfigError`])

pub mod config;
pub mod defaults;
mod error;

pub use config::Config;
pub use error::ConfigError;
