//! Categorized debug logging for worktree-mux
//!
//! Controlled by the `WORKTREE_MUX_DEBUG_LEVEL` environment variable, or by
//! the host calling [`set_level`] with `Config::debug_level`:
//! - 0 or unset: No debugging
//! - 1: Errors only
//! - 2: Info level (tab and surface lifecycle)
//! - 3: Debug level (layout calculations, focus resolution)
//! - 4: Trace level (every engine callback)
//!
//! Output goes to `worktree_mux_debug.log` in the system temp directory so it
//! never interleaves with the terminal output the host is rendering.

use parking_lot::Mutex;
use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::OnceLock;
use std::time::{SystemTime, UNIX_EPOCH};

/// Environment variable read on first use
pub const DEBUG_LEVEL_ENV: &str = "WORKTREE_MUX_DEBUG_LEVEL";

/// Debug level configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DebugLevel {
    Off = 0,
    Error = 1,
    Info = 2,
    Debug = 3,
    Trace = 4,
}

impl DebugLevel {
    /// Map a numeric level; anything out of range is `Off`
    pub fn from_u8(value: u8) -> Self {
        match value {
            1 => DebugLevel::Error,
            2 => DebugLevel::Info,
            3 => DebugLevel::Debug,
            4 => DebugLevel::Trace,
            _ => DebugLevel::Off,
        }
    }

    fn from_env() -> Self {
        std::env::var(DEBUG_LEVEL_ENV)
            .ok()
            .and_then(|val| val.trim().parse::<u8>().ok())
            .map(Self::from_u8)
            .unwrap_or(DebugLevel::Off)
    }

    fn label(self) -> &'static str {
        match self {
            DebugLevel::Off => "OFF  ",
            DebugLevel::Error => "ERROR",
            DebugLevel::Info => "INFO ",
            DebugLevel::Debug => "DEBUG",
            DebugLevel::Trace => "TRACE",
        }
    }
}

/// Path of the debug log file
pub fn log_path() -> PathBuf {
    std::env::temp_dir().join("worktree_mux_debug.log")
}

struct DebugLogger {
    level: DebugLevel,
    file: Option<File>,
}

impl DebugLogger {
    fn new(level: DebugLevel) -> Self {
        let mut logger = DebugLogger { level, file: None };
        logger.open_if_enabled();
        logger
    }

    /// Open the log file lazily the first time a level above `Off` is used.
    /// Failure to open is silent: debug output must never reach the terminal.
    fn open_if_enabled(&mut self) {
        if self.level == DebugLevel::Off || self.file.is_some() {
            return;
        }
        if let Ok(file) = OpenOptions::new()
            .write(true)
            .truncate(true)
            .create(true)
            .open(log_path())
        {
            self.file = Some(file);
            let banner = "=".repeat(80);
            self.write_raw(&format!(
                "\n{banner}\nworktree-mux debug session started at {} (level={:?})\n{banner}\n",
                timestamp(),
                self.level,
            ));
        }
    }

    fn write_raw(&mut self, msg: &str) {
        if let Some(ref mut file) = self.file {
            let _ = file.write_all(msg.as_bytes());
            let _ = file.flush();
        }
    }

    fn log(&mut self, level: DebugLevel, category: &str, msg: &str) {
        if level == DebugLevel::Off || level > self.level {
            return;
        }
        self.write_raw(&format!(
            "[{}] [{}] [{}] {}\n",
            timestamp(),
            level.label(),
            category,
            msg
        ));
    }
}

static LOGGER: OnceLock<Mutex<DebugLogger>> = OnceLock::new();

fn logger() -> &'static Mutex<DebugLogger> {
    LOGGER.get_or_init(|| Mutex::new(DebugLogger::new(DebugLevel::from_env())))
}

fn timestamp() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("{}.{:06}", now.as_secs(), now.subsec_micros())
}

/// Override the level chosen from the environment (e.g. from config)
pub fn set_level(level: DebugLevel) {
    let mut logger = logger().lock();
    logger.level = level;
    logger.open_if_enabled();
}

/// Current debug level
pub fn level() -> DebugLevel {
    logger().lock().level
}

/// Check if debugging is enabled at given level
pub fn is_enabled(level: DebugLevel) -> bool {
    level != DebugLevel::Off && level <= logger().lock().level
}

/// Log formatted message
pub fn logf(level: DebugLevel, category: &str, args: fmt::Arguments) {
    if is_enabled(level) {
        logger().lock().log(level, category, &args.to_string());
    }
}

// Convenience macros for logging
#[macro_export]
macro_rules! debug_error {
    ($category:expr, $($arg:tt)*) => {
        $crate::debug::logf($crate::debug::DebugLevel::Error, $category, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! debug_info {
    ($category:expr, $($arg:tt)*) => {
        $crate::debug::logf($crate::debug::DebugLevel::Info, $category, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! debug_log {
    ($category:expr, $($arg:tt)*) => {
        $crate::debug::logf($crate::debug::DebugLevel::Debug, $category, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! debug_trace {
    ($category:expr, $($arg:tt)*) => {
        $crate::debug::logf($crate::debug::DebugLevel::Trace, $category, format_args!($($arg)*))
    };
}
