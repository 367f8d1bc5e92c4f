#![deny(missing_docs)]
//! Shared logging utilities for the chat widget workspace.
//!
//! This crate provides the `widget_*` logging macros used across the codebase,
//! the verbosity mapping used by the command line, and a minimal test
//! initializer for the global logger.

use log::LevelFilter;

/// Log target used by every `widget_*` macro.
///
/// Keeping a single target lets a file logger filter widget output from the
/// HTTP stack's own records.
pub const TARGET: &str = "chatwidget";

/// Logs a trace-level message under the widget target.
#[macro_export]
macro_rules! widget_trace {
    ($($arg:tt)*) => {{
        log::trace!(target: $crate::TARGET, $($arg)*);
    }};
}

/// Logs a debug-level message under the widget target.
#[macro_export]
macro_rules! widget_debug {
    ($($arg:tt)*) => {{
        log::debug!(target: $crate::TARGET, $($arg)*);
    }};
}

/// Logs an info-level message under the widget target.
#[macro_export]
macro_rules! widget_info {
    ($($arg:tt)*) => {{
        log::info!(target: $crate::TARGET, $($arg)*);
    }};
}

/// Logs a warn-level message under the widget target.
#[macro_export]
macro_rules! widget_warn {
    ($($arg:tt)*) => {{
        log::warn!(target: $crate::TARGET, $($arg)*);
    }};
}

/// Logs an error-level message under the widget target.
#[macro_export]
macro_rules! widget_error {
    ($($arg:tt)*) => {{
        log::error!(target: $crate::TARGET, $($arg)*);
    }};
}

/// Maps a `-v` repetition count to a level filter.
///
/// Zero keeps the default of `Warn` so the terminal transcript stays readable.
pub fn level_for_verbosity(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Initializes a simple terminal logger for use in unit tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    // Use debug level in debug builds, info in release builds.
    let level = if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    // Ignore the error if a logger was already set by another test.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}
