#![deny(missing_docs)]
//! Shared logging utilities for the digest workspace.
//!
//! This crate provides the `digest_*` logging macros used across the codebase,
//! the process-wide logger setup used by the server binary, and a minimal test
//! initializer for the global logger.

use std::fs::File;

use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

/// File written by [`LogDestination::File`] and [`LogDestination::Both`].
pub const LOG_FILE: &str = "./digest.log";

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! digest_trace {
    ($($arg:tt)*) => {{
        log::trace!($($arg)*);
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! digest_debug {
    ($($arg:tt)*) => {{
        log::debug!($($arg)*);
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! digest_info {
    ($($arg:tt)*) => {{
        log::info!($($arg)*);
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! digest_warn {
    ($($arg:tt)*) => {{
        log::warn!($($arg)*);
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! digest_error {
    ($($arg:tt)*) => {{
        log::error!($($arg)*);
    }};
}

/// Destination for log output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogDestination {
    /// Write to [`LOG_FILE`] in the current directory.
    File,
    /// Write to the terminal.
    #[default]
    Terminal,
    /// Write to both file and terminal.
    Both,
}

impl LogDestination {
    /// Parses `terminal`, `file` or `both` (case-insensitive).
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "terminal" | "term" | "stdout" => Some(Self::Terminal),
            "file" => Some(Self::File),
            "both" => Some(Self::Both),
            _ => None,
        }
    }
}

/// Installs the process-wide logger for `destination` at `level`.
///
/// Does nothing if a logger is already installed. When the log file cannot
/// be opened the terminal logger is used instead, so a `File` destination is
/// never left without output.
pub fn initialize(destination: LogDestination, level: LevelFilter) {
    let config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build();
    let file = match destination {
        LogDestination::Terminal => None,
        LogDestination::File | LogDestination::Both => open_log_file(),
    };

    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();
    if needs_terminal(destination, file.is_some()) {
        loggers.push(TermLogger::new(
            level,
            config.clone(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        ));
    }
    if let Some(file) = file {
        loggers.push(WriteLogger::new(level, config, file));
    }
    let _ = CombinedLogger::init(loggers);
}

fn needs_terminal(destination: LogDestination, file_opened: bool) -> bool {
    destination != LogDestination::File || !file_opened
}

fn open_log_file() -> Option<File> {
    match File::create(LOG_FILE) {
        Ok(file) => Some(file),
        Err(err) => {
            eprintln!("Falling back to terminal logging, cannot open {LOG_FILE}: {err}");
            None
        }
    }
}

/// Initializes a simple terminal logger for use in unit tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
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
