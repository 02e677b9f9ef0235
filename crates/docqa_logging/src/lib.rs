#![deny(missing_docs)]
//! Shared logging for the DocQA workspace.
//!
//! Provides the `docqa_*` macros used across the codebase, the
//! [`docqa_op!`] macro that tags a line with the operation it belongs to,
//! and the logger setup shared by the binary and the tests.

use std::fmt;
use std::fs::File;
use std::path::Path;
use std::str::FromStr;

use log::LevelFilter;
use serde::{Deserialize, Serialize};
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

/// Log target for lines written through [`docqa_op!`].
pub const OP_TARGET: &str = "docqa::op";

/// Default log file, relative to the working directory.
pub const LOG_FILE: &str = "./docqa.log";

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! docqa_trace {
    ($($arg:tt)*) => {{
        log::trace!($($arg)*);
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! docqa_info {
    ($($arg:tt)*) => {{
        log::info!($($arg)*);
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! docqa_debug {
    ($($arg:tt)*) => {{
        log::debug!($($arg)*);
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! docqa_warn {
    ($($arg:tt)*) => {{
        log::warn!($($arg)*);
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! docqa_error {
    ($($arg:tt)*) => {{
        log::error!($($arg)*);
    }};
}

/// Logs a message about one async operation, prefixed with `[op #<id>]`
/// under the [`OP_TARGET`] target, so a batch or question can be followed
/// from dispatch to completion.
///
/// ```
/// docqa_logging::docqa_op!(log::Level::Info, 7, "sent {} files", 2);
/// ```
#[macro_export]
macro_rules! docqa_op {
    ($level:expr, $op_id:expr, $($arg:tt)*) => {{
        log::log!(
            target: $crate::OP_TARGET,
            $level,
            "[op #{}] {}",
            $op_id,
            format_args!($($arg)*)
        );
    }};
}

/// Destination for log output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogDestination {
    /// Write to the log file only. The terminal belongs to the UI.
    File,
    /// Write to the terminal; errors go to stderr.
    Terminal,
    /// Write to both file and terminal.
    Both,
}

impl FromStr for LogDestination {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "file" => Ok(Self::File),
            "terminal" => Ok(Self::Terminal),
            "both" => Ok(Self::Both),
            other => Err(format!(
                "unknown log destination `{other}` (expected file, terminal or both)"
            )),
        }
    }
}

impl fmt::Display for LogDestination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::File => "file",
            Self::Terminal => "terminal",
            Self::Both => "both",
        };
        f.write_str(name)
    }
}

/// Installs the global logger for `destination`.
///
/// A log file that cannot be created is reported on stderr; any remaining
/// destination stays active.
pub fn initialize(destination: LogDestination, level: LevelFilter, log_file: &Path) {
    let loggers = build_loggers(destination, level, log_file);
    if loggers.is_empty() {
        return;
    }
    let _ = CombinedLogger::init(loggers);
}

fn build_loggers(
    destination: LogDestination,
    level: LevelFilter,
    log_file: &Path,
) -> Vec<Box<dyn SharedLogger>> {
    let config = build_config();
    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();
    if matches!(destination, LogDestination::Terminal | LogDestination::Both) {
        loggers.push(TermLogger::new(
            level,
            config.clone(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        ));
    }
    if matches!(destination, LogDestination::File | LogDestination::Both) {
        match File::create(log_file) {
            Ok(file) => loggers.push(WriteLogger::new(level, config, file)),
            Err(err) => eprintln!(
                "Warning: Could not create log file at {:?}: {}",
                log_file, err
            ),
        }
    }
    loggers
}

fn build_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build()
}

/// Initializes a simple terminal logger for use in tests.
///
/// Safe to call from every test: it no-ops once a logger is installed.
pub fn initialize_for_tests() {
    let level = if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    // Another test may have won the race to install the logger.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}
