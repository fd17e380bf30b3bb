//! # modhcp Logging
//!
//! Resolves the `--loglevel` name into a [`LogEffect`] and installs the
//! process logger from an explicit [`LoggerConfig`].
//!
//! Library code logs through the `log` facade. [`init`] bridges those records
//! into a `tracing-subscriber` registry with:
//!
//! - a stderr layer, unless stdout/stderr logging is disabled,
//! - an append-mode file layer when a log file is configured,
//! - a level filter derived from the resolved verbosity.
//!
//! The `none` level discards everything and installs no sinks at all.
//! Problems while installing sinks are reported in [`LoggerReport`] rather
//! than failing startup.
pub mod error;
pub mod level;

use std::fs::{File, OpenOptions};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

pub use error::LoggingError;
pub use level::{resolve, LogEffect, LogLevelName, Verbosity};

/// Logger settings threaded through bootstrap and applied once by [`init`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoggerConfig {
    level: LogLevelName,
    file: Option<PathBuf>,
    no_stdout: bool,
}

impl LoggerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve `name` and apply it. On failure the config is left untouched.
    pub fn set_level(&mut self, name: &str) -> Result<(), LoggingError> {
        let level: LogLevelName = name.parse()?;
        self.level = level;
        Ok(())
    }

    pub fn with_level(mut self, level: LogLevelName) -> Self {
        self.level = level;
        self
    }

    /// Append log output to `path` in addition to the console.
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some(path.into());
        self
    }

    /// Disable the stdout/stderr sink.
    pub fn with_no_stdout(mut self, no_stdout: bool) -> Self {
        self.no_stdout = no_stdout;
        self
    }

    pub fn level(&self) -> LogLevelName {
        self.level
    }

    pub fn effect(&self) -> LogEffect {
        self.level.effect()
    }

    pub fn file(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    pub fn no_stdout(&self) -> bool {
        self.no_stdout
    }
}

/// What [`init`] actually installed.
#[derive(Debug, Default)]
pub struct LoggerReport {
    pub console_sink: bool,
    pub file_sink: Option<PathBuf>,
    /// Non-fatal problems, already logged if a sink was available.
    pub warnings: Vec<String>,
}

fn open_log_file(path: &Path) -> std::io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

/// Install the process logger described by `config`.
///
/// Only the first call in a process takes effect; later calls report a
/// warning and leave the installed logger in place.
pub fn init(config: &LoggerConfig) -> LoggerReport {
    let mut report = LoggerReport::default();

    let (filter, log_filter, discard) = match config.effect() {
        LogEffect::Discard => (LevelFilter::OFF, log::LevelFilter::Off, true),
        LogEffect::Verbosity(v) => (v.level_filter(), v.log_filter(), false),
    };

    let console_layer = if discard || config.no_stdout() {
        None
    } else {
        report.console_sink = true;
        Some(
            fmt::layer()
                .with_ansi(std::io::stderr().is_terminal())
                .with_writer(std::io::stderr),
        )
    };

    let file_layer = match config.file() {
        Some(path) if !discard => match open_log_file(path) {
            Ok(file) => {
                report.file_sink = Some(path.to_path_buf());
                Some(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
            }
            Err(e) => {
                report
                    .warnings
                    .push(format!("Failed to open log file {}: {}", path.display(), e));
                None
            }
        },
        _ => None,
    };

    // With the `tracing-log` feature, `try_init` also bridges the `log` facade
    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .try_init();
    match installed {
        Ok(()) => log::set_max_level(log_filter),
        Err(e) => report
            .warnings
            .push(format!("Process logger already installed, keeping it: {}", e)),
    }

    log::info!("Setting log level to '{}'", config.level());
    if let Some(path) = &report.file_sink {
        log::info!("Logging to file {}", path.display());
    }
    if config.no_stdout() {
        log::info!("Disabling logging to stdout/stderr");
    }
    for warning in &report.warnings {
        log::warn!("{}", warning);
    }

    report
}
