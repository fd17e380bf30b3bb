use std::fmt;
use std::str::FromStr;

use tracing_subscriber::filter::LevelFilter;

use crate::logging::error::LoggingError;

/// Symbolic log level accepted on the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum LogLevelName {
    None,
    Debug,
    #[default]
    Info,
    Warning,
    Error,
    Fatal,
}

/// Verbosity applied to the process logger for every level except `none`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verbosity {
    Debug,
    Info,
    Warning,
    Error,
    Fatal,
}

/// The effect a level name has on the process logger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogEffect {
    /// Drop all output.
    Discard,
    /// Keep output, filtered at the given verbosity.
    Verbosity(Verbosity),
}

impl LogLevelName {
    /// Every supported name, in documentation order.
    pub const ALL: [LogLevelName; 6] = [
        LogLevelName::None,
        LogLevelName::Debug,
        LogLevelName::Info,
        LogLevelName::Warning,
        LogLevelName::Error,
        LogLevelName::Fatal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevelName::None => "none",
            LogLevelName::Debug => "debug",
            LogLevelName::Info => "info",
            LogLevelName::Warning => "warning",
            LogLevelName::Error => "error",
            LogLevelName::Fatal => "fatal",
        }
    }

    /// The effect applying this level has on the logger.
    pub fn effect(&self) -> LogEffect {
        match self {
            LogLevelName::None => LogEffect::Discard,
            LogLevelName::Debug => LogEffect::Verbosity(Verbosity::Debug),
            LogLevelName::Info => LogEffect::Verbosity(Verbosity::Info),
            LogLevelName::Warning => LogEffect::Verbosity(Verbosity::Warning),
            LogLevelName::Error => LogEffect::Verbosity(Verbosity::Error),
            LogLevelName::Fatal => LogEffect::Verbosity(Verbosity::Fatal),
        }
    }

    /// Comma separated list of valid names, used in error and help text.
    pub fn valid_names() -> String {
        Self::ALL
            .iter()
            .map(|l| l.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for LogLevelName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevelName {
    type Err = LoggingError;

    /// Exact, case-sensitive match against the supported names.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|level| level.as_str() == value)
            .ok_or_else(|| LoggingError::InvalidLogLevel {
                value: value.to_string(),
                valid: Self::valid_names(),
            })
    }
}

/// Resolve a level name straight to its effect.
pub fn resolve(value: &str) -> Result<LogEffect, LoggingError> {
    value.parse::<LogLevelName>().map(|level| level.effect())
}

impl Verbosity {
    /// Filter for the tracing subscriber. There is no level above `ERROR`,
    /// so `Fatal` shares it.
    pub fn level_filter(&self) -> LevelFilter {
        match self {
            Verbosity::Debug => LevelFilter::DEBUG,
            Verbosity::Info => LevelFilter::INFO,
            Verbosity::Warning => LevelFilter::WARN,
            Verbosity::Error | Verbosity::Fatal => LevelFilter::ERROR,
        }
    }

    /// Same mapping for the `log` facade's global max level.
    pub fn log_filter(&self) -> log::LevelFilter {
        match self {
            Verbosity::Debug => log::LevelFilter::Debug,
            Verbosity::Info => log::LevelFilter::Info,
            Verbosity::Warning => log::LevelFilter::Warn,
            Verbosity::Error | Verbosity::Fatal => log::LevelFilter::Error,
        }
    }
}
