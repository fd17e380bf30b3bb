//! # modhcp Kernel Errors
//!
//! [`Error`] aggregates the subsystem errors the bootstrap sequence and the
//! lifecycle driver can surface. Every variant knows which
//! [`BootstrapPhase`] produced it, so the top-level handler can name the
//! failing stage.
use std::result::Result as StdResult;

use thiserror::Error as ThisError;

use crate::config::error::ConfigError;
use crate::logging::error::LoggingError;
use crate::plugin_system::error::PluginSystemError;
use crate::server::error::ServerError;

#[derive(Debug, ThisError)]
pub enum Error {
    /// The requested log level is not a supported name.
    #[error(transparent)]
    InvalidLogLevel(#[from] LoggingError),

    /// The configuration document could not be located, read or validated.
    #[error("Failed to load configuration: {0}")]
    ConfigLoad(#[from] ConfigError),

    /// A desired plugin could not be registered (duplicate or empty name).
    #[error("Failed to register plugin '{plugin}': {source}")]
    PluginRegistration {
        plugin: String,
        #[source]
        source: PluginSystemError,
    },

    /// The server could not acquire its resources or build its handler chain.
    #[error("Failed to start server: {0}")]
    ServerStart(#[source] ServerError),

    /// The running server reported an error on termination.
    #[error("Server terminated with error: {0}")]
    ServerRuntime(#[source] ServerError),
}

/// Stage of the startup/shutdown sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ThisError)]
pub enum BootstrapPhase {
    #[error("log level resolution")]
    LogLevel,
    #[error("configuration loading")]
    ConfigLoad,
    #[error("plugin registration")]
    PluginRegistration,
    #[error("server start")]
    ServerStart,
    #[error("server runtime")]
    ServerRuntime,
}

impl Error {
    /// Which stage failed.
    pub fn phase(&self) -> BootstrapPhase {
        match self {
            Error::InvalidLogLevel(_) => BootstrapPhase::LogLevel,
            Error::ConfigLoad(_) => BootstrapPhase::ConfigLoad,
            Error::PluginRegistration { .. } => BootstrapPhase::PluginRegistration,
            Error::ServerStart(_) => BootstrapPhase::ServerStart,
            Error::ServerRuntime(_) => BootstrapPhase::ServerRuntime,
        }
    }

    /// Fatal errors abort startup; only a runtime error from a server that
    /// was already running is not.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Error::ServerRuntime(_))
    }
}

/// Shorthand for Result with our Error type
pub type Result<T> = StdResult<T, Error>;
