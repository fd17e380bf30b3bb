//! # Server Errors
//!
//! Errors from [`Server::start`](super::Server::start) and
//! [`Server::wait`](super::Server::wait).
use std::net::SocketAddr;

use crate::plugin_system::error::PluginSystemError;

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// The handler chain could not be built from the configuration.
    #[error("handler chain: {0}")]
    Chain(#[from] PluginSystemError),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("receive on {addr} failed: {source}")]
    Receive {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to install signal handler: {0}")]
    Signal(#[source] std::io::Error),

    #[error("listener task ended abnormally: {0}")]
    Task(String),

    #[error("server already started")]
    AlreadyStarted,

    #[error("server not started")]
    NotStarted,
}
