//! # modhcp Server
//!
//! The [`Server`] trait is the lifecycle contract the kernel drives:
//! [`start`](Server::start) acquires resources, [`wait`](Server::wait) blocks
//! until the server terminates.
//!
//! [`ChainServer`] is the default engine. It builds one [`HandlerChain`] per
//! configured server family, binds a UDP socket per listen address and runs
//! every datagram through the chain. Serialising replies onto the wire is not
//! part of it.
pub mod chain;
pub mod error;
pub mod message;
pub mod udp;

use async_trait::async_trait;

pub use chain::HandlerChain;
pub use error::ServerError;
pub use message::{HwAddr, Request, Response};
pub use udp::{ChainServer, ShutdownHandle};

/// A long-running service owned by the lifecycle driver.
#[async_trait]
pub trait Server: Send {
    /// Bind transport resources and get ready to serve.
    async fn start(&mut self) -> Result<(), ServerError>;

    /// Block until the server terminates, cleanly or with an error.
    async fn wait(&mut self) -> Result<(), ServerError>;
}

#[cfg(test)]
mod tests;
