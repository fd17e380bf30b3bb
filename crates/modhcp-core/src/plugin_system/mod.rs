//! # modhcp Plugin System
//!
//! Named extension points for the DHCP server.
//!
//! - **[`traits`]**: the [`Plugin`] capability trait (set up for a server
//!   family from configuration arguments) and the per-request [`Handler`].
//! - **[`registry`]**: the ordered [`PluginRegistry`] and the
//!   [`PluginDescriptor`] entries it holds.
//! - **[`error`]**: [`PluginSystemError`](error::PluginSystemError).
//!
//! Plugins are registered once during bootstrap, in the order the caller
//! supplies them. That order is the order the server runs their handlers.
pub mod error;
pub mod registry;
pub mod traits;

pub use error::PluginSystemError;
pub use registry::{PluginDescriptor, PluginRegistry};
pub use traits::{AddressFamily, Flow, Handler, Plugin, PluginError};

// Test module declaration
#[cfg(test)]
mod tests;
