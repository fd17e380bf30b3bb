//! # modhcp-core
//!
//! Composition root of the modhcp DHCP service: log-level resolution and
//! logger installation, the ordered plugin registry, configuration loading,
//! bootstrap sequencing and the server lifecycle driver. A default protocol
//! engine that runs datagrams through the plugin handler chain lives in
//! [`server`].
pub mod config;
pub mod kernel;
pub mod logging;
pub mod plugin_system;
pub mod server;

// Re-export key public types/traits for easier use by the binary and plugins
pub use config::{Config, ConfigLoader, FileConfigLoader};
pub use kernel::bootstrap::{Bootstrap, BootstrapOptions, Bootstrapped, DesiredPlugin};
pub use kernel::error::{BootstrapPhase, Error, Result};
pub use kernel::lifecycle::{Lifecycle, LifecycleState, ShutdownReport, GRACE_PERIOD};
pub use logging::{LogEffect, LogLevelName, LoggerConfig};
pub use plugin_system::{Handler, Plugin, PluginDescriptor, PluginRegistry};
pub use server::{ChainServer, Server};
