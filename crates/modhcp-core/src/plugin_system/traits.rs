use std::fmt;

use crate::server::message::{Request, Response};

/// Which DHCP server a plugin is being set up for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressFamily {
    V4,
    V6,
}

impl fmt::Display for AddressFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressFamily::V4 => f.write_str("DHCPv4"),
            AddressFamily::V6 => f.write_str("DHCPv6"),
        }
    }
}

/// Whether the chain keeps evaluating after a handler returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    /// Stop here. The response built so far is final.
    Stop,
}

/// Error type for plugin setup
#[derive(Debug, thiserror::Error)]
pub enum PluginError {
    #[error("invalid arguments: {0}")]
    InvalidArgs(String),
    #[error("{0} is not supported")]
    Unsupported(AddressFamily),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Per-request behavior produced by a plugin for one server.
pub trait Handler: Send + Sync {
    fn handle(&self, request: &Request, response: &mut Response) -> Flow;
}

/// Capability object carried by a [`PluginDescriptor`](crate::plugin_system::PluginDescriptor).
///
/// The registry never calls into it; the server does, once per configured
/// server family, with the arguments from the configuration document.
pub trait Plugin: Send + Sync {
    /// Configure for the DHCPv4 server.
    fn setup4(&self, args: &[String]) -> Result<Box<dyn Handler>, PluginError>;

    /// Configure for the DHCPv6 server. Most plugins are v4 only.
    fn setup6(&self, _args: &[String]) -> Result<Box<dyn Handler>, PluginError> {
        Err(PluginError::Unsupported(AddressFamily::V6))
    }

    fn setup(&self, family: AddressFamily, args: &[String]) -> Result<Box<dyn Handler>, PluginError> {
        match family {
            AddressFamily::V4 => self.setup4(args),
            AddressFamily::V6 => self.setup6(args),
        }
    }
}
