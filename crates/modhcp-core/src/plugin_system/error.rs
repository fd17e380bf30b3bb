//! # Plugin System Errors
//!
//! [`PluginSystemError`] covers registration, lookup and per-server setup of
//! plugins. Errors raised by a plugin's own setup code are [`PluginError`]s
//! and get wrapped with the plugin name here.
use crate::plugin_system::traits::{AddressFamily, PluginError};

#[derive(Debug, thiserror::Error)]
pub enum PluginSystemError {
    #[error("Plugin '{name}' is already registered")]
    DuplicatePlugin { name: String },

    #[error("Unknown plugin '{name}'")]
    UnknownPlugin { name: String },

    #[error("Plugin name must not be empty")]
    EmptyName,

    #[error("Plugin '{plugin}' failed {family} setup: {source}")]
    SetupError {
        plugin: String,
        family: AddressFamily,
        #[source]
        source: PluginError,
    },
}
