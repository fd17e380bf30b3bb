use std::path::PathBuf;
use std::sync::Arc;

use crate::config::{Config, ConfigLoader};
use crate::kernel::constants;
use crate::kernel::error::{Error, Result};
use crate::logging::{self, LoggerConfig, LoggerReport};
use crate::plugin_system::registry::{PluginDescriptor, PluginRegistry};

/// Constructor for one plugin of the desired set.
pub type DesiredPlugin = Box<dyn Fn() -> PluginDescriptor + Send + Sync>;

/// Process-level options, as parsed from the command line.
#[derive(Debug, Clone)]
pub struct BootstrapOptions {
    pub log_level: String,
    pub log_file: Option<PathBuf>,
    pub no_stdout: bool,
}

impl Default for BootstrapOptions {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_file: None,
            no_stdout: false,
        }
    }
}

impl BootstrapOptions {
    /// Validate the log level and build the logger settings.
    pub fn logger_config(&self) -> Result<LoggerConfig> {
        let mut config = LoggerConfig::new().with_no_stdout(self.no_stdout);
        config.set_level(&self.log_level)?;
        if let Some(path) = &self.log_file {
            config = config.with_file(path);
        }
        Ok(config)
    }
}

/// Everything bootstrap produced, ready for the lifecycle driver.
pub struct Bootstrapped<S> {
    pub server: S,
    /// Frozen registry, shared with the server
    pub registry: Arc<PluginRegistry>,
    pub logger: LoggerReport,
}

/// Startup sequencer.
///
/// Runs, in order and stopping at the first failure:
/// log-level resolution, logger installation, configuration loading, plugin
/// registration and server construction.
pub struct Bootstrap<L: ConfigLoader> {
    options: BootstrapOptions,
    loader: L,
    desired: Vec<DesiredPlugin>,
}

impl<L: ConfigLoader> Bootstrap<L> {
    /// `desired` is registered in the given order.
    pub fn new(options: BootstrapOptions, loader: L, desired: Vec<DesiredPlugin>) -> Self {
        Self {
            options,
            loader,
            desired,
        }
    }

    /// Run the sequence and build the server with `new_server`.
    pub fn run<S, F>(self, new_server: F) -> Result<Bootstrapped<S>>
    where
        F: FnOnce(Config, Arc<PluginRegistry>) -> S,
    {
        let logger_config = self.options.logger_config()?;

        // Sink problems are reported and logged, never fatal
        let logger = logging::init(&logger_config);
        log::info!("Starting {} v{}", constants::APP_NAME, constants::APP_VERSION);

        let config = self.loader.load()?;

        let registry = Arc::new(register_plugins(&self.desired)?);
        log::info!("Registered {} plugin(s): [{}]", registry.len(), registry.names().join(", "));

        let server = new_server(config, registry.clone());
        Ok(Bootstrapped {
            server,
            registry,
            logger,
        })
    }
}

/// Register every desired plugin into a fresh registry, in order. The first
/// failure aborts; no partially registered registry escapes.
pub fn register_plugins(desired: &[DesiredPlugin]) -> Result<PluginRegistry> {
    let mut registry = PluginRegistry::new();
    for factory in desired {
        let descriptor = Arc::new(factory());
        let name = descriptor.name().to_string();
        registry
            .register(descriptor)
            .map_err(|source| Error::PluginRegistration {
                plugin: name.clone(),
                source,
            })?;
        log::debug!("Registered plugin '{}'", name);
    }
    Ok(registry)
}
