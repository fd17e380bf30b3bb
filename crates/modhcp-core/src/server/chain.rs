use crate::config::ServerConfig;
use crate::plugin_system::error::PluginSystemError;
use crate::plugin_system::registry::PluginRegistry;
use crate::plugin_system::traits::{AddressFamily, Flow, Handler};
use crate::server::message::{Request, Response};

/// The handlers of one server, in plugin registration order.
pub struct HandlerChain {
    family: AddressFamily,
    handlers: Vec<(String, Box<dyn Handler>)>,
}

impl HandlerChain {
    /// Set up every plugin `section` enables.
    ///
    /// Handlers are ordered by the registry, not by the configuration
    /// document. A configured name the registry does not know is an error.
    pub fn build(
        family: AddressFamily,
        section: &ServerConfig,
        registry: &PluginRegistry,
    ) -> Result<Self, PluginSystemError> {
        for entry in &section.plugins {
            registry.lookup(&entry.name)?;
        }

        let mut handlers = Vec::with_capacity(section.plugins.len());
        for descriptor in registry.all() {
            let Some(entry) = section.plugin(descriptor.name()) else {
                continue;
            };
            let handler = descriptor
                .plugin()
                .setup(family, &entry.args)
                .map_err(|source| PluginSystemError::SetupError {
                    plugin: descriptor.name().to_string(),
                    family,
                    source,
                })?;
            log::debug!("Set up plugin '{}' for {} with args {:?}", descriptor.name(), family, entry.args);
            handlers.push((descriptor.name().to_string(), handler));
        }

        Ok(Self { family, handlers })
    }

    pub fn family(&self) -> AddressFamily {
        self.family
    }

    pub fn names(&self) -> Vec<&str> {
        self.handlers.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Run `request` through the chain until a handler stops it.
    pub fn process(&self, request: &Request) -> Response {
        let mut response = Response::new();
        for (name, handler) in &self.handlers {
            if handler.handle(request, &mut response) == Flow::Stop {
                log::debug!("Plugin '{}' stopped the chain for {}", name, request.peer());
                break;
            }
        }
        response
    }
}
