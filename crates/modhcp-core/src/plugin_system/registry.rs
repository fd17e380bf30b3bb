use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::plugin_system::error::PluginSystemError;
use crate::plugin_system::traits::Plugin;

/// A named extension point: the unique name plus its capability object.
pub struct PluginDescriptor {
    name: String,
    plugin: Arc<dyn Plugin>,
}

impl PluginDescriptor {
    pub fn new(name: impl Into<String>, plugin: Arc<dyn Plugin>) -> Self {
        Self {
            name: name.into(),
            plugin,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn plugin(&self) -> &Arc<dyn Plugin> {
        &self.plugin
    }
}

impl fmt::Debug for PluginDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginDescriptor")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Ordered, deduplicated catalogue of plugins.
///
/// Registration order is the order the server evaluates handlers in and is
/// never changed after the fact. Registration takes `&mut self`; once
/// bootstrap is done the registry is frozen behind an `Arc`.
#[derive(Debug, Default)]
pub struct PluginRegistry {
    /// Descriptors in registration order
    plugins: Vec<Arc<PluginDescriptor>>,
    /// Name -> position in `plugins`
    index: HashMap<String, usize>,
}

impl PluginRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a plugin. Fails without touching the registry if the name is
    /// empty or already taken.
    pub fn register(&mut self, descriptor: Arc<PluginDescriptor>) -> Result<(), PluginSystemError> {
        let name = descriptor.name();
        if name.is_empty() {
            return Err(PluginSystemError::EmptyName);
        }
        if self.index.contains_key(name) {
            return Err(PluginSystemError::DuplicatePlugin {
                name: name.to_string(),
            });
        }

        self.index.insert(name.to_string(), self.plugins.len());
        self.plugins.push(descriptor);
        Ok(())
    }

    /// Get the descriptor registered under `name`
    pub fn lookup(&self, name: &str) -> Result<Arc<PluginDescriptor>, PluginSystemError> {
        self.index
            .get(name)
            .map(|&position| self.plugins[position].clone())
            .ok_or_else(|| PluginSystemError::UnknownPlugin {
                name: name.to_string(),
            })
    }

    /// All descriptors, in registration order
    pub fn all(&self) -> &[Arc<PluginDescriptor>] {
        &self.plugins
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<PluginDescriptor>> {
        self.plugins.iter()
    }

    /// Registered names, in registration order
    pub fn names(&self) -> Vec<&str> {
        self.plugins.iter().map(|p| p.name()).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }
}
