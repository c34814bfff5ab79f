//! In-memory plugin registry.

use std::collections::HashMap;
use std::sync::Arc;

use super::{PluginResolver, PluginResult, SectionPlugin};

/// Registry of section plugins keyed by section type.
#[derive(Default, Clone)]
pub struct PluginRegistry {
    plugins: HashMap<String, Arc<dyn SectionPlugin>>,
}

impl PluginRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a plugin under its `SectionPlugin::section_type`, replacing
    /// any plugin already registered for that type.
    pub fn register<P>(&mut self, plugin: P)
    where
        P: SectionPlugin + 'static,
    {
        self.register_arc(Arc::new(plugin));
    }

    pub fn register_arc(&mut self, plugin: Arc<dyn SectionPlugin>) {
        self.plugins
            .insert(plugin.section_type().to_string(), plugin);
    }

    /// Builder-style `register`.
    #[must_use]
    pub fn with<P>(mut self, plugin: P) -> Self
    where
        P: SectionPlugin + 'static,
    {
        self.register(plugin);
        self
    }

    pub fn get(&self, section_type: &str) -> Option<Arc<dyn SectionPlugin>> {
        self.plugins.get(section_type).cloned()
    }

    /// Registered section types, sorted.
    pub fn section_types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = self.plugins.keys().map(String::as_str).collect();
        types.sort_unstable();
        types
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }
}

impl PluginResolver for PluginRegistry {
    fn resolve(&self, section_type: &str) -> PluginResult<Option<Arc<dyn SectionPlugin>>> {
        Ok(self.get(section_type))
    }
}

impl std::fmt::Debug for PluginRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginRegistry")
            .field("section_types", &self.section_types())
            .finish()
    }
}
