//! Section-type plugins.
//!
//! A plugin owns the logic for one section type. The comparison engine only
//! asks for a textual representation of section content; a plugin that does
//! not offer one, or fails to produce it, is replaced by the generic
//! canonical JSON form.

mod builtin;
mod registry;

use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;

pub use builtin::{default_registry, FieldTextPlugin};
pub use registry::PluginRegistry;

/// Failure surfaced by a plugin or by plugin lookup.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PluginError {
    /// Looking up the plugin for a section type failed
    #[error("failed to resolve plugin for section type '{section_type}': {reason}")]
    Resolve {
        section_type: String,
        reason: String,
    },
    /// The plugin could not render content as text
    #[error("plugin for section type '{section_type}' could not render text: {reason}")]
    Representation {
        section_type: String,
        reason: String,
    },
}

impl PluginError {
    pub fn representation(section_type: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Representation {
            section_type: section_type.into(),
            reason: reason.into(),
        }
    }
}

/// Convenience result alias for plugin operations.
pub type PluginResult<T> = std::result::Result<T, PluginError>;

/// Capability: render section content as diffable text.
pub trait TextRepresentation: Send + Sync {
    /// # Errors
    ///
    /// Implementors return `PluginError::Representation` for content they
    /// cannot render.
    fn text_representation(&self, content: &Value) -> PluginResult<String>;
}

/// Per-section-type behavior.
pub trait SectionPlugin: Send + Sync {
    /// Section type this plugin handles.
    fn section_type(&self) -> &str;

    /// Text rendering capability, if the plugin has one.
    fn text_capability(&self) -> Option<&dyn TextRepresentation> {
        None
    }
}

/// Looks up the plugin for a section type.
pub trait PluginResolver: Send + Sync {
    /// `Ok(None)` means no plugin handles the type.
    ///
    /// # Errors
    ///
    /// `PluginError::Resolve` if lookup itself fails.
    fn resolve(&self, section_type: &str) -> PluginResult<Option<Arc<dyn SectionPlugin>>>;
}
