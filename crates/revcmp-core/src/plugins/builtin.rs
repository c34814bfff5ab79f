//! Built-in plugins for plain text section types.

use serde_json::Value;

use super::{PluginError, PluginRegistry, PluginResult, SectionPlugin, TextRepresentation};

/// Renders one string field of the section content as its text.
///
/// Content that is itself a string is used as-is.
#[derive(Debug, Clone)]
pub struct FieldTextPlugin {
    section_type: String,
    field: String,
}

impl FieldTextPlugin {
    pub fn new(section_type: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            section_type: section_type.into(),
            field: field.into(),
        }
    }
}

impl SectionPlugin for FieldTextPlugin {
    fn section_type(&self) -> &str {
        &self.section_type
    }

    fn text_capability(&self) -> Option<&dyn TextRepresentation> {
        Some(self)
    }
}

impl TextRepresentation for FieldTextPlugin {
    fn text_representation(&self, content: &Value) -> PluginResult<String> {
        match content {
            Value::String(text) => Ok(text.clone()),
            Value::Object(obj) => match obj.get(&self.field) {
                Some(Value::String(text)) => Ok(text.clone()),
                Some(_) => Err(PluginError::representation(
                    &self.section_type,
                    format!("field '{}' is not a string", self.field),
                )),
                None => Err(PluginError::representation(
                    &self.section_type,
                    format!("missing field '{}'", self.field),
                )),
            },
            _ => Err(PluginError::representation(
                &self.section_type,
                "content is neither a string nor an object",
            )),
        }
    }
}

/// Registry with the built-in `text` and `markdown` plugins, both reading
/// the `body` field.
pub fn default_registry() -> PluginRegistry {
    PluginRegistry::new()
        .with(FieldTextPlugin::new("text", "body"))
        .with(FieldTextPlugin::new("markdown", "body"))
}
