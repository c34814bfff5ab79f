use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single keyed content block within a revision
///
/// - `key` is unique within its revision and stable across revisions while
///   the section survives (edited, moved or untouched)
/// - `section_type` names the plugin that interprets `content`
/// - `content == None` marks a soft-deleted section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub key: String,

    #[serde(rename = "type")]
    pub section_type: String,

    #[serde(default)]
    pub content: Option<Value>,
}

impl Section {
    pub fn new(key: impl Into<String>, section_type: impl Into<String>, content: Value) -> Self {
        Self {
            key: key.into(),
            section_type: section_type.into(),
            content: Some(content),
        }
    }

    /// A section whose content has been soft-deleted
    pub fn tombstone(key: impl Into<String>, section_type: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            section_type: section_type.into(),
            content: None,
        }
    }

    pub fn is_deleted(&self) -> bool {
        self.content.is_none()
    }
}
