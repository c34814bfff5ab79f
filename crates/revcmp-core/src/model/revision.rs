use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::{Metadata, Section};
use crate::errors::{Result, RevcmpError};

/// One immutable version of a document: ordered sections plus metadata
///
/// `id` identifies the revision in logs and errors; it is not part of the
/// metadata diff.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Revision {
    pub id: String,

    #[serde(default)]
    pub metadata: Metadata,

    #[serde(default)]
    pub sections: Vec<Section>,
}

impl Revision {
    pub fn new(id: impl Into<String>, metadata: Metadata, sections: Vec<Section>) -> Self {
        Self {
            id: id.into(),
            metadata,
            sections,
        }
    }

    /// Section keys in document order
    pub fn section_keys(&self) -> Vec<&str> {
        self.sections.iter().map(|s| s.key.as_str()).collect()
    }

    pub fn section(&self, key: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.key == key)
    }

    /// Check that no section key occurs twice.
    ///
    /// # Errors
    ///
    /// `DuplicateSectionKey` naming the first repeated key.
    pub fn validate_unique_keys(&self) -> Result<()> {
        let mut seen = HashSet::with_capacity(self.sections.len());
        for section in &self.sections {
            if !seen.insert(section.key.as_str()) {
                return Err(RevcmpError::DuplicateSectionKey {
                    revision_id: self.id.clone(),
                    key: section.key.clone(),
                });
            }
        }
        Ok(())
    }
}
