//! Comparison options.

use serde::{Deserialize, Serialize};

use crate::errors::{Result, RevcmpError};

/// Options for a revision comparison
///
/// Every field has a default, so a TOML file only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompareOptions {
    /// Compute word-level inline tokens for each diff
    pub inline_tokens: bool,
    /// Longest line (in bytes) that is still word-diffed
    pub max_inline_line_len: usize,
    /// Field that identifies an embedded metadata reference
    pub reference_key: String,
    /// Upper bound on sections per revision, unbounded if unset
    pub max_sections: Option<usize>,
}

impl Default for CompareOptions {
    fn default() -> Self {
        Self {
            inline_tokens: true,
            max_inline_line_len: 10_000,
            reference_key: "id".to_string(),
            max_sections: None,
        }
    }
}

impl CompareOptions {
    /// Parse options from TOML text.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` if the text is not valid TOML, has a field of the
    /// wrong type, or sets an empty `reference_key`.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let options: Self = toml::from_str(text).map_err(|e| RevcmpError::InvalidConfig {
            reason: e.to_string(),
        })?;
        options.validate()?;
        Ok(options)
    }

    /// # Errors
    ///
    /// `InvalidConfig` if `reference_key` is empty.
    pub fn validate(&self) -> Result<()> {
        if self.reference_key.is_empty() {
            return Err(RevcmpError::InvalidConfig {
                reason: "reference_key must not be empty".to_string(),
            });
        }
        Ok(())
    }
}
