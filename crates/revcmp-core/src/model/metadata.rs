use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::canonical;

/// Revision metadata: authorship, timestamps, flags and any other
/// non-section fields
///
/// Backed by a `BTreeMap` so iteration and serialization order are stable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Metadata {
    data: BTreeMap<String, Value>,
}

impl Metadata {
    /// Create a new empty Metadata instance
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        self.data.insert(key.into(), value);
    }

    /// Builder-style `set`
    pub fn with(mut self, key: impl Into<String>, value: Value) -> Self {
        self.set(key, value);
        self
    }

    /// Canonical text form used for metadata diffing.
    ///
    /// Any field whose value is an object carrying `reference_key` (an
    /// embedded reference such as an expanded author record) is reduced to
    /// that identifier. The result is pretty-printed JSON with sorted keys.
    pub fn canonical_text(&self, reference_key: &str) -> String {
        let reduced: serde_json::Map<String, Value> = self
            .data
            .iter()
            .map(|(field, value)| (field.clone(), reduce_reference(value, reference_key)))
            .collect();
        canonical::to_canonical_text(&Value::Object(reduced))
    }
}

fn reduce_reference(value: &Value, reference_key: &str) -> Value {
    match value {
        Value::Object(obj) => match obj.get(reference_key) {
            Some(id) => id.clone(),
            None => value.clone(),
        },
        _ => value.clone(),
    }
}
