//! Deterministic JSON text form used when no plugin can render content.
//!
//! Objects are re-emitted with keys in sorted order regardless of how the
//! `serde_json::Map` backing them orders its entries, then pretty-printed so
//! that line diffs land on individual fields.

use serde_json::{Map, Value};

/// Rebuild `value` with every object's keys in lexicographic order.
pub fn sorted(value: &Value) -> Value {
    match value {
        Value::Object(obj) => {
            let mut keys: Vec<&String> = obj.keys().collect();
            keys.sort();
            let mut out = Map::with_capacity(obj.len());
            for key in keys {
                out.insert(key.clone(), sorted(&obj[key.as_str()]));
            }
            Value::Object(out)
        }
        Value::Array(items) => Value::Array(items.iter().map(sorted).collect()),
        other => other.clone(),
    }
}

/// Pretty JSON text of `value` with sorted keys.
pub fn to_canonical_text(value: &Value) -> String {
    // Serializing a `Value` cannot fail: all map keys are strings.
    serde_json::to_string_pretty(&sorted(value)).unwrap_or_default()
}
