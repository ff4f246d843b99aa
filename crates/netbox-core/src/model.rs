// ── Request shapes ──
//
// Filters and payloads stay open-ended JSON maps: NetBox's schema is
// versioned independently and far richer than this crate should encode.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Query filters, forwarded verbatim as URL parameters.
pub type FilterSet = Map<String, Value>;

/// Writable fields of an object, forwarded verbatim as a JSON body.
pub type ObjectPayload = Map<String, Value>;

/// Numeric primary key of a NetBox object within its collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(u64);

impl ObjectId {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }
}

impl From<u64> for ObjectId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Flatten a filter map into query pairs.
///
/// Strings go out as-is, numbers and booleans as their JSON text, lists
/// repeat the key once per element, `null` drops the key, and nested
/// objects are sent as compact JSON.
pub fn query_pairs(filters: &FilterSet) -> Vec<(String, String)> {
    let mut pairs = Vec::with_capacity(filters.len());
    for (key, value) in filters {
        match value {
            Value::Array(items) => {
                for item in items {
                    if let Some(text) = scalar_text(item) {
                        pairs.push((key.clone(), text));
                    }
                }
            }
            other => {
                if let Some(text) = scalar_text(other) {
                    pairs.push((key.clone(), text));
                }
            }
        }
    }
    pairs
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(_) | Value::Object(_) => Some(value.to_string()),
    }
}
