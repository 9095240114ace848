use serde_json::{Map, Value};

use crate::classify::json_kind_name;
use crate::error::{GenError, Result};

/// Pick the object whose shape becomes the top-level class.
///
/// A top-level array stands for "many records of one shape": its first
/// element is the representative and the rest are discarded unread, the
/// same first-element policy nested arrays get.
pub fn select_root(value: &Value) -> Result<&Map<String, Value>> {
    let candidate = match value {
        Value::Array(xs) => {
            let Some(first) = xs.first() else {
                return Err(GenError::UnsupportedRoot { kind: "an empty array" });
            };
            if xs.len() > 1 {
                tracing::debug!(discarded = xs.len() - 1, "top-level array: inferring from the first element");
            }
            if !first.is_object() {
                return Err(GenError::UnsupportedRoot {
                    kind: "an array whose first element is not an object",
                });
            }
            first
        }
        other => other,
    };
    match candidate {
        Value::Object(map) if map.is_empty() => Err(GenError::EmptySchema),
        Value::Object(map) => Ok(map),
        other => Err(GenError::UnsupportedRoot { kind: json_kind_name(other) }),
    }
}
