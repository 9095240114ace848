//! Schema inference: one decoded document -> a flat arena of class
//! descriptors.
//!
//! Walk order is pre-order, depth-first, in source key order. A class is
//! registered before its children are visited, so the root is always first
//! and every nested class follows the class that first mentions it.
//!
//! Every object occurrence gets its own descriptor. Two objects under the same
//! key are never merged, even when their shapes agree; duplicate names are
//! the collision resolver's business.
pub mod root;

use serde_json::{Map, Value};

use crate::classify::{classify, ValueKind};
use crate::error::{GenError, Result};
use crate::ir::{AttributeDescriptor, ClassDescriptor, ClassId, Schema, TypeRef};
use crate::naming;

pub use root::select_root;

/// Path of the document root in error messages.
pub const ROOT_PATH: &str = "$";

// ------------------------------- Front API -------------------------------- //

/// Infer the class schema of `value`, naming the root class `top_level_name`.
///
/// A non-empty top-level array is reduced to its first element; see
/// [`select_root`].
pub fn infer(value: &Value, top_level_name: &str) -> Result<Schema> {
    let object = select_root(value)?;
    infer_object(object, top_level_name)
}

/// Infer from an object already known to be the representative root.
pub fn infer_object(object: &Map<String, Value>, top_level_name: &str) -> Result<Schema> {
    if object.is_empty() {
        return Err(GenError::EmptySchema);
    }
    naming::validate_key(top_level_name).map_err(|e| e.at(ROOT_PATH))?;
    let mut walker = Walker::default();
    walker.object(top_level_name, object, ROOT_PATH)?;
    tracing::debug!(classes = walker.classes.len(), "inference finished");
    Ok(Schema { classes: walker.classes })
}

// ------------------------------- Walk ------------------------------------- //

#[derive(Default)]
struct Walker {
    classes: Vec<ClassDescriptor>,
}

impl Walker {
    fn object(&mut self, raw_name: &str, map: &Map<String, Value>, path: &str) -> Result<ClassId> {
        let id = ClassId(self.classes.len());
        self.classes.push(ClassDescriptor {
            id,
            raw_name: raw_name.to_string(),
            path: path.to_string(),
            attributes: Vec::new(),
        });

        let mut attributes = Vec::with_capacity(map.len());
        for (key, value) in map {
            let at = child_path(path, key);
            naming::validate_key(key).map_err(|e| e.at(&at))?;
            let ty = self.attribute_type(key, classify(value), &at)?;
            attributes.push(AttributeDescriptor { name: key.clone(), ty });
        }
        tracing::debug!(class = raw_name, path, attributes = attributes.len(), "inferred class");
        self.classes[id.0].attributes = attributes;
        Ok(id)
    }

    /// Nested objects (directly or as array elements) are named after `key`.
    fn attribute_type(&mut self, key: &str, kind: ValueKind<'_>, path: &str) -> Result<TypeRef> {
        match kind {
            ValueKind::Scalar(scalar) => Ok(TypeRef::Scalar(scalar)),
            ValueKind::Object(map) => Ok(TypeRef::ClassReference(self.object(key, map, path)?)),
            ValueKind::Array(item) => {
                let item = self.attribute_type(key, *item, &format!("{path}[0]"))?;
                Ok(TypeRef::Array(Box::new(item)))
            }
            ValueKind::EmptyArray => Err(GenError::EmptyArray { path: path.to_string() }),
        }
    }
}

// ------------------------------- Utilities -------------------------------- //

/// `$.a.b` for plain keys, `$["first name"]` for anything else.
fn child_path(parent: &str, key: &str) -> String {
    let plain = !key.is_empty() && key.chars().all(|c| c.is_alphanumeric() || c == '_');
    if plain {
        format!("{parent}.{key}")
    } else {
        format!("{parent}[{}]", serde_json::Value::from(key))
    }
}

// ------------------------------- Tests ------------------------------------ //
