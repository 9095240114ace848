// Language-neutral class IR. No serde_json::Value and no target names here.
use std::fmt;

use crate::classify::ScalarKind;

/// Opaque handle into a [`Schema`]'s arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassId(pub(crate) usize);

#[derive(Debug, Clone, PartialEq)]
pub enum TypeRef {
    Scalar(ScalarKind),
    ClassReference(ClassId),
    /// Exactly one element type.
    Array(Box<TypeRef>),
    /// Never produced by inference (objects always become classes); profiles
    /// still know how to spell it.
    Map { key: Box<TypeRef>, value: Box<TypeRef> },
}

impl TypeRef {
    /// Element types of a container, in order; empty for non-containers.
    pub fn container_element_types(&self) -> Vec<&TypeRef> {
        match self {
            TypeRef::Array(item) => vec![item.as_ref()],
            TypeRef::Map { key, value } => vec![key.as_ref(), value.as_ref()],
            TypeRef::Scalar(_) | TypeRef::ClassReference(_) => Vec::new(),
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Scalar(kind) => f.write_str(kind.as_str()),
            TypeRef::ClassReference(id) => write!(f, "class#{}", id.0),
            TypeRef::Array(item) => write!(f, "array<{item}>"),
            TypeRef::Map { key, value } => write!(f, "map<{key}, {value}>"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AttributeDescriptor {
    /// Original key, exactly as it appeared in the document.
    pub name: String,
    pub ty: TypeRef,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassDescriptor {
    pub id: ClassId,
    /// Key (or top-level name) the class was inferred under.
    pub raw_name: String,
    /// Key path of the object in the source document, e.g. `$.address`.
    pub path: String,
    /// Source key order, never sorted.
    pub attributes: Vec<AttributeDescriptor>,
}

/// Flat arena of classes from one inference pass. Index 0 is the root; the
/// rest follow in first-encountered pre-order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    pub(crate) classes: Vec<ClassDescriptor>,
}

impl Schema {
    pub fn root(&self) -> Option<&ClassDescriptor> {
        self.classes.first()
    }

    pub fn get(&self, id: ClassId) -> Option<&ClassDescriptor> {
        self.classes.get(id.0)
    }

    pub fn classes(&self) -> &[ClassDescriptor] {
        &self.classes
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn container_element_types() {
        let arr = TypeRef::Array(Box::new(TypeRef::Scalar(ScalarKind::String)));
        assert_eq!(arr.container_element_types(), [&TypeRef::Scalar(ScalarKind::String)]);

        let map = TypeRef::Map {
            key: Box::new(TypeRef::Scalar(ScalarKind::String)),
            value: Box::new(TypeRef::ClassReference(ClassId(1))),
        };
        assert_eq!(map.container_element_types().len(), 2);
        assert!(TypeRef::Scalar(ScalarKind::Float).container_element_types().is_empty());
    }

    #[test]
    fn display_is_compact() {
        let ty = TypeRef::Array(Box::new(TypeRef::ClassReference(ClassId(2))));
        assert_eq!(ty.to_string(), "array<class#2>");
    }
}
