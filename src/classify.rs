//! Value classifier: one decoded JSON value -> its semantic kind.
//!
//! Policy, applied without any target-language bias:
//! - `null` carries no structure and is treated as a string.
//! - numbers decoded as i64/u64 are integers; anything else is a float.
//! - arrays are classified by their *first* element only. Homogeneity of the
//!   remaining elements is never checked.
use serde_json::{Map, Value};

/// Leaf kinds with no internal attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Boolean,
    Integer,
    Float,
    String,
}

impl ScalarKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ScalarKind::Boolean => "boolean",
            ScalarKind::Integer => "integer",
            ScalarKind::Float => "float",
            ScalarKind::String => "string",
        }
    }
}

/// Transient kind of a value, borrowed from the source tree.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueKind<'a> {
    Scalar(ScalarKind),
    /// Kind of the first element.
    Array(Box<ValueKind<'a>>),
    /// `[]`: there is no element to infer from.
    EmptyArray,
    Object(&'a Map<String, Value>),
}

/// Total: every value has a kind. Callers decide whether `EmptyArray` is fatal.
pub fn classify(value: &Value) -> ValueKind<'_> {
    match value {
        Value::Null => ValueKind::Scalar(ScalarKind::String),
        Value::Bool(_) => ValueKind::Scalar(ScalarKind::Boolean),
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                ValueKind::Scalar(ScalarKind::Integer)
            } else {
                ValueKind::Scalar(ScalarKind::Float)
            }
        }
        Value::String(_) => ValueKind::Scalar(ScalarKind::String),
        Value::Array(xs) => match xs.first() {
            None => ValueKind::EmptyArray,
            Some(first) => ValueKind::Array(Box::new(classify(first))),
        },
        Value::Object(map) => ValueKind::Object(map),
    }
}

/// Short human name of a value's JSON kind, for error messages.
pub fn json_kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(xs) if xs.is_empty() => "an empty array",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn scalars() {
        assert_eq!(classify(&json!(true)), ValueKind::Scalar(ScalarKind::Boolean));
        assert_eq!(classify(&json!(42)), ValueKind::Scalar(ScalarKind::Integer));
        assert_eq!(classify(&json!(-7)), ValueKind::Scalar(ScalarKind::Integer));
        assert_eq!(classify(&json!(u64::MAX)), ValueKind::Scalar(ScalarKind::Integer));
        assert_eq!(classify(&json!(4.3)), ValueKind::Scalar(ScalarKind::Float));
        assert_eq!(classify(&json!("x")), ValueKind::Scalar(ScalarKind::String));
    }

    #[test]
    fn null_defaults_to_string() {
        assert_eq!(classify(&Value::Null), ValueKind::Scalar(ScalarKind::String));
    }

    #[test]
    fn written_fraction_is_a_float() {
        let v: Value = serde_json::from_str("1.0").unwrap();
        assert_eq!(classify(&v), ValueKind::Scalar(ScalarKind::Float));
    }

    #[test]
    fn arrays_use_first_element_only() {
        let v = json!([1, "x", null]);
        assert_eq!(
            classify(&v),
            ValueKind::Array(Box::new(ValueKind::Scalar(ScalarKind::Integer)))
        );
    }

    #[test]
    fn empty_and_nested_arrays() {
        assert_eq!(classify(&json!([])), ValueKind::EmptyArray);
        assert_eq!(
            classify(&json!([[]])),
            ValueKind::Array(Box::new(ValueKind::EmptyArray))
        );
        let v = json!([[1.5]]);
        assert_eq!(
            classify(&v),
            ValueKind::Array(Box::new(ValueKind::Array(Box::new(ValueKind::Scalar(
                ScalarKind::Float
            )))))
        );
    }

    #[test]
    fn arrays_of_objects_borrow_the_first_object() {
        let v = json!([{"a": 1}, {"b": 2}]);
        match classify(&v) {
            ValueKind::Array(inner) => match *inner {
                ValueKind::Object(map) => assert!(map.contains_key("a")),
                other => panic!("unexpected: {other:?}"),
            },
            other => panic!("unexpected: {other:?}"),
        }
    }
}
