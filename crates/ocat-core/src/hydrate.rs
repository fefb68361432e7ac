//! # Hydration Reader
//!
//! [`RawFields`] reads loosely-typed JSON input for entity hydration.
//! Every accessor is total: a key that is absent, or present with the wrong
//! shape, yields the field's default.
//!
//! Presence is checked explicitly per key and per shape, never by
//! truthiness. A present `false` stays `false`, a present `0` stays `0`, and
//! an empty string stays empty. Wrong-typed values are never coerced: the
//! string `"true"` does not become a boolean, and an array arriving where an
//! object is expected reads as an absent object.

use serde_json::{Map, Value};

/// Read-only view over one JSON object used during hydration.
///
/// Input that is not an object (null, array, scalar) reads as an object
/// with no keys.
#[derive(Debug, Clone, Copy)]
pub struct RawFields<'a> {
    fields: Option<&'a Map<String, Value>>,
}

impl<'a> RawFields<'a> {
    /// Wrap raw input.
    pub fn new(raw: &'a Value) -> Self {
        match raw {
            Value::Object(fields) => Self {
                fields: Some(fields),
            },
            _ => Self::empty(),
        }
    }

    /// A reader with no keys.
    pub fn empty() -> Self {
        Self { fields: None }
    }

    /// The value under `key`, if present (including explicit `null`).
    pub fn raw(&self, key: &str) -> Option<&'a Value> {
        self.fields.and_then(|fields| fields.get(key))
    }

    /// Returns true if `key` is present, whatever its value.
    pub fn contains(&self, key: &str) -> bool {
        self.fields.is_some_and(|fields| fields.contains_key(key))
    }

    /// The string under `key`, or `""`.
    pub fn text(&self, key: &str) -> String {
        match self.raw(key) {
            Some(Value::String(s)) => s.clone(),
            other => {
                defaulted(key, "string", other);
                String::new()
            }
        }
    }

    /// The boolean under `key`, or `false`.
    pub fn flag(&self, key: &str) -> bool {
        match self.raw(key) {
            Some(Value::Bool(b)) => *b,
            other => {
                defaulted(key, "boolean", other);
                false
            }
        }
    }

    /// The integer under `key`, or `None`. `0` and negative integers are
    /// kept; fractional numbers are not integers.
    pub fn integer(&self, key: &str) -> Option<i64> {
        match self.raw(key) {
            Some(Value::Number(n)) if n.is_i64() => n.as_i64(),
            other => {
                defaulted(key, "integer", other);
                None
            }
        }
    }

    /// The array elements under `key`, verbatim, or an empty list.
    ///
    /// Elements are not filtered: their shape is for validation to judge,
    /// which reports offenders at their index.
    pub fn list(&self, key: &str) -> Vec<Value> {
        match self.raw(key) {
            Some(Value::Array(items)) => items.clone(),
            other => {
                defaulted(key, "array", other);
                Vec::new()
            }
        }
    }

    /// A reader over the nested object under `key`, or an empty reader.
    pub fn object(&self, key: &str) -> RawFields<'a> {
        match self.raw(key) {
            Some(Value::Object(fields)) => RawFields {
                fields: Some(fields),
            },
            other => {
                defaulted(key, "object", other);
                Self::empty()
            }
        }
    }

    /// An identifier under `key`: a string verbatim, or an integer rendered
    /// in decimal. Anything else yields `""`.
    pub fn identifier(&self, key: &str) -> String {
        match self.raw(key) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) if n.is_i64() || n.is_u64() => n.to_string(),
            other => {
                defaulted(key, "identifier", other);
                String::new()
            }
        }
    }
}

impl Default for RawFields<'_> {
    fn default() -> Self {
        Self::empty()
    }
}

/// JSON type name of a value, as used in issue messages.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_i64() || n.is_u64() => "integer",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn defaulted(key: &str, expected: &str, found: Option<&Value>) {
    match found {
        None => tracing::trace!(field = key, "absent; using default"),
        Some(value) => tracing::trace!(
            field = key,
            expected,
            found = json_type_name(value),
            "wrong shape; using default"
        ),
    }
}
