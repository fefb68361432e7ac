//! # Shared Field Rules
//!
//! Schema fragments for the field shapes that recur across entities. Every
//! fragment carries its own `errorMessage` annotations, so an entity schema
//! is a table of field names to rules and the messages cannot drift between
//! entities.

use serde_json::{json, Map, Value};

/// Maximum length of short text fields (titles, summaries, links).
pub const SHORT_TEXT_MAX: u64 = 255;

/// Wrap field rules into an entity schema document.
pub fn entity_document(title: &str, properties: Value) -> Value {
    json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "title": title,
        "type": "object",
        "properties": properties,
        "errorMessage": { "type": format!("{title} must be an object") }
    })
}

/// Wrap field rules into a nested object rule.
pub fn nested_object(label: &str, properties: Value) -> Value {
    json!({
        "type": "object",
        "properties": properties,
        "errorMessage": { "type": format!("{label} must be an object") }
    })
}

/// Non-empty text of at most `max` characters.
pub fn required_text(label: &str, max: u64) -> Value {
    json!({
        "type": "string",
        "minLength": 1,
        "maxLength": max,
        "errorMessage": {
            "type": format!("{label} must be text"),
            "minLength": format!("{label} is required"),
            "maxLength": format!("{label} may be at most {max} characters")
        }
    })
}

/// Text of at most `max` characters; empty allowed.
pub fn bounded_text(label: &str, max: u64) -> Value {
    json!({
        "type": "string",
        "maxLength": max,
        "errorMessage": {
            "type": format!("{label} must be text"),
            "maxLength": format!("{label} may be at most {max} characters")
        }
    })
}

/// Unbounded text; empty allowed.
pub fn text(label: &str) -> Value {
    json!({
        "type": "string",
        "errorMessage": { "type": format!("{label} must be text") }
    })
}

/// Empty, or text fully matching `pattern`.
///
/// `pattern` must describe the non-empty form only; it is wrapped so that
/// the empty string also matches.
pub fn optional_pattern(label: &str, pattern: &str, hint: &str) -> Value {
    json!({
        "type": "string",
        "pattern": format!("^({pattern})?$"),
        "errorMessage": {
            "type": format!("{label} must be text"),
            "pattern": format!("{label} must be {hint}")
        }
    })
}

/// An absolute URL of at most `max` characters.
pub fn url(label: &str, max: u64) -> Value {
    json!({
        "type": "string",
        "maxLength": max,
        "format": "url",
        "errorMessage": {
            "type": format!("{label} must be text"),
            "maxLength": format!("{label} may be at most {max} characters"),
            "format": format!("{label} must be a valid URL")
        }
    })
}

/// Empty, or an absolute URL.
pub fn optional_url(label: &str) -> Value {
    json!({
        "type": "string",
        "format": "optional-url",
        "errorMessage": {
            "type": format!("{label} must be text"),
            "format": format!("{label} must be a valid URL or empty")
        }
    })
}

/// Empty, or an RFC 3339 date-time.
pub fn optional_date_time(label: &str) -> Value {
    json!({
        "type": "string",
        "format": "optional-date-time",
        "errorMessage": {
            "type": format!("{label} must be text"),
            "format": format!("{label} must be an ISO 8601 date-time or empty")
        }
    })
}

/// A boolean.
pub fn flag(label: &str) -> Value {
    json!({
        "type": "boolean",
        "errorMessage": { "type": format!("{label} must be true or false") }
    })
}

/// An array whose items are all text.
pub fn text_list(label: &str) -> Value {
    json!({
        "type": "array",
        "items": {
            "type": "string",
            "errorMessage": { "type": format!("Every {label} entry must be text") }
        },
        "errorMessage": { "type": format!("{label} must be a list") }
    })
}

/// An integer of at least `minimum`, or null.
pub fn optional_integer_at_least(label: &str, minimum: i64) -> Value {
    json!({
        "type": ["integer", "null"],
        "minimum": minimum,
        "errorMessage": {
            "type": format!("{label} must be a whole number"),
            "minimum": format!("{label} must be at least {minimum}")
        }
    })
}

/// One of a fixed set of literals.
pub fn one_of(label: &str, options: &[Value]) -> Value {
    let listed: Vec<String> = options.iter().map(Value::to_string).collect();
    json!({
        "enum": options,
        "errorMessage": {
            "enum": format!("{label} must be one of {}", listed.join(", "))
        }
    })
}

/// The `id`, `title`, `summary` and `description` rules shared by every
/// entity, with the given title and summary rules.
pub fn common_fields(title: Value, summary: Value) -> Map<String, Value> {
    let mut fields = Map::new();
    fields.insert("id".to_string(), text("Id"));
    fields.insert("title".to_string(), title);
    fields.insert("summary".to_string(), summary);
    fields.insert("description".to_string(), text("Description"));
    fields
}

/// Merge shared and entity-specific field rules into one properties object.
pub fn properties(common: Map<String, Value>, specific: Value) -> Value {
    let mut merged = common;
    if let Value::Object(extra) = specific {
        merged.extend(extra);
    }
    Value::Object(merged)
}
