//! # Entity Schemas
//!
//! An [`EntitySchema`] is the declarative rule set of one entity kind: a
//! JSON Schema (draft 2020-12) document, compiled once on first use and
//! shared by every validation of that kind.
//!
//! ## Issue Conversion
//!
//! Each schema violation becomes one [`ValidationIssue`]:
//!
//! - **Path**: the violation's JSON-pointer instance location, decoded into
//!   a structured [`Path`]. A numeric token is an array index when the
//!   instance at that point is an array, otherwise an object key.
//! - **Kind**: derived from the violated keyword by [`kind_for_keyword`].
//! - **Message**: the `errorMessage` annotation of the subschema holding the
//!   keyword, looked up by keyword name, e.g.
//!   `{"minLength": 1, "errorMessage": {"minLength": "Title is required"}}`.
//!   Without an annotation the validator's own message is used.
//! - **Types**: `invalid_type` issues carry the schema's `type` as the
//!   expected type; every issue carries the JSON type found at the path.
//!
//! Issues keep the validator's detection order.

use std::fmt;
use std::sync::OnceLock;

use jsonschema::Validator;
use serde::Serialize;
use serde_json::Value;

use ocat_core::hydrate::json_type_name;
use ocat_core::{IssueKind, OcatError, Path, PathSegment, ValidationIssue, ValidationResult};

use crate::formats;

/// Annotation keyword holding per-keyword message overrides.
pub const ERROR_MESSAGE_KEYWORD: &str = "errorMessage";

struct CompiledSchema {
    document: Value,
    validator: Validator,
}

/// Declarative schema for one entity kind.
///
/// Construct with [`EntitySchema::new`] in a `static`:
///
/// ```ignore
/// static SCHEMA: EntitySchema = EntitySchema::new("catalog", catalog_schema);
/// ```
pub struct EntitySchema {
    name: &'static str,
    document: fn() -> Value,
    compiled: OnceLock<Result<CompiledSchema, String>>,
}

impl EntitySchema {
    /// Declare a schema. Nothing is compiled until first use.
    pub const fn new(name: &'static str, document: fn() -> Value) -> Self {
        Self {
            name,
            document,
            compiled: OnceLock::new(),
        }
    }

    /// Entity kind name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// A fresh copy of the JSON Schema document.
    pub fn document(&self) -> Value {
        (self.document)()
    }

    fn compiled(&self) -> Result<&CompiledSchema, OcatError> {
        self.compiled
            .get_or_init(|| compile(self.name, self.document()))
            .as_ref()
            .map_err(|reason| OcatError::SchemaCompile {
                schema: self.name.to_string(),
                reason: reason.clone(),
            })
    }

    /// Compile the schema now, reporting a compile failure as an error.
    ///
    /// # Errors
    ///
    /// Returns `OcatError::SchemaCompile` if the document is not a valid
    /// schema (e.g. an unparsable `pattern`).
    pub fn ensure_compiled(&self) -> Result<(), OcatError> {
        self.compiled().map(|_| ())
    }

    /// Validate a JSON value. Never fails: a schema that cannot compile
    /// yields one root `invalid_schema` issue.
    pub fn validate_value(&self, instance: &Value) -> ValidationResult {
        let compiled = match self.compiled() {
            Ok(compiled) => compiled,
            Err(err) => return schema_failure(err),
        };

        let issues: Vec<ValidationIssue> = compiled
            .validator
            .iter_errors(instance)
            .map(|error| {
                to_issue(
                    &compiled.document,
                    instance,
                    &error.instance_path.to_string(),
                    &error.schema_path.to_string(),
                    error.to_string(),
                )
            })
            .collect();

        tracing::debug!(
            schema = self.name,
            issues = issues.len(),
            "validated instance"
        );

        ValidationResult::from_issues(issues)
    }

    /// Serialize `entity` and validate its canonical JSON form.
    pub fn validate<T: Serialize>(&self, entity: &T) -> ValidationResult {
        match serde_json::to_value(entity) {
            Ok(instance) => self.validate_value(&instance),
            Err(err) => schema_failure(OcatError::Serialization(err)),
        }
    }
}

impl fmt::Debug for EntitySchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntitySchema")
            .field("name", &self.name)
            .field("compiled", &self.compiled.get().map(Result::is_ok))
            .finish()
    }
}

fn compile(name: &str, document: Value) -> Result<CompiledSchema, String> {
    let mut opts = jsonschema::options();
    opts.with_draft(jsonschema::Draft::Draft202012);
    opts.should_validate_formats(true);
    formats::register(&mut opts);

    match opts.build(&document) {
        Ok(validator) => {
            tracing::debug!(schema = name, "compiled entity schema");
            Ok(CompiledSchema {
                document,
                validator,
            })
        }
        Err(err) => {
            tracing::error!(schema = name, error = %err, "entity schema failed to compile");
            Err(err.to_string())
        }
    }
}

fn schema_failure(err: OcatError) -> ValidationResult {
    ValidationResult::from_issues(vec![ValidationIssue::new(
        Path::root(),
        IssueKind::InvalidSchema,
        err.to_string(),
    )])
}

/// Map a JSON Schema keyword to the issue kind it produces.
pub fn kind_for_keyword(keyword: &str) -> IssueKind {
    match keyword {
        "minLength" | "minItems" | "minimum" | "exclusiveMinimum" | "minProperties" => {
            IssueKind::TooSmall
        }
        "maxLength" | "maxItems" | "maximum" | "exclusiveMaximum" | "maxProperties" => {
            IssueKind::TooBig
        }
        "pattern" | "format" => IssueKind::InvalidFormat,
        "type" => IssueKind::InvalidType,
        "enum" | "const" => IssueKind::InvalidEnumValue,
        "anyOf" | "oneOf" => IssueKind::InvalidUnion,
        "required" => IssueKind::Required,
        "additionalProperties" | "unevaluatedProperties" => IssueKind::UnrecognizedKeys,
        _ => IssueKind::Custom,
    }
}

/// Build one issue from a violation's pointers and default message.
fn to_issue(
    document: &Value,
    instance: &Value,
    instance_pointer: &str,
    schema_pointer: &str,
    fallback: String,
) -> ValidationIssue {
    let (subschema_pointer, keyword) = schema_pointer.rsplit_once('/').unwrap_or(("", ""));
    let kind = kind_for_keyword(keyword);
    let subschema = document.pointer(subschema_pointer);

    let message = subschema
        .and_then(|s| s.get(ERROR_MESSAGE_KEYWORD))
        .and_then(|m| m.get(keyword))
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or(fallback);

    let mut issue = ValidationIssue::new(decode_path(instance, instance_pointer), kind, message);

    if kind == IssueKind::InvalidType {
        if let Some(expected) = subschema.and_then(|s| s.get("type")) {
            issue = issue.with_expected_type(render_type(expected));
        }
    }
    if let Some(received) = instance.pointer(instance_pointer) {
        issue = issue.with_received_type(json_type_name(received));
    }
    issue
}

/// Decode a JSON pointer into a structured path, using the instance to
/// tell array indices from numeric object keys.
fn decode_path(instance: &Value, pointer: &str) -> Path {
    let mut segments = Vec::new();
    let mut current = Some(instance);

    for raw in pointer.split('/').skip(1) {
        let token = raw.replace("~1", "/").replace("~0", "~");
        let segment = match (current, token.parse::<usize>()) {
            (Some(Value::Array(_)), Ok(index)) => PathSegment::Index(index),
            _ => PathSegment::Key(token),
        };
        current = match (&segment, current) {
            (PathSegment::Index(index), Some(Value::Array(items))) => items.get(*index),
            (PathSegment::Key(key), Some(Value::Object(fields))) => fields.get(key),
            _ => None,
        };
        segments.push(segment);
    }

    Path::from_segments(segments)
}

fn render_type(expected: &Value) -> String {
    match expected {
        Value::String(single) => single.clone(),
        Value::Array(many) => many
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join(" | "),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn note_schema() -> Value {
        json!({
            "$schema": "https://json-schema.org/draft/2020-12/schema",
            "type": "object",
            "properties": {
                "title": {
                    "type": "string",
                    "minLength": 1,
                    "maxLength": 10,
                    "errorMessage": {
                        "minLength": "Title is required",
                        "maxLength": "Title may be at most 10 characters"
                    }
                },
                "link": {
                    "type": "string",
                    "format": "optional-url",
                    "errorMessage": { "format": "Link must be a valid URL" }
                },
                "count": {
                    "type": ["integer", "null"],
                    "minimum": 200
                },
                "tags": {
                    "type": "array",
                    "items": {
                        "type": "string",
                        "errorMessage": { "type": "Tag must be text" }
                    }
                },
                "level": { "enum": ["A1", "A2"] }
            }
        })
    }

    static NOTE: EntitySchema = EntitySchema::new("note", note_schema);

    fn broken_schema() -> Value {
        json!({ "type": "string", "pattern": "(" })
    }

    static BROKEN: EntitySchema = EntitySchema::new("broken", broken_schema);

    #[test]
    fn test_valid_instance_passes() {
        let result = NOTE.validate_value(&json!({
            "title": "Hello",
            "link": "",
            "count": null,
            "tags": ["a"],
            "level": "A2"
        }));
        assert!(result.is_success(), "{:?}", result.issues());
    }

    #[test]
    fn test_error_message_override_used() {
        let result = NOTE.validate_value(&json!({ "title": "" }));
        assert_eq!(result.len(), 1);
        let issue = &result.issues()[0];
        assert_eq!(issue.path, Path::root().child("title"));
        assert_eq!(issue.kind, IssueKind::TooSmall);
        assert_eq!(issue.message, "Title is required");
        assert_eq!(issue.received_type.as_deref(), Some("string"));
    }

    #[test]
    fn test_format_violation_is_invalid_format() {
        let result = NOTE.validate_value(&json!({ "title": "x", "link": "invalid-url" }));
        assert_eq!(result.len(), 1);
        assert_eq!(result.issues()[0].kind, IssueKind::InvalidFormat);
        assert_eq!(result.issues()[0].message, "Link must be a valid URL");
    }

    #[test]
    fn test_type_violation_carries_expected_type() {
        let result = NOTE.validate_value(&json!({ "title": "x", "count": "many" }));
        assert_eq!(result.len(), 1);
        let issue = &result.issues()[0];
        assert_eq!(issue.kind, IssueKind::InvalidType);
        assert_eq!(issue.expected_type.as_deref(), Some("integer | null"));
        assert_eq!(issue.received_type.as_deref(), Some("string"));
        assert!(!issue.message.is_empty());
    }

    #[test]
    fn test_minimum_is_too_small() {
        let result = NOTE.validate_value(&json!({ "title": "x", "count": 0 }));
        assert_eq!(result.len(), 1);
        assert_eq!(result.issues()[0].kind, IssueKind::TooSmall);
        assert_eq!(result.issues()[0].path.joined(), "count");
    }

    #[test]
    fn test_array_item_path_uses_index() {
        let result = NOTE.validate_value(&json!({ "title": "x", "tags": ["a", 3] }));
        assert_eq!(result.len(), 1);
        let issue = &result.issues()[0];
        assert_eq!(issue.path, Path::root().child("tags").index(1));
        assert_eq!(issue.message, "Tag must be text");
        assert_eq!(issue.expected_type.as_deref(), Some("string"));
    }

    #[test]
    fn test_enum_violation_kind() {
        let result = NOTE.validate_value(&json!({ "title": "x", "level": "Z9" }));
        assert_eq!(result.len(), 1);
        assert_eq!(result.issues()[0].kind, IssueKind::InvalidEnumValue);
    }

    #[test]
    fn test_multiple_violations_all_reported() {
        let result = NOTE.validate_value(&json!({
            "title": "",
            "link": "nope",
            "tags": [1, 2]
        }));
        assert!(!result.is_success());
        assert_eq!(result.len(), 4);
    }

    #[test]
    fn test_root_type_violation_has_root_path() {
        let result = NOTE.validate_value(&json!([]));
        assert_eq!(result.len(), 1);
        assert!(result.issues()[0].path.is_root());
        assert_eq!(result.issues()[0].kind, IssueKind::InvalidType);
    }

    #[test]
    fn test_validation_is_repeatable() {
        let instance = json!({ "title": "", "link": "nope" });
        assert_eq!(NOTE.validate_value(&instance), NOTE.validate_value(&instance));
    }

    #[test]
    fn test_broken_schema_yields_invalid_schema_issue() {
        assert!(BROKEN.ensure_compiled().is_err());
        let result = BROKEN.validate_value(&json!("anything"));
        assert!(!result.is_success());
        assert_eq!(result.len(), 1);
        assert_eq!(result.issues()[0].kind, IssueKind::InvalidSchema);
        assert!(result.issues()[0].path.is_root());
    }

    #[test]
    fn test_validate_serializes_entity() {
        #[derive(Serialize)]
        struct Note {
            title: String,
        }
        let result = NOTE.validate(&Note {
            title: "this title is far too long".to_string(),
        });
        assert_eq!(result.len(), 1);
        assert_eq!(result.issues()[0].kind, IssueKind::TooBig);
    }

    #[test]
    fn test_kind_for_keyword_mapping() {
        assert_eq!(kind_for_keyword("minItems"), IssueKind::TooSmall);
        assert_eq!(kind_for_keyword("maximum"), IssueKind::TooBig);
        assert_eq!(kind_for_keyword("pattern"), IssueKind::InvalidFormat);
        assert_eq!(kind_for_keyword("const"), IssueKind::InvalidEnumValue);
        assert_eq!(kind_for_keyword("anyOf"), IssueKind::InvalidUnion);
        assert_eq!(kind_for_keyword("required"), IssueKind::Required);
        assert_eq!(kind_for_keyword("dependentRequired"), IssueKind::Custom);
    }

    #[test]
    fn test_decode_path_numeric_object_key_stays_key() {
        let instance = json!({ "codes": { "1": "x" }, "list": ["y"] });
        assert_eq!(
            decode_path(&instance, "/codes/1").segments(),
            &[PathSegment::Key("codes".into()), PathSegment::Key("1".into())]
        );
        assert_eq!(
            decode_path(&instance, "/list/0").segments(),
            &[PathSegment::Key("list".into()), PathSegment::Index(0)]
        );
    }

    #[test]
    fn test_decode_path_unescapes_tokens() {
        let instance = json!({ "a/b": { "c~d": 1 } });
        assert_eq!(
            decode_path(&instance, "/a~1b/c~0d").segments(),
            &[PathSegment::Key("a/b".into()), PathSegment::Key("c~d".into())]
        );
    }

    #[test]
    fn test_decode_empty_pointer_is_root() {
        assert!(decode_path(&json!({}), "").is_root());
    }
}
