//! # Input Documents
//!
//! Loads raw entity input from disk. Files ending in `.yaml` or `.yml` are
//! parsed as YAML and converted to the JSON value tree the entities
//! consume; everything else is parsed as JSON.
//!
//! A document whose top level is an array holds several entities. Each
//! element becomes its own [`Document`], labelled `path[index]`.

use std::path::Path;

use serde_json::Value;

use ocat_core::OcatError;

/// One entity's raw input and where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// `path`, or `path[index]` for an element of a top-level array.
    pub source: String,
    pub raw: Value,
}

/// Read and parse the file at `path`.
///
/// # Errors
///
/// Returns `OcatError::DocumentLoad` if the file cannot be read or parsed.
pub fn load_value(path: &Path) -> Result<Value, OcatError> {
    let load_error = |reason: String| OcatError::DocumentLoad {
        path: path.display().to_string(),
        reason,
    };

    let content = std::fs::read_to_string(path).map_err(|e| load_error(e.to_string()))?;

    match path.extension().and_then(|ext| ext.to_str()) {
        Some("yaml" | "yml") => {
            let yaml: serde_yaml::Value = serde_yaml::from_str(&content)
                .map_err(|e| load_error(format!("invalid YAML: {e}")))?;
            yaml_to_json_value(yaml)
                .map_err(|e| load_error(format!("YAML-to-JSON conversion failed: {e}")))
        }
        _ => serde_json::from_str(&content).map_err(|e| load_error(format!("invalid JSON: {e}"))),
    }
}

/// Load `path` and split it into one document per entity.
///
/// # Errors
///
/// Returns `OcatError::DocumentLoad` if the file cannot be read or parsed.
pub fn load_documents(path: &Path) -> Result<Vec<Document>, OcatError> {
    let value = load_value(path)?;
    let label = path.display().to_string();
    let documents = split_documents(&label, value);
    tracing::debug!(path = %label, documents = documents.len(), "loaded input");
    Ok(documents)
}

/// Split a top-level array into labelled elements; any other value is a
/// single document.
pub fn split_documents(label: &str, value: Value) -> Vec<Document> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(index, raw)| Document {
                source: format!("{label}[{index}]"),
                raw,
            })
            .collect(),
        raw => vec![Document {
            source: label.to_string(),
            raw,
        }],
    }
}

/// Convert a YAML value tree into the equivalent JSON value tree.
///
/// Tags are dropped. Numbers go through their serde form. Scalar map keys
/// (numbers, booleans) are rendered as strings; other keys are rejected.
fn yaml_to_json_value(yaml: serde_yaml::Value) -> Result<Value, String> {
    use serde_yaml::Value as Yaml;

    Ok(match yaml {
        Yaml::Null => Value::Null,
        Yaml::Bool(b) => Value::Bool(b),
        Yaml::Number(n) => serde_json::to_value(&n).map_err(|e| e.to_string())?,
        Yaml::String(s) => Value::String(s),
        Yaml::Sequence(items) => Value::Array(
            items
                .into_iter()
                .map(yaml_to_json_value)
                .collect::<Result<_, _>>()?,
        ),
        Yaml::Mapping(map) => Value::Object(
            map.into_iter()
                .map(|(key, value)| -> Result<(String, Value), String> {
                    Ok((yaml_key(key)?, yaml_to_json_value(value)?))
                })
                .collect::<Result<_, String>>()?,
        ),
        Yaml::Tagged(tagged) => yaml_to_json_value(tagged.value)?,
    })
}

fn yaml_key(key: serde_yaml::Value) -> Result<String, String> {
    match key {
        serde_yaml::Value::String(s) => Ok(s),
        serde_yaml::Value::Number(n) => Ok(n.to_string()),
        serde_yaml::Value::Bool(b) => Ok(b.to_string()),
        other => Err(format!("map keys must be scalars, found {other:?}")),
    }
}
