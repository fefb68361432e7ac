//! # Attachment
//!
//! A file attached to a publication, with its lifecycle status, where it can
//! be fetched, whether it was anonymized, and the language it is written in.
//!
//! Two fields take more than one input shape:
//!
//! - `anonymization.anonymized` accepts a boolean or the strings `"true"` and
//!   `"false"`. The shape is kept on hydration; any other string fails
//!   validation.
//! - `status` defaults to `Concept` when absent. A present string is kept
//!   verbatim and must be one of [`ATTACHMENT_STATUSES`].

use serde::Serialize;
use serde_json::{json, Value};

use ocat_core::RawFields;
use ocat_schema::{EntitySchema, SchemaEntity};

use crate::rules::{self, SHORT_TEXT_MAX};

/// Lifecycle statuses an attachment may be in.
pub const ATTACHMENT_STATUSES: [&str; 6] = [
    "Concept",
    "Published",
    "Withdrawn",
    "Archived",
    "Revised",
    "Rejected",
];

/// Status given to an attachment that arrives without one.
pub const DEFAULT_STATUS: &str = "Concept";

/// The `anonymized` marker as it arrived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Anonymized {
    Flag(bool),
    /// String form; valid only as `"true"` or `"false"`.
    Text(String),
}

impl Default for Anonymized {
    fn default() -> Self {
        Self::Flag(false)
    }
}

impl Anonymized {
    /// The marker as a boolean, if it is one of the accepted literals.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Flag(flag) => Some(*flag),
            Self::Text(text) => match text.as_str() {
                "true" => Some(true),
                "false" => Some(false),
                _ => None,
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Anonymization {
    pub anonymized: Anonymized,
    /// Free-text description of what was anonymized.
    pub results: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Language {
    /// ISO 639-1 or 639-2 code, lowercase.
    pub code: String,
    /// CEFR reading level, `A1` through `C2`.
    pub level: String,
}

/// Canonical attachment.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub description: String,
    pub reference: String,
    pub labels: Vec<Value>,
    pub access_url: String,
    pub download_url: String,
    /// MIME type of the file.
    #[serde(rename = "type")]
    pub media_type: String,
    pub extension: String,
    /// File size in bytes.
    pub size: Option<i64>,
    pub status: String,
    pub anonymization: Anonymization,
    pub language: Language,
    /// Id of the attachment this one is a version of.
    pub version_of: String,
    pub hash: String,
    pub published: String,
    pub modified: String,
    pub license: String,
}

impl Default for Attachment {
    fn default() -> Self {
        Self {
            id: String::new(),
            title: String::new(),
            summary: String::new(),
            description: String::new(),
            reference: String::new(),
            labels: Vec::new(),
            access_url: String::new(),
            download_url: String::new(),
            media_type: String::new(),
            extension: String::new(),
            size: None,
            status: DEFAULT_STATUS.to_string(),
            anonymization: Anonymization::default(),
            language: Language::default(),
            version_of: String::new(),
            hash: String::new(),
            published: String::new(),
            modified: String::new(),
            license: String::new(),
        }
    }
}

fn schema_document() -> Value {
    let statuses: Vec<Value> = ATTACHMENT_STATUSES.iter().map(|s| json!(s)).collect();

    rules::entity_document(
        "Attachment",
        rules::properties(
            rules::common_fields(
                rules::required_text("Title", SHORT_TEXT_MAX),
                rules::bounded_text("Summary", SHORT_TEXT_MAX),
            ),
            json!({
                "reference": rules::text("Reference"),
                "labels": rules::text_list("Labels"),
                "accessUrl": rules::optional_url("Access URL"),
                "downloadUrl": rules::optional_url("Download URL"),
                "type": rules::bounded_text("Type", SHORT_TEXT_MAX),
                "extension": rules::bounded_text("Extension", SHORT_TEXT_MAX),
                "size": rules::optional_integer_at_least("Size", 0),
                "status": rules::one_of("Status", &statuses),
                "anonymization": rules::nested_object("Anonymization", json!({
                    "anonymized": rules::one_of(
                        "Anonymized",
                        &[json!(true), json!(false), json!("true"), json!("false")],
                    ),
                    "results": rules::text("Anonymization results"),
                })),
                "language": rules::nested_object("Language", json!({
                    "code": rules::optional_pattern(
                        "Language code",
                        "[a-z]{2,3}",
                        "a two or three letter lowercase language code",
                    ),
                    "level": rules::optional_pattern(
                        "Language level",
                        "[ABC][12]",
                        "a CEFR level from A1 to C2",
                    ),
                })),
                "versionOf": rules::text("Version of"),
                "hash": rules::text("Hash"),
                "published": rules::optional_date_time("Published"),
                "modified": rules::optional_date_time("Modified"),
                "license": rules::bounded_text("License", SHORT_TEXT_MAX),
            }),
        ),
    )
}

static SCHEMA: EntitySchema = EntitySchema::new("attachment", schema_document);

fn hydrate_anonymization(fields: RawFields<'_>) -> Anonymization {
    let anonymized = match fields.raw("anonymized") {
        Some(Value::Bool(flag)) => Anonymized::Flag(*flag),
        Some(Value::String(text)) => Anonymized::Text(text.clone()),
        _ => Anonymized::default(),
    };
    Anonymization {
        anonymized,
        results: fields.text("results"),
    }
}

impl SchemaEntity for Attachment {
    const NAME: &'static str = "attachment";

    fn hydrate(raw: &Value) -> Self {
        let fields = RawFields::new(raw);
        let language = fields.object("language");
        let status = match fields.raw("status") {
            Some(Value::String(status)) => status.clone(),
            _ => DEFAULT_STATUS.to_string(),
        };

        Self {
            id: fields.identifier("id"),
            title: fields.text("title"),
            summary: fields.text("summary"),
            description: fields.text("description"),
            reference: fields.text("reference"),
            labels: fields.list("labels"),
            access_url: fields.text("accessUrl"),
            download_url: fields.text("downloadUrl"),
            media_type: fields.text("type"),
            extension: fields.text("extension"),
            size: fields.integer("size"),
            status,
            anonymization: hydrate_anonymization(fields.object("anonymization")),
            language: Language {
                code: language.text("code"),
                level: language.text("level"),
            },
            version_of: fields.identifier("versionOf"),
            hash: fields.text("hash"),
            published: fields.text("published"),
            modified: fields.text("modified"),
            license: fields.text("license"),
        }
    }

    fn schema() -> &'static EntitySchema {
        &SCHEMA
    }
}
