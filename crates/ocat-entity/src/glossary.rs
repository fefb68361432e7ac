//! # Glossary Term
//!
//! A defined term with an external reference and search keywords.

use serde::Serialize;
use serde_json::{json, Value};

use ocat_core::RawFields;
use ocat_schema::{EntitySchema, SchemaEntity};

use crate::rules::{self, SHORT_TEXT_MAX};

/// Canonical glossary term.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GlossaryTerm {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub description: String,
    pub external_link: String,
    pub keywords: Vec<Value>,
}

fn schema_document() -> Value {
    rules::entity_document(
        "Glossary term",
        rules::properties(
            rules::common_fields(
                rules::required_text("Title", SHORT_TEXT_MAX),
                rules::bounded_text("Summary", SHORT_TEXT_MAX),
            ),
            json!({
                "externalLink": rules::url("External link", SHORT_TEXT_MAX),
                "keywords": rules::text_list("Keywords"),
            }),
        ),
    )
}

static SCHEMA: EntitySchema = EntitySchema::new("glossary", schema_document);

impl SchemaEntity for GlossaryTerm {
    const NAME: &'static str = "glossary";

    fn hydrate(raw: &Value) -> Self {
        let fields = RawFields::new(raw);
        Self {
            id: fields.identifier("id"),
            title: fields.text("title"),
            summary: fields.text("summary"),
            description: fields.text("description"),
            external_link: fields.text("externalLink"),
            keywords: fields.list("keywords"),
        }
    }

    fn schema() -> &'static EntitySchema {
        &SCHEMA
    }
}
