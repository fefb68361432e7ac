//! # Catalog
//!
//! A catalog groups publications under one publishing organization. The
//! organization arrives in several shapes: a numeric id, a string id, an
//! embedded organization object, or nothing. Hydration keeps the shape it
//! finds; validation accepts only a reference (number, string, or null),
//! so an embedded organization is reported as `invalid_type`.

use serde::Serialize;
use serde_json::{json, Value};

use ocat_core::RawFields;
use ocat_schema::{EntitySchema, SchemaEntity};

use crate::organization::Organization;
use crate::rules::{self, SHORT_TEXT_MAX};

/// The organization a catalog belongs to, in the shape it arrived in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum OrganizationRef {
    /// Numeric organization id.
    Id(i64),
    /// String organization id (e.g. a UUID).
    Key(String),
    /// A full organization embedded in the catalog.
    Embedded(Box<Organization>),
    /// No organization. Serializes as `null`.
    #[default]
    None,
}

impl OrganizationRef {
    fn hydrate(raw: Option<&Value>) -> Self {
        match raw {
            Some(Value::Number(n)) => n.as_i64().map_or(Self::None, Self::Id),
            Some(Value::String(s)) => Self::Key(s.clone()),
            Some(embedded @ Value::Object(_)) => {
                Self::Embedded(Box::new(Organization::hydrate(embedded)))
            }
            _ => Self::None,
        }
    }
}

/// Canonical catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub description: String,
    pub image: String,
    /// Whether the catalog is published to the directory.
    pub listed: bool,
    pub organization: OrganizationRef,
    /// Metadata schema references; every entry must be text.
    pub metadata: Vec<Value>,
}

fn schema_document() -> Value {
    rules::entity_document(
        "Catalog",
        rules::properties(
            rules::common_fields(
                rules::required_text("Title", SHORT_TEXT_MAX),
                rules::bounded_text("Summary", SHORT_TEXT_MAX),
            ),
            json!({
                "image": rules::bounded_text("Image", SHORT_TEXT_MAX),
                "listed": rules::flag("Listed"),
                "organization": {
                    "type": ["integer", "string", "null"],
                    "errorMessage": {
                        "type": "Organization must be an organization id or empty"
                    }
                },
                "metadata": rules::text_list("Metadata"),
            }),
        ),
    )
}

static SCHEMA: EntitySchema = EntitySchema::new("catalog", schema_document);

impl SchemaEntity for Catalog {
    const NAME: &'static str = "catalog";

    fn hydrate(raw: &Value) -> Self {
        let fields = RawFields::new(raw);
        Self {
            id: fields.identifier("id"),
            title: fields.text("title"),
            summary: fields.text("summary"),
            description: fields.text("description"),
            image: fields.text("image"),
            listed: fields.flag("listed"),
            organization: OrganizationRef::hydrate(fields.raw("organization")),
            metadata: fields.list("metadata"),
        }
    }

    fn schema() -> &'static EntitySchema {
        &SCHEMA
    }
}
