//! # Organization
//!
//! A publishing organization, identified by Dutch government registry
//! numbers. Each identifier is optional, but when present must have the
//! registry's exact digit width:
//!
//! | Field | Registry | Format |
//! |-------|----------|--------|
//! | `oin` | Organisatie-identificatienummer | 20 digits |
//! | `tooi` | Thesaurus Overheidsorganisaties | 8 digits |
//! | `rsin` | Rechtspersonen en Samenwerkingsverbanden | 9 digits |
//! | `pki` | PKIoverheid certificate number | 1 to 10 digits |

use serde::Serialize;
use serde_json::{json, Value};

use ocat_core::RawFields;
use ocat_schema::{EntitySchema, SchemaEntity};

use crate::rules::{self, SHORT_TEXT_MAX};

/// Canonical organization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub description: String,
    pub oin: String,
    pub tooi: String,
    pub rsin: String,
    pub pki: String,
}

fn schema_document() -> Value {
    rules::entity_document(
        "Organization",
        rules::properties(
            rules::common_fields(
                rules::required_text("Title", SHORT_TEXT_MAX),
                rules::required_text("Summary", SHORT_TEXT_MAX),
            ),
            json!({
                "oin": rules::optional_pattern("OIN", "[0-9]{20}", "exactly 20 digits"),
                "tooi": rules::optional_pattern("TOOI", "[0-9]{8}", "exactly 8 digits"),
                "rsin": rules::optional_pattern("RSIN", "[0-9]{9}", "exactly 9 digits"),
                "pki": rules::optional_pattern("PKI", "[0-9]{1,10}", "1 to 10 digits"),
            }),
        ),
    )
}

static SCHEMA: EntitySchema = EntitySchema::new("organization", schema_document);

impl SchemaEntity for Organization {
    const NAME: &'static str = "organization";

    fn hydrate(raw: &Value) -> Self {
        let fields = RawFields::new(raw);
        Self {
            id: fields.identifier("id"),
            title: fields.text("title"),
            summary: fields.text("summary"),
            description: fields.text("description"),
            oin: fields.text("oin"),
            tooi: fields.text("tooi"),
            rsin: fields.text("rsin"),
            pki: fields.text("pki"),
        }
    }

    fn schema() -> &'static EntitySchema {
        &SCHEMA
    }
}
