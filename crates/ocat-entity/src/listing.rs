//! # Listing
//!
//! A directory entry describing a catalog published by another instance:
//! where to search it, where its directory lives, and the outcome of the
//! last synchronisation.

use serde::Serialize;
use serde_json::{json, Value};

use ocat_core::RawFields;
use ocat_schema::{EntitySchema, SchemaEntity};

use crate::rules::{self, SHORT_TEXT_MAX};

/// Lowest HTTP status code a synchronisation can record.
pub const MIN_STATUS_CODE: i64 = 200;

/// Canonical listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub description: String,
    pub catalogus_id: String,
    /// Search endpoint of the listed catalog.
    pub search: String,
    /// Directory endpoint the listing was synchronised from.
    pub directory: String,
    pub status: String,
    /// HTTP status of the last synchronisation; `null` until one ran.
    pub status_code: Option<i64>,
    /// Time of the last synchronisation, RFC 3339, or empty.
    pub last_sync: String,
    pub available: bool,
    #[serde(rename = "default")]
    pub is_default: bool,
}

fn schema_document() -> Value {
    rules::entity_document(
        "Listing",
        rules::properties(
            rules::common_fields(
                rules::bounded_text("Title", SHORT_TEXT_MAX),
                rules::bounded_text("Summary", SHORT_TEXT_MAX),
            ),
            json!({
                "catalogusId": rules::text("Catalog id"),
                "search": rules::optional_url("Search"),
                "directory": rules::optional_url("Directory"),
                "status": rules::bounded_text("Status", SHORT_TEXT_MAX),
                "statusCode": rules::optional_integer_at_least("Status code", MIN_STATUS_CODE),
                "lastSync": rules::optional_date_time("Last sync"),
                "available": rules::flag("Available"),
                "default": rules::flag("Default"),
            }),
        ),
    )
}

static SCHEMA: EntitySchema = EntitySchema::new("listing", schema_document);

impl SchemaEntity for Listing {
    const NAME: &'static str = "listing";

    fn hydrate(raw: &Value) -> Self {
        let fields = RawFields::new(raw);
        Self {
            id: fields.identifier("id"),
            title: fields.text("title"),
            summary: fields.text("summary"),
            description: fields.text("description"),
            catalogus_id: fields.identifier("catalogusId"),
            search: fields.text("search"),
            directory: fields.text("directory"),
            status: fields.text("status"),
            status_code: fields.integer("statusCode"),
            last_sync: fields.text("lastSync"),
            available: fields.flag("available"),
            is_default: fields.flag("default"),
        }
    }

    fn schema() -> &'static EntitySchema {
        &SCHEMA
    }
}
