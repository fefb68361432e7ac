//! # Runtime Entity Dispatch
//!
//! [`EntityKind`] names an entity kind chosen at runtime (from a command
//! line, a file name, a request route) and dispatches hydration, validation
//! and schema lookup to the matching [`SchemaEntity`] implementation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use ocat_core::{OcatError, ValidationResult};
use ocat_schema::{EntitySchema, SchemaEntity};

use crate::{Attachment, Catalog, GlossaryTerm, Listing, Organization};

/// The five entity kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Catalog,
    Organization,
    Listing,
    Glossary,
    Attachment,
}

impl EntityKind {
    /// All kinds, in declaration order.
    pub const ALL: [EntityKind; 5] = [
        Self::Catalog,
        Self::Organization,
        Self::Listing,
        Self::Glossary,
        Self::Attachment,
    ];

    /// Canonical name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Catalog => Catalog::NAME,
            Self::Organization => Organization::NAME,
            Self::Listing => Listing::NAME,
            Self::Glossary => GlossaryTerm::NAME,
            Self::Attachment => Attachment::NAME,
        }
    }

    /// The kind's static schema.
    pub fn schema(self) -> &'static EntitySchema {
        match self {
            Self::Catalog => Catalog::schema(),
            Self::Organization => Organization::schema(),
            Self::Listing => Listing::schema(),
            Self::Glossary => GlossaryTerm::schema(),
            Self::Attachment => Attachment::schema(),
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = OcatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "catalog" | "catalogus" => Ok(Self::Catalog),
            "organization" | "organisation" => Ok(Self::Organization),
            "listing" => Ok(Self::Listing),
            "glossary" | "glossary-term" => Ok(Self::Glossary),
            "attachment" | "publication-attachment" => Ok(Self::Attachment),
            _ => Err(OcatError::UnknownEntityKind(s.to_string())),
        }
    }
}

fn hydrate_as<E: SchemaEntity>(raw: &Value) -> Result<Value, OcatError> {
    tracing::trace!(entity = E::NAME, "hydrating raw input");
    E::hydrate(raw).to_value()
}

fn validate_as<E: SchemaEntity>(raw: &Value) -> ValidationResult {
    E::hydrate(raw).validate()
}

/// Hydrate `raw` as `kind` and return the entity's canonical JSON.
///
/// # Errors
///
/// Returns `OcatError::Serialization` if the hydrated entity cannot be
/// serialized.
pub fn hydrate_value(kind: EntityKind, raw: &Value) -> Result<Value, OcatError> {
    match kind {
        EntityKind::Catalog => hydrate_as::<Catalog>(raw),
        EntityKind::Organization => hydrate_as::<Organization>(raw),
        EntityKind::Listing => hydrate_as::<Listing>(raw),
        EntityKind::Glossary => hydrate_as::<GlossaryTerm>(raw),
        EntityKind::Attachment => hydrate_as::<Attachment>(raw),
    }
}

/// Hydrate `raw` as `kind` and validate the result.
pub fn validate_raw(kind: EntityKind, raw: &Value) -> ValidationResult {
    match kind {
        EntityKind::Catalog => validate_as::<Catalog>(raw),
        EntityKind::Organization => validate_as::<Organization>(raw),
        EntityKind::Listing => validate_as::<Listing>(raw),
        EntityKind::Glossary => validate_as::<GlossaryTerm>(raw),
        EntityKind::Attachment => validate_as::<Attachment>(raw),
    }
}

/// The JSON Schema document for `kind`.
pub fn schema_document(kind: EntityKind) -> Value {
    kind.schema().document()
}
