//! # ocat-entity: OpenCatalogi Domain Entities
//!
//! The five entity kinds of the catalog-management domain, each an
//! instantiation of [`ocat_schema::SchemaEntity`]:
//!
//! | Entity | Module | Distinguishing fields |
//! |--------|--------|-----------------------|
//! | [`Catalog`] | `catalog` | image, listed, organization, metadata |
//! | [`Organization`] | `organization` | oin, tooi, rsin, pki |
//! | [`Listing`] | `listing` | catalogusId, search, directory, status, statusCode, lastSync, available, default |
//! | [`GlossaryTerm`] | `glossary` | externalLink, keywords |
//! | [`Attachment`] | `attachment` | reference, labels, urls, status, anonymization, language, versionOf, hash, published, license |
//!
//! All share `id`, `title`, `summary` and `description`.
//!
//! Each module holds a canonical struct, its hydration, and its schema
//! document built from the shared field rules in `rules`. [`EntityKind`]
//! dispatches hydration and validation over raw JSON when the kind is only
//! known at runtime.

pub mod attachment;
pub mod catalog;
pub mod glossary;
pub mod kind;
pub mod listing;
pub mod organization;
pub mod rules;

pub use attachment::{
    Anonymization, Anonymized, Attachment, Language, ATTACHMENT_STATUSES, DEFAULT_STATUS,
};
pub use catalog::{Catalog, OrganizationRef};
pub use glossary::GlossaryTerm;
pub use kind::{hydrate_value, schema_document, validate_raw, EntityKind};
pub use listing::Listing;
pub use organization::Organization;
