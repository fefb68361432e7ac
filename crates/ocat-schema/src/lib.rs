//! # ocat-schema: Schema-Validated Entities
//!
//! Every OpenCatalogi entity pairs a total hydration step with a declarative
//! schema. This crate provides the schema half once, so that an entity kind
//! is configuration (a field reader plus a JSON Schema document) rather than
//! repeated validation code.
//!
//! ## Schema Documents (`entity_schema`)
//!
//! [`EntitySchema`] holds a JSON Schema (draft 2020-12) document and compiles
//! it with the `jsonschema` crate on first use. Compiled validators are
//! `Send + Sync` and shared by every validation of that entity kind.
//!
//! Violations become [`ocat_core::ValidationIssue`]s:
//!
//! - the JSON-pointer instance location becomes a structured path;
//! - the violated keyword becomes an [`ocat_core::IssueKind`];
//! - an `errorMessage` annotation next to the keyword supplies the
//!   human-readable text.
//!
//! ## Formats (`formats`)
//!
//! `url`, `optional-url` and `optional-date-time` are registered on every
//! schema and asserted (format validation is always on).
//!
//! ## Entity Contract (`entity`)
//!
//! [`SchemaEntity`] ties a canonical struct to its hydration and schema and
//! provides `validate` and `report` for free.
//!
//! ## Crate Policy
//!
//! - Depends only on `ocat-core` internally.
//! - Validation is total: a schema that fails to compile produces a failed
//!   result with one `invalid_schema` issue, never a panic.

pub mod entity;
pub mod entity_schema;
pub mod formats;

pub use entity::SchemaEntity;
pub use entity_schema::{kind_for_keyword, EntitySchema};
