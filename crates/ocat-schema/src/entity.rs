//! # Schema-Validated Entity Contract
//!
//! One trait shared by every OpenCatalogi entity. An implementor supplies
//! total hydration and a static schema; validation and reporting follow.
//!
//! ## Lifecycle
//!
//! An entity is hydrated once, at construction, and only read afterwards.
//! `validate` runs the schema against the entity's current canonical JSON,
//! not against the raw input, and never mutates the entity. It is pure:
//! the same entity always yields the same result, and concurrent calls
//! share nothing but the compiled (immutable) validator.

use serde::Serialize;
use serde_json::Value;

use ocat_core::{OcatError, ValidationReport, ValidationResult};

use crate::entity_schema::EntitySchema;

/// A canonical entity paired with its hydration and schema.
pub trait SchemaEntity: Serialize + Sized {
    /// Entity kind name, used in logs and schema titles.
    const NAME: &'static str;

    /// Normalize raw input into a complete, default-filled entity.
    ///
    /// Must be total: any JSON value, including `null` and arrays, yields
    /// an entity.
    fn hydrate(raw: &Value) -> Self;

    /// The entity kind's declarative schema.
    fn schema() -> &'static EntitySchema;

    /// Validate the entity's current field values.
    fn validate(&self) -> ValidationResult {
        let result = Self::schema().validate(self);
        tracing::debug!(
            entity = Self::NAME,
            success = result.is_success(),
            issues = result.len(),
            "entity validated"
        );
        result
    }

    /// Validate and wrap the result in a report.
    fn report(&self) -> ValidationReport {
        ValidationReport::new(self.validate())
    }

    /// The canonical JSON form that validation sees.
    ///
    /// # Errors
    ///
    /// Returns `OcatError::Serialization` if the entity cannot be serialized.
    fn to_value(&self) -> Result<Value, OcatError> {
        Ok(serde_json::to_value(self)?)
    }
}
