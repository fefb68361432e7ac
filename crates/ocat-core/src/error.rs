//! # Error Types
//!
//! Operational errors for the OpenCatalogi validation stack. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! A value that fails a rule is *not* an error: it is reported through
//! [`crate::ValidationResult`]. The variants below cover failures to run
//! validation at all.

use thiserror::Error;

/// Top-level error type for the OpenCatalogi validation stack.
#[derive(Error, Debug)]
pub enum OcatError {
    /// An entity schema document could not be compiled into a validator.
    #[error("schema compile error for '{schema}': {reason}")]
    SchemaCompile {
        /// Name of the entity schema.
        schema: String,
        /// Reason reported by the schema compiler.
        reason: String,
    },

    /// An input document could not be read or parsed.
    #[error("document load error for '{path}': {reason}")]
    DocumentLoad {
        /// Path or label of the document.
        path: String,
        /// Reason the document could not be loaded.
        reason: String,
    },

    /// The requested entity kind does not exist.
    #[error("unknown entity kind: {0:?}")]
    UnknownEntityKind(String),

    /// The given code is not a known issue kind.
    #[error("unknown issue kind: {0:?}")]
    UnknownIssueKind(String),

    /// JSON serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
