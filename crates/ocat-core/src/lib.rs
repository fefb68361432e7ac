//! # ocat-core: Validation Primitives for OpenCatalogi Entities
//!
//! This crate is the leaf of the workspace. It defines the data that flows
//! out of entity validation and the engine that turns that data into the
//! views a form-rendering layer consumes. It depends on nothing internal.
//!
//! ## Data Flow
//!
//! ```text
//! raw JSON ──RawFields──▶ entity ──schema──▶ ValidationResult ──▶ ValidationReport
//! ```
//!
//! - [`RawFields`] reads untyped input with explicit presence checks, so
//!   hydration is total and never confuses "absent" with "false" or `0`.
//! - [`ValidationIssue`] is one path-qualified failure with a stable
//!   machine code ([`IssueKind`]).
//! - [`ValidationResult`] is the producer's verdict plus its issues.
//! - [`ValidationReport`] derives five agreeing views of the same issues:
//!   flat messages, messages grouped by path, a nested tree, one record per
//!   issue, and a summary with counts.
//!
//! ## Crate Policy
//!
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - Validation failures are data, never `Err`. [`OcatError`] is reserved
//!   for operational failures (schema compilation, document loading).
//! - No deduplication anywhere: every issue is counted and rendered.

pub mod error;
pub mod hydrate;
pub mod issue;
pub mod path;
pub mod report;
pub mod result;

// Re-export primary types for ergonomic imports.
pub use error::OcatError;
pub use hydrate::RawFields;
pub use issue::{IssueKind, ValidationIssue};
pub use path::{Path, PathQuery, PathSegment};
pub use report::{
    ErrorTree, FieldRecord, ReportSnapshot, ValidationReport, ValidationSummary, EMPTY_KEY_SLOT,
};
pub use result::ValidationResult;
