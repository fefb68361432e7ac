//! # Validation Results
//!
//! The outcome of validating one entity instance: the producer's verdict
//! and the issues it detected, in detection order.

use serde::{Deserialize, Serialize};

use crate::issue::ValidationIssue;

/// Success flag plus ordered issues.
///
/// `success == false` implies at least one issue. The converse is not
/// enforced: a producer may pass a value while still reporting issues
/// informationally, and consumers take `success` as stated.
///
/// Deserialization goes through [`ValidationResult::new`], so a transported
/// `{"success": false, "issues": []}` arrives as passing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawValidationResult")]
pub struct ValidationResult {
    success: bool,
    issues: Vec<ValidationIssue>,
}

impl ValidationResult {
    /// A passing result with no issues.
    pub fn ok() -> Self {
        Self {
            success: true,
            issues: Vec::new(),
        }
    }

    /// Derive the verdict from the issues: success iff there are none.
    pub fn from_issues(issues: Vec<ValidationIssue>) -> Self {
        Self {
            success: issues.is_empty(),
            issues,
        }
    }

    /// A result whose verdict is stated by the producer.
    ///
    /// A failing verdict with no issues is not representable; it is
    /// reported as passing.
    pub fn new(success: bool, issues: Vec<ValidationIssue>) -> Self {
        Self {
            success: success || issues.is_empty(),
            issues,
        }
    }

    /// Whether the value passed validation.
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Issues in detection order.
    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    /// Number of issues.
    pub fn len(&self) -> usize {
        self.issues.len()
    }

    /// Returns true if there are no issues.
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Consumes self and returns the inner issues.
    pub fn into_issues(self) -> Vec<ValidationIssue> {
        self.issues
    }
}

#[derive(Deserialize)]
struct RawValidationResult {
    success: bool,
    #[serde(default)]
    issues: Vec<ValidationIssue>,
}

impl From<RawValidationResult> for ValidationResult {
    fn from(raw: RawValidationResult) -> Self {
        Self::new(raw.success, raw.issues)
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::ok()
    }
}
