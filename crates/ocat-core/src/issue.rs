//! # Validation Issues
//!
//! One [`ValidationIssue`] records one failed rule: where it failed (a
//! [`Path`]), a human-readable message, and a stable machine code
//! ([`IssueKind`]). Type mismatches also carry the expected and received
//! JSON types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::OcatError;
use crate::path::Path;

/// Stable machine-readable classification of a failed rule.
///
/// The serialized codes are part of the external contract and must not
/// change once published.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// Value is shorter, smaller, or has fewer items than allowed.
    TooSmall,
    /// Value is longer, larger, or has more items than allowed.
    TooBig,
    /// String does not match the required pattern or format.
    InvalidFormat,
    /// Value has the wrong JSON type.
    InvalidType,
    /// Value is not one of the allowed literals.
    InvalidEnumValue,
    /// Value matches none of the allowed alternatives.
    InvalidUnion,
    /// A required property is missing.
    Required,
    /// The value carries properties the schema does not allow.
    UnrecognizedKeys,
    /// The schema could not be applied at all.
    InvalidSchema,
    /// Any other rule.
    Custom,
}

impl IssueKind {
    /// All kinds, in declaration order.
    pub const ALL: [IssueKind; 10] = [
        Self::TooSmall,
        Self::TooBig,
        Self::InvalidFormat,
        Self::InvalidType,
        Self::InvalidEnumValue,
        Self::InvalidUnion,
        Self::Required,
        Self::UnrecognizedKeys,
        Self::InvalidSchema,
        Self::Custom,
    ];

    /// The stable snake_case code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TooSmall => "too_small",
            Self::TooBig => "too_big",
            Self::InvalidFormat => "invalid_format",
            Self::InvalidType => "invalid_type",
            Self::InvalidEnumValue => "invalid_enum_value",
            Self::InvalidUnion => "invalid_union",
            Self::Required => "required",
            Self::UnrecognizedKeys => "unrecognized_keys",
            Self::InvalidSchema => "invalid_schema",
            Self::Custom => "custom",
        }
    }
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IssueKind {
    type Err = OcatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| OcatError::UnknownIssueKind(s.to_string()))
    }
}

/// One validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationIssue {
    /// Location of the failing value.
    pub path: Path,
    /// Human-readable text. Never empty.
    pub message: String,
    /// Machine-readable classification.
    pub kind: IssueKind,
    /// JSON type the rule expected, for type mismatches.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_type: Option<String>,
    /// JSON type actually found at the path, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub received_type: Option<String>,
}

impl ValidationIssue {
    /// Create an issue. An empty message is replaced by the kind code so
    /// that every issue renders something.
    pub fn new(path: Path, kind: IssueKind, message: impl Into<String>) -> Self {
        let mut message = message.into();
        if message.is_empty() {
            message = kind.as_str().to_string();
        }
        Self {
            path,
            message,
            kind,
            expected_type: None,
            received_type: None,
        }
    }

    /// Attach the expected JSON type.
    pub fn with_expected_type(mut self, expected: impl Into<String>) -> Self {
        self.expected_type = Some(expected.into());
        self
    }

    /// Attach the received JSON type.
    pub fn with_received_type(mut self, received: impl Into<String>) -> Self {
        self.received_type = Some(received.into());
        self
    }
}

/// Renders as `<joined path>: <message>`, or the bare message when the
/// joined path is empty.
impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.renders_empty() {
            f.write_str(&self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}
