//! # Validation Report: Issue Aggregation Engine
//!
//! [`ValidationReport`] wraps one [`ValidationResult`] and derives five
//! queryable views of the same issues:
//!
//! | View | Shape | One-to-one with issues |
//! |------|-------|------------------------|
//! | [`flat_messages`](ValidationReport::flat_messages) | `"<path>: <message>"` per issue | yes |
//! | [`grouped_by_path`](ValidationReport::grouped_by_path) | joined path → messages | no |
//! | [`nested_tree`](ValidationReport::nested_tree) | [`ErrorTree`] following path segments | no |
//! | [`field_records`](ValidationReport::field_records) | [`FieldRecord`] per issue | yes |
//! | [`summary`](ValidationReport::summary) | [`ValidationSummary`] counts | no |
//!
//! ## Invariants
//!
//! - The message multiset is identical across flat messages, all grouped
//!   values, all records, and all tree nodes.
//! - `summary().total_errors` equals the issue count; the per-field and
//!   per-kind counts each sum to it.
//! - Nothing is deduplicated. Two identical issues at one path count twice.
//! - Within any view, messages for one path keep detection order.
//!
//! Every view is a pure function of the immutable issue list, computed on
//! first use and cached in a [`OnceLock`]. A report is `Send + Sync` and can
//! be queried from several threads without locking on the caller's side.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

use crate::issue::{IssueKind, ValidationIssue};
use crate::path::{Path, PathQuery};
use crate::result::ValidationResult;

/// Key under which a tree node that also has children keeps its own
/// messages. Messages for the root path live here on the root node.
pub const EMPTY_KEY_SLOT: &str = "_errors";

/// Messages rebuilt into a tree that follows issue path segments.
///
/// Issues whose paths share a prefix share the interior nodes for that
/// prefix. A node may hold messages and children at once, e.g. for issues
/// at both `language` and `language.code`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorTree {
    messages: Vec<String>,
    children: BTreeMap<String, ErrorTree>,
}

impl ErrorTree {
    fn insert(&mut self, path: &Path, message: String) {
        let mut node = self;
        for segment in path.segments() {
            node = node.children.entry(segment.to_string()).or_default();
        }
        node.messages.push(message);
    }

    /// Messages recorded for exactly this node's path, in detection order.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Child nodes keyed by rendered segment.
    pub fn children(&self) -> &BTreeMap<String, ErrorTree> {
        &self.children
    }

    /// The child for one rendered segment.
    pub fn child(&self, key: &str) -> Option<&ErrorTree> {
        self.children.get(key)
    }

    /// The node addressed by `path`, if any issue lies at or below it.
    pub fn get(&self, path: &Path) -> Option<&ErrorTree> {
        path.segments()
            .iter()
            .try_fold(self, |node, segment| node.child(&segment.to_string()))
    }

    /// Returns true if no message is stored anywhere in the tree.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty() && self.children.values().all(ErrorTree::is_empty)
    }

    /// Every message in the tree: a node's own messages first, then its
    /// children in key order.
    pub fn all_messages(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_messages(&mut out);
        out
    }

    /// The serialized key for this node's own messages: [`EMPTY_KEY_SLOT`]
    /// unless a child already uses it.
    pub fn own_slot(&self) -> String {
        let mut slot = EMPTY_KEY_SLOT.to_string();
        while self.children.contains_key(&slot) {
            slot.insert(0, '_');
        }
        slot
    }

    fn collect_messages<'a>(&'a self, out: &mut Vec<&'a str>) {
        out.extend(self.messages.iter().map(String::as_str));
        for child in self.children.values() {
            child.collect_messages(out);
        }
    }
}

/// A leaf serializes as its message array; an interior node as an object
/// of its children plus [`EMPTY_KEY_SLOT`] when it has messages of its own.
///
/// If a child is itself named `_errors`, the own-message slot takes one
/// more leading underscore (`__errors`, and so on) until it is free, so no
/// message is overwritten.
impl Serialize for ErrorTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.children.is_empty() {
            let mut seq = serializer.serialize_seq(Some(self.messages.len()))?;
            for message in &self.messages {
                seq.serialize_element(message)?;
            }
            return seq.end();
        }

        let own = usize::from(!self.messages.is_empty());
        let mut map = serializer.serialize_map(Some(self.children.len() + own))?;
        if own == 1 {
            map.serialize_entry(&self.own_slot(), &self.messages)?;
        }
        for (key, child) in &self.children {
            map.serialize_entry(key, child)?;
        }
        map.end()
    }
}

/// One issue flattened for form rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldRecord {
    /// Joined path.
    pub path: String,
    /// Human-readable text.
    pub message: String,
    /// Machine-readable classification.
    pub kind: IssueKind,
    /// Expected JSON type, for type mismatches.
    pub expected_type: Option<String>,
    /// Received JSON type, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub received_type: Option<String>,
}

impl From<&ValidationIssue> for FieldRecord {
    fn from(issue: &ValidationIssue) -> Self {
        Self {
            path: issue.path.joined(),
            message: issue.message.clone(),
            kind: issue.kind,
            expected_type: issue.expected_type.clone(),
            received_type: issue.received_type.clone(),
        }
    }
}

/// Issue counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationSummary {
    /// Exactly the number of issues.
    pub total_errors: usize,
    /// Joined path → number of issues at that path.
    pub errors_by_field: BTreeMap<String, usize>,
    /// Kind code → number of issues of that kind.
    pub errors_by_kind: BTreeMap<String, usize>,
}

/// Serializable bundle of every view, for transport to a presentation layer.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSnapshot<'a> {
    /// The producer's verdict.
    pub success: bool,
    /// Flat `"<path>: <message>"` strings.
    pub messages: &'a [String],
    /// Messages grouped by joined path.
    pub grouped: &'a BTreeMap<String, Vec<String>>,
    /// Messages as a nested tree.
    pub tree: &'a ErrorTree,
    /// One record per issue.
    pub records: &'a [FieldRecord],
    /// Counts.
    pub summary: &'a ValidationSummary,
}

/// Lazily derived views over one [`ValidationResult`].
#[derive(Debug, Clone)]
pub struct ValidationReport {
    result: ValidationResult,
    flat: OnceLock<Vec<String>>,
    grouped: OnceLock<BTreeMap<String, Vec<String>>>,
    tree: OnceLock<ErrorTree>,
    records: OnceLock<Vec<FieldRecord>>,
    summary: OnceLock<ValidationSummary>,
}

impl ValidationReport {
    /// Wrap a result. No view is computed until it is first requested.
    pub fn new(result: ValidationResult) -> Self {
        Self {
            result,
            flat: OnceLock::new(),
            grouped: OnceLock::new(),
            tree: OnceLock::new(),
            records: OnceLock::new(),
            summary: OnceLock::new(),
        }
    }

    /// The wrapped result.
    pub fn result(&self) -> &ValidationResult {
        &self.result
    }

    /// The producer's verdict.
    pub fn is_success(&self) -> bool {
        self.result.is_success()
    }

    /// Number of issues.
    pub fn issue_count(&self) -> usize {
        self.result.len()
    }

    fn issues(&self) -> &[ValidationIssue] {
        self.result.issues()
    }

    /// `"<joined path>: <message>"` per issue, in issue order.
    ///
    /// An issue whose joined path is empty (the root, or a single empty
    /// key) renders as the bare message rather than `": <message>"`, so this
    /// view departs from the strict `"<joined path>: <message>"` shape for
    /// those issues. The grouped view, the summary and dotted lookups key
    /// both of them under `""` as well; only the tree and structured
    /// lookups keep them apart.
    pub fn flat_messages(&self) -> &[String] {
        self.flat
            .get_or_init(|| self.issues().iter().map(ToString::to_string).collect())
    }

    /// Joined path → every message at exactly that path, in issue order.
    pub fn grouped_by_path(&self) -> &BTreeMap<String, Vec<String>> {
        self.grouped.get_or_init(|| {
            let mut grouped: BTreeMap<String, Vec<String>> = BTreeMap::new();
            for issue in self.issues() {
                grouped
                    .entry(issue.path.joined())
                    .or_default()
                    .push(issue.message.clone());
            }
            grouped
        })
    }

    /// Messages rebuilt into a tree following path segments.
    pub fn nested_tree(&self) -> &ErrorTree {
        self.tree.get_or_init(|| {
            let mut tree = ErrorTree::default();
            for issue in self.issues() {
                tree.insert(&issue.path, issue.message.clone());
            }
            tree
        })
    }

    /// One record per issue, in issue order.
    pub fn field_records(&self) -> &[FieldRecord] {
        self.records
            .get_or_init(|| self.issues().iter().map(FieldRecord::from).collect())
    }

    /// Total, per-path, and per-kind counts.
    pub fn summary(&self) -> &ValidationSummary {
        self.summary.get_or_init(|| {
            let mut summary = ValidationSummary {
                total_errors: self.issues().len(),
                ..ValidationSummary::default()
            };
            for issue in self.issues() {
                *summary
                    .errors_by_field
                    .entry(issue.path.joined())
                    .or_insert(0) += 1;
                *summary
                    .errors_by_kind
                    .entry(issue.kind.as_str().to_string())
                    .or_insert(0) += 1;
            }
            summary
        })
    }

    /// The first message, in issue order, whose path equals `path`.
    ///
    /// `None` is the normal answer for a field without issues.
    pub fn get_error<'q>(&self, path: impl Into<PathQuery<'q>>) -> Option<&str> {
        let query = path.into();
        self.issues()
            .iter()
            .find(|issue| query.matches(&issue.path))
            .map(|issue| issue.message.as_str())
    }

    /// Every message whose path equals `path`, in issue order. Empty when
    /// there are none.
    pub fn get_errors<'q>(&self, path: impl Into<PathQuery<'q>>) -> Vec<&str> {
        let query = path.into();
        self.issues()
            .iter()
            .filter(|issue| query.matches(&issue.path))
            .map(|issue| issue.message.as_str())
            .collect()
    }

    /// Every view at once, ready to serialize.
    pub fn snapshot(&self) -> ReportSnapshot<'_> {
        ReportSnapshot {
            success: self.is_success(),
            messages: self.flat_messages(),
            grouped: self.grouped_by_path(),
            tree: self.nested_tree(),
            records: self.field_records(),
            summary: self.summary(),
        }
    }
}

impl From<ValidationResult> for ValidationReport {
    fn from(result: ValidationResult) -> Self {
        Self::new(result)
    }
}

impl Serialize for ValidationReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.snapshot().serialize(serializer)
    }
}
