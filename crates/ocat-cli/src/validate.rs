//! # Validate Subcommand
//!
//! Validates entity documents from disk and prints the selected report
//! views.
//!
//! ```bash
//! ocat validate --kind glossary terms.yaml
//! ocat validate --kind organization --view all org.json
//! ocat validate --kind attachment --format json attachments.json
//! ```
//!
//! Exit codes: `0` when every document is valid, `1` when any document
//! fails validation. Unreadable input is an error (exit `2`, see `main`).

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use serde::Serialize;

use ocat_core::{ReportSnapshot, ValidationReport};
use ocat_entity::{validate_raw, EntityKind};

use crate::document::{load_documents, Document};
use crate::{EXIT_INVALID, EXIT_OK};

/// Arguments for the validate subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Entity kind of every document (catalog, organization, listing,
    /// glossary, attachment).
    #[arg(long, short)]
    pub kind: EntityKind,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Report view to print in text output.
    #[arg(long, value_enum, default_value_t = View::Messages)]
    pub view: View,

    /// JSON or YAML documents to validate.
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable lines.
    Text,
    /// One report object per document.
    Json,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum View {
    /// `<path>: <message>` per issue.
    Messages,
    /// Messages grouped by field path.
    Grouped,
    /// Messages as a nested tree.
    Tree,
    /// One record per issue, with kind and types.
    Records,
    /// Issue counts.
    Summary,
    /// Every view.
    All,
}

/// A validated document, ready to print.
pub struct DocumentReport {
    pub source: String,
    pub report: ValidationReport,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    source: &'a str,
    kind: EntityKind,
    #[serde(flatten)]
    report: ReportSnapshot<'a>,
}

/// Validate every document in `paths` as `kind`.
///
/// # Errors
///
/// Fails on the first file that cannot be read or parsed.
pub fn validate_paths(kind: EntityKind, paths: &[PathBuf]) -> Result<Vec<DocumentReport>> {
    let mut reports = Vec::new();
    for path in paths {
        let documents = load_documents(path)
            .with_context(|| format!("failed to load {}", path.display()))?;
        reports.extend(documents.into_iter().map(|doc| validate_document(kind, doc)));
    }
    Ok(reports)
}

fn validate_document(kind: EntityKind, document: Document) -> DocumentReport {
    let report = ValidationReport::new(validate_raw(kind, &document.raw));
    tracing::info!(
        source = %document.source,
        %kind,
        issues = report.issue_count(),
        "validated document"
    );
    DocumentReport {
        source: document.source,
        report,
    }
}

/// Execute the validate subcommand, writing to `out`.
pub fn run_validate(args: &ValidateArgs, out: &mut impl Write) -> Result<u8> {
    let reports = validate_paths(args.kind, &args.paths)?;

    match args.format {
        OutputFormat::Json => write_json(args.kind, &reports, out)?,
        OutputFormat::Text => write_text(args.view, &reports, out)?,
    }

    let invalid = reports.iter().filter(|r| !r.report.is_success()).count();
    Ok(if invalid == 0 { EXIT_OK } else { EXIT_INVALID })
}

fn write_json(kind: EntityKind, reports: &[DocumentReport], out: &mut impl Write) -> Result<()> {
    let body: Vec<JsonReport<'_>> = reports
        .iter()
        .map(|r| JsonReport {
            source: &r.source,
            kind,
            report: r.report.snapshot(),
        })
        .collect();
    serde_json::to_writer_pretty(&mut *out, &body).context("failed to serialize reports")?;
    writeln!(out)?;
    Ok(())
}

fn write_text(view: View, reports: &[DocumentReport], out: &mut impl Write) -> Result<()> {
    for DocumentReport { source, report } in reports {
        if report.is_success() {
            writeln!(out, "OK   {source}")?;
            continue;
        }
        writeln!(out, "FAIL {source} ({} issues)", report.issue_count())?;
        write_view(view, report, out)?;
    }

    let invalid = reports.iter().filter(|r| !r.report.is_success()).count();
    writeln!(out)?;
    writeln!(out, "{} documents checked, {invalid} invalid", reports.len())?;
    Ok(())
}

fn write_view(view: View, report: &ValidationReport, out: &mut impl Write) -> Result<()> {
    if matches!(view, View::Messages | View::All) {
        for line in report.flat_messages() {
            writeln!(out, "  - {line}")?;
        }
    }
    if matches!(view, View::Grouped | View::All) {
        for (path, messages) in report.grouped_by_path() {
            let path = if path.is_empty() { "(root)" } else { path };
            writeln!(out, "  {path}:")?;
            for message in messages {
                writeln!(out, "    - {message}")?;
            }
        }
    }
    if matches!(view, View::Tree | View::All) {
        let tree = serde_json::to_string_pretty(report.nested_tree())?;
        for line in tree.lines() {
            writeln!(out, "  {line}")?;
        }
    }
    if matches!(view, View::Records | View::All) {
        for record in report.field_records() {
            write!(out, "  {} [{}] {}", record.path, record.kind, record.message)?;
            match (&record.expected_type, &record.received_type) {
                (Some(expected), Some(received)) => {
                    write!(out, " (expected {expected}, received {received})")?;
                }
                (None, Some(received)) => write!(out, " (received {received})")?,
                _ => {}
            }
            writeln!(out)?;
        }
    }
    if matches!(view, View::Summary | View::All) {
        let summary = report.summary();
        writeln!(out, "  total: {}", summary.total_errors)?;
        writeln!(out, "  by field: {}", join_counts(&summary.errors_by_field))?;
        writeln!(out, "  by kind: {}", join_counts(&summary.errors_by_kind))?;
    }
    Ok(())
}

fn join_counts(counts: &std::collections::BTreeMap<String, usize>) -> String {
    counts
        .iter()
        .map(|(key, count)| format!("{key}={count}"))
        .collect::<Vec<_>>()
        .join(", ")
}
