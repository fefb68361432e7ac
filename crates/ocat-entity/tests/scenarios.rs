//! Integration test: end-to-end hydrate → validate → report scenarios over
//! every entity kind.
//!
//! Each scenario drives the public API exactly as a form-rendering layer
//! would: raw JSON in, report views and path lookups out.

use ocat_core::{IssueKind, Path, ValidationIssue, ValidationReport, ValidationResult};
use ocat_entity::{
    validate_raw, Attachment, Catalog, EntityKind, GlossaryTerm, Listing, Organization,
};
use ocat_schema::SchemaEntity;
use serde_json::{json, Value};

fn failing_paths(report: &ValidationReport) -> Vec<&str> {
    report.field_records().iter().map(|r| r.path.as_str()).collect()
}

// -- Organization -------------------------------------------------------------

#[test]
fn test_organization_with_short_identifiers_fails() {
    let org = Organization::hydrate(&json!({
        "title": "",
        "summary": "x",
        "oin": "5435",
        "tooi": "5435",
        "rsin": "54",
        "pki": "6565"
    }));
    let result = org.validate();
    assert!(!result.is_success());

    let report = ValidationReport::new(result);
    let paths = failing_paths(&report);
    assert!(paths.contains(&"title"));
    assert!(paths.contains(&"oin"));
    assert!(paths.contains(&"rsin"));
    assert!(paths.contains(&"tooi"));
    assert!(!paths.contains(&"pki"), "1 to 10 digits accepts 6565");

    assert_eq!(report.get_error("title"), Some("Title is required"));
    assert_eq!(report.summary().errors_by_kind["too_small"], 1);
    assert_eq!(report.summary().errors_by_kind["invalid_format"], 3);
}

// -- Glossary term ------------------------------------------------------------

#[test]
fn test_glossary_term_valid() {
    let term = GlossaryTerm::hydrate(&json!({
        "title": "API",
        "externalLink": "https://en.wikipedia.org/wiki/API",
        "keywords": ["a", "b"]
    }));
    let result = term.validate();
    assert!(result.is_success());
    assert!(result.is_empty());
}

#[test]
fn test_glossary_term_invalid_link() {
    let term = GlossaryTerm::hydrate(&json!({
        "title": "API",
        "externalLink": "invalid-url",
        "keywords": ["a", "b"]
    }));
    let report = term.report();

    assert_eq!(report.issue_count(), 1);
    assert_eq!(failing_paths(&report), vec!["externalLink"]);
    assert_eq!(
        report.get_error("externalLink"),
        Some("External link must be a valid URL")
    );
    assert_eq!(report.get_error("title"), None);
    assert_eq!(
        report.flat_messages(),
        vec!["externalLink: External link must be a valid URL"]
    );
}

// -- Lookups ------------------------------------------------------------------

#[test]
fn test_get_errors_two_issues_keep_detection_order() {
    // The shipped schemas report at most one issue per scalar field.
    let result = ValidationResult::from_issues(vec![
        ValidationIssue::new(Path::root().child("title"), IssueKind::TooSmall, "first"),
        ValidationIssue::new(Path::root().child("summary"), IssueKind::TooBig, "other"),
        ValidationIssue::new(Path::root().child("title"), IssueKind::Custom, "second"),
    ]);
    let report = ValidationReport::new(result);

    assert_eq!(report.get_errors("title"), vec!["first", "second"]);
    assert_eq!(report.get_error("title"), Some("first"));
    assert!(report.get_errors("description").is_empty());
    assert_eq!(report.get_error("description"), None);
}

#[test]
fn test_structured_and_dotted_lookups_agree() {
    let report = Catalog::hydrate(&json!({ "title": "t", "metadata": ["ok", 1] })).report();
    let structured = Path::root().child("metadata").index(1);
    assert_eq!(report.get_errors(&structured), report.get_errors("metadata.1"));
    assert_eq!(report.get_errors(&structured).len(), 1);
}

// -- Whole-contract properties ------------------------------------------------

fn valid_inputs() -> Vec<(EntityKind, Value)> {
    vec![
        (
            EntityKind::Catalog,
            json!({
                "id": 1,
                "title": "Woo",
                "summary": "Open Government Act publications",
                "image": "https://example.org/logo.png",
                "listed": true,
                "organization": "b7c9c1a2",
                "metadata": ["https://example.org/schema.json"]
            }),
        ),
        (
            EntityKind::Organization,
            json!({
                "title": "Gemeente Utrecht",
                "summary": "Municipality",
                "oin": "00000001002220647000",
                "tooi": "12345678",
                "rsin": "002220647",
                "pki": "6565"
            }),
        ),
        (
            EntityKind::Listing,
            json!({
                "title": "Utrecht",
                "search": "https://utrecht.example.org/api/search",
                "directory": "https://directory.example.org/api/directory",
                "statusCode": 200,
                "lastSync": "2024-03-01T09:15:00Z",
                "available": true,
                "default": true
            }),
        ),
        (
            EntityKind::Glossary,
            json!({
                "title": "API",
                "externalLink": "https://en.wikipedia.org/wiki/API",
                "keywords": ["interface"]
            }),
        ),
        (
            EntityKind::Attachment,
            json!({
                "title": "Besluit.pdf",
                "labels": ["besluit"],
                "downloadUrl": "https://example.org/a/1",
                "size": 0,
                "status": "Archived",
                "anonymization": { "anonymized": false },
                "language": { "code": "nld", "level": "C2" },
                "published": "2024-05-01T12:00:00Z"
            }),
        ),
    ]
}

#[test]
fn test_fully_valid_input_passes_for_every_kind() {
    for (kind, raw) in valid_inputs() {
        let result = validate_raw(kind, &raw);
        assert!(result.is_success(), "{kind}: {:?}", result.issues());
        assert!(result.is_empty());
    }
}

#[test]
fn test_validation_is_idempotent() {
    let listing = Listing::hydrate(&json!({ "search": "nope", "statusCode": 5 }));
    assert_eq!(listing.validate(), listing.validate());

    let attachment = Attachment::hydrate(&json!({ "status": "Unknown" }));
    let first = attachment.report();
    let second = attachment.report();
    assert_eq!(first.flat_messages(), second.flat_messages());
    assert_eq!(first.summary(), second.summary());
}

#[test]
fn test_garbage_input_still_validates() {
    for kind in EntityKind::ALL {
        for raw in [json!(null), json!([]), json!("text"), json!(42), json!({})] {
            let result = validate_raw(kind, &raw);
            // Hydration fills defaults, so the only failures are the rules
            // that reject empty values; never a root type failure.
            assert!(
                result.issues().iter().all(|issue| !issue.path.is_root()),
                "{kind} {raw}: {:?}",
                result.issues()
            );
        }
    }
}

#[test]
fn test_report_views_agree_on_mixed_failures() {
    let report = Attachment::hydrate(&json!({
        "title": "",
        "labels": [1, "ok", true],
        "status": "Draft",
        "language": { "code": "NL", "level": "" },
        "size": -5
    }))
    .report();

    let mut flat: Vec<String> = report
        .flat_messages()
        .iter()
        .map(|line| line.split_once(": ").map_or(line.clone(), |(_, m)| m.to_string()))
        .collect();
    let mut grouped: Vec<String> = report.grouped_by_path().values().flatten().cloned().collect();
    let mut tree: Vec<String> = report
        .nested_tree()
        .all_messages()
        .into_iter()
        .map(str::to_string)
        .collect();
    let mut records: Vec<String> = report
        .field_records()
        .iter()
        .map(|r| r.message.clone())
        .collect();
    flat.sort();
    grouped.sort();
    tree.sort();
    records.sort();

    assert_eq!(flat, records);
    assert_eq!(grouped, records);
    assert_eq!(tree, records);

    let summary = report.summary();
    assert_eq!(summary.total_errors, report.issue_count());
    assert_eq!(summary.errors_by_field.values().sum::<usize>(), summary.total_errors);
    assert_eq!(summary.errors_by_kind.values().sum::<usize>(), summary.total_errors);
    assert_eq!(summary.total_errors, 6);
}

#[test]
fn test_snapshot_serializes_every_view() {
    let report = Organization::hydrate(&json!({ "summary": "x", "oin": "1" })).report();
    let snapshot = serde_json::to_value(report.snapshot()).unwrap();
    for key in ["success", "messages", "grouped", "tree", "records", "summary"] {
        assert!(snapshot.get(key).is_some(), "missing {key}");
    }
    assert_eq!(snapshot["success"], false);
}
