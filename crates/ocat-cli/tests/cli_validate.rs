//! Integration test: the `ocat` handlers and binary over real files.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use ocat_cli::hydrate::{run_hydrate, HydrateArgs};
use ocat_cli::validate::{run_validate, OutputFormat, ValidateArgs, View};
use ocat_cli::{EXIT_ERROR, EXIT_INVALID, EXIT_OK};
use ocat_entity::EntityKind;
use tempfile::TempDir;

fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

fn validate(kind: EntityKind, format: OutputFormat, view: View, paths: Vec<PathBuf>) -> (u8, String) {
    let args = ValidateArgs {
        kind,
        format,
        view,
        paths,
    };
    let mut out = Vec::new();
    let code = run_validate(&args, &mut out).unwrap();
    (code, String::from_utf8(out).unwrap())
}

#[test]
fn test_valid_yaml_glossary_exits_ok() {
    let dir = TempDir::new().unwrap();
    let path = write(
        dir.path(),
        "term.yaml",
        "title: API\nexternalLink: https://en.wikipedia.org/wiki/API\nkeywords: [a, b]\n",
    );
    let (code, text) = validate(EntityKind::Glossary, OutputFormat::Text, View::Messages, vec![path]);
    assert_eq!(code, EXIT_OK);
    assert!(text.contains("OK"));
    assert!(text.contains("1 documents checked, 0 invalid"));
}

#[test]
fn test_invalid_json_array_reports_each_element() {
    let dir = TempDir::new().unwrap();
    let path = write(
        dir.path(),
        "terms.json",
        r#"[
            { "title": "API", "externalLink": "https://en.wikipedia.org/wiki/API" },
            { "title": "API", "externalLink": "invalid-url" }
        ]"#,
    );
    let (code, text) = validate(EntityKind::Glossary, OutputFormat::Text, View::Messages, vec![path]);
    assert_eq!(code, EXIT_INVALID);
    assert!(text.contains("terms.json[0]"));
    assert!(text.contains("FAIL"));
    assert!(text.contains("terms.json[1] (1 issues)"));
    assert!(text.contains("  - externalLink: External link must be a valid URL"));
    assert!(text.contains("2 documents checked, 1 invalid"));
}

#[test]
fn test_json_format_is_parsable() {
    let dir = TempDir::new().unwrap();
    let path = write(
        dir.path(),
        "org.json",
        r#"{ "title": "", "summary": "x", "oin": "5435", "tooi": "5435", "rsin": "54", "pki": "6565" }"#,
    );
    let (code, text) = validate(EntityKind::Organization, OutputFormat::Json, View::Messages, vec![path]);
    assert_eq!(code, EXIT_INVALID);

    let reports: serde_json::Value = serde_json::from_str(&text).unwrap();
    let report = &reports[0];
    assert_eq!(report["kind"], "organization");
    assert_eq!(report["success"], false);
    assert_eq!(report["summary"]["totalErrors"], 4);
    assert_eq!(report["grouped"]["title"][0], "Title is required");
    assert!(report["tree"]["oin"].is_array());
}

#[test]
fn test_missing_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let args = ValidateArgs {
        kind: EntityKind::Listing,
        format: OutputFormat::Text,
        view: View::All,
        paths: vec![dir.path().join("missing.json")],
    };
    let err = run_validate(&args, &mut Vec::new()).unwrap_err();
    assert!(format!("{err:#}").contains("missing.json"));
}

#[test]
fn test_hydrate_prints_canonical_form() {
    let dir = TempDir::new().unwrap();
    let path = write(dir.path(), "listing.yml", "title: Utrecht\nstatusCode: 0\navailable: false\n");
    let mut out = Vec::new();
    let code = run_hydrate(
        &HydrateArgs {
            kind: EntityKind::Listing,
            path,
        },
        &mut out,
    )
    .unwrap();
    assert_eq!(code, EXIT_OK);
    let canonical: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(canonical["statusCode"], 0);
    assert_eq!(canonical["available"], false);
    assert_eq!(canonical["default"], false);
    assert_eq!(canonical["search"], "");
}

#[test]
fn test_binary_exit_codes() {
    let dir = TempDir::new().unwrap();
    let valid = write(dir.path(), "ok.json", r#"{ "title": "Org", "summary": "S" }"#);
    let invalid = write(dir.path(), "bad.json", r#"{ "title": "Org" }"#);
    let broken = write(dir.path(), "broken.json", "{ not json");

    let run = |path: &Path| {
        Command::new(env!("CARGO_BIN_EXE_ocat"))
            .args(["validate", "--kind", "organization"])
            .arg(path)
            .output()
            .unwrap()
    };

    assert_eq!(run(&valid).status.code(), Some(i32::from(EXIT_OK)));
    assert_eq!(run(&invalid).status.code(), Some(i32::from(EXIT_INVALID)));

    let output = run(&broken);
    assert_eq!(output.status.code(), Some(i32::from(EXIT_ERROR)));
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid JSON"));
}
