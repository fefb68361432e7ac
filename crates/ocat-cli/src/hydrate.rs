//! # Hydrate Subcommand
//!
//! Prints the canonical form of raw input: every field present, defaults
//! filled in, wrong-shaped values replaced. This is exactly what
//! `ocat validate` checks.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde_json::Value;

use ocat_entity::{hydrate_value, EntityKind};

use crate::document::load_value;
use crate::EXIT_OK;

/// Arguments for the hydrate subcommand.
#[derive(Args, Debug)]
pub struct HydrateArgs {
    /// Entity kind of the document.
    #[arg(long, short)]
    pub kind: EntityKind,

    /// JSON or YAML document to hydrate.
    pub path: PathBuf,
}

/// Hydrate `raw` as `kind`. A top-level array hydrates element by element.
///
/// # Errors
///
/// Fails if a hydrated entity cannot be serialized.
pub fn hydrate_document(kind: EntityKind, raw: &Value) -> Result<Value> {
    match raw {
        Value::Array(items) => items
            .iter()
            .map(|item| hydrate_value(kind, item).map_err(anyhow::Error::from))
            .collect::<Result<Vec<_>>>()
            .map(Value::Array),
        single => Ok(hydrate_value(kind, single)?),
    }
}

/// Execute the hydrate subcommand, writing to `out`.
pub fn run_hydrate(args: &HydrateArgs, out: &mut impl Write) -> Result<u8> {
    let raw = load_value(&args.path)
        .with_context(|| format!("failed to load {}", args.path.display()))?;
    let canonical = hydrate_document(args.kind, &raw)?;
    serde_json::to_writer_pretty(&mut *out, &canonical).context("failed to write entity")?;
    writeln!(out)?;
    Ok(EXIT_OK)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_single_document() {
        let canonical = hydrate_document(EntityKind::Catalog, &json!({ "title": "t", "listed": "yes" })).unwrap();
        assert_eq!(canonical["title"], "t");
        assert_eq!(canonical["listed"], false);
        assert_eq!(canonical["organization"], Value::Null);
        assert_eq!(canonical["metadata"], json!([]));
    }

    #[test]
    fn test_array_hydrates_each_element() {
        let canonical = hydrate_document(EntityKind::Glossary, &json!([{ "title": "a" }, null])).unwrap();
        let items = canonical.as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["title"], "a");
        assert_eq!(items[1]["title"], "");
    }
}
