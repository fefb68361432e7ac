//! # Schema Subcommand
//!
//! Prints the JSON Schema document an entity kind is validated against.

use std::io::Write;

use anyhow::{Context, Result};
use clap::Args;

use ocat_entity::{schema_document, EntityKind};

use crate::EXIT_OK;

/// Arguments for the schema subcommand.
#[derive(Args, Debug)]
pub struct SchemaArgs {
    /// Entity kind whose schema to print.
    pub kind: EntityKind,
}

/// Execute the schema subcommand, writing to `out`.
pub fn run_schema(args: &SchemaArgs, out: &mut impl Write) -> Result<u8> {
    let document = schema_document(args.kind);
    serde_json::to_writer_pretty(&mut *out, &document)
        .with_context(|| format!("failed to write {} schema", args.kind))?;
    writeln!(out)?;
    Ok(EXIT_OK)
}
