//! # ocat CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use ocat_cli::hydrate::{run_hydrate, HydrateArgs};
use ocat_cli::schema::{run_schema, SchemaArgs};
use ocat_cli::validate::{run_validate, ValidateArgs};
use ocat_cli::{finish, EXIT_ERROR};

/// OpenCatalogi entity toolchain.
///
/// Validates catalogs, organizations, listings, glossary terms and
/// attachments against their schemas and reports every failure by field.
#[derive(Parser, Debug)]
#[command(name = "ocat", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate documents as an entity kind and print report views.
    Validate(ValidateArgs),

    /// Print the canonical entity hydrated from a raw document.
    Hydrate(HydrateArgs),

    /// Print the JSON Schema document of an entity kind.
    Schema(SchemaArgs),
}

fn init_tracing(verbose: u8, json: bool) {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.log_json);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let result = match &cli.command {
        Commands::Validate(args) => run_validate(args, &mut out),
        Commands::Hydrate(args) => run_hydrate(args, &mut out),
        Commands::Schema(args) => run_schema(args, &mut out),
    };
    let result = finish(result, &mut out);

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            eprintln!("error: {e:#}");
            ExitCode::from(EXIT_ERROR)
        }
    }
}
