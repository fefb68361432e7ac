//! # ocat-cli: Command-Line Interface for OpenCatalogi Entities
//!
//! Provides the `ocat` binary: validate entity documents from disk, inspect
//! any report view, see the canonical hydrated form of raw input, and dump
//! the schema a kind is validated against.
//!
//! ## Subcommands
//!
//! - `ocat validate`: validate JSON/YAML documents as an entity kind.
//! - `ocat hydrate`: print the canonical entity built from raw input.
//! - `ocat schema`: print an entity kind's JSON Schema document.
//!
//! ## Crate Policy
//!
//! - Argument parsing is separated from handlers; handlers write to any
//!   `io::Write` so they can be tested without a process.
//! - Handlers delegate to `ocat-entity` and `ocat-core`. No validation
//!   logic lives here.
//! - Report output goes to stdout; logs go to stderr.

pub mod document;
pub mod hydrate;
pub mod schema;
pub mod validate;

/// Every document is valid.
pub const EXIT_OK: u8 = 0;

/// At least one document failed validation.
pub const EXIT_INVALID: u8 = 1;

/// The command could not run (unreadable input, bad arguments).
pub const EXIT_ERROR: u8 = 2;

/// Flush `out` once a handler has run and fold a failed flush into the
/// handler's outcome, so lost output never exits `0` or `1`.
///
/// # Errors
///
/// Returns the handler's error, or the flush error if the handler
/// succeeded.
pub fn finish(result: anyhow::Result<u8>, out: &mut impl std::io::Write) -> anyhow::Result<u8> {
    use anyhow::Context;

    let flushed = out.flush().context("failed to write output");
    let code = result?;
    flushed?;
    Ok(code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, Write};

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }
    }

    #[test]
    fn test_finish_passes_code_through() {
        assert_eq!(finish(Ok(EXIT_INVALID), &mut Vec::new()).unwrap(), EXIT_INVALID);
    }

    #[test]
    fn test_failed_flush_is_an_error() {
        let err = finish(Ok(EXIT_OK), &mut BrokenPipe).unwrap_err();
        assert!(format!("{err:#}").contains("failed to write output"));
    }

    #[test]
    fn test_handler_error_wins_over_flush_error() {
        let err = finish(Err(anyhow::anyhow!("bad input")), &mut BrokenPipe).unwrap_err();
        assert_eq!(err.to_string(), "bad input");
    }
}
