//! Command-line interface for formforge.
//!
//! Provides commands for generating a form definition from raw text,
//! compiling it to Apps Script, validating it, and creating the remote form.

mod commands;

pub use commands::{parse_cli, run_with_cli, Cli};
