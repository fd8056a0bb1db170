//! CLI module
//!
//! Provides command-line interface for:
//! - check: validate JSON lines from stdin against a definition
//! - describe: print versions of a definition

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command, DefinitionArgs, LogLevel};
pub use commands::{check, describe, execute, load_schema, run, run_command};
pub use errors::{CliError, CliResult};
