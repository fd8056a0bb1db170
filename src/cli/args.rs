//! CLI argument definitions using clap
//!
//! Commands:
//! - versioned-schema check --definition <path> [--strict] [--shadow]
//! - versioned-schema describe --definition <path>
//!
//! `--log-level` applies to every command.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::observability::Severity;

/// Validate JSON records against a versioned schema definition
#[derive(Parser, Debug)]
#[command(name = "versioned-schema")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Minimum severity of log lines written to stderr
    #[arg(long, global = true, value_enum, default_value = "info")]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Also log every rejected record
    Trace,
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for Severity {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Severity::Trace,
            LogLevel::Info => Severity::Info,
            LogLevel::Warn => Severity::Warn,
            LogLevel::Error => Severity::Error,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate JSON records read line by line from stdin
    Check(DefinitionArgs),

    /// Print the declared versions and the latest one
    Describe(DefinitionArgs),
}

/// Options shared by every command
#[derive(Args, Debug, Clone)]
pub struct DefinitionArgs {
    /// Path to the definition file
    #[arg(long, default_value = "./schema.json")]
    pub definition: PathBuf,

    /// Refuse undeclared fields instead of stripping them
    #[arg(long)]
    pub strict: bool,

    /// Let version fields shadow base fields instead of failing the build
    #[arg(long)]
    pub shadow: bool,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
