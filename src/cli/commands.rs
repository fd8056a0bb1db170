//! CLI command implementations
//!
//! Commands read a definition file, build it once, then work on stdin and
//! stdout. Stdout carries only command responses; log lines go to stderr.

use std::io::{self, BufRead, Write};

use serde_json::json;

use super::args::{Cli, Command, DefinitionArgs};
use super::errors::{CliError, CliResult};
use super::io::{read_values, write_error, write_response, InputLine};
use crate::engine::json::{JsonEngine, JsonEngineConfig, VersionedSchemaDef};
use crate::engine::ValidationEngine;
use crate::observability::Logger;
use crate::versioned::{BuilderConfig, VersionedSchema};

/// Parse arguments and run
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    Logger::set_min_severity(cli.log_level.into());
    run_command(cli.command)
}

/// Run the appropriate command on stdin and stdout
pub fn run_command(cmd: Command) -> CliResult<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    execute(cmd, stdin.lock(), &mut stdout)
}

/// Run a command against the given input and output streams
pub fn execute<R: BufRead, W: Write>(cmd: Command, reader: R, writer: &mut W) -> CliResult<()> {
    match cmd {
        Command::Check(args) => {
            let schema = load_schema(&args)?;
            check(&schema, reader, writer)
        }
        Command::Describe(args) => {
            let schema = load_schema(&args)?;
            describe(&schema, writer)
        }
    }
}

/// Loads and builds the definition named by `args`.
pub fn load_schema(args: &DefinitionArgs) -> CliResult<VersionedSchema<JsonEngine>> {
    let engine_config = if args.strict {
        JsonEngineConfig::strict()
    } else {
        JsonEngineConfig::default()
    };
    let builder_config = if args.shadow {
        BuilderConfig::compatible()
    } else {
        BuilderConfig::default()
    };

    let schema = VersionedSchemaDef::load(
        &args.definition,
        JsonEngine::with_config(engine_config),
        builder_config,
    )?;
    Ok(schema)
}

/// Validates every input line, writing one result line per record.
///
/// Fails with `RecordsRejected` after all lines are processed if any
/// record was refused.
pub fn check<R: BufRead, W: Write>(
    schema: &VersionedSchema<JsonEngine>,
    reader: R,
    writer: &mut W,
) -> CliResult<()> {
    let mut total = 0;
    let mut rejected = 0;

    for line in read_values(reader) {
        total += 1;
        match line? {
            InputLine::Value(value) => match schema.parse(&value) {
                Ok(parsed) => {
                    let version = schema.engine().read_tag(&parsed, schema.tag_field());
                    write_response(writer, json!({ "version": version, "value": parsed }))?;
                }
                Err(e) => {
                    rejected += 1;
                    write_error(writer, e.code(), &e.to_string())?;
                }
            },
            InputLine::Invalid(message) => {
                rejected += 1;
                write_error(writer, "VERSIONED_CLI_INVALID_JSON", &message)?;
            }
        }
    }

    if rejected > 0 {
        return Err(CliError::RecordsRejected { rejected, total });
    }
    Ok(())
}

/// Writes the declared versions, the latest one, and the tag field.
pub fn describe<W: Write>(schema: &VersionedSchema<JsonEngine>, writer: &mut W) -> CliResult<()> {
    write_response(
        writer,
        json!({
            "versions": schema.versions(),
            "latest": schema.latest(),
            "tag_field": schema.tag_field(),
        }),
    )
}
