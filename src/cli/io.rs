//! JSON line I/O for the CLI
//!
//! - Input: one JSON value per line
//! - Output: one JSON object per line
//! - UTF-8 only

use std::io::{BufRead, Write};

use serde_json::{json, Value};

use super::errors::CliResult;

/// One input line: a parsed value, or why it was not JSON.
pub enum InputLine {
    Value(Value),
    Invalid(String),
}

/// Reads non-empty lines as JSON values.
pub fn read_values<R: BufRead>(reader: R) -> impl Iterator<Item = CliResult<InputLine>> {
    reader
        .lines()
        .filter(|line| line.as_ref().map_or(true, |l| !l.trim().is_empty()))
        .map(|line| {
            let line = line?;
            Ok(match serde_json::from_str(&line) {
                Ok(value) => InputLine::Value(value),
                Err(e) => InputLine::Invalid(e.to_string()),
            })
        })
}

/// Writes a success line
pub fn write_response<W: Write>(writer: &mut W, data: Value) -> CliResult<()> {
    let response = json!({
        "status": "ok",
        "data": data
    });
    write_line(writer, &response)
}

/// Writes an error line
pub fn write_error<W: Write>(writer: &mut W, code: &str, message: &str) -> CliResult<()> {
    let response = json!({
        "status": "error",
        "code": code,
        "message": message
    });
    write_line(writer, &response)
}

fn write_line<W: Write>(writer: &mut W, value: &Value) -> CliResult<()> {
    serde_json::to_writer(&mut *writer, value)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
