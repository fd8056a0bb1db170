//! CLI-specific error types

use std::io;

use thiserror::Error;

use crate::versioned::DefinitionError;

/// CLI error
#[derive(Debug, Error)]
pub enum CliError {
    /// stdin/stdout failure
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Output could not be encoded
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The definition could not be loaded or built
    #[error(transparent)]
    Definition(#[from] DefinitionError),

    /// One or more records were refused
    #[error("{rejected} of {total} records rejected")]
    RecordsRejected {
        /// Refused records
        rejected: usize,
        /// Records read
        total: usize,
    },
}

impl CliError {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            CliError::Io(_) => "VERSIONED_CLI_IO_ERROR",
            CliError::Json(_) => "VERSIONED_CLI_JSON_ERROR",
            CliError::Definition(e) => e.code(),
            CliError::RecordsRejected { .. } => "VERSIONED_CLI_RECORDS_REJECTED",
        }
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
