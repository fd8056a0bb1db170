//! JSON engine error types
//!
//! Error codes:
//! - VERSIONED_VALUE_MISMATCH
//! - VERSIONED_NO_BRANCH_MATCHED
//! - VERSIONED_DECODE_FAILED

use std::fmt;

use serde_json::Value;
use thiserror::Error;

/// Validation failure details
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationDetails {
    /// Field path (e.g., "user.address.city", "tags[2]"), "$root" for the value itself
    pub field: String,
    /// Expected type or condition
    pub expected: String,
    /// Actual value or type found
    pub actual: String,
}

impl ValidationDetails {
    pub fn new(
        field: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::new(field, "field to be present", "missing")
    }

    pub fn extra_field(field: impl Into<String>) -> Self {
        Self::new(field, "no undeclared fields", "extra field present")
    }

    pub fn type_mismatch(
        field: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::new(field, expected, actual)
    }

    pub fn null_value(field: impl Into<String>) -> Self {
        Self::new(field, "non-null value", "null")
    }

    pub fn literal_mismatch(field: impl Into<String>, expected: &Value, actual: &Value) -> Self {
        Self::new(field, format!("literal {}", expected), actual.to_string())
    }
}

impl fmt::Display for ValidationDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "field '{}': expected {}, got {}", self.field, self.expected, self.actual)
    }
}

/// Why one union branch refused a value
#[derive(Debug, Clone, PartialEq)]
pub struct BranchFailure {
    /// Position of the branch in the union
    pub index: usize,
    /// The literal field identifying the branch, when it has one
    pub discriminant: Option<(String, Value)>,
    /// The branch's first violation
    pub error: JsonValidationError,
}

impl fmt::Display for BranchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.discriminant {
            Some((field, value)) => {
                write!(f, "branch {} ({}={}): {}", self.index, field, value, self.error)
            }
            None => write!(f, "branch {}: {}", self.index, self.error),
        }
    }
}

/// A value was refused by a JSON validator
#[derive(Debug, Clone, PartialEq, Error)]
pub enum JsonValidationError {
    /// A single constraint was violated
    #[error("{0}")]
    Mismatch(ValidationDetails),

    /// Every branch of a union refused the value
    #[error("no branch matched [{}]", render_branches(.branches))]
    NoBranchMatched {
        /// One entry per tried branch, in union order
        branches: Vec<BranchFailure>,
    },
}

impl JsonValidationError {
    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            JsonValidationError::Mismatch(_) => "VERSIONED_VALUE_MISMATCH",
            JsonValidationError::NoBranchMatched { .. } => "VERSIONED_NO_BRANCH_MATCHED",
        }
    }

    /// Returns validation details for a single-constraint failure
    pub fn details(&self) -> Option<&ValidationDetails> {
        match self {
            JsonValidationError::Mismatch(details) => Some(details),
            JsonValidationError::NoBranchMatched { .. } => None,
        }
    }

    /// Returns per-branch failures for a union failure
    pub fn branches(&self) -> &[BranchFailure] {
        match self {
            JsonValidationError::Mismatch(_) => &[],
            JsonValidationError::NoBranchMatched { branches } => branches,
        }
    }
}

impl From<ValidationDetails> for JsonValidationError {
    fn from(details: ValidationDetails) -> Self {
        JsonValidationError::Mismatch(details)
    }
}

fn render_branches(branches: &[BranchFailure]) -> String {
    branches
        .iter()
        .map(|b| b.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// A value could not be parsed into a caller type
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The value matched no version
    #[error(transparent)]
    Validation(#[from] JsonValidationError),

    /// The parsed value did not deserialize into the target type
    #[error("parsed value does not fit target type: {0}")]
    Deserialize(#[from] serde_json::Error),
}

impl DecodeError {
    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            DecodeError::Validation(e) => e.code(),
            DecodeError::Deserialize(_) => "VERSIONED_DECODE_FAILED",
        }
    }
}
