//! Versioned schema error types
//!
//! Error codes:
//! - VERSIONED_EMPTY_VERSIONS
//! - VERSIONED_DUPLICATE_VERSION
//! - VERSIONED_FIELD_COLLISION
//! - VERSIONED_RESERVED_FIELD
//! - VERSIONED_DEFINITION_IO / VERSIONED_DEFINITION_MALFORMED

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use super::types::VersionTag;

/// Result type for building versioned schemas
pub type VersionedResult<T> = Result<T, ConstructionError>;

/// Where a field declaration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldOrigin {
    /// The shared base field set
    Base,
    /// The field set of one version
    Version(VersionTag),
}

impl std::fmt::Display for FieldOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldOrigin::Base => write!(f, "base"),
            FieldOrigin::Version(tag) => write!(f, "version {}", tag),
        }
    }
}

/// A versioned schema could not be built
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstructionError {
    /// No versions were declared
    #[error("at least one version must be declared")]
    EmptyVersions,

    /// The same tag was declared twice
    #[error("version {0} declared more than once")]
    DuplicateVersion(VersionTag),

    /// A version-specific field has the same name as a base field
    #[error("version {version} redeclares base field '{field}'")]
    FieldCollision {
        /// Version whose field collides
        version: VersionTag,
        /// Colliding field name
        field: String,
    },

    /// A caller field uses the reserved tag field name
    #[error("field '{field}' in {origin} is reserved for the version tag")]
    ReservedField {
        /// The reserved name
        field: String,
        /// Field set that declared it
        origin: FieldOrigin,
    },
}

impl ConstructionError {
    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            ConstructionError::EmptyVersions => "VERSIONED_EMPTY_VERSIONS",
            ConstructionError::DuplicateVersion(_) => "VERSIONED_DUPLICATE_VERSION",
            ConstructionError::FieldCollision { .. } => "VERSIONED_FIELD_COLLISION",
            ConstructionError::ReservedField { .. } => "VERSIONED_RESERVED_FIELD",
        }
    }
}

/// A definition file could not be loaded
#[derive(Debug, Error)]
pub enum DefinitionError {
    /// The file could not be read
    #[error("failed to read definition '{}': {source}", .path.display())]
    Io {
        /// File path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: io::Error,
    },

    /// The document is not a valid definition
    #[error("malformed definition: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The definition parsed but could not be built
    #[error(transparent)]
    Construction(#[from] ConstructionError),
}

impl DefinitionError {
    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            DefinitionError::Io { .. } => "VERSIONED_DEFINITION_IO",
            DefinitionError::Malformed(_) => "VERSIONED_DEFINITION_MALFORMED",
            DefinitionError::Construction(e) => e.code(),
        }
    }
}
