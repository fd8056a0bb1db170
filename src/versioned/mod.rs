//! Versioned schemas
//!
//! One validator for every historical shape of a record. Each version is
//! the shared base fields plus that version's own fields plus a literal tag
//! field; the versions are unioned and tried in declaration order.
//!
//! # Invariants
//!
//! - `versions()` is declaration order; `latest()` is its last entry
//! - Tags compare exactly, text `"1"` never equals integer `1`
//! - At least one version is required
//! - Built schemas never change

mod builder;
mod config;
mod errors;
mod schema;
mod types;

pub use builder::{create_versioned_schema, VersionedSchemaBuilder};
pub use config::{BuilderConfig, CollisionPolicy, DEFAULT_TAG_FIELD};
pub use errors::{ConstructionError, DefinitionError, FieldOrigin, VersionedResult};
pub use schema::VersionedSchema;
pub use types::{FieldSet, VersionTag};
