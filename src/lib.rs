//! versioned-schema - one validator for every historical shape of a record
//!
//! - `versioned`: the version union builder and the built schema
//! - `engine`: the validation engine seam and the JSON engine
//! - `observability`: structured JSON logging
//! - `cli`: the `versioned-schema` command

pub mod cli;
pub mod engine;
pub mod observability;
pub mod versioned;

pub use engine::json::{JsonEngine, JsonValidator};
pub use engine::ValidationEngine;
pub use versioned::{
    create_versioned_schema, BuilderConfig, FieldSet, VersionTag, VersionedSchema,
    VersionedSchemaBuilder,
};
