//! Validation engines
//!
//! The versioned-schema builder never validates anything itself. It asks a
//! [`ValidationEngine`] for record, literal, and union validators and hands
//! values back to it for parsing. Each validation library gets one thin
//! adapter implementing this trait; [`json::JsonEngine`] is the adapter
//! shipped with the crate.

pub mod json;

use std::fmt::Debug;

use crate::versioned::{FieldSet, VersionTag};

/// Capability set the versioned-schema builder is generic over.
pub trait ValidationEngine {
    /// Engine-native validator
    type Validator: Clone + Debug;
    /// Values accepted and produced by `parse_or_fail`
    type Value;
    /// Structured failure from `parse_or_fail`
    type Error: std::error::Error;

    /// A validator matching objects with exactly these fields.
    ///
    /// Whether unknown fields are rejected, stripped, or kept is up to the
    /// engine.
    fn record(&self, fields: FieldSet<Self::Validator>) -> Self::Validator;

    /// A validator matching only this exact tag value.
    fn literal(&self, tag: &VersionTag) -> Self::Validator;

    /// A validator accepting any branch; branches are tried in order and
    /// the first match wins.
    fn union(&self, branches: Vec<Self::Validator>) -> Self::Validator;

    /// Validates `value`, returning the coerced result.
    fn parse_or_fail(
        &self,
        validator: &Self::Validator,
        value: &Self::Value,
    ) -> Result<Self::Value, Self::Error>;

    /// Reads a tag-typed field back out of a parsed value.
    fn read_tag(&self, value: &Self::Value, field: &str) -> Option<VersionTag>;
}
