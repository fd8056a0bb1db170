//! Built versioned schema
//!
//! Immutable once built. Every accessor takes `&self`, so one schema can be
//! shared across threads behind an `Arc`.

use super::types::VersionTag;
use crate::engine::ValidationEngine;
use crate::observability::{Event, Logger};

/// A union of versioned record validators plus the accessors derived from it.
#[derive(Debug, Clone)]
pub struct VersionedSchema<E: ValidationEngine> {
    engine: E,
    schema: E::Validator,
    versions: Vec<VersionTag>,
    latest: VersionTag,
    tag_field: String,
}

impl<E: ValidationEngine> VersionedSchema<E> {
    pub(crate) fn new(
        engine: E,
        schema: E::Validator,
        versions: Vec<VersionTag>,
        latest: VersionTag,
        tag_field: String,
    ) -> Self {
        Self {
            engine,
            schema,
            versions,
            latest,
            tag_field,
        }
    }

    /// The engine-native union validator.
    pub fn schema(&self) -> &E::Validator {
        &self.schema
    }

    /// The engine this schema was built with.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// All declared tags, in declaration order.
    pub fn versions(&self) -> &[VersionTag] {
        &self.versions
    }

    /// The last declared tag.
    ///
    /// Declaration order decides, not numeric magnitude.
    pub fn latest(&self) -> &VersionTag {
        &self.latest
    }

    /// Name of the discriminant field.
    pub fn tag_field(&self) -> &str {
        &self.tag_field
    }

    /// Whether `tag` is one of the declared versions.
    pub fn has_version(&self, tag: &VersionTag) -> bool {
        self.versions.contains(tag)
    }

    /// Parses a value against the first version it structurally matches.
    ///
    /// # Errors
    ///
    /// Returns the engine's error when no version accepts the value: the tag
    /// is missing or unknown, or a declared field fails its validator.
    pub fn parse(&self, value: &E::Value) -> Result<E::Value, E::Error> {
        let result = self.engine.parse_or_fail(&self.schema, value);
        if let Err(e) = &result {
            if Logger::enabled(Event::ParseRejected.severity()) {
                let message = e.to_string();
                Logger::log(
                    Event::ParseRejected.severity(),
                    Event::ParseRejected.as_str(),
                    &[("error", message.as_str()), ("tag_field", self.tag_field.as_str())],
                );
            }
        }
        result
    }

    /// Returns true if `parse` would succeed.
    pub fn validate(&self, value: &E::Value) -> bool {
        self.parse(value).is_ok()
    }

    /// Returns the tag of the version a value parses as.
    pub fn version_of(&self, value: &E::Value) -> Option<VersionTag> {
        let parsed = self.parse(value).ok()?;
        self.engine.read_tag(&parsed, &self.tag_field)
    }

    /// Returns true if the value parses and its tag is exactly `tag`.
    pub fn is_version(&self, tag: &VersionTag, value: &E::Value) -> bool {
        self.version_of(value).as_ref() == Some(tag)
    }
}
