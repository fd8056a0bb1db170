//! Version union builder
//!
//! For every declared version, in declaration order:
//! 1. start from the base fields
//! 2. lay the version's own fields over them
//! 3. append the tag field as a literal of the version tag
//! 4. turn the merged set into an engine record
//!
//! The records become the branches of one engine union.

use std::collections::HashSet;

use super::config::BuilderConfig;
use super::errors::{ConstructionError, FieldOrigin, VersionedResult};
use super::schema::VersionedSchema;
use super::types::{FieldSet, VersionTag};
use crate::engine::ValidationEngine;
use crate::observability::{log_event_with_fields, Event};

/// Collects a base field set and per-version field sets, then builds a
/// [`VersionedSchema`].
///
/// # Example
///
/// ```
/// use versioned_schema::engine::json::{JsonEngine, JsonValidator};
/// use versioned_schema::versioned::{FieldSet, VersionedSchemaBuilder};
/// use serde_json::json;
///
/// let schema = VersionedSchemaBuilder::new(JsonEngine::new())
///     .base(FieldSet::new().with("id", JsonValidator::string()))
///     .version("1", FieldSet::new().with("name", JsonValidator::string()))
///     .version("2", FieldSet::new().with("title", JsonValidator::string()))
///     .build()
///     .unwrap();
///
/// assert!(schema.validate(&json!({ "id": "a", "title": "t", "version": "2" })));
/// ```
pub struct VersionedSchemaBuilder<E: ValidationEngine> {
    engine: E,
    config: BuilderConfig,
    base: FieldSet<E::Validator>,
    versions: Vec<(VersionTag, FieldSet<E::Validator>)>,
}

impl<E: ValidationEngine> VersionedSchemaBuilder<E> {
    /// Creates a builder with the default config.
    pub fn new(engine: E) -> Self {
        Self::with_config(engine, BuilderConfig::default())
    }

    pub fn with_config(engine: E, config: BuilderConfig) -> Self {
        Self {
            engine,
            config,
            base: FieldSet::new(),
            versions: Vec::new(),
        }
    }

    /// Sets the fields shared by every version.
    pub fn base(mut self, fields: FieldSet<E::Validator>) -> Self {
        self.base = fields;
        self
    }

    /// Declares the next version.
    pub fn version(mut self, tag: impl Into<VersionTag>, fields: FieldSet<E::Validator>) -> Self {
        self.versions.push((tag.into(), fields));
        self
    }

    /// Declares several versions, keeping iteration order.
    pub fn versions<I, T>(mut self, versions: I) -> Self
    where
        I: IntoIterator<Item = (T, FieldSet<E::Validator>)>,
        T: Into<VersionTag>,
    {
        self.versions
            .extend(versions.into_iter().map(|(tag, fields)| (tag.into(), fields)));
        self
    }

    /// Builds the versioned schema.
    ///
    /// # Errors
    ///
    /// - `EmptyVersions` if no version was declared
    /// - `DuplicateVersion` if a tag was declared twice
    /// - `FieldCollision` / `ReservedField` under `CollisionPolicy::Reject`
    pub fn build(self) -> VersionedResult<VersionedSchema<E>> {
        let result = self.assemble();
        if let Err(e) = &result {
            let message = e.to_string();
            log_event_with_fields(
                Event::BuildRejected,
                &[("code", e.code()), ("message", message.as_str())],
            );
        }
        result
    }

    fn assemble(self) -> VersionedResult<VersionedSchema<E>> {
        let tag_field = self.config.tag_field.clone();

        let latest = match self.versions.last() {
            Some((tag, _)) => tag.clone(),
            None => return Err(ConstructionError::EmptyVersions),
        };

        {
            let mut seen = HashSet::with_capacity(self.versions.len());
            for (tag, _) in &self.versions {
                if !seen.insert(tag) {
                    return Err(ConstructionError::DuplicateVersion(tag.clone()));
                }
            }
        }

        self.check_tag_field(&self.base, FieldOrigin::Base)?;

        let mut branches = Vec::with_capacity(self.versions.len());
        for (tag, fields) in &self.versions {
            self.check_tag_field(fields, FieldOrigin::Version(tag.clone()))?;

            let mut merged = self.base.clone();
            for (name, validator) in fields {
                if *name != tag_field && self.base.contains(name) {
                    if self.config.rejects_collisions() {
                        return Err(ConstructionError::FieldCollision {
                            version: tag.clone(),
                            field: name.clone(),
                        });
                    }
                    let version = tag_label(tag);
                    log_event_with_fields(
                        Event::FieldShadowed,
                        &[("field", name.as_str()), ("version", version.as_str())],
                    );
                }
                merged.insert(name.clone(), validator.clone());
            }

            // Tag goes last, replacing any caller field of the same name
            merged.remove(&tag_field);
            merged.insert(tag_field.clone(), self.engine.literal(tag));

            branches.push(self.engine.record(merged));
        }

        let schema = self.engine.union(branches);
        let versions: Vec<VersionTag> = self.versions.into_iter().map(|(tag, _)| tag).collect();

        let listed = versions
            .iter()
            .map(tag_label)
            .collect::<Vec<_>>()
            .join(",");
        let latest_label = tag_label(&latest);
        log_event_with_fields(
            Event::SchemaBuilt,
            &[
                ("latest", latest_label.as_str()),
                ("tag_field", tag_field.as_str()),
                ("versions", listed.as_str()),
            ],
        );

        Ok(VersionedSchema::new(self.engine, schema, versions, latest, tag_field))
    }

    fn check_tag_field(
        &self,
        fields: &FieldSet<E::Validator>,
        origin: FieldOrigin,
    ) -> VersionedResult<()> {
        let tag_field = self.config.tag_field.as_str();
        if !fields.contains(tag_field) {
            return Ok(());
        }
        if self.config.rejects_collisions() {
            return Err(ConstructionError::ReservedField {
                field: tag_field.to_string(),
                origin,
            });
        }
        let origin = origin.to_string();
        log_event_with_fields(
            Event::TagFieldOverwritten,
            &[("field", tag_field), ("origin", origin.as_str())],
        );
        Ok(())
    }
}

/// Bare tag text for log fields; `Display` quotes text tags.
fn tag_label(tag: &VersionTag) -> String {
    match tag {
        VersionTag::Text(s) => s.clone(),
        VersionTag::Int(n) => n.to_string(),
    }
}

/// Builds a versioned schema from a base field set and ordered versions.
///
/// Shorthand for [`VersionedSchemaBuilder`] with the default config.
pub fn create_versioned_schema<E, I, T>(
    engine: E,
    base: FieldSet<E::Validator>,
    versions: I,
) -> VersionedResult<VersionedSchema<E>>
where
    E: ValidationEngine,
    I: IntoIterator<Item = (T, FieldSet<E::Validator>)>,
    T: Into<VersionTag>,
{
    VersionedSchemaBuilder::new(engine)
        .base(base)
        .versions(versions)
        .build()
}
