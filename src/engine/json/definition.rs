//! Versioned schema definition files
//!
//! A definition is a JSON document:
//!
//! ```json
//! {
//!   "name": "user",
//!   "base": { "id": { "type": "string" } },
//!   "versions": {
//!     "1": { "name": { "type": "string" } },
//!     "2": { "first": { "type": "string" }, "last": { "type": "string" } }
//!   }
//! }
//! ```
//!
//! Key order in `base`, in each version, and in `versions` itself is the
//! order of the document. Tags read from a definition are text tags. A tag
//! that appears twice in `versions` makes the document malformed.

use std::fmt;
use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use super::{JsonEngine, JsonValidator};
use crate::observability::{log_event_with_fields, Event};
use crate::versioned::{
    BuilderConfig, DefinitionError, FieldSet, VersionTag, VersionedSchema, VersionedSchemaBuilder,
};

/// Serializable description of a versioned schema over the JSON engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VersionedSchemaDef {
    /// Optional label used in logs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Overrides the builder config's tag field when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_field: Option<String>,
    /// Fields shared by every version
    #[serde(default)]
    pub base: FieldSet<JsonValidator>,
    /// Version tag to version-specific fields, in declaration order
    #[serde(deserialize_with = "unique_versions")]
    pub versions: IndexMap<String, FieldSet<JsonValidator>>,
}

/// Reads the `versions` map, refusing a tag seen earlier in the document.
fn unique_versions<'de, D>(
    deserializer: D,
) -> Result<IndexMap<String, FieldSet<JsonValidator>>, D::Error>
where
    D: Deserializer<'de>,
{
    struct VersionsVisitor;

    impl<'de> Visitor<'de> for VersionsVisitor {
        type Value = IndexMap<String, FieldSet<JsonValidator>>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map of version tags to field sets")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            let mut versions = IndexMap::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((tag, fields)) = map.next_entry::<String, FieldSet<JsonValidator>>()? {
                if versions.contains_key(&tag) {
                    return Err(de::Error::custom(format!(
                        "version '{}' declared more than once",
                        tag
                    )));
                }
                versions.insert(tag, fields);
            }
            Ok(versions)
        }
    }

    deserializer.deserialize_map(VersionsVisitor)
}

impl VersionedSchemaDef {
    /// Parses a definition from JSON text.
    pub fn from_json_str(content: &str) -> Result<Self, DefinitionError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Reads a definition file.
    pub fn from_path(path: &Path) -> Result<Self, DefinitionError> {
        let content = fs::read_to_string(path).map_err(|source| DefinitionError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    /// Builds the described schema.
    pub fn build(
        &self,
        engine: JsonEngine,
        config: BuilderConfig,
    ) -> Result<VersionedSchema<JsonEngine>, DefinitionError> {
        let config = match &self.tag_field {
            Some(tag_field) => config.with_tag_field(tag_field.clone()),
            None => config,
        };
        let versions = self
            .versions
            .iter()
            .map(|(tag, fields)| (VersionTag::from(tag.as_str()), fields.clone()));

        let schema = VersionedSchemaBuilder::with_config(engine, config)
            .base(self.base.clone())
            .versions(versions)
            .build()?;
        Ok(schema)
    }

    /// Reads a definition file and builds it.
    pub fn load(
        path: &Path,
        engine: JsonEngine,
        config: BuilderConfig,
    ) -> Result<VersionedSchema<JsonEngine>, DefinitionError> {
        let def = Self::from_path(path)?;
        let schema = def.build(engine, config)?;

        let path_label = path.display().to_string();
        log_event_with_fields(
            Event::DefinitionLoaded,
            &[
                ("name", def.name.as_deref().unwrap_or("")),
                ("path", path_label.as_str()),
            ],
        );
        Ok(schema)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const USER_DEF: &str = r#"{
        "name": "user",
        "base": {
            "id": { "type": "string" },
            "createdAt": { "type": "number" }
        },
        "versions": {
            "2": { "name": { "type": "string" }, "description": { "type": "string" } },
            "1": { "name": { "type": "string" } }
        }
    }"#;

    #[test]
    fn test_parse_keeps_document_order() {
        let def = VersionedSchemaDef::from_json_str(USER_DEF).unwrap();
        let tags: Vec<_> = def.versions.keys().map(String::as_str).collect();
        assert_eq!(tags, vec!["2", "1"]);
        assert_eq!(def.name.as_deref(), Some("user"));
    }

    #[test]
    fn test_build_from_definition() {
        let def = VersionedSchemaDef::from_json_str(USER_DEF).unwrap();
        let schema = def.build(JsonEngine::new(), BuilderConfig::default()).unwrap();

        assert_eq!(schema.latest(), &VersionTag::from("1"));
        let v2 = json!({
            "id": "x", "createdAt": 1, "name": "n", "description": "d", "version": "2"
        });
        assert!(schema.is_version(&VersionTag::from("2"), &v2));
    }

    #[test]
    fn test_tag_field_override() {
        let def = VersionedSchemaDef::from_json_str(
            r#"{ "tag_field": "rev", "versions": { "1": {} } }"#,
        )
        .unwrap();
        let schema = def.build(JsonEngine::new(), BuilderConfig::default()).unwrap();
        assert_eq!(schema.tag_field(), "rev");
        assert!(schema.validate(&json!({ "rev": "1" })));
    }

    #[test]
    fn test_malformed_definition() {
        let err = VersionedSchemaDef::from_json_str(r#"{ "base": {} }"#).unwrap_err();
        assert_eq!(err.code(), "VERSIONED_DEFINITION_MALFORMED");

        let err = VersionedSchemaDef::from_json_str(
            r#"{ "versions": {}, "extra": true }"#,
        )
        .unwrap_err();
        assert_eq!(err.code(), "VERSIONED_DEFINITION_MALFORMED");
    }

    #[test]
    fn test_repeated_tag_is_malformed() {
        let err = VersionedSchemaDef::from_json_str(
            r#"{ "versions": { "1": {}, "2": {}, "1": { "b": { "type": "int" } } } }"#,
        )
        .unwrap_err();
        assert_eq!(err.code(), "VERSIONED_DEFINITION_MALFORMED");
        assert!(err.to_string().contains("version '1' declared more than once"));
    }

    #[test]
    fn test_empty_versions_is_construction_error() {
        let def = VersionedSchemaDef::from_json_str(r#"{ "versions": {} }"#).unwrap();
        let err = def.build(JsonEngine::new(), BuilderConfig::default()).unwrap_err();
        assert_eq!(err.code(), "VERSIONED_EMPTY_VERSIONS");
    }
}
