//! JSON validator definitions
//!
//! Supported types:
//! - string: UTF-8 string
//! - int: 64-bit integer, floats are not coerced
//! - number: any JSON number
//! - bool: Boolean
//! - any: anything, including null
//! - literal: one exact JSON value
//! - array: homogeneous array with element validator
//! - object: nested object with its own field set
//! - optional: field may be absent (only meaningful as an object field)
//! - nullable: null is accepted in addition to the inner validator
//! - union: first matching branch wins

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::versioned::FieldSet;

/// A structural validator over `serde_json::Value`.
///
/// Deserializes from `{"type": "<kind>", ...}` documents so field sets can
/// be loaded from definition files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum JsonValidator {
    /// UTF-8 string
    String,
    /// Integer (i64 or u64 representable)
    Int,
    /// Any JSON number, integers included
    Number,
    /// Boolean
    Bool,
    /// Any value
    Any,
    /// Exactly this value
    Literal {
        /// The accepted value
        value: Value,
    },
    /// Homogeneous array
    Array {
        /// Element validator
        element: Box<JsonValidator>,
    },
    /// Object with declared fields
    Object {
        /// Field validators in declaration order
        fields: FieldSet<JsonValidator>,
    },
    /// Field that may be absent
    Optional {
        /// Validator applied when the field is present
        inner: Box<JsonValidator>,
    },
    /// Value that may be null
    Nullable {
        /// Validator applied to non-null values
        inner: Box<JsonValidator>,
    },
    /// First matching branch wins
    Union {
        /// Branches in match order
        branches: Vec<JsonValidator>,
    },
}

impl JsonValidator {
    pub fn string() -> Self {
        JsonValidator::String
    }

    pub fn int() -> Self {
        JsonValidator::Int
    }

    pub fn number() -> Self {
        JsonValidator::Number
    }

    pub fn bool() -> Self {
        JsonValidator::Bool
    }

    pub fn any() -> Self {
        JsonValidator::Any
    }

    pub fn literal(value: impl Into<Value>) -> Self {
        JsonValidator::Literal {
            value: value.into(),
        }
    }

    pub fn array(element: JsonValidator) -> Self {
        JsonValidator::Array {
            element: Box::new(element),
        }
    }

    pub fn object(fields: FieldSet<JsonValidator>) -> Self {
        JsonValidator::Object { fields }
    }

    /// Wraps `inner` so the field may be left out.
    pub fn optional(inner: JsonValidator) -> Self {
        JsonValidator::Optional {
            inner: Box::new(inner),
        }
    }

    pub fn nullable(inner: JsonValidator) -> Self {
        JsonValidator::Nullable {
            inner: Box::new(inner),
        }
    }

    pub fn union(branches: Vec<JsonValidator>) -> Self {
        JsonValidator::Union { branches }
    }

    /// Whether an object field with this validator may be absent
    ///
    /// `optional` counts at any depth under `nullable`.
    pub fn allows_absent(&self) -> bool {
        match self {
            JsonValidator::Optional { .. } => true,
            JsonValidator::Nullable { inner } => inner.allows_absent(),
            _ => false,
        }
    }

    /// The last literal-valued field of an object validator.
    ///
    /// Versioned records append their tag literal last, so this names the
    /// version a union branch stands for.
    pub fn discriminant(&self) -> Option<(String, Value)> {
        match self {
            JsonValidator::Object { fields } => fields
                .iter()
                .filter_map(|(name, validator)| match validator {
                    JsonValidator::Literal { value } => Some((name.clone(), value.clone())),
                    _ => None,
                })
                .last(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_only_optional_allows_absent() {
        assert!(JsonValidator::optional(JsonValidator::string()).allows_absent());
        assert!(!JsonValidator::nullable(JsonValidator::string()).allows_absent());
        assert!(!JsonValidator::any().allows_absent());
    }

    #[test]
    fn test_optional_under_nullable_allows_absent() {
        let wrapped = JsonValidator::nullable(JsonValidator::optional(JsonValidator::int()));
        assert!(wrapped.allows_absent());
        let deeper = JsonValidator::nullable(JsonValidator::nullable(JsonValidator::optional(
            JsonValidator::int(),
        )));
        assert!(deeper.allows_absent());
    }

    #[test]
    fn test_discriminant_is_last_literal() {
        let record = JsonValidator::object(
            FieldSet::new()
                .with("kind", JsonValidator::literal("user"))
                .with("name", JsonValidator::string())
                .with("version", JsonValidator::literal("2")),
        );
        assert_eq!(
            record.discriminant(),
            Some(("version".to_string(), json!("2")))
        );
        assert_eq!(JsonValidator::string().discriminant(), None);
    }

    #[test]
    fn test_deserialize_nested_definition() {
        let validator: JsonValidator = serde_json::from_value(json!({
            "type": "object",
            "fields": {
                "tags": { "type": "array", "element": { "type": "string" } },
                "note": { "type": "optional", "inner": { "type": "string" } },
                "kind": { "type": "literal", "value": "post" }
            }
        }))
        .unwrap();

        let expected = JsonValidator::object(
            FieldSet::new()
                .with("tags", JsonValidator::array(JsonValidator::string()))
                .with("note", JsonValidator::optional(JsonValidator::string()))
                .with("kind", JsonValidator::literal("post")),
        );
        assert_eq!(validator, expected);
    }

    #[test]
    fn test_unknown_type_rejected() {
        let result: Result<JsonValidator, _> = serde_json::from_value(json!({ "type": "date" }));
        assert!(result.is_err());
    }
}
