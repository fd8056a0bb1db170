//! JSON validation engine
//!
//! Validation semantics:
//! - All non-optional declared fields are present
//! - Undeclared fields are stripped, rejected, or kept per [`UnknownFields`]
//! - Field types match exactly; ints are never produced from floats
//! - Null is refused unless the validator is `nullable` or `any`
//! - Union branches are tried in order and the first match wins
//!
//! Parsed objects are rebuilt from their declared fields, so parsing a
//! parsed value again yields the same value.

mod definition;
mod errors;
mod validator;

pub use definition::VersionedSchemaDef;
pub use errors::{BranchFailure, DecodeError, JsonValidationError, ValidationDetails};
pub use validator::JsonValidator;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::ValidationEngine;
use crate::versioned::{FieldSet, VersionTag, VersionedSchema};

/// Handling of object keys no validator declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownFields {
    /// Accept the value and drop the keys from the parsed output
    #[default]
    Strip,
    /// Refuse the value
    Reject,
    /// Accept the value and keep the keys verbatim
    Passthrough,
}

/// Configuration for the JSON engine.
#[derive(Debug, Clone, Default)]
pub struct JsonEngineConfig {
    /// Policy for undeclared object keys, applied at every nesting level.
    pub unknown_fields: UnknownFields,
}

impl JsonEngineConfig {
    /// Config that refuses undeclared keys.
    pub fn strict() -> Self {
        Self {
            unknown_fields: UnknownFields::Reject,
        }
    }

    /// Config that keeps undeclared keys.
    pub fn passthrough() -> Self {
        Self {
            unknown_fields: UnknownFields::Passthrough,
        }
    }
}

/// [`ValidationEngine`] over `serde_json::Value`.
///
/// Holds only configuration; safe to share across threads.
#[derive(Debug, Clone, Default)]
pub struct JsonEngine {
    config: JsonEngineConfig,
}

impl JsonEngine {
    /// Creates an engine with the default config (undeclared keys stripped).
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: JsonEngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &JsonEngineConfig {
        &self.config
    }

    /// Validates a value against a validator, producing the parsed value.
    pub fn check(
        &self,
        validator: &JsonValidator,
        value: &Value,
    ) -> Result<Value, JsonValidationError> {
        self.check_value(validator, value, "")
    }

    fn check_value(
        &self,
        validator: &JsonValidator,
        value: &Value,
        path: &str,
    ) -> Result<Value, JsonValidationError> {
        match validator {
            JsonValidator::Any => Ok(value.clone()),
            JsonValidator::Literal { value: expected } => {
                if value != expected {
                    let details =
                        ValidationDetails::literal_mismatch(field_label(path), expected, value);
                    return Err(details.into());
                }
                Ok(value.clone())
            }
            JsonValidator::Nullable { inner } => {
                if value.is_null() {
                    return Ok(Value::Null);
                }
                self.check_value(inner, value, path)
            }
            // Absence is handled by the enclosing object
            JsonValidator::Optional { inner } => self.check_value(inner, value, path),
            JsonValidator::Union { branches } => self.check_union(branches, value, path),
            _ if value.is_null() => Err(ValidationDetails::null_value(field_label(path)).into()),
            JsonValidator::String => {
                if !value.is_string() {
                    return Err(type_error(path, "string", value));
                }
                Ok(value.clone())
            }
            JsonValidator::Int => {
                if !value.is_i64() && !value.is_u64() {
                    return Err(type_error(path, "int", value));
                }
                Ok(value.clone())
            }
            JsonValidator::Number => {
                if !value.is_number() {
                    return Err(type_error(path, "number", value));
                }
                Ok(value.clone())
            }
            JsonValidator::Bool => {
                if !value.is_boolean() {
                    return Err(type_error(path, "bool", value));
                }
                Ok(value.clone())
            }
            JsonValidator::Array { element } => {
                let arr = value.as_array().ok_or_else(|| type_error(path, "array", value))?;
                let mut out = Vec::with_capacity(arr.len());
                for (i, elem) in arr.iter().enumerate() {
                    let elem_path = format!("{}[{}]", field_label(path), i);
                    out.push(self.check_value(element, elem, &elem_path)?);
                }
                Ok(Value::Array(out))
            }
            JsonValidator::Object { fields } => {
                let obj = value.as_object().ok_or_else(|| type_error(path, "object", value))?;
                self.check_object(obj, fields, path).map(Value::Object)
            }
        }
    }

    fn check_object(
        &self,
        obj: &Map<String, Value>,
        fields: &FieldSet<JsonValidator>,
        path_prefix: &str,
    ) -> Result<Map<String, Value>, JsonValidationError> {
        if self.config.unknown_fields == UnknownFields::Reject {
            if let Some(key) = obj.keys().find(|key| !fields.contains(key)) {
                return Err(ValidationDetails::extra_field(make_path(path_prefix, key)).into());
            }
        }

        let mut out = Map::new();
        for (field_name, field_validator) in fields {
            let field_path = make_path(path_prefix, field_name);
            match obj.get(field_name) {
                Some(value) => {
                    let parsed = self.check_value(field_validator, value, &field_path)?;
                    out.insert(field_name.clone(), parsed);
                }
                None => {
                    if !field_validator.allows_absent() {
                        return Err(ValidationDetails::missing_field(field_path).into());
                    }
                }
            }
        }

        if self.config.unknown_fields == UnknownFields::Passthrough {
            for (key, value) in obj {
                if !fields.contains(key) {
                    out.insert(key.clone(), value.clone());
                }
            }
        }

        Ok(out)
    }

    fn check_union(
        &self,
        branches: &[JsonValidator],
        value: &Value,
        path: &str,
    ) -> Result<Value, JsonValidationError> {
        let mut failures = Vec::with_capacity(branches.len());
        for (index, branch) in branches.iter().enumerate() {
            match self.check_value(branch, value, path) {
                Ok(parsed) => return Ok(parsed),
                Err(error) => failures.push(BranchFailure {
                    index,
                    discriminant: branch.discriminant(),
                    error,
                }),
            }
        }
        Err(JsonValidationError::NoBranchMatched { branches: failures })
    }
}

impl ValidationEngine for JsonEngine {
    type Validator = JsonValidator;
    type Value = Value;
    type Error = JsonValidationError;

    fn record(&self, fields: FieldSet<JsonValidator>) -> JsonValidator {
        JsonValidator::object(fields)
    }

    fn literal(&self, tag: &VersionTag) -> JsonValidator {
        match tag {
            VersionTag::Int(n) => JsonValidator::literal(*n),
            VersionTag::Text(s) => JsonValidator::literal(s.as_str()),
        }
    }

    fn union(&self, branches: Vec<JsonValidator>) -> JsonValidator {
        JsonValidator::union(branches)
    }

    fn parse_or_fail(
        &self,
        validator: &JsonValidator,
        value: &Value,
    ) -> Result<Value, JsonValidationError> {
        self.check(validator, value)
    }

    fn read_tag(&self, value: &Value, field: &str) -> Option<VersionTag> {
        match value.get(field)? {
            Value::String(s) => Some(VersionTag::Text(s.clone())),
            Value::Number(n) => n.as_i64().map(VersionTag::Int),
            _ => None,
        }
    }
}

impl VersionedSchema<JsonEngine> {
    /// Parses a value and deserializes the result into `T`.
    ///
    /// `T` is typically an enum tagged on the version field, e.g.
    /// `#[serde(tag = "version")]`.
    pub fn parse_into<T: DeserializeOwned>(&self, value: &Value) -> Result<T, DecodeError> {
        let parsed = self.parse(value)?;
        Ok(serde_json::from_value(parsed)?)
    }
}

/// Returns the JSON type name for error messages.
fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                "int"
            } else {
                "float"
            }
        }
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn field_label(path: &str) -> &str {
    if path.is_empty() {
        "$root"
    } else {
        path
    }
}

/// Creates a field path from prefix and field name.
fn make_path(prefix: &str, field: &str) -> String {
    if prefix.is_empty() {
        field.to_string()
    } else {
        format!("{}.{}", prefix, field)
    }
}

fn type_error(path: &str, expected: &str, actual: &Value) -> JsonValidationError {
    ValidationDetails::type_mismatch(field_label(path), expected, json_type_name(actual)).into()
}
