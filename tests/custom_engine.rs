//! Builder Engine Independence Tests
//!
//! The builder only talks to the `ValidationEngine` trait. A second, tiny
//! engine over flat rows must get the same union semantics the JSON engine
//! gets.

use std::collections::BTreeMap;

use thiserror::Error;
use versioned_schema::engine::ValidationEngine;
use versioned_schema::versioned::{
    BuilderConfig, ConstructionError, FieldSet, VersionTag, VersionedSchemaBuilder,
};

// =============================================================================
// Row Engine
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
enum Datum {
    Text(String),
    Int(i64),
    Row(BTreeMap<String, Datum>),
}

#[derive(Debug, Clone)]
enum RowValidator {
    Text,
    Int,
    Exact(Datum),
    Record(FieldSet<RowValidator>),
    Union(Vec<RowValidator>),
}

#[derive(Debug, Error)]
#[error("{0}")]
struct RowError(String);

/// Strict rows: undeclared columns are refused.
struct RowEngine;

impl RowEngine {
    fn check(&self, validator: &RowValidator, value: &Datum) -> Result<Datum, RowError> {
        match (validator, value) {
            (RowValidator::Text, Datum::Text(_)) | (RowValidator::Int, Datum::Int(_)) => {
                Ok(value.clone())
            }
            (RowValidator::Exact(expected), actual) if expected == actual => Ok(value.clone()),
            (RowValidator::Record(fields), Datum::Row(row)) => {
                if let Some(extra) = row.keys().find(|k| !fields.contains(k)) {
                    return Err(RowError(format!("undeclared column {}", extra)));
                }
                let mut out = BTreeMap::new();
                for (name, column) in fields {
                    let cell = row
                        .get(name)
                        .ok_or_else(|| RowError(format!("missing column {}", name)))?;
                    out.insert(name.clone(), self.check(column, cell)?);
                }
                Ok(Datum::Row(out))
            }
            (RowValidator::Union(branches), _) => {
                let mut reasons = Vec::new();
                for branch in branches {
                    match self.check(branch, value) {
                        Ok(parsed) => return Ok(parsed),
                        Err(e) => reasons.push(e.0),
                    }
                }
                Err(RowError(reasons.join(" | ")))
            }
            (validator, _) => Err(RowError(format!("{:?} refused value", validator))),
        }
    }
}

impl ValidationEngine for RowEngine {
    type Validator = RowValidator;
    type Value = Datum;
    type Error = RowError;

    fn record(&self, fields: FieldSet<RowValidator>) -> RowValidator {
        RowValidator::Record(fields)
    }

    fn literal(&self, tag: &VersionTag) -> RowValidator {
        match tag {
            VersionTag::Int(n) => RowValidator::Exact(Datum::Int(*n)),
            VersionTag::Text(s) => RowValidator::Exact(Datum::Text(s.clone())),
        }
    }

    fn union(&self, branches: Vec<RowValidator>) -> RowValidator {
        RowValidator::Union(branches)
    }

    fn parse_or_fail(&self, validator: &RowValidator, value: &Datum) -> Result<Datum, RowError> {
        self.check(validator, value)
    }

    fn read_tag(&self, value: &Datum, field: &str) -> Option<VersionTag> {
        match value {
            Datum::Row(row) => match row.get(field)? {
                Datum::Text(s) => Some(VersionTag::Text(s.clone())),
                Datum::Int(n) => Some(VersionTag::Int(*n)),
                Datum::Row(_) => None,
            },
            _ => None,
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn row(cells: &[(&str, Datum)]) -> Datum {
    Datum::Row(cells.iter().map(|(k, v)| (k.to_string(), v.clone())).collect())
}

fn text(s: &str) -> Datum {
    Datum::Text(s.to_string())
}

// =============================================================================
// Tests
// =============================================================================

#[test]
fn test_row_engine_parses_each_version() {
    let schema = VersionedSchemaBuilder::new(RowEngine)
        .base(FieldSet::new().with("id", RowValidator::Text))
        .version(1i64, FieldSet::new().with("qty", RowValidator::Int))
        .version(
            2i64,
            FieldSet::new()
                .with("qty", RowValidator::Int)
                .with("sku", RowValidator::Text),
        )
        .build()
        .unwrap();

    let v1 = row(&[("id", text("a")), ("qty", Datum::Int(3)), ("version", Datum::Int(1))]);
    let v2 = row(&[
        ("id", text("a")),
        ("qty", Datum::Int(3)),
        ("sku", text("k")),
        ("version", Datum::Int(2)),
    ]);

    assert_eq!(schema.parse(&v1).unwrap(), v1);
    assert!(schema.is_version(&VersionTag::Int(1), &v1));
    assert!(schema.is_version(&VersionTag::Int(2), &v2));
    assert!(!schema.is_version(&VersionTag::Int(1), &v2));
    assert_eq!(schema.latest(), &VersionTag::Int(2));
}

#[test]
fn test_row_engine_rejections() {
    let schema = VersionedSchemaBuilder::new(RowEngine)
        .base(FieldSet::new().with("id", RowValidator::Text))
        .version("a", FieldSet::new())
        .build()
        .unwrap();

    let unknown = row(&[("id", text("x")), ("version", text("b"))]);
    let text_vs_int = row(&[("id", text("x")), ("version", Datum::Int(1))]);
    let extra = row(&[("id", text("x")), ("version", text("a")), ("more", Datum::Int(1))]);

    assert!(!schema.validate(&unknown));
    assert!(!schema.validate(&text_vs_int));
    // Openness is the engine's call: this engine refuses extra columns
    assert!(schema.parse(&extra).unwrap_err().to_string().contains("undeclared column more"));
}

#[test]
fn test_collision_policy_is_engine_independent() {
    let result = VersionedSchemaBuilder::new(RowEngine)
        .base(FieldSet::new().with("id", RowValidator::Text))
        .version(1i64, FieldSet::new().with("id", RowValidator::Int))
        .build();
    assert!(matches!(result, Err(ConstructionError::FieldCollision { .. })));

    let shadowed = VersionedSchemaBuilder::with_config(RowEngine, BuilderConfig::compatible())
        .base(FieldSet::new().with("id", RowValidator::Text))
        .version(1i64, FieldSet::new().with("id", RowValidator::Int))
        .build()
        .unwrap();
    let value = row(&[("id", Datum::Int(9)), ("version", Datum::Int(1))]);
    assert!(shadowed.validate(&value));
}
