//! Version tags and ordered field sets
//!
//! - A tag is a text or integer literal; tags never coerce into each other
//! - A field set keeps insertion order and unique names

use indexmap::map::{IntoIter, Iter};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Literal discriminant identifying one revision of a record shape.
///
/// `Text("1")` and `Int(1)` are different tags.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VersionTag {
    /// Integer tag, e.g. `1`
    Int(i64),
    /// Text tag, e.g. `"1"` or `"2024-01"`
    Text(String),
}

impl fmt::Display for VersionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionTag::Int(n) => write!(f, "{}", n),
            VersionTag::Text(s) => write!(f, "\"{}\"", s),
        }
    }
}

impl From<&str> for VersionTag {
    fn from(s: &str) -> Self {
        VersionTag::Text(s.to_string())
    }
}

impl From<String> for VersionTag {
    fn from(s: String) -> Self {
        VersionTag::Text(s)
    }
}

impl From<i64> for VersionTag {
    fn from(n: i64) -> Self {
        VersionTag::Int(n)
    }
}

impl From<i32> for VersionTag {
    fn from(n: i32) -> Self {
        VersionTag::Int(i64::from(n))
    }
}

impl From<u32> for VersionTag {
    fn from(n: u32) -> Self {
        VersionTag::Int(i64::from(n))
    }
}

/// Ordered mapping from field name to an engine validator.
///
/// Inserting an existing name replaces its validator and keeps the
/// original position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldSet<V> {
    fields: IndexMap<String, V>,
}

impl<V> FieldSet<V> {
    /// Creates an empty field set
    pub fn new() -> Self {
        Self {
            fields: IndexMap::new(),
        }
    }

    /// Builder-style insert
    pub fn with(mut self, name: impl Into<String>, validator: V) -> Self {
        self.insert(name, validator);
        self
    }

    /// Inserts a field, returning the validator it replaced
    pub fn insert(&mut self, name: impl Into<String>, validator: V) -> Option<V> {
        self.fields.insert(name.into(), validator)
    }

    /// Removes a field, closing the gap in the order
    pub fn remove(&mut self, name: &str) -> Option<V> {
        self.fields.shift_remove(name)
    }

    /// Returns the validator for a field
    pub fn get(&self, name: &str) -> Option<&V> {
        self.fields.get(name)
    }

    /// Returns whether a field is declared
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Field names in declaration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Number of declared fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if no fields are declared
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates fields in declaration order
    pub fn iter(&self) -> Iter<'_, String, V> {
        self.fields.iter()
    }
}

impl<V> Default for FieldSet<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, K: Into<String>> FromIterator<(K, V)> for FieldSet<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = FieldSet::new();
        for (name, validator) in iter {
            set.insert(name, validator);
        }
        set
    }
}

impl<V> IntoIterator for FieldSet<V> {
    type Item = (String, V);
    type IntoIter = IntoIter<String, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

impl<'a, V> IntoIterator for &'a FieldSet<V> {
    type Item = (&'a String, &'a V);
    type IntoIter = Iter<'a, String, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_do_not_coerce() {
        assert_ne!(VersionTag::from("1"), VersionTag::from(1i64));
        assert_eq!(VersionTag::from("1"), VersionTag::Text("1".into()));
        assert_eq!(VersionTag::from(7u32), VersionTag::Int(7));
    }

    #[test]
    fn test_tag_display() {
        assert_eq!(VersionTag::Int(3).to_string(), "3");
        assert_eq!(VersionTag::from("3").to_string(), "\"3\"");
    }

    #[test]
    fn test_tag_serde_untagged() {
        let text: VersionTag = serde_json::from_str("\"2\"").unwrap();
        let int: VersionTag = serde_json::from_str("2").unwrap();
        assert_eq!(text, VersionTag::Text("2".into()));
        assert_eq!(int, VersionTag::Int(2));
    }

    #[test]
    fn test_field_set_preserves_order() {
        let set = FieldSet::new()
            .with("zeta", 1)
            .with("alpha", 2)
            .with("mid", 3);
        let names: Vec<_> = set.names().collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_field_set_reinsert_keeps_position() {
        let mut set = FieldSet::new().with("a", 1).with("b", 2);
        assert_eq!(set.insert("a", 10), Some(1));
        let entries: Vec<_> = set.iter().map(|(k, v)| (k.as_str(), *v)).collect();
        assert_eq!(entries, vec![("a", 10), ("b", 2)]);
    }

    #[test]
    fn test_field_set_deserializes_in_document_order() {
        let set: FieldSet<u8> = serde_json::from_str(r#"{"z": 1, "a": 2}"#).unwrap();
        let names: Vec<_> = set.names().collect();
        assert_eq!(names, vec!["z", "a"]);
    }
}
