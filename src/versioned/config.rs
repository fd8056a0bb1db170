//! Builder configuration

/// Default name of the discriminant field
pub const DEFAULT_TAG_FIELD: &str = "version";

/// How name clashes between field sets are handled at build time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionPolicy {
    /// Refuse to build on a base/version clash or a caller field named like the tag field
    Reject,
    /// Version fields replace base fields; the tag literal replaces caller tag fields
    Shadow,
}

/// Configuration for building a versioned schema.
#[derive(Debug, Clone)]
pub struct BuilderConfig {
    /// Name of the generated discriminant field.
    pub tag_field: String,
    /// Clash handling between base, version, and tag fields.
    pub collisions: CollisionPolicy,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            tag_field: DEFAULT_TAG_FIELD.to_string(),
            collisions: CollisionPolicy::Reject,
        }
    }
}

impl BuilderConfig {
    /// Config that shadows on clashes instead of failing.
    pub fn compatible() -> Self {
        Self {
            collisions: CollisionPolicy::Shadow,
            ..Self::default()
        }
    }

    /// Use a different discriminant field name.
    pub fn with_tag_field(mut self, tag_field: impl Into<String>) -> Self {
        self.tag_field = tag_field.into();
        self
    }

    /// Check if clashes are fatal.
    pub fn rejects_collisions(&self) -> bool {
        self.collisions == CollisionPolicy::Reject
    }
}
