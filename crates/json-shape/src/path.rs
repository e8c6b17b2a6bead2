//! Field paths: dotted labels naming a schema position.
//!
//! Paths are fixed at compile time, one per schema position, so a failure
//! names the schema location (`value.comments.$.author.id`) rather than an
//! instance-specific array index.

use std::fmt;

/// Label of the value handed to `validate`.
pub const ROOT: &str = "value";

/// Segment standing for "any element of this array".
pub const EACH: &str = "$";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath(String);

impl FieldPath {
    pub fn root() -> Self {
        FieldPath(ROOT.to_string())
    }

    /// A path starting from a custom root label.
    pub fn new(label: impl Into<String>) -> Self {
        FieldPath(label.into())
    }

    /// Path of the object field `key` below this one.
    pub fn key(&self, key: &str) -> Self {
        FieldPath(format!("{}.{}", self.0, key))
    }

    /// Path of every element of the array at this position.
    pub fn each(&self) -> Self {
        self.key(EACH)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for FieldPath {
    fn default() -> Self {
        Self::root()
    }
}

impl AsRef<str> for FieldPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
