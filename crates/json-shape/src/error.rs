use thiserror::Error;

use crate::path::FieldPath;

/// Raised while turning a schema description into a validator.
///
/// Construction errors are never deferred: a description that contains an
/// unrecognized token anywhere in its tree fails before any validator is
/// produced.
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("Unknown schema type {repr} for {field}")]
    UnknownSchema { repr: String, field: String },

    #[error("Invalid schema JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl SchemaError {
    pub fn unknown(repr: impl Into<String>, field: &FieldPath) -> Self {
        SchemaError::UnknownSchema {
            repr: repr.into(),
            field: field.to_string(),
        }
    }

    /// The field path of the offending schema position, if any.
    pub fn field(&self) -> Option<&str> {
        match self {
            SchemaError::UnknownSchema { field, .. } => Some(field),
            SchemaError::Json(_) => None,
        }
    }
}

/// A value that does not match its expected shape at `field`.
///
/// Returned by the default error producer, which aborts the validate call
/// on the first mismatch.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{field} is not a {expected}.")]
pub struct ValidationError {
    pub field: String,
    pub expected: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, expected: impl Into<String>) -> Self {
        ValidationError {
            field: field.into(),
            expected: expected.into(),
        }
    }
}
