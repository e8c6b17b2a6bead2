//! `json-shape`: runtime data-shape validation.
//!
//! A schema description (type markers, shorthand strings such as
//! `"?string"` or `"number[]"`, one-element lists, key → description maps
//! and other compiled schemas) is compiled once into a [`CompiledSchema`],
//! whose `validate` can then be called any number of times.
//!
//! # Example
//!
//! ```
//! use json_shape::compile;
//! use serde_json::json;
//!
//! let user = compile(json!({ "id": "number", "name": "string", "age": "?number" })).unwrap();
//! assert!(user.validate_json(&json!({ "id": 1, "name": "Jane" })).is_ok());
//!
//! let err = user.validate_json(&json!({ "id": "1", "name": "Jane" })).unwrap_err();
//! assert_eq!(err.to_string(), "value.id is not a number.");
//! ```
//!
//! Failure policy is pluggable through [`Options::with_error_producer`]: the
//! error producer determines whether validation short-circuits (return
//! `Err`) or keeps checking every field (return `Ok(())`, see
//! [`ErrorCollector`]).

pub mod codegen;
pub mod compiled;
pub mod date;
pub mod error;
pub mod path;
pub mod schema;
pub mod value;

pub use codegen::validator::{ErrorCollector, Options};
pub use compiled::{compile, compile_json_str, compile_with, CompiledSchema};
pub use error::{SchemaError, ValidationError};
pub use path::FieldPath;
pub use schema::{array_of, optional, shape, Any, Description, Primitive, SchemaBuilder, SchemaNode};
pub use value::Value;
