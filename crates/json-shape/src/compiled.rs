//! CompiledSchema: a schema description compiled into a reusable validator.

use std::fmt;
use std::sync::Arc;

use serde_json::Value as JsonValue;
use tracing::debug;

use crate::codegen::validator::{compile_node, Check, Options};
use crate::error::{SchemaError, ValidationError};
use crate::path::FieldPath;
use crate::schema::{Description, SchemaNode};
use crate::value::Value;

/// Immutable validator built once from a description and its options.
///
/// Cloning is cheap and shares the compiled checks. A compiled schema is
/// `Send + Sync` and can be used from many threads at once, provided the
/// error producer and date parser it was built with are safe to call
/// concurrently.
pub struct CompiledSchema<E = ValidationError> {
    inner: Arc<Inner<E>>,
}

struct Inner<E> {
    root: Arc<SchemaNode>,
    options: Options<E>,
    check: Check<E>,
}

impl CompiledSchema<ValidationError> {
    /// Compiles `description` with the default options.
    pub fn new(description: impl Into<Description>) -> Result<Self, SchemaError> {
        Self::with_options(description, Options::default())
    }
}

impl<E: 'static> CompiledSchema<E> {
    pub fn with_options(
        description: impl Into<Description>,
        options: Options<E>,
    ) -> Result<Self, SchemaError> {
        let root = description.into().normalize(&FieldPath::root())?;
        Ok(Self::from_node(root, options))
    }

    /// Compiles an already canonical node. Cannot fail.
    pub fn from_node(root: SchemaNode, options: Options<E>) -> Self {
        let root = Arc::new(root);
        let check = compile_node(&root, &FieldPath::root(), &options);
        debug!(schema = %root, "compiled schema");
        CompiledSchema {
            inner: Arc::new(Inner {
                root,
                options,
                check,
            }),
        }
    }
}

impl<E> CompiledSchema<E> {
    /// Checks `value` against the schema.
    ///
    /// On a mismatch the error producer is called; with the default producer
    /// the first mismatch is returned as `Err` and nothing further is checked.
    /// A producer that returns `Ok(())` makes this walk the whole value, so
    /// the call itself returns `Ok(())`.
    pub fn validate(&self, value: &Value) -> Result<(), E> {
        (self.inner.check)(Some(value))
    }

    /// Validates a possibly absent value; `None` is "undefined".
    pub fn validate_maybe(&self, value: Option<&Value>) -> Result<(), E> {
        (self.inner.check)(value)
    }

    /// Validates a `serde_json` value.
    ///
    /// The input is copied into a [`Value`] first, so each call costs one
    /// deep clone. Callers that own the JSON can convert it once with
    /// `Value::from(json)`, which moves instead of copying, and call
    /// [`validate`](Self::validate).
    pub fn validate_json(&self, value: &JsonValue) -> Result<(), E> {
        self.validate(&Value::from(value))
    }

    pub fn root(&self) -> &SchemaNode {
        &self.inner.root
    }

    pub(crate) fn root_arc(&self) -> &Arc<SchemaNode> {
        &self.inner.root
    }

    pub fn options(&self) -> &Options<E> {
        &self.inner.options
    }
}

impl<E> Clone for CompiledSchema<E> {
    fn clone(&self) -> Self {
        CompiledSchema {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<E> fmt::Debug for CompiledSchema<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CompiledSchema")
            .field(&format_args!("{}", self.inner.root))
            .finish()
    }
}

impl<E> From<&CompiledSchema<E>> for Description {
    fn from(schema: &CompiledSchema<E>) -> Self {
        Description::Schema(Arc::clone(schema.root_arc()))
    }
}

impl<E> From<CompiledSchema<E>> for Description {
    fn from(schema: CompiledSchema<E>) -> Self {
        Description::from(&schema)
    }
}

/// Compiles `description` with the default options: the first mismatch
/// aborts validation with a [`ValidationError`].
pub fn compile(description: impl Into<Description>) -> Result<CompiledSchema, SchemaError> {
    CompiledSchema::new(description)
}

pub fn compile_with<E: 'static>(
    description: impl Into<Description>,
    options: Options<E>,
) -> Result<CompiledSchema<E>, SchemaError> {
    CompiledSchema::with_options(description, options)
}

/// Compiles a description written as JSON text.
pub fn compile_json_str(text: &str) -> Result<CompiledSchema, SchemaError> {
    let description: Description = serde_json::from_str(text)?;
    compile(description)
}
