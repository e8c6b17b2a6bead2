//! SchemaBuilder: typed construction of canonical nodes.
//!
//! Nodes built here skip normalization entirely, so they can never produce a
//! construction error.

use super::schema::{Primitive, SchemaNode};
use crate::compiled::CompiledSchema;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaBuilder;

impl SchemaBuilder {
    pub fn new() -> Self {
        Self
    }

    // ------------------------------------------------------------------
    // Primitives

    pub fn num(&self) -> SchemaNode {
        SchemaNode::Primitive(Primitive::Number)
    }

    pub fn str(&self) -> SchemaNode {
        SchemaNode::Primitive(Primitive::String)
    }

    pub fn bool(&self) -> SchemaNode {
        SchemaNode::Primitive(Primitive::Boolean)
    }

    pub fn arr(&self) -> SchemaNode {
        SchemaNode::Primitive(Primitive::Array)
    }

    pub fn obj(&self) -> SchemaNode {
        SchemaNode::Primitive(Primitive::Object)
    }

    pub fn date(&self) -> SchemaNode {
        SchemaNode::Primitive(Primitive::Date)
    }

    pub fn any(&self) -> SchemaNode {
        SchemaNode::Any
    }

    // ------------------------------------------------------------------
    // Composites

    pub fn optional(&self, inner: SchemaNode) -> SchemaNode {
        SchemaNode::Optional(Box::new(inner))
    }

    pub fn array_of(&self, inner: SchemaNode) -> SchemaNode {
        SchemaNode::ArrayOf(Box::new(inner))
    }

    /// Object shape with fields checked in the given order.
    pub fn object<I, K>(&self, fields: I) -> SchemaNode
    where
        I: IntoIterator<Item = (K, SchemaNode)>,
        K: Into<String>,
    {
        SchemaNode::ObjectShape(fields.into_iter().map(|(k, n)| (k.into(), n)).collect())
    }

    /// Embeds a compiled schema, sharing its root node.
    pub fn schema_ref<E>(&self, schema: &CompiledSchema<E>) -> SchemaNode {
        SchemaNode::SchemaRef(Arc::clone(schema.root_arc()))
    }
}
