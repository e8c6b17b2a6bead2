//! Canonical schema nodes.

use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;

/// Primitive type markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    Number,
    String,
    Boolean,
    Array,
    Object,
    Date,
}

impl Primitive {
    pub const ALL: [Primitive; 6] = [
        Primitive::Number,
        Primitive::String,
        Primitive::Boolean,
        Primitive::Array,
        Primitive::Object,
        Primitive::Date,
    ];

    /// Lowercase string alias accepted in shorthand descriptions.
    pub fn alias(self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::String => "string",
            Self::Boolean => "boolean",
            Self::Array => "array",
            Self::Object => "object",
            Self::Date => "date",
        }
    }

    /// Expected-type name reported on failure.
    pub fn type_name(self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::String => "string",
            Self::Boolean => "boolean",
            Self::Array => "Array",
            Self::Object => "Object",
            Self::Date => "Date",
        }
    }

    pub fn from_alias(alias: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.alias() == alias)
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.alias())
    }
}

/// The wildcard marker: matches every value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Any;

/// Normalized schema tree.
///
/// Produced once from a [`Description`](super::Description) and then lowered
/// into a validator. `SchemaRef` shares the embedded schema's root instead of
/// copying it; the compiler treats it as if the referenced tree were inlined.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaNode {
    Primitive(Primitive),
    Any,
    Optional(Box<SchemaNode>),
    ArrayOf(Box<SchemaNode>),
    ObjectShape(IndexMap<String, SchemaNode>),
    SchemaRef(Arc<SchemaNode>),
}

impl SchemaNode {
    /// Follows `SchemaRef` links down to the node that carries the check.
    pub fn resolved(&self) -> &SchemaNode {
        match self {
            SchemaNode::SchemaRef(root) => root.resolved(),
            node => node,
        }
    }

    pub fn is_optional(&self) -> bool {
        matches!(self.resolved(), SchemaNode::Optional(_))
    }
}

impl From<Primitive> for SchemaNode {
    fn from(p: Primitive) -> Self {
        SchemaNode::Primitive(p)
    }
}

impl From<Any> for SchemaNode {
    fn from(_: Any) -> Self {
        SchemaNode::Any
    }
}

/// Renders the shorthand form: `number`, `?string`, `date[]`,
/// `{ id: number, tags: string[] }`.
impl fmt::Display for SchemaNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaNode::Primitive(p) => write!(f, "{p}"),
            SchemaNode::Any => f.write_str("any"),
            SchemaNode::Optional(inner) => write!(f, "?{inner}"),
            // `?x[]` reads as an optional array, so optional elements get brackets.
            SchemaNode::ArrayOf(inner) if inner.is_optional() => write!(f, "[{inner}]"),
            SchemaNode::ArrayOf(inner) => write!(f, "{inner}[]"),
            SchemaNode::ObjectShape(fields) if fields.is_empty() => f.write_str("{}"),
            SchemaNode::ObjectShape(fields) => {
                f.write_str("{ ")?;
                for (i, (key, node)) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {node}")?;
                }
                f.write_str(" }")
            }
            SchemaNode::SchemaRef(root) => write!(f, "{root}"),
        }
    }
}
