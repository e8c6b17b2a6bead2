//! Description: schema tokens as users write them, and their normalization.
//!
//! A description may mix native markers, shorthand strings (`"?string"`,
//! `"number[]"`), one-element lists, key → description maps and embedded
//! compiled schemas. [`Description::normalize`] is the single place that
//! decides what a token means; anything it does not recognize fails closed.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};
use serde_json::Value as JsonValue;
use std::sync::Arc;

use super::schema::{Any, Primitive, SchemaNode};
use crate::error::SchemaError;
use crate::path::FieldPath;

#[derive(Debug, Clone, PartialEq)]
pub enum Description {
    Marker(Primitive),
    Any,
    /// Shorthand string form.
    Text(String),
    Optional(Box<Description>),
    /// Sequence literal; only a single element means "array of".
    List(Vec<Description>),
    Shape(IndexMap<String, Description>),
    /// Root of an already compiled schema.
    Schema(Arc<SchemaNode>),
    /// Any other token (numbers, booleans, null). Never recognized.
    Other(JsonValue),
}

impl Description {
    /// Resolves this description into a canonical node.
    ///
    /// `path` labels the position of this token and is what a construction
    /// error reports.
    pub fn normalize(&self, path: &FieldPath) -> Result<SchemaNode, SchemaError> {
        match self {
            Description::Marker(p) => Ok(SchemaNode::Primitive(*p)),
            Description::Any => Ok(SchemaNode::Any),
            Description::Text(text) => normalize_text(text, path),
            Description::Optional(inner) => {
                Ok(SchemaNode::Optional(Box::new(inner.normalize(path)?)))
            }
            Description::List(items) => match items.as_slice() {
                [inner] => Ok(SchemaNode::ArrayOf(Box::new(
                    inner.normalize(&path.each())?,
                ))),
                _ => Err(SchemaError::unknown(self.repr(), path)),
            },
            Description::Schema(root) => Ok(SchemaNode::SchemaRef(Arc::clone(root))),
            Description::Shape(fields) => fields
                .iter()
                .map(|(key, desc)| Ok((key.clone(), desc.normalize(&path.key(key))?)))
                .collect::<Result<IndexMap<_, _>, SchemaError>>()
                .map(SchemaNode::ObjectShape),
            Description::Other(_) => Err(SchemaError::unknown(self.repr(), path)),
        }
    }

    /// Debug-style rendering used in construction errors.
    pub fn repr(&self) -> String {
        match self {
            Description::Marker(p) => format!("[{}]", p.type_name()),
            Description::Any => "[Any]".to_string(),
            Description::Text(text) => format!("'{text}'"),
            Description::Optional(inner) => format!("Optional({})", inner.repr()),
            Description::List(items) => {
                let items: Vec<_> = items.iter().map(Description::repr).collect();
                format!("[{}]", items.join(", "))
            }
            Description::Shape(fields) => {
                let fields: Vec<_> = fields
                    .iter()
                    .map(|(k, d)| format!("{k}: {}", d.repr()))
                    .collect();
                format!("{{ {} }}", fields.join(", "))
            }
            Description::Schema(root) => format!("Schema({root})"),
            Description::Other(v) => v.to_string(),
        }
    }
}

fn normalize_text(text: &str, path: &FieldPath) -> Result<SchemaNode, SchemaError> {
    if let Some(p) = Primitive::from_alias(text) {
        return Ok(SchemaNode::Primitive(p));
    }
    if text == "any" {
        return Ok(SchemaNode::Any);
    }
    if let Some(rest) = text.strip_prefix('?') {
        return Ok(SchemaNode::Optional(Box::new(normalize_text(rest, path)?)));
    }
    if let Some(rest) = text.strip_suffix("[]") {
        return Ok(SchemaNode::ArrayOf(Box::new(normalize_text(
            rest,
            &path.each(),
        )?)));
    }
    Err(SchemaError::unknown(format!("'{text}'"), path))
}

/// Wraps a description as optional.
pub fn optional(inner: impl Into<Description>) -> Description {
    Description::Optional(Box::new(inner.into()))
}

/// A homogeneous array whose elements all match `inner`.
pub fn array_of(inner: impl Into<Description>) -> Description {
    Description::List(vec![inner.into()])
}

/// An object shape; fields keep the given order.
pub fn shape<I, K>(fields: I) -> Description
where
    I: IntoIterator<Item = (K, Description)>,
    K: Into<String>,
{
    Description::Shape(fields.into_iter().map(|(k, d)| (k.into(), d)).collect())
}

impl From<Primitive> for Description {
    fn from(p: Primitive) -> Self {
        Description::Marker(p)
    }
}

impl From<Any> for Description {
    fn from(_: Any) -> Self {
        Description::Any
    }
}

impl From<&str> for Description {
    fn from(text: &str) -> Self {
        Description::Text(text.to_string())
    }
}

impl From<String> for Description {
    fn from(text: String) -> Self {
        Description::Text(text)
    }
}

impl<T: Into<Description>> From<Vec<T>> for Description {
    fn from(items: Vec<T>) -> Self {
        Description::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Description>> From<[T; 1]> for Description {
    fn from([inner]: [T; 1]) -> Self {
        array_of(inner)
    }
}

impl<K: Into<String>, T: Into<Description>> From<IndexMap<K, T>> for Description {
    fn from(fields: IndexMap<K, T>) -> Self {
        Description::Shape(
            fields
                .into_iter()
                .map(|(k, d)| (k.into(), d.into()))
                .collect(),
        )
    }
}

impl From<SchemaNode> for Description {
    fn from(node: SchemaNode) -> Self {
        Description::Schema(Arc::new(node))
    }
}

impl From<JsonValue> for Description {
    fn from(v: JsonValue) -> Self {
        match v {
            JsonValue::String(text) => Description::Text(text),
            JsonValue::Array(items) => {
                Description::List(items.into_iter().map(Description::from).collect())
            }
            JsonValue::Object(map) => Description::Shape(
                map.into_iter()
                    .map(|(k, v)| (k, Description::from(v)))
                    .collect(),
            ),
            other => Description::Other(other),
        }
    }
}

/// Schemas can be authored as JSON: strings are shorthand tokens, arrays are
/// sequence literals and objects are shapes.
impl<'de> Deserialize<'de> for Description {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        JsonValue::deserialize(deserializer).map(Description::from)
    }
}
