//! Schema compiler: lowers canonical nodes into a tree of check closures.
//!
//! Every node becomes one boxed closure owning its children's closures, its
//! field path label and the options it needs. The tree is walked once here;
//! a validate call only runs closures.
//!
//! Structural checks come before child checks: an object or array that fails
//! its own kind test reports that failure and never looks at its fields or
//! elements. Siblings are checked in declaration (or index) order and keep
//! going for as long as the error producer returns `Ok`.

use std::sync::Arc;

use tracing::trace;

use super::types::Options;
use crate::path::FieldPath;
use crate::schema::{Primitive, SchemaNode};
use crate::value::Value;

/// A compiled check. `None` stands for an absent value.
pub type Check<E> = Box<dyn Fn(Option<&Value>) -> Result<(), E> + Send + Sync>;

pub fn compile_node<E: 'static>(
    node: &SchemaNode,
    path: &FieldPath,
    opts: &Options<E>,
) -> Check<E> {
    match node {
        SchemaNode::Primitive(kind) => compile_primitive(*kind, path, opts),

        SchemaNode::Any => Box::new(|_: Option<&Value>| -> Result<(), E> { Ok(()) }),

        SchemaNode::Optional(inner) => {
            let check = compile_node(inner, path, opts);
            Box::new(move |value: Option<&Value>| match value {
                None | Some(Value::Null) => Ok(()),
                present => check(present),
            })
        }

        SchemaNode::ArrayOf(inner) => {
            let fail = failure(path, Primitive::Array, opts);
            let check = compile_node(inner, &path.each(), opts);
            Box::new(
                move |value: Option<&Value>| match value.and_then(Value::as_array) {
                    Some(items) => items.iter().try_for_each(|item| check(Some(item))),
                    None => fail(value),
                },
            )
        }

        SchemaNode::ObjectShape(fields) => {
            let fail = failure(path, Primitive::Object, opts);
            let checks: Vec<(String, Check<E>)> = fields
                .iter()
                .map(|(key, node)| (key.clone(), compile_node(node, &path.key(key), opts)))
                .collect();
            Box::new(
                move |value: Option<&Value>| match value.filter(|v| v.is_object_like()) {
                    Some(subject) => checks
                        .iter()
                        .try_for_each(|(key, check)| check(subject.get(key))),
                    None => fail(value),
                },
            )
        }

        // Transparent: same closures as the referenced tree inlined here.
        SchemaNode::SchemaRef(root) => compile_node(root, path, opts),
    }
}

fn compile_primitive<E: 'static>(kind: Primitive, path: &FieldPath, opts: &Options<E>) -> Check<E> {
    let fail = failure(path, kind, opts);
    match kind {
        Primitive::Date => {
            let parser = Arc::clone(&opts.date_parser);
            Box::new(move |value: Option<&Value>| match value {
                Some(Value::Date(_)) => Ok(()),
                Some(raw) if parser(raw).is_some() => Ok(()),
                _ => fail(value),
            })
        }
        _ => Box::new(move |value: Option<&Value>| {
            if value.map_or(false, |v| matches_kind(kind, v)) {
                Ok(())
            } else {
                fail(value)
            }
        }),
    }
}

/// Runtime kind test for a primitive marker, dates excluded.
pub fn matches_kind(kind: Primitive, value: &Value) -> bool {
    match kind {
        Primitive::Number => value.is_number(),
        Primitive::String => value.is_string(),
        Primitive::Boolean => value.is_boolean(),
        Primitive::Array => value.is_array(),
        Primitive::Object => value.is_object_like(),
        Primitive::Date => value.is_date(),
    }
}

fn failure<E: 'static>(
    path: &FieldPath,
    kind: Primitive,
    opts: &Options<E>,
) -> impl Fn(Option<&Value>) -> Result<(), E> + Send + Sync + 'static {
    let field = path.to_string();
    let expected = kind.type_name();
    let producer = Arc::clone(&opts.error_producer);
    move |value: Option<&Value>| {
        let actual = value.map_or("undefined", Value::kind);
        trace!(field = %field, expected, actual, "value does not match schema");
        producer(&field, expected)
    }
}
