//! Schema model: canonical nodes and the description vocabulary.

pub mod builder;
pub mod description;
#[allow(clippy::module_inception)]
pub mod schema;

pub use builder::SchemaBuilder;
pub use description::{array_of, optional, shape, Description};
pub use schema::{Any, Primitive, SchemaNode};
