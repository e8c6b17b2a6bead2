#[allow(clippy::module_inception)]
pub mod value;

pub use value::Value;
