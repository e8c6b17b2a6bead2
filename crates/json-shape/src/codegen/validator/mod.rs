pub mod collector;
pub mod types;
#[allow(clippy::module_inception)]
pub mod validator;

pub use collector::ErrorCollector;
pub use types::{raise, DateParserFn, ErrorProducerFn, Options};
pub use validator::{compile_node, Check};
