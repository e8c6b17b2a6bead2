use std::fmt;
use std::sync::Arc;

use crate::date::parse_date;
use crate::error::ValidationError;
use crate::value::Value;

/// Turns a raw value into epoch milliseconds; `None` is the invalid-date
/// state.
pub type DateParserFn = dyn Fn(&Value) -> Option<f64> + Send + Sync;

/// Called with `(field_path, expected_type_name)` on every mismatch.
///
/// The error producer determines whether validation short-circuits:
/// returning `Err` aborts the validate call with that error, returning
/// `Ok(())` lets every remaining sibling field and element be checked.
pub type ErrorProducerFn<E> = dyn Fn(&str, &str) -> Result<(), E> + Send + Sync;

/// Validator configuration, resolved once when a schema is compiled.
pub struct Options<E = ValidationError> {
    pub date_parser: Arc<DateParserFn>,
    pub error_producer: Arc<ErrorProducerFn<E>>,
}

impl Options<ValidationError> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Default for Options<ValidationError> {
    fn default() -> Self {
        Options {
            date_parser: Arc::new(parse_date),
            error_producer: Arc::new(raise),
        }
    }
}

impl<E> Options<E> {
    pub fn with_date_parser<F>(mut self, parser: F) -> Self
    where
        F: Fn(&Value) -> Option<f64> + Send + Sync + 'static,
    {
        self.date_parser = Arc::new(parser);
        self
    }

    /// Replaces the failure policy; the error type follows the producer.
    pub fn with_error_producer<F, E2>(self, producer: F) -> Options<E2>
    where
        F: Fn(&str, &str) -> Result<(), E2> + Send + Sync + 'static,
    {
        Options {
            date_parser: self.date_parser,
            error_producer: Arc::new(producer),
        }
    }
}

impl<E> Clone for Options<E> {
    fn clone(&self) -> Self {
        Options {
            date_parser: Arc::clone(&self.date_parser),
            error_producer: Arc::clone(&self.error_producer),
        }
    }
}

impl<E> fmt::Debug for Options<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options").finish_non_exhaustive()
    }
}

/// Default error producer: abort on the first mismatch.
pub fn raise(field: &str, expected: &str) -> Result<(), ValidationError> {
    Err(ValidationError::new(field, expected))
}
