//! Accumulate-mode failure collection.

use std::convert::Infallible;
use std::sync::{Arc, Mutex, PoisonError};

use tracing::debug;

use super::types::Options;
use crate::error::ValidationError;

/// Error producer that records every mismatch and never aborts.
///
/// Because nothing interrupts the walk, a validate call run with these
/// options checks every field and element and the collector ends up holding
/// all failures in encounter order. Share one collector per validate call;
/// concurrent calls through the same collector interleave their failures.
#[derive(Debug, Clone, Default)]
pub struct ErrorCollector {
    errors: Arc<Mutex<Vec<ValidationError>>>,
}

impl ErrorCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn producer(&self) -> impl Fn(&str, &str) -> Result<(), Infallible> + Send + Sync + 'static {
        let errors = Arc::clone(&self.errors);
        move |field: &str, expected: &str| {
            errors
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(ValidationError::new(field, expected));
            Ok(())
        }
    }

    /// Default options with this collector as the error producer.
    pub fn options(&self) -> Options<Infallible> {
        Options::new().with_error_producer(self.producer())
    }

    /// Drains the failures gathered so far.
    pub fn take(&self) -> Vec<ValidationError> {
        let errors = std::mem::take(&mut *self.errors.lock().unwrap_or_else(PoisonError::into_inner));
        if !errors.is_empty() {
            let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
            debug!(error_count = errors.len(), fields = ?fields, "collected validation failures");
        }
        errors
    }

    pub fn len(&self) -> usize {
        self.errors.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
